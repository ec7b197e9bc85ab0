//! Transports that carry instrument command text.

pub mod error;
pub mod onc_rpc;
pub mod tcp;
pub mod telnet;

pub use self::error::{ConnectionError, TransportError};
pub use self::onc_rpc::vxi11::Vxi11;
pub use self::tcp::Tcp;
pub use self::telnet::Telnet;

/// A way of opening a byte stream to an instrument.
///
/// The protocol value carries its own settings (such as the port); `connect`
/// consumes it and yields the ready stream.
pub trait Protocol {
    type Address;
    type IO: std::io::Read + std::io::Write;
    fn connect(self, address: Self::Address) -> Result<Self::IO, ConnectionError>;
}
