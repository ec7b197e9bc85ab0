//! Clients for the Ethernet instruments on the bench: a Hittite signal
//! generator over its raw SCPI socket, a Keithley 2280 supply over VXI-11
//! and a Micro Lambda YIG filter over telnet. One blocking call per command,
//! explicit errors, no hidden retries.

pub mod compat;
pub mod error;
pub mod instruments;
#[cfg(test)]
mod mock_io;
pub mod protocols;
pub mod scpi;
pub mod units;

pub use compat::SignalGenerator;
pub use error::Error;
pub use instruments::hittite::Hittite;
pub use instruments::keithley::Keithley2280;
pub use instruments::microlambda::YigFilter;
pub use instruments::{Instrument, Messenger, Model};
pub use protocols::{Protocol, Tcp, Telnet, Vxi11};

pub type Result<T> = std::result::Result<T, Error>;
