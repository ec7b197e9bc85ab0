use super::error::ConnectionError;
use super::Protocol;
use log::{debug, warn};
use std::net::TcpStream;

/// Raw TCP socket transport.
pub struct Tcp {
    pub port: u16,
}

impl Tcp {
    /// Conventional port of a raw SCPI socket.
    pub const SCPI_PORT: u16 = 5025;
}

impl Default for Tcp {
    fn default() -> Self {
        Tcp {
            port: Self::SCPI_PORT,
        }
    }
}

impl Protocol for Tcp {
    type IO = TcpStream;
    type Address = String;
    fn connect(self, host: Self::Address) -> Result<Self::IO, ConnectionError> {
        let endpoint = format!("{}:{}", host, self.port);
        debug!("connecting to {}", endpoint);
        TcpStream::connect((host.as_str(), self.port)).map_err(|source| {
            warn!("connect to {} failed: {}", endpoint, source);
            ConnectionError { endpoint, source }
        })
    }
}
