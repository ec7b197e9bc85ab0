use std::io;
use thiserror::Error;

/// Failure to reach an instrument in the first place.
#[derive(Error, Debug)]
#[error("cannot connect to {endpoint}: {source}")]
pub struct ConnectionError {
    /// `host:port` the connection was aimed at.
    pub endpoint: String,
    #[source]
    pub source: io::Error,
}

/// Failure on an established connection.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Command text must be plain ASCII before it goes on the wire.
    #[error("command {command:?} is not ASCII")]
    NotAscii { command: String },
    #[error("failed to send {command:?}: {source}")]
    Send {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to read reply: {source}")]
    Receive {
        #[source]
        source: io::Error,
    },
    /// The reply bytes do not decode as text.
    #[error("garbled reply {reply:?}")]
    Garbled { reply: Vec<u8> },
    /// The instrument closed the connection before a reply arrived.
    #[error("connection closed by instrument")]
    Closed,
}
