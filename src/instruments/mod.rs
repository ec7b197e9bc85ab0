//! The request/response machinery shared by every instrument.
//!
//! A [`Messenger`] frames command text onto a byte stream: one write per
//! command with the terminator appended, one read per reply. Binding it to a
//! [`Model`] yields an [`Instrument`], which only accepts the command
//! vocabulary of that model and knows how to parse numeric replies.

use crate::error::Error;
use crate::protocols::error::TransportError;
use crate::scpi::Command;
use log::debug;
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::num::ParseFloatError;
use thiserror::Error as ThisError;

pub mod hittite;
pub mod keithley;
pub mod microlambda;

/// Longest reply taken in one receive; anything beyond this is truncated.
pub const RECV_LEN: usize = 1024;

/// A device type: its command vocabulary and line conventions.
pub trait Model {
    const DESCRIPTION: &'static str;
    const TERMINATOR: &'static [u8] = b"\n";
    type Set: Into<Command>;
    type Query: Into<Command>;
}

/// A reply that should have been a number but was not.
#[derive(ThisError, Debug)]
#[error("reply {reply:?} to {command:?} is not a number: {source}")]
pub struct ParseError {
    pub command: String,
    pub reply: String,
    #[source]
    pub source: ParseFloatError,
}

pub struct Messenger<IO> {
    io: IO,
}

impl<IO: Read + Write> Messenger<IO> {
    pub fn new(io: IO) -> Self {
        Self { io }
    }

    pub fn bind<M: Model>(self, _model: M) -> Instrument<IO, M> {
        Instrument {
            messenger: self,
            model: PhantomData,
        }
    }

    /// Sends one command line: the text plus `terminator`, in a single write.
    pub fn send(&mut self, command: &str, terminator: &[u8]) -> Result<(), TransportError> {
        if !command.is_ascii() {
            return Err(TransportError::NotAscii {
                command: command.to_string(),
            });
        }
        debug!("-> {}", command);
        let mut line = Vec::with_capacity(command.len() + terminator.len());
        line.extend_from_slice(command.as_bytes());
        line.extend_from_slice(terminator);
        self.io
            .write_all(&line)
            .and_then(|()| self.io.flush())
            .map_err(|source| TransportError::Send {
                command: command.to_string(),
                source,
            })
    }

    /// Takes one reply in a single read and trims surrounding whitespace.
    pub fn receive(&mut self) -> Result<String, TransportError> {
        let mut buf = [0_u8; RECV_LEN];
        let n = self
            .io
            .read(&mut buf)
            .map_err(|source| TransportError::Receive { source })?;
        if n == 0 {
            return Err(TransportError::Closed);
        }
        let text = std::str::from_utf8(&buf[..n]).map_err(|_| TransportError::Garbled {
            reply: buf[..n].to_vec(),
        })?;
        let reply = text.trim().to_string();
        debug!("<- {}", reply);
        Ok(reply)
    }

    pub fn into_inner(self) -> IO {
        self.io
    }
}

pub struct Instrument<IO, M: Model> {
    messenger: Messenger<IO>,
    model: PhantomData<M>,
}

impl<IO: Read + Write, M: Model> Instrument<IO, M> {
    pub fn describe(&self) -> &'static str {
        M::DESCRIPTION
    }

    pub fn set(&mut self, command: M::Set) -> Result<(), Error> {
        let command: Command = command.into();
        self.messenger.send(command.as_str(), M::TERMINATOR)?;
        Ok(())
    }

    pub fn query(&mut self, command: M::Query) -> Result<String, Error> {
        let command: Command = command.into();
        self.messenger.send(command.as_str(), M::TERMINATOR)?;
        Ok(self.messenger.receive()?)
    }

    /// Queries and parses the reply as a float.
    pub fn query_value(&mut self, command: M::Query) -> Result<f64, Error> {
        let command: Command = command.into();
        self.messenger.send(command.as_str(), M::TERMINATOR)?;
        let reply = self.messenger.receive()?;
        let value = reply.parse().map_err(|source| ParseError {
            command: command.into_inner(),
            reply: reply.clone(),
            source,
        })?;
        Ok(value)
    }

    /// Sends a line outside the model vocabulary, terminator still applied.
    pub fn send_raw(&mut self, line: &str) -> Result<(), Error> {
        Ok(self.messenger.send(line, M::TERMINATOR)?)
    }

    pub fn receive_raw(&mut self) -> Result<String, Error> {
        Ok(self.messenger.receive()?)
    }

    pub fn into_io(self) -> IO {
        self.messenger.into_inner()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mock_io::MockIo;

    struct Probe;
    impl Model for Probe {
        const DESCRIPTION: &'static str = "loopback probe";
        type Set = Command;
        type Query = Command;
    }

    #[test]
    fn send_appends_terminator_in_one_write() {
        let mut messenger = Messenger::new(MockIo::new());
        messenger.send("FREQ 5.0 GHz", b"\n").unwrap();
        assert_eq!(messenger.into_inner().written(), b"FREQ 5.0 GHz\n");
    }

    #[test]
    fn send_supports_crlf_terminators() {
        let mut messenger = Messenger::new(MockIo::new());
        messenger.send("F5000.00000", b"\r\n").unwrap();
        assert_eq!(messenger.into_inner().written(), b"F5000.00000\r\n");
    }

    #[test]
    fn send_rejects_non_ascii_without_writing() {
        let mut messenger = Messenger::new(MockIo::new());
        let err = messenger.send("FREQ 5.0 GHz\u{202f}", b"\n").unwrap_err();
        assert!(matches!(err, TransportError::NotAscii { .. }));
        assert!(messenger.into_inner().written().is_empty());
    }

    #[test]
    fn receive_trims_whitespace_both_ends() {
        let mut messenger = Messenger::new(MockIo::with_reply(b" -38.00\r\n"));
        assert_eq!(messenger.receive().unwrap(), "-38.00");
    }

    #[test]
    fn receive_refuses_a_garbled_reply() {
        let mut messenger = Messenger::new(MockIo::with_reply(b"\xff\xfe-38.00\n"));
        assert!(matches!(
            messenger.receive(),
            Err(TransportError::Garbled { .. })
        ));
    }

    #[test]
    fn receive_on_closed_connection_is_an_error() {
        let mut messenger = Messenger::new(MockIo::new());
        assert!(matches!(
            messenger.receive(),
            Err(TransportError::Closed)
        ));
    }

    #[test]
    fn receive_caps_one_read_at_recv_len() {
        let oversized = vec![b'9'; RECV_LEN + 500];
        let mut messenger = Messenger::new(MockIo::with_reply(&oversized));
        assert_eq!(messenger.receive().unwrap().len(), RECV_LEN);
    }

    #[test]
    fn query_value_parses_instrument_notation() {
        let mut instrument = Messenger::new(MockIo::with_reply(b"+2.000000E+00\n")).bind(Probe);
        let value = instrument
            .query_value(Command::new(":MEAS:VOLT").query())
            .unwrap();
        assert_eq!(value, 2.0);
        assert_eq!(
            instrument.into_io().written(),
            b":MEAS:VOLT?\n"
        );
    }

    #[test]
    fn query_value_reports_command_and_reply_on_bad_number() {
        let mut instrument = Messenger::new(MockIo::with_reply(b"huh?\n")).bind(Probe);
        let err = instrument
            .query_value(Command::new("POW").query())
            .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("POW?"));
        assert!(text.contains("huh?"));
    }
}
