//! Minimal telnet client transport.
//!
//! Instruments with a telnet console (the Micro Lambda YIG filter among them)
//! speak plain line-oriented text, but the server side may still open with
//! option negotiation. [`TelnetStream`] strips IAC sequences out of the
//! incoming bytes and refuses every option the server proposes, which is all
//! the negotiation a dumb command channel needs.

use super::error::ConnectionError;
use super::Protocol;
use log::{debug, warn};
use std::io::{self, Read, Write};
use std::net::TcpStream;

const IAC: u8 = 255;
const DONT: u8 = 254;
const DO: u8 = 253;
const WONT: u8 = 252;
const WILL: u8 = 251;
const SB: u8 = 250;
const SE: u8 = 240;

/// Telnet transport settings.
pub struct Telnet {
    pub port: u16,
}

impl Telnet {
    pub const PORT: u16 = 23;
}

impl Default for Telnet {
    fn default() -> Self {
        Telnet { port: Self::PORT }
    }
}

impl Protocol for Telnet {
    type IO = TelnetStream<TcpStream>;
    type Address = String;
    fn connect(self, host: Self::Address) -> Result<Self::IO, ConnectionError> {
        let endpoint = format!("{}:{}", host, self.port);
        debug!("connecting to {}", endpoint);
        let stream = TcpStream::connect((host.as_str(), self.port)).map_err(|source| {
            warn!("connect to {} failed: {}", endpoint, source);
            ConnectionError { endpoint, source }
        })?;
        Ok(TelnetStream::new(stream))
    }
}

enum Negotiation {
    Data,
    Iac,
    Option(u8),
    Subnegotiation,
    SubnegotiationIac,
}

/// Byte stream with telnet in-band control sequences filtered out.
pub struct TelnetStream<S> {
    stream: S,
    state: Negotiation,
}

impl<S> TelnetStream<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            state: Negotiation::Data,
        }
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Write> Read for TelnetStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        // Keep reading until at least one data byte survives the filter or
        // the peer hangs up.
        loop {
            let mut raw = vec![0u8; buf.len()];
            let n = self.stream.read(&mut raw)?;
            if n == 0 {
                return Ok(0);
            }
            let mut filled = 0;
            let mut refusals = Vec::new();
            for &byte in &raw[..n] {
                match self.state {
                    Negotiation::Data => {
                        if byte == IAC {
                            self.state = Negotiation::Iac;
                        } else {
                            buf[filled] = byte;
                            filled += 1;
                        }
                    }
                    Negotiation::Iac => match byte {
                        IAC => {
                            // Escaped 0xFF data byte.
                            buf[filled] = byte;
                            filled += 1;
                            self.state = Negotiation::Data;
                        }
                        WILL | WONT | DO | DONT => self.state = Negotiation::Option(byte),
                        SB => self.state = Negotiation::Subnegotiation,
                        _ => self.state = Negotiation::Data,
                    },
                    Negotiation::Option(command) => {
                        match command {
                            WILL => refusals.extend_from_slice(&[IAC, DONT, byte]),
                            DO => refusals.extend_from_slice(&[IAC, WONT, byte]),
                            _ => {}
                        }
                        self.state = Negotiation::Data;
                    }
                    Negotiation::Subnegotiation => {
                        if byte == IAC {
                            self.state = Negotiation::SubnegotiationIac;
                        }
                    }
                    Negotiation::SubnegotiationIac => {
                        self.state = match byte {
                            SE => Negotiation::Data,
                            _ => Negotiation::Subnegotiation,
                        };
                    }
                }
            }
            if !refusals.is_empty() {
                debug!("refusing {} telnet option(s)", refusals.len() / 3);
                self.stream.write_all(&refusals)?;
            }
            if filled > 0 {
                return Ok(filled);
            }
        }
    }
}

impl<S: Read + Write> Write for TelnetStream<S> {
    // Command text is ASCII, so IAC never appears in outgoing bytes and no
    // escaping is needed.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}
