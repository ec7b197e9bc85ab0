//! Micro Lambda Wireless benchtop YIG filter, tuned over its telnet console.
//!
//! The console is set-only: the filter takes `F<megahertz>` lines and never
//! answers, so the model has no query vocabulary at all.

use super::{Instrument, Messenger, Model};
use crate::error::Error;
use crate::protocols::telnet::TelnetStream;
use crate::protocols::{Protocol, Telnet};
use crate::scpi::Command;
use crate::units::{UnitTable, FREQUENCY_MHZ};
use std::io::{Read, Write};
use std::net::TcpStream;

/// The tuning command counts in MHz whatever unit the caller used.
const FREQUENCY: UnitTable = FREQUENCY_MHZ;

pub struct Mlbf;

/// Settings the filter accepts.
pub enum Set {
    /// `F<megahertz>`, printed with five decimals.
    Frequency(f64),
}

/// The filter never answers, so there is nothing to ask.
pub enum Query {}

impl From<Set> for Command {
    fn from(set: Set) -> Command {
        match set {
            Set::Frequency(mhz) => Command::new(format!("F{:.5}", mhz)),
        }
    }
}

impl From<Query> for Command {
    fn from(query: Query) -> Command {
        match query {}
    }
}

impl Model for Mlbf {
    const DESCRIPTION: &'static str = "Micro Lambda Wireless benchtop YIG filter";
    const TERMINATOR: &'static [u8] = b"\r\n";
    type Set = Set;
    type Query = Query;
}

pub struct YigFilter<IO = TelnetStream<TcpStream>> {
    link: Instrument<IO, Mlbf>,
}

impl YigFilter {
    /// Connects to the telnet console on its usual port.
    pub fn connect(host: &str) -> Result<Self, Error> {
        Self::connect_with_port(host, Telnet::PORT)
    }

    pub fn connect_with_port(host: &str, port: u16) -> Result<Self, Error> {
        let io = Telnet { port }.connect(host.to_string())?;
        Ok(Self::with_io(io))
    }
}

impl<IO: Read + Write> YigFilter<IO> {
    /// Wraps an already-open byte stream.
    pub fn with_io(io: IO) -> Self {
        Self {
            link: Messenger::new(io).bind(Mlbf),
        }
    }

    /// Tunes the passband center, `value` given in `unit`.
    pub fn set_frequency(&mut self, value: f64, unit: &str) -> Result<(), Error> {
        let mhz = FREQUENCY.to_canonical(value, unit)?;
        self.link.set(Set::Frequency(mhz))
    }

    /// Hands the transport back.
    pub fn into_io(self) -> IO {
        self.link.into_io()
    }

    /// Drops the connection.
    pub fn close(self) {
        drop(self);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mock_io::MockIo;

    #[test]
    fn tunes_in_mhz_with_five_decimals_and_crlf() {
        let mut filter = YigFilter::with_io(MockIo::new());
        filter.set_frequency(5.0, "GHz").unwrap();
        filter.set_frequency(250.0, "MHz").unwrap();
        filter.set_frequency(9.6e9, "Hz").unwrap();
        assert_eq!(
            filter.into_io().written(),
            b"F5000.00000\r\nF250.00000\r\nF9600.00000\r\n"
        );
    }

    #[test]
    fn rejects_unknown_units_without_sending() {
        let mut filter = YigFilter::with_io(MockIo::new());
        let err = filter.set_frequency(5.0, "dBm").unwrap_err();
        assert!(matches!(err, Error::Unit(_)));
        assert!(filter.into_io().written().is_empty());
    }
}
