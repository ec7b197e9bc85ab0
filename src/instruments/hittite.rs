//! Hittite HMC-T2000 series signal generator, driven over the raw SCPI
//! socket its LAN interface opens on port 5025.

use super::{Instrument, Messenger, Model};
use crate::error::Error;
use crate::protocols::{Protocol, Tcp};
use crate::scpi::Command;
use crate::units::{UnitTable, FREQUENCY_HZ};
use std::io::{Read, Write};
use std::net::TcpStream;

/// Frequency commands carry an explicit unit; the instrument replies in Hz.
const FREQUENCY: UnitTable = FREQUENCY_HZ;

pub struct HmcT2000;

/// Settings the generator accepts.
pub enum Set {
    /// `FREQ <value> <unit>`
    Frequency { value: f64, unit: String },
    /// `POW <value> dBm`
    Power(f64),
    /// `OUTP 1` / `OUTP 0`
    Output(bool),
}

/// Questions the generator answers.
pub enum Query {
    /// `FREQ?`, replied in Hz.
    Frequency,
    /// `POW?`, replied in dBm.
    Power,
}

impl From<Set> for Command {
    fn from(set: Set) -> Command {
        match set {
            Set::Frequency { value, unit } => Command::new("FREQ").number(value).para(unit),
            Set::Power(dbm) => Command::new("POW").number(dbm).para("dBm"),
            Set::Output(on) => Command::new("OUTP").para(on as u8),
        }
    }
}

impl From<Query> for Command {
    fn from(query: Query) -> Command {
        match query {
            Query::Frequency => Command::new("FREQ").query(),
            Query::Power => Command::new("POW").query(),
        }
    }
}

impl Model for HmcT2000 {
    const DESCRIPTION: &'static str = "Hittite HMC-T2000 series signal generator";
    type Set = Set;
    type Query = Query;
}

pub struct Hittite<IO = TcpStream> {
    link: Instrument<IO, HmcT2000>,
}

impl Hittite {
    /// Connects to the SCPI socket on its usual port.
    pub fn connect(host: &str) -> Result<Self, Error> {
        Self::connect_with_port(host, Tcp::SCPI_PORT)
    }

    pub fn connect_with_port(host: &str, port: u16) -> Result<Self, Error> {
        let io = Tcp { port }.connect(host.to_string())?;
        Ok(Self::with_io(io))
    }
}

impl<IO: Read + Write> Hittite<IO> {
    /// Wraps an already-open byte stream.
    pub fn with_io(io: IO) -> Self {
        Self {
            link: Messenger::new(io).bind(HmcT2000),
        }
    }

    /// Sets the output frequency, `value` given in `unit`.
    pub fn set_frequency(&mut self, value: f64, unit: &str) -> Result<(), Error> {
        // Catch a bad unit before anything goes on the wire.
        FREQUENCY.multiplier(unit)?;
        self.link.set(Set::Frequency {
            value,
            unit: unit.to_string(),
        })
    }

    /// Reads the output frequency back, converted into `unit`.
    pub fn get_frequency(&mut self, unit: &str) -> Result<f64, Error> {
        let multiplier = FREQUENCY.multiplier(unit)?;
        let hz = self.link.query_value(Query::Frequency)?;
        Ok(hz / multiplier)
    }

    /// Sets the output power in dBm.
    pub fn set_power(&mut self, dbm: f64) -> Result<(), Error> {
        self.link.set(Set::Power(dbm))
    }

    /// Reads the output power in dBm.
    pub fn get_power(&mut self) -> Result<f64, Error> {
        self.link.query_value(Query::Power)
    }

    pub fn power_on(&mut self) -> Result<(), Error> {
        self.link.set(Set::Output(true))
    }

    pub fn power_off(&mut self) -> Result<(), Error> {
        self.link.set(Set::Output(false))
    }

    /// The command link itself, for anything off the beaten path.
    pub fn link(&mut self) -> &mut Instrument<IO, HmcT2000> {
        &mut self.link
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
    fn set_frequency_keeps_unit_spelling() {
        let mut hittite = Hittite::with_io(MockIo::new());
        hittite.set_frequency(5.0, "GHz").unwrap();
        hittite.set_frequency(3.5, "mhz").unwrap();
        assert_eq!(hittite.into_io().written(), b"FREQ 5.0 GHz\nFREQ 3.5 mhz\n");
    }

    #[test]
    fn set_frequency_rejects_bad_unit_before_sending() {
        let mut hittite = Hittite::with_io(MockIo::new());
        let err = hittite.set_frequency(5.0, "THz").unwrap_err();
        assert!(matches!(err, Error::Unit(_)));
        assert!(hittite.into_io().written().is_empty());
    }

    #[test]
    fn get_frequency_converts_the_hz_reply() {
        let mut hittite = Hittite::with_io(MockIo::with_reply(b"5000000000\n"));
        assert_eq!(hittite.get_frequency("MHz").unwrap(), 5000.0);
        assert_eq!(hittite.into_io().written(), b"FREQ?\n");
    }

    #[test]
    fn get_frequency_with_bad_unit_never_queries() {
        let mut hittite = Hittite::with_io(MockIo::new());
        assert!(matches!(
            hittite.get_frequency("lightyears"),
            Err(Error::Unit(_))
        ));
        assert!(hittite.into_io().written().is_empty());
    }

    #[test]
    fn power_commands_speak_dbm() {
        let mut hittite = Hittite::with_io(MockIo::with_reply(b" -38.00\r\n"));
        hittite.set_power(-38.0).unwrap();
        assert_eq!(hittite.get_power().unwrap(), -38.0);
        assert_eq!(hittite.into_io().written(), b"POW -38.0 dBm\nPOW?\n");
    }

    #[test]
    fn output_toggles_as_numeric_flag() {
        let mut hittite = Hittite::with_io(MockIo::new());
        hittite.power_on().unwrap();
        hittite.power_off().unwrap();
        assert_eq!(hittite.into_io().written(), b"OUTP 1\nOUTP 0\n");
    }
}
