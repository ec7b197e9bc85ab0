//! Keithley 2280 series precision power supply, reached over VXI-11.

use super::{Instrument, Messenger, Model};
use crate::error::Error;
use crate::protocols::onc_rpc::RpcStream;
use crate::protocols::Vxi11;
use crate::scpi::Command;
use std::io::{Read, Write};

pub struct Model2280;

/// Settings the supply accepts.
pub enum Set {
    /// `*RST`
    Reset,
    /// `:VOLT <volts>`
    Voltage(f64),
    /// `:CURR <amps>`
    Current(f64),
    /// `:OUTP ON` / `:OUTP OFF`
    Output(bool),
    /// `:FORM:ELEM "READ"`, keeps measurement replies to the bare reading.
    ReadingElements,
}

/// Questions the supply answers.
pub enum Query {
    /// `*IDN?`
    Identity,
    /// `:MEAS:VOLT?`
    Voltage,
    /// `:MEAS:CURR?`
    Current,
}

impl From<Set> for Command {
    fn from(set: Set) -> Command {
        match set {
            Set::Reset => Command::new("*RST"),
            Set::Voltage(volts) => Command::new(":VOLT").number(volts),
            Set::Current(amps) => Command::new(":CURR").number(amps),
            Set::Output(on) => Command::new(":OUTP").para(if on { "ON" } else { "OFF" }),
            Set::ReadingElements => Command::new(":FORM:ELEM").para("\"READ\""),
        }
    }
}

impl From<Query> for Command {
    fn from(query: Query) -> Command {
        match query {
            Query::Identity => Command::new("*IDN").query(),
            Query::Voltage => Command::new(":MEAS:VOLT").query(),
            Query::Current => Command::new(":MEAS:CURR").query(),
        }
    }
}

impl Model for Model2280 {
    const DESCRIPTION: &'static str = "Keithley 2280 series power supply";
    type Set = Set;
    type Query = Query;
}

pub struct Keithley2280<IO = Vxi11> {
    link: Instrument<IO, Model2280>,
}

impl Keithley2280 {
    /// Opens a VXI-11 link to the supply at `host`.
    pub fn connect(host: &str) -> Result<Self, Error> {
        Ok(Self::with_io(Vxi11::connect(host)?))
    }
}

impl<IO: Read + Write> Keithley2280<IO> {
    /// Wraps an already-open byte stream.
    pub fn with_io(io: IO) -> Self {
        Self {
            link: Messenger::new(io).bind(Model2280),
        }
    }

    /// Asks for the identification string.
    pub fn get_id(&mut self) -> Result<String, Error> {
        self.link.query(Query::Identity)
    }

    /// Returns the supply to its power-on defaults.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.link.set(Set::Reset)
    }

    pub fn set_voltage(&mut self, volts: f64) -> Result<(), Error> {
        self.link.set(Set::Voltage(volts))
    }

    /// Measures the output voltage in volts.
    pub fn get_voltage(&mut self) -> Result<f64, Error> {
        self.link.set(Set::ReadingElements)?;
        self.link.query_value(Query::Voltage)
    }

    pub fn set_current(&mut self, amps: f64) -> Result<(), Error> {
        self.link.set(Set::Current(amps))
    }

    /// Measures the output current in amps.
    pub fn get_current(&mut self) -> Result<f64, Error> {
        self.link.set(Set::ReadingElements)?;
        self.link.query_value(Query::Current)
    }

    pub fn output_on(&mut self) -> Result<(), Error> {
        self.link.set(Set::Output(true))
    }

    pub fn output_off(&mut self) -> Result<(), Error> {
        self.link.set(Set::Output(false))
    }

    /// Same as [`Keithley2280::output_on`].
    pub fn power_on(&mut self) -> Result<(), Error> {
        self.output_on()
    }

    /// Same as [`Keithley2280::output_off`].
    pub fn power_off(&mut self) -> Result<(), Error> {
        self.output_off()
    }

    /// Hands the transport back.
    pub fn into_io(self) -> IO {
        self.link.into_io()
    }
}

impl<S: RpcStream> Keithley2280<Vxi11<S>> {
    /// Destroys the device link and drops the connection.
    pub fn close(self) -> Result<(), Error> {
        Ok(self.link.into_io().close()?)
    }
}
