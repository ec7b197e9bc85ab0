//! Drop-in surface for bench scripts written against the old camelCase
//! signal generator bindings. New code should use
//! [`Hittite`](crate::instruments::hittite::Hittite) directly.

use crate::error::Error;
use crate::instruments::hittite::Hittite;
use std::io::{Read, Write};
use std::net::TcpStream;

/// The old front end: same verbs, same spellings, forwarding to [`Hittite`].
pub struct SignalGenerator<IO = TcpStream> {
    inner: Hittite<IO>,
}

impl SignalGenerator {
    pub fn connect(host: &str) -> Result<Self, Error> {
        Ok(Self {
            inner: Hittite::connect(host)?,
        })
    }

    pub fn connect_with_port(host: &str, port: u16) -> Result<Self, Error> {
        Ok(Self {
            inner: Hittite::connect_with_port(host, port)?,
        })
    }
}

#[allow(non_snake_case)]
impl<IO: Read + Write> SignalGenerator<IO> {
    pub fn with_io(io: IO) -> Self {
        Self {
            inner: Hittite::with_io(io),
        }
    }

    /// Sets the frequency in GHz.
    pub fn setFreq(&mut self, freq: f64) -> Result<(), Error> {
        self.inner.set_frequency(freq, "GHz")
    }

    /// Reads the frequency in GHz.
    pub fn getFreq(&mut self) -> Result<f64, Error> {
        self.inner.get_frequency("GHz")
    }

    /// Sets the power in dBm.
    pub fn setPower(&mut self, power: f64) -> Result<(), Error> {
        self.inner.set_power(power)
    }

    /// Reads the power in dBm.
    pub fn getPower(&mut self) -> Result<f64, Error> {
        self.inner.get_power()
    }

    pub fn powerOn(&mut self) -> Result<(), Error> {
        self.inner.power_on()
    }

    pub fn powerOff(&mut self) -> Result<(), Error> {
        self.inner.power_off()
    }

    pub fn close(self) {
        self.inner.close()
    }
}
