//! Unit handling for instrument settings.
//!
//! Instruments take and report values in a fixed canonical unit (the Hittite
//! counts hertz, the Micro Lambda filter megahertz) while callers usually
//! think in whatever unit the bench notebook uses. A [`UnitTable`] maps a
//! caller-supplied unit name to the multiplier that converts a value into the
//! canonical unit of the instrument it belongs to.

use thiserror::Error;

/// A unit name was not recognized.
///
/// The message lists every accepted spelling so the caller does not have to
/// go digging for the table.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("unrecognized {quantity} unit {unit:?}: must be one of {expected}")]
pub struct UnitError {
    pub quantity: &'static str,
    pub unit: String,
    pub expected: &'static str,
}

/// Multipliers from named units into one canonical unit.
///
/// Lookup is case-insensitive; table keys are stored lowercase.
#[derive(Debug, Clone, Copy)]
pub struct UnitTable {
    quantity: &'static str,
    expected: &'static str,
    multipliers: &'static [(&'static str, f64)],
}

/// Frequency units scaled to hertz.
pub const FREQUENCY_HZ: UnitTable = UnitTable {
    quantity: "frequency",
    expected: "GHz, MHz, kHz or Hz",
    multipliers: &[("ghz", 1e9), ("mhz", 1e6), ("khz", 1e3), ("hz", 1.0)],
};

/// Frequency units scaled to megahertz.
pub const FREQUENCY_MHZ: UnitTable = UnitTable {
    quantity: "frequency",
    expected: "GHz, MHz, kHz or Hz",
    multipliers: &[("ghz", 1e3), ("mhz", 1.0), ("khz", 1e-3), ("hz", 1e-6)],
};

impl UnitTable {
    /// Multiplier taking a value in `unit` to the canonical unit.
    pub fn multiplier(&self, unit: &str) -> Result<f64, UnitError> {
        let key = unit.to_ascii_lowercase();
        self.multipliers
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, multiplier)| *multiplier)
            .ok_or_else(|| UnitError {
                quantity: self.quantity,
                unit: unit.to_string(),
                expected: self.expected,
            })
    }

    /// Converts `value` given in `unit` into the canonical unit.
    pub fn to_canonical(&self, value: f64, unit: &str) -> Result<f64, UnitError> {
        Ok(value * self.multiplier(unit)?)
    }

    /// Converts `value` from the canonical unit into `unit`.
    pub fn from_canonical(&self, value: f64, unit: &str) -> Result<f64, UnitError> {
        Ok(value / self.multiplier(unit)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        for unit in &["GHz", "ghz", "GHZ", "gHz"] {
            assert_eq!(FREQUENCY_HZ.multiplier(unit).unwrap(), 1e9);
        }
        assert_eq!(FREQUENCY_HZ.multiplier("Hz").unwrap(), 1.0);
        assert_eq!(FREQUENCY_MHZ.multiplier("kHz").unwrap(), 1e-3);
    }

    #[test]
    fn round_trip_preserves_value() {
        for table in &[FREQUENCY_HZ, FREQUENCY_MHZ] {
            for unit in &["GHz", "MHz", "kHz", "Hz"] {
                let canonical = table.to_canonical(2.5, unit).unwrap();
                let back = table.from_canonical(canonical, unit).unwrap();
                assert!((back - 2.5).abs() < 1e-12, "{} round trip gave {}", unit, back);
            }
        }
    }

    #[test]
    fn converts_across_units() {
        let hz = FREQUENCY_HZ.to_canonical(5.0, "GHz").unwrap();
        assert_eq!(FREQUENCY_HZ.from_canonical(hz, "MHz").unwrap(), 5000.0);
        let mhz = FREQUENCY_MHZ.to_canonical(5.0, "GHz").unwrap();
        assert_eq!(mhz, 5000.0);
    }

    #[test]
    fn unknown_unit_names_the_alternatives() {
        let err = FREQUENCY_HZ.multiplier("parsec").unwrap_err();
        assert_eq!(err.unit, "parsec");
        assert!(err.to_string().contains("GHz, MHz, kHz or Hz"));
        assert!(FREQUENCY_MHZ.to_canonical(1.0, "dBm").is_err());
        assert!(FREQUENCY_HZ.from_canonical(1.0, "").is_err());
    }
}
