//! SCPI command text assembly.
//!
//! A [`Command`] is the text of one instruction without its line terminator,
//! built mnemonic-first: `Command::new("FREQ").number(5.0).para("GHz")` reads
//! the way the manual prints it. Appending `?` with [`Command::query`] turns
//! a setting into the matching question.

use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command(String);

impl Command {
    pub fn new<S: ToString>(mnemonic: S) -> Self {
        Self(mnemonic.to_string())
    }

    /// Marks the command as a query by appending `?`.
    pub fn query(mut self) -> Self {
        self.0.push('?');
        self
    }

    /// Appends a space-separated parameter.
    pub fn para<P: Display>(mut self, para: P) -> Self {
        self.0.push(' ');
        self.0.push_str(&para.to_string());
        self
    }

    /// Appends a numeric parameter; round values keep their decimal point,
    /// so `5.0` goes out as `5.0` and not `5`.
    pub fn number(mut self, value: f64) -> Self {
        self.0.push(' ');
        self.0.push_str(&format!("{:?}", value));
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Command {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<[u8]> for Command {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
