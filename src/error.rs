// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! The coalescer itself never fails; errors come from the ambient layers
//! (settings files, report export, the async driver channel).

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Reading or writing a file failed.
    Io(String),
    /// `settings.toml` could not be parsed or serialized.
    Config(String),
    /// A diagnostics report could not be produced or written.
    Export(String),
    /// The notification driver loop has stopped and no longer accepts commands.
    DriverClosed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "I/O Error: {msg}"),
            Self::Config(msg) => write!(f, "Config Error: {msg}"),
            Self::Export(msg) => write!(f, "Export Error: {msg}"),
            Self::DriverClosed => f.write_str("Notification driver is closed"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
