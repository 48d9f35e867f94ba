//! Severity definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named logging category with a fixed ordinal.
///
/// The ordinal is not a priority: `Error`, `Warn` and `Info` are always on
/// (unless the logger is quiet), while `Debug` and `Trace` need a raised
/// threshold. See [`Severity::effective_level`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error = 0,
    Debug = 1,
    Trace = 2,
    Warn = 3,
    Info = 4,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Error,
        Severity::Debug,
        Severity::Trace,
        Severity::Warn,
        Severity::Info,
    ];

    /// Three-letter tag written in front of tagged messages
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Severity::Error => "ERR",
            Severity::Debug => "DEB",
            Severity::Trace => "TRC",
            Severity::Warn => "WRN",
            Severity::Info => "INF",
        }
    }

    pub fn ordinal(&self) -> i32 {
        *self as i32
    }

    /// Threshold a message of this severity needs in order to be emitted.
    ///
    /// `Error`, `Warn` and `Info` map to `0`; `Debug` and `Trace` keep their
    /// ordinal (`1` and `2`).
    #[inline]
    pub fn effective_level(&self) -> i32 {
        match self {
            Severity::Error | Severity::Warn | Severity::Info => 0,
            Severity::Debug | Severity::Trace => self.ordinal(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl TryFrom<i32> for Severity {
    type Error = LoggerError;

    fn try_from(value: i32) -> Result<Self, LoggerError> {
        match value {
            0 => Ok(Severity::Error),
            1 => Ok(Severity::Debug),
            2 => Ok(Severity::Trace),
            3 => Ok(Severity::Warn),
            4 => Ok(Severity::Info),
            _ => Err(LoggerError::invalid_severity(value)),
        }
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ERROR" | "ERR" => Ok(Severity::Error),
            "DEBUG" | "DEB" => Ok(Severity::Debug),
            "TRACE" | "TRC" => Ok(Severity::Trace),
            "WARN" | "WARNING" | "WRN" => Ok(Severity::Warn),
            "INFO" | "INF" => Ok(Severity::Info),
            _ => Err(LoggerError::UnknownSeverityName(s.to_string())),
        }
    }
}
