//! Serializable logger settings

use super::error::{LoggerError, Result};
use super::timestamp::TimeFormat;
use super::verbosity::{Verbosity, QUIET_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Settings a [`Logger`](crate::Logger) can be built from.
///
/// Every field is optional in the serialized form.
///
/// # Examples
///
/// ```
/// use tool_logger::LoggerConfig;
///
/// let config = LoggerConfig::from_json(r#"{"verbosity": {"level": 2}}"#).unwrap();
/// assert_eq!(config.verbosity.level, 2);
/// assert_eq!(config.time_format, Default::default());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub verbosity: Verbosity,
    pub time_format: TimeFormat,
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    #[must_use]
    pub fn with_time_format(mut self, format: impl Into<TimeFormat>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject levels below the quiet threshold.
    ///
    /// Quiet is expressed with the `quiet` flag; a numeric level under `-1`
    /// has no meaning.
    pub fn validate(&self) -> Result<()> {
        if self.verbosity.level < QUIET_THRESHOLD {
            return Err(LoggerError::config(
                "verbosity",
                format!("level {} is below {}", self.verbosity.level, QUIET_THRESHOLD),
            ));
        }
        Ok(())
    }
}
