//! Process-wide default logger
//!
//! A [`Logger`] created on first use (threshold `0`, stderr, default time
//! format) plus free functions that forward to it. Code that can take a
//! `&Logger` should prefer that; these exist for call sites with no logger
//! in reach.
//!
//! ```
//! use tool_logger::{global, Severity};
//!
//! if global::is_in_verbosity(Severity::Error) {
//!     global::logv(Severity::Error, true, "disk full");
//! }
//! ```

use crate::core::{
    Clock, LogWriter, Logger, Result, Severity, TimeFormat, VerbosityLevel, WriteFailureCallback,
};
use std::fmt;
use std::io::Write;
use std::sync::{Arc, LazyLock};

static DEFAULT_LOGGER: LazyLock<Logger> = LazyLock::new(Logger::new);

/// The shared default logger
pub fn default_logger() -> &'static Logger {
    &DEFAULT_LOGGER
}

/// Whether `severity`'s ordinal is within the current threshold.
///
/// See [`Logger::is_in_verbosity`] for how this differs from
/// [`Logger::enabled`].
pub fn is_in_verbosity(severity: Severity) -> bool {
    DEFAULT_LOGGER.is_in_verbosity(severity)
}

pub fn threshold() -> i32 {
    DEFAULT_LOGGER.threshold()
}

pub fn logvf(severity: Severity, tagged: bool, args: fmt::Arguments<'_>) {
    DEFAULT_LOGGER.logvf(severity, tagged, args);
}

pub fn logv(severity: Severity, tagged: bool, message: &str) {
    DEFAULT_LOGGER.logv(severity, tagged, message);
}

pub fn logv_raw(min_verb: i32, tagged: bool, message: &str) -> Result<()> {
    DEFAULT_LOGGER.logv_raw(min_verb, tagged, message)
}

pub fn logvf_raw(min_verb: i32, tagged: bool, args: fmt::Arguments<'_>) -> Result<()> {
    DEFAULT_LOGGER.logvf_raw(min_verb, tagged, args)
}

pub fn set_verbosity(level: Option<&dyn VerbosityLevel>) {
    DEFAULT_LOGGER.set_verbosity(level);
}

pub fn set_sink<W: Write + Send + 'static>(sink: W) {
    DEFAULT_LOGGER.set_sink(sink);
}

pub fn set_time_format(format: impl Into<TimeFormat>) {
    DEFAULT_LOGGER.set_time_format(format);
}

pub fn set_clock(clock: Arc<dyn Clock>) {
    DEFAULT_LOGGER.set_clock(clock);
}

pub fn set_on_write_failure(callback: Option<WriteFailureCallback>) {
    DEFAULT_LOGGER.set_on_write_failure(callback);
}

pub fn writer(severity: Severity) -> LogWriter<&'static Logger> {
    DEFAULT_LOGGER.writer(severity)
}

pub fn flush() -> Result<()> {
    DEFAULT_LOGGER.flush()
}
