//! # Tool Logger
//!
//! A small, thread-safe logger that writes timestamped text lines to any
//! byte sink, filtered by a verbosity threshold.
//!
//! ## Features
//!
//! - **Verbosity gating**: `Error`, `Warn` and `Info` are always on unless
//!   quiet; `Debug` needs threshold 1 and `Trace` threshold 2
//! - **Serialized writes**: one lock per logger keeps concurrent lines whole
//! - **Stream adapter**: [`Logger::writer`] (or [`Logger::shared_writer`] for an
//!   owned, `'static` one) turns a logger into an `io::Write`
//! - **Default instance**: [`global`] for zero-setup logging
//!
//! Lines look like `2014-06-03T17:02:11.123-0400<TAB>ERR message`.

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Clock, FixedClock, LogWriter, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, Result, Severity, SystemClock, TimeFormat, Verbosity, VerbosityLevel,
        WriteFailureCallback,
    };
    pub use crate::sinks::{FileSink, MemorySink};
}

pub use crate::core::{
    threshold_for, Clock, FixedClock, LogWriter, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, Result, Severity, Sink, SystemClock, TimeFormat, Verbosity, VerbosityLevel,
    WriteFailureCallback, DEFAULT_THRESHOLD, QUIET_THRESHOLD, TOOL_TIME_FORMAT,
};
pub use sinks::{FileSink, MemorySink};
