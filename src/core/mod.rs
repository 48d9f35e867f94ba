//! Core logger types and traits

pub mod config;
pub mod error;
pub mod logger;
pub mod metrics;
pub mod severity;
pub mod timestamp;
pub mod verbosity;
pub mod writer;

pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use logger::{Logger, LoggerBuilder, Sink};
pub use metrics::{LoggerMetrics, WriteFailureCallback};
pub use severity::Severity;
pub use timestamp::{Clock, FixedClock, SystemClock, TimeFormat, TOOL_TIME_FORMAT};
pub use verbosity::{threshold_for, Verbosity, VerbosityLevel, DEFAULT_THRESHOLD, QUIET_THRESHOLD};
pub use writer::LogWriter;
