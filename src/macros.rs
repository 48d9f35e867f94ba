//! Logging macros for ergonomic message formatting.
//!
//! Arguments are only formatted when the call passes the verbosity filter.
//!
//! # Examples
//!
//! ```
//! use tool_logger::prelude::*;
//! use tool_logger::{info, logvf};
//!
//! let logger = Logger::builder().sink(MemorySink::new()).build();
//!
//! // Tagged info line: "<timestamp>\tINF listening on port 27017"
//! info!(logger, "listening on port {}", 27017);
//!
//! // Untagged line at warn severity
//! logvf!(logger, Severity::Warn, false, "{} documents skipped", 3);
//!
//! // The default logger works the same way
//! logvf!(tool_logger::global::default_logger(), Severity::Debug, true, "hidden at threshold 0");
//! ```

/// Log a formatted message at a severity, optionally tagged.
///
/// # Examples
///
/// ```
/// # use tool_logger::prelude::*;
/// # let logger = Logger::builder().sink(MemorySink::new()).build();
/// use tool_logger::logvf;
/// logvf!(logger, Severity::Info, true, "Simple message");
/// logvf!(logger, Severity::Error, false, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! logvf {
    ($logger:expr, $severity:expr, $tagged:expr, $($arg:tt)+) => {
        $logger.logvf($severity, $tagged, format_args!($($arg)+))
    };
}

/// Log a tagged trace message (needs threshold 2).
///
/// # Examples
///
/// ```
/// # use tool_logger::prelude::*;
/// # let logger = Logger::builder().verbosity(&Verbosity::new(2)).sink(MemorySink::new()).build();
/// use tool_logger::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logvf!($logger, $crate::Severity::Trace, true, $($arg)+)
    };
}

/// Log a tagged debug message (needs threshold 1).
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logvf!($logger, $crate::Severity::Debug, true, $($arg)+)
    };
}

/// Log a tagged info message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logvf!($logger, $crate::Severity::Info, true, $($arg)+)
    };
}

/// Log a tagged warning message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logvf!($logger, $crate::Severity::Warn, true, $($arg)+)
    };
}

/// Log a tagged error message.
///
/// # Examples
///
/// ```
/// # use tool_logger::prelude::*;
/// # let logger = Logger::builder().sink(MemorySink::new()).build();
/// use tool_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logvf!($logger, $crate::Severity::Error, true, $($arg)+)
    };
}
