//! Main logger implementation

use super::{
    config::LoggerConfig,
    error::{LoggerError, Result},
    metrics::{LoggerMetrics, WriteFailureCallback},
    severity::Severity,
    timestamp::{Clock, SystemClock, TimeFormat},
    verbosity::{threshold_for, VerbosityLevel, DEFAULT_THRESHOLD},
    writer::LogWriter,
};
use parking_lot::{Mutex, RwLock};
use std::cell::Cell;
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

/// Destination every emitted line is written to
pub type Sink = Box<dyn Write + Send>;

thread_local! {
    static IN_FAILURE_HOOK: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as running a write-failure hook until dropped
struct FailureHookGuard;

impl FailureHookGuard {
    /// `None` if this thread is already inside a hook
    fn enter() -> Option<Self> {
        IN_FAILURE_HOOK.with(|active| {
            if active.replace(true) {
                None
            } else {
                Some(FailureHookGuard)
            }
        })
    }
}

impl Drop for FailureHookGuard {
    fn drop(&mut self) {
        IN_FAILURE_HOOK.with(|active| active.set(false));
    }
}

/// Verbosity-filtered, timestamping line logger.
///
/// Each emitted call produces exactly one `"<timestamp>\t<message>\n"` line,
/// written to the sink while holding the sink lock, so concurrent callers
/// never interleave bytes.
///
/// Only that render-and-write step is serialized. The threshold, time format
/// and clock are read outside of it, and replacing them while other threads
/// are logging is not coordinated with in-flight calls: a call may be
/// filtered against the old threshold and rendered with the new format.
/// Configure the logger before sharing it.
///
/// # Example
///
/// ```
/// use tool_logger::{Logger, MemorySink, Severity, Verbosity};
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder()
///     .verbosity(&Verbosity::new(1))
///     .sink(sink.clone())
///     .build();
///
/// logger.logv(Severity::Debug, true, "connected");
/// logger.logv(Severity::Trace, true, "dropped, needs verbosity 2");
///
/// let lines = sink.lines();
/// assert_eq!(lines.len(), 1);
/// assert!(lines[0].ends_with("\tDEB connected"));
/// ```
pub struct Logger {
    sink: Mutex<Sink>,
    time_format: RwLock<TimeFormat>,
    clock: RwLock<Arc<dyn Clock>>,
    verbosity: AtomicI32,
    metrics: LoggerMetrics,
    on_write_failure: RwLock<Option<WriteFailureCallback>>,
}

impl Logger {
    /// Logger writing to stderr with the default format and threshold `0`
    #[must_use]
    pub fn new() -> Self {
        Self {
            sink: Mutex::new(Box::new(io::stderr())),
            time_format: RwLock::new(TimeFormat::default()),
            clock: RwLock::new(Arc::new(SystemClock)),
            verbosity: AtomicI32::new(DEFAULT_THRESHOLD),
            metrics: LoggerMetrics::new(),
            on_write_failure: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn with_verbosity(level: Option<&dyn VerbosityLevel>) -> Self {
        let logger = Self::new();
        logger.set_verbosity(level);
        logger
    }

    #[must_use]
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Install a new threshold.
    ///
    /// `None` resets to `0`, a quiet capability gives `-1` whatever its
    /// level, anything else uses its level.
    pub fn set_verbosity(&self, level: Option<&dyn VerbosityLevel>) {
        self.verbosity.store(threshold_for(level), Ordering::Relaxed);
    }

    #[inline]
    pub fn threshold(&self) -> i32 {
        self.verbosity.load(Ordering::Relaxed)
    }

    /// Replace the destination. The previous sink is dropped, not flushed.
    pub fn set_sink<W: Write + Send + 'static>(&self, sink: W) {
        *self.sink.lock() = Box::new(sink);
    }

    pub fn set_time_format(&self, format: impl Into<TimeFormat>) {
        *self.time_format.write() = format.into();
    }

    pub fn time_format(&self) -> TimeFormat {
        self.time_format.read().clone()
    }

    pub fn set_clock(&self, clock: Arc<dyn Clock>) {
        *self.clock.write() = clock;
    }

    /// Install (or remove) the hook called when a sink write fails
    pub fn set_on_write_failure(&self, callback: Option<WriteFailureCallback>) {
        *self.on_write_failure.write() = callback;
    }

    /// Whether a call at `severity` would currently be emitted
    #[inline]
    pub fn enabled(&self, severity: Severity) -> bool {
        severity.effective_level() <= self.threshold()
    }

    /// Whether the severity's raw ordinal is within the threshold.
    ///
    /// This compares the ordinal itself, not the effective level used by
    /// [`enabled`](Self::enabled), so `Info` (ordinal 4) only counts as "in
    /// verbosity" at threshold 4 and above even though it is emitted at 0.
    #[inline]
    pub fn is_in_verbosity(&self, severity: Severity) -> bool {
        severity.ordinal() <= self.threshold()
    }

    /// Log a formatted message, see [`logvf!`](crate::logvf)
    ///
    /// Formatting only happens when the call passes the filter.
    pub fn logvf(&self, severity: Severity, tagged: bool, args: fmt::Arguments<'_>) {
        if !self.admit(severity) {
            return;
        }

        let message = if tagged {
            format!("{} {}", severity.abbreviation(), args)
        } else {
            fmt::format(args)
        };
        self.emit(&message);
    }

    /// Log a pre-rendered message
    pub fn logv(&self, severity: Severity, tagged: bool, message: &str) {
        if !self.admit(severity) {
            return;
        }

        if tagged {
            self.emit(&format!("{} {}", severity.abbreviation(), message));
        } else {
            self.emit(message);
        }
    }

    /// [`logv`](Self::logv) for callers holding a bare integer severity.
    ///
    /// `0..=4` behave exactly like the matching [`Severity`]. Ordinals above
    /// 4 are accepted untagged and filtered on their own value, so `7` is
    /// emitted only at threshold 7 and above. Errors, with nothing written:
    ///
    /// - negative ordinals give
    ///   [`LoggerError::InvalidSeverity`](crate::LoggerError::InvalidSeverity)
    /// - a tagged line above 4 gives
    ///   [`LoggerError::UntaggableSeverity`](crate::LoggerError::UntaggableSeverity)
    pub fn logv_raw(&self, min_verb: i32, tagged: bool, message: &str) -> Result<()> {
        match resolve_raw(min_verb, tagged)? {
            Some(severity) => self.logv(severity, tagged, message),
            None => {
                if self.admit_level(min_verb) {
                    self.emit(message);
                }
            }
        }
        Ok(())
    }

    /// Formatted form of [`logv_raw`](Self::logv_raw), same ordinal rules
    pub fn logvf_raw(&self, min_verb: i32, tagged: bool, args: fmt::Arguments<'_>) -> Result<()> {
        match resolve_raw(min_verb, tagged)? {
            Some(severity) => self.logvf(severity, tagged, args),
            None => {
                if self.admit_level(min_verb) {
                    self.emit(&fmt::format(args));
                }
            }
        }
        Ok(())
    }

    /// An `io::Write` view of this logger that logs every write at `severity`
    pub fn writer(&self, severity: Severity) -> LogWriter<&Logger> {
        LogWriter::new(self, severity)
    }

    /// Owning form of [`writer`](Self::writer).
    ///
    /// The result is `Send + 'static`, so it can be moved into a thread or
    /// boxed as the sink of another logger.
    pub fn shared_writer(self: &Arc<Self>, severity: Severity) -> LogWriter<Arc<Logger>> {
        LogWriter::new(Arc::clone(self), severity)
    }

    /// Flush the sink. Failures are also counted in
    /// [`LoggerMetrics::flush_failures`].
    pub fn flush(&self) -> Result<()> {
        if let Err(err) = self.sink.lock().flush() {
            self.metrics.record_flush_failure();
            return Err(err.into());
        }
        Ok(())
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn admit(&self, severity: Severity) -> bool {
        self.admit_level(severity.effective_level())
    }

    fn admit_level(&self, level: i32) -> bool {
        if level <= self.threshold() {
            true
        } else {
            self.metrics.record_filtered();
            false
        }
    }

    /// Render and write one line. Sink errors stop here.
    fn emit(&self, message: &str) {
        let failure = {
            let mut sink = self.sink.lock();
            let now = self.clock.read().now();
            let timestamp = self.time_format.read().render(&now);
            let line = format!("{}\t{}\n", timestamp, message);
            sink.write_all(line.as_bytes()).err()
        };

        match failure {
            None => {
                self.metrics.record_written();
            }
            Some(err) => {
                self.metrics.record_write_failure();
                // a hook that logs through a failing sink would otherwise recurse
                let Some(_guard) = FailureHookGuard::enter() else {
                    return;
                };
                let callback = self.on_write_failure.read().clone();
                if let Some(callback) = callback {
                    callback(&err);
                }
            }
        }
    }
}

/// Known severity for `0..=4`, `None` for an untagged ordinal above 4
fn resolve_raw(min_verb: i32, tagged: bool) -> Result<Option<Severity>> {
    if min_verb < 0 {
        return Err(LoggerError::invalid_severity(min_verb));
    }
    match Severity::try_from(min_verb) {
        Ok(severity) => Ok(Some(severity)),
        Err(_) if tagged => Err(LoggerError::untaggable_severity(min_verb)),
        Err(_) => Ok(None),
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold())
            .field("time_format", &*self.time_format.read())
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use tool_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .verbosity(&Verbosity::from_flags(2, false))
///     .sink(MemorySink::new())
///     .time_format("%H:%M:%S")
///     .on_write_failure(Arc::new(|err: &std::io::Error| {
///         eprintln!("log line lost: {}", err);
///     }))
///     .build();
///
/// assert_eq!(logger.threshold(), 2);
/// ```
pub struct LoggerBuilder {
    threshold: i32,
    sink: Option<Sink>,
    time_format: TimeFormat,
    clock: Option<Arc<dyn Clock>>,
    on_write_failure: Option<WriteFailureCallback>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            sink: None,
            time_format: TimeFormat::default(),
            clock: None,
            on_write_failure: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn verbosity(mut self, level: &dyn VerbosityLevel) -> Self {
        self.threshold = threshold_for(Some(level));
        self
    }

    /// Take verbosity and time format from a config
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: &LoggerConfig) -> Self {
        self.threshold = threshold_for(Some(&config.verbosity));
        self.time_format = config.time_format.clone();
        self
    }

    /// Set the destination (stderr if not called)
    #[must_use = "builder methods return a new value"]
    pub fn sink<W: Write + Send + 'static>(mut self, sink: W) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: impl Into<TimeFormat>) -> Self {
        self.time_format = format.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn on_write_failure(mut self, callback: WriteFailureCallback) -> Self {
        self.on_write_failure = Some(callback);
        self
    }

    pub fn build(self) -> Logger {
        let logger = Logger::new();
        logger.verbosity.store(self.threshold, Ordering::Relaxed);
        *logger.time_format.write() = self.time_format;

        if let Some(sink) = self.sink {
            *logger.sink.lock() = sink;
        }
        if let Some(clock) = self.clock {
            logger.set_clock(clock);
        }
        logger.set_on_write_failure(self.on_write_failure);

        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timestamp::FixedClock;
    use crate::core::verbosity::Verbosity;
    use crate::sinks::MemorySink;
    use chrono::{FixedOffset, TimeZone};
    use std::sync::atomic::AtomicUsize;
    use std::sync::Weak;

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn fixed_clock() -> Arc<dyn Clock> {
        let at = FixedOffset::west_opt(7 * 3600)
            .expect("valid offset")
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123);
        Arc::new(FixedClock(at))
    }

    fn capture(threshold: i32) -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .verbosity(&Verbosity::new(threshold))
            .sink(sink.clone())
            .clock(fixed_clock())
            .build();
        (logger, sink)
    }

    #[test]
    fn test_new_defaults() {
        let logger = Logger::new();
        assert_eq!(logger.threshold(), 0);
        assert_eq!(logger.time_format(), TimeFormat::default());
    }

    #[test]
    fn test_exact_line_format() {
        let (logger, sink) = capture(0);
        logger.logv(Severity::Error, true, "x");
        logger.logv(Severity::Error, false, "x");

        assert_eq!(
            sink.contents(),
            "2025-01-08T10:30:45.123-0700\tERR x\n2025-01-08T10:30:45.123-0700\tx\n"
        );
    }

    #[test]
    fn test_always_on_severities() {
        let (logger, sink) = capture(0);
        logger.logv(Severity::Error, false, "e");
        logger.logv(Severity::Warn, false, "w");
        logger.logv(Severity::Info, false, "i");
        assert_eq!(sink.lines().len(), 3);
    }

    #[test]
    fn test_debug_and_trace_need_threshold() {
        let (logger, sink) = capture(1);
        logger.logv(Severity::Debug, false, "debug");
        logger.logv(Severity::Trace, false, "trace");

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("\tdebug"));
        assert_eq!(logger.metrics().lines_filtered(), 1);
    }

    #[test]
    fn test_quiet_suppresses_everything() {
        let (logger, sink) = capture(0);
        logger.set_verbosity(Some(&Verbosity { level: 5, quiet: true }));
        assert_eq!(logger.threshold(), -1);

        for severity in Severity::ALL {
            logger.logv(severity, true, "nope");
        }
        assert!(sink.is_empty());
        assert_eq!(logger.metrics().lines_filtered(), 5);
    }

    #[test]
    fn test_absent_verbosity_resets() {
        let (logger, _sink) = capture(3);
        logger.set_verbosity(None);
        assert_eq!(logger.threshold(), 0);
    }

    #[test]
    fn test_logvf_formats_after_tag() {
        let (logger, sink) = capture(2);
        logger.logvf(Severity::Trace, true, format_args!("{} of {}", 3, 5));
        assert!(sink.lines()[0].ends_with("\tTRC 3 of 5"));
    }

    #[test]
    fn test_raw_rejects_negative_without_writing() {
        let (logger, sink) = capture(0);
        let err = logger.logv_raw(-1, false, "bad").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidSeverity { value: -1 }));

        let err = logger
            .logvf_raw(-9, false, format_args!("bad {}", 1))
            .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidSeverity { value: -9 }));

        assert!(sink.is_empty());
    }

    #[test]
    fn test_raw_above_four_filters_on_its_own_value() {
        let (logger, sink) = capture(5);
        logger.logv_raw(5, false, "five").expect("untagged level");
        logger
            .logvf_raw(6, false, format_args!("{}", "six"))
            .expect("untagged level");

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("\tfive"));
        assert_eq!(logger.metrics().lines_filtered(), 1);

        logger.set_verbosity(Some(&Verbosity::new(4)));
        logger.logv_raw(5, false, "five again").expect("untagged level");
        assert_eq!(sink.lines().len(), 1);
    }

    #[test]
    fn test_raw_above_four_cannot_be_tagged() {
        let (logger, sink) = capture(9);
        let err = logger.logv_raw(5, true, "tagged").unwrap_err();
        assert!(matches!(err, LoggerError::UntaggableSeverity { value: 5 }));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_raw_accepts_known_ordinals() {
        let (logger, sink) = capture(0);
        logger.logv_raw(3, true, "careful").expect("valid severity");
        assert!(sink.lines()[0].ends_with("\tWRN careful"));
    }

    #[test]
    fn test_enabled_vs_is_in_verbosity() {
        let (logger, _sink) = capture(0);
        assert!(logger.enabled(Severity::Info));
        assert!(!logger.is_in_verbosity(Severity::Info));
        assert!(logger.is_in_verbosity(Severity::Error));
        assert!(!logger.is_in_verbosity(Severity::Debug));
    }

    #[test]
    fn test_invalid_time_format_degrades() {
        let (logger, sink) = capture(0);
        logger.set_time_format("%Q");
        logger.logv(Severity::Info, false, "still here");
        assert_eq!(sink.contents(), "%Q\tstill here\n");
    }

    #[test]
    fn test_write_failure_is_swallowed_and_reported() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);

        let logger = Logger::builder()
            .sink(FailingSink)
            .on_write_failure(Arc::new(move |err: &io::Error| {
                assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
                seen_clone.fetch_add(1, Ordering::Relaxed);
            }))
            .build();

        logger.logv(Severity::Error, true, "lost");
        logger.logv(Severity::Info, false, "lost too");

        assert_eq!(logger.metrics().write_failures(), 2);
        assert_eq!(logger.metrics().lines_written(), 0);
        assert_eq!(seen.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_failure_hook_logging_through_same_logger() {
        let calls = Arc::new(AtomicUsize::new(0));
        let logger = Arc::new(Logger::builder().sink(FailingSink).build());

        let weak: Weak<Logger> = Arc::downgrade(&logger);
        let calls_clone = Arc::clone(&calls);
        logger.set_on_write_failure(Some(Arc::new(move |err: &io::Error| {
            calls_clone.fetch_add(1, Ordering::Relaxed);
            if let Some(logger) = weak.upgrade() {
                logger.logv(Severity::Error, true, &format!("log write failed: {}", err));
            }
        })));

        logger.logv(Severity::Error, true, "lost");

        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert_eq!(logger.metrics().write_failures(), 2);

        // the hook runs again for the next top-level failure
        logger.logv(Severity::Info, false, "lost again");
        assert_eq!(calls.load(Ordering::Relaxed), 2);
        assert_eq!(logger.metrics().write_failures(), 4);
    }

    #[test]
    fn test_flush_failure_is_returned_and_counted() {
        struct UnflushableSink;

        impl Write for UnflushableSink {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Err(io::Error::new(io::ErrorKind::Other, "device gone"))
            }
        }

        let logger = Logger::builder().sink(UnflushableSink).build();
        assert!(matches!(logger.flush(), Err(LoggerError::IoError(_))));
        assert_eq!(logger.metrics().flush_failures(), 1);
    }

    #[test]
    fn test_lock_released_after_failure() {
        let logger = Logger::builder().sink(FailingSink).build();
        logger.logv(Severity::Error, false, "lost");

        let sink = MemorySink::new();
        logger.set_sink(sink.clone());
        logger.logv(Severity::Error, false, "kept");

        assert_eq!(sink.lines().len(), 1);
        assert_eq!(logger.metrics().write_failures(), 1);
        assert_eq!(logger.metrics().lines_written(), 1);
    }

    #[test]
    fn test_builder_from_config() {
        let config = LoggerConfig::new()
            .with_verbosity(Verbosity::quiet())
            .with_time_format("%H");
        let logger = Logger::from_config(&config);

        assert_eq!(logger.threshold(), -1);
        assert_eq!(logger.time_format().as_str(), "%H");
    }

    #[test]
    fn test_debug_output() {
        let (logger, _sink) = capture(2);
        let debug = format!("{:?}", logger);
        assert!(debug.contains("threshold: 2"));
    }
}
