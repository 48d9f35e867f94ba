//! `io::Write` adapter over a [`Logger`]

use super::logger::Logger;
use super::severity::Severity;
use std::fmt;
use std::io;
use std::ops::Deref;

/// Hands a logger to anything that expects a byte sink.
///
/// Every write becomes one untagged log line at a fixed severity. Writes
/// always succeed and always report the whole buffer as consumed, whether
/// the line was filtered out or the sink failed underneath.
///
/// `L` is how the logger is held: `&Logger` from [`Logger::writer`], or
/// `Arc<Logger>` from [`Logger::shared_writer`] when the writer has to be
/// `'static` (moved into a thread, boxed as another logger's sink).
///
/// Do not install a writer as the sink of the logger it writes to; the
/// nested write would wait on the sink lock the outer write holds.
///
/// # Example
///
/// ```
/// use std::io::Write;
/// use tool_logger::{Logger, MemorySink, Severity};
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder().sink(sink.clone()).build();
///
/// let mut out = logger.writer(Severity::Info);
/// writeln!(out, "copied {} files", 3).unwrap();
///
/// assert!(sink.contents().contains("\tcopied 3 files\n"));
/// ```
#[derive(Debug, Clone)]
pub struct LogWriter<L: Deref<Target = Logger>> {
    logger: L,
    severity: Severity,
}

impl<L: Deref<Target = Logger>> LogWriter<L> {
    pub fn new(logger: L, severity: Severity) -> Self {
        Self { logger, severity }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl<L: Deref<Target = Logger>> io::Write for LogWriter<L> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.logger
            .logv(self.severity, false, &String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    /// One line per formatted write, not one per format fragment.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.logger.logvf(self.severity, false, args);
        Ok(())
    }

    /// Flush failures are counted in the logger's metrics, never returned.
    fn flush(&mut self) -> io::Result<()> {
        let _ = self.logger.flush();
        Ok(())
    }
}

impl<L: Deref<Target = Logger>> fmt::Write for LogWriter<L> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.logger.logv(self.severity, false, s);
        Ok(())
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.logger.logvf(self.severity, false, args);
        Ok(())
    }
}
