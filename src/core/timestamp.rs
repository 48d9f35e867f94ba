//! Timestamp templates and time sources
//!
//! Log lines are prefixed with the current time rendered through a
//! strftime-style template. The default renders local time with
//! milliseconds and a numeric UTC offset, e.g. `2014-06-03T17:02:11.123-0400`.

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

/// Default template: `2014-06-03T17:02:11.123-0400`
pub const TOOL_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// strftime-compatible template used to render the timestamp prefix
///
/// The template is never validated. A template chrono cannot render is
/// emitted verbatim instead of a timestamp, so a bad template degrades the
/// output but logging keeps working.
///
/// # Examples
///
/// ```
/// use tool_logger::TimeFormat;
/// use chrono::{FixedOffset, TimeZone};
///
/// let offset = FixedOffset::west_opt(4 * 3600).unwrap();
/// let at = offset.with_ymd_and_hms(2014, 6, 3, 17, 2, 11).unwrap();
/// assert_eq!(TimeFormat::default().render(&at), "2014-06-03T17:02:11.000-0400");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeFormat(String);

impl TimeFormat {
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render `datetime` with this template
    #[must_use]
    pub fn render(&self, datetime: &DateTime<FixedOffset>) -> String {
        let mut out = String::with_capacity(32);
        if write!(out, "{}", datetime.format(&self.0)).is_err() {
            out.clear();
            out.push_str(&self.0);
        }
        out
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self(TOOL_TIME_FORMAT.to_string())
    }
}

impl From<&str> for TimeFormat {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<String> for TimeFormat {
    fn from(template: String) -> Self {
        Self(template)
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of "now" for timestamp prefixes
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local wall-clock time, keeping the local UTC offset
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always reports the same instant. Handy for reproducible output.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
