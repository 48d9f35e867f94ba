//! Verbosity capability and threshold derivation

use serde::{Deserialize, Serialize};

/// Threshold value meaning "suppress everything".
pub const QUIET_THRESHOLD: i32 = -1;

/// Threshold used when no verbosity is configured.
pub const DEFAULT_THRESHOLD: i32 = 0;

/// Anything that can tell the logger how chatty to be.
///
/// Usually backed by parsed command-line flags; the logger only asks for a
/// numeric level and whether quiet mode is on.
pub trait VerbosityLevel {
    fn level(&self) -> i32;
    fn is_quiet(&self) -> bool;
}

/// Turn an optional capability into a threshold.
///
/// Quiet wins over any numeric level; no capability at all means the
/// default threshold.
pub fn threshold_for(level: Option<&dyn VerbosityLevel>) -> i32 {
    match level {
        None => DEFAULT_THRESHOLD,
        Some(level) if level.is_quiet() => QUIET_THRESHOLD,
        Some(level) => level.level(),
    }
}

/// Plain verbosity settings, e.g. from `-v` counts and a `--quiet` switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Verbosity {
    pub level: i32,
    pub quiet: bool,
}

impl Verbosity {
    #[must_use]
    pub fn new(level: i32) -> Self {
        Self { level, quiet: false }
    }

    #[must_use]
    pub fn quiet() -> Self {
        Self {
            level: DEFAULT_THRESHOLD,
            quiet: true,
        }
    }

    /// Build from a repeated verbose flag count (`-vvv` is 3)
    #[must_use]
    pub fn from_flags(verbose_count: u8, quiet: bool) -> Self {
        Self {
            level: i32::from(verbose_count),
            quiet,
        }
    }
}

impl VerbosityLevel for Verbosity {
    fn level(&self) -> i32 {
        self.level
    }

    fn is_quiet(&self) -> bool {
        self.quiet
    }
}
