//! Tests for the process-wide default logger
//!
//! The default logger is shared by every test in this binary, so each test
//! takes `GLOBAL_LOCK` and reconfigures it from scratch.

use chrono::{FixedOffset, TimeZone};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use tool_logger::{global, Clock, FixedClock, Logger, MemorySink, Severity, TimeFormat, Verbosity};

static GLOBAL_LOCK: Mutex<()> = Mutex::new(());

fn fixed_clock() -> Arc<dyn Clock> {
    let at = FixedOffset::west_opt(5 * 3600)
        .expect("valid offset")
        .with_ymd_and_hms(2023, 3, 1, 23, 59, 59)
        .single()
        .expect("valid datetime");
    Arc::new(FixedClock(at))
}

fn reset_global() -> MemorySink {
    let sink = MemorySink::new();
    global::set_sink(sink.clone());
    global::set_verbosity(None);
    global::set_time_format(TimeFormat::default());
    global::set_clock(fixed_clock());
    sink
}

#[test]
fn test_default_threshold_is_zero() {
    let _guard = GLOBAL_LOCK.lock();
    let _sink = reset_global();

    assert_eq!(global::threshold(), 0);
    assert!(global::is_in_verbosity(Severity::Error));
    assert!(!global::is_in_verbosity(Severity::Debug));
}

#[test]
fn test_is_in_verbosity_compares_ordinals() {
    let _guard = GLOBAL_LOCK.lock();
    let _sink = reset_global();

    global::set_verbosity(Some(&Verbosity::new(2)));
    assert!(global::is_in_verbosity(Severity::Trace));
    assert!(!global::is_in_verbosity(Severity::Warn));

    global::set_verbosity(Some(&Verbosity::quiet()));
    assert!(!global::is_in_verbosity(Severity::Error));
}

#[test]
fn test_free_functions_match_instance_output() {
    let _guard = GLOBAL_LOCK.lock();
    let global_sink = reset_global();
    global::set_verbosity(Some(&Verbosity::new(2)));

    let instance_sink = MemorySink::new();
    let logger = Logger::builder()
        .verbosity(&Verbosity::new(2))
        .sink(instance_sink.clone())
        .clock(fixed_clock())
        .build();

    logger.logv(Severity::Trace, true, "same");
    logger.logvf(Severity::Warn, false, format_args!("{} + {}", 1, 2));
    logger.logv_raw(0, true, "raw").expect("valid severity");
    logger.writer(Severity::Info).write_all(b"adapter").expect("never fails");

    global::logv(Severity::Trace, true, "same");
    global::logvf(Severity::Warn, false, format_args!("{} + {}", 1, 2));
    global::logv_raw(0, true, "raw").expect("valid severity");
    global::writer(Severity::Info).write_all(b"adapter").expect("never fails");

    assert_eq!(global_sink.bytes(), instance_sink.bytes());
    assert_eq!(global_sink.lines().len(), 4);
    assert_eq!(global_sink.lines()[0], "2023-03-01T23:59:59.000-0500\tTRC same");
}

#[test]
fn test_global_raw_contract_violation() {
    let _guard = GLOBAL_LOCK.lock();
    let sink = reset_global();

    assert!(global::logv_raw(-1, false, "bad").is_err());
    assert!(global::logvf_raw(-2, false, format_args!("bad")).is_err());
    assert!(sink.is_empty());
}

#[test]
fn test_default_logger_is_shared() {
    let _guard = GLOBAL_LOCK.lock();
    let sink = reset_global();

    let logger = global::default_logger();
    tool_logger::error!(logger, "via handle");
    global::flush().expect("memory sink flush");

    assert!(sink.lines()[0].ends_with("\tERR via handle"));
    assert!(std::ptr::eq(logger, global::default_logger()));
}
