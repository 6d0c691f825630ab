//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, FixedOffset, Local, SecondsFormat};

/// Display format for the calendar date of a message (e.g. `Oct 19, 2026`).
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

/// Display format for the clock time of a message (e.g. `3:04 PM`).
pub const DISPLAY_TIME_FORMAT: &str = "%-I:%M %p";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current wall-clock time in the host's local offset
    fn now(&self) -> DateTime<FixedOffset>;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<FixedOffset>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    pub fn new(fixed_time: DateTime<FixedOffset>) -> Self {
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.fixed_time
    }
}

/// Render the medium calendar date shown next to a message
pub fn format_display_date(time: &DateTime<FixedOffset>) -> String {
    time.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Render the short clock time shown next to a message
pub fn format_display_time(time: &DateTime<FixedOffset>) -> String {
    time.format(DISPLAY_TIME_FORMAT).to_string()
}

/// Convert a time to RFC 3339 with second precision
pub fn to_rfc3339(time: &DateTime<FixedOffset>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Whole seconds elapsed between `since` and `now`, clamped at zero
pub fn elapsed_seconds(since: &DateTime<FixedOffset>, now: &DateTime<FixedOffset>) -> u64 {
    u64::try_from((*now - *since).num_seconds()).unwrap_or(0)
}
