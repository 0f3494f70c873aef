//! Time-related utilities with clock abstraction for testability.
//!
//! Chat lines carry a local, second-precision timestamp rendered with a
//! fixed-width layout (`YYYY-MM-DD HH:MM:SS`).

use chrono::{Local, NaiveDateTime};

/// Layout of the timestamp at the head of every chat line.
pub const CHAT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Width in characters of a rendered chat timestamp.
pub const CHAT_TIMESTAMP_WIDTH: usize = 19;

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get the current local wall-clock time
    fn now(&self) -> NaiveDateTime;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: NaiveDateTime,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    pub fn new(fixed_time: NaiveDateTime) -> Self {
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.fixed_time
    }
}

/// Render a time as a chat timestamp (`YYYY-MM-DD HH:MM:SS`)
pub fn format_chat_timestamp(time: &NaiveDateTime) -> String {
    time.format(CHAT_TIMESTAMP_FORMAT).to_string()
}

/// Parse a chat timestamp; `None` unless the input is exactly one timestamp
pub fn parse_chat_timestamp(text: &str) -> Option<NaiveDateTime> {
    if text.len() != CHAT_TIMESTAMP_WIDTH {
        return None;
    }
    NaiveDateTime::parse_from_str(text, CHAT_TIMESTAMP_FORMAT).ok()
}
