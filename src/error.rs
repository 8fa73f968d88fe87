//! Error types for schedule loading and expiry calculation.

use chrono::Weekday;
use thiserror::Error;

/// Errors raised while building a [`WeekSchedule`](crate::schedule::WeekSchedule).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The schedule document is not a valid JSON array of day records.
    #[error("malformed schedule document: {0}")]
    Json(String),

    /// The schedule does not hold exactly one record per weekday.
    #[error("schedule must contain exactly 7 day records, got {count}")]
    WrongLength {
        /// Number of records supplied.
        count: usize,
    },

    /// The same weekday was supplied twice.
    #[error("duplicate schedule entry for {day}")]
    DuplicateDay {
        /// The repeated weekday.
        day: Weekday,
    },

    /// A weekday has no schedule entry.
    #[error("no schedule entry for {day}")]
    MissingDay {
        /// The weekday left out.
        day: Weekday,
    },

    /// An open day does not close strictly after it opens.
    #[error("{day} opens at {opens_at} but closes at {closes_at}")]
    InvalidHours {
        /// Offending weekday.
        day: Weekday,
        /// Opening time as parsed.
        opens_at: String,
        /// Closing time as parsed.
        closes_at: String,
    },

    /// A time-of-day string on an open day is missing or unparseable.
    #[error("invalid {field} for {day}: {value:?} (expected HH:MM)")]
    InvalidTime {
        /// Offending weekday.
        day: Weekday,
        /// Either `open_at` or `close_at`.
        field: &'static str,
        /// Raw value, empty when the field was absent.
        value: String,
    },
}

/// Errors raised by [`advance`](crate::advancer::advance).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdvanceError {
    /// No weekday is open, so no open time can ever accrue.
    #[error("schedule has no open days")]
    AllDaysClosed,

    /// The result would fall outside the representable calendar range.
    #[error("calculation left the supported date range")]
    OutOfRange,
}

/// Errors raised while reading a reference timestamp.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("invalid timestamp {input:?} (expected yyyy-MM-ddTHH:mm:ss+hhmm): {reason}")]
    Invalid { input: String, reason: String },
}
