//! expirycheck library - business-hours expiry calculation
//!
//! This module exports internal components for integration testing.

pub mod advancer;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod schedule;
pub mod timestamp;

pub use advancer::{advance, DEFAULT_WINDOW_SECS};
pub use error::{AdvanceError, ScheduleError, TimestampError};
pub use schedule::{DayRecord, DaySchedule, OpenHours, WeekSchedule};
pub use timestamp::Instant;
