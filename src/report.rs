//! End-to-end expiry calculation
//!
//! Loads the schedule, parses the reference timestamp, runs the advancer and
//! packages the result for printing.

use anyhow::{Context, Result};
use chrono::{Datelike, Weekday};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::advancer::advance;
use crate::schedule::WeekSchedule;
use crate::timestamp::{format_instant, parse_reference, weekday_name, Instant};

/// Result of one expiry calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryReport {
    /// Reference timestamp exactly as supplied
    pub input: String,
    pub input_weekday: Weekday,
    pub expiry: Instant,
}

impl ExpiryReport {
    pub fn expiry_weekday(&self) -> Weekday {
        self.expiry.weekday()
    }
}

impl fmt::Display for ExpiryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "input datetime = {}", self.input)?;
        writeln!(f, "input day of week = {}", weekday_name(self.input_weekday))?;
        writeln!(f, "expiry datetime = {}", format_instant(&self.expiry))?;
        write!(f, "expiry day of week = {}", weekday_name(self.expiry_weekday()))
    }
}

/// Read and validate a schedule file
pub fn load_schedule(path: &Path) -> Result<WeekSchedule> {
    let json = fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read schedule file '{}'. Invalid path or file does not exist.",
            path.display()
        )
    })?;
    let schedule = WeekSchedule::from_json(&json)
        .with_context(|| format!("Invalid schedule in '{}'", path.display()))?;

    debug!(
        open_days = ?schedule.open_days().collect::<Vec<_>>(),
        "Schedule loaded from {}",
        path.display()
    );
    Ok(schedule)
}

/// Compute the expiry for `now` (yyyy-MM-ddTHH:mm:ss+hhmm) under `schedule`.
pub fn compute(schedule: &WeekSchedule, now: &str, window_secs: u64) -> Result<ExpiryReport> {
    let reference = parse_reference(now)?;
    let expiry = advance(schedule, reference, window_secs)
        .with_context(|| format!("Cannot compute expiry for {}", now))?;

    info!(
        "Expiry for {} after {}s of open time: {}",
        now,
        window_secs,
        format_instant(&expiry)
    );

    Ok(ExpiryReport {
        input: now.to_string(),
        input_weekday: reference.weekday(),
        expiry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advancer::DEFAULT_WINDOW_SECS;
    use crate::error::{AdvanceError, TimestampError};
    use crate::schedule::DayRecord;

    fn weekdays_nine_to_five() -> WeekSchedule {
        let mut records = vec![DayRecord::open("09:00", "17:00"); 7];
        records[0] = DayRecord::closed();
        records[6] = DayRecord::closed();
        WeekSchedule::from_records(&records).unwrap()
    }

    #[test]
    fn test_friday_afternoon_rolls_to_monday() {
        let report = compute(
            &weekdays_nine_to_five(),
            "2019-10-11T16:00:00+0800",
            DEFAULT_WINDOW_SECS,
        )
        .expect("should compute");

        assert_eq!(report.input_weekday, Weekday::Fri);
        assert_eq!(report.expiry_weekday(), Weekday::Mon);
        assert_eq!(
            report.to_string(),
            "input datetime = 2019-10-11T16:00:00+0800\n\
             input day of week = FRIDAY\n\
             expiry datetime = 2019-10-14T11:00+08:00\n\
             expiry day of week = MONDAY"
        );
    }

    #[test]
    fn test_bad_timestamp_rejected_before_advancing() {
        let err = compute(&weekdays_nine_to_five(), "2019-10-11 16:00", DEFAULT_WINDOW_SECS)
            .unwrap_err();
        assert!(err.downcast_ref::<TimestampError>().is_some(), "error: {:#}", err);
    }

    #[test]
    fn test_all_closed_schedule_reported() {
        let schedule = WeekSchedule::from_records(&vec![DayRecord::closed(); 7]).unwrap();
        let err = compute(&schedule, "2019-10-11T16:00:00+0800", DEFAULT_WINDOW_SECS)
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<AdvanceError>(),
            Some(&AdvanceError::AllDaysClosed)
        );
    }

    #[test]
    fn test_missing_schedule_file() {
        let err = load_schedule(Path::new("/nonexistent/schedule.json")).unwrap_err();
        assert!(
            err.to_string().contains("Failed to read schedule file"),
            "error: {}",
            err
        );
    }
}
