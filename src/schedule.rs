//! Weekly business-hours schedule
//!
//! A schedule arrives as a JSON array of seven day records. The array is
//! positional: index 0 is Sunday and indices 1-6 run Monday through
//! Saturday. Once loaded, the schedule is keyed by `chrono::Weekday` and
//! never changes.

use chrono::{Duration, NaiveTime, Timelike, Weekday};
use serde::Deserialize;

use crate::error::ScheduleError;

/// Weekday for each position of the source schedule array.
pub const SOURCE_WEEKDAY_ORDER: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Monday-first order used for storage and reporting.
const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// One raw entry of the schedule document, e.g.
/// `{"open": true, "open_at": "09:00", "close_at": "17:00"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DayRecord {
    pub open: bool,
    #[serde(default)]
    pub open_at: Option<String>,
    #[serde(default)]
    pub close_at: Option<String>,
}

impl DayRecord {
    pub fn open(open_at: &str, close_at: &str) -> Self {
        Self {
            open: true,
            open_at: Some(open_at.to_string()),
            close_at: Some(close_at.to_string()),
        }
    }

    pub fn closed() -> Self {
        Self {
            open: false,
            open_at: None,
            close_at: None,
        }
    }
}

/// Opening window of a single day. Always `opens_at < closes_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenHours {
    opens_at: NaiveTime,
    closes_at: NaiveTime,
}

impl OpenHours {
    /// Returns `None` unless the day closes strictly after it opens.
    pub fn new(opens_at: NaiveTime, closes_at: NaiveTime) -> Option<Self> {
        (opens_at < closes_at).then_some(Self { opens_at, closes_at })
    }

    pub fn opens_at(&self) -> NaiveTime {
        self.opens_at
    }

    pub fn closes_at(&self) -> NaiveTime {
        self.closes_at
    }

    /// Length of the open window
    pub fn span(&self) -> Duration {
        self.closes_at.signed_duration_since(self.opens_at)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySchedule {
    Closed,
    Open(OpenHours),
}

impl DaySchedule {
    pub fn is_open(&self) -> bool {
        matches!(self, DaySchedule::Open(_))
    }

    /// Opening window, if the day is open at all.
    pub fn hours(&self) -> Option<OpenHours> {
        match self {
            DaySchedule::Open(hours) => Some(*hours),
            DaySchedule::Closed => None,
        }
    }

    /// Convert a raw record. Time strings on closed days are never read.
    pub fn from_record(day: Weekday, record: &DayRecord) -> Result<Self, ScheduleError> {
        if !record.open {
            return Ok(DaySchedule::Closed);
        }

        let opens_at = parse_field(day, "open_at", record.open_at.as_deref())?;
        let closes_at = parse_field(day, "close_at", record.close_at.as_deref())?;

        OpenHours::new(opens_at, closes_at)
            .map(DaySchedule::Open)
            .ok_or_else(|| ScheduleError::InvalidHours {
                day,
                opens_at: opens_at.to_string(),
                closes_at: closes_at.to_string(),
            })
    }
}

/// Parse a wall-clock time of day in `HH:MM` or `HH:MM:SS` form.
/// Leap seconds (`:60`) are rejected.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
        .filter(|time| time.nanosecond() < 1_000_000_000)
}

fn parse_field(
    day: Weekday,
    field: &'static str,
    value: Option<&str>,
) -> Result<NaiveTime, ScheduleError> {
    value
        .and_then(parse_time_of_day)
        .ok_or_else(|| ScheduleError::InvalidTime {
            day,
            field,
            value: value.unwrap_or_default().to_string(),
        })
}

/// Business hours for every day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekSchedule {
    /// Indexed by `Weekday::num_days_from_monday`
    days: [DaySchedule; 7],
}

impl WeekSchedule {
    /// Build a schedule from explicit weekday entries. Every weekday must
    /// appear exactly once.
    pub fn from_entries<I>(entries: I) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = (Weekday, DaySchedule)>,
    {
        let mut slots: [Option<DaySchedule>; 7] = [None; 7];
        for (day, schedule) in entries {
            let slot = &mut slots[slot_index(day)];
            if slot.is_some() {
                return Err(ScheduleError::DuplicateDay { day });
            }
            *slot = Some(schedule);
        }

        let mut days = [DaySchedule::Closed; 7];
        for day in WEEK {
            days[slot_index(day)] =
                slots[slot_index(day)].ok_or(ScheduleError::MissingDay { day })?;
        }
        Ok(Self { days })
    }

    /// Build a schedule from the positional source records (index 0 = Sunday).
    pub fn from_records(records: &[DayRecord]) -> Result<Self, ScheduleError> {
        if records.len() != SOURCE_WEEKDAY_ORDER.len() {
            return Err(ScheduleError::WrongLength {
                count: records.len(),
            });
        }

        let entries = SOURCE_WEEKDAY_ORDER
            .iter()
            .zip(records)
            .map(|(&day, record)| Ok((day, DaySchedule::from_record(day, record)?)))
            .collect::<Result<Vec<_>, ScheduleError>>()?;

        Self::from_entries(entries)
    }

    /// Parse a schedule document.
    pub fn from_json(json: &str) -> Result<Self, ScheduleError> {
        let records: Vec<DayRecord> =
            serde_json::from_str(json).map_err(|e| ScheduleError::Json(e.to_string()))?;
        Self::from_records(&records)
    }

    /// The same hours on every day of the week.
    pub fn uniform(hours: OpenHours) -> Self {
        Self {
            days: [DaySchedule::Open(hours); 7],
        }
    }

    pub fn day(&self, day: Weekday) -> DaySchedule {
        self.days[slot_index(day)]
    }

    /// Return a copy with `day` replaced.
    pub fn with_day(mut self, day: Weekday, schedule: DaySchedule) -> Self {
        self.days[slot_index(day)] = schedule;
        self
    }

    pub fn has_open_day(&self) -> bool {
        self.days.iter().any(DaySchedule::is_open)
    }

    /// Open weekdays, Monday first.
    pub fn open_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEK.into_iter().filter(|day| self.day(*day).is_open())
    }
}

fn slot_index(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}
