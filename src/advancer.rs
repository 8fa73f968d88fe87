/// Business-hours arithmetic
///
/// Adds a span of open time to a reference instant. Time only accrues on
/// open days, between that day's opening and closing time; whatever does not
/// fit before closing carries over to the next open day.

use chrono::{Datelike, Duration, NaiveTime};
use tracing::debug;

use crate::error::AdvanceError;
use crate::schedule::{OpenHours, WeekSchedule};
use crate::timestamp::Instant;

/// Default SLA window: 3 working hours
pub const DEFAULT_WINDOW_SECS: u64 = 3 * 60 * 60;

/// Largest owed duration, in seconds, that can be represented
pub const MAX_WINDOW_SECS: u64 = (i64::MAX / 1000) as u64;

/// Add `owed_secs` of open time to `reference`.
///
/// The reference is first moved to an opening position: a closed day rolls
/// to the next open day, a time before opening is clamped to opening, and a
/// time strictly after closing rolls to the next open day. Open time is then
/// consumed day by day. Landing exactly on a closing time is a valid result.
///
/// The offset of `reference` is preserved in the result.
pub fn advance(
    schedule: &WeekSchedule,
    reference: Instant,
    owed_secs: u64,
) -> Result<Instant, AdvanceError> {
    let (mut now, mut hours) = settle(schedule, reference)?;
    let mut owed = owed_duration(owed_secs)?;

    loop {
        let until_close = hours.closes_at().signed_duration_since(now.time());
        if owed <= until_close {
            return now.checked_add_signed(owed).ok_or(AdvanceError::OutOfRange);
        }

        owed = owed - until_close;
        debug!(
            from = %now,
            carry_secs = owed.num_seconds(),
            "window crosses closing time, carrying over"
        );
        (now, hours) = roll(schedule, now)?;
    }
}

/// Position `reference` would start consuming open time from. This is
/// `advance` with nothing owed.
pub fn opening_position(schedule: &WeekSchedule, reference: Instant) -> Result<Instant, AdvanceError> {
    settle(schedule, reference).map(|(now, _)| now)
}

/// Opening time of the first open day after the calendar date of `from`.
pub fn next_open_day(schedule: &WeekSchedule, from: Instant) -> Result<Instant, AdvanceError> {
    roll(schedule, from).map(|(now, _)| now)
}

fn settle(schedule: &WeekSchedule, reference: Instant) -> Result<(Instant, OpenHours), AdvanceError> {
    if !schedule.has_open_day() {
        return Err(AdvanceError::AllDaysClosed);
    }

    let (mut now, hours) = match schedule.day(reference.weekday()).hours() {
        Some(hours) => (reference, hours),
        None => {
            debug!(reference = %reference, "reference falls on a closed day");
            roll(schedule, reference)?
        }
    };

    if now.time() < hours.opens_at() {
        debug!(reference = %now, "before opening, clamping to opening time");
        now = at_time(now, hours.opens_at())?;
    }

    if now.time() > hours.closes_at() {
        debug!(reference = %now, "after closing, rolling to next open day");
        return roll(schedule, now);
    }

    Ok((now, hours))
}

/// Day-roll: step forward one calendar day at a time until an open weekday
/// is found, then move to its opening time. A week always contains the
/// weekday being searched for, so seven steps suffice.
fn roll(schedule: &WeekSchedule, from: Instant) -> Result<(Instant, OpenHours), AdvanceError> {
    let mut day = from;
    for _ in 0..7 {
        day = day
            .checked_add_signed(Duration::days(1))
            .ok_or(AdvanceError::OutOfRange)?;
        if let Some(hours) = schedule.day(day.weekday()).hours() {
            return Ok((at_time(day, hours.opens_at())?, hours));
        }
    }
    Err(AdvanceError::AllDaysClosed)
}

/// Same calendar date and offset, different wall-clock time.
fn at_time(instant: Instant, time: NaiveTime) -> Result<Instant, AdvanceError> {
    instant
        .checked_add_signed(time.signed_duration_since(instant.time()))
        .ok_or(AdvanceError::OutOfRange)
}

fn owed_duration(owed_secs: u64) -> Result<Duration, AdvanceError> {
    if owed_secs > MAX_WINDOW_SECS {
        return Err(AdvanceError::OutOfRange);
    }
    Ok(Duration::seconds(owed_secs as i64))
}
