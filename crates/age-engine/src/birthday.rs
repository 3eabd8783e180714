//! Next-birthday projection and countdown.

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;

use crate::calendar::anniversary_in;
use crate::error::{AgeError, Result};
use crate::format::DisplayFormat;

pub(crate) const SECOND_MS: i64 = 1_000;
pub(crate) const MINUTE_MS: i64 = 60 * SECOND_MS;
pub(crate) const HOUR_MS: i64 = 60 * MINUTE_MS;
pub(crate) const DAY_MS: i64 = 24 * HOUR_MS;

/// The next occurrence of a birthday and the time left until it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextBirthdayInfo {
    /// Wall-clock instant of the next birthday, at the birth time-of-day.
    pub at: NaiveDateTime,
    /// `at` rendered with the date pattern (e.g., "28/02/2026").
    pub date: String,
    /// Whole days left.
    pub days: i64,
    /// Hours left after whole days (0-23).
    pub hours: i64,
    /// Minutes left after whole hours (0-59).
    pub minutes: i64,
    /// Seconds left after whole minutes (0-59).
    pub seconds: i64,
    /// `"{d}d {h}h {m}m {s}s"`.
    pub countdown: String,
}

/// Project `birth` onto the first birthday strictly after `now`.
///
/// The candidate is the birth month/day in `now`'s year at the birth
/// time-of-day; if that is not after `now`, the following year is used.
/// A 29 February birth lands on 28 February in common years.
///
/// # Errors
///
/// Returns [`AgeError::InvalidInput`] only when the target year is outside
/// chrono's representable range.
pub fn next_birthday_info(
    birth: NaiveDateTime,
    now: NaiveDateTime,
    format: &DisplayFormat,
) -> Result<NextBirthdayInfo> {
    let mut next = birthday_in(birth, now.year())?;
    if next <= now {
        next = birthday_in(birth, now.year() + 1)?;
    }

    let (days, hours, minutes, seconds) = split_millis((next - now).num_milliseconds());

    Ok(NextBirthdayInfo {
        at: next,
        date: format.format_date(next.date()),
        days,
        hours,
        minutes,
        seconds,
        countdown: format!("{days}d {hours}h {minutes}m {seconds}s"),
    })
}

fn birthday_in(birth: NaiveDateTime, year: i32) -> Result<NaiveDateTime> {
    anniversary_in(birth.date(), year)
        .map(|date| date.and_time(birth.time()))
        .ok_or_else(AgeError::bad_datetime)
}

/// Decompose a non-negative millisecond span into whole days and the
/// hour/minute/second remainders.
pub(crate) fn split_millis(ms: i64) -> (i64, i64, i64, i64) {
    (
        ms / DAY_MS,
        (ms % DAY_MS) / HOUR_MS,
        (ms % HOUR_MS) / MINUTE_MS,
        (ms % MINUTE_MS) / SECOND_MS,
    )
}
