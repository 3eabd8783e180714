//! Age computation.
//!
//! Parses raw form input (`YYYY-MM-DD`, optional `HH:MM`) into a birth
//! instant and measures it against "now" in two ways:
//!
//! - a calendar breakdown in years/months/days, borrowing real month lengths
//! - fixed-unit totals and the sub-day remainder, from the raw millisecond
//!   difference
//!
//! All arithmetic is on naive local wall-clock values. DST transitions are
//! ignored: an hour gained or lost between birth and now is not reflected.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::birthday::{
    next_birthday_info, split_millis, NextBirthdayInfo, DAY_MS, HOUR_MS, MINUTE_MS, SECOND_MS,
};
use crate::calendar::calendar_span;
use crate::clock::{Clock, SystemClock};
use crate::error::{AgeError, Result};
use crate::format::DisplayFormat;

// ── Result types ────────────────────────────────────────────────────────────

/// Elapsed time since birth, each expressed as a single count of one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// `years * 12 + months` of the calendar breakdown.
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Everything the caller needs to display an age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeBreakdown {
    /// The parsed birth instant.
    pub birth: NaiveDateTime,
    /// Whole calendar years.
    pub years: i32,
    /// Whole calendar months after `years` (0-11).
    pub months: u32,
    /// Days after `months`. Negative (down to -2) when the borrowed month is
    /// shorter than the birth day of month; see [`crate::calendar::CalendarSpan`].
    pub days: i32,
    /// Hours of the sub-day remainder (0-23).
    pub hours: u32,
    /// Minutes of the sub-day remainder (0-59).
    pub minutes: u32,
    /// Seconds of the sub-day remainder (0-59).
    pub seconds: u32,
    pub totals: Totals,
    /// Weekday of birth (e.g., "Tuesday").
    pub weekday: String,
    /// Birth date, with time when a time of birth was supplied.
    pub formatted_dob: String,
    pub next_birthday: NextBirthdayInfo,
    /// One-line summary, the text persisted to history.
    pub summary: String,
}

// ── parse ───────────────────────────────────────────────────────────────────

/// Parse a birth date and optional time of birth.
///
/// `dob` is split on `-` into year, month and day. `tob`, when it contains a
/// colon, is split into hour and minute; missing or non-numeric time parts
/// become 0.
///
/// # Errors
///
/// [`AgeError::InvalidInput`] with:
/// - "Please select a valid date." when `dob` is empty
/// - "Invalid date format." when a date component is missing, non-numeric or zero
/// - "Invalid date/time." when the components do not name a real calendar instant
///
/// # Examples
///
/// ```
/// use age_engine::parse_birth;
///
/// let birth = parse_birth("2000-02-29", Some("06:30")).unwrap();
/// assert_eq!(birth.to_string(), "2000-02-29 06:30:00");
/// ```
pub fn parse_birth(dob: &str, tob: Option<&str>) -> Result<NaiveDateTime> {
    if dob.trim().is_empty() {
        return Err(AgeError::missing_date());
    }

    let mut parts = dob.split('-').map(parse_component);
    let (year, month, day) = match (
        parts.next().flatten(),
        parts.next().flatten(),
        parts.next().flatten(),
    ) {
        (Some(y), Some(m), Some(d)) if y != 0 && m != 0 && d != 0 => (y, m, d),
        _ => return Err(AgeError::bad_format()),
    };

    let (hour, minute) = match tob {
        Some(t) if t.contains(':') => {
            let mut parts = t.split(':').map(parse_component);
            (
                parts.next().flatten().unwrap_or(0),
                parts.next().flatten().unwrap_or(0),
            )
        }
        _ => (0, 0),
    };

    let year = i32::try_from(year).map_err(|_| AgeError::bad_datetime())?;
    let to_u32 = |n: i64| u32::try_from(n).map_err(|_| AgeError::bad_datetime());
    let (month, day) = (to_u32(month)?, to_u32(day)?);
    let (hour, minute) = (to_u32(hour)?, to_u32(minute)?);

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .ok_or_else(AgeError::bad_datetime)
}

fn parse_component(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

// ── compute ─────────────────────────────────────────────────────────────────

/// Compute an age against an explicit "now".
///
/// This is the pure core of [`AgeCalculator::compute_age`].
///
/// # Errors
///
/// Returns [`AgeError::InvalidInput`] for unparseable input (see
/// [`parse_birth`]) and [`AgeError::FutureDate`] when the birth instant is
/// after `now`.
///
/// # Examples
///
/// ```
/// use age_engine::{compute_age_at, DisplayFormat};
/// use chrono::NaiveDate;
///
/// let now = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let age = compute_age_at("2000-03-31", None, now, &DisplayFormat::default()).unwrap();
/// assert_eq!((age.years, age.months, age.days), (24, 1, 0));
/// ```
pub fn compute_age_at(
    dob: &str,
    tob: Option<&str>,
    now: NaiveDateTime,
    format: &DisplayFormat,
) -> Result<AgeBreakdown> {
    let birth = parse_birth(dob, tob)?;
    if birth > now {
        return Err(AgeError::FutureDate);
    }

    let span = calendar_span(birth.date(), now.date());

    let diff_ms = (now - birth).num_milliseconds();
    let (_, rem_hours, rem_minutes, rem_seconds) = split_millis(diff_ms);
    let total_days = diff_ms / DAY_MS;
    let totals = Totals {
        months: i64::from(span.years) * 12 + i64::from(span.months),
        weeks: total_days / 7,
        days: total_days,
        hours: diff_ms / HOUR_MS,
        minutes: diff_ms / MINUTE_MS,
        seconds: diff_ms / SECOND_MS,
    };

    let formatted_dob = match tob {
        Some(t) if !t.is_empty() => format.format_date_time(birth),
        _ => format.format_date(birth.date()),
    };

    let next_birthday = next_birthday_info(birth, now, format)?;

    let summary = format!(
        "DOB: {} | Age: {}y {}m {}d, {}h {}m {}s | Next birthday in {}",
        formatted_dob,
        span.years,
        span.months,
        span.days,
        rem_hours,
        rem_minutes,
        rem_seconds,
        next_birthday.countdown
    );

    Ok(AgeBreakdown {
        birth,
        years: span.years,
        months: span.months,
        days: span.days,
        hours: rem_hours as u32,
        minutes: rem_minutes as u32,
        seconds: rem_seconds as u32,
        totals,
        weekday: format.weekday(birth.date()),
        formatted_dob,
        next_birthday,
        summary,
    })
}

/// Age computation bound to a clock and a display format.
#[derive(Debug, Clone, Default)]
pub struct AgeCalculator<C = SystemClock> {
    clock: C,
    format: DisplayFormat,
}

impl<C: Clock> AgeCalculator<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            format: DisplayFormat::default(),
        }
    }

    pub fn with_format(mut self, format: DisplayFormat) -> Self {
        self.format = format;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn format(&self) -> &DisplayFormat {
        &self.format
    }

    /// Compute the age of someone born at `dob`/`tob` as of the clock's now.
    ///
    /// # Errors
    ///
    /// See [`compute_age_at`].
    pub fn compute_age(&self, dob: &str, tob: Option<&str>) -> Result<AgeBreakdown> {
        compute_age_at(dob, tob, self.clock.now(), &self.format)
    }
}
