//! Proleptic Gregorian month arithmetic.
//!
//! [`calendar_span`] subtracts two dates field by field (years, months,
//! days) and repairs a negative day field by taking one month off and adding
//! the real length of the month that precedes the later date. chrono only
//! offers fixed-length durations, so this lives here.

use chrono::{Datelike, NaiveDate};

/// Field-wise difference between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarSpan {
    pub years: i32,
    /// 0-11
    pub months: u32,
    /// Usually 0-30. Goes as low as -2 when the month before the later date
    /// is shorter than the earlier date's day of month (31 January → 1 March
    /// of a common year gives 1 month, -2 days).
    pub days: i32,
}

/// Whether `year` has a 29 February: every fourth year, skipping century
/// years that are not multiples of 400.
pub fn is_leap_year(year: i32) -> bool {
    let divisible = |n: i32| year.rem_euclid(n) == 0;
    divisible(4) && (!divisible(100) || divisible(400))
}

/// Length of `month` (1-12) in `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Calendar difference from `from` to `to`. `from` must not be after `to`.
pub fn calendar_span(from: NaiveDate, to: NaiveDate) -> CalendarSpan {
    let mut years = to.year() - from.year();
    let mut months = to.month() as i32 - from.month() as i32;
    let mut days = to.day() as i32 - from.day() as i32;

    if days < 0 {
        let (borrow_year, borrow_month) = match to.month() {
            1 => (to.year() - 1, 12),
            m => (to.year(), m - 1),
        };
        days += days_in_month(borrow_year, borrow_month) as i32;
        months -= 1;
    }

    if months < 0 {
        months += 12;
        years -= 1;
    }

    CalendarSpan {
        years,
        months: months as u32,
        days,
    }
}

/// The date with `template`'s month and day in `year`. A 29 February template
/// lands on 28 February when `year` is not a leap year.
pub fn anniversary_in(template: NaiveDate, year: i32) -> Option<NaiveDate> {
    let day = if template.month() == 2 && template.day() == 29 && !is_leap_year(year) {
        28
    } else {
        template.day()
    };
    NaiveDate::from_ymd_opt(year, template.month(), day)
}
