//! Display formatting for dates, date-times and weekdays.
//!
//! Patterns are chrono strftime strings. The default renders the en-IN
//! locale: `29/02/2000`, `29/02/2000, 06:30:00`, `Tuesday`.

use std::fmt::{Display, Write};

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{AgeError, Result};

pub const DEFAULT_DATE_PATTERN: &str = "%d/%m/%Y";
pub const DEFAULT_DATE_TIME_PATTERN: &str = "%d/%m/%Y, %H:%M:%S";
pub const DEFAULT_WEEKDAY_PATTERN: &str = "%A";

/// Output format for every human-readable date the engine produces.
///
/// Construct with [`DisplayFormat::new`] so patterns are checked up front.
/// chrono fails to render a pattern that is malformed or that asks for a
/// field the value lacks (`%H` on a date, `%z` on any naive value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFormat {
    date: String,
    date_time: String,
    weekday: String,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE_PATTERN.to_string(),
            date_time: DEFAULT_DATE_TIME_PATTERN.to_string(),
            weekday: DEFAULT_WEEKDAY_PATTERN.to_string(),
        }
    }
}

impl DisplayFormat {
    /// # Errors
    ///
    /// Returns [`AgeError::InvalidFormat`] if a pattern cannot be rendered
    /// from the value it is used with: a date for `date` and `weekday`, a
    /// date-time for `date_time`.
    pub fn new(date: &str, date_time: &str, weekday: &str) -> Result<Self> {
        let sample = NaiveDateTime::default();
        check_renders(date, |p| render(sample.date().format(p)))?;
        check_renders(date_time, |p| render(sample.format(p)))?;
        check_renders(weekday, |p| render(sample.date().format(p)))?;

        Ok(Self {
            date: date.to_string(),
            date_time: date_time.to_string(),
            weekday: weekday.to_string(),
        })
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        render(date.format(&self.date)).unwrap_or_default()
    }

    pub fn format_date_time(&self, dt: NaiveDateTime) -> String {
        render(dt.format(&self.date_time)).unwrap_or_default()
    }

    /// Long weekday name of `date`.
    pub fn weekday(&self, date: NaiveDate) -> String {
        render(date.format(&self.weekday)).unwrap_or_default()
    }
}

/// Render through `fmt::Write`; `ToString` would panic on a formatting error.
fn render(value: impl Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{value}").ok()?;
    Some(out)
}

fn check_renders(pattern: &str, render_with: impl Fn(&str) -> Option<String>) -> Result<()> {
    match render_with(pattern) {
        Some(_) => Ok(()),
        None => Err(AgeError::InvalidFormat(format!("'{pattern}'"))),
    }
}
