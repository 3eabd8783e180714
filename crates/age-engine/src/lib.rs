//! # age-engine
//!
//! Calendar-correct age computation.
//!
//! Given a birth date (and optionally a time of birth) as raw form strings,
//! the engine returns the age as whole years/months/days plus the sub-day
//! remainder, fixed-unit totals, the weekday of birth and a countdown to the
//! next birthday. A bounded, newest-first history of past calculations can be
//! kept in any durable key-value backend.
//!
//! ## Modules
//!
//! - [`age`] — Input parsing and the age breakdown
//! - [`birthday`] — Next-birthday projection, including the 29 February clamp
//! - [`calendar`] — Leap years, month lengths and calendar-unit subtraction
//! - [`clock`] — Injectable "now"
//! - [`format`] — Date, date-time and weekday rendering
//! - [`history`] — Ten-entry calculation log
//! - [`storage`] — Key-value slots backing the log
//! - [`error`] — Error types

pub mod age;
pub mod birthday;
pub mod calendar;
pub mod clock;
pub mod error;
pub mod format;
pub mod history;
pub mod storage;

pub use age::{compute_age_at, parse_birth, AgeBreakdown, AgeCalculator, Totals};
pub use birthday::{next_birthday_info, NextBirthdayInfo};
pub use calendar::{days_in_month, is_leap_year};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::AgeError;
pub use format::DisplayFormat;
pub use history::{HistoryEntry, HistoryLog, HistoryStore, HISTORY_KEY, HISTORY_LIMIT};
pub use storage::{FileStorage, MemoryStorage, Storage};
