//! Error types for age-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgeError {
    /// Missing or malformed date, or a date/time that does not exist on the calendar.
    /// The payload is the message shown to the user.
    #[error("{0}")]
    InvalidInput(String),

    #[error("Birth date cannot be in the future.")]
    FutureDate,

    #[error("Invalid display format: {0}")]
    InvalidFormat(String),
}

impl AgeError {
    pub(crate) fn missing_date() -> Self {
        AgeError::InvalidInput("Please select a valid date.".to_string())
    }

    pub(crate) fn bad_format() -> Self {
        AgeError::InvalidInput("Invalid date format.".to_string())
    }

    pub(crate) fn bad_datetime() -> Self {
        AgeError::InvalidInput("Invalid date/time.".to_string())
    }
}

pub type Result<T> = std::result::Result<T, AgeError>;
