//! Error types for date and convention handling.

use thiserror::Error;

/// A specialized Result type for date operations.
pub type DateResult<T> = Result<T, DateError>;

/// Error type for date, tenor and convention operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// A date could not be constructed or parsed.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A tenor string could not be parsed.
    #[error("Invalid tenor: {input}")]
    InvalidTenor {
        /// The offending input.
        input: String,
    },

    /// A day-count convention name was not recognised.
    #[error("Unknown day count convention: {input}")]
    UnknownDayCount {
        /// The offending input.
        input: String,
    },
}

impl DateError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(input: impl Into<String>) -> Self {
        Self::InvalidTenor {
            input: input.into(),
        }
    }

    /// Creates an unknown day count error.
    #[must_use]
    pub fn unknown_day_count(input: impl Into<String>) -> Self {
        Self::UnknownDayCount {
            input: input.into(),
        }
    }
}
