//! Error types for CDS scheduling, pricing and curve calibration.

use hazard_core::DateError;
use hazard_math::MathError;
use thiserror::Error;

/// A specialized Result type for credit operations.
pub type CreditResult<T> = Result<T, CreditError>;

/// Error type for CDS schedule construction, pricing and bootstrap.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CreditError {
    /// Malformed input detected before any computation.
    #[error("Invalid input: {reason}")]
    Validation {
        /// Description of the offending input.
        reason: String,
    },

    /// A coupon schedule could not be derived from the trade dates.
    #[error("Invalid schedule: {reason}")]
    InvalidSchedule {
        /// Description of why the schedule is underivable.
        reason: String,
    },

    /// A calibration basket violates the ordering or shape requirements.
    #[error("Invalid basket at instrument {index}: {reason}")]
    InvalidBasket {
        /// Position of the offending instrument in the basket.
        index: usize,
        /// Description of the violation.
        reason: String,
    },

    /// A curve or pricer was asked for something its state cannot support.
    #[error("Invalid curve: {reason}")]
    InvalidCurve {
        /// Description of the degenerate state.
        reason: String,
    },

    /// The root search for one basket pillar did not produce a hazard rate.
    #[error("Calibration failed at pillar {index}: {source}")]
    CalibrationFailed {
        /// Position of the pillar whose solve failed.
        index: usize,
        /// The underlying bracketing or solver failure.
        source: MathError,
    },

    /// A date or tenor operation failed.
    #[error(transparent)]
    Date(#[from] DateError),

    /// A numerical routine failed outside of calibration.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl CreditError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }

    /// Creates an invalid basket error.
    #[must_use]
    pub fn invalid_basket(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidBasket {
            index,
            reason: reason.into(),
        }
    }

    /// Creates an invalid curve error.
    #[must_use]
    pub fn invalid_curve(reason: impl Into<String>) -> Self {
        Self::InvalidCurve {
            reason: reason.into(),
        }
    }

    /// Wraps a solver failure with the basket index it occurred at.
    #[must_use]
    pub fn calibration_failed(index: usize, source: MathError) -> Self {
        Self::CalibrationFailed { index, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CreditError::validation("spreads must not be empty");
        assert!(format!("{err}").contains("spreads must not be empty"));

        let err = CreditError::invalid_basket(2, "protection end not ascending");
        let msg = format!("{err}");
        assert!(msg.contains("instrument 2"));
        assert!(msg.contains("ascending"));
    }

    #[test]
    fn test_calibration_failed_carries_pillar_index() {
        let inner = MathError::convergence_failed(100, 3.5e-7);
        let err = CreditError::calibration_failed(4, inner);
        let msg = format!("{err}");
        assert!(msg.contains("pillar 4"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn test_from_math_error() {
        fn fails() -> CreditResult<f64> {
            Err(MathError::invalid_input("lower bound above upper bound"))?
        }
        assert!(matches!(fails(), Err(CreditError::Math(_))));
    }
}
