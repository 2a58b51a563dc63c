//! Error types for calculations, form input parsing and constants loading

use thiserror::Error;

/// Errors raised by the calculators for inputs they cannot project
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Retirement age lies before the current age (negative horizon)
    #[error("retirement age {retirement_age} is before current age {current_age}")]
    InvalidRange {
        current_age: u32,
        retirement_age: u32,
    },

    #[error("age {age} is above the supported maximum of {max}")]
    AgeOutOfRange { age: u32, max: u32 },

    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
}

/// Errors from parsing raw form text into numbers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("value is empty")]
    Empty,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("'{0}' is not a whole number")]
    NotAWholeNumber(String),
}

/// Errors from building or loading a constants table
#[derive(Debug, Error)]
pub enum ConstantsError {
    #[error("constants invariant violated: {0}")]
    Invariant(String),

    #[error("unknown constants key '{0}'")]
    UnknownKey(String),

    #[error("invalid value '{value}' for constants key '{key}'")]
    Value { key: String, value: String },

    #[error("failed to read constants CSV")]
    Csv(#[from] csv::Error),

    #[error("failed to open constants file")]
    Io(#[from] std::io::Error),
}

pub type CalcResult<T> = std::result::Result<T, CalcError>;

/// Reject negative or non-finite monetary inputs
pub(crate) fn ensure_amount(field: &'static str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(CalcError::NegativeAmount { field, value });
    }
    Ok(value)
}

/// Reject non-finite rates (percentages may legitimately be negative)
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NonFinite { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_amount() {
        assert_eq!(ensure_amount("savings", 10.0), Ok(10.0));
        assert_eq!(ensure_amount("savings", 0.0), Ok(0.0));
        assert!(matches!(
            ensure_amount("savings", -1.0),
            Err(CalcError::NegativeAmount { field: "savings", .. })
        ));
        assert_eq!(
            ensure_amount("savings", f64::NAN),
            Err(CalcError::NonFinite { field: "savings" })
        );
    }

    #[test]
    fn test_invalid_range_message() {
        let err = CalcError::InvalidRange {
            current_age: 60,
            retirement_age: 55,
        };
        assert_eq!(
            err.to_string(),
            "retirement age 55 is before current age 60"
        );
    }
}
