//! Time to retirement in whole years and months

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_AGE;
use crate::error::{CalcError, CalcResult};

/// Projection horizon between two ages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horizon {
    pub years: u32,
    pub months: u32,
}

impl Horizon {
    /// Horizon from `current_age` up to `retirement_age`
    ///
    /// Fails with [`CalcError::AgeOutOfRange`] when either age exceeds
    /// [`MAX_AGE`], and with [`CalcError::InvalidRange`] when retirement comes first.
    pub fn between(current_age: u32, retirement_age: u32) -> CalcResult<Self> {
        for age in [current_age, retirement_age] {
            if age > MAX_AGE {
                return Err(CalcError::AgeOutOfRange { age, max: MAX_AGE });
            }
        }

        let years = retirement_age
            .checked_sub(current_age)
            .ok_or(CalcError::InvalidRange {
                current_age,
                retirement_age,
            })?;
        let horizon = Self {
            years,
            months: years * 12,
        };
        debug!(
            "horizon {current_age} -> {retirement_age}: {} years, {} months",
            horizon.years, horizon.months
        );
        Ok(horizon)
    }

    pub fn is_zero(&self) -> bool {
        self.months == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_between() {
        let h = Horizon::between(55, 67).unwrap();
        assert_eq!(h.years, 12);
        assert_eq!(h.months, 144);
        assert!(!h.is_zero());
    }

    #[test]
    fn test_zero_horizon() {
        assert!(Horizon::between(67, 67).unwrap().is_zero());
    }

    #[test]
    fn test_negative_horizon_rejected() {
        assert_eq!(
            Horizon::between(70, 65),
            Err(CalcError::InvalidRange {
                current_age: 70,
                retirement_age: 65
            })
        );
    }

    #[test]
    fn test_widest_horizon_accepted() {
        let h = Horizon::between(0, MAX_AGE).unwrap();
        assert_eq!(h.months, MAX_AGE * 12);
    }

    #[test]
    fn test_ages_above_max_rejected() {
        assert_eq!(
            Horizon::between(0, 400_000_000),
            Err(CalcError::AgeOutOfRange {
                age: 400_000_000,
                max: MAX_AGE
            })
        );
        assert_eq!(
            Horizon::between(u32::MAX, u32::MAX),
            Err(CalcError::AgeOutOfRange {
                age: u32::MAX,
                max: MAX_AGE
            })
        );
        assert!(Horizon::between(MAX_AGE + 1, MAX_AGE).is_err());
    }
}
