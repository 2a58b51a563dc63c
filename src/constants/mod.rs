//! Reference constants shared by every calculator: contribution limits,
//! Social Security anchors and default assumptions

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConstantsError;

pub use loader::DEFAULT_CONSTANTS_PATH;

/// Youngest age at which Social Security can be claimed
pub const EARLIEST_CLAIMING_AGE: u32 = 62;

/// Age at which delayed retirement credits stop accruing
pub const LATEST_CLAIMING_AGE: u32 = 70;

/// Age from which catch-up contributions are allowed
pub const CATCH_UP_AGE: u32 = 50;

/// Oldest age accepted as a current or retirement age
pub const MAX_AGE: u32 = 150;

/// Annual contribution limits for one account kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLimits {
    pub under_50: u32,
    pub catch_up: u32,
    pub total_50_plus: u32,
}

impl ContributionLimits {
    pub const fn new(under_50: u32, catch_up: u32) -> Self {
        Self {
            under_50,
            catch_up,
            total_50_plus: under_50.saturating_add(catch_up),
        }
    }

    /// `under_50 + catch_up`, or `None` if the sum does not fit in a `u32`
    pub fn checked_total(&self) -> Option<u32> {
        self.under_50.checked_add(self.catch_up)
    }

    /// Limit that applies at the given age
    pub fn for_age(&self, age: u32) -> u32 {
        if age >= CATCH_UP_AGE {
            self.total_50_plus
        } else {
            self.under_50
        }
    }
}

/// Maximum monthly benefits at the anchor claiming ages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SocialSecurityAnchors {
    pub max_benefit_62: u32,
    pub max_benefit_67: u32,
    pub max_benefit_70: u32,
    pub cola_percent: f64,
    pub full_retirement_age: u32,
}

impl SocialSecurityAnchors {
    /// Maximum benefit at the anchor nearest to `claiming_age`
    ///
    /// Exactly 62 uses the age-62 anchor, 70 and later the age-70 anchor,
    /// everything else falls back to the full-retirement-age maximum.
    pub fn max_for_age(&self, claiming_age: u32) -> u32 {
        if claiming_age >= LATEST_CLAIMING_AGE {
            self.max_benefit_70
        } else if claiming_age == EARLIEST_CLAIMING_AGE {
            self.max_benefit_62
        } else {
            self.max_benefit_67
        }
    }
}

/// Default calculation assumptions used when a caller omits a value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_savings: u32,
    pub monthly_contribution: u32,
    pub expected_return_percent: f64,
    pub inflation_percent: f64,
    pub withdrawal_rate_percent: f64,
    pub life_expectancy: u32,
}

/// Employer match plan defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmployerMatchDefaults {
    /// Share of the employee contribution the employer adds (percent)
    pub match_percent: f64,
    /// Ceiling on matched contributions (percent of salary)
    pub up_to_percent: f64,
}

/// Immutable table of reference data
///
/// Built once (either [`ConstantsTable::for_2025`] or loaded from CSV) and
/// passed by reference into every calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstantsTable {
    pub plan_year: u32,
    pub limits_401k: ContributionLimits,
    pub limits_ira: ContributionLimits,
    pub social_security: SocialSecurityAnchors,
    pub defaults: Defaults,
    pub employer_match: EmployerMatchDefaults,
}

impl ConstantsTable {
    /// IRS and SSA figures for the 2025 plan year
    pub const fn for_2025() -> Self {
        Self {
            plan_year: 2025,
            limits_401k: ContributionLimits::new(23_500, 7_500),
            limits_ira: ContributionLimits::new(7_000, 1_000),
            social_security: SocialSecurityAnchors {
                max_benefit_62: 2_831,
                max_benefit_67: 3_822,
                max_benefit_70: 4_873,
                cola_percent: 2.5,
                full_retirement_age: 67,
            },
            defaults: Defaults {
                current_age: 55,
                retirement_age: 67,
                current_savings: 250_000,
                monthly_contribution: 1_000,
                expected_return_percent: 7.0,
                inflation_percent: 2.5,
                withdrawal_rate_percent: 4.0,
                life_expectancy: 90,
            },
            employer_match: EmployerMatchDefaults {
                match_percent: 50.0,
                up_to_percent: 6.0,
            },
        }
    }

    /// Load the 2025 table with overrides from a `key,value` CSV file
    pub fn from_csv_path(path: &Path) -> Result<Self, ConstantsError> {
        let table = loader::load_overrides(Self::for_2025(), path)?;
        table.validate()?;
        Ok(table)
    }

    /// Load overrides from the default location (data/constants.csv)
    pub fn from_csv() -> Result<Self, ConstantsError> {
        Self::from_csv_path(Path::new(DEFAULT_CONSTANTS_PATH))
    }

    /// Combined 50+ limit across the 401(k) and IRA tiers, per month
    pub fn max_monthly_contribution(&self) -> f64 {
        (f64::from(self.limits_401k.total_50_plus) + f64::from(self.limits_ira.total_50_plus)) / 12.0
    }

    /// Check the table invariants, reporting the first violation
    pub fn validate(&self) -> Result<(), ConstantsError> {
        for (name, limits) in [("limits_401k", &self.limits_401k), ("limits_ira", &self.limits_ira)] {
            if limits.checked_total() != Some(limits.total_50_plus) {
                return Err(ConstantsError::Invariant(format!(
                    "{name}.total_50_plus ({}) != under_50 ({}) + catch_up ({})",
                    limits.total_50_plus, limits.under_50, limits.catch_up
                )));
            }
        }

        let fra = self.social_security.full_retirement_age;
        if !(EARLIEST_CLAIMING_AGE..=LATEST_CLAIMING_AGE).contains(&fra) {
            return Err(ConstantsError::Invariant(format!(
                "full_retirement_age {fra} outside {EARLIEST_CLAIMING_AGE}..={LATEST_CLAIMING_AGE}"
            )));
        }

        let rates = [
            ("social_security.cola_percent", self.social_security.cola_percent),
            ("defaults.expected_return_percent", self.defaults.expected_return_percent),
            ("defaults.inflation_percent", self.defaults.inflation_percent),
            ("defaults.withdrawal_rate_percent", self.defaults.withdrawal_rate_percent),
            ("employer_match.match_percent", self.employer_match.match_percent),
            ("employer_match.up_to_percent", self.employer_match.up_to_percent),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(ConstantsError::Invariant(format!(
                    "{name} must be a non-negative number (got {value})"
                )));
            }
        }

        if self.defaults.retirement_age < self.defaults.current_age {
            return Err(ConstantsError::Invariant(format!(
                "defaults.retirement_age {} is before defaults.current_age {}",
                self.defaults.retirement_age, self.defaults.current_age
            )));
        }

        Ok(())
    }
}

impl Default for ConstantsTable {
    fn default() -> Self {
        Self::for_2025()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_2025_table_is_valid() {
        let table = ConstantsTable::for_2025();
        assert!(table.validate().is_ok());
        assert_eq!(table.limits_401k.total_50_plus, 31_000);
        assert_eq!(table.limits_ira.total_50_plus, 8_000);
    }

    #[test]
    fn test_limit_for_age() {
        let limits = ConstantsTable::for_2025().limits_401k;
        assert_eq!(limits.for_age(49), 23_500);
        assert_eq!(limits.for_age(50), 31_000);
    }

    #[test]
    fn test_max_for_age_anchors() {
        let ss = ConstantsTable::for_2025().social_security;
        assert_eq!(ss.max_for_age(62), 2_831);
        assert_eq!(ss.max_for_age(63), 3_822);
        assert_eq!(ss.max_for_age(67), 3_822);
        assert_eq!(ss.max_for_age(70), 4_873);
        assert_eq!(ss.max_for_age(72), 4_873);
    }

    #[test]
    fn test_max_monthly_contribution() {
        let table = ConstantsTable::for_2025();
        assert!((table.max_monthly_contribution() - 39_000.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_bad_tier() {
        let mut table = ConstantsTable::for_2025();
        table.limits_ira.total_50_plus = 9_000;
        assert!(matches!(table.validate(), Err(ConstantsError::Invariant(_))));
    }

    #[test]
    fn test_validate_rejects_overflowing_tier() {
        let mut table = ConstantsTable::for_2025();
        table.limits_401k.under_50 = u32::MAX;
        table.limits_401k.total_50_plus = u32::MAX;
        assert!(matches!(table.validate(), Err(ConstantsError::Invariant(_))));
    }

    #[test]
    fn test_validate_rejects_fra_out_of_range() {
        let mut table = ConstantsTable::for_2025();
        table.social_security.full_retirement_age = 71;
        assert!(table.validate().is_err());
    }
}
