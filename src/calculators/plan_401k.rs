//! 401(k) growth with contribution limits and employer match

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::ConstantsTable;
use crate::error::{ensure_amount, ensure_finite, CalcResult};
use crate::projection::{round_currency, GrowthProjection, Horizon};

/// Default expected return for 401(k) projections (percent)
pub const DEFAULT_401K_RETURN_PERCENT: f64 = 7.0;

/// Inputs for the 401(k) calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plan401kInput {
    pub annual_salary: f64,
    /// Employee deferral as a percent of salary
    pub contribution_percent: f64,
    /// Employer match as a percent of the matched contribution
    pub employer_match_percent: f64,
    /// Match ceiling as a percent of salary
    pub employer_match_up_to_percent: f64,
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_balance: f64,
    pub expected_return_percent: f64,
}

impl Plan401kInput {
    /// Input using the table's employer match defaults and a 7% return
    pub fn new(
        constants: &ConstantsTable,
        annual_salary: f64,
        contribution_percent: f64,
        current_age: u32,
        retirement_age: u32,
        current_balance: f64,
    ) -> Self {
        Self {
            annual_salary,
            contribution_percent,
            employer_match_percent: constants.employer_match.match_percent,
            employer_match_up_to_percent: constants.employer_match.up_to_percent,
            current_age,
            retirement_age,
            current_balance,
            expected_return_percent: DEFAULT_401K_RETURN_PERCENT,
        }
    }

    pub fn with_employer_match(mut self, match_percent: f64, up_to_percent: f64) -> Self {
        self.employer_match_percent = match_percent;
        self.employer_match_up_to_percent = up_to_percent;
        self
    }

    pub fn with_expected_return(mut self, percent: f64) -> Self {
        self.expected_return_percent = percent;
        self
    }
}

/// Annual contributions and projected 401(k) balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan401kResult {
    pub annual_salary: f64,
    pub contribution_percent: f64,
    /// Employee contribution after the statutory cap (rounded)
    pub annual_contribution: f64,
    pub employer_match_percent: f64,
    pub employer_match_amount: f64,
    pub total_annual_contribution: f64,
    pub projected_balance: f64,
    pub years_to_retirement: u32,
    pub is_50_plus: bool,
    pub max_contribution: u32,
    /// Extra allowance unlocked by catch-up eligibility (0 under 50)
    pub catch_up_amount: u32,
    /// Contribution the employee asked for before the cap
    pub requested_contribution: f64,
}

impl Plan401kResult {
    /// Employer money paid in over the whole horizon
    pub fn lifetime_employer_match(&self) -> f64 {
        self.employer_match_amount * self.years_to_retirement as f64
    }

    /// Whether the requested deferral was cut back to the limit
    pub fn is_limited(&self) -> bool {
        self.requested_contribution > self.max_contribution as f64
    }
}

/// Cap the deferral, apply the employer match and project the balance
pub fn calculate_401k(input: &Plan401kInput, constants: &ConstantsTable) -> CalcResult<Plan401kResult> {
    let annual_salary = ensure_amount("annual_salary", input.annual_salary)?;
    let current_balance = ensure_amount("current_balance", input.current_balance)?;
    let contribution_percent = ensure_amount("contribution_percent", input.contribution_percent)?;
    let match_percent = ensure_amount("employer_match_percent", input.employer_match_percent)?;
    let match_up_to = ensure_amount(
        "employer_match_up_to_percent",
        input.employer_match_up_to_percent,
    )?;
    let expected_return = ensure_finite("expected_return_percent", input.expected_return_percent)?;
    let horizon = Horizon::between(input.current_age, input.retirement_age)?;

    let limits = &constants.limits_401k;
    let is_50_plus = input.current_age >= crate::constants::CATCH_UP_AGE;
    let max_contribution = limits.for_age(input.current_age);

    let requested_contribution = annual_salary * contribution_percent / 100.0;
    let annual_contribution = requested_contribution.min(max_contribution as f64);

    // Employer matches up to its ceiling, never more than the employee put in
    let employer_matchable = (annual_salary * match_up_to / 100.0).min(annual_contribution);
    let employer_match_amount = round_currency(employer_matchable * match_percent / 100.0);

    let total_annual_contribution = round_currency(annual_contribution) + employer_match_amount;
    debug!(
        "401(k): contribution {annual_contribution:.2} (limit {max_contribution}), match {employer_match_amount}"
    );

    let projected_balance = GrowthProjection::new(current_balance)
        .contributing(total_annual_contribution / 12.0)
        .at_annual_return(expected_return)
        .over_months(horizon.months)
        .future_value();

    Ok(Plan401kResult {
        annual_salary,
        contribution_percent,
        annual_contribution: round_currency(annual_contribution),
        employer_match_percent: match_percent,
        employer_match_amount,
        total_annual_contribution,
        projected_balance: round_currency(projected_balance),
        years_to_retirement: horizon.years,
        is_50_plus,
        max_contribution,
        catch_up_amount: if is_50_plus { limits.catch_up } else { 0 },
        requested_contribution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;

    fn constants() -> ConstantsTable {
        ConstantsTable::for_2025()
    }

    fn reference_input(c: &ConstantsTable) -> Plan401kInput {
        Plan401kInput::new(c, 80_000.0, 10.0, 55, 67, 150_000.0)
    }

    #[test]
    fn test_reference_scenario() {
        let c = constants();
        let result = calculate_401k(&reference_input(&c), &c).unwrap();

        assert_eq!(result.annual_contribution, 8_000.0);
        assert_eq!(result.employer_match_amount, 1_200.0);
        assert_eq!(result.total_annual_contribution, 9_200.0);
        assert_eq!(result.years_to_retirement, 12);
        assert!(result.is_50_plus);
        assert_eq!(result.max_contribution, 31_000);
        assert_eq!(result.catch_up_amount, 7_500);
        assert!(!result.is_limited());
        assert_eq!(result.lifetime_employer_match(), 14_400.0);
    }

    #[test]
    fn test_projection_uses_shared_growth() {
        let c = constants();
        let result = calculate_401k(&reference_input(&c), &c).unwrap();
        let expected = GrowthProjection::new(150_000.0)
            .contributing(9_200.0 / 12.0)
            .at_annual_return(7.0)
            .over_months(144)
            .future_value()
            .round();
        assert_eq!(result.projected_balance, expected);
    }

    #[test]
    fn test_contribution_capped_under_50() {
        let c = constants();
        let input = Plan401kInput::new(&c, 400_000.0, 50.0, 35, 65, 0.0);
        let result = calculate_401k(&input, &c).unwrap();
        assert!(!result.is_50_plus);
        assert_eq!(result.max_contribution, 23_500);
        assert_eq!(result.annual_contribution, 23_500.0);
        assert_eq!(result.catch_up_amount, 0);
        assert!(result.is_limited());
    }

    #[test]
    fn test_contribution_capped_50_plus() {
        let c = constants();
        for pct in [40.0, 75.0, 100.0] {
            let input = Plan401kInput::new(&c, 300_000.0, pct, 52, 65, 0.0);
            let result = calculate_401k(&input, &c).unwrap();
            assert_eq!(result.annual_contribution, 31_000.0);
        }
    }

    #[test]
    fn test_match_never_exceeds_employee_contribution() {
        let c = constants();
        // Employee defers 2%, employer would match up to 6%
        let input = Plan401kInput::new(&c, 100_000.0, 2.0, 40, 65, 0.0).with_employer_match(100.0, 6.0);
        let result = calculate_401k(&input, &c).unwrap();
        assert_eq!(result.annual_contribution, 2_000.0);
        assert_eq!(result.employer_match_amount, 2_000.0);
    }

    #[test]
    fn test_match_ceiling_property() {
        let c = constants();
        for (salary, pct, matched, up_to) in [
            (60_000.0, 3.0, 50.0, 6.0),
            (60_000.0, 12.0, 50.0, 6.0),
            (250_000.0, 15.0, 100.0, 4.0),
            (45_000.0, 0.0, 100.0, 5.0),
        ] {
            let input = Plan401kInput::new(&c, salary, pct, 45, 65, 0.0).with_employer_match(matched, up_to);
            let result = calculate_401k(&input, &c).unwrap();
            let contribution = (salary * pct / 100.0).min(result.max_contribution as f64);
            let ceiling = matched / 100.0 * (salary * up_to / 100.0).min(contribution);
            assert!(result.employer_match_amount <= ceiling.round());
        }
    }

    #[test]
    fn test_negative_horizon_rejected() {
        let c = constants();
        let input = Plan401kInput::new(&c, 80_000.0, 10.0, 67, 60, 0.0);
        assert!(matches!(
            calculate_401k(&input, &c),
            Err(CalcError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_huge_current_age_rejected() {
        let c = constants();
        let input = Plan401kInput::new(&c, 80_000.0, 10.0, u32::MAX, u32::MAX, 0.0);
        assert!(matches!(
            calculate_401k(&input, &c),
            Err(CalcError::AgeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_zero_horizon_returns_balance() {
        let c = constants();
        let input = Plan401kInput::new(&c, 80_000.0, 10.0, 60, 60, 42_000.0);
        let result = calculate_401k(&input, &c).unwrap();
        assert_eq!(result.projected_balance, 42_000.0);
        assert_eq!(result.lifetime_employer_match(), 0.0);
    }
}
