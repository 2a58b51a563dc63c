//! Required monthly saving to reach a retirement target

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::ConstantsTable;
use crate::error::{ensure_amount, ensure_finite, CalcResult};
use crate::projection::{growth_factor, monthly_rate, round_currency, Horizon};

/// Default expected return for savings goal projections (percent)
pub const DEFAULT_GOAL_RETURN_PERCENT: f64 = 7.0;

/// Inputs for the savings goal solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoalInput {
    pub target_amount: f64,
    pub current_savings: f64,
    pub current_age: u32,
    pub retirement_age: u32,
    pub expected_return_percent: f64,
}

impl SavingsGoalInput {
    pub fn new(target_amount: f64, current_savings: f64, current_age: u32, retirement_age: u32) -> Self {
        Self {
            target_amount,
            current_savings,
            current_age,
            retirement_age,
            expected_return_percent: DEFAULT_GOAL_RETURN_PERCENT,
        }
    }

    pub fn with_expected_return(mut self, percent: f64) -> Self {
        self.expected_return_percent = percent;
        self
    }
}

/// Monthly contribution needed and whether it fits the contribution limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoalResult {
    pub target_amount: f64,
    pub current_savings: f64,
    pub years_to_retirement: u32,
    pub monthly_needed: f64,
    pub total_contributions: f64,
    pub interest_earned: f64,
    pub is_achievable: bool,
}

/// Solve for the level monthly payment that grows savings to the target
///
/// Uses the future-value-of-annuity formula solved for payment, for positive
/// and negative returns alike. A zero return falls back to straight division,
/// and a zero horizon asks for the whole shortfall immediately.
pub fn calculate_savings_goal(
    input: &SavingsGoalInput,
    constants: &ConstantsTable,
) -> CalcResult<SavingsGoalResult> {
    let target_amount = ensure_amount("target_amount", input.target_amount)?;
    let current_savings = ensure_amount("current_savings", input.current_savings)?;
    let expected_return = ensure_finite("expected_return_percent", input.expected_return_percent)?;
    let horizon = Horizon::between(input.current_age, input.retirement_age)?;

    let rate = monthly_rate(expected_return);
    let factor = growth_factor(expected_return, horizon.months);
    let future_value_of_current = current_savings * factor;
    let amount_needed = target_amount - future_value_of_current;

    let monthly_needed = if amount_needed <= 0.0 {
        0.0
    } else if horizon.is_zero() {
        amount_needed
    } else if rate == 0.0 {
        amount_needed / horizon.months as f64
    } else {
        // Valid for negative rates too: numerator and denominator flip sign together
        amount_needed * rate / (factor - 1.0)
    };
    let monthly_needed = round_currency(monthly_needed.max(0.0));
    debug!(
        "savings goal: shortfall {amount_needed:.2} over {} months -> {monthly_needed}/month",
        horizon.months
    );

    let total_contributions = round_currency(monthly_needed * horizon.months as f64);
    let interest_earned = round_currency((target_amount - current_savings - total_contributions).max(0.0));

    Ok(SavingsGoalResult {
        target_amount,
        current_savings,
        years_to_retirement: horizon.years,
        monthly_needed,
        total_contributions,
        interest_earned,
        is_achievable: monthly_needed <= constants.max_monthly_contribution(),
    })
}
