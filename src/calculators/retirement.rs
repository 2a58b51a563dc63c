//! General retirement savings projection

use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::ConstantsTable;
use crate::error::{ensure_amount, ensure_finite, CalcResult};
use crate::projection::{round_currency, GrowthProjection, GrowthYear, Horizon};

/// Inputs for the retirement savings calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub expected_return_percent: f64,
    pub withdrawal_rate_percent: f64,
}

impl RetirementInput {
    /// Input using the table's default return and withdrawal rates
    pub fn new(
        constants: &ConstantsTable,
        current_age: u32,
        retirement_age: u32,
        current_savings: f64,
        monthly_contribution: f64,
    ) -> Self {
        Self {
            current_age,
            retirement_age,
            current_savings,
            monthly_contribution,
            expected_return_percent: constants.defaults.expected_return_percent,
            withdrawal_rate_percent: constants.defaults.withdrawal_rate_percent,
        }
    }

    /// Every field taken from the table's defaults
    pub fn defaults(constants: &ConstantsTable) -> Self {
        let d = &constants.defaults;
        Self::new(
            constants,
            d.current_age,
            d.retirement_age,
            d.current_savings as f64,
            d.monthly_contribution as f64,
        )
    }

    pub fn with_expected_return(mut self, percent: f64) -> Self {
        self.expected_return_percent = percent;
        self
    }

    pub fn with_withdrawal_rate(mut self, percent: f64) -> Self {
        self.withdrawal_rate_percent = percent;
        self
    }
}

/// Projected savings at retirement and the income they support
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementResult {
    pub current_age: u32,
    pub retirement_age: u32,
    pub years_to_retirement: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub total_contributions: f64,
    pub projected_balance: f64,
    pub monthly_retirement_income: f64,
    pub annual_retirement_income: f64,
    /// Years between retirement and life expectancy; negative when retiring later
    pub years_of_retirement: i64,
    pub schedule: Vec<GrowthYear>,
}

impl RetirementResult {
    /// Growth earned on top of savings and contributions
    pub fn investment_growth(&self) -> f64 {
        self.projected_balance - self.current_savings - self.total_contributions
    }
}

/// Project savings to retirement and apply the withdrawal rate
pub fn calculate_retirement(
    input: &RetirementInput,
    constants: &ConstantsTable,
) -> CalcResult<RetirementResult> {
    let current_savings = ensure_amount("current_savings", input.current_savings)?;
    let monthly_contribution = ensure_amount("monthly_contribution", input.monthly_contribution)?;
    let expected_return = ensure_finite("expected_return_percent", input.expected_return_percent)?;
    let withdrawal_rate = ensure_finite("withdrawal_rate_percent", input.withdrawal_rate_percent)?;
    let horizon = Horizon::between(input.current_age, input.retirement_age)?;

    let projection = GrowthProjection::new(current_savings)
        .contributing(monthly_contribution)
        .at_annual_return(expected_return)
        .over_months(horizon.months);

    let projected_balance = round_currency(projection.future_value());
    let annual_retirement_income = round_currency(projected_balance * withdrawal_rate / 100.0);
    let monthly_retirement_income = round_currency(annual_retirement_income / 12.0);

    let years_of_retirement =
        i64::from(constants.defaults.life_expectancy) - i64::from(input.retirement_age);
    if years_of_retirement < 0 {
        warn!(
            "retirement age {} is past life expectancy {}",
            input.retirement_age, constants.defaults.life_expectancy
        );
    }

    Ok(RetirementResult {
        current_age: input.current_age,
        retirement_age: input.retirement_age,
        years_to_retirement: horizon.years,
        current_savings,
        monthly_contribution,
        total_contributions: round_currency(projection.total_contributions()),
        projected_balance,
        monthly_retirement_income,
        annual_retirement_income,
        years_of_retirement,
        schedule: projection.yearly_schedule(),
    })
}
