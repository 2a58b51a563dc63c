//! Simplified Social Security benefit estimate
//!
//! Not the SSA bend-point formula: a flat 40% replacement of average monthly
//! earnings, capped at the full-retirement-age maximum, then adjusted linearly
//! for early or late claiming.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::{ConstantsTable, LATEST_CLAIMING_AGE};
use crate::error::{ensure_amount, CalcResult};
use crate::projection::round_currency;

/// Share of average monthly earnings replaced by the base benefit
pub const REPLACEMENT_RATE: f64 = 0.4;

/// Reduction per year claimed before full retirement age
pub const EARLY_REDUCTION_PER_YEAR: f64 = 0.0667;

/// Delayed retirement credit per year claimed after full retirement age
pub const DELAYED_CREDIT_PER_YEAR: f64 = 0.08;

/// Inputs for the Social Security estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SocialSecurityInput {
    /// Stand-in for average indexed monthly earnings
    pub average_monthly_earnings: f64,
    pub claiming_age: u32,
}

/// Fixed advice bucket for a claiming age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimingRecommendation {
    /// Claiming before full retirement age
    WaitForFullRetirement,
    /// Between full retirement age and 70
    DelayForCredits,
    /// 70 or later
    Maximized,
}

impl ClaimingRecommendation {
    pub fn for_age(claiming_age: u32, full_retirement_age: u32) -> Self {
        if claiming_age < full_retirement_age {
            Self::WaitForFullRetirement
        } else if claiming_age < LATEST_CLAIMING_AGE {
            Self::DelayForCredits
        } else {
            Self::Maximized
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::WaitForFullRetirement => "Waiting until 67 could increase your benefit by ~30%",
            Self::DelayForCredits => "Each year you wait until 70 increases your benefit by 8%",
            Self::Maximized => "You've maximized your Social Security benefit!",
        }
    }
}

/// Estimated benefit at the chosen claiming age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialSecurityResult {
    pub claiming_age: u32,
    pub adjustment_factor: f64,
    pub monthly_benefit: f64,
    pub annual_benefit: f64,
    /// Benefits paid from claiming until life expectancy (negative past it)
    pub lifetime_benefit: f64,
    pub percent_of_max: f64,
    pub recommendation: ClaimingRecommendation,
    /// Fixed advice text for `recommendation`
    pub recommendation_message: String,
}

/// Linear claiming-age adjustment relative to full retirement age
pub fn adjustment_factor(claiming_age: u32, full_retirement_age: u32) -> f64 {
    if claiming_age < full_retirement_age {
        let years_early = (full_retirement_age - claiming_age) as f64;
        1.0 - years_early * EARLY_REDUCTION_PER_YEAR
    } else if claiming_age > full_retirement_age {
        let years_late = (claiming_age - full_retirement_age) as f64;
        1.0 + years_late * DELAYED_CREDIT_PER_YEAR
    } else {
        1.0
    }
}

/// Estimate the monthly, annual and lifetime benefit for one claiming age
pub fn calculate_social_security(
    input: &SocialSecurityInput,
    constants: &ConstantsTable,
) -> CalcResult<SocialSecurityResult> {
    let earnings = ensure_amount("average_monthly_earnings", input.average_monthly_earnings)?;
    let ss = &constants.social_security;
    let claiming_age = input.claiming_age;

    let base_benefit = (earnings * REPLACEMENT_RATE).min(ss.max_benefit_67 as f64);
    let factor = adjustment_factor(claiming_age, ss.full_retirement_age);

    let monthly_benefit = round_currency(base_benefit * factor);
    let annual_benefit = monthly_benefit * 12.0;

    let years_collecting =
        i64::from(constants.defaults.life_expectancy) - i64::from(claiming_age);
    let lifetime_benefit = round_currency(annual_benefit * years_collecting as f64);
    if years_collecting < 0 {
        warn!(
            "claiming age {claiming_age} is past life expectancy {}",
            constants.defaults.life_expectancy
        );
    }

    let max_for_age = ss.max_for_age(claiming_age) as f64;
    let percent_of_max = if max_for_age > 0.0 {
        (monthly_benefit / max_for_age * 100.0).round()
    } else {
        0.0
    };

    let recommendation = ClaimingRecommendation::for_age(claiming_age, ss.full_retirement_age);

    Ok(SocialSecurityResult {
        claiming_age,
        adjustment_factor: factor,
        monthly_benefit,
        annual_benefit,
        lifetime_benefit,
        percent_of_max,
        recommendation,
        recommendation_message: recommendation.message().to_string(),
    })
}
