//! The four retirement calculators
//!
//! Each one is a pure function of its input record and the constants table.
//! Forward projections share [`crate::projection::GrowthProjection`].

mod plan_401k;
mod retirement;
mod savings_goal;
mod social_security;

pub use plan_401k::{calculate_401k, Plan401kInput, Plan401kResult, DEFAULT_401K_RETURN_PERCENT};
pub use retirement::{calculate_retirement, RetirementInput, RetirementResult};
pub use savings_goal::{
    calculate_savings_goal, SavingsGoalInput, SavingsGoalResult, DEFAULT_GOAL_RETURN_PERCENT,
};
pub use social_security::{
    adjustment_factor, calculate_social_security, ClaimingRecommendation, SocialSecurityInput,
    SocialSecurityResult, DELAYED_CREDIT_PER_YEAR, EARLY_REDUCTION_PER_YEAR, REPLACEMENT_RATE,
};
