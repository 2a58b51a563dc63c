//! Retirement Calculator - projection engine for personal retirement planning
//!
//! This library provides:
//! - Retirement savings growth and 4%-rule income
//! - 401(k) growth with contribution limits and employer match
//! - Simplified Social Security benefit estimates by claiming age
//! - Required monthly saving to reach a target balance
//! - Batch scenario evaluation (claiming-age comparison, return sensitivity)
//!
//! Every calculator is a pure function of its input record and a
//! [`ConstantsTable`]. Results are deterministic and never cached.

pub mod calculators;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod format;
pub mod input;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use calculators::{
    calculate_401k, calculate_retirement, calculate_savings_goal, calculate_social_security,
    Plan401kInput, Plan401kResult, RetirementInput, RetirementResult, SavingsGoalInput,
    SavingsGoalResult, SocialSecurityInput, SocialSecurityResult,
};
pub use catalog::CalculatorKind;
pub use constants::ConstantsTable;
pub use error::{CalcError, ConstantsError, ParseError};
pub use projection::GrowthProjection;
pub use scenario::ScenarioRunner;
