//! Calculator catalog and the plain-language explanations shown beside results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The calculators offered by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculatorKind {
    #[serde(rename = "calculator")]
    Retirement,
    #[serde(rename = "401k")]
    Plan401k,
    #[serde(rename = "social-security")]
    SocialSecurity,
    #[serde(rename = "savings-goal")]
    SavingsGoal,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 4] = [
        CalculatorKind::Retirement,
        CalculatorKind::Plan401k,
        CalculatorKind::SocialSecurity,
        CalculatorKind::SavingsGoal,
    ];

    /// Stable identifier used in routes and requests
    pub fn id(&self) -> &'static str {
        match self {
            Self::Retirement => "calculator",
            Self::Plan401k => "401k",
            Self::SocialSecurity => "social-security",
            Self::SavingsGoal => "savings-goal",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Retirement => "Retirement Savings Calculator",
            Self::Plan401k => "401(k) Calculator",
            Self::SocialSecurity => "Social Security Estimator",
            Self::SavingsGoal => "Savings Goal Calculator",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Retirement => "Retirement",
            Self::Plan401k => "401(k)",
            Self::SocialSecurity => "Social Security",
            Self::SavingsGoal => "Savings Goal",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Retirement => "How much will I have when I retire?",
            Self::Plan401k => "Maximize your 401(k) growth with employer match",
            Self::SocialSecurity => "Estimate your Social Security benefits",
            Self::SavingsGoal => "How much should I save each month?",
        }
    }

    /// Explanation most relevant to this calculator's result
    pub fn explanation(&self) -> &'static str {
        match self {
            Self::Retirement => explanations::FOUR_PERCENT_RULE,
            Self::Plan401k => explanations::EMPLOYER_MATCH,
            Self::SocialSecurity => explanations::SOCIAL_SECURITY,
            Self::SavingsGoal => explanations::COMPOUND_INTEREST,
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CalculatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == s.trim())
            .ok_or_else(|| format!("unknown calculator '{s}'"))
    }
}

pub mod explanations {
    pub const FOUR_PERCENT_RULE: &str = "The 4% Rule means you can safely withdraw 4% of your savings each year in retirement. This strategy is designed to make your money last 30+ years.";

    pub const COMPOUND_INTEREST: &str = "Compound interest means your money earns interest on both your original savings AND on the interest you've already earned. It's like a snowball that grows bigger over time.";

    pub const EMPLOYER_MATCH: &str = "If your employer offers a 401k match, they add extra money to your retirement account when you contribute. This is essentially FREE money - always try to get the full match!";

    pub const CATCH_UP_CONTRIBUTION: &str = "If you're 50 or older, the IRS allows you to save extra money in your 401k and IRA beyond the normal limits. This helps you boost your savings as you approach retirement.";

    pub const SOCIAL_SECURITY: &str = "Social Security provides monthly income after you retire. The amount depends on your work history and when you claim. Waiting until age 70 gives you the highest monthly payment.";
}
