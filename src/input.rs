//! Parsing raw form text into calculator inputs
//!
//! Parsers return `Result` and never guess; the caller decides which default
//! to substitute with [`or_default`].

use log::debug;

use crate::calculators::{
    Plan401kInput, RetirementInput, SavingsGoalInput, SocialSecurityInput,
    DEFAULT_401K_RETURN_PERCENT, DEFAULT_GOAL_RETURN_PERCENT,
};
use crate::constants::ConstantsTable;
use crate::error::ParseError;

/// Parse a plain decimal number such as `"7"` or `"6.5"`
pub fn parse_number(raw: &str) -> Result<f64, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ParseError::NotANumber(trimmed.to_string())),
    }
}

/// Parse a currency amount such as `"$250,000"`
pub fn parse_currency(raw: &str) -> Result<f64, ParseError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    parse_number(&cleaned).map_err(|e| match e {
        ParseError::NotANumber(_) => ParseError::NotANumber(raw.trim().to_string()),
        other => other,
    })
}

/// Parse a whole, non-negative age
pub fn parse_age(raw: &str) -> Result<u32, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| ParseError::NotAWholeNumber(trimmed.to_string()))
}

/// Substitute `default` for a failed parse
pub fn or_default<T: Copy + std::fmt::Debug>(field: &str, parsed: Result<T, ParseError>, default: T) -> T {
    parsed.unwrap_or_else(|e| {
        debug!("{field}: {e}, using default {default:?}");
        default
    })
}

/// Raw text lookup used to build inputs from a form
pub trait FormFields {
    fn field(&self, name: &str) -> Option<&str>;

    fn raw(&self, name: &str) -> &str {
        self.field(name).unwrap_or("")
    }
}

impl FormFields for std::collections::HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Defaults the original forms fall back to when a field is blank or invalid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormDefaults {
    pub annual_salary: f64,
    pub contribution_percent: f64,
    pub current_balance: f64,
    pub average_monthly_earnings: f64,
    pub claiming_age: u32,
    pub target_amount: f64,
    pub goal_current_savings: f64,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            annual_salary: 80_000.0,
            contribution_percent: 10.0,
            current_balance: 0.0,
            average_monthly_earnings: 5_000.0,
            claiming_age: 67,
            target_amount: 1_000_000.0,
            goal_current_savings: 0.0,
        }
    }
}

impl FormDefaults {
    /// Fields: current_age, retirement_age, current_savings, monthly_contribution, expected_return
    pub fn retirement_input(&self, form: &impl FormFields, constants: &ConstantsTable) -> RetirementInput {
        let d = &constants.defaults;
        RetirementInput {
            current_age: or_default("current_age", parse_age(form.raw("current_age")), d.current_age),
            retirement_age: or_default(
                "retirement_age",
                parse_age(form.raw("retirement_age")),
                d.retirement_age,
            ),
            current_savings: or_default(
                "current_savings",
                parse_currency(form.raw("current_savings")),
                0.0,
            ),
            monthly_contribution: or_default(
                "monthly_contribution",
                parse_currency(form.raw("monthly_contribution")),
                0.0,
            ),
            expected_return_percent: or_default(
                "expected_return",
                parse_number(form.raw("expected_return")),
                d.expected_return_percent,
            ),
            withdrawal_rate_percent: d.withdrawal_rate_percent,
        }
    }

    /// Fields: annual_salary, contribution_percent, employer_match, employer_match_up_to,
    /// current_age, retirement_age, current_balance
    pub fn plan_401k_input(&self, form: &impl FormFields, constants: &ConstantsTable) -> Plan401kInput {
        let d = &constants.defaults;
        let m = &constants.employer_match;
        Plan401kInput {
            annual_salary: or_default(
                "annual_salary",
                parse_currency(form.raw("annual_salary")),
                self.annual_salary,
            ),
            contribution_percent: or_default(
                "contribution_percent",
                parse_number(form.raw("contribution_percent")),
                self.contribution_percent,
            ),
            employer_match_percent: or_default(
                "employer_match",
                parse_number(form.raw("employer_match")),
                m.match_percent,
            ),
            employer_match_up_to_percent: or_default(
                "employer_match_up_to",
                parse_number(form.raw("employer_match_up_to")),
                m.up_to_percent,
            ),
            current_age: or_default("current_age", parse_age(form.raw("current_age")), d.current_age),
            retirement_age: or_default(
                "retirement_age",
                parse_age(form.raw("retirement_age")),
                d.retirement_age,
            ),
            current_balance: or_default(
                "current_balance",
                parse_currency(form.raw("current_balance")),
                self.current_balance,
            ),
            expected_return_percent: DEFAULT_401K_RETURN_PERCENT,
        }
    }

    /// Fields: monthly_earnings, claiming_age
    pub fn social_security_input(&self, form: &impl FormFields) -> SocialSecurityInput {
        SocialSecurityInput {
            average_monthly_earnings: or_default(
                "monthly_earnings",
                parse_currency(form.raw("monthly_earnings")),
                self.average_monthly_earnings,
            ),
            claiming_age: or_default(
                "claiming_age",
                parse_age(form.raw("claiming_age")),
                self.claiming_age,
            ),
        }
    }

    /// Fields: target_amount, current_savings, current_age, retirement_age
    pub fn savings_goal_input(&self, form: &impl FormFields, constants: &ConstantsTable) -> SavingsGoalInput {
        let d = &constants.defaults;
        SavingsGoalInput {
            target_amount: or_default(
                "target_amount",
                parse_currency(form.raw("target_amount")),
                self.target_amount,
            ),
            current_savings: or_default(
                "current_savings",
                parse_currency(form.raw("current_savings")),
                self.goal_current_savings,
            ),
            current_age: or_default("current_age", parse_age(form.raw("current_age")), d.current_age),
            retirement_age: or_default(
                "retirement_age",
                parse_age(form.raw("retirement_age")),
                d.retirement_age,
            ),
            expected_return_percent: DEFAULT_GOAL_RETURN_PERCENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 6.5 "), Ok(6.5));
        assert_eq!(parse_number(""), Err(ParseError::Empty));
        assert_eq!(parse_number("   "), Err(ParseError::Empty));
        assert_eq!(parse_number("abc"), Err(ParseError::NotANumber("abc".into())));
        assert!(parse_number("inf").is_err());
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!(parse_currency("$250,000"), Ok(250_000.0));
        assert_eq!(parse_currency("1,000"), Ok(1_000.0));
        assert_eq!(parse_currency("$ 12.50"), Ok(12.5));
        assert_eq!(parse_currency("$"), Err(ParseError::Empty));
        assert_eq!(
            parse_currency("ten dollars"),
            Err(ParseError::NotANumber("ten dollars".into()))
        );
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("55"), Ok(55));
        assert_eq!(parse_age("55.5"), Err(ParseError::NotAWholeNumber("55.5".into())));
        assert_eq!(parse_age("-3"), Err(ParseError::NotAWholeNumber("-3".into())));
    }

    #[test]
    fn test_or_default() {
        assert_eq!(or_default("x", parse_number("oops"), 7.0), 7.0);
        assert_eq!(or_default("x", parse_number("3"), 7.0), 3.0);
    }

    #[test]
    fn test_blank_401k_form_uses_defaults() {
        let constants = ConstantsTable::for_2025();
        let input = FormDefaults::default().plan_401k_input(&form(&[]), &constants);
        assert_eq!(input.annual_salary, 80_000.0);
        assert_eq!(input.contribution_percent, 10.0);
        assert_eq!(input.employer_match_percent, 50.0);
        assert_eq!(input.employer_match_up_to_percent, 6.0);
        assert_eq!(input.current_age, 55);
        assert_eq!(input.retirement_age, 67);
        assert_eq!(input.current_balance, 0.0);
    }

    #[test]
    fn test_retirement_form_parses_formatted_values() {
        let constants = ConstantsTable::for_2025();
        let fields = form(&[
            ("current_age", "45"),
            ("retirement_age", "65"),
            ("current_savings", "$120,000"),
            ("monthly_contribution", "1,500"),
            ("expected_return", "not a rate"),
        ]);
        let input = FormDefaults::default().retirement_input(&fields, &constants);
        assert_eq!(input.current_age, 45);
        assert_eq!(input.retirement_age, 65);
        assert_eq!(input.current_savings, 120_000.0);
        assert_eq!(input.monthly_contribution, 1_500.0);
        assert_eq!(input.expected_return_percent, 7.0);
    }

    #[test]
    fn test_social_security_form() {
        let fields = form(&[("monthly_earnings", "$6,200"), ("claiming_age", "")]);
        let input = FormDefaults::default().social_security_input(&fields);
        assert_eq!(input.average_monthly_earnings, 6_200.0);
        assert_eq!(input.claiming_age, 67);
    }

    #[test]
    fn test_savings_goal_form() {
        let constants = ConstantsTable::for_2025();
        let fields = form(&[("target_amount", "x"), ("current_savings", "$10,000")]);
        let input = FormDefaults::default().savings_goal_input(&fields, &constants);
        assert_eq!(input.target_amount, 1_000_000.0);
        assert_eq!(input.current_savings, 10_000.0);
        assert_eq!(input.current_age, 55);
    }
}
