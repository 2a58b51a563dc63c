//! AWS Lambda handler for the retirement calculators
//!
//! Accepts the raw text of a calculator form as JSON, substitutes defaults for
//! blank or unparseable fields, runs the calculator and returns the result
//! record. Input range errors come back in the `error` field rather than
//! failing the invocation.

use std::collections::HashMap;
use std::time::Instant;

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

use retirement_calc::input::FormDefaults;
use retirement_calc::{
    calculate_401k, calculate_retirement, calculate_savings_goal, calculate_social_security,
    CalcError, CalculatorKind, ConstantsTable,
};

/// Form submission for one calculator
#[derive(Debug, Deserialize)]
pub struct CalculationRequest {
    /// Calculator id ("calculator", "401k", "social-security", "savings-goal")
    pub calculator: CalculatorKind,

    /// Raw form text keyed by field name
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

/// Output from the calculation
#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub calculator: CalculatorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<&'static str>,
    pub execution_time_us: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn calculate(
    request: &CalculationRequest,
    constants: &ConstantsTable,
) -> Result<Result<serde_json::Value, CalcError>, serde_json::Error> {
    let form = FormDefaults::default();
    let fields = &request.fields;

    let value = match request.calculator {
        CalculatorKind::Retirement => {
            calculate_retirement(&form.retirement_input(fields, constants), constants)
                .map(serde_json::to_value)
        }
        CalculatorKind::Plan401k => calculate_401k(&form.plan_401k_input(fields, constants), constants)
            .map(serde_json::to_value),
        CalculatorKind::SocialSecurity => {
            calculate_social_security(&form.social_security_input(fields), constants)
                .map(serde_json::to_value)
        }
        CalculatorKind::SavingsGoal => {
            calculate_savings_goal(&form.savings_goal_input(fields, constants), constants)
                .map(serde_json::to_value)
        }
    };

    match value {
        Ok(json) => Ok(Ok(json?)),
        Err(e) => Ok(Err(e)),
    }
}

fn evaluate(request: &CalculationRequest, constants: &ConstantsTable) -> Result<CalculationResponse, Error> {
    let start = Instant::now();
    let outcome = calculate(request, constants)?;

    let (result, explanation, error) = match outcome {
        Ok(json) => (Some(json), Some(request.calculator.explanation()), None),
        Err(e) => {
            log::info!("rejected {} request: {e}", request.calculator);
            (None, None, Some(e.to_string()))
        }
    };

    Ok(CalculationResponse {
        calculator: request.calculator,
        result,
        explanation,
        execution_time_us: start.elapsed().as_micros() as u64,
        error,
    })
}

async fn handler(event: LambdaEvent<CalculationRequest>) -> Result<CalculationResponse, Error> {
    let constants = ConstantsTable::for_2025();
    log::debug!("handling {} request", event.payload.calculator);
    evaluate(&event.payload, &constants)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> CalculationRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_401k_request_with_formatted_fields() {
        let req = request(
            r#"{"calculator": "401k", "fields": {"annual_salary": "$80,000", "current_balance": "150,000"}}"#,
        );
        let response = evaluate(&req, &ConstantsTable::for_2025()).unwrap();
        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["annual_contribution"], 8000.0);
        assert_eq!(result["employer_match_amount"], 1200.0);
        assert_eq!(result["total_annual_contribution"], 9200.0);
    }

    #[test]
    fn test_blank_social_security_form() {
        let req = request(r#"{"calculator": "social-security"}"#);
        let response = evaluate(&req, &ConstantsTable::for_2025()).unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["monthly_benefit"], 2000.0);
        assert_eq!(result["recommendation"], "delay_for_credits");
        assert_eq!(
            result["recommendation_message"],
            "Each year you wait until 70 increases your benefit by 8%"
        );
    }

    #[test]
    fn test_invalid_range_reported_in_error_field() {
        let req = request(
            r#"{"calculator": "savings-goal", "fields": {"current_age": "70", "retirement_age": "60"}}"#,
        );
        let response = evaluate(&req, &ConstantsTable::for_2025()).unwrap();
        assert!(response.result.is_none());
        assert_eq!(
            response.error.as_deref(),
            Some("retirement age 60 is before current age 70")
        );
    }

    #[test]
    fn test_huge_age_reported_in_error_field() {
        let req = request(
            r#"{"calculator": "calculator", "fields": {"current_age": "0", "retirement_age": "400000000"}}"#,
        );
        let response = evaluate(&req, &ConstantsTable::for_2025()).unwrap();
        assert!(response.result.is_none());
        assert_eq!(
            response.error.as_deref(),
            Some("age 400000000 is above the supported maximum of 150")
        );
    }

    #[test]
    fn test_unknown_calculator_rejected() {
        let parsed: Result<CalculationRequest, _> =
            serde_json::from_str(r#"{"calculator": "pension"}"#);
        assert!(parsed.is_err());
    }
}
