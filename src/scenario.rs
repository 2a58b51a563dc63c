//! Scenario runner for batch evaluations
//!
//! Holds one constants table and evaluates many inputs against it in
//! parallel: claiming-age comparisons, return sensitivity sweeps and batches
//! of 401(k) inputs.

use rayon::prelude::*;
use std::path::Path;

use crate::calculators::{
    calculate_401k, calculate_retirement, calculate_social_security, Plan401kInput, Plan401kResult,
    RetirementInput, RetirementResult, SocialSecurityInput, SocialSecurityResult,
};
use crate::constants::{ConstantsTable, EARLIEST_CLAIMING_AGE, LATEST_CLAIMING_AGE};
use crate::error::{CalcResult, ConstantsError};

/// Pre-loaded scenario runner
///
/// # Example
/// ```
/// use retirement_calc::ScenarioRunner;
///
/// let runner = ScenarioRunner::new();
/// let by_age = runner.compare_claiming_ages(5_000.0).unwrap();
/// assert_eq!(by_age.len(), 9);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    constants: ConstantsTable,
}

impl ScenarioRunner {
    /// Runner over the built-in 2025 table
    pub fn new() -> Self {
        Self::with_constants(ConstantsTable::for_2025())
    }

    /// Runner over a table loaded from a CSV override file
    pub fn from_csv_path(path: &Path) -> Result<Self, ConstantsError> {
        Ok(Self::with_constants(ConstantsTable::from_csv_path(path)?))
    }

    pub fn with_constants(constants: ConstantsTable) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &ConstantsTable {
        &self.constants
    }

    /// Social Security estimate for every claiming age from 62 to 70, in age order
    pub fn compare_claiming_ages(&self, average_monthly_earnings: f64) -> CalcResult<Vec<SocialSecurityResult>> {
        (EARLIEST_CLAIMING_AGE..=LATEST_CLAIMING_AGE)
            .into_par_iter()
            .map(|claiming_age| {
                let input = SocialSecurityInput {
                    average_monthly_earnings,
                    claiming_age,
                };
                calculate_social_security(&input, &self.constants)
            })
            .collect()
    }

    /// Retirement projection for each expected return, in the order given
    pub fn return_sensitivity(
        &self,
        input: &RetirementInput,
        returns: &[f64],
    ) -> CalcResult<Vec<RetirementResult>> {
        returns
            .par_iter()
            .map(|&pct| calculate_retirement(&input.with_expected_return(pct), &self.constants))
            .collect()
    }

    /// Evaluate many 401(k) inputs; each keeps its own outcome
    pub fn run_401k_batch(&self, inputs: &[Plan401kInput]) -> Vec<CalcResult<Plan401kResult>> {
        inputs
            .par_iter()
            .map(|input| calculate_401k(input, &self.constants))
            .collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;

    #[test]
    fn test_claiming_age_comparison() {
        let runner = ScenarioRunner::new();
        let results = runner.compare_claiming_ages(5_000.0).unwrap();

        let ages: Vec<u32> = results.iter().map(|r| r.claiming_age).collect();
        assert_eq!(ages, (62..=70).collect::<Vec<_>>());

        // Benefit rises with every year of delay
        for pair in results.windows(2) {
            assert!(pair[1].monthly_benefit > pair[0].monthly_benefit);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let runner = ScenarioRunner::new();
        let results = runner.compare_claiming_ages(3_100.0).unwrap();
        for result in &results {
            let input = SocialSecurityInput {
                average_monthly_earnings: 3_100.0,
                claiming_age: result.claiming_age,
            };
            let single = calculate_social_security(&input, runner.constants()).unwrap();
            assert_eq!(&single, result);
        }
    }

    #[test]
    fn test_return_sensitivity() {
        let runner = ScenarioRunner::new();
        let input = RetirementInput::defaults(runner.constants());
        let returns = [4.0, 5.0, 6.0, 7.0, 8.0];

        let results = runner.return_sensitivity(&input, &returns).unwrap();
        assert_eq!(results.len(), returns.len());

        // Higher return should result in higher projected balance
        for pair in results.windows(2) {
            assert!(pair[1].projected_balance > pair[0].projected_balance);
        }
    }

    #[test]
    fn test_return_sensitivity_propagates_range_error() {
        let runner = ScenarioRunner::new();
        let input = RetirementInput::new(runner.constants(), 70, 60, 0.0, 0.0);
        assert!(matches!(
            runner.return_sensitivity(&input, &[5.0, 7.0]),
            Err(CalcError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_401k_batch_keeps_per_input_outcome() {
        let runner = ScenarioRunner::new();
        let c = *runner.constants();
        let inputs = [
            Plan401kInput::new(&c, 80_000.0, 10.0, 55, 67, 150_000.0),
            Plan401kInput::new(&c, 80_000.0, 10.0, 67, 55, 0.0),
        ];
        let results = runner.run_401k_batch(&inputs);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().total_annual_contribution, 9_200.0);
        assert!(results[1].is_err());
    }
}
