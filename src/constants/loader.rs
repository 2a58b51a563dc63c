//! CSV-based constants loader
//!
//! Reads `key,value` rows from a CSV file and applies them over a base table.
//! Keys are dotted paths such as `limits_401k.under_50`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use super::{ConstantsTable, ContributionLimits};
use crate::error::ConstantsError;

/// Default path to the constants override file
pub const DEFAULT_CONSTANTS_PATH: &str = "data/constants.csv";

/// Load overrides from a CSV file on disk
pub fn load_overrides(base: ConstantsTable, path: &Path) -> Result<ConstantsTable, ConstantsError> {
    let file = File::open(path)?;
    debug!("loading constants overrides from {}", path.display());
    read_overrides(base, file)
}

/// Apply overrides read from any CSV source
///
/// A tier's `total_50_plus` is recomputed from `under_50 + catch_up` unless
/// the file sets it explicitly; an explicit total is left for `validate` to check.
pub fn read_overrides<R: Read>(base: ConstantsTable, source: R) -> Result<ConstantsTable, ConstantsError> {
    let mut reader = csv::Reader::from_reader(source);
    let mut table = base;
    let mut explicit_401k_total = false;
    let mut explicit_ira_total = false;

    for result in reader.records() {
        let record = result?;
        let key = record.get(0).unwrap_or_default().trim();
        let value = record.get(1).unwrap_or_default().trim();
        if key.is_empty() {
            continue;
        }

        match key {
            "limits_401k.total_50_plus" => explicit_401k_total = true,
            "limits_ira.total_50_plus" => explicit_ira_total = true,
            _ => {}
        }
        apply(&mut table, key, value)?;
    }

    if !explicit_401k_total {
        table.limits_401k.total_50_plus = tier_total("limits_401k", &table.limits_401k)?;
    }
    if !explicit_ira_total {
        table.limits_ira.total_50_plus = tier_total("limits_ira", &table.limits_ira)?;
    }

    Ok(table)
}

fn tier_total(name: &str, limits: &ContributionLimits) -> Result<u32, ConstantsError> {
    limits.checked_total().ok_or_else(|| {
        ConstantsError::Invariant(format!(
            "{name}.under_50 ({}) + catch_up ({}) overflows",
            limits.under_50, limits.catch_up
        ))
    })
}

fn apply(table: &mut ConstantsTable, key: &str, value: &str) -> Result<(), ConstantsError> {
    let whole = || -> Result<u32, ConstantsError> {
        value.parse::<u32>().map_err(|_| ConstantsError::Value {
            key: key.to_string(),
            value: value.to_string(),
        })
    };
    let rate = || -> Result<f64, ConstantsError> {
        value.parse::<f64>().map_err(|_| ConstantsError::Value {
            key: key.to_string(),
            value: value.to_string(),
        })
    };

    match key {
        "plan_year" => table.plan_year = whole()?,

        "limits_401k.under_50" => table.limits_401k.under_50 = whole()?,
        "limits_401k.catch_up" => table.limits_401k.catch_up = whole()?,
        "limits_401k.total_50_plus" => table.limits_401k.total_50_plus = whole()?,
        "limits_ira.under_50" => table.limits_ira.under_50 = whole()?,
        "limits_ira.catch_up" => table.limits_ira.catch_up = whole()?,
        "limits_ira.total_50_plus" => table.limits_ira.total_50_plus = whole()?,

        "social_security.max_benefit_62" => table.social_security.max_benefit_62 = whole()?,
        "social_security.max_benefit_67" => table.social_security.max_benefit_67 = whole()?,
        "social_security.max_benefit_70" => table.social_security.max_benefit_70 = whole()?,
        "social_security.cola_percent" => table.social_security.cola_percent = rate()?,
        "social_security.full_retirement_age" => {
            table.social_security.full_retirement_age = whole()?
        }

        "defaults.current_age" => table.defaults.current_age = whole()?,
        "defaults.retirement_age" => table.defaults.retirement_age = whole()?,
        "defaults.current_savings" => table.defaults.current_savings = whole()?,
        "defaults.monthly_contribution" => table.defaults.monthly_contribution = whole()?,
        "defaults.expected_return_percent" => table.defaults.expected_return_percent = rate()?,
        "defaults.inflation_percent" => table.defaults.inflation_percent = rate()?,
        "defaults.withdrawal_rate_percent" => table.defaults.withdrawal_rate_percent = rate()?,
        "defaults.life_expectancy" => table.defaults.life_expectancy = whole()?,

        "employer_match.match_percent" => table.employer_match.match_percent = rate()?,
        "employer_match.up_to_percent" => table.employer_match.up_to_percent = rate()?,

        other => return Err(ConstantsError::UnknownKey(other.to_string())),
    }

    Ok(())
}
