//! Monthly compound growth shared by every forward-projecting calculator

use serde::{Deserialize, Serialize};

/// Monthly growth factor for an annual percentage return
pub fn monthly_rate(annual_return_percent: f64) -> f64 {
    annual_return_percent / 100.0 / 12.0
}

/// Compounded growth factor `(1 + r)^months` for monthly rate `r`
pub fn growth_factor(annual_return_percent: f64, months: u32) -> f64 {
    let base = 1.0 + monthly_rate(annual_return_percent);
    match i32::try_from(months) {
        Ok(n) => base.powi(n),
        Err(_) => base.powf(f64::from(months)),
    }
}

/// Balance at the end of one projection year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthYear {
    /// Projection year (1-indexed); the final entry may cover a partial year
    pub year: u32,
    /// Balance after the last month of this year (unrounded)
    pub end_balance: f64,
    /// Cumulative contributions paid in up to and including this year
    pub contributions_to_date: f64,
}

/// Future value of a starting balance plus a level monthly contribution
///
/// Each month the balance earns one twelfth of the annual return and the
/// contribution is added at month end. Nothing is rounded between steps.
///
/// # Example
/// ```
/// use retirement_calc::projection::GrowthProjection;
///
/// let fv = GrowthProjection::new(10_000.0)
///     .contributing(100.0)
///     .at_annual_return(6.0)
///     .over_months(12)
///     .future_value();
/// assert!(fv > 10_000.0 + 1_200.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthProjection {
    present_value: f64,
    monthly_contribution: f64,
    annual_return_percent: f64,
    months: u32,
}

impl GrowthProjection {
    /// Start a projection from a present value with no contributions, no return and no horizon
    pub fn new(present_value: f64) -> Self {
        Self {
            present_value,
            monthly_contribution: 0.0,
            annual_return_percent: 0.0,
            months: 0,
        }
    }

    pub fn contributing(mut self, monthly_contribution: f64) -> Self {
        self.monthly_contribution = monthly_contribution;
        self
    }

    pub fn at_annual_return(mut self, annual_return_percent: f64) -> Self {
        self.annual_return_percent = annual_return_percent;
        self
    }

    pub fn over_months(mut self, months: u32) -> Self {
        self.months = months;
        self
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    /// Total contributions paid in over the horizon
    pub fn total_contributions(&self) -> f64 {
        self.monthly_contribution * self.months as f64
    }

    /// Balance after compounding every month of the horizon
    pub fn future_value(&self) -> f64 {
        let growth = 1.0 + monthly_rate(self.annual_return_percent);
        (0..self.months).fold(self.present_value, |balance, _| {
            balance * growth + self.monthly_contribution
        })
    }

    /// Year-end balances over the horizon
    ///
    /// The last entry always ends at the final month, so its balance equals
    /// [`future_value`](Self::future_value).
    pub fn yearly_schedule(&self) -> Vec<GrowthYear> {
        let growth = 1.0 + monthly_rate(self.annual_return_percent);
        let mut schedule = Vec::with_capacity(self.months.div_ceil(12) as usize);
        let mut balance = self.present_value;

        for month in 1..=self.months {
            balance = balance * growth + self.monthly_contribution;
            if month % 12 == 0 || month == self.months {
                schedule.push(GrowthYear {
                    year: month.div_ceil(12),
                    end_balance: balance,
                    contributions_to_date: self.monthly_contribution * month as f64,
                });
            }
        }

        schedule
    }
}
