//! Compound growth projection and retirement horizons

mod growth;
mod horizon;

pub use growth::{growth_factor, monthly_rate, GrowthProjection, GrowthYear};
pub use horizon::Horizon;

/// Round to the nearest whole currency unit
pub fn round_currency(amount: f64) -> f64 {
    amount.round()
}
