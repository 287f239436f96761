//! Bound tables for every validated assumption field.
//!
//! All bounds are inclusive. Rates and percentages are decimals
//! (`0.05` = 5%).

use super::{check_bounds, check_one_of};
use crate::types::ValidationError;

/// A named inclusive interval for a single field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldBounds {
    /// Field name reported on failure
    pub field: &'static str,
    /// Inclusive lower bound
    pub lower: f64,
    /// Inclusive upper bound
    pub upper: f64,
}

impl FieldBounds {
    /// Creates a new bound entry.
    pub const fn new(field: &'static str, lower: f64, upper: f64) -> Self {
        Self {
            field,
            lower,
            upper,
        }
    }

    /// Checks `value` against this entry.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming [`FieldBounds::field`].
    #[inline]
    pub fn check(&self, value: f64) -> Result<f64, ValidationError> {
        check_bounds(value, self.lower, self.upper, self.field)
    }

    /// Checks one element of a per-year schedule, reporting `field[index]`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the indexed field.
    #[inline]
    pub fn check_indexed(&self, value: f64, index: usize) -> Result<f64, ValidationError> {
        check_bounds(
            value,
            self.lower,
            self.upper,
            format!("{}[{}]", self.field, index),
        )
    }

    /// Returns whether `value` lies inside the bounds.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.lower && value <= self.upper
    }
}

/// Per-year revenue growth: -50% to +100%.
pub const REVENUE_GROWTH: FieldBounds = FieldBounds::new("revenue_growth_rates", -0.50, 1.00);

/// Terminal (perpetuity) growth rate.
pub const TERMINAL_GROWTH: FieldBounds = FieldBounds::new("terminal_growth_rate", -0.05, 0.10);

/// Discount rate supplied directly on an assumption set.
pub const DISCOUNT_RATE: FieldBounds = FieldBounds::new("discount_rate", 0.03, 0.25);

/// Discount rate derived by the WACC calculator.
pub const WACC: FieldBounds = FieldBounds::new("wacc", 0.03, 0.25);

/// Effective tax rate.
pub const TAX_RATE: FieldBounds = FieldBounds::new("tax_rate", 0.0, 0.60);

/// Capital expenditure as a share of revenue.
pub const CAPEX_PCT_REVENUE: FieldBounds = FieldBounds::new("capex_pct_revenue", 0.0, 0.60);

/// Change in net working capital as a share of revenue.
pub const NWC_PCT_REVENUE: FieldBounds = FieldBounds::new("nwc_pct_revenue", -0.30, 0.50);

/// Depreciation as a share of revenue.
pub const DEPRECIATION_PCT_REVENUE: FieldBounds =
    FieldBounds::new("depreciation_pct_revenue", 0.0, 0.50);

/// EBIT as a share of revenue.
pub const OPERATING_MARGIN: FieldBounds = FieldBounds::new("operating_margin", -1.0, 1.0);

/// Raw (unadjusted) regression beta.
pub const RAW_BETA: FieldBounds = FieldBounds::new("raw_beta", -1.0, 5.0);

/// Risk-free rate.
pub const RISK_FREE_RATE: FieldBounds = FieldBounds::new("risk_free_rate", 0.0, 0.15);

/// Equity risk premium.
pub const EQUITY_RISK_PREMIUM: FieldBounds = FieldBounds::new("equity_risk_premium", 0.0, 0.15);

/// Capital structure weight (equity or debt).
pub const CAPITAL_WEIGHT: FieldBounds = FieldBounds::new("capital_weight", 0.0, 1.0);

/// Supported explicit projection horizons in years.
pub const PROJECTION_YEARS: [u32; 3] = [5, 7, 10];

/// Checks a projection horizon against [`PROJECTION_YEARS`].
///
/// # Errors
///
/// Returns [`ValidationError`] for any other horizon.
#[inline]
pub fn check_projection_years(years: u32) -> Result<u32, ValidationError> {
    check_one_of(years, &PROJECTION_YEARS, "projection_years")
}
