//! Immutable valuation assumption sets.
//!
//! An [`AssumptionSet`] is created once per scenario or Monte Carlo sample
//! and never mutated. Construction goes through [`AssumptionSetBuilder`],
//! which routes every field through the bound tables in
//! [`crate::validation::bounds`]. Deserialisation goes through the same
//! builder, so persisted data cannot produce an unvalidated set.
//!
//! Cross-field invariants (terminal growth strictly below the discount rate)
//! depend on the discount rate actually used, which may be derived later
//! from WACC inputs; they are enforced at valuation time.

use crate::types::ValidationError;
use crate::validation::bounds;
use serde::{Deserialize, Serialize};

/// Default effective tax rate.
pub const DEFAULT_TAX_RATE: f64 = 0.21;

/// Default capital expenditure as a share of revenue.
pub const DEFAULT_CAPEX_PCT_REVENUE: f64 = 0.05;

/// Default change in net working capital as a share of revenue.
pub const DEFAULT_NWC_PCT_REVENUE: f64 = 0.02;

/// Default depreciation as a share of revenue.
pub const DEFAULT_DEPRECIATION_PCT_REVENUE: f64 = 0.03;

/// Validated, immutable set of DCF assumptions.
///
/// # Examples
///
/// ```rust
/// use dcf_core::AssumptionSet;
///
/// let base = AssumptionSet::builder(vec![0.05; 7], 0.02)
///     .discount_rate(0.08)
///     .build()
///     .unwrap();
///
/// // Derive a new set rather than mutating
/// let stressed = base.to_builder().discount_rate(0.10).build().unwrap();
/// assert_eq!(base.discount_rate(), Some(0.08));
/// assert_eq!(stressed.discount_rate(), Some(0.10));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AssumptionSetRecord", into = "AssumptionSetRecord")]
pub struct AssumptionSet {
    revenue_growth_rates: Vec<f64>,
    terminal_growth_rate: f64,
    discount_rate: Option<f64>,
    operating_margin: Option<f64>,
    tax_rate: f64,
    capex_pct_revenue: f64,
    nwc_pct_revenue: f64,
    depreciation_pct_revenue: f64,
    projection_years: u32,
}

impl AssumptionSet {
    /// Creates a builder from the two assumptions that have no default.
    ///
    /// The projection horizon defaults to the length of `revenue_growth_rates`.
    #[inline]
    pub fn builder(
        revenue_growth_rates: Vec<f64>,
        terminal_growth_rate: f64,
    ) -> AssumptionSetBuilder {
        AssumptionSetBuilder::new(revenue_growth_rates, terminal_growth_rate)
    }

    /// Returns a builder pre-populated with this set's values.
    pub fn to_builder(&self) -> AssumptionSetBuilder {
        AssumptionSetBuilder {
            revenue_growth_rates: self.revenue_growth_rates.clone(),
            terminal_growth_rate: self.terminal_growth_rate,
            discount_rate: self.discount_rate,
            operating_margin: self.operating_margin,
            tax_rate: self.tax_rate,
            capex_pct_revenue: self.capex_pct_revenue,
            nwc_pct_revenue: self.nwc_pct_revenue,
            depreciation_pct_revenue: self.depreciation_pct_revenue,
            projection_years: Some(self.projection_years),
        }
    }

    /// Per-year revenue growth rates, one per projection year.
    #[inline]
    pub fn revenue_growth_rates(&self) -> &[f64] {
        &self.revenue_growth_rates
    }

    /// Perpetuity growth rate applied after the explicit horizon.
    #[inline]
    pub fn terminal_growth_rate(&self) -> f64 {
        self.terminal_growth_rate
    }

    /// Explicit discount rate, or `None` when it is derived from WACC inputs.
    #[inline]
    pub fn discount_rate(&self) -> Option<f64> {
        self.discount_rate
    }

    /// Explicit EBIT margin, or `None` to use the historical margin.
    #[inline]
    pub fn operating_margin(&self) -> Option<f64> {
        self.operating_margin
    }

    /// Effective tax rate.
    #[inline]
    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    /// Capital expenditure as a share of revenue.
    #[inline]
    pub fn capex_pct_revenue(&self) -> f64 {
        self.capex_pct_revenue
    }

    /// Net working capital change as a share of revenue.
    #[inline]
    pub fn nwc_pct_revenue(&self) -> f64 {
        self.nwc_pct_revenue
    }

    /// Depreciation as a share of revenue.
    #[inline]
    pub fn depreciation_pct_revenue(&self) -> f64 {
        self.depreciation_pct_revenue
    }

    /// Explicit projection horizon (5, 7 or 10 years).
    #[inline]
    pub fn projection_years(&self) -> u32 {
        self.projection_years
    }

    /// Re-runs every field-level bound check and collects all failures.
    ///
    /// A set built through the builder always passes; this exists so the
    /// valuation engine can report every problem in one pass.
    pub fn field_errors(&self) -> Vec<ValidationError> {
        AssumptionSetRecord::from(self.clone()).field_errors()
    }
}

/// Builder for [`AssumptionSet`].
///
/// Unset optional fields take the documented defaults. [`build`](Self::build)
/// validates every field and fails on the first violation.
#[derive(Clone, Debug)]
pub struct AssumptionSetBuilder {
    revenue_growth_rates: Vec<f64>,
    terminal_growth_rate: f64,
    discount_rate: Option<f64>,
    operating_margin: Option<f64>,
    tax_rate: f64,
    capex_pct_revenue: f64,
    nwc_pct_revenue: f64,
    depreciation_pct_revenue: f64,
    projection_years: Option<u32>,
}

impl AssumptionSetBuilder {
    /// Creates a builder with defaults for every optional field.
    pub fn new(revenue_growth_rates: Vec<f64>, terminal_growth_rate: f64) -> Self {
        Self {
            revenue_growth_rates,
            terminal_growth_rate,
            discount_rate: None,
            operating_margin: None,
            tax_rate: DEFAULT_TAX_RATE,
            capex_pct_revenue: DEFAULT_CAPEX_PCT_REVENUE,
            nwc_pct_revenue: DEFAULT_NWC_PCT_REVENUE,
            depreciation_pct_revenue: DEFAULT_DEPRECIATION_PCT_REVENUE,
            projection_years: None,
        }
    }

    /// Replaces the revenue growth schedule.
    #[inline]
    pub fn revenue_growth_rates(mut self, rates: Vec<f64>) -> Self {
        self.revenue_growth_rates = rates;
        self
    }

    /// Sets the terminal growth rate.
    #[inline]
    pub fn terminal_growth_rate(mut self, rate: f64) -> Self {
        self.terminal_growth_rate = rate;
        self
    }

    /// Sets an explicit discount rate.
    #[inline]
    pub fn discount_rate(mut self, rate: f64) -> Self {
        self.discount_rate = Some(rate);
        self
    }

    /// Clears the explicit discount rate so that it is derived from WACC inputs.
    #[inline]
    pub fn derive_discount_rate(mut self) -> Self {
        self.discount_rate = None;
        self
    }

    /// Sets an explicit EBIT margin.
    #[inline]
    pub fn operating_margin(mut self, margin: f64) -> Self {
        self.operating_margin = Some(margin);
        self
    }

    /// Sets the effective tax rate.
    #[inline]
    pub fn tax_rate(mut self, rate: f64) -> Self {
        self.tax_rate = rate;
        self
    }

    /// Sets capital expenditure as a share of revenue.
    #[inline]
    pub fn capex_pct_revenue(mut self, pct: f64) -> Self {
        self.capex_pct_revenue = pct;
        self
    }

    /// Sets net working capital change as a share of revenue.
    #[inline]
    pub fn nwc_pct_revenue(mut self, pct: f64) -> Self {
        self.nwc_pct_revenue = pct;
        self
    }

    /// Sets depreciation as a share of revenue.
    #[inline]
    pub fn depreciation_pct_revenue(mut self, pct: f64) -> Self {
        self.depreciation_pct_revenue = pct;
        self
    }

    /// Sets the projection horizon explicitly.
    #[inline]
    pub fn projection_years(mut self, years: u32) -> Self {
        self.projection_years = Some(years);
        self
    }

    /// Validates and builds the assumption set.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered:
    /// - `projection_years` not in {5, 7, 10}
    /// - growth schedule length differs from the horizon
    /// - any field outside its bound table entry
    pub fn build(self) -> Result<AssumptionSet, ValidationError> {
        let projection_years = self
            .projection_years
            .unwrap_or(self.revenue_growth_rates.len() as u32);

        let record = AssumptionSetRecord {
            revenue_growth_rates: self.revenue_growth_rates,
            terminal_growth_rate: self.terminal_growth_rate,
            discount_rate: self.discount_rate,
            operating_margin: self.operating_margin,
            tax_rate: self.tax_rate,
            capex_pct_revenue: self.capex_pct_revenue,
            nwc_pct_revenue: self.nwc_pct_revenue,
            depreciation_pct_revenue: self.depreciation_pct_revenue,
            projection_years,
        };

        AssumptionSet::try_from(record)
    }
}

/// Plain serialisable form of an [`AssumptionSet`].
///
/// This is the persistence and reporting shape; converting it back into an
/// [`AssumptionSet`] re-runs validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssumptionSetRecord {
    /// Per-year revenue growth rates
    pub revenue_growth_rates: Vec<f64>,
    /// Terminal growth rate
    pub terminal_growth_rate: f64,
    /// Explicit discount rate (absent when derived)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<f64>,
    /// Explicit EBIT margin (absent when historical)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_margin: Option<f64>,
    /// Effective tax rate
    pub tax_rate: f64,
    /// Capital expenditure as a share of revenue
    pub capex_pct_revenue: f64,
    /// Net working capital change as a share of revenue
    pub nwc_pct_revenue: f64,
    /// Depreciation as a share of revenue
    pub depreciation_pct_revenue: f64,
    /// Projection horizon in years
    pub projection_years: u32,
}

impl AssumptionSetRecord {
    fn field_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if let Err(e) = bounds::check_projection_years(self.projection_years) {
            errors.push(e);
        }
        if self.revenue_growth_rates.len() != self.projection_years as usize {
            errors.push(ValidationError::new(
                "revenue_growth_rates.len",
                self.revenue_growth_rates.len() as f64,
                crate::types::Bound::OneOf(vec![f64::from(self.projection_years)]),
            ));
        }
        for (i, &g) in self.revenue_growth_rates.iter().enumerate() {
            if let Err(e) = bounds::REVENUE_GROWTH.check_indexed(g, i) {
                errors.push(e);
            }
        }

        let scalar_checks = [
            bounds::TERMINAL_GROWTH.check(self.terminal_growth_rate),
            bounds::TAX_RATE.check(self.tax_rate),
            bounds::CAPEX_PCT_REVENUE.check(self.capex_pct_revenue),
            bounds::NWC_PCT_REVENUE.check(self.nwc_pct_revenue),
            bounds::DEPRECIATION_PCT_REVENUE.check(self.depreciation_pct_revenue),
        ];
        errors.extend(scalar_checks.into_iter().filter_map(Result::err));

        if let Some(rate) = self.discount_rate {
            if let Err(e) = bounds::DISCOUNT_RATE.check(rate) {
                errors.push(e);
            }
        }
        if let Some(margin) = self.operating_margin {
            if let Err(e) = bounds::OPERATING_MARGIN.check(margin) {
                errors.push(e);
            }
        }

        errors
    }
}

impl TryFrom<AssumptionSetRecord> for AssumptionSet {
    type Error = ValidationError;

    fn try_from(record: AssumptionSetRecord) -> Result<Self, Self::Error> {
        if let Some(first) = record.field_errors().into_iter().next() {
            return Err(first);
        }

        Ok(Self {
            revenue_growth_rates: record.revenue_growth_rates,
            terminal_growth_rate: record.terminal_growth_rate,
            discount_rate: record.discount_rate,
            operating_margin: record.operating_margin,
            tax_rate: record.tax_rate,
            capex_pct_revenue: record.capex_pct_revenue,
            nwc_pct_revenue: record.nwc_pct_revenue,
            depreciation_pct_revenue: record.depreciation_pct_revenue,
            projection_years: record.projection_years,
        })
    }
}

impl From<AssumptionSet> for AssumptionSetRecord {
    fn from(set: AssumptionSet) -> Self {
        Self {
            revenue_growth_rates: set.revenue_growth_rates,
            terminal_growth_rate: set.terminal_growth_rate,
            discount_rate: set.discount_rate,
            operating_margin: set.operating_margin,
            tax_rate: set.tax_rate,
            capex_pct_revenue: set.capex_pct_revenue,
            nwc_pct_revenue: set.nwc_pct_revenue,
            depreciation_pct_revenue: set.depreciation_pct_revenue,
            projection_years: set.projection_years,
        }
    }
}
