//! Projected cash flow records.

use super::method::FcfMethod;
use dcf_core::FailedMethod;
use serde::{Deserialize, Serialize};

/// One year of an explicit projection.
///
/// Line items a method does not need are still reported when the underlying
/// data exists; they are `None` only when it does not.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectedYear {
    /// Projection year, starting at 1.
    pub year: u32,
    /// Revenue.
    pub revenue: f64,
    /// EBIT at the projected operating margin.
    pub ebit: Option<f64>,
    /// EBIT after tax.
    pub nopat: Option<f64>,
    /// EBIT less interest, after tax.
    pub net_income: Option<f64>,
    /// Operating cash flow at its base-year margin of revenue.
    pub operating_cash_flow: Option<f64>,
    /// Interest expense, held flat.
    pub interest_expense: Option<f64>,
    /// Depreciation and amortisation.
    pub depreciation: f64,
    /// Capital expenditure.
    pub capex: f64,
    /// Change in net working capital.
    pub nwc_change: f64,
    /// Free cash flow under the method actually used.
    pub fcf: f64,
}

/// Explicit-horizon cash flows produced for one evaluation.
///
/// Holds exactly `projection_years` entries. Consuming it through
/// [`IntoIterator`] yields each year once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CashFlowProjection {
    years: Vec<ProjectedYear>,
    method: FcfMethod,
    requested: FcfMethod,
    fallbacks: Vec<FailedMethod>,
}

impl CashFlowProjection {
    pub(crate) fn new(
        years: Vec<ProjectedYear>,
        method: FcfMethod,
        requested: FcfMethod,
        fallbacks: Vec<FailedMethod>,
    ) -> Self {
        Self {
            years,
            method,
            requested,
            fallbacks,
        }
    }

    /// Method actually used.
    #[inline]
    pub fn method(&self) -> FcfMethod {
        self.method
    }

    /// Method the caller asked for.
    #[inline]
    pub fn requested(&self) -> FcfMethod {
        self.requested
    }

    /// Methods that were tried and skipped before [`method`](Self::method).
    #[inline]
    pub fn fallbacks(&self) -> &[FailedMethod] {
        &self.fallbacks
    }

    /// Whether a method other than the requested one was used.
    #[inline]
    pub fn fallback_used(&self) -> bool {
        self.method != self.requested
    }

    /// Number of projected years.
    #[inline]
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Whether the projection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Projected years in order.
    #[inline]
    pub fn years(&self) -> &[ProjectedYear] {
        &self.years
    }

    /// Iterates over the projected years.
    pub fn iter(&self) -> std::slice::Iter<'_, ProjectedYear> {
        self.years.iter()
    }

    /// Free cash flow of each year, in order.
    pub fn fcfs(&self) -> Vec<f64> {
        self.years.iter().map(|y| y.fcf).collect()
    }

    /// Free cash flow of the final explicit year.
    pub fn final_fcf(&self) -> Option<f64> {
        self.years.last().map(|y| y.fcf)
    }
}

impl IntoIterator for CashFlowProjection {
    type Item = ProjectedYear;
    type IntoIter = std::vec::IntoIter<ProjectedYear>;

    fn into_iter(self) -> Self::IntoIter {
        self.years.into_iter()
    }
}

impl<'a> IntoIterator for &'a CashFlowProjection {
    type Item = &'a ProjectedYear;
    type IntoIter = std::slice::Iter<'a, ProjectedYear>;

    fn into_iter(self) -> Self::IntoIter {
        self.years.iter()
    }
}
