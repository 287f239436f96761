//! Deterministic DCF valuation.

use super::validation::{validate_dcf_assumptions, ValuationWarning, TERMINAL_VALUE_SHARE_LIMIT};
use crate::error::ValuationError;
use dcf_core::validation::check_positive;
use dcf_core::{AssumptionSet, Bound, DcfValidationError, FinancialSnapshot, ValidationError};
use dcf_models::fcf::{CashFlowProjection, FcfMethod, FreeCashFlowProjector};
use dcf_models::wacc::{WaccCalculator, WaccComponents, WaccInputs};
use serde::{Deserialize, Serialize};

/// Output of a single DCF valuation.
///
/// A plain record: every field is public and serialisable for reporting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Ticker of the valued company.
    pub ticker: String,
    /// PV of explicit cash flows plus PV of terminal value.
    pub enterprise_value: f64,
    /// Enterprise value less net debt plus cash.
    pub equity_value: f64,
    /// Equity value per share outstanding.
    pub value_per_share: f64,
    /// Undiscounted terminal value at the end of the horizon.
    pub terminal_value: f64,
    /// Sum of discounted explicit-horizon cash flows.
    pub pv_explicit_fcf: f64,
    /// Discounted terminal value.
    pub pv_terminal_value: f64,
    /// `(value_per_share − price) / price`; absent without a positive price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upside_pct: Option<f64>,
    /// Discount rate applied.
    pub discount_rate: f64,
    /// WACC breakdown when the discount rate was derived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wacc: Option<WaccComponents>,
    /// FCF method requested.
    pub requested_fcf_method: FcfMethod,
    /// FCF method actually used.
    pub fcf_method: FcfMethod,
    /// Explicit-horizon free cash flows, year 1 first.
    pub projected_fcf: Vec<f64>,
    /// PV of terminal value as a share of enterprise value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_value_share: Option<f64>,
    /// Non-blocking findings.
    #[serde(default)]
    pub warnings: Vec<ValuationWarning>,
}

impl ValuationResult {
    /// Whether a fallback FCF method was used.
    #[inline]
    pub fn fcf_fallback_used(&self) -> bool {
        self.fcf_method != self.requested_fcf_method
    }
}

/// Discount rate resolved for one valuation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiscountRate {
    /// Rate applied to every cash flow.
    pub rate: f64,
    /// WACC breakdown when the rate was derived rather than supplied.
    pub wacc: Option<WaccComponents>,
}

/// Combines cash flow projection, discount rate and terminal value into a
/// single valuation.
///
/// Stateless between calls: identical inputs always produce an identical
/// [`ValuationResult`].
///
/// # Examples
///
/// ```rust
/// use dcf_core::{AssumptionSet, FinancialSnapshot};
/// use dcf_pricing::dcf::DcfEngine;
///
/// let snapshot = FinancialSnapshot {
///     ticker: "ACME".to_string(),
///     revenue: 100.0,
///     ebit: Some(20.0),
///     shares_outstanding: 10.0,
///     net_debt: 20.0,
///     current_price: Some(15.0),
///     ..Default::default()
/// };
/// let assumptions = AssumptionSet::builder(vec![0.10, 0.08, 0.06, 0.05, 0.04], 0.025)
///     .discount_rate(0.09)
///     .build()
///     .unwrap();
///
/// let result = DcfEngine::default().evaluate(&assumptions, &snapshot).unwrap();
/// assert!((result.enterprise_value - (result.pv_explicit_fcf + result.pv_terminal_value)).abs() < 1e-9);
/// assert!(result.upside_pct.is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct DcfEngine {
    wacc: WaccCalculator,
    projector: FreeCashFlowProjector,
}

impl DcfEngine {
    /// Creates an engine with a WACC calculator and requested FCF method.
    pub fn new(wacc: WaccCalculator, fcf_method: FcfMethod) -> Self {
        Self {
            wacc,
            projector: FreeCashFlowProjector::new(fcf_method),
        }
    }

    /// Returns a copy requesting a different FCF method.
    pub fn with_fcf_method(mut self, method: FcfMethod) -> Self {
        self.projector = FreeCashFlowProjector::new(method);
        self
    }

    /// Requested FCF method.
    #[inline]
    pub fn fcf_method(&self) -> FcfMethod {
        self.projector.requested()
    }

    /// WACC calculator used when the assumption set has no discount rate.
    #[inline]
    pub fn wacc_calculator(&self) -> &WaccCalculator {
        &self.wacc
    }

    /// Resolves the discount rate: the explicit assumption when present,
    /// otherwise WACC derived from the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError`] when the WACC inputs are missing or out of
    /// bounds.
    pub fn discount_rate(
        &self,
        assumptions: &AssumptionSet,
        snapshot: &FinancialSnapshot,
    ) -> Result<DiscountRate, ValuationError> {
        match assumptions.discount_rate() {
            Some(rate) => Ok(DiscountRate { rate, wacc: None }),
            None => {
                let inputs = WaccInputs::from_snapshot(snapshot, assumptions.tax_rate())?;
                let components = self.wacc.calculate(&inputs)?;
                Ok(DiscountRate {
                    rate: components.wacc,
                    wacc: Some(components),
                })
            }
        }
    }

    /// Projects cash flows with the requested method (or its fallbacks).
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError`] when no FCF method is viable.
    pub fn project(
        &self,
        assumptions: &AssumptionSet,
        snapshot: &FinancialSnapshot,
    ) -> Result<CashFlowProjection, ValuationError> {
        Ok(self.projector.project(assumptions, snapshot)?)
    }

    /// Values the company from assumptions and a snapshot.
    ///
    /// Order of work: discount rate, [`validate_dcf_assumptions`], share
    /// count, projection, valuation. A cross-field failure therefore aborts
    /// before any cash flow is projected.
    ///
    /// # Errors
    ///
    /// - [`ValuationError::DcfValidation`] if terminal growth is not below
    ///   the discount rate or a non-finite value is produced
    /// - [`ValuationError::Validation`] if shares outstanding is not positive
    /// - [`ValuationError::MissingData`] if no FCF or WACC method is viable
    pub fn evaluate(
        &self,
        assumptions: &AssumptionSet,
        snapshot: &FinancialSnapshot,
    ) -> Result<ValuationResult, ValuationError> {
        let discount = self.discount_rate(assumptions, snapshot)?;
        validate_dcf_assumptions(assumptions, discount.rate).into_result()?;
        check_positive(snapshot.shares_outstanding, "shares_outstanding")?;

        let projection = self.project(assumptions, snapshot)?;
        self.evaluate_with(assumptions, snapshot, &projection, discount)
    }

    /// Values the company from a precomputed projection and discount rate.
    ///
    /// Validation runs again here, so this entry point is equally safe to
    /// call directly (e.g. across a sensitivity grid).
    ///
    /// # Errors
    ///
    /// As [`evaluate`](Self::evaluate), plus [`ValuationError::Validation`]
    /// when the projection length differs from the horizon.
    pub fn evaluate_with(
        &self,
        assumptions: &AssumptionSet,
        snapshot: &FinancialSnapshot,
        projection: &CashFlowProjection,
        discount: DiscountRate,
    ) -> Result<ValuationResult, ValuationError> {
        let rate = discount.rate;
        let mut warnings = validate_dcf_assumptions(assumptions, rate).into_result()?;
        let shares = check_positive(snapshot.shares_outstanding, "shares_outstanding")?;

        let horizon = assumptions.projection_years();
        if projection.len() != horizon as usize {
            return Err(ValidationError::new(
                "cash_flow_projection.len",
                projection.len() as f64,
                Bound::OneOf(vec![f64::from(horizon)]),
            )
            .into());
        }
        let final_fcf = projection
            .final_fcf()
            .ok_or(DcfValidationError::NonFinite { field: "final_fcf" })?;

        let growth = assumptions.terminal_growth_rate();
        let discount_factor = 1.0 + rate;

        let pv_explicit_fcf: f64 = projection
            .iter()
            .zip(1..)
            .map(|(y, t)| y.fcf / discount_factor.powi(t))
            .sum();
        let terminal_value = finite(
            final_fcf * (1.0 + growth) / (rate - growth),
            "terminal_value",
        )?;
        let pv_terminal_value = terminal_value / discount_factor.powi(horizon as i32);
        let enterprise_value = finite(pv_explicit_fcf + pv_terminal_value, "enterprise_value")?;
        let equity_value = finite(
            enterprise_value - snapshot.net_debt + snapshot.cash,
            "equity_value",
        )?;
        let value_per_share = finite(equity_value / shares, "value_per_share")?;

        let upside_pct = snapshot
            .current_price
            .filter(|p| *p > 0.0)
            .map(|p| (value_per_share - p) / p);

        let terminal_value_share =
            (enterprise_value > 0.0).then(|| pv_terminal_value / enterprise_value);
        if let Some(share) = terminal_value_share.filter(|s| *s > TERMINAL_VALUE_SHARE_LIMIT) {
            warnings.push(ValuationWarning::TerminalValueDominates { share });
        }

        Ok(ValuationResult {
            ticker: snapshot.ticker.clone(),
            enterprise_value,
            equity_value,
            value_per_share,
            terminal_value,
            pv_explicit_fcf,
            pv_terminal_value,
            upside_pct,
            discount_rate: rate,
            wacc: discount.wacc,
            requested_fcf_method: projection.requested(),
            fcf_method: projection.method(),
            projected_fcf: projection.fcfs(),
            terminal_value_share,
            warnings,
        })
    }
}

#[inline]
fn finite(value: f64, field: &'static str) -> Result<f64, DcfValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DcfValidationError::NonFinite { field })
    }
}
