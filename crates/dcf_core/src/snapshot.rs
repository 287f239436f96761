//! Normalised financial snapshots supplied by market-data collaborators.
//!
//! The valuation core never fetches data itself. A [`FinancialDataProvider`]
//! hands over a [`FinancialSnapshot`]; any field the provider could not
//! source is `None`, and the consumers decide whether that is fatal or
//! triggers a recorded fallback.

use crate::types::ProviderError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Base-year financial data for one company.
///
/// Monetary amounts share a single unit (e.g. USD millions); per-share
/// figures use the same unit divided by `shares_outstanding`.
///
/// # Examples
///
/// ```rust
/// use dcf_core::FinancialSnapshot;
///
/// let snapshot = FinancialSnapshot {
///     ticker: "ACME".to_string(),
///     revenue: 100.0,
///     ebit: Some(20.0),
///     shares_outstanding: 10.0,
///     ..Default::default()
/// };
/// assert_eq!(snapshot.operating_margin(), Some(0.2));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialSnapshot {
    /// Ticker symbol
    pub ticker: String,
    /// Base-year (year 0) revenue
    pub revenue: f64,
    /// Base-year EBIT
    pub ebit: Option<f64>,
    /// Base-year depreciation and amortisation
    pub depreciation: Option<f64>,
    /// Base-year capital expenditure (positive number)
    pub capex: Option<f64>,
    /// Base-year change in net working capital
    pub nwc_change: Option<f64>,
    /// Base-year operating cash flow
    pub operating_cash_flow: Option<f64>,
    /// Annual interest expense
    pub interest_expense: Option<f64>,
    /// Historical effective tax rate
    pub effective_tax_rate: Option<f64>,
    /// Current share price
    pub current_price: Option<f64>,
    /// Diluted shares outstanding
    pub shares_outstanding: f64,
    /// Raw regression beta
    pub raw_beta: Option<f64>,
    /// Total interest-bearing debt (capital-structure weight)
    pub total_debt: f64,
    /// Market value of equity; `None` means price times shares
    pub total_equity: Option<f64>,
    /// Debt and debt-like claims deducted in the equity bridge
    pub net_debt: f64,
    /// Cash and short-term investments added back in the equity bridge
    pub cash: f64,
    /// Live risk-free rate, when the provider could source one
    pub risk_free_rate: Option<f64>,
}

impl FinancialSnapshot {
    /// Historical EBIT margin, when EBIT is known and revenue is positive.
    pub fn operating_margin(&self) -> Option<f64> {
        match self.ebit {
            Some(ebit) if self.revenue > 0.0 => Some(ebit / self.revenue),
            _ => None,
        }
    }

    /// Operating cash flow as a share of revenue.
    pub fn operating_cash_flow_margin(&self) -> Option<f64> {
        match self.operating_cash_flow {
            Some(ocf) if self.revenue > 0.0 => Some(ocf / self.revenue),
            _ => None,
        }
    }

    /// Market value of equity: explicit value, else price times shares.
    pub fn market_equity(&self) -> Option<f64> {
        self.total_equity.or_else(|| {
            self.current_price
                .filter(|p| *p > 0.0)
                .map(|p| p * self.shares_outstanding)
        })
    }
}

/// Source of normalised financial snapshots.
///
/// Implementations live outside the valuation core (file loaders, API
/// clients, caches).
pub trait FinancialDataProvider {
    /// Returns the latest snapshot for `ticker`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when no snapshot can be supplied.
    fn snapshot(&self, ticker: &str) -> Result<FinancialSnapshot, ProviderError>;
}

/// In-memory provider keyed by upper-cased ticker.
#[derive(Clone, Debug, Default)]
pub struct StaticDataProvider {
    snapshots: HashMap<String, FinancialSnapshot>,
}

impl StaticDataProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a snapshot, replacing any existing one for the same ticker.
    pub fn with_snapshot(mut self, snapshot: FinancialSnapshot) -> Self {
        self.snapshots
            .insert(snapshot.ticker.to_uppercase(), snapshot);
        self
    }

    /// Number of tickers held.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the provider holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl FinancialDataProvider for StaticDataProvider {
    fn snapshot(&self, ticker: &str) -> Result<FinancialSnapshot, ProviderError> {
        self.snapshots
            .get(&ticker.to_uppercase())
            .cloned()
            .ok_or_else(|| ProviderError::UnknownTicker(ticker.to_string()))
    }
}
