//! WACC inputs and capital structure.

use crate::error::ModelError;
use dcf_core::{FailedMethod, FinancialSnapshot, MissingDataError};
use serde::{Deserialize, Serialize};

/// How the equity and debt weights are obtained.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CapitalStructure {
    /// Weights from observed market equity and total debt.
    Observed {
        /// Market value of equity
        total_equity: f64,
        /// Total interest-bearing debt
        total_debt: f64,
    },
    /// Caller-supplied target weights; must sum to one.
    Target {
        /// Equity weight
        equity_weight: f64,
        /// Debt weight
        debt_weight: f64,
    },
}

/// Inputs to [`WaccCalculator::calculate`](super::WaccCalculator::calculate).
///
/// # Examples
///
/// ```rust
/// use dcf_models::wacc::{CapitalStructure, WaccInputs};
///
/// let inputs = WaccInputs {
///     raw_beta: 1.1,
///     risk_free_rate: None, // calculator falls back to the configured constant
///     capital_structure: CapitalStructure::Observed { total_equity: 800.0, total_debt: 200.0 },
///     total_debt: 200.0,
///     interest_expense: 12.0,
///     tax_rate: 0.21,
/// };
/// assert_eq!(inputs.risk_free_rate, None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaccInputs {
    /// Raw regression beta.
    pub raw_beta: f64,
    /// Live risk-free rate, if the data provider had one.
    pub risk_free_rate: Option<f64>,
    /// Source of the capital weights.
    pub capital_structure: CapitalStructure,
    /// Total debt used for the implied cost of debt.
    pub total_debt: f64,
    /// Annual interest expense.
    pub interest_expense: f64,
    /// Effective tax rate for the debt tax shield.
    pub tax_rate: f64,
}

impl WaccInputs {
    /// Builds inputs from a provider snapshot using observed weights.
    ///
    /// An absent interest expense is treated as zero, which the calculator's
    /// cost-of-debt floor then bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingData`] naming `raw_beta` and/or
    /// `total_equity` (market equity needs either an explicit value or a
    /// positive price) when they are absent.
    pub fn from_snapshot(snapshot: &FinancialSnapshot, tax_rate: f64) -> Result<Self, ModelError> {
        let mut missing = Vec::new();
        if snapshot.raw_beta.is_none() {
            missing.push("raw_beta".to_string());
        }
        let equity = snapshot.market_equity();
        if equity.is_none() {
            missing.push("total_equity".to_string());
        }

        match (snapshot.raw_beta, equity) {
            (Some(raw_beta), Some(total_equity)) => Ok(Self {
                raw_beta,
                risk_free_rate: snapshot.risk_free_rate,
                capital_structure: CapitalStructure::Observed {
                    total_equity,
                    total_debt: snapshot.total_debt,
                },
                total_debt: snapshot.total_debt,
                interest_expense: snapshot.interest_expense.unwrap_or(0.0),
                tax_rate,
            }),
            _ => Err(MissingDataError {
                attempted: vec![FailedMethod {
                    method: "CAPM".to_string(),
                    missing,
                }],
            }
            .into()),
        }
    }

    /// Replaces the capital structure with target weights.
    #[inline]
    pub fn with_target_weights(mut self, equity_weight: f64, debt_weight: f64) -> Self {
        self.capital_structure = CapitalStructure::Target {
            equity_weight,
            debt_weight,
        };
        self
    }
}
