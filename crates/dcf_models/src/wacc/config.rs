//! WACC calculator configuration.

use dcf_core::validation::{bounds, check_bounds};
use dcf_core::ValidationError;
use serde::{Deserialize, Serialize};

/// Default equity risk premium (5.5%).
pub const DEFAULT_EQUITY_RISK_PREMIUM: f64 = 0.055;

/// Risk-free rate substituted when no live rate is available (4.5%).
pub const DEFAULT_FALLBACK_RISK_FREE_RATE: f64 = 0.045;

/// Weight on the raw beta in the Blume adjustment.
pub const DEFAULT_BETA_WEIGHT: f64 = 0.67;

/// Weight on the market beta (1.0) in the Blume adjustment.
pub const DEFAULT_MARKET_BETA_WEIGHT: f64 = 0.33;

/// Lower clamp on the pre-tax cost of debt.
pub const DEFAULT_COST_OF_DEBT_FLOOR: f64 = 0.01;

/// Upper clamp on the pre-tax cost of debt.
pub const DEFAULT_COST_OF_DEBT_CAP: f64 = 0.15;

/// Tolerance on `equity_weight + debt_weight == 1`.
pub const DEFAULT_WEIGHT_TOLERANCE: f64 = 1e-6;

/// Configuration for [`WaccCalculator`](super::WaccCalculator).
///
/// # Examples
///
/// ```rust
/// use dcf_models::wacc::WaccConfig;
///
/// let config = WaccConfig::default().with_equity_risk_premium(0.06);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.equity_risk_premium, 0.06);
/// assert_eq!(config.fallback_risk_free_rate, 0.045);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaccConfig {
    /// Equity risk premium applied in CAPM.
    pub equity_risk_premium: f64,
    /// Risk-free rate used when the caller has no live rate.
    pub fallback_risk_free_rate: f64,
    /// Weight on the raw beta.
    pub beta_weight: f64,
    /// Weight on the market beta of 1.
    pub market_beta_weight: f64,
    /// Minimum pre-tax cost of debt.
    pub cost_of_debt_floor: f64,
    /// Maximum pre-tax cost of debt.
    pub cost_of_debt_cap: f64,
    /// Accepted deviation of the capital weights from summing to one.
    pub weight_tolerance: f64,
}

impl Default for WaccConfig {
    fn default() -> Self {
        Self {
            equity_risk_premium: DEFAULT_EQUITY_RISK_PREMIUM,
            fallback_risk_free_rate: DEFAULT_FALLBACK_RISK_FREE_RATE,
            beta_weight: DEFAULT_BETA_WEIGHT,
            market_beta_weight: DEFAULT_MARKET_BETA_WEIGHT,
            cost_of_debt_floor: DEFAULT_COST_OF_DEBT_FLOOR,
            cost_of_debt_cap: DEFAULT_COST_OF_DEBT_CAP,
            weight_tolerance: DEFAULT_WEIGHT_TOLERANCE,
        }
    }
}

impl WaccConfig {
    /// Builder method: set the equity risk premium.
    #[inline]
    pub fn with_equity_risk_premium(mut self, erp: f64) -> Self {
        self.equity_risk_premium = erp;
        self
    }

    /// Builder method: set the fallback risk-free rate.
    #[inline]
    pub fn with_fallback_risk_free_rate(mut self, rate: f64) -> Self {
        self.fallback_risk_free_rate = rate;
        self
    }

    /// Builder method: set the cost-of-debt clamp.
    #[inline]
    pub fn with_cost_of_debt_clamp(mut self, floor: f64, cap: f64) -> Self {
        self.cost_of_debt_floor = floor;
        self.cost_of_debt_cap = cap;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for the first field outside its bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        bounds::EQUITY_RISK_PREMIUM.check(self.equity_risk_premium)?;
        check_bounds(
            self.fallback_risk_free_rate,
            bounds::RISK_FREE_RATE.lower,
            bounds::RISK_FREE_RATE.upper,
            "fallback_risk_free_rate",
        )?;
        check_bounds(self.beta_weight, 0.0, 1.0, "beta_weight")?;
        check_bounds(self.market_beta_weight, 0.0, 1.0, "market_beta_weight")?;
        check_bounds(self.cost_of_debt_floor, 0.0, 1.0, "cost_of_debt_floor")?;
        check_bounds(
            self.cost_of_debt_cap,
            self.cost_of_debt_floor,
            1.0,
            "cost_of_debt_cap",
        )?;
        check_bounds(self.weight_tolerance, 0.0, 0.01, "weight_tolerance")?;
        Ok(())
    }
}
