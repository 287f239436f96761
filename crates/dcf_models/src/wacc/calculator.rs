//! WACC calculation.

use super::config::WaccConfig;
use super::inputs::{CapitalStructure, WaccInputs};
use dcf_core::fallback::resolve_first;
use dcf_core::validation::{bounds, check_bounds, check_positive};
use dcf_core::{Bound, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Where the risk-free rate came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFreeSource {
    /// Live rate supplied by the data provider.
    Live,
    /// Configured constant substituted because no live rate was available.
    Fallback,
}

impl RiskFreeSource {
    /// Resolution order.
    pub const CHAIN: [RiskFreeSource; 2] = [RiskFreeSource::Live, RiskFreeSource::Fallback];

    /// Returns the source name.
    pub fn name(&self) -> &'static str {
        match self {
            RiskFreeSource::Live => "live",
            RiskFreeSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for RiskFreeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every component of a WACC calculation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaccComponents {
    /// Risk-free rate used.
    pub risk_free_rate: f64,
    /// Where the risk-free rate came from.
    pub risk_free_source: RiskFreeSource,
    /// Raw regression beta.
    pub raw_beta: f64,
    /// Beta after shrinkage toward 1.
    pub adjusted_beta: f64,
    /// Equity risk premium.
    pub equity_risk_premium: f64,
    /// CAPM cost of equity.
    pub cost_of_equity: f64,
    /// Pre-tax cost of debt after clamping.
    pub cost_of_debt: f64,
    /// Tax rate applied to the cost of debt.
    pub tax_rate: f64,
    /// Equity share of capital.
    pub equity_weight: f64,
    /// Debt share of capital.
    pub debt_weight: f64,
    /// Weighted average cost of capital.
    pub wacc: f64,
}

impl WaccComponents {
    /// After-tax cost of debt.
    #[inline]
    pub fn after_tax_cost_of_debt(&self) -> f64 {
        self.cost_of_debt * (1.0 - self.tax_rate)
    }

    /// Whether the risk-free fallback constant was used.
    #[inline]
    pub fn risk_free_fallback_used(&self) -> bool {
        self.risk_free_source == RiskFreeSource::Fallback
    }
}

/// Derives a discount rate from CAPM and the capital structure.
///
/// Pure apart from a `warn!` event when the risk-free fallback fires.
///
/// # Examples
///
/// ```rust
/// use dcf_models::wacc::{CapitalStructure, RiskFreeSource, WaccCalculator, WaccInputs};
///
/// let inputs = WaccInputs {
///     raw_beta: 1.0,
///     risk_free_rate: None,
///     capital_structure: CapitalStructure::Observed { total_equity: 100.0, total_debt: 0.0 },
///     total_debt: 0.0,
///     interest_expense: 0.0,
///     tax_rate: 0.21,
/// };
///
/// let components = WaccCalculator::default().calculate(&inputs).unwrap();
/// assert_eq!(components.risk_free_source, RiskFreeSource::Fallback);
/// // All-equity: WACC equals cost of equity = 4.5% + 1.0 × 5.5%
/// assert!((components.wacc - 0.10).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default)]
pub struct WaccCalculator {
    config: WaccConfig,
}

impl WaccCalculator {
    /// Creates a calculator with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the configuration is invalid.
    pub fn new(config: WaccConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &WaccConfig {
        &self.config
    }

    /// Blume-adjusted beta: `beta_weight × β + market_beta_weight × 1`.
    #[inline]
    pub fn adjusted_beta(&self, raw_beta: f64) -> f64 {
        self.config.beta_weight * raw_beta + self.config.market_beta_weight
    }

    /// Pre-tax cost of debt: `interest / debt` clamped to the configured range.
    ///
    /// With no debt outstanding the ratio is taken as zero, which the floor
    /// then lifts.
    #[inline]
    pub fn cost_of_debt(&self, interest_expense: f64, total_debt: f64) -> f64 {
        let implied = if total_debt > 0.0 {
            interest_expense / total_debt
        } else {
            0.0
        };
        implied.clamp(self.config.cost_of_debt_floor, self.config.cost_of_debt_cap)
    }

    /// Calculates the WACC and all of its components.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if:
    /// - `raw_beta`, the risk-free rate or the tax rate are out of bounds
    /// - total capital is not positive
    /// - target weights are out of `[0, 1]` or do not sum to one within tolerance
    /// - the resulting WACC is outside the discount-rate bounds
    pub fn calculate(&self, inputs: &WaccInputs) -> Result<WaccComponents, ValidationError> {
        let raw_beta = bounds::RAW_BETA.check(inputs.raw_beta)?;
        let tax_rate = bounds::TAX_RATE.check(inputs.tax_rate)?;
        let equity_risk_premium =
            bounds::EQUITY_RISK_PREMIUM.check(self.config.equity_risk_premium)?;

        let (risk_free_rate, risk_free_source) = self.resolve_risk_free(inputs.risk_free_rate)?;

        let adjusted_beta = self.adjusted_beta(raw_beta);
        let cost_of_equity = risk_free_rate + adjusted_beta * equity_risk_premium;
        let cost_of_debt = self.cost_of_debt(inputs.interest_expense, inputs.total_debt);

        let (equity_weight, debt_weight) = self.weights(&inputs.capital_structure)?;

        let wacc =
            equity_weight * cost_of_equity + debt_weight * cost_of_debt * (1.0 - tax_rate);
        let wacc = bounds::WACC.check(wacc)?;

        debug!(
            risk_free_rate,
            source = %risk_free_source,
            adjusted_beta,
            cost_of_equity,
            cost_of_debt,
            equity_weight,
            debt_weight,
            wacc,
            "WACC calculated"
        );

        Ok(WaccComponents {
            risk_free_rate,
            risk_free_source,
            raw_beta,
            adjusted_beta,
            equity_risk_premium,
            cost_of_equity,
            cost_of_debt,
            tax_rate,
            equity_weight,
            debt_weight,
            wacc,
        })
    }

    fn resolve_risk_free(
        &self,
        live: Option<f64>,
    ) -> Result<(f64, RiskFreeSource), ValidationError> {
        let fallback = self.config.fallback_risk_free_rate;
        let resolution = resolve_first(&RiskFreeSource::CHAIN, |source| match source {
            RiskFreeSource::Live => live.ok_or_else(|| vec!["risk_free_rate"]),
            RiskFreeSource::Fallback => Ok(fallback),
        });

        // The fallback strategy always succeeds, so the chain cannot be exhausted.
        let (rate, source) = match resolution {
            Ok(res) => {
                if res.fallback_used() {
                    warn!(
                        fallback_rate = res.value,
                        "No live risk-free rate available; using configured fallback"
                    );
                }
                (res.value, res.selected)
            }
            Err(_) => (fallback, RiskFreeSource::Fallback),
        };

        Ok((bounds::RISK_FREE_RATE.check(rate)?, source))
    }

    fn weights(&self, structure: &CapitalStructure) -> Result<(f64, f64), ValidationError> {
        let (equity_weight, debt_weight) = match *structure {
            CapitalStructure::Observed {
                total_equity,
                total_debt,
            } => {
                check_bounds(total_equity, 0.0, f64::MAX, "total_equity")?;
                check_bounds(total_debt, 0.0, f64::MAX, "total_debt")?;
                let total = check_positive(total_equity + total_debt, "total_capital")?;
                (total_equity / total, total_debt / total)
            }
            CapitalStructure::Target {
                equity_weight,
                debt_weight,
            } => (
                check_bounds(
                    equity_weight,
                    bounds::CAPITAL_WEIGHT.lower,
                    bounds::CAPITAL_WEIGHT.upper,
                    "equity_weight",
                )?,
                check_bounds(
                    debt_weight,
                    bounds::CAPITAL_WEIGHT.lower,
                    bounds::CAPITAL_WEIGHT.upper,
                    "debt_weight",
                )?,
            ),
        };

        let sum = equity_weight + debt_weight;
        let tol = self.config.weight_tolerance;
        if (sum - 1.0).abs() > tol {
            return Err(ValidationError::new(
                "capital_weights",
                sum,
                Bound::Range {
                    lower: 1.0 - tol,
                    upper: 1.0 + tol,
                },
            ));
        }

        Ok((equity_weight, debt_weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn inputs() -> WaccInputs {
        WaccInputs {
            raw_beta: 1.2,
            risk_free_rate: Some(0.04),
            capital_structure: CapitalStructure::Observed {
                total_equity: 750.0,
                total_debt: 250.0,
            },
            total_debt: 250.0,
            interest_expense: 15.0,
            tax_rate: 0.25,
        }
    }

    #[test]
    fn test_adjusted_beta_shrinks_toward_one() {
        let calc = WaccCalculator::default();
        assert_relative_eq!(calc.adjusted_beta(1.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(calc.adjusted_beta(2.0), 1.67, epsilon = 1e-12);
        assert_relative_eq!(calc.adjusted_beta(0.5), 0.665, epsilon = 1e-12);
    }

    #[test]
    fn test_full_calculation() {
        let c = WaccCalculator::default().calculate(&inputs()).unwrap();

        let adjusted = 0.67 * 1.2 + 0.33;
        let ke = 0.04 + adjusted * 0.055;
        let kd = 15.0 / 250.0;
        let expected = 0.75 * ke + 0.25 * kd * 0.75;

        assert_eq!(c.risk_free_source, RiskFreeSource::Live);
        assert!(!c.risk_free_fallback_used());
        assert_relative_eq!(c.adjusted_beta, adjusted, epsilon = 1e-12);
        assert_relative_eq!(c.cost_of_equity, ke, epsilon = 1e-12);
        assert_relative_eq!(c.cost_of_debt, kd, epsilon = 1e-12);
        assert_relative_eq!(c.after_tax_cost_of_debt(), kd * 0.75, epsilon = 1e-12);
        assert_relative_eq!(c.equity_weight + c.debt_weight, 1.0, epsilon = 1e-12);
        assert_relative_eq!(c.wacc, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_risk_free_fallback_is_recorded() {
        let mut i = inputs();
        i.risk_free_rate = None;
        let c = WaccCalculator::default().calculate(&i).unwrap();
        assert_eq!(c.risk_free_source, RiskFreeSource::Fallback);
        assert_eq!(c.risk_free_rate, 0.045);
    }

    #[test]
    fn test_cost_of_debt_clamped() {
        let calc = WaccCalculator::default();
        // Near-zero debt with material interest would otherwise explode
        assert_eq!(calc.cost_of_debt(10.0, 1.0), 0.15);
        // Negligible interest
        assert_eq!(calc.cost_of_debt(0.0, 100.0), 0.01);
        // No debt at all
        assert_eq!(calc.cost_of_debt(5.0, 0.0), 0.01);
    }

    #[test]
    fn test_target_weights_must_sum_to_one() {
        let i = inputs().with_target_weights(0.7, 0.2);
        let err = WaccCalculator::default().calculate(&i).unwrap_err();
        assert_eq!(err.field, "capital_weights");
        assert_relative_eq!(err.value, 0.9, epsilon = 1e-12);
    }

    #[test]
    fn test_target_weights_accepted() {
        let i = inputs().with_target_weights(0.6, 0.4);
        let c = WaccCalculator::default().calculate(&i).unwrap();
        assert_eq!(c.equity_weight, 0.6);
        assert_eq!(c.debt_weight, 0.4);
    }

    #[test]
    fn test_zero_capital_rejected() {
        let mut i = inputs();
        i.capital_structure = CapitalStructure::Observed {
            total_equity: 0.0,
            total_debt: 0.0,
        };
        let err = WaccCalculator::default().calculate(&i).unwrap_err();
        assert_eq!(err.field, "total_capital");
    }

    #[test]
    fn test_beta_out_of_bounds() {
        let mut i = inputs();
        i.raw_beta = 7.0;
        let err = WaccCalculator::default().calculate(&i).unwrap_err();
        assert_eq!(err.field, "raw_beta");
    }

    #[test]
    fn test_wacc_outside_discount_bounds_rejected() {
        let mut i = inputs();
        i.raw_beta = 5.0;
        i.risk_free_rate = Some(0.15);
        i.capital_structure = CapitalStructure::Observed {
            total_equity: 1.0,
            total_debt: 0.0,
        };
        let err = WaccCalculator::default().calculate(&i).unwrap_err();
        assert_eq!(err.field, "wacc");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WaccConfig::default().with_equity_risk_premium(-0.01);
        assert!(WaccCalculator::new(config).is_err());
    }

    #[test]
    fn test_deterministic() {
        let calc = WaccCalculator::default();
        assert_eq!(calc.calculate(&inputs()), calc.calculate(&inputs()));
    }
}
