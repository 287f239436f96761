//! Value-per-share sensitivity to discount rate and terminal growth.
//!
//! The explicit projection does not depend on either axis, so it is built
//! once and every cell is valued through
//! [`DcfEngine::evaluate_with`](super::DcfEngine::evaluate_with). Cells where
//! terminal growth is not below the discount rate (or either value is out of
//! bounds) are `None`; no division is attempted for them.

use super::engine::{DcfEngine, DiscountRate};
use crate::error::ValuationError;
use dcf_core::validation::check_positive;
use dcf_core::{AssumptionSet, FinancialSnapshot};
use serde::{Deserialize, Serialize};

/// Axis values for a sensitivity grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensitivityAxes {
    /// Discount rates (rows).
    pub discount_rates: Vec<f64>,
    /// Terminal growth rates (columns).
    pub terminal_growth_rates: Vec<f64>,
}

impl SensitivityAxes {
    /// Symmetric axes of `2 × steps + 1` points around a centre.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dcf_pricing::dcf::SensitivityAxes;
    ///
    /// let axes = SensitivityAxes::centred(0.09, 0.025, 0.01, 0.005, 2);
    /// assert_eq!(axes.discount_rates.len(), 5);
    /// assert!((axes.discount_rates[0] - 0.07).abs() < 1e-12);
    /// assert!((axes.terminal_growth_rates[4] - 0.035).abs() < 1e-12);
    /// ```
    pub fn centred(
        discount_rate: f64,
        terminal_growth: f64,
        rate_step: f64,
        growth_step: f64,
        steps: usize,
    ) -> Self {
        let axis = |centre: f64, step: f64| {
            let steps = steps as i64;
            (-steps..=steps)
                .map(|k| centre + k as f64 * step)
                .collect::<Vec<_>>()
        };
        Self {
            discount_rates: axis(discount_rate, rate_step),
            terminal_growth_rates: axis(terminal_growth, growth_step),
        }
    }
}

/// Value per share for every (discount rate, terminal growth) pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensitivityGrid {
    /// Row and column values.
    pub axes: SensitivityAxes,
    /// `values[row][column]`; `None` where the pair is not valuable.
    pub values: Vec<Vec<Option<f64>>>,
}

impl SensitivityGrid {
    /// Looks up a cell.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(column)).copied().flatten()
    }

    /// Number of cells holding a value.
    pub fn valid_cells(&self) -> usize {
        self.values.iter().flatten().filter(|v| v.is_some()).count()
    }
}

/// Builds a sensitivity grid around `assumptions`.
///
/// # Errors
///
/// Returns [`ValuationError`] only for failures common to every cell:
/// no viable FCF method or a non-positive share count.
pub fn sensitivity_grid(
    engine: &DcfEngine,
    assumptions: &AssumptionSet,
    snapshot: &FinancialSnapshot,
    axes: &SensitivityAxes,
) -> Result<SensitivityGrid, ValuationError> {
    check_positive(snapshot.shares_outstanding, "shares_outstanding")?;
    let projection = engine.project(assumptions, snapshot)?;

    let values: Vec<Vec<Option<f64>>> = axes
        .discount_rates
        .iter()
        .map(|&rate| {
            axes.terminal_growth_rates
                .iter()
                .map(|&growth| {
                    let cell = assumptions
                        .to_builder()
                        .discount_rate(rate)
                        .terminal_growth_rate(growth)
                        .build()
                        .ok()?;
                    engine
                        .evaluate_with(
                            &cell,
                            snapshot,
                            &projection,
                            DiscountRate { rate, wacc: None },
                        )
                        .ok()
                        .map(|r| r.value_per_share)
                })
                .collect()
        })
        .collect();

    Ok(SensitivityGrid {
        axes: axes.clone(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn snapshot() -> FinancialSnapshot {
        FinancialSnapshot {
            ticker: "ACME".to_string(),
            revenue: 100.0,
            ebit: Some(20.0),
            shares_outstanding: 10.0,
            ..Default::default()
        }
    }

    fn assumptions() -> AssumptionSet {
        AssumptionSet::builder(vec![0.05; 5], 0.02)
            .discount_rate(0.09)
            .build()
            .unwrap()
    }

    #[test]
    fn test_centre_cell_matches_direct_valuation() {
        let engine = DcfEngine::default();
        let axes = SensitivityAxes::centred(0.09, 0.02, 0.01, 0.005, 2);
        let grid = sensitivity_grid(&engine, &assumptions(), &snapshot(), &axes).unwrap();
        let direct = engine.evaluate(&assumptions(), &snapshot()).unwrap();
        assert_relative_eq!(grid.get(2, 2).unwrap(), direct.value_per_share, epsilon = 1e-9);
    }

    #[test]
    fn test_value_falls_with_discount_rate_and_rises_with_growth() {
        let axes = SensitivityAxes::centred(0.10, 0.02, 0.01, 0.005, 1);
        let grid =
            sensitivity_grid(&DcfEngine::default(), &assumptions(), &snapshot(), &axes).unwrap();
        assert!(grid.get(0, 1).unwrap() > grid.get(2, 1).unwrap());
        assert!(grid.get(1, 2).unwrap() > grid.get(1, 0).unwrap());
    }

    #[test]
    fn test_invalid_cells_are_none() {
        let axes = SensitivityAxes {
            discount_rates: vec![0.04, 0.08],
            terminal_growth_rates: vec![0.02, 0.04, 0.06],
        };
        let grid =
            sensitivity_grid(&DcfEngine::default(), &assumptions(), &snapshot(), &axes).unwrap();
        assert!(grid.get(0, 0).is_some());
        assert!(grid.get(0, 1).is_none()); // equal
        assert!(grid.get(0, 2).is_none()); // above
        assert_eq!(grid.valid_cells(), 4);
    }
}
