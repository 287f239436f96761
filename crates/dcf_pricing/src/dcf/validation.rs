//! Pre-valuation checks.
//!
//! [`validate_dcf_assumptions`] runs the shared bound tables plus the
//! cross-field invariant against the discount rate that will actually be
//! used. Errors block the valuation; warnings are carried on the result.

use dcf_core::validation::bounds;
use dcf_core::{AssumptionSet, DcfValidationError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Terminal growth above this level is flagged.
pub const HIGH_TERMINAL_GROWTH: f64 = 0.04;

/// A discount rate less than this far above terminal growth is flagged.
pub const MIN_DISCOUNT_SPREAD: f64 = 0.02;

/// Single-year revenue growth above this level is flagged.
pub const AGGRESSIVE_GROWTH: f64 = 0.50;

/// Terminal value above this share of enterprise value is flagged.
pub const TERMINAL_VALUE_SHARE_LIMIT: f64 = 0.85;

/// Non-blocking observation about a valuation's assumptions or output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValuationWarning {
    /// Terminal growth above long-run nominal GDP growth.
    HighTerminalGrowth {
        /// Terminal growth rate
        terminal_growth: f64,
    },
    /// Discount rate barely above terminal growth; terminal value is
    /// highly sensitive to either input.
    NarrowDiscountSpread {
        /// Discount rate minus terminal growth
        spread: f64,
    },
    /// A projection year grows revenue by more than half.
    AggressiveGrowth {
        /// Projection year (1-based)
        year: u32,
        /// Growth rate for that year
        growth: f64,
    },
    /// Most of the enterprise value sits in the terminal value.
    TerminalValueDominates {
        /// PV of terminal value / enterprise value
        share: f64,
    },
}

impl fmt::Display for ValuationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValuationWarning::HighTerminalGrowth { terminal_growth } => write!(
                f,
                "Terminal growth {:.2}% exceeds {:.0}%",
                terminal_growth * 100.0,
                HIGH_TERMINAL_GROWTH * 100.0
            ),
            ValuationWarning::NarrowDiscountSpread { spread } => write!(
                f,
                "Discount rate is only {:.2}pp above terminal growth",
                spread * 100.0
            ),
            ValuationWarning::AggressiveGrowth { year, growth } => write!(
                f,
                "Year {} revenue growth of {:.1}% is aggressive",
                year,
                growth * 100.0
            ),
            ValuationWarning::TerminalValueDominates { share } => write!(
                f,
                "Terminal value is {:.1}% of enterprise value",
                share * 100.0
            ),
        }
    }
}

/// Outcome of [`validate_dcf_assumptions`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    /// Blocking problems.
    pub errors: Vec<DcfValidationError>,
    /// Non-blocking observations.
    pub warnings: Vec<ValuationWarning>,
}

impl ValidationReport {
    /// Whether there are no blocking errors.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts the report into the warnings, or a single combined error.
    ///
    /// # Errors
    ///
    /// Returns the error itself when there is one, or
    /// [`DcfValidationError::Multiple`] when there are several.
    pub fn into_result(self) -> Result<Vec<ValuationWarning>, DcfValidationError> {
        match DcfValidationError::from_errors(self.errors) {
            Some(err) => Err(err),
            None => Ok(self.warnings),
        }
    }
}

/// Checks `assumptions` against `discount_rate` before any cash flow is
/// computed.
///
/// Errors:
/// - every field-level bound violation on the set
/// - `discount_rate` outside the discount-rate bounds
/// - terminal growth not strictly below `discount_rate`
///
/// Warnings: high terminal growth, narrow discount spread, aggressive
/// single-year growth. The terminal-value share warning needs the computed
/// valuation and is added by the engine.
///
/// # Examples
///
/// ```rust
/// use dcf_core::AssumptionSet;
/// use dcf_pricing::dcf::validate_dcf_assumptions;
///
/// let a = AssumptionSet::builder(vec![0.05; 5], 0.08).build().unwrap();
/// let report = validate_dcf_assumptions(&a, 0.08);
/// assert!(!report.is_valid());
///
/// let report = validate_dcf_assumptions(&a, 0.12);
/// assert!(report.is_valid());
/// assert_eq!(report.warnings.len(), 1); // terminal growth above 4%
/// ```
pub fn validate_dcf_assumptions(
    assumptions: &AssumptionSet,
    discount_rate: f64,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    report.errors.extend(
        assumptions
            .field_errors()
            .into_iter()
            .map(DcfValidationError::Field),
    );

    if let Err(e) = bounds::DISCOUNT_RATE.check(discount_rate) {
        report.errors.push(e.into());
    }

    let terminal_growth = assumptions.terminal_growth_rate();
    match terminal_growth.partial_cmp(&discount_rate) {
        Some(Ordering::Less) => {
            let spread = discount_rate - terminal_growth;
            if spread < MIN_DISCOUNT_SPREAD {
                report
                    .warnings
                    .push(ValuationWarning::NarrowDiscountSpread { spread });
            }
        }
        // Equal, above, or NaN on either side
        _ => report
            .errors
            .push(DcfValidationError::TerminalGrowthNotBelowDiscountRate {
                terminal_growth,
                discount_rate,
            }),
    }

    if terminal_growth > HIGH_TERMINAL_GROWTH {
        report
            .warnings
            .push(ValuationWarning::HighTerminalGrowth { terminal_growth });
    }

    for (i, growth) in assumptions.revenue_growth_rates().iter().enumerate() {
        if *growth > AGGRESSIVE_GROWTH {
            report.warnings.push(ValuationWarning::AggressiveGrowth {
                year: i as u32 + 1,
                growth: *growth,
            });
        }
    }

    report
}
