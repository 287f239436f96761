//! Error types for structured error handling.
//!
//! This module provides:
//! - `ValidationError`: A single assumption field is outside its bounds
//! - `DcfValidationError`: A cross-field invariant is violated at valuation time
//! - `MissingDataError`: No free cash flow method is viable for the supplied data
//! - `ProviderError`: A financial data collaborator could not supply a snapshot

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Description of the bound a value violated.
///
/// # Examples
/// ```
/// use dcf_core::types::Bound;
///
/// let bound = Bound::Range { lower: 0.03, upper: 0.25 };
/// assert_eq!(format!("{}", bound), "range [0.03, 0.25]");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    /// Closed interval `[lower, upper]`.
    Range {
        /// Inclusive lower bound
        lower: f64,
        /// Inclusive upper bound
        upper: f64,
    },
    /// Value must equal one of the listed values.
    OneOf(Vec<f64>),
    /// Value must be strictly positive.
    Positive,
    /// Value must be finite (not NaN or infinite).
    Finite,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Range { lower, upper } => write!(f, "range [{}, {}]", lower, upper),
            Bound::OneOf(values) => {
                let joined: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "one of {{{}}}", joined.join(", "))
            }
            Bound::Positive => write!(f, "strictly positive"),
            Bound::Finite => write!(f, "finite"),
        }
    }
}

/// A single field failed its bounds check.
///
/// Raised by the validation primitive in [`crate::validation`]; names the
/// field and the bound that was violated.
///
/// # Examples
/// ```
/// use dcf_core::types::{Bound, ValidationError};
///
/// let err = ValidationError::new("tax_rate", 0.9, Bound::Range { lower: 0.0, upper: 0.6 });
/// assert_eq!(
///     format!("{}", err),
///     "Validation failed for 'tax_rate': 0.9 violates range [0, 0.6]"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Validation failed for '{field}': {value} violates {bound}")]
pub struct ValidationError {
    /// Name of the offending field (may carry an index, e.g. `revenue_growth_rates[2]`)
    pub field: String,
    /// Offending value
    pub value: f64,
    /// The violated bound
    pub bound: Bound,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, value: f64, bound: Bound) -> Self {
        Self {
            field: field.into(),
            value,
            bound,
        }
    }
}

/// Cross-field invariant violations detected at valuation time.
///
/// Aborts a single valuation. Inside a Monte Carlo run it only excludes the
/// offending sample.
///
/// # Examples
/// ```
/// use dcf_core::types::DcfValidationError;
///
/// let err = DcfValidationError::TerminalGrowthNotBelowDiscountRate {
///     terminal_growth: 0.08,
///     discount_rate: 0.08,
/// };
/// assert!(format!("{}", err).contains("strictly below"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DcfValidationError {
    /// Terminal growth is not strictly below the discount rate.
    #[error(
        "Terminal growth rate {terminal_growth} must be strictly below discount rate {discount_rate}"
    )]
    TerminalGrowthNotBelowDiscountRate {
        /// Terminal growth rate
        terminal_growth: f64,
        /// Discount rate (WACC)
        discount_rate: f64,
    },

    /// An intermediate or final quantity was NaN or infinite.
    #[error("Non-finite {field} produced during valuation")]
    NonFinite {
        /// Name of the quantity
        field: &'static str,
    },

    /// A field-level bound re-checked at valuation time failed.
    #[error(transparent)]
    Field(#[from] ValidationError),

    /// Several errors were found in one validation pass.
    #[error("{} DCF validation errors: {}", .0.len(), join_errors(.0))]
    Multiple(Vec<DcfValidationError>),
}

impl DcfValidationError {
    /// Collapses a list of errors into a single error.
    ///
    /// Returns `None` for an empty list, the error itself for a single
    /// entry, and [`DcfValidationError::Multiple`] otherwise.
    pub fn from_errors(mut errors: Vec<DcfValidationError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Multiple(errors)),
        }
    }
}

fn join_errors(errors: &[DcfValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// One failed strategy in an exhausted fallback chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedMethod {
    /// Strategy name
    pub method: String,
    /// Inputs that were absent
    pub missing: Vec<String>,
}

impl fmt::Display for FailedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [missing: {}]", self.method, self.missing.join(", "))
    }
}

/// No calculation method in a fallback chain could be computed from the
/// supplied data (e.g. every free cash flow method).
///
/// Names every method that was attempted together with the inputs it lacked.
///
/// # Examples
/// ```
/// use dcf_core::types::{MissingDataError, error::FailedMethod};
///
/// let err = MissingDataError {
///     attempted: vec![FailedMethod {
///         method: "Simple".to_string(),
///         missing: vec!["operating_cash_flow".to_string()],
///     }],
/// };
/// assert!(format!("{}", err).contains("Simple [missing: operating_cash_flow]"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "No viable calculation method for the supplied data; attempted: {}",
    join_methods(.attempted)
)]
pub struct MissingDataError {
    /// Every method attempted, in order
    pub attempted: Vec<FailedMethod>,
}

impl MissingDataError {
    /// Returns the names of the attempted methods in order.
    pub fn method_names(&self) -> Vec<&str> {
        self.attempted.iter().map(|m| m.method.as_str()).collect()
    }
}

fn join_methods(methods: &[FailedMethod]) -> String {
    methods
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failure reported by a financial data collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// No snapshot is available for the ticker.
    #[error("No financial snapshot available for ticker: {0}")]
    UnknownTicker(String),

    /// The provider could not read or decode its source.
    #[error("Financial data source unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_field_and_bound() {
        let err = ValidationError::new(
            "discount_rate",
            0.30,
            Bound::Range {
                lower: 0.03,
                upper: 0.25,
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("discount_rate"));
        assert!(msg.contains("[0.03, 0.25]"));
    }

    #[test]
    fn test_bound_display_one_of() {
        let bound = Bound::OneOf(vec![5.0, 7.0, 10.0]);
        assert_eq!(bound.to_string(), "one of {5, 7, 10}");
    }

    #[test]
    fn test_from_errors_collapses() {
        assert_eq!(DcfValidationError::from_errors(vec![]), None);

        let single = DcfValidationError::NonFinite {
            field: "terminal_value",
        };
        assert_eq!(
            DcfValidationError::from_errors(vec![single.clone()]),
            Some(single.clone())
        );

        let many = DcfValidationError::from_errors(vec![single.clone(), single]).unwrap();
        assert!(matches!(many, DcfValidationError::Multiple(ref v) if v.len() == 2));
        assert!(many.to_string().starts_with("2 DCF validation errors"));
    }

    #[test]
    fn test_field_error_is_transparent() {
        let inner = ValidationError::new("tax_rate", -0.1, Bound::Range {
            lower: 0.0,
            upper: 0.6,
        });
        let err: DcfValidationError = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());
    }

    #[test]
    fn test_missing_data_lists_every_method() {
        let err = MissingDataError {
            attempted: vec![
                FailedMethod {
                    method: "FCFF".to_string(),
                    missing: vec!["operating_margin".to_string()],
                },
                FailedMethod {
                    method: "Levered".to_string(),
                    missing: vec![
                        "operating_cash_flow".to_string(),
                        "interest_expense".to_string(),
                    ],
                },
            ],
        };
        assert_eq!(err.method_names(), vec!["FCFF", "Levered"]);
        let msg = err.to_string();
        assert!(msg.contains("FCFF [missing: operating_margin]"));
        assert!(msg.contains("Levered [missing: operating_cash_flow, interest_expense]"));
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::UnknownTicker("ACME".to_string());
        assert_eq!(err.to_string(), "No financial snapshot available for ticker: ACME");
    }
}
