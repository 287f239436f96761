//! Valuation error types.

use dcf_core::{DcfValidationError, MissingDataError, ValidationError};
use dcf_models::ModelError;
use thiserror::Error;

/// Reason a single valuation was aborted.
///
/// Every variant carries the underlying reason; a failed valuation never
/// yields a zero or placeholder value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    /// A single field is outside its bounds (including shares outstanding).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A cross-field invariant failed or a non-finite value was produced.
    #[error(transparent)]
    DcfValidation(#[from] DcfValidationError),

    /// No free cash flow or discount-rate method had the data it needed.
    #[error(transparent)]
    MissingData(#[from] MissingDataError),
}

impl From<ModelError> for ValuationError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(e) => ValuationError::Validation(e),
            ModelError::MissingData(e) => ValuationError::MissingData(e),
        }
    }
}

impl ValuationError {
    /// Whether this is a cross-field invariant failure.
    #[inline]
    pub fn is_dcf_validation(&self) -> bool {
        matches!(self, ValuationError::DcfValidation(_))
    }
}
