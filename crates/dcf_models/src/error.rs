//! Model error types.
//!
//! Structured errors for the discount-rate and projection models using
//! `thiserror` for derivation.

use dcf_core::{MissingDataError, ValidationError};
use thiserror::Error;

/// Errors that can occur while building model inputs or projecting cash flows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A single input is outside its bounds.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Required data is absent for every method in the chain.
    #[error(transparent)]
    MissingData(#[from] MissingDataError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcf_core::Bound;

    #[test]
    fn test_validation_error_passes_through() {
        let inner = ValidationError::new("raw_beta", 9.0, Bound::Range {
            lower: -1.0,
            upper: 5.0,
        });
        let err: ModelError = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());
    }

    #[test]
    fn test_missing_data_passes_through() {
        let err: ModelError = MissingDataError { attempted: vec![] }.into();
        assert!(matches!(err, ModelError::MissingData(_)));
    }
}
