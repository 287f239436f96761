//! Core types shared across the valuation workspace.
//!
//! This module provides:
//! - Error types: [`ValidationError`], [`DcfValidationError`], [`MissingDataError`]
//! - The [`Bound`] description attached to every validation failure

pub mod error;

pub use error::{
    Bound, DcfValidationError, FailedMethod, MissingDataError, ProviderError, ValidationError,
};
