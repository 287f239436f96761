//! Shared bounds-checking layer.
//!
//! Every assumption check in the workspace is routed through the primitives
//! in this module so that single valuations and every Monte Carlo sample are
//! held to identical bound tables.
//!
//! # Primitives
//!
//! - [`check_bounds`]: closed-interval check, returns the value unchanged
//! - [`check_one_of`]: set-membership check (e.g. projection horizons)
//! - [`check_positive`]: strict positivity (e.g. shares outstanding)
//! - [`check_finite`]: rejects NaN and infinities
//!
//! # Bound Tables
//!
//! Named [`FieldBounds`] constants live in [`bounds`].
//!
//! ```rust
//! use dcf_core::validation::{bounds, check_bounds};
//!
//! assert_eq!(check_bounds(0.09, 0.03, 0.25, "wacc").unwrap(), 0.09);
//! assert!(bounds::DISCOUNT_RATE.check(0.30).is_err());
//! ```

pub mod bounds;

pub use bounds::FieldBounds;

use crate::types::{Bound, ValidationError};

/// Checks `value` against the closed interval `[lower, upper]`.
///
/// Returns the value unchanged on success. NaN and infinities are rejected
/// with [`Bound::Finite`] before the interval is considered.
///
/// # Errors
///
/// Returns [`ValidationError`] naming `field` and the violated bound.
///
/// # Examples
///
/// ```rust
/// use dcf_core::validation::check_bounds;
///
/// assert!(check_bounds(0.5, 0.0, 1.0, "tax_rate").is_ok());
/// let err = check_bounds(1.5, 0.0, 1.0, "tax_rate").unwrap_err();
/// assert_eq!(err.field, "tax_rate");
/// ```
#[inline]
pub fn check_bounds(
    value: f64,
    lower: f64,
    upper: f64,
    field: impl Into<String>,
) -> Result<f64, ValidationError> {
    let field = field.into();
    let value = check_finite(value, field.clone())?;
    if value < lower || value > upper {
        return Err(ValidationError::new(field, value, Bound::Range { lower, upper }));
    }
    Ok(value)
}

/// Checks that `value` is finite.
///
/// # Errors
///
/// Returns [`ValidationError`] with [`Bound::Finite`] for NaN or infinities.
#[inline]
pub fn check_finite(value: f64, field: impl Into<String>) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::new(field, value, Bound::Finite))
    }
}

/// Checks that `value` is strictly positive.
///
/// # Errors
///
/// Returns [`ValidationError`] with [`Bound::Positive`].
#[inline]
pub fn check_positive(value: f64, field: impl Into<String>) -> Result<f64, ValidationError> {
    let field = field.into();
    let value = check_finite(value, field.clone())?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::new(field, value, Bound::Positive))
    }
}

/// Checks that `value` is one of `allowed`.
///
/// # Errors
///
/// Returns [`ValidationError`] with [`Bound::OneOf`].
///
/// # Examples
///
/// ```rust
/// use dcf_core::validation::check_one_of;
///
/// assert_eq!(check_one_of(7, &[5, 7, 10], "projection_years").unwrap(), 7);
/// assert!(check_one_of(6, &[5, 7, 10], "projection_years").is_err());
/// ```
#[inline]
pub fn check_one_of(
    value: u32,
    allowed: &[u32],
    field: impl Into<String>,
) -> Result<u32, ValidationError> {
    if allowed.contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::new(
            field,
            f64::from(value),
            Bound::OneOf(allowed.iter().map(|&v| f64::from(v)).collect()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_bounds_inclusive() {
        assert_eq!(check_bounds(0.03, 0.03, 0.25, "wacc").unwrap(), 0.03);
        assert_eq!(check_bounds(0.25, 0.03, 0.25, "wacc").unwrap(), 0.25);
    }

    #[test]
    fn test_check_bounds_rejects_outside() {
        let err = check_bounds(0.26, 0.03, 0.25, "wacc").unwrap_err();
        assert_eq!(err.field, "wacc");
        assert_eq!(err.value, 0.26);
        assert_eq!(
            err.bound,
            Bound::Range {
                lower: 0.03,
                upper: 0.25
            }
        );
    }

    #[test]
    fn test_check_bounds_rejects_nan() {
        let err = check_bounds(f64::NAN, 0.0, 1.0, "tax_rate").unwrap_err();
        assert_eq!(err.bound, Bound::Finite);
    }

    #[test]
    fn test_check_positive() {
        assert!(check_positive(1.0, "shares_outstanding").is_ok());
        let err = check_positive(0.0, "shares_outstanding").unwrap_err();
        assert_eq!(err.bound, Bound::Positive);
        assert!(check_positive(-5.0, "shares_outstanding").is_err());
        assert!(check_positive(f64::INFINITY, "shares_outstanding").is_err());
    }

    #[test]
    fn test_check_one_of() {
        let err = check_one_of(8, &[5, 7, 10], "projection_years").unwrap_err();
        assert_eq!(err.bound, Bound::OneOf(vec![5.0, 7.0, 10.0]));
    }
}
