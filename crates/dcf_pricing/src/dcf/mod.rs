//! Deterministic DCF valuation.
//!
//! This module provides:
//! - [`validate_dcf_assumptions`]: pre-valuation errors and warnings
//! - [`DcfEngine`]: projection, discounting, terminal value, equity bridge
//! - [`sensitivity_grid`]: value per share across discount rate and
//!   terminal growth
//!
//! ```text
//! TV        = FCF_N × (1 + g) / (r − g)          requires r > g
//! PV_fcf    = Σ FCF_t / (1 + r)^t
//! PV_tv     = TV / (1 + r)^N
//! EV        = PV_fcf + PV_tv
//! Equity    = EV − net debt + cash
//! Per share = Equity / shares outstanding
//! ```

mod engine;
mod sensitivity;
mod validation;

pub use engine::{DcfEngine, DiscountRate, ValuationResult};
pub use sensitivity::{sensitivity_grid, SensitivityAxes, SensitivityGrid};
pub use validation::{
    validate_dcf_assumptions, ValidationReport, ValuationWarning, AGGRESSIVE_GROWTH,
    HIGH_TERMINAL_GROWTH, MIN_DISCOUNT_SPREAD, TERMINAL_VALUE_SHARE_LIMIT,
};
