//! Weighted average cost of capital.
//!
//! This module derives the discount rate used by the valuation engine:
//!
//! 1. Resolve the risk-free rate (live value, else the configured constant,
//!    with the fallback recorded and logged)
//! 2. Shrink the raw beta toward the market: `0.67 × β + 0.33`
//! 3. CAPM cost of equity: `rf + β_adj × ERP`
//! 4. Cost of debt: `interest / debt`, clamped to `[1%, 15%]`
//! 5. `WACC = w_E × k_E + w_D × k_D × (1 − t)`
//!
//! # Architecture
//!
//! ```text
//! WaccCalculator
//! ├── WaccConfig      (ERP, fallback risk-free rate, shrinkage, debt clamp)
//! ├── WaccInputs      (beta, risk-free rate, capital structure, interest, tax)
//! └── WaccComponents  (every intermediate plus the final rate)
//! ```

mod calculator;
mod config;
mod inputs;

pub use calculator::{RiskFreeSource, WaccCalculator, WaccComponents};
pub use config::{
    WaccConfig, DEFAULT_EQUITY_RISK_PREMIUM, DEFAULT_FALLBACK_RISK_FREE_RATE,
};
pub use inputs::{CapitalStructure, WaccInputs};
