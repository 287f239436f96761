//! Free cash flow projection.
//!
//! This module provides:
//! - [`FcfMethod`]: the four FCF definitions and their fixed fallback order
//! - [`FreeCashFlowProjector`]: projects revenue and FCF over the horizon
//! - [`CashFlowProjection`]: the per-year output, recording the method used
//!
//! For year `t = 1..N`:
//!
//! ```text
//! revenue_t  = revenue_{t-1} × (1 + g_t)
//! ebit_t     = revenue_t × operating_margin
//! nopat_t    = ebit_t × (1 − tax)
//! D_t, capex_t, ΔNWC_t = pct × revenue_t
//! ```
//!
//! Interest expense is held flat at its base-year level.

mod method;
mod projection;
mod projector;

pub use method::{FcfMethod, ParseFcfMethodError};
pub use projection::{CashFlowProjection, ProjectedYear};
pub use projector::FreeCashFlowProjector;
