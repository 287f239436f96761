//! # dcf_models: Discount Rate and Cash Flow Models (Layer 2)
//!
//! Provides the two models the valuation engine combines:
//!
//! - [`wacc`]: CAPM cost of equity with Blume-adjusted beta, bounded cost of
//!   debt, and capital-structure weighting into a WACC
//! - [`fcf`]: multi-year revenue and free cash flow projection under four
//!   selectable methods with a recorded fallback chain
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            dcf_models (L2)              │
//! ├─────────────────────────────────────────┤
//! │  wacc/  - WaccCalculator, WaccConfig,   │
//! │           WaccInputs, WaccComponents    │
//! │  fcf/   - FcfMethod, FreeCashFlowProjector,
//! │           CashFlowProjection            │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │             dcf_core (L1)               │
//! │  AssumptionSet, validation, fallback    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Both models are pure functions of their inputs. The only side effect is
//! `tracing` output when a fallback fires.
//!
//! ## Example
//!
//! ```
//! use dcf_core::{AssumptionSet, FinancialSnapshot};
//! use dcf_models::fcf::{FcfMethod, FreeCashFlowProjector};
//! use dcf_models::wacc::{WaccCalculator, WaccInputs};
//!
//! let snapshot = FinancialSnapshot {
//!     ticker: "ACME".to_string(),
//!     revenue: 100.0,
//!     ebit: Some(15.0),
//!     shares_outstanding: 10.0,
//!     current_price: Some(50.0),
//!     raw_beta: Some(1.2),
//!     total_debt: 100.0,
//!     interest_expense: Some(5.0),
//!     risk_free_rate: Some(0.04),
//!     ..Default::default()
//! };
//!
//! let inputs = WaccInputs::from_snapshot(&snapshot, 0.21).unwrap();
//! let wacc = WaccCalculator::default().calculate(&inputs).unwrap();
//! assert!(wacc.wacc > 0.03 && wacc.wacc < 0.25);
//!
//! let assumptions = AssumptionSet::builder(vec![0.05; 5], 0.02).build().unwrap();
//! let projection = FreeCashFlowProjector::new(FcfMethod::Fcff)
//!     .project(&assumptions, &snapshot)
//!     .unwrap();
//! assert_eq!(projection.len(), 5);
//! assert_eq!(projection.method(), FcfMethod::Fcff);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod fcf;
pub mod wacc;

pub use error::ModelError;
pub use fcf::{CashFlowProjection, FcfMethod, FreeCashFlowProjector, ProjectedYear};
pub use wacc::{
    CapitalStructure, RiskFreeSource, WaccCalculator, WaccComponents, WaccConfig, WaccInputs,
};
