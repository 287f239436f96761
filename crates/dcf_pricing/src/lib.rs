//! # dcf_pricing: Valuation Engine (Layer 3)
//!
//! ## Layer 3 Role
//!
//! dcf_pricing turns the Layer 2 models into valuations:
//! - [`dcf`]: deterministic DCF valuation, pre-valuation validation with
//!   warnings, and a discount-rate × terminal-growth sensitivity grid
//! - [`mc`]: Monte Carlo simulation over sampled assumption sets with
//!   bounded rejection sampling, cancellation and outcome statistics
//! - [`rng`]: seeded per-iteration random number generation
//!
//! ## Layer Integration
//!
//! - Layer 1 (dcf_core): `AssumptionSet`, `FinancialSnapshot`, validation
//!   layer, error taxonomy
//! - Layer 2 (dcf_models): `WaccCalculator`, `FreeCashFlowProjector`
//!
//! ## Usage Example
//!
//! ```rust
//! use dcf_core::{AssumptionSet, FinancialSnapshot};
//! use dcf_pricing::dcf::DcfEngine;
//! use dcf_pricing::mc::{MonteCarloConfig, MonteCarloSimulator};
//!
//! let snapshot = FinancialSnapshot {
//!     ticker: "ACME".to_string(),
//!     revenue: 100.0,
//!     ebit: Some(18.0),
//!     shares_outstanding: 10.0,
//!     net_debt: 20.0,
//!     current_price: Some(15.0),
//!     ..Default::default()
//! };
//! let assumptions = AssumptionSet::builder(vec![0.10, 0.08, 0.06, 0.05, 0.04], 0.025)
//!     .discount_rate(0.09)
//!     .build()
//!     .unwrap();
//!
//! let engine = DcfEngine::default();
//! let valuation = engine.evaluate(&assumptions, &snapshot).unwrap();
//! assert!(valuation.enterprise_value > 0.0);
//!
//! let config = MonteCarloConfig::builder().n_simulations(1_000).seed(42).build().unwrap();
//! let simulation = MonteCarloSimulator::new(engine, config)
//!     .run(&assumptions, &snapshot)
//!     .unwrap();
//! assert!(simulation.var_95 <= simulation.median);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod dcf;
pub mod error;
pub mod mc;
pub mod rng;

pub use dcf::{DcfEngine, ValuationResult};
pub use error::ValuationError;
pub use mc::{MonteCarloConfig, MonteCarloSimulator, SimulationError, SimulationResult};
