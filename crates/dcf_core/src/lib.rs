//! # dcf_core: Foundation for the DCF Valuation Library
//!
//! ## Layer 1 (Foundation) Role
//!
//! dcf_core is the bottom layer of the valuation workspace, providing:
//! - The shared bounds-checking primitive and bound tables (`validation`)
//! - The immutable, construction-validated [`AssumptionSet`] (`assumptions`)
//! - The normalised input record from market-data collaborators (`snapshot`)
//! - The ordered strategy resolver used by every fallback chain (`fallback`)
//! - Error types: `ValidationError`, `DcfValidationError`, `MissingDataError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other dcf_* crates and performs no I/O:
//! - thiserror: Error derivation
//! - serde: Serialisation of records crossing the reporting boundary
//!
//! ## Usage Examples
//!
//! ```rust
//! use dcf_core::AssumptionSet;
//!
//! let assumptions = AssumptionSet::builder(vec![0.10, 0.08, 0.06, 0.05, 0.04], 0.025)
//!     .discount_rate(0.09)
//!     .tax_rate(0.21)
//!     .capex_pct_revenue(0.05)
//!     .nwc_pct_revenue(0.02)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(assumptions.projection_years(), 5);
//! assert_eq!(assumptions.discount_rate(), Some(0.09));
//!
//! // Out-of-bounds fields are rejected at construction time
//! let err = AssumptionSet::builder(vec![1.5; 5], 0.025).build().unwrap_err();
//! assert!(err.field.starts_with("revenue_growth_rates"));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod assumptions;
pub mod fallback;
pub mod snapshot;
pub mod types;
pub mod validation;

pub use assumptions::{AssumptionSet, AssumptionSetBuilder, AssumptionSetRecord};
pub use fallback::{resolve_first, Attempt, Exhausted, Resolution};
pub use snapshot::{FinancialDataProvider, FinancialSnapshot, StaticDataProvider};
pub use types::{
    Bound, DcfValidationError, FailedMethod, MissingDataError, ProviderError, ValidationError,
};
