//! # dcf_scenarios: Scenario Persistence (Layer 4)
//!
//! ## Layer 4 Role
//!
//! dcf_scenarios stores named assumption sets, with the valuation each one
//! produced, for later comparison:
//! - [`ScenarioManager`]: append-only save, newest-first load, idempotent delete
//! - [`ScenarioStore`]: storage seam with [`JsonFileStore`] and [`MemoryStore`]
//! - [`presets`]: Bear / Base / Bull shifts deriving new assumption sets
//!
//! Valuation never depends on this crate; it is consumed by the service layer.
//!
//! ## Round-trip fidelity
//!
//! A saved [`AssumptionSet`](dcf_core::AssumptionSet) loads back equal in
//! every field. Stored assumptions pass through the same validation as
//! freshly built ones, so a tampered file fails with
//! [`PersistenceError::Record`] instead of producing an invalid set.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod manager;
pub mod presets;
pub mod scenario;
pub mod store;

pub use error::PersistenceError;
pub use manager::ScenarioManager;
pub use presets::{preset_assumptions, ParsePresetError, Preset, PresetShift};
pub use scenario::{Scenario, ScenarioId, ScenarioRecord};
pub use store::{JsonFileStore, MemoryStore, ScenarioStore};
