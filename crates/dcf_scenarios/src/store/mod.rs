//! Scenario storage backends.
//!
//! - [`JsonFileStore`]: one pretty-printed JSON file per record, written
//!   atomically through a temporary file in the same directory
//! - [`MemoryStore`]: process-local store for tests and ephemeral sessions

mod json;
mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::PersistenceError;
use crate::scenario::{Scenario, ScenarioId};
use std::path::PathBuf;

/// Storage backend for [`Scenario`] records.
///
/// Records are never updated in place. `insert` must not replace an
/// existing record, and `remove` of an unknown id is not an error.
pub trait ScenarioStore {
    /// Persists a new record.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the record could not be written in
    /// full; nothing is left behind in that case.
    fn insert(&mut self, scenario: &Scenario) -> Result<(), PersistenceError>;

    /// Returns every stored record, in no particular order.
    fn scan(&self) -> Result<Vec<Scenario>, PersistenceError>;

    /// Removes a record. Returns `false` if it was not present.
    fn remove(&mut self, id: ScenarioId) -> Result<bool, PersistenceError>;

    /// File a record with `id` lives in, for stores backed by files.
    fn locate(&self, _id: ScenarioId) -> Option<PathBuf> {
        None
    }
}
