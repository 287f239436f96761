use super::ScenarioStore;
use crate::error::PersistenceError;
use crate::scenario::{Scenario, ScenarioId};

/// In-memory scenario store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: Vec<Scenario>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ScenarioStore for MemoryStore {
    fn insert(&mut self, scenario: &Scenario) -> Result<(), PersistenceError> {
        self.records.push(scenario.clone());
        Ok(())
    }

    fn scan(&self) -> Result<Vec<Scenario>, PersistenceError> {
        Ok(self.records.clone())
    }

    fn remove(&mut self, id: ScenarioId) -> Result<bool, PersistenceError> {
        let before = self.records.len();
        self.records.retain(|s| s.id != id);
        Ok(self.records.len() != before)
    }
}
