//! Save, load and delete scenarios over a [`ScenarioStore`].

use crate::error::PersistenceError;
use crate::scenario::{Scenario, ScenarioId};
use crate::store::ScenarioStore;
use chrono::{DateTime, Utc};
use dcf_core::AssumptionSet;
use dcf_pricing::ValuationResult;
use std::cmp::Reverse;
use tracing::info;

/// Append-only scenario manager.
///
/// # Examples
///
/// ```rust
/// use dcf_core::AssumptionSet;
/// use dcf_scenarios::{MemoryStore, ScenarioManager};
///
/// let mut manager = ScenarioManager::new(MemoryStore::new());
/// let assumptions = AssumptionSet::builder(vec![0.05; 5], 0.02)
///     .discount_rate(0.08)
///     .build()
///     .unwrap();
///
/// let saved = manager.save("base", "ACME", assumptions.clone(), None).unwrap();
/// let loaded = manager.load("ACME").unwrap();
/// assert_eq!(loaded[0].assumptions, assumptions);
///
/// assert!(manager.delete(saved.id).unwrap());
/// assert!(!manager.delete(saved.id).unwrap());
/// ```
#[derive(Debug)]
pub struct ScenarioManager<S> {
    store: S,
}

impl<S: ScenarioStore> ScenarioManager<S> {
    /// Creates a manager over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrows the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Saves a new record stamped with the current time.
    ///
    /// Never overwrites or deduplicates: saving the same name again creates
    /// another record.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the store could not write the record.
    pub fn save(
        &mut self,
        name: &str,
        ticker: &str,
        assumptions: AssumptionSet,
        result: Option<ValuationResult>,
    ) -> Result<Scenario, PersistenceError> {
        self.save_at(name, ticker, Utc::now(), assumptions, result)
    }

    /// Saves a new record with an explicit timestamp.
    pub fn save_at(
        &mut self,
        name: &str,
        ticker: &str,
        saved_at: DateTime<Utc>,
        assumptions: AssumptionSet,
        result: Option<ValuationResult>,
    ) -> Result<Scenario, PersistenceError> {
        let scenario = Scenario::new(name, ticker, saved_at, assumptions, result);
        self.store.insert(&scenario)?;
        info!(
            id = %scenario.id,
            path = %self.location(scenario.id),
            name = %scenario.name,
            ticker = %scenario.ticker,
            with_result = scenario.result.is_some(),
            "scenario saved"
        );
        Ok(scenario)
    }

    /// Returns every record for `ticker`, newest first.
    ///
    /// Records saved at the same instant are ordered by id so the listing
    /// is stable across calls.
    pub fn load(&self, ticker: &str) -> Result<Vec<Scenario>, PersistenceError> {
        let mut scenarios: Vec<Scenario> = self
            .store
            .scan()?
            .into_iter()
            .filter(|s| s.is_for(ticker))
            .collect();
        scenarios.sort_by_key(|s| (Reverse(s.saved_at), s.id));
        Ok(scenarios)
    }

    /// Looks up a single record by id.
    pub fn get(&self, id: ScenarioId) -> Result<Option<Scenario>, PersistenceError> {
        Ok(self.store.scan()?.into_iter().find(|s| s.id == id))
    }

    /// Deletes a record. Deleting an unknown id is a no-op that returns
    /// `false`.
    pub fn delete(&mut self, id: ScenarioId) -> Result<bool, PersistenceError> {
        let removed = self.store.remove(id)?;
        info!(id = %id, path = %self.location(id), removed, "scenario delete");
        Ok(removed)
    }

    fn location(&self, id: ScenarioId) -> String {
        self.store
            .locate(id)
            .map_or_else(|| "<memory>".to_string(), |p| p.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::Duration;

    fn assumptions(g: f64) -> AssumptionSet {
        AssumptionSet::builder(vec![g; 5], 0.02)
            .discount_rate(0.08)
            .build()
            .unwrap()
    }

    #[test]
    fn test_save_is_append_only() {
        let mut m = ScenarioManager::new(MemoryStore::new());
        let first = m.save("base", "ACME", assumptions(0.05), None).unwrap();
        let second = m.save("base", "ACME", assumptions(0.06), None).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(m.store().len(), 2);
    }

    #[test]
    fn test_load_filters_ticker_and_orders_newest_first() {
        let mut m = ScenarioManager::new(MemoryStore::new());
        let t0 = Utc::now();
        m.save_at("old", "ACME", t0, assumptions(0.05), None).unwrap();
        m.save_at("new", "acme", t0 + Duration::seconds(5), assumptions(0.06), None)
            .unwrap();
        m.save_at("other", "BETA", t0 + Duration::seconds(9), assumptions(0.07), None)
            .unwrap();

        let loaded = m.load("ACME").unwrap();
        let names: Vec<&str> = loaded.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["new", "old"]);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut m = ScenarioManager::new(MemoryStore::new());
        let kept = m.save("base", "ACME", assumptions(0.05), None).unwrap();

        assert!(!m.delete(ScenarioId::new_v4()).unwrap());
        assert_eq!(m.get(kept.id).unwrap(), Some(kept));
    }

    #[test]
    fn test_location_reported_for_saved_and_deleted_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut m = ScenarioManager::new(crate::store::JsonFileStore::open(dir.path()).unwrap());
        let saved = m.save("base", "ACME", assumptions(0.05), None).unwrap();

        let path = m.store().path_for(saved.id);
        assert!(path.exists());
        assert_eq!(m.location(saved.id), path.display().to_string());

        assert!(m.delete(saved.id).unwrap());
        assert!(!path.exists());
        assert_eq!(ScenarioManager::new(MemoryStore::new()).location(saved.id), "<memory>");
    }
}
