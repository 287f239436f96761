use super::ScenarioStore;
use crate::error::PersistenceError;
use crate::scenario::{Scenario, ScenarioId, ScenarioRecord};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

const EXTENSION: &str = "json";

/// Directory of `<id>.json` scenario files.
///
/// Each save writes to a temporary file in the target directory, flushes
/// it to disk and links it into place only if no file with that id exists.
/// A failure at any step drops the temporary file, so readers never see a
/// half-written record.
///
/// # Examples
///
/// ```rust
/// use dcf_scenarios::{JsonFileStore, ScenarioStore};
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = JsonFileStore::open(dir.path().join("scenarios")).unwrap();
/// assert!(store.scan().unwrap().is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| PersistenceError::io(&dir, e))?;
        Ok(Self { dir })
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding record `id`.
    pub fn path_for(&self, id: ScenarioId) -> PathBuf {
        self.dir.join(format!("{id}.{EXTENSION}"))
    }

    fn read_record(path: &Path) -> Result<Scenario, PersistenceError> {
        let text = fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
        let record: ScenarioRecord =
            serde_json::from_str(&text).map_err(|e| PersistenceError::serialisation(path, e))?;
        Scenario::try_from(record).map_err(|source| PersistenceError::Record {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ScenarioStore for JsonFileStore {
    fn insert(&mut self, scenario: &Scenario) -> Result<(), PersistenceError> {
        let path = self.path_for(scenario.id);
        let bytes = serde_json::to_vec_pretty(&ScenarioRecord::from(scenario.clone()))
            .map_err(|e| PersistenceError::serialisation(&path, e))?;

        let mut tmp =
            NamedTempFile::new_in(&self.dir).map_err(|e| PersistenceError::io(&self.dir, e))?;
        tmp.write_all(&bytes)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| PersistenceError::io(tmp.path(), e))?;
        tmp.persist_noclobber(&path)
            .map_err(|e| PersistenceError::io(&path, e.error))?;

        debug!(path = %path.display(), bytes = bytes.len(), "scenario file written");
        Ok(())
    }

    fn scan(&self) -> Result<Vec<Scenario>, PersistenceError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| PersistenceError::io(&self.dir, e))?;

        let mut scenarios = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| PersistenceError::io(&self.dir, e))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            scenarios.push(Self::read_record(&path)?);
        }
        Ok(scenarios)
    }

    fn remove(&mut self, id: ScenarioId) -> Result<bool, PersistenceError> {
        let path = self.path_for(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PersistenceError::io(path, e)),
        }
    }

    fn locate(&self, id: ScenarioId) -> Option<PathBuf> {
        Some(self.path_for(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dcf_core::AssumptionSet;

    fn scenario() -> Scenario {
        let a = AssumptionSet::builder(vec![0.05; 5], 0.02)
            .discount_rate(0.08)
            .build()
            .unwrap();
        Scenario::new("base", "ACME", Utc::now(), a, None)
    }

    #[test]
    fn test_insert_writes_one_file_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        let s = scenario();
        store.insert(&s).unwrap();

        assert!(store.path_for(s.id).exists());
        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_insert_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        let s = scenario();
        store.insert(&s).unwrap();

        let err = store.insert(&s).unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));
        // the failed attempt leaves no temporary file behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_scan_ignores_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.insert(&scenario()).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a scenario").unwrap();

        assert_eq!(store.scan().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("broken.json"), "{ \"id\": ").unwrap();

        let err = store.scan().unwrap_err();
        assert!(matches!(err, PersistenceError::Serialisation { .. }));
    }

    #[test]
    fn test_out_of_bounds_record_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        let s = scenario();
        store.insert(&s).unwrap();

        let path = store.path_for(s.id);
        let mut json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        json["assumptions"]["discount_rate"] = serde_json::json!(0.40);
        fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

        match store.scan().unwrap_err() {
            PersistenceError::Record { source, .. } => assert_eq!(source.field, "discount_rate"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        let s = scenario();
        store.insert(&s).unwrap();

        assert!(store.remove(s.id).unwrap());
        assert!(!store.remove(s.id).unwrap());
        assert!(store.scan().unwrap().is_empty());
    }
}
