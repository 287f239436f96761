//! JSON input files.
//!
//! A snapshot file holds either one [`FinancialSnapshot`] object or an array
//! of them; an assumptions file holds one assumption set in its record form.

use crate::{CliError, Result};
use dcf_core::{
    AssumptionSet, AssumptionSetRecord, FinancialDataProvider, FinancialSnapshot, ProviderError,
    StaticDataProvider,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Many(Vec<FinancialSnapshot>),
    One(FinancialSnapshot),
}

/// [`FinancialDataProvider`] backed by a JSON file.
#[derive(Debug)]
pub struct JsonFileProvider {
    path: PathBuf,
    tickers: Vec<String>,
    inner: StaticDataProvider,
}

impl JsonFileProvider {
    /// Reads every snapshot in `path`.
    pub fn open(path: &Path) -> std::result::Result<Self, ProviderError> {
        let unavailable = |reason: String| {
            ProviderError::Unavailable(format!("{}: {}", path.display(), reason))
        };
        let text = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let file: SnapshotFile =
            serde_json::from_str(&text).map_err(|e| unavailable(e.to_string()))?;
        let snapshots = match file {
            SnapshotFile::Many(v) => v,
            SnapshotFile::One(s) => vec![s],
        };

        let tickers = snapshots.iter().map(|s| s.ticker.clone()).collect();
        let inner = snapshots
            .into_iter()
            .fold(StaticDataProvider::new(), StaticDataProvider::with_snapshot);
        Ok(Self {
            path: path.to_path_buf(),
            tickers,
            inner,
        })
    }

    /// The snapshot for `ticker`, or the only snapshot in the file.
    pub fn select(&self, ticker: Option<&str>) -> Result<FinancialSnapshot> {
        match (ticker, self.tickers.as_slice()) {
            (Some(t), _) => Ok(self.snapshot(t)?),
            (None, [only]) => Ok(self.snapshot(only)?),
            (None, many) => Err(CliError::InvalidArgument(format!(
                "{} holds {} snapshots; pass --ticker",
                self.path.display(),
                many.len()
            ))),
        }
    }
}

impl FinancialDataProvider for JsonFileProvider {
    fn snapshot(&self, ticker: &str) -> std::result::Result<FinancialSnapshot, ProviderError> {
        self.inner.snapshot(ticker)
    }
}

/// Reads and validates an assumption set.
pub fn load_assumptions(path: &Path) -> Result<AssumptionSet> {
    let text = std::fs::read_to_string(path).map_err(|e| CliError::Input {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let record: AssumptionSetRecord = serde_json::from_str(&text).map_err(|e| CliError::Input {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(AssumptionSet::try_from(record)?)
}
