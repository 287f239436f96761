//! Scenario command implementations
//!
//! Saves, lists and deletes scenarios in the configured scenario directory.

use crate::config::DcfConfig;
use crate::input::{load_assumptions, JsonFileProvider};
use crate::output::{render, scenario_table, OutputFormat};
use crate::{CliError, Result};
use dcf_scenarios::{JsonFileStore, Preset, ScenarioId, ScenarioManager};
use std::path::Path;

fn manager(config: &DcfConfig) -> Result<ScenarioManager<JsonFileStore>> {
    Ok(ScenarioManager::new(JsonFileStore::open(&config.scenario_dir)?))
}

/// Save a scenario.
///
/// With a snapshot the assumptions are valued first and the result is
/// stored alongside them; without one a ticker must be given.
pub fn save(
    config: &DcfConfig,
    name: &str,
    assumptions: &Path,
    snapshot: Option<&Path>,
    ticker: Option<&str>,
    preset: Option<Preset>,
    format: OutputFormat,
) -> Result<()> {
    let base = load_assumptions(assumptions)?;

    let (ticker, assumptions, result) = match snapshot {
        Some(path) => {
            let snapshot = JsonFileProvider::open(path)?.select(ticker)?;
            let assumptions = match preset {
                Some(p) => p.apply(&base, snapshot.operating_margin())?,
                None => base,
            };
            let result = config.engine(None)?.evaluate(&assumptions, &snapshot)?;
            (snapshot.ticker, assumptions, Some(result))
        }
        None => {
            let ticker = ticker.ok_or_else(|| {
                CliError::InvalidArgument("--ticker is required without --snapshot".to_string())
            })?;
            let assumptions = match preset {
                Some(p) => p.apply(&base, None)?,
                None => base,
            };
            (ticker.to_string(), assumptions, None)
        }
    };

    let saved = manager(config)?.save(name, &ticker, assumptions, result)?;
    println!(
        "{}",
        render(format, &saved, |s| scenario_table(std::slice::from_ref(s)))?
    );
    Ok(())
}

/// List scenarios for a ticker, newest first.
pub fn list(config: &DcfConfig, ticker: &str, format: OutputFormat) -> Result<()> {
    let scenarios = manager(config)?.load(ticker)?;
    println!("{}", render(format, scenarios.as_slice(), scenario_table)?);
    Ok(())
}

/// Delete a scenario by id. Unknown ids are reported, not treated as errors.
pub fn delete(config: &DcfConfig, id: ScenarioId) -> Result<()> {
    if manager(config)?.delete(id)? {
        println!("Deleted scenario {id}");
    } else {
        println!("No scenario {id}; nothing to delete");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;

    fn write_inputs(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
        let snapshot = dir.join("snapshot.json");
        fs::write(
            &snapshot,
            r#"{"ticker": "ACME", "revenue": 100.0, "ebit": 15.0, "shares_outstanding": 10.0}"#,
        )
        .unwrap();
        let assumptions = dir.join("assumptions.json");
        fs::write(
            &assumptions,
            r#"{
                "revenue_growth_rates": [0.1, 0.08, 0.06, 0.05, 0.04],
                "terminal_growth_rate": 0.025,
                "discount_rate": 0.09,
                "tax_rate": 0.21,
                "capex_pct_revenue": 0.05,
                "nwc_pct_revenue": 0.02,
                "depreciation_pct_revenue": 0.03,
                "projection_years": 5
            }"#,
        )
        .unwrap();
        (snapshot, assumptions)
    }

    fn config(dir: &Path) -> DcfConfig {
        DcfConfig {
            scenario_dir: dir.join("scenarios"),
            ..DcfConfig::default()
        }
    }

    #[test]
    fn test_save_with_snapshot_stores_result() {
        let dir = tempfile::tempdir().unwrap();
        let (snapshot, assumptions) = write_inputs(dir.path());
        let config = config(dir.path());

        save(
            &config,
            "bull case",
            &assumptions,
            Some(&snapshot),
            None,
            Some(Preset::Bull),
            OutputFormat::Json,
        )
        .unwrap();

        let loaded = manager(&config).unwrap().load("ACME").unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "bull case");
        assert!(loaded[0].result.is_some());
        assert_relative_eq!(
            loaded[0].assumptions.discount_rate().unwrap(),
            0.08,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_save_without_snapshot_needs_ticker() {
        let dir = tempfile::tempdir().unwrap();
        let (_, assumptions) = write_inputs(dir.path());
        let config = config(dir.path());

        let err = save(&config, "base", &assumptions, None, None, None, OutputFormat::Table)
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));

        save(&config, "base", &assumptions, None, Some("ACME"), None, OutputFormat::Table)
            .unwrap();
        let id = manager(&config).unwrap().load("ACME").unwrap()[0].id;
        delete(&config, id).unwrap();
        delete(&config, id).unwrap();
        assert!(manager(&config).unwrap().load("ACME").unwrap().is_empty());
    }
}
