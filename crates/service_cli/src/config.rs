//! CLI configuration management.
//!
//! Loads `DcfConfig` from a TOML file (defaults when the file is absent),
//! applies `DCF_*` environment overrides and validates the result in one
//! pass so every problem is reported together.

use dcf_models::fcf::FcfMethod;
use dcf_models::wacc::{WaccCalculator, WaccConfig};
use dcf_pricing::dcf::DcfEngine;
use dcf_pricing::mc::{
    MonteCarloConfig, ParallelConfig, SamplingDistributions, DEFAULT_MAX_RESAMPLE_ATTEMPTS,
    DEFAULT_SIMULATIONS, MAX_RESAMPLE_ATTEMPTS, MAX_SIMULATIONS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "dcf.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Cannot read config file {}: {source}", path.display())]
    Io {
        /// Config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`DcfConfig`].
    #[error("Cannot parse config file {}: {source}", path.display())]
    Parse {
        /// Config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// One or more settings are invalid.
    #[error("Invalid configuration: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Monte Carlo settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSettings {
    /// Iterations per run
    pub n_simulations: usize,
    /// Fixed seed; random when absent
    pub seed: Option<u64>,
    /// Redraws allowed per iteration before it is counted invalid
    pub max_resample_attempts: u32,
    /// Minimum iterations per rayon task
    pub min_iterations_per_thread: usize,
    /// Sampling distributions
    pub distributions: SamplingDistributions,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            n_simulations: DEFAULT_SIMULATIONS,
            seed: None,
            max_resample_attempts: DEFAULT_MAX_RESAMPLE_ATTEMPTS,
            min_iterations_per_thread: ParallelConfig::default().min_iterations_per_thread,
            distributions: SamplingDistributions::default(),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DcfConfig {
    /// Default tracing filter directive
    pub log_level: String,
    /// Directory holding saved scenarios
    pub scenario_dir: PathBuf,
    /// FCF method requested before falling back
    pub fcf_method: FcfMethod,
    /// WACC parameters
    pub wacc: WaccConfig,
    /// Monte Carlo parameters
    pub simulation: SimulationSettings,
}

impl Default for DcfConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            scenario_dir: PathBuf::from("scenarios"),
            fcf_method: FcfMethod::Fcff,
            wacc: WaccConfig::default(),
            simulation: SimulationSettings::default(),
        }
    }
}

impl DcfConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from `path`, or defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply `DCF_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Unparseable values are collected and reported together.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        if let Some(level) = lookup("DCF_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(dir) = lookup("DCF_SCENARIO_DIR") {
            self.scenario_dir = PathBuf::from(dir);
        }
        if let Some(v) = lookup("DCF_SIMULATIONS") {
            match v.trim().parse() {
                Ok(n) => self.simulation.n_simulations = n,
                Err(_) => errors.push(format!("DCF_SIMULATIONS '{v}' is not a count")),
            }
        }
        if let Some(v) = lookup("DCF_SEED") {
            match v.trim().parse() {
                Ok(seed) => self.simulation.seed = Some(seed),
                Err(_) => errors.push(format!("DCF_SEED '{v}' is not an unsigned integer")),
            }
        }
        if let Some(v) = lookup("DCF_RISK_FREE_FALLBACK") {
            match v.trim().parse() {
                Ok(rate) => self.wacc.fallback_risk_free_rate = rate,
                Err(_) => errors.push(format!("DCF_RISK_FREE_FALLBACK '{v}' is not a number")),
            }
        }
        if let Some(v) = lookup("DCF_EQUITY_RISK_PREMIUM") {
            match v.trim().parse() {
                Ok(erp) => self.wacc.equity_risk_premium = erp,
                Err(_) => errors.push(format!("DCF_EQUITY_RISK_PREMIUM '{v}' is not a number")),
            }
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, LOG_LEVELS
            ));
        }

        if self.scenario_dir.as_os_str().is_empty() {
            errors.push("scenario_dir cannot be empty".to_string());
        }

        if let Err(e) = self.wacc.validate() {
            errors.push(format!("wacc: {e}"));
        }

        let sim = &self.simulation;
        if sim.n_simulations == 0 || sim.n_simulations > MAX_SIMULATIONS {
            errors.push(format!(
                "simulation.n_simulations {} outside [1, {}]",
                sim.n_simulations, MAX_SIMULATIONS
            ));
        }
        if sim.max_resample_attempts > MAX_RESAMPLE_ATTEMPTS {
            errors.push(format!(
                "simulation.max_resample_attempts {} exceeds {}",
                sim.max_resample_attempts, MAX_RESAMPLE_ATTEMPTS
            ));
        }
        if sim.min_iterations_per_thread == 0 {
            errors.push("simulation.min_iterations_per_thread must be greater than 0".to_string());
        }
        let d = &sim.distributions;
        for (name, dist) in [
            ("revenue_growth", d.revenue_growth),
            ("discount_rate", d.discount_rate),
            ("terminal_growth", d.terminal_growth),
            ("operating_margin", d.operating_margin),
        ] {
            if let Err(e) = dist.sampler(name) {
                errors.push(format!("simulation.distributions: {e}"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Valuation engine configured from these settings.
    pub fn engine(&self, method: Option<FcfMethod>) -> Result<DcfEngine, ConfigError> {
        let calculator = WaccCalculator::new(self.wacc)
            .map_err(|e| ConfigError::Validation(vec![format!("wacc: {e}")]))?;
        Ok(DcfEngine::new(calculator, method.unwrap_or(self.fcf_method)))
    }

    /// Monte Carlo configuration, with per-run overrides.
    pub fn monte_carlo(
        &self,
        n_simulations: Option<usize>,
        seed: Option<u64>,
    ) -> Result<MonteCarloConfig, ConfigError> {
        let sim = &self.simulation;
        MonteCarloConfig::builder()
            .n_simulations(n_simulations.unwrap_or(sim.n_simulations))
            .maybe_seed(seed.or(sim.seed))
            .max_resample_attempts(sim.max_resample_attempts)
            .distributions(sim.distributions)
            .parallel(ParallelConfig {
                min_iterations_per_thread: sim.min_iterations_per_thread,
            })
            .build()
            .map_err(|e| ConfigError::Validation(vec![e.to_string()]))
    }
}
