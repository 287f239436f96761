//! CLI error types.

use crate::config::ConfigError;
use dcf_core::{ProviderError, ValidationError};
use dcf_pricing::{SimulationError, ValuationError};
use dcf_scenarios::PersistenceError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input file could not be read or decoded.
    #[error("Cannot load {}: {reason}", path.display())]
    Input {
        /// Input file
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Input assumptions violate a bound.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Snapshot lookup failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Valuation failed.
    #[error(transparent)]
    Valuation(#[from] ValuationError),

    /// Simulation failed.
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// Scenario persistence failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Output could not be rendered.
    #[error("Cannot render output: {0}")]
    Output(#[from] serde_json::Error),

    /// Configuration could not be rendered.
    #[error("Cannot render configuration: {0}")]
    ConfigRender(#[from] toml::ser::Error),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
