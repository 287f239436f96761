//! Error types for the Monte Carlo layer.
//!
//! Configuration problems are caught when the configuration is built.
//! Runtime failures distinguish a broken base case (fatal, detected before
//! sampling) from individual invalid samples, which are only counted.

use crate::error::ValuationError;
use thiserror::Error;

/// Invalid Monte Carlo configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Simulation count outside `[1, MAX_SIMULATIONS]`.
    #[error("Invalid simulation count {0}: must be in range [1, 1_000_000]")]
    InvalidSimulationCount(usize),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Monte Carlo run failure.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimulationError {
    /// The configuration was rejected.
    #[error("Simulation configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The unperturbed assumptions cannot be valued; no sampling was done.
    #[error("Base case cannot be valued: {0}")]
    BaseCase(#[source] ValuationError),

    /// Every completed iteration was invalid.
    #[error("No valid outcomes from {completed} completed iterations (partial: {partial})")]
    NoValidOutcomes {
        /// Iterations that ran before the run ended.
        completed: usize,
        /// Whether the run was cancelled early.
        partial: bool,
    },
}
