//! Monte Carlo uncertainty layer.
//!
//! This module provides:
//! - [`MonteCarloConfig`]: validated run configuration (builder pattern)
//! - [`Distribution`], [`SamplingDistributions`]: what is perturbed and how
//! - [`MonteCarloSimulator`]: sampling, bounded rejection, rayon fan-out
//! - [`CancellationToken`]: cooperative early stop with a partial result
//! - [`OutcomeStatistics`]: percentiles, VaR/CVaR, probability above price
//!
//! ## Invalid draws
//!
//! A draw that fails the validation layer (for instance sampled terminal
//! growth at or above the sampled discount rate) is redrawn up to
//! `max_resample_attempts` times. If every redraw fails the iteration is
//! counted as invalid and excluded. Draws are never clamped, and every
//! rejected draw is reported in [`SimulationResult::rejected_draws`].

mod cancellation;
mod config;
mod distribution;
mod error;
mod simulator;
mod statistics;

pub use cancellation::CancellationToken;
pub use config::{
    MonteCarloConfig, MonteCarloConfigBuilder, ParallelConfig, DEFAULT_MAX_RESAMPLE_ATTEMPTS,
    DEFAULT_SIMULATIONS, MAX_RESAMPLE_ATTEMPTS, MAX_SIMULATIONS,
};
pub use distribution::{Distribution, OffsetSampler, SamplingDistributions};
pub use error::{ConfigError, SimulationError};
pub use simulator::{MonteCarloSimulator, SimulationResult};
pub use statistics::{percentile, OutcomeStatistics, Percentiles, TAIL_PROBABILITY};
