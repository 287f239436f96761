//! Monte Carlo simulation configuration.
//!
//! This module provides the configuration type and builder for Monte Carlo
//! valuation runs.

use super::distribution::{Samplers, SamplingDistributions};
use super::error::ConfigError;

/// Maximum number of simulation iterations allowed.
pub const MAX_SIMULATIONS: usize = 1_000_000;

/// Default number of simulation iterations.
pub const DEFAULT_SIMULATIONS: usize = 10_000;

/// Default bound on redraws per iteration after an invalid draw.
pub const DEFAULT_MAX_RESAMPLE_ATTEMPTS: u32 = 5;

/// Upper bound accepted for `max_resample_attempts`.
pub const MAX_RESAMPLE_ATTEMPTS: u32 = 100;

/// When to fan iterations out over the rayon pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Minimum iterations per thread before parallelisation kicks in.
    pub min_iterations_per_thread: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            min_iterations_per_thread: 64,
        }
    }
}

impl ParallelConfig {
    /// Never parallelise.
    pub fn sequential() -> Self {
        Self {
            min_iterations_per_thread: usize::MAX,
        }
    }

    /// Determines if parallelisation should be used for the given count.
    #[inline]
    pub fn should_parallelise(&self, n_iterations: usize) -> bool {
        let n_threads = rayon::current_num_threads();
        n_threads > 1 && n_iterations >= self.min_iterations_per_thread.saturating_mul(n_threads)
    }
}

/// Monte Carlo simulation configuration.
///
/// Immutable; use [`MonteCarloConfigBuilder`] to construct instances.
/// Distributions are validated and compiled at build time.
///
/// # Examples
///
/// ```rust
/// use dcf_pricing::mc::{Distribution, MonteCarloConfig, SamplingDistributions};
///
/// let config = MonteCarloConfig::builder()
///     .n_simulations(5_000)
///     .seed(42)
///     .distributions(SamplingDistributions {
///         discount_rate: Distribution::Uniform { half_width: 0.01 },
///         ..Default::default()
///     })
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_simulations(), 5_000);
/// assert_eq!(config.seed(), Some(42));
/// assert_eq!(config.max_resample_attempts(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloConfig {
    n_simulations: usize,
    seed: Option<u64>,
    max_resample_attempts: u32,
    distributions: SamplingDistributions,
    samplers: Samplers,
    parallel: ParallelConfig,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Number of iterations requested.
    #[inline]
    pub fn n_simulations(&self) -> usize {
        self.n_simulations
    }

    /// Optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Redraws allowed per iteration after an invalid draw.
    #[inline]
    pub fn max_resample_attempts(&self) -> u32 {
        self.max_resample_attempts
    }

    /// Sampling distributions.
    #[inline]
    pub fn distributions(&self) -> &SamplingDistributions {
        &self.distributions
    }

    /// Parallelisation settings.
    #[inline]
    pub fn parallel(&self) -> ParallelConfig {
        self.parallel
    }

    #[inline]
    pub(crate) fn samplers(&self) -> &Samplers {
        &self.samplers
    }
}

/// Builder for [`MonteCarloConfig`].
#[derive(Clone, Debug)]
pub struct MonteCarloConfigBuilder {
    n_simulations: usize,
    seed: Option<u64>,
    max_resample_attempts: u32,
    distributions: SamplingDistributions,
    parallel: ParallelConfig,
}

impl Default for MonteCarloConfigBuilder {
    fn default() -> Self {
        Self {
            n_simulations: DEFAULT_SIMULATIONS,
            seed: None,
            max_resample_attempts: DEFAULT_MAX_RESAMPLE_ATTEMPTS,
            distributions: SamplingDistributions::default(),
            parallel: ParallelConfig::default(),
        }
    }
}

impl MonteCarloConfigBuilder {
    /// Sets the number of iterations, in `[1, 1_000_000]`.
    #[inline]
    pub fn n_simulations(mut self, n_simulations: usize) -> Self {
        self.n_simulations = n_simulations;
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets an optional seed; `None` draws a fresh seed per run.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the bound on redraws per iteration.
    #[inline]
    pub fn max_resample_attempts(mut self, attempts: u32) -> Self {
        self.max_resample_attempts = attempts;
        self
    }

    /// Sets the sampling distributions.
    #[inline]
    pub fn distributions(mut self, distributions: SamplingDistributions) -> Self {
        self.distributions = distributions;
        self
    }

    /// Sets the parallelisation settings.
    #[inline]
    pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_simulations` is 0 or greater than 1,000,000
    /// - `max_resample_attempts` exceeds 100
    /// - any distribution has invalid parameters
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        if self.n_simulations == 0 || self.n_simulations > MAX_SIMULATIONS {
            return Err(ConfigError::InvalidSimulationCount(self.n_simulations));
        }
        if self.max_resample_attempts > MAX_RESAMPLE_ATTEMPTS {
            return Err(ConfigError::InvalidParameter {
                name: "max_resample_attempts",
                reason: format!(
                    "{} exceeds the maximum of {}",
                    self.max_resample_attempts, MAX_RESAMPLE_ATTEMPTS
                ),
            });
        }
        let samplers = self.distributions.compile()?;

        Ok(MonteCarloConfig {
            n_simulations: self.n_simulations,
            seed: self.seed,
            max_resample_attempts: self.max_resample_attempts,
            distributions: self.distributions,
            samplers,
            parallel: self.parallel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::Distribution;

    #[test]
    fn test_defaults() {
        let config = MonteCarloConfig::builder().build().unwrap();
        assert_eq!(config.n_simulations(), DEFAULT_SIMULATIONS);
        assert_eq!(config.seed(), None);
        assert_eq!(config.max_resample_attempts(), 5);
        assert_eq!(config.distributions(), &SamplingDistributions::default());
    }

    #[test]
    fn test_simulation_count_bounds() {
        assert_eq!(
            MonteCarloConfig::builder().n_simulations(0).build().unwrap_err(),
            ConfigError::InvalidSimulationCount(0)
        );
        assert!(MonteCarloConfig::builder()
            .n_simulations(MAX_SIMULATIONS + 1)
            .build()
            .is_err());
        assert!(MonteCarloConfig::builder().n_simulations(1).build().is_ok());
        assert!(MonteCarloConfig::builder()
            .n_simulations(MAX_SIMULATIONS)
            .build()
            .is_ok());
    }

    #[test]
    fn test_invalid_distribution_rejected_at_build() {
        let err = MonteCarloConfig::builder()
            .distributions(SamplingDistributions {
                discount_rate: Distribution::Normal { std_dev: -1.0 },
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { name: "discount_rate", .. }));
    }

    #[test]
    fn test_resample_bound() {
        assert!(MonteCarloConfig::builder()
            .max_resample_attempts(101)
            .build()
            .is_err());
        assert!(MonteCarloConfig::builder()
            .max_resample_attempts(0)
            .build()
            .is_ok());
    }

    #[test]
    fn test_sequential_never_parallelises() {
        assert!(!ParallelConfig::sequential().should_parallelise(usize::MAX));
    }
}
