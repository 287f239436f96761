//! Monte Carlo valuation driver.

use super::cancellation::CancellationToken;
use super::config::MonteCarloConfig;
use super::error::SimulationError;
use super::statistics::{OutcomeStatistics, Percentiles};
use crate::dcf::{validate_dcf_assumptions, DcfEngine};
use crate::rng::SimulationRng;
use dcf_core::{AssumptionSet, FinancialSnapshot};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Aggregated outcome of a Monte Carlo run.
///
/// A plain record for reporting. `partial` is set when the run was
/// cancelled before every requested iteration completed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Valid value-per-share outcomes, in iteration order.
    pub outcomes: Vec<f64>,
    /// Sample mean.
    pub mean: f64,
    /// Median outcome.
    pub median: f64,
    /// Sample standard deviation.
    pub std_dev: f64,
    /// Standard error of the mean.
    pub standard_error: f64,
    /// 5/25/50/75/95 percentiles.
    pub percentiles: Percentiles,
    /// Smallest outcome.
    pub min: f64,
    /// Largest outcome.
    pub max: f64,
    /// Share of outcomes above the current price; absent without a price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability_above_current_price: Option<f64>,
    /// 5th percentile outcome.
    pub var_95: f64,
    /// Mean of the worst 5% of outcomes.
    pub cvar_95: f64,
    /// Iterations that produced a value.
    pub valid_count: usize,
    /// Iterations excluded after exhausting redraws or failing valuation.
    pub invalid_count: usize,
    /// Draws rejected by validation across all iterations (auditable
    /// rejection-sampling count).
    pub rejected_draws: usize,
    /// Iterations requested.
    pub requested: usize,
    /// Whether the run was cancelled early.
    pub partial: bool,
    /// Seed the run used.
    pub seed: u64,
    /// Deterministic value per share of the unperturbed assumptions.
    pub base_value_per_share: f64,
}

impl SimulationResult {
    /// Iterations that ran to a valid or invalid conclusion.
    #[inline]
    pub fn completed(&self) -> usize {
        self.valid_count + self.invalid_count
    }
}

/// Outcome of one iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Iteration {
    Valid { value: f64, rejected: u32 },
    Invalid { rejected: u32 },
    Skipped,
}

/// Base-case values an iteration perturbs.
#[derive(Clone, Copy, Debug)]
struct BaseCase {
    discount_rate: f64,
    operating_margin: Option<f64>,
}

/// Repeatedly samples assumptions and values each sample with a
/// [`DcfEngine`].
///
/// Each iteration builds its own [`AssumptionSet`] from its own RNG, so
/// iterations share nothing but read-only inputs and run on the rayon pool
/// when the run is large enough.
///
/// # Examples
///
/// ```rust
/// use dcf_core::{AssumptionSet, FinancialSnapshot};
/// use dcf_pricing::dcf::DcfEngine;
/// use dcf_pricing::mc::{MonteCarloConfig, MonteCarloSimulator};
///
/// let snapshot = FinancialSnapshot {
///     ticker: "ACME".to_string(),
///     revenue: 100.0,
///     ebit: Some(20.0),
///     shares_outstanding: 10.0,
///     current_price: Some(20.0),
///     ..Default::default()
/// };
/// let base = AssumptionSet::builder(vec![0.08, 0.07, 0.06, 0.05, 0.04], 0.02)
///     .discount_rate(0.09)
///     .build()
///     .unwrap();
///
/// let config = MonteCarloConfig::builder().n_simulations(500).seed(7).build().unwrap();
/// let result = MonteCarloSimulator::new(DcfEngine::default(), config)
///     .run(&base, &snapshot)
///     .unwrap();
///
/// assert_eq!(result.completed(), 500);
/// assert!(!result.partial);
/// assert!(result.var_95 <= result.median);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloSimulator {
    engine: DcfEngine,
    config: MonteCarloConfig,
}

impl MonteCarloSimulator {
    /// Creates a simulator.
    pub fn new(engine: DcfEngine, config: MonteCarloConfig) -> Self {
        Self { engine, config }
    }

    /// Configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Runs every iteration.
    ///
    /// # Errors
    ///
    /// See [`run_with_cancellation`](Self::run_with_cancellation).
    pub fn run(
        &self,
        base: &AssumptionSet,
        snapshot: &FinancialSnapshot,
    ) -> Result<SimulationResult, SimulationError> {
        self.run_with_cancellation(base, snapshot, &CancellationToken::new())
    }

    /// Runs until every iteration completes or `token` is cancelled.
    ///
    /// Iterations not yet started when cancellation is observed are skipped
    /// and the result is marked `partial`.
    ///
    /// # Errors
    ///
    /// - [`SimulationError::BaseCase`] if the unperturbed assumptions cannot
    ///   be valued (checked before any sampling)
    /// - [`SimulationError::NoValidOutcomes`] if no iteration produced a value
    pub fn run_with_cancellation(
        &self,
        base: &AssumptionSet,
        snapshot: &FinancialSnapshot,
        token: &CancellationToken,
    ) -> Result<SimulationResult, SimulationError> {
        let base_result = self
            .engine
            .evaluate(base, snapshot)
            .map_err(SimulationError::BaseCase)?;

        let base_case = BaseCase {
            discount_rate: base_result.discount_rate,
            operating_margin: base
                .operating_margin()
                .or_else(|| snapshot.operating_margin()),
        };
        let seed = self.config.seed().unwrap_or_else(rand::random);
        let n = self.config.n_simulations();

        info!(
            ticker = %snapshot.ticker,
            n_simulations = n,
            seed,
            base_value_per_share = base_result.value_per_share,
            "Starting Monte Carlo valuation"
        );

        let iterate = |index: usize| {
            if token.is_cancelled() {
                Iteration::Skipped
            } else {
                self.iteration(index, seed, base, &base_case, snapshot)
            }
        };

        let iterations: Vec<Iteration> = if self.config.parallel().should_parallelise(n) {
            (0..n).into_par_iter().map(iterate).collect()
        } else {
            (0..n).map(iterate).collect()
        };

        let mut outcomes = Vec::with_capacity(n);
        let mut invalid_count = 0;
        let mut rejected_draws = 0;
        let mut skipped = 0;
        for it in iterations {
            match it {
                Iteration::Valid { value, rejected } => {
                    outcomes.push(value);
                    rejected_draws += rejected as usize;
                }
                Iteration::Invalid { rejected } => {
                    invalid_count += 1;
                    rejected_draws += rejected as usize;
                }
                Iteration::Skipped => skipped += 1,
            }
        }
        let partial = skipped > 0;
        let valid_count = outcomes.len();

        if partial {
            warn!(
                completed = valid_count + invalid_count,
                requested = n,
                "Monte Carlo run cancelled; returning partial result"
            );
        }
        info!(
            valid = valid_count,
            invalid = invalid_count,
            rejected_draws,
            partial,
            "Monte Carlo valuation finished"
        );

        let stats = OutcomeStatistics::from_values(&outcomes, snapshot.current_price).ok_or(
            SimulationError::NoValidOutcomes {
                completed: valid_count + invalid_count,
                partial,
            },
        )?;

        Ok(SimulationResult {
            outcomes,
            mean: stats.mean,
            median: stats.median,
            std_dev: stats.std_dev,
            standard_error: stats.standard_error,
            percentiles: stats.percentiles,
            min: stats.min,
            max: stats.max,
            probability_above_current_price: stats.probability_above_price,
            var_95: stats.var_95,
            cvar_95: stats.cvar_95,
            valid_count,
            invalid_count,
            rejected_draws,
            requested: n,
            partial,
            seed,
            base_value_per_share: base_result.value_per_share,
        })
    }

    /// One iteration: draw, redraw on invalid combinations up to the
    /// configured bound, then value.
    fn iteration(
        &self,
        index: usize,
        seed: u64,
        base: &AssumptionSet,
        base_case: &BaseCase,
        snapshot: &FinancialSnapshot,
    ) -> Iteration {
        let mut rng = SimulationRng::for_iteration(seed, index);
        let max_draws = self.config.max_resample_attempts() + 1;
        let mut rejected = 0;

        for _ in 0..max_draws {
            match self.draw(&mut rng, base, base_case) {
                Some(sample) => {
                    return match self.engine.evaluate(&sample, snapshot) {
                        Ok(result) => Iteration::Valid {
                            value: result.value_per_share,
                            rejected,
                        },
                        Err(e) => {
                            debug!(index, error = %e, "Sample valuation failed; excluded");
                            Iteration::Invalid { rejected }
                        }
                    };
                }
                None => rejected += 1,
            }
        }

        debug!(index, rejected, "Redraws exhausted; iteration excluded");
        Iteration::Invalid { rejected }
    }

    /// Draws one candidate set; `None` when it fails the validation layer.
    fn draw(
        &self,
        rng: &mut SimulationRng,
        base: &AssumptionSet,
        base_case: &BaseCase,
    ) -> Option<AssumptionSet> {
        let samplers = self.config.samplers();

        let growth_shock = samplers.revenue_growth.offset(rng);
        let discount_rate = samplers.discount_rate.draw(base_case.discount_rate, rng);
        let terminal_growth = samplers
            .terminal_growth
            .draw(base.terminal_growth_rate(), rng);
        let margin = base_case
            .operating_margin
            .map(|m| samplers.operating_margin.draw(m, rng));

        let growth: Vec<f64> = base
            .revenue_growth_rates()
            .iter()
            .map(|g| g + growth_shock)
            .collect();

        let mut builder = base
            .to_builder()
            .revenue_growth_rates(growth)
            .terminal_growth_rate(terminal_growth)
            .discount_rate(discount_rate);
        if let Some(m) = margin {
            builder = builder.operating_margin(m);
        }

        let sample = builder.build().ok()?;
        validate_dcf_assumptions(&sample, discount_rate)
            .is_valid()
            .then_some(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::{Distribution, SamplingDistributions};
    use crate::ValuationError;

    fn snapshot() -> FinancialSnapshot {
        FinancialSnapshot {
            ticker: "ACME".to_string(),
            revenue: 100.0,
            ebit: Some(20.0),
            shares_outstanding: 10.0,
            current_price: Some(20.0),
            ..Default::default()
        }
    }

    fn base() -> AssumptionSet {
        AssumptionSet::builder(vec![0.08, 0.07, 0.06, 0.05, 0.04], 0.02)
            .discount_rate(0.09)
            .build()
            .unwrap()
    }

    fn simulator(config: MonteCarloConfig) -> MonteCarloSimulator {
        MonteCarloSimulator::new(DcfEngine::default(), config)
    }

    #[test]
    fn test_fixed_distributions_reproduce_base_case() {
        let config = MonteCarloConfig::builder()
            .n_simulations(50)
            .seed(1)
            .distributions(SamplingDistributions::fixed())
            .build()
            .unwrap();
        let r = simulator(config).run(&base(), &snapshot()).unwrap();
        assert_eq!(r.valid_count, 50);
        assert!(r.outcomes.iter().all(|v| *v == r.base_value_per_share));
        assert_eq!(r.std_dev, 0.0);
        assert_eq!(r.rejected_draws, 0);
    }

    #[test]
    fn test_snapshot_margin_bound_matches_single_valuation() {
        let fixed = || {
            MonteCarloConfig::builder()
                .n_simulations(50)
                .seed(1)
                .distributions(SamplingDistributions::fixed())
                .build()
                .unwrap()
        };

        // EBIT loss of 150% of revenue: rejected by both paths
        let loss = FinancialSnapshot {
            revenue: 10.0,
            ebit: Some(-15.0),
            ..snapshot()
        };
        let single = DcfEngine::default().evaluate(&base(), &loss).unwrap_err();
        assert!(matches!(single, ValuationError::Validation(ref v) if v.field == "operating_margin"));
        let err = simulator(fixed()).run(&base(), &loss).unwrap_err();
        assert_eq!(err, SimulationError::BaseCase(single));

        // Steep but admissible margin read off the snapshot: every sample values
        let steep = FinancialSnapshot {
            revenue: 10.0,
            ebit: Some(-9.0),
            ..snapshot()
        };
        let r = simulator(fixed()).run(&base(), &steep).unwrap();
        assert_eq!(r.valid_count, 50);
        assert_eq!(r.invalid_count, 0);
        assert!(r.outcomes.iter().all(|v| *v == r.base_value_per_share));
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let config = MonteCarloConfig::builder()
            .n_simulations(300)
            .seed(99)
            .build()
            .unwrap();
        let a = simulator(config.clone()).run(&base(), &snapshot()).unwrap();
        let b = simulator(config).run(&base(), &snapshot()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_draws_are_counted_not_clamped() {
        // Terminal growth straddles the discount rate half of the time
        let base = base()
            .to_builder()
            .terminal_growth_rate(0.085)
            .build()
            .unwrap();
        let config = MonteCarloConfig::builder()
            .n_simulations(400)
            .seed(5)
            .max_resample_attempts(0)
            .distributions(SamplingDistributions {
                revenue_growth: Distribution::Fixed,
                discount_rate: Distribution::Fixed,
                terminal_growth: Distribution::Uniform { half_width: 0.01 },
                operating_margin: Distribution::Fixed,
            })
            .build()
            .unwrap();
        let r = simulator(config).run(&base, &snapshot()).unwrap();
        assert!(r.invalid_count > 0);
        assert_eq!(r.invalid_count, r.rejected_draws);
        assert_eq!(r.completed(), 400);
    }

    #[test]
    fn test_resampling_recovers_draws() {
        let base = base()
            .to_builder()
            .terminal_growth_rate(0.085)
            .build()
            .unwrap();
        let dists = SamplingDistributions {
            revenue_growth: Distribution::Fixed,
            discount_rate: Distribution::Fixed,
            terminal_growth: Distribution::Uniform { half_width: 0.01 },
            operating_margin: Distribution::Fixed,
        };
        let no_retry = MonteCarloConfig::builder()
            .n_simulations(400)
            .seed(5)
            .max_resample_attempts(0)
            .distributions(dists)
            .build()
            .unwrap();
        let retry = MonteCarloConfig::builder()
            .n_simulations(400)
            .seed(5)
            .max_resample_attempts(5)
            .distributions(dists)
            .build()
            .unwrap();
        let a = simulator(no_retry).run(&base, &snapshot()).unwrap();
        let b = simulator(retry).run(&base, &snapshot()).unwrap();
        assert!(b.valid_count > a.valid_count);
        assert!(b.invalid_count < a.invalid_count);
    }

    #[test]
    fn test_broken_base_case_is_fatal() {
        let base = base()
            .to_builder()
            .terminal_growth_rate(0.09)
            .build()
            .unwrap();
        let config = MonteCarloConfig::builder().n_simulations(10).build().unwrap();
        let err = simulator(config).run(&base, &snapshot()).unwrap_err();
        assert!(matches!(err, SimulationError::BaseCase(ref e) if e.is_dcf_validation()));
    }

    #[test]
    fn test_cancelled_before_start_has_no_outcomes() {
        let token = CancellationToken::new();
        token.cancel();
        let config = MonteCarloConfig::builder().n_simulations(10).seed(3).build().unwrap();
        let err = simulator(config)
            .run_with_cancellation(&base(), &snapshot(), &token)
            .unwrap_err();
        assert_eq!(
            err,
            SimulationError::NoValidOutcomes {
                completed: 0,
                partial: true
            }
        );
    }
}
