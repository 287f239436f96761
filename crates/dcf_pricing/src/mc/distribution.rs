//! Sampling distributions for stochastic assumptions.
//!
//! A [`Distribution`] describes an offset added to the base-case value.
//! It is compiled once into an [`OffsetSampler`] when the configuration is
//! built, so sampling itself cannot fail.

use super::error::ConfigError;
use crate::rng::SimulationRng;
use rand_distr::{Normal, Triangular, Uniform};
use serde::{Deserialize, Serialize};

/// Offset distribution around a base-case value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Distribution {
    /// No perturbation.
    #[default]
    Fixed,
    /// Normal offset with mean zero.
    Normal {
        /// Standard deviation
        std_dev: f64,
    },
    /// Uniform offset on `[-half_width, half_width)`.
    Uniform {
        /// Half the interval width
        half_width: f64,
    },
    /// Triangular offset on `[lower, upper]` with mode zero.
    Triangular {
        /// Lowest offset (≤ 0)
        lower: f64,
        /// Highest offset (≥ 0)
        upper: f64,
    },
}

impl Distribution {
    /// Whether the distribution never perturbs the base value.
    pub fn is_fixed(&self) -> bool {
        match *self {
            Distribution::Fixed => true,
            Distribution::Normal { std_dev } => std_dev == 0.0,
            Distribution::Uniform { half_width } => half_width == 0.0,
            Distribution::Triangular { lower, upper } => lower == 0.0 && upper == 0.0,
        }
    }

    /// Validates parameters and compiles a sampler.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] naming `name` for negative
    /// or non-finite widths, or a triangular range that excludes zero.
    pub fn sampler(&self, name: &'static str) -> Result<OffsetSampler, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidParameter { name, reason };

        if self.is_fixed() {
            return Ok(OffsetSampler::Fixed);
        }

        match *self {
            Distribution::Fixed => Ok(OffsetSampler::Fixed),
            Distribution::Normal { std_dev } => {
                if !(std_dev.is_finite() && std_dev > 0.0) {
                    return Err(invalid(format!(
                        "normal std_dev must be finite and non-negative, got {std_dev}"
                    )));
                }
                Normal::new(0.0, std_dev)
                    .map(OffsetSampler::Normal)
                    .map_err(|e| invalid(e.to_string()))
            }
            Distribution::Uniform { half_width } => {
                if !(half_width.is_finite() && half_width > 0.0) {
                    return Err(invalid(format!(
                        "uniform half_width must be finite and non-negative, got {half_width}"
                    )));
                }
                Ok(OffsetSampler::Uniform(Uniform::new(-half_width, half_width)))
            }
            Distribution::Triangular { lower, upper } => {
                if !(lower.is_finite() && upper.is_finite() && lower <= 0.0 && upper >= 0.0) {
                    return Err(invalid(format!(
                        "triangular range [{lower}, {upper}] must contain zero"
                    )));
                }
                Triangular::new(lower, upper, 0.0)
                    .map(OffsetSampler::Triangular)
                    .map_err(|e| invalid(e.to_string()))
            }
        }
    }
}

/// Compiled form of a [`Distribution`].
#[derive(Clone, Copy, Debug)]
pub enum OffsetSampler {
    /// Always zero.
    Fixed,
    /// Normal offset.
    Normal(Normal<f64>),
    /// Uniform offset.
    Uniform(Uniform<f64>),
    /// Triangular offset.
    Triangular(Triangular<f64>),
}

impl OffsetSampler {
    /// Draws an offset.
    #[inline]
    pub fn offset(&self, rng: &mut SimulationRng) -> f64 {
        match self {
            OffsetSampler::Fixed => 0.0,
            OffsetSampler::Normal(d) => rng.sample(d),
            OffsetSampler::Uniform(d) => rng.sample(d),
            OffsetSampler::Triangular(d) => rng.sample(d),
        }
    }

    /// Draws `base + offset`.
    #[inline]
    pub fn draw(&self, base: f64, rng: &mut SimulationRng) -> f64 {
        base + self.offset(rng)
    }
}

/// Distributions for every stochastic assumption.
///
/// Revenue growth uses one common shock added to every projection year.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingDistributions {
    /// Shock to every year's revenue growth.
    pub revenue_growth: Distribution,
    /// Shock to the discount rate.
    pub discount_rate: Distribution,
    /// Shock to terminal growth.
    pub terminal_growth: Distribution,
    /// Shock to the operating margin, when one is known.
    pub operating_margin: Distribution,
}

impl Default for SamplingDistributions {
    fn default() -> Self {
        Self {
            revenue_growth: Distribution::Normal { std_dev: 0.02 },
            discount_rate: Distribution::Normal { std_dev: 0.01 },
            terminal_growth: Distribution::Normal { std_dev: 0.005 },
            operating_margin: Distribution::Fixed,
        }
    }
}

impl SamplingDistributions {
    /// No perturbation anywhere; every iteration reproduces the base case.
    pub fn fixed() -> Self {
        Self {
            revenue_growth: Distribution::Fixed,
            discount_rate: Distribution::Fixed,
            terminal_growth: Distribution::Fixed,
            operating_margin: Distribution::Fixed,
        }
    }

    pub(crate) fn compile(&self) -> Result<Samplers, ConfigError> {
        Ok(Samplers {
            revenue_growth: self.revenue_growth.sampler("revenue_growth")?,
            discount_rate: self.discount_rate.sampler("discount_rate")?,
            terminal_growth: self.terminal_growth.sampler("terminal_growth")?,
            operating_margin: self.operating_margin.sampler("operating_margin")?,
        })
    }
}

/// Compiled samplers for one configuration.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Samplers {
    pub revenue_growth: OffsetSampler,
    pub discount_rate: OffsetSampler,
    pub terminal_growth: OffsetSampler,
    pub operating_margin: OffsetSampler,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(d: Distribution, n: usize) -> Vec<f64> {
        let sampler = d.sampler("test").unwrap();
        let mut rng = SimulationRng::from_seed(11);
        (0..n).map(|_| sampler.offset(&mut rng)).collect()
    }

    #[test]
    fn test_fixed_is_zero() {
        assert!(draws(Distribution::Fixed, 10).iter().all(|x| *x == 0.0));
        assert!(draws(Distribution::Normal { std_dev: 0.0 }, 10)
            .iter()
            .all(|x| *x == 0.0));
    }

    #[test]
    fn test_uniform_within_half_width() {
        assert!(draws(Distribution::Uniform { half_width: 0.03 }, 1000)
            .iter()
            .all(|x| (-0.03..0.03).contains(x)));
    }

    #[test]
    fn test_triangular_within_range() {
        let d = Distribution::Triangular {
            lower: -0.02,
            upper: 0.01,
        };
        assert!(draws(d, 1000).iter().all(|x| (-0.02..=0.01).contains(x)));
    }

    #[test]
    fn test_normal_spread() {
        let xs = draws(Distribution::Normal { std_dev: 0.01 }, 10_000);
        let mean = xs.iter().sum::<f64>() / xs.len() as f64;
        let sd = (xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (xs.len() - 1) as f64).sqrt();
        assert!(mean.abs() < 5e-4);
        assert!((sd - 0.01).abs() < 5e-4);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(Distribution::Normal { std_dev: -0.1 }.sampler("x").is_err());
        assert!(Distribution::Uniform { half_width: f64::NAN }
            .sampler("x")
            .is_err());
        let err = Distribution::Triangular {
            lower: 0.01,
            upper: 0.02,
        }
        .sampler("terminal_growth")
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { name: "terminal_growth", .. }));
    }

    #[test]
    fn test_serde_tagged() {
        let d: Distribution = serde_json::from_str(r#"{"kind":"normal","std_dev":0.02}"#).unwrap();
        assert_eq!(d, Distribution::Normal { std_dev: 0.02 });
    }
}
