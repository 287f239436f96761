//! Outcome distribution statistics.

use serde::{Deserialize, Serialize};

/// Tail probability used for VaR and CVaR.
pub const TAIL_PROBABILITY: f64 = 0.05;

/// Percentiles of the value-per-share distribution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    /// 5th percentile
    pub p5: f64,
    /// 25th percentile
    pub p25: f64,
    /// 50th percentile
    pub p50: f64,
    /// 75th percentile
    pub p75: f64,
    /// 95th percentile
    pub p95: f64,
}

/// Summary statistics of a set of outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutcomeStatistics {
    /// Number of outcomes summarised.
    pub count: usize,
    /// Sample mean.
    pub mean: f64,
    /// Median (equals `percentiles.p50`).
    pub median: f64,
    /// Sample standard deviation (n − 1 denominator; zero for one outcome).
    pub std_dev: f64,
    /// Standard error of the mean.
    pub standard_error: f64,
    /// Selected percentiles.
    pub percentiles: Percentiles,
    /// Smallest outcome.
    pub min: f64,
    /// Largest outcome.
    pub max: f64,
    /// 95% value at risk: the 5th percentile outcome.
    pub var_95: f64,
    /// 95% conditional value at risk: mean of the worst 5% of outcomes.
    pub cvar_95: f64,
    /// Share of outcomes strictly above the reference price.
    pub probability_above_price: Option<f64>,
}

impl OutcomeStatistics {
    /// Computes statistics; `None` when `values` is empty.
    ///
    /// `reference_price` enables `probability_above_price` when positive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dcf_pricing::mc::OutcomeStatistics;
    ///
    /// let values: Vec<f64> = (1..=100).map(f64::from).collect();
    /// let stats = OutcomeStatistics::from_values(&values, Some(90.0)).unwrap();
    /// assert_eq!(stats.median, 50.5);
    /// assert_eq!(stats.cvar_95, 3.0); // mean of 1..=5
    /// assert_eq!(stats.probability_above_price, Some(0.10));
    /// ```
    pub fn from_values(values: &[f64], reference_price: Option<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let std_dev = if n > 1 {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        let percentiles = Percentiles {
            p5: percentile(&sorted, 0.05),
            p25: percentile(&sorted, 0.25),
            p50: percentile(&sorted, 0.50),
            p75: percentile(&sorted, 0.75),
            p95: percentile(&sorted, 0.95),
        };

        let tail = ((TAIL_PROBABILITY * n as f64).ceil() as usize).clamp(1, n);
        let cvar_95 = sorted[..tail].iter().sum::<f64>() / tail as f64;

        let probability_above_price = reference_price.filter(|p| *p > 0.0).map(|p| {
            sorted.iter().filter(|v| **v > p).count() as f64 / n as f64
        });

        Some(Self {
            count: n,
            mean,
            median: percentiles.p50,
            std_dev,
            standard_error: std_dev / (n as f64).sqrt(),
            percentiles,
            min: sorted[0],
            max: sorted[n - 1],
            var_95: percentiles.p5,
            cvar_95,
            probability_above_price,
        })
    }
}

/// Linear-interpolation percentile of sorted data, `q` in `[0, 1]`.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let frac = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}
