//! Seeded PRNG wrapper.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

/// Mixes a run seed and an iteration index into an independent seed.
///
/// SplitMix64 finaliser; adjacent indices map to well-separated seeds.
#[inline]
pub fn derive_seed(base_seed: u64, index: u64) -> u64 {
    let mut z = base_seed
        .wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Monte Carlo random number generator.
///
/// # Examples
///
/// ```rust
/// use dcf_pricing::rng::SimulationRng;
///
/// let mut a = SimulationRng::for_iteration(42, 7);
/// let mut b = SimulationRng::for_iteration(42, 7);
/// assert_eq!(a.gen_normal(), b.gen_normal());
/// ```
#[derive(Clone, Debug)]
pub struct SimulationRng {
    inner: StdRng,
    seed: u64,
}

impl SimulationRng {
    /// Creates a generator from a seed.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates the generator for iteration `index` of a run seeded with
    /// `base_seed`.
    #[inline]
    pub fn for_iteration(base_seed: u64, index: usize) -> Self {
        Self::from_seed(derive_seed(base_seed, index as u64))
    }

    /// Seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Standard normal variate.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Draws one value from `dist`.
    #[inline]
    pub fn sample<D: Distribution<f64>>(&mut self, dist: &D) -> f64 {
        dist.sample(&mut self.inner)
    }
}
