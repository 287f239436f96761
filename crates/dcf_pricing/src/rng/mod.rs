//! Random number generation for the Monte Carlo layer.
//!
//! [`SimulationRng`] wraps a seeded `StdRng`. Each simulation iteration gets
//! its own generator derived from the run seed and the iteration index, so a
//! seeded run is reproducible however iterations are scheduled across
//! threads.

mod prng;

pub use prng::{derive_seed, SimulationRng};
