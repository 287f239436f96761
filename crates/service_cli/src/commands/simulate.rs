//! Simulate command implementation
//!
//! Runs a Monte Carlo valuation around the supplied assumptions.

use super::InputArgs;
use crate::config::DcfConfig;
use crate::output::{render, simulation_table, OutputFormat};
use crate::Result;
use dcf_pricing::MonteCarloSimulator;

/// Run the simulate command
pub fn run(
    config: &DcfConfig,
    inputs: &InputArgs,
    n_simulations: Option<usize>,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let (assumptions, snapshot) = inputs.load()?;
    let simulator =
        MonteCarloSimulator::new(config.engine(None)?, config.monte_carlo(n_simulations, seed)?);

    let result = simulator.run(&assumptions, &snapshot)?;
    println!("{}", render(format, &result, simulation_table)?);
    Ok(())
}
