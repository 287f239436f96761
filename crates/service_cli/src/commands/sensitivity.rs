//! Sensitivity command implementation
//!
//! Tabulates value per share over discount rate and terminal growth.

use super::InputArgs;
use crate::config::DcfConfig;
use crate::output::{render, sensitivity_table, OutputFormat};
use crate::{CliError, Result};
use dcf_pricing::dcf::{sensitivity_grid, SensitivityAxes};
use tracing::info;

/// Run the sensitivity command
pub fn run(
    config: &DcfConfig,
    inputs: &InputArgs,
    rate_step: f64,
    growth_step: f64,
    steps: usize,
    format: OutputFormat,
) -> Result<()> {
    if !(rate_step > 0.0 && growth_step > 0.0) {
        return Err(CliError::InvalidArgument(format!(
            "steps must be positive, got rate {rate_step} and growth {growth_step}"
        )));
    }

    let (assumptions, snapshot) = inputs.load()?;
    let engine = config.engine(None)?;
    let centre = engine.discount_rate(&assumptions, &snapshot)?.rate;
    let axes = SensitivityAxes::centred(
        centre,
        assumptions.terminal_growth_rate(),
        rate_step,
        growth_step,
        steps,
    );

    let grid = sensitivity_grid(&engine, &assumptions, &snapshot, &axes)?;
    info!(
        cells = grid.axes.discount_rates.len() * grid.axes.terminal_growth_rates.len(),
        valid = grid.valid_cells(),
        "sensitivity grid built"
    );

    println!("{}", render(format, &grid, sensitivity_table)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;

    #[test]
    fn test_sensitivity_runs_around_base_case() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = fixtures::inputs(dir.path(), 0.09, 0.025);

        run(&DcfConfig::default(), &inputs, 0.005, 0.0025, 2, OutputFormat::Table).unwrap();
        run(&DcfConfig::default(), &inputs, 0.01, 0.005, 1, OutputFormat::Json).unwrap();
    }

    #[test]
    fn test_sensitivity_rejects_non_positive_steps() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = fixtures::inputs(dir.path(), 0.09, 0.025);

        let err = run(&DcfConfig::default(), &inputs, 0.0, 0.0025, 2, OutputFormat::Table)
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
