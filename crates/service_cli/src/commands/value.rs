//! Value command implementation
//!
//! Runs a single deterministic DCF valuation.

use super::InputArgs;
use crate::config::DcfConfig;
use crate::output::{render, valuation_table, OutputFormat};
use crate::Result;
use dcf_models::fcf::FcfMethod;
use tracing::info;

/// Run the value command
pub fn run(
    config: &DcfConfig,
    inputs: &InputArgs,
    method: Option<FcfMethod>,
    format: OutputFormat,
) -> Result<()> {
    let (assumptions, snapshot) = inputs.load()?;
    let engine = config.engine(method)?;

    info!(ticker = %snapshot.ticker, method = %engine.fcf_method(), "starting valuation");
    let result = engine.evaluate(&assumptions, &snapshot)?;
    info!(
        value_per_share = result.value_per_share,
        warnings = result.warnings.len(),
        "valuation complete"
    );

    println!("{}", render(format, &result, valuation_table)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use crate::CliError;
    use dcf_scenarios::Preset;

    #[test]
    fn test_value_runs_in_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = fixtures::inputs(dir.path(), 0.09, 0.025);
        let config = DcfConfig::default();

        run(&config, &inputs, None, OutputFormat::Table).unwrap();
        run(&config, &inputs, Some(FcfMethod::Simple), OutputFormat::Json).unwrap();

        let bear = InputArgs {
            preset: Some(Preset::Bear),
            ..inputs
        };
        run(&config, &bear, None, OutputFormat::Table).unwrap();
    }

    #[test]
    fn test_value_reports_equal_rates() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = fixtures::inputs(dir.path(), 0.08, 0.08);

        let err = run(&DcfConfig::default(), &inputs, None, OutputFormat::Table).unwrap_err();
        assert!(matches!(err, CliError::Valuation(ref e) if e.is_dcf_validation()));
    }
}
