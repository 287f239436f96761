//! Check command implementation
//!
//! Reports the effective configuration and whether it is valid.

use crate::config::DcfConfig;
use crate::output::OutputFormat;
use crate::Result;
use std::path::Path;

/// Run the check command
pub fn run(config: &DcfConfig, config_path: &Path, format: OutputFormat) -> Result<()> {
    let source = if config_path.exists() {
        config_path.display().to_string()
    } else {
        "built-in defaults".to_string()
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Table => {
            println!("# configuration from {source}, after DCF_* overrides");
            println!("{}", toml::to_string_pretty(config)?);
            println!(
                "# scenario directory {}",
                if config.scenario_dir.is_dir() {
                    "exists"
                } else {
                    "will be created on first save"
                }
            );
        }
    }

    config.validate()?;
    println!("Configuration OK");
    Ok(())
}
