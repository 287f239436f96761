//! DCF CLI - Command Line Operations for Equity Valuation
//!
//! This is the operational entry point for the DCF valuation library.
//!
//! # Commands
//!
//! - `dcf value -s <snapshot> -a <assumptions>` - Single DCF valuation
//! - `dcf simulate -s <snapshot> -a <assumptions>` - Monte Carlo valuation
//! - `dcf sensitivity -s <snapshot> -a <assumptions>` - Discount rate × terminal growth grid
//! - `dcf scenario save|list|delete` - Manage saved scenarios
//! - `dcf check` - Show and validate the effective configuration
//!
//! # Architecture
//!
//! As the **S**ervice layer, this crate wires the valuation layers to files,
//! configuration and logging. Library crates only emit `tracing` events;
//! the subscriber is installed here and writes to stderr so JSON output on
//! stdout stays machine-readable.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod input;
mod output;

pub use error::{CliError, Result};

use commands::InputArgs;
use config::{DcfConfig, DEFAULT_CONFIG_FILE};
use dcf_models::fcf::FcfMethod;
use dcf_scenarios::{Preset, ScenarioId};
use output::OutputFormat;

/// DCF Valuation CLI
#[derive(Parser)]
#[command(name = "dcf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a company with a single DCF run
    Value {
        #[command(flatten)]
        inputs: InputArgs,

        /// FCF method to request (fcff, owner-earnings, simple, levered)
        #[arg(short, long)]
        method: Option<FcfMethod>,
    },

    /// Run a Monte Carlo valuation
    Simulate {
        #[command(flatten)]
        inputs: InputArgs,

        /// Number of iterations (overrides config)
        #[arg(short, long)]
        n_simulations: Option<usize>,

        /// Random seed (overrides config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Tabulate value per share over discount rate and terminal growth
    Sensitivity {
        #[command(flatten)]
        inputs: InputArgs,

        /// Discount rate step
        #[arg(long, default_value_t = 0.005)]
        rate_step: f64,

        /// Terminal growth step
        #[arg(long, default_value_t = 0.0025)]
        growth_step: f64,

        /// Steps either side of the base case
        #[arg(long, default_value_t = 2)]
        steps: usize,
    },

    /// Manage saved scenarios
    Scenario {
        #[command(subcommand)]
        action: ScenarioCommand,
    },

    /// Check system configuration
    Check,
}

#[derive(Subcommand)]
enum ScenarioCommand {
    /// Save assumptions (and their valuation when a snapshot is given)
    Save {
        /// Scenario name
        #[arg(long)]
        name: String,

        /// Assumption set JSON
        #[arg(short, long)]
        assumptions: PathBuf,

        /// Snapshot JSON; when present the valuation is stored too
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Ticker (required without a snapshot)
        #[arg(short, long)]
        ticker: Option<String>,

        /// Apply a preset shift before saving
        #[arg(long)]
        preset: Option<Preset>,
    },

    /// List scenarios for a ticker, newest first
    List {
        /// Ticker
        #[arg(short, long)]
        ticker: String,
    },

    /// Delete a scenario by id
    Delete {
        /// Scenario id
        id: ScenarioId,
    },
}

fn init_tracing(log_level: &str, verbose: bool) {
    let directive = if verbose { "debug" } else { log_level };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = DcfConfig::load_or_default(&cli.config)?.with_env_override()?;
    init_tracing(&config.log_level, cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    // check reports problems itself; everything else refuses to run on them
    if !matches!(cli.command, Commands::Check) {
        config.validate()?;
    }

    let format = cli.format;
    match cli.command {
        Commands::Value { inputs, method } => {
            commands::value::run(&config, &inputs, method, format)?
        }
        Commands::Simulate {
            inputs,
            n_simulations,
            seed,
        } => commands::simulate::run(&config, &inputs, n_simulations, seed, format)?,
        Commands::Sensitivity {
            inputs,
            rate_step,
            growth_step,
            steps,
        } => {
            commands::sensitivity::run(&config, &inputs, rate_step, growth_step, steps, format)?
        }
        Commands::Scenario { action } => match action {
            ScenarioCommand::Save {
                name,
                assumptions,
                snapshot,
                ticker,
                preset,
            } => commands::scenario::save(
                &config,
                &name,
                &assumptions,
                snapshot.as_deref(),
                ticker.as_deref(),
                preset,
                format,
            )?,
            ScenarioCommand::List { ticker } => {
                commands::scenario::list(&config, &ticker, format)?
            }
            ScenarioCommand::Delete { id } => commands::scenario::delete(&config, id)?,
        },
        Commands::Check => commands::check::run(&config, &cli.config, format)?,
    }
    Ok(())
}
