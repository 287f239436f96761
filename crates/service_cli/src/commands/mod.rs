//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod scenario;
pub mod sensitivity;
pub mod simulate;
pub mod value;

use crate::input::{load_assumptions, JsonFileProvider};
use crate::Result;
use clap::Args;
use dcf_core::{AssumptionSet, FinancialSnapshot};
use dcf_scenarios::Preset;
use std::path::PathBuf;
use tracing::info;

/// Snapshot and assumption inputs shared by the valuation commands.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Financial snapshot JSON (one object or an array)
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Assumption set JSON
    #[arg(short, long)]
    pub assumptions: PathBuf,

    /// Ticker to select from a multi-company snapshot file
    #[arg(short, long)]
    pub ticker: Option<String>,

    /// Apply a preset shift (bear, base, bull) to the assumptions
    #[arg(long)]
    pub preset: Option<Preset>,
}

impl InputArgs {
    /// Loads the snapshot and assumptions, applying the preset if any.
    pub fn load(&self) -> Result<(AssumptionSet, FinancialSnapshot)> {
        let provider = JsonFileProvider::open(&self.snapshot)?;
        let snapshot = provider.select(self.ticker.as_deref())?;
        let assumptions = load_assumptions(&self.assumptions)?;

        let assumptions = match self.preset {
            Some(preset) => {
                info!(preset = %preset, "applying preset: {}", preset.description());
                preset.apply(&assumptions, snapshot.operating_margin())?
            }
            None => assumptions,
        };
        Ok((assumptions, snapshot))
    }
}
