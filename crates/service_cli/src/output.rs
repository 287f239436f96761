//! Table and JSON rendering of command results.

use crate::Result;
use clap::ValueEnum;
use dcf_pricing::dcf::SensitivityGrid;
use dcf_pricing::{SimulationResult, ValuationResult};
use dcf_scenarios::Scenario;
use serde::Serialize;
use std::fmt::Write;

/// Output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Renders `value` as JSON, or with `table` otherwise.
pub fn render<T, F>(format: OutputFormat, value: &T, table: F) -> Result<String>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(table(value)),
    }
}

fn pct(x: f64) -> String {
    format!("{:.2}%", x * 100.0)
}

/// Valuation summary table.
pub fn valuation_table(r: &ValuationResult) -> String {
    let mut out = String::new();
    let rule = "-".repeat(44);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "DCF valuation: {}", r.ticker);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:<26} {:>16.2}", "Enterprise value", r.enterprise_value);
    let _ = writeln!(out, "{:<26} {:>16.2}", "  PV explicit FCF", r.pv_explicit_fcf);
    let _ = writeln!(out, "{:<26} {:>16.2}", "  PV terminal value", r.pv_terminal_value);
    let _ = writeln!(out, "{:<26} {:>16.2}", "Equity value", r.equity_value);
    let _ = writeln!(out, "{:<26} {:>16.4}", "Value per share", r.value_per_share);
    if let Some(upside) = r.upside_pct {
        let _ = writeln!(out, "{:<26} {:>16}", "Upside", pct(upside));
    }
    let _ = writeln!(out, "{:<26} {:>16}", "Discount rate", pct(r.discount_rate));
    if let Some(w) = &r.wacc {
        let _ = writeln!(
            out,
            "{:<26} {:>16}",
            format!("  risk-free ({})", w.risk_free_source),
            pct(w.risk_free_rate)
        );
        let _ = writeln!(out, "{:<26} {:>16.3}", "  adjusted beta", w.adjusted_beta);
        let _ = writeln!(out, "{:<26} {:>16}", "  cost of equity", pct(w.cost_of_equity));
    }
    let method = if r.fcf_fallback_used() {
        format!("{} (requested {})", r.fcf_method, r.requested_fcf_method)
    } else {
        r.fcf_method.to_string()
    };
    let _ = writeln!(out, "{:<26} {:>16}", "FCF method", method);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:<6} {:>16}", "Year", "FCF");
    for (i, fcf) in r.projected_fcf.iter().enumerate() {
        let _ = writeln!(out, "{:<6} {:>16.2}", i + 1, fcf);
    }
    for w in &r.warnings {
        let _ = writeln!(out, "warning: {w}");
    }
    out
}

/// Simulation summary table.
pub fn simulation_table(r: &SimulationResult) -> String {
    let mut out = String::new();
    let rule = "-".repeat(44);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "Monte Carlo: {} of {} iterations valid{}",
        r.valid_count,
        r.requested,
        if r.partial { " (partial)" } else { "" }
    );
    let _ = writeln!(out, "{rule}");
    let rows = [
        ("Base value per share", r.base_value_per_share),
        ("Mean", r.mean),
        ("Median", r.median),
        ("Std dev", r.std_dev),
        ("Std error", r.standard_error),
        ("Min", r.min),
        ("P5", r.percentiles.p5),
        ("P25", r.percentiles.p25),
        ("P75", r.percentiles.p75),
        ("P95", r.percentiles.p95),
        ("Max", r.max),
        ("VaR 95", r.var_95),
        ("CVaR 95", r.cvar_95),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "{:<26} {:>16.4}", label, value);
    }
    if let Some(p) = r.probability_above_current_price {
        let _ = writeln!(out, "{:<26} {:>16}", "P(value > price)", pct(p));
    }
    let _ = writeln!(out, "{:<26} {:>16}", "Invalid iterations", r.invalid_count);
    let _ = writeln!(out, "{:<26} {:>16}", "Rejected draws", r.rejected_draws);
    let _ = writeln!(out, "{:<26} {:>16}", "Seed", r.seed);
    out
}

/// Sensitivity grid, discount rates down, terminal growth across.
pub fn sensitivity_table(grid: &SensitivityGrid) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:>10}", "r \\ g");
    for g in &grid.axes.terminal_growth_rates {
        let _ = write!(out, " {:>10}", pct(*g));
    }
    let _ = writeln!(out);
    for (row, r) in grid.axes.discount_rates.iter().enumerate() {
        let _ = write!(out, "{:>10}", pct(*r));
        for column in 0..grid.axes.terminal_growth_rates.len() {
            match grid.get(row, column) {
                Some(v) => {
                    let _ = write!(out, " {:>10.2}", v);
                }
                None => {
                    let _ = write!(out, " {:>10}", "n/a");
                }
            }
        }
        let _ = writeln!(out);
    }
    out
}

/// Scenario listing.
pub fn scenario_table(scenarios: &[Scenario]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<36}  {:<20}  {:<25}  {:>12}",
        "ID", "Name", "Saved at", "Value/share"
    );
    for s in scenarios {
        let value = s
            .result
            .as_ref()
            .map(|r| format!("{:.2}", r.value_per_share))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<36}  {:<20}  {:<25}  {:>12}",
            s.id,
            s.name,
            s.saved_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            value
        );
    }
    out
}
