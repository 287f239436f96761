//! Free cash flow calculation methods.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Free cash flow definition used for the explicit projection.
///
/// | Method | Formula |
/// |--------|---------|
/// | `Simple` | operating cash flow − capex |
/// | `Levered` | operating cash flow − capex − interest |
/// | `OwnerEarnings` | net income + depreciation − capex − ΔNWC |
/// | `Fcff` | NOPAT + depreciation − capex − ΔNWC |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FcfMethod {
    /// Operating cash flow less capital expenditure.
    Simple,
    /// Simple FCF less interest expense.
    Levered,
    /// Buffett-style owner earnings.
    OwnerEarnings,
    /// Free cash flow to the firm.
    Fcff,
}

impl FcfMethod {
    /// Methods tried after the requested one, in order.
    pub const FALLBACK_ORDER: [FcfMethod; 4] = [
        FcfMethod::Fcff,
        FcfMethod::OwnerEarnings,
        FcfMethod::Simple,
        FcfMethod::Levered,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            FcfMethod::Simple => "Simple",
            FcfMethod::Levered => "Levered",
            FcfMethod::OwnerEarnings => "Owner Earnings",
            FcfMethod::Fcff => "FCFF",
        }
    }

    /// Inputs the method needs beyond the assumption set and base revenue.
    pub fn required_inputs(&self) -> &'static [&'static str] {
        match self {
            FcfMethod::Simple => &["operating_cash_flow"],
            FcfMethod::Levered => &["operating_cash_flow", "interest_expense"],
            FcfMethod::OwnerEarnings => &["operating_margin", "interest_expense"],
            FcfMethod::Fcff => &["operating_margin"],
        }
    }

    /// The resolution chain: `self` first, then the remaining methods in
    /// [`FALLBACK_ORDER`](Self::FALLBACK_ORDER).
    pub fn chain(self) -> Vec<FcfMethod> {
        std::iter::once(self)
            .chain(Self::FALLBACK_ORDER.into_iter().filter(|m| *m != self))
            .collect()
    }
}

impl fmt::Display for FcfMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised method name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown FCF method '{0}' (expected simple, levered, owner_earnings or fcff)")]
pub struct ParseFcfMethodError(pub String);

impl FromStr for FcfMethod {
    type Err = ParseFcfMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "simple" => Ok(FcfMethod::Simple),
            "levered" => Ok(FcfMethod::Levered),
            "owner_earnings" | "owner" => Ok(FcfMethod::OwnerEarnings),
            "fcff" => Ok(FcfMethod::Fcff),
            _ => Err(ParseFcfMethodError(s.to_string())),
        }
    }
}
