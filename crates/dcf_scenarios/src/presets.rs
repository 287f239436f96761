//! Preset Bear / Base / Bull assumption shifts.
//!
//! A preset derives a new [`AssumptionSet`] from a base set by shifting
//! every projection year's revenue growth, the operating margin and the
//! explicit discount rate. The base set is never modified, and a shift that
//! pushes a field out of bounds is rejected by the builder rather than
//! clamped.

use dcf_core::{AssumptionSet, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Additive shifts applied by a preset.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresetShift {
    /// Added to every year's revenue growth rate
    pub revenue_growth: f64,
    /// Added to the operating margin
    pub operating_margin: f64,
    /// Added to the explicit discount rate
    pub discount_rate: f64,
}

/// Preset scenario types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Slower growth, thinner margins, higher required return
    Bear,
    /// Base assumptions unchanged
    Base,
    /// Faster growth, wider margins, lower required return
    Bull,
}

impl Preset {
    /// All presets, bearish to bullish.
    pub const ALL: [Preset; 3] = [Preset::Bear, Preset::Base, Preset::Bull];

    /// Get human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bear => "Bear",
            Self::Base => "Base",
            Self::Bull => "Bull",
        }
    }

    /// Get description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Bear => "Growth -3pp per year, margin -2pp, discount rate +1pp",
            Self::Base => "Base assumptions",
            Self::Bull => "Growth +3pp per year, margin +2pp, discount rate -1pp",
        }
    }

    /// Shifts applied by this preset.
    pub fn shift(&self) -> PresetShift {
        match self {
            Self::Bear => PresetShift {
                revenue_growth: -0.03,
                operating_margin: -0.02,
                discount_rate: 0.01,
            },
            Self::Base => PresetShift {
                revenue_growth: 0.0,
                operating_margin: 0.0,
                discount_rate: 0.0,
            },
            Self::Bull => PresetShift {
                revenue_growth: 0.03,
                operating_margin: 0.02,
                discount_rate: -0.01,
            },
        }
    }

    /// Derives the preset's assumption set from `base`.
    ///
    /// `reference_margin` is shifted when `base` carries no explicit
    /// operating margin (typically the snapshot's historical margin). With
    /// neither, the margin stays historical and unshifted. A derived
    /// discount rate (none on `base`) is likewise left to WACC.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a shifted field leaves its bounds.
    pub fn apply(
        &self,
        base: &AssumptionSet,
        reference_margin: Option<f64>,
    ) -> Result<AssumptionSet, ValidationError> {
        if *self == Self::Base {
            return Ok(base.clone());
        }
        let shift = self.shift();

        let growth = base
            .revenue_growth_rates()
            .iter()
            .map(|g| g + shift.revenue_growth)
            .collect();
        let mut builder = base.to_builder().revenue_growth_rates(growth);

        if let Some(margin) = base.operating_margin().or(reference_margin) {
            builder = builder.operating_margin(margin + shift.operating_margin);
        }
        if let Some(rate) = base.discount_rate() {
            builder = builder.discount_rate(rate + shift.discount_rate);
        }
        builder.build()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised preset name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown preset '{0}' (expected bear, base or bull)")]
pub struct ParsePresetError(String);

impl FromStr for Preset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bear" => Ok(Self::Bear),
            "base" => Ok(Self::Base),
            "bull" => Ok(Self::Bull),
            _ => Err(ParsePresetError(s.to_string())),
        }
    }
}

/// Applies every preset to `base`, bearish to bullish.
pub fn preset_assumptions(
    base: &AssumptionSet,
    reference_margin: Option<f64>,
) -> Result<Vec<(Preset, AssumptionSet)>, ValidationError> {
    Preset::ALL
        .iter()
        .map(|p| p.apply(base, reference_margin).map(|a| (*p, a)))
        .collect()
}
