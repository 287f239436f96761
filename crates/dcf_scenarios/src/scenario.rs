//! Saved scenario records.

use chrono::{DateTime, Utc};
use dcf_core::{AssumptionSet, AssumptionSetRecord, ValidationError};
use dcf_pricing::ValuationResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a saved scenario.
pub type ScenarioId = Uuid;

/// A named assumption set saved for a ticker, with the valuation it
/// produced when one was run.
///
/// Scenarios are append-only: saving the same name twice yields two
/// records with distinct ids and timestamps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Record id (UUID v4)
    pub id: ScenarioId,
    /// User-facing name, not unique
    pub name: String,
    /// Ticker the scenario belongs to
    pub ticker: String,
    /// Save time, serialised as ISO-8601
    pub saved_at: DateTime<Utc>,
    /// Assumptions exactly as saved
    pub assumptions: AssumptionSet,
    /// Valuation computed from `assumptions`, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ValuationResult>,
}

impl Scenario {
    /// Creates a record with a fresh id.
    pub fn new(
        name: impl Into<String>,
        ticker: impl Into<String>,
        saved_at: DateTime<Utc>,
        assumptions: AssumptionSet,
        result: Option<ValuationResult>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            ticker: ticker.into(),
            saved_at,
            assumptions,
            result,
        }
    }

    /// Whether the scenario belongs to `ticker` (case-insensitive).
    pub fn is_for(&self, ticker: &str) -> bool {
        self.ticker.eq_ignore_ascii_case(ticker)
    }
}

/// On-disk shape of a [`Scenario`].
///
/// Assumptions are held in their unvalidated record form so a bound
/// violation in a stored file is reported as a [`ValidationError`] rather
/// than an opaque decode failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    /// Record id
    pub id: ScenarioId,
    /// Scenario name
    pub name: String,
    /// Ticker
    pub ticker: String,
    /// Save time
    pub saved_at: DateTime<Utc>,
    /// Raw assumption fields
    pub assumptions: AssumptionSetRecord,
    /// Saved valuation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ValuationResult>,
}

impl From<Scenario> for ScenarioRecord {
    fn from(s: Scenario) -> Self {
        Self {
            id: s.id,
            name: s.name,
            ticker: s.ticker,
            saved_at: s.saved_at,
            assumptions: s.assumptions.into(),
            result: s.result,
        }
    }
}

impl TryFrom<ScenarioRecord> for Scenario {
    type Error = ValidationError;

    fn try_from(r: ScenarioRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            name: r.name,
            ticker: r.ticker,
            saved_at: r.saved_at,
            assumptions: AssumptionSet::try_from(r.assumptions)?,
            result: r.result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assumptions() -> AssumptionSet {
        AssumptionSet::builder(vec![0.10, 0.08, 0.06, 0.05, 0.04], 0.025)
            .discount_rate(0.09)
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_assigns_distinct_ids() {
        let now = Utc::now();
        let a = Scenario::new("base", "ACME", now, assumptions(), None);
        let b = Scenario::new("base", "ACME", now, assumptions(), None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_ticker_match_ignores_case() {
        let s = Scenario::new("base", "acme", Utc::now(), assumptions(), None);
        assert!(s.is_for("ACME"));
        assert!(!s.is_for("ACM"));
    }

    #[test]
    fn test_record_conversion_revalidates() {
        let s = Scenario::new("base", "ACME", Utc::now(), assumptions(), None);
        let mut record = ScenarioRecord::from(s.clone());
        assert_eq!(Scenario::try_from(record.clone()).unwrap(), s);

        record.assumptions.tax_rate = 0.95;
        let err = Scenario::try_from(record).unwrap_err();
        assert_eq!(err.field, "tax_rate");
    }

    #[test]
    fn test_saved_at_serialises_iso8601() {
        let saved_at = DateTime::parse_from_rfc3339("2026-03-01T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let s = Scenario::new("base", "ACME", saved_at, assumptions(), None);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["saved_at"], "2026-03-01T12:30:00Z");
        assert!(json.get("result").is_none());
    }
}
