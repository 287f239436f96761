//! Revenue and free cash flow projection.

use super::method::FcfMethod;
use super::projection::{CashFlowProjection, ProjectedYear};
use crate::error::ModelError;
use dcf_core::fallback::resolve_first;
use dcf_core::validation::bounds::OPERATING_MARGIN;
use dcf_core::validation::{check_finite, check_positive};
use dcf_core::{AssumptionSet, FailedMethod, FinancialSnapshot, MissingDataError};
use tracing::info;

/// Resolved drivers for the method that will be used.
#[derive(Clone, Copy, Debug)]
enum Drivers {
    Simple { ocf_margin: f64 },
    Levered { ocf_margin: f64, interest: f64 },
    OwnerEarnings { margin: f64, interest: f64 },
    Fcff { margin: f64 },
}

/// Projects free cash flows over the explicit horizon.
///
/// The requested method is tried first. When the snapshot lacks an input it
/// needs, the next method in [`FcfMethod::FALLBACK_ORDER`] is tried, and the
/// resulting [`CashFlowProjection`] records both the requested and the used
/// method.
///
/// # Examples
///
/// ```rust
/// use dcf_core::{AssumptionSet, FinancialSnapshot};
/// use dcf_models::fcf::{FcfMethod, FreeCashFlowProjector};
///
/// // No EBIT and no operating margin assumption: FCFF is not viable
/// let snapshot = FinancialSnapshot {
///     revenue: 100.0,
///     operating_cash_flow: Some(18.0),
///     shares_outstanding: 10.0,
///     ..Default::default()
/// };
/// let assumptions = AssumptionSet::builder(vec![0.05; 5], 0.02).build().unwrap();
///
/// let projection = FreeCashFlowProjector::new(FcfMethod::Fcff)
///     .project(&assumptions, &snapshot)
///     .unwrap();
/// assert_eq!(projection.requested(), FcfMethod::Fcff);
/// assert_eq!(projection.method(), FcfMethod::Simple);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FreeCashFlowProjector {
    requested: FcfMethod,
}

impl Default for FreeCashFlowProjector {
    fn default() -> Self {
        Self::new(FcfMethod::Fcff)
    }
}

impl FreeCashFlowProjector {
    /// Creates a projector for the requested method.
    pub fn new(requested: FcfMethod) -> Self {
        Self { requested }
    }

    /// Requested method.
    #[inline]
    pub fn requested(&self) -> FcfMethod {
        self.requested
    }

    /// Projects `assumptions.projection_years()` years from the snapshot's
    /// base-year revenue.
    ///
    /// # Errors
    ///
    /// - [`ModelError::Validation`] if base revenue is not positive, the
    ///   operating margin is out of bounds or a projected free cash flow is
    ///   not finite
    /// - [`ModelError::MissingData`] naming every method attempted when none
    ///   is viable
    pub fn project(
        &self,
        assumptions: &AssumptionSet,
        snapshot: &FinancialSnapshot,
    ) -> Result<CashFlowProjection, ModelError> {
        let base_revenue = check_positive(snapshot.revenue, "revenue")?;

        // A margin read off the snapshot meets the same bound as an assumed one
        let margin = assumptions
            .operating_margin()
            .or_else(|| snapshot.operating_margin())
            .map(|m| OPERATING_MARGIN.check(m))
            .transpose()?;
        let ocf_margin = snapshot.operating_cash_flow_margin();
        let interest = snapshot.interest_expense;

        let resolution = resolve_first(&self.requested.chain(), |method| {
            drivers_for(*method, margin, ocf_margin, interest)
        })
        .map_err(MissingDataError::from)?;

        let fallbacks: Vec<FailedMethod> = resolution
            .failed
            .iter()
            .map(|a| FailedMethod {
                method: a.strategy.to_string(),
                missing: a.missing.iter().map(|m| m.to_string()).collect(),
            })
            .collect();

        if resolution.fallback_used() {
            info!(
                requested = %self.requested,
                used = %resolution.selected,
                attempted = ?fallbacks.iter().map(|f| f.method.as_str()).collect::<Vec<_>>(),
                "Requested FCF method not viable; using fallback"
            );
        }

        let drivers = resolution.value;
        let tax = assumptions.tax_rate();
        let mut revenue = base_revenue;
        let mut years = Vec::with_capacity(assumptions.projection_years() as usize);

        for (i, growth) in assumptions.revenue_growth_rates().iter().enumerate() {
            revenue *= 1.0 + growth;

            let depreciation = revenue * assumptions.depreciation_pct_revenue();
            let capex = revenue * assumptions.capex_pct_revenue();
            let nwc_change = revenue * assumptions.nwc_pct_revenue();
            let ebit = margin.map(|m| revenue * m);
            let nopat = ebit.map(|e| e * (1.0 - tax));
            let net_income = ebit.zip(interest).map(|(e, i)| (e - i) * (1.0 - tax));
            let operating_cash_flow = ocf_margin.map(|m| revenue * m);

            let fcf = match drivers {
                Drivers::Simple { ocf_margin } => revenue * ocf_margin - capex,
                Drivers::Levered {
                    ocf_margin,
                    interest,
                } => revenue * ocf_margin - capex - interest,
                Drivers::OwnerEarnings { margin, interest } => {
                    (revenue * margin - interest) * (1.0 - tax) + depreciation - capex - nwc_change
                }
                Drivers::Fcff { margin } => {
                    revenue * margin * (1.0 - tax) + depreciation - capex - nwc_change
                }
            };
            let fcf = check_finite(fcf, format!("fcf[{}]", i))?;

            years.push(ProjectedYear {
                year: i as u32 + 1,
                revenue,
                ebit,
                nopat,
                net_income,
                operating_cash_flow,
                interest_expense: interest,
                depreciation,
                capex,
                nwc_change,
                fcf,
            });
        }

        Ok(CashFlowProjection::new(
            years,
            resolution.selected,
            self.requested,
            fallbacks,
        ))
    }
}

fn drivers_for(
    method: FcfMethod,
    margin: Option<f64>,
    ocf_margin: Option<f64>,
    interest: Option<f64>,
) -> Result<Drivers, Vec<&'static str>> {
    let inputs = [
        ("operating_margin", margin),
        ("operating_cash_flow", ocf_margin),
        ("interest_expense", interest),
    ];
    let missing: Vec<&'static str> = method
        .required_inputs()
        .iter()
        .copied()
        .filter(|name| {
            inputs
                .iter()
                .any(|(input, value)| input == name && value.is_none())
        })
        .collect();

    match (method, margin, ocf_margin, interest) {
        (FcfMethod::Simple, _, Some(ocf_margin), _) => Ok(Drivers::Simple { ocf_margin }),
        (FcfMethod::Levered, _, Some(ocf_margin), Some(interest)) => Ok(Drivers::Levered {
            ocf_margin,
            interest,
        }),
        (FcfMethod::OwnerEarnings, Some(margin), _, Some(interest)) => {
            Ok(Drivers::OwnerEarnings { margin, interest })
        }
        (FcfMethod::Fcff, Some(margin), _, _) => Ok(Drivers::Fcff { margin }),
        _ => Err(missing),
    }
}
