//! Property tests for the shared validation layer.
//!
//! The same bound tables guard hand-built assumption sets and every
//! Monte Carlo sample, so the builder must accept exactly the in-bounds
//! region and report the offending field otherwise.

use dcf_core::validation::bounds;
use dcf_core::{AssumptionSet, Bound};
use proptest::prelude::*;

fn horizon_strategy() -> impl Strategy<Value = usize> {
    prop_oneof![Just(5usize), Just(7usize), Just(10usize)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_in_bounds_sets_always_build(
        years in horizon_strategy(),
        growth in -0.5f64..=1.0,
        terminal in -0.05f64..=0.10,
        discount in 0.03f64..=0.25,
        tax in 0.0f64..=0.6,
        capex in 0.0f64..=0.6,
    ) {
        let set = AssumptionSet::builder(vec![growth; years], terminal)
            .discount_rate(discount)
            .tax_rate(tax)
            .capex_pct_revenue(capex)
            .build();
        prop_assert!(set.is_ok(), "unexpected rejection: {:?}", set.err());
        let set = set.unwrap();
        prop_assert_eq!(set.projection_years() as usize, years);
        prop_assert!(set.field_errors().is_empty());
    }

    #[test]
    fn test_growth_above_bound_names_first_offending_year(
        years in horizon_strategy(),
        excess in 0.0001f64..5.0,
        position in 0usize..5,
    ) {
        let mut growth = vec![0.05; years];
        growth[position] = bounds::REVENUE_GROWTH.upper + excess;
        let err = AssumptionSet::builder(growth, 0.02).build().unwrap_err();
        prop_assert_eq!(err.field, format!("revenue_growth_rates[{}]", position));
        prop_assert_eq!(
            err.bound,
            Bound::Range {
                lower: bounds::REVENUE_GROWTH.lower,
                upper: bounds::REVENUE_GROWTH.upper,
            }
        );
    }

    #[test]
    fn test_unsupported_horizons_rejected(years in 1usize..15) {
        prop_assume!(![5, 7, 10].contains(&years));
        let err = AssumptionSet::builder(vec![0.05; years], 0.02).build().unwrap_err();
        prop_assert_eq!(err.field, "projection_years");
    }
}

#[test]
fn test_bound_tables_are_well_formed() {
    let tables = [
        bounds::REVENUE_GROWTH,
        bounds::TERMINAL_GROWTH,
        bounds::DISCOUNT_RATE,
        bounds::WACC,
        bounds::TAX_RATE,
        bounds::CAPEX_PCT_REVENUE,
        bounds::NWC_PCT_REVENUE,
        bounds::DEPRECIATION_PCT_REVENUE,
        bounds::OPERATING_MARGIN,
        bounds::RAW_BETA,
        bounds::RISK_FREE_RATE,
        bounds::EQUITY_RISK_PREMIUM,
        bounds::CAPITAL_WEIGHT,
    ];
    for table in tables {
        assert!(table.lower < table.upper, "{} bounds inverted", table.field);
        assert!(table.check(table.lower).is_ok());
        assert!(table.check(table.upper).is_ok());
    }
}
