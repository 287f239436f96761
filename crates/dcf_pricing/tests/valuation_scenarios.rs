//! End-to-end deterministic valuation checks.

use approx::assert_relative_eq;
use dcf_core::{AssumptionSet, DcfValidationError, FinancialSnapshot};
use dcf_pricing::dcf::{validate_dcf_assumptions, DcfEngine};
use dcf_pricing::ValuationError;
use proptest::prelude::*;

fn scenario_a_assumptions() -> AssumptionSet {
    AssumptionSet::builder(vec![0.10, 0.08, 0.06, 0.05, 0.04], 0.025)
        .discount_rate(0.09)
        .tax_rate(0.21)
        .capex_pct_revenue(0.05)
        .nwc_pct_revenue(0.02)
        .projection_years(5)
        .build()
        .unwrap()
}

fn scenario_a_snapshot() -> FinancialSnapshot {
    FinancialSnapshot {
        ticker: "SCNA".to_string(),
        revenue: 100.0,
        ebit: Some(15.0),
        shares_outstanding: 10.0,
        net_debt: 20.0,
        ..Default::default()
    }
}

#[test]
fn test_scenario_a_internal_consistency() {
    let r = DcfEngine::default()
        .evaluate(&scenario_a_assumptions(), &scenario_a_snapshot())
        .unwrap();

    assert_relative_eq!(
        r.enterprise_value,
        r.pv_explicit_fcf + r.pv_terminal_value,
        epsilon = 1e-9
    );
    assert_relative_eq!(r.equity_value, r.enterprise_value - 20.0, epsilon = 1e-9);
    assert_relative_eq!(r.value_per_share, r.equity_value / 10.0, epsilon = 1e-12);
    assert_eq!(r.projected_fcf.len(), 5);
    assert_eq!(r.discount_rate, 0.09);
    assert_eq!(r.upside_pct, None);
}

#[test]
fn test_scenario_b_equal_rates_fail_before_projection() {
    let a = AssumptionSet::builder(vec![0.05; 5], 0.08)
        .discount_rate(0.08)
        .build()
        .unwrap();
    // Revenue of zero would fail projection; the invariant must fire first
    let s = FinancialSnapshot {
        revenue: 0.0,
        shares_outstanding: 0.0,
        ..scenario_a_snapshot()
    };

    let err = DcfEngine::default().evaluate(&a, &s).unwrap_err();
    assert_eq!(
        err,
        ValuationError::DcfValidation(DcfValidationError::TerminalGrowthNotBelowDiscountRate {
            terminal_growth: 0.08,
            discount_rate: 0.08,
        })
    );
}

#[test]
fn test_terminal_growth_above_rate_is_rejected() {
    let a = AssumptionSet::builder(vec![0.05; 5], 0.09)
        .discount_rate(0.06)
        .build()
        .unwrap();
    let err = DcfEngine::default()
        .evaluate(&a, &scenario_a_snapshot())
        .unwrap_err();
    assert!(err.is_dcf_validation());
}

#[test]
fn test_warnings_attached_but_not_blocking() {
    let a = scenario_a_assumptions()
        .to_builder()
        .terminal_growth_rate(0.05)
        .discount_rate(0.065)
        .build()
        .unwrap();
    let report = validate_dcf_assumptions(&a, 0.065);
    assert!(report.is_valid());

    let r = DcfEngine::default().evaluate(&a, &scenario_a_snapshot()).unwrap();
    for w in &report.warnings {
        assert!(r.warnings.contains(w));
    }
    assert!(r.warnings.len() >= 2);
}

fn positive_fcf_inputs() -> impl Strategy<Value = (AssumptionSet, FinancialSnapshot)> {
    (
        prop_oneof![Just(5usize), Just(7usize), Just(10usize)],
        0.0f64..0.3,
        -0.05f64..0.05,
        0.03f64..0.25,
        0.10f64..0.40,
        0.0f64..0.05,
        10.0f64..10_000.0,
    )
        .prop_filter("terminal growth below discount rate", |(_, _, g, r, ..)| g < r)
        .prop_map(|(years, growth, terminal, rate, margin, capex, revenue)| {
            let assumptions = AssumptionSet::builder(vec![growth; years], terminal)
                .discount_rate(rate)
                .operating_margin(margin)
                .capex_pct_revenue(capex)
                .nwc_pct_revenue(0.0)
                .depreciation_pct_revenue(0.05)
                .build()
                .unwrap();
            let snapshot = FinancialSnapshot {
                ticker: "PROP".to_string(),
                revenue,
                shares_outstanding: 100.0,
                ..Default::default()
            };
            (assumptions, snapshot)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn test_enterprise_value_positive_for_positive_cash_flows(
        (assumptions, snapshot) in positive_fcf_inputs()
    ) {
        let r = DcfEngine::default().evaluate(&assumptions, &snapshot).unwrap();
        prop_assert!(r.projected_fcf.iter().all(|f| *f >= 0.0));
        prop_assert!(r.enterprise_value > 0.0);
        prop_assert!(r.enterprise_value.is_finite());
    }

    #[test]
    fn test_evaluation_is_idempotent((assumptions, snapshot) in positive_fcf_inputs()) {
        let engine = DcfEngine::default();
        let first = engine.evaluate(&assumptions, &snapshot).unwrap();
        let second = engine.evaluate(&assumptions, &snapshot).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_no_non_finite_value_escapes(
        terminal in -0.05f64..0.10,
        rate in 0.03f64..0.25,
    ) {
        let a = AssumptionSet::builder(vec![0.05; 5], terminal)
            .discount_rate(rate)
            .build()
            .unwrap();
        match DcfEngine::default().evaluate(&a, &scenario_a_snapshot()) {
            Ok(r) => {
                prop_assert!(terminal < rate);
                prop_assert!(r.value_per_share.is_finite());
                prop_assert!(r.terminal_value.is_finite());
            }
            Err(e) => prop_assert!(e.is_dcf_validation()),
        }
    }
}
