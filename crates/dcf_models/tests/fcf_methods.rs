//! Relationships between the free cash flow methods on identical data.

use approx::assert_relative_eq;
use dcf_core::{AssumptionSet, FinancialSnapshot};
use dcf_models::fcf::{FcfMethod, FreeCashFlowProjector};
use dcf_models::wacc::{WaccCalculator, WaccInputs};

fn snapshot(interest: f64) -> FinancialSnapshot {
    FinancialSnapshot {
        ticker: "WIDG".to_string(),
        revenue: 500.0,
        ebit: Some(75.0),
        operating_cash_flow: Some(90.0),
        interest_expense: Some(interest),
        current_price: Some(40.0),
        shares_outstanding: 25.0,
        raw_beta: Some(1.1),
        total_debt: 300.0,
        ..Default::default()
    }
}

fn assumptions() -> AssumptionSet {
    AssumptionSet::builder(vec![0.12, 0.10, 0.08, 0.06, 0.05, 0.04, 0.03], 0.02)
        .tax_rate(0.25)
        .build()
        .unwrap()
}

#[test]
fn test_owner_earnings_and_fcff_differ_by_after_tax_interest() {
    for interest in [0.0, 12.0, 40.0] {
        let s = snapshot(interest);
        let fcff = FreeCashFlowProjector::new(FcfMethod::Fcff)
            .project(&assumptions(), &s)
            .unwrap();
        let owner = FreeCashFlowProjector::new(FcfMethod::OwnerEarnings)
            .project(&assumptions(), &s)
            .unwrap();

        assert_eq!(owner.method(), FcfMethod::OwnerEarnings);
        for (f, o) in fcff.iter().zip(owner.iter()) {
            assert_relative_eq!(f.fcf - o.fcf, interest * (1.0 - 0.25), epsilon = 1e-9);
        }
    }
}

#[test]
fn test_projection_length_matches_horizon() {
    for method in FcfMethod::FALLBACK_ORDER {
        let p = FreeCashFlowProjector::new(method)
            .project(&assumptions(), &snapshot(10.0))
            .unwrap();
        assert_eq!(p.len(), 7);
        assert_eq!(p.method(), method);
        assert!(p.iter().all(|y| y.fcf.is_finite()));
    }
}

#[test]
fn test_projection_serialises_with_method() {
    let p = FreeCashFlowProjector::new(FcfMethod::Levered)
        .project(&assumptions(), &snapshot(10.0))
        .unwrap();
    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(json["method"], "levered");
    assert_eq!(json["years"].as_array().unwrap().len(), 7);
}

#[test]
fn test_snapshot_drives_both_models() {
    let s = snapshot(18.0);
    let inputs = WaccInputs::from_snapshot(&s, assumptions().tax_rate()).unwrap();
    let wacc = WaccCalculator::default().calculate(&inputs).unwrap();

    // Market equity 1000, debt 300
    assert_relative_eq!(wacc.equity_weight, 1000.0 / 1300.0, epsilon = 1e-12);
    assert_relative_eq!(wacc.cost_of_debt, 18.0 / 300.0, epsilon = 1e-12);
    assert!(wacc.risk_free_fallback_used());
}
