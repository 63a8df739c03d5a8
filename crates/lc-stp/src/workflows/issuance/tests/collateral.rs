use proptest::prelude::*;

use crate::workflows::issuance::collateral::{CollateralDecisionEngine, HaircutSchedule};
use crate::workflows::issuance::domain::{CollateralType, StpDecision};

fn engine() -> CollateralDecisionEngine {
    CollateralDecisionEngine::default()
}

#[test]
fn haircut_schedule_matches_the_approved_table() {
    let schedule = HaircutSchedule::default();
    let expected = [
        (CollateralType::FixedDeposit, 0.0),
        (CollateralType::Cash, 0.0),
        (CollateralType::GovtBond, 0.10),
        (CollateralType::LiquidSecurity, 0.15),
        (CollateralType::Receivables, 0.25),
        (CollateralType::Property, 0.40),
        (CollateralType::Machinery, 0.50),
    ];
    for (kind, haircut) in expected {
        assert_eq!(schedule.haircut_for(kind), haircut, "{:?}", kind);
    }
}

#[test]
fn full_cover_fd_approves() {
    let outcome = engine().decide("FD", 150_000.0, 100_000.0);
    assert_eq!(outcome.decision, StpDecision::Yes);
    assert_eq!(outcome.margin_pct, Some(0.0));
    assert_eq!(outcome.eligible_value, 150_000.0);
    assert!(outcome.reason.contains("150000.00"));
    assert!(outcome.reason.contains("100000.00"));
}

#[test]
fn shortfall_inside_review_floor_refers() {
    // 80,000 eligible against 100,000: above the 75% floor of 75,000.
    let outcome = engine().decide("CASH", 80_000.0, 100_000.0);
    assert_eq!(outcome.decision, StpDecision::Review);
    assert!(outcome.reason.contains("75"));
}

#[test]
fn deep_shortfall_declines() {
    let outcome = engine().decide("CASH", 40_000.0, 100_000.0);
    assert_eq!(outcome.decision, StpDecision::No);
    assert!(outcome.reason.contains("40000.00"));
}

#[test]
fn haircut_is_applied_before_comparison() {
    // 100,000 of property at a 40% haircut leaves 60,000 eligible.
    let outcome = engine().decide("PROPERTY", 100_000.0, 60_000.0);
    assert_eq!(outcome.decision, StpDecision::Yes);
    assert!((outcome.eligible_value - 60_000.0).abs() < f64::EPSILON);

    let outcome = engine().decide("PROPERTY", 100_000.0, 61_000.0);
    assert_ne!(outcome.decision, StpDecision::Yes);
}

#[test]
fn unknown_type_reviews_and_names_the_tag() {
    let outcome = engine().decide("CRYPTO", 1_000_000.0, 100_000.0);
    assert_eq!(outcome.decision, StpDecision::Review);
    assert_eq!(outcome.margin_pct, None);
    assert_eq!(outcome.eligible_value, 0.0);
    assert!(outcome.reason.contains("CRYPTO"));
}

// The demo seed data labels these two cases YES and REVIEW respectively; the
// haircut formula says otherwise and the formula wins.
#[test]
fn token_fd_against_large_credit_declines() {
    let outcome = engine().decide("FD", 200.0, 1_250_000.0);
    assert_eq!(outcome.eligible_value, 200.0);
    assert_eq!(outcome.decision, StpDecision::No);
}

#[test]
fn token_bond_against_large_credit_declines() {
    let outcome = engine().decide("GOVT_BOND", 500.0, 3_700_000.0);
    assert!((outcome.eligible_value - 450.0).abs() < 1e-9);
    assert_eq!(outcome.decision, StpDecision::No);
}

#[test]
fn alternate_schedules_can_be_injected() {
    let schedule: HaircutSchedule = serde_json::from_value(serde_json::json!({
        "haircuts": { "GovtBond": 0.5 }
    }))
    .expect("schedule deserialises");
    let engine = CollateralDecisionEngine::new(schedule);
    let outcome = engine.decide("GOVT_BOND", 100_000.0, 50_000.0);
    assert_eq!(outcome.eligible_value, 50_000.0);
    assert_eq!(outcome.decision, StpDecision::Yes);
}

fn decision_rank(decision: StpDecision) -> u8 {
    match decision {
        StpDecision::No => 0,
        StpDecision::Review => 1,
        StpDecision::Yes => 2,
        StpDecision::Pending => unreachable!("engine never answers PENDING"),
    }
}

proptest! {
    // Raising collateral value can never worsen the decision.
    #[test]
    fn decision_is_monotonic_in_collateral_value(
        value in 0.0f64..10_000_000.0,
        increase in 0.0f64..10_000_000.0,
        lc_amount in 1.0f64..10_000_000.0,
    ) {
        let engine = engine();
        for kind in ["FD", "CASH", "GOVT_BOND", "LIQUID_SECURITY", "RECEIVABLES", "PROPERTY", "MACHINERY"] {
            let lower = engine.decide(kind, value, lc_amount);
            let higher = engine.decide(kind, value + increase, lc_amount);
            prop_assert!(
                decision_rank(higher.decision) >= decision_rank(lower.decision),
                "{kind}: {:?} -> {:?} when value rose", lower.decision, higher.decision
            );
        }
    }
}
