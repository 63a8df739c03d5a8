use super::common::application;
use crate::workflows::issuance::clauses::compose;
use crate::workflows::issuance::domain::LcType;

#[test]
fn shipment_flags_pick_fixed_sentences() {
    let mut app = application();
    app.shipment.partial_shipment_allowed = true;
    app.shipment.transshipment_allowed = false;
    let set = compose(&app);
    assert!(set.partial_shipment.contains("are permitted"));
    assert_eq!(set.transshipment, "Transshipment is not permitted.");

    app.shipment.partial_shipment_allowed = false;
    let set = compose(&app);
    assert!(set.partial_shipment.contains("are not permitted"));
}

#[test]
fn insurance_branches_on_incoterms() {
    let mut app = application();

    app.shipment.incoterms = "CIF".to_string();
    assert!(compose(&app).insurance.contains("110%"));

    app.shipment.incoterms = "FOB".to_string();
    assert!(compose(&app).insurance.contains("arranged by the buyer"));

    app.shipment.incoterms = "DDP".to_string();
    assert!(compose(&app).insurance.contains("remains with the seller"));

    app.shipment.incoterms = "CFR".to_string();
    assert!(compose(&app)
        .insurance
        .contains("as per the agreed trade terms"));
}

#[test]
fn sight_terms_win_over_lc_type() {
    let mut app = application();
    app.lc_type = LcType::Usance;
    app.payment_terms = "Payable at sight".to_string();
    let set = compose(&app);
    assert!(set.payment.contains("payment at sight"));
}

#[test]
fn usance_extracts_day_count_from_terms() {
    let mut app = application();
    app.lc_type = LcType::Usance;
    app.payment_terms = "Usance 120 Days from shipment".to_string();
    let set = compose(&app);
    assert!(set.payment.contains("120 days"), "clause: {}", set.payment);
}

#[test]
fn usance_without_day_count_defaults_to_ninety() {
    let mut app = application();
    app.lc_type = LcType::Usance;
    app.payment_terms = "Usance".to_string();
    let set = compose(&app);
    assert!(set.payment.contains("90 days"), "clause: {}", set.payment);
}

#[test]
fn standby_and_revolving_have_dedicated_wording() {
    let mut app = application();
    app.payment_terms = "Per agreement".to_string();

    app.lc_type = LcType::Standby;
    assert!(compose(&app).payment.contains("first written demand"));

    app.lc_type = LcType::Revolving;
    assert!(compose(&app).payment.contains("revolves"));

    app.lc_type = LcType::Unspecified;
    assert!(compose(&app).payment.contains("conforming documents"));
}

#[test]
fn tolerance_states_percentage_both_ways() {
    let mut app = application();
    app.terms.tolerance_pct = 7.5;
    let set = compose(&app);
    assert!(set.tolerance.contains("7.5% more"));
    assert!(set.tolerance.contains("7.5% less"));
    assert!(set.tolerance.contains("Article 30"));

    app.terms.tolerance_pct = 0.0;
    let set = compose(&app);
    assert!(set.tolerance.contains("No tolerance"));
}

#[test]
fn inspection_clause_absent_without_keywords() {
    let mut app = application();
    app.special_instructions = "Please expedite issuance".to_string();
    assert_eq!(compose(&app).inspection, None);
}

#[test]
fn inspection_clause_names_recognised_bodies() {
    let mut app = application();
    app.special_instructions =
        "Pre-shipment inspection by SGS and Bureau Veritas required".to_string();
    let clause = compose(&app).inspection.expect("clause present");
    assert!(clause.contains("SGS"));
    assert!(clause.contains("Bureau Veritas"));
}

#[test]
fn inspection_clause_falls_back_to_generic_agency() {
    let mut app = application();
    app.special_instructions = "Quality check before shipment".to_string();
    let clause = compose(&app).inspection.expect("clause present");
    assert!(clause.contains("internationally recognised independent inspection agency"));
}

#[test]
fn template_clauses_substitute_issuing_bank() {
    let set = compose(&application());
    assert!(set.charges.contains("Barclays Bank PLC, Mumbai Branch"));
    assert!(set.undertaking.contains("Barclays Bank PLC, Mumbai Branch"));
    assert!(set.governing_rules.contains("ICC Publication No. 600"));
    assert!(set.presentation_period.contains("21 days"));
}
