use super::common::{application, as_of, build_service, presentation};
use crate::workflows::issuance::domain::{
    AmendmentStatus, LcReference, LifecycleStatus, PresentationStatus, StpDecision,
};
use crate::workflows::issuance::repository::LcRepository;
use crate::workflows::issuance::service::IssuanceServiceError;
use crate::workflows::kyc::{CompanyRegistry, CompanySubmission, KycDecision, RegistryRecord};

fn reference() -> LcReference {
    LcReference("LC-2026-0042".to_string())
}

#[test]
fn submit_rejects_duplicate_references() {
    let (service, _repository) = build_service();
    service.submit(application(), "maker-01").expect("first submit");
    match service.submit(application(), "maker-01") {
        Err(IssuanceServiceError::Repository(_)) => {}
        other => panic!("expected repository conflict, got {other:?}"),
    }
}

#[test]
fn submit_leaves_an_audit_entry() {
    let (service, repository) = build_service();
    service.submit(application(), "maker-01").expect("submit");
    let trail = repository.audit_trail(&reference()).expect("trail");
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].action, "application_submitted");
    assert_eq!(trail[0].actor, "maker-01");
}

#[test]
fn draft_generation_caches_artifacts_atomically_with_audit() {
    let (service, repository) = build_service();
    service.submit(application(), "maker-01").expect("submit");

    let result = service
        .generate_draft(&reference(), as_of(), "maker-01")
        .expect("draft");
    assert_eq!(result.lc_number.as_deref(), Some("LC2026LC-2026-00"));

    let record = service.get(&reference()).expect("record");
    assert_eq!(record.artifacts.lc_number.as_deref(), Some("LC2026LC-2026-00"));
    assert!(record.artifacts.draft_text.is_some());
    assert_eq!(
        record.artifacts.pdf_path.as_deref(),
        Some("LC-2026-0042_20260801.pdf")
    );

    let trail = repository.audit_trail(&reference()).expect("trail");
    assert!(trail.iter().any(|entry| entry.action == "draft_generated"));
}

#[test]
fn failed_gate_does_not_mutate_the_record() {
    let (service, repository) = build_service();
    let mut app = application();
    app.payment_terms.clear();
    service.submit(app, "maker-01").expect("submit");

    let result = service
        .generate_draft(&reference(), as_of(), "maker-01")
        .expect("returns error result");
    assert!(result.missing.contains(&"Payment Terms".to_string()));

    let record = service.get(&reference()).expect("record");
    assert_eq!(record.artifacts.draft_text, None);
    let trail = repository.audit_trail(&reference()).expect("trail");
    assert!(!trail.iter().any(|entry| entry.action == "draft_generated"));
}

#[test]
fn yes_decision_approves_and_generates_mt700() {
    let (service, _repository) = build_service();
    service.submit(application(), "maker-01").expect("submit");

    let outcome = service
        .run_decision(&reference(), "stp-engine", as_of())
        .expect("decision");
    assert_eq!(outcome.decision, StpDecision::Yes);

    let record = service.get(&reference()).expect("record");
    assert_eq!(record.status, LifecycleStatus::Approved);
    assert_eq!(record.stp.decision, StpDecision::Yes);
    assert_eq!(record.stp.operator.as_deref(), Some("stp-engine"));
    assert!(record.stp.run_at.is_some());
    let mt700 = record.artifacts.mt700_text.expect("mt700 generated");
    assert!(mt700.contains(":32B:\nUSD100000.00"));
}

#[test]
fn decision_reruns_overwrite_prior_state() {
    let (service, repository) = build_service();
    let mut app = application();
    service.submit(app.clone(), "maker-01").expect("submit");

    let first = service
        .run_decision(&reference(), "stp-engine", as_of())
        .expect("first run");
    assert_eq!(first.decision, StpDecision::Yes);

    // Collateral collapses; the rerun must fully replace the YES state.
    let mut record = service.get(&reference()).expect("record");
    app.collateral.fixed_deposit.as_mut().expect("fd").amount = 40_000.0;
    app.collateral.declared_value = 40_000.0;
    record.application = app;
    repository
        .commit(
            record,
            crate::workflows::issuance::repository::AuditEntry {
                reference: reference(),
                action: "collateral_revalued".to_string(),
                actor: "ops-01".to_string(),
                detail: "Fixed deposit partially encashed".to_string(),
                at: chrono::Utc::now(),
            },
        )
        .expect("commit");

    let second = service
        .run_decision(&reference(), "stp-engine", as_of())
        .expect("second run");
    assert_eq!(second.decision, StpDecision::No);

    let record = service.get(&reference()).expect("record");
    assert_eq!(record.stp.decision, StpDecision::No);
    assert_eq!(record.status, LifecycleStatus::Rejected);
    assert!(record.stp.reason.contains("40000.00"));
}

#[test]
fn unknown_collateral_type_reviews() {
    let (service, _repository) = build_service();
    let mut app = application();
    app.collateral.kind_tag = "ART_COLLECTION".to_string();
    service.submit(app, "maker-01").expect("submit");

    let outcome = service
        .run_decision(&reference(), "stp-engine", as_of())
        .expect("decision");
    assert_eq!(outcome.decision, StpDecision::Review);
    let record = service.get(&reference()).expect("record");
    assert_eq!(record.status, LifecycleStatus::UnderReview);
    assert_eq!(record.stp.haircut_pct, None);
}

#[test]
fn examination_replaces_rather_than_appends() {
    let (service, repository) = build_service();
    service.submit(application(), "maker-01").expect("submit");

    let mut docs = presentation();
    docs.invoice_amount = 106_000.0;
    service
        .record_presentation(docs, "checker-01")
        .expect("presentation recorded");

    let first = service
        .examine_documents(&reference(), "checker-01")
        .expect("first examination");
    assert_eq!(first.summary.total, 1);

    let second = service
        .examine_documents(&reference(), "checker-01")
        .expect("second examination");
    assert_eq!(second.summary.total, 1, "counts must not double");
    let stored = repository.discrepancies(&reference()).expect("stored");
    assert_eq!(stored.len(), 1);
}

#[test]
fn examination_updates_presentation_status() {
    let (service, repository) = build_service();
    service.submit(application(), "maker-01").expect("submit");
    service
        .record_presentation(presentation(), "checker-01")
        .expect("recorded");

    service
        .examine_documents(&reference(), "checker-01")
        .expect("examined");
    let stored = repository
        .latest_presentation(&reference())
        .expect("fetch")
        .expect("present");
    assert_eq!(stored.status, PresentationStatus::Compliant);
}

#[test]
fn examining_without_presentation_errors() {
    let (service, _repository) = build_service();
    service.submit(application(), "maker-01").expect("submit");
    match service.examine_documents(&reference(), "checker-01") {
        Err(IssuanceServiceError::NoPresentation(_)) => {}
        other => panic!("expected NoPresentation, got {other:?}"),
    }
}

#[test]
fn refusal_notice_renders_stored_discrepancies() {
    let (service, _repository) = build_service();
    service.submit(application(), "maker-01").expect("submit");
    let mut docs = presentation();
    docs.invoice_currency = "EUR".to_string();
    service
        .record_presentation(docs, "checker-01")
        .expect("recorded");
    service
        .examine_documents(&reference(), "checker-01")
        .expect("examined");

    let notice = service
        .refusal_notice(&reference(), as_of())
        .expect("notice");
    assert!(notice.contains(":77J:"));
    assert!(notice.contains("+FATAL:"));
}

#[test]
fn amendment_lifecycle_mutates_the_field_and_renders_mt707() {
    let (service, _repository) = build_service();
    service.submit(application(), "maker-01").expect("submit");
    service
        .generate_draft(&reference(), as_of(), "maker-01")
        .expect("draft");

    let requested = service
        .request_amendment(&reference(), "amount", "125000", "Order increased", "maker-01")
        .expect("requested");
    assert_eq!(requested.sequence, 1);
    assert_eq!(requested.status, AmendmentStatus::Pending);
    assert_eq!(requested.old_value, "100000.00");
    assert_eq!(requested.fee, 2500.0);

    let approved = service
        .approve_amendment(&reference(), 1, "checker-01", as_of())
        .expect("approved");
    assert_eq!(approved.status, AmendmentStatus::Approved);
    let mt707 = approved.mt707_text.expect("mt707 rendered");
    assert!(mt707.contains(":20:\nLC2026LC-2026-00"));
    assert!(mt707.contains("'125000'"));

    let record = service.get(&reference()).expect("record");
    assert_eq!(record.application.terms.amount, 125_000.0);
}

#[test]
fn amendment_guards() {
    let (service, _repository) = build_service();
    service.submit(application(), "maker-01").expect("submit");

    match service.request_amendment(&reference(), "beneficiary_bic", "X", "", "maker-01") {
        Err(IssuanceServiceError::UnknownAmendableField(field)) => {
            assert_eq!(field, "beneficiary_bic");
        }
        other => panic!("expected UnknownAmendableField, got {other:?}"),
    }

    match service.approve_amendment(&reference(), 9, "checker-01", as_of()) {
        Err(IssuanceServiceError::UnknownAmendment(9)) => {}
        other => panic!("expected UnknownAmendment, got {other:?}"),
    }

    service
        .request_amendment(&reference(), "tolerance", "10", "", "maker-01")
        .expect("requested");
    service
        .approve_amendment(&reference(), 1, "checker-01", as_of())
        .expect("approved once");
    match service.approve_amendment(&reference(), 1, "checker-01", as_of()) {
        Err(IssuanceServiceError::AmendmentAlreadyApproved(1)) => {}
        other => panic!("expected AmendmentAlreadyApproved, got {other:?}"),
    }
}

#[test]
fn defensive_numeric_amendment_parses_to_zero() {
    let (service, _repository) = build_service();
    service.submit(application(), "maker-01").expect("submit");
    service
        .request_amendment(&reference(), "amount", "plenty", "", "maker-01")
        .expect("requested");
    service
        .approve_amendment(&reference(), 1, "checker-01", as_of())
        .expect("approved");
    let record = service.get(&reference()).expect("record");
    assert_eq!(record.application.terms.amount, 0.0);
}

#[test]
fn officer_notes_accumulate_with_audit() {
    let (service, repository) = build_service();
    service.submit(application(), "maker-01").expect("submit");
    service
        .add_officer_note(&reference(), "Collateral papers sighted in original", "officer-07")
        .expect("note added");
    service
        .add_officer_note(&reference(), "Applicant requested expedited issuance", "officer-07")
        .expect("note added");

    let record = service.get(&reference()).expect("record");
    assert_eq!(record.officer_notes.len(), 2);
    let trail = repository.audit_trail(&reference()).expect("trail");
    assert_eq!(
        trail
            .iter()
            .filter(|entry| entry.action == "note_added")
            .count(),
        2
    );
}

#[test]
fn kyc_outcome_updates_compliance_flags() {
    let (service, _repository) = build_service();
    service.submit(application(), "maker-01").expect("submit");

    let registry = CompanyRegistry::from_records([RegistryRecord {
        cin: "L17110MH1998PLC114426".to_string(),
        company_name: "Meridian Textiles Pvt Ltd".to_string(),
        registration_date: "1998-06-12".to_string(),
        registered_address: "Plot 14, MIDC Industrial Area, Mumbai".to_string(),
        status: "ACTIVE".to_string(),
    }]);
    let submission = CompanySubmission {
        company_name: "Meridian Textiles Pvt Ltd".to_string(),
        cin: "L17110MH1998PLC114426".to_string(),
        registration_date: "1998-06-12".to_string(),
        registered_address: "Plot 14, MIDC Industrial Area, Mumbai".to_string(),
        status: "ACTIVE".to_string(),
    };

    let assessment = service
        .verify_applicant_kyc(&reference(), &submission, &registry, "compliance-01")
        .expect("verified");
    assert_eq!(assessment.decision, KycDecision::Valid);

    let record = service.get(&reference()).expect("record");
    assert_eq!(
        record.application.compliance.kyc,
        crate::workflows::issuance::domain::ScreeningStatus::Cleared
    );
    assert!(!record.application.compliance.all_cleared());
}
