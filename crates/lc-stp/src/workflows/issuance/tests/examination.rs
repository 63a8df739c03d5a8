use super::common::{application, presentation};
use crate::workflows::issuance::domain::{PresentedDocument, Severity};
use crate::workflows::issuance::examination::{examine, ComplianceVerdict};

#[test]
fn clean_presentation_is_compliant() {
    let report = examine(&application(), &presentation());
    assert!(report.discrepancies.is_empty(), "{:?}", report.discrepancies);
    assert_eq!(report.summary.overall, ComplianceVerdict::Compliant);
    assert_eq!(report.summary.total, 0);
}

#[test]
fn invoice_within_tolerance_passes() {
    // 100,000 at 5% tolerance: 104,999 is inside the band.
    let mut docs = presentation();
    docs.invoice_amount = 104_999.0;
    let report = examine(&application(), &docs);
    assert!(!report
        .discrepancies
        .iter()
        .any(|item| item.field == "Invoice Amount"));
}

#[test]
fn invoice_above_tolerance_is_major() {
    let mut docs = presentation();
    docs.invoice_amount = 106_000.0;
    let report = examine(&application(), &docs);
    let finding = report
        .discrepancies
        .iter()
        .find(|item| item.field == "Invoice Amount")
        .expect("amount discrepancy raised");
    assert_eq!(finding.severity, Severity::Major);
    assert_eq!(finding.rule, "amount_tolerance");
    assert_eq!(report.summary.overall, ComplianceVerdict::Discrepant);
}

// The lower-bound check fires only below half of the minimum drawable
// amount; a shortfall above that line passes unflagged.
#[test]
fn underdrawn_invoice_is_minor_only_below_half_the_floor() {
    let mut docs = presentation();
    docs.invoice_amount = 60_000.0;
    let report = examine(&application(), &docs);
    assert!(!report
        .discrepancies
        .iter()
        .any(|item| item.field == "Invoice Amount"));

    docs.invoice_amount = 40_000.0;
    let report = examine(&application(), &docs);
    let finding = report
        .discrepancies
        .iter()
        .find(|item| item.field == "Invoice Amount")
        .expect("minor shortfall raised");
    assert_eq!(finding.severity, Severity::Minor);
    assert_eq!(report.summary.overall, ComplianceVerdict::MinorDiscrepancies);
}

#[test]
fn currency_mismatch_is_fatal_and_case_insensitive() {
    let mut docs = presentation();
    docs.invoice_currency = "usd".to_string();
    let report = examine(&application(), &docs);
    assert!(report.discrepancies.is_empty());

    docs.invoice_currency = "EUR".to_string();
    let report = examine(&application(), &docs);
    let finding = report
        .discrepancies
        .iter()
        .find(|item| item.rule == "currency_mismatch")
        .expect("currency discrepancy raised");
    assert_eq!(finding.severity, Severity::Fatal);
}

#[test]
fn late_shipment_is_major() {
    let mut docs = presentation();
    docs.shipment_date = "2026-12-05".to_string();
    docs.submitted_on = "2026-12-10".to_string();
    let report = examine(&application(), &docs);
    let finding = report
        .discrepancies
        .iter()
        .find(|item| item.rule == "late_shipment")
        .expect("late shipment raised");
    assert_eq!(finding.severity, Severity::Major);
}

#[test]
fn port_matching_is_substring_both_directions() {
    let mut docs = presentation();
    docs.port_of_loading = "Nhava Sheva Terminal 2, India".to_string();
    let report = examine(&application(), &docs);
    assert!(!report
        .discrepancies
        .iter()
        .any(|item| item.rule == "port_of_loading"));

    docs.port_of_loading = "Mundra".to_string();
    docs.port_of_discharge = "Rotterdam".to_string();
    let report = examine(&application(), &docs);
    assert_eq!(
        report
            .discrepancies
            .iter()
            .filter(|item| item.rule.starts_with("port_of_"))
            .count(),
        2
    );
}

#[test]
fn missing_required_document_is_major() {
    let mut docs = presentation();
    docs.documents
        .insert(PresentedDocument::PackingList, "No".to_string());
    docs.documents.remove(&PresentedDocument::CertificateOfOrigin);
    let report = examine(&application(), &docs);

    let missing: Vec<&str> = report
        .discrepancies
        .iter()
        .filter(|item| item.rule == "missing_document")
        .map(|item| item.field.as_str())
        .collect();
    assert!(missing.contains(&"Packing List"));
    assert!(missing.contains(&"Certificate of Origin"));
    assert!(report
        .discrepancies
        .iter()
        .filter(|item| item.rule == "missing_document")
        .all(|item| item.severity == Severity::Major));
}

#[test]
fn unlisted_documents_are_not_demanded() {
    let mut app = application();
    app.documents_required = vec!["Commercial Invoice".to_string()];
    let mut docs = presentation();
    docs.documents.clear();
    docs.documents
        .insert(PresentedDocument::CommercialInvoice, "Yes".to_string());

    let report = examine(&app, &docs);
    assert!(!report
        .discrepancies
        .iter()
        .any(|item| item.rule == "missing_document"));
}

#[test]
fn presentation_after_21_days_is_fatal() {
    let mut docs = presentation();
    docs.shipment_date = "2026-10-01".to_string();
    docs.submitted_on = "2026-10-23".to_string();
    let report = examine(&application(), &docs);
    let finding = report
        .discrepancies
        .iter()
        .find(|item| item.rule == "late_presentation")
        .expect("late presentation raised");
    assert_eq!(finding.severity, Severity::Fatal);

    docs.submitted_on = "2026-10-22".to_string();
    let report = examine(&application(), &docs);
    assert!(!report
        .discrepancies
        .iter()
        .any(|item| item.rule == "late_presentation"));
}

#[test]
fn rules_do_not_short_circuit_each_other() {
    let mut docs = presentation();
    docs.invoice_amount = 106_000.0;
    docs.invoice_currency = "EUR".to_string();
    docs.shipment_date = "2026-12-05".to_string();
    docs.submitted_on = "2027-01-15".to_string();

    let report = examine(&application(), &docs);
    assert!(report.summary.fatal >= 2);
    assert!(report.summary.major >= 2);
    assert_eq!(
        report.summary.total,
        report.summary.fatal + report.summary.major + report.summary.minor
    );
    assert_eq!(report.summary.overall, ComplianceVerdict::Discrepant);
}
