use super::common::{application, as_of};
use crate::workflows::issuance::draft::{
    generate, lc_number, pdf_filename, render_pdf, sanitize_reference, DraftError, DraftLine,
    DraftStatus, PlainTextPdfRenderer,
};
use crate::workflows::issuance::fees::FeeConfig;

#[test]
fn successful_draft_carries_all_artifacts() {
    let result = generate(&application(), &FeeConfig::default(), as_of());
    assert_eq!(result.status, DraftStatus::Success);
    assert!(result.missing.is_empty());

    let number = result.lc_number.as_deref().expect("lc number assigned");
    assert!(number.starts_with("LC2026"));
    assert!(number.len() <= 16);

    let clauses = result.clauses.as_ref().expect("clauses composed");
    assert!(clauses.tolerance.contains("5%"));
    let fees = result.fee_schedule.as_ref().expect("fees computed");
    assert!(fees.grand_total > 0.0);

    let text = result.draft_text.as_deref().expect("text rendered");
    assert!(text.contains("PARTIES"));
    assert!(text.contains("Meridian Textiles Pvt Ltd"));
    assert!(text.contains("ONE LAKH"));
    assert!(text.contains("not constitute a binding instrument"));
}

#[test]
fn failed_gate_blocks_drafting_and_surfaces_missing() {
    let mut app = application();
    app.goods.description.clear();
    app.banks.issuing_bank.clear();

    let result = generate(&app, &FeeConfig::default(), as_of());
    assert_eq!(result.status, DraftStatus::Error);
    assert!(result.missing.contains(&"Goods Description".to_string()));
    assert!(result.missing.contains(&"Issuing Bank".to_string()));
    assert_eq!(result.draft_text, None);
    assert_eq!(result.document, None);
}

#[test]
fn warnings_ride_along_with_success() {
    let mut app = application();
    app.terms.currency = "XPF".to_string();
    let result = generate(&app, &FeeConfig::default(), as_of());
    assert_eq!(result.status, DraftStatus::Success);
    assert!(result.warnings.iter().any(|warning| warning.contains("XPF")));
}

#[test]
fn pdf_render_requires_a_successful_draft() {
    let renderer = PlainTextPdfRenderer;
    let good = generate(&application(), &FeeConfig::default(), as_of());
    let bytes = render_pdf(&good, &renderer).expect("renders");
    assert!(!bytes.is_empty());

    let mut app = application();
    app.applicant.name.clear();
    let bad = generate(&app, &FeeConfig::default(), as_of());
    match render_pdf(&bad, &renderer) {
        Err(DraftError::NotGenerated) => {}
        other => panic!("expected NotGenerated, got {other:?}"),
    }
}

#[test]
fn pdf_bytes_are_structurally_equivalent_to_the_text_draft() {
    let result = generate(&application(), &FeeConfig::default(), as_of());
    let document = result.document.as_ref().expect("document built");
    let bytes = render_pdf(&result, &PlainTextPdfRenderer).expect("renders");
    let rendered = String::from_utf8(bytes).expect("utf8");

    let mut last_index = 0usize;
    for section in &document.sections {
        let title = section.title.to_ascii_uppercase();
        let index = rendered[last_index..]
            .find(&title)
            .unwrap_or_else(|| panic!("section '{title}' missing or out of order"));
        last_index += index;
    }
}

#[test]
fn inspection_clause_is_omitted_when_absent() {
    let result = generate(&application(), &FeeConfig::default(), as_of());
    let document = result.document.expect("document built");
    let conditions = document
        .sections
        .iter()
        .find(|section| section.title == "Terms and Conditions")
        .expect("conditions section");
    assert!(!conditions.lines.iter().any(|line| match line {
        DraftLine::Text(text) => text.contains("inspection"),
        DraftLine::Field { .. } => false,
    }));
}

#[test]
fn reference_sanitisation_is_filename_safe() {
    assert_eq!(sanitize_reference("LC/2026 #42"), "LC_2026__42");
    assert_eq!(
        pdf_filename("LC/2026 #42", as_of()),
        "LC_2026__42_20260801.pdf"
    );
    let number = lc_number("lc-2026-0042", as_of());
    assert_eq!(number, "LC2026LC-2026-00");
}
