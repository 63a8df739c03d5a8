use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::clauses::{self, ClauseSet};
use super::dates;
use super::domain::LcApplication;
use super::fees::{self, FeeConfig, FeeSchedule};
use super::validation;
use super::words;

/// One line of a draft section: either a labelled field or free prose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DraftLine {
    Field { label: String, value: String },
    Text(String),
}

/// One titled section of the pre-draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSection {
    pub title: String,
    pub lines: Vec<DraftLine>,
}

/// Structured intermediate representation of the pre-draft. Every output
/// target (plain text, PDF bytes) renders from this one structure so the
/// facts and section order can never diverge between targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftDocument {
    pub lc_number: String,
    pub issue_date: NaiveDate,
    pub sections: Vec<DraftSection>,
}

/// Outcome of a draft generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftStatus {
    Success,
    Error,
}

/// Full result returned to callers. On Error only `missing`/`warnings` are
/// populated; the caller must surface both verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftResult {
    pub status: DraftStatus,
    pub lc_number: Option<String>,
    pub issue_date: NaiveDate,
    pub clauses: Option<ClauseSet>,
    pub fee_schedule: Option<FeeSchedule>,
    pub draft_text: Option<String>,
    pub document: Option<DraftDocument>,
    pub missing: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("draft was not generated successfully; cannot render")]
    NotGenerated,
}

/// Renders the structured draft into a styled byte stream. The styling engine
/// is an external collaborator; implementations must reproduce the same facts
/// in the same section order as the text draft.
pub trait DraftPdfRenderer {
    fn render(&self, document: &DraftDocument) -> Vec<u8>;
}

/// Deterministic stand-in renderer: emits the structured sections as plain
/// bytes. Swap in a styling engine behind the same trait for real PDFs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextPdfRenderer;

impl DraftPdfRenderer for PlainTextPdfRenderer {
    fn render(&self, document: &DraftDocument) -> Vec<u8> {
        render_text(document).into_bytes()
    }
}

/// Keep only alphanumerics, dashes, and underscores so references are safe in
/// file names; everything else becomes an underscore.
pub fn sanitize_reference(reference: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9_-]").expect("static pattern compiles"));
    pattern.replace_all(reference.trim(), "_").to_string()
}

/// Deterministic LC number: issue year plus the sanitised reference, capped at
/// the 16 characters the :20: field allows.
pub fn lc_number(reference: &str, issue_date: NaiveDate) -> String {
    let sanitized = sanitize_reference(reference).to_ascii_uppercase();
    let numbered = format!("LC{}{}", issue_date.format("%Y"), sanitized);
    numbered.chars().take(16).collect()
}

/// Deterministic PDF artifact name for a draft.
pub fn pdf_filename(reference: &str, issue_date: NaiveDate) -> String {
    format!(
        "{}_{}.pdf",
        sanitize_reference(reference),
        issue_date.format("%Y%m%d")
    )
}

fn field(label: &str, value: impl Into<String>) -> DraftLine {
    DraftLine::Field {
        label: label.to_string(),
        value: value.into(),
    }
}

fn party_lines(name: &str, address: &str, city: &str, country: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for piece in [name, address, city, country] {
        let trimmed = piece.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }
    if parts.is_empty() {
        "NOT SPECIFIED".to_string()
    } else {
        parts.join(", ")
    }
}

fn or_not_specified(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "NOT SPECIFIED".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Assemble the structured pre-draft from the application plus the composed
/// clauses and computed fees.
pub fn build_document(
    application: &LcApplication,
    clause_set: &ClauseSet,
    fee_schedule: &FeeSchedule,
    issue_date: NaiveDate,
) -> DraftDocument {
    let number = lc_number(application.reference.as_str(), issue_date);
    let terms = &application.terms;
    let currency = terms.currency.trim().to_ascii_uppercase();

    let mut sections = Vec::new();

    sections.push(DraftSection {
        title: "Parties".to_string(),
        lines: vec![
            field(
                "Applicant",
                party_lines(
                    &application.applicant.name,
                    &application.applicant.address,
                    &application.applicant.city,
                    &application.applicant.country,
                ),
            ),
            field(
                "Beneficiary",
                party_lines(
                    &application.beneficiary.name,
                    &application.beneficiary.address,
                    &application.beneficiary.city,
                    &application.beneficiary.country,
                ),
            ),
            field(
                "Beneficiary Bank",
                or_not_specified(&application.beneficiary.bank_name),
            ),
            field("Issuing Bank", or_not_specified(&application.banks.issuing_bank)),
            field(
                "Advising Bank",
                or_not_specified(&application.banks.advising_bank),
            ),
            field("Confirmation", application.banks.confirmation_label()),
        ],
    });

    sections.push(DraftSection {
        title: "Credit Terms".to_string(),
        lines: vec![
            field("LC Number", number.clone()),
            field("LC Type", application.lc_type.label()),
            field("Issue Date", issue_date.format("%d %B %Y").to_string()),
            field("Currency", or_not_specified(&currency)),
            field("Amount", format!("{:.2}", terms.amount)),
            field(
                "Amount in Words",
                format!(
                    "{} {} ONLY",
                    or_not_specified(&currency),
                    words::amount_in_words(terms.amount)
                ),
            ),
            field("Tolerance", format!("{}%", terms.tolerance_pct)),
            field("Expiry Date", dates::display_date(&terms.expiry_date)),
            field("Expiry Place", or_not_specified(&terms.expiry_place)),
            field("Payment Terms", or_not_specified(&application.payment_terms)),
        ],
    });

    sections.push(DraftSection {
        title: "Shipment".to_string(),
        lines: vec![
            field(
                "Latest Shipment Date",
                dates::display_date(&application.shipment.latest_shipment_date),
            ),
            field("Incoterms", or_not_specified(&application.shipment.incoterms)),
            field(
                "Port of Loading",
                or_not_specified(&application.shipment.port_of_loading),
            ),
            field(
                "Port of Discharge",
                or_not_specified(&application.shipment.port_of_discharge),
            ),
        ],
    });

    sections.push(DraftSection {
        title: "Goods".to_string(),
        lines: vec![
            field("Description", or_not_specified(&application.goods.description)),
            field("Quantity", or_not_specified(&application.goods.quantity)),
            field("Unit Price", format!("{:.2}", application.goods.unit_price)),
            field("HS Code", or_not_specified(&application.goods.hs_code)),
            field(
                "Country of Origin",
                or_not_specified(&application.goods.country_of_origin),
            ),
        ],
    });

    let mut document_lines: Vec<DraftLine> = application
        .documents_required
        .iter()
        .enumerate()
        .map(|(index, name)| DraftLine::Text(format!("{}. {}", index + 1, name.trim())))
        .collect();
    if !application.additional_documents.trim().is_empty() {
        document_lines.push(DraftLine::Text(format!(
            "Additional: {}",
            application.additional_documents.trim()
        )));
    }
    if document_lines.is_empty() {
        document_lines.push(DraftLine::Text("As per underlying contract.".to_string()));
    }
    sections.push(DraftSection {
        title: "Documents Required".to_string(),
        lines: document_lines,
    });

    let mut condition_lines = vec![
        DraftLine::Text(clause_set.partial_shipment.clone()),
        DraftLine::Text(clause_set.transshipment.clone()),
        DraftLine::Text(clause_set.insurance.clone()),
        DraftLine::Text(clause_set.payment.clone()),
        DraftLine::Text(clause_set.tolerance.clone()),
    ];
    if let Some(inspection) = &clause_set.inspection {
        condition_lines.push(DraftLine::Text(inspection.clone()));
    }
    condition_lines.push(DraftLine::Text(clause_set.charges.clone()));
    condition_lines.push(DraftLine::Text(clause_set.presentation_period.clone()));
    sections.push(DraftSection {
        title: "Terms and Conditions".to_string(),
        lines: condition_lines,
    });

    let mut fee_lines: Vec<DraftLine> = fee_schedule
        .lines
        .iter()
        .map(|line| field(&line.label, format!("{} {:.2}", line.currency, line.amount)))
        .collect();
    fee_lines.push(field("Subtotal", format!("{:.2}", fee_schedule.subtotal)));
    fee_lines.push(field("GST (18%)", format!("{:.2}", fee_schedule.gst)));
    fee_lines.push(field("Grand Total", format!("{:.2}", fee_schedule.grand_total)));
    fee_lines.push(field(
        "Amendment Fee (per amendment)",
        format!("INR {:.2}", fee_schedule.amendment_fee_inr),
    ));
    fee_lines.push(DraftLine::Text(fee_schedule.note.clone()));
    sections.push(DraftSection {
        title: "Fee Schedule".to_string(),
        lines: fee_lines,
    });

    sections.push(DraftSection {
        title: "Governing Rules".to_string(),
        lines: vec![
            DraftLine::Text(clause_set.governing_rules.clone()),
            DraftLine::Text(clause_set.undertaking.clone()),
        ],
    });

    sections.push(DraftSection {
        title: "Authorisation".to_string(),
        lines: vec![
            field(
                "For and on behalf of",
                or_not_specified(&application.banks.issuing_bank),
            ),
            field("Authorised Signatory", "_______________________"),
        ],
    });

    sections.push(DraftSection {
        title: "Disclaimer".to_string(),
        lines: vec![DraftLine::Text(
            "This pre-draft is issued for review purposes only and does not constitute a binding instrument until issued over the SWIFT network.".to_string(),
        )],
    });

    DraftDocument {
        lc_number: number,
        issue_date,
        sections,
    }
}

/// Render the structured draft as a human-readable text document.
pub fn render_text(document: &DraftDocument) -> String {
    let mut out = String::new();
    out.push_str("IRREVOCABLE DOCUMENTARY CREDIT - PRE-DRAFT\n");
    out.push_str(&format!("LC Number: {}\n", document.lc_number));
    out.push_str(&format!(
        "Issue Date: {}\n",
        document.issue_date.format("%d %B %Y")
    ));

    for section in &document.sections {
        out.push('\n');
        out.push_str(&section.title.to_ascii_uppercase());
        out.push('\n');
        out.push_str(&"-".repeat(section.title.len()));
        out.push('\n');
        for line in &section.lines {
            match line {
                DraftLine::Field { label, value } => {
                    out.push_str(&format!("{label}: {value}\n"));
                }
                DraftLine::Text(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }
    }

    out
}

/// Generate the pre-draft for an application. Fails (status Error) only when
/// the mandatory-field gate fails; soft warnings ride along with success.
pub fn generate(
    application: &LcApplication,
    fee_config: &FeeConfig,
    as_of: NaiveDate,
) -> DraftResult {
    let validation = validation::validate(application);
    if !validation.valid {
        return DraftResult {
            status: DraftStatus::Error,
            lc_number: None,
            issue_date: as_of,
            clauses: None,
            fee_schedule: None,
            draft_text: None,
            document: None,
            missing: validation.missing,
            warnings: validation.warnings,
        };
    }

    let clause_set = clauses::compose(application);
    let fee_schedule = fees::calculate(application, fee_config, as_of);
    let document = build_document(application, &clause_set, &fee_schedule, as_of);
    let draft_text = render_text(&document);

    DraftResult {
        status: DraftStatus::Success,
        lc_number: Some(document.lc_number.clone()),
        issue_date: as_of,
        clauses: Some(clause_set),
        fee_schedule: Some(fee_schedule),
        draft_text: Some(draft_text),
        document: Some(document),
        missing: Vec::new(),
        warnings: validation.warnings,
    }
}

/// Render the PDF byte stream for a successful draft. A failed draft is a
/// hard error, never an empty byte stream.
pub fn render_pdf(
    result: &DraftResult,
    renderer: &dyn DraftPdfRenderer,
) -> Result<Vec<u8>, DraftError> {
    if result.status != DraftStatus::Success {
        return Err(DraftError::NotGenerated);
    }
    let document = result.document.as_ref().ok_or(DraftError::NotGenerated)?;
    Ok(renderer.render(document))
}
