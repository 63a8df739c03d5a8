use serde::{Deserialize, Serialize};

use super::dates;
use super::domain::{
    Discrepancy, DocumentPresentation, LcApplication, PresentedDocument, ResolutionStatus,
    Severity,
};

/// UCP 600 Article 14(c) presentation window, in days after shipment.
const PRESENTATION_WINDOW_DAYS: i64 = 21;

/// Verdict over a whole presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceVerdict {
    Compliant,
    MinorDiscrepancies,
    Discrepant,
}

impl ComplianceVerdict {
    pub const fn label(self) -> &'static str {
        match self {
            ComplianceVerdict::Compliant => "COMPLIANT",
            ComplianceVerdict::MinorDiscrepancies => "MINOR_DISCREPANCIES",
            ComplianceVerdict::Discrepant => "DISCREPANT",
        }
    }
}

/// Severity tallies plus the overall verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExaminationSummary {
    pub overall: ComplianceVerdict,
    pub fatal: usize,
    pub major: usize,
    pub minor: usize,
    pub total: usize,
}

/// Full output of one examination run. Each run stands alone; persisting a
/// report replaces any earlier discrepancy set for the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExaminationReport {
    pub discrepancies: Vec<Discrepancy>,
    pub summary: ExaminationSummary,
}

fn finding(
    field: &str,
    lc_value: String,
    document_value: String,
    severity: Severity,
    rule: &str,
    description: String,
) -> Discrepancy {
    Discrepancy {
        field: field.to_string(),
        lc_value,
        document_value,
        severity,
        rule: rule.to_string(),
        description,
        resolution: ResolutionStatus::Open,
    }
}

/// Examine a presentation against the credit's terms. Rules run independently;
/// no rule short-circuits another.
pub fn examine(
    application: &LcApplication,
    presentation: &DocumentPresentation,
) -> ExaminationReport {
    let mut discrepancies = Vec::new();

    check_invoice_amount(application, presentation, &mut discrepancies);
    check_currency(application, presentation, &mut discrepancies);
    check_late_shipment(application, presentation, &mut discrepancies);
    check_ports(application, presentation, &mut discrepancies);
    check_required_documents(application, presentation, &mut discrepancies);
    check_presentation_window(presentation, &mut discrepancies);

    let fatal = discrepancies
        .iter()
        .filter(|item| item.severity == Severity::Fatal)
        .count();
    let major = discrepancies
        .iter()
        .filter(|item| item.severity == Severity::Major)
        .count();
    let minor = discrepancies
        .iter()
        .filter(|item| item.severity == Severity::Minor)
        .count();

    let overall = if fatal > 0 || major > 0 {
        ComplianceVerdict::Discrepant
    } else if minor > 0 {
        ComplianceVerdict::MinorDiscrepancies
    } else {
        ComplianceVerdict::Compliant
    };

    ExaminationReport {
        summary: ExaminationSummary {
            overall,
            fatal,
            major,
            minor,
            total: discrepancies.len(),
        },
        discrepancies,
    }
}

/// Invoice amount must sit inside the tolerance band. Exceeding the upper
/// bound is MAJOR; falling below half of the lower bound is MINOR. The
/// asymmetric lower check reproduces the desk's long-standing rule and is
/// pinned by tests.
fn check_invoice_amount(
    application: &LcApplication,
    presentation: &DocumentPresentation,
    discrepancies: &mut Vec<Discrepancy>,
) {
    let lc_amount = application.terms.amount;
    if lc_amount <= 0.0 {
        return;
    }
    let tolerance = application.terms.tolerance_pct / 100.0;
    let max_amount = lc_amount * (1.0 + tolerance);
    let min_amount = lc_amount * (1.0 - tolerance);
    let invoice = presentation.invoice_amount;

    if invoice > max_amount {
        discrepancies.push(finding(
            "Invoice Amount",
            format!("{max_amount:.2} (max with {}% tolerance)", application.terms.tolerance_pct),
            format!("{invoice:.2}"),
            Severity::Major,
            "amount_tolerance",
            format!(
                "Invoice amount {invoice:.2} exceeds the maximum drawable amount {max_amount:.2}"
            ),
        ));
    } else if invoice < min_amount * 0.5 {
        discrepancies.push(finding(
            "Invoice Amount",
            format!("{min_amount:.2} (min with {}% tolerance)", application.terms.tolerance_pct),
            format!("{invoice:.2}"),
            Severity::Minor,
            "amount_tolerance",
            format!(
                "Invoice amount {invoice:.2} is below half of the minimum drawable amount {min_amount:.2}"
            ),
        ));
    }
}

fn check_currency(
    application: &LcApplication,
    presentation: &DocumentPresentation,
    discrepancies: &mut Vec<Discrepancy>,
) {
    let lc_currency = application.terms.currency.trim();
    let invoice_currency = presentation.invoice_currency.trim();
    if lc_currency.is_empty() || invoice_currency.is_empty() {
        return;
    }
    if !lc_currency.eq_ignore_ascii_case(invoice_currency) {
        discrepancies.push(finding(
            "Invoice Currency",
            lc_currency.to_string(),
            invoice_currency.to_string(),
            Severity::Fatal,
            "currency_mismatch",
            format!(
                "Invoice currency {invoice_currency} differs from the credit currency {lc_currency}"
            ),
        ));
    }
}

fn check_late_shipment(
    application: &LcApplication,
    presentation: &DocumentPresentation,
    discrepancies: &mut Vec<Discrepancy>,
) {
    let (Some(shipped), Some(latest)) = (
        dates::parse_flexible(&presentation.shipment_date),
        dates::parse_flexible(&application.shipment.latest_shipment_date),
    ) else {
        return;
    };
    if shipped > latest {
        discrepancies.push(finding(
            "Shipment Date",
            latest.to_string(),
            shipped.to_string(),
            Severity::Major,
            "late_shipment",
            format!("Goods shipped on {shipped}, after the latest shipment date {latest}"),
        ));
    }
}

/// Ports match when either value contains the other, case-insensitively.
fn ports_match(lc_port: &str, document_port: &str) -> bool {
    let lc = lc_port.trim().to_lowercase();
    let document = document_port.trim().to_lowercase();
    lc.contains(&document) || document.contains(&lc)
}

fn check_ports(
    application: &LcApplication,
    presentation: &DocumentPresentation,
    discrepancies: &mut Vec<Discrepancy>,
) {
    let checks = [
        (
            "Port of Loading",
            "port_of_loading",
            &application.shipment.port_of_loading,
            &presentation.port_of_loading,
        ),
        (
            "Port of Discharge",
            "port_of_discharge",
            &application.shipment.port_of_discharge,
            &presentation.port_of_discharge,
        ),
    ];

    for (field, rule, lc_port, document_port) in checks {
        if lc_port.trim().is_empty() || document_port.trim().is_empty() {
            continue;
        }
        if !ports_match(lc_port, document_port) {
            discrepancies.push(finding(
                field,
                lc_port.trim().to_string(),
                document_port.trim().to_string(),
                Severity::Major,
                rule,
                format!(
                    "{field} on documents '{}' does not correspond to the credit's '{}'",
                    document_port.trim(),
                    lc_port.trim()
                ),
            ));
        }
    }
}

/// A presented-document entry counts as absent when the checklist value is
/// blank or an explicit "No".
fn is_absent(marker: Option<&String>) -> bool {
    match marker {
        None => true,
        Some(value) => {
            let trimmed = value.trim();
            trimmed.is_empty() || trimmed.eq_ignore_ascii_case("no")
        }
    }
}

fn check_required_documents(
    application: &LcApplication,
    presentation: &DocumentPresentation,
    discrepancies: &mut Vec<Discrepancy>,
) {
    for required in &application.documents_required {
        let required_lower = required.to_lowercase();
        let Some(kind) = PresentedDocument::all()
            .into_iter()
            .find(|kind| required_lower.contains(&kind.match_key()))
        else {
            continue;
        };

        if is_absent(presentation.documents.get(&kind)) {
            discrepancies.push(finding(
                kind.label(),
                required.trim().to_string(),
                "Not presented".to_string(),
                Severity::Major,
                "missing_document",
                format!("Required document '{}' was not presented", required.trim()),
            ));
        }
    }
}

fn check_presentation_window(
    presentation: &DocumentPresentation,
    discrepancies: &mut Vec<Discrepancy>,
) {
    let (Some(shipped), Some(submitted)) = (
        dates::parse_flexible(&presentation.shipment_date),
        dates::parse_flexible(&presentation.submitted_on),
    ) else {
        return;
    };
    let elapsed = (submitted - shipped).num_days();
    if elapsed > PRESENTATION_WINDOW_DAYS {
        discrepancies.push(finding(
            "Presentation Date",
            format!("Within {PRESENTATION_WINDOW_DAYS} days of shipment"),
            format!("{elapsed} days after shipment"),
            Severity::Fatal,
            "late_presentation",
            format!(
                "Documents presented {elapsed} days after shipment, beyond the {PRESENTATION_WINDOW_DAYS} day presentation period"
            ),
        ));
    }
}
