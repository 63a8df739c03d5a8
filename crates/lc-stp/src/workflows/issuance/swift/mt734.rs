use chrono::NaiveDate;

use super::super::domain::{Discrepancy, DocumentPresentation, LcApplication};
use super::super::draft;
use super::format::{render_tag, swift_amount, swift_date, wrap};

/// Tag sequence of an MT734 refusal notice.
pub const TAG_ORDER: [&str; 6] = ["20", "21", "32A", "77J", "77B", "72"];

/// Render the MT734 advice of refusal for a discrepant presentation. The
/// narrative carries one line per discrepancy, severity first.
pub fn generate(
    application: &LcApplication,
    presentation: &DocumentPresentation,
    discrepancies: &[Discrepancy],
    refusal_date: NaiveDate,
) -> String {
    let related_reference = {
        let bl = presentation.bl_number.trim();
        if bl.is_empty() {
            "NONREF".to_string()
        } else {
            bl.to_ascii_uppercase()
        }
    };

    // The refused drawing is stated in the currency the documents carry,
    // falling back to the credit currency when the invoice is silent.
    let currency = {
        let invoice = presentation.invoice_currency.trim();
        let credit = application.terms.currency.trim();
        if !invoice.is_empty() {
            invoice.to_ascii_uppercase()
        } else if !credit.is_empty() {
            credit.to_ascii_uppercase()
        } else {
            "XXX".to_string()
        }
    };

    let narrative = if discrepancies.is_empty() {
        "NO DISCREPANCIES RECORDED".to_string()
    } else {
        discrepancies
            .iter()
            .map(|item| {
                wrap(&format!(
                    "+{}: {}",
                    item.severity.label(),
                    item.description.to_ascii_uppercase()
                ))
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let sender_reference = draft::sanitize_reference(application.reference.as_str())
        .to_ascii_uppercase()
        .chars()
        .take(16)
        .collect::<String>();

    let values: [String; 6] = [
        sender_reference,
        related_reference,
        format!(
            "{}{}{}",
            swift_date(refusal_date),
            currency,
            swift_amount(presentation.invoice_amount)
        ),
        narrative,
        "/HOLD/ DOCUMENTS HELD AT YOUR DISPOSAL PENDING FURTHER INSTRUCTIONS".to_string(),
        wrap("WE REFUSE TO HONOUR THE PRESENTATION IN ACCORDANCE WITH UCP 600 ARTICLE 16. PLEASE ADVISE DISPOSAL INSTRUCTIONS"),
    ];

    TAG_ORDER
        .iter()
        .zip(values.iter())
        .map(|(tag, value)| render_tag(tag, value))
        .collect::<Vec<_>>()
        .join("\n")
}
