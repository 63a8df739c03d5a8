use chrono::NaiveDate;

use super::super::domain::Amendment;
use super::format::{render_tag, swift_date, wrap};

/// Tag sequence of an MT707 amendment notice.
pub const TAG_ORDER: [&str; 5] = ["20", "21", "26E", "30", "79"];

/// Render the MT707 body for one approved amendment against a credit.
pub fn generate(lc_number: &str, amendment: &Amendment, amendment_date: NaiveDate) -> String {
    let narrative = wrap(&format!(
        "FIELD {}: PREVIOUSLY '{}' NOW AMENDED TO '{}'. REASON: {}. ALL OTHER TERMS AND CONDITIONS REMAIN UNCHANGED.",
        amendment.field.to_ascii_uppercase(),
        amendment.old_value.trim(),
        amendment.new_value.trim(),
        if amendment.reason.trim().is_empty() {
            "NOT STATED"
        } else {
            amendment.reason.trim()
        }
    ));

    let values: [String; 5] = [
        lc_number.to_string(),
        lc_number.to_string(),
        format!("{}", amendment.sequence),
        swift_date(amendment_date),
        narrative,
    ];

    TAG_ORDER
        .iter()
        .zip(values.iter())
        .map(|(tag, value)| render_tag(tag, value))
        .collect::<Vec<_>>()
        .join("\n")
}
