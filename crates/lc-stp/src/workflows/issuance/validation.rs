use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::dates;
use super::domain::LcApplication;

/// ISO 4217 subset covering the trade currencies the desk issues in. An
/// unrecognised code is a warning, never a hard stop.
pub const ACCEPTED_CURRENCIES: [&str; 24] = [
    "USD", "EUR", "GBP", "JPY", "CHF", "AUD", "CAD", "SGD", "HKD", "INR", "AED", "CNY", "MYR",
    "THB", "ZAR", "BRL", "NOK", "SEK", "DKK", "NZD", "KWD", "QAR", "SAR", "BHD",
];

/// Presence and value snapshot for one checked field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldStatus {
    pub label: String,
    pub present: bool,
    pub value: String,
}

/// Outcome of the mandatory-field gate. `valid` is true iff `missing` is
/// empty; warnings never block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub missing: Vec<String>,
    pub warnings: Vec<String>,
    pub field_status: BTreeMap<String, FieldStatus>,
}

/// A field counts as present when its trimmed form is neither empty nor the
/// literal "0" — blank numeric inputs arrive as "0" from the intake forms.
fn is_present(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed != "0"
}

fn mandatory_fields(application: &LcApplication) -> [(&'static str, &'static str, String); 10] {
    [
        (
            "applicant_name",
            "Applicant Name",
            application.applicant.name.clone(),
        ),
        (
            "beneficiary_name",
            "Beneficiary Name",
            application.beneficiary.name.clone(),
        ),
        (
            "lc_amount",
            "LC Amount",
            if application.terms.amount == 0.0 {
                "0".to_string()
            } else {
                format!("{:.2}", application.terms.amount)
            },
        ),
        ("lc_currency", "LC Currency", application.terms.currency.clone()),
        ("expiry_date", "Expiry Date", application.terms.expiry_date.clone()),
        (
            "port_of_loading",
            "Port of Loading",
            application.shipment.port_of_loading.clone(),
        ),
        (
            "port_of_discharge",
            "Port of Discharge",
            application.shipment.port_of_discharge.clone(),
        ),
        (
            "goods_description",
            "Goods Description",
            application.goods.description.clone(),
        ),
        ("payment_terms", "Payment Terms", application.payment_terms.clone()),
        ("issuing_bank", "Issuing Bank", application.banks.issuing_bank.clone()),
    ]
}

/// Check mandatory-field presence and basic cross-field consistency. Pure; the
/// caller decides whether a failed gate blocks drafting.
pub fn validate(application: &LcApplication) -> ValidationResult {
    let mut missing = Vec::new();
    let mut field_status = BTreeMap::new();

    for (key, label, value) in mandatory_fields(application) {
        let present = is_present(&value);
        if !present {
            missing.push(label.to_string());
        }
        field_status.insert(
            key.to_string(),
            FieldStatus {
                label: label.to_string(),
                present,
                value,
            },
        );
    }

    let mut warnings = Vec::new();

    if let (Some(shipment), Some(expiry)) = (
        dates::parse_flexible(&application.shipment.latest_shipment_date),
        dates::parse_flexible(&application.terms.expiry_date),
    ) {
        if shipment >= expiry {
            warnings.push(format!(
                "Latest shipment date {} is not before expiry date {}; documents could become unpresentable",
                shipment, expiry
            ));
        }
    }

    if application.terms.amount <= 0.0 {
        warnings.push("LC amount is not positive".to_string());
    }

    let currency = application.terms.currency.trim().to_ascii_uppercase();
    if !currency.is_empty() && !ACCEPTED_CURRENCIES.contains(&currency.as_str()) {
        warnings.push(format!(
            "Currency '{}' is not a recognised ISO 4217 trade currency",
            currency
        ));
    }

    ValidationResult {
        valid: missing.is_empty(),
        missing,
        warnings,
        field_status,
    }
}
