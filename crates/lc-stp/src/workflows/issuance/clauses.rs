use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::domain::{LcApplication, LcType};

/// The fixed set of legal clauses embedded in every pre-draft. All strings are
/// fully composed sentences; `inspection` is absent when nothing in the
/// special instructions calls for one, and callers must omit the clause rather
/// than render an empty line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseSet {
    pub partial_shipment: String,
    pub transshipment: String,
    pub insurance: String,
    pub payment: String,
    pub tolerance: String,
    pub inspection: Option<String>,
    pub charges: String,
    pub governing_rules: String,
    pub undertaking: String,
    pub presentation_period: String,
}

const DEFAULT_USANCE_DAYS: u32 = 90;

/// Inspection bodies the desk recognises by name in special instructions.
/// Keyword, then the display name used in the clause.
const INSPECTION_BODIES: [(&str, &str); 5] = [
    ("sgs", "SGS"),
    ("bureau veritas", "Bureau Veritas"),
    ("bv", "Bureau Veritas"),
    ("tuv", "TUV"),
    ("ceig", "CEIG"),
];

const INSPECTION_KEYWORDS: [&str; 10] = [
    "inspection",
    "sgs",
    "bv",
    "bureau veritas",
    "tuv",
    "tüv",
    "pre-shipment",
    "quality check",
    "ceig",
    "weight",
];

/// Compose the clause set for an application. Deterministic; every clause is a
/// simple conditional over the record's fields.
pub fn compose(application: &LcApplication) -> ClauseSet {
    ClauseSet {
        partial_shipment: partial_shipment_clause(application.shipment.partial_shipment_allowed),
        transshipment: transshipment_clause(application.shipment.transshipment_allowed),
        insurance: insurance_clause(&application.shipment.incoterms),
        payment: payment_clause(&application.payment_terms, application.lc_type),
        tolerance: tolerance_clause(application.terms.tolerance_pct),
        inspection: inspection_clause(&application.special_instructions),
        charges: charges_clause(&application.banks.issuing_bank),
        governing_rules: governing_rules_clause(),
        undertaking: undertaking_clause(&application.banks.issuing_bank),
        presentation_period: presentation_period_clause(),
    }
}

fn partial_shipment_clause(allowed: bool) -> String {
    if allowed {
        "Partial shipments are permitted under this documentary credit.".to_string()
    } else {
        "Partial shipments are not permitted under this documentary credit.".to_string()
    }
}

fn transshipment_clause(allowed: bool) -> String {
    if allowed {
        "Transshipment is permitted, provided the entire carriage is covered by one and the same transport document.".to_string()
    } else {
        "Transshipment is not permitted.".to_string()
    }
}

fn insurance_clause(incoterms: &str) -> String {
    match incoterms.trim().to_ascii_uppercase().as_str() {
        "CIF" | "CIP" => "Insurance to be effected by the seller for not less than 110% of the CIF/CIP value of the goods, covering Institute Cargo Clauses (A), war and strikes risks, with claims payable in India in the currency of the credit.".to_string(),
        "FOB" | "EXW" | "FCA" | "FAS" => "Insurance to be arranged by the buyer. The applicant confirms that marine insurance for the full invoice value of the goods has been or will be covered under its open cover policy.".to_string(),
        "DAP" | "DDP" | "DPU" => "Risk of loss or damage to the goods remains with the seller until delivery at the named place of destination; insurance during carriage is the seller's responsibility.".to_string(),
        _ => "Insurance as per the agreed trade terms between buyer and seller.".to_string(),
    }
}

fn payment_clause(payment_terms: &str, lc_type: LcType) -> String {
    let terms = payment_terms.to_ascii_lowercase();

    if terms.contains("sight") || lc_type == LcType::Sight {
        return "Available by payment at sight against presentation of documents in strict compliance with the terms of this credit.".to_string();
    }

    if terms.contains("usance") || terms.contains("days") || lc_type == LcType::Usance {
        let days = extract_day_count(payment_terms).unwrap_or(DEFAULT_USANCE_DAYS);
        return format!(
            "Available by acceptance of beneficiary's drafts drawn at {days} days from the date of shipment, payable at maturity."
        );
    }

    match lc_type {
        LcType::Standby => "This standby credit is available against the beneficiary's first written demand stating that the applicant has failed to fulfil its obligations under the underlying contract.".to_string(),
        LcType::Revolving => "This credit revolves upon each drawing and is automatically reinstated to its face amount, subject to the cumulative limit stated herein.".to_string(),
        _ => "Available by payment against presentation of conforming documents.".to_string(),
    }
}

/// First run of digits in the payment terms, e.g. "90 Days from B/L date".
fn extract_day_count(payment_terms: &str) -> Option<u32> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN
        .get_or_init(|| Regex::new(r"(\d+)").expect("static day-count pattern compiles"));
    pattern
        .captures(payment_terms)
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse::<u32>().ok())
}

fn tolerance_clause(tolerance_pct: f64) -> String {
    if tolerance_pct > 0.0 {
        format!(
            "A tolerance of {tolerance_pct}% more or {tolerance_pct}% less in the credit amount and in the quantity of goods is acceptable in accordance with Article 30 of UCP 600."
        )
    } else {
        "No tolerance in the credit amount is permitted; drawings must not exceed the credit amount.".to_string()
    }
}

fn inspection_clause(special_instructions: &str) -> Option<String> {
    let haystack = special_instructions.to_lowercase();
    let triggered = INSPECTION_KEYWORDS
        .iter()
        .any(|keyword| haystack.contains(keyword));
    if !triggered {
        return None;
    }

    let mut bodies: Vec<&str> = Vec::new();
    for (keyword, display) in INSPECTION_BODIES {
        if haystack.contains(keyword) && !bodies.contains(&display) {
            bodies.push(display);
        }
    }

    let agency = if bodies.is_empty() {
        "an internationally recognised independent inspection agency".to_string()
    } else {
        bodies.join(" / ")
    };

    Some(format!(
        "Pre-shipment inspection certificate issued by {agency} to accompany the documents."
    ))
}

fn charges_clause(issuing_bank: &str) -> String {
    let bank = display_bank(issuing_bank);
    format!(
        "All banking charges outside India are for the account of the beneficiary. Charges of {bank} within India are for the account of the applicant."
    )
}

fn governing_rules_clause() -> String {
    "This documentary credit is subject to the Uniform Customs and Practice for Documentary Credits, 2007 Revision, ICC Publication No. 600, and, to the extent not inconsistent therewith, is governed by English law.".to_string()
}

fn undertaking_clause(issuing_bank: &str) -> String {
    let bank = display_bank(issuing_bank);
    format!(
        "{bank} hereby undertakes to honour each complying presentation made under this credit in accordance with its terms and with UCP 600."
    )
}

fn presentation_period_clause() -> String {
    "Documents must be presented within 21 days after the date of shipment as per Article 14(c) of UCP 600, and in any event within the validity of this credit.".to_string()
}

fn display_bank(issuing_bank: &str) -> &str {
    let trimmed = issuing_bank.trim();
    if trimmed.is_empty() {
        "the issuing bank"
    } else {
        trimmed
    }
}
