use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::registry::{CompanyRegistry, RegistryRecord};
use crate::workflows::issuance::dates;

/// Company details extracted from the applicant's constitutional documents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompanySubmission {
    pub company_name: String,
    pub cin: String,
    pub registration_date: String,
    pub registered_address: String,
    pub status: String,
}

/// Verification outcome classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KycDecision {
    Valid,
    Review,
    Invalid,
}

impl KycDecision {
    pub const fn label(self) -> &'static str {
        match self {
            KycDecision::Valid => "VALID",
            KycDecision::Review => "REVIEW",
            KycDecision::Invalid => "INVALID",
        }
    }
}

/// How closely the submitted name matched the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    Exact,
    Fuzzy,
    Mismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateMatch {
    Match,
    Mismatch,
    Unparseable,
}

/// Full verification result. Deterministic for identical inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KycAssessment {
    pub decision: KycDecision,
    pub reasons: Vec<String>,
    pub matched_record: Option<RegistryRecord>,
    pub risk_score: u8,
}

const REQUIRED_FIELDS: [(&str, fn(&CompanySubmission) -> &str); 5] = [
    ("company_name", |s| &s.company_name),
    ("cin_number", |s| &s.cin),
    ("registration_date", |s| &s.registration_date),
    ("registered_address", |s| &s.registered_address),
    ("status", |s| &s.status),
];

const ACTIVE_STATUSES: [&str; 2] = ["active", "active (registered)"];

/// Deterministic risk score bands: VALID 0-20, REVIEW 21-70, INVALID 71-100.
fn risk_score(decision: KycDecision, issue_count: usize) -> u8 {
    let (base, per_issue, floor, cap) = match decision {
        KycDecision::Valid => (10u32, 3u32, 0u32, 20u32),
        KycDecision::Review => (35, 8, 21, 70),
        KycDecision::Invalid => (75, 5, 71, 100),
    };
    let raw = base + issue_count as u32 * per_issue;
    raw.min(cap).max(floor) as u8
}

/// Strip legal suffixes, punctuation, and extra whitespace for comparison.
fn normalise_name(name: &str) -> String {
    static SUFFIXES: OnceLock<Regex> = OnceLock::new();
    static PUNCTUATION: OnceLock<Regex> = OnceLock::new();
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();

    let suffixes = SUFFIXES.get_or_init(|| {
        Regex::new(
            r"(?i)\b(pvt\.?\s*ltd\.?|private limited|ltd\.?|limited|plc|llp|opc|inc\.?|incorporated)\b",
        )
        .expect("static suffix pattern compiles")
    });
    let punctuation = PUNCTUATION
        .get_or_init(|| Regex::new(r"[^\w\s]").expect("static punctuation pattern compiles"));
    let whitespace =
        WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static whitespace pattern compiles"));

    let lowered = name.to_lowercase();
    let stripped = suffixes.replace_all(&lowered, "");
    let cleaned = punctuation.replace_all(&stripped, " ");
    whitespace.replace_all(&cleaned, " ").trim().to_string()
}

fn compare_names(submitted: &str, registry: &str) -> (NameMatch, String) {
    if submitted.trim().eq_ignore_ascii_case(registry.trim()) {
        return (NameMatch::Exact, "Company name matches exactly".to_string());
    }

    let norm_submitted = normalise_name(submitted);
    let norm_registry = normalise_name(registry);

    if norm_submitted == norm_registry {
        return (
            NameMatch::Fuzzy,
            format!(
                "Company name matches after normalisation (suffix/punctuation difference). Submitted: '{submitted}' | Registry: '{registry}'"
            ),
        );
    }
    if !norm_submitted.is_empty()
        && !norm_registry.is_empty()
        && (norm_submitted.contains(&norm_registry) || norm_registry.contains(&norm_submitted))
    {
        return (
            NameMatch::Fuzzy,
            format!("Partial name match detected. Submitted: '{submitted}' | Registry: '{registry}'"),
        );
    }

    (
        NameMatch::Mismatch,
        format!("Company name mismatch. Submitted: '{submitted}' | Registry: '{registry}'"),
    )
}

fn compare_dates(submitted: &str, registry: &str) -> (DateMatch, String) {
    let parsed_submitted = dates::parse_flexible(submitted);
    let parsed_registry = dates::parse_flexible(registry);

    match (parsed_submitted, parsed_registry) {
        (Some(a), Some(b)) if a == b => {
            (DateMatch::Match, format!("Registration date matches: {a}"))
        }
        (Some(a), Some(b)) => (
            DateMatch::Mismatch,
            format!("Registration date mismatch. Submitted: '{a}' | Registry: '{b}'"),
        ),
        _ => (
            DateMatch::Unparseable,
            format!(
                "Could not parse one or both registration dates. Submitted: '{submitted}' | Registry: '{registry}'"
            ),
        ),
    }
}

fn is_active(registry_status: &str) -> bool {
    let normalised = registry_status.trim().to_lowercase();
    ACTIVE_STATUSES.contains(&normalised.as_str())
}

fn build(
    decision: KycDecision,
    reasons: Vec<String>,
    matched_record: Option<RegistryRecord>,
    issues: usize,
) -> KycAssessment {
    KycAssessment {
        risk_score: risk_score(decision, issues),
        decision,
        reasons,
        matched_record,
    }
}

/// Verify a company submission against the registry. Compares identity
/// fields, requires an active registry status, and produces a decision plus a
/// banded risk score.
pub fn verify(submission: &CompanySubmission, registry: &CompanyRegistry) -> KycAssessment {
    let mut reasons = Vec::new();

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|(_, getter)| getter(submission).trim().is_empty())
        .map(|(field, _)| {
            format!("Missing required field: '{field}' - cannot proceed with verification")
        })
        .collect();
    if !missing.is_empty() {
        let count = missing.len();
        reasons.extend(missing);
        return build(KycDecision::Invalid, reasons, None, count);
    }

    let cin = submission.cin.trim().to_ascii_uppercase();
    let Some(matched) = registry.lookup(&cin).cloned() else {
        reasons.push(format!(
            "CIN '{cin}' not found in the official registry. Company may be fictitious, unregistered, or the CIN is incorrect"
        ));
        return build(KycDecision::Invalid, reasons, None, 1);
    };
    reasons.push(format!("CIN '{cin}' found in registry"));

    let mut issues = 0usize;

    let (name_level, name_detail) = compare_names(&submission.company_name, &matched.company_name);
    reasons.push(name_detail);
    match name_level {
        NameMatch::Mismatch => issues += 2,
        NameMatch::Fuzzy => issues += 1,
        NameMatch::Exact => {}
    }

    let (date_level, date_detail) =
        compare_dates(&submission.registration_date, &matched.registration_date);
    reasons.push(date_detail);
    match date_level {
        DateMatch::Mismatch => issues += 2,
        DateMatch::Unparseable => issues += 1,
        DateMatch::Match => {}
    }

    if !is_active(&matched.status) {
        reasons.push(format!(
            "Company is NOT active in registry. Registry status: '{}'",
            matched.status
        ));
        reasons.push(
            "CRITICAL: an LC cannot be processed for an inactive, struck-off, or dissolved entity"
                .to_string(),
        );
        return build(KycDecision::Invalid, reasons, Some(matched), issues + 2);
    }
    reasons.push(format!(
        "Company status is ACTIVE in registry ('{}')",
        matched.status
    ));

    let submitted_address = submission.registered_address.trim().to_lowercase();
    let registry_address = matched.registered_address.trim().to_lowercase();
    if !submitted_address.is_empty()
        && !registry_address.is_empty()
        && submitted_address != registry_address
    {
        reasons.push(format!(
            "Advisory: registered address shows differences (submitted '{}' vs registry '{}'); an address discrepancy alone does not fail verification",
            submission.registered_address.trim(),
            matched.registered_address
        ));
    }

    if issues == 0 {
        reasons.push(
            "All critical fields verified. Company is ACTIVE and identity confirmed".to_string(),
        );
        build(KycDecision::Valid, reasons, Some(matched), issues)
    } else {
        reasons.push(format!(
            "{issues} discrepancy(ies) detected. Manual review by a compliance officer required"
        ));
        build(KycDecision::Review, reasons, Some(matched), issues)
    }
}
