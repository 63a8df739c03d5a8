//! Deterministic corporate KYC stand-in: verifies an applicant company
//! against a local registry dataset. No network lookups; identical input
//! always yields the identical decision and risk score.

pub mod registry;
pub mod verifier;

pub use registry::{CompanyRegistry, KycError, RegistryRecord};
pub use verifier::{
    verify, CompanySubmission, KycAssessment, KycDecision, NameMatch,
};
