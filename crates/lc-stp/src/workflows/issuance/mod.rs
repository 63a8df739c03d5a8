//! Letter of credit issuance: intake validation, clause drafting, fee
//! computation, collateral decisioning, document examination, and SWIFT
//! message generation, orchestrated over a pluggable record store.

pub mod clauses;
pub mod collateral;
pub mod dates;
pub mod domain;
pub mod draft;
pub mod examination;
pub mod fees;
pub mod gateway;
pub mod repository;
pub mod service;
pub mod swift;
pub mod validation;
pub mod words;

#[cfg(test)]
mod tests;

pub use clauses::{compose, ClauseSet};
pub use collateral::{CollateralDecisionEngine, HaircutSchedule, StpOutcome};
pub use domain::{
    AmendableField, Amendment, AmendmentStatus, Applicant, BankParties, Beneficiary, Collateral,
    CollateralType, ComplianceFlags, CreditProfile, CreditTerms, Discrepancy,
    DocumentPresentation, FixedDepositCollateral, GeneratedArtifacts, GoodsDetails,
    LcApplication, LcApplicationRecord, LcReference, LcType, LifecycleStatus,
    PresentationStatus, PresentedDocument, ResolutionStatus, ScreeningStatus,
    SecuritiesCollateral, Severity, ShipmentTerms, StpDecision, StpState,
};
pub use draft::{
    generate as generate_draft, render_pdf, DraftDocument, DraftError, DraftPdfRenderer,
    DraftResult, DraftStatus, PlainTextPdfRenderer,
};
pub use examination::{
    examine, ComplianceVerdict, ExaminationReport, ExaminationSummary,
};
pub use fees::{calculate as calculate_fees, FeeConfig, FeeLine, FeeSchedule, TenorBand};
pub use gateway::{GatewayError, GatewayPayload, GatewayStatus, OutboxGateway};
pub use repository::{
    AuditEntry, InMemoryLcRepository, LcRepository, LcStatusView, RepositoryError,
};
pub use service::{IssuanceServiceError, LcIssuanceService};
pub use validation::{validate, FieldStatus, ValidationResult};
pub use words::amount_in_words;
