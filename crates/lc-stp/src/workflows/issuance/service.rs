use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{NaiveDate, Utc};
use tracing::info;

use super::collateral::{CollateralDecisionEngine, StpOutcome};
use super::domain::{
    AmendableField, Amendment, AmendmentStatus, DocumentPresentation, LcApplication,
    LcApplicationRecord, LcReference, LifecycleStatus, PresentationStatus, ScreeningStatus,
    StpDecision, StpState,
};
use super::draft::{self, DraftResult, DraftStatus};
use super::examination::{self, ComplianceVerdict, ExaminationReport};
use super::fees::FeeConfig;
use super::repository::{AuditEntry, LcRepository, RepositoryError};
use super::swift::{mt700, mt707, mt734};
use super::validation::{self, ValidationResult};
use crate::workflows::kyc::{self, CompanyRegistry, CompanySubmission, KycAssessment, KycDecision};

/// Error raised by the issuance service.
#[derive(Debug, thiserror::Error)]
pub enum IssuanceServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("application '{0}' not found")]
    UnknownApplication(String),
    #[error("no documents have been presented under application '{0}'")]
    NoPresentation(String),
    #[error("'{0}' is not an amendable field")]
    UnknownAmendableField(String),
    #[error("amendment {0} does not exist for this application")]
    UnknownAmendment(u32),
    #[error("amendment {0} has already been approved")]
    AmendmentAlreadyApproved(u32),
}

/// Service composing the validator, engines, and renderers over a record
/// store. Mutating runs against one application reference are serialised
/// through a per-reference lock so re-runs replace state without interleaving.
pub struct LcIssuanceService<R> {
    repository: Arc<R>,
    fees: FeeConfig,
    engine: CollateralDecisionEngine,
    run_locks: Mutex<HashMap<LcReference, Arc<Mutex<()>>>>,
}

impl<R> LcIssuanceService<R>
where
    R: LcRepository + 'static,
{
    pub fn new(repository: Arc<R>, fees: FeeConfig, engine: CollateralDecisionEngine) -> Self {
        Self {
            repository,
            fees,
            engine,
            run_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn fee_config(&self) -> &FeeConfig {
        &self.fees
    }

    fn run_lock(&self, reference: &LcReference) -> Arc<Mutex<()>> {
        let mut locks = self.run_locks.lock().expect("run lock map poisoned");
        locks
            .entry(reference.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn fetch_record(
        &self,
        reference: &LcReference,
    ) -> Result<LcApplicationRecord, IssuanceServiceError> {
        self.repository
            .fetch(reference)?
            .ok_or_else(|| IssuanceServiceError::UnknownApplication(reference.0.clone()))
    }

    fn audit(reference: &LcReference, action: &str, actor: &str, detail: String) -> AuditEntry {
        AuditEntry {
            reference: reference.clone(),
            action: action.to_string(),
            actor: actor.to_string(),
            detail,
            at: Utc::now(),
        }
    }

    /// Register a new application. The reference must be unused; lifecycle
    /// starts at Pending Review.
    pub fn submit(
        &self,
        application: LcApplication,
        actor: &str,
    ) -> Result<LcApplicationRecord, IssuanceServiceError> {
        let reference = application.reference.clone();
        let record = LcApplicationRecord {
            application,
            status: LifecycleStatus::PendingReview,
            officer_notes: Vec::new(),
            stp: StpState::default(),
            artifacts: Default::default(),
        };
        let stored = self.repository.insert(record)?;
        self.repository.commit(
            stored.clone(),
            Self::audit(
                &reference,
                "application_submitted",
                actor,
                "Application registered for review".to_string(),
            ),
        )?;
        info!(reference = %reference.0, "application submitted");
        Ok(stored)
    }

    /// Run the mandatory-field gate without mutating anything.
    pub fn validate(
        &self,
        reference: &LcReference,
    ) -> Result<ValidationResult, IssuanceServiceError> {
        let record = self.fetch_record(reference)?;
        Ok(validation::validate(&record.application))
    }

    /// Generate the pre-draft and cache the artifacts on the record. A failed
    /// mandatory-field gate returns the Error result without touching state;
    /// the caller must surface `missing` and `warnings` verbatim.
    pub fn generate_draft(
        &self,
        reference: &LcReference,
        as_of: NaiveDate,
        actor: &str,
    ) -> Result<DraftResult, IssuanceServiceError> {
        let lock = self.run_lock(reference);
        let _guard: MutexGuard<'_, ()> = lock.lock().expect("run lock poisoned");

        let mut record = self.fetch_record(reference)?;
        let result = draft::generate(&record.application, &self.fees, as_of);
        if result.status != DraftStatus::Success {
            return Ok(result);
        }

        record.artifacts.lc_number = result.lc_number.clone();
        record.artifacts.draft_text = result.draft_text.clone();
        record.artifacts.pdf_path = Some(draft::pdf_filename(reference.as_str(), as_of));
        record.artifacts.drafted_at = Some(Utc::now());

        self.repository.commit(
            record,
            Self::audit(
                reference,
                "draft_generated",
                actor,
                format!(
                    "Pre-draft generated under LC number {}",
                    result.lc_number.as_deref().unwrap_or("-")
                ),
            ),
        )?;
        Ok(result)
    }

    /// Run the collateral adequacy decision. Always recomputed from the
    /// current collateral fields; all prior decision state is overwritten in
    /// one commit. A YES decision also regenerates the MT700 draft text.
    pub fn run_decision(
        &self,
        reference: &LcReference,
        operator: &str,
        as_of: NaiveDate,
    ) -> Result<StpOutcome, IssuanceServiceError> {
        let lock = self.run_lock(reference);
        let _guard = lock.lock().expect("run lock poisoned");

        let mut record = self.fetch_record(reference)?;
        let collateral = &record.application.collateral;
        let outcome = self.engine.decide(
            &collateral.kind_tag,
            collateral.effective_value(),
            record.application.terms.amount,
        );

        record.stp = StpState {
            decision: outcome.decision,
            haircut_pct: outcome.margin_pct,
            eligible_value: outcome.eligible_value,
            reason: outcome.reason.clone(),
            run_at: Some(Utc::now()),
            operator: Some(operator.to_string()),
        };
        record.status = match outcome.decision {
            StpDecision::Yes => LifecycleStatus::Approved,
            StpDecision::No => LifecycleStatus::Rejected,
            _ => LifecycleStatus::UnderReview,
        };

        if outcome.decision == StpDecision::Yes {
            record.artifacts.mt700_text =
                Some(mt700::generate(&record.application, as_of));
            record.artifacts.mt700_at = Some(Utc::now());
        }

        self.repository.commit(
            record,
            Self::audit(
                reference,
                "stp_decision",
                operator,
                outcome.reason.clone(),
            ),
        )?;
        info!(
            reference = %reference.0,
            decision = outcome.decision.label(),
            "collateral decision recorded"
        );
        Ok(outcome)
    }

    /// Record a presentation of shipping documents under the credit.
    pub fn record_presentation(
        &self,
        presentation: DocumentPresentation,
        actor: &str,
    ) -> Result<(), IssuanceServiceError> {
        let reference = presentation.reference.clone();
        let record = self.fetch_record(&reference)?;
        self.repository.insert_presentation(presentation)?;
        self.repository.commit(
            record,
            Self::audit(
                &reference,
                "documents_presented",
                actor,
                "Shipping documents lodged for examination".to_string(),
            ),
        )?;
        Ok(())
    }

    /// Examine the most recent presentation. The resulting discrepancy set
    /// replaces whatever a previous run stored; counts never accumulate.
    pub fn examine_documents(
        &self,
        reference: &LcReference,
        actor: &str,
    ) -> Result<ExaminationReport, IssuanceServiceError> {
        let lock = self.run_lock(reference);
        let _guard = lock.lock().expect("run lock poisoned");

        let record = self.fetch_record(reference)?;
        let mut presentation = self
            .repository
            .latest_presentation(reference)?
            .ok_or_else(|| IssuanceServiceError::NoPresentation(reference.0.clone()))?;

        let report = examination::examine(&record.application, &presentation);

        presentation.status = match report.summary.overall {
            ComplianceVerdict::Compliant => PresentationStatus::Compliant,
            _ => PresentationStatus::Discrepant,
        };
        self.repository
            .update_latest_presentation(presentation)?;
        self.repository
            .replace_discrepancies(reference, report.discrepancies.clone())?;
        self.repository.commit(
            record,
            Self::audit(
                reference,
                "documents_examined",
                actor,
                format!(
                    "Examination verdict {} ({} finding(s))",
                    report.summary.overall.label(),
                    report.summary.total
                ),
            ),
        )?;
        Ok(report)
    }

    /// Render the MT734 refusal notice from the stored discrepancy set.
    pub fn refusal_notice(
        &self,
        reference: &LcReference,
        as_of: NaiveDate,
    ) -> Result<String, IssuanceServiceError> {
        let record = self.fetch_record(reference)?;
        let presentation = self
            .repository
            .latest_presentation(reference)?
            .ok_or_else(|| IssuanceServiceError::NoPresentation(reference.0.clone()))?;
        let discrepancies = self.repository.discrepancies(reference)?;
        Ok(mt734::generate(
            &record.application,
            &presentation,
            &discrepancies,
            as_of,
        ))
    }

    /// Raise an amendment request against one field of the credit.
    pub fn request_amendment(
        &self,
        reference: &LcReference,
        field_name: &str,
        new_value: &str,
        reason: &str,
        actor: &str,
    ) -> Result<Amendment, IssuanceServiceError> {
        let lock = self.run_lock(reference);
        let _guard = lock.lock().expect("run lock poisoned");

        let record = self.fetch_record(reference)?;
        let field = AmendableField::from_name(field_name)
            .ok_or_else(|| IssuanceServiceError::UnknownAmendableField(field_name.to_string()))?;

        let sequence = self.repository.amendments(reference)?.len() as u32 + 1;
        let amendment = Amendment {
            sequence,
            field: field.label().to_string(),
            old_value: field.current_value(&record.application),
            new_value: new_value.trim().to_string(),
            reason: reason.trim().to_string(),
            status: AmendmentStatus::Pending,
            fee: self.fees.amendment_fee_inr,
            mt707_text: None,
        };
        self.repository.insert_amendment(reference, amendment.clone())?;
        self.repository.commit(
            record,
            Self::audit(
                reference,
                "amendment_requested",
                actor,
                format!("Amendment {} requested on {}", sequence, field.label()),
            ),
        )?;
        Ok(amendment)
    }

    /// Approve a pending amendment: mutate the underlying application field
    /// and render the MT707 notice.
    pub fn approve_amendment(
        &self,
        reference: &LcReference,
        sequence: u32,
        actor: &str,
        as_of: NaiveDate,
    ) -> Result<Amendment, IssuanceServiceError> {
        let lock = self.run_lock(reference);
        let _guard = lock.lock().expect("run lock poisoned");

        let mut record = self.fetch_record(reference)?;
        let mut amendment = self
            .repository
            .amendments(reference)?
            .into_iter()
            .find(|item| item.sequence == sequence)
            .ok_or(IssuanceServiceError::UnknownAmendment(sequence))?;
        if amendment.status == AmendmentStatus::Approved {
            return Err(IssuanceServiceError::AmendmentAlreadyApproved(sequence));
        }

        let field = AmendableField::from_name(&amendment.field)
            .ok_or_else(|| IssuanceServiceError::UnknownAmendableField(amendment.field.clone()))?;
        field.apply(&mut record.application, &amendment.new_value);

        let lc_number = record
            .artifacts
            .lc_number
            .clone()
            .unwrap_or_else(|| draft::lc_number(reference.as_str(), as_of));
        amendment.status = AmendmentStatus::Approved;
        amendment.mt707_text = Some(mt707::generate(&lc_number, &amendment, as_of));

        self.repository.update_amendment(reference, amendment.clone())?;
        self.repository.commit(
            record,
            Self::audit(
                reference,
                "amendment_approved",
                actor,
                format!(
                    "Amendment {} approved: {} now '{}'",
                    sequence,
                    amendment.field,
                    amendment.new_value
                ),
            ),
        )?;
        Ok(amendment)
    }

    /// Run the deterministic KYC check for the applicant and fold the outcome
    /// into the application's compliance flags.
    pub fn verify_applicant_kyc(
        &self,
        reference: &LcReference,
        submission: &CompanySubmission,
        registry: &CompanyRegistry,
        actor: &str,
    ) -> Result<KycAssessment, IssuanceServiceError> {
        let lock = self.run_lock(reference);
        let _guard = lock.lock().expect("run lock poisoned");

        let mut record = self.fetch_record(reference)?;
        let assessment = kyc::verify(submission, registry);

        record.application.compliance.kyc = match assessment.decision {
            KycDecision::Valid => ScreeningStatus::Cleared,
            KycDecision::Review => ScreeningStatus::Pending,
            KycDecision::Invalid => ScreeningStatus::Failed,
        };

        self.repository.commit(
            record,
            Self::audit(
                reference,
                "kyc_verified",
                actor,
                format!(
                    "KYC decision {} with risk score {}",
                    assessment.decision.label(),
                    assessment.risk_score
                ),
            ),
        )?;
        Ok(assessment)
    }

    /// Append an officer note to the record.
    pub fn add_officer_note(
        &self,
        reference: &LcReference,
        note: &str,
        actor: &str,
    ) -> Result<(), IssuanceServiceError> {
        let lock = self.run_lock(reference);
        let _guard = lock.lock().expect("run lock poisoned");

        let mut record = self.fetch_record(reference)?;
        record.officer_notes.push(note.trim().to_string());
        self.repository.commit(
            record,
            Self::audit(
                reference,
                "note_added",
                actor,
                format!("Officer note recorded ({} chars)", note.trim().len()),
            ),
        )?;
        Ok(())
    }

    /// Fetch a record for read-side views.
    pub fn get(
        &self,
        reference: &LcReference,
    ) -> Result<LcApplicationRecord, IssuanceServiceError> {
        self.fetch_record(reference)
    }
}
