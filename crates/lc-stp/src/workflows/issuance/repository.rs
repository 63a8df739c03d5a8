use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    Amendment, Discrepancy, DocumentPresentation, LcApplicationRecord, LcReference,
};

/// One action recorded against an application. Every state-changing service
/// run commits exactly one of these together with the record mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub reference: LcReference,
    pub action: String,
    pub actor: String,
    pub detail: String,
    pub at: DateTime<Utc>,
}

/// Error enumeration for record-store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction over the application aggregate. Presentations,
/// discrepancies, amendments, and audit entries are all keyed by the owning
/// application reference and have no identity outside it.
///
/// `commit` persists a record mutation and its audit entry as one logical
/// unit; an implementation backed by a transactional store must wrap both in
/// one transaction so decision state and audit trail never diverge.
pub trait LcRepository: Send + Sync {
    fn insert(&self, record: LcApplicationRecord)
        -> Result<LcApplicationRecord, RepositoryError>;
    fn fetch(&self, reference: &LcReference)
        -> Result<Option<LcApplicationRecord>, RepositoryError>;
    fn commit(
        &self,
        record: LcApplicationRecord,
        entry: AuditEntry,
    ) -> Result<(), RepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<LcApplicationRecord>, RepositoryError>;

    fn insert_presentation(
        &self,
        presentation: DocumentPresentation,
    ) -> Result<(), RepositoryError>;
    fn latest_presentation(
        &self,
        reference: &LcReference,
    ) -> Result<Option<DocumentPresentation>, RepositoryError>;
    fn update_latest_presentation(
        &self,
        presentation: DocumentPresentation,
    ) -> Result<(), RepositoryError>;

    /// Each examination run fully replaces the prior discrepancy set.
    fn replace_discrepancies(
        &self,
        reference: &LcReference,
        discrepancies: Vec<Discrepancy>,
    ) -> Result<(), RepositoryError>;
    fn discrepancies(&self, reference: &LcReference) -> Result<Vec<Discrepancy>, RepositoryError>;

    fn insert_amendment(
        &self,
        reference: &LcReference,
        amendment: Amendment,
    ) -> Result<(), RepositoryError>;
    fn amendments(&self, reference: &LcReference) -> Result<Vec<Amendment>, RepositoryError>;
    fn update_amendment(
        &self,
        reference: &LcReference,
        amendment: Amendment,
    ) -> Result<(), RepositoryError>;

    fn audit_trail(&self, reference: &LcReference) -> Result<Vec<AuditEntry>, RepositoryError>;
}

#[derive(Default)]
struct StoreState {
    records: HashMap<LcReference, LcApplicationRecord>,
    presentations: HashMap<LcReference, Vec<DocumentPresentation>>,
    discrepancies: HashMap<LcReference, Vec<Discrepancy>>,
    amendments: HashMap<LcReference, Vec<Amendment>>,
    audit: HashMap<LcReference, Vec<AuditEntry>>,
}

/// Single-mutex in-memory store used by the console and the test suites. One
/// lock over the whole state makes `commit` trivially atomic.
#[derive(Default, Clone)]
pub struct InMemoryLcRepository {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryLcRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LcRepository for InMemoryLcRepository {
    fn insert(
        &self,
        record: LcApplicationRecord,
    ) -> Result<LcApplicationRecord, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        let reference = record.application.reference.clone();
        if state.records.contains_key(&reference) {
            return Err(RepositoryError::Conflict);
        }
        state.records.insert(reference, record.clone());
        Ok(record)
    }

    fn fetch(
        &self,
        reference: &LcReference,
    ) -> Result<Option<LcApplicationRecord>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        Ok(state.records.get(reference).cloned())
    }

    fn commit(
        &self,
        record: LcApplicationRecord,
        entry: AuditEntry,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        let reference = record.application.reference.clone();
        if !state.records.contains_key(&reference) {
            return Err(RepositoryError::NotFound);
        }
        state.records.insert(reference.clone(), record);
        state.audit.entry(reference).or_default().push(entry);
        Ok(())
    }

    fn pending(&self, limit: usize) -> Result<Vec<LcApplicationRecord>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        let mut pending: Vec<LcApplicationRecord> = state
            .records
            .values()
            .filter(|record| {
                matches!(
                    record.status,
                    super::domain::LifecycleStatus::PendingReview
                        | super::domain::LifecycleStatus::UnderReview
                )
            })
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.application.reference.cmp(&b.application.reference));
        pending.truncate(limit);
        Ok(pending)
    }

    fn insert_presentation(
        &self,
        presentation: DocumentPresentation,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        let reference = presentation.reference.clone();
        if !state.records.contains_key(&reference) {
            return Err(RepositoryError::NotFound);
        }
        state
            .presentations
            .entry(reference)
            .or_default()
            .push(presentation);
        Ok(())
    }

    fn latest_presentation(
        &self,
        reference: &LcReference,
    ) -> Result<Option<DocumentPresentation>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        Ok(state
            .presentations
            .get(reference)
            .and_then(|items| items.last().cloned()))
    }

    fn update_latest_presentation(
        &self,
        presentation: DocumentPresentation,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        let slot = state
            .presentations
            .get_mut(&presentation.reference)
            .and_then(|items| items.last_mut())
            .ok_or(RepositoryError::NotFound)?;
        *slot = presentation;
        Ok(())
    }

    fn replace_discrepancies(
        &self,
        reference: &LcReference,
        discrepancies: Vec<Discrepancy>,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        state.discrepancies.insert(reference.clone(), discrepancies);
        Ok(())
    }

    fn discrepancies(
        &self,
        reference: &LcReference,
    ) -> Result<Vec<Discrepancy>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        Ok(state.discrepancies.get(reference).cloned().unwrap_or_default())
    }

    fn insert_amendment(
        &self,
        reference: &LcReference,
        amendment: Amendment,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        if !state.records.contains_key(reference) {
            return Err(RepositoryError::NotFound);
        }
        state
            .amendments
            .entry(reference.clone())
            .or_default()
            .push(amendment);
        Ok(())
    }

    fn amendments(&self, reference: &LcReference) -> Result<Vec<Amendment>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        Ok(state.amendments.get(reference).cloned().unwrap_or_default())
    }

    fn update_amendment(
        &self,
        reference: &LcReference,
        amendment: Amendment,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        let items = state
            .amendments
            .get_mut(reference)
            .ok_or(RepositoryError::NotFound)?;
        let slot = items
            .iter_mut()
            .find(|existing| existing.sequence == amendment.sequence)
            .ok_or(RepositoryError::NotFound)?;
        *slot = amendment;
        Ok(())
    }

    fn audit_trail(&self, reference: &LcReference) -> Result<Vec<AuditEntry>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        Ok(state.audit.get(reference).cloned().unwrap_or_default())
    }
}

/// Sanitized representation of an application's exposed state.
#[derive(Debug, Clone, Serialize)]
pub struct LcStatusView {
    pub reference: LcReference,
    pub status: &'static str,
    pub stp_decision: &'static str,
    pub stp_reason: String,
    pub lc_number: Option<String>,
}

impl LcApplicationRecord {
    pub fn status_view(&self) -> LcStatusView {
        LcStatusView {
            reference: self.application.reference.clone(),
            status: self.status.label(),
            stp_decision: self.stp.decision.label(),
            stp_reason: self.stp.reason.clone(),
            lc_number: self.artifacts.lc_number.clone(),
        }
    }
}
