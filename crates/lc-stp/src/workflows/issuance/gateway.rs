use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{Amendment, LcApplication};
use super::draft::sanitize_reference;
use super::swift::format::fin_envelope;
use super::swift::{mt700, mt707};
use super::validation;

/// Issuing bank default used when the caller does not override the sender.
pub const DEFAULT_SENDER_BIC: &str = "BARCINBB";

const UNKNOWN_RECEIVER: &str = "UNKNOWN";

/// Status of a gateway dispatch. A draft is staged for human authorisation;
/// nothing is ever transmitted from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatewayStatus {
    DraftReady,
    Error,
}

/// Structured result of a gateway run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayPayload {
    pub message_type: String,
    pub status: GatewayStatus,
    pub swift_message: Option<String>,
    pub receiver_bic: String,
    pub validation_errors: Vec<String>,
    pub ready_for_transmission: bool,
    pub draft_file_path: Option<PathBuf>,
    pub authorization_note: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("failed to store draft in outbox: {0}")]
    Outbox(#[from] std::io::Error),
}

/// Simulated SWIFT gateway: validates, builds the message, and stages the
/// draft as a plain text file in the outbox directory. Transmission requires a
/// duly authorised officer and happens outside this system.
#[derive(Debug, Clone)]
pub struct OutboxGateway {
    directory: PathBuf,
    sender_bic: String,
}

impl OutboxGateway {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            sender_bic: DEFAULT_SENDER_BIC.to_string(),
        }
    }

    pub fn with_sender_bic(mut self, sender_bic: impl Into<String>) -> Self {
        self.sender_bic = sender_bic.into();
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Receiver: the beneficiary's bank BIC when captured, UNKNOWN otherwise.
    fn receiver_bic(application: &LcApplication) -> String {
        let bic = application.beneficiary.swift_bic.trim();
        if bic.is_empty() {
            UNKNOWN_RECEIVER.to_string()
        } else {
            bic.to_ascii_uppercase()
        }
    }

    fn draft_filename(message_type: &str, reference: &str, date: NaiveDate) -> String {
        format!(
            "{}_{}_{}.txt",
            message_type,
            sanitize_reference(reference),
            date.format("%Y%m%d")
        )
    }

    fn store_draft(&self, filename: &str, message: &str) -> Result<PathBuf, GatewayError> {
        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(filename);
        fs::write(&path, message)?;
        info!(draft = %path.display(), "staged SWIFT draft in outbox");
        Ok(path)
    }

    fn error_payload(
        message_type: &str,
        receiver_bic: String,
        validation_errors: Vec<String>,
    ) -> GatewayPayload {
        GatewayPayload {
            message_type: message_type.to_string(),
            status: GatewayStatus::Error,
            swift_message: None,
            receiver_bic,
            validation_errors,
            ready_for_transmission: false,
            draft_file_path: None,
            authorization_note:
                "Validation failed. Correct the reported fields before re-submission.".to_string(),
        }
    }

    fn ready_payload(
        message_type: &str,
        receiver_bic: String,
        message: String,
        path: PathBuf,
    ) -> GatewayPayload {
        let note = format!(
            "DRAFT READY - AWAITING HUMAN AUTHORISATION. This message has NOT been transmitted. A duly authorised officer must review and approve '{}' before initiating SWIFT transmission.",
            path.display()
        );
        GatewayPayload {
            message_type: message_type.to_string(),
            status: GatewayStatus::DraftReady,
            swift_message: Some(message),
            receiver_bic,
            validation_errors: Vec::new(),
            ready_for_transmission: true,
            draft_file_path: Some(path),
            authorization_note: note,
        }
    }

    /// Validate, build, and stage an MT700 issuance draft.
    pub fn dispatch_mt700(
        &self,
        application: &LcApplication,
        issue_date: NaiveDate,
    ) -> Result<GatewayPayload, GatewayError> {
        let receiver = Self::receiver_bic(application);

        let validation = validation::validate(application);
        if !validation.valid {
            let errors = validation
                .missing
                .into_iter()
                .map(|label| format!("Missing mandatory field: {label}"))
                .collect();
            return Ok(Self::error_payload("MT700", receiver, errors));
        }

        let body = mt700::generate(application, issue_date);
        let message = fin_envelope(&self.sender_bic, &receiver, "700", issue_date, &body);
        let filename =
            Self::draft_filename("MT700", application.reference.as_str(), issue_date);
        let path = self.store_draft(&filename, &message)?;

        Ok(Self::ready_payload("MT700", receiver, message, path))
    }

    /// Build and stage an MT707 amendment draft for an approved amendment.
    pub fn dispatch_mt707(
        &self,
        application: &LcApplication,
        lc_number: &str,
        amendment: &Amendment,
        amendment_date: NaiveDate,
    ) -> Result<GatewayPayload, GatewayError> {
        let receiver = Self::receiver_bic(application);

        if lc_number.trim().is_empty() {
            return Ok(Self::error_payload(
                "MT707",
                receiver,
                vec!["An amendment draft requires the issued LC number".to_string()],
            ));
        }

        let body = mt707::generate(lc_number, amendment, amendment_date);
        let message = fin_envelope(&self.sender_bic, &receiver, "707", amendment_date, &body);
        let filename = Self::draft_filename(
            "MT707",
            &format!("{}_A{}", application.reference.as_str(), amendment.sequence),
            amendment_date,
        );
        let path = self.store_draft(&filename, &message)?;

        Ok(Self::ready_payload("MT707", receiver, message, path))
    }
}
