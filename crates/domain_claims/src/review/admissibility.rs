use serde::Serialize;

use crate::checklist::{AccountVerification, ChecklistItem};
use crate::document::{DocumentSet, DocumentStatus};
use crate::workflow::Decision;

use super::{required, ReviewError};

/// Check Admissibility panel
///
/// The handler works through the eligibility checklist, confirms the payee
/// account and reviews the initial documents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissibilityReview {
    checklist: Vec<ChecklistItem>,
    account: AccountVerification,
    documents: DocumentSet,
    account_approved: bool,
    account_note: String,
}

impl AdmissibilityReview {
    pub fn new(checklist: Vec<ChecklistItem>, account: AccountVerification, documents: DocumentSet) -> Self {
        Self {
            checklist,
            account,
            documents,
            account_approved: false,
            account_note: String::new(),
        }
    }

    pub fn checklist(&self) -> &[ChecklistItem] {
        &self.checklist
    }

    pub fn account(&self) -> &AccountVerification {
        &self.account
    }

    pub fn documents(&self) -> &DocumentSet {
        &self.documents
    }

    pub fn set_document_status(&mut self, id: &str, status: DocumentStatus) -> Result<(), ReviewError> {
        self.documents.set_status(id, status)
    }

    pub fn set_document_note(&mut self, id: &str, note: impl Into<String>) -> Result<(), ReviewError> {
        self.documents.set_note(id, note)
    }

    pub fn set_account_approved(&mut self, approved: bool) {
        self.account_approved = approved;
    }

    pub fn set_account_note(&mut self, note: impl Into<String>) {
        self.account_note = note.into();
    }

    /// Whether the approve action is enabled
    pub fn can_approve(&self) -> bool {
        self.approve().is_ok()
    }

    pub fn approve(&self) -> Result<Decision, ReviewError> {
        if !self.documents.all_mandatory_approved() {
            return Err(ReviewError::MandatoryDocumentsPending);
        }
        if !self.account_approved && self.account_note.trim().is_empty() {
            return Err(ReviewError::AccountNotVerified);
        }
        Ok(Decision::ApproveAdmissibility)
    }

    pub fn request_documents(&self, note: &str) -> Result<Decision, ReviewError> {
        let note = required(
            note,
            ReviewError::NoteRequired("Please describe the documents the policyholder must upload."),
        )?;
        Ok(Decision::RequestDocumentsFromAdmissibility { note })
    }
}
