use serde::Serialize;

use crate::document::{DocumentSet, DocumentStatus};
use crate::workflow::Decision;

use super::{required, ReviewError};

/// Document Verification panel
#[derive(Debug, Clone, Serialize)]
pub struct DocumentVerificationReview {
    documents: DocumentSet,
}

impl DocumentVerificationReview {
    pub fn new(documents: DocumentSet) -> Self {
        Self { documents }
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

    /// Shown when a mandatory document was turned down
    pub fn needs_reupload(&self) -> bool {
        self.documents.has_unapproved_mandatory()
    }

    pub fn approve(&self) -> Result<Decision, ReviewError> {
        if !self.documents.all_mandatory_approved() {
            return Err(ReviewError::MandatoryDocumentsPending);
        }
        Ok(Decision::ApproveDocuments)
    }

    pub fn request_again(&self, note: &str) -> Result<Decision, ReviewError> {
        let note = required(
            note,
            ReviewError::NoteRequired("Please describe the documents the policyholder must re-upload."),
        )?;
        Ok(Decision::RequestDocumentsAgain { note })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn review() -> DocumentVerificationReview {
        DocumentVerificationReview::new(DocumentSet::new(vec![
            Document::new("1", "Vet Consultation Bill", true),
            Document::new("2", "Treatment Proof (Prescription)", true),
            Document::new("4", "Diagnostic Reports", false),
        ]))
    }

    #[test]
    fn test_optional_documents_do_not_block_approval() {
        let mut review = review();
        review.set_document_status("1", DocumentStatus::Approved).unwrap();
        review.set_document_status("2", DocumentStatus::Approved).unwrap();
        review.set_document_status("4", DocumentStatus::NotApproved).unwrap();
        assert_eq!(review.approve(), Ok(Decision::ApproveDocuments));
        assert!(!review.needs_reupload());
    }

    #[test]
    fn test_rejected_mandatory_document_blocks_approval() {
        let mut review = review();
        review.set_document_status("1", DocumentStatus::NotApproved).unwrap();
        review.set_document_status("2", DocumentStatus::Approved).unwrap();
        assert!(review.needs_reupload());
        assert_eq!(review.approve(), Err(ReviewError::MandatoryDocumentsPending));
    }

    #[test]
    fn test_request_again_needs_note() {
        assert!(matches!(review().request_again(" "), Err(ReviewError::NoteRequired(_))));
    }
}
