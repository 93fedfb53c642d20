//! Claim documents under review
//!
//! Each review panel owns a [`DocumentSet`] loaded from the claim data port.
//! Reviewers mark documents approved or not approved and attach notes; the
//! set is transient and never written back.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::review::ReviewError;

/// Review status of a single document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Approved,
    NotApproved,
}

/// A document submitted with the claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    pub status: DocumentStatus,
    pub note: String,
    pub is_mandatory: bool,
    #[serde(default)]
    pub is_resubmitted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resubmit_date: Option<NaiveDate>,
}

impl Document {
    /// Creates a pending document
    pub fn new(id: impl Into<String>, name: impl Into<String>, is_mandatory: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: DocumentStatus::Pending,
            note: String::new(),
            is_mandatory,
            is_resubmitted: false,
            resubmit_date: None,
        }
    }

    /// Marks the document as re-uploaded by the policyholder
    pub fn resubmitted_on(mut self, date: NaiveDate) -> Self {
        self.is_resubmitted = true;
        self.resubmit_date = Some(date);
        self
    }
}

/// The documents one review panel works through
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSet {
    documents: Vec<Document>,
}

impl DocumentSet {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn all(&self) -> &[Document] {
        &self.documents
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn mandatory(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(|d| d.is_mandatory)
    }

    pub fn optional(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(|d| !d.is_mandatory)
    }

    /// Sets a document's review status
    pub fn set_status(&mut self, id: &str, status: DocumentStatus) -> Result<(), ReviewError> {
        self.find_mut(id)?.status = status;
        Ok(())
    }

    /// Replaces a document's reviewer note
    pub fn set_note(&mut self, id: &str, note: impl Into<String>) -> Result<(), ReviewError> {
        self.find_mut(id)?.note = note.into();
        Ok(())
    }

    /// True when every mandatory document is approved
    pub fn all_mandatory_approved(&self) -> bool {
        self.mandatory().all(|d| d.status == DocumentStatus::Approved)
    }

    /// True when a mandatory document was explicitly turned down and needs re-upload
    pub fn has_unapproved_mandatory(&self) -> bool {
        self.mandatory().any(|d| d.status == DocumentStatus::NotApproved)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Document, ReviewError> {
        self.documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| ReviewError::UnknownDocument(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DocumentSet {
        DocumentSet::new(vec![
            Document::new("1", "Vet Consultation Bill", true),
            Document::new("2", "Treatment Proof (Prescription)", true),
            Document::new("3", "Discharge Summary", false),
        ])
    }

    #[test]
    fn test_mandatory_approval() {
        let mut docs = sample();
        assert!(!docs.all_mandatory_approved());

        docs.set_status("1", DocumentStatus::Approved).unwrap();
        docs.set_status("2", DocumentStatus::Approved).unwrap();
        assert!(docs.all_mandatory_approved());
        assert_eq!(docs.optional().count(), 1);
    }

    #[test]
    fn test_not_approved_mandatory_flags_reupload() {
        let mut docs = sample();
        docs.set_status("3", DocumentStatus::NotApproved).unwrap();
        assert!(!docs.has_unapproved_mandatory());

        docs.set_status("2", DocumentStatus::NotApproved).unwrap();
        assert!(docs.has_unapproved_mandatory());
    }

    #[test]
    fn test_unknown_document() {
        let mut docs = sample();
        let err = docs.set_note("9", "missing").unwrap_err();
        assert_eq!(err, ReviewError::UnknownDocument("9".to_string()));
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&DocumentStatus::NotApproved).unwrap();
        assert_eq!(json, "\"not_approved\"");
    }
}
