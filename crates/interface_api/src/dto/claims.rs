//! Claims DTOs
//!
//! Panel forms are submitted whole: a request carries the state the handler
//! built up in the panel (document verdicts, vet findings, amounts) together
//! with the action's note or reason.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_claims::vet::{MedicalAssessment, VetFindings, VetRecommendation};
use domain_claims::payout::PaymentReceipt;
use domain_claims::{ClaimStatus, ClaimView, DocumentStatus, PetClaim};

/// Dashboard search and status filter
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ClaimListQuery {
    #[validate(length(max = 100))]
    pub search: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClaimListResponse {
    pub claims: Vec<PetClaim>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct StatusCount {
    pub status: ClaimStatus,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct StatusCountsResponse {
    pub counts: Vec<StatusCount>,
}

/// A handler's verdict on one document
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDecision {
    #[validate(length(min = 1, max = 20))]
    pub id: String,
    pub status: DocumentStatus,
    #[validate(length(max = 2000))]
    pub note: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct AdmissibilityApproveRequest {
    #[validate(nested)]
    pub documents: Vec<DocumentDecision>,
    pub account_approved: bool,
    #[validate(length(max = 2000))]
    pub account_note: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct DocumentApproveRequest {
    #[validate(nested)]
    pub documents: Vec<DocumentDecision>,
}

/// Body of actions that only need a note
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NoteRequest {
    #[validate(length(max = 2000))]
    pub note: String,
}

/// Body of actions that only need a reason
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ReasonRequest {
    #[validate(length(max = 2000))]
    pub reason: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct VerificationApproveRequest {
    pub amount: Option<Decimal>,
    #[validate(length(max = 2000))]
    pub reduction_reason: String,
}

/// Findings as the vet enters them; missing fields are caught by the panel
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct VetFindingsForm {
    pub assessment: Option<MedicalAssessment>,
    #[validate(length(max = 5000))]
    pub comments: String,
    pub recommendation: Option<VetRecommendation>,
    #[validate(length(max = 10))]
    pub uploaded_files: Vec<String>,
}

impl From<VetFindingsForm> for VetFindings {
    fn from(form: VetFindingsForm) -> Self {
        VetFindings {
            assessment: form.assessment,
            comments: form.comments,
            recommendation: form.recommendation,
            uploaded_files: form.uploaded_files,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct VetApproveRequest {
    #[validate(nested)]
    pub findings: VetFindingsForm,
    pub amount: Option<Decimal>,
    #[validate(length(max = 2000))]
    pub notes: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct VetRejectRequest {
    #[validate(nested)]
    pub findings: VetFindingsForm,
    #[validate(length(max = 2000))]
    pub reason: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct VetRequestDocumentsRequest {
    #[validate(nested)]
    pub findings: VetFindingsForm,
    #[validate(length(max = 2000))]
    pub note: String,
}

/// A processed payment and the claim it closed
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub claim: ClaimView,
    pub receipt: PaymentReceipt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlong_note_is_rejected() {
        let request = NoteRequest { note: "x".repeat(2001) };
        assert!(request.validate().is_err());
        assert!(NoteRequest::default().validate().is_ok());
    }

    #[test]
    fn test_nested_document_ids_are_validated() {
        let request: DocumentApproveRequest = serde_json::from_value(serde_json::json!({
            "documents": [{ "id": "", "status": "approved" }]
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_vet_findings_form_defaults() {
        let request: VetApproveRequest = serde_json::from_value(serde_json::json!({
            "findings": { "assessment": "Medically Justified", "comments": "ok" },
            "amount": "4800"
        }))
        .unwrap();
        let findings = VetFindings::from(request.findings);
        assert_eq!(findings.assessment, Some(MedicalAssessment::MedicallyJustified));
        assert_eq!(findings.recommendation, None);
    }
}
