use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::Money;

use crate::vet::{VetCase, VetFindings};
use crate::workflow::Decision;

use super::{required, ReviewError};

/// Note sent to the vet when the handler gives none
pub const DEFAULT_HANDLER_NOTE: &str =
    "Please verify if the claimed surgery was medically required based on documents.";

/// Vet Investigation panel
///
/// The vet records findings first; only then can the handler approve,
/// reject or send the claim back for documents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VetInvestigationReview {
    handler_note: String,
    case: VetCase,
    findings: VetFindings,
    submitted: bool,
    max_admissible: Money,
}

impl VetInvestigationReview {
    pub fn new(case: VetCase, max_admissible: Money) -> Self {
        Self {
            handler_note: DEFAULT_HANDLER_NOTE.to_string(),
            case,
            findings: VetFindings::default(),
            submitted: false,
            max_admissible,
        }
    }

    /// Replaces the default referral note with the handler's own
    pub fn with_handler_note(mut self, note: &str) -> Self {
        if !note.trim().is_empty() {
            self.handler_note = note.trim().to_string();
        }
        self
    }

    pub fn handler_note(&self) -> &str {
        &self.handler_note
    }

    pub fn case(&self) -> &VetCase {
        &self.case
    }

    pub fn findings(&self) -> &VetFindings {
        &self.findings
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Records the vet's findings and unlocks the handler actions
    pub fn submit_findings(&mut self, findings: VetFindings) -> Result<&VetFindings, ReviewError> {
        if self.submitted {
            return Err(ReviewError::FindingsAlreadySubmitted);
        }
        if findings.assessment.is_none() {
            return Err(ReviewError::AssessmentRequired);
        }
        if findings.comments.trim().is_empty() {
            return Err(ReviewError::CommentsRequired);
        }
        if findings.recommendation.is_none() {
            return Err(ReviewError::RecommendationRequired);
        }

        self.findings = findings;
        self.submitted = true;
        Ok(&self.findings)
    }

    pub fn approve(&self, amount: Option<Decimal>, notes: &str) -> Result<Decision, ReviewError> {
        self.ensure_submitted()?;
        let amount = amount
            .filter(|a| *a > Decimal::ZERO)
            .ok_or(ReviewError::AmountRequired)?;
        let amount = Money::new(amount, self.max_admissible.currency());
        if amount.amount() > self.max_admissible.amount() {
            return Err(ReviewError::AmountExceedsLimit { max: self.max_admissible });
        }
        Ok(Decision::VetApprove {
            amount,
            notes: notes.trim().to_string(),
        })
    }

    pub fn reject(&self, reason: &str) -> Result<Decision, ReviewError> {
        self.ensure_submitted()?;
        let reason = required(reason, ReviewError::ReasonRequired("Please enter a rejection reason."))?;
        Ok(Decision::VetReject { reason })
    }

    pub fn request_documents(&self, note: &str) -> Result<Decision, ReviewError> {
        self.ensure_submitted()?;
        let note = required(
            note,
            ReviewError::NoteRequired("Please add a note explaining what documents are needed."),
        )?;
        Ok(Decision::VetRequestDocuments { note })
    }

    fn ensure_submitted(&self) -> Result<(), ReviewError> {
        if self.submitted {
            Ok(())
        } else {
            Err(ReviewError::FindingsNotSubmitted)
        }
    }
}
