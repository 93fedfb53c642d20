//! Stage review panels
//!
//! One panel per stage kind. A panel holds the fixture data and transient
//! form state a handler works through, and its action methods validate that
//! state before producing a [`Decision`](crate::workflow::Decision) for the
//! workflow controller. Panels never touch the stage list themselves.
//!
//! Validation failures are [`ReviewError`]s; each carries the short title and
//! description the console shows as a toast.

mod admissibility;
mod claim_verification;
mod document_verification;
mod payment_processing;
mod vet_investigation;

pub use admissibility::AdmissibilityReview;
pub use claim_verification::{CaseSummary, ClaimVerificationReview};
pub use document_verification::DocumentVerificationReview;
pub use payment_processing::PaymentProcessingReview;
pub use vet_investigation::{VetInvestigationReview, DEFAULT_HANDLER_NOTE};

use thiserror::Error;

use core_kernel::Money;

/// A review form that failed validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Document {0} is not part of this review.")]
    UnknownDocument(String),

    #[error("Approve every mandatory document to proceed.")]
    MandatoryDocumentsPending,

    #[error("Approve the bank account or add a note explaining the name mismatch.")]
    AccountNotVerified,

    #[error("{0}")]
    NoteRequired(&'static str),

    #[error("Enter final admissible amount to proceed.")]
    AmountRequired,

    #[error("Amount cannot be zero or negative.")]
    InvalidAmount,

    #[error("Amount cannot exceed maximum admissible ({}).", .max.format_grouped())]
    AmountExceedsLimit { max: Money },

    #[error("{0}")]
    ReasonRequired(&'static str),

    #[error("Please select a medical assessment.")]
    AssessmentRequired,

    #[error("Please add comments for your assessment.")]
    CommentsRequired,

    #[error("Please select a recommendation.")]
    RecommendationRequired,

    #[error("Vet findings must be submitted before the handler can act.")]
    FindingsNotSubmitted,

    #[error("Vet findings were already submitted.")]
    FindingsAlreadySubmitted,
}

impl ReviewError {
    /// Toast title shown to the handler
    pub fn title(&self) -> &'static str {
        match self {
            ReviewError::UnknownDocument(_) => "Document Not Found",
            ReviewError::MandatoryDocumentsPending => "Documents Pending",
            ReviewError::AccountNotVerified => "Account Verification Required",
            ReviewError::NoteRequired(_) => "Note Required",
            ReviewError::AmountRequired => "Amount Required",
            ReviewError::InvalidAmount => "Invalid Amount",
            ReviewError::AmountExceedsLimit { .. } => "Amount Exceeds Limit",
            ReviewError::ReasonRequired(_) => "Reason Required",
            ReviewError::AssessmentRequired => "Assessment Required",
            ReviewError::CommentsRequired => "Comments Required",
            ReviewError::RecommendationRequired => "Recommendation Required",
            ReviewError::FindingsNotSubmitted => "Vet Findings Pending",
            ReviewError::FindingsAlreadySubmitted => "Vet Findings Submitted",
        }
    }

    /// Toast description
    pub fn description(&self) -> String {
        self.to_string()
    }
}

/// Returns the trimmed text, or the error when it is blank
pub(crate) fn required(text: &str, missing: ReviewError) -> Result<String, ReviewError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(missing)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_titles_and_descriptions() {
        let err = ReviewError::AmountExceedsLimit { max: Money::inr(dec!(5000)) };
        assert_eq!(err.title(), "Amount Exceeds Limit");
        assert_eq!(err.description(), "Amount cannot exceed maximum admissible (₹5,000).");

        let err = ReviewError::NoteRequired("Please add a note for the vet investigation.");
        assert_eq!(err.title(), "Note Required");
        assert_eq!(err.description(), "Please add a note for the vet investigation.");
    }

    #[test]
    fn test_required_trims() {
        assert_eq!(required("  blurry bill ", ReviewError::AmountRequired).unwrap(), "blurry bill");
        assert_eq!(required("   ", ReviewError::AmountRequired), Err(ReviewError::AmountRequired));
    }
}
