use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, MoneyError};

use crate::settlement::{max_admissible, BillBreakdown, CoverageLimits};
use crate::workflow::Decision;

use super::{required, ReviewError};

/// Pet, incident and policy facts shown beside the bills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseSummary {
    pub pet_name: String,
    pub claim_type: String,
    pub incident_date: NaiveDate,
    pub vet_visit_date: NaiveDate,
    pub clinic_name: String,
    pub policy_active: bool,
    pub coverage_applicable: bool,
    pub previous_claims: u32,
}

/// Claim Verification panel
///
/// Settles the admissible amount against the bills and policy limits, or
/// refers the claim to a vet, or rejects it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimVerificationReview {
    summary: CaseSummary,
    bills: BillBreakdown,
    limits: CoverageLimits,
    total_bills: Money,
    max_admissible: Money,
}

impl ClaimVerificationReview {
    pub fn new(summary: CaseSummary, bills: BillBreakdown, limits: CoverageLimits) -> Result<Self, MoneyError> {
        let total_bills = bills.total()?;
        let max_admissible = max_admissible(&bills, &limits)?;
        Ok(Self {
            summary,
            bills,
            limits,
            total_bills,
            max_admissible,
        })
    }

    pub fn summary(&self) -> &CaseSummary {
        &self.summary
    }

    pub fn bills(&self) -> &BillBreakdown {
        &self.bills
    }

    pub fn limits(&self) -> &CoverageLimits {
        &self.limits
    }

    pub fn total_bills(&self) -> Money {
        self.total_bills
    }

    pub fn max_admissible(&self) -> Money {
        self.max_admissible
    }

    /// Approves the claim for `amount`
    ///
    /// Checks run in the order the handler sees them: amount present,
    /// positive, within the maximum admissible, and a reduction reason
    /// whenever less than the billed total is paid.
    pub fn approve(&self, amount: Option<Decimal>, reduction_reason: &str) -> Result<Decision, ReviewError> {
        let amount = amount.ok_or(ReviewError::AmountRequired)?;
        if amount <= Decimal::ZERO {
            return Err(ReviewError::InvalidAmount);
        }
        let currency = self.max_admissible.currency();
        let amount = Money::new(amount, currency);
        if amount.amount() > self.max_admissible.amount() {
            return Err(ReviewError::AmountExceedsLimit { max: self.max_admissible });
        }
        let notes = reduction_reason.trim().to_string();
        if amount.amount() < self.total_bills.amount() && notes.is_empty() {
            return Err(ReviewError::ReasonRequired("Please provide a reason for the reduced amount."));
        }
        Ok(Decision::ApproveClaim { amount, notes })
    }

    pub fn send_to_vet(&self, note: &str) -> Result<Decision, ReviewError> {
        let note = required(note, ReviewError::NoteRequired("Please add a note for the vet investigation."))?;
        Ok(Decision::SendToVet { note })
    }

    pub fn reject(&self, reason: &str) -> Result<Decision, ReviewError> {
        let reason = required(reason, ReviewError::ReasonRequired("Please provide a rejection reason."))?;
        Ok(Decision::RejectClaim { reason })
    }
}
