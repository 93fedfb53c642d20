use serde::Serialize;

use core_kernel::Money;

use crate::payout::{BankDetails, PaymentReceipt, PayoutSummary};
use crate::workflow::Decision;

use super::{required, ReviewError};

/// Payment Processing panel
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProcessingReview {
    approved_amount: Money,
    summary: PayoutSummary,
    bank: BankDetails,
    owner_name: String,
}

impl PaymentProcessingReview {
    /// Builds the panel; without an amount approved in this session the
    /// summary's approved total is paid
    pub fn new(
        summary: PayoutSummary,
        bank: BankDetails,
        owner_name: impl Into<String>,
        approved_amount: Option<Money>,
    ) -> Self {
        Self {
            approved_amount: approved_amount.unwrap_or(summary.total_approved),
            summary,
            bank,
            owner_name: owner_name.into(),
        }
    }

    pub fn approved_amount(&self) -> Money {
        self.approved_amount
    }

    pub fn summary(&self) -> &PayoutSummary {
        &self.summary
    }

    pub fn bank(&self) -> &BankDetails {
        &self.bank
    }

    /// Whether the payee account is in the owner's name
    pub fn name_matches(&self) -> bool {
        self.bank.held_by(&self.owner_name)
    }

    /// Pays out the approved amount
    pub fn process(&self) -> (Decision, PaymentReceipt) {
        (
            Decision::ProcessPayment,
            PaymentReceipt::issue(self.approved_amount, &self.bank),
        )
    }

    pub fn hold(&self, reason: &str) -> Result<Decision, ReviewError> {
        let reason = required(
            reason,
            ReviewError::ReasonRequired("Please provide a reason for putting the claim on hold."),
        )?;
        Ok(Decision::HoldPayment { reason })
    }

    pub fn reject(&self, reason: &str) -> Result<Decision, ReviewError> {
        let reason = required(reason, ReviewError::ReasonRequired("Please provide a rejection reason."))?;
        Ok(Decision::RejectPayment { reason })
    }
}
