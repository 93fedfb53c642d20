//! Pet claim records
//!
//! A [`PetClaim`] is the dashboard's view of a claim: who and what is
//! claimed for, where it stands, and its stage history. The dashboard status
//! is re-derived from the stages whenever the workflow moves.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{BreachWindow, ClaimNumber, PolicyNumber, PolicyPeriod, ReferenceId};

use crate::stage::{Stage, StageKind, StageStatus};

/// Dashboard status of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    #[serde(rename = "Pending Admissibility Check")]
    PendingAdmissibilityCheck,
    #[serde(rename = "Document Requested")]
    DocumentRequested,
    #[serde(rename = "Pending Verification")]
    PendingVerification,
    #[serde(rename = "Pending Review")]
    PendingReview,
    #[serde(rename = "Pending Payment")]
    PendingPayment,
    #[serde(rename = "Payment Failed")]
    PaymentFailed,
    #[serde(rename = "Pending Closure")]
    PendingClosure,
    Closed,
    Reopened,
}

impl ClaimStatus {
    /// Statuses in the order the dashboard filters list them
    pub const ALL: [ClaimStatus; 9] = [
        ClaimStatus::PendingAdmissibilityCheck,
        ClaimStatus::DocumentRequested,
        ClaimStatus::PendingVerification,
        ClaimStatus::PendingReview,
        ClaimStatus::PendingPayment,
        ClaimStatus::PaymentFailed,
        ClaimStatus::PendingClosure,
        ClaimStatus::Closed,
        ClaimStatus::Reopened,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClaimStatus::PendingAdmissibilityCheck => "Pending Admissibility Check",
            ClaimStatus::DocumentRequested => "Document Requested",
            ClaimStatus::PendingVerification => "Pending Verification",
            ClaimStatus::PendingReview => "Pending Review",
            ClaimStatus::PendingPayment => "Pending Payment",
            ClaimStatus::PaymentFailed => "Payment Failed",
            ClaimStatus::PendingClosure => "Pending Closure",
            ClaimStatus::Closed => "Closed",
            ClaimStatus::Reopened => "Reopened",
        }
    }

    /// Derives the dashboard status from a stage list
    ///
    /// A rejected stage or a completed payment closes the claim; otherwise
    /// the newest stage decides.
    pub fn derive_from(stages: &[Stage]) -> Self {
        let rejected = stages.iter().any(|s| s.status == StageStatus::Rejected);
        let paid = stages
            .iter()
            .filter(|s| s.kind == StageKind::PaymentProcessing)
            .max_by_key(|s| s.id)
            .map(|s| s.status == StageStatus::Completed)
            .unwrap_or(false);
        if rejected || paid {
            return ClaimStatus::Closed;
        }

        match stages.iter().max_by_key(|s| s.id).map(|s| s.kind) {
            None | Some(StageKind::CheckAdmissibility) => ClaimStatus::PendingAdmissibilityCheck,
            Some(StageKind::DocumentVerification) => ClaimStatus::DocumentRequested,
            Some(StageKind::ClaimVerification) => ClaimStatus::PendingVerification,
            Some(StageKind::VetInvestigation) => ClaimStatus::PendingReview,
            Some(StageKind::PaymentProcessing) => ClaimStatus::PendingPayment,
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClaimStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ClaimStatus::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown claim status '{}'", wanted))
    }
}

/// Kind of incident claimed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimType {
    Injury,
    Illness,
    Surgery,
    Wellness,
    Unknown,
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ClaimType::Injury => "Injury",
            ClaimType::Illness => "Illness",
            ClaimType::Surgery => "Surgery",
            ClaimType::Wellness => "Wellness",
            ClaimType::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// A pet insurance claim as the console lists it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetClaim {
    pub claim_number: ClaimNumber,
    pub policy_number: PolicyNumber,
    pub reference_id: ReferenceId,
    pub pet_name: String,
    pub breed: String,
    pub owner_name: String,
    pub owner_phone: String,
    pub email: String,
    pub policy_period: PolicyPeriod,
    pub claim_type: ClaimType,
    pub status: ClaimStatus,
    pub created_on: NaiveDate,
    pub last_updated_on: NaiveDate,
    pub ageing_days: u32,
    pub score: u8,
    pub next_breach_in: BreachWindow,
    pub active_tasks: u32,
    pub stages: Vec<Stage>,
}

impl PetClaim {
    /// Stores a new stage list and refreshes the derived dashboard fields
    pub fn record_stages(&mut self, stages: &[Stage], today: NaiveDate) {
        self.stages = stages.to_vec();
        self.status = ClaimStatus::derive_from(stages);
        self.last_updated_on = today;
        if self.status == ClaimStatus::Closed {
            self.next_breach_in = BreachWindow::NotApplicable;
            self.active_tasks = 0;
        }
    }
}

/// Dashboard search and status filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimQuery {
    pub search: Option<String>,
    pub status: Option<ClaimStatus>,
}

impl ClaimQuery {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn status(mut self, status: ClaimStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Case-insensitive match on claim number, pet, owner or phone
    pub fn matches(&self, claim: &PetClaim) -> bool {
        if let Some(status) = self.status {
            if claim.status != status {
                return false;
            }
        }

        let needle = match self.search.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_lowercase(),
            _ => return true,
        };
        [
            claim.claim_number.as_str(),
            claim.pet_name.as_str(),
            claim.owner_name.as_str(),
            claim.owner_phone.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn apply<'a>(&self, claims: &'a [PetClaim]) -> Vec<&'a PetClaim> {
        claims.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Number of claims per dashboard status, in filter order
pub fn status_counts(claims: &[PetClaim]) -> Vec<(ClaimStatus, usize)> {
    ClaimStatus::ALL
        .into_iter()
        .map(|status| (status, claims.iter().filter(|c| c.status == status).count()))
        .collect()
}
