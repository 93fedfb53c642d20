//! Claims Domain Ports
//!
//! The console never reads claim data directly. [`ClaimDataPort`] is the
//! capability it is handed at startup, so the same workflow and panels run
//! against the in-memory fixtures or a claims backend.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_claims::adapters::FixtureClaimData;
//! use domain_claims::services::ClaimDesk;
//!
//! let port = Arc::new(FixtureClaimData::new());
//! let desk = ClaimDesk::new(port);
//! let view = desk.open(&"PETCLM00012345".parse()?).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimNumber, DomainPort, HealthCheckable, PortError};

use crate::checklist::{AccountVerification, ChecklistItem};
use crate::claim::{ClaimQuery, PetClaim};
use crate::document::DocumentSet;
use crate::payout::{BankDetails, PayoutSummary};
use crate::review::CaseSummary;
use crate::settlement::{BillBreakdown, CoverageLimits};
use crate::stage::{Stage, StageKind};
use crate::vet::VetCase;

/// Reference data the review panels display for one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseFile {
    pub checklist: Vec<ChecklistItem>,
    pub account: AccountVerification,
    pub summary: CaseSummary,
    pub bills: BillBreakdown,
    pub limits: CoverageLimits,
    pub vet_case: VetCase,
    pub payout: PayoutSummary,
    pub bank: BankDetails,
}

/// Port for reading claim data
#[async_trait]
pub trait ClaimDataPort: DomainPort + HealthCheckable {
    /// Fetches a claim with its stage history
    async fn fetch_claim(&self, number: &ClaimNumber) -> Result<PetClaim, PortError>;

    /// Lists dashboard claims matching the query
    async fn list_claims(&self, query: &ClaimQuery) -> Result<Vec<PetClaim>, PortError>;

    /// Fetches the documents a stage's panel reviews
    async fn fetch_documents(&self, number: &ClaimNumber, stage: StageKind) -> Result<DocumentSet, PortError>;

    /// Fetches the checklist, bills, limits, vet case and payout details
    async fn fetch_case_file(&self, number: &ClaimNumber) -> Result<CaseFile, PortError>;
}

/// Callback fired with the full stage list after every transition
pub trait StagesObserver: Send + Sync {
    fn on_stages_update(&self, stages: &[Stage]);
}

impl<F> StagesObserver for F
where
    F: Fn(&[Stage]) + Send + Sync,
{
    fn on_stages_update(&self, stages: &[Stage]) {
        self(stages)
    }
}
