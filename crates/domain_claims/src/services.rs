//! Claim desk service
//!
//! [`ClaimDesk`] is what the console talks to. It mounts one
//! [`ClaimWorkflow`] per opened claim, builds review panels from the claim
//! data port, and applies panel decisions to the mounted workflow.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use core_kernel::{console_today, ClaimNumber, HealthCheckResult, Money};

use crate::claim::{status_counts, ClaimQuery, ClaimStatus, PetClaim};
use crate::error::ClaimError;
use crate::ports::{ClaimDataPort, StagesObserver};
use crate::review::{
    AdmissibilityReview, ClaimVerificationReview, DocumentVerificationReview, PaymentProcessingReview,
    VetInvestigationReview,
};
use crate::settlement::max_admissible;
use crate::stage::{timeline_order, StageId, StageKind, StageStatus};
use crate::workflow::{ClaimWorkflow, Decision};

/// One row of the claim timeline, newest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub id: StageId,
    pub title: &'static str,
    pub status: StageStatus,
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub checked: bool,
    pub actionable: bool,
}

/// A claim as the detail page shows it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimView {
    pub claim: PetClaim,
    pub timeline: Vec<TimelineEntry>,
    pub expanded_stage: Option<StageId>,
    pub approved_amount: Option<Money>,
    pub closed: bool,
}

struct MountedClaim {
    claim: PetClaim,
    workflow: ClaimWorkflow,
}

impl MountedClaim {
    fn view(&self) -> ClaimView {
        let stages = self.workflow.stages();
        let awaiting = self.workflow.awaiting_decision().map(|s| s.id);

        let timeline = timeline_order(stages)
            .into_iter()
            .map(|stage| TimelineEntry {
                id: stage.id,
                title: stage.title(),
                status: stage.status,
                date_time: stage.display_time(),
                remarks: stage.remarks.clone(),
                checked: stage.status.shows_check(),
                actionable: awaiting == Some(stage.id),
            })
            .collect();

        let mut claim = self.claim.clone();
        claim.stages = stages.to_vec();

        ClaimView {
            claim,
            timeline,
            expanded_stage: self.workflow.expanded(),
            approved_amount: self.workflow.approved_amount(),
            closed: self.workflow.is_closed(),
        }
    }
}

/// Service that runs claim reviews against a claim data port
pub struct ClaimDesk {
    port: Arc<dyn ClaimDataPort>,
    mounted: RwLock<HashMap<ClaimNumber, MountedClaim>>,
    observer: Option<Arc<dyn StagesObserver>>,
}

impl ClaimDesk {
    pub fn new(port: Arc<dyn ClaimDataPort>) -> Self {
        Self {
            port,
            mounted: RwLock::new(HashMap::new()),
            observer: None,
        }
    }

    /// Attaches an observer to every workflow the desk mounts
    pub fn with_observer(mut self, observer: Arc<dyn StagesObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Health of the underlying claim data port
    pub async fn health(&self) -> HealthCheckResult {
        self.port.health_check().await
    }

    /// Opens a claim, mounting its workflow on first access
    pub async fn open(&self, number: &ClaimNumber) -> Result<ClaimView, ClaimError> {
        self.with_mounted(number, |mounted| Ok(mounted.view())).await
    }

    /// Dashboard claims with live statuses for claims under review
    pub async fn list(&self, query: &ClaimQuery) -> Result<Vec<PetClaim>, ClaimError> {
        let unfiltered = ClaimQuery {
            search: query.search.clone(),
            status: None,
        };
        let mut claims = self.port.list_claims(&unfiltered).await?;

        let mounted = self.mounted.read().await;
        for claim in claims.iter_mut() {
            if let Some(live) = mounted.get(&claim.claim_number) {
                *claim = live.claim.clone();
            }
        }
        drop(mounted);

        claims.retain(|claim| query.matches(claim));
        Ok(claims)
    }

    /// Claim count per dashboard status, in filter order
    pub async fn status_counts(&self) -> Result<Vec<(ClaimStatus, usize)>, ClaimError> {
        let claims = self.list(&ClaimQuery::default()).await?;
        Ok(status_counts(&claims))
    }

    /// Opens a stage's review panel
    pub async fn expand(&self, number: &ClaimNumber, stage: StageId) -> Result<ClaimView, ClaimError> {
        self.with_mounted(number, |mounted| {
            mounted.workflow.expand(stage)?;
            Ok(mounted.view())
        })
        .await
    }

    /// Closes the open review panel
    pub async fn collapse(&self, number: &ClaimNumber) -> Result<ClaimView, ClaimError> {
        self.with_mounted(number, |mounted| {
            mounted.workflow.collapse();
            Ok(mounted.view())
        })
        .await
    }

    /// Applies a panel decision to the claim's workflow
    #[instrument(skip(self, number, decision), fields(claim = %number, decision = decision.name()))]
    pub async fn decide(&self, number: &ClaimNumber, decision: Decision) -> Result<ClaimView, ClaimError> {
        self.with_mounted(number, |mounted| {
            let stages = mounted.workflow.apply(decision)?;
            mounted.claim.record_stages(stages, console_today());
            info!(status = %mounted.claim.status, "Claim status updated");
            Ok(mounted.view())
        })
        .await
    }

    pub async fn admissibility_review(&self, number: &ClaimNumber) -> Result<AdmissibilityReview, ClaimError> {
        let case = self.port.fetch_case_file(number).await?;
        let documents = self
            .port
            .fetch_documents(number, StageKind::CheckAdmissibility)
            .await?;
        Ok(AdmissibilityReview::new(case.checklist, case.account, documents))
    }

    pub async fn document_review(&self, number: &ClaimNumber) -> Result<DocumentVerificationReview, ClaimError> {
        let documents = self
            .port
            .fetch_documents(number, StageKind::DocumentVerification)
            .await?;
        Ok(DocumentVerificationReview::new(documents))
    }

    pub async fn verification_review(&self, number: &ClaimNumber) -> Result<ClaimVerificationReview, ClaimError> {
        let case = self.port.fetch_case_file(number).await?;
        Ok(ClaimVerificationReview::new(case.summary, case.bills, case.limits)?)
    }

    /// The vet panel, carrying the note the handler sent with the referral
    pub async fn vet_review(&self, number: &ClaimNumber) -> Result<VetInvestigationReview, ClaimError> {
        let case = self.port.fetch_case_file(number).await?;
        let cap = max_admissible(&case.bills, &case.limits)?;
        let referral_note = self
            .with_mounted(number, |mounted| {
                Ok(mounted
                    .workflow
                    .newest(StageKind::ClaimVerification)
                    .and_then(|stage| stage.remarks.clone()))
            })
            .await?;

        let review = VetInvestigationReview::new(case.vet_case, cap);
        Ok(match referral_note {
            Some(note) => review.with_handler_note(&note),
            None => review,
        })
    }

    /// The payment panel, paying the amount approved during this review
    pub async fn payment_review(&self, number: &ClaimNumber) -> Result<PaymentProcessingReview, ClaimError> {
        let case = self.port.fetch_case_file(number).await?;
        let (owner, approved) = self
            .with_mounted(number, |mounted| {
                Ok((mounted.claim.owner_name.clone(), mounted.workflow.approved_amount()))
            })
            .await?;
        Ok(PaymentProcessingReview::new(case.payout, case.bank, owner, approved))
    }

    async fn with_mounted<R>(
        &self,
        number: &ClaimNumber,
        f: impl FnOnce(&mut MountedClaim) -> Result<R, ClaimError>,
    ) -> Result<R, ClaimError> {
        let mut mounted = self.mounted.write().await;
        if !mounted.contains_key(number) {
            let claim = self.port.fetch_claim(number).await?;
            let mut workflow = ClaimWorkflow::from_stages(claim.stages.clone())?;
            if let Some(observer) = &self.observer {
                workflow = workflow.with_observer(Arc::clone(observer));
            }
            info!(claim = %number, stages = claim.stages.len(), "Mounted claim workflow");
            mounted.insert(number.clone(), MountedClaim { claim, workflow });
        }

        let entry = mounted
            .get_mut(number)
            .ok_or_else(|| ClaimError::InvalidStages(format!("claim {} is not mounted", number)))?;
        f(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixtureClaimData;

    fn desk() -> ClaimDesk {
        ClaimDesk::new(Arc::new(FixtureClaimData::load().unwrap()))
    }

    fn number(value: &str) -> ClaimNumber {
        value.parse().unwrap()
    }

    #[tokio::test]
    async fn test_open_shows_timeline_newest_first() {
        let view = desk().open(&number("PETCLM00012345")).await.unwrap();
        let titles: Vec<&str> = view.timeline.iter().map(|e| e.title).collect();
        assert_eq!(titles, ["Claim Verification", "Document Verification", "Check Admissibility"]);
        assert!(view.timeline[0].actionable);
        assert!(!view.timeline[2].actionable);
        assert_eq!(view.expanded_stage, None);
    }

    #[tokio::test]
    async fn test_superseded_stage_takes_no_decision() {
        let desk = desk();
        let claim = number("PETCLM00012345");
        let before = desk.open(&claim).await.unwrap();
        let actionable: Vec<u32> = before
            .timeline
            .iter()
            .filter(|e| e.actionable)
            .map(|e| e.id.value())
            .collect();
        assert_eq!(actionable, vec![3]);

        let err = desk.decide(&claim, Decision::ApproveDocuments).await.unwrap_err();
        assert!(matches!(
            err,
            ClaimError::Workflow(crate::error::WorkflowError::StageSuperseded {
                stage: StageKind::DocumentVerification,
                current: StageKind::ClaimVerification,
            })
        ));

        let after = desk.open(&claim).await.unwrap();
        assert_eq!(after.claim.stages, before.claim.stages);
        assert_eq!(after.claim.status, ClaimStatus::PendingVerification);
    }

    #[tokio::test]
    async fn test_decide_updates_dashboard_status() {
        let desk = desk();
        let claim = number("PETCLM00012312");
        desk.decide(&claim, Decision::ApproveDocuments).await.unwrap();

        let listed = desk
            .list(&ClaimQuery::default().search("PETCLM00012312"))
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].status, ClaimStatus::PendingVerification);
        assert_eq!(listed[0].last_updated_on, console_today());
    }

    #[tokio::test]
    async fn test_vet_panel_carries_referral_note() {
        let desk = desk();
        let claim = number("PETCLM00012345");
        desk.decide(&claim, Decision::SendToVet { note: "Check the X-ray".to_string() })
            .await
            .unwrap();
        let review = desk.vet_review(&claim).await.unwrap();
        assert_eq!(review.handler_note(), "Check the X-ray");
    }
}
