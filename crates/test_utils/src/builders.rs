//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::{NaiveDate, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;

use core_kernel::{BreachWindow, ClaimNumber, PolicyNumber, PolicyPeriod, ReferenceId};
use domain_claims::{
    ClaimStatus, ClaimType, ClaimWorkflow, Decision, PetClaim, Stage, StageId, StageKind, StageStatus,
};

use crate::fixtures::{ClaimNumberFixtures, StageFixtures};

/// Builder for stage lists with ascending ids
#[derive(Debug, Default)]
pub struct StageListBuilder {
    stages: Vec<Stage>,
}

impl StageListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an undated stage
    pub fn stage(mut self, kind: StageKind, status: StageStatus) -> Self {
        let id = StageId::new(self.stages.len() as u32 + 1);
        self.stages.push(Stage::new(id, kind, status));
        self
    }

    /// Appends a stage completed now
    pub fn completed(mut self, kind: StageKind) -> Self {
        let id = StageId::new(self.stages.len() as u32 + 1);
        self.stages.push(Stage {
            date_time: Some(Utc::now()),
            ..Stage::new(id, kind, StageStatus::Completed)
        });
        self
    }

    pub fn build(self) -> Vec<Stage> {
        self.stages
    }
}

/// Builder for constructing test claims
pub struct PetClaimBuilder {
    claim: PetClaim,
}

impl Default for PetClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PetClaimBuilder {
    /// Creates a builder for Bruno's claim
    pub fn new() -> Self {
        let created_on = NaiveDate::from_ymd_opt(2025, 12, 5).expect("valid date");
        let period = PolicyPeriod::new(
            NaiveDate::from_ymd_opt(2024, 11, 4).expect("valid date"),
            NaiveDate::from_ymd_opt(2025, 11, 2).expect("valid date"),
        )
        .expect("valid period");

        Self {
            claim: PetClaim {
                claim_number: ClaimNumberFixtures::bruno(),
                policy_number: PolicyNumber::from_number(89234),
                reference_id: ReferenceId::from_number(760),
                pet_name: "Bruno".to_string(),
                breed: "Golden Retriever".to_string(),
                owner_name: "Arjun Mehta".to_string(),
                owner_phone: "9876543210".to_string(),
                email: "arjun.mehta@email.com".to_string(),
                policy_period: period,
                claim_type: ClaimType::Injury,
                status: ClaimStatus::PendingVerification,
                created_on,
                last_updated_on: created_on,
                ageing_days: 4,
                score: 0,
                next_breach_in: BreachWindow::Remaining { days: 2, hours: 5 },
                active_tasks: 2,
                stages: StageFixtures::bruno(),
            },
        }
    }

    /// Replaces the claimant with random contact details
    pub fn random_owner(mut self) -> Self {
        self.claim.owner_name = Name().fake();
        self.claim.email = SafeEmail().fake();
        self.claim.owner_phone = format!("9{:09}", (0u64..1_000_000_000).fake::<u64>());
        self
    }

    pub fn with_number(mut self, number: ClaimNumber) -> Self {
        self.claim.claim_number = number;
        self
    }

    pub fn with_pet(mut self, name: impl Into<String>) -> Self {
        self.claim.pet_name = name.into();
        self
    }

    pub fn with_owner(mut self, name: impl Into<String>, phone: impl Into<String>) -> Self {
        self.claim.owner_name = name.into();
        self.claim.owner_phone = phone.into();
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.claim.status = status;
        self
    }

    /// Sets the stage history and the status it implies
    pub fn with_stages(mut self, stages: Vec<Stage>) -> Self {
        self.claim.status = ClaimStatus::derive_from(&stages);
        self.claim.stages = stages;
        self
    }

    pub fn build(self) -> PetClaim {
        self.claim
    }
}

/// Drives a workflow from a fresh claim to a given stage
pub struct WorkflowBuilder {
    workflow: ClaimWorkflow,
}

impl Default for WorkflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowBuilder {
    pub fn new() -> Self {
        Self {
            workflow: ClaimWorkflow::start(),
        }
    }

    /// Applies a decision, panicking if it is refused
    pub fn then(mut self, decision: Decision) -> Self {
        let name = decision.name();
        if let Err(err) = self.workflow.apply(decision) {
            panic!("{} refused while building workflow: {}", name, err);
        }
        self
    }

    /// Admissibility approved, claim verification pending
    pub fn at_claim_verification(self) -> Self {
        self.then(Decision::ApproveAdmissibility)
    }

    /// Referred to the vet
    pub fn at_vet_investigation(self) -> Self {
        self.at_claim_verification().then(Decision::SendToVet {
            note: "Please verify the surgery".to_string(),
        })
    }

    /// Documents requested at admissibility
    pub fn at_document_verification(self) -> Self {
        self.then(Decision::RequestDocumentsFromAdmissibility {
            note: "blurry bill".to_string(),
        })
    }

    pub fn build(self) -> ClaimWorkflow {
        self.workflow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_list_builder_numbers_stages() {
        let stages = StageListBuilder::new()
            .completed(StageKind::CheckAdmissibility)
            .stage(StageKind::DocumentVerification, StageStatus::Pending)
            .build();
        assert_eq!(stages[1].id, StageId::new(2));
        assert!(stages[0].date_time.is_some());
    }

    #[test]
    fn test_random_owner() {
        let claim = PetClaimBuilder::new().random_owner().build();
        assert_eq!(claim.owner_phone.len(), 10);
        assert!(claim.email.contains('@'));
    }
}
