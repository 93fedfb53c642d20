//! In-memory claim data
//!
//! Serves the console's fixture claims. The dashboard lists twelve claims;
//! PETCLM00012345 and PETCLM00012312 carry their recorded stage histories,
//! the others get a history consistent with their dashboard status. Any other
//! well-formed claim number opens as a fresh claim awaiting admissibility.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal_macros::dec;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{
    parse_console_date, AdapterHealth, BreachWindow, ClaimNumber, DomainPort, HealthCheckResult,
    HealthCheckable, Money, PolicyNumber, PolicyPeriod, PortError, ReferenceId,
};

use crate::checklist::{AccountVerification, CheckStatus, ChecklistItem};
use crate::claim::{ClaimQuery, ClaimStatus, ClaimType, PetClaim};
use crate::document::{Document, DocumentSet};
use crate::error::ClaimError;
use crate::payout::{BankDetails, PayoutSummary};
use crate::ports::{CaseFile, ClaimDataPort};
use crate::review::CaseSummary;
use crate::settlement::{BillBreakdown, CoverageLimits};
use crate::stage::{Stage, StageId, StageKind, StageStatus};
use crate::vet::{IncidentSummary, PetProfile, ReviewedFile, VetCase};

const OWNER_NAME: &str = "Arjun Mehta";
const OWNER_PHONE: &str = "9876543210";
const OWNER_EMAIL: &str = "arjun.mehta@email.com";
const STANDARD_PERIOD: (&str, &str) = ("Jan 01, 2025", "Dec 31, 2025");

struct DashboardRow {
    number: u64,
    pet: &'static str,
    breed: &'static str,
    claim_type: ClaimType,
    created_on: &'static str,
    ageing: u32,
    status: ClaimStatus,
    score: u8,
    breach: &'static str,
    active_tasks: u32,
}

const DASHBOARD: [DashboardRow; 12] = [
    DashboardRow { number: 12345, pet: "Bruno", breed: "Golden Retriever", claim_type: ClaimType::Injury, created_on: "Dec 05, 2025", ageing: 4, status: ClaimStatus::PendingVerification, score: 0, breach: "2 days 5 hours", active_tasks: 2 },
    DashboardRow { number: 12312, pet: "Coco", breed: "Labrador", claim_type: ClaimType::Illness, created_on: "Nov 28, 2025", ageing: 11, status: ClaimStatus::DocumentRequested, score: 0, breach: "1 day 3 hours", active_tasks: 1 },
    DashboardRow { number: 11239, pet: "Snow", breed: "Persian", claim_type: ClaimType::Surgery, created_on: "Oct 12, 2025", ageing: 58, status: ClaimStatus::PendingReview, score: 0, breach: "12 days 8 hours", active_tasks: 3 },
    DashboardRow { number: 11234, pet: "Max", breed: "Beagle", claim_type: ClaimType::Wellness, created_on: "Sep 15, 2025", ageing: 85, status: ClaimStatus::Closed, score: 5, breach: "-", active_tasks: 0 },
    DashboardRow { number: 11200, pet: "Bella", breed: "Pug", claim_type: ClaimType::Injury, created_on: "Dec 01, 2025", ageing: 8, status: ClaimStatus::PendingAdmissibilityCheck, score: 0, breach: "3 days 12 hours", active_tasks: 2 },
    DashboardRow { number: 11188, pet: "Charlie", breed: "German Shepherd", claim_type: ClaimType::Surgery, created_on: "Nov 20, 2025", ageing: 19, status: ClaimStatus::PendingPayment, score: 0, breach: "5 days 2 hours", active_tasks: 1 },
    DashboardRow { number: 11150, pet: "Luna", breed: "Siamese", claim_type: ClaimType::Illness, created_on: "Nov 10, 2025", ageing: 29, status: ClaimStatus::PaymentFailed, score: 0, breach: "Overdue", active_tasks: 1 },
    DashboardRow { number: 11100, pet: "Rocky", breed: "Boxer", claim_type: ClaimType::Wellness, created_on: "Oct 25, 2025", ageing: 45, status: ClaimStatus::Closed, score: 4, breach: "-", active_tasks: 0 },
    DashboardRow { number: 11050, pet: "Daisy", breed: "Shih Tzu", claim_type: ClaimType::Injury, created_on: "Oct 18, 2025", ageing: 52, status: ClaimStatus::PendingClosure, score: 0, breach: "1 day 8 hours", active_tasks: 1 },
    DashboardRow { number: 11000, pet: "Milo", breed: "Indie", claim_type: ClaimType::Surgery, created_on: "Sep 28, 2025", ageing: 72, status: ClaimStatus::Closed, score: 3, breach: "-", active_tasks: 0 },
    DashboardRow { number: 10950, pet: "Simba", breed: "Maine Coon", claim_type: ClaimType::Illness, created_on: "Dec 03, 2025", ageing: 6, status: ClaimStatus::DocumentRequested, score: 0, breach: "4 days 6 hours", active_tasks: 2 },
    DashboardRow { number: 10900, pet: "Oscar", breed: "Dachshund", claim_type: ClaimType::Wellness, created_on: "Aug 15, 2025", ageing: 116, status: ClaimStatus::Closed, score: 5, breach: "-", active_tasks: 0 },
];

/// Claim data adapter backed by the console fixtures
#[derive(Debug, Clone)]
pub struct FixtureClaimData {
    claims: Arc<RwLock<Vec<PetClaim>>>,
    case_file: CaseFile,
}

impl FixtureClaimData {
    /// Loads the fixture claims
    pub fn load() -> Result<Self, ClaimError> {
        let claims = DASHBOARD
            .iter()
            .enumerate()
            .map(|(index, row)| dashboard_claim(index as u64, row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_claims(claims, case_file()?))
    }

    /// Serves the given claims instead of the fixtures
    pub fn with_claims(claims: Vec<PetClaim>, case_file: CaseFile) -> Self {
        Self {
            claims: Arc::new(RwLock::new(claims)),
            case_file,
        }
    }

    /// Adds or replaces a claim
    pub async fn put_claim(&self, claim: PetClaim) {
        let mut claims = self.claims.write().await;
        match claims.iter_mut().find(|c| c.claim_number == claim.claim_number) {
            Some(existing) => *existing = claim,
            None => claims.push(claim),
        }
    }

    /// The claim opened for a number that has no record
    pub fn default_claim(number: &ClaimNumber) -> Result<PetClaim, ClaimError> {
        let today = parse_console_date("Dec 09, 2025")?;
        Ok(PetClaim {
            claim_number: number.clone(),
            policy_number: PolicyNumber::from_number(89000),
            reference_id: ReferenceId::from_number(0),
            pet_name: "Unknown".to_string(),
            breed: "Unknown".to_string(),
            owner_name: "Unknown".to_string(),
            owner_phone: "0000000000".to_string(),
            email: "unknown@email.com".to_string(),
            policy_period: standard_period()?,
            claim_type: ClaimType::Unknown,
            status: ClaimStatus::PendingAdmissibilityCheck,
            created_on: today,
            last_updated_on: today,
            ageing_days: 0,
            score: 0,
            next_breach_in: BreachWindow::NotApplicable,
            active_tasks: 0,
            stages: vec![Stage::initial()],
        })
    }
}

impl DomainPort for FixtureClaimData {}

#[async_trait]
impl HealthCheckable for FixtureClaimData {
    async fn health_check(&self) -> HealthCheckResult {
        let started = Instant::now();
        let count = self.claims.read().await.len();
        HealthCheckResult {
            adapter_id: "fixture-claim-data".to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: started.elapsed().as_millis() as u64,
            message: Some(format!("{} fixture claims loaded", count)),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ClaimDataPort for FixtureClaimData {
    async fn fetch_claim(&self, number: &ClaimNumber) -> Result<PetClaim, PortError> {
        if let Some(claim) = self
            .claims
            .read()
            .await
            .iter()
            .find(|c| &c.claim_number == number)
        {
            return Ok(claim.clone());
        }
        debug!(claim = %number, "No fixture for claim, serving default claim");
        Self::default_claim(number).map_err(|e| PortError::internal(e.to_string()))
    }

    async fn list_claims(&self, query: &ClaimQuery) -> Result<Vec<PetClaim>, PortError> {
        let claims = self.claims.read().await;
        Ok(query.apply(&claims).into_iter().cloned().collect())
    }

    async fn fetch_documents(&self, _number: &ClaimNumber, stage: StageKind) -> Result<DocumentSet, PortError> {
        let documents = match stage {
            StageKind::CheckAdmissibility => vec![
                Document::new("1", "Vet Consultation Bill", true),
                Document::new("2", "Treatment Proof (Prescription)", true),
                Document::new("3", "Discharge Summary", false),
            ],
            StageKind::DocumentVerification => {
                let resubmitted = parse_console_date("Dec 10, 2025")
                    .map_err(|e| PortError::internal(e.to_string()))?;
                vec![
                    Document::new("1", "Vet Consultation Bill", true).resubmitted_on(resubmitted),
                    Document::new("2", "Treatment Proof (Prescription)", true),
                    Document::new("3", "Discharge Summary", false),
                    Document::new("4", "Diagnostic Reports", false),
                    Document::new("5", "Pharmacy Bill", false),
                ]
            }
            StageKind::ClaimVerification | StageKind::VetInvestigation | StageKind::PaymentProcessing => {
                Vec::new()
            }
        };
        Ok(DocumentSet::new(documents))
    }

    async fn fetch_case_file(&self, _number: &ClaimNumber) -> Result<CaseFile, PortError> {
        Ok(self.case_file.clone())
    }
}

fn standard_period() -> Result<PolicyPeriod, ClaimError> {
    Ok(PolicyPeriod::new(
        parse_console_date(STANDARD_PERIOD.0)?,
        parse_console_date(STANDARD_PERIOD.1)?,
    )?)
}

fn dashboard_claim(index: u64, row: &DashboardRow) -> Result<PetClaim, ClaimError> {
    let created_on = parse_console_date(row.created_on)?;
    let mut claim = PetClaim {
        claim_number: ClaimNumber::from_number(row.number),
        policy_number: PolicyNumber::from_number(89234 + index),
        reference_id: ReferenceId::from_number(760 + index),
        pet_name: row.pet.to_string(),
        breed: row.breed.to_string(),
        owner_name: OWNER_NAME.to_string(),
        owner_phone: OWNER_PHONE.to_string(),
        email: OWNER_EMAIL.to_string(),
        policy_period: standard_period()?,
        claim_type: row.claim_type,
        status: row.status,
        created_on,
        last_updated_on: created_on,
        ageing_days: row.ageing,
        score: row.score,
        next_breach_in: row.breach.parse()?,
        active_tasks: row.active_tasks,
        stages: Vec::new(),
    };

    match row.number {
        12345 => {
            claim.policy_period = PolicyPeriod::new(
                parse_console_date("Nov 04, 2024")?,
                parse_console_date("Nov 02, 2025")?,
            )?;
            claim.last_updated_on = parse_console_date("Dec 08, 2025")?;
            claim.stages = vec![
                Stage::new(StageId::new(1), StageKind::CheckAdmissibility, StageStatus::Completed)
                    .at_console_time("12:04 PM | Dec 05, 2025")?,
                Stage::new(StageId::new(2), StageKind::DocumentVerification, StageStatus::Submitted)
                    .at_console_time("7:38 PM | Dec 06, 2025")?,
                Stage::new(StageId::new(3), StageKind::ClaimVerification, StageStatus::Pending),
            ];
        }
        12312 => {
            claim.last_updated_on = parse_console_date("Dec 07, 2025")?;
            claim.stages = vec![
                Stage::new(StageId::new(1), StageKind::CheckAdmissibility, StageStatus::Completed)
                    .at_console_time("10:30 AM | Nov 28, 2025")?,
                Stage::new(StageId::new(2), StageKind::DocumentVerification, StageStatus::Pending),
            ];
        }
        _ => claim.stages = history_for(row.status, row.created_on)?,
    }
    Ok(claim)
}

/// A stage history that ends where the dashboard status says the claim is
fn history_for(status: ClaimStatus, created_on: &str) -> Result<Vec<Stage>, ClaimError> {
    use StageKind::*;
    use StageStatus::*;

    let shape: &[(StageKind, StageStatus)] = match status {
        ClaimStatus::PendingAdmissibilityCheck => &[(CheckAdmissibility, Pending)],
        ClaimStatus::DocumentRequested => &[(CheckAdmissibility, Completed), (DocumentVerification, Pending)],
        ClaimStatus::PendingVerification | ClaimStatus::Reopened => {
            &[(CheckAdmissibility, Completed), (ClaimVerification, Pending)]
        }
        ClaimStatus::PendingReview => &[
            (CheckAdmissibility, Completed),
            (ClaimVerification, OnHold),
            (VetInvestigation, PendingWithVet),
        ],
        ClaimStatus::PendingPayment => &[
            (CheckAdmissibility, Completed),
            (ClaimVerification, Completed),
            (PaymentProcessing, Pending),
        ],
        ClaimStatus::PaymentFailed => &[
            (CheckAdmissibility, Completed),
            (ClaimVerification, Completed),
            (PaymentProcessing, OnHold),
        ],
        ClaimStatus::PendingClosure => &[
            (CheckAdmissibility, Completed),
            (ClaimVerification, Completed),
            (PaymentProcessing, Processing),
        ],
        ClaimStatus::Closed => &[
            (CheckAdmissibility, Completed),
            (ClaimVerification, Completed),
            (PaymentProcessing, Completed),
        ],
    };

    let decided_at = format!("10:00 AM | {}", created_on);
    shape
        .iter()
        .zip(1..)
        .map(|(&(kind, status), id)| -> Result<Stage, ClaimError> {
            let stage = Stage::new(StageId::new(id), kind, status);
            if status == Completed {
                Ok(stage.at_console_time(&decided_at)?)
            } else {
                Ok(stage)
            }
        })
        .collect()
}

fn case_file() -> Result<CaseFile, ClaimError> {
    let inr = Money::inr;
    Ok(CaseFile {
        checklist: vec![
            ChecklistItem::new("pet", "Pet Insured", "Bruno - Active Policy", CheckStatus::Pass),
            ChecklistItem::new("coverage", "Coverage Type matches incident", "Yes - Injury covered", CheckStatus::Pass),
            ChecklistItem::new("premium", "Premium Paid", "Yes", CheckStatus::Pass),
            ChecklistItem::new(
                "active",
                "Policy Active During Incident",
                "Dec 05, 2025 within policy period",
                CheckStatus::Pass,
            ),
            ChecklistItem::new("claims", "Previous Claims", "2 previous claims", CheckStatus::Warning),
        ],
        account: AccountVerification::new(OWNER_NAME, "Arjun Kumar Mehta"),
        summary: CaseSummary {
            pet_name: "Bruno".to_string(),
            claim_type: "Injury".to_string(),
            incident_date: parse_console_date("Dec 03, 2025")?,
            vet_visit_date: parse_console_date("Dec 04, 2025")?,
            clinic_name: "PawCare Veterinary Clinic".to_string(),
            policy_active: true,
            coverage_applicable: true,
            previous_claims: 2,
        },
        bills: BillBreakdown {
            consultation: inr(dec!(1200)),
            treatment: inr(dec!(4500)),
            other: inr(dec!(800)),
        },
        limits: CoverageLimits {
            remaining_sum_insured: inr(dec!(45000)),
            sub_limit: inr(dec!(5000)),
        },
        vet_case: VetCase {
            pet: PetProfile {
                name: "Bruno".to_string(),
                breed: "Golden Retriever".to_string(),
                age: "4 years".to_string(),
                claim_type: "Surgery".to_string(),
            },
            incident: IncidentSummary {
                description: "Pet underwent emergency surgery after ingesting a foreign object during a walk in the park."
                    .to_string(),
                incident_date: parse_console_date("Dec 01, 2024")?,
                vet_visit_date: parse_console_date("Dec 01, 2024")?,
                clinic_name: "PetCare Veterinary Hospital".to_string(),
            },
            documents: ["Consultation Bill", "Treatment Proof", "X-Ray Report"]
                .into_iter()
                .map(|name| ReviewedFile {
                    name: name.to_string(),
                    file_type: "PDF".to_string(),
                })
                .collect(),
        },
        payout: PayoutSummary {
            total_submitted: inr(dec!(6500)),
            total_approved: inr(dec!(4200)),
            deductibles: inr(dec!(800)),
            non_payables: inr(dec!(1500)),
        },
        bank: BankDetails {
            account_holder_name: OWNER_NAME.to_string(),
            account_number: "****5678".to_string(),
            ifsc_code: "HDFC000123".to_string(),
            bank_name: "HDFC Bank".to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: &str) -> ClaimNumber {
        value.parse().unwrap()
    }

    #[tokio::test]
    async fn test_fixture_dashboard() {
        let port = FixtureClaimData::load().unwrap();
        let claims = port.list_claims(&ClaimQuery::default()).await.unwrap();
        assert_eq!(claims.len(), 12);
        assert_eq!(claims[0].claim_number.as_str(), "PETCLM00012345");
        assert_eq!(claims[0].policy_number.as_str(), "PETPOL00089234");
        assert_eq!(claims[1].reference_id.as_str(), "DMAG0000761");
    }

    #[tokio::test]
    async fn test_fixture_histories_match_dashboard_status() {
        let port = FixtureClaimData::load().unwrap();
        for claim in port.list_claims(&ClaimQuery::default()).await.unwrap() {
            let derived = ClaimStatus::derive_from(&claim.stages);
            match claim.status {
                // These are set by the payments backend, not by the stages
                ClaimStatus::PaymentFailed | ClaimStatus::PendingClosure | ClaimStatus::Reopened => {}
                status => assert_eq!(derived, status, "{}", claim.claim_number),
            }
        }
    }

    #[tokio::test]
    async fn test_detailed_claim_history() {
        let port = FixtureClaimData::load().unwrap();
        let claim = port.fetch_claim(&number("PETCLM00012345")).await.unwrap();
        assert_eq!(claim.stages.len(), 3);
        assert_eq!(claim.stages[1].kind, StageKind::DocumentVerification);
        assert_eq!(
            claim.stages[1].display_time().as_deref(),
            Some("7:38 PM | Dec 06, 2025")
        );
        assert_eq!(claim.policy_period.to_string(), "4 November, 2024 - 2 November, 2025");
    }

    #[tokio::test]
    async fn test_unknown_claim_opens_default() {
        let port = FixtureClaimData::load().unwrap();
        let claim = port.fetch_claim(&number("PETCLM99999999")).await.unwrap();
        assert_eq!(claim.claim_number.as_str(), "PETCLM99999999");
        assert_eq!(claim.pet_name, "Unknown");
        assert_eq!(claim.stages, vec![Stage::initial()]);
    }

    #[tokio::test]
    async fn test_document_fixtures() {
        let port = FixtureClaimData::load().unwrap();
        let claim = number("PETCLM00012345");

        let admissibility = port.fetch_documents(&claim, StageKind::CheckAdmissibility).await.unwrap();
        assert_eq!(admissibility.mandatory().count(), 2);
        assert_eq!(admissibility.all().len(), 3);

        let verification = port.fetch_documents(&claim, StageKind::DocumentVerification).await.unwrap();
        assert_eq!(verification.all().len(), 5);
        let bill = verification.get("1").unwrap();
        assert!(bill.is_resubmitted);
        assert_eq!(bill.resubmit_date, Some(parse_console_date("Dec 10, 2025").unwrap()));
    }

    #[tokio::test]
    async fn test_health_check() {
        let port = FixtureClaimData::load().unwrap();
        let health = port.health_check().await;
        assert_eq!(health.status, AdapterHealth::Healthy);
        assert_eq!(health.adapter_id, "fixture-claim-data");
    }
}
