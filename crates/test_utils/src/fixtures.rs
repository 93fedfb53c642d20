//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the claims console. Values mirror the
//! console's fixture claim PETCLM00012345 so tests can assert against the
//! figures handlers see.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;

use core_kernel::{ClaimNumber, Currency, Money, CONSOLE_TIMEZONE};
use domain_claims::checklist::{AccountVerification, CheckStatus, ChecklistItem};
use domain_claims::payout::{BankDetails, PayoutSummary};
use domain_claims::review::CaseSummary;
use domain_claims::settlement::{BillBreakdown, CoverageLimits};
use domain_claims::vet::{
    IncidentSummary, MedicalAssessment, PetProfile, ReviewedFile, VetCase, VetFindings, VetRecommendation,
};
use domain_claims::{CaseFile, Document, DocumentSet, Stage, StageId, StageKind, StageStatus};

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Total of the consultation, treatment and other bills
    pub fn bills_total() -> Money {
        Money::inr(dec!(6500))
    }

    /// Sub-limit that caps the fixture claim's settlement
    pub fn sub_limit() -> Money {
        Money::inr(dec!(5000))
    }

    pub fn remaining_sum_insured() -> Money {
        Money::inr(dec!(45000))
    }

    /// Amount the payment panel pays when nothing was approved in session
    pub fn default_payout() -> Money {
        Money::inr(dec!(4200))
    }

    /// A USD amount for currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// 12:04 PM IST on Dec 05, 2025, when the fixture claim cleared admissibility
    pub fn admissibility_decided_at() -> DateTime<Utc> {
        CONSOLE_TIMEZONE
            .with_ymd_and_hms(2025, 12, 5, 12, 4, 0)
            .single()
            .expect("valid IST timestamp")
            .with_timezone(&Utc)
    }

    pub fn incident_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 3).expect("valid date")
    }

    pub fn vet_visit_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 4).expect("valid date")
    }

    pub fn resubmit_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 10).expect("valid date")
    }
}

/// Fixture for claim identifiers
pub struct ClaimNumberFixtures;

impl ClaimNumberFixtures {
    /// Bruno's claim, awaiting claim verification
    pub fn bruno() -> ClaimNumber {
        ClaimNumber::from_number(12345)
    }

    /// Coco's claim, awaiting document verification
    pub fn coco() -> ClaimNumber {
        ClaimNumber::from_number(12312)
    }

    /// A well-formed number with no fixture record
    pub fn unknown() -> ClaimNumber {
        ClaimNumber::from_number(99_999_999)
    }
}

/// Fixture for stage lists
pub struct StageFixtures;

impl StageFixtures {
    /// A new claim awaiting admissibility
    pub fn fresh() -> Vec<Stage> {
        vec![Stage::initial()]
    }

    /// Bruno's recorded history: admissibility done, documents submitted,
    /// claim verification pending
    pub fn bruno() -> Vec<Stage> {
        let decided = Some(TemporalFixtures::admissibility_decided_at());
        vec![
            Stage {
                date_time: decided,
                ..Stage::new(StageId::new(1), StageKind::CheckAdmissibility, StageStatus::Completed)
            },
            Stage {
                date_time: decided,
                ..Stage::new(StageId::new(2), StageKind::DocumentVerification, StageStatus::Submitted)
            },
            Stage::new(StageId::new(3), StageKind::ClaimVerification, StageStatus::Pending),
        ]
    }

    /// A claim referred to the vet
    pub fn with_vet() -> Vec<Stage> {
        vec![
            Stage::new(StageId::new(1), StageKind::CheckAdmissibility, StageStatus::Completed),
            Stage::new(StageId::new(2), StageKind::ClaimVerification, StageStatus::OnHold),
            Stage::new(StageId::new(3), StageKind::VetInvestigation, StageStatus::PendingWithVet),
        ]
    }

    /// A claim awaiting payout
    pub fn awaiting_payment() -> Vec<Stage> {
        vec![
            Stage::new(StageId::new(1), StageKind::CheckAdmissibility, StageStatus::Completed),
            Stage::new(StageId::new(2), StageKind::ClaimVerification, StageStatus::Completed),
            Stage::new(StageId::new(3), StageKind::PaymentProcessing, StageStatus::Pending),
        ]
    }
}

/// Fixture for document sets
pub struct DocumentFixtures;

impl DocumentFixtures {
    /// Documents reviewed at admissibility
    pub fn admissibility() -> DocumentSet {
        DocumentSet::new(vec![
            Document::new("1", "Vet Consultation Bill", true),
            Document::new("2", "Treatment Proof (Prescription)", true),
            Document::new("3", "Discharge Summary", false),
        ])
    }

    /// Documents reviewed at document verification
    pub fn verification() -> DocumentSet {
        DocumentSet::new(vec![
            Document::new("1", "Vet Consultation Bill", true).resubmitted_on(TemporalFixtures::resubmit_date()),
            Document::new("2", "Treatment Proof (Prescription)", true),
            Document::new("3", "Discharge Summary", false),
            Document::new("4", "Diagnostic Reports", false),
            Document::new("5", "Pharmacy Bill", false),
        ])
    }
}

/// Fixture for vet findings
pub struct VetFixtures;

impl VetFixtures {
    pub fn justified() -> VetFindings {
        VetFindings {
            assessment: Some(MedicalAssessment::MedicallyJustified),
            comments: "Foreign body removal was necessary.".to_string(),
            recommendation: Some(VetRecommendation::Approve),
            uploaded_files: vec!["vet-report.pdf".to_string()],
        }
    }
}

static CASE_FILE: Lazy<CaseFile> = Lazy::new(|| CaseFile {
    checklist: vec![
        ChecklistItem::new("pet", "Pet Insured", "Bruno - Active Policy", CheckStatus::Pass),
        ChecklistItem::new("coverage", "Coverage Type matches incident", "Yes - Injury covered", CheckStatus::Pass),
        ChecklistItem::new("premium", "Premium Paid", "Yes", CheckStatus::Pass),
        ChecklistItem::new("active", "Policy Active During Incident", "Dec 05, 2025 within policy period", CheckStatus::Pass),
        ChecklistItem::new("claims", "Previous Claims", "2 previous claims", CheckStatus::Warning),
    ],
    account: AccountVerification::new("Arjun Mehta", "Arjun Kumar Mehta"),
    summary: CaseSummary {
        pet_name: "Bruno".to_string(),
        claim_type: "Injury".to_string(),
        incident_date: TemporalFixtures::incident_date(),
        vet_visit_date: TemporalFixtures::vet_visit_date(),
        clinic_name: "PawCare Veterinary Clinic".to_string(),
        policy_active: true,
        coverage_applicable: true,
        previous_claims: 2,
    },
    bills: BillBreakdown {
        consultation: Money::inr(dec!(1200)),
        treatment: Money::inr(dec!(4500)),
        other: Money::inr(dec!(800)),
    },
    limits: CoverageLimits {
        remaining_sum_insured: MoneyFixtures::remaining_sum_insured(),
        sub_limit: MoneyFixtures::sub_limit(),
    },
    vet_case: VetCase {
        pet: PetProfile {
            name: "Bruno".to_string(),
            breed: "Golden Retriever".to_string(),
            age: "4 years".to_string(),
            claim_type: "Surgery".to_string(),
        },
        incident: IncidentSummary {
            description: "Emergency surgery after ingesting a foreign object.".to_string(),
            incident_date: TemporalFixtures::incident_date(),
            vet_visit_date: TemporalFixtures::vet_visit_date(),
            clinic_name: "PetCare Veterinary Hospital".to_string(),
        },
        documents: vec![ReviewedFile {
            name: "X-Ray Report".to_string(),
            file_type: "PDF".to_string(),
        }],
    },
    payout: PayoutSummary {
        total_submitted: MoneyFixtures::bills_total(),
        total_approved: MoneyFixtures::default_payout(),
        deductibles: Money::inr(dec!(800)),
        non_payables: Money::inr(dec!(1500)),
    },
    bank: BankDetails {
        account_holder_name: "Arjun Mehta".to_string(),
        account_number: "****5678".to_string(),
        ifsc_code: "HDFC000123".to_string(),
        bank_name: "HDFC Bank".to_string(),
    },
});

/// Fixture for the reference data behind the review panels
pub struct CaseFileFixtures;

impl CaseFileFixtures {
    pub fn standard() -> CaseFile {
        CASE_FILE.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_bills_total() {
        let case = CaseFileFixtures::standard();
        assert_eq!(case.bills.total().unwrap(), MoneyFixtures::bills_total());
    }

    #[test]
    fn test_bruno_history_ids_ascend() {
        let ids: Vec<u32> = StageFixtures::bruno().iter().map(|s| s.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
