//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{ClaimNumber, Money};
use domain_claims::{Decision, Stage, StageId, StageKind, StageStatus};

use crate::fixtures::StageFixtures;

/// Strategy for generating stage kinds
pub fn stage_kind_strategy() -> impl Strategy<Value = StageKind> {
    prop::sample::select(StageKind::ALL.to_vec())
}

/// Strategy for generating stage statuses
pub fn stage_status_strategy() -> impl Strategy<Value = StageStatus> {
    prop_oneof![
        Just(StageStatus::Pending),
        Just(StageStatus::Submitted),
        Just(StageStatus::OnHold),
        Just(StageStatus::Cancelled),
        Just(StageStatus::Completed),
        Just(StageStatus::Rejected),
        Just(StageStatus::PendingWithVet),
        Just(StageStatus::Processing),
    ]
}

/// Strategy for generating positive INR amounts up to ₹1,00,000 in paise
pub fn positive_inr_strategy() -> impl Strategy<Value = Money> {
    (1i64..10_000_000i64).prop_map(|paise| Money::inr(Decimal::new(paise, 2)))
}

/// Strategy for generating non-blank handler notes
pub fn note_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,12}( [a-z]{1,12}){0,4}"
}

/// Strategy for generating decisions taken before settlement
pub fn review_decision_strategy() -> impl Strategy<Value = Decision> {
    prop_oneof![
        Just(Decision::ApproveAdmissibility),
        note_strategy().prop_map(|note| Decision::RequestDocumentsFromAdmissibility { note }),
        Just(Decision::ApproveDocuments),
        note_strategy().prop_map(|note| Decision::RequestDocumentsAgain { note }),
        (positive_inr_strategy(), note_strategy())
            .prop_map(|(amount, notes)| Decision::ApproveClaim { amount, notes }),
        note_strategy().prop_map(|note| Decision::SendToVet { note }),
        note_strategy().prop_map(|reason| Decision::RejectClaim { reason }),
    ]
}

/// Strategy for generating vet and payment decisions
pub fn settlement_decision_strategy() -> impl Strategy<Value = Decision> {
    prop_oneof![
        (positive_inr_strategy(), note_strategy())
            .prop_map(|(amount, notes)| Decision::VetApprove { amount, notes }),
        note_strategy().prop_map(|reason| Decision::VetReject { reason }),
        note_strategy().prop_map(|note| Decision::VetRequestDocuments { note }),
        Just(Decision::ProcessPayment),
        note_strategy().prop_map(|reason| Decision::HoldPayment { reason }),
        note_strategy().prop_map(|reason| Decision::RejectPayment { reason }),
    ]
}

/// Strategy for generating any handler decision
pub fn decision_strategy() -> impl Strategy<Value = Decision> {
    prop_oneof![review_decision_strategy(), settlement_decision_strategy()]
}

/// Strategy for generating decision sequences
pub fn decision_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<Decision>> {
    proptest::collection::vec(decision_strategy(), 0..=max_len)
}

/// Strategy for generating stage lists with ascending, possibly sparse ids
pub fn stage_list_strategy() -> impl Strategy<Value = Vec<Stage>> {
    proptest::collection::vec((1u32..4u32, stage_kind_strategy(), stage_status_strategy()), 1..8).prop_map(
        |rows| {
            let mut id = 0;
            rows.into_iter()
                .map(|(gap, kind, status)| {
                    id += gap;
                    Stage::new(StageId::new(id), kind, status)
                })
                .collect()
        },
    )
}

/// Strategy picking one of the recorded stage histories, including Bruno's,
/// where a submitted document stage sits behind a pending claim verification
pub fn fixture_history_strategy() -> impl Strategy<Value = Vec<Stage>> {
    prop_oneof![
        Just(StageFixtures::fresh()),
        Just(StageFixtures::bruno()),
        Just(StageFixtures::with_vet()),
        Just(StageFixtures::awaiting_payment()),
    ]
}

/// Strategy for generating claim numbers
pub fn claim_number_strategy() -> impl Strategy<Value = ClaimNumber> {
    (0u64..100_000_000u64).prop_map(ClaimNumber::from_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_notes_are_not_blank(note in note_strategy()) {
            prop_assert!(!note.trim().is_empty());
        }

        #[test]
        fn generated_stage_ids_ascend(stages in stage_list_strategy()) {
            prop_assert!(stages.windows(2).all(|w| w[0].id < w[1].id));
        }
    }
}
