//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_claims::{ClaimError, ReviewError, Stage, StageKind, StageStatus, WorkflowError};

/// Asserts that two Money values are equal, printing both as the console shows them
pub fn assert_money_eq(actual: &Money, expected: &Money) {
    assert_eq!(
        actual,
        expected,
        "Money mismatch: actual={}, expected={}",
        actual.format_grouped(),
        expected.format_grouped()
    );
}

/// Asserts that stage ids are unique and strictly increasing in list order
pub fn assert_ids_strictly_increasing(stages: &[Stage]) {
    for pair in stages.windows(2) {
        assert!(
            pair[0].id < pair[1].id,
            "Stage ids not increasing: {} followed by {}",
            pair[0].id,
            pair[1].id
        );
    }
}

/// Asserts the newest stage of `kind` has the given status
pub fn assert_newest_stage(stages: &[Stage], kind: StageKind, status: StageStatus) {
    let newest = stages
        .iter()
        .filter(|s| s.kind == kind)
        .max_by_key(|s| s.id)
        .unwrap_or_else(|| panic!("No {} stage in {:?}", kind, stages));
    assert_eq!(
        newest.status, status,
        "Newest {} stage (id {}) is {}, expected {}",
        kind, newest.id, newest.status, status
    );
}

/// Asserts the last stage in the list is `kind` with `status`
pub fn assert_last_stage(stages: &[Stage], kind: StageKind, status: StageStatus) {
    let last = stages.last().expect("stage list is empty");
    assert_eq!(
        (last.kind, last.status),
        (kind, status),
        "Last stage is {} {}, expected {} {}",
        last.kind,
        last.status,
        kind,
        status
    );
}

/// Asserts that a workflow refused a decision because its stage had moved on
pub fn assert_not_actionable<T: std::fmt::Debug>(result: Result<T, WorkflowError>) {
    match result {
        Err(WorkflowError::StageNotActionable { .. })
        | Err(WorkflowError::StageSuperseded { .. })
        | Err(WorkflowError::StageMissing { .. }) => {}
        other => panic!("Expected the decision to be refused, got {:?}", other),
    }
}

/// Asserts that a panel rejected its form with the given toast title
pub fn assert_review_error<T: std::fmt::Debug>(result: Result<T, ReviewError>, title: &str) {
    match result {
        Err(err) => assert_eq!(err.title(), title, "Unexpected review error: {}", err),
        Ok(value) => panic!("Expected '{}' review error, got {:?}", title, value),
    }
}

/// Asserts that a desk operation failed with a workflow refusal
pub fn assert_claim_refused<T: std::fmt::Debug>(result: Result<T, ClaimError>) {
    match result {
        Err(ClaimError::Workflow(_)) => {}
        other => panic!("Expected a workflow refusal, got {:?}", other),
    }
}
