//! Claim stages
//!
//! A claim moves through an ordered list of stages. Each stage is one step of
//! the review pipeline ([`StageKind`]) with a status and, once decided, a
//! timestamp.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{format_console_timestamp, parse_console_timestamp, TemporalError};

use crate::error::ClaimError;

/// Stable identifier of a stage within one claim's stage list
///
/// Ids are allocated in increasing order and never reused, so a higher id is
/// always a newer stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(u32);

impl StageId {
    /// Creates a stage id
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw number
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Returns the id following this one, or `None` once ids run out
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The steps of the claim review pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKind {
    #[serde(rename = "Check Admissibility")]
    CheckAdmissibility,
    #[serde(rename = "Document Verification", alias = "Documents Requested")]
    DocumentVerification,
    #[serde(rename = "Claim Verification")]
    ClaimVerification,
    #[serde(rename = "Vet Investigation")]
    VetInvestigation,
    #[serde(rename = "Payment Processing")]
    PaymentProcessing,
}

impl StageKind {
    /// All stage kinds in pipeline order
    pub const ALL: [StageKind; 5] = [
        StageKind::CheckAdmissibility,
        StageKind::DocumentVerification,
        StageKind::ClaimVerification,
        StageKind::VetInvestigation,
        StageKind::PaymentProcessing,
    ];

    /// Returns the title shown on the timeline
    pub fn title(&self) -> &'static str {
        match self {
            StageKind::CheckAdmissibility => "Check Admissibility",
            StageKind::DocumentVerification => "Document Verification",
            StageKind::ClaimVerification => "Claim Verification",
            StageKind::VetInvestigation => "Vet Investigation",
            StageKind::PaymentProcessing => "Payment Processing",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for StageKind {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Check Admissibility" => Ok(StageKind::CheckAdmissibility),
            // Older claims were created with this title
            "Document Verification" | "Documents Requested" => Ok(StageKind::DocumentVerification),
            "Claim Verification" => Ok(StageKind::ClaimVerification),
            "Vet Investigation" => Ok(StageKind::VetInvestigation),
            "Payment Processing" => Ok(StageKind::PaymentProcessing),
            other => Err(ClaimError::UnknownStage(other.to_string())),
        }
    }
}

/// Status of a single stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageStatus {
    Pending,
    Submitted,
    #[serde(rename = "On Hold")]
    OnHold,
    Cancelled,
    Completed,
    Rejected,
    #[serde(rename = "Pending with Vet")]
    PendingWithVet,
    Processing,
}

impl StageStatus {
    /// Returns the label shown on the status badge
    pub fn label(&self) -> &'static str {
        match self {
            StageStatus::Pending => "Pending",
            StageStatus::Submitted => "Submitted",
            StageStatus::OnHold => "On Hold",
            StageStatus::Cancelled => "Cancelled",
            StageStatus::Completed => "Completed",
            StageStatus::Rejected => "Rejected",
            StageStatus::PendingWithVet => "Pending with Vet",
            StageStatus::Processing => "Processing",
        }
    }

    /// Whether the timeline marks the stage with a check
    pub fn shows_check(&self) -> bool {
        matches!(self, StageStatus::OnHold | StageStatus::Completed)
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One step in a claim's review pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id: StageId,
    #[serde(rename = "title")]
    pub kind: StageKind,
    pub date_time: Option<DateTime<Utc>>,
    pub status: StageStatus,
    /// Note or reason given with the last decision on this stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl Stage {
    /// Creates an undated stage
    pub fn new(id: StageId, kind: StageKind, status: StageStatus) -> Self {
        Self {
            id,
            kind,
            date_time: None,
            status,
            remarks: None,
        }
    }

    /// The starting stage of every claim
    pub fn initial() -> Self {
        Self::new(StageId::new(1), StageKind::CheckAdmissibility, StageStatus::Pending)
    }

    /// Sets the timestamp from its console representation
    pub fn at_console_time(mut self, value: &str) -> Result<Self, TemporalError> {
        self.date_time = Some(parse_console_timestamp(value)?);
        Ok(self)
    }

    /// Timeline title
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    /// Timestamp rendered for the timeline, if any
    pub fn display_time(&self) -> Option<String> {
        self.date_time.map(format_console_timestamp)
    }
}

/// Returns the stages ordered newest first, as the timeline shows them
pub fn timeline_order(stages: &[Stage]) -> Vec<&Stage> {
    let mut ordered: Vec<&Stage> = stages.iter().collect();
    ordered.sort_by(|a, b| b.id.cmp(&a.id));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_serializes_with_titles_and_labels() {
        let stage = Stage::new(StageId::new(4), StageKind::VetInvestigation, StageStatus::PendingWithVet);
        let json = serde_json::to_value(&stage).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["title"], "Vet Investigation");
        assert_eq!(json["status"], "Pending with Vet");
        assert!(json["dateTime"].is_null());
    }

    #[test]
    fn test_documents_requested_alias() {
        let kind: StageKind = "Documents Requested".parse().unwrap();
        assert_eq!(kind, StageKind::DocumentVerification);

        let stage: Stage = serde_json::from_value(serde_json::json!({
            "id": 2,
            "title": "Documents Requested",
            "dateTime": null,
            "status": "Submitted"
        }))
        .unwrap();
        assert_eq!(stage.kind, StageKind::DocumentVerification);
        assert_eq!(stage.title(), "Document Verification");
    }

    #[test]
    fn test_timeline_order_is_newest_first() {
        let stages = vec![
            Stage::initial(),
            Stage::new(StageId::new(2), StageKind::ClaimVerification, StageStatus::Pending),
        ];
        let ordered = timeline_order(&stages);
        assert_eq!(ordered[0].id, StageId::new(2));
        assert_eq!(ordered[1].id, StageId::new(1));
    }

    #[test]
    fn test_next_id_stops_at_max() {
        assert_eq!(StageId::new(3).next(), Some(StageId::new(4)));
        assert_eq!(StageId::new(u32::MAX).next(), None);
    }

    #[test]
    fn test_check_mark_statuses() {
        assert!(StageStatus::OnHold.shows_check());
        assert!(StageStatus::Completed.shows_check());
        assert!(!StageStatus::Rejected.shows_check());
    }
}
