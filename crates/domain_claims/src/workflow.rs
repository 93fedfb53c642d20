//! Claim workflow controller
//!
//! [`ClaimWorkflow`] owns a claim's stage list and is its only writer. Review
//! panels hand it one [`Decision`] at a time; each decision is looked up in a
//! fixed transition table that says which stage must be awaiting it, which
//! stages change status and which stage (if any) is appended.
//!
//! # State Machine
//!
//! ```text
//! Check Admissibility ─┬─▶ Claim Verification ─┬─▶ Payment Processing ─▶ Completed | On Hold | Rejected
//!                      │        ▲              ├─▶ Rejected
//!                      ▼        │              ▼
//!        Document Verification ◀──────── Vet Investigation ─▶ Payment Processing | Rejected
//!          (On Hold loop)
//! ```
//!
//! Decisions only act on the current stage, the one with the highest id. A
//! decision whose stage has already moved on, or that a later stage has
//! superseded, is refused without touching the stage list.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use core_kernel::Money;

use crate::error::{ClaimError, WorkflowError};
use crate::ports::StagesObserver;
use crate::stage::{Stage, StageId, StageKind, StageStatus};

/// A handler decision taken from one stage's review panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    ApproveAdmissibility,
    RequestDocumentsFromAdmissibility { note: String },
    ApproveDocuments,
    RequestDocumentsAgain { note: String },
    ApproveClaim { amount: Money, notes: String },
    SendToVet { note: String },
    RejectClaim { reason: String },
    VetApprove { amount: Money, notes: String },
    VetReject { reason: String },
    VetRequestDocuments { note: String },
    ProcessPayment,
    HoldPayment { reason: String },
    RejectPayment { reason: String },
}

impl Decision {
    /// The stage whose panel issues this decision
    pub fn source(&self) -> StageKind {
        match self {
            Decision::ApproveAdmissibility | Decision::RequestDocumentsFromAdmissibility { .. } => {
                StageKind::CheckAdmissibility
            }
            Decision::ApproveDocuments | Decision::RequestDocumentsAgain { .. } => {
                StageKind::DocumentVerification
            }
            Decision::ApproveClaim { .. } | Decision::SendToVet { .. } | Decision::RejectClaim { .. } => {
                StageKind::ClaimVerification
            }
            Decision::VetApprove { .. } | Decision::VetReject { .. } | Decision::VetRequestDocuments { .. } => {
                StageKind::VetInvestigation
            }
            Decision::ProcessPayment | Decision::HoldPayment { .. } | Decision::RejectPayment { .. } => {
                StageKind::PaymentProcessing
            }
        }
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Decision::ApproveAdmissibility => "approve_admissibility",
            Decision::RequestDocumentsFromAdmissibility { .. } => "request_documents_from_admissibility",
            Decision::ApproveDocuments => "approve_documents",
            Decision::RequestDocumentsAgain { .. } => "request_documents_again",
            Decision::ApproveClaim { .. } => "approve_claim",
            Decision::SendToVet { .. } => "send_to_vet",
            Decision::RejectClaim { .. } => "reject_claim",
            Decision::VetApprove { .. } => "vet_approve",
            Decision::VetReject { .. } => "vet_reject",
            Decision::VetRequestDocuments { .. } => "vet_request_documents",
            Decision::ProcessPayment => "process_payment",
            Decision::HoldPayment { .. } => "hold_payment",
            Decision::RejectPayment { .. } => "reject_payment",
        }
    }

    /// Free text the handler attached to the decision
    pub fn remarks(&self) -> Option<&str> {
        let text = match self {
            Decision::RequestDocumentsFromAdmissibility { note }
            | Decision::RequestDocumentsAgain { note }
            | Decision::SendToVet { note }
            | Decision::VetRequestDocuments { note } => note,
            Decision::ApproveClaim { notes, .. } | Decision::VetApprove { notes, .. } => notes,
            Decision::RejectClaim { reason }
            | Decision::VetReject { reason }
            | Decision::HoldPayment { reason }
            | Decision::RejectPayment { reason } => reason,
            Decision::ApproveAdmissibility | Decision::ApproveDocuments | Decision::ProcessPayment => {
                return None
            }
        };
        let trimmed = text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Settlement amount carried by approval decisions
    pub fn settlement(&self) -> Option<Money> {
        match self {
            Decision::ApproveClaim { amount, .. } | Decision::VetApprove { amount, .. } => Some(*amount),
            _ => None,
        }
    }

    fn transition(&self) -> &'static Transition {
        match self {
            Decision::ApproveAdmissibility => &APPROVE_ADMISSIBILITY,
            Decision::RequestDocumentsFromAdmissibility { .. } => &REQUEST_DOCUMENTS_FROM_ADMISSIBILITY,
            Decision::ApproveDocuments => &APPROVE_DOCUMENTS,
            Decision::RequestDocumentsAgain { .. } => &REQUEST_DOCUMENTS_AGAIN,
            Decision::ApproveClaim { .. } => &APPROVE_CLAIM,
            Decision::SendToVet { .. } => &SEND_TO_VET,
            Decision::RejectClaim { .. } => &REJECT_CLAIM,
            Decision::VetApprove { .. } => &VET_APPROVE,
            Decision::VetReject { .. } => &VET_REJECT,
            Decision::VetRequestDocuments { .. } => &VET_REQUEST_DOCUMENTS,
            Decision::ProcessPayment => &PROCESS_PAYMENT,
            Decision::HoldPayment { .. } => &HOLD_PAYMENT,
            Decision::RejectPayment { .. } => &REJECT_PAYMENT,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Status change applied to the newest stage of a kind
#[derive(Debug, Clone, Copy)]
struct StageUpdate {
    kind: StageKind,
    status: StageStatus,
    stamp: bool,
}

/// One row of the transition table
#[derive(Debug)]
struct Transition {
    /// Statuses in which the source stage accepts the decision
    accepts: &'static [StageStatus],
    updates: &'static [StageUpdate],
    append: Option<(StageKind, StageStatus)>,
    expand_appended: bool,
}

use StageKind::*;
use StageStatus::*;

const DOCUMENT_REVIEW_OPEN: &[StageStatus] = &[Pending, Submitted, OnHold];
const PAYMENT_OPEN: &[StageStatus] = &[Pending, Processing, OnHold];

static APPROVE_ADMISSIBILITY: Transition = Transition {
    accepts: &[Pending],
    updates: &[StageUpdate { kind: CheckAdmissibility, status: Completed, stamp: true }],
    append: Some((ClaimVerification, Pending)),
    expand_appended: false,
};

static REQUEST_DOCUMENTS_FROM_ADMISSIBILITY: Transition = Transition {
    accepts: &[Pending],
    updates: &[StageUpdate { kind: CheckAdmissibility, status: Completed, stamp: true }],
    append: Some((DocumentVerification, Pending)),
    expand_appended: true,
};

static APPROVE_DOCUMENTS: Transition = Transition {
    accepts: DOCUMENT_REVIEW_OPEN,
    updates: &[StageUpdate { kind: DocumentVerification, status: Completed, stamp: true }],
    append: Some((ClaimVerification, Pending)),
    expand_appended: false,
};

static REQUEST_DOCUMENTS_AGAIN: Transition = Transition {
    accepts: DOCUMENT_REVIEW_OPEN,
    updates: &[StageUpdate { kind: DocumentVerification, status: OnHold, stamp: false }],
    append: None,
    expand_appended: false,
};

static APPROVE_CLAIM: Transition = Transition {
    accepts: &[Pending],
    updates: &[StageUpdate { kind: ClaimVerification, status: Completed, stamp: true }],
    append: Some((PaymentProcessing, Pending)),
    expand_appended: false,
};

static SEND_TO_VET: Transition = Transition {
    accepts: &[Pending],
    updates: &[StageUpdate { kind: ClaimVerification, status: OnHold, stamp: false }],
    append: Some((VetInvestigation, PendingWithVet)),
    expand_appended: true,
};

static REJECT_CLAIM: Transition = Transition {
    accepts: &[Pending],
    updates: &[StageUpdate { kind: ClaimVerification, status: Rejected, stamp: true }],
    append: None,
    expand_appended: false,
};

static VET_APPROVE: Transition = Transition {
    accepts: &[PendingWithVet],
    updates: &[
        StageUpdate { kind: VetInvestigation, status: Completed, stamp: true },
        StageUpdate { kind: ClaimVerification, status: Completed, stamp: true },
    ],
    append: Some((PaymentProcessing, Pending)),
    expand_appended: false,
};

static VET_REJECT: Transition = Transition {
    accepts: &[PendingWithVet],
    updates: &[
        StageUpdate { kind: VetInvestigation, status: Completed, stamp: true },
        StageUpdate { kind: ClaimVerification, status: Rejected, stamp: true },
    ],
    append: None,
    expand_appended: false,
};

static VET_REQUEST_DOCUMENTS: Transition = Transition {
    accepts: &[PendingWithVet],
    updates: &[
        StageUpdate { kind: VetInvestigation, status: Cancelled, stamp: false },
        StageUpdate { kind: ClaimVerification, status: Cancelled, stamp: false },
    ],
    append: Some((DocumentVerification, Pending)),
    expand_appended: true,
};

static PROCESS_PAYMENT: Transition = Transition {
    accepts: PAYMENT_OPEN,
    updates: &[StageUpdate { kind: PaymentProcessing, status: Completed, stamp: true }],
    append: None,
    expand_appended: false,
};

static HOLD_PAYMENT: Transition = Transition {
    accepts: PAYMENT_OPEN,
    updates: &[StageUpdate { kind: PaymentProcessing, status: OnHold, stamp: false }],
    append: None,
    expand_appended: false,
};

static REJECT_PAYMENT: Transition = Transition {
    accepts: PAYMENT_OPEN,
    updates: &[StageUpdate { kind: PaymentProcessing, status: Rejected, stamp: true }],
    append: None,
    expand_appended: false,
};

/// Returns true if a stage of `kind` in `status` is awaiting a handler decision
pub fn is_actionable(kind: StageKind, status: StageStatus) -> bool {
    let accepts = match kind {
        CheckAdmissibility => APPROVE_ADMISSIBILITY.accepts,
        DocumentVerification => DOCUMENT_REVIEW_OPEN,
        ClaimVerification => APPROVE_CLAIM.accepts,
        VetInvestigation => VET_APPROVE.accepts,
        PaymentProcessing => PAYMENT_OPEN,
    };
    accepts.contains(&status)
}

/// Audit entry for one applied decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub decision: Decision,
    /// Stage the decision was taken on
    pub source: StageId,
    /// Stages whose status changed, with their new status
    pub updated: Vec<(StageId, StageStatus)>,
    pub appended: Option<StageId>,
    pub expanded: Option<StageId>,
    pub at: DateTime<Utc>,
}

/// The stage list of one claim and the decisions applied to it
pub struct ClaimWorkflow {
    stages: Vec<Stage>,
    expanded: Option<StageId>,
    next_id: StageId,
    approved_amount: Option<Money>,
    history: Vec<TransitionRecord>,
    observer: Option<Arc<dyn StagesObserver>>,
}

impl fmt::Debug for ClaimWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimWorkflow")
            .field("stages", &self.stages)
            .field("expanded", &self.expanded)
            .field("next_id", &self.next_id)
            .field("approved_amount", &self.approved_amount)
            .field("history", &self.history.len())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Default for ClaimWorkflow {
    fn default() -> Self {
        Self::start()
    }
}

impl ClaimWorkflow {
    /// Starts a new claim at Check Admissibility, Pending
    pub fn start() -> Self {
        Self {
            stages: vec![Stage::initial()],
            expanded: None,
            next_id: StageId::new(2),
            approved_amount: None,
            history: Vec::new(),
            observer: None,
        }
    }

    /// Mounts an existing stage list
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::InvalidStages` if the list is empty, ids repeat or
    /// no id is left for a new stage
    pub fn from_stages(mut stages: Vec<Stage>) -> Result<Self, ClaimError> {
        stages.sort_by_key(|s| s.id);
        if stages.windows(2).any(|w| w[0].id == w[1].id) {
            return Err(ClaimError::InvalidStages("stage ids must be unique".to_string()));
        }
        let last = stages
            .last()
            .ok_or_else(|| ClaimError::InvalidStages("a claim needs at least one stage".to_string()))?;
        let next_id = last
            .id
            .next()
            .ok_or_else(|| ClaimError::InvalidStages(format!("no stage id is left after {}", last.id)))?;

        Ok(Self {
            stages,
            expanded: None,
            next_id,
            approved_amount: None,
            history: Vec::new(),
            observer: None,
        })
    }

    /// Registers the callback fired with the full stage list after every transition
    pub fn with_observer(mut self, observer: Arc<dyn StagesObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Stages in id order (oldest first)
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// The stage whose review panel is open
    pub fn expanded(&self) -> Option<StageId> {
        self.expanded
    }

    /// Settlement amount approved at claim or vet verification
    pub fn approved_amount(&self) -> Option<Money> {
        self.approved_amount
    }

    /// Decisions applied since the workflow was mounted
    pub fn history(&self) -> &[TransitionRecord] {
        &self.history
    }

    /// The newest stage of the given kind
    pub fn newest(&self, kind: StageKind) -> Option<&Stage> {
        self.stages.iter().rev().find(|s| s.kind == kind)
    }

    /// The most recently added stage, the only one that takes decisions
    pub fn current(&self) -> Option<&Stage> {
        self.stages.last()
    }

    /// The current stage, if it is awaiting a handler decision
    pub fn awaiting_decision(&self) -> Option<&Stage> {
        self.current().filter(|s| is_actionable(s.kind, s.status))
    }

    /// Whether a stage of `kind` is awaiting a decision
    pub fn can_decide(&self, kind: StageKind) -> bool {
        self.awaiting_decision().map(|s| s.kind == kind).unwrap_or(false)
    }

    /// Whether the claim reached a terminal state
    pub fn is_closed(&self) -> bool {
        self.stages.iter().any(|s| s.status == Rejected)
            || self
                .newest(PaymentProcessing)
                .map(|s| s.status == Completed)
                .unwrap_or(false)
    }

    /// Opens the review panel of a stage
    pub fn expand(&mut self, id: StageId) -> Result<(), WorkflowError> {
        if !self.stages.iter().any(|s| s.id == id) {
            return Err(WorkflowError::StageNotFound(id));
        }
        self.expanded = Some(id);
        Ok(())
    }

    /// Closes the open review panel
    pub fn collapse(&mut self) {
        self.expanded = None;
    }

    /// Applies a decision and returns the new stage list
    ///
    /// # Errors
    ///
    /// - `WorkflowError::StageMissing` if a stage the decision touches does not exist
    /// - `WorkflowError::StageNotActionable` if the source stage is not awaiting
    ///   this decision, e.g. because it was already decided
    /// - `WorkflowError::StageSuperseded` if a later stage follows the source stage
    /// - `WorkflowError::StageIdsExhausted` if no id is left for an appended stage
    /// - `WorkflowError::InvalidSettlement` if an approval carries a non-positive amount
    ///
    /// The stage list is left untouched on error.
    pub fn apply(&mut self, decision: Decision) -> Result<&[Stage], WorkflowError> {
        let transition = decision.transition();
        let source_kind = decision.source();

        let source_index = self
            .newest_index(source_kind)
            .ok_or(WorkflowError::StageMissing { stage: source_kind })?;
        let source = &self.stages[source_index];
        if !transition.accepts.contains(&source.status) {
            warn!(
                decision = decision.name(),
                stage = %source.id,
                status = %source.status,
                "Decision refused, stage is not awaiting it"
            );
            return Err(WorkflowError::StageNotActionable {
                stage: source_kind,
                status: source.status,
            });
        }
        let source_id = source.id;

        if let Some(current) = self.current().filter(|s| s.id != source_id) {
            warn!(
                decision = decision.name(),
                stage = %source_id,
                current = %current.id,
                "Decision refused, a later stage superseded it"
            );
            return Err(WorkflowError::StageSuperseded {
                stage: source_kind,
                current: current.kind,
            });
        }

        if let Some(amount) = decision.settlement() {
            if !amount.is_positive() {
                return Err(WorkflowError::InvalidSettlement);
            }
        }

        let targets = transition
            .updates
            .iter()
            .map(|update| {
                self.newest_index(update.kind)
                    .map(|index| (index, *update))
                    .ok_or(WorkflowError::StageMissing { stage: update.kind })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let following = match transition.append {
            Some(_) => Some(
                self.next_id
                    .next()
                    .ok_or(WorkflowError::StageIdsExhausted(self.next_id))?,
            ),
            None => None,
        };

        let now = Utc::now();
        let mut updated = Vec::with_capacity(targets.len());
        for (index, update) in targets {
            let stage = &mut self.stages[index];
            stage.status = update.status;
            if update.stamp {
                stage.date_time = Some(now);
            }
            if stage.id == source_id {
                stage.remarks = decision.remarks().map(str::to_string);
            }
            updated.push((stage.id, stage.status));
        }

        let appended = transition.append.map(|(kind, status)| {
            let id = self.next_id;
            self.stages.push(Stage::new(id, kind, status));
            id
        });
        if let Some(following) = following {
            self.next_id = following;
        }

        self.expanded = if transition.expand_appended { appended } else { None };

        if let Some(amount) = decision.settlement() {
            self.approved_amount = Some(amount);
        }

        info!(
            decision = decision.name(),
            stage = %source_id,
            appended = ?appended.map(|id| id.value()),
            expanded = ?self.expanded.map(|id| id.value()),
            "Claim stage transition applied"
        );

        self.history.push(TransitionRecord {
            decision,
            source: source_id,
            updated,
            appended,
            expanded: self.expanded,
            at: now,
        });

        if let Some(observer) = &self.observer {
            observer.on_stages_update(&self.stages);
        }

        Ok(&self.stages)
    }

    fn newest_index(&self, kind: StageKind) -> Option<usize> {
        self.stages.iter().rposition(|s| s.kind == kind)
    }
}
