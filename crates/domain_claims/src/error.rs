//! Claims domain errors

use thiserror::Error;

use core_kernel::{IdentifierError, MoneyError, PortError, TemporalError};

use crate::review::ReviewError;
use crate::stage::{StageId, StageKind, StageStatus};

/// Errors raised by the workflow controller
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("{stage} has no stage awaiting this decision")]
    StageMissing { stage: StageKind },

    #[error("{stage} is {status} and cannot take this decision")]
    StageNotActionable { stage: StageKind, status: StageStatus },

    #[error("{stage} was superseded by {current} and cannot take this decision")]
    StageSuperseded { stage: StageKind, current: StageKind },

    #[error("Stage ids are exhausted at {0}")]
    StageIdsExhausted(StageId),

    #[error("Stage {0} does not exist")]
    StageNotFound(StageId),

    #[error("Settlement amount must be positive")]
    InvalidSettlement,
}

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error(transparent)]
    Review(#[from] ReviewError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Port(#[from] PortError),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Invalid timestamp: {0}")]
    Temporal(#[from] TemporalError),

    #[error("Invalid identifier: {0}")]
    Identifier(#[from] IdentifierError),

    #[error("Unknown stage title: {0}")]
    UnknownStage(String),

    #[error("Invalid stage list: {0}")]
    InvalidStages(String),
}
