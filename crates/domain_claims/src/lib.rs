//! Pet Claims Review Domain
//!
//! This crate runs the pet insurance claim review: a claim moves through
//! admissibility, document verification, claim verification, an optional
//! vet investigation and payment. Handlers act through one review panel per
//! stage; panels validate their forms and hand decisions to the claim's
//! workflow controller, which owns the stage list.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Check Admissibility -> [Document Verification] -> Claim Verification
//!     -> [Vet Investigation] -> Payment Processing -> Closed
//! ```

pub mod adapters;
pub mod checklist;
pub mod claim;
pub mod document;
pub mod error;
pub mod payout;
pub mod ports;
pub mod review;
pub mod services;
pub mod settlement;
pub mod stage;
pub mod vet;
pub mod workflow;

pub use adapters::FixtureClaimData;
pub use claim::{status_counts, ClaimQuery, ClaimStatus, ClaimType, PetClaim};
pub use document::{Document, DocumentSet, DocumentStatus};
pub use error::{ClaimError, WorkflowError};
pub use ports::{CaseFile, ClaimDataPort, StagesObserver};
pub use review::ReviewError;
pub use services::{ClaimDesk, ClaimView, TimelineEntry};
pub use stage::{Stage, StageId, StageKind, StageStatus};
pub use workflow::{ClaimWorkflow, Decision, TransitionRecord};
