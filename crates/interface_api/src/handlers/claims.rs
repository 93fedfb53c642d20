//! Claims handlers
//!
//! Each stage action builds the stage's review panel, replays the submitted
//! form onto it and hands the panel's decision to the claim desk.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;
use validator::Validate;

use core_kernel::ClaimNumber;
use domain_claims::{ClaimQuery, ClaimView, StageId};

use crate::dto::claims::*;
use crate::{error::ApiError, AppState};

type ClaimResult<T = ClaimView> = Result<Json<T>, ApiError>;

fn claim_number(raw: &str) -> Result<ClaimNumber, ApiError> {
    Ok(raw.parse()?)
}

fn validated<T: Validate>(request: T) -> Result<T, ApiError> {
    request.validate()?;
    Ok(request)
}

/// Lists dashboard claims
pub async fn list_claims(
    State(state): State<AppState>,
    Query(query): Query<ClaimListQuery>,
) -> ClaimResult<ClaimListResponse> {
    let query = validated(query)?;

    let mut filter = ClaimQuery::default();
    if let Some(search) = query.search {
        filter = filter.search(search);
    }
    // "All" is the dashboard's unfiltered tab
    if let Some(status) = query
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
    {
        filter = filter.status(status.parse().map_err(ApiError::BadRequest)?);
    }

    let claims = state.desk.list(&filter).await?;
    Ok(Json(ClaimListResponse {
        total: claims.len(),
        claims,
    }))
}

/// Claim count per dashboard status
pub async fn status_counts(State(state): State<AppState>) -> ClaimResult<StatusCountsResponse> {
    let counts = state
        .desk
        .status_counts()
        .await?
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect();
    Ok(Json(StatusCountsResponse { counts }))
}

/// Opens a claim
pub async fn get_claim(State(state): State<AppState>, Path(number): Path<String>) -> ClaimResult {
    let number = claim_number(&number)?;
    Ok(Json(state.desk.open(&number).await?))
}

pub async fn expand_stage(
    State(state): State<AppState>,
    Path((number, stage)): Path<(String, u32)>,
) -> ClaimResult {
    let number = claim_number(&number)?;
    Ok(Json(state.desk.expand(&number, StageId::new(stage)).await?))
}

pub async fn collapse(State(state): State<AppState>, Path(number): Path<String>) -> ClaimResult {
    let number = claim_number(&number)?;
    Ok(Json(state.desk.collapse(&number).await?))
}

// ============================================================================
// Check Admissibility
// ============================================================================

pub async fn approve_admissibility(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Json(request): Json<AdmissibilityApproveRequest>,
) -> ClaimResult {
    let number = claim_number(&number)?;
    let request = validated(request)?;

    let mut review = state.desk.admissibility_review(&number).await?;
    for document in request.documents {
        review.set_document_status(&document.id, document.status)?;
        if let Some(note) = document.note {
            review.set_document_note(&document.id, note)?;
        }
    }
    review.set_account_approved(request.account_approved);
    if let Some(note) = request.account_note {
        review.set_account_note(note);
    }

    let decision = review.approve()?;
    Ok(Json(state.desk.decide(&number, decision).await?))
}

pub async fn request_admissibility_documents(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Json(request): Json<NoteRequest>,
) -> ClaimResult {
    let number = claim_number(&number)?;
    let request = validated(request)?;

    let review = state.desk.admissibility_review(&number).await?;
    let decision = review.request_documents(&request.note)?;
    Ok(Json(state.desk.decide(&number, decision).await?))
}

// ============================================================================
// Document Verification
// ============================================================================

pub async fn approve_documents(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Json(request): Json<DocumentApproveRequest>,
) -> ClaimResult {
    let number = claim_number(&number)?;
    let request = validated(request)?;

    let mut review = state.desk.document_review(&number).await?;
    for document in request.documents {
        review.set_document_status(&document.id, document.status)?;
        if let Some(note) = document.note {
            review.set_document_note(&document.id, note)?;
        }
    }

    let decision = review.approve()?;
    Ok(Json(state.desk.decide(&number, decision).await?))
}

pub async fn request_documents_again(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Json(request): Json<NoteRequest>,
) -> ClaimResult {
    let number = claim_number(&number)?;
    let request = validated(request)?;

    let review = state.desk.document_review(&number).await?;
    let decision = review.request_again(&request.note)?;
    Ok(Json(state.desk.decide(&number, decision).await?))
}

// ============================================================================
// Claim Verification
// ============================================================================

pub async fn approve_claim(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Json(request): Json<VerificationApproveRequest>,
) -> ClaimResult {
    let number = claim_number(&number)?;
    let request = validated(request)?;

    let review = state.desk.verification_review(&number).await?;
    let decision = review.approve(request.amount, &request.reduction_reason)?;
    Ok(Json(state.desk.decide(&number, decision).await?))
}

pub async fn send_to_vet(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Json(request): Json<NoteRequest>,
) -> ClaimResult {
    let number = claim_number(&number)?;
    let request = validated(request)?;

    let review = state.desk.verification_review(&number).await?;
    let decision = review.send_to_vet(&request.note)?;
    Ok(Json(state.desk.decide(&number, decision).await?))
}

pub async fn reject_claim(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Json(request): Json<ReasonRequest>,
) -> ClaimResult {
    let number = claim_number(&number)?;
    let request = validated(request)?;

    let review = state.desk.verification_review(&number).await?;
    let decision = review.reject(&request.reason)?;
    Ok(Json(state.desk.decide(&number, decision).await?))
}

// ============================================================================
// Vet Investigation
// ============================================================================

pub async fn vet_approve(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Json(request): Json<VetApproveRequest>,
) -> ClaimResult {
    let number = claim_number(&number)?;
    let request = validated(request)?;

    let mut review = state.desk.vet_review(&number).await?;
    review.submit_findings(request.findings.into())?;
    let decision = review.approve(request.amount, &request.notes)?;
    Ok(Json(state.desk.decide(&number, decision).await?))
}

pub async fn vet_reject(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Json(request): Json<VetRejectRequest>,
) -> ClaimResult {
    let number = claim_number(&number)?;
    let request = validated(request)?;

    let mut review = state.desk.vet_review(&number).await?;
    review.submit_findings(request.findings.into())?;
    let decision = review.reject(&request.reason)?;
    Ok(Json(state.desk.decide(&number, decision).await?))
}

pub async fn vet_request_documents(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Json(request): Json<VetRequestDocumentsRequest>,
) -> ClaimResult {
    let number = claim_number(&number)?;
    let request = validated(request)?;

    let mut review = state.desk.vet_review(&number).await?;
    review.submit_findings(request.findings.into())?;
    let decision = review.request_documents(&request.note)?;
    Ok(Json(state.desk.decide(&number, decision).await?))
}

// ============================================================================
// Payment Processing
// ============================================================================

pub async fn process_payment(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> ClaimResult<PaymentResponse> {
    let number = claim_number(&number)?;

    let review = state.desk.payment_review(&number).await?;
    let (decision, receipt) = review.process();
    let claim = state.desk.decide(&number, decision).await?;

    info!(
        claim = %number,
        reference = %receipt.reference,
        amount = %receipt.amount.format_grouped(),
        "Payment processed"
    );
    Ok(Json(PaymentResponse { claim, receipt }))
}

pub async fn hold_payment(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Json(request): Json<ReasonRequest>,
) -> ClaimResult {
    let number = claim_number(&number)?;
    let request = validated(request)?;

    let review = state.desk.payment_review(&number).await?;
    let decision = review.hold(&request.reason)?;
    Ok(Json(state.desk.decide(&number, decision).await?))
}

pub async fn reject_payment(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Json(request): Json<ReasonRequest>,
) -> ClaimResult {
    let number = claim_number(&number)?;
    let request = validated(request)?;

    let review = state.desk.payment_review(&number).await?;
    let decision = review.reject(&request.reason)?;
    Ok(Json(state.desk.decide(&number, decision).await?))
}
