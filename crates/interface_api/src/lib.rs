//! HTTP API Layer
//!
//! This crate provides the REST API for the pet claims console using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Dashboard queries and one action per review panel button
//! - **Middleware**: Request ids, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let desk = Arc::new(ClaimDesk::new(Arc::new(FixtureClaimData::load()?)));
//! let app = create_router(desk, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    http::HeaderName,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_claims::ClaimDesk;

use crate::config::ApiConfig;
use crate::handlers::{claims, health};
use crate::middleware::audit_middleware;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub desk: Arc<ClaimDesk>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `desk` - Claim desk serving every request
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(desk: Arc<ClaimDesk>, config: ApiConfig) -> Router {
    let cors = if config.cors_permissive {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };
    let state = AppState { desk, config };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let claims_routes = Router::new()
        .route("/", get(claims::list_claims))
        .route("/status-counts", get(claims::status_counts))
        .route("/:number", get(claims::get_claim))
        .route("/:number/stages/:stage_id/expand", post(claims::expand_stage))
        .route("/:number/collapse", post(claims::collapse))
        .route("/:number/admissibility/approve", post(claims::approve_admissibility))
        .route("/:number/admissibility/request-documents", post(claims::request_admissibility_documents))
        .route("/:number/documents/approve", post(claims::approve_documents))
        .route("/:number/documents/request-again", post(claims::request_documents_again))
        .route("/:number/verification/approve", post(claims::approve_claim))
        .route("/:number/verification/send-to-vet", post(claims::send_to_vet))
        .route("/:number/verification/reject", post(claims::reject_claim))
        .route("/:number/vet/approve", post(claims::vet_approve))
        .route("/:number/vet/reject", post(claims::vet_reject))
        .route("/:number/vet/request-documents", post(claims::vet_request_documents))
        .route("/:number/payment/process", post(claims::process_payment))
        .route("/:number/payment/hold", post(claims::hold_payment))
        .route("/:number/payment/reject", post(claims::reject_payment));

    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
        .layer(cors)
        .with_state(state)
}
