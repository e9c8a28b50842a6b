//! HTTP API Layer
//!
//! REST surface over the TISS service using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: claim document generation, schema status, health
//! - **Middleware**: tracing and audit logging with request ids
//! - **DTOs**: response bodies
//! - **Error Handling**: consistent JSON error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(tiss_service, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_tiss::TissService;

use crate::config::ApiConfig;
use crate::handlers::{claims, health, tiss};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub tiss: Arc<TissService>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// The schema should already be provisioned (see
/// [`TissService::ensure_ready`]); until it is, readiness reports 503 and
/// validation reports the schema as missing.
pub fn create_router(tiss_service: Arc<TissService>, config: ApiConfig) -> Router {
    let state = AppState {
        tiss: tiss_service,
        config,
    };

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Claim document routes
    let claims_routes = Router::new()
        .route("/:id/xml", get(claims::get_claim_xml))
        .route("/:id/xml/download", get(claims::download_claim_xml))
        .route("/:id/xml/validate", get(claims::validate_claim_xml));

    // Schema routes
    let tiss_routes = Router::new()
        .route("/validate", post(tiss::validate_xml))
        .route("/schema", get(tiss::get_schema_info));

    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .nest("/tiss", tiss_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(audit_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
