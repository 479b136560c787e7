//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints for the site backend:
//! - Auth endpoints (login, refresh, me, optional register)
//! - Blog endpoints
//! - Portfolio endpoints
//! - Contact endpoints
//! - Health probe

pub mod auth;
pub mod blogs;
pub mod common;
pub mod contacts;
pub mod middleware;
pub mod portfolio;
pub mod responses;

use axum::{middleware as axum_middleware, routing::get, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use middleware::{ApiError, AppState, AuthenticatedUser};

/// Build the API router mounted under `/api`
pub fn build_api_router(state: AppState, enable_registration: bool) -> Router<AppState> {
    let auth_routes = auth::public_router(enable_registration).merge(
        auth::protected_router().route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        )),
    );

    Router::new()
        .nest("/auth", auth_routes)
        .nest("/blogs/", blogs::router(state.clone()))
        .nest("/portfolio/", portfolio::router(state.clone()))
        .nest("/contacts/", contacts::router(state))
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, enable_registration: bool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", build_api_router(state.clone(), enable_registration))
        .route("/health", get(health))
        .fallback(fallback)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Deployment probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn fallback() -> ApiError {
    ApiError::not_found("Route not found")
}
