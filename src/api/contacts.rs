//! Contact API endpoints
//!
//! Handles HTTP requests for contact submissions:
//! - POST /api/contacts/ - Submit a message (public)
//! - GET /api/contacts/ - List submissions (protected)
//! - PUT /api/contacts/:id/read - Mark a submission as read (protected)
//! - DELETE /api/contacts/:id - Delete a submission (protected)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::api::common::{parse_id, PaginationQuery};
use crate::api::middleware::{self, ApiError, AppState};
use crate::api::responses::{ContactSubmissionResponse, MessageResponse, PaginatedResponse};
use crate::models::ContactSubmissionInput;

/// Request body for a contact submission
#[derive(Debug, Deserialize)]
pub struct ContactSubmissionRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactSubmissionRequest {
    fn into_input(self) -> ContactSubmissionInput {
        ContactSubmissionInput {
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
        }
    }
}

/// Build the contacts router; submission is public, the rest is gated
pub fn router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", get(list_submissions))
        .route("/{id}/read", put(mark_submission_read))
        .route("/{id}", delete(delete_submission))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_auth,
        ));

    Router::new()
        .route("/", post(create_submission))
        .merge(protected)
}

/// POST /api/contacts/ - Record an inbound submission
async fn create_submission(
    State(state): State<AppState>,
    Json(body): Json<ContactSubmissionRequest>,
) -> Result<(StatusCode, Json<ContactSubmissionResponse>), ApiError> {
    let submission = state
        .contact_service
        .create(&body.into_input())
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(submission.into())))
}

/// GET /api/contacts/ - List submissions with pagination
async fn list_submissions(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<ContactSubmissionResponse>>, ApiError> {
    let paged = state
        .contact_service
        .list(&query.params())
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(PaginatedResponse::from_paged(paged)))
}

/// PUT /api/contacts/:id/read - Mark a submission as read
async fn mark_submission_read(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&raw_id)?;

    state
        .contact_service
        .mark_as_read(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(MessageResponse::new(
        "Contact submission marked as read",
    )))
}

/// DELETE /api/contacts/:id - Soft-delete a submission
async fn delete_submission(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&raw_id)?;

    state
        .contact_service
        .delete(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(MessageResponse::new(
        "Contact submission deleted successfully",
    )))
}
