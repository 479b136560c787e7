//! Portfolio API endpoints
//!
//! Handles HTTP requests for portfolio projects:
//! - GET /api/portfolio/ - List projects, optionally filtered by type
//! - GET /api/portfolio/:id - Get project by id
//! - POST /api/portfolio/ - Create project (protected)
//! - PUT /api/portfolio/:id - Replace project (protected)
//! - DELETE /api/portfolio/:id - Delete project (protected)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::common::parse_id;
use crate::api::middleware::{self, ApiError, AppState};
use crate::api::responses::{MessageResponse, PaginatedResponse, PortfolioProjectResponse};
use crate::models::PortfolioProjectInput;

/// Query parameters for listing projects
#[derive(Debug, Deserialize)]
pub struct ListProjectsQuery {
    /// Filter by project type; absent or empty means no filter
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Request body for creating or replacing a project
#[derive(Debug, Deserialize)]
pub struct PortfolioProjectRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub project_url: String,
    #[serde(default)]
    pub repo_url: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

impl PortfolioProjectRequest {
    fn into_input(self) -> PortfolioProjectInput {
        PortfolioProjectInput {
            title: self.title,
            description: self.description,
            project_type: self.project_type,
            image_url: self.image_url,
            project_url: self.project_url,
            repo_url: self.repo_url,
            technologies: self.technologies,
            featured: self.featured,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Build the portfolio router; mutations sit behind the auth gate
pub fn router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_project))
        .route("/{id}", put(update_project).delete(delete_project))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_auth,
        ));

    Router::new()
        .route("/", get(list_projects))
        .route("/{id}", get(get_project))
        .merge(protected)
}

/// GET /api/portfolio/ - List projects with pagination and type filter
async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ListProjectsQuery>,
) -> Result<Json<PaginatedResponse<PortfolioProjectResponse>>, ApiError> {
    let pagination = crate::api::common::PaginationQuery {
        page: query.page.clone(),
        page_size: query.page_size.clone(),
    };
    let filter = query
        .project_type
        .as_deref()
        .filter(|value| !value.is_empty());

    let paged = state
        .portfolio_service
        .list(filter, &pagination.params())
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(PaginatedResponse::from_paged(paged)))
}

/// GET /api/portfolio/:id - Get project by id
async fn get_project(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<PortfolioProjectResponse>, ApiError> {
    let id = parse_id(&raw_id)?;

    let project = state
        .portfolio_service
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found(format!("Portfolio project not found: {}", id)))?;

    Ok(Json(project.into()))
}

/// POST /api/portfolio/ - Create project
async fn create_project(
    State(state): State<AppState>,
    Json(body): Json<PortfolioProjectRequest>,
) -> Result<(StatusCode, Json<PortfolioProjectResponse>), ApiError> {
    let project = state
        .portfolio_service
        .create(&body.into_input())
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(project.into())))
}

/// PUT /api/portfolio/:id - Replace project
async fn update_project(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(body): Json<PortfolioProjectRequest>,
) -> Result<Json<PortfolioProjectResponse>, ApiError> {
    let id = parse_id(&raw_id)?;

    // Absent projects map to 404 before attempting the write
    state
        .portfolio_service
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found(format!("Portfolio project not found: {}", id)))?;

    let project = state
        .portfolio_service
        .update(id, &body.into_input())
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(project.into()))
}

/// DELETE /api/portfolio/:id - Soft-delete project
async fn delete_project(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&raw_id)?;

    state
        .portfolio_service
        .delete(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(MessageResponse::new(
        "Portfolio project deleted successfully",
    )))
}
