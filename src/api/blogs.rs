//! Blog API endpoints
//!
//! Handles HTTP requests for blog posts:
//! - GET /api/blogs/ - List posts with pagination
//! - GET /api/blogs/:slug - Get post by slug
//! - POST /api/blogs/ - Create post (protected)
//! - PUT /api/blogs/:id - Replace post (protected)
//! - DELETE /api/blogs/:id - Delete post (protected)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::common::{parse_id, PaginationQuery};
use crate::api::middleware::{self, ApiError, AppState};
use crate::api::responses::{BlogPostResponse, MessageResponse, PaginatedResponse};
use crate::models::BlogPostInput;

/// Request body for creating or replacing a blog post.
///
/// Tags arrive as objects carrying the tag name; missing fields take
/// their zero values.
#[derive(Debug, Deserialize)]
pub struct BlogPostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub publish_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub tags: Vec<TagName>,
}

#[derive(Debug, Deserialize)]
pub struct TagName {
    pub name: String,
}

impl BlogPostRequest {
    fn into_input(self) -> BlogPostInput {
        BlogPostInput {
            title: self.title,
            content: self.content,
            summary: self.summary,
            image_url: self.image_url,
            published: self.published,
            publish_at: self.publish_at,
            slug: self.slug,
            tags: self.tags.into_iter().map(|tag| tag.name).collect(),
        }
    }
}

/// Build the blogs router; mutations sit behind the auth gate
pub fn router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_blog_post))
        .route("/{slug}", put(update_blog_post).delete(delete_blog_post))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_auth,
        ));

    Router::new()
        .route("/", get(list_blog_posts))
        .route("/{slug}", get(get_blog_post))
        .merge(protected)
}

/// GET /api/blogs/ - List posts with pagination
async fn list_blog_posts(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<BlogPostResponse>>, ApiError> {
    let paged = state
        .blog_service
        .list(&query.params())
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(PaginatedResponse::from_paged(paged)))
}

/// GET /api/blogs/:slug - Get post by slug
async fn get_blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPostResponse>, ApiError> {
    let post = state
        .blog_service
        .get_by_slug(&slug)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found(format!("Blog post not found: {}", slug)))?;

    Ok(Json(post.into()))
}

/// POST /api/blogs/ - Create post
async fn create_blog_post(
    State(state): State<AppState>,
    Json(body): Json<BlogPostRequest>,
) -> Result<(StatusCode, Json<BlogPostResponse>), ApiError> {
    let post = state
        .blog_service
        .create(&body.into_input())
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// PUT /api/blogs/:id - Replace post and its tag set
async fn update_blog_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(body): Json<BlogPostRequest>,
) -> Result<Json<BlogPostResponse>, ApiError> {
    let id = parse_id(&raw_id)?;

    // Absent posts map to 404 before attempting the write
    state
        .blog_service
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found(format!("Blog post not found: {}", id)))?;

    let post = state
        .blog_service
        .update(id, &body.into_input())
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(post.into()))
}

/// DELETE /api/blogs/:id - Soft-delete post
async fn delete_blog_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&raw_id)?;

    state
        .blog_service
        .delete(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(MessageResponse::new("Blog post deleted successfully")))
}
