//! Shared API response types
//!
//! This module contains the response structures served by the API
//! endpoints. Entities are mapped into explicit wire shapes here so the
//! storage models never leak directly into responses.

use serde::{Deserialize, Serialize};

use crate::models::{
    BlogPostWithTags, ContactSubmission, PagedResult, PortfolioProject, Tag,
};

// ============================================================================
// Pagination envelope
// ============================================================================

/// Collection payload: one page of records plus count metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// Build the envelope from a paged service result
    pub fn from_paged<U: Into<T>>(paged: PagedResult<U>) -> Self {
        let total_pages = paged.total_pages();
        Self {
            items: paged.items.into_iter().map(Into::into).collect(),
            total: paged.total,
            page: paged.page,
            page_size: paged.page_size,
            total_pages,
        }
    }
}

/// Success body for operations with nothing else to return
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Blog response types
// ============================================================================

/// Tag info embedded in blog post responses
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TagInfo {
    pub id: i64,
    pub name: String,
}

impl From<Tag> for TagInfo {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

/// Full blog post response with its tag set
#[derive(Debug, Serialize, Deserialize)]
pub struct BlogPostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub image_url: String,
    pub published: bool,
    pub publish_at: Option<String>,
    pub slug: String,
    pub created_at: String,
    pub updated_at: String,
    pub tags: Vec<TagInfo>,
}

impl From<BlogPostWithTags> for BlogPostResponse {
    fn from(with_tags: BlogPostWithTags) -> Self {
        let post = with_tags.post;
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            summary: post.summary,
            image_url: post.image_url,
            published: post.published,
            publish_at: post.publish_at.map(|dt| dt.to_rfc3339()),
            slug: post.slug,
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
            tags: with_tags.tags.into_iter().map(TagInfo::from).collect(),
        }
    }
}

// ============================================================================
// Portfolio response types
// ============================================================================

/// Portfolio project response; `technologies` is always a decoded array
#[derive(Debug, Serialize, Deserialize)]
pub struct PortfolioProjectResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub project_type: String,
    pub image_url: String,
    pub project_url: String,
    pub repo_url: String,
    pub technologies: Vec<String>,
    pub featured: bool,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PortfolioProject> for PortfolioProjectResponse {
    fn from(project: PortfolioProject) -> Self {
        Self {
            id: project.id,
            title: project.title,
            description: project.description,
            project_type: project.project_type,
            image_url: project.image_url,
            project_url: project.project_url,
            repo_url: project.repo_url,
            technologies: project.technologies,
            featured: project.featured,
            start_date: project.start_date.map(|dt| dt.to_rfc3339()),
            end_date: project.end_date.map(|dt| dt.to_rfc3339()),
            created_at: project.created_at.to_rfc3339(),
            updated_at: project.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Contact response types
// ============================================================================

/// Contact submission response
#[derive(Debug, Serialize, Deserialize)]
pub struct ContactSubmissionResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub read: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ContactSubmission> for ContactSubmissionResponse {
    fn from(submission: ContactSubmission) -> Self {
        Self {
            id: submission.id,
            name: submission.name,
            email: submission.email,
            subject: submission.subject,
            message: submission.message,
            read: submission.read,
            created_at: submission.created_at.to_rfc3339(),
            updated_at: submission.updated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListParams;

    #[test]
    fn test_paginated_response_computes_total_pages() {
        let params = ListParams::new(2, 10);
        let paged: PagedResult<i64> = PagedResult::new(vec![1, 2, 3], 23, &params);
        let response: PaginatedResponse<i64> = PaginatedResponse::from_paged(paged);

        assert_eq!(response.items, vec![1, 2, 3]);
        assert_eq!(response.total, 23);
        assert_eq!(response.page, 2);
        assert_eq!(response.page_size, 10);
        assert_eq!(response.total_pages, 3);
    }

    #[test]
    fn test_message_response_shape() {
        let json = serde_json::to_value(MessageResponse::new("done")).unwrap();
        assert_eq!(json["message"], "done");
    }
}
