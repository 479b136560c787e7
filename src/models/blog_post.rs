//! Blog post model
//!
//! This module defines the BlogPost entity plus the pagination types shared
//! by every listing in the system. Posts associate with tags through a
//! junction table; an update replaces the whole association set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Tag;

/// Blog post entity.
///
/// The slug is unique across non-deleted posts and is the public lookup key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogPost {
    /// Unique identifier
    pub id: i64,
    /// Post title
    pub title: String,
    /// Full post body
    pub content: String,
    /// Short summary for listings
    pub summary: String,
    /// Cover image URL
    pub image_url: String,
    /// Whether the post is publicly visible
    pub published: bool,
    /// Scheduled or actual publication time
    pub publish_at: Option<DateTime<Utc>>,
    /// Unique URL slug
    pub slug: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Input for creating or fully replacing a blog post.
///
/// `tags` carries tag names; the blog service resolves them to Tag rows
/// (creating missing ones) before the repository writes associations. An
/// empty list clears every association on update.
#[derive(Debug, Clone, Default)]
pub struct BlogPostInput {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub image_url: String,
    pub published: bool,
    pub publish_at: Option<DateTime<Utc>>,
    pub slug: String,
    pub tags: Vec<String>,
}

/// A blog post together with its resolved tag set, as served to clients.
#[derive(Debug, Clone, Serialize)]
pub struct BlogPostWithTags {
    #[serde(flatten)]
    pub post: BlogPost,
    pub tags: Vec<Tag>,
}

impl BlogPostWithTags {
    pub fn new(post: BlogPost, tags: Vec<Tag>) -> Self {
        Self { post, tags }
    }
}

/// Pagination parameters for list operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListParams {
    /// Page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub page_size: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

impl ListParams {
    /// Create pagination parameters, clamping to the allowed ranges.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, 100),
        }
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1) as i64 * self.page_size as i64
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }
}

/// Paginated result container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    /// Items in the current page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: i64,
    /// Current page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub page_size: u32,
}

impl<T> PagedResult<T> {
    /// Create a new paginated result
    pub fn new(items: Vec<T>, total: i64, params: &ListParams) -> Self {
        Self {
            items,
            total,
            page: params.page,
            page_size: params.page_size,
        }
    }

    /// Calculate the total number of pages
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        ((self.total as u64 + self.page_size as u64 - 1) / self.page_size as u64) as u32
    }

    /// Map the items into another shape while keeping the page metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any raw page/page_size pair clamps into the allowed ranges and
        /// yields a non-negative offset without overflowing.
        #[test]
        fn property_list_params_always_clamped(
            page in any::<u32>(),
            page_size in any::<u32>()
        ) {
            let params = ListParams::new(page, page_size);

            prop_assert!(params.page >= 1);
            prop_assert!((1..=100).contains(&params.page_size));
            prop_assert!(params.offset() >= 0);
            prop_assert_eq!(
                params.offset(),
                (params.page as i64 - 1) * params.page_size as i64
            );
            prop_assert_eq!(params.limit(), params.page_size as i64);
        }

        /// total_pages is the exact ceiling of total over page_size.
        #[test]
        fn property_total_pages_is_ceiling(
            total in 0i64..1_000_000,
            page in 1u32..1000,
            page_size in 1u32..200
        ) {
            let params = ListParams::new(page, page_size);
            let result: PagedResult<i64> = PagedResult::new(vec![], total, &params);
            let pages = result.total_pages() as i64;
            let size = params.page_size as i64;

            prop_assert!(pages * size >= total);
            prop_assert!(total == 0 || (pages - 1) * size < total);
        }
    }
}
