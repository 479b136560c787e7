//! Blog service
//!
//! Orchestrates blog posts and their tag associations. Tag names arriving
//! with a post are resolved to Tag rows (creating missing ones) before the
//! repository writes the post and its associations; reads attach the stored
//! tag set to each post.

use crate::db::repositories::{BlogPostRepository, TagRepository};
use crate::models::{BlogPostInput, BlogPostWithTags, ListParams, PagedResult, Tag};
use anyhow::Context;
use std::collections::HashSet;
use std::sync::Arc;

/// Error types for blog service operations
#[derive(Debug, thiserror::Error)]
pub enum BlogServiceError {
    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Blog service managing posts and tag associations
pub struct BlogService {
    repo: Arc<dyn BlogPostRepository>,
    tag_repo: Arc<dyn TagRepository>,
}

impl BlogService {
    /// Create a new blog service
    pub fn new(repo: Arc<dyn BlogPostRepository>, tag_repo: Arc<dyn TagRepository>) -> Self {
        Self { repo, tag_repo }
    }

    /// Create a blog post, resolving tag names to rows first
    pub async fn create(&self, input: &BlogPostInput) -> Result<BlogPostWithTags, BlogServiceError> {
        let tags = self.resolve_tags(&input.tags).await?;
        let tag_ids: Vec<i64> = tags.iter().map(|tag| tag.id).collect();

        let post = self
            .repo
            .create(input, &tag_ids)
            .await
            .context("Failed to create blog post")?;

        Ok(BlogPostWithTags::new(post, tags))
    }

    /// Get a blog post by ID with its tags
    pub async fn get_by_id(&self, id: i64) -> Result<Option<BlogPostWithTags>, BlogServiceError> {
        let post = self
            .repo
            .get_by_id(id)
            .await
            .context("Failed to get blog post")?;

        match post {
            Some(post) => {
                let tags = self
                    .tag_repo
                    .get_by_post_id(post.id)
                    .await
                    .context("Failed to get tags for blog post")?;
                Ok(Some(BlogPostWithTags::new(post, tags)))
            }
            None => Ok(None),
        }
    }

    /// Get a blog post by slug with its tags
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<BlogPostWithTags>, BlogServiceError> {
        let post = self
            .repo
            .get_by_slug(slug)
            .await
            .context("Failed to get blog post by slug")?;

        match post {
            Some(post) => {
                let tags = self
                    .tag_repo
                    .get_by_post_id(post.id)
                    .await
                    .context("Failed to get tags for blog post")?;
                Ok(Some(BlogPostWithTags::new(post, tags)))
            }
            None => Ok(None),
        }
    }

    /// List blog posts newest-first with their tags
    pub async fn list(
        &self,
        params: &ListParams,
    ) -> Result<PagedResult<BlogPostWithTags>, BlogServiceError> {
        let posts = self
            .repo
            .list(params.offset(), params.limit())
            .await
            .context("Failed to list blog posts")?;
        let total = self
            .repo
            .count()
            .await
            .context("Failed to count blog posts")?;

        let mut items = Vec::with_capacity(posts.len());
        for post in posts {
            let tags = self
                .tag_repo
                .get_by_post_id(post.id)
                .await
                .context("Failed to get tags for blog post")?;
            items.push(BlogPostWithTags::new(post, tags));
        }

        Ok(PagedResult::new(items, total, params))
    }

    /// Replace a blog post and its full tag association set
    ///
    /// # Errors
    ///
    /// Updating an absent id is an internal error here; callers that need a
    /// not-found distinction check existence first.
    pub async fn update(
        &self,
        id: i64,
        input: &BlogPostInput,
    ) -> Result<BlogPostWithTags, BlogServiceError> {
        let tags = self.resolve_tags(&input.tags).await?;
        let tag_ids: Vec<i64> = tags.iter().map(|tag| tag.id).collect();

        let post = self
            .repo
            .update(id, input, &tag_ids)
            .await
            .context("Failed to update blog post")?;

        Ok(BlogPostWithTags::new(post, tags))
    }

    /// Soft-delete a blog post and clear its tag associations
    pub async fn delete(&self, id: i64) -> Result<(), BlogServiceError> {
        self.repo
            .delete(id)
            .await
            .context("Failed to delete blog post")?;
        Ok(())
    }

    /// Resolve tag names to rows, creating missing tags.
    ///
    /// Duplicate names collapse to one tag; first-seen order is kept.
    async fn resolve_tags(&self, names: &[String]) -> Result<Vec<Tag>, BlogServiceError> {
        let mut seen = HashSet::new();
        let mut tags = Vec::with_capacity(names.len());

        for name in names {
            if !seen.insert(name.as_str()) {
                continue;
            }
            let tag = self
                .tag_repo
                .find_or_create(name)
                .await
                .context("Failed to resolve tag")?;
            tags.push(tag);
        }

        Ok(tags)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::db::repositories::{SqlxBlogPostRepository, SqlxTagRepository};
    use crate::db::{create_test_pool, migrations};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    async fn setup_property_test_service() -> BlogService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        BlogService::new(
            SqlxBlogPostRepository::boxed(pool.clone()),
            SqlxTagRepository::boxed(pool.clone()),
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        /// For any set of tag names, a created post reads back with exactly
        /// the distinct names attached.
        #[test]
        fn property_tag_set_round_trips(
            names in proptest::collection::vec("[a-z]{1,8}", 0..5)
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let result: Result<(), TestCaseError> = rt.block_on(async {
                let service = setup_property_test_service().await;

                let input = BlogPostInput {
                    title: "Property".to_string(),
                    content: "Body".to_string(),
                    slug: "property".to_string(),
                    tags: names.clone(),
                    ..Default::default()
                };
                let created = service
                    .create(&input)
                    .await
                    .expect("Create should succeed");

                let fetched = service
                    .get_by_id(created.post.id)
                    .await
                    .expect("Get should succeed")
                    .expect("Post should exist");

                let expected: BTreeSet<String> = names.iter().cloned().collect();
                let actual: BTreeSet<String> =
                    fetched.tags.iter().map(|t| t.name.clone()).collect();
                prop_assert_eq!(actual, expected);
                Ok(())
            });
            result?;
        }

        /// Updating with a new tag set fully replaces the old one.
        #[test]
        fn property_update_replaces_tag_set(
            before in proptest::collection::vec("[a-m]{1,6}", 0..4),
            after in proptest::collection::vec("[n-z]{1,6}", 0..4)
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let result: Result<(), TestCaseError> = rt.block_on(async {
                let service = setup_property_test_service().await;

                let mut input = BlogPostInput {
                    title: "Property".to_string(),
                    content: "Body".to_string(),
                    slug: "property".to_string(),
                    tags: before,
                    ..Default::default()
                };
                let created = service
                    .create(&input)
                    .await
                    .expect("Create should succeed");

                input.tags = after.clone();
                service
                    .update(created.post.id, &input)
                    .await
                    .expect("Update should succeed");

                let fetched = service
                    .get_by_id(created.post.id)
                    .await
                    .expect("Get should succeed")
                    .expect("Post should exist");

                let expected: BTreeSet<String> = after.iter().cloned().collect();
                let actual: BTreeSet<String> =
                    fetched.tags.iter().map(|t| t.name.clone()).collect();
                prop_assert_eq!(actual, expected);
                Ok(())
            });
            result?;
        }
    }
}
