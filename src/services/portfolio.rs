//! Portfolio service
//!
//! Thin orchestration over the portfolio project repository. Listing takes
//! an optional project type filter; everything else is pass-through.

use crate::db::repositories::PortfolioProjectRepository;
use crate::models::{ListParams, PagedResult, PortfolioProject, PortfolioProjectInput};
use anyhow::Context;
use std::sync::Arc;

/// Error types for portfolio service operations
#[derive(Debug, thiserror::Error)]
pub enum PortfolioServiceError {
    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Portfolio service managing projects
pub struct PortfolioService {
    repo: Arc<dyn PortfolioProjectRepository>,
}

impl PortfolioService {
    /// Create a new portfolio service
    pub fn new(repo: Arc<dyn PortfolioProjectRepository>) -> Self {
        Self { repo }
    }

    /// Create a portfolio project
    pub async fn create(
        &self,
        input: &PortfolioProjectInput,
    ) -> Result<PortfolioProject, PortfolioServiceError> {
        let project = self
            .repo
            .create(input)
            .await
            .context("Failed to create portfolio project")?;
        Ok(project)
    }

    /// Get a portfolio project by ID
    pub async fn get_by_id(
        &self,
        id: i64,
    ) -> Result<Option<PortfolioProject>, PortfolioServiceError> {
        let project = self
            .repo
            .get_by_id(id)
            .await
            .context("Failed to get portfolio project")?;
        Ok(project)
    }

    /// List portfolio projects newest-first, optionally filtered by type
    pub async fn list(
        &self,
        project_type: Option<&str>,
        params: &ListParams,
    ) -> Result<PagedResult<PortfolioProject>, PortfolioServiceError> {
        let projects = self
            .repo
            .list(project_type, params.offset(), params.limit())
            .await
            .context("Failed to list portfolio projects")?;
        let total = self
            .repo
            .count(project_type)
            .await
            .context("Failed to count portfolio projects")?;

        Ok(PagedResult::new(projects, total, params))
    }

    /// Replace a portfolio project
    ///
    /// # Errors
    ///
    /// Updating an absent id is an internal error here; callers that need a
    /// not-found distinction check existence first.
    pub async fn update(
        &self,
        id: i64,
        input: &PortfolioProjectInput,
    ) -> Result<PortfolioProject, PortfolioServiceError> {
        let project = self
            .repo
            .update(id, input)
            .await
            .context("Failed to update portfolio project")?;
        Ok(project)
    }

    /// Soft-delete a portfolio project
    pub async fn delete(&self, id: i64) -> Result<(), PortfolioServiceError> {
        self.repo
            .delete(id)
            .await
            .context("Failed to delete portfolio project")?;
        Ok(())
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::db::repositories::SqlxPortfolioProjectRepository;
    use crate::db::{create_test_pool, migrations};
    use proptest::prelude::*;

    async fn setup_property_test_service() -> PortfolioService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        PortfolioService::new(SqlxPortfolioProjectRepository::boxed(pool.clone()))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        /// Any technology list reads back in the same order it was written.
        #[test]
        fn property_technologies_preserve_order(
            technologies in proptest::collection::vec("[a-zA-Z0-9+#.-]{1,12}", 0..8)
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let result: Result<(), TestCaseError> = rt.block_on(async {
                let service = setup_property_test_service().await;

                let input = PortfolioProjectInput {
                    title: "Property".to_string(),
                    description: "Round trip".to_string(),
                    project_type: "coding".to_string(),
                    technologies: technologies.clone(),
                    ..Default::default()
                };
                let created = service
                    .create(&input)
                    .await
                    .expect("Create should succeed");

                let fetched = service
                    .get_by_id(created.id)
                    .await
                    .expect("Get should succeed")
                    .expect("Project should exist");

                prop_assert_eq!(fetched.technologies, technologies);
                Ok(())
            });
            result?;
        }
    }
}
