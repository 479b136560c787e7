//! Contact service
//!
//! Thin orchestration over the contact submission repository. Submissions
//! come in from the public form; listing and state changes are for the
//! authenticated owner.

use crate::db::repositories::ContactSubmissionRepository;
use crate::models::{ContactSubmission, ContactSubmissionInput, ListParams, PagedResult};
use anyhow::Context;
use std::sync::Arc;

/// Error types for contact service operations
#[derive(Debug, thiserror::Error)]
pub enum ContactServiceError {
    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Contact service managing submissions
pub struct ContactService {
    repo: Arc<dyn ContactSubmissionRepository>,
}

impl ContactService {
    /// Create a new contact service
    pub fn new(repo: Arc<dyn ContactSubmissionRepository>) -> Self {
        Self { repo }
    }

    /// Record an inbound submission; starts unread
    pub async fn create(
        &self,
        input: &ContactSubmissionInput,
    ) -> Result<ContactSubmission, ContactServiceError> {
        let submission = self
            .repo
            .create(input)
            .await
            .context("Failed to create contact submission")?;
        Ok(submission)
    }

    /// List submissions newest-first
    pub async fn list(
        &self,
        params: &ListParams,
    ) -> Result<PagedResult<ContactSubmission>, ContactServiceError> {
        let submissions = self
            .repo
            .list(params.offset(), params.limit())
            .await
            .context("Failed to list contact submissions")?;
        let total = self
            .repo
            .count()
            .await
            .context("Failed to count contact submissions")?;

        Ok(PagedResult::new(submissions, total, params))
    }

    /// Mark a submission as read; a missing id is not an error
    pub async fn mark_as_read(&self, id: i64) -> Result<(), ContactServiceError> {
        self.repo
            .mark_as_read(id)
            .await
            .context("Failed to mark contact submission as read")?;
        Ok(())
    }

    /// Soft-delete a submission; a missing id is not an error
    pub async fn delete(&self, id: i64) -> Result<(), ContactServiceError> {
        self.repo
            .delete(id)
            .await
            .context("Failed to delete contact submission")?;
        Ok(())
    }
}
