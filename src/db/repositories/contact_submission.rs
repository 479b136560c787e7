//! Contact submission repository
//!
//! Database operations for contact form submissions.
//!
//! This module provides:
//! - `ContactSubmissionRepository` trait defining the interface for submission data access
//! - `SqlxContactSubmissionRepository` implementing the trait for SQLite and MySQL
//!
//! `read` is a reserved word in MySQL, so the MySQL queries quote it.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{ContactSubmission, ContactSubmissionInput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Contact submission repository trait
#[async_trait]
pub trait ContactSubmissionRepository: Send + Sync {
    /// Create a new contact submission, unread by default
    async fn create(&self, input: &ContactSubmissionInput) -> Result<ContactSubmission>;

    /// List contact submissions, newest first
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<ContactSubmission>>;

    /// Count contact submissions
    async fn count(&self) -> Result<i64>;

    /// Mark a submission as read; a missing id is not an error
    async fn mark_as_read(&self, id: i64) -> Result<()>;

    /// Soft delete a submission; a missing id is not an error
    async fn delete(&self, id: i64) -> Result<()>;
}

/// SQLx-based contact submission repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxContactSubmissionRepository {
    pool: DynDatabasePool,
}

impl SqlxContactSubmissionRepository {
    /// Create a new SQLx contact submission repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a shared repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ContactSubmissionRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ContactSubmissionRepository for SqlxContactSubmissionRepository {
    async fn create(&self, input: &ContactSubmissionInput) -> Result<ContactSubmission> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                create_submission_sqlite(self.pool.as_sqlite().unwrap(), input).await
            }
            DatabaseDriver::Mysql => {
                create_submission_mysql(self.pool.as_mysql().unwrap(), input).await
            }
        }
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<ContactSubmission>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_submissions_sqlite(self.pool.as_sqlite().unwrap(), offset, limit).await
            }
            DatabaseDriver::Mysql => {
                list_submissions_mysql(self.pool.as_mysql().unwrap(), offset, limit).await
            }
        }
    }

    async fn count(&self) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                count_submissions_sqlite(self.pool.as_sqlite().unwrap()).await
            }
            DatabaseDriver::Mysql => count_submissions_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }

    async fn mark_as_read(&self, id: i64) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                mark_submission_read_sqlite(self.pool.as_sqlite().unwrap(), id).await
            }
            DatabaseDriver::Mysql => {
                mark_submission_read_mysql(self.pool.as_mysql().unwrap(), id).await
            }
        }
    }

    async fn delete(&self, id: i64) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                delete_submission_sqlite(self.pool.as_sqlite().unwrap(), id).await
            }
            DatabaseDriver::Mysql => {
                delete_submission_mysql(self.pool.as_mysql().unwrap(), id).await
            }
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_submission_sqlite(
    pool: &SqlitePool,
    input: &ContactSubmissionInput,
) -> Result<ContactSubmission> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO contact_submissions (name, email, subject, message, read, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(&input.email)
    .bind(&input.subject)
    .bind(&input.message)
    .bind(false)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create contact submission")?;

    let id = result.last_insert_rowid();

    Ok(ContactSubmission {
        id,
        name: input.name.clone(),
        email: input.email.clone(),
        subject: input.subject.clone(),
        message: input.message.clone(),
        read: false,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    })
}

async fn list_submissions_sqlite(
    pool: &SqlitePool,
    offset: i64,
    limit: i64,
) -> Result<Vec<ContactSubmission>> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, email, subject, message, read, created_at, updated_at, deleted_at
        FROM contact_submissions
        WHERE deleted_at IS NULL
        ORDER BY created_at DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .context("Failed to list contact submissions")?;

    let mut submissions = Vec::new();
    for row in rows {
        submissions.push(row_to_submission_sqlite(&row));
    }

    Ok(submissions)
}

async fn count_submissions_sqlite(pool: &SqlitePool) -> Result<i64> {
    let row =
        sqlx::query("SELECT COUNT(*) as count FROM contact_submissions WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await
            .context("Failed to count contact submissions")?;

    Ok(row.get("count"))
}

async fn mark_submission_read_sqlite(pool: &SqlitePool, id: i64) -> Result<()> {
    let now = Utc::now();

    sqlx::query(
        r#"
        UPDATE contact_submissions
        SET read = TRUE, updated_at = ?
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await
    .context("Failed to mark contact submission as read")?;

    Ok(())
}

async fn delete_submission_sqlite(pool: &SqlitePool, id: i64) -> Result<()> {
    let now = Utc::now();

    sqlx::query(
        r#"
        UPDATE contact_submissions
        SET deleted_at = ?, updated_at = ?
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await
    .context("Failed to delete contact submission")?;

    Ok(())
}

fn row_to_submission_sqlite(row: &sqlx::sqlite::SqliteRow) -> ContactSubmission {
    ContactSubmission {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        subject: row.get("subject"),
        message: row.get("message"),
        read: row.get("read"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        deleted_at: row.get("deleted_at"),
    }
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_submission_mysql(
    pool: &MySqlPool,
    input: &ContactSubmissionInput,
) -> Result<ContactSubmission> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO contact_submissions (name, email, subject, message, `read`, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(&input.email)
    .bind(&input.subject)
    .bind(&input.message)
    .bind(false)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create contact submission")?;

    let id = result.last_insert_id() as i64;

    Ok(ContactSubmission {
        id,
        name: input.name.clone(),
        email: input.email.clone(),
        subject: input.subject.clone(),
        message: input.message.clone(),
        read: false,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    })
}

async fn list_submissions_mysql(
    pool: &MySqlPool,
    offset: i64,
    limit: i64,
) -> Result<Vec<ContactSubmission>> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, email, subject, message, `read`, created_at, updated_at, deleted_at
        FROM contact_submissions
        WHERE deleted_at IS NULL
        ORDER BY created_at DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .context("Failed to list contact submissions")?;

    let mut submissions = Vec::new();
    for row in rows {
        submissions.push(row_to_submission_mysql(&row));
    }

    Ok(submissions)
}

async fn count_submissions_mysql(pool: &MySqlPool) -> Result<i64> {
    let row =
        sqlx::query("SELECT COUNT(*) as count FROM contact_submissions WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await
            .context("Failed to count contact submissions")?;

    Ok(row.get("count"))
}

async fn mark_submission_read_mysql(pool: &MySqlPool, id: i64) -> Result<()> {
    let now = Utc::now();

    sqlx::query(
        r#"
        UPDATE contact_submissions
        SET `read` = TRUE, updated_at = ?
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await
    .context("Failed to mark contact submission as read")?;

    Ok(())
}

async fn delete_submission_mysql(pool: &MySqlPool, id: i64) -> Result<()> {
    let now = Utc::now();

    sqlx::query(
        r#"
        UPDATE contact_submissions
        SET deleted_at = ?, updated_at = ?
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await
    .context("Failed to delete contact submission")?;

    Ok(())
}

fn row_to_submission_mysql(row: &sqlx::mysql::MySqlRow) -> ContactSubmission {
    ContactSubmission {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        subject: row.get("subject"),
        message: row.get("message"),
        read: row.get("read"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        deleted_at: row.get("deleted_at"),
    }
}
