//! Portfolio project repository
//!
//! Database operations for portfolio projects.
//!
//! This module provides:
//! - `PortfolioProjectRepository` trait defining the interface for project data access
//! - `SqlxPortfolioProjectRepository` implementing the trait for SQLite and MySQL
//!
//! The `technologies` list is stored as a JSON array in a TEXT column on
//! both drivers. Writes always encode, reads decode with empty or NULL
//! treated as an empty list.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{PortfolioProject, PortfolioProjectInput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Portfolio project repository trait
#[async_trait]
pub trait PortfolioProjectRepository: Send + Sync {
    /// Create a new portfolio project
    async fn create(&self, input: &PortfolioProjectInput) -> Result<PortfolioProject>;

    /// Get portfolio project by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<PortfolioProject>>;

    /// List portfolio projects, newest first, optionally filtered by type
    async fn list(
        &self,
        project_type: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<PortfolioProject>>;

    /// Count portfolio projects, honoring the same type filter as `list`
    async fn count(&self, project_type: Option<&str>) -> Result<i64>;

    /// Update a portfolio project
    async fn update(&self, id: i64, input: &PortfolioProjectInput) -> Result<PortfolioProject>;

    /// Soft delete a portfolio project
    async fn delete(&self, id: i64) -> Result<()>;
}

/// SQLx-based portfolio project repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxPortfolioProjectRepository {
    pool: DynDatabasePool,
}

impl SqlxPortfolioProjectRepository {
    /// Create a new SQLx portfolio project repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a shared repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn PortfolioProjectRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl PortfolioProjectRepository for SqlxPortfolioProjectRepository {
    async fn create(&self, input: &PortfolioProjectInput) -> Result<PortfolioProject> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                create_project_sqlite(self.pool.as_sqlite().unwrap(), input).await
            }
            DatabaseDriver::Mysql => {
                create_project_mysql(self.pool.as_mysql().unwrap(), input).await
            }
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<PortfolioProject>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_project_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await
            }
            DatabaseDriver::Mysql => {
                get_project_by_id_mysql(self.pool.as_mysql().unwrap(), id).await
            }
        }
    }

    async fn list(
        &self,
        project_type: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<PortfolioProject>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_projects_sqlite(self.pool.as_sqlite().unwrap(), project_type, offset, limit)
                    .await
            }
            DatabaseDriver::Mysql => {
                list_projects_mysql(self.pool.as_mysql().unwrap(), project_type, offset, limit)
                    .await
            }
        }
    }

    async fn count(&self, project_type: Option<&str>) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                count_projects_sqlite(self.pool.as_sqlite().unwrap(), project_type).await
            }
            DatabaseDriver::Mysql => {
                count_projects_mysql(self.pool.as_mysql().unwrap(), project_type).await
            }
        }
    }

    async fn update(&self, id: i64, input: &PortfolioProjectInput) -> Result<PortfolioProject> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                update_project_sqlite(self.pool.as_sqlite().unwrap(), id, input).await
            }
            DatabaseDriver::Mysql => {
                update_project_mysql(self.pool.as_mysql().unwrap(), id, input).await
            }
        }
    }

    async fn delete(&self, id: i64) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                delete_project_sqlite(self.pool.as_sqlite().unwrap(), id).await
            }
            DatabaseDriver::Mysql => delete_project_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }
}

// ============================================================================
// Technologies codec
// ============================================================================

fn encode_technologies(technologies: &[String]) -> Result<String> {
    serde_json::to_string(technologies).context("Failed to encode technologies")
}

fn decode_technologies(raw: Option<&str>) -> Result<Vec<String>> {
    match raw {
        None => Ok(Vec::new()),
        Some("") => Ok(Vec::new()),
        Some(json) => serde_json::from_str(json).context("Failed to decode technologies"),
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_project_sqlite(
    pool: &SqlitePool,
    input: &PortfolioProjectInput,
) -> Result<PortfolioProject> {
    let now = Utc::now();
    let tech_json = encode_technologies(&input.technologies)?;

    let result = sqlx::query(
        r#"
        INSERT INTO portfolio_projects (title, description, project_type, image_url, project_url, repo_url, technologies, featured, start_date, end_date, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.project_type)
    .bind(&input.image_url)
    .bind(&input.project_url)
    .bind(&input.repo_url)
    .bind(&tech_json)
    .bind(input.featured)
    .bind(input.start_date)
    .bind(input.end_date)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create portfolio project")?;

    let id = result.last_insert_rowid();

    Ok(PortfolioProject {
        id,
        title: input.title.clone(),
        description: input.description.clone(),
        project_type: input.project_type.clone(),
        image_url: input.image_url.clone(),
        project_url: input.project_url.clone(),
        repo_url: input.repo_url.clone(),
        technologies: input.technologies.clone(),
        featured: input.featured,
        start_date: input.start_date,
        end_date: input.end_date,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    })
}

async fn get_project_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<PortfolioProject>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, description, project_type, image_url, project_url, repo_url, technologies, featured, start_date, end_date, created_at, updated_at, deleted_at
        FROM portfolio_projects
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get portfolio project by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_project_sqlite(&row)?)),
        None => Ok(None),
    }
}

async fn list_projects_sqlite(
    pool: &SqlitePool,
    project_type: Option<&str>,
    offset: i64,
    limit: i64,
) -> Result<Vec<PortfolioProject>> {
    let rows = match project_type {
        Some(kind) => {
            sqlx::query(
                r#"
                SELECT id, title, description, project_type, image_url, project_url, repo_url, technologies, featured, start_date, end_date, created_at, updated_at, deleted_at
                FROM portfolio_projects
                WHERE project_type = ? AND deleted_at IS NULL
                ORDER BY created_at DESC
                LIMIT ? OFFSET ?
                "#,
            )
            .bind(kind)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query(
                r#"
                SELECT id, title, description, project_type, image_url, project_url, repo_url, technologies, featured, start_date, end_date, created_at, updated_at, deleted_at
                FROM portfolio_projects
                WHERE deleted_at IS NULL
                ORDER BY created_at DESC
                LIMIT ? OFFSET ?
                "#,
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
    }
    .context("Failed to list portfolio projects")?;

    let mut projects = Vec::new();
    for row in rows {
        projects.push(row_to_project_sqlite(&row)?);
    }

    Ok(projects)
}

async fn count_projects_sqlite(pool: &SqlitePool, project_type: Option<&str>) -> Result<i64> {
    let row = match project_type {
        Some(kind) => {
            sqlx::query(
                "SELECT COUNT(*) as count FROM portfolio_projects WHERE project_type = ? AND deleted_at IS NULL",
            )
            .bind(kind)
            .fetch_one(pool)
            .await
        }
        None => {
            sqlx::query(
                "SELECT COUNT(*) as count FROM portfolio_projects WHERE deleted_at IS NULL",
            )
            .fetch_one(pool)
            .await
        }
    }
    .context("Failed to count portfolio projects")?;

    Ok(row.get("count"))
}

async fn update_project_sqlite(
    pool: &SqlitePool,
    id: i64,
    input: &PortfolioProjectInput,
) -> Result<PortfolioProject> {
    let now = Utc::now();
    let tech_json = encode_technologies(&input.technologies)?;

    let result = sqlx::query(
        r#"
        UPDATE portfolio_projects
        SET title = ?, description = ?, project_type = ?, image_url = ?, project_url = ?, repo_url = ?, technologies = ?, featured = ?, start_date = ?, end_date = ?, updated_at = ?
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.project_type)
    .bind(&input.image_url)
    .bind(&input.project_url)
    .bind(&input.repo_url)
    .bind(&tech_json)
    .bind(input.featured)
    .bind(input.start_date)
    .bind(input.end_date)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await
    .context("Failed to update portfolio project")?;

    if result.rows_affected() == 0 {
        return Err(anyhow::anyhow!("Portfolio project not found"));
    }

    get_project_by_id_sqlite(pool, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Portfolio project not found after update"))
}

async fn delete_project_sqlite(pool: &SqlitePool, id: i64) -> Result<()> {
    let now = Utc::now();

    sqlx::query(
        r#"
        UPDATE portfolio_projects
        SET deleted_at = ?, updated_at = ?
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await
    .context("Failed to delete portfolio project")?;

    Ok(())
}

fn row_to_project_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<PortfolioProject> {
    let tech_json: Option<String> = row.get("technologies");

    Ok(PortfolioProject {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        project_type: row.get("project_type"),
        image_url: row.get("image_url"),
        project_url: row.get("project_url"),
        repo_url: row.get("repo_url"),
        technologies: decode_technologies(tech_json.as_deref())?,
        featured: row.get("featured"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        deleted_at: row.get("deleted_at"),
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_project_mysql(
    pool: &MySqlPool,
    input: &PortfolioProjectInput,
) -> Result<PortfolioProject> {
    let now = Utc::now();
    let tech_json = encode_technologies(&input.technologies)?;

    let result = sqlx::query(
        r#"
        INSERT INTO portfolio_projects (title, description, project_type, image_url, project_url, repo_url, technologies, featured, start_date, end_date, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.project_type)
    .bind(&input.image_url)
    .bind(&input.project_url)
    .bind(&input.repo_url)
    .bind(&tech_json)
    .bind(input.featured)
    .bind(input.start_date)
    .bind(input.end_date)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create portfolio project")?;

    let id = result.last_insert_id() as i64;

    Ok(PortfolioProject {
        id,
        title: input.title.clone(),
        description: input.description.clone(),
        project_type: input.project_type.clone(),
        image_url: input.image_url.clone(),
        project_url: input.project_url.clone(),
        repo_url: input.repo_url.clone(),
        technologies: input.technologies.clone(),
        featured: input.featured,
        start_date: input.start_date,
        end_date: input.end_date,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    })
}

async fn get_project_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<PortfolioProject>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, description, project_type, image_url, project_url, repo_url, technologies, featured, start_date, end_date, created_at, updated_at, deleted_at
        FROM portfolio_projects
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get portfolio project by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_project_mysql(&row)?)),
        None => Ok(None),
    }
}

async fn list_projects_mysql(
    pool: &MySqlPool,
    project_type: Option<&str>,
    offset: i64,
    limit: i64,
) -> Result<Vec<PortfolioProject>> {
    let rows = match project_type {
        Some(kind) => {
            sqlx::query(
                r#"
                SELECT id, title, description, project_type, image_url, project_url, repo_url, technologies, featured, start_date, end_date, created_at, updated_at, deleted_at
                FROM portfolio_projects
                WHERE project_type = ? AND deleted_at IS NULL
                ORDER BY created_at DESC
                LIMIT ? OFFSET ?
                "#,
            )
            .bind(kind)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query(
                r#"
                SELECT id, title, description, project_type, image_url, project_url, repo_url, technologies, featured, start_date, end_date, created_at, updated_at, deleted_at
                FROM portfolio_projects
                WHERE deleted_at IS NULL
                ORDER BY created_at DESC
                LIMIT ? OFFSET ?
                "#,
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
    }
    .context("Failed to list portfolio projects")?;

    let mut projects = Vec::new();
    for row in rows {
        projects.push(row_to_project_mysql(&row)?);
    }

    Ok(projects)
}

async fn count_projects_mysql(pool: &MySqlPool, project_type: Option<&str>) -> Result<i64> {
    let row = match project_type {
        Some(kind) => {
            sqlx::query(
                "SELECT COUNT(*) as count FROM portfolio_projects WHERE project_type = ? AND deleted_at IS NULL",
            )
            .bind(kind)
            .fetch_one(pool)
            .await
        }
        None => {
            sqlx::query(
                "SELECT COUNT(*) as count FROM portfolio_projects WHERE deleted_at IS NULL",
            )
            .fetch_one(pool)
            .await
        }
    }
    .context("Failed to count portfolio projects")?;

    Ok(row.get("count"))
}

async fn update_project_mysql(
    pool: &MySqlPool,
    id: i64,
    input: &PortfolioProjectInput,
) -> Result<PortfolioProject> {
    let now = Utc::now();
    let tech_json = encode_technologies(&input.technologies)?;

    let result = sqlx::query(
        r#"
        UPDATE portfolio_projects
        SET title = ?, description = ?, project_type = ?, image_url = ?, project_url = ?, repo_url = ?, technologies = ?, featured = ?, start_date = ?, end_date = ?, updated_at = ?
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.project_type)
    .bind(&input.image_url)
    .bind(&input.project_url)
    .bind(&input.repo_url)
    .bind(&tech_json)
    .bind(input.featured)
    .bind(input.start_date)
    .bind(input.end_date)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await
    .context("Failed to update portfolio project")?;

    if result.rows_affected() == 0 {
        return Err(anyhow::anyhow!("Portfolio project not found"));
    }

    get_project_by_id_mysql(pool, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Portfolio project not found after update"))
}

async fn delete_project_mysql(pool: &MySqlPool, id: i64) -> Result<()> {
    let now = Utc::now();

    sqlx::query(
        r#"
        UPDATE portfolio_projects
        SET deleted_at = ?, updated_at = ?
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await
    .context("Failed to delete portfolio project")?;

    Ok(())
}

fn row_to_project_mysql(row: &sqlx::mysql::MySqlRow) -> Result<PortfolioProject> {
    let tech_json: Option<String> = row.get("technologies");

    Ok(PortfolioProject {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        project_type: row.get("project_type"),
        image_url: row.get("image_url"),
        project_url: row.get("project_url"),
        repo_url: row.get("repo_url"),
        technologies: decode_technologies(tech_json.as_deref())?,
        featured: row.get("featured"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        deleted_at: row.get("deleted_at"),
    })
}
