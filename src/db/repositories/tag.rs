//! Tag repository
//!
//! Database operations for blog post tags.
//!
//! This module provides:
//! - `TagRepository` trait defining the interface for tag data access
//! - `SqlxTagRepository` implementing the trait for SQLite and MySQL
//!
//! Tags are created on demand when blog posts reference them by name.
//! Junction rows in `blog_post_tags` are owned by the blog post
//! repository so that tag reassignment stays transactional.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::Tag;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Tag repository trait
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Get tag by name
    async fn get_by_name(&self, name: &str) -> Result<Option<Tag>>;

    /// Get an existing tag by name, creating it if absent
    async fn find_or_create(&self, name: &str) -> Result<Tag>;

    /// Get tags attached to a blog post, ordered by name
    async fn get_by_post_id(&self, post_id: i64) -> Result<Vec<Tag>>;
}

/// SQLx-based tag repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxTagRepository {
    pool: DynDatabasePool,
}

impl SqlxTagRepository {
    /// Create a new SQLx tag repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a shared repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn TagRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl TagRepository for SqlxTagRepository {
    async fn get_by_name(&self, name: &str) -> Result<Option<Tag>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_tag_by_name_sqlite(self.pool.as_sqlite().unwrap(), name).await
            }
            DatabaseDriver::Mysql => {
                get_tag_by_name_mysql(self.pool.as_mysql().unwrap(), name).await
            }
        }
    }

    async fn find_or_create(&self, name: &str) -> Result<Tag> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                find_or_create_tag_sqlite(self.pool.as_sqlite().unwrap(), name).await
            }
            DatabaseDriver::Mysql => {
                find_or_create_tag_mysql(self.pool.as_mysql().unwrap(), name).await
            }
        }
    }

    async fn get_by_post_id(&self, post_id: i64) -> Result<Vec<Tag>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_tags_by_post_sqlite(self.pool.as_sqlite().unwrap(), post_id).await
            }
            DatabaseDriver::Mysql => {
                get_tags_by_post_mysql(self.pool.as_mysql().unwrap(), post_id).await
            }
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn get_tag_by_name_sqlite(pool: &SqlitePool, name: &str) -> Result<Option<Tag>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, created_at, updated_at, deleted_at
        FROM tags
        WHERE name = ? AND deleted_at IS NULL
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await
    .context("Failed to get tag by name")?;

    match row {
        Some(row) => Ok(Some(row_to_tag_sqlite(&row))),
        None => Ok(None),
    }
}

async fn find_or_create_tag_sqlite(pool: &SqlitePool, name: &str) -> Result<Tag> {
    if let Some(tag) = get_tag_by_name_sqlite(pool, name).await? {
        return Ok(tag);
    }

    let now = Utc::now();

    // OR IGNORE keeps concurrent creates of the same name from failing;
    // the re-select below picks up whichever insert won.
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO tags (name, created_at, updated_at)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(name)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create tag")?;

    get_tag_by_name_sqlite(pool, name)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Tag not found after insert"))
}

async fn get_tags_by_post_sqlite(pool: &SqlitePool, post_id: i64) -> Result<Vec<Tag>> {
    let rows = sqlx::query(
        r#"
        SELECT t.id, t.name, t.created_at, t.updated_at, t.deleted_at
        FROM tags t
        INNER JOIN blog_post_tags bpt ON t.id = bpt.tag_id
        WHERE bpt.blog_post_id = ? AND t.deleted_at IS NULL
        ORDER BY t.name
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
    .context("Failed to get tags by post")?;

    let mut tags = Vec::new();
    for row in rows {
        tags.push(row_to_tag_sqlite(&row));
    }

    Ok(tags)
}

fn row_to_tag_sqlite(row: &sqlx::sqlite::SqliteRow) -> Tag {
    Tag {
        id: row.get("id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        deleted_at: row.get("deleted_at"),
    }
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn get_tag_by_name_mysql(pool: &MySqlPool, name: &str) -> Result<Option<Tag>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, created_at, updated_at, deleted_at
        FROM tags
        WHERE name = ? AND deleted_at IS NULL
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await
    .context("Failed to get tag by name")?;

    match row {
        Some(row) => Ok(Some(row_to_tag_mysql(&row))),
        None => Ok(None),
    }
}

async fn find_or_create_tag_mysql(pool: &MySqlPool, name: &str) -> Result<Tag> {
    if let Some(tag) = get_tag_by_name_mysql(pool, name).await? {
        return Ok(tag);
    }

    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT IGNORE INTO tags (name, created_at, updated_at)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(name)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create tag")?;

    get_tag_by_name_mysql(pool, name)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Tag not found after insert"))
}

async fn get_tags_by_post_mysql(pool: &MySqlPool, post_id: i64) -> Result<Vec<Tag>> {
    let rows = sqlx::query(
        r#"
        SELECT t.id, t.name, t.created_at, t.updated_at, t.deleted_at
        FROM tags t
        INNER JOIN blog_post_tags bpt ON t.id = bpt.tag_id
        WHERE bpt.blog_post_id = ? AND t.deleted_at IS NULL
        ORDER BY t.name
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
    .context("Failed to get tags by post")?;

    let mut tags = Vec::new();
    for row in rows {
        tags.push(row_to_tag_mysql(&row));
    }

    Ok(tags)
}

fn row_to_tag_mysql(row: &sqlx::mysql::MySqlRow) -> Tag {
    Tag {
        id: row.get("id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        deleted_at: row.get("deleted_at"),
    }
}
