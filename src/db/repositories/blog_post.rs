//! Blog post repository
//!
//! Database operations for blog posts and their tag associations.
//!
//! This module provides:
//! - `BlogPostRepository` trait defining the interface for blog post data access
//! - `SqlxBlogPostRepository` implementing the trait for SQLite and MySQL
//!
//! Posts are soft deleted: `delete` stamps `deleted_at` and every read
//! filters on it. Writes that touch the `blog_post_tags` junction table
//! run inside a single transaction so a post is never observable with a
//! half-replaced tag set.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{BlogPost, BlogPostInput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Blog post repository trait
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// Create a new blog post with its tag associations
    async fn create(&self, input: &BlogPostInput, tag_ids: &[i64]) -> Result<BlogPost>;

    /// Get blog post by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<BlogPost>>;

    /// Get blog post by slug
    async fn get_by_slug(&self, slug: &str) -> Result<Option<BlogPost>>;

    /// List blog posts, newest first
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<BlogPost>>;

    /// Count blog posts
    async fn count(&self) -> Result<i64>;

    /// Update a blog post, replacing its tag associations
    async fn update(&self, id: i64, input: &BlogPostInput, tag_ids: &[i64]) -> Result<BlogPost>;

    /// Soft delete a blog post and clear its tag associations
    async fn delete(&self, id: i64) -> Result<()>;
}

/// SQLx-based blog post repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxBlogPostRepository {
    pool: DynDatabasePool,
}

impl SqlxBlogPostRepository {
    /// Create a new SQLx blog post repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a shared repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn BlogPostRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl BlogPostRepository for SqlxBlogPostRepository {
    async fn create(&self, input: &BlogPostInput, tag_ids: &[i64]) -> Result<BlogPost> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                create_post_sqlite(self.pool.as_sqlite().unwrap(), input, tag_ids).await
            }
            DatabaseDriver::Mysql => {
                create_post_mysql(self.pool.as_mysql().unwrap(), input, tag_ids).await
            }
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<BlogPost>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_post_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await
            }
            DatabaseDriver::Mysql => get_post_by_id_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<BlogPost>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_post_by_slug_sqlite(self.pool.as_sqlite().unwrap(), slug).await
            }
            DatabaseDriver::Mysql => {
                get_post_by_slug_mysql(self.pool.as_mysql().unwrap(), slug).await
            }
        }
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<BlogPost>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_posts_sqlite(self.pool.as_sqlite().unwrap(), offset, limit).await
            }
            DatabaseDriver::Mysql => {
                list_posts_mysql(self.pool.as_mysql().unwrap(), offset, limit).await
            }
        }
    }

    async fn count(&self) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => count_posts_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => count_posts_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }

    async fn update(&self, id: i64, input: &BlogPostInput, tag_ids: &[i64]) -> Result<BlogPost> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                update_post_sqlite(self.pool.as_sqlite().unwrap(), id, input, tag_ids).await
            }
            DatabaseDriver::Mysql => {
                update_post_mysql(self.pool.as_mysql().unwrap(), id, input, tag_ids).await
            }
        }
    }

    async fn delete(&self, id: i64) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => delete_post_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => delete_post_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_post_sqlite(
    pool: &SqlitePool,
    input: &BlogPostInput,
    tag_ids: &[i64],
) -> Result<BlogPost> {
    let now = Utc::now();

    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let result = sqlx::query(
        r#"
        INSERT INTO blog_posts (title, content, summary, image_url, published, publish_at, slug, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(&input.summary)
    .bind(&input.image_url)
    .bind(input.published)
    .bind(input.publish_at)
    .bind(&input.slug)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await
    .context("Failed to create blog post")?;

    let id = result.last_insert_rowid();

    for tag_id in tag_ids {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO blog_post_tags (blog_post_id, tag_id)
            VALUES (?, ?)
            "#,
        )
        .bind(id)
        .bind(tag_id)
        .execute(&mut *tx)
        .await
        .context("Failed to attach tag to blog post")?;
    }

    tx.commit()
        .await
        .context("Failed to commit blog post create")?;

    Ok(BlogPost {
        id,
        title: input.title.clone(),
        content: input.content.clone(),
        summary: input.summary.clone(),
        image_url: input.image_url.clone(),
        published: input.published,
        publish_at: input.publish_at,
        slug: input.slug.clone(),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    })
}

async fn get_post_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<BlogPost>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, content, summary, image_url, published, publish_at, slug, created_at, updated_at, deleted_at
        FROM blog_posts
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get blog post by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_post_sqlite(&row))),
        None => Ok(None),
    }
}

async fn get_post_by_slug_sqlite(pool: &SqlitePool, slug: &str) -> Result<Option<BlogPost>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, content, summary, image_url, published, publish_at, slug, created_at, updated_at, deleted_at
        FROM blog_posts
        WHERE slug = ? AND deleted_at IS NULL
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await
    .context("Failed to get blog post by slug")?;

    match row {
        Some(row) => Ok(Some(row_to_post_sqlite(&row))),
        None => Ok(None),
    }
}

async fn list_posts_sqlite(pool: &SqlitePool, offset: i64, limit: i64) -> Result<Vec<BlogPost>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, content, summary, image_url, published, publish_at, slug, created_at, updated_at, deleted_at
        FROM blog_posts
        WHERE deleted_at IS NULL
        ORDER BY created_at DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .context("Failed to list blog posts")?;

    let mut posts = Vec::new();
    for row in rows {
        posts.push(row_to_post_sqlite(&row));
    }

    Ok(posts)
}

async fn count_posts_sqlite(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM blog_posts WHERE deleted_at IS NULL")
        .fetch_one(pool)
        .await
        .context("Failed to count blog posts")?;

    Ok(row.get("count"))
}

async fn update_post_sqlite(
    pool: &SqlitePool,
    id: i64,
    input: &BlogPostInput,
    tag_ids: &[i64],
) -> Result<BlogPost> {
    let now = Utc::now();

    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let result = sqlx::query(
        r#"
        UPDATE blog_posts
        SET title = ?, content = ?, summary = ?, image_url = ?, published = ?, publish_at = ?, slug = ?, updated_at = ?
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(&input.summary)
    .bind(&input.image_url)
    .bind(input.published)
    .bind(input.publish_at)
    .bind(&input.slug)
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await
    .context("Failed to update blog post")?;

    if result.rows_affected() == 0 {
        return Err(anyhow::anyhow!("Blog post not found"));
    }

    sqlx::query("DELETE FROM blog_post_tags WHERE blog_post_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("Failed to clear blog post tags")?;

    for tag_id in tag_ids {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO blog_post_tags (blog_post_id, tag_id)
            VALUES (?, ?)
            "#,
        )
        .bind(id)
        .bind(tag_id)
        .execute(&mut *tx)
        .await
        .context("Failed to attach tag to blog post")?;
    }

    tx.commit()
        .await
        .context("Failed to commit blog post update")?;

    get_post_by_id_sqlite(pool, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Blog post not found after update"))
}

async fn delete_post_sqlite(pool: &SqlitePool, id: i64) -> Result<()> {
    let now = Utc::now();

    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    sqlx::query(
        r#"
        UPDATE blog_posts
        SET deleted_at = ?, updated_at = ?
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await
    .context("Failed to delete blog post")?;

    sqlx::query("DELETE FROM blog_post_tags WHERE blog_post_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("Failed to clear blog post tags")?;

    tx.commit()
        .await
        .context("Failed to commit blog post delete")?;

    Ok(())
}

fn row_to_post_sqlite(row: &sqlx::sqlite::SqliteRow) -> BlogPost {
    BlogPost {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        summary: row.get("summary"),
        image_url: row.get("image_url"),
        published: row.get("published"),
        publish_at: row.get("publish_at"),
        slug: row.get("slug"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        deleted_at: row.get("deleted_at"),
    }
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_post_mysql(
    pool: &MySqlPool,
    input: &BlogPostInput,
    tag_ids: &[i64],
) -> Result<BlogPost> {
    let now = Utc::now();

    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let result = sqlx::query(
        r#"
        INSERT INTO blog_posts (title, content, summary, image_url, published, publish_at, slug, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(&input.summary)
    .bind(&input.image_url)
    .bind(input.published)
    .bind(input.publish_at)
    .bind(&input.slug)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await
    .context("Failed to create blog post")?;

    let id = result.last_insert_id() as i64;

    for tag_id in tag_ids {
        sqlx::query(
            r#"
            INSERT IGNORE INTO blog_post_tags (blog_post_id, tag_id)
            VALUES (?, ?)
            "#,
        )
        .bind(id)
        .bind(tag_id)
        .execute(&mut *tx)
        .await
        .context("Failed to attach tag to blog post")?;
    }

    tx.commit()
        .await
        .context("Failed to commit blog post create")?;

    Ok(BlogPost {
        id,
        title: input.title.clone(),
        content: input.content.clone(),
        summary: input.summary.clone(),
        image_url: input.image_url.clone(),
        published: input.published,
        publish_at: input.publish_at,
        slug: input.slug.clone(),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    })
}

async fn get_post_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<BlogPost>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, content, summary, image_url, published, publish_at, slug, created_at, updated_at, deleted_at
        FROM blog_posts
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get blog post by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_post_mysql(&row))),
        None => Ok(None),
    }
}

async fn get_post_by_slug_mysql(pool: &MySqlPool, slug: &str) -> Result<Option<BlogPost>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, content, summary, image_url, published, publish_at, slug, created_at, updated_at, deleted_at
        FROM blog_posts
        WHERE slug = ? AND deleted_at IS NULL
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await
    .context("Failed to get blog post by slug")?;

    match row {
        Some(row) => Ok(Some(row_to_post_mysql(&row))),
        None => Ok(None),
    }
}

async fn list_posts_mysql(pool: &MySqlPool, offset: i64, limit: i64) -> Result<Vec<BlogPost>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, content, summary, image_url, published, publish_at, slug, created_at, updated_at, deleted_at
        FROM blog_posts
        WHERE deleted_at IS NULL
        ORDER BY created_at DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .context("Failed to list blog posts")?;

    let mut posts = Vec::new();
    for row in rows {
        posts.push(row_to_post_mysql(&row));
    }

    Ok(posts)
}

async fn count_posts_mysql(pool: &MySqlPool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM blog_posts WHERE deleted_at IS NULL")
        .fetch_one(pool)
        .await
        .context("Failed to count blog posts")?;

    Ok(row.get("count"))
}

async fn update_post_mysql(
    pool: &MySqlPool,
    id: i64,
    input: &BlogPostInput,
    tag_ids: &[i64],
) -> Result<BlogPost> {
    let now = Utc::now();

    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let result = sqlx::query(
        r#"
        UPDATE blog_posts
        SET title = ?, content = ?, summary = ?, image_url = ?, published = ?, publish_at = ?, slug = ?, updated_at = ?
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(&input.summary)
    .bind(&input.image_url)
    .bind(input.published)
    .bind(input.publish_at)
    .bind(&input.slug)
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await
    .context("Failed to update blog post")?;

    if result.rows_affected() == 0 {
        return Err(anyhow::anyhow!("Blog post not found"));
    }

    sqlx::query("DELETE FROM blog_post_tags WHERE blog_post_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("Failed to clear blog post tags")?;

    for tag_id in tag_ids {
        sqlx::query(
            r#"
            INSERT IGNORE INTO blog_post_tags (blog_post_id, tag_id)
            VALUES (?, ?)
            "#,
        )
        .bind(id)
        .bind(tag_id)
        .execute(&mut *tx)
        .await
        .context("Failed to attach tag to blog post")?;
    }

    tx.commit()
        .await
        .context("Failed to commit blog post update")?;

    get_post_by_id_mysql(pool, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Blog post not found after update"))
}

async fn delete_post_mysql(pool: &MySqlPool, id: i64) -> Result<()> {
    let now = Utc::now();

    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    sqlx::query(
        r#"
        UPDATE blog_posts
        SET deleted_at = ?, updated_at = ?
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await
    .context("Failed to delete blog post")?;

    sqlx::query("DELETE FROM blog_post_tags WHERE blog_post_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("Failed to clear blog post tags")?;

    tx.commit()
        .await
        .context("Failed to commit blog post delete")?;

    Ok(())
}

fn row_to_post_mysql(row: &sqlx::mysql::MySqlRow) -> BlogPost {
    BlogPost {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        summary: row.get("summary"),
        image_url: row.get("image_url"),
        published: row.get("published"),
        publish_at: row.get("publish_at"),
        slug: row.get("slug"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        deleted_at: row.get("deleted_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use chrono::Duration;

    async fn setup_test_repo() -> (DynDatabasePool, SqlxBlogPostRepository) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        let repo = SqlxBlogPostRepository::new(pool.clone());
        (pool, repo)
    }

    fn test_input(title: &str, slug: &str) -> BlogPostInput {
        BlogPostInput {
            title: title.to_string(),
            content: "Some content".to_string(),
            summary: "A summary".to_string(),
            image_url: String::new(),
            published: false,
            publish_at: None,
            tags: Vec::new(),
            slug: slug.to_string(),
        }
    }

    async fn create_tag(pool: &SqlitePool, name: &str) -> i64 {
        let now = Utc::now();
        let result = sqlx::query("INSERT INTO tags (name, created_at, updated_at) VALUES (?, ?, ?)")
            .bind(name)
            .bind(now)
            .bind(now)
            .execute(pool)
            .await
            .expect("Failed to create tag");
        result.last_insert_rowid()
    }

    async fn junction_count(pool: &SqlitePool, post_id: i64) -> i64 {
        let row = sqlx::query("SELECT COUNT(*) as count FROM blog_post_tags WHERE blog_post_id = ?")
            .bind(post_id)
            .fetch_one(pool)
            .await
            .expect("Failed to count junction rows");
        row.get("count")
    }

    #[tokio::test]
    async fn test_create_post() {
        let (_pool, repo) = setup_test_repo().await;
        let input = test_input("Hello World", "hello-world");

        let created = repo.create(&input, &[]).await.expect("Failed to create post");

        assert!(created.id > 0);
        assert_eq!(created.title, "Hello World");
        assert_eq!(created.slug, "hello-world");
        assert!(!created.published);
        assert!(created.deleted_at.is_none());
    }

    #[tokio::test]
    async fn test_create_post_with_tags() {
        let (pool, repo) = setup_test_repo().await;
        let sqlite_pool = pool.as_sqlite().unwrap();

        let tag1 = create_tag(sqlite_pool, "rust").await;
        let tag2 = create_tag(sqlite_pool, "web").await;
        let input = test_input("Tagged", "tagged");

        let created = repo
            .create(&input, &[tag1, tag2])
            .await
            .expect("Failed to create post");

        assert_eq!(junction_count(sqlite_pool, created.id).await, 2);
    }

    #[tokio::test]
    async fn test_get_post_by_id() {
        let (_pool, repo) = setup_test_repo().await;
        let input = test_input("Find Me", "find-me");
        let created = repo.create(&input, &[]).await.expect("Failed to create post");

        let found = repo
            .get_by_id(created.id)
            .await
            .expect("Failed to get post")
            .expect("Post not found");

        assert_eq!(found.id, created.id);
        assert_eq!(found.title, "Find Me");
    }

    #[tokio::test]
    async fn test_get_post_by_id_not_found() {
        let (_pool, repo) = setup_test_repo().await;

        let found = repo.get_by_id(999).await.expect("Failed to get post");

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_get_post_by_slug() {
        let (_pool, repo) = setup_test_repo().await;
        let input = test_input("Sluggish", "sluggish-post");
        repo.create(&input, &[]).await.expect("Failed to create post");

        let found = repo
            .get_by_slug("sluggish-post")
            .await
            .expect("Failed to get post")
            .expect("Post not found");

        assert_eq!(found.slug, "sluggish-post");
    }

    #[tokio::test]
    async fn test_get_post_by_slug_not_found() {
        let (_pool, repo) = setup_test_repo().await;

        let found = repo
            .get_by_slug("nonexistent")
            .await
            .expect("Failed to get post");

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_unique_slug_constraint() {
        let (_pool, repo) = setup_test_repo().await;

        repo.create(&test_input("First", "same-slug"), &[])
            .await
            .expect("Failed to create first post");
        let result = repo.create(&test_input("Second", "same-slug"), &[]).await;

        assert!(result.is_err(), "Should fail due to duplicate slug");
    }

    #[tokio::test]
    async fn test_list_posts_newest_first() {
        let (pool, repo) = setup_test_repo().await;
        let sqlite_pool = pool.as_sqlite().unwrap();

        // Insert with staggered timestamps so the ordering is deterministic
        let base = Utc::now();
        for (i, slug) in ["oldest", "middle", "newest"].iter().enumerate() {
            sqlx::query(
                r#"INSERT INTO blog_posts (title, content, slug, created_at, updated_at)
                   VALUES (?, ?, ?, ?, ?)"#,
            )
            .bind(format!("Title {}", slug))
            .bind("Content")
            .bind(slug)
            .bind(base + Duration::minutes(i as i64))
            .bind(base + Duration::minutes(i as i64))
            .execute(sqlite_pool)
            .await
            .expect("Failed to insert post");
        }

        let posts = repo.list(0, 10).await.expect("Failed to list posts");

        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].slug, "newest");
        assert_eq!(posts[1].slug, "middle");
        assert_eq!(posts[2].slug, "oldest");
    }

    #[tokio::test]
    async fn test_list_posts_pagination() {
        let (pool, repo) = setup_test_repo().await;
        let sqlite_pool = pool.as_sqlite().unwrap();

        let base = Utc::now();
        for i in 0..5 {
            sqlx::query(
                r#"INSERT INTO blog_posts (title, content, slug, created_at, updated_at)
                   VALUES (?, ?, ?, ?, ?)"#,
            )
            .bind(format!("Post {}", i))
            .bind("Content")
            .bind(format!("post-{}", i))
            .bind(base + Duration::minutes(i))
            .bind(base + Duration::minutes(i))
            .execute(sqlite_pool)
            .await
            .expect("Failed to insert post");
        }

        let page = repo.list(2, 2).await.expect("Failed to list posts");

        assert_eq!(page.len(), 2);
        assert_eq!(page[0].slug, "post-2");
        assert_eq!(page[1].slug, "post-1");
    }

    #[tokio::test]
    async fn test_count_posts() {
        let (_pool, repo) = setup_test_repo().await;

        assert_eq!(repo.count().await.expect("Failed to count"), 0);

        repo.create(&test_input("One", "one"), &[])
            .await
            .expect("Failed to create post");
        repo.create(&test_input("Two", "two"), &[])
            .await
            .expect("Failed to create post");

        assert_eq!(repo.count().await.expect("Failed to count"), 2);
    }

    #[tokio::test]
    async fn test_update_post_fields() {
        let (_pool, repo) = setup_test_repo().await;
        let created = repo
            .create(&test_input("Before", "before"), &[])
            .await
            .expect("Failed to create post");

        let mut input = test_input("After", "after");
        input.published = true;
        let updated = repo
            .update(created.id, &input, &[])
            .await
            .expect("Failed to update post");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "After");
        assert_eq!(updated.slug, "after");
        assert!(updated.published);
    }

    #[tokio::test]
    async fn test_update_replaces_tags() {
        let (pool, repo) = setup_test_repo().await;
        let sqlite_pool = pool.as_sqlite().unwrap();

        let tag_a = create_tag(sqlite_pool, "a").await;
        let tag_b = create_tag(sqlite_pool, "b").await;
        let tag_c = create_tag(sqlite_pool, "c").await;

        let created = repo
            .create(&test_input("Tagged", "tagged"), &[tag_a, tag_b])
            .await
            .expect("Failed to create post");
        assert_eq!(junction_count(sqlite_pool, created.id).await, 2);

        repo.update(created.id, &test_input("Tagged", "tagged"), &[tag_c])
            .await
            .expect("Failed to update post");

        assert_eq!(junction_count(sqlite_pool, created.id).await, 1);
        let row = sqlx::query("SELECT tag_id FROM blog_post_tags WHERE blog_post_id = ?")
            .bind(created.id)
            .fetch_one(sqlite_pool)
            .await
            .expect("Failed to fetch junction row");
        let remaining: i64 = row.get("tag_id");
        assert_eq!(remaining, tag_c);
    }

    #[tokio::test]
    async fn test_update_with_empty_tags_clears_associations() {
        let (pool, repo) = setup_test_repo().await;
        let sqlite_pool = pool.as_sqlite().unwrap();

        let tag = create_tag(sqlite_pool, "lonely").await;
        let created = repo
            .create(&test_input("Tagged", "tagged"), &[tag])
            .await
            .expect("Failed to create post");

        repo.update(created.id, &test_input("Tagged", "tagged"), &[])
            .await
            .expect("Failed to update post");

        assert_eq!(junction_count(sqlite_pool, created.id).await, 0);
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let (_pool, repo) = setup_test_repo().await;

        let result = repo.update(999, &test_input("Ghost", "ghost"), &[]).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_rolls_back_on_bad_tag() {
        let (pool, repo) = setup_test_repo().await;
        let sqlite_pool = pool.as_sqlite().unwrap();

        let tag = create_tag(sqlite_pool, "keep").await;
        let created = repo
            .create(&test_input("Original", "original"), &[tag])
            .await
            .expect("Failed to create post");

        // 999 violates the tag foreign key, so the whole update must roll back
        let result = repo
            .update(created.id, &test_input("Changed", "changed"), &[999])
            .await;
        assert!(result.is_err());

        let found = repo
            .get_by_id(created.id)
            .await
            .expect("Failed to get post")
            .expect("Post not found");
        assert_eq!(found.title, "Original");
        assert_eq!(junction_count(sqlite_pool, created.id).await, 1);
    }

    #[tokio::test]
    async fn test_delete_post_is_soft() {
        let (pool, repo) = setup_test_repo().await;
        let sqlite_pool = pool.as_sqlite().unwrap();

        let created = repo
            .create(&test_input("Doomed", "doomed"), &[])
            .await
            .expect("Failed to create post");

        repo.delete(created.id).await.expect("Failed to delete post");

        let found = repo.get_by_id(created.id).await.expect("Failed to get post");
        assert!(found.is_none());

        // Row survives with deleted_at stamped
        let row = sqlx::query("SELECT deleted_at FROM blog_posts WHERE id = ?")
            .bind(created.id)
            .fetch_one(sqlite_pool)
            .await
            .expect("Failed to fetch raw row");
        let deleted_at: Option<chrono::DateTime<Utc>> = row.get("deleted_at");
        assert!(deleted_at.is_some());
    }

    #[tokio::test]
    async fn test_delete_clears_tag_associations() {
        let (pool, repo) = setup_test_repo().await;
        let sqlite_pool = pool.as_sqlite().unwrap();

        let tag = create_tag(sqlite_pool, "orphan").await;
        let created = repo
            .create(&test_input("Tagged", "tagged"), &[tag])
            .await
            .expect("Failed to create post");

        repo.delete(created.id).await.expect("Failed to delete post");

        assert_eq!(junction_count(sqlite_pool, created.id).await, 0);
    }

    #[tokio::test]
    async fn test_deleted_posts_excluded_from_list_and_count() {
        let (_pool, repo) = setup_test_repo().await;

        let kept = repo
            .create(&test_input("Kept", "kept"), &[])
            .await
            .expect("Failed to create post");
        let doomed = repo
            .create(&test_input("Doomed", "doomed"), &[])
            .await
            .expect("Failed to create post");

        repo.delete(doomed.id).await.expect("Failed to delete post");

        let posts = repo.list(0, 10).await.expect("Failed to list posts");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, kept.id);
        assert_eq!(repo.count().await.expect("Failed to count"), 1);
    }

    #[tokio::test]
    async fn test_slug_stays_reserved_after_soft_delete() {
        let (_pool, repo) = setup_test_repo().await;

        let first = repo
            .create(&test_input("First", "reused"), &[])
            .await
            .expect("Failed to create post");
        repo.delete(first.id).await.expect("Failed to delete post");

        // Soft-deleted row still holds the slug, so reuse must fail
        let result = repo.create(&test_input("Second", "reused"), &[]).await;
        assert!(result.is_err());
    }
}
