//! Tag model
//!
//! This module defines the Tag entity for the Vitrine backend. Tags label
//! blog posts through a many-to-many association; the association rows are
//! owned by the blog post repository, the Tag rows by the tag repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag entity with a unique name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    /// Unique identifier
    pub id: i64,
    /// Unique tag name
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker
    pub deleted_at: Option<DateTime<Utc>>,
}
