//! Portfolio project model
//!
//! Projects carry an ordered list of technology names. The list is stored
//! as JSON text in a single column; the repository owns that codec and the
//! rest of the system only ever sees `Vec<String>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Portfolio project entity.
///
/// `project_type` distinguishes project categories ("coding", "music");
/// the value is free-form at this layer and filterable on listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioProject {
    /// Unique identifier
    pub id: i64,
    /// Project title
    pub title: String,
    /// Long-form description
    pub description: String,
    /// Category used by the list filter
    pub project_type: String,
    /// Cover image URL
    pub image_url: String,
    /// Live project URL
    pub project_url: String,
    /// Source repository URL
    pub repo_url: String,
    /// Ordered technology names, decoded from the stored JSON column
    pub technologies: Vec<String>,
    /// Whether the project is highlighted on the site
    pub featured: bool,
    /// Project start date
    pub start_date: Option<DateTime<Utc>>,
    /// Project end date
    pub end_date: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Input for creating or fully replacing a portfolio project.
#[derive(Debug, Clone, Default)]
pub struct PortfolioProjectInput {
    pub title: String,
    pub description: String,
    pub project_type: String,
    pub image_url: String,
    pub project_url: String,
    pub repo_url: String,
    pub technologies: Vec<String>,
    pub featured: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}
