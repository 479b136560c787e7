//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles CRUD operations for a specific entity; they are
//! the only components that touch persisted rows. Every read filters out
//! soft-deleted rows and every delete just sets the marker.

pub mod blog_post;
pub mod contact_submission;
pub mod portfolio_project;
pub mod tag;
pub mod user;

pub use blog_post::{BlogPostRepository, SqlxBlogPostRepository};
pub use contact_submission::{ContactSubmissionRepository, SqlxContactSubmissionRepository};
pub use portfolio_project::{PortfolioProjectRepository, SqlxPortfolioProjectRepository};
pub use tag::{SqlxTagRepository, TagRepository};
pub use user::{SqlxUserRepository, UserRepository};
