//! Data models
//!
//! This module contains all data structures used throughout the Vitrine backend.
//! Models represent:
//! - Database entities (User, BlogPost, Tag, PortfolioProject, ContactSubmission)
//! - Entity input types used by services and repositories
//! - Pagination parameters and the paginated result container

mod blog_post;
mod contact_submission;
mod portfolio_project;
mod tag;
mod user;

pub use blog_post::{BlogPost, BlogPostInput, BlogPostWithTags, ListParams, PagedResult};
pub use contact_submission::{ContactSubmission, ContactSubmissionInput};
pub use portfolio_project::{PortfolioProject, PortfolioProjectInput};
pub use tag::Tag;
pub use user::{NewUser, User};
