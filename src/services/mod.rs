//! Services layer - Business logic
//!
//! This module contains all business logic services for the site backend.
//! Services are responsible for:
//! - Implementing business rules
//! - Coordinating repositories
//! - Handling validation and error cases

pub mod auth;
pub mod blog;
pub mod contact;
pub mod password;
pub mod portfolio;
pub mod token;

pub use auth::{AuthResponse, AuthService, AuthServiceError};
pub use blog::{BlogService, BlogServiceError};
pub use contact::{ContactService, ContactServiceError};
pub use password::{hash_password, verify_password};
pub use portfolio::{PortfolioService, PortfolioServiceError};
pub use token::{Claims, TokenService};
