//! User model
//!
//! This module defines the User entity for the Vitrine backend. Users exist
//! to authenticate against the protected API surface; they are created at
//! registration and never deleted here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing an account in the system.
///
/// The password hash is stored as an Argon2id PHC string and is never
/// serialized into API responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Unique username
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Argon2id password hash (never exposed in JSON)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role name, "user" unless changed by an administrator
    pub role: String,
    /// Whether the account may log in
    pub active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; set rows are excluded from every read
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Input for creating a user row.
///
/// The password arrives here already hashed; the auth service owns the
/// hashing step.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique username
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Argon2id password hash
    pub password_hash: String,
    /// Role name
    pub role: String,
    /// Whether the account may log in
    pub active: bool,
}

impl NewUser {
    /// Create input for a regular account with the default role.
    pub fn with_defaults(username: String, email: String, password_hash: String) -> Self {
        Self {
            username,
            email,
            password_hash,
            role: "user".to_string(),
            active: true,
        }
    }
}
