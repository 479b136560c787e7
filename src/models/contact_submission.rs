//! Contact submission model
//!
//! Submissions arrive through the public contact form and are reviewed by
//! the authenticated site owner, who flips their read flag one by one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message submitted through the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactSubmission {
    /// Unique identifier
    pub id: i64,
    /// Sender name
    pub name: String,
    /// Sender email address
    pub email: String,
    /// Optional subject line
    pub subject: String,
    /// Message body
    pub message: String,
    /// Whether the owner has read the submission
    pub read: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Input for recording a new submission. The read flag always starts false.
#[derive(Debug, Clone, Default)]
pub struct ContactSubmissionInput {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_serializes_read_flag() {
        let submission = ContactSubmission {
            id: 1,
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            subject: String::new(),
            message: "hi".to_string(),
            read: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["read"], false);
        assert_eq!(json["message"], "hi");
    }
}
