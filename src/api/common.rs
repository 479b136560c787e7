//! Common API utilities and shared types
//!
//! This module contains shared utilities used across multiple API endpoints.

use serde::Deserialize;

use crate::api::middleware::ApiError;
use crate::models::ListParams;

/// Default page number (1-indexed)
const DEFAULT_PAGE: u32 = 1;

/// Default page size
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Pagination query parameters.
///
/// The values arrive as raw strings so that non-numeric or out-of-range
/// input silently falls back to the defaults instead of rejecting the
/// request.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl PaginationQuery {
    /// Resolve the query into clamped list parameters
    pub fn params(&self) -> ListParams {
        ListParams::new(
            parse_param(self.page.as_deref(), DEFAULT_PAGE),
            parse_param(self.page_size.as_deref(), DEFAULT_PAGE_SIZE),
        )
    }
}

fn parse_param(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|value| value.parse::<u32>().ok())
        .filter(|&value| value >= 1)
        .unwrap_or(default)
}

/// Parse a path segment as a numeric id
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::validation_error("Invalid id format"))
}
