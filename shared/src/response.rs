//! API Response types
//!
//! Standardized response envelope for the entire API:
//!
//! ```json
//! { "success": true, "message": "Success", "data": { ... } }
//! { "success": true, "message": "Success", "records": [ ... ], "pagination": { ... } }
//! { "success": false, "message": "Hotel not found", "error": "NOT_FOUND" }
//! ```

use serde::{Deserialize, Serialize};

/// Pagination metadata for list responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let limit = limit.max(1);
        let total_pages = if total > 0 {
            (total + limit - 1) / limit
        } else {
            1
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// Unified API response for single-object endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// Human-readable message
    pub message: String,
    /// Response data (omitted on errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Machine-readable error kind (omitted on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: "Success".to_string(),
            data: Some(data),
            error: None,
        }
    }

    /// Create a successful response with custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Unified API response for list endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub message: String,
    pub records: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ListResponse<T> {
    /// Create a successful list response without pagination
    pub fn ok(records: Vec<T>) -> Self {
        Self {
            success: true,
            message: "Success".to_string(),
            records,
            pagination: None,
        }
    }

    /// Create a successful paginated list response
    pub fn paginated(records: Vec<T>, pagination: Pagination) -> Self {
        Self {
            success: true,
            message: "Success".to_string(),
            records,
            pagination: Some(pagination),
        }
    }
}
