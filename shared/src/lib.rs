//! Shared types for the hotel PMS backend
//!
//! Data models, the API response envelope, and small utilities used by
//! both the server and API consumers. DB row types derive `sqlx::FromRow`
//! behind the `db` feature so API clients stay free of sqlx.

pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use response::{ApiResponse, ListResponse, Pagination};
