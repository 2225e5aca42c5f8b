//! Repository Module
//!
//! Module-level async functions over `&SqlitePool`, one module per table
//! group. Handlers convert dates to Unix-millis windows before calling in;
//! repositories never touch the HTTP layer.

// Auth / administration
pub mod assignment;
pub mod hotel;
pub mod user;

// Hotel-scoped entities
pub mod category;
pub mod hotel_expense;
pub mod room;

// Creator-scoped catalogs
pub mod menu;
pub mod payment_mode;

// Guest ledger
pub mod food_order;
pub mod guest_stay;
pub mod ledger;
pub mod rollup;

use thiserror::Error;

use crate::ledger::LedgerError;
use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                RepoError::Conflict(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<LedgerError> for RepoError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation(msg) => RepoError::Validation(msg),
            LedgerError::NotFound(msg) => RepoError::NotFound(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Conflict(msg) => AppError::Conflict(msg),
            RepoError::Database(msg) => AppError::Database(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
