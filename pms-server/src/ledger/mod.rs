//! Guest-ledger computation core
//!
//! Pure calculation logic, independent of the database layer:
//!
//! - [`money`] — decimal-safe conversion and 2-decimal formatting
//! - [`pending`] — accrued rent and pending-balance derivation
//! - [`food`] — portion pricing of itemized food order lines
//!
//! Repositories feed these functions with sums and rows; handlers format
//! the resulting `Decimal`s into 2-decimal strings at the API boundary.

pub mod food;
pub mod money;
pub mod pending;

use thiserror::Error;

/// Errors raised by ledger calculations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),
}

impl From<LedgerError> for crate::utils::AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation(msg) => crate::utils::AppError::Validation(msg),
            LedgerError::NotFound(msg) => crate::utils::AppError::NotFound(msg),
        }
    }
}
