//! Guest Transaction Model (payment ledger entries)

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Payment type. All three qualify toward the pending-balance formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Advance,
    Partial,
    Final,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Advance => "advance",
            PaymentType::Partial => "partial",
            PaymentType::Final => "final",
        }
    }
}

impl FromStr for PaymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "advance" => Ok(PaymentType::Advance),
            "partial" => Ok(PaymentType::Partial),
            "final" => Ok(PaymentType::Final),
            other => Err(format!("unknown payment type: {other}")),
        }
    }
}

/// Payment ledger entry for a guest stay.
///
/// Append-only, except that a second payment of the same type on the same
/// calendar day merges into the existing row by summing the amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct GuestTransaction {
    pub id: String,
    pub booking_id: String,
    pub payment_type: PaymentType,
    pub payment_mode_id: Option<String>,
    pub amount: f64,
    /// Calendar date of the payment (YYYY-MM-DD)
    pub payment_date: String,
    pub created_at: i64,
    pub updated_at: i64,
}
