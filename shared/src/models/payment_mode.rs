//! Payment Mode Model

use serde::{Deserialize, Serialize};

/// Payment mode label (cash, UPI, card, …), scoped to its creator.
/// Referenced by both guest payments and hotel expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PaymentMode {
    pub id: String,
    pub payment_mode: String,
    pub created_by: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create payment mode payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentModeCreate {
    pub payment_mode: String,
}

/// Update payment mode payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentModeUpdate {
    pub payment_mode: String,
}
