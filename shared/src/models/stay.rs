//! Guest Stay Model (booking)

use serde::{Deserialize, Serialize};

use super::expense::ExpenseType;
use super::transaction::PaymentType;

/// Guest stay (booking) entity.
///
/// `serial_no` is globally unique and monotonic — assigned at creation,
/// never reused even after deletes. `bill` is the room charge accrued as
/// of the last mutation; reporting paths recompute accrual from `rent`
/// and the date window instead of trusting this snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct GuestStay {
    pub id: String,
    pub hotel_id: String,
    pub serial_no: i64,
    pub guest_name: String,
    pub phone_no: Option<String>,
    pub room_no: String,
    /// Check-in calendar date (YYYY-MM-DD)
    pub checkin_date: String,
    /// Check-in clock time (HH:MM)
    pub checkin_time: String,
    pub checkout_date: Option<String>,
    pub checkout_time: Option<String>,
    /// Per-night rate
    pub rent: f64,
    /// Accrued room charge snapshot
    pub bill: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Check-in payload. An advance amount, when given, creates the first
/// payment ledger entry in the same transaction as the stay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestStayCreate {
    pub hotel_id: String,
    pub guest_name: String,
    pub phone_no: Option<String>,
    pub room_no: String,
    pub checkin_date: String,
    pub checkin_time: String,
    pub rent: f64,
    pub advance_amount: Option<f64>,
    pub payment_mode_id: Option<String>,
}

/// Update stay payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestStayUpdate {
    pub guest_name: Option<String>,
    pub phone_no: Option<String>,
    pub room_no: Option<String>,
    pub rent: Option<f64>,
}

/// Checkout payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub checkout_date: String,
    pub checkout_time: String,
}

/// Payment half of a ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    pub payment_type: PaymentType,
    pub payment_mode_id: Option<String>,
    pub amount: f64,
    /// Defaults to the current business date
    pub payment_date: Option<String>,
}

/// Expense half of a ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseInput {
    pub expense_type: ExpenseType,
    pub amount: f64,
}

/// Record payment and/or expense against a stay, in one transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntryRequest {
    pub payment: Option<PaymentInput>,
    pub expense: Option<ExpenseInput>,
}

/// Guest stay with its derived running balance (money as 2-decimal strings)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StayLedger {
    #[serde(flatten)]
    pub stay: GuestStay,
    /// Date the balance is computed as of (YYYY-MM-DD)
    pub as_of_date: String,
    pub total_bill: String,
    pub food_expenses: String,
    pub payments_received: String,
    pub pending_amount: String,
}
