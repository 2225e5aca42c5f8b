//! Guest and Hotel Expense Models

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Guest expense type. Only `food` carries an itemized sub-ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    Food,
    Laundry,
    Others,
}

impl ExpenseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseType::Food => "food",
            ExpenseType::Laundry => "laundry",
            ExpenseType::Others => "others",
        }
    }
}

impl FromStr for ExpenseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(ExpenseType::Food),
            "laundry" => Ok(ExpenseType::Laundry),
            "others" => Ok(ExpenseType::Others),
            other => Err(format!("unknown expense type: {other}")),
        }
    }
}

/// Expense charged to a guest stay.
///
/// Target shape is one row per (day, type); same-day same-type entries
/// merge by summing amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct GuestExpense {
    pub id: String,
    pub booking_id: String,
    pub expense_type: ExpenseType,
    pub amount: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Hotel-side expense book entry (staff purchases, maintenance, …)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct HotelExpense {
    pub id: String,
    pub hotel_id: String,
    pub title: String,
    pub amount: f64,
    pub payment_mode_id: Option<String>,
    /// Calendar date of the expense (YYYY-MM-DD)
    pub expense_date: String,
    pub created_by: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create hotel expense payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelExpenseCreate {
    pub title: String,
    pub amount: f64,
    pub payment_mode_id: Option<String>,
    /// Defaults to the current business date
    pub expense_date: Option<String>,
}

/// Update hotel expense payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelExpenseUpdate {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub payment_mode_id: Option<String>,
    pub expense_date: Option<String>,
}
