//! Guest Food Order Model (itemized food sub-ledger)

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Plate portion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PortionType {
    Half,
    Full,
}

impl PortionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortionType::Half => "half",
            PortionType::Full => "full",
        }
    }
}

impl FromStr for PortionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "half" => Ok(PortionType::Half),
            "full" => Ok(PortionType::Full),
            other => Err(format!("unknown portion type: {other}")),
        }
    }
}

/// One itemized line of a food expense. Many lines roll up into one
/// `GuestExpense` amount; replacing a food expense deletes and reinserts
/// its lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct GuestFoodOrder {
    pub id: String,
    pub guest_expense_id: String,
    pub menu_id: String,
    pub portion_type: PortionType,
    pub quantity: i64,
    pub unit_price: f64,
    pub created_at: i64,
}

/// Inbound food order line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLineInput {
    pub menu_id: String,
    pub portion_type: PortionType,
    pub quantity: i64,
}

/// Add food order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodOrderRequest {
    pub lines: Vec<FoodLineInput>,
}

/// Formatted food order line (API view; money as 2-decimal strings)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodOrderLine {
    pub food_order_id: String,
    pub expense_id: String,
    pub name: String,
    pub quantity: i64,
    pub portion_type: PortionType,
    pub unit_price: String,
    pub total_price: String,
}

/// Formatted food order list for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodOrderView {
    /// Calendar date the orders fall on (YYYY-MM-DD)
    pub date: String,
    pub orders: Vec<FoodOrderLine>,
    pub grand_total: String,
}
