//! Menu Model

use serde::{Deserialize, Serialize};

/// Menu item, scoped to its creator.
///
/// `half_plate_price` is optional — not every dish is sold by the half
/// plate. Pricing a half-plate order against a menu without one is a
/// validation error, not a fallback to the full price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Menu {
    pub id: String,
    pub name: String,
    pub half_plate_price: Option<f64>,
    pub full_plate_price: f64,
    pub created_by: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create menu payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCreate {
    pub name: String,
    pub half_plate_price: Option<f64>,
    pub full_plate_price: f64,
}

/// Update menu payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuUpdate {
    pub name: Option<String>,
    pub half_plate_price: Option<f64>,
    pub full_plate_price: Option<f64>,
}
