//! Room Model

use serde::{Deserialize, Serialize};

/// Room entity, owned by a hotel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Room {
    pub id: String,
    pub hotel_id: String,
    pub category_id: Option<String>,
    pub room_no: String,
    pub floor: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create room payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCreate {
    pub room_no: String,
    pub category_id: Option<String>,
    pub floor: Option<i64>,
}

/// Update room payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomUpdate {
    pub room_no: Option<String>,
    pub category_id: Option<String>,
    pub floor: Option<i64>,
}
