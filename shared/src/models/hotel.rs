//! Hotel and Manager-Assignment Models

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Hotel entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub total_rooms: i64,
    pub created_by: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create hotel payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelCreate {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub total_rooms: i64,
}

/// Update hotel payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub total_rooms: Option<i64>,
}

/// Manager-assignment status. Revocation flips the status instead of
/// deleting the row, so access can be restored without duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Active,
    Inactive,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Active => "active",
            AssignmentStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AssignmentStatus::Active),
            "inactive" => Ok(AssignmentStatus::Inactive),
            other => Err(format!("unknown assignment status: {other}")),
        }
    }
}

/// Manager-to-hotel assignment (many-to-many with status)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct HotelAssignment {
    pub id: String,
    pub hotel_id: String,
    pub manager_id: String,
    pub status: AssignmentStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Assign manager payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignManagerRequest {
    pub manager_id: String,
}
