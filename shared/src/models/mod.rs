//! Data models
//!
//! Shared between pms-server and API consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are TEXT UUIDs except `GuestStay.serial_no` (monotonic INTEGER).

pub mod category;
pub mod expense;
pub mod food_order;
pub mod hotel;
pub mod menu;
pub mod payment_mode;
pub mod report;
pub mod room;
pub mod stay;
pub mod transaction;
pub mod user;

// Re-exports
pub use category::*;
pub use expense::*;
pub use food_order::*;
pub use hotel::*;
pub use menu::*;
pub use payment_mode::*;
pub use report::*;
pub use room::*;
pub use stay::*;
pub use transaction::*;
pub use user::*;
