//! Hotel-Day Rollup Views

use serde::{Deserialize, Serialize};

use super::expense::GuestExpense;
use super::stay::GuestStay;
use super::transaction::GuestTransaction;
use crate::response::Pagination;

/// One currently-relevant stay in a hotel day report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StayDayRecord {
    #[serde(flatten)]
    pub stay: GuestStay,
    /// Payments recorded on the report date
    pub transactions: Vec<GuestTransaction>,
    /// Expenses recorded on the report date
    pub expenses: Vec<GuestExpense>,
    /// Food expenses on the report date (2-decimal string)
    pub food_expense: String,
    /// Room charge accrued from check-in through the report date
    pub accrued_bill: String,
    /// Cumulative pending balance as of the report date
    pub pending_amount: String,
}

/// Hotel-wide day report.
///
/// The stay list is paginated, but `today_total_sales` and
/// `total_pending` cover the entire relevant stay set — totals must not
/// be paginated away.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayReport {
    /// Report date (YYYY-MM-DD)
    pub date: String,
    pub records: Vec<StayDayRecord>,
    pub pagination: Pagination,
    pub today_total_sales: String,
    pub total_pending: String,
}
