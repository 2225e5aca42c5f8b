//! Guest Food Order Repository (itemized food sub-ledger)

use chrono_tz::Tz;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::ledger::food::PricedLine;
use crate::ledger::money::{money_string, to_f64};
use crate::utils::time::millis_to_date;
use shared::models::{ExpenseType, FoodOrderLine, FoodOrderView, GuestExpense, PortionType};

/// Fetch a guest expense row by id
pub async fn find_expense(pool: &SqlitePool, id: &str) -> RepoResult<Option<GuestExpense>> {
    let row = sqlx::query_as::<_, GuestExpense>(
        "SELECT id, booking_id, expense_type, amount, created_at, updated_at FROM guest_expense WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Create one food expense plus one food order row per priced line,
/// atomically.
pub async fn add_food_expense(
    pool: &SqlitePool,
    booking_id: &str,
    lines: &[PricedLine],
    grand_total: Decimal,
    date: &str,
) -> RepoResult<FoodOrderView> {
    if super::guest_stay::find_by_id(pool, booking_id).await?.is_none() {
        return Err(RepoError::NotFound(format!(
            "Guest stay {booking_id} not found"
        )));
    }

    let now = shared::util::now_millis();
    let expense_id = shared::util::new_id();

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO guest_expense (id, booking_id, expense_type, amount, created_at, updated_at) VALUES (?1, ?2, 'food', ?3, ?4, ?4)",
    )
    .bind(&expense_id)
    .bind(booking_id)
    .bind(to_f64(grand_total))
    .bind(now)
    .execute(&mut *tx)
    .await?;

    let mut view_lines = Vec::with_capacity(lines.len());
    for line in lines {
        let order_id = shared::util::new_id();
        sqlx::query(
            "INSERT INTO guest_food_order (id, guest_expense_id, menu_id, portion_type, quantity, unit_price, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&order_id)
        .bind(&expense_id)
        .bind(&line.menu_id)
        .bind(line.portion_type.as_str())
        .bind(line.quantity)
        .bind(to_f64(line.unit_price))
        .bind(now)
        .execute(&mut *tx)
        .await?;

        view_lines.push(FoodOrderLine {
            food_order_id: order_id,
            expense_id: expense_id.clone(),
            name: line.menu_name.clone(),
            quantity: line.quantity,
            portion_type: line.portion_type,
            unit_price: money_string(line.unit_price),
            total_price: money_string(line.line_total),
        });
    }

    tx.commit().await?;

    Ok(FoodOrderView {
        date: date.to_string(),
        orders: view_lines,
        grand_total: money_string(grand_total),
    })
}

/// Replace the line set of an existing food expense: delete all prior
/// lines, insert the new ones, and update the parent amount — one
/// transaction, delete+recreate rather than incremental patching.
pub async fn replace_food_expense(
    pool: &SqlitePool,
    tz: Tz,
    expense_id: &str,
    lines: &[PricedLine],
    grand_total: Decimal,
) -> RepoResult<FoodOrderView> {
    let expense = find_expense(pool, expense_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Expense {expense_id} not found")))?;

    if expense.expense_type != ExpenseType::Food {
        return Err(RepoError::Validation(format!(
            "Invalid expense type: expected food, got {}",
            expense.expense_type.as_str()
        )));
    }

    let now = shared::util::now_millis();

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM guest_food_order WHERE guest_expense_id = ?")
        .bind(expense_id)
        .execute(&mut *tx)
        .await?;

    let mut view_lines = Vec::with_capacity(lines.len());
    for line in lines {
        let order_id = shared::util::new_id();
        sqlx::query(
            "INSERT INTO guest_food_order (id, guest_expense_id, menu_id, portion_type, quantity, unit_price, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&order_id)
        .bind(expense_id)
        .bind(&line.menu_id)
        .bind(line.portion_type.as_str())
        .bind(line.quantity)
        .bind(to_f64(line.unit_price))
        .bind(now)
        .execute(&mut *tx)
        .await?;

        view_lines.push(FoodOrderLine {
            food_order_id: order_id,
            expense_id: expense_id.to_string(),
            name: line.menu_name.clone(),
            quantity: line.quantity,
            portion_type: line.portion_type,
            unit_price: money_string(line.unit_price),
            total_price: money_string(line.line_total),
        });
    }

    sqlx::query("UPDATE guest_expense SET amount = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(to_f64(grand_total))
        .bind(now)
        .bind(expense_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    let date = millis_to_date(expense.created_at, tz)
        .format("%Y-%m-%d")
        .to_string();
    Ok(FoodOrderView {
        date,
        orders: view_lines,
        grand_total: money_string(grand_total),
    })
}

#[derive(Debug, sqlx::FromRow)]
struct FoodOrderRow {
    id: String,
    guest_expense_id: String,
    menu_name: String,
    portion_type: PortionType,
    quantity: i64,
    unit_price: f64,
}

/// Food orders whose parent expense falls within `[start, end)` for a
/// booking, formatted with recomputed line totals.
pub async fn find_for_date(
    pool: &SqlitePool,
    booking_id: &str,
    date: &str,
    start: i64,
    end: i64,
) -> RepoResult<FoodOrderView> {
    let rows = sqlx::query_as::<_, FoodOrderRow>(
        "SELECT fo.id, fo.guest_expense_id, m.name AS menu_name, fo.portion_type, fo.quantity, fo.unit_price FROM guest_food_order fo JOIN guest_expense ge ON fo.guest_expense_id = ge.id JOIN menu m ON fo.menu_id = m.id WHERE ge.booking_id = ?1 AND ge.expense_type = 'food' AND ge.created_at >= ?2 AND ge.created_at < ?3 ORDER BY fo.created_at",
    )
    .bind(booking_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    let mut grand_total = Decimal::ZERO;
    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        let unit_price = crate::ledger::money::to_decimal(row.unit_price);
        let line_total = unit_price * Decimal::from(row.quantity);
        grand_total += line_total;
        lines.push(FoodOrderLine {
            food_order_id: row.id,
            expense_id: row.guest_expense_id,
            name: row.menu_name,
            quantity: row.quantity,
            portion_type: row.portion_type,
            unit_price: money_string(unit_price),
            total_price: money_string(line_total),
        });
    }

    Ok(FoodOrderView {
        date: date.to_string(),
        orders: lines,
        grand_total: money_string(grand_total),
    })
}
