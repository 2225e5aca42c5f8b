//! End-to-end ledger tests over a real SQLite database.
//!
//! Each test opens its own temp-file database through `DbService`, so the
//! full migration set and foreign-key behavior are exercised.

use chrono_tz::Tz;
use sqlx::SqlitePool;
use tempfile::TempDir;

use pms_server::auth::{CurrentUser, access};
use pms_server::db::DbService;
use pms_server::db::repository::{
    RepoError, assignment, food_order, guest_stay, hotel, ledger, menu, user,
};
use pms_server::ledger::food::price_lines;
use pms_server::ledger::money::money_string;
use pms_server::utils::time::today;
use shared::models::{
    ExpenseInput, ExpenseType, FoodLineInput, GuestStayCreate, HotelCreate, LedgerEntryRequest,
    MenuCreate, PaymentInput, PaymentType, PortionType, UserCreate, UserRole,
};

const TZ: Tz = chrono_tz::Asia::Kolkata;

struct TestDb {
    pool: SqlitePool,
    // Held so the database file outlives the test body
    _dir: TempDir,
}

async fn setup() -> TestDb {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("test.db");
    let service = DbService::new(&path.to_string_lossy())
        .await
        .expect("database init");
    TestDb {
        pool: service.pool,
        _dir: dir,
    }
}

async fn seed_admin(pool: &SqlitePool) -> String {
    let admin = user::create(
        pool,
        UserCreate {
            username: "admin".into(),
            display_name: "Admin".into(),
            password: "admin-pass-123".into(),
            role: UserRole::Admin,
        },
    )
    .await
    .expect("create admin");
    admin.id
}

async fn seed_hotel(pool: &SqlitePool, admin_id: &str) -> String {
    let hotel = hotel::create(
        pool,
        admin_id,
        HotelCreate {
            name: "Hotel Annapurna".into(),
            address: "MG Road, Pune".into(),
            phone: Some("020-555123".into()),
            total_rooms: 20,
        },
    )
    .await
    .expect("create hotel");
    hotel.id
}

fn checkin_today(hotel_id: &str, rent: f64, advance: Option<f64>) -> GuestStayCreate {
    GuestStayCreate {
        hotel_id: hotel_id.to_string(),
        guest_name: "Ravi Kumar".into(),
        phone_no: Some("98200-11111".into()),
        room_no: "101".into(),
        checkin_date: today(TZ).format("%Y-%m-%d").to_string(),
        checkin_time: "12:00".into(),
        rent,
        advance_amount: advance,
        payment_mode_id: None,
    }
}

fn payment(payment_type: PaymentType, amount: f64) -> LedgerEntryRequest {
    LedgerEntryRequest {
        payment: Some(PaymentInput {
            payment_type,
            payment_mode_id: None,
            amount,
            payment_date: None,
        }),
        expense: None,
    }
}

fn expense(expense_type: ExpenseType, amount: f64) -> LedgerEntryRequest {
    LedgerEntryRequest {
        payment: None,
        expense: Some(ExpenseInput {
            expense_type,
            amount,
        }),
    }
}

// ========================================================================
// Serial number assignment
// ========================================================================

#[tokio::test]
async fn serial_numbers_are_monotonic_and_never_reused() {
    let db = setup().await;
    let admin = seed_admin(&db.pool).await;
    let hotel_id = seed_hotel(&db.pool, &admin).await;

    let s1 = guest_stay::create(&db.pool, checkin_today(&hotel_id, 500.0, None))
        .await
        .unwrap();
    let s2 = guest_stay::create(&db.pool, checkin_today(&hotel_id, 500.0, None))
        .await
        .unwrap();
    let s3 = guest_stay::create(&db.pool, checkin_today(&hotel_id, 500.0, None))
        .await
        .unwrap();
    assert_eq!((s1.serial_no, s2.serial_no, s3.serial_no), (1, 2, 3));

    guest_stay::delete(&db.pool, &s2.id).await.unwrap();

    let s4 = guest_stay::create(&db.pool, checkin_today(&hotel_id, 500.0, None))
        .await
        .unwrap();
    assert_eq!(s4.serial_no, 4);
}

// ========================================================================
// Check-in with advance + pending balance
// ========================================================================

#[tokio::test]
async fn checkin_with_advance_creates_stay_and_payment_atomically() {
    let db = setup().await;
    let admin = seed_admin(&db.pool).await;
    let hotel_id = seed_hotel(&db.pool, &admin).await;

    let stay = guest_stay::create(&db.pool, checkin_today(&hotel_id, 1000.0, Some(500.0)))
        .await
        .unwrap();

    let txn_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM guest_transaction WHERE booking_id = ?")
            .bind(&stay.id)
            .fetch_one(&db.pool)
            .await
            .unwrap();
    assert_eq!(txn_count, 1);

    // checkin day, rent 1000, advance 500: pending = max(0, 1000×1 − 500)
    let breakdown = ledger::compute_pending(&db.pool, TZ, &stay.id, today(TZ))
        .await
        .unwrap();
    assert_eq!(money_string(breakdown.pending), "500.00");
}

#[tokio::test]
async fn pending_is_clamped_at_zero_on_overpayment() {
    let db = setup().await;
    let admin = seed_admin(&db.pool).await;
    let hotel_id = seed_hotel(&db.pool, &admin).await;

    let stay = guest_stay::create(&db.pool, checkin_today(&hotel_id, 1000.0, Some(5000.0)))
        .await
        .unwrap();

    let breakdown = ledger::compute_pending(&db.pool, TZ, &stay.id, today(TZ))
        .await
        .unwrap();
    assert_eq!(money_string(breakdown.pending), "0.00");
}

#[tokio::test]
async fn compute_pending_is_idempotent() {
    let db = setup().await;
    let admin = seed_admin(&db.pool).await;
    let hotel_id = seed_hotel(&db.pool, &admin).await;

    let stay = guest_stay::create(&db.pool, checkin_today(&hotel_id, 750.0, Some(200.0)))
        .await
        .unwrap();
    ledger::record_entry(&db.pool, TZ, &stay.id, &expense(ExpenseType::Food, 120.0))
        .await
        .unwrap();

    let first = ledger::compute_pending(&db.pool, TZ, &stay.id, today(TZ))
        .await
        .unwrap();
    let second = ledger::compute_pending(&db.pool, TZ, &stay.id, today(TZ))
        .await
        .unwrap();
    assert_eq!(first.pending, second.pending);
    assert_eq!(first.accrued, second.accrued);
    assert_eq!(first.food, second.food);
    assert_eq!(first.payments, second.payments);
}

#[tokio::test]
async fn unknown_booking_is_not_found() {
    let db = setup().await;
    let err = ledger::compute_pending(&db.pool, TZ, "missing-id", today(TZ))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

// ========================================================================
// Same-day merge
// ========================================================================

#[tokio::test]
async fn same_day_same_type_payments_merge_into_one_row() {
    let db = setup().await;
    let admin = seed_admin(&db.pool).await;
    let hotel_id = seed_hotel(&db.pool, &admin).await;
    let stay = guest_stay::create(&db.pool, checkin_today(&hotel_id, 1000.0, None))
        .await
        .unwrap();

    ledger::record_entry(&db.pool, TZ, &stay.id, &payment(PaymentType::Partial, 300.0))
        .await
        .unwrap();
    ledger::record_entry(&db.pool, TZ, &stay.id, &payment(PaymentType::Partial, 200.0))
        .await
        .unwrap();

    let rows: Vec<(String, f64)> = sqlx::query_as(
        "SELECT id, amount FROM guest_transaction WHERE booking_id = ? AND payment_type = 'partial'",
    )
    .bind(&stay.id)
    .fetch_all(&db.pool)
    .await
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].1, 500.0);

    // A different payment type the same day gets its own row
    ledger::record_entry(&db.pool, TZ, &stay.id, &payment(PaymentType::Final, 100.0))
        .await
        .unwrap();
    let total_rows: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM guest_transaction WHERE booking_id = ?")
            .bind(&stay.id)
            .fetch_one(&db.pool)
            .await
            .unwrap();
    assert_eq!(total_rows, 2);
}

#[tokio::test]
async fn payments_on_different_days_get_separate_rows() {
    let db = setup().await;
    let admin = seed_admin(&db.pool).await;
    let hotel_id = seed_hotel(&db.pool, &admin).await;
    let stay = guest_stay::create(&db.pool, checkin_today(&hotel_id, 1000.0, None))
        .await
        .unwrap();

    ledger::record_entry(&db.pool, TZ, &stay.id, &payment(PaymentType::Partial, 300.0))
        .await
        .unwrap();

    // Age the first row by one day so it falls outside today's merge window
    let day_ms: i64 = 24 * 60 * 60 * 1000;
    sqlx::query(
        "UPDATE guest_transaction SET created_at = created_at - ? WHERE booking_id = ?",
    )
    .bind(day_ms)
    .bind(&stay.id)
    .execute(&db.pool)
    .await
    .unwrap();

    ledger::record_entry(&db.pool, TZ, &stay.id, &payment(PaymentType::Partial, 200.0))
        .await
        .unwrap();

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM guest_transaction WHERE booking_id = ? AND payment_type = 'partial'",
    )
    .bind(&stay.id)
    .fetch_one(&db.pool)
    .await
    .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn same_day_food_expenses_merge_by_summing() {
    let db = setup().await;
    let admin = seed_admin(&db.pool).await;
    let hotel_id = seed_hotel(&db.pool, &admin).await;
    let stay = guest_stay::create(&db.pool, checkin_today(&hotel_id, 1000.0, None))
        .await
        .unwrap();

    ledger::record_entry(&db.pool, TZ, &stay.id, &expense(ExpenseType::Food, 80.0))
        .await
        .unwrap();
    ledger::record_entry(&db.pool, TZ, &stay.id, &expense(ExpenseType::Food, 45.0))
        .await
        .unwrap();

    let rows: Vec<(String, f64)> = sqlx::query_as(
        "SELECT id, amount FROM guest_expense WHERE booking_id = ? AND expense_type = 'food'",
    )
    .bind(&stay.id)
    .fetch_all(&db.pool)
    .await
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].1, 125.0);
}

#[tokio::test]
async fn payment_with_unknown_mode_is_rejected_naming_the_entity() {
    let db = setup().await;
    let admin = seed_admin(&db.pool).await;
    let hotel_id = seed_hotel(&db.pool, &admin).await;
    let stay = guest_stay::create(&db.pool, checkin_today(&hotel_id, 1000.0, None))
        .await
        .unwrap();

    let req = LedgerEntryRequest {
        payment: Some(PaymentInput {
            payment_type: PaymentType::Partial,
            payment_mode_id: Some("no-such-mode".into()),
            amount: 100.0,
            payment_date: None,
        }),
        expense: None,
    };
    let err = ledger::record_entry(&db.pool, TZ, &stay.id, &req)
        .await
        .unwrap_err();
    match err {
        RepoError::NotFound(msg) => assert!(msg.contains("Payment mode")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

// ========================================================================
// Food sub-ledger
// ========================================================================

#[tokio::test]
async fn food_order_prices_dal_scenario() {
    let db = setup().await;
    let admin = seed_admin(&db.pool).await;
    let hotel_id = seed_hotel(&db.pool, &admin).await;
    let stay = guest_stay::create(&db.pool, checkin_today(&hotel_id, 1000.0, None))
        .await
        .unwrap();

    let dal = menu::create(
        &db.pool,
        &admin,
        MenuCreate {
            name: "Dal".into(),
            half_plate_price: Some(50.0),
            full_plate_price: 90.0,
        },
    )
    .await
    .unwrap();

    let lines = vec![FoodLineInput {
        menu_id: dal.id.clone(),
        portion_type: PortionType::Half,
        quantity: 2,
    }];
    let menus = menu::find_by_ids(&db.pool, &[dal.id.clone()]).await.unwrap();
    let (priced, grand_total) = price_lines(&menus, &lines).unwrap();

    let date = today(TZ).format("%Y-%m-%d").to_string();
    let view = food_order::add_food_expense(&db.pool, &stay.id, &priced, grand_total, &date)
        .await
        .unwrap();

    assert_eq!(view.grand_total, "100.00");
    assert_eq!(view.orders.len(), 1);
    assert_eq!(view.orders[0].unit_price, "50.00");
    assert_eq!(view.orders[0].total_price, "100.00");

    let amount: f64 = sqlx::query_scalar(
        "SELECT amount FROM guest_expense WHERE booking_id = ? AND expense_type = 'food'",
    )
    .bind(&stay.id)
    .fetch_one(&db.pool)
    .await
    .unwrap();
    assert_eq!(amount, 100.0);
}

#[tokio::test]
async fn replace_food_expense_swaps_the_line_set() {
    let db = setup().await;
    let admin = seed_admin(&db.pool).await;
    let hotel_id = seed_hotel(&db.pool, &admin).await;
    let stay = guest_stay::create(&db.pool, checkin_today(&hotel_id, 1000.0, None))
        .await
        .unwrap();

    let dal = menu::create(
        &db.pool,
        &admin,
        MenuCreate {
            name: "Dal".into(),
            half_plate_price: Some(50.0),
            full_plate_price: 90.0,
        },
    )
    .await
    .unwrap();
    let rice = menu::create(
        &db.pool,
        &admin,
        MenuCreate {
            name: "Rice".into(),
            half_plate_price: None,
            full_plate_price: 60.0,
        },
    )
    .await
    .unwrap();

    let date = today(TZ).format("%Y-%m-%d").to_string();
    let menus = menu::find_by_ids(&db.pool, &[dal.id.clone(), rice.id.clone()])
        .await
        .unwrap();

    let (priced, total) = price_lines(
        &menus,
        &[FoodLineInput {
            menu_id: dal.id.clone(),
            portion_type: PortionType::Half,
            quantity: 2,
        }],
    )
    .unwrap();
    let view = food_order::add_food_expense(&db.pool, &stay.id, &priced, total, &date)
        .await
        .unwrap();
    let expense_id = view.orders[0].expense_id.clone();

    // Replace the dal lines with a single full rice plate
    let (new_priced, new_total) = price_lines(
        &menus,
        &[FoodLineInput {
            menu_id: rice.id.clone(),
            portion_type: PortionType::Full,
            quantity: 1,
        }],
    )
    .unwrap();
    let replaced =
        food_order::replace_food_expense(&db.pool, TZ, &expense_id, &new_priced, new_total)
            .await
            .unwrap();
    assert_eq!(replaced.grand_total, "60.00");
    assert_eq!(replaced.orders.len(), 1);
    assert_eq!(replaced.orders[0].name, "Rice");

    // Read back: exactly the new line set, old lines gone
    let start = pms_server::utils::time::day_start_millis(today(TZ), TZ);
    let end = pms_server::utils::time::day_end_millis(today(TZ), TZ);
    let listed = food_order::find_for_date(&db.pool, &stay.id, &date, start, end)
        .await
        .unwrap();
    assert_eq!(listed.orders.len(), 1);
    assert_eq!(listed.orders[0].name, "Rice");
    assert_eq!(listed.grand_total, "60.00");

    let line_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM guest_food_order WHERE guest_expense_id = ?")
            .bind(&expense_id)
            .fetch_one(&db.pool)
            .await
            .unwrap();
    assert_eq!(line_count, 1);
}

#[tokio::test]
async fn replace_rejects_non_food_expense() {
    let db = setup().await;
    let admin = seed_admin(&db.pool).await;
    let hotel_id = seed_hotel(&db.pool, &admin).await;
    let stay = guest_stay::create(&db.pool, checkin_today(&hotel_id, 1000.0, None))
        .await
        .unwrap();

    ledger::record_entry(&db.pool, TZ, &stay.id, &expense(ExpenseType::Laundry, 40.0))
        .await
        .unwrap();
    let laundry_id: String =
        sqlx::query_scalar("SELECT id FROM guest_expense WHERE booking_id = ?")
            .bind(&stay.id)
            .fetch_one(&db.pool)
            .await
            .unwrap();

    let err = food_order::replace_food_expense(&db.pool, TZ, &laundry_id, &[], rust_decimal::Decimal::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

// ========================================================================
// Access control
// ========================================================================

fn manager_user(id: &str) -> CurrentUser {
    CurrentUser {
        id: id.to_string(),
        username: "asha".into(),
        display_name: "Asha Verma".into(),
        role: UserRole::Manager,
    }
}

#[tokio::test]
async fn manager_access_follows_assignment_status_without_duplicate_rows() {
    let db = setup().await;
    let admin = seed_admin(&db.pool).await;
    let hotel_id = seed_hotel(&db.pool, &admin).await;

    let manager = user::create(
        &db.pool,
        UserCreate {
            username: "asha".into(),
            display_name: "Asha Verma".into(),
            password: "manager-pass-123".into(),
            role: UserRole::Manager,
        },
    )
    .await
    .unwrap();
    let caller = manager_user(&manager.id);

    // No assignment yet: denied
    assert!(access::authorize(&db.pool, &caller, &hotel_id).await.is_err());

    // Assigned: allowed
    assignment::assign(&db.pool, &hotel_id, &manager.id).await.unwrap();
    assert!(access::authorize(&db.pool, &caller, &hotel_id).await.is_ok());

    // Revoked (status flip): denied again
    assignment::revoke(&db.pool, &hotel_id, &manager.id).await.unwrap();
    assert!(access::authorize(&db.pool, &caller, &hotel_id).await.is_err());

    // Reactivated: allowed, and still exactly one assignment row
    assignment::assign(&db.pool, &hotel_id, &manager.id).await.unwrap();
    assert!(access::authorize(&db.pool, &caller, &hotel_id).await.is_ok());

    let row_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM hotel_assignment WHERE hotel_id = ? AND manager_id = ?",
    )
    .bind(&hotel_id)
    .bind(&manager.id)
    .fetch_one(&db.pool)
    .await
    .unwrap();
    assert_eq!(row_count, 1);
}

// ========================================================================
// Hotel deletion RESTRICT
// ========================================================================

#[tokio::test]
async fn deleting_a_hotel_with_stays_fails() {
    let db = setup().await;
    let admin = seed_admin(&db.pool).await;
    let hotel_id = seed_hotel(&db.pool, &admin).await;
    let stay = guest_stay::create(&db.pool, checkin_today(&hotel_id, 1000.0, None))
        .await
        .unwrap();

    let err = hotel::delete(&db.pool, &hotel_id).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    // Guest history intact
    assert!(guest_stay::find_by_id(&db.pool, &stay.id).await.unwrap().is_some());

    // Once the stay is removed, deletion succeeds
    guest_stay::delete(&db.pool, &stay.id).await.unwrap();
    assert!(hotel::delete(&db.pool, &hotel_id).await.unwrap());
}

// ========================================================================
// Hotel-day rollup
// ========================================================================

#[tokio::test]
async fn day_report_totals_cover_the_whole_set_despite_pagination() {
    let db = setup().await;
    let admin = seed_admin(&db.pool).await;
    let hotel_id = seed_hotel(&db.pool, &admin).await;

    // Three resident guests at 1000/night, one with a 500 advance
    guest_stay::create(&db.pool, checkin_today(&hotel_id, 1000.0, None))
        .await
        .unwrap();
    guest_stay::create(&db.pool, checkin_today(&hotel_id, 1000.0, None))
        .await
        .unwrap();
    guest_stay::create(&db.pool, checkin_today(&hotel_id, 1000.0, Some(500.0)))
        .await
        .unwrap();

    let report = pms_server::db::repository::rollup::day_report(
        &db.pool,
        TZ,
        &hotel_id,
        today(TZ),
        1,
        2,
    )
    .await
    .unwrap();

    // Page holds 2 of 3 records, totals cover all 3
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.pagination.total, 3);
    assert_eq!(report.pagination.total_pages, 2);
    assert_eq!(report.today_total_sales, "3000.00");
    assert_eq!(report.total_pending, "2500.00");
}

#[tokio::test]
async fn day_report_excludes_guests_checked_out_before_the_date() {
    let db = setup().await;
    let admin = seed_admin(&db.pool).await;
    let hotel_id = seed_hotel(&db.pool, &admin).await;

    let stay = guest_stay::create(&db.pool, checkin_today(&hotel_id, 1000.0, None))
        .await
        .unwrap();

    // Backdate the stay and check the guest out yesterday
    let yesterday = (today(TZ) - chrono::Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();
    sqlx::query("UPDATE guest_stay SET checkin_date = ?, checkout_date = ?, checkout_time = '10:00' WHERE id = ?")
        .bind(&yesterday)
        .bind(&yesterday)
        .bind(&stay.id)
        .execute(&db.pool)
        .await
        .unwrap();

    let report = pms_server::db::repository::rollup::day_report(
        &db.pool,
        TZ,
        &hotel_id,
        today(TZ),
        1,
        10,
    )
    .await
    .unwrap();
    assert!(report.records.is_empty());
    assert_eq!(report.today_total_sales, "0.00");
}
