//! Pending-balance derivation
//!
//! The single implementation of the guest-ledger formula:
//!
//! ```text
//! accrued  = rent × (days_between(checkin, as_of) + 1)
//! pending  = max(0, accrued + food_expenses − qualifying_payments)
//! ```
//!
//! Both endpoints of the window count — a guest staying zero extra
//! nights is still charged one night. Every path that reports a balance
//! (stay reads, stay lists, the hotel-day rollup) goes through these two
//! functions; the formula is never inlined elsewhere.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::LedgerError;
use super::money::round_money;

/// Room charge accrued from check-in through `as_of`, both days inclusive.
///
/// `as_of` earlier than check-in is a caller bug, not a zero-night stay —
/// rejected rather than clamped.
pub fn accrued_bill(
    rent: Decimal,
    checkin: NaiveDate,
    as_of: NaiveDate,
) -> Result<Decimal, LedgerError> {
    if as_of < checkin {
        return Err(LedgerError::Validation(format!(
            "Target date {as_of} is before check-in date {checkin}"
        )));
    }
    let nights = (as_of - checkin).num_days() + 1;
    Ok(round_money(rent * Decimal::from(nights)))
}

/// Pending balance: accrued bill plus food charges minus payments,
/// clamped to zero. Overpayment never produces a refundable balance.
pub fn pending_balance(accrued: Decimal, food: Decimal, payments: Decimal) -> Decimal {
    round_money((accrued + food - payments).max(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn same_day_accrues_one_night() {
        let accrued = accrued_bill(Decimal::from(1000), date("2024-01-01"), date("2024-01-01"))
            .unwrap();
        assert_eq!(accrued, Decimal::from(1000));
    }

    #[test]
    fn window_is_inclusive_of_both_endpoints() {
        let accrued = accrued_bill(Decimal::from(1000), date("2024-01-01"), date("2024-01-03"))
            .unwrap();
        assert_eq!(accrued, Decimal::from(3000));
    }

    #[test]
    fn as_of_before_checkin_is_rejected() {
        let res = accrued_bill(Decimal::from(1000), date("2024-01-02"), date("2024-01-01"));
        assert!(res.is_err());
    }

    #[test]
    fn pending_matches_checkin_day_scenario() {
        // checkin 2024-01-01, rent 1000, one advance of 500 the same day:
        // pending = max(0, 1000 × 1 − 500) = 500
        let accrued = accrued_bill(Decimal::from(1000), date("2024-01-01"), date("2024-01-01"))
            .unwrap();
        let pending = pending_balance(accrued, Decimal::ZERO, Decimal::from(500));
        assert_eq!(pending, Decimal::from(500));
    }

    #[test]
    fn pending_includes_food_charges() {
        let accrued = accrued_bill(Decimal::from(1000), date("2024-01-01"), date("2024-01-02"))
            .unwrap();
        let pending = pending_balance(
            accrued,
            Decimal::from_f64(350.50).unwrap(),
            Decimal::from(1000),
        );
        assert_eq!(pending, Decimal::from_f64(1350.50).unwrap());
    }

    #[test]
    fn overpayment_clamps_to_zero() {
        let accrued = accrued_bill(Decimal::from(1000), date("2024-01-01"), date("2024-01-01"))
            .unwrap();
        let pending = pending_balance(accrued, Decimal::ZERO, Decimal::from(5000));
        assert_eq!(pending, Decimal::ZERO);
    }

    #[test]
    fn pending_is_deterministic() {
        let accrued = accrued_bill(Decimal::from(750), date("2024-03-10"), date("2024-03-12"))
            .unwrap();
        let a = pending_balance(accrued, Decimal::from(120), Decimal::from(900));
        let b = pending_balance(accrued, Decimal::from(120), Decimal::from(900));
        assert_eq!(a, b);
    }
}
