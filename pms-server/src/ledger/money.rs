//! Money calculation utilities using rust_decimal for precision
//!
//! All ledger arithmetic is done in `Decimal`, then converted to `f64`
//! for storage and formatted as fixed 2-decimal strings at the API
//! boundary.

use rust_decimal::prelude::*;

use super::LedgerError;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed monetary amount per entry
const MAX_AMOUNT: f64 = 10_000_000.0;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field: &str) -> Result<(), LedgerError> {
    if !value.is_finite() {
        return Err(LedgerError::Validation(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

/// Validate an inbound monetary amount: finite, non-negative, bounded
pub fn validate_amount(value: f64, field: &str) -> Result<(), LedgerError> {
    require_finite(value, field)?;
    if value < 0.0 {
        return Err(LedgerError::Validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    if value > MAX_AMOUNT {
        return Err(LedgerError::Validation(format!(
            "{field} exceeds maximum allowed ({MAX_AMOUNT}), got {value}"
        )));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated via [`validate_amount`] at the
/// boundary. If NaN/Infinity somehow reaches here, logs an error and
/// returns ZERO to avoid silent data corruption in ledger calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal rounded to 2dp with bounded inputs is always
        // within f64 representable range
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Round a Decimal to the monetary scale
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a Decimal as a fixed 2-decimal string for the API boundary
pub fn money_string(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_roundtrip_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn accumulation_precision() {
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += to_decimal(0.01);
        }
        assert_eq!(to_f64(total), 10.0);
    }

    #[test]
    fn money_string_is_fixed_two_decimals() {
        assert_eq!(money_string(Decimal::from(100)), "100.00");
        assert_eq!(money_string(to_decimal(99.5)), "99.50");
        assert_eq!(money_string(to_decimal(0.005)), "0.01");
    }

    #[test]
    fn validate_amount_bounds() {
        assert!(validate_amount(0.0, "amount").is_ok());
        assert!(validate_amount(499.99, "amount").is_ok());
        assert!(validate_amount(-1.0, "amount").is_err());
        assert!(validate_amount(f64::NAN, "amount").is_err());
        assert!(validate_amount(f64::INFINITY, "amount").is_err());
        assert!(validate_amount(10_000_001.0, "amount").is_err());
    }
}
