//! Time helpers — business-timezone conversion
//!
//! All date→timestamp conversion happens at the API/repository boundary;
//! repositories only receive `i64` Unix millis. The system runs in one
//! configured business timezone.

use chrono::{NaiveDate, NaiveTime, Timelike};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Parse a calendar date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {date}")))
}

/// Parse a clock time string (HH:MM)
pub fn parse_time(time: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AppError::validation(format!("Invalid time format: {time}")))
}

/// Current calendar date in the business timezone
pub fn today(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

/// Date + hour/min/sec → Unix millis in the business timezone.
///
/// DST gap fallback: if the local time does not exist, fall back to UTC.
pub fn date_hms_to_millis(date: NaiveDate, hour: u32, min: u32, sec: u32, tz: Tz) -> i64 {
    let naive = date.and_hms_opt(hour, min, sec).unwrap();
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Start of day (00:00:00) → Unix millis in the business timezone
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_hms_to_millis(date, 0, 0, 0, tz)
}

/// End of day → next day 00:00:00 Unix millis in the business timezone.
///
/// Callers use `< end` (exclusive) semantics.
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    date_hms_to_millis(next_day, 0, 0, 0, tz)
}

/// Unix millis → calendar date in the business timezone
pub fn millis_to_date(millis: i64, tz: Tz) -> NaiveDate {
    chrono::DateTime::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&tz)
        .date_naive()
}

/// Date + time strings → Unix millis in the business timezone.
///
/// Used to order check-in against check-out.
pub fn datetime_millis(date: &str, time: &str, tz: Tz) -> AppResult<i64> {
    let d = parse_date(date)?;
    let t = parse_time(time)?;
    Ok(date_hms_to_millis(d, t.hour(), t.minute(), 0, tz))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TZ: Tz = chrono_tz::Asia::Kolkata;

    #[test]
    fn day_window_is_exclusive_at_the_end() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let start = day_start_millis(date, TZ);
        let end = day_end_millis(date, TZ);
        assert_eq!(end - start, 24 * 60 * 60 * 1000);
    }

    #[test]
    fn datetime_ordering() {
        let checkin = datetime_millis("2024-01-01", "14:00", TZ).unwrap();
        let checkout = datetime_millis("2024-01-02", "11:00", TZ).unwrap();
        assert!(checkout > checkin);
    }

    #[test]
    fn rejects_malformed_date_and_time() {
        assert!(parse_date("01-01-2024").is_err());
        assert!(parse_time("9am").is_err());
    }
}
