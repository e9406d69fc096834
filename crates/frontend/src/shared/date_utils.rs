/// Utilities for date and time formatting
///
/// Dates are shown day-first (`15/03/2024`), as used in Mexico.
use chrono::{DateTime, NaiveDate, Utc};

pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%d/%m/%Y %H:%M").to_string()
}

pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%d/%m/%Y").to_string()
}

/// Parses the `YYYY-MM-DD` value of an `<input type="date">`.
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Today in the browser's local time zone.
pub fn today_local() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_else(|| Utc::now().date_naive())
}

/// Browser offset in minutes east of UTC (`-360` in Mexico City).
/// `getTimezoneOffset` counts the other way round.
pub fn utc_offset_minutes() -> i32 {
    -(js_sys::Date::new_0().get_timezone_offset() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(format_datetime(&dt), "15/03/2024 14:02");
        assert_eq!(format_date(&dt), "15/03/2024");
    }

    #[test]
    fn test_parse_input_date() {
        assert_eq!(
            parse_input_date("2024-05-31"),
            NaiveDate::from_ymd_opt(2024, 5, 31)
        );
        assert_eq!(parse_input_date(""), None);
        assert_eq!(parse_input_date("31/05/2024"), None);
    }
}
