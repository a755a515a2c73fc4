// Shared date and numeric helpers

use anyhow::{anyhow, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|err| anyhow!(err))
}

/// Fixed reference timezone, expressed as whole hours east of UTC.
pub fn reference_offset(offset_hours: i32) -> FixedOffset {
    FixedOffset::east_opt(offset_hours.clamp(-23, 23) * 3600).unwrap_or_else(|| Utc.fix())
}

/// Current instant in the reference timezone.
pub fn reference_now(offset_hours: i32) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&reference_offset(offset_hours))
}

/// Calendar day of `now`, formatted the way events store it.
pub fn today_string(now: &DateTime<FixedOffset>) -> String {
    now.format(DATE_FORMAT).to_string()
}

/// Volumes are reported to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentages render to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_date_accepts_dashed_format() {
        let date = parse_date("2026-03-07").expect("parse");
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 3, 7).unwrap());
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("07/03/2026").is_err());
        assert!(parse_date("2026-3-7x").is_err());
    }

    #[test]
    fn reference_offset_is_west_of_utc_for_negative_hours() {
        let offset = reference_offset(-3);
        assert_eq!(offset.local_minus_utc(), -3 * 3600);
    }

    #[test]
    fn today_string_uses_the_offset_day() {
        // 01:30 UTC is still the previous day at UTC-3.
        let utc = Utc.with_ymd_and_hms(2026, 3, 8, 1, 30, 0).unwrap();
        let local = utc.with_timezone(&reference_offset(-3));
        assert_eq!(today_string(&local), "2026-03-07");
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round2(1.329_999_9), 1.33);
        assert_eq!(round1(49.96), 50.0);
    }
}
