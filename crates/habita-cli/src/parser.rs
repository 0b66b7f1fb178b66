use anyhow::{anyhow, Result};
use chrono::{Days, NaiveDate, NaiveTime};

/// Parses a date argument: `today`, `tomorrow`, or `YYYY-MM-DD`.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    match input.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "tomorrow" => today
            .checked_add_days(Days::new(1))
            .ok_or_else(|| anyhow!("Date out of range")),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .map_err(|_| anyhow!("Invalid date '{}'. Use YYYY-MM-DD, today or tomorrow", input)),
    }
}

/// Parses an `HH:MM` wall-clock time.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| anyhow!("Invalid time '{}'. Use HH:MM", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_keywords_relative_to_today() {
        let today = date(2024, 6, 10);
        assert_eq!(parse_date("today", today).unwrap(), today);
        assert_eq!(parse_date("Tomorrow", today).unwrap(), date(2024, 6, 11));
    }

    #[test]
    fn parses_iso_dates() {
        let today = date(2024, 6, 10);
        assert_eq!(parse_date("2024-12-31", today).unwrap(), date(2024, 12, 31));
        assert!(parse_date("31/12/2024", today).is_err());
        assert!(parse_date("someday", today).is_err());
    }

    #[test]
    fn parses_times() {
        assert_eq!(
            parse_time("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert!(parse_time("9:70").is_err());
        assert!(parse_time("noon").is_err());
    }
}
