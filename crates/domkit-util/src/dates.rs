//! Date formatting and relative-time helpers

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("Invalid format pattern: {0:?}")]
    Pattern(String),
    #[error("Unrecognised date: {0:?}")]
    Unparsable(String),
}

/// Format `date` with a strftime pattern such as `"%d %b %Y"`
pub fn format_date(date: NaiveDate, pattern: &str) -> Result<String, DateError> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(DateError::Pattern(pattern.to_string()));
    }
    Ok(date.format_with_items(items.into_iter()).to_string())
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp (its UTC date is taken)
pub fn parse_date(input: &str) -> Result<NaiveDate, DateError> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| DateError::Unparsable(input.to_string()))
}

/// Whole days from `from` to `to`; negative when `to` is earlier
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Human phrase for `then` as seen from `now`: "just now", "3 minutes ago",
/// "in 2 days". Uses the largest whole unit.
pub fn relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = then - now;
    let future = delta > TimeDelta::zero();
    let delta = delta.abs();

    let (count, unit) = if delta.num_seconds() < 45 {
        return "just now".to_string();
    } else if delta.num_minutes() < 60 {
        (delta.num_minutes().max(1), "minute")
    } else if delta.num_hours() < 24 {
        (delta.num_hours(), "hour")
    } else if delta.num_days() < 30 {
        (delta.num_days(), "day")
    } else if delta.num_days() < 365 {
        (delta.num_days() / 30, "month")
    } else {
        (delta.num_days() / 365, "year")
    };

    let plural = if count == 1 { "" } else { "s" };
    if future {
        format!("in {count} {unit}{plural}")
    } else {
        format!("{count} {unit}{plural} ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(ymd(2024, 3, 9), "%d %b %Y").unwrap(), "09 Mar 2024");
        assert_eq!(format_date(ymd(2024, 3, 9), "%Y/%m/%d").unwrap(), "2024/03/09");
        assert!(matches!(format_date(ymd(2024, 3, 9), "%Q"), Err(DateError::Pattern(_))));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date(" 2024-02-29 "), Ok(ymd(2024, 2, 29)));
        assert_eq!(parse_date("2024-03-01T01:30:00+02:00"), Ok(ymd(2024, 2, 29)));
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(ymd(2024, 1, 1), ymd(2024, 3, 1)), 60);
        assert_eq!(days_between(ymd(2024, 3, 1), ymd(2024, 1, 1)), -60);
    }

    #[test]
    fn test_relative() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(relative(now - TimeDelta::seconds(10), now), "just now");
        assert_eq!(relative(now - TimeDelta::minutes(1), now), "1 minute ago");
        assert_eq!(relative(now - TimeDelta::hours(5), now), "5 hours ago");
        assert_eq!(relative(now + TimeDelta::days(2), now), "in 2 days");
        assert_eq!(relative(now - TimeDelta::days(400), now), "1 year ago");
    }
}
