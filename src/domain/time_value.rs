//! Loosely typed time input.
//!
//! Mirrors the inputs a browser date helper accepts: a ready-made instant,
//! an epoch number, or a string that is either all digits or a date.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Epoch values whose decimal form has this many characters are seconds.
const SECONDS_EPOCH_WIDTH: usize = 10;

/// Date layouts tried after `-` has been normalized to `/`.
const DATE_TIME_LAYOUTS: [&str; 3] = ["%Y/%m/%d %H:%M:%S", "%Y/%m/%d %H:%M", "%Y/%m/%dT%H:%M:%S"];
const DATE_LAYOUTS: [&str; 1] = ["%Y/%m/%d"];

/// A point in time as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeValue {
    /// An already constructed instant
    Instant(DateTime<Utc>),
    /// Epoch milliseconds, or seconds when exactly ten characters wide
    Epoch(i64),
    /// Digit-only epoch text or a date string
    Text(String),
}

impl TimeValue {
    /// Whether this value counts as "no time given".
    ///
    /// Zero and the empty string are treated as absent, so `Epoch(0)` never
    /// renders even though it is a valid instant. `Text("0")` is not absent.
    pub fn is_absent(&self) -> bool {
        match self {
            TimeValue::Instant(_) => false,
            TimeValue::Epoch(value) => *value == 0,
            TimeValue::Text(text) => text.is_empty(),
        }
    }

    /// Resolve to an instant displayed in `tz`.
    ///
    /// Returns `None` when the value does not describe a valid date. Date
    /// strings are read as wall-clock time in `tz`.
    pub fn resolve<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        match self {
            TimeValue::Instant(instant) => Some(instant.with_timezone(tz)),
            TimeValue::Epoch(value) => resolve_epoch(*value, tz),
            TimeValue::Text(text) if is_all_digits(text) => {
                text.parse::<i64>().ok().and_then(|value| resolve_epoch(value, tz))
            }
            TimeValue::Text(text) => resolve_date_text(text, tz),
        }
    }
}

fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn resolve_epoch<Tz: TimeZone>(value: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    let millis = if value.to_string().len() == SECONDS_EPOCH_WIDTH {
        value.checked_mul(1000)?
    } else {
        value
    };
    tz.timestamp_millis_opt(millis).single()
}

fn resolve_date_text<Tz: TimeZone>(text: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let normalized = text.trim().replace('-', "/");

    let naive = DATE_TIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(&normalized, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(&normalized, layout).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        });

    match naive {
        Some(naive) => tz.from_local_datetime(&naive).earliest(),
        // Offsets carry their own zone and would not survive the `/` rewrite.
        None => DateTime::parse_from_rfc3339(text.trim())
            .ok()
            .map(|instant| instant.with_timezone(tz)),
    }
}

impl From<i64> for TimeValue {
    fn from(value: i64) -> Self {
        TimeValue::Epoch(value)
    }
}

impl From<&str> for TimeValue {
    fn from(value: &str) -> Self {
        TimeValue::Text(value.to_string())
    }
}

impl From<String> for TimeValue {
    fn from(value: String) -> Self {
        TimeValue::Text(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TimeValue {
    fn from(value: DateTime<Tz>) -> Self {
        TimeValue::Instant(value.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_absent_values() {
        assert!(TimeValue::Epoch(0).is_absent());
        assert!(TimeValue::Text(String::new()).is_absent());
        assert!(!TimeValue::Text("0".to_string()).is_absent());
        assert!(!TimeValue::from(Utc::now()).is_absent());
    }

    #[test]
    fn test_ten_digit_epoch_is_seconds() {
        let resolved = TimeValue::Epoch(1_700_000_000).resolve(&Utc).unwrap();
        assert_eq!(resolved.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_thirteen_digit_epoch_is_millis() {
        let resolved = TimeValue::Epoch(1_700_000_000_123).resolve(&Utc).unwrap();
        assert_eq!(resolved.timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn test_negative_ten_char_epoch_is_seconds() {
        // "-123456789" is ten characters wide
        let resolved = TimeValue::Epoch(-123_456_789).resolve(&Utc).unwrap();
        assert_eq!(resolved.timestamp(), -123_456_789);
    }

    #[test]
    fn test_digit_text_is_epoch() {
        let resolved = TimeValue::from("1700000000").resolve(&Utc).unwrap();
        assert_eq!(resolved.timestamp(), 1_700_000_000);

        let epoch = TimeValue::from("0").resolve(&Utc).unwrap();
        assert_eq!(epoch.timestamp(), 0);
    }

    #[test]
    fn test_dash_dates_are_normalized() {
        let resolved = TimeValue::from("2023-01-05 10:20:30").resolve(&Utc).unwrap();
        assert_eq!(
            (resolved.year(), resolved.month(), resolved.day()),
            (2023, 1, 5)
        );
        assert_eq!(
            (resolved.hour(), resolved.minute(), resolved.second()),
            (10, 20, 30)
        );

        let date_only = TimeValue::from("2023-1-5").resolve(&Utc).unwrap();
        assert_eq!(date_only.day(), 5);
        assert_eq!(date_only.hour(), 0);
    }

    #[test]
    fn test_rfc3339_fallback() {
        let resolved = TimeValue::from("2023-01-05T10:20:30+08:00")
            .resolve(&Utc)
            .unwrap();
        assert_eq!(resolved.hour(), 2);
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(TimeValue::from("not a date").resolve(&Utc).is_none());
        assert!(TimeValue::from("99999999999999999999").resolve(&Utc).is_none());
    }
}
