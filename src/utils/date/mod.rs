// Date utility functions
// Wall-clock handling for itinerary dates

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Formats tried in order once any zone suffix has been removed.
const WALL_CLOCK_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid wall-clock date-time '{input}'")]
pub struct DateParseError {
    pub input: String,
}

/// Parse an itinerary date-time as a naive wall-clock value.
///
/// Any trailing `Z` or `±HH:MM` offset is dropped without conversion, so
/// `2025-07-01T10:00:00Z` and `2025-07-01T10:00:00+02:00` both read as 10:00.
/// A bare date reads as midnight.
///
/// # Examples
/// ```
/// use roadtrip_planner::utils::date::parse_wall_clock;
///
/// let parsed = parse_wall_clock("2025-07-01T10:00:00.000Z").unwrap();
/// assert_eq!(parsed.format("%H:%M").to_string(), "10:00");
/// ```
pub fn parse_wall_clock(input: &str) -> Result<NaiveDateTime, DateParseError> {
    let trimmed = input.trim();
    let body = strip_zone_suffix(trimmed);

    for format in WALL_CLOCK_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(body, format) {
            return Ok(parsed);
        }
    }

    NaiveDate::parse_from_str(body, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| DateParseError {
            input: input.to_string(),
        })
}

/// Format a wall-clock value the way the backend stores it: the typed digits
/// followed by a literal `Z`.
pub fn format_wall_clock(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

fn strip_zone_suffix(value: &str) -> &str {
    if let Some(rest) = value.strip_suffix('Z').or_else(|| value.strip_suffix('z')) {
        return rest;
    }

    // Only look for a sign after the time separator; dates carry '-' too.
    let Some(time_index) = value.find(['T', ' ']) else {
        return value;
    };

    match value[time_index..].rfind(['+', '-']) {
        Some(sign_index) => &value[..time_index + sign_index],
        None => value,
    }
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Exclusive end of the day, i.e. midnight of the following date.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1)
}

/// Serde adapter for required wall-clock fields.
pub mod wall_clock {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_wall_clock(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_wall_clock(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional wall-clock fields. `null` and empty strings read
/// as `None`.
pub mod wall_clock_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&super::format_wall_clock(*value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => super::parse_wall_clock(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}
