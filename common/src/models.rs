use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lowest hour-of-day bound an event window may use
pub const MIN_HOUR: i32 = 0;
/// Highest hour-of-day bound; 24 means midnight at the end of the day
pub const MAX_HOUR: i32 = 24;

// ============================================================================
// Event Models
// ============================================================================

/// A scheduling poll: a named event with a time-of-day window and the
/// candidate dates participants can choose from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub start_min: i32,
    pub end_min: i32,
    /// Distinct calendar dates in ascending order
    pub dates: Vec<NaiveDate>,
}

/// Input for creating an event, as received from a caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub name: String,
    pub start_min: i32,
    pub end_min: i32,
    #[serde(deserialize_with = "deserialize_calendar_dates")]
    pub dates: Vec<NaiveDate>,
}

/// Response of a successful create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedEvent {
    pub id: String,
}

/// One row of the event/date join used when reading an event back
#[derive(Debug, Clone, FromRow)]
pub struct EventDateRow {
    pub id: Uuid,
    pub name: String,
    pub start_min: i32,
    pub end_min: i32,
    pub date: Option<NaiveDate>,
}

impl Event {
    /// Fold the rows of an event/date join into a single event.
    /// Returns `None` for an empty row set.
    pub fn from_rows(rows: Vec<EventDateRow>) -> Option<Self> {
        let mut rows = rows.into_iter();
        let first = rows.next()?;

        let mut dates: Vec<NaiveDate> = first.date.into_iter().collect();
        dates.extend(rows.filter_map(|row| row.date));
        dates.sort_unstable();
        dates.dedup();

        Some(Self {
            id: first.id,
            name: first.name,
            start_min: first.start_min,
            end_min: first.end_min,
            dates,
        })
    }
}

/// Parse a calendar date from either `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// A timestamp contributes the date as written in its own offset, so a
/// date picked as June 1 in any timezone stays June 1.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, String> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.date_naive())
        .map_err(|_| format!("'{}' is not a calendar date (expected YYYY-MM-DD)", input))
}

fn deserialize_calendar_dates<'de, D>(deserializer: D) -> Result<Vec<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    raw.iter()
        .map(|s| parse_calendar_date(s).map_err(serde::de::Error::custom))
        .collect()
}
