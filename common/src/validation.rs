// Input validation for event creation

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::errors::ValidationError;
use crate::models::{NewEvent, MAX_HOUR, MIN_HOUR};

/// An event that passed validation and is ready to be persisted.
///
/// The name is trimmed and the dates are distinct and ascending. Fields are
/// private so repositories can only ever receive validated input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEvent {
    name: String,
    start_min: i32,
    end_min: i32,
    dates: Vec<NaiveDate>,
}

impl ValidEvent {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_min(&self) -> i32 {
        self.start_min
    }

    pub fn end_min(&self) -> i32 {
        self.end_min
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }
}

fn hour_in_range(hour: i32) -> bool {
    (MIN_HOUR..=MAX_HOUR).contains(&hour)
}

/// Validate and normalize a create request.
///
/// Every field problem is collected before failing. A request whose only
/// problem is an inverted window gets the dedicated
/// [`ValidationError::InvertedTimeWindow`].
pub fn validate_event(input: NewEvent) -> Result<ValidEvent, ValidationError> {
    let mut problems = BTreeMap::new();

    let name = input.name.trim().to_string();
    if name.is_empty() {
        problems.insert("name".to_string(), "cannot be empty".to_string());
    }

    let out_of_range = format!("must be between {} and {}", MIN_HOUR, MAX_HOUR);
    let start_ok = hour_in_range(input.start_min);
    let end_ok = hour_in_range(input.end_min);
    if !start_ok {
        problems.insert("startMin".to_string(), out_of_range.clone());
    }
    if !end_ok {
        problems.insert("endMin".to_string(), out_of_range);
    }
    let inverted = start_ok && end_ok && input.start_min >= input.end_min;

    let mut dates = input.dates;
    dates.sort_unstable();
    dates.dedup();
    if dates.is_empty() {
        problems.insert(
            "dates".to_string(),
            "at least one date is required".to_string(),
        );
    }

    if inverted {
        if problems.is_empty() {
            return Err(ValidationError::InvertedTimeWindow {
                start_min: input.start_min,
                end_min: input.end_min,
            });
        }
        problems.insert(
            "endMin".to_string(),
            "Event cannot end before it starts".to_string(),
        );
    }

    if !problems.is_empty() {
        return Err(ValidationError::Fields(problems));
    }

    Ok(ValidEvent {
        name,
        start_min: input.start_min,
        end_min: input.end_min,
        dates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn team_sync() -> NewEvent {
        NewEvent {
            name: "Team Sync".to_string(),
            start_min: 9,
            end_min: 17,
            dates: vec![date(2024, 6, 1), date(2024, 6, 2)],
        }
    }

    #[test]
    fn test_valid_event_passes() {
        let valid = validate_event(team_sync()).unwrap();
        assert_eq!(valid.name(), "Team Sync");
        assert_eq!(valid.start_min(), 9);
        assert_eq!(valid.end_min(), 17);
        assert_eq!(valid.dates(), &[date(2024, 6, 1), date(2024, 6, 2)]);
    }

    #[test]
    fn test_name_is_trimmed() {
        let mut input = team_sync();
        input.name = "  Team Sync \n".to_string();
        assert_eq!(validate_event(input).unwrap().name(), "Team Sync");
    }

    #[test]
    fn test_short_name_is_accepted() {
        // The minimum length is a form rule only
        let mut input = team_sync();
        input.name = "A".to_string();
        assert!(validate_event(input).is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut input = team_sync();
        input.name = "   ".to_string();
        let err = validate_event(input).unwrap_err();
        assert!(err.details().contains_key("name"));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let mut input = team_sync();
        input.start_min = 17;
        input.end_min = 9;
        assert_eq!(
            validate_event(input).unwrap_err(),
            ValidationError::InvertedTimeWindow {
                start_min: 17,
                end_min: 9
            }
        );
    }

    #[test]
    fn test_empty_window_rejected() {
        let mut input = team_sync();
        input.start_min = 12;
        input.end_min = 12;
        assert!(matches!(
            validate_event(input),
            Err(ValidationError::InvertedTimeWindow { .. })
        ));
    }

    #[test]
    fn test_full_day_window_accepted() {
        let mut input = team_sync();
        input.start_min = 0;
        input.end_min = 24;
        assert!(validate_event(input).is_ok());
    }

    #[test]
    fn test_out_of_range_hours_rejected() {
        let mut input = team_sync();
        input.start_min = -1;
        input.end_min = 25;
        let details = validate_event(input).unwrap_err().details();
        assert!(details.contains_key("startMin"));
        assert!(details.contains_key("endMin"));
    }

    #[test]
    fn test_missing_dates_rejected() {
        let mut input = team_sync();
        input.dates.clear();
        let details = validate_event(input).unwrap_err().details();
        assert!(details.contains_key("dates"));
    }

    #[test]
    fn test_all_problems_reported_together() {
        let input = NewEvent {
            name: String::new(),
            start_min: 17,
            end_min: 9,
            dates: Vec::new(),
        };
        let details = validate_event(input).unwrap_err().details();
        assert_eq!(details.len(), 3);
        assert_eq!(details["endMin"], "Event cannot end before it starts");
    }

    #[test]
    fn test_duplicate_dates_collapse_and_sort() {
        let mut input = team_sync();
        input.dates = vec![date(2024, 6, 2), date(2024, 6, 1), date(2024, 6, 2)];
        let valid = validate_event(input).unwrap();
        assert_eq!(valid.dates(), &[date(2024, 6, 1), date(2024, 6, 2)]);
    }
}
