// Shared utilities for page handlers

use axum::http::HeaderMap;
use chrono::{Datelike, Duration, NaiveDate};
use common::display::{format_month_day, hour_label, month_abbrev};
use serde::Serialize;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use tera::Context;

use crate::handlers::ErrorResponse;
use crate::templates::TEMPLATES;

/// Shown for every failure on the event view, whatever its cause
pub const GENERIC_FAILURE: &str =
    "Something went wrong. Please try again and make sure you have the correct link.";

/// One `<option>` of an hour select
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourOption {
    pub value: i32,
    pub label: String,
    pub selected: bool,
}

/// One selectable calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub value: String,
    pub label: String,
    pub weekday: String,
    pub checked: bool,
}

/// Calendar days grouped under their month heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarMonth {
    pub title: String,
    pub days: Vec<CalendarDay>,
}

/// Options for an hour select over `hours`
pub fn hour_options(hours: RangeInclusive<i32>, selected: Option<i32>) -> Vec<HourOption> {
    hours
        .map(|hour| HourOption {
            value: hour,
            label: hour_label(hour),
            selected: selected == Some(hour),
        })
        .collect()
}

/// `days` consecutive days starting at `from`, grouped by month
pub fn calendar_months(
    from: NaiveDate,
    days: u32,
    checked: &BTreeSet<NaiveDate>,
) -> Vec<CalendarMonth> {
    let mut months: Vec<CalendarMonth> = Vec::new();

    for offset in 0..i64::from(days) {
        let date = from + Duration::days(offset);
        let title = format!(
            "{} {}",
            month_abbrev(date.month0()).unwrap_or_default(),
            date.year()
        );
        let day = CalendarDay {
            value: date.format("%Y-%m-%d").to_string(),
            label: format_month_day(date),
            weekday: date.format("%a").to_string(),
            checked: checked.contains(&date),
        };

        match months.last_mut() {
            Some(month) if month.title == title => month.days.push(day),
            _ => months.push(CalendarMonth {
                title,
                days: vec![day],
            }),
        }
    }

    months
}

/// Check if request is HTMX and setup context accordingly.
/// Returns the template to render: the fragment for HTMX, the full page otherwise.
pub fn setup_htmx_context(
    context: &mut Context,
    headers: &HeaderMap,
    content_template: &'static str,
    full_template: &'static str,
) -> &'static str {
    let is_htmx = headers.get("HX-Request").is_some();
    context.insert("is_htmx", &is_htmx);

    if is_htmx {
        content_template
    } else {
        full_template
    }
}

/// Render a template, mapping failures to an ErrorResponse
pub fn render(template_name: &str, context: &Context) -> Result<String, ErrorResponse> {
    TEMPLATES
        .render(template_name, context)
        .map_err(|e| template_error(template_name, e))
}

/// Convert template error to ErrorResponse
pub fn template_error(template_name: &str, e: impl std::fmt::Display) -> ErrorResponse {
    tracing::error!(error = %e, template = template_name, "Template rendering failed");
    ErrorResponse::new(
        "template_error",
        format!("Failed to render '{}'", template_name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_hour_options_mark_selection() {
        let options = hour_options(0..=23, Some(9));
        assert_eq!(options.len(), 24);
        assert_eq!(options[0].label, "12:00 AM");
        assert!(options[9].selected);
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
    }

    #[test]
    fn test_end_hour_options_include_midnight() {
        let options = hour_options(1..=24, None);
        let last = options.last().unwrap();
        assert_eq!(last.value, 24);
        assert_eq!(last.label, "12:00 AM");
    }

    #[test]
    fn test_calendar_groups_by_month() {
        let checked = BTreeSet::from([date(2024, 7, 1)]);
        let months = calendar_months(date(2024, 6, 29), 4, &checked);

        assert_eq!(months.len(), 2);
        assert_eq!(months[0].title, "June 2024");
        assert_eq!(months[0].days.len(), 2);
        assert_eq!(months[1].title, "July 2024");
        assert_eq!(months[1].days[0].label, "July 1");
        assert!(months[1].days[0].checked);
        assert!(!months[1].days[1].checked);
    }

    #[test]
    fn test_htmx_detection() {
        let mut context = Context::new();
        let mut headers = HeaderMap::new();
        assert_eq!(
            setup_htmx_context(&mut context, &headers, "fragment.html", "page.html"),
            "page.html"
        );

        headers.insert("HX-Request", "true".parse().unwrap());
        assert_eq!(
            setup_htmx_context(&mut context, &headers, "fragment.html", "page.html"),
            "fragment.html"
        );
    }
}
