// Human-readable labels for dates and hours shown in the form and view

use chrono::{Datelike, NaiveDate};

use crate::models::MAX_HOUR;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "June", "July", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// Month abbreviation for a zero-based month index (0 = January)
pub fn month_abbrev(month0: u32) -> Option<&'static str> {
    MONTHS.get(month0 as usize).copied()
}

/// "Month Day", e.g. "June 1".
///
/// Dates carry no time-of-day, so no timezone can shift the rendered day.
pub fn format_month_day(date: NaiveDate) -> String {
    // month0() is always < 12
    let month = month_abbrev(date.month0()).unwrap_or_default();
    format!("{} {}", month, date.day())
}

/// Clock label for an hour bound, e.g. 9 → "9:00 AM", 24 → "12:00 AM"
pub fn hour_label(hour: i32) -> String {
    let hour = hour.rem_euclid(MAX_HOUR);
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    format!("{}:00 {}", display, meridiem)
}

/// "9:00 AM – 5:00 PM"
pub fn time_window_label(start_min: i32, end_min: i32) -> String {
    format!("{} – {}", hour_label(start_min), hour_label(end_min))
}
