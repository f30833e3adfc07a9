// Create form page and its submission handler

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use tera::Context;

use super::shared_utils::{calendar_months, hour_options, render, GENERIC_FAILURE};
use crate::handlers::ErrorResponse;
use crate::state::AppState;
use common::config::FormConfig;
use common::models::{parse_calendar_date, NewEvent, MAX_HOUR, MIN_HOUR};

/// Field name → message shown beside that field
pub type FormErrors = BTreeMap<&'static str, String>;

/// Raw form submission. Every field is kept as text so bad input comes
/// back as a form message instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start_min: String,
    #[serde(default)]
    pub end_min: String,
    #[serde(default)]
    pub dates: Vec<String>,
}

impl CreateEventForm {
    /// Apply the form rules and turn the submission into a create request.
    ///
    /// These are stricter than the service rules: the name needs
    /// `min_name_length` characters and no date may be before `today`.
    pub fn validate(
        &self,
        today: NaiveDate,
        min_name_length: usize,
    ) -> Result<NewEvent, FormErrors> {
        let mut errors = FormErrors::new();

        let name = self.name.trim();
        if name.chars().count() < min_name_length {
            errors.insert(
                "name",
                format!("Name must be at least {} characters.", min_name_length),
            );
        }

        let start_min = parse_hour(&self.start_min, MIN_HOUR..=MAX_HOUR - 1);
        if start_min.is_none() {
            errors.insert("startMin", "Select a start time.".to_string());
        }
        let end_min = parse_hour(&self.end_min, MIN_HOUR + 1..=MAX_HOUR);
        if end_min.is_none() {
            errors.insert("endMin", "Select an end time.".to_string());
        }
        if let (Some(start), Some(end)) = (start_min, end_min) {
            if end <= start {
                errors.insert(
                    "endMin",
                    "No Later Than must be after No Earlier Than.".to_string(),
                );
            }
        }

        let mut dates = Vec::with_capacity(self.dates.len());
        for raw in self.dates.iter().filter(|raw| !raw.trim().is_empty()) {
            match parse_calendar_date(raw) {
                Ok(date) if date < today => {
                    errors.insert("dates", "Dates cannot be in the past.".to_string());
                }
                Ok(date) => dates.push(date),
                Err(reason) => {
                    errors.insert("dates", reason);
                }
            }
        }
        if dates.is_empty() && !errors.contains_key("dates") {
            errors.insert("dates", "Please select at least one date.".to_string());
        }

        match (start_min, end_min) {
            (Some(start_min), Some(end_min)) if errors.is_empty() => Ok(NewEvent {
                name: name.to_string(),
                start_min,
                end_min,
                dates,
            }),
            _ => Err(errors),
        }
    }

    fn checked_dates(&self) -> BTreeSet<NaiveDate> {
        self.dates
            .iter()
            .filter_map(|raw| parse_calendar_date(raw).ok())
            .collect()
    }
}

fn parse_hour(raw: &str, allowed: std::ops::RangeInclusive<i32>) -> Option<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|hour| allowed.contains(hour))
}

/// Build the template context for the form, optionally refilled from a
/// rejected submission
pub fn form_context(
    config: &FormConfig,
    today: NaiveDate,
    submitted: Option<&CreateEventForm>,
    errors: &FormErrors,
    general_error: Option<&str>,
) -> Context {
    let start = submitted
        .and_then(|form| parse_hour(&form.start_min, MIN_HOUR..=MAX_HOUR - 1))
        .unwrap_or(config.default_start_hour);
    let end = submitted
        .and_then(|form| parse_hour(&form.end_min, MIN_HOUR + 1..=MAX_HOUR))
        .unwrap_or(config.default_end_hour);
    let checked = submitted.map(|form| form.checked_dates()).unwrap_or_default();

    let mut context = Context::new();
    context.insert("name", submitted.map(|form| form.name.as_str()).unwrap_or(""));
    context.insert("start_options", &hour_options(MIN_HOUR..=MAX_HOUR - 1, Some(start)));
    context.insert("end_options", &hour_options(MIN_HOUR + 1..=MAX_HOUR, Some(end)));
    context.insert(
        "months",
        &calendar_months(today, config.selectable_days, &checked),
    );
    context.insert("errors", errors);
    context.insert("general_error", &general_error);
    context.insert("min_name_length", &config.min_name_length);
    context
}

/// `GET /`: the create form
#[tracing::instrument(skip(state))]
pub async fn create_form_page(
    State(state): State<AppState>,
) -> Result<Html<String>, ErrorResponse> {
    let today = Utc::now().date_naive();
    let context = form_context(&state.config.form, today, None, &FormErrors::new(), None);
    Ok(Html(render("create_form.html", &context)?))
}

/// `POST /events`: validate the form, create the event and redirect to its view
#[tracing::instrument(skip(state, form), fields(event_name = %form.name))]
pub async fn create_event_submit(
    State(state): State<AppState>,
    Form(form): Form<CreateEventForm>,
) -> Response {
    let today = Utc::now().date_naive();
    let config = &state.config.form;

    let input = match form.validate(today, config.min_name_length) {
        Ok(input) => input,
        Err(errors) => {
            tracing::debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Form rejected");
            let context = form_context(config, today, Some(&form), &errors, None);
            return render_with_status(StatusCode::BAD_REQUEST, &context);
        }
    };

    match state.events.create_event(input).await {
        Ok(created) => Redirect::to(&format!("/{}", created.id)).into_response(),
        Err(e) => {
            let response = ErrorResponse::from(e);
            let context = form_context(
                config,
                today,
                Some(&form),
                &FormErrors::new(),
                Some(GENERIC_FAILURE),
            );
            render_with_status(response.status(), &context)
        }
    }
}

fn render_with_status(status: StatusCode, context: &Context) -> Response {
    match render("create_form.html", context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    fn submission() -> CreateEventForm {
        CreateEventForm {
            name: "Team Sync".to_string(),
            start_min: "9".to_string(),
            end_min: "17".to_string(),
            dates: vec!["2024-06-01".to_string(), "2024-06-02".to_string()],
        }
    }

    #[test]
    fn test_valid_submission() {
        let input = submission().validate(today(), 5).unwrap();
        assert_eq!(input.name, "Team Sync");
        assert_eq!((input.start_min, input.end_min), (9, 17));
        assert_eq!(input.dates.len(), 2);
    }

    #[test]
    fn test_short_name_rejected() {
        let mut form = submission();
        form.name = "Sync".to_string();
        let errors = form.validate(today(), 5).unwrap_err();
        assert_eq!(errors["name"], "Name must be at least 5 characters.");
    }

    #[test]
    fn test_no_dates_rejected() {
        let mut form = submission();
        form.dates.clear();
        let errors = form.validate(today(), 5).unwrap_err();
        assert_eq!(errors["dates"], "Please select at least one date.");
    }

    #[test]
    fn test_past_dates_rejected() {
        let mut form = submission();
        form.dates = vec!["2024-05-19".to_string()];
        let errors = form.validate(today(), 5).unwrap_err();
        assert_eq!(errors["dates"], "Dates cannot be in the past.");
    }

    #[test]
    fn test_today_is_selectable() {
        let mut form = submission();
        form.dates = vec!["2024-05-20".to_string()];
        assert!(form.validate(today(), 5).is_ok());
    }

    #[test]
    fn test_end_must_follow_start() {
        let mut form = submission();
        form.start_min = "17".to_string();
        form.end_min = "9".to_string();
        let errors = form.validate(today(), 5).unwrap_err();
        assert!(errors.contains_key("endMin"));
    }

    #[test]
    fn test_non_numeric_hours_rejected() {
        let mut form = submission();
        form.start_min = "nine".to_string();
        form.end_min = "25".to_string();
        let errors = form.validate(today(), 5).unwrap_err();
        assert!(errors.contains_key("startMin"));
        assert!(errors.contains_key("endMin"));
    }

    #[test]
    fn test_context_keeps_submitted_values() {
        let mut form = submission();
        form.start_min = "10".to_string();
        let context = form_context(
            &FormConfig::default(),
            today(),
            Some(&form),
            &FormErrors::new(),
            None,
        );
        let json = context.into_json();
        assert_eq!(json["name"], "Team Sync");
        let selected: Vec<i64> = json["start_options"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|o| o["selected"] == true)
            .map(|o| o["value"].as_i64().unwrap())
            .collect();
        assert_eq!(selected, vec![10]);
    }
}
