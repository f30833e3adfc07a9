// Property-based tests for the RPC endpoints

use api::{create_router, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use common::config::Settings;
use common::db::repositories::MemoryEventRepository;
use common::service::EventService;
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(
        EventService::new(Arc::new(MemoryEventRepository::new())),
        Settings::default(),
    );
    create_router(state)
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn create(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/event.createEvent")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(id: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/api/event.getEvent?id={}", id))
        .body(Body::empty())
        .unwrap()
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..2000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}

/// Whatever is created through the RPC surface is read back unchanged,
/// with dates as a sorted set
#[test]
fn property_rpc_round_trip() {
    let rt = runtime();
    let app = app();

    proptest!(ProptestConfig::with_cases(64), |(
        name in "[A-Za-z][A-Za-z ]{0,30}[A-Za-z]",
        start_min in 0i32..24,
        span in 1i32..=24,
        dates in prop::collection::vec(arb_date(), 1..10),
    )| {
        let end_min = (start_min + span).min(24);
        let date_strings: Vec<String> =
            dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();

        let (status, created) = rt.block_on(call(&app, create(json!({
            "name": name,
            "startMin": start_min,
            "endMin": end_min,
            "dates": date_strings,
        }))));
        prop_assert_eq!(status, StatusCode::OK);
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let (status, fetched) = rt.block_on(call(&app, get(&id)));
        prop_assert_eq!(status, StatusCode::OK);

        let expected: Vec<String> = dates
            .iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect();
        prop_assert_eq!(
            &fetched["data"],
            &json!({
                "id": id,
                "name": name,
                "startMin": start_min,
                "endMin": end_min,
                "dates": expected,
            })
        );
    });
}

/// Every window with start >= end is answered with a validation error
#[test]
fn property_rpc_rejects_inverted_window() {
    let rt = runtime();
    let app = app();

    proptest!(ProptestConfig::with_cases(64), |(
        end_min in 0i32..=24,
        gap in 0i32..=24,
    )| {
        let start_min = (end_min + gap).min(24);
        let (status, body) = rt.block_on(call(&app, create(json!({
            "name": "Team Sync",
            "startMin": start_min,
            "endMin": end_min,
            "dates": ["2024-06-01"],
        }))));
        prop_assert_eq!(status, StatusCode::BAD_REQUEST);
        prop_assert_eq!(&body["error"], "validation_error");
    });
}
