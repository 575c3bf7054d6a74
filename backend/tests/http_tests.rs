#![cfg(feature = "http-server")]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use event_intel::db::models::{SessionAnalyticsRow, SessionRecord};
use event_intel::db::repositories::LocalRepository;
use event_intel::db::{EventDataset, QueryKind, QueryRepository};
use event_intel::http::{create_router, AppState};
use serde_json::Value;
use tower::ServiceExt;

fn app_with(repo: LocalRepository) -> Router {
    let repo = Arc::new(repo) as Arc<dyn QueryRepository>;
    create_router(AppState::new(repo))
}

fn app() -> Router {
    app_with(LocalRepository::with_sample_data())
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_health_reports_disconnected_backend() {
    let repo = LocalRepository::with_sample_data();
    repo.set_healthy(false);
    let (status, body) = get_json(app_with(repo), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn test_dashboard_html() {
    let (status, body) = get(app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("Event Intelligence Dashboard"));
    assert!(body.contains("Live Event Metrics"));
    assert!(body.contains("AI-Powered Feedback Sentiment"));
}

#[tokio::test]
async fn test_dashboard_html_marks_selected_track() {
    let (status, body) = get(app(), "/?track=Advanced%20Therapies").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("selected>Advanced Therapies</option>"));
}

#[tokio::test]
async fn test_filter_options_json() {
    let (status, body) = get_json(app(), "/v1/filters").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tracks"][0], "All Tracks");
    assert_eq!(body["tracks"].as_array().unwrap().len(), 6);
    assert_eq!(body["tiers"][0], "All Tiers");
    assert_eq!(body["dates"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_dashboard_json_has_every_section() {
    let (status, body) = get_json(app(), "/v1/dashboard").await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<&str> = body["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, event_intel::routes::SECTION_IDS.to_vec());
    assert_eq!(body["footer"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_dashboard_json_applies_tier() {
    let (status, body) = get_json(app(), "/v1/dashboard?tier=Silver").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filters"]["selection"]["tier"], "Silver");
}

#[tokio::test]
async fn test_dashboard_json_track_with_apostrophe() {
    let mut data = EventDataset::sample();
    data.sessions.push(SessionRecord {
        session_id: 99,
        session_name: "Surgeon's Corner: Live Q&A".to_string(),
        track: "Surgeon's Corner".to_string(),
    });
    data.session_analytics.push(SessionAnalyticsRow {
        session_name: "Surgeon's Corner: Live Q&A".to_string(),
        speaker: "Dr. O'Neil".to_string(),
        track: "Surgeon's Corner".to_string(),
        attendance_count: 12,
        capacity: 40,
        capacity_utilization_pct: 30.0,
        avg_rating: Some(4.5),
    });

    let (status, body) = get_json(
        app_with(LocalRepository::with_dataset(data)),
        "/v1/dashboard?track=Surgeon%27s%20Corner",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filters"]["selection"]["track"], "Surgeon's Corner");
}

#[tokio::test]
async fn test_unknown_tier_is_bad_request() {
    let (status, body) = get_json(app(), "/v1/dashboard?tier=Diamond").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap().contains("Diamond"));
}

#[tokio::test]
async fn test_unknown_track_is_bad_request() {
    let (status, _) = get(app(), "/?track=Cardiology").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_sentiment_still_renders() {
    let repo = LocalRepository::with_dataset(EventDataset::sample().without_sentiment());
    let (status, body) = get(app_with(repo), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Run the Cortex AI scripts"));
}

#[tokio::test]
async fn test_required_section_failure_is_server_error() {
    let repo = LocalRepository::with_sample_data();
    repo.fail_query(QueryKind::TopSessions);
    let (status, body) = get_json(app_with(repo), "/v1/dashboard").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "REPOSITORY_ERROR");
}
