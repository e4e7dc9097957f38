//! Integration tests for the journal API
//!
//! These tests drive the router end to end over a file-backed store:
//! - entry CRUD and range listing
//! - prompt building
//! - saving replies, parse status and back-references
//! - export download

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use journal_api_lib::{
    adapters::{FileStore, SystemClock, UuidIdGenerator},
    config::Config,
    web::{api_router, state::AppState},
};
use serde_json::{json, Value};
use std::sync::Arc;
use symptom_journal_core::JournalService;
use tempfile::TempDir;
use tower::ServiceExt;

/// Helper to create a router over a fresh data directory
async fn create_test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path().join("data"));
    store.initialize().await.unwrap();

    let journal = JournalService::new(
        Arc::new(store),
        Arc::new(UuidIdGenerator),
        Arc::new(SystemClock),
    );
    let config = Config::from_lookup(|_| None).unwrap();
    let state = Arc::new(AppState {
        journal: Arc::new(journal),
        config: Arc::new(config),
    });

    (api_router(state), temp_dir)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_entry(app: &Router, date: &str, text: &str) -> Value {
    let (status, body) = send_json(
        app,
        "POST",
        "/entries",
        Some(json!({
            "entryDate": date,
            "complaintText": text,
            "weightScore": 2,
            "tags": ["sleep", "sleep", "work"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_health_check() {
    let (app, _temp) = create_test_app().await;
    let (status, body) = send_json(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_entry_crud_operations() {
    let (app, _temp) = create_test_app().await;

    let created = create_entry(&app, "2024-01-03", "  pounding headache  ").await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["complaintText"], "pounding headache");
    assert_eq!(created["tags"], json!(["sleep", "work"]));
    assert_eq!(created["llmSummaryIds"], json!([]));

    let (status, fetched) = send_json(&app, "GET", &format!("/entries/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["entryDate"], "2024-01-03");

    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/entries/{id}"),
        Some(json!({
            "entryDate": "2024-01-04",
            "complaintText": "milder headache",
            "weightScore": null,
            "tags": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["weightScore"], Value::Null);

    let (status, _) = send(&app, "DELETE", &format!("/entries/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/entries/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_complaint_is_rejected() {
    let (app, _temp) = create_test_app().await;
    let (status, body) = send_json(
        &app,
        "POST",
        "/entries",
        Some(json!({ "entryDate": "2024-01-03", "complaintText": "   ", "weightScore": null })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("complaint"));

    let (_, list) = send_json(&app, "GET", "/entries", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_list_entries_by_range() {
    let (app, _temp) = create_test_app().await;
    for day in 1..=7 {
        create_entry(&app, &format!("2024-01-0{day}"), "tired").await;
    }

    let (status, body) = send_json(&app, "GET", "/entries?from=2024-01-03&to=2024-01-05", None).await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["entryDate"].as_str().unwrap())
        .collect();
    assert_eq!(dates, ["2024-01-05", "2024-01-04", "2024-01-03"]);

    let (_, all) = send_json(&app, "GET", "/entries?from=&to=", None).await;
    assert_eq!(all.as_array().unwrap().len(), 7);

    let (status, _) = send(&app, "GET", "/entries?from=01/03/2024", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_build_prompt() {
    let (app, _temp) = create_test_app().await;
    create_entry(&app, "2024-01-02", "stiff shoulders").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/prompts",
        Some(json!({ "from": "2024-01-01", "to": "2024-01-07" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entryCount"], 1);
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("Period: 2024-01-01 to 2024-01-07"));
    assert!(prompt.contains("- 2024-01-02: stiff shoulders (severity 2 / tags: sleep, work)"));

    let (_, empty) = send_json(
        &app,
        "POST",
        "/prompts",
        Some(json!({ "from": "2023-01-01", "to": "2023-01-07" })),
    )
    .await;
    assert!(empty["prompt"].as_str().unwrap().contains("- (no logs)"));
}

#[tokio::test]
async fn test_prompt_defaults_to_recent_week() {
    let (app, _temp) = create_test_app().await;
    let (status, body) = send_json(&app, "POST", "/prompts", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    let from: chrono::NaiveDate = body["from"].as_str().unwrap().parse().unwrap();
    let to: chrono::NaiveDate = body["to"].as_str().unwrap().parse().unwrap();
    assert_eq!((to - from).num_days(), 6);
}

#[tokio::test]
async fn test_save_reply_links_entries() {
    let (app, _temp) = create_test_app().await;
    let inside = create_entry(&app, "2024-01-03", "headache").await;
    let outside = create_entry(&app, "2024-02-03", "fine").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/outputs",
        Some(json!({
            "from": "2024-01-01",
            "to": "2024-01-07",
            "modelInfo": "  ",
            "rawText": "1) hello\n2) a\nb\n5) step"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["linkedEntries"], 1);
    let output = &body["output"];
    assert_eq!(output["parsed"], true);
    assert_eq!(output["summaryText"], "hello");
    assert_eq!(output["patternsText"], "a\nb");
    assert_eq!(output["cautionsText"], "");
    assert_eq!(output["oneStepText"], "step");
    assert_eq!(output["modelInfo"], Value::Null);
    assert_eq!(output["promptVersion"], "v0.1");

    let output_id = output["id"].as_str().unwrap();
    let (_, linked) = send_json(&app, "GET", &format!("/entries/{}", inside["id"].as_str().unwrap()), None).await;
    assert_eq!(linked["llmSummaryIds"], json!([output_id]));
    let (_, unlinked) = send_json(&app, "GET", &format!("/entries/{}", outside["id"].as_str().unwrap()), None).await;
    assert_eq!(unlinked["llmSummaryIds"], json!([]));
}

#[tokio::test]
async fn test_unparsed_reply_keeps_raw_text() {
    let (app, _temp) = create_test_app().await;
    let raw = "I would rather not use numbered sections.";

    let (status, body) = send_json(
        &app,
        "POST",
        "/outputs",
        Some(json!({ "from": "2024-01-01", "to": "2024-01-07", "rawText": raw })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["output"]["parsed"], false);
    assert_eq!(body["output"]["rawText"], raw);
    assert_eq!(body["output"]["preview"], "I would rather not use numbere…");

    let id = body["output"]["id"].as_str().unwrap();
    let (status, text) = send(&app, "GET", &format!("/outputs/{id}/text"), None).await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(text).unwrap();
    assert!(text.contains("Parsed: failed"));
    assert!(text.ends_with(raw));
}

#[tokio::test]
async fn test_blank_reply_is_rejected() {
    let (app, _temp) = create_test_app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/outputs",
        Some(json!({ "from": "2024-01-01", "to": "2024-01-07", "rawText": "\n  \n" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, outputs) = send_json(&app, "GET", "/outputs", None).await;
    assert_eq!(outputs, json!([]));
}

#[tokio::test]
async fn test_malformed_body_dates_are_bad_requests() {
    let (app, _temp) = create_test_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/outputs",
        Some(json!({ "from": "2024/01/01", "to": "2024-01-07", "rawText": "1) ok" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("2024/01/01"));

    let (status, body) = send_json(
        &app,
        "POST",
        "/entries",
        Some(json!({ "entryDate": "yesterday", "complaintText": "tired", "weightScore": null })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, outputs) = send_json(&app, "GET", "/outputs", None).await;
    assert_eq!(outputs, json!([]));
}

#[tokio::test]
async fn test_get_missing_output_not_found() {
    let (app, _temp) = create_test_app().await;
    let (status, _) = send(&app, "GET", "/outputs/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_export_download() {
    let (app, _temp) = create_test_app().await;
    create_entry(&app, "2024-01-02", "in range").await;
    create_entry(&app, "2024-03-02", "out of range").await;
    send(
        &app,
        "POST",
        "/outputs",
        Some(json!({ "from": "2024-01-01", "to": "2024-01-07", "rawText": "1) ok" })),
    )
    .await;

    let request = Request::builder()
        .uri("/export?from=2024-01-01&to=2024-01-31")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"symptom-log-export.json\""
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let export: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(export["exportedAt"].is_string());
    assert_eq!(export["logEntries"].as_array().unwrap().len(), 1);
    assert_eq!(export["logEntries"][0]["complaintText"], "in range");
    assert_eq!(export["llmOutputs"].as_array().unwrap().len(), 1);

    let (_, everything) = send_json(&app, "GET", "/export", None).await;
    assert_eq!(everything["logEntries"].as_array().unwrap().len(), 2);
}
