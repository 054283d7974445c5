//! Integration tests for the HTTP API.

use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use category_timers::{
    create_router,
    state::{AppState, NotificationMode, StoreHandle, Validation},
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn setup(validation: Validation, mode: NotificationMode) -> (Router, StoreHandle) {
    let store = StoreHandle::spawn(validation, mode);
    let state = AppState::new(
        store.clone(),
        validation,
        Duration::from_secs(1),
        20554,
        "127.0.0.1".to_string(),
    );
    (create_router(Arc::new(state)), store)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, name: &str, duration: i64, category: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/timers",
        Some(json!({ "name": name, "duration": duration, "category": category })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["timer"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_start_and_complete() {
    let (app, store) = setup(Validation::Strict, NotificationMode::Queue);
    let id = create(&app, "Tea", 2, "Kitchen").await;

    let (status, body) = send(&app, "GET", &format!("/timers/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "idle");
    assert_eq!(body["timer"]["remaining"], 2);
    assert_eq!(body["timer"]["progress"], 1.0);
    assert_eq!(body["timer"]["can_start"], true);

    let (status, body) = send(&app, "POST", &format!("/timers/{}/start", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timers"][0]["status"], "running");
    assert_eq!(body["timers"][0]["can_pause"], true);

    store.tick().await.unwrap();
    let (_, body) = send(&app, "GET", "/timers", None).await;
    assert_eq!(body["timers"][0]["remaining"], 1);
    assert_eq!(body["timers"][0]["remaining_display"], "1s");

    let (_, body) = send(&app, "GET", "/notifications", None).await;
    assert!(body["current"].is_null());
    assert_eq!(body["pending"], 0);

    store.tick().await.unwrap();
    let (_, body) = send(&app, "GET", "/timers", None).await;
    assert_eq!(body["timers"][0]["remaining"], 0);
    assert_eq!(body["timers"][0]["status"], "completed");
    assert_eq!(body["timers"][0]["can_start"], false);

    let (_, body) = send(&app, "GET", "/notifications", None).await;
    assert_eq!(body["current"]["timer"]["id"], id.as_str());
    assert_eq!(body["message"], "Your timer \"Tea\" has finished.");

    let (status, body) = send(&app, "POST", "/notifications/dismiss", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["current"].is_null());
    assert_eq!(body["pending"], 0);
}

#[tokio::test]
async fn test_category_intents() {
    let (app, store) = setup(Validation::Strict, NotificationMode::Queue);
    create(&app, "A", 2, "X").await;
    create(&app, "B", 2, "X").await;
    create(&app, "C", 5, "Y").await;

    let (_, body) = send(&app, "POST", "/categories/X/start", None).await;
    let statuses: Vec<&str> = body["timers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["running", "running", "idle"]);

    store.tick().await.unwrap();
    let report = store.tick().await.unwrap();
    assert_eq!(report.completed.len(), 2);

    let (_, body) = send(&app, "GET", "/notifications", None).await;
    assert_eq!(body["pending"], 2);
    assert_eq!(body["current"]["timer"]["name"], "A");
    let (_, body) = send(&app, "POST", "/notifications/dismiss", None).await;
    assert_eq!(body["current"]["timer"]["name"], "B");
    assert_eq!(body["pending"], 1);

    let (_, body) = send(&app, "POST", "/categories/X/reset", None).await;
    assert_eq!(body["timers"][0]["status"], "idle");
    assert_eq!(body["timers"][0]["remaining"], 2);
    assert_eq!(body["timers"][1]["status"], "idle");

    let (_, body) = send(&app, "GET", "/categories", None).await;
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["category"], "X");
    assert_eq!(categories[0]["timers"].as_array().unwrap().len(), 2);
    assert_eq!(categories[1]["category"], "Y");
}

#[tokio::test]
async fn test_pause_category_only_running() {
    let (app, _store) = setup(Validation::Strict, NotificationMode::Queue);
    let a = create(&app, "A", 5, "Z").await;
    create(&app, "B", 5, "Z").await;

    send(&app, "POST", &format!("/timers/{}/start", a), None).await;
    let (_, body) = send(&app, "POST", "/categories/Z/pause", None).await;
    assert_eq!(body["timers"][0]["status"], "paused");
    assert_eq!(body["timers"][1]["status"], "idle");
}

#[tokio::test]
async fn test_unknown_targets_are_noops() {
    let (app, _store) = setup(Validation::Strict, NotificationMode::Queue);
    create(&app, "A", 5, "Work").await;

    let (status, body) = send(&app, "POST", "/timers/does-not-exist/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timers"][0]["status"], "idle");

    let (status, _) = send(&app, "POST", "/categories/Nowhere/reset", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/timers/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_validation() {
    let (app, _store) = setup(Validation::Strict, NotificationMode::Queue);
    let (status, body) = send(
        &app,
        "POST",
        "/timers",
        Some(json!({ "name": "A", "duration": 0, "category": "Work" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");

    let (lenient, store) = setup(Validation::Lenient, NotificationMode::Queue);
    let id = create(&lenient, "", 0, "").await;
    send(&lenient, "POST", &format!("/timers/{}/start", id), None).await;
    let report = store.tick().await.unwrap();
    assert_eq!(report.completed.len(), 1);
}

#[tokio::test]
async fn test_malformed_body_gets_error_json() {
    let (app, store) = setup(Validation::Strict, NotificationMode::Queue);
    let (status, body) = send(
        &app,
        "POST",
        "/timers",
        Some(json!({ "name": "A", "duration": 2.5, "category": "Work" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("duration"));
    assert!(store.timers().is_empty());
}

#[tokio::test]
async fn test_latest_notification_mode() {
    let (app, store) = setup(Validation::Strict, NotificationMode::Latest);
    create(&app, "A", 1, "X").await;
    create(&app, "B", 1, "X").await;
    send(&app, "POST", "/categories/X/start", None).await;
    store.tick().await.unwrap();

    let (_, body) = send(&app, "GET", "/notifications", None).await;
    assert_eq!(body["pending"], 1);
    assert_eq!(body["current"]["timer"]["name"], "B");
}

#[tokio::test]
async fn test_status_and_health() {
    let (app, store) = setup(Validation::Strict, NotificationMode::Queue);
    let id = create(&app, "A", 5, "Work").await;
    create(&app, "B", 5, "Home").await;
    send(&app, "POST", &format!("/timers/{}/start", id), None).await;
    store.tick().await.unwrap();

    let (status, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ticks"], 1);
    assert_eq!(body["categories"], 2);
    assert_eq!(body["timers"]["running"], 1);
    assert_eq!(body["timers"]["idle"], 1);
    assert_eq!(body["tick_ms"], 1000);
    assert_eq!(body["validation"], "strict");
    assert_eq!(body["notification_mode"], "queue");

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
