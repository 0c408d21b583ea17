use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use clap::Parser;
use serde_json::{json, Value};
use tower::ServiceExt;

use flash_timer::{create_router, AppState, Config};

fn app(args: &[&str]) -> (Router, Arc<AppState>) {
    let mut argv = vec!["flash-timer"];
    argv.extend_from_slice(args);
    let config = Config::try_parse_from(argv).unwrap();
    let state = Arc::new(AppState::new(&config));
    (create_router(Arc::clone(&state)), state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = app(&[]);
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn status_of_fresh_timer() {
    let (app, _) = app(&[]);
    let (status, body) = send(&app, Method::GET, "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["mode"], "paused");
    assert_eq!(body["timer"]["remaining_seconds"], 300);
    assert_eq!(body["timer"]["display"], "5:00");
    assert_eq!(body["timer"]["should_flash"], false);
    assert_eq!(body["timer"]["alarm_seconds_left"], Value::Null);
    assert_eq!(body["tick_interval_ms"], 100);
    assert_eq!(body["last_action"], Value::Null);
}

#[tokio::test]
async fn start_pause_and_toggle() {
    let (app, _) = app(&[]);

    let (status, body) = send(&app, Method::POST, "/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["timer"]["mode"], "running");

    let (_, body) = send(&app, Method::POST, "/pause", None).await;
    assert_eq!(body["status"], "paused");
    let remaining = body["timer"]["remaining_seconds"].as_u64().unwrap();
    assert!(remaining == 300 || remaining == 299);

    let (_, body) = send(&app, Method::POST, "/toggle", None).await;
    assert_eq!(body["status"], "running");
    let (_, body) = send(&app, Method::POST, "/toggle", None).await;
    assert_eq!(body["status"], "paused");

    let (_, body) = send(&app, Method::GET, "/status", None).await;
    assert_eq!(body["last_action"], "toggle");
    assert!(body["last_action_time"].is_string());
}

#[tokio::test]
async fn adjust_clamps_to_zero_and_shows_low_time() {
    let (app, _) = app(&[]);

    let (status, body) =
        send(&app, Method::POST, "/adjust", Some(json!({ "delta_seconds": -400 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["remaining_seconds"], 0);
    assert_eq!(body["timer"]["display"], "0:00");
    assert_eq!(body["timer"]["should_flash"], false);
    assert_eq!(body["timer"]["is_low_time_color"], true);
}

#[tokio::test]
async fn adjust_rejects_malformed_body() {
    let (app, _) = app(&[]);
    let (status, _) =
        send(&app, Method::POST, "/adjust", Some(json!({ "delta": "ten" }))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn up_and_down_use_configured_step() {
    let (app, _) = app(&["--step", "15"]);

    let (_, body) = send(&app, Method::POST, "/up", None).await;
    assert_eq!(body["timer"]["remaining_seconds"], 315);

    let (_, body) = send(&app, Method::POST, "/down", None).await;
    let (_, body2) = send(&app, Method::POST, "/down", None).await;
    assert_eq!(body["timer"]["remaining_seconds"], 300);
    assert_eq!(body2["timer"]["remaining_seconds"], 285);
    assert_eq!(body2["timer"]["display"], "4:45");
}

#[tokio::test]
async fn base_duration_applies_after_reset() {
    let (app, _) = app(&[]);

    let (status, body) =
        send(&app, Method::PUT, "/base-duration", Some(json!({ "seconds": 90 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["base_duration_seconds"], 90);
    assert_eq!(body["timer"]["remaining_seconds"], 300);

    let (_, body) = send(&app, Method::POST, "/reset", None).await;
    assert_eq!(body["status"], "paused");
    assert_eq!(body["timer"]["remaining_seconds"], 90);
    assert_eq!(body["timer"]["display"], "1:30");
}

#[tokio::test]
async fn alarm_blocks_controls_until_reset() {
    let (app, state) = app(&[]);

    send(&app, Method::POST, "/adjust", Some(json!({ "delta_seconds": -300 }))).await;
    send(&app, Method::POST, "/start", None).await;
    state.tick().unwrap();

    let (_, body) = send(&app, Method::GET, "/status", None).await;
    assert_eq!(body["timer"]["mode"], "alarming");
    assert_eq!(body["timer"]["is_alarming"], true);
    assert_eq!(body["timer"]["should_flash"], false);
    assert_eq!(body["timer"]["is_low_time_color"], false);
    assert!(body["timer"]["alarm_seconds_left"].as_u64().unwrap() <= 5);

    for uri in ["/start", "/pause", "/toggle", "/up", "/down"] {
        let (status, body) = send(&app, Method::POST, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "alarming", "{uri} escaped the alarm");
    }

    let (_, body) = send(&app, Method::POST, "/reset", None).await;
    assert_eq!(body["status"], "paused");
    assert_eq!(body["timer"]["remaining_seconds"], 300);
    assert_eq!(body["timer"]["is_alarming"], false);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (app, _) = app(&[]);
    let (status, _) = send(&app, Method::POST, "/snooze", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn events_stream_starts_with_current_snapshot() {
    use futures::StreamExt;

    let (app, _) = app(&["--duration", "61"]);
    let response = app
        .oneshot(Request::builder().uri("/events").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/event-stream"
    );

    let mut frames = response.into_body().into_data_stream();
    let first = frames.next().await.unwrap().unwrap();
    let text = String::from_utf8(first.to_vec()).unwrap();

    assert!(text.starts_with("event: timer\n"), "unexpected frame: {text}");
    let data = text
        .lines()
        .find_map(|line| line.strip_prefix("data: "))
        .unwrap();
    let snapshot: Value = serde_json::from_str(data).unwrap();
    assert_eq!(snapshot["mode"], "paused");
    assert_eq!(snapshot["display"], "1:01");
}
