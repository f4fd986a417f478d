mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, SecondsFormat, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use common::{app_state, raw_vehicle, FakeDispenser, FakeFleetApi};
use fleet_charger::routes::create_app_router;

fn create_test_app(fleet: Arc<FakeFleetApi>, dispenser: Arc<FakeDispenser>) -> Router {
    create_app_router(app_state(fleet, dispenser))
}

fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days)).to_rfc3339_opts(SecondsFormat::Millis, true)
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
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn send_raw(app: &Router, uri: &str, content_type: Option<&str>, body: &str) -> StatusCode {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.clone().oneshot(request).await.unwrap().status()
}

async fn confirmed_app(dispenser: Arc<FakeDispenser>) -> Router {
    let fleet = Arc::new(FakeFleetApi::with_vehicles(vec![raw_vehicle(
        "64f1",
        "ABC123",
        &["2024-03-01T09:00:00.000Z"],
    )]));
    let app = create_test_app(fleet, dispenser);
    send(&app, "POST", "/api/charger/scan", Some(json!({ "qr": "ABC123" }))).await;
    send(&app, "POST", "/api/charger/confirm", None).await;
    app
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(Arc::new(FakeFleetApi::default()), Arc::new(FakeDispenser::sending()));
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "fleet_charger");
}

#[tokio::test]
async fn test_initial_session() {
    let app = create_test_app(Arc::new(FakeFleetApi::default()), Arc::new(FakeDispenser::sending()));
    let (status, body) = send(&app, "GET", "/api/charger/session", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stage"], "awaiting-scan");
    assert_eq!(body["scanned_vehicle"], Value::Null);
    assert_eq!(body["lookup_in_flight"], false);
}

#[tokio::test]
async fn test_charger_flow_over_http() {
    let fleet = Arc::new(FakeFleetApi::with_vehicles(vec![raw_vehicle(
        "64f1",
        "ABC123",
        &["2024-03-01T09:00:00.000Z"],
    )]));
    let dispenser = Arc::new(FakeDispenser::sending());
    let app = create_test_app(fleet.clone(), dispenser.clone());

    let (_, body) = send(&app, "POST", "/api/charger/scanner/open", None).await;
    assert_eq!(body["scanner_open"], true);

    let (status, body) = send(&app, "POST", "/api/charger/scan", Some(json!({ "qr": " ABC123 " }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stage"], "confirming-match");
    assert_eq!(body["scanned_vehicle"]["plate"], "1 2 3 - A B C");
    assert_eq!(body["scanner_open"], false);

    let (_, body) = send(&app, "POST", "/api/charger/confirm", None).await;
    assert_eq!(body["stage"], "confirmed");

    let (status, body) = send(&app, "POST", "/api/charger/dispenser", Some(json!({ "dispenser_number": 1 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "sent": true, "dispenser": 1 }));

    let (status, body) = send(&app, "POST", "/api/charger/dispenser", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dispenser"], 4);
    assert_eq!(dispenser.calls(), vec![1, 4]);

    let (status, body) = send(&app, "POST", "/api/charger/note", Some(json!({ "note": "check cable" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Note Added");
    assert_eq!(fleet.notes(), vec![("64f1".to_string(), "check cable".to_string())]);

    let (_, body) = send(&app, "POST", "/api/charger/reset", None).await;
    assert_eq!(body["stage"], "awaiting-scan");
    assert_eq!(body["scanned_vehicle"], Value::Null);
}

#[tokio::test]
async fn test_lookup_failure_is_reported_in_session() {
    let app = create_test_app(Arc::new(FakeFleetApi::default()), Arc::new(FakeDispenser::sending()));

    let (status, body) = send(&app, "POST", "/api/charger/scan", Some(json!({ "qr": "NOPE" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stage"], "awaiting-scan");
    assert_eq!(body["error"], "something went wrong. Couldn't fetch vehicle");
}

#[tokio::test]
async fn test_blank_qr_is_rejected() {
    let fleet = Arc::new(FakeFleetApi::default());
    let app = create_test_app(fleet.clone(), Arc::new(FakeDispenser::sending()));

    let (status, body) = send(&app, "POST", "/api/charger/scan", Some(json!({ "qr": "   " }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(fleet.lookup_count(), 0);
}

#[tokio::test]
async fn test_side_effects_outside_confirmed_are_conflicts() {
    let dispenser = Arc::new(FakeDispenser::sending());
    let app = create_test_app(Arc::new(FakeFleetApi::default()), dispenser.clone());

    let (status, body) = send(&app, "POST", "/api/charger/dispenser", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_STAGE");
    assert_eq!(body["details"]["stage"], "awaiting-scan");

    let (status, _) = send(&app, "POST", "/api/charger/note", Some(json!({ "note": "x" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(dispenser.calls().is_empty());
}

#[tokio::test]
async fn test_vehicle_table_evaluates_maintenance() {
    let mut broken = raw_vehicle("bad", "BAD1", &[]);
    broken.qr_str = None;
    let fleet = Arc::new(FakeFleetApi::with_vehicles(vec![
        raw_vehicle("due", "DUE1", &[days_ago(40).as_str()]),
        raw_vehicle("ok", "OK1", &[days_ago(45).as_str(), days_ago(3).as_str()]),
        raw_vehicle("new", "NEW1", &[]),
        broken,
    ]));
    let app = create_test_app(fleet, Arc::new(FakeDispenser::sending()));

    let (status, body) = send(&app, "GET", "/api/vehicles", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0]["id"], "due");
    assert_eq!(rows[0]["remaining"], "needs maintenance");
    assert_eq!(rows[0]["needs_maintenance"], true);

    assert_eq!(rows[1]["remaining"], "3");
    assert_eq!(rows[1]["needs_maintenance"], false);

    assert_eq!(rows[2]["remaining"], "-");
    assert_eq!(rows[2]["needs_maintenance"], Value::Null);
}

#[tokio::test]
async fn test_vehicle_table_backend_failure() {
    let fleet = Arc::new(FakeFleetApi {
        fail_listing: true,
        ..Default::default()
    });
    let app = create_test_app(fleet, Arc::new(FakeDispenser::sending()));

    let (status, body) = send(&app, "GET", "/api/vehicles", None).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "EXTERNAL_API_ERROR");
}

#[tokio::test]
async fn test_register_vehicle() {
    let fleet = Arc::new(FakeFleetApi::default());
    let app = create_test_app(fleet.clone(), Arc::new(FakeDispenser::sending()));

    let (status, body) = send(
        &app,
        "POST",
        "/api/vehicles",
        Some(json!({
            "plate_no": "123",
            "plate_str": "ABC",
            "qr_str": "ABC123",
            "last_maintenance_date": "2024-03-01"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);

    let created = fleet.created.lock().unwrap().clone();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].qr_string, "ABC123");
    assert_eq!(created[0].maintenance_period, 30);
    assert_eq!(created[0].last_maintenance_date, "2024-03-01T00:00:00.000Z");
}

#[tokio::test]
async fn test_register_vehicle_validation_error() {
    let fleet = Arc::new(FakeFleetApi::default());
    let app = create_test_app(fleet.clone(), Arc::new(FakeDispenser::sending()));

    let (status, body) = send(
        &app,
        "POST",
        "/api/vehicles",
        Some(json!({
            "plate_no": "12-3",
            "plate_str": "ABC",
            "qr_str": "ABC123",
            "last_maintenance_date": "2024-03-01",
            "maintenance_period": 0
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(fleet.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_out_of_range_dispenser_number_opens_nothing() {
    let dispenser = Arc::new(FakeDispenser::sending());
    let app = confirmed_app(dispenser.clone()).await;

    let status = send_raw(&app, "/api/charger/dispenser", Some("application/json"), r#"{"dispenser_number":258}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(dispenser.calls().is_empty());
}

#[tokio::test]
async fn test_mistyped_dispenser_number_opens_nothing() {
    let dispenser = Arc::new(FakeDispenser::sending());
    let app = confirmed_app(dispenser.clone()).await;

    let status = send_raw(&app, "/api/charger/dispenser", Some("application/json"), r#"{"dispenser_number":"2"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(dispenser.calls().is_empty());
}

#[tokio::test]
async fn test_dispenser_body_without_content_type_opens_nothing() {
    let dispenser = Arc::new(FakeDispenser::sending());
    let app = confirmed_app(dispenser.clone()).await;

    let status = send_raw(&app, "/api/charger/dispenser", None, r#"{"dispenser_number":2}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(dispenser.calls().is_empty());
}

#[tokio::test]
async fn test_dispenser_number_above_count_is_invalid() {
    let dispenser = Arc::new(FakeDispenser::sending());
    let app = confirmed_app(dispenser.clone()).await;

    let (status, body) = send(&app, "POST", "/api/charger/dispenser", Some(json!({ "dispenser_number": 5 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_DISPENSER");
    assert!(dispenser.calls().is_empty());
}
