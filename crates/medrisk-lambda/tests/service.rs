use std::path::{Path, PathBuf};

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use medrisk_lambda::config::Config;
use medrisk_lambda::state::AppState;
use medrisk_scoring::RiskAssessor;
use serde_json::{json, Value};
use tower::ServiceExt;

fn offline_s3() -> aws_sdk_s3::Client {
    let conf = aws_sdk_s3::Config::builder()
        .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
        .region(aws_sdk_s3::config::Region::new("us-east-1"))
        .build();
    aws_sdk_s3::Client::from_conf(conf)
}

fn app_with_model(path: PathBuf) -> Router {
    let state = AppState::new(offline_s3(), "test-bucket".to_string(), RiskAssessor::default(), path);
    medrisk_lambda::app(state)
}

fn write_model(dir: &Path) -> PathBuf {
    let path = dir.join("multi_output_model.json");
    let model = json!({
        "numeric_cols": ["age"],
        "target_prob_cols": ["risk_ckd_prob"],
        "clf": {"estimators": [
            {"kind": "logistic", "classes": [0, 1], "coefficients": [0.0], "intercept": 0.0}
        ]}
    });
    std::fs::write(&path, serde_json::to_vec(&model).unwrap()).unwrap();
    path
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn predict_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/future-disease/predict")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_needs_no_identity() {
    let app = app_with_model(PathBuf::from("/nonexistent/model.json"));
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn protected_routes_require_user_header() {
    let app = app_with_model(PathBuf::from("/nonexistent/model.json"));
    let req = Request::builder().uri("/assessments/latest").body(Body::empty()).unwrap();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing user identity");
}

#[tokio::test]
async fn invalid_record_is_rejected_before_storage() {
    let app = app_with_model(PathBuf::from("/nonexistent/model.json"));
    let req = Request::builder()
        .method("POST")
        .uri("/records/lab")
        .header("content-type", "application/json")
        .header("x-user-id", "u1")
        .body(Body::from(r#"{"test_date": "2026-01-10", "glucose": 900}"#))
        .unwrap();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "glucose must be between 0 and 500");
}

#[tokio::test]
async fn empty_prediction_input_is_rejected() {
    for payload in ["", "{}", "null"] {
        let app = app_with_model(PathBuf::from("/nonexistent/model.json"));
        let (status, body) = send(app, predict_request(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload:?}");
        assert_eq!(body["error"], "No input provided");
    }
}

#[tokio::test]
async fn prediction_uses_lazily_loaded_model() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_model(write_model(dir.path()));
    let (status, body) = send(app, predict_request(r#"{"age": 50}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk_ckd_prob"]["probability"], 0.5);
    assert_eq!(body["risk_ckd_prob"]["level"], "Critical");
}

#[tokio::test]
async fn missing_model_is_an_internal_error() {
    let app = app_with_model(PathBuf::from("/nonexistent/model.json"));
    let (status, body) = send(app, predict_request(r#"{"age": 50}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal server error");
}

#[test]
fn config_defaults_and_overrides() {
    let config = Config::from_lookup(|_| None);
    assert_eq!(config.bucket, "medrisk");
    assert_eq!(config.thresholds, None);

    let config = Config::from_lookup(|name| match name {
        "MEDRISK_BUCKET" => Some("health-data".to_string()),
        "MEDRISK_THRESHOLDS" => Some("/etc/medrisk/thresholds.json".to_string()),
        "MEDRISK_MODEL_DIR" => Some("  ".to_string()),
        _ => None,
    });
    assert_eq!(config.bucket, "health-data");
    assert_eq!(config.thresholds, Some(PathBuf::from("/etc/medrisk/thresholds.json")));
    assert_eq!(config.model_dir, PathBuf::from("/opt/models"));
}

#[test]
fn identity_comes_from_forwarded_headers() {
    use axum::http::HeaderMap;
    use medrisk_lambda::middleware::auth::user_from_headers;

    let mut headers = HeaderMap::new();
    assert!(user_from_headers(&headers).is_none());

    headers.insert("x-user-id", "u42".parse().unwrap());
    headers.insert("x-user-name", "Ada".parse().unwrap());
    let user = user_from_headers(&headers).unwrap();
    assert_eq!(user.id, "u42");
    assert_eq!(user.name, "Ada");
    assert_eq!(user.email, "");
}

#[tokio::test]
async fn mistyped_record_is_rejected_before_storage() {
    let app = app_with_model(PathBuf::from("/nonexistent/model.json"));
    let req = Request::builder()
        .method("POST")
        .uri("/records/lifestyle")
        .header("content-type", "application/json")
        .header("x-user-id", "u1")
        .body(Body::from(r#"{"date": "2026-01-10", "sleep_hours": 7, "smoking": "no"}"#))
        .unwrap();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid record: "));
}
