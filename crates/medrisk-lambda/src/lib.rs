//! medrisk-lambda
//!
//! HTTP surface for the risk pipeline: record ingestion, assessment
//! generation and history, analytics, multi-output prediction and export.
//! Runs on `lambda_http`; the router itself is plain axum.

use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/records", get(routes::records::list_records))
        .route("/records/lab", post(routes::records::create_lab_record))
        .route("/records/lifestyle", post(routes::records::create_lifestyle_record))
        .route(
            "/records/mental-health",
            post(routes::records::create_mental_health_record),
        )
        .route(
            "/records/family-history",
            put(routes::records::put_family_history),
        )
        .route(
            "/assessments",
            get(routes::assessments::list_assessments).post(routes::assessments::create_assessment),
        )
        .route(
            "/assessments/latest",
            get(routes::assessments::get_latest_assessment),
        )
        .route(
            "/assessments/latest/export",
            post(routes::assessments::export_latest_assessment),
        )
        .route("/analytics/trends", get(routes::analytics::trends))
        .route_layer(axum_mw::from_fn(middleware::auth::require_user));

    Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        // Stateless model scoring (no stored data involved)
        .route("/future-disease/predict", post(routes::future_disease::predict))
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(axum_mw::from_fn(middleware::audit::audit_log))
                .layer(cors),
        )
        .with_state(state)
}
