use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use jiff::Timestamp;
use medrisk_core::models::report::RiskReport;
use medrisk_core::models::user::UserContext;
use medrisk_export::docx::report_docx;
use medrisk_export::render::report_html;
use medrisk_export::styles::DocumentStyles;
use medrisk_storage::{records, reports};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_HISTORY_LIMIT: usize = 10;
const MAX_HISTORY_LIMIT: usize = 100;

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Run the pipeline on the user's stored records and persist the report.
pub async fn create_assessment(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<(StatusCode, Json<RiskReport>), ApiError> {
    let records = records::load_records(&state.s3, &state.bucket, &user.id, Timestamp::now()).await?;
    let report = state.assessor.assess(&records, &user)?;
    reports::store_report(&state.s3, &state.bucket, &report).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

pub async fn list_assessments(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<RiskReport>>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let history = reports::list_reports(&state.s3, &state.bucket, &user.id, limit).await?;
    Ok(Json(history))
}

async fn latest(state: &AppState, user: &UserContext) -> Result<RiskReport, ApiError> {
    reports::latest_report(&state.s3, &state.bucket, &user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No risk assessment found".to_string()))
}

pub async fn get_latest_assessment(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<RiskReport>, ApiError> {
    Ok(Json(latest(&state, &user).await?))
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Docx,
    Html,
}

impl ExportFormat {
    fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Docx => DOCX_CONTENT_TYPE,
            ExportFormat::Html => HTML_CONTENT_TYPE,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Docx => "docx",
            ExportFormat::Html => "html",
        }
    }
}

/// Render the latest report as a downloadable document.
pub async fn export_latest_assessment(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Json(req): Json<ExportRequest>,
) -> Result<Response, ApiError> {
    let report = latest(&state, &user).await?;

    let bytes = match req.format {
        ExportFormat::Docx => report_docx(&report, &DocumentStyles::default())?,
        ExportFormat::Html => report_html(&report)?.into_bytes(),
    };

    let disposition = format!(
        "attachment; filename=\"risk_report_{}.{}\"",
        report.report_date.strftime("%Y%m%d"),
        req.format.extension()
    );
    Ok((
        [
            (CONTENT_TYPE, req.format.content_type().to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
