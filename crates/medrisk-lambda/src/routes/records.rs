use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use jiff::Timestamp;
use medrisk_core::models::user::UserContext;
use medrisk_core::records::{FamilyHistory, RecordCategory};
use medrisk_storage::records::{self, StoredRecord};
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

async fn create(
    state: &AppState,
    user: &UserContext,
    category: RecordCategory,
    data: Value,
) -> Result<(StatusCode, Json<StoredRecord>), ApiError> {
    let stored = records::store_record(&state.s3, &state.bucket, &user.id, category, data).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn create_lab_record(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Json(data): Json<Value>,
) -> Result<(StatusCode, Json<StoredRecord>), ApiError> {
    create(&state, &user, RecordCategory::LabData, data).await
}

pub async fn create_lifestyle_record(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Json(data): Json<Value>,
) -> Result<(StatusCode, Json<StoredRecord>), ApiError> {
    create(&state, &user, RecordCategory::LifestyleData, data).await
}

pub async fn create_mental_health_record(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Json(data): Json<Value>,
) -> Result<(StatusCode, Json<StoredRecord>), ApiError> {
    create(&state, &user, RecordCategory::MentalHealthData, data).await
}

/// Replace the family history snapshot. Expects `{condition: [relatives], notes?}`.
pub async fn put_family_history(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Json(data): Json<Value>,
) -> Result<Json<FamilyHistory>, ApiError> {
    let history = FamilyHistory::from_value(&data)
        .ok_or_else(|| ApiError::BadRequest("family history must be a JSON object".to_string()))?;
    records::save_family_history(&state.s3, &state.bucket, &user.id, &history).await?;
    Ok(Json(history))
}

/// Raw records inside each category's window, newest first.
pub async fn list_records(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<Value>, ApiError> {
    let raw = records::load_raw_records(&state.s3, &state.bucket, &user.id, Timestamp::now()).await?;
    Ok(Json(raw))
}
