use axum::extract::State;
use axum::{Extension, Json};
use jiff::Timestamp;
use medrisk_core::models::user::UserContext;
use medrisk_features::trends::{health_trends, HealthTrends};
use medrisk_storage::records;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn trends(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<HealthTrends>, ApiError> {
    let records = records::load_records(&state.s3, &state.bucket, &user.id, Timestamp::now()).await?;
    Ok(Json(health_trends(&records)))
}
