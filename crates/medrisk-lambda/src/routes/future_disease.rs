use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use medrisk_predictor::multi_output::TargetPrediction;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::state::AppState;

pub const NO_INPUT: &str = "No input provided";

/// Parse the request body into model inputs. An empty body, `null`, or an
/// empty object is rejected.
pub fn parse_input(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::BadRequest(NO_INPUT.to_string()));
    }
    match serde_json::from_slice::<Value>(body)? {
        Value::Object(map) if !map.is_empty() => Ok(map),
        Value::Object(_) | Value::Null => Err(ApiError::BadRequest(NO_INPUT.to_string())),
        _ => Err(ApiError::BadRequest("input must be a JSON object".to_string())),
    }
}

/// Score the multi-output model: probability and severity tier per target.
pub async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BTreeMap<String, TargetPrediction>>, ApiError> {
    let input = parse_input(&body)?;
    let model = state.multi_output_model().await?;
    let predictions = model.predict(&input)?;
    tracing::info!(targets = predictions.len(), "multi-output prediction served");
    Ok(Json(predictions))
}
