//! Health record persistence.
//!
//! Each submitted record is one JSON object under its category prefix, keyed
//! by creation time. Loading lists a category, keeps the keys inside that
//! category's look-back window and fetches them newest first.

use aws_sdk_s3::Client;
use jiff::{SignedDuration, Timestamp};
use medrisk_core::records::{FamilyHistory, HealthRecordSet, RecordCategory};
use medrisk_core::storage_keys;
use medrisk_core::validation::validate_record;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::documents;
use crate::error::StorageError;
use crate::objects::{self, JSON_CONTENT_TYPE};

/// Receipt for a stored record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredRecord {
    pub id: Uuid,
    pub category: RecordCategory,
    pub key: String,
    pub created_at: Timestamp,
}

/// Oldest creation time still inside `category`'s window at `now`.
pub fn window_start(category: RecordCategory, now: Timestamp) -> Timestamp {
    let window = SignedDuration::from_hours(category.window_days() * 24);
    now.checked_sub(window).unwrap_or(Timestamp::MIN)
}

/// Keys inside the window, newest first. Keys without a parseable
/// timestamp are skipped.
pub fn recent_keys(keys: &[String], category: RecordCategory, now: Timestamp) -> Vec<String> {
    let start = window_start(category, now);
    let mut dated: Vec<(Timestamp, &String)> = keys
        .iter()
        .filter_map(|key| storage_keys::timestamp_from_key(key).map(|ts| (ts, key)))
        .filter(|(ts, _)| *ts >= start)
        .collect();
    dated.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(a.1)));
    dated.into_iter().map(|(_, key)| key.clone()).collect()
}

/// Stamp a submitted record with its id and creation time.
pub fn stamp_record(mut data: Value, id: Uuid, created_at: Timestamp) -> Value {
    if let Value::Object(obj) = &mut data {
        obj.insert("id".to_string(), Value::String(id.to_string()));
        obj.insert("created_at".to_string(), Value::String(created_at.to_string()));
    }
    data
}

/// Validate and store one record.
pub async fn store_record(
    client: &Client,
    bucket: &str,
    uid: &str,
    category: RecordCategory,
    data: Value,
) -> Result<StoredRecord, StorageError> {
    validate_record(category, &data)?;

    let id = Uuid::new_v4();
    let created_at = Timestamp::now();
    let key = storage_keys::record(uid, category, created_at, id);
    let body = serde_json::to_vec(&stamp_record(data, id, created_at))?;
    objects::put_object(client, bucket, &key, body, Some(JSON_CONTENT_TYPE)).await?;

    info!(user_id = uid, category = %category, %id, "health record stored");
    Ok(StoredRecord {
        id,
        category,
        key,
        created_at,
    })
}

/// Raw records of one category inside its window, newest first.
/// Objects that are not valid JSON are skipped with a warning.
pub async fn load_category(
    client: &Client,
    bucket: &str,
    uid: &str,
    category: RecordCategory,
    now: Timestamp,
) -> Result<Vec<Value>, StorageError> {
    let prefix = storage_keys::category_prefix(uid, category);
    let keys = objects::list_objects(client, bucket, &prefix).await?;

    let mut records = Vec::new();
    for key in recent_keys(&keys, category, now) {
        let body = objects::get_object(client, bucket, &key).await?;
        match serde_json::from_slice::<Value>(&body) {
            Ok(record) => records.push(record),
            Err(e) => warn!(key = %key, error = %e, "skipping unreadable record"),
        }
    }
    Ok(records)
}

/// Everything stored for a user, shaped for [`HealthRecordSet::from_raw`].
pub async fn load_raw_records(
    client: &Client,
    bucket: &str,
    uid: &str,
    now: Timestamp,
) -> Result<Value, StorageError> {
    let mut raw = Map::new();
    for category in RecordCategory::ALL {
        let records = load_category(client, bucket, uid, category, now).await?;
        raw.insert(category.as_str().to_string(), Value::Array(records));
    }

    let history: Option<Value> =
        documents::load_json(client, bucket, &storage_keys::family_history(uid)).await?;
    raw.insert("family_history".to_string(), history.unwrap_or(Value::Null));

    Ok(Value::Object(raw))
}

/// Load and parse a user's record set as of `now`.
pub async fn load_records(
    client: &Client,
    bucket: &str,
    uid: &str,
    now: Timestamp,
) -> Result<HealthRecordSet, StorageError> {
    let raw = load_raw_records(client, bucket, uid, now).await?;
    let records = HealthRecordSet::from_raw(&raw);
    info!(
        user_id = uid,
        lab = records.lab_data.len(),
        lifestyle = records.lifestyle_data.len(),
        mental_health = records.mental_health_data.len(),
        family_history = records.family_history.is_some(),
        "health records loaded"
    );
    Ok(records)
}

/// Replace the user's family history snapshot.
pub async fn save_family_history(
    client: &Client,
    bucket: &str,
    uid: &str,
    history: &FamilyHistory,
) -> Result<(), StorageError> {
    documents::save_json(client, bucket, &storage_keys::family_history(uid), history).await?;
    info!(user_id = uid, conditions = history.conditions.len(), "family history saved");
    Ok(())
}
