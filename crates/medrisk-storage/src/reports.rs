use aws_sdk_s3::Client;
use medrisk_core::models::report::RiskReport;
use medrisk_core::storage_keys;
use tracing::{info, warn};
use uuid::Uuid;

use crate::documents;
use crate::error::StorageError;
use crate::objects;

/// Persist a report under its report date. Returns the key.
pub async fn store_report(client: &Client, bucket: &str, report: &RiskReport) -> Result<String, StorageError> {
    let key = storage_keys::report(&report.user_id, report.report_date, Uuid::new_v4());
    documents::save_json(client, bucket, &key, report).await?;
    info!(user_id = %report.user_id, key = %key, "risk report stored");
    Ok(key)
}

/// Report keys for a user, newest first by their timestamp prefix. Keys
/// without one are dropped.
pub fn newest_first(keys: Vec<String>) -> Vec<String> {
    let mut dated: Vec<(jiff::Timestamp, String)> = keys
        .into_iter()
        .filter_map(|key| storage_keys::timestamp_from_key(&key).map(|ts| (ts, key)))
        .collect();
    dated.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));
    dated.into_iter().map(|(_, key)| key).collect()
}

/// Up to `limit` of the user's reports, newest first. Unreadable reports
/// are skipped.
pub async fn list_reports(
    client: &Client,
    bucket: &str,
    uid: &str,
    limit: usize,
) -> Result<Vec<RiskReport>, StorageError> {
    let keys = objects::list_objects(client, bucket, &storage_keys::reports_prefix(uid)).await?;

    let mut reports = Vec::new();
    for key in newest_first(keys).into_iter().take(limit) {
        match documents::load_json::<RiskReport>(client, bucket, &key).await {
            Ok(Some(report)) => reports.push(report),
            Ok(None) => {}
            Err(StorageError::Serialization(e)) => {
                warn!(key = %key, error = %e, "skipping unreadable report");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(reports)
}

/// The most recent report, if any.
pub async fn latest_report(
    client: &Client,
    bucket: &str,
    uid: &str,
) -> Result<Option<RiskReport>, StorageError> {
    let keys = objects::list_objects(client, bucket, &storage_keys::reports_prefix(uid)).await?;
    match newest_first(keys).first() {
        Some(key) => documents::load_json(client, bucket, key).await,
        None => Ok(None),
    }
}
