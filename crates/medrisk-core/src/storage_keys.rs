//! S3 key/path conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of user data in the MedRisk bucket.

use crate::records::RecordCategory;

pub fn user_prefix(uid: &str) -> String {
    format!("users/{uid}/")
}

pub fn category_prefix(uid: &str, category: RecordCategory) -> String {
    format!("users/{uid}/{}/", category.as_str())
}

/// Records are keyed by creation time so a reverse lexical sort is newest first.
pub fn record(uid: &str, category: RecordCategory, created_at: jiff::Timestamp, id: uuid::Uuid) -> String {
    format!(
        "users/{uid}/{}/{}-{id}.json",
        category.as_str(),
        sortable_timestamp(created_at)
    )
}

pub fn family_history(uid: &str) -> String {
    format!("users/{uid}/family_history.json")
}

pub fn reports_prefix(uid: &str) -> String {
    format!("users/{uid}/risk_reports/")
}

/// Reports share the record layout: creation time first, then a unique id so
/// reports generated within the same second never overwrite each other.
pub fn report(uid: &str, created_at: jiff::Timestamp, id: uuid::Uuid) -> String {
    format!(
        "users/{uid}/risk_reports/{}-{id}.json",
        sortable_timestamp(created_at)
    )
}

/// Extract the creation timestamp from a record or report key.
pub fn timestamp_from_key(key: &str) -> Option<jiff::Timestamp> {
    let file = key.rsplit('/').next()?;
    let stem = file.strip_suffix(".json")?;
    let stamp = stem.get(..SORTABLE_LEN)?;
    let civil = jiff::civil::DateTime::strptime(SORTABLE_FORMAT, stamp).ok()?;
    civil
        .to_zoned(jiff::tz::TimeZone::UTC)
        .ok()
        .map(|zoned| zoned.timestamp())
}

const SORTABLE_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const SORTABLE_LEN: usize = 16;

fn sortable_timestamp(ts: jiff::Timestamp) -> String {
    ts.strftime(SORTABLE_FORMAT).to_string()
}
