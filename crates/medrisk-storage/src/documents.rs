use aws_sdk_s3::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;
use crate::objects::{self, JSON_CONTENT_TYPE};

/// Load a JSON document. `Ok(None)` when the key does not exist.
pub async fn load_json<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match objects::get_object(client, bucket, key).await {
        Ok(body) => Ok(Some(serde_json::from_slice(&body)?)),
        Err(StorageError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Save a JSON document. Returns the new ETag.
pub async fn save_json<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    objects::put_object(client, bucket, key, body, Some(JSON_CONTENT_TYPE)).await
}
