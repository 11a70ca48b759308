//! medrisk-storage
//!
//! S3 persistence for health records and risk reports. Thin wrapper around
//! the AWS S3 SDK; key layout lives in `medrisk_core::storage_keys`.

pub mod client;
pub mod documents;
pub mod error;
pub mod objects;
pub mod records;
pub mod reports;
