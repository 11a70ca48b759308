//! medrisk-core
//!
//! Pure domain types shared by every MedRisk crate: health record shapes and
//! their ingestion boundary, the fixed feature schema, report types, and
//! storage key conventions. No AWS SDK dependency.

pub mod error;
pub mod features;
pub mod models;
pub mod records;
pub mod storage_keys;
pub mod validation;
pub mod vocab;
