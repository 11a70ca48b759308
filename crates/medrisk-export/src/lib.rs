//! medrisk-export
//!
//! Projections of a stored risk report for people: an HTML summary for email
//! bodies and a DOCX document, both rendered from Tera templates.

pub mod docx;
pub mod error;
pub mod render;
pub mod styles;
pub mod templates;

pub use error::ExportError;
