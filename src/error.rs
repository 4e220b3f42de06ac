//! Error type for the fallible edges of the crate (configuration and file loading).
//!
//! The axis engine itself never fails; missing data flows through as `None`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("unsupported file format: {0} (expected csv or json)")]
    UnsupportedFormat(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
