//! Error types for core domain logic.
use thiserror::Error;

/// Top-level core error type.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Photo read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Bad request: {0}")]
    BadRequest(String),
}
