//! Error types for the COPSOQ scoring engine
//!
//! Unrecognized answers and empty scales are not errors: they surface as
//! absent values. Errors are reserved for malformed scale tables, bad
//! question numbers and JSON boundaries.

use thiserror::Error;

/// Errors that can occur while building tables or moving data across the
/// JSON boundary
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Invalid scale table: {0}")]
    InvalidScaleTable(String),

    #[error("Invalid question number: {0} (expected 1..=84)")]
    InvalidQuestion(usize),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
