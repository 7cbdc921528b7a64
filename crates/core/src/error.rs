//! Error types for the grounded kiosk.
//!
//! This module defines a unified error enum that covers every failure
//! category in the workspace: configuration, I/O, the generative service,
//! knowledge index construction, and prompt rendering.

use thiserror::Error;

/// Unified error type for the grounded kiosk.
///
/// Only `IndexUnavailable` is allowed to stop the process. Failures that
/// happen while answering a question are absorbed by the responder and
/// turned into plain answer text.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generative service errors (transport, status, decoding, timeout)
    #[error("LLM error: {0}")]
    Llm(String),

    /// The row source could not be reached while building the index
    #[error("Knowledge index unavailable: {0}")]
    IndexUnavailable(String),

    /// Knowledge index errors that are not about reaching the row source
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Prompt definition and rendering errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Whether this error means the knowledge index could not be built.
    pub fn is_index_unavailable(&self) -> bool {
        matches!(self, AppError::IndexUnavailable(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
