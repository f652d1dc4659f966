//! Error types for microlearn-core.

use crate::types::ItemId;
use thiserror::Error;

/// Result type alias using ProgressError.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Errors raised by the progress store and scheduler.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("persisted progress is unreadable: {0}")]
    CorruptState(String),

    #[error("topic not found: {0}")]
    TopicNotFound(String),

    #[error("item {item} not found in topic {topic}")]
    ItemNotFound { topic: String, item: ItemId },

    #[error("quiz score must be within 0..=1, got {0}")]
    InvalidScore(f64),

    #[error("invalid interval table: {0}")]
    InvalidIntervals(String),

    #[error("review session already finished")]
    SessionFinished,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failure reported by a blob store backend.
#[derive(Debug, Error)]
#[error("storage error: {0}")]
pub struct StorageError(pub String);

/// Errors produced while obtaining a module from a content generator.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API key is missing. Set GEMINI_API_KEY to generate modules.")]
    MissingApiKey,

    #[error("network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed module: {0}")]
    MalformedResponse(String),
}
