//! Error types for mapping operations

use thiserror::Error;
use wd2rdbl_domain::EntityError;

/// Errors that can occur while loading the vocabulary or mapping entities
#[derive(Error, Debug)]
pub enum MapperError {
    /// The vocabulary document cannot be used
    #[error("Vocabulary load error: {0}")]
    VocabularyLoad(String),

    /// An entity record lacks a structurally required field
    #[error("Malformed entity: {0}")]
    MalformedEntity(#[from] EntityError),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for mapping operations
pub type Result<T> = std::result::Result<T, MapperError>;
