//! Error types for pipeline operations

use thiserror::Error;
use wd2rdbl_mapper::MapperError;

/// Errors that stop a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),

    /// The run was interrupted before the input was exhausted
    #[error("Interrupted")]
    Interrupted,
}

/// Why a single input line produced no output; reported, never propagated
#[derive(Error, Debug)]
pub enum LineError {
    /// The line is not valid JSON
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The line is not valid UTF-8
    #[error("Invalid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// The record could not be mapped
    #[error("{0}")]
    Mapping(#[from] MapperError),
}
