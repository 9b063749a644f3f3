//! Error types for the CLI application.

use thiserror::Error;
use wd2rdbl_pipeline::PipelineError;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Exit status after Ctrl+C.
pub const EXIT_INTERRUPTED: i32 = 130;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mapping or vocabulary error
    #[error(transparent)]
    Mapper(#[from] wd2rdbl_mapper::MapperError),

    /// Batch pipeline error
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Fetching a remote document failed
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),
}

impl CliError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Pipeline(PipelineError::Interrupted) => EXIT_INTERRUPTED,
            _ => 1,
        }
    }
}
