//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use wd2rdbl_pipeline::PipelineConfig;

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "wd2rdbl.toml";

/// Vocabulary mapping document used when none is configured
pub const DEFAULT_VOCABULARY: &str = "cache/vocmap.jsonld";

/// CLI configuration.
///
/// ```toml
/// vocabulary = "cache/vocmap.jsonld"
///
/// [pipeline]
/// batch_size = 4096
/// workers = 8
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Vocabulary mapping document
    #[serde(default = "default_vocabulary")]
    pub vocabulary: PathBuf,

    /// Batch pipeline settings
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

fn default_vocabulary() -> PathBuf {
    PathBuf::from(DEFAULT_VOCABULARY)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocabulary: default_vocabulary(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `./wd2rdbl.toml` is read
    /// when present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file '{}' not found",
                        path.display()
                    )));
                }
                Self::from_file(path)
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Read configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.pipeline.validate()?;
        Ok(config)
    }

    /// Override the vocabulary path from the command line or environment.
    pub fn with_vocabulary(mut self, vocabulary: Option<PathBuf>) -> Self {
        if let Some(vocabulary) = vocabulary {
            self.vocabulary = vocabulary;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.vocabulary, PathBuf::from("cache/vocmap.jsonld"));
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_toml_str(
            r#"
            vocabulary = "/data/vocmap.jsonld"

            [pipeline]
            batch_size = 512
            workers = 4
            report_interval_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.vocabulary, PathBuf::from("/data/vocmap.jsonld"));
        assert_eq!(config.pipeline.batch_size, 512);
        assert_eq!(config.pipeline.workers, 4);
        assert_eq!(config.pipeline.report_interval_secs, 10);
    }

    #[test]
    fn test_invalid_pipeline_rejected() {
        let result = Config::from_toml_str("[pipeline]\nworkers = 0\n");
        assert!(matches!(result, Err(CliError::Pipeline(_))));

        let result = Config::from_toml_str("vocabulary = 3\n");
        assert!(matches!(result, Err(CliError::Toml(_))));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wd2rdbl.toml");
        fs::write(&path, "vocabulary = \"terms.jsonld\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.vocabulary, PathBuf::from("terms.jsonld"));
        assert_eq!(config.pipeline, PipelineConfig::default());
    }

    #[test]
    fn test_vocabulary_override() {
        let config = Config::default().with_vocabulary(Some(PathBuf::from("other.jsonld")));
        assert_eq!(config.vocabulary, PathBuf::from("other.jsonld"));

        let config = config.with_vocabulary(None);
        assert_eq!(config.vocabulary, PathBuf::from("other.jsonld"));
    }
}
