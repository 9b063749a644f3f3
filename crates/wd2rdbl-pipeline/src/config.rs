//! Configuration for pipeline runs
//!
//! Defines batch size, worker count and the throughput report interval.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::PipelineError;

/// Configuration for the batch pipeline
///
/// # Examples
///
/// ```
/// use wd2rdbl_pipeline::PipelineConfig;
///
/// // Default configuration (balanced)
/// let config = PipelineConfig::default();
/// assert_eq!(config.batch_size, 4096);
///
/// // Large batches for long dump conversions
/// let config = PipelineConfig::throughput();
/// assert_eq!(config.batch_size, 16384);
///
/// // Small batches, quick feedback
/// let config = PipelineConfig::small();
/// assert_eq!(config.batch_size, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Lines collected before a batch is dispatched to the workers
    /// Default: 4096
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Number of mapping workers
    /// Default: number of CPUs
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Seconds between throughput reports on the diagnostics channel
    /// Default: 4
    #[serde(default = "default_report_interval_secs")]
    pub report_interval_secs: u64,

    /// Capacity of the job and result channels
    /// Default: same as batch_size when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_capacity: Option<usize>,
}

fn default_batch_size() -> usize {
    4096
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_report_interval_secs() -> u64 {
    4
}

/// TOML layout: settings live under a `[pipeline]` table
#[derive(Deserialize)]
struct PipelineFile {
    #[serde(default)]
    pipeline: Option<PipelineConfig>,
}

impl Default for PipelineConfig {
    /// Create default configuration
    ///
    /// - Batch size: 4096 lines
    /// - Workers: one per CPU
    /// - Report interval: 4 seconds
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            workers: default_workers(),
            report_interval_secs: default_report_interval_secs(),
            channel_capacity: None,
        }
    }
}

impl PipelineConfig {
    /// Large batches and infrequent reports, for full dump conversions
    pub fn throughput() -> Self {
        Self {
            batch_size: 16384,
            workers: default_workers(),
            report_interval_secs: 30,
            channel_capacity: Some(4096),
        }
    }

    /// Small batches, two workers, frequent reports
    pub fn small() -> Self {
        Self {
            batch_size: 64,
            workers: 2,
            report_interval_secs: 1,
            channel_capacity: None,
        }
    }

    /// Parse the `[pipeline]` table of a TOML document; defaults when absent
    pub fn from_toml_str(contents: &str) -> Result<Self, PipelineError> {
        let file: PipelineFile = toml::from_str(contents)
            .map_err(|e| PipelineError::Config(format!("invalid pipeline config: {}", e)))?;
        let config = file.pipeline.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Load the `[pipeline]` table of a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.batch_size == 0 {
            return Err(PipelineError::Config("batch_size must be at least 1".to_string()));
        }
        if self.workers == 0 {
            return Err(PipelineError::Config("workers must be at least 1".to_string()));
        }
        if self.channel_capacity == Some(0) {
            return Err(PipelineError::Config("channel_capacity must be at least 1".to_string()));
        }
        if self.report_interval_secs == 0 {
            return Err(PipelineError::Config(
                "report_interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get report interval as Duration
    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }

    /// Effective capacity of the job and result channels
    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity.unwrap_or(self.batch_size).max(1)
    }
}
