//! wd2rdbl Pipeline
//!
//! Concurrent conversion of line-oriented entity dumps.
//!
//! # Overview
//!
//! A Wikidata JSON dump is one large array with one entity per line. The
//! pipeline reads it line by line, maps each record on a fixed set of
//! workers and writes one self-contained JSON-LD graph per line:
//!
//! ```text
//! [
//! {"id": "Q42", "type": "item", ...},        →  {"@graph": [dataset, node]}
//! {"id": "M9", "type": "mediainfo", ...},    →  {"@graph": [dataset, node, file]}
//! ]
//! ```
//!
//! Records that fail to decode, parse or map are dropped and reported on the
//! diagnostics writer as `Error: <error> in: <line>`. Progress reports
//! (`[0:00:08] At 40,960 (5120.000 lines/second)`) go to the same writer.
//!
//! Output order matches input order within each batch; batches are written
//! one at a time.
//!
//! # Configuration
//!
//! ```toml
//! [pipeline]
//! batch_size = 4096
//! workers = 8
//! report_interval_secs = 4
//! ```

#![warn(missing_docs)]

mod config;
mod convert;
mod error;
mod metrics;
mod pipeline;
mod pool;

pub use config::PipelineConfig;
pub use convert::{convert_bytes, convert_line, uninvert, LineOutcome};
pub use error::{LineError, PipelineError};
pub use metrics::{PipelineMetrics, ThroughputMeter};
pub use pipeline::BatchPipeline;
