//! Dump command implementation.

use crate::cli::DumpArgs;
use crate::config::Config;
use crate::error::Result;
use std::sync::Arc;
use tokio::io::{BufReader, BufWriter};
use wd2rdbl_pipeline::BatchPipeline;

use super::load_mapper;

const IO_BUFFER_SIZE: usize = 1 << 20;

/// Execute the dump command.
///
/// Records go to stdout; dropped records, progress and `Aborted.` go to
/// stderr.
pub async fn execute_dump(args: DumpArgs, config: &Config) -> Result<()> {
    let mapper = Arc::new(load_mapper(&config.vocabulary)?);

    let mut pipeline_config = config.pipeline.clone();
    args.apply_to(&mut pipeline_config);
    let mut pipeline = BatchPipeline::new(mapper, pipeline_config)?;

    let output = BufWriter::with_capacity(IO_BUFFER_SIZE, tokio::io::stdout());
    let diagnostics = tokio::io::stderr();

    let metrics = match &args.input {
        Some(path) => {
            let file = tokio::fs::File::open(path).await?;
            let input = BufReader::with_capacity(IO_BUFFER_SIZE, file);
            pipeline.run(input, output, diagnostics).await?
        }
        None => {
            let input = BufReader::with_capacity(IO_BUFFER_SIZE, tokio::io::stdin());
            pipeline.run(input, output, diagnostics).await?
        }
    };

    tracing::info!(
        "Converted {} records ({} dropped)",
        metrics.records_converted,
        metrics.records_failed
    );
    Ok(())
}
