//! Batch dispatcher: reads lines, fans batches out to the workers and writes
//! results back in input order

use std::future::Future;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{self, MissedTickBehavior};
use wd2rdbl_mapper::Mapper;

use crate::config::PipelineConfig;
use crate::convert::LineOutcome;
use crate::error::PipelineError;
use crate::metrics::{PipelineMetrics, ThroughputMeter};
use crate::pool::WorkerPool;

/// Streams a line-oriented entity dump through the mapper
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use serde_json::json;
/// use wd2rdbl_mapper::{Mapper, VocabularyIndex};
/// use wd2rdbl_pipeline::{BatchPipeline, PipelineConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let vocab = VocabularyIndex::build(&json!({"terms": {}}))?;
/// let mut pipeline = BatchPipeline::new(Arc::new(Mapper::new(vocab)), PipelineConfig::small())?;
///
/// let input: &[u8] = b"[\n{\"id\": \"Q1\", \"type\": \"item\"},\n]\n";
/// let mut output = Vec::new();
/// let mut diagnostics = Vec::new();
/// let metrics = pipeline
///     .run_until(input, &mut output, &mut diagnostics, std::future::pending())
///     .await?;
///
/// assert_eq!(metrics.records_converted, 1);
/// assert_eq!(String::from_utf8(output)?.lines().count(), 1);
/// # Ok(())
/// # }
/// ```
pub struct BatchPipeline {
    mapper: Arc<Mapper>,
    config: PipelineConfig,
    metrics: PipelineMetrics,
}

impl BatchPipeline {
    /// Create a pipeline over a shared mapper
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the configuration is invalid.
    pub fn new(mapper: Arc<Mapper>, config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            mapper,
            config,
            metrics: PipelineMetrics::new(),
        })
    }

    /// Get the pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Get metrics of the last run
    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    /// Run until the input is exhausted or Ctrl+C is received
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Interrupted`] on Ctrl+C, or an I/O error if
    /// the input cannot be read or the output cannot be written.
    pub async fn run<R, W, D>(
        &mut self,
        input: R,
        output: W,
        diagnostics: D,
    ) -> Result<PipelineMetrics, PipelineError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        D: AsyncWrite + Unpin,
    {
        let interrupt = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Cannot listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        };
        self.run_until(input, output, diagnostics, interrupt).await
    }

    /// Run until the input is exhausted or `shutdown` completes
    ///
    /// Lines are collected into batches of `batch_size`. Each batch is
    /// converted by the workers and written as a whole, so an interrupt never
    /// leaves a partial batch on the output. Progress is reported every
    /// `report_interval`, whether or not a batch is in flight.
    pub async fn run_until<R, W, D, F>(
        &mut self,
        mut input: R,
        mut output: W,
        mut diagnostics: D,
        shutdown: F,
    ) -> Result<PipelineMetrics, PipelineError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        D: AsyncWrite + Unpin,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        self.metrics.reset();
        let mut meter = ThroughputMeter::new();
        let period = self.config.report_interval();
        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut pool = WorkerPool::spawn(
            Arc::clone(&self.mapper),
            self.config.workers,
            self.config.channel_capacity(),
        );

        tracing::info!(
            "Pipeline started (batch size: {}, workers: {})",
            self.config.batch_size,
            self.config.workers
        );

        let mut line = Vec::new();
        let mut exhausted = false;
        while !exhausted {
            let mut batch = Vec::with_capacity(self.config.batch_size);
            while batch.len() < self.config.batch_size {
                // A partial read stays in `line` if the ticker wins
                tokio::select! {
                    biased;
                    _ = &mut shutdown => return self.interrupted(pool, &mut diagnostics).await,
                    _ = ticker.tick() => {
                        report_progress(&mut meter, self.metrics.lines_read, &mut diagnostics).await?
                    }
                    read = input.read_until(b'\n', &mut line) => {
                        if read? == 0 {
                            exhausted = true;
                            break;
                        }
                        self.metrics.lines_read += 1;
                        batch.push(std::mem::take(&mut line));
                    }
                }
            }

            if batch.is_empty() {
                break;
            }

            let outcomes = {
                let process = pool.process(batch);
                tokio::pin!(process);
                loop {
                    tokio::select! {
                        biased;
                        _ = &mut shutdown => break None,
                        _ = ticker.tick() => {
                            report_progress(&mut meter, self.metrics.lines_read, &mut diagnostics)
                                .await?
                        }
                        outcomes = &mut process => break Some(outcomes?),
                    }
                }
            };
            let Some(outcomes) = outcomes else {
                return self.interrupted(pool, &mut diagnostics).await;
            };

            self.write_batch(outcomes, &mut output, &mut diagnostics).await?;
            self.metrics.record_batch();
        }

        pool.shutdown().await?;
        output.flush().await?;
        diagnostics.flush().await?;

        self.metrics.total_runtime_secs = meter.elapsed().as_secs();
        tracing::info!("Pipeline stopped. Final metrics:\n{}", self.metrics.summary());

        Ok(self.metrics.clone())
    }

    /// Write one batch: converted records to `output`, failures to
    /// `diagnostics`
    async fn write_batch<W, D>(
        &mut self,
        outcomes: Vec<LineOutcome>,
        output: &mut W,
        diagnostics: &mut D,
    ) -> Result<(), PipelineError>
    where
        W: AsyncWrite + Unpin,
        D: AsyncWrite + Unpin,
    {
        let mut records = String::new();
        let mut errors = String::new();

        for outcome in outcomes {
            match outcome {
                LineOutcome::Converted(line) => {
                    records.push_str(&line);
                    records.push('\n');
                    self.metrics.record_converted();
                }
                LineOutcome::Failed { line, error } => {
                    tracing::warn!("Dropped record: {}", error);
                    errors.push_str(&format!("Error: {} in: {}\n", error, line));
                    self.metrics.record_failure();
                }
                LineOutcome::Skipped => self.metrics.record_skip(),
            }
        }

        if !records.is_empty() {
            output.write_all(records.as_bytes()).await?;
            output.flush().await?;
        }
        if !errors.is_empty() {
            diagnostics.write_all(errors.as_bytes()).await?;
            diagnostics.flush().await?;
        }
        Ok(())
    }

    async fn interrupted<D>(
        &mut self,
        pool: WorkerPool,
        diagnostics: &mut D,
    ) -> Result<PipelineMetrics, PipelineError>
    where
        D: AsyncWrite + Unpin,
    {
        pool.abort();
        diagnostics.write_all(b"Aborted.\n").await?;
        diagnostics.flush().await?;

        tracing::info!(
            "Pipeline interrupted after {} lines ({} records written)",
            self.metrics.lines_read,
            self.metrics.records_converted
        );
        Err(PipelineError::Interrupted)
    }
}

async fn report_progress<D>(
    meter: &mut ThroughputMeter,
    lines_read: usize,
    diagnostics: &mut D,
) -> Result<(), PipelineError>
where
    D: AsyncWrite + Unpin,
{
    if let Some(report) = meter.report(lines_read) {
        diagnostics.write_all(format!("{}\n", report).as_bytes()).await?;
        diagnostics.flush().await?;
    }
    Ok(())
}
