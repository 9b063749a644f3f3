//! Fixed set of mapping workers fed over a bounded channel

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use wd2rdbl_mapper::Mapper;

use crate::convert::{convert_bytes, LineOutcome};
use crate::error::PipelineError;

/// One line of a batch, tagged with its position
#[derive(Debug)]
struct Job {
    seq: usize,
    line: Vec<u8>,
}

/// Workers share one job receiver and one result sender
///
/// Mapping is CPU-bound, so each job runs on the blocking thread pool; the
/// worker tasks only shuttle jobs and results.
pub(crate) struct WorkerPool {
    jobs: Option<mpsc::Sender<Job>>,
    results: mpsc::Receiver<(usize, LineOutcome)>,
    workers: JoinSet<()>,
}

impl WorkerPool {
    /// Start `workers` tasks over a shared mapper
    pub(crate) fn spawn(mapper: Arc<Mapper>, workers: usize, capacity: usize) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<Job>(capacity);
        let (result_tx, result_rx) = mpsc::channel(capacity);
        let job_rx = Arc::new(Mutex::new(job_rx));

        let mut set = JoinSet::new();
        for worker in 0..workers {
            let jobs = Arc::clone(&job_rx);
            let results = result_tx.clone();
            let mapper = Arc::clone(&mapper);

            set.spawn(async move {
                loop {
                    let job = jobs.lock().await.recv().await;
                    let Some(Job { seq, line }) = job else {
                        break;
                    };

                    let mapper = Arc::clone(&mapper);
                    let outcome =
                        match tokio::task::spawn_blocking(move || convert_bytes(&mapper, &line)).await {
                            Ok(outcome) => outcome,
                            Err(e) => {
                                tracing::error!("Worker {} failed on line {}: {}", worker, seq, e);
                                break;
                            }
                        };

                    if results.send((seq, outcome)).await.is_err() {
                        break;
                    }
                }
                tracing::debug!("Worker {} stopped", worker);
            });
        }

        Self {
            jobs: Some(job_tx),
            results: result_rx,
            workers: set,
        }
    }

    /// Convert one batch, returning outcomes in input order
    ///
    /// Jobs are dispatched while results are collected, so a batch larger
    /// than the channel capacity cannot stall.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Worker`] if a worker stops while the batch is
    /// in flight.
    pub(crate) async fn process(
        &mut self,
        batch: Vec<Vec<u8>>,
    ) -> Result<Vec<LineOutcome>, PipelineError> {
        let jobs = self
            .jobs
            .as_ref()
            .ok_or_else(|| PipelineError::Worker("worker pool is shut down".to_string()))?;

        let total = batch.len();
        let mut slots: Vec<Option<LineOutcome>> = (0..total).map(|_| None).collect();
        let mut pending = batch.into_iter().enumerate();
        let mut next = pending.next();
        let mut received = 0;

        while received < total {
            tokio::select! {
                permit = jobs.reserve(), if next.is_some() => {
                    let permit = permit
                        .map_err(|_| PipelineError::Worker("job channel closed".to_string()))?;
                    if let Some((seq, line)) = next.take() {
                        permit.send(Job { seq, line });
                    }
                    next = pending.next();
                }
                reply = self.results.recv() => {
                    let (seq, outcome) = reply
                        .ok_or_else(|| PipelineError::Worker("all workers stopped".to_string()))?;
                    if let Some(slot) = slots.get_mut(seq) {
                        *slot = Some(outcome);
                        received += 1;
                    }
                }
                Some(joined) = self.workers.join_next() => {
                    return Err(PipelineError::Worker(match joined {
                        Ok(()) => "worker exited mid-batch".to_string(),
                        Err(e) => e.to_string(),
                    }));
                }
            }
        }

        slots
            .into_iter()
            .map(|slot| slot.ok_or_else(|| PipelineError::Worker("missing result".to_string())))
            .collect()
    }

    /// Close the job channel and wait for every worker to finish
    pub(crate) async fn shutdown(mut self) -> Result<(), PipelineError> {
        self.jobs.take();
        while let Some(joined) = self.workers.join_next().await {
            joined.map_err(|e| PipelineError::Worker(e.to_string()))?;
        }
        Ok(())
    }

    /// Stop every worker without waiting for in-flight jobs
    pub(crate) fn abort(mut self) {
        self.jobs.take();
        self.workers.abort_all();
    }
}
