//! Metrics collection for pipeline runs

use std::time::{Duration, Instant};

/// Counters collected during a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineMetrics {
    /// Lines read from the input
    pub lines_read: usize,

    /// Records written to the output
    pub records_converted: usize,

    /// Records dropped because they failed to parse or map
    pub records_failed: usize,

    /// Lines that were not records
    pub lines_skipped: usize,

    /// Batches dispatched to the workers
    pub batch_count: usize,

    /// Total runtime in seconds
    pub total_runtime_secs: u64,
}

impl PipelineMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a converted record
    pub fn record_converted(&mut self) {
        self.records_converted += 1;
    }

    /// Record a dropped record
    pub fn record_failure(&mut self) {
        self.records_failed += 1;
    }

    /// Record a skipped line
    pub fn record_skip(&mut self) {
        self.lines_skipped += 1;
    }

    /// Record a completed batch
    pub fn record_batch(&mut self) {
        self.batch_count += 1;
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        [
            "Pipeline Metrics Summary".to_string(),
            "========================".to_string(),
            format!("Lines read: {}", group_thousands(self.lines_read)),
            format!("Records converted: {}", group_thousands(self.records_converted)),
            format!("Records failed: {}", group_thousands(self.records_failed)),
            format!("Lines skipped: {}", group_thousands(self.lines_skipped)),
            format!("Batches: {}", self.batch_count),
            format!("Total runtime: {}s", self.total_runtime_secs),
        ]
        .join("\n")
    }
}

/// Lines-per-second reporting between checkpoints
///
/// Reports look like `[0:01:04] At 1,234,567 (19290.109 lines/second)`.
/// The caller decides when to report; the pipeline does so on a timer.
#[derive(Debug, Clone)]
pub struct ThroughputMeter {
    start: Instant,
    checkpoint: Instant,
    checkpoint_count: usize,
}

impl Default for ThroughputMeter {
    fn default() -> Self {
        Self::new()
    }
}

impl ThroughputMeter {
    /// Create a meter starting now
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a meter starting at `start`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            checkpoint: start,
            checkpoint_count: 0,
        }
    }

    /// Report the running line count now
    pub fn report(&mut self, count: usize) -> Option<String> {
        self.report_at(count, Instant::now())
    }

    /// Report the running line count at `now` and start a new checkpoint
    ///
    /// The rate covers the lines seen since the previous checkpoint.
    /// Returns `None` if no time has passed since then.
    pub fn report_at(&mut self, count: usize, now: Instant) -> Option<String> {
        let elapsed = now.saturating_duration_since(self.checkpoint);
        if elapsed.is_zero() {
            return None;
        }

        let rate = count.saturating_sub(self.checkpoint_count) as f64 / elapsed.as_secs_f64();
        let report = format!(
            "[{}] At {} ({:.3} lines/second)",
            format_elapsed(now.saturating_duration_since(self.start)),
            group_thousands(count),
            rate
        );

        self.checkpoint = now;
        self.checkpoint_count = count;
        Some(report)
    }

    /// Time since the meter started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// `h:mm:ss`, whole seconds
fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// `1234567` → `1,234,567`
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = PipelineMetrics::new();
        assert_eq!(metrics.records_converted, 0);
        assert_eq!(metrics.records_failed, 0);
        assert_eq!(metrics.batch_count, 0);
    }

    #[test]
    fn test_record_and_reset() {
        let mut metrics = PipelineMetrics::new();
        metrics.lines_read = 4;
        metrics.record_converted();
        metrics.record_converted();
        metrics.record_failure();
        metrics.record_skip();
        metrics.record_batch();

        assert_eq!(metrics.records_converted, 2);
        assert_eq!(metrics.records_failed, 1);
        assert_eq!(metrics.lines_skipped, 1);
        assert_eq!(metrics.batch_count, 1);

        metrics.reset();
        assert_eq!(metrics, PipelineMetrics::default());
    }

    #[test]
    fn test_summary() {
        let mut metrics = PipelineMetrics::new();
        metrics.lines_read = 1_234_567;
        metrics.record_failure();
        metrics.total_runtime_secs = 120;

        let summary = metrics.summary();
        assert!(summary.contains("Lines read: 1,234,567"));
        assert!(summary.contains("Records failed: 1"));
        assert!(summary.contains("Total runtime: 120s"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(123456789), "123,456,789");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(4)), "0:00:04");
        assert_eq!(format_elapsed(Duration::from_secs(3725)), "1:02:05");
        assert_eq!(format_elapsed(Duration::from_secs(90000)), "25:00:00");
    }

    #[test]
    fn test_meter_rate_since_checkpoint() {
        let start = Instant::now();
        let mut meter = ThroughputMeter::starting_at(start);

        assert_eq!(meter.report_at(100, start), None);

        let report = meter.report_at(5000, start + Duration::from_secs(5)).unwrap();
        assert_eq!(report, "[0:00:05] At 5,000 (1000.000 lines/second)");

        let report = meter.report_at(9000, start + Duration::from_secs(10)).unwrap();
        assert_eq!(report, "[0:00:10] At 9,000 (800.000 lines/second)");

        assert_eq!(meter.report_at(9000, start + Duration::from_secs(10)), None);
    }
}
