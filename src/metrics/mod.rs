//! Basic metrics instrumentation.
//!
//! Counts HTTP requests and submission outcomes. Counters are shared atomics,
//! so clones of [`Metrics`] all feed the same totals.

use crate::verdict::Verdict;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector for the submission endpoint.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests served
    http_requests_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Submissions that passed validation
    submissions_accepted_total: Arc<AtomicU64>,

    /// Submissions that failed validation
    submissions_rejected_total: Arc<AtomicU64>,

    /// Submissions whose body was not JSON
    submissions_malformed_total: Arc<AtomicU64>,

    verdicts_yes_total: Arc<AtomicU64>,
    verdicts_no_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            submissions_accepted_total: Arc::new(AtomicU64::new(0)),
            submissions_rejected_total: Arc::new(AtomicU64::new(0)),
            submissions_malformed_total: Arc::new(AtomicU64::new(0)),
            verdicts_yes_total: Arc::new(AtomicU64::new(0)),
            verdicts_no_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record a submission that passed validation and the verdict it got.
    pub fn record_accepted(&self, verdict: Verdict) {
        self.submissions_accepted_total
            .fetch_add(1, Ordering::Relaxed);
        match verdict {
            Verdict::Yes => self.verdicts_yes_total.fetch_add(1, Ordering::Relaxed),
            Verdict::No => self.verdicts_no_total.fetch_add(1, Ordering::Relaxed),
        };
    }

    /// Record a submission that failed validation.
    pub fn record_rejected(&self) {
        self.submissions_rejected_total
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record a submission whose body could not be parsed.
    pub fn record_malformed(&self) {
        self.submissions_malformed_total
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_duration_total_ms: self.http_duration_total_ms.load(Ordering::Relaxed),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            submissions_accepted_total: self.submissions_accepted_total.load(Ordering::Relaxed),
            submissions_rejected_total: self.submissions_rejected_total.load(Ordering::Relaxed),
            submissions_malformed_total: self.submissions_malformed_total.load(Ordering::Relaxed),
            verdicts_yes_total: self.verdicts_yes_total.load(Ordering::Relaxed),
            verdicts_no_total: self.verdicts_no_total.load(Ordering::Relaxed),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub submissions_accepted_total: u64,
    pub submissions_rejected_total: u64,
    pub submissions_malformed_total: u64,
    pub verdicts_yes_total: u64,
    pub verdicts_no_total: u64,
}

/// Helper for timing HTTP requests.
pub struct RequestTimer {
    start: Instant,
    metrics: Metrics,
}

impl RequestTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) -> Duration {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        duration
    }
}
