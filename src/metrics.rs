//! Session statistics for the request loop.

use crate::types::decision::LoanDecision;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

/// Counters and latency samples for one predictor session
pub struct SessionMetrics {
    /// Total requests received
    pub requests: AtomicU64,
    /// Requests that ended in an approval
    pub approved: AtomicU64,
    /// Requests that ended in a rejection
    pub rejected: AtomicU64,
    /// Requests that produced no decision
    pub failed: AtomicU64,
    /// Scoring times (in microseconds)
    latencies: RwLock<Vec<u64>>,
    /// Repayment probability distribution buckets
    probability_buckets: RwLock<[u64; 10]>,
    /// Session start
    start_time: Instant,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            requests: AtomicU64::new(0),
            approved: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            latencies: RwLock::new(Vec::with_capacity(256)),
            probability_buckets: RwLock::new([0; 10]),
            start_time: Instant::now(),
        }
    }

    /// Record a successfully scored request
    pub fn record_decision(&self, latency: Duration, decision: &LoanDecision) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        if decision.approved {
            self.approved.fetch_add(1, Ordering::Relaxed);
        } else {
            self.rejected.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut latencies) = self.latencies.write() {
            latencies.push(latency.as_micros() as u64);
            // Keep only last 10000
            if latencies.len() > 10000 {
                latencies.drain(0..5000);
            }
        }

        let bucket = (decision.probability_of_repayment * 10.0).clamp(0.0, 9.0) as usize;
        if let Ok(mut buckets) = self.probability_buckets.write() {
            buckets[bucket] += 1;
        }
    }

    /// Record a request that was rejected before or during scoring
    pub fn record_failure(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Latency statistics over recorded decisions
    pub fn latency_stats(&self) -> LatencyStats {
        let sorted = match self.latencies.read() {
            Ok(latencies) if !latencies.is_empty() => {
                let mut sorted = latencies.clone();
                sorted.sort_unstable();
                sorted
            }
            _ => return LatencyStats::default(),
        };

        let count = sorted.len();
        let sum: u64 = sorted.iter().sum();
        let at = |q: f64| sorted[((count as f64 * q) as usize).min(count - 1)];

        LatencyStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: at(0.5),
            p95_us: at(0.95),
            max_us: sorted[count - 1],
        }
    }

    /// Share of scored requests that were approved
    pub fn approval_rate(&self) -> f64 {
        let approved = self.approved.load(Ordering::Relaxed);
        let scored = approved + self.rejected.load(Ordering::Relaxed);
        if scored == 0 {
            0.0
        } else {
            approved as f64 / scored as f64
        }
    }

    /// Repayment probability distribution
    pub fn probability_distribution(&self) -> [u64; 10] {
        self.probability_buckets
            .read()
            .map(|buckets| *buckets)
            .unwrap_or_default()
    }

    /// Log a summary of the session
    pub fn print_summary(&self) {
        let requests = self.requests.load(Ordering::Relaxed);
        let approved = self.approved.load(Ordering::Relaxed);
        let rejected = self.rejected.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let latency = self.latency_stats();

        info!(
            requests = requests,
            approved = approved,
            rejected = rejected,
            failed = failed,
            approval_rate = format!("{:.1}%", self.approval_rate() * 100.0),
            elapsed_ms = self.start_time.elapsed().as_millis() as u64,
            "Session summary"
        );
        info!(
            mean_us = latency.mean_us,
            p50_us = latency.p50_us,
            p95_us = latency.p95_us,
            max_us = latency.max_us,
            "Scoring latency"
        );

        let distribution = self.probability_distribution();
        let total: u64 = distribution.iter().sum();
        for (i, &count) in distribution.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let pct = (count as f64 / total as f64) * 100.0;
            info!(
                "  {:.1}-{:.1}: {:>6} ({:>5.1}%) {}",
                i as f64 / 10.0,
                (i + 1) as f64 / 10.0,
                count,
                pct,
                "█".repeat(((pct / 5.0) as usize).min(20))
            );
        }
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoring latency statistics
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LatencyStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub max_us: u64,
}
