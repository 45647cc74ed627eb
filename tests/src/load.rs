//! Concurrent load driver.
//!
//! Fires N `initiate` calls at once against one [`PaymentService`] and
//! aggregates the outcomes. The driver only speaks the boundary shapes;
//! it has no knowledge of which storage strategy is behind the service,
//! which is the point: the same load produces wildly different success
//! rates depending on that invisible choice.

use futures::future::join_all;
use pg_03_payments::{PaymentRequest, PaymentService};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Launches a fixed number of concurrent payment initiations.
pub struct LoadDriver {
    concurrency: usize,
}

impl LoadDriver {
    pub fn new(concurrency: usize) -> Self {
        Self { concurrency }
    }

    /// Runs all initiations concurrently and aggregates the results.
    ///
    /// Every task issues a well-formed request, so the only non-success
    /// outcome is a declined payment (generation timeout). Storage faults
    /// abort the run; they indicate a broken invariant, not load.
    pub async fn run(&self, service: Arc<PaymentService>) -> LoadReport {
        let tasks: Vec<_> = (0..self.concurrency)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    let request = PaymentRequest::new(
                        format!("4111 1111 1111 {:04}", i % 10_000),
                        format!("load-worker-{i}"),
                    );
                    let started = Instant::now();
                    let response = service.initiate(request).await.expect("storage fault");
                    (response.success, started.elapsed())
                })
            })
            .collect();

        let mut latencies = Vec::with_capacity(self.concurrency);
        let mut succeeded = 0usize;
        for joined in join_all(tasks).await {
            let (success, latency) = joined.expect("load task panicked");
            if success {
                succeeded += 1;
            }
            latencies.push(latency);
        }
        latencies.sort();

        LoadReport {
            total: self.concurrency,
            succeeded,
            timed_out: self.concurrency - succeeded,
            avg_latency: average(&latencies),
            p95_latency: percentile(&latencies, 95),
            p99_latency: percentile(&latencies, 99),
        }
    }
}

fn average(sorted: &[Duration]) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    sorted.iter().sum::<Duration>() / sorted.len() as u32
}

fn percentile(sorted: &[Duration], p: usize) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let rank = (p * sorted.len()).div_ceil(100);
    sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
}

/// Aggregate outcome of one load run.
#[derive(Clone, Debug)]
pub struct LoadReport {
    pub total: usize,
    pub succeeded: usize,
    pub timed_out: usize,
    pub avg_latency: Duration,
    pub p95_latency: Duration,
    pub p99_latency: Duration,
}

impl LoadReport {
    /// Fraction of initiations that ended with an issued code.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.succeeded as f64 / self.total as f64
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "╔══════════════════════════════════════╗")?;
        writeln!(f, "║            LOAD REPORT               ║")?;
        writeln!(f, "╠══════════════════════════════════════╣")?;
        writeln!(f, "║ total        {:>8}                ║", self.total)?;
        writeln!(f, "║ succeeded    {:>8}                ║", self.succeeded)?;
        writeln!(f, "║ timed out    {:>8}                ║", self.timed_out)?;
        writeln!(
            f,
            "║ success rate {:>7.1}%                ║",
            self.success_rate() * 100.0
        )?;
        writeln!(
            f,
            "║ avg latency  {:>8}ms              ║",
            self.avg_latency.as_millis()
        )?;
        writeln!(
            f,
            "║ p95 latency  {:>8}ms              ║",
            self.p95_latency.as_millis()
        )?;
        writeln!(
            f,
            "║ p99 latency  {:>8}ms              ║",
            self.p99_latency.as_millis()
        )?;
        write!(f, "╚══════════════════════════════════════╝")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_picks_upper_tail() {
        let sorted: Vec<Duration> = (1..=100).map(Duration::from_millis).collect();
        assert_eq!(percentile(&sorted, 95), Duration::from_millis(95));
        assert_eq!(percentile(&sorted, 99), Duration::from_millis(99));
    }

    #[test]
    fn test_percentile_of_empty_is_zero() {
        assert_eq!(percentile(&[], 95), Duration::ZERO);
        assert_eq!(average(&[]), Duration::ZERO);
    }

    #[test]
    fn test_success_rate() {
        let report = LoadReport {
            total: 40,
            succeeded: 10,
            timed_out: 30,
            avg_latency: Duration::ZERO,
            p95_latency: Duration::ZERO,
            p99_latency: Duration::ZERO,
        };
        assert!((report.success_rate() - 0.25).abs() < f64::EPSILON);
    }
}
