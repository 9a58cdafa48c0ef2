//! Push-based metrics reporter
//!
//! Periodically outputs the agent counters as structured JSON to stdout.

use crate::infrastructure::observability::metrics::{AgentCounters, AgentMetrics};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Metrics snapshot for JSON output
#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub counters: AgentCounters,
}

/// Push-based metrics reporter
///
/// No HTTP server, no incoming connections - only outbound data.
pub struct MetricsReporter {
    metrics: AgentMetrics,
    start_time: Instant,
    interval: Duration,
}

impl MetricsReporter {
    pub fn new(metrics: AgentMetrics, interval_seconds: u64) -> Self {
        Self {
            metrics,
            start_time: Instant::now(),
            interval: Duration::from_secs(interval_seconds),
        }
    }

    /// Run the reporter in a loop, outputting metrics periodically
    pub async fn run(self) {
        info!(
            "MetricsReporter: Starting push-based metrics (interval: {:?})",
            self.interval
        );

        loop {
            tokio::time::sleep(self.interval).await;

            let snapshot = self.collect_snapshot();
            match serde_json::to_string(&snapshot) {
                Ok(json) => {
                    // Prefixed so the line can be filtered out of the log stream
                    println!("METRICS_JSON:{}", json);
                    info!(
                        "Cycles: {} ok / {} failed | Gauges sent: {} | Uptime: {}s",
                        snapshot.counters.cycles_ok,
                        snapshot.counters.cycles_failed,
                        snapshot.counters.gauges_sent,
                        snapshot.uptime_seconds
                    );
                }
                Err(e) => warn!("Failed to serialize metrics: {}", e),
            }
        }
    }

    fn collect_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            counters: self.metrics.snapshot(),
        }
    }
}
