//! Fetch, flatten, and forward, once per interval.

use crate::domain::emission::FlattenIssue;
use crate::domain::errors::CycleError;
use crate::domain::flattener::Flattener;
use crate::domain::ports::{GaugeTransport, StatusSource};
use crate::infrastructure::observability::AgentMetrics;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Outcome of one completed poll cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub emissions: usize,
    pub gauges_sent: u64,
    pub gauges_failed: u64,
    pub issues: Vec<FlattenIssue>,
}

pub struct StatusPoller {
    source: Arc<dyn StatusSource>,
    transport: Box<dyn GaugeTransport>,
    flattener: Flattener,
    metrics: AgentMetrics,
    interval: Duration,
    fail_fast: bool,
}

impl StatusPoller {
    pub fn new(
        source: Arc<dyn StatusSource>,
        transport: Box<dyn GaugeTransport>,
        flattener: Flattener,
        metrics: AgentMetrics,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            transport,
            flattener,
            metrics,
            interval,
            fail_fast: false,
        }
    }

    /// Stop `run` on the first failed cycle instead of waiting for the next tick.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn metrics(&self) -> &AgentMetrics {
        &self.metrics
    }

    /// Run a single cycle and record its outcome.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, CycleError> {
        let started = Instant::now();
        let result = self.poll_once().await;
        let elapsed = started.elapsed();

        match &result {
            Ok(report) => {
                self.metrics.observe_cycle("ok", elapsed);
                self.metrics
                    .add_gauges(report.gauges_sent, report.gauges_failed);
                self.metrics.last_emission_count.set(report.emissions as i64);
                for issue in &report.issues {
                    self.metrics.inc_issue(issue.kind());
                }
                info!(
                    "StatusPoller: {} gauges sent, {} failed, {} issues in {:?}",
                    report.gauges_sent,
                    report.gauges_failed,
                    report.issues.len(),
                    elapsed
                );
            }
            Err(e) => {
                self.metrics.observe_cycle("failed", elapsed);
                warn!("StatusPoller: cycle failed after {:?}: {}", elapsed, e);
            }
        }

        result
    }

    async fn poll_once(&mut self) -> Result<CycleReport, CycleError> {
        self.transport.open().await?;

        let document = match self.source.fetch().await {
            Ok(document) => document,
            Err(e) => {
                self.transport.close().await;
                return Err(e.into());
            }
        };

        let flattened = self.flattener.flatten(&document);

        let mut report = CycleReport {
            emissions: flattened.emissions.len(),
            issues: flattened.issues,
            ..CycleReport::default()
        };

        // No retry: a lost gauge is picked up again on the next cycle.
        for emission in &flattened.emissions {
            match self.transport.gauge(&emission.name, emission.value).await {
                Ok(()) => report.gauges_sent += 1,
                Err(e) => {
                    warn!("StatusPoller: {}", e);
                    report.gauges_failed += 1;
                }
            }
        }

        self.transport.close().await;
        Ok(report)
    }

    /// Poll until `shutdown` resolves.
    ///
    /// A cycle in progress always finishes; shutdown is only observed while
    /// sleeping between cycles.
    pub async fn run<F>(mut self, shutdown: F) -> Result<(), CycleError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!(
            "StatusPoller: polling {} every {:?}",
            self.source.describe(),
            self.interval
        );

        loop {
            info!("StatusPoller: Running...");
            if let Err(e) = self.run_cycle().await {
                if self.fail_fast {
                    error!("StatusPoller: stopping after failed cycle (fail-fast)");
                    return Err(e);
                }
            }

            info!("StatusPoller: Done! Sleeping for {:?}", self.interval);
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = &mut shutdown => {
                    info!("StatusPoller: shutdown requested, stopping");
                    return Ok(());
                }
            }
        }
    }
}
