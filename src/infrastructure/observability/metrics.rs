//! Prometheus metrics describing the poller itself
//!
//! All metrics use the `plusphite_` prefix. They track how the agent is doing,
//! not the values it forwards to statsd.

use crate::domain::emission::FlattenIssue;
use prometheus::{
    Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Point-in-time copy of the agent counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentCounters {
    pub cycles_ok: u64,
    pub cycles_failed: u64,
    pub gauges_sent: u64,
    pub gauges_failed: u64,
    pub flatten_issues: u64,
    pub last_emission_count: i64,
}

#[derive(Clone)]
pub struct AgentMetrics {
    registry: Arc<Registry>,
    /// Poll cycles by outcome (ok, failed)
    pub cycles_total: IntCounterVec,
    /// Gauges handed to the transport
    pub gauges_sent_total: IntCounter,
    /// Gauges the transport refused
    pub gauges_failed_total: IntCounter,
    /// Flatten issues by kind
    pub flatten_issues_total: IntCounterVec,
    /// Emissions produced by the latest successful cycle
    pub last_emission_count: IntGauge,
    /// Wall time of a full cycle in seconds
    pub cycle_duration_seconds: Histogram,
}

impl AgentMetrics {
    /// Create a new AgentMetrics instance with all series registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let cycles_total = IntCounterVec::new(
            Opts::new("plusphite_cycles_total", "Poll cycles by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(cycles_total.clone()))?;

        let gauges_sent_total = IntCounter::with_opts(Opts::new(
            "plusphite_gauges_sent_total",
            "Gauges handed to the statsd transport",
        ))?;
        registry.register(Box::new(gauges_sent_total.clone()))?;

        let gauges_failed_total = IntCounter::with_opts(Opts::new(
            "plusphite_gauges_failed_total",
            "Gauges the statsd transport failed to send",
        ))?;
        registry.register(Box::new(gauges_failed_total.clone()))?;

        let flatten_issues_total = IntCounterVec::new(
            Opts::new(
                "plusphite_flatten_issues_total",
                "Non-fatal anomalies found while flattening, by kind",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(flatten_issues_total.clone()))?;

        let last_emission_count = IntGauge::with_opts(Opts::new(
            "plusphite_last_emission_count",
            "Emissions produced by the latest successful cycle",
        ))?;
        registry.register(Box::new(last_emission_count.clone()))?;

        let cycle_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "plusphite_cycle_duration_seconds",
                "Poll cycle duration in seconds",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        )?;
        registry.register(Box::new(cycle_duration_seconds.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            cycles_total,
            gauges_sent_total,
            gauges_failed_total,
            flatten_issues_total,
            last_emission_count,
            cycle_duration_seconds,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn observe_cycle(&self, outcome: &str, elapsed: Duration) {
        self.cycles_total.with_label_values(&[outcome]).inc();
        self.cycle_duration_seconds.observe(elapsed.as_secs_f64());
    }

    pub fn add_gauges(&self, sent: u64, failed: u64) {
        self.gauges_sent_total.inc_by(sent);
        self.gauges_failed_total.inc_by(failed);
    }

    pub fn inc_issue(&self, kind: &str) {
        self.flatten_issues_total.with_label_values(&[kind]).inc();
    }

    pub fn snapshot(&self) -> AgentCounters {
        AgentCounters {
            cycles_ok: self.cycles_total.with_label_values(&["ok"]).get(),
            cycles_failed: self.cycles_total.with_label_values(&["failed"]).get(),
            gauges_sent: self.gauges_sent_total.get(),
            gauges_failed: self.gauges_failed_total.get(),
            flatten_issues: FlattenIssue::KINDS
                .iter()
                .map(|kind| self.flatten_issues_total.with_label_values(&[*kind]).get())
                .sum(),
            last_emission_count: self.last_emission_count.get(),
        }
    }
}
