//! Push-based observability for the poller itself
//!
//! This module provides observability through **outbound data only**: no HTTP
//! server, no incoming requests. Agent counters are kept in a Prometheus
//! registry and pushed periodically as structured JSON lines on stdout
//! (for Loki, Fluentd, CloudWatch).

pub mod metrics;
pub mod reporter;

pub use metrics::{AgentCounters, AgentMetrics};
pub use reporter::MetricsReporter;
