//! plusphite - NGINX Plus status to statsd gauges
//!
//! Polls the NGINX Plus JSON status endpoint, flattens it into dot-delimited
//! metric names and pushes every numeric leaf to statsd as a gauge.
//!
//! # Usage
//! ```sh
//! plusphite -H graphite.internal -p 8125 -m nginx.stats -i 10 -u http://localhost/status
//! ```
//!
//! Every flag falls back to an environment variable (see `Config::from_env`),
//! and a `.env` file is loaded first if present.

use anyhow::{Context, Result};
use clap::Parser;
use plusphite::application::StatusPoller;
use plusphite::config::Config;
use plusphite::domain::Flattener;
use plusphite::infrastructure::observability::{AgentMetrics, MetricsReporter};
use plusphite::infrastructure::{HttpClientFactory, HttpStatusSource, StatsdTransport};
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Forward NGINX Plus status counters to statsd", long_about = None)]
struct Cli {
    /// Hostname for statsd
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port for statsd
    #[arg(short, long)]
    port: Option<u16>,

    /// Metric path prefix
    #[arg(short, long)]
    metric_path: Option<String>,

    /// Check stats each <INTERVAL> seconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// NGINX Plus status URL
    #[arg(short, long)]
    url: Option<String>,

    /// NGINX Plus JSON version
    #[arg(short = 'v', long)]
    api_version: Option<u32>,

    /// HTTP timeout for one status fetch, in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Retries for a failing status fetch within one cycle
    #[arg(long)]
    retries: Option<u32>,

    /// Exit on the first failed cycle instead of retrying next interval
    #[arg(long)]
    fail_fast: bool,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.statsd_host = host;
        }
        if let Some(port) = self.port {
            config.statsd_port = port;
        }
        if let Some(prefix) = self.metric_path {
            config.metric_prefix = prefix;
        }
        if let Some(interval) = self.interval {
            config.poll_interval_secs = interval;
        }
        if let Some(url) = self.url {
            config.status_url = url;
        }
        if let Some(version) = self.api_version {
            config.api_version = version;
        }
        if let Some(timeout) = self.timeout {
            config.fetch_timeout_secs = timeout;
        }
        if let Some(retries) = self.retries {
            config.fetch_retries = retries;
        }
        config.fail_fast |= self.fail_fast;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("plusphite {} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = Config::from_env()?;
    cli.apply(&mut config);
    config.validate().context("Invalid configuration")?;
    info!(
        "Configuration loaded: statsd={} prefix={:?} url={} interval={}s",
        config.statsd_address(),
        config.metric_prefix,
        config.status_url,
        config.poll_interval_secs
    );

    let client = HttpClientFactory::create_client(config.fetch_timeout(), config.fetch_retries)
        .context("Failed to build HTTP client")?;
    let source = HttpStatusSource::new(client, config.status_url.clone(), config.api_version);
    let transport = StatsdTransport::new(config.statsd_address(), config.metric_prefix.clone());
    let metrics = AgentMetrics::new()?;

    if config.observability_enabled {
        let reporter = MetricsReporter::new(metrics.clone(), config.observability_interval_secs);
        tokio::spawn(async move {
            reporter.run().await;
        });
        info!(
            "Metrics reporter started (interval: {}s)",
            config.observability_interval_secs
        );
    } else {
        info!("Metrics reporting disabled.");
    }

    let poller = StatusPoller::new(
        Arc::new(source),
        Box::new(transport),
        Flattener::new(config.filter_sets()),
        metrics,
        config.poll_interval(),
    )
    .with_fail_fast(config.fail_fast);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Cannot listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    poller.run(shutdown).await?;
    info!("Shutdown complete.");

    Ok(())
}
