//! Configuration module for plusphite.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Statsd, Status source, Filters, and Observability.
//! Command-line flags are applied on top by the binary.

mod filter_config;
mod observability_config;
mod statsd_config;
mod status_config;

pub use filter_config::FilterEnvConfig;
pub use observability_config::ObservabilityEnvConfig;
pub use statsd_config::StatsdEnvConfig;
pub use status_config::StatusEnvConfig;

use crate::domain::filters::FilterSets;
use anyhow::{Context, Result, bail, ensure};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Key/value lookup that configuration is read from.
///
/// `from_env` uses the process environment; tests pass a map instead.
pub struct EnvReader<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl<'a> EnvReader<'a> {
    pub fn new(lookup: &'a dyn Fn(&str) -> Option<String>) -> Self {
        Self { lookup }
    }

    pub fn string(&self, key: &str, default: &str) -> String {
        (self.lookup)(key).unwrap_or_else(|| default.to_string())
    }

    pub fn parse<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match (self.lookup)(key) {
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("Failed to parse {}", key)),
            None => Ok(default),
        }
    }

    pub fn parse_bool(&self, key: &str, default: bool) -> bool {
        (self.lookup)(key)
            .and_then(|raw| raw.trim().to_lowercase().parse::<bool>().ok())
            .unwrap_or(default)
    }

    /// Comma-separated list. An unset key yields `default`; a set but blank key
    /// yields an empty list.
    pub fn list(&self, key: &str, default: &[&str]) -> Vec<String> {
        match (self.lookup)(key) {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => default.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    // Statsd (from StatsdEnvConfig)
    pub statsd_host: String,
    pub statsd_port: u16,
    pub metric_prefix: String,

    // Status source (from StatusEnvConfig)
    pub status_url: String,
    pub api_version: u32,
    pub poll_interval_secs: u64,
    pub fetch_timeout_secs: u64,
    pub fetch_retries: u32,
    pub fail_fast: bool,

    // Filters (from FilterEnvConfig)
    pub subtree_ignore: Vec<String>,
    pub leaf_ignore: Vec<String>,

    // Observability (from ObservabilityEnvConfig)
    pub observability_enabled: bool,
    pub observability_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let lookup = |key: &str| env::var(key).ok();
        Self::from_lookup(&lookup)
    }

    /// Load configuration from an arbitrary key/value lookup.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let reader = EnvReader::new(lookup);

        let statsd = StatsdEnvConfig::from_reader(&reader).context("Failed to load statsd config")?;
        let status = StatusEnvConfig::from_reader(&reader).context("Failed to load status config")?;
        let filters = FilterEnvConfig::from_reader(&reader);
        let observability = ObservabilityEnvConfig::from_reader(&reader)
            .context("Failed to load observability config")?;

        Ok(Self {
            statsd_host: statsd.host,
            statsd_port: statsd.port,
            metric_prefix: statsd.prefix,

            status_url: status.url,
            api_version: status.api_version,
            poll_interval_secs: status.interval_secs,
            fetch_timeout_secs: status.timeout_secs,
            fetch_retries: status.fetch_retries,
            fail_fast: status.fail_fast,

            subtree_ignore: filters.subtree_ignore,
            leaf_ignore: filters.leaf_ignore,

            observability_enabled: observability.enabled,
            observability_interval_secs: observability.interval_secs,
        })
    }

    /// Reject settings the poller cannot run with.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.status_url)
            .with_context(|| format!("Invalid status URL: {}", self.status_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "Status URL must use http or https, got '{}'",
                url.scheme()
            );
        }
        ensure!(self.poll_interval_secs > 0, "Poll interval must be at least 1 second");
        ensure!(!self.statsd_host.trim().is_empty(), "Statsd host must not be empty");
        ensure!(
            self.observability_interval_secs > 0,
            "Observability interval must be at least 1 second"
        );
        Ok(())
    }

    pub fn statsd_address(&self) -> String {
        format!("{}:{}", self.statsd_host, self.statsd_port)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Build the FilterSets domain value from this Config
    pub fn filter_sets(&self) -> FilterSets {
        FilterSets::new(self.subtree_ignore.iter().cloned(), self.leaf_ignore.iter().cloned())
    }
}
