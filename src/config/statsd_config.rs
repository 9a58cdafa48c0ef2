//! Statsd backend configuration parsing from environment variables.

use super::EnvReader;
use anyhow::Result;

/// Statsd environment configuration
#[derive(Debug, Clone)]
pub struct StatsdEnvConfig {
    pub host: String,
    pub port: u16,
    /// Prepended to every metric name, joined with `.`
    pub prefix: String,
}

impl StatsdEnvConfig {
    pub fn from_reader(reader: &EnvReader<'_>) -> Result<Self> {
        Ok(Self {
            host: reader.string("STATSD_HOST", "localhost"),
            port: reader.parse("STATSD_PORT", 8125)?,
            prefix: reader.string("STATSD_PREFIX", "nginx.stats"),
        })
    }
}
