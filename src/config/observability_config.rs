//! Observability configuration parsing from environment variables.
//!
//! This module handles loading the agent's own metrics reporting settings.

use super::EnvReader;
use anyhow::Result;

/// Observability environment configuration
#[derive(Debug, Clone)]
pub struct ObservabilityEnvConfig {
    pub enabled: bool,
    pub interval_secs: u64,
}

impl Default for ObservabilityEnvConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 60,
        }
    }
}

impl ObservabilityEnvConfig {
    pub fn from_reader(reader: &EnvReader<'_>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            enabled: reader.parse_bool("OBSERVABILITY_ENABLED", defaults.enabled),
            interval_secs: reader.parse("OBSERVABILITY_INTERVAL", defaults.interval_secs)?,
        })
    }
}
