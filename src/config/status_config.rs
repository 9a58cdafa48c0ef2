//! Status source configuration parsing from environment variables.
//!
//! Covers where the status document lives, how often it is polled, and how a
//! failing fetch is treated.

use super::EnvReader;
use anyhow::Result;

/// Status source environment configuration
#[derive(Debug, Clone)]
pub struct StatusEnvConfig {
    pub url: String,
    /// Schema version of the status document. Logged, never interpreted.
    pub api_version: u32,
    pub interval_secs: u64,
    pub timeout_secs: u64,
    pub fetch_retries: u32,
    /// Stop the poller on the first failed cycle instead of retrying next tick.
    pub fail_fast: bool,
}

impl StatusEnvConfig {
    pub fn from_reader(reader: &EnvReader<'_>) -> Result<Self> {
        Ok(Self {
            url: reader.string("STATUS_URL", "http://localhost/status"),
            api_version: reader.parse("STATUS_API_VERSION", 5)?,
            interval_secs: reader.parse("POLL_INTERVAL_SECS", 10)?,
            timeout_secs: reader.parse("STATUS_TIMEOUT_SECS", 10)?,
            fetch_retries: reader.parse("STATUS_FETCH_RETRIES", 2)?,
            fail_fast: reader.parse_bool("FAIL_FAST", false),
        })
    }
}
