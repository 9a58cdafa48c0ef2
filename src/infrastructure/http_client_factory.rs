use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates an HTTP client for polling the status endpoint.
    ///
    /// Transient failures (connect errors, 5xx, 429) are retried with
    /// exponential backoff, up to `max_retries` times within one fetch.
    pub fn create_client(
        timeout: Duration,
        max_retries: u32,
    ) -> Result<ClientWithMiddleware, reqwest::Error> {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);

        let client = Client::builder()
            .user_agent(concat!("plusphite/", env!("CARGO_PKG_VERSION")))
            .pool_max_idle_per_host(1)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;

        Ok(ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build())
    }
}
