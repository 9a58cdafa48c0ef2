use crate::domain::errors::FetchError;
use crate::domain::ports::StatusSource;
use crate::domain::value_kind::ValueKind;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use tracing::debug;

/// Fetches the NGINX Plus status document over HTTP.
pub struct HttpStatusSource {
    client: ClientWithMiddleware,
    url: String,
    api_version: u32,
}

impl HttpStatusSource {
    pub fn new(client: ClientWithMiddleware, url: impl Into<String>, api_version: u32) -> Self {
        Self {
            client,
            url: url.into(),
            api_version,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn api_version(&self) -> u32 {
        self.api_version
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    async fn fetch(&self) -> Result<Value, FetchError> {
        debug!("HttpStatusSource: GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: self.url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Request {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;

        let document: Value = serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;

        if !document.is_object() {
            return Err(FetchError::NotAnObject {
                url: self.url.clone(),
                found: ValueKind::of(&document).to_string(),
            });
        }

        debug!(
            "HttpStatusSource: decoded {} bytes from {}",
            body.len(),
            self.url
        );
        Ok(document)
    }

    fn describe(&self) -> String {
        format!("{} (api v{})", self.url, self.api_version)
    }
}
