use crate::domain::emission::Emission;
use crate::domain::errors::{FetchError, TransportError};
use async_trait::async_trait;
use serde_json::Value;

/// Receives emissions synchronously, in traversal order.
pub trait EmissionSink {
    fn emit(&mut self, emission: Emission);
}

impl EmissionSink for Vec<Emission> {
    fn emit(&mut self, emission: Emission) {
        self.push(emission);
    }
}

/// Retrieves and decodes the monitored service's status document.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self) -> Result<Value, FetchError>;

    /// Where the document comes from, for logs.
    fn describe(&self) -> String;
}

/// Gauge session towards the metrics backend.
///
/// `gauge` returning `Ok` means the sample was handed to the transport, not
/// that it was delivered.
#[async_trait]
pub trait GaugeTransport: Send {
    async fn open(&mut self) -> Result<(), TransportError>;
    async fn gauge(&mut self, name: &str, value: i64) -> Result<(), TransportError>;
    async fn close(&mut self);
}
