use crate::domain::errors::TransportError;
use crate::domain::ports::GaugeTransport;
use crate::infrastructure::statsd::codec::{encode_gauge, full_name};
use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;
use tokio::net::{UdpSocket, lookup_host};
use tracing::debug;

/// One statsd session per poll cycle: `open`, any number of `gauge`, `close`.
pub struct StatsdTransport {
    address: String,
    prefix: String,
    socket: Option<UdpSocket>,
}

impl StatsdTransport {
    pub fn new(address: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            prefix: prefix.into(),
            socket: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.socket.is_some()
    }

    async fn connect(&self) -> io::Result<UdpSocket> {
        let target: SocketAddr = lookup_host(&self.address).await?.next().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "address resolved to nothing")
        })?;

        // Bind in the same family as the backend, or the connect fails.
        let local = if target.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(local).await?;
        socket.connect(target).await?;
        Ok(socket)
    }
}

#[async_trait]
impl GaugeTransport for StatsdTransport {
    async fn open(&mut self) -> Result<(), TransportError> {
        let socket = self.connect().await.map_err(|source| TransportError::Open {
            addr: self.address.clone(),
            source,
        })?;
        debug!("StatsdTransport: session open to {}", self.address);
        self.socket = Some(socket);
        Ok(())
    }

    async fn gauge(&mut self, name: &str, value: i64) -> Result<(), TransportError> {
        let socket = self.socket.as_ref().ok_or(TransportError::NotOpen)?;
        let name = full_name(&self.prefix, name).ok_or(TransportError::EmptyName)?;
        let payload = encode_gauge(&name, value);

        socket
            .send(payload.as_bytes())
            .await
            .map_err(|source| TransportError::Send { name, source })?;
        Ok(())
    }

    async fn close(&mut self) {
        if self.socket.take().is_some() {
            debug!("StatsdTransport: session to {} closed", self.address);
        }
    }
}
