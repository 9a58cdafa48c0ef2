//! Statsd gauge transport over UDP.

pub mod codec;
pub mod transport;

pub use transport::StatsdTransport;
