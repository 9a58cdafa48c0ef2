pub mod http_client_factory;
pub mod observability;
pub mod statsd;
pub mod status_client;

pub use http_client_factory::HttpClientFactory;
pub use statsd::StatsdTransport;
pub use status_client::HttpStatusSource;
