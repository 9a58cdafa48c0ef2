use thiserror::Error;

/// Errors raised while retrieving and decoding the status document
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("Status endpoint {url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Status document from {url} is not valid JSON: {reason}")]
    Decode { url: String, reason: String },

    #[error("Status document from {url} has a {found} root, expected an object")]
    NotAnObject { url: String, found: String },
}

/// Errors raised by the statsd transport session
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Cannot open statsd session to {addr}: {source}")]
    Open {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Statsd session is not open")]
    NotOpen,

    #[error("Refusing to send a gauge with an empty metric name")]
    EmptyName,

    #[error("Failed to send gauge {name}: {source}")]
    Send {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// A poll cycle that could not run to completion
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_formatting() {
        let error = FetchError::Status {
            url: "http://localhost/status".to_string(),
            status: 503,
        };

        let msg = error.to_string();
        assert!(msg.contains("http://localhost/status"));
        assert!(msg.contains("503"));
    }

    #[test]
    fn test_not_an_object_formatting() {
        let error = FetchError::NotAnObject {
            url: "http://nginx/api".to_string(),
            found: "array".to_string(),
        };
        assert!(error.to_string().contains("array root"));
    }

    #[test]
    fn test_cycle_error_is_transparent() {
        let error: CycleError = TransportError::NotOpen.into();
        assert_eq!(error.to_string(), "Statsd session is not open");
    }
}
