//! Error types for the caching proxy
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

use crate::remote::RemoteError;

// == Proxy Error Enum ==
/// Unified error type for the caching proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Failure surfaced by the remote service adapter.
    ///
    /// Propagated to the caller unchanged; the proxy never retries or
    /// suppresses an underlying failure.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Malformed configuration detected at load time
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

// == Result Type Alias ==
/// Convenience Result type for the caching proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_message_preserved() {
        let remote = RemoteError::Network("connection refused".to_string());
        let err: ProxyError = remote.into();

        // Transparent wrapping keeps the adapter's message intact
        assert_eq!(err.to_string(), "Network failure: connection refused");
    }

    #[test]
    fn test_invalid_configuration_display() {
        let err = ProxyError::InvalidConfiguration("TTL must be an integer".to_string());
        assert!(err.to_string().contains("Invalid configuration"));
        assert!(err.to_string().contains("TTL must be an integer"));
    }
}
