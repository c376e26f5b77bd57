//! Remote Service Boundary
//!
//! Defines the adapter contract the proxy delegates to, the failure type
//! adapters surface, and the bundled adapter implementations.
//!
//! # Adapters
//! - `HttpRemoteService`: JSON over HTTP via reqwest
//! - `SimulatedRemoteService`: in-process double with configurable latency

mod http;
mod simulated;

use async_trait::async_trait;
use thiserror::Error;

// Re-export public types
pub use http::HttpRemoteService;
pub use simulated::SimulatedRemoteService;

// == Remote Error Enum ==
/// Failure surfaced by a remote service adapter.
///
/// The proxy propagates these to its caller without retrying; recovery
/// policy belongs to the caller.
#[derive(Error, Debug, Clone)]
pub enum RemoteError {
    /// Transport-level failure (connection refused, DNS, broken pipe)
    #[error("Network failure: {0}")]
    Network(String),

    /// Service answered with a non-success status
    #[error("Service returned status {status}: {message}")]
    Status {
        /// HTTP-style status code
        status: u16,
        /// Body or reason phrase accompanying the status
        message: String,
    },

    /// Response arrived but could not be decoded
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The call was canceled or timed out before completing
    #[error("Request canceled: {0}")]
    Canceled(String),
}

// == Remote Service Trait ==
/// Contract consumed by the caching proxy.
///
/// `fetch` reads the resource identified by `key`; `post` mutates it.
/// Both operations may take observable wall-clock time and may fail.
/// Neither touches the proxy's cache - the proxy manages that itself.
///
/// A successful `post` is assumed to have mutated the resource at `key`,
/// which is why the proxy invalidates the corresponding cache entry
/// afterward.
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// Value produced by a successful fetch
    type Value: Clone + Send + Sync + 'static;
    /// Payload accepted by post
    type Payload: Send + Sync + 'static;
    /// Acknowledgement returned by a successful post
    type Receipt: Send + Sync + 'static;

    /// Reads the resource identified by `key`.
    async fn fetch(&self, key: &str) -> Result<Self::Value, RemoteError>;

    /// Writes `payload` to the resource identified by `key`.
    async fn post(&self, key: &str, payload: Self::Payload)
        -> Result<Self::Receipt, RemoteError>;
}

// Shared handles delegate, so callers can hand the proxy an `Arc<S>` and
// keep their own reference to the adapter.
#[async_trait]
impl<S: RemoteService + ?Sized> RemoteService for std::sync::Arc<S> {
    type Value = S::Value;
    type Payload = S::Payload;
    type Receipt = S::Receipt;

    async fn fetch(&self, key: &str) -> Result<Self::Value, RemoteError> {
        (**self).fetch(key).await
    }

    async fn post(
        &self,
        key: &str,
        payload: Self::Payload,
    ) -> Result<Self::Receipt, RemoteError> {
        (**self).post(key, payload).await
    }
}
