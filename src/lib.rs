//! Cache Proxy - a caching access proxy over a remote data service
//!
//! Serves reads from a TTL-bounded in-memory cache and invalidates
//! entries when writes go through to the remote service.

pub mod config;
pub mod error;
pub mod proxy;
pub mod remote;
pub mod tasks;

pub use config::ProxyConfig;
pub use error::{ProxyError, Result};
pub use proxy::{CachingProxy, ProxyStats};
pub use remote::{HttpRemoteService, RemoteError, RemoteService, SimulatedRemoteService};
pub use tasks::spawn_sweeper_task;
