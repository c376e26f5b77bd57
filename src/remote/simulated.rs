//! Simulated Remote Service
//!
//! In-process RemoteService implementation with configurable latency and
//! scriptable failures. Stands in for the real backend in tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::{RemoteError, RemoteService};

// == Simulated Adapter ==
/// RemoteService double backed by an in-memory response table.
///
/// Reads return the seeded value for a key, or a canned document when the
/// key was never seeded. Posts acknowledge with a sequential id and do not
/// alter seeded reads; tests that want a write to become visible seed the
/// new read representation explicitly (the read and write representations
/// of a resource are allowed to differ).
///
/// Call counters expose how often the backend was actually contacted,
/// which is what cache hit/miss assertions are built on.
#[derive(Debug, Default)]
pub struct SimulatedRemoteService {
    latency: Duration,
    responses: Mutex<HashMap<String, Value>>,
    fetch_failure: Mutex<Option<RemoteError>>,
    post_failure: Mutex<Option<RemoteError>>,
    fetch_calls: AtomicU64,
    post_calls: AtomicU64,
    post_seq: AtomicU64,
}

impl SimulatedRemoteService {
    // == Constructors ==
    /// Creates a simulated service that answers immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulated service that sleeps before answering,
    /// mimicking network round-trip time.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    // == Scripting ==
    /// Seeds the value returned by subsequent fetches for `key`.
    pub fn insert_response(&self, key: impl Into<String>, value: Value) {
        self.responses
            .lock()
            .expect("response table lock poisoned")
            .insert(key.into(), value);
    }

    /// Makes every subsequent fetch fail with `err` until `restore` is called.
    pub fn fail_fetches_with(&self, err: RemoteError) {
        *self
            .fetch_failure
            .lock()
            .expect("failure script lock poisoned") = Some(err);
    }

    /// Makes every subsequent post fail with `err` until `restore` is called.
    pub fn fail_posts_with(&self, err: RemoteError) {
        *self
            .post_failure
            .lock()
            .expect("failure script lock poisoned") = Some(err);
    }

    /// Clears any scripted failures.
    pub fn restore(&self) {
        *self
            .fetch_failure
            .lock()
            .expect("failure script lock poisoned") = None;
        *self
            .post_failure
            .lock()
            .expect("failure script lock poisoned") = None;
    }

    // == Counters ==
    /// Number of fetch calls that reached the backend.
    pub fn fetch_calls(&self) -> u64 {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of post calls that reached the backend.
    pub fn post_calls(&self) -> u64 {
        self.post_calls.load(Ordering::SeqCst)
    }

    fn scripted_fetch_failure(&self) -> Option<RemoteError> {
        self.fetch_failure
            .lock()
            .expect("failure script lock poisoned")
            .clone()
    }

    fn scripted_post_failure(&self) -> Option<RemoteError> {
        self.post_failure
            .lock()
            .expect("failure script lock poisoned")
            .clone()
    }
}

#[async_trait]
impl RemoteService for SimulatedRemoteService {
    type Value = Value;
    type Payload = Value;
    type Receipt = Value;

    async fn fetch(&self, key: &str) -> Result<Value, RemoteError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        debug!("Simulated fetch for '{}'", key);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if let Some(err) = self.scripted_fetch_failure() {
            return Err(err);
        }

        let seeded = self
            .responses
            .lock()
            .expect("response table lock poisoned")
            .get(key)
            .cloned();

        Ok(seeded.unwrap_or_else(|| {
            json!({
                "success": true,
                "data": { "id": 1, "name": "sample" }
            })
        }))
    }

    async fn post(&self, key: &str, _payload: Value) -> Result<Value, RemoteError> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        debug!("Simulated post to '{}'", key);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if let Some(err) = self.scripted_post_failure() {
            return Err(err);
        }

        let id = self.post_seq.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(json!({ "success": true, "id": id }))
    }
}
