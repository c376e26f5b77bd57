//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired cache entries.
//! Without it, an entry that is never read again lingers in the table
//! until the proxy is dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::proxy::CacheTable;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. It acquires the table's write lock only for the sweep
/// itself.
///
/// # Arguments
/// * `table` - Shared handle obtained from `CachingProxy::table`
/// * `interval` - Time between sweep runs
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort it
/// during shutdown.
///
/// # Example
/// ```ignore
/// let proxy = CachingProxy::new(service, config.ttl);
/// let sweeper = spawn_sweeper_task(proxy.table(), config.sweep_interval);
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweeper_task<V>(
    table: Arc<RwLock<CacheTable<V>>>,
    interval: Duration,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!("Starting expiry sweeper with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut table_guard = table.write().await;
                table_guard.sweep_expired()
            };

            if removed > 0 {
                info!("Expiry sweep removed {} entries", removed);
            } else {
                debug!("Expiry sweep found no expired entries");
            }
        }
    })
}
