//! Background Tasks Module
//!
//! Contains maintenance tasks that run periodically alongside the proxy.
//!
//! # Tasks
//! - Expiry sweeper: removes expired cache entries at configured intervals
//!   so an idle proxy does not retain dead payloads until the next read

mod sweeper;

pub use sweeper::spawn_sweeper_task;
