//! Configuration Module
//!
//! Handles loading and validating proxy configuration from environment
//! variables.

use std::env;
use std::time::Duration;

use crate::error::{ProxyError, Result};

/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults. Malformed values fail at load time rather than producing
/// undefined caching behavior later.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// How long a cached entry is served before a read refetches.
    ///
    /// A zero TTL is legal: every read misses and delegates to the
    /// remote service.
    pub ttl: Duration,
    /// Interval between background sweeps of expired entries
    pub sweep_interval: Duration,
}

impl ProxyConfig {
    /// Default TTL in milliseconds
    pub const DEFAULT_TTL_MS: u64 = 30_000;
    /// Default sweep interval in seconds
    pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

    /// Creates a new ProxyConfig.
    ///
    /// # Arguments
    /// * `ttl` - Cache entry time-to-live (zero degenerates to always-miss)
    /// * `sweep_interval` - Background sweep period, must be non-zero
    pub fn new(ttl: Duration, sweep_interval: Duration) -> Result<Self> {
        if sweep_interval.is_zero() {
            return Err(ProxyError::InvalidConfiguration(
                "Sweep interval must be greater than zero".to_string(),
            ));
        }

        Ok(Self { ttl, sweep_interval })
    }

    /// Creates a new ProxyConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PROXY_TTL_MS` - Cache TTL in milliseconds (default: 30000)
    /// - `PROXY_SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 60)
    ///
    /// Returns `InvalidConfiguration` if a variable is present but does not
    /// parse as a non-negative integer.
    pub fn from_env() -> Result<Self> {
        let ttl_ms = env_u64("PROXY_TTL_MS", Self::DEFAULT_TTL_MS)?;
        let sweep_secs = env_u64(
            "PROXY_SWEEP_INTERVAL_SECS",
            Self::DEFAULT_SWEEP_INTERVAL_SECS,
        )?;

        Self::new(
            Duration::from_millis(ttl_ms),
            Duration::from_secs(sweep_secs),
        )
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_millis(Self::DEFAULT_TTL_MS),
            sweep_interval: Duration::from_secs(Self::DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}

// == Utility Functions ==
/// Reads an environment variable as u64, falling back to a default when
/// the variable is absent.
fn env_u64(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
            ProxyError::InvalidConfiguration(format!(
                "{} must be a non-negative integer, got '{}'",
                name, raw
            ))
        }),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(ProxyError::InvalidConfiguration(format!(
            "{}: {}",
            name, err
        ))),
    }
}
