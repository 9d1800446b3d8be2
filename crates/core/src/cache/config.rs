//! Result cache configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the deferred-fetch result cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of live entries.
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Time-to-live of an entry, in seconds.
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// How often the background sweeper reclaims expired entries, in seconds.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_capacity() -> usize {
    64
}

fn default_ttl() -> u64 {
    30
}

fn default_sweep_interval() -> u64 {
    5
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            ttl_secs: default_ttl(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}
