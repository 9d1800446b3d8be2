//! Configuration for the converter module.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One converter exposed by the converter service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterEndpoint {
    /// Converter name, used in logs and metrics.
    pub name: String,
    /// Path on the converter service, e.g. `/c2f`.
    pub path: String,
}

impl ConverterEndpoint {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Configuration for the set of converters an import races against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertersConfig {
    /// Base URL of the converter service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bound on each wait for the next converter result, in seconds.
    #[serde(default = "default_await_timeout")]
    pub await_timeout_secs: u64,

    /// Timeout of a single HTTP request to a converter, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Converters to invoke for every import.
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<ConverterEndpoint>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8090".to_string()
}

fn default_await_timeout() -> u64 {
    30
}

fn default_request_timeout() -> u64 {
    30
}

fn default_endpoints() -> Vec<ConverterEndpoint> {
    vec![
        ConverterEndpoint::new("kubernetes", "/k2f"),
        ConverterEndpoint::new("bundle", "/kbundle2f"),
        ConverterEndpoint::new("compose", "/c2f"),
    ]
}

impl Default for ConvertersConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            await_timeout_secs: default_await_timeout(),
            request_timeout_secs: default_request_timeout(),
            endpoints: default_endpoints(),
        }
    }
}

impl ConvertersConfig {
    /// Per-await bound as a `Duration`.
    pub fn await_timeout(&self) -> Duration {
        Duration::from_secs(self.await_timeout_secs)
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-await bound in seconds.
    pub fn with_await_timeout(mut self, secs: u64) -> Self {
        self.await_timeout_secs = secs;
        self
    }

    /// Replaces the converter endpoints.
    pub fn with_endpoints(mut self, endpoints: Vec<ConverterEndpoint>) -> Self {
        self.endpoints = endpoints;
        self
    }
}
