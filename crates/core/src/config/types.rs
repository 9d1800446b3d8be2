use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

use crate::cache::CacheConfig;
use crate::converter::ConvertersConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub converters: ConvertersConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_server_section() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
    }

    #[test]
    fn test_deserialize_with_default_server() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
    }

    #[test]
    fn test_deserialize_with_default_cache() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.cache.capacity, 64);
        assert_eq!(config.cache.ttl_secs, 30);
        assert_eq!(config.cache.sweep_interval_secs, 5);
    }

    #[test]
    fn test_deserialize_with_default_converters() {
        let config: Config = toml::from_str("").unwrap();
        let paths: Vec<&str> = config
            .converters
            .endpoints
            .iter()
            .map(|e| e.path.as_str())
            .collect();
        assert_eq!(paths, vec!["/k2f", "/kbundle2f", "/c2f"]);
        assert_eq!(config.converters.await_timeout_secs, 30);
    }

    #[test]
    fn test_deserialize_custom_endpoints_replace_defaults() {
        let toml = r#"
[converters]
await_timeout_secs = 5

[[converters.endpoints]]
name = "helm"
path = "/h2f"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.converters.await_timeout_secs, 5);
        assert_eq!(config.converters.endpoints.len(), 1);
        assert_eq!(config.converters.endpoints[0].name, "helm");
        // untouched keys keep their defaults
        assert_eq!(config.converters.request_timeout_secs, 30);
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.cache.capacity, config.cache.capacity);
        assert_eq!(parsed.converters.endpoints.len(), 3);
    }
}
