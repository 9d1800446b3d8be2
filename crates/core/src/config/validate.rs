use std::collections::HashSet;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - At least one converter endpoint, with unique names
/// - Non-zero timeouts, cache capacity, TTL and sweep interval
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let converters = &config.converters;
    if converters.endpoints.is_empty() {
        return Err(ConfigError::ValidationError(
            "converters.endpoints must list at least one converter".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for endpoint in &converters.endpoints {
        if !seen.insert(endpoint.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate converter name: {}",
                endpoint.name
            )));
        }
    }

    if converters.await_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "converters.await_timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.cache.capacity == 0 {
        return Err(ConfigError::ValidationError(
            "cache.capacity cannot be 0".to_string(),
        ));
    }

    if config.cache.ttl_secs == 0 {
        return Err(ConfigError::ValidationError(
            "cache.ttl_secs cannot be 0".to_string(),
        ));
    }

    if config.cache.sweep_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "cache.sweep_interval_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
