use crate::config::types::{Config, EngineConfig, FetcherConfig, PolicyConfig, ServerConfig};
use crate::policy::WIKI_PREFIX;
use crate::ConfigError;
use std::net::SocketAddr;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_engine_config(&config.engine)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_policy_config(&config.policy)?;
    validate_server_config(&config.server)?;
    Ok(())
}

/// Validates engine configuration
fn validate_engine_config(config: &EngineConfig) -> Result<(), ConfigError> {
    if config.max_steps > 10 {
        return Err(ConfigError::Validation(format!(
            "max_steps must be between 0 and 10, got {}",
            config.max_steps
        )));
    }

    if config.timeout_ms < 1 {
        return Err(ConfigError::Validation(
            "timeout_ms must be >= 1".to_string(),
        ));
    }

    if config.num_workers < 1 || config.num_workers > 256 {
        return Err(ConfigError::Validation(format!(
            "num_workers must be between 1 and 256, got {}",
            config.num_workers
        )));
    }

    if config.fetch_concurrency < 1 || config.fetch_concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "fetch_concurrency must be between 1 and 100, got {}",
            config.fetch_concurrency
        )));
    }

    if config.quiescence_interval_ms < 10 {
        return Err(ConfigError::Validation(format!(
            "quiescence_interval_ms must be >= 10ms, got {}ms",
            config.quiescence_interval_ms
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates policy configuration
fn validate_policy_config(config: &PolicyConfig) -> Result<(), ConfigError> {
    for prefix in &config.block_prefixes {
        if !prefix.starts_with(WIKI_PREFIX) {
            return Err(ConfigError::Validation(format!(
                "block prefix '{}' must start with {}",
                prefix, WIKI_PREFIX
            )));
        }
    }

    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind.parse::<SocketAddr>().map_err(|_| {
        ConfigError::Validation(format!("bind must be a host:port address, got '{}'", config.bind))
    })?;

    Ok(())
}
