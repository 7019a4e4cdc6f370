use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for WikiSteps
///
/// Every section is optional; missing sections fall back to their defaults,
/// so the service runs without a config file at all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub fetcher: FetcherConfig,
    pub policy: PolicyConfig,
    pub server: ServerConfig,
}

/// Path-search engine configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Largest hop budget a request may ask for
    #[serde(rename = "max-steps")]
    pub max_steps: u32,

    /// Whole-search timeout (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Number of search workers per run
    #[serde(rename = "num-workers")]
    pub num_workers: usize,

    /// Capacity of the shared fetch semaphore
    #[serde(rename = "fetch-concurrency")]
    pub fetch_concurrency: usize,

    /// Cadence of the supervisor's quiescence check (milliseconds)
    #[serde(rename = "quiescence-interval-ms")]
    pub quiescence_interval_ms: u64,
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// User agent sent with every page request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

/// URL policy configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Block-list entries added on top of the built-in defaults
    #[serde(rename = "block-prefixes")]
    pub block_prefixes: Vec<String>,
}

/// HTTP service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the HTTP service to (host:port)
    pub bind: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_steps: 7,
            timeout_ms: 30_000,
            num_workers: 25,
            fetch_concurrency: 10,
            quiescence_interval_ms: 3_000,
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            user_agent: format!("wikisteps/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
        }
    }
}

impl EngineConfig {
    /// Whole-search timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Quiescence check cadence as a [`Duration`]
    pub fn quiescence_interval(&self) -> Duration {
        Duration::from_millis(self.quiescence_interval_ms)
    }
}
