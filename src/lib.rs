//! WikiSteps: a bounded-concurrency Wikipedia path finder
//!
//! This crate answers one question: starting from one Wikipedia article,
//! which chains of at most `steps` in-article links reach a target article?
//! A fixed pool of workers fetches pages, extracts admissible article links,
//! and expands partial paths until the search space is exhausted, the search
//! times out, or a fatal error occurs.

pub mod config;
pub mod engine;
pub mod policy;
pub mod server;

use thiserror::Error;

/// Main error type for WikiSteps operations
#[derive(Debug, Error)]
pub enum WikiStepsError {
    #[error("not a Wikipedia article URL: {0}")]
    InvalidUrl(String),

    #[error("steps must be between 0 and {max}, got {got}")]
    InvalidSteps { got: i64, max: u32 },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid bind address '{0}'")]
    InvalidBindAddr(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised while fetching a page body
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build GET request for {url}: {source}")]
    Build { url: String, source: reqwest::Error },

    #[error("transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("empty response body for {url}")]
    EmptyBody { url: String },

    #[error("fetch cancelled before any request was made")]
    Cancelled,
}

/// Errors raised while extracting links from a page body
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("HTML parse error: {0}")]
    Parse(String),
}

/// A fatal error surfaced by a worker; the first one ends the search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Result type alias for WikiSteps operations
pub type Result<T> = std::result::Result<T, WikiStepsError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use engine::{PageFetcher, Path, PathSearch, SearchOutcome, Termination, WikipediaFetcher};
pub use policy::ArticlePolicy;
