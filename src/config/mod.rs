//! Configuration module for WikiSteps
//!
//! Handles loading, parsing, and validating TOML configuration files. All
//! sections are optional; `Config::default()` is a fully working setup.
//!
//! # Example
//!
//! ```no_run
//! use wikisteps::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Search timeout: {:?}", config.engine.timeout());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, EngineConfig, FetcherConfig, PolicyConfig, ServerConfig};

// Re-export parser functions
pub use parser::load_config;
