//! Configuration management for the biodata parser
//!
//! Supports loading configuration from:
//! - TOML/YAML/JSON files (`config/default.*`, then `config/{env}.*`)
//! - Environment variables (`BIODATA__` prefix, `__` as the section separator)
//!
//! ```text
//! BIODATA__PARSER__MAX_INPUT_BYTES=16384
//! BIODATA__OBSERVABILITY__LOG_LEVEL=debug
//! ```

pub mod settings;

pub use settings::{
    load_settings, load_settings_from, ObservabilityConfig, RuntimeEnvironment, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<biodata_core::Error> for ConfigError {
    fn from(err: biodata_core::Error) -> Self {
        match err {
            biodata_core::Error::InvalidConfig { field, message } => {
                ConfigError::InvalidValue { field, message }
            }
            biodata_core::Error::UnknownField(name) => ConfigError::InvalidValue {
                field: "parser.extra_aliases".to_string(),
                message: format!("Unknown profile field: {}", name),
            },
            other => ConfigError::ParseError(other.to_string()),
        }
    }
}
