//! Main settings module

use biodata_core::ParserConfig;
use config::{Config, ConfigBuilder, Environment, File};
use config::builder::DefaultState;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Prefix for environment overrides (`BIODATA__PARSER__MAX_INPUT_BYTES`)
const ENV_PREFIX: &str = "BIODATA";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Biodata parser tunables
    #[serde(default)]
    pub parser: ParserConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parser.validate()?;
        self.validate_observability()?;
        Ok(())
    }

    fn validate_observability(&self) -> Result<(), ConfigError> {
        let level = self.observability.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!(
                    "Unknown level '{}' (expected one of {})",
                    self.observability.log_level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }
        Ok(())
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Load settings from `./config` and the environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (BIODATA__ prefix)
/// 2. config/{env}.toml (if env specified)
/// 3. config/default.toml
///
/// Missing files are skipped, so with no `config/` directory this yields
/// the defaults plus any environment overrides.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    build_settings(Config::builder(), Path::new("config"), env, None)
}

/// Load settings from an explicit configuration directory
pub fn load_settings_from(dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    if !dir.is_dir() {
        return Err(ConfigError::FileNotFound(dir.display().to_string()));
    }
    build_settings(Config::builder(), dir, env, None)
}

fn build_settings(
    mut builder: ConfigBuilder<DefaultState>,
    dir: &Path,
    env: Option<&str>,
    env_vars: Option<config::Map<String, String>>,
) -> Result<Settings, ConfigError> {
    // Load default config
    builder = builder.add_source(File::from(dir.join("default")).required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        builder = builder.add_source(File::from(dir.join(env_name)).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(env_vars),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    // Validate
    settings.validate()?;

    tracing::debug!(
        dir = %dir.display(),
        env = env.unwrap_or("default"),
        environment = settings.environment.as_str(),
        "Loaded settings"
    );

    Ok(settings)
}
