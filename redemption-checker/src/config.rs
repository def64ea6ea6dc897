use std::path::Path;
use std::time::Duration;

use config::{Config as ConfigHelper, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use shape_redemption_utils::{InputState, PartialBoundsPolicy};
use thiserror::Error;

/// Prefix for environment overrides, e.g. `REDEMPTION_CHECKER__RESOLVER__BASE_URL`.
pub const ENV_PREFIX: &str = "REDEMPTION_CHECKER";

/// Errors that can occur when loading or validating the checker configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Configuration for the redemption checker
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CheckerConfig {
    pub resolver: ResolverConfig,
    pub defaults: DefaultsConfig,
    pub price_bounds: PriceBoundsConfig,
    pub logging: LoggingConfig,
}

/// Resolver service connection
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ResolverConfig {
    /// Base URL of the redemption-value resolver
    pub base_url: Option<String>,

    /// Sent as `x-api-key` when present
    pub api_key: Option<String>,

    /// Timeout for a single resolver request in seconds
    pub timeout_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ResolverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Overrides for the values the input form starts with
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DefaultsConfig {
    pub component_address: Option<String>,
    pub state_version: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PriceBoundsConfig {
    pub partial: PartialBoundsPolicy,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), `RUST_LOG` wins when set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CheckerConfig {
    /// Input state seeded with the configured defaults.
    pub fn initial_input(&self) -> InputState {
        let mut input = InputState::default();
        if let Some(address) = &self.defaults.component_address {
            input.set_component_address(address.clone());
        }
        if let Some(version) = &self.defaults.state_version {
            input.set_state_version(version.clone());
        }
        input
    }

    pub fn resolver_base_url(&self) -> Result<&str, ConfigError> {
        self.resolver
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ConfigError::MissingField("resolver.base_url".to_string()))
    }
}

/// Load configuration from an optional TOML file layered under
/// `REDEMPTION_CHECKER__*` environment variables.
pub fn load_config(path: Option<&Path>) -> Result<CheckerConfig, ConfigError> {
    load_config_with_env(path, ENV_PREFIX)
}

pub(crate) fn load_config_with_env(
    path: Option<&Path>,
    env_prefix: &str,
) -> Result<CheckerConfig, ConfigError> {
    let mut builder = ConfigHelper::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
    }

    let config: CheckerConfig = builder
        .add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;

    // Validate required fields
    config.resolver_base_url()?;

    Ok(config)
}
