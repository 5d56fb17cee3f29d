use campaign_cash::{Cycle, DEFAULT_BASE_URL};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Application configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. config.yaml file (if exists)
/// 3. Environment variables with CC_ prefix (always wins)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// ProPublica API key (required — no compiled-in default).
    #[serde(default)]
    pub key: String,

    /// Base URL of the campaign-finance API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Cycle queried when a command does not pass `--cycle`.
    #[serde(default = "default_cycle")]
    pub cycle: u16,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

// These functions cannot be const because serde uses function pointers for defaults
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_cycle() -> u16 {
    Cycle::DEFAULT.year()
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    20
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                key: String::new(),
                base_url: default_base_url(),
                cycle: default_cycle(),
                timeout_secs: default_timeout_secs(),
            },
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. config.yaml file (if exists)
    /// 3. Environment variables with CC_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("CC_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // API key is required
        if self.api.key.is_empty() {
            return Err(ConfigError::Validation(
                "api.key is required. Set CC_API__KEY environment variable or configure in config.yaml.".into(),
            ));
        }

        // Base URL must be an HTTP(S) endpoint
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(ConfigError::Validation(format!(
                "api.base_url must start with http:// or https://, got: '{}'",
                self.api.base_url
            )));
        }

        // Filing cycles close on even-numbered years
        if self.api.cycle == 0 || self.api.cycle % 2 != 0 {
            return Err(ConfigError::Validation(format!(
                "api.cycle must be an even election year (e.g. 2026), got: {}",
                self.api.cycle
            )));
        }

        // Timeout must be non-zero
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs cannot be 0".into(),
            ));
        }

        Ok(())
    }
}
