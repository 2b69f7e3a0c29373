use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

use crate::generator::NAME_POOL_SIZE;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main configuration for SocialMatrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SocialMatrixConfig {
    /// Degree table and friend suggestion settings
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Random network generation settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Maximum number of friend suggestions reported per graph
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Smallest number of people in a generated network
    #[serde(default = "default_min_people")]
    pub min_people: usize,

    /// Largest number of people in a generated network
    #[serde(default = "default_max_people")]
    pub max_people: usize,

    /// Probability that any given pair becomes friends
    #[serde(default = "default_edge_probability")]
    pub edge_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_people: default_min_people(),
            max_people: default_max_people(),
            edge_probability: default_edge_probability(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "pretty", "json", "compact"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_suggestion_limit() -> usize {
    10
}
fn default_min_people() -> usize {
    5
}
fn default_max_people() -> usize {
    10
}
fn default_edge_probability() -> f64 {
    0.35
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

/// Configuration manager with layered sources
pub struct ConfigManager {
    config: SocialMatrixConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration with the following precedence:
    /// 1. Environment variables (.env file)
    /// 2. Config file (.socialmatrix.toml)
    /// 3. Defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        let (config, config_path) = Self::load_config_file()?;
        Self::finish(config, config_path)
    }

    /// Load an explicit config file, still honouring environment overrides.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        Self::load_dotenv();
        let config = Self::read_toml_file(path)?;
        Self::finish(config, Some(path.to_path_buf()))
    }

    fn finish(
        config: SocialMatrixConfig,
        config_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let config = Self::apply_env_overrides(config);
        Self::validate_config(&config)?;

        match config_path {
            Some(ref path) => info!("Config file: {}", path.display()),
            None => info!("Config file: none (using defaults)"),
        }
        info!(
            "Suggestion limit: {}, generator: {}..={} people, p = {}",
            config.analytics.suggestion_limit,
            config.generator.min_people,
            config.generator.max_people,
            config.generator.edge_probability
        );

        Ok(Self {
            config,
            config_path,
        })
    }

    fn load_dotenv() {
        if Path::new(".env").exists() {
            if let Err(e) = dotenv::from_filename(".env") {
                warn!("Failed to load .env file: {}", e);
            }
        }
    }

    /// Search order:
    /// 1. ./.socialmatrix.toml
    /// 2. ~/.socialmatrix/config.toml
    fn load_config_file() -> Result<(SocialMatrixConfig, Option<PathBuf>), ConfigError> {
        let local_config = Path::new(".socialmatrix.toml");
        if local_config.exists() {
            let config = Self::read_toml_file(local_config)?;
            return Ok((config, Some(local_config.to_path_buf())));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".socialmatrix").join("config.toml");
            if user_config.exists() {
                let config = Self::read_toml_file(&user_config)?;
                return Ok((config, Some(user_config)));
            }
        }

        Ok((SocialMatrixConfig::default(), None))
    }

    fn read_toml_file(path: &Path) -> Result<SocialMatrixConfig, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn apply_env_overrides(mut config: SocialMatrixConfig) -> SocialMatrixConfig {
        if let Some(n) = parse_env("SOCIALMATRIX_SUGGESTION_LIMIT") {
            config.analytics.suggestion_limit = n;
        }
        if let Some(n) = parse_env("SOCIALMATRIX_MIN_PEOPLE") {
            config.generator.min_people = n;
        }
        if let Some(n) = parse_env("SOCIALMATRIX_MAX_PEOPLE") {
            config.generator.max_people = n;
        }
        if let Some(p) = parse_env("SOCIALMATRIX_EDGE_PROBABILITY") {
            config.generator.edge_probability = p;
        }

        if let Ok(level) = std::env::var("SOCIALMATRIX_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(format) = std::env::var("SOCIALMATRIX_LOG_FORMAT") {
            config.logging.format = format;
        }

        config
    }

    pub fn validate_config(config: &SocialMatrixConfig) -> Result<(), ConfigError> {
        if config.analytics.suggestion_limit == 0 {
            return Err(ConfigError::ValidationError(
                "suggestion_limit must be at least 1".to_string(),
            ));
        }

        let generator = &config.generator;
        if generator.min_people == 0
            || generator.min_people > generator.max_people
            || generator.max_people > NAME_POOL_SIZE
        {
            return Err(ConfigError::ValidationError(format!(
                "Invalid generator size range {}..={}. Must satisfy 1 <= min <= max <= {}",
                generator.min_people, generator.max_people, NAME_POOL_SIZE
            )));
        }
        if !(0.0..=1.0).contains(&generator.edge_probability) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid edge probability: {}. Must be within [0, 1]",
                generator.edge_probability
            )));
        }

        match config.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    other
                )))
            }
        }

        match config.logging.format.as_str() {
            "pretty" | "compact" | "json" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log format: {}. Must be one of: pretty, compact, json",
                    other
                )))
            }
        }

        Ok(())
    }

    pub fn config(&self) -> &SocialMatrixConfig {
        &self.config
    }

    /// Path of the config file that was loaded, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        let config = SocialMatrixConfig::default();
        let toml_str =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::ReadError(e.to_string()))?;
        }

        std::fs::write(path, toml_str).map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Ok(())
    }
}

/// Parsed value of `key`, or `None` when unset. Unparsable values are logged and ignored.
fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={}", key, raw);
            None
        }
    }
}
