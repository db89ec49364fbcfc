use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "BUNDLY_CONFIG";
pub const CURRENCY_SYMBOL_ENV: &str = "BUNDLY_CURRENCY_SYMBOL";
pub const LOG_LEVEL_ENV: &str = "BUNDLY_LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "BUNDLY_LOG_FORMAT";

const DEFAULT_CONFIG_FILE: &str = "bundly.toml";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub currency_symbol: String,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub currency_symbol: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

/// Shape of the optional TOML file; every field may be omitted.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    currency_symbol: Option<String>,
    logging: Option<FileLogging>,
}

#[derive(Debug, Default, Deserialize)]
struct FileLogging {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl AppConfig {
    /// Loads config with precedence env > explicit overrides > file >
    /// default, then validates the merged result.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = options
            .config_path
            .or_else(|| env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        match read_file(&path)? {
            Some(file) => config.apply_file(file),
            None if options.require_file => {
                return Err(ConfigError::MissingConfigFile(path));
            }
            None => {}
        }

        config.apply_overrides(options.overrides);
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(symbol) = file.currency_symbol {
            self.currency_symbol = symbol;
        }
        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(symbol) = overrides.currency_symbol {
            self.currency_symbol = symbol;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(symbol) = env::var(CURRENCY_SYMBOL_ENV) {
            self.currency_symbol = symbol;
        }
        if let Ok(level) = env::var(LOG_LEVEL_ENV) {
            self.logging.level = level;
        }
        if let Ok(format) = env::var(LOG_FORMAT_ENV) {
            self.logging.format = parse_log_format(&format).ok_or_else(|| {
                ConfigError::InvalidEnvOverride { key: LOG_FORMAT_ENV.to_string(), value: format }
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.currency_symbol.is_empty() {
            return Err(ConfigError::Validation("currency symbol must not be empty".to_string()));
        }
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "unknown log level `{}`",
                self.logging.level
            )));
        }
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<Option<FileConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    let parsed = toml::from_str(&text)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })?;
    Ok(Some(parsed))
}

fn parse_log_format(value: &str) -> Option<LogFormat> {
    match value.to_ascii_lowercase().as_str() {
        "compact" => Some(LogFormat::Compact),
        "pretty" => Some(LogFormat::Pretty),
        "json" => Some(LogFormat::Json),
        _ => None,
    }
}
