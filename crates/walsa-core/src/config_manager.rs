use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to read config: {0}")]
    ReadError(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main configuration for the parameter browser
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WalsaConfig {
    /// Method catalog source and validation policy
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// How payloads are printed by the CLI
    #[serde(default)]
    pub output: OutputConfig,
}

/// Method catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CatalogConfig {
    /// Optional TOML or JSON catalog replacing the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Refuse to start when an offered option has no catalog descriptor
    #[serde(default)]
    pub strict: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Output format: "pretty", "json", "table", "html"
    #[serde(default = "default_output_format")]
    pub format: String,

    /// Colorize pretty output
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
            color: default_color(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
fn default_log_format() -> String {
    "compact".to_string()
}
fn default_output_format() -> String {
    "pretty".to_string()
}
fn default_color() -> bool {
    true
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

pub const LOCAL_CONFIG_FILE: &str = ".walsa-params.toml";
const HOME_ENV_FILE: &str = ".walsa-params.env";
const USER_CONFIG_DIR: &str = ".walsa-params";

/// Configuration manager with layered sources
pub struct ConfigManager {
    config: WalsaConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration with the following precedence:
    /// 1. Environment variables (.env file)
    /// 2. Config file (.walsa-params.toml)
    /// 3. Sensible defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_dotenv();

        let (config, config_path) = Self::load_config_file()?;
        Self::finish(config, config_path)
    }

    /// Load from an explicit file, still honoring environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        Self::load_dotenv();

        let config = Self::read_toml_file(path)?;
        Self::finish(config, Some(path.to_path_buf()))
    }

    fn finish(config: WalsaConfig, config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config = Self::apply_env_overrides(config);
        Self::validate_config(&config)?;
        Ok(Self {
            config,
            config_path,
        })
    }

    /// Logs where the configuration came from and its main settings.
    ///
    /// Call once a subscriber is installed; loading happens before logging
    /// is configured, so nothing is logged at load time.
    pub fn log_summary(&self) {
        match self.config_path {
            Some(ref path) => info!("Config file: {}", path.display()),
            None => info!("Config file: NONE (using defaults)"),
        }
        info!(
            catalog = ?self.config.catalog.path,
            strict = self.config.catalog.strict,
            output = %self.config.output.format,
            "Configuration loaded"
        );
    }

    /// Wrap an in-memory configuration after validating it.
    pub fn from_config(config: WalsaConfig) -> Result<Self, ConfigError> {
        Self::validate_config(&config)?;
        Ok(Self {
            config,
            config_path: None,
        })
    }

    /// Load .env file if it exists
    fn load_dotenv() {
        if Path::new(".env").exists() {
            if let Err(e) = dotenv::from_filename(".env") {
                warn!("Failed to load .env file: {}", e);
            }
            return;
        }

        if let Some(home) = dirs::home_dir() {
            let home_env = home.join(HOME_ENV_FILE);
            if home_env.exists() {
                if let Err(e) = dotenv::from_path(&home_env) {
                    warn!("Failed to load {}: {}", HOME_ENV_FILE, e);
                }
            }
        }
    }

    /// Find and load config file
    /// Search order:
    /// 1. ./.walsa-params.toml (current directory)
    /// 2. ~/.walsa-params/config.toml (user config)
    /// 3. Use defaults
    fn load_config_file() -> Result<(WalsaConfig, Option<PathBuf>), ConfigError> {
        let local_config = Path::new(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            let config = Self::read_toml_file(local_config)?;
            return Ok((config, Some(local_config.to_path_buf())));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(USER_CONFIG_DIR).join("config.toml");
            if user_config.exists() {
                let config = Self::read_toml_file(&user_config)?;
                return Ok((config, Some(user_config)));
            }
        }

        Ok((WalsaConfig::default(), None))
    }

    /// Read TOML config file
    fn read_toml_file(path: &Path) -> Result<WalsaConfig, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: WalsaConfig) -> WalsaConfig {
        if let Ok(path) = std::env::var("WALSA_CATALOG_PATH") {
            config.catalog.path = if path.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }
        if let Ok(strict) = std::env::var("WALSA_CATALOG_STRICT") {
            config.catalog.strict = strict.to_lowercase() == "true" || strict == "1";
        }

        if let Ok(format) = std::env::var("WALSA_OUTPUT_FORMAT") {
            config.output.format = format.to_lowercase();
        }
        if let Ok(color) = std::env::var("WALSA_COLOR") {
            config.output.color = !(color.to_lowercase() == "false" || color == "0");
        }

        // Logging
        // Directive lists like "walsa=debug" are left to the EnvFilter
        if let Ok(level) = std::env::var("RUST_LOG") {
            let level = level.trim().to_lowercase();
            if LOG_LEVELS.contains(&level.as_str()) {
                config.logging.level = level;
            }
        }
        if let Ok(format) = std::env::var("WALSA_LOG_FORMAT") {
            config.logging.format = format.to_lowercase();
        }

        config
    }

    /// Validate configuration
    fn validate_config(config: &WalsaConfig) -> Result<(), ConfigError> {
        match config.logging.level.as_str() {
            level if LOG_LEVELS.contains(&level) => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    other
                )))
            }
        }

        match config.logging.format.as_str() {
            "pretty" | "json" | "compact" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log format: {}. Must be one of: pretty, json, compact",
                    other
                )))
            }
        }

        match config.output.format.as_str() {
            "pretty" | "json" | "table" | "html" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid output format: {}. Must be one of: pretty, json, table, html",
                    other
                )))
            }
        }

        Ok(())
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &WalsaConfig {
        &self.config
    }

    /// Get the path to the config file that was loaded, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Create a default config file
    pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        let config = WalsaConfig::default();
        let toml_str =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::ReadError(e.to_string()))?;
            }
        }

        std::fs::write(path, toml_str).map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Ok(())
    }
}
