//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, environment variables and
//! command-line flags.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (`MCPRICER_*`)
//! 3. Config file (`mcpricer.toml` unless `--config` names another)
//! 4. Default values

use pricer_core::types::defaults;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Config file read when `--config` is not given. Its absence is not an error.
pub const DEFAULT_CONFIG_FILE: &str = "mcpricer.toml";

/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "MCPRICER_LOG_LEVEL";
/// Environment variable overriding the default seed.
pub const ENV_SEED: &str = "MCPRICER_SEED";
/// Environment variable overriding the output format.
pub const ENV_FORMAT: &str = "MCPRICER_FORMAT";
/// Environment variable overriding the default number of simulations.
pub const ENV_SIMULATIONS: &str = "MCPRICER_SIMULATIONS";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json")]
    InvalidFormat(String),

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Output format of the `price` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Values used for pricing fields that are not supplied
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldDefaults {
    pub spot: f64,
    pub rate: f64,
    pub volatility: f64,
    pub maturity: f64,
    pub simulations: usize,
    pub payoff: String,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            spot: defaults::SPOT,
            rate: defaults::RATE,
            volatility: defaults::VOLATILITY,
            maturity: defaults::MATURITY,
            simulations: defaults::SIMULATIONS,
            payoff: defaults::PAYOFF.to_string(),
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level (`RUST_LOG` takes precedence when set)
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Output format of the `price` command
    #[serde(deserialize_with = "deserialize_format")]
    pub format: OutputFormat,
    /// Seed for reproducible runs; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Pricing field defaults
    pub defaults: FieldDefaults,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_format<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }

        if let Some(seed) = lookup(ENV_SEED) {
            let parsed = seed.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_SEED,
                value: seed.clone(),
            })?;
            self.seed = Some(parsed);
        }

        if let Some(format) = lookup(ENV_FORMAT) {
            self.format = OutputFormat::from_str(&format)?;
        }

        if let Some(simulations) = lookup(ENV_SIMULATIONS) {
            let parsed = simulations
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv {
                    var: ENV_SIMULATIONS,
                    value: simulations.clone(),
                })?;
            self.defaults.simulations = parsed;
        }

        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(format) = &cli.format {
            self.format = OutputFormat::from_str(format)?;
        }
        Ok(())
    }
}

/// CLI arguments that affect configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path; `None` means the optional default file
    pub config_file: Option<PathBuf>,
    /// Force debug logging
    pub verbose: bool,
    /// Seed override
    pub seed: Option<u64>,
    /// Output format override
    pub format: Option<String>,
}

/// Build configuration from all sources
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with(cli, |var| std::env::var(var).ok())
}

fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                CliConfig::from_file(default_path)?
            } else {
                CliConfig::default()
            }
        }
    };

    config.apply_env_with(lookup)?;
    config.merge_with_cli(cli)?;

    Ok(config)
}
