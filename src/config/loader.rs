//! Configuration file loading with precedence handling.

use crate::typewriter::{DEFAULT_MAX_DURATION_MS, DEFAULT_TICK_MS};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Default selector for blocks that get the typewriter treatment.
pub const DEFAULT_SELECTOR: &str = "p[data-typewriter]";

/// Default caret glyph.
pub const DEFAULT_CARET: &str = "█";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "PHOSPHOR_CONFIG";

/// Environment variable overriding the typewriter selector.
pub const SELECTOR_ENV_VAR: &str = "PHOSPHOR_SELECTOR";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/phosphor/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Interval between typewriter ticks in milliseconds.
    #[serde(default)]
    pub tick_ms: Option<u64>,

    /// Ceiling on a single block's reveal in milliseconds.
    #[serde(default)]
    pub max_duration_ms: Option<u64>,

    /// CSS selector for typewriter blocks.
    #[serde(default)]
    pub selector: Option<String>,

    /// Caret glyph drawn after the revealing block.
    #[serde(default)]
    pub caret: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Where the phosphor preference is persisted.
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Tick interval, at least 1.
    pub tick_ms: u64,
    /// Per-block duration ceiling.
    pub max_duration_ms: u64,
    /// Typewriter selector.
    pub selector: String,
    /// Caret glyph.
    pub caret: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Phosphor preference file.
    pub preferences_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            max_duration_ms: DEFAULT_MAX_DURATION_MS,
            selector: DEFAULT_SELECTOR.to_string(),
            caret: DEFAULT_CARET.to_string(),
            log_file_path: default_log_path(),
            preferences_path: default_preferences_path(),
        }
    }
}

/// Platform state directory for phosphor, or the current directory when
/// none can be determined.
fn state_dir() -> PathBuf {
    dirs::state_dir()
        .map(|dir| dir.join("phosphor"))
        .unwrap_or_default()
}

/// Resolve default log file path.
///
/// `~/.local/state/phosphor/phosphor.log` on Linux, `./phosphor.log` when
/// the platform has no state directory.
pub fn default_log_path() -> PathBuf {
    state_dir().join("phosphor.log")
}

/// Resolve default preference file path, next to the log file.
pub fn default_preferences_path() -> PathBuf {
    state_dir().join("preferences.toml")
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/phosphor/config.toml` on Linux, the platform
/// equivalent elsewhere, or `None` when there is no config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("phosphor").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PHOSPHOR_CONFIG` environment variable
/// 3. Default path `~/.config/phosphor/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use
/// the default. `tick_ms` is clamped to at least 1.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        tick_ms: config.tick_ms.unwrap_or(defaults.tick_ms).max(1),
        max_duration_ms: config.max_duration_ms.unwrap_or(defaults.max_duration_ms),
        selector: config.selector.unwrap_or(defaults.selector),
        caret: config.caret.unwrap_or(defaults.caret),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        preferences_path: config.preferences_path.unwrap_or(defaults.preferences_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `PHOSPHOR_SELECTOR`; an empty value is ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(selector) = std::env::var(SELECTOR_ENV_VAR) {
        if !selector.trim().is_empty() {
            config.selector = selector;
        }
    }

    config
}

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--tick-ms`
    pub tick_ms: Option<u64>,
    /// `--max-duration-ms`
    pub max_duration_ms: Option<u64>,
    /// `--selector`
    pub selector: Option<String>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_ms = tick_ms.max(1);
    }

    if let Some(max_duration_ms) = cli.max_duration_ms {
        config.max_duration_ms = max_duration_ms;
    }

    if let Some(selector) = cli.selector {
        config.selector = selector;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
