//! Configuration: file/env/CLI layering and key bindings.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    default_preferences_path, load_config_file, load_config_with_precedence, merge_config,
    CliOverrides, ConfigError, ConfigFile, ResolvedConfig, CONFIG_ENV_VAR, DEFAULT_CARET,
    DEFAULT_SELECTOR, SELECTOR_ENV_VAR,
};
