//! Color handling for the viewer.

use crate::theme::{Palette, Phosphor};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Fixed setting, for tests and embedding.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }

    /// Palette for `phosphor` under this setting.
    pub fn palette(self, phosphor: Phosphor) -> Palette {
        phosphor.palette(self.enabled)
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial(no_color)]
    fn color_config_respects_no_color_flag() {
        std::env::remove_var("NO_COLOR");
        let config = ColorConfig::from_env_and_args(true);
        assert!(
            !config.colors_enabled(),
            "--no-color flag should disable colors"
        );
    }

    #[test]
    #[serial(no_color)]
    fn color_config_respects_no_color_env_var() {
        std::env::set_var("NO_COLOR", "1");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(
            !config.colors_enabled(),
            "NO_COLOR env var should disable colors"
        );
    }

    #[test]
    #[serial(no_color)]
    fn color_config_treats_empty_no_color_as_set() {
        std::env::set_var("NO_COLOR", "");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(!config.colors_enabled());
    }

    #[test]
    #[serial(no_color)]
    fn color_config_enables_colors_by_default() {
        std::env::remove_var("NO_COLOR");
        let config = ColorConfig::from_env_and_args(false);
        assert!(config.colors_enabled(), "colors should be on by default");
    }

    #[test]
    fn disabled_colors_use_the_monochrome_palette() {
        let palette = ColorConfig::new(false).palette(Phosphor::Amber);
        assert_eq!(palette, Palette::monochrome());
    }

    #[test]
    fn enabled_colors_follow_the_phosphor() {
        let colors = ColorConfig::new(true);
        assert_ne!(
            colors.palette(Phosphor::Green),
            colors.palette(Phosphor::Amber)
        );
    }
}
