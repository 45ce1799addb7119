//! Phosphor - Entry Point

use clap::Parser;
use phosphor::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    CliOverrides, KeyBindings,
};
use phosphor::theme::{Phosphor, PreferenceStore, ThemeToggle};
use phosphor::typewriter::RevealTiming;
use phosphor::view::{ColorConfig, ViewerOptions};
use std::path::PathBuf;
use tracing::{info, warn};

/// Phosphor - view an HTML page in the terminal, typewriter style
#[derive(Parser, Debug)]
#[command(name = "phosphor")]
#[command(version)]
#[command(about = "View an HTML page in the terminal with typewriter reveals")]
pub struct Args {
    /// Path to the HTML page (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Milliseconds between reveal ticks
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: Option<u64>,

    /// Longest a single block may take to type out, in milliseconds
    #[arg(long)]
    pub max_duration_ms: Option<u64>,

    /// CSS selector for blocks that get typed out
    #[arg(long)]
    pub selector: Option<String>,

    /// Phosphor colour; also saved as the new preference
    #[arg(long, value_parser = ["green", "amber"])]
    pub phosphor: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = load_config_with_precedence(args.config.clone())?;
        let merged = merge_config(config_file);
        let with_env = apply_env_overrides(merged);
        apply_cli_overrides(
            with_env,
            CliOverrides {
                tick_ms: args.tick_ms,
                max_duration_ms: args.max_duration_ms,
                selector: args.selector.clone(),
            },
        )
    };

    phosphor::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let source = phosphor::source::read_page(args.file.clone())?;
    let page = phosphor::parser::parse_page(&source.html, &config.selector)?;
    info!(
        origin = %source.origin,
        blocks = page.blocks.len(),
        typewriter = page.typewriter_count(),
        "page parsed"
    );

    let mut theme = ThemeToggle::load(PreferenceStore::new(&config.preferences_path));
    if let Some(name) = args.phosphor.as_deref() {
        let phosphor: Phosphor = name.parse()?;
        if let Err(error) = theme.set(phosphor) {
            warn!(%error, "could not save phosphor preference");
        }
    }

    let options = ViewerOptions {
        fallback_title: source.origin.to_string(),
        timing: RevealTiming::new(config.tick_ms, config.max_duration_ms),
        caret: config.caret,
        colors: ColorConfig::from_env_and_args(args.no_color),
        key_bindings: KeyBindings::default(),
    };

    phosphor::view::run(page, theme, options)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        // Help returns Err with DisplayHelp, which is success
        let result = Args::try_parse_from(["phosphor", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["phosphor", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["phosphor"]);
        assert_eq!(args.file, None);
        assert_eq!(args.tick_ms, None);
        assert_eq!(args.max_duration_ms, None);
        assert_eq!(args.selector, None);
        assert_eq!(args.phosphor, None);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_file_path_populates_file_field() {
        let args = Args::parse_from(["phosphor", "index.html"]);
        assert_eq!(args.file, Some(PathBuf::from("index.html")));
    }

    #[test]
    fn test_tick_ms_flag() {
        let args = Args::parse_from(["phosphor", "--tick-ms", "40"]);
        assert_eq!(args.tick_ms, Some(40));
    }

    #[test]
    fn test_tick_ms_rejects_zero() {
        let result = Args::try_parse_from(["phosphor", "--tick-ms", "0"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_max_duration_accepts_zero() {
        let args = Args::parse_from(["phosphor", "--max-duration-ms", "0"]);
        assert_eq!(args.max_duration_ms, Some(0));
    }

    #[test]
    fn test_selector_flag() {
        let args = Args::parse_from(["phosphor", "--selector", ".typed"]);
        assert_eq!(args.selector, Some(".typed".to_string()));
    }

    #[test]
    fn test_phosphor_amber() {
        let args = Args::parse_from(["phosphor", "--phosphor", "amber"]);
        assert_eq!(args.phosphor, Some("amber".to_string()));
    }

    #[test]
    fn test_phosphor_invalid_rejects() {
        let result = Args::try_parse_from(["phosphor", "--phosphor", "blue"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_no_color_flag() {
        let args = Args::parse_from(["phosphor", "--no-color"]);
        assert!(args.no_color);
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["phosphor", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_cli_values_win_over_config_file() {
        use phosphor::config::ConfigFile;

        let config_file = ConfigFile {
            tick_ms: Some(50),
            selector: Some(".from-file".to_string()),
            ..ConfigFile::default()
        };
        let merged = merge_config(Some(config_file));
        assert_eq!(merged.tick_ms, 50);

        let args = Args::parse_from(["phosphor", "--tick-ms", "12", "--selector", "p.cli"]);
        let resolved = apply_cli_overrides(
            merged,
            CliOverrides {
                tick_ms: args.tick_ms,
                max_duration_ms: args.max_duration_ms,
                selector: args.selector,
            },
        );
        assert_eq!(resolved.tick_ms, 12);
        assert_eq!(resolved.selector, "p.cli");
    }
}
