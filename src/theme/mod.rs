//! Green/amber phosphor display preference.
//!
//! Independent of the typewriter engine: the view reads the current
//! [`Phosphor`] to pick a [`Palette`] and nothing else depends on it.

pub mod store;

pub use store::{PreferenceError, PreferenceStore, ThemeToggle};

use crate::render::InlineStyles;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Phosphor colour of the simulated monitor.
///
/// Persisted as `"green"` / `"amber"`. As a boolean flag, amber is `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phosphor {
    /// P1 green. The default.
    #[default]
    Green,
    /// P3 amber.
    Amber,
}

/// A string that names neither phosphor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown phosphor {0:?}, expected \"green\" or \"amber\"")]
pub struct UnknownPhosphor(pub String);

impl Phosphor {
    /// Map the boolean flag onto a phosphor.
    pub fn from_amber(amber: bool) -> Self {
        if amber {
            Self::Amber
        } else {
            Self::Green
        }
    }

    /// The boolean flag.
    pub fn is_amber(self) -> bool {
        self == Self::Amber
    }

    /// The other phosphor.
    pub fn toggled(self) -> Self {
        Self::from_amber(!self.is_amber())
    }

    /// Persisted form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Amber => "amber",
        }
    }

    /// Status bar label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Amber => "Amber",
        }
    }

    /// Styles for this phosphor. With colours disabled every style is
    /// the terminal default apart from text modifiers.
    pub fn palette(self, colors_enabled: bool) -> Palette {
        if !colors_enabled {
            return Palette::monochrome();
        }
        let (bright, dim) = match self {
            Self::Green => (Color::Rgb(0x33, 0xff, 0x66), Color::Rgb(0x1a, 0x8c, 0x3a)),
            Self::Amber => (Color::Rgb(0xff, 0xb0, 0x00), Color::Rgb(0x99, 0x66, 0x00)),
        };
        Palette {
            text: Style::default().fg(bright),
            dim: Style::default().fg(dim),
            accent: Style::default().fg(bright).add_modifier(Modifier::UNDERLINED),
            caret: Style::default().fg(bright),
            bar: Style::default().fg(Color::Black).bg(dim),
        }
    }
}

impl fmt::Display for Phosphor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phosphor {
    type Err = UnknownPhosphor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" => Ok(Self::Green),
            "amber" => Ok(Self::Amber),
            _ => Err(UnknownPhosphor(s.to_string())),
        }
    }
}

/// Resolved styles for one phosphor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Body text.
    pub text: Style,
    /// Secondary text: code, quotes, hints.
    pub dim: Style,
    /// Links.
    pub accent: Style,
    /// The caret glyph.
    pub caret: Style,
    /// Title and status bars.
    pub bar: Style,
}

impl Palette {
    /// Colourless palette for `--no-color` / `NO_COLOR`.
    pub fn monochrome() -> Self {
        Self {
            text: Style::default(),
            dim: Style::default(),
            accent: Style::default().add_modifier(Modifier::UNDERLINED),
            caret: Style::default(),
            bar: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    /// Inline styles for page rendering.
    pub fn inline_styles(&self) -> InlineStyles {
        InlineStyles {
            text: self.text,
            heading: self.text.add_modifier(Modifier::BOLD),
            link: self.accent,
            code: self.dim,
            quote: self.dim,
        }
    }
}
