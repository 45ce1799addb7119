//! Error types for the input and document boundaries.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the page source.
#[derive(Debug, Error)]
pub enum InputError {
    /// The given file does not exist.
    #[error("File not found: {path:?}")]
    FileNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// No file argument and stdin is an interactive terminal.
    #[error("No input: pass an HTML file or pipe a page into stdin")]
    NoInput,

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while turning HTML into a [`Page`](super::Page).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The typewriter selector is not valid CSS.
    #[error("Invalid typewriter selector {selector:?}: {reason}")]
    InvalidSelector {
        /// Selector text as configured.
        selector: String,
        /// Parser message.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_mentions_path() {
        let err = InputError::FileNotFound {
            path: PathBuf::from("/tmp/missing.html"),
        };
        assert!(err.to_string().contains("missing.html"));
    }

    #[test]
    fn io_error_converts_with_question_mark() {
        fn fails() -> Result<(), InputError> {
            Err(std::io::Error::other("boom"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(InputError::Io(_))));
    }

    #[test]
    fn invalid_selector_display() {
        let err = DocumentError::InvalidSelector {
            selector: "p[".to_string(),
            reason: "unexpected end".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid typewriter selector \"p[\": unexpected end"
        );
    }
}
