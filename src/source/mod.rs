//! Page input sources.
//!
//! A page comes either from a file argument or from piped stdin. Both are
//! read to the end up front; the viewer never streams.

use crate::model::error::InputError;
use std::fmt;
use std::path::PathBuf;

pub mod file;
pub mod stdin;

/// Where a page was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOrigin {
    /// A file on disk.
    File(PathBuf),
    /// Piped standard input.
    Stdin,
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceOrigin::File(path) => match path.file_name() {
                Some(name) => write!(f, "{}", name.to_string_lossy()),
                None => write!(f, "{}", path.display()),
            },
            SourceOrigin::Stdin => f.write_str("<stdin>"),
        }
    }
}

/// Raw page markup and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSource {
    /// Where the markup came from.
    pub origin: SourceOrigin,
    /// The markup, lossily decoded as UTF-8.
    pub html: String,
}

/// Read the page from `file`, or from stdin when no file is given.
///
/// # Errors
///
/// - `InputError::FileNotFound` if the file does not exist.
/// - `InputError::NoInput` if no file is given and stdin is a terminal.
/// - `InputError::Io` for read failures.
pub fn read_page(file: Option<PathBuf>) -> Result<PageSource, InputError> {
    match file {
        Some(path) => file::read_file(path),
        None => stdin::read_stdin(),
    }
}
