//! File-backed page source.

use super::{PageSource, SourceOrigin};
use crate::model::error::InputError;
use std::path::PathBuf;
use tracing::debug;

/// Read a whole HTML file.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist, or
/// `InputError::Io` if reading fails.
pub fn read_file(path: impl Into<PathBuf>) -> Result<PageSource, InputError> {
    let path = path.into();
    if !path.exists() {
        return Err(InputError::FileNotFound { path });
    }
    let bytes = std::fs::read(&path)?;
    debug!(path = ?path, bytes = bytes.len(), "read page file");
    Ok(PageSource {
        html: String::from_utf8_lossy(&bytes).into_owned(),
        origin: SourceOrigin::File(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_is_file_not_found() {
        let missing = std::env::temp_dir().join("phosphor_nonexistent_12345.html");
        match read_file(&missing) {
            Err(InputError::FileNotFound { path }) => assert_eq!(path, missing),
            other => panic!("Expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let path = std::env::temp_dir().join("phosphor_source_latin1.html");
        fs::write(&path, b"<p>caf\xe9</p>").expect("write");

        let source = read_file(&path).expect("read");

        let _ = fs::remove_file(&path);
        assert_eq!(source.html, "<p>caf\u{fffd}</p>");
    }

    #[test]
    fn directory_is_an_io_error() {
        let dir = std::env::temp_dir();
        assert!(matches!(read_file(dir), Err(InputError::Io(_))));
    }
}
