//! Stdin page source for piped input (`curl ... | phosphor`).

use super::{PageSource, SourceOrigin};
use crate::model::error::InputError;
use std::io::{IsTerminal, Read};
use tracing::debug;

/// Read all of stdin.
///
/// # Errors
///
/// Returns `InputError::NoInput` if stdin is a TTY, so the viewer never
/// sits waiting for typed input when the user forgot to pipe a page.
pub fn read_stdin() -> Result<PageSource, InputError> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(InputError::NoInput);
    }
    read_from(stdin.lock())
}

/// Read a page from any reader until EOF.
pub fn read_from<R: Read>(mut reader: R) -> Result<PageSource, InputError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    debug!(bytes = bytes.len(), "read page from stdin");
    Ok(PageSource {
        html: String::from_utf8_lossy(&bytes).into_owned(),
        origin: SourceOrigin::Stdin,
    })
}
