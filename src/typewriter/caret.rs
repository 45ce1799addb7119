//! Ownership of the caret across blocks.

use super::block::TextBlock;

/// Tracks which block holds the caret.
///
/// Owned by the runner and handed to each controller transition; attaching
/// always detaches the previous holder first, so at most one block shows
/// the caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaretHolder {
    current: Option<usize>,
}

impl CaretHolder {
    /// Nobody holds the caret.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the holding block.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Move the caret to `blocks[index]`. Out-of-range indices leave the
    /// caret where it is.
    pub fn attach(&mut self, blocks: &mut [TextBlock], index: usize) {
        if index >= blocks.len() {
            return;
        }
        if let Some(previous) = self.current.take() {
            if let Some(block) = blocks.get_mut(previous) {
                block.set_caret(false);
            }
        }
        blocks[index].set_caret(true);
        self.current = Some(index);
    }
}
