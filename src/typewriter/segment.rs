//! Text segments: the only writers of a block's text nodes.

use crate::model::{InlineTree, NodeId};

/// One text-bearing node of a block plus its full value.
///
/// The full value is captured before any mutation. The segment keeps a
/// back-reference to its node and is the only thing that rewrites the
/// node's text afterwards. Lengths and offsets count `char`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    node: NodeId,
    full: String,
    char_len: usize,
    revealed: usize,
}

impl TextSegment {
    /// A segment starts out fully revealed: the node still holds its
    /// original text.
    pub(crate) fn new(node: NodeId, full: impl Into<String>) -> Self {
        let full = full.into();
        let char_len = full.chars().count();
        Self {
            node,
            full,
            char_len,
            revealed: char_len,
        }
    }

    /// Node this segment writes to.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Full (final) value.
    pub fn full(&self) -> &str {
        &self.full
    }

    /// Full value length in chars.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Chars currently shown.
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Chars still hidden.
    pub fn remaining(&self) -> usize {
        self.char_len - self.revealed
    }

    /// True once the live value equals the full value.
    pub fn is_revealed(&self) -> bool {
        self.revealed == self.char_len
    }

    /// Live value as currently displayed.
    pub fn live<'a>(&self, tree: &'a InlineTree) -> &'a str {
        tree.text(self.node).unwrap_or_default()
    }

    pub(crate) fn clear(&mut self, tree: &mut InlineTree) {
        if let Some(text) = tree.text_mut(self.node) {
            text.clear();
        }
        self.revealed = 0;
    }

    pub(crate) fn reveal_all(&mut self, tree: &mut InlineTree) {
        self.write_full_into(tree);
        self.revealed = self.char_len;
    }

    /// Write the full value into `tree` without touching reveal progress.
    ///
    /// Used on off-screen copies of a block.
    pub(crate) fn write_full_into(&self, tree: &mut InlineTree) {
        if let Some(text) = tree.text_mut(self.node) {
            text.clear();
            text.push_str(&self.full);
        }
    }

    /// Append up to `budget` of the next hidden chars; returns how many.
    pub(crate) fn append(&mut self, tree: &mut InlineTree, budget: usize) -> usize {
        let take = budget.min(self.remaining());
        if take == 0 {
            return 0;
        }
        if let Some(text) = tree.text_mut(self.node) {
            text.extend(self.full.chars().skip(self.revealed).take(take));
        }
        self.revealed += take;
        take
    }
}
