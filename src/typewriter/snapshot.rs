//! Text snapshots taken before any reveal mutates a block.

use super::segment::TextSegment;
use crate::model::InlineTree;

/// Walk `tree` in document order and capture every text node whose
/// trimmed value is non-empty.
///
/// Deterministic for an unmutated tree: calling it twice yields the same
/// segments. Whitespace-only nodes are left out and never touched.
pub fn snapshot_segments(tree: &InlineTree) -> Vec<TextSegment> {
    tree.text_nodes()
        .into_iter()
        .filter_map(|id| {
            let value = tree.text(id)?;
            (!value.trim().is_empty()).then(|| TextSegment::new(id, value))
        })
        .collect()
}
