//! Height reservation so reveals never shift the surrounding layout.
//!
//! A block is measured by rendering an off-screen copy of its final content
//! (every segment full, caret attached) through the same word wrapper the
//! page uses. The live block is never touched, so nothing flashes.

use super::block::TextBlock;
use crate::model::{BlockKind, InlineTree};
use crate::render::{block_text, InlineStyles};
use ratatui::text::Span;
use ratatui::widgets::{Paragraph, Wrap};
use tracing::trace;

/// Rows `tree` occupies when wrapped at `width`.
///
/// A zero `width` falls back to the content's natural width (its widest
/// unwrapped line).
pub fn measure_rows(kind: BlockKind, tree: &InlineTree, width: u16, caret: Option<&str>) -> u16 {
    let caret = caret.map(|glyph| Span::raw(glyph.to_string()));
    let paragraph = Paragraph::new(block_text(kind, tree, &InlineStyles::plain(), caret))
        .wrap(Wrap { trim: false });
    let width = if width > 0 {
        width
    } else {
        u16::try_from(paragraph.line_width()).unwrap_or(u16::MAX)
    };
    u16::try_from(paragraph.line_count(width.max(1))).unwrap_or(u16::MAX)
}

/// Rows a typewriter block needs once fully revealed with the caret on it.
pub fn measure_block(block: &TextBlock, width: u16, caret: &str) -> u16 {
    measure_rows(block.kind(), &block.full_content(), width, Some(caret))
}

/// Measure and pin the height of every block.
pub fn reserve_heights(blocks: &mut [TextBlock], width: u16, caret: &str) {
    for (index, block) in blocks.iter_mut().enumerate() {
        let rows = measure_block(block, width, caret);
        trace!(block = index, rows, width, "reserved block height");
        block.reserve_height(rows);
    }
}
