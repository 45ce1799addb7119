//! Page layout and scrolling.
//!
//! Blocks are stacked top to bottom with one blank row between them.
//! Static blocks take the height of their wrapped text; typewriter blocks
//! take their reserved height whether or not they have been revealed, so
//! nothing below them moves while they type.

use crate::model::{BlockKind, InlineTree, PageBlock};
use crate::render::{block_text, InlineStyles};
use crate::typewriter::height::measure_rows;
use crate::typewriter::TextBlock;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

/// Blank rows between consecutive blocks.
pub const BLOCK_GAP: u16 = 1;

/// One block in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSlot {
    /// Rendered in full from the start.
    Static {
        /// Visual role.
        kind: BlockKind,
        /// Inline content.
        content: InlineTree,
        /// Wrapped rows at the current width.
        rows: u16,
    },
    /// Index into the runner's typewriter blocks.
    Typed(usize),
}

/// Layout and scroll state of the page body.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    slots: Vec<PageSlot>,
    width: u16,
    scroll: u16,
}

impl PageView {
    /// Split parsed blocks into page slots and the typewriter blocks the
    /// runner will own.
    pub fn split(blocks: Vec<PageBlock>) -> (Self, Vec<TextBlock>) {
        let mut slots = Vec::with_capacity(blocks.len());
        let mut typed = Vec::new();
        for block in blocks {
            if block.typewriter {
                slots.push(PageSlot::Typed(typed.len()));
                typed.push(TextBlock::new(block.kind, block.content));
            } else {
                slots.push(PageSlot::Static {
                    kind: block.kind,
                    content: block.content,
                    rows: 0,
                });
            }
        }
        let view = Self {
            slots,
            width: 0,
            scroll: 0,
        };
        (view, typed)
    }

    /// Slots in page order.
    pub fn slots(&self) -> &[PageSlot] {
        &self.slots
    }

    /// Width the static blocks were last measured at.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// First visible row.
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Re-measure static blocks for `width` columns.
    pub fn relayout(&mut self, width: u16) {
        self.width = width;
        for slot in &mut self.slots {
            if let PageSlot::Static {
                kind,
                content,
                rows,
            } = slot
            {
                *rows = measure_rows(*kind, content, width, None);
            }
        }
    }

    fn slot_rows(slot: &PageSlot, typed: &[TextBlock]) -> u16 {
        match slot {
            PageSlot::Static { rows, .. } => *rows,
            PageSlot::Typed(index) => typed.get(*index).map_or(0, TextBlock::reserved_height),
        }
    }

    /// Top row of every slot, in page coordinates.
    fn offsets(&self, typed: &[TextBlock]) -> Vec<u16> {
        let mut offsets = Vec::with_capacity(self.slots.len());
        let mut y: u16 = 0;
        for slot in &self.slots {
            offsets.push(y);
            y = y
                .saturating_add(Self::slot_rows(slot, typed))
                .saturating_add(BLOCK_GAP);
        }
        offsets
    }

    /// Total rows, gaps included but without a trailing gap.
    pub fn content_height(&self, typed: &[TextBlock]) -> u16 {
        let rows = self
            .slots
            .iter()
            .fold(0u16, |acc, slot| acc.saturating_add(Self::slot_rows(slot, typed)));
        let gaps = u16::try_from(self.slots.len().saturating_sub(1)).unwrap_or(u16::MAX);
        rows.saturating_add(gaps.saturating_mul(BLOCK_GAP))
    }

    /// Largest scroll offset that still fills `viewport` rows.
    pub fn max_scroll(&self, typed: &[TextBlock], viewport: u16) -> u16 {
        self.content_height(typed).saturating_sub(viewport)
    }

    /// Scroll by `delta` rows, clamped to the page.
    pub fn scroll_by(&mut self, delta: i32, typed: &[TextBlock], viewport: u16) {
        let target = i64::from(self.scroll) + i64::from(delta);
        let max = i64::from(self.max_scroll(typed, viewport));
        self.scroll = u16::try_from(target.clamp(0, max)).unwrap_or(0);
    }

    /// Jump to the first row.
    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    /// Jump so the last row sits at the bottom of the viewport.
    pub fn scroll_to_bottom(&mut self, typed: &[TextBlock], viewport: u16) {
        self.scroll = self.max_scroll(typed, viewport);
    }

    /// Re-apply the clamp after a layout change.
    pub fn clamp_scroll(&mut self, typed: &[TextBlock], viewport: u16) {
        self.scroll = self.scroll.min(self.max_scroll(typed, viewport));
    }

    /// Draw the visible part of the page into `area`.
    ///
    /// `caret` is appended to whichever typewriter block currently holds
    /// the caret. Typewriter blocks that are not visible yet leave their
    /// rows blank.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        typed: &[TextBlock],
        styles: &InlineStyles,
        caret: &Span<'static>,
    ) {
        let top = self.scroll;
        let bottom = top.saturating_add(area.height);

        for (slot, y) in self.slots.iter().zip(self.offsets(typed)) {
            let rows = Self::slot_rows(slot, typed);
            let end = y.saturating_add(rows);
            if rows == 0 || end <= top {
                continue;
            }
            if y >= bottom {
                break;
            }

            let text = match slot {
                PageSlot::Static { kind, content, .. } => {
                    block_text(*kind, content, styles, None)
                }
                PageSlot::Typed(index) => match typed.get(*index) {
                    Some(block) if block.is_visible() => {
                        let caret = block.caret_active().then(|| caret.clone());
                        block_text(block.kind(), block.content(), styles, caret)
                    }
                    _ => continue,
                },
            };

            let visible_top = y.max(top);
            let visible_end = end.min(bottom);
            let target = Rect {
                x: area.x,
                y: area.y + (visible_top - top),
                width: area.width,
                height: visible_end - visible_top,
            };
            let paragraph = Paragraph::new(text)
                .wrap(Wrap { trim: false })
                .scroll((visible_top - y, 0));
            frame.render_widget(paragraph, target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typewriter::{RevealTiming, SequentialRunner, SkipSignal};

    fn block(text: &str, typewriter: bool) -> PageBlock {
        let mut content = InlineTree::new();
        content.push_text(None, text);
        PageBlock {
            kind: BlockKind::Paragraph,
            content,
            typewriter,
        }
    }

    fn sample() -> (PageView, Vec<TextBlock>) {
        let (mut view, mut typed) = PageView::split(vec![
            block("intro", false),
            block("first typed", true),
            block("outro", false),
            block("second typed", true),
        ]);
        view.relayout(40);
        crate::typewriter::height::reserve_heights(&mut typed, 40, "█");
        (view, typed)
    }

    #[test]
    fn split_keeps_page_order_and_indexes_typed_blocks() {
        let (view, typed) = sample();
        assert_eq!(typed.len(), 2);
        assert!(matches!(view.slots()[0], PageSlot::Static { .. }));
        assert_eq!(view.slots()[1], PageSlot::Typed(0));
        assert!(matches!(view.slots()[2], PageSlot::Static { .. }));
        assert_eq!(view.slots()[3], PageSlot::Typed(1));
    }

    #[test]
    fn content_height_counts_reserved_rows_and_gaps() {
        let (view, typed) = sample();
        // four one-row blocks and three gaps
        assert_eq!(view.content_height(&typed), 7);
    }

    #[test]
    fn hidden_typed_blocks_still_take_their_rows() {
        let (view, typed) = sample();
        assert!(typed.iter().all(|b| !b.is_visible()));
        assert_eq!(view.offsets(&typed), vec![0, 2, 4, 6]);
    }

    #[test]
    fn narrow_widths_grow_static_blocks() {
        let (mut view, typed) = PageView::split(vec![block("aaaa bbbb cccc", false)]);
        view.relayout(40);
        assert_eq!(view.content_height(&typed), 1);
        view.relayout(4);
        assert!(view.content_height(&typed) >= 3);
    }

    #[test]
    fn scrolling_is_clamped_to_the_page() {
        let (mut view, typed) = sample();
        view.scroll_by(100, &typed, 3);
        assert_eq!(view.scroll(), 4);
        view.scroll_by(-1, &typed, 3);
        assert_eq!(view.scroll(), 3);
        view.scroll_by(-100, &typed, 3);
        assert_eq!(view.scroll(), 0);
    }

    #[test]
    fn tall_viewport_never_scrolls() {
        let (mut view, typed) = sample();
        view.scroll_to_bottom(&typed, 50);
        assert_eq!(view.scroll(), 0);
    }

    #[test]
    fn clamp_pulls_scroll_back_after_widening() {
        let (mut view, mut typed) = PageView::split(vec![block(&"x".repeat(30), true)]);
        view.relayout(5);
        crate::typewriter::height::reserve_heights(&mut typed, 5, "█");
        view.scroll_to_bottom(&typed, 2);
        assert_eq!(view.scroll(), 5);

        view.relayout(40);
        crate::typewriter::height::reserve_heights(&mut typed, 40, "█");
        view.clamp_scroll(&typed, 2);
        assert_eq!(view.scroll(), 0);
    }

    #[test]
    fn reserved_height_does_not_change_while_typing() {
        let (view, typed) = sample();
        let before = view.content_height(&typed);
        let mut runner = SequentialRunner::new(typed, RevealTiming::default(), SkipSignal::new());
        runner.start();
        for _ in 0..5 {
            runner.tick();
            assert_eq!(view.content_height(runner.blocks()), before);
        }
    }
}
