//! The unit of animation.

use super::controller::Completion;
use super::segment::TextSegment;
use super::snapshot::snapshot_segments;
use crate::model::{BlockKind, InlineTree};

/// Tick numbers at which a block was entered and completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeline {
    /// Runner tick count when the block's reveal started.
    pub entered_at: Option<u64>,
    /// Runner tick count when the block completed.
    pub completed_at: Option<u64>,
    /// How the block completed; `None` for swept or unfinished blocks.
    pub completion: Option<Completion>,
}

impl Timeline {
    /// Ticks between entry and completion.
    pub fn ticks(&self) -> Option<u64> {
        Some(self.completed_at?.saturating_sub(self.entered_at?))
    }
}

/// A block revealed by the typewriter.
///
/// Segments are captured on construction, before anything mutates the
/// content, and stay fixed for the block's lifetime.
#[derive(Debug, Clone)]
pub struct TextBlock {
    kind: BlockKind,
    content: InlineTree,
    segments: Vec<TextSegment>,
    reserved_height: u16,
    typed: bool,
    visible: bool,
    caret_active: bool,
    timeline: Timeline,
}

impl TextBlock {
    /// Snapshot `content` into a hidden, untyped block.
    pub fn new(kind: BlockKind, content: InlineTree) -> Self {
        let segments = snapshot_segments(&content);
        Self {
            kind,
            content,
            segments,
            reserved_height: 0,
            typed: false,
            visible: false,
            caret_active: false,
            timeline: Timeline::default(),
        }
    }

    /// Visual role of the block.
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Live inline content.
    pub fn content(&self) -> &InlineTree {
        &self.content
    }

    /// Segments in snapshot order.
    pub fn segments(&self) -> &[TextSegment] {
        &self.segments
    }

    /// Sum of all segment lengths, in chars.
    pub fn total_chars(&self) -> usize {
        self.segments.iter().map(TextSegment::char_len).sum()
    }

    /// Chars currently revealed across all segments.
    pub fn revealed_chars(&self) -> usize {
        self.segments.iter().map(TextSegment::revealed).sum()
    }

    /// True when every segment's live value equals its snapshot.
    pub fn is_fully_revealed(&self) -> bool {
        self.segments
            .iter()
            .all(|s| s.is_revealed() && s.live(&self.content) == s.full())
    }

    /// Minimum rows pinned for this block.
    pub fn reserved_height(&self) -> u16 {
        self.reserved_height
    }

    /// Whether the block has begun (or finished) its reveal.
    pub fn is_typed(&self) -> bool {
        self.typed
    }

    /// Whether the block is drawn. Hidden blocks still take their rows.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the caret is attached here.
    pub fn caret_active(&self) -> bool {
        self.caret_active
    }

    /// Entry and completion ticks.
    pub fn timeline(&self) -> Timeline {
        self.timeline
    }

    pub(crate) fn mark_typed(&mut self) {
        self.typed = true;
    }

    pub(crate) fn show(&mut self) {
        self.visible = true;
    }

    pub(crate) fn set_caret(&mut self, active: bool) {
        self.caret_active = active;
    }

    pub(crate) fn reserve_height(&mut self, rows: u16) {
        self.reserved_height = rows;
    }

    pub(crate) fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    pub(crate) fn clear_segments(&mut self) {
        for segment in &mut self.segments {
            segment.clear(&mut self.content);
        }
    }

    pub(crate) fn reveal_segments(&mut self) {
        for segment in &mut self.segments {
            segment.reveal_all(&mut self.content);
        }
    }

    /// Append up to `budget` chars to segment `index`.
    pub(crate) fn append_to_segment(&mut self, index: usize, budget: usize) -> usize {
        match self.segments.get_mut(index) {
            Some(segment) => segment.append(&mut self.content, budget),
            None => 0,
        }
    }

    /// Copy of the content with every segment at its full value.
    pub(crate) fn full_content(&self) -> InlineTree {
        let mut shadow = self.content.clone();
        for segment in &self.segments {
            segment.write_full_into(&mut shadow);
        }
        shadow
    }
}
