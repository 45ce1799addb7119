//! Inline tree to ratatui text conversion (pure).
//!
//! Shared by the page view (live rendering) and by height reservation
//! (off-screen measurement), so both always agree on how a block wraps.

use crate::model::{BlockKind, ElementKind, InlineNode, InlineTree, NodeId};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Styles applied while converting an inline tree.
///
/// Styling never changes glyph widths, so [`InlineStyles::plain`] measures
/// exactly like a themed render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InlineStyles {
    /// Body text.
    pub text: Style,
    /// Heading blocks.
    pub heading: Style,
    /// Link elements, patched over the surrounding style.
    pub link: Style,
    /// Code elements, patched over the surrounding style.
    pub code: Style,
    /// Quote blocks.
    pub quote: Style,
}

impl InlineStyles {
    /// Unstyled text, used for measurement.
    pub fn plain() -> Self {
        Self::default()
    }
}

/// Marker printed before the first line of a block.
fn prefix(kind: BlockKind) -> Option<&'static str> {
    match kind {
        BlockKind::ListItem => Some("• "),
        BlockKind::Quote => Some("│ "),
        BlockKind::Heading(_) | BlockKind::Paragraph | BlockKind::Preformatted => None,
    }
}

/// Accumulates spans into lines.
struct LineBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
}

impl LineBuilder {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            current: Vec::new(),
        }
    }

    fn push(&mut self, span: Span<'static>) {
        self.current.push(span);
    }

    fn push_text(&mut self, text: &str, style: Style) {
        let mut parts = text.split('\n');
        if let Some(first) = parts.next() {
            if !first.is_empty() {
                self.push(Span::styled(first.to_string(), style));
            }
        }
        for part in parts {
            self.break_line();
            if !part.is_empty() {
                self.push(Span::styled(part.to_string(), style));
            }
        }
    }

    fn break_line(&mut self) {
        let spans = std::mem::take(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn finish(mut self) -> Text<'static> {
        self.break_line();
        Text::from(self.lines)
    }
}

fn push_node(
    tree: &InlineTree,
    id: NodeId,
    style: Style,
    styles: &InlineStyles,
    out: &mut LineBuilder,
) {
    match tree.node(id) {
        Some(InlineNode::Text(text)) => out.push_text(text, style),
        Some(InlineNode::LineBreak) => out.break_line(),
        Some(InlineNode::Element { kind, children }) => {
            let inner = match kind {
                ElementKind::Link { .. } => style.patch(styles.link),
                ElementKind::Emphasis => style.add_modifier(Modifier::ITALIC),
                ElementKind::Strong => style.add_modifier(Modifier::BOLD),
                ElementKind::Code => style.patch(styles.code),
                ElementKind::Span => style,
            };
            for &child in children {
                push_node(tree, child, inner, styles, out);
            }
        }
        None => {}
    }
}

/// Convert a block's inline tree into styled text.
///
/// `caret` is appended after the last span when present.
pub fn block_text(
    kind: BlockKind,
    tree: &InlineTree,
    styles: &InlineStyles,
    caret: Option<Span<'static>>,
) -> Text<'static> {
    let base = match kind {
        BlockKind::Heading(_) => styles.heading,
        BlockKind::Quote => styles.quote,
        BlockKind::Paragraph | BlockKind::ListItem | BlockKind::Preformatted => styles.text,
    };

    let mut out = LineBuilder::new();
    if let Some(marker) = prefix(kind) {
        out.push(Span::styled(marker, base));
    }
    for &id in tree.roots() {
        push_node(tree, id, base, styles, &mut out);
    }
    if let Some(caret) = caret {
        out.push(caret);
    }
    out.finish()
}
