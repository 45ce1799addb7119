//! Page and inline markup model.
//!
//! A [`Page`] is an ordered list of blocks. Each block owns an
//! [`InlineTree`]: an arena of text nodes, line breaks and inline elements
//! (links, emphasis, ...) that keeps the markup structure around the text.

use super::identifiers::NodeId;

/// Kind of an inline element wrapping other inline nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Hyperlink (`<a>`).
    Link {
        /// Target URL, if present.
        href: Option<String>,
    },
    /// `<em>` / `<i>`.
    Emphasis,
    /// `<strong>` / `<b>`.
    Strong,
    /// `<code>` and friends.
    Code,
    /// Any other inline element; adds no styling.
    Span,
}

/// A node in an [`InlineTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Terminal text-bearing node.
    Text(String),
    /// Element with ordered children.
    Element {
        /// What the element is.
        kind: ElementKind,
        /// Child nodes in document order.
        children: Vec<NodeId>,
    },
    /// Forced line break (`<br>`).
    LineBreak,
}

/// Arena-backed tree of inline nodes for one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineTree {
    nodes: Vec<InlineNode>,
    roots: Vec<NodeId>,
}

impl InlineTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text node under `parent` (or at the top level).
    pub fn push_text(&mut self, parent: Option<NodeId>, text: impl Into<String>) -> NodeId {
        self.push(parent, InlineNode::Text(text.into()))
    }

    /// Append an element under `parent` (or at the top level).
    pub fn push_element(&mut self, parent: Option<NodeId>, kind: ElementKind) -> NodeId {
        self.push(
            parent,
            InlineNode::Element {
                kind,
                children: Vec::new(),
            },
        )
    }

    /// Append a line break under `parent` (or at the top level).
    pub fn push_line_break(&mut self, parent: Option<NodeId>) -> NodeId {
        self.push(parent, InlineNode::LineBreak)
    }

    /// A parent that is not an element is treated as absent.
    fn push(&mut self, parent: Option<NodeId>, node: InlineNode) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        match parent.and_then(|p| self.nodes.get_mut(p.index())) {
            Some(InlineNode::Element { children, .. }) => children.push(id),
            _ => self.roots.push(id),
        }
        id
    }

    /// Top-level nodes in document order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&InlineNode> {
        self.nodes.get(id.index())
    }

    /// Current value of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.node(id)? {
            InlineNode::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Mutable access to a text node's value.
    ///
    /// Once a block has been snapshotted, only its text segments write
    /// through this.
    pub(crate) fn text_mut(&mut self, id: NodeId) -> Option<&mut String> {
        match self.nodes.get_mut(id.index())? {
            InlineNode::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Every text node, depth-first in document order.
    pub fn text_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            match self.node(id) {
                Some(InlineNode::Text(_)) => out.push(id),
                Some(InlineNode::Element { children, .. }) => {
                    stack.extend(children.iter().rev().copied());
                }
                Some(InlineNode::LineBreak) | None => {}
            }
        }
        out
    }

    /// Concatenated current text, with `\n` for line breaks.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            match self.node(id) {
                Some(InlineNode::Text(text)) => out.push_str(text),
                Some(InlineNode::LineBreak) => out.push('\n'),
                Some(InlineNode::Element { children, .. }) => {
                    stack.extend(children.iter().rev().copied());
                }
                None => {}
            }
        }
        out
    }

    /// Number of nodes of any kind.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Visual role of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `<h1>`..`<h6>`; the level is 1-based.
    Heading(u8),
    /// `<p>` or any other selected element.
    Paragraph,
    /// `<li>`.
    ListItem,
    /// `<pre>`; whitespace is kept verbatim.
    Preformatted,
    /// `<blockquote>`.
    Quote,
}

/// One block of a parsed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBlock {
    /// Visual role.
    pub kind: BlockKind,
    /// Inline content.
    pub content: InlineTree,
    /// Whether the block carries the typewriter marker.
    pub typewriter: bool,
}

/// A parsed page ready for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Document `<title>`, whitespace-collapsed.
    pub title: Option<String>,
    /// Blocks in document order.
    pub blocks: Vec<PageBlock>,
}

impl Page {
    /// Number of blocks carrying the typewriter marker.
    pub fn typewriter_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.typewriter).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linked_tree() -> (InlineTree, NodeId, NodeId, NodeId) {
        let mut tree = InlineTree::new();
        let lead = tree.push_text(None, "Visit ");
        let link = tree.push_element(
            None,
            ElementKind::Link {
                href: Some("https://example.com".to_string()),
            },
        );
        let label = tree.push_text(Some(link), "the site");
        tree.push_line_break(None);
        let tail = tree.push_text(None, "today");
        (tree, lead, label, tail)
    }

    #[test]
    fn text_nodes_follow_document_order() {
        let (tree, lead, label, tail) = linked_tree();
        assert_eq!(tree.text_nodes(), vec![lead, label, tail]);
    }

    #[test]
    fn plain_text_renders_line_breaks() {
        let (tree, ..) = linked_tree();
        assert_eq!(tree.plain_text(), "Visit the site\ntoday");
    }

    #[test]
    fn text_lookup_rejects_elements() {
        let (tree, lead, ..) = linked_tree();
        assert_eq!(tree.text(lead), Some("Visit "));
        let link = tree.roots()[1];
        assert_eq!(tree.text(link), None);
    }

    #[test]
    fn non_element_parent_falls_back_to_root() {
        let mut tree = InlineTree::new();
        let text = tree.push_text(None, "a");
        let orphan = tree.push_text(Some(text), "b");
        assert_eq!(tree.roots(), &[text, orphan]);
    }

    #[test]
    fn nested_elements_keep_order() {
        let mut tree = InlineTree::new();
        let strong = tree.push_element(None, ElementKind::Strong);
        let em = tree.push_element(Some(strong), ElementKind::Emphasis);
        tree.push_text(Some(em), "deep");
        tree.push_text(Some(strong), " shallow");
        tree.push_text(None, " top");
        assert_eq!(tree.plain_text(), "deep shallow top");
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn typewriter_count_counts_marked_blocks() {
        let page = Page {
            title: None,
            blocks: vec![
                PageBlock {
                    kind: BlockKind::Heading(1),
                    content: InlineTree::new(),
                    typewriter: false,
                },
                PageBlock {
                    kind: BlockKind::Paragraph,
                    content: InlineTree::new(),
                    typewriter: true,
                },
            ],
        };
        assert_eq!(page.typewriter_count(), 1);
    }
}
