//! HTML to [`Page`] conversion.
//!
//! Pure function of the markup and the typewriter selector. Elements
//! matching the selector become typewriter blocks; other block-level
//! elements (`h1`-`h6`, `p`, `li`, `pre`, `blockquote`) are kept as static
//! blocks. Inline markup inside a block is preserved as an [`InlineTree`].

use crate::model::{
    BlockKind, DocumentError, ElementKind, InlineTree, NodeId, Page, PageBlock,
};
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

/// Elements whose content never reaches the page.
const HIDDEN_ELEMENTS: &[&str] = &[
    "head", "script", "style", "noscript", "template", "iframe", "svg", "title",
];

/// Elements that start a new line when nested inside another block.
const BLOCK_LEVEL_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// Parse `html`, treating elements that match `selector` as typewriter
/// blocks.
///
/// # Errors
///
/// Returns `DocumentError::InvalidSelector` if `selector` is not valid CSS.
pub fn parse_page(html: &str, selector: &str) -> Result<Page, DocumentError> {
    let typewriter = Selector::parse(selector).map_err(|e| DocumentError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })?;

    let document = Html::parse_document(html);
    let mut walker = PageWalker {
        typewriter: &typewriter,
        blocks: Vec::new(),
    };
    walker.walk(document.root_element());

    let page = Page {
        title: extract_title(&document),
        blocks: walker.blocks,
    };
    debug!(
        blocks = page.blocks.len(),
        typewriter = page.typewriter_count(),
        "parsed page"
    );
    Ok(page)
}

/// Whitespace-collapsed `<title>` text, if non-empty.
fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let title = document.select(&selector).next()?;
    let text = collapse_whitespace(&title.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_hidden(name: &str) -> bool {
    HIDDEN_ELEMENTS.contains(&name)
}

fn is_block_level(name: &str) -> bool {
    BLOCK_LEVEL_ELEMENTS.contains(&name)
}

/// Block kind for a static candidate, `None` for everything else.
fn static_kind(name: &str) -> Option<BlockKind> {
    match name {
        "h1" => Some(BlockKind::Heading(1)),
        "h2" => Some(BlockKind::Heading(2)),
        "h3" => Some(BlockKind::Heading(3)),
        "h4" => Some(BlockKind::Heading(4)),
        "h5" => Some(BlockKind::Heading(5)),
        "h6" => Some(BlockKind::Heading(6)),
        "p" => Some(BlockKind::Paragraph),
        "li" => Some(BlockKind::ListItem),
        "pre" => Some(BlockKind::Preformatted),
        "blockquote" => Some(BlockKind::Quote),
        _ => None,
    }
}

struct PageWalker<'s> {
    typewriter: &'s Selector,
    blocks: Vec<PageBlock>,
}

impl PageWalker<'_> {
    fn walk(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            let Some(el) = ElementRef::wrap(child) else {
                continue;
            };
            let name = el.value().name();
            if is_hidden(name) {
                continue;
            }

            if self.typewriter.matches(&el) {
                let kind = static_kind(name).unwrap_or(BlockKind::Paragraph);
                self.emit(el, kind, true);
                continue;
            }

            match static_kind(name) {
                // A container holding typewriter blocks yields to them.
                Some(kind) if !self.has_marked_descendant(el) => self.emit(el, kind, false),
                _ => self.walk(el),
            }
        }
    }

    fn has_marked_descendant(&self, element: ElementRef<'_>) -> bool {
        element
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .any(|el| self.typewriter.matches(&el))
    }

    fn emit(&mut self, element: ElementRef<'_>, kind: BlockKind, typewriter: bool) {
        let mut builder = InlineBuilder::new(kind == BlockKind::Preformatted);
        builder.push_children(element, None);
        let content = builder.finish();

        if !typewriter && content.plain_text().trim().is_empty() {
            return;
        }
        self.blocks.push(PageBlock {
            kind,
            content,
            typewriter,
        });
    }
}

/// Builds one block's inline tree, collapsing whitespace outside `pre`.
struct InlineBuilder {
    tree: InlineTree,
    preformatted: bool,
    /// Last emitted char was whitespace, or nothing was emitted on this line.
    after_space: bool,
    /// Nothing emitted since the block start or the last line break.
    line_empty: bool,
    /// A nested block ended or started; break before the next text.
    pending_break: bool,
    last_text: Option<NodeId>,
}

impl InlineBuilder {
    fn new(preformatted: bool) -> Self {
        Self {
            tree: InlineTree::new(),
            preformatted,
            after_space: true,
            line_empty: true,
            pending_break: false,
            last_text: None,
        }
    }

    fn push_children(&mut self, element: ElementRef<'_>, parent: Option<NodeId>) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.push_text(parent, text),
                Node::Element(_) => {
                    if let Some(el) = ElementRef::wrap(child) {
                        self.push_element(el, parent);
                    }
                }
                _ => {}
            }
        }
    }

    fn push_element(&mut self, el: ElementRef<'_>, parent: Option<NodeId>) {
        let name = el.value().name();
        let kind = match name {
            _ if is_hidden(name) => return,
            "br" => {
                self.line_break(parent);
                return;
            }
            _ if is_block_level(name) => {
                self.request_break();
                self.push_children(el, parent);
                self.request_break();
                return;
            }
            "a" => ElementKind::Link {
                href: el.value().attr("href").map(str::to_string),
            },
            "em" | "i" => ElementKind::Emphasis,
            "strong" | "b" => ElementKind::Strong,
            "code" | "kbd" | "samp" | "tt" => ElementKind::Code,
            _ => ElementKind::Span,
        };
        let id = self.tree.push_element(parent, kind);
        self.push_children(el, Some(id));
    }

    fn push_text(&mut self, parent: Option<NodeId>, raw: &str) {
        if self.preformatted {
            if !raw.is_empty() {
                self.flush_break(parent);
                self.last_text = Some(self.tree.push_text(parent, raw));
                self.line_empty = false;
            }
            return;
        }

        let mut out = String::with_capacity(raw.len());
        for c in raw.chars() {
            if c.is_ascii_whitespace() {
                if !self.after_space {
                    out.push(' ');
                    self.after_space = true;
                }
            } else {
                out.push(c);
                self.after_space = false;
            }
        }
        if !out.is_empty() {
            self.flush_break(parent);
            self.last_text = Some(self.tree.push_text(parent, out));
            self.line_empty = false;
        }
    }

    fn request_break(&mut self) {
        if !self.line_empty {
            self.pending_break = true;
            self.after_space = true;
        }
    }

    fn flush_break(&mut self, parent: Option<NodeId>) {
        if self.pending_break {
            self.line_break(parent);
        }
    }

    fn line_break(&mut self, parent: Option<NodeId>) {
        self.trim_last_text();
        self.tree.push_line_break(parent);
        self.after_space = true;
        self.line_empty = true;
        self.pending_break = false;
    }

    fn trim_last_text(&mut self) {
        let preformatted = self.preformatted;
        if let Some(text) = self.last_text.and_then(|id| self.tree.text_mut(id)) {
            let keep = if preformatted {
                text.trim_end_matches('\n').len()
            } else {
                text.trim_end_matches(' ').len()
            };
            text.truncate(keep);
        }
    }

    fn finish(mut self) -> InlineTree {
        self.trim_last_text();
        self.tree
    }
}
