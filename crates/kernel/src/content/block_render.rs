//! Server-side rendering of rich-text blocks to HTML.
//!
//! Converts Portable Text blocks exported by the studio into semantic HTML:
//! - `normal` paragraphs, `h2` section headings, `h3` deep-linkable headings
//! - Any other style or object type falls back to a plain paragraph
//! - Consecutive list items are grouped into (nested) `<ul>`/`<ol>` lists
//!
//! Rendering is total: missing input renders as an empty string and no
//! block is ever dropped.

use std::sync::LazyLock;

use serde_json::Value;
use tracing::{debug, warn};

use super::block::{BlockKind, ContentBlock, ListKind, TEXT_BLOCK_TYPE, parse_blocks};
use super::html::html_escape;
use super::marks::render_children;

/// Prefix of the `id` given to level-3 headings; links use `#h-<key>`.
pub const ANCHOR_PREFIX: &str = "h-";

const HEADING2_CLASS: &str = "text-2xl font-bold";
const HEADING3_CLASS: &str = "scroll-mt-24 text-xl font-semibold";

/// Renders one kind of block, given its already-rendered inline content.
pub trait BlockRenderer: Send + Sync {
    /// Renderer name for debugging.
    fn name(&self) -> &str;

    /// Wrap the block's inline HTML in the element for this block kind.
    fn render(&self, block: &ContentBlock, children: &str) -> String;
}

/// `<p>` paragraph.
pub struct ParagraphRenderer;

impl BlockRenderer for ParagraphRenderer {
    fn name(&self) -> &str {
        "paragraph"
    }

    fn render(&self, _block: &ContentBlock, children: &str) -> String {
        format!("<p>{children}</p>")
    }
}

/// Styled `<h2>` section heading.
pub struct Heading2Renderer;

impl BlockRenderer for Heading2Renderer {
    fn name(&self) -> &str {
        "heading_2"
    }

    fn render(&self, _block: &ContentBlock, children: &str) -> String {
        format!("<h2 class=\"{HEADING2_CLASS}\">{children}</h2>")
    }
}

/// `<h3>` with an anchor id derived from the block key.
pub struct AnchoredHeadingRenderer;

impl BlockRenderer for AnchoredHeadingRenderer {
    fn name(&self) -> &str {
        "anchored_heading_3"
    }

    fn render(&self, block: &ContentBlock, children: &str) -> String {
        format!(
            "<h3 id=\"{}\" class=\"{HEADING3_CLASS}\">{children}</h3>",
            anchor_id(&block.key)
        )
    }
}

/// Catch-all for unrecognised styles and object types.
pub struct FallbackRenderer;

impl BlockRenderer for FallbackRenderer {
    fn name(&self) -> &str {
        "fallback"
    }

    fn render(&self, block: &ContentBlock, children: &str) -> String {
        if block.block_type == TEXT_BLOCK_TYPE {
            debug!(style = ?block.style, key = %block.key, "unknown block style, rendering as paragraph");
        } else {
            warn!(block_type = %block.block_type, key = %block.key, "no renderer for block type, rendering as paragraph");
        }
        format!("<p>{children}</p>")
    }
}

/// Dispatch table from block kind to renderer.
pub struct RendererTable {
    normal: Box<dyn BlockRenderer>,
    heading2: Box<dyn BlockRenderer>,
    heading3: Box<dyn BlockRenderer>,
    fallback: Box<dyn BlockRenderer>,
}

impl RendererTable {
    /// The site's standard rendering rules.
    pub fn standard() -> Self {
        Self {
            normal: Box::new(ParagraphRenderer),
            heading2: Box::new(Heading2Renderer),
            heading3: Box::new(AnchoredHeadingRenderer),
            fallback: Box::new(FallbackRenderer),
        }
    }

    /// Renderer responsible for a block kind.
    pub fn for_kind(&self, kind: &BlockKind) -> &dyn BlockRenderer {
        match kind {
            BlockKind::Normal => self.normal.as_ref(),
            BlockKind::Heading2 => self.heading2.as_ref(),
            BlockKind::Heading3 => self.heading3.as_ref(),
            BlockKind::Unknown(_) => self.fallback.as_ref(),
        }
    }

    /// Render a block sequence to HTML using this table.
    pub fn render(&self, blocks: &[ContentBlock]) -> String {
        let mut html = String::new();
        let mut index = 0;
        while index < blocks.len() {
            let rest = &blocks[index..];
            if rest[0].list_kind().is_some() {
                let len = rest
                    .iter()
                    .position(|b| b.list_kind().is_none())
                    .unwrap_or(rest.len());
                html.push_str(&render_list(&rest[..len]));
                index += len;
            } else {
                html.push_str(&self.render_block(&rest[0]));
                index += 1;
            }
        }
        html
    }

    /// Render a single non-list block.
    pub fn render_block(&self, block: &ContentBlock) -> String {
        let children = render_children(&block.children, &block.mark_defs);
        self.for_kind(&block.kind()).render(block, &children)
    }
}

impl Default for RendererTable {
    fn default() -> Self {
        Self::standard()
    }
}

// Built once; immutable afterwards.
static RENDERERS: LazyLock<RendererTable> = LazyLock::new(RendererTable::standard);

/// Render an ordered sequence of blocks into a single HTML string.
pub fn render_blocks(blocks: &[ContentBlock]) -> String {
    RENDERERS.render(blocks)
}

/// Render a Portable Text JSON value. Missing or non-array input renders
/// as an empty string.
pub fn render_json(blocks: Option<&Value>) -> String {
    render_blocks(&parse_blocks(blocks))
}

/// Anchor id for a heading block key (`h-<key>`).
pub fn anchor_id(key: &str) -> String {
    format!("{ANCHOR_PREFIX}{}", html_escape(key))
}

/// Render a run of consecutive list-item blocks as nested lists.
///
/// Each open list keeps its last `<li>` open so a deeper item nests inside
/// it. A shallower item, or an item of a different kind at the same level,
/// closes lists until it can continue or open its own.
fn render_list(items: &[ContentBlock]) -> String {
    let mut html = String::new();
    let mut open: Vec<(ListKind, u32)> = Vec::new();

    for item in items {
        let Some(kind) = item.list_kind() else {
            continue;
        };
        let level = item.list_level();

        while let Some(&(open_kind, open_level)) = open.last() {
            if open_level > level || (open_level == level && open_kind != kind) {
                html.push_str("</li>");
                html.push_str(open_kind.close_tag());
                open.pop();
            } else {
                break;
            }
        }

        let continues = matches!(open.last(), Some(&(_, open_level)) if open_level == level);
        if continues {
            html.push_str("</li>");
        } else {
            html.push_str(kind.open_tag());
            open.push((kind, level));
        }

        html.push_str("<li>");
        html.push_str(&render_children(&item.children, &item.mark_defs));
    }

    while let Some((kind, _)) = open.pop() {
        html.push_str("</li>");
        html.push_str(kind.close_tag());
    }
    html
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
