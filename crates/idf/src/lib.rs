//! Intermediate Document Format (IDF)
//! This crate defines the in-memory representation of a report page's
//! rich-text content. The browser editor owns the live document; the IDF is
//! what gets persisted, walked for headings and serialized for export.

use serde::{Deserialize, Serialize};

mod markdown;

pub use markdown::from_markdown;

// --- Shared Types ---

/// A string type for the document.
pub type TextStr = String;

/// A common metadata structure for all block-level `IRNode`s.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TextStr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<TextStr>,
}

/// Editor chrome that lives inside the document tree while editing but never
/// belongs in printed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlKind {
    Button,
    FloatingMenu,
    DragHandle,
    ResizeHandle,
}

/// Inline formatting marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Strike,
}

// --- Main Node Enums ---

/// Represents a block-level element in the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum IRNode {
    /// A generic block container.
    Block {
        #[serde(default)]
        meta: NodeMetadata,
        children: Vec<IRNode>,
    },
    /// A paragraph, containing only inline content.
    Paragraph {
        #[serde(default)]
        meta: NodeMetadata,
        children: Vec<InlineNode>,
    },
    /// A section heading, with a level and inline content.
    Heading {
        #[serde(default)]
        meta: NodeMetadata,
        level: u8,
        children: Vec<InlineNode>,
    },
    /// A block image.
    Image {
        #[serde(default)]
        meta: NodeMetadata,
        src: TextStr,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<TextStr>,
    },
    /// An ordered or unordered list.
    List {
        #[serde(default)]
        meta: NodeMetadata,
        #[serde(default)]
        ordered: bool,
        children: Vec<IRNode>,
    },
    /// An item within a list.
    ListItem {
        #[serde(default)]
        meta: NodeMetadata,
        children: Vec<IRNode>,
    },
    /// A hard page break.
    PageBreak,
    /// Interactive-only editor element.
    Control { kind: ControlKind },
}

impl IRNode {
    pub fn paragraph(text: impl Into<TextStr>) -> Self {
        IRNode::Paragraph {
            meta: NodeMetadata::default(),
            children: vec![InlineNode::text(text)],
        }
    }

    pub fn heading(level: u8, text: impl Into<TextStr>) -> Self {
        IRNode::Heading {
            meta: NodeMetadata::default(),
            level: level.clamp(1, 6),
            children: vec![InlineNode::text(text)],
        }
    }

    /// Returns a reference to the metadata if the node type supports it.
    pub fn meta(&self) -> Option<&NodeMetadata> {
        match self {
            IRNode::Block { meta, .. } => Some(meta),
            IRNode::Paragraph { meta, .. } => Some(meta),
            IRNode::Heading { meta, .. } => Some(meta),
            IRNode::Image { meta, .. } => Some(meta),
            IRNode::List { meta, .. } => Some(meta),
            IRNode::ListItem { meta, .. } => Some(meta),
            IRNode::PageBreak | IRNode::Control { .. } => None,
        }
    }

    /// Returns a string identifier for the node type.
    pub fn kind(&self) -> &'static str {
        match self {
            IRNode::Block { .. } => "block",
            IRNode::Paragraph { .. } => "paragraph",
            IRNode::Heading { .. } => "heading",
            IRNode::Image { .. } => "image",
            IRNode::List { .. } => "list",
            IRNode::ListItem { .. } => "list-item",
            IRNode::PageBreak => "page-break",
            IRNode::Control { .. } => "control",
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, IRNode::Control { .. })
    }

    /// Child blocks of container nodes; empty for leaves.
    pub fn block_children(&self) -> &[IRNode] {
        match self {
            IRNode::Block { children, .. }
            | IRNode::List { children, .. }
            | IRNode::ListItem { children, .. } => children,
            _ => &[],
        }
    }
}

/// Represents an inline-level element within a `Paragraph` or `Heading`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InlineNode {
    /// A run of plain text.
    Text { text: TextStr },
    /// A run carrying formatting marks.
    Styled {
        marks: Vec<Mark>,
        children: Vec<InlineNode>,
    },
    /// A hyperlink `<a>`.
    Hyperlink {
        href: TextStr,
        children: Vec<InlineNode>,
    },
    /// An editor-side highlight (e.g. a phrase marked for AI rewrite).
    Highlight { children: Vec<InlineNode> },
    /// A soft line break.
    LineBreak,
}

impl InlineNode {
    pub fn text(text: impl Into<TextStr>) -> Self {
        InlineNode::Text { text: text.into() }
    }
}

/// Concatenates the text content of a run of inline nodes.
pub fn inline_text(children: &[InlineNode]) -> String {
    let mut out = String::new();
    push_inline_text(children, &mut out);
    out
}

fn push_inline_text(children: &[InlineNode], out: &mut String) {
    for child in children {
        match child {
            InlineNode::Text { text } => out.push_str(text),
            InlineNode::Styled { children, .. }
            | InlineNode::Hyperlink { children, .. }
            | InlineNode::Highlight { children } => push_inline_text(children, out),
            InlineNode::LineBreak => out.push('\n'),
        }
    }
}

// --- Document ---

/// Whether a flattened text segment came from a heading or from body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Heading { level: u8 },
    Body,
}

/// One text-bearing block of the document, with its position in the
/// flattened plain text. Offsets count Unicode scalar values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub kind: SegmentKind,
    pub text: String,
    pub start: usize,
}

impl TextSegment {
    pub fn end(&self) -> usize {
        self.start + self.text.chars().count()
    }

    pub fn is_heading(&self) -> bool {
        matches!(self.kind, SegmentKind::Heading { .. })
    }
}

/// The rich-text content of one report page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText {
    pub nodes: Vec<IRNode>,
}

impl RichText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<IRNode>) -> Self {
        Self { nodes }
    }

    pub fn with_heading(mut self, level: u8, text: impl Into<TextStr>) -> Self {
        self.nodes.push(IRNode::heading(level, text));
        self
    }

    pub fn with_paragraph(mut self, text: impl Into<TextStr>) -> Self {
        self.nodes.push(IRNode::paragraph(text));
        self
    }

    pub fn push(&mut self, node: IRNode) {
        self.nodes.push(node);
    }

    pub fn is_empty(&self) -> bool {
        self.segments().iter().all(|s| s.text.trim().is_empty())
            && !self.nodes.iter().any(contains_image)
    }

    /// Flattens every text-bearing block, in document order.
    ///
    /// Consecutive segments are separated by exactly one newline in the
    /// flattened text, so `segments()[i + 1].start == segments()[i].end() + 1`.
    pub fn segments(&self) -> Vec<TextSegment> {
        let mut segments = Vec::new();
        let mut offset = 0usize;
        collect_segments(&self.nodes, &mut segments, &mut offset);
        segments
    }

    /// The flattened plain text; caret offsets are expressed against this.
    pub fn plain_text(&self) -> String {
        self.segments()
            .into_iter()
            .map(|s| s.text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Returns a copy with all interactive-only nodes removed.
    pub fn without_interactive(&self) -> RichText {
        RichText {
            nodes: strip_interactive(&self.nodes),
        }
    }

    /// Source URLs of every block image, in document order.
    pub fn image_sources(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_images(&self.nodes, &mut out);
        out
    }
}

fn collect_segments(nodes: &[IRNode], out: &mut Vec<TextSegment>, offset: &mut usize) {
    for node in nodes {
        let (kind, text) = match node {
            IRNode::Heading {
                level, children, ..
            } => (SegmentKind::Heading { level: *level }, inline_text(children)),
            IRNode::Paragraph { children, .. } => (SegmentKind::Body, inline_text(children)),
            other => {
                collect_segments(other.block_children(), out, offset);
                continue;
            }
        };
        if !out.is_empty() {
            *offset += 1;
        }
        let segment = TextSegment {
            kind,
            text,
            start: *offset,
        };
        *offset = segment.end();
        out.push(segment);
    }
}

fn strip_interactive(nodes: &[IRNode]) -> Vec<IRNode> {
    nodes
        .iter()
        .filter(|n| !n.is_interactive())
        .map(|n| match n {
            IRNode::Block { meta, children } => IRNode::Block {
                meta: meta.clone(),
                children: strip_interactive(children),
            },
            IRNode::List {
                meta,
                ordered,
                children,
            } => IRNode::List {
                meta: meta.clone(),
                ordered: *ordered,
                children: strip_interactive(children),
            },
            IRNode::ListItem { meta, children } => IRNode::ListItem {
                meta: meta.clone(),
                children: strip_interactive(children),
            },
            other => other.clone(),
        })
        .collect()
}

fn collect_images<'a>(nodes: &'a [IRNode], out: &mut Vec<&'a str>) {
    for node in nodes {
        match node {
            IRNode::Image { src, .. } => out.push(src),
            other => collect_images(other.block_children(), out),
        }
    }
}

fn contains_image(node: &IRNode) -> bool {
    match node {
        IRNode::Image { .. } => true,
        other => other.block_children().iter().any(contains_image),
    }
}
