//! Node kinds, marker classes and the arena node record

use crate::{ElementStyle, ImageData, NodeId, SectionKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Non-breaking space used to give tab markers their width
pub const NBSP: char = '\u{00A0}';

/// Zero-width space; never counts as content
pub const ZWSP: char = '\u{200B}';

/// Coarse classification of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Document,
    Section,
    Paragraph,
    Text,
    Span,
    LineBreak,
    Tab,
    Image,
    Table,
    TableRow,
    TableCell,
}

/// Inline wrapper applied around a run of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineFormat {
    Bold,
    Italic,
    Underline,
    Strike,
    Mark,
    Code,
    Small,
    Superscript,
    Subscript,
    /// Plain span carrying only style overrides
    Styled,
}

impl InlineFormat {
    /// Tag wrappers that carry meaning by themselves (everything but `Styled`)
    pub fn is_tag(&self) -> bool {
        !matches!(self, InlineFormat::Styled)
    }
}

/// Marker classes. They drive selection visuals in the host and let lookups
/// find the selected paragraph without a side table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Marker {
    ParagraphSelected,
    ImageSelected,
    TableSelected,
    CellActive,
    CellSelected,
    RowActive,
    RowSelected,
    ColActive,
    ColSelected,
    /// Wrapper element around an image, deleted as one unit
    ImageWrapper,
}

/// Kind-specific payload of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Document,
    Section(SectionKind),
    Paragraph,
    Text(String),
    Span(InlineFormat),
    LineBreak,
    /// Non-editable tab stop rendered as `width` non-breaking spaces
    Tab { width: usize },
    Image(ImageData),
    Table,
    TableRow,
    TableCell,
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Document => NodeType::Document,
            NodeKind::Section(_) => NodeType::Section,
            NodeKind::Paragraph => NodeType::Paragraph,
            NodeKind::Text(_) => NodeType::Text,
            NodeKind::Span(_) => NodeType::Span,
            NodeKind::LineBreak => NodeType::LineBreak,
            NodeKind::Tab { .. } => NodeType::Tab,
            NodeKind::Image(_) => NodeType::Image,
            NodeKind::Table => NodeType::Table,
            NodeKind::TableRow => NodeType::TableRow,
            NodeKind::TableCell => NodeType::TableCell,
        }
    }
}

/// Common read-only interface over tree nodes
pub trait Node: std::fmt::Debug {
    fn id(&self) -> NodeId;

    fn node_type(&self) -> NodeType;

    fn children(&self) -> &[NodeId];

    fn parent(&self) -> Option<NodeId>;

    /// Leaves (text, breaks, tabs, images) never hold children
    fn can_have_children(&self) -> bool;

    /// Own text of a text node
    fn text(&self) -> Option<&str> {
        None
    }
}

/// One node stored in the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub kind: NodeKind,
    pub style: ElementStyle,
    pub markers: BTreeSet<Marker>,
}

impl NodeData {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: NodeId::new(),
            parent: None,
            children: Vec::new(),
            kind,
            style: ElementStyle::default(),
            markers: BTreeSet::new(),
        }
    }

    pub fn is_element(&self) -> bool {
        !matches!(self.kind, NodeKind::Text(_))
    }

    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }

    /// Length in boundary units: characters for text, children otherwise
    pub fn boundary_len(&self) -> usize {
        match &self.kind {
            NodeKind::Text(s) => s.chars().count(),
            _ => self.children.len(),
        }
    }

    /// Images, tables and image wrappers are removed as one unit
    pub fn is_atomic_object(&self) -> bool {
        matches!(self.kind, NodeKind::Image(_) | NodeKind::Table)
            || self.has_marker(Marker::ImageWrapper)
    }
}

impl Node for NodeData {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    fn children(&self) -> &[NodeId] {
        &self.children
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn can_have_children(&self) -> bool {
        !matches!(
            self.kind,
            NodeKind::Text(_) | NodeKind::LineBreak | NodeKind::Tab { .. } | NodeKind::Image(_)
        )
    }

    fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(s) => Some(s),
            _ => None,
        }
    }
}
