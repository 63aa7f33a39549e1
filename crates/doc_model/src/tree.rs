//! The editable tree: node arena and structural operations
//!
//! The tree mirrors the host's live editable content. Every node lives in one
//! arena keyed by [`NodeId`]; parents own ordered child lists. Nodes can be
//! detached (kept in the arena with no parent, like a DOM fragment) and later
//! re-inserted, or removed for good.

use crate::{
    DocModelError, ImageData, InlineFormat, Marker, Node, NodeData, NodeId, NodeKind, NodeType,
    Result, SectionKind, NBSP,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// A text node and its character span inside a flattened paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSegment {
    pub node_id: NodeId,
    pub start: usize,
    pub end: usize,
}

impl TextSegment {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The complete editable tree of one page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTree {
    root: NodeId,
    header: NodeId,
    body: NodeId,
    footer: NodeId,
    nodes: HashMap<NodeId, NodeData>,
}

impl DocumentTree {
    /// A page with header, body and footer, each holding one empty paragraph
    pub fn new() -> Self {
        Self::with_text("", "", "")
    }

    /// A page whose three sections start with one paragraph of the given text
    pub fn with_text(header: &str, body: &str, footer: &str) -> Self {
        let mut nodes = HashMap::new();
        let root = NodeData::new(NodeKind::Document);
        let root_id = root.id();
        nodes.insert(root_id, root);

        let mut tree = Self {
            root: root_id,
            header: root_id,
            body: root_id,
            footer: root_id,
            nodes,
        };

        for (kind, text) in [
            (SectionKind::Header, header),
            (SectionKind::Body, body),
            (SectionKind::Footer, footer),
        ] {
            let section = tree.create(NodeKind::Section(kind));
            tree.attach_last(root_id, section);
            let para = tree.create(NodeKind::Paragraph);
            tree.attach_last(section, para);
            let content = if text.trim().is_empty() {
                tree.create(NodeKind::LineBreak)
            } else {
                tree.create_text(text)
            };
            tree.attach_last(para, content);
            match kind {
                SectionKind::Header => tree.header = section,
                SectionKind::Body => tree.body = section,
                SectionKind::Footer => tree.footer = section,
            }
        }
        tree
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn section(&self, kind: SectionKind) -> NodeId {
        match kind {
            SectionKind::Header => self.header,
            SectionKind::Body => self.body,
            SectionKind::Footer => self.footer,
        }
    }

    pub fn section_kind(&self, id: NodeId) -> Option<SectionKind> {
        match self.kind(id)? {
            NodeKind::Section(kind) => Some(*kind),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(&id)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes.get(&id).ok_or(DocModelError::NodeNotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.nodes.get_mut(&id).ok_or(DocModelError::NodeNotFound(id))
    }

    /// Number of nodes in the arena, detached ones included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(&id).map(|n| &n.kind)
    }

    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        self.nodes.get(&id).map(|n| n.node_type())
    }

    pub fn is_type(&self, id: NodeId, node_type: NodeType) -> bool {
        self.node_type(id) == Some(node_type)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.is_element())
    }

    pub fn has_marker(&self, id: NodeId, marker: Marker) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.has_marker(marker))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        self.child(parent, index + 1)
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        index.checked_sub(1).and_then(|i| self.child(parent, i))
    }

    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.next_sibling(id);
        while let Some(node) = current {
            if self.is_element(node) {
                return Some(node);
            }
            current = self.next_sibling(node);
        }
        None
    }

    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.previous_sibling(id);
        while let Some(node) = current {
            if self.is_element(node) {
                return Some(node);
            }
            current = self.previous_sibling(node);
        }
        None
    }

    /// The node itself followed by every ancestor up to its root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes.contains_key(&id).then_some(id), move |&n| {
            self.parent(n)
        })
    }

    /// Whether the node is reachable from the document root
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.ancestors(id).any(|n| n == self.root)
    }

    /// Inclusive containment: a node contains itself
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|n| n == ancestor)
    }

    /// Closest inclusive ancestor matching the predicate
    pub fn closest(&self, id: NodeId, pred: impl Fn(&NodeData) -> bool) -> Option<NodeId> {
        self.ancestors(id).find(|n| self.nodes.get(n).is_some_and(&pred))
    }

    pub fn closest_of_type(&self, id: NodeId, node_type: NodeType) -> Option<NodeId> {
        self.closest(id, |n| n.node_type() == node_type)
    }

    /// The element for a boundary container: text nodes resolve to their parent
    pub fn element_of(&self, id: NodeId) -> Option<NodeId> {
        let node = self.nodes.get(&id)?;
        if node.is_element() {
            Some(id)
        } else {
            node.parent
        }
    }

    pub fn boundary_len(&self, id: NodeId) -> usize {
        self.nodes.get(&id).map(|n| n.boundary_len()).unwrap_or(0)
    }

    /// Concatenated text of the subtree; tabs contribute their spaces
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(s) => out.push_str(s),
            NodeKind::Tab { width } => out.extend(std::iter::repeat(NBSP).take(*width)),
            _ => {
                for &child in &node.children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Pre-order descendants, excluding the node itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev());
        }
        out
    }

    /// Descendants of `scope` carrying `marker`
    pub fn find_marked(&self, scope: NodeId, marker: Marker) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.has_marker(n, marker))
            .collect()
    }

    /// Text nodes under `scope` in document order with their flattened offsets.
    /// The subtree of `skip` is left out.
    pub fn text_segments(&self, scope: NodeId, skip: Option<NodeId>) -> Vec<TextSegment> {
        let mut segments = Vec::new();
        let mut acc = 0;
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if Some(node) == skip {
                continue;
            }
            match self.kind(node) {
                Some(NodeKind::Text(s)) => {
                    let len = s.chars().count();
                    segments.push(TextSegment {
                        node_id: node,
                        start: acc,
                        end: acc + len,
                    });
                    acc += len;
                }
                Some(_) => stack.extend(self.children(node).iter().rev()),
                None => {}
            }
        }
        segments
    }

    /// Document order of two nodes sharing a root. An ancestor orders before
    /// its descendants.
    pub fn compare_order(&self, a: NodeId, b: NodeId) -> Option<Ordering> {
        if a == b {
            return Some(Ordering::Equal);
        }
        let mut path_a: Vec<NodeId> = self.ancestors(a).collect();
        let mut path_b: Vec<NodeId> = self.ancestors(b).collect();
        if path_a.is_empty() || path_a.last() != path_b.last() {
            return None;
        }
        path_a.reverse();
        path_b.reverse();

        let shared = path_a
            .iter()
            .zip(path_b.iter())
            .take_while(|(x, y)| x == y)
            .count();
        match (path_a.get(shared), path_b.get(shared)) {
            (None, _) => Some(Ordering::Less),
            (_, None) => Some(Ordering::Greater),
            (Some(&x), Some(&y)) => {
                let parent = path_a[shared - 1];
                let siblings = self.children(parent);
                let ix = siblings.iter().position(|&c| c == x)?;
                let iy = siblings.iter().position(|&c| c == y)?;
                Some(ix.cmp(&iy))
            }
        }
    }

    /// Paragraphs that are direct children of a section
    pub fn paragraphs(&self, section: NodeId) -> Vec<NodeId> {
        self.children(section)
            .iter()
            .copied()
            .filter(|&c| self.is_type(c, NodeType::Paragraph))
            .collect()
    }

    // ------------------------------------------------------------------
    // Creation (nodes start detached)
    // ------------------------------------------------------------------

    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        let node = NodeData::new(kind);
        let id = node.id();
        self.nodes.insert(id, node);
        id
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.create(NodeKind::Text(text.into()))
    }

    pub fn create_line_break(&mut self) -> NodeId {
        self.create(NodeKind::LineBreak)
    }

    pub fn create_tab(&mut self, width: usize) -> NodeId {
        self.create(NodeKind::Tab { width })
    }

    pub fn create_span(&mut self, format: InlineFormat) -> NodeId {
        self.create(NodeKind::Span(format))
    }

    pub fn create_image(&mut self, src: impl Into<String>) -> NodeId {
        self.create(NodeKind::Image(ImageData::new(src)))
    }

    /// A new paragraph holding one line-break placeholder
    pub fn create_paragraph(&mut self) -> NodeId {
        let para = self.create(NodeKind::Paragraph);
        let br = self.create_line_break();
        self.attach_last(para, br);
        para
    }

    /// Copy of the node without children or selection state
    pub fn shallow_clone(&mut self, id: NodeId) -> Result<NodeId> {
        let source = self.node(id)?;
        let mut copy = NodeData::new(source.kind.clone());
        copy.style = source.style.clone();
        copy.markers = source
            .markers
            .iter()
            .copied()
            .filter(|m| *m == Marker::ImageWrapper)
            .collect();
        let copy_id = copy.id();
        self.nodes.insert(copy_id, copy);
        Ok(copy_id)
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Unconditional append used while building fresh subtrees
    fn attach_last(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
    }

    /// Take the node out of its parent, keeping it (and its subtree) in the arena
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            if let Some(p) = self.nodes.get_mut(&parent) {
                p.children.retain(|&c| c != id);
            }
        }
        self.node_mut(id)?.parent = None;
        Ok(())
    }

    /// Detach the node and drop its whole subtree from the arena
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(DocModelError::InvalidOperation("cannot remove the document root".into()));
        }
        self.detach(id)?;
        let mut doomed = self.descendants(id);
        doomed.push(id);
        for node in doomed {
            self.nodes.remove(&node);
        }
        Ok(())
    }

    /// Drop detached subtrees (fragments nobody will re-insert)
    pub fn discard(&mut self, fragment: &[NodeId]) {
        for &id in fragment {
            if self.parent(id).is_none() && id != self.root {
                let _ = self.remove(id);
            }
        }
    }

    /// Insert `child` at `index` of `parent`. The child is detached first and
    /// `index` counts the parent's children after that detach.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        let parent_node = self.node(parent)?;
        if !parent_node.can_have_children() {
            return Err(DocModelError::TreeStructureError(format!(
                "{:?} cannot hold children",
                parent_node.node_type()
            )));
        }
        self.node(child)?;
        if child == self.root || self.contains(child, parent) {
            return Err(DocModelError::TreeStructureError(
                "cannot insert a node into its own subtree".into(),
            ));
        }
        self.detach(child)?;

        let p = self.node_mut(parent)?;
        let index = index.min(p.children.len());
        p.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.insert_child(parent, usize::MAX, child)
    }

    /// Insert `node` right before `reference` in the reference's parent
    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) -> Result<()> {
        if reference == node {
            return Ok(());
        }
        let parent = self
            .parent(reference)
            .ok_or(DocModelError::Detached(reference))?;
        self.detach(node)?;
        let index = self
            .index_in_parent(reference)
            .ok_or(DocModelError::Detached(reference))?;
        self.insert_child(parent, index, node)
    }

    /// Insert `node` right after `reference` in the reference's parent
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> Result<()> {
        if reference == node {
            return Ok(());
        }
        let parent = self
            .parent(reference)
            .ok_or(DocModelError::Detached(reference))?;
        self.detach(node)?;
        let index = self
            .index_in_parent(reference)
            .ok_or(DocModelError::Detached(reference))?;
        self.insert_child(parent, index + 1, node)
    }

    /// Replace every child of `parent` with `children`; old children are removed
    pub fn replace_children(&mut self, parent: NodeId, children: Vec<NodeId>) -> Result<()> {
        let old: Vec<NodeId> = self.children(parent).to_vec();
        for child in old {
            if !children.contains(&child) {
                self.remove(child)?;
            }
        }
        for child in children {
            self.append_child(parent, child)?;
        }
        Ok(())
    }

    /// Move the children of `node` into its parent in its place, then drop it
    pub fn unwrap_node(&mut self, node: NodeId) -> Result<()> {
        let children: Vec<NodeId> = self.children(node).to_vec();
        for child in children {
            self.insert_before(node, child)?;
        }
        self.remove(node)
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<()> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Text(s) => {
                *s = text.into();
                Ok(())
            }
            _ => Err(DocModelError::InvalidOperation("not a text node".into())),
        }
    }

    /// Split a text node at a character offset. The node keeps the left
    /// part; the returned node holds the right part and follows it.
    pub fn split_text(&mut self, id: NodeId, offset: usize) -> Result<NodeId> {
        let text = match &self.node(id)?.kind {
            NodeKind::Text(s) => s.clone(),
            _ => return Err(DocModelError::InvalidOperation("not a text node".into())),
        };
        let len = text.chars().count();
        if offset > len {
            return Err(DocModelError::InvalidPosition { node_id: id, offset });
        }
        let byte = text
            .char_indices()
            .nth(offset)
            .map(|(b, _)| b)
            .unwrap_or(text.len());
        let (left, right) = text.split_at(byte);
        let right_id = self.create_text(right);
        self.set_text(id, left)?;
        if self.parent(id).is_some() {
            self.insert_after(id, right_id)?;
        }
        Ok(right_id)
    }

    pub fn add_marker(&mut self, id: NodeId, marker: Marker) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.markers.insert(marker);
        }
    }

    pub fn remove_marker(&mut self, id: NodeId, marker: Marker) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.markers.remove(&marker);
        }
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}
