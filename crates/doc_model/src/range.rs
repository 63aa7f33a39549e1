//! Range surgery: splitting boundaries, extracting and inserting content
//!
//! These follow DOM Range semantics closely enough for editing: extracting a
//! range splits partially covered nodes so the covered part can be lifted out
//! whole, and inserting at a boundary inside text splits the text node.
//! Splits never produce empty text nodes.

use crate::{
    paragraph::is_blank_text, DocModelError, DocumentTree, Node, NodeId, NodeKind, Position,
    Result, SelectionRange,
};

impl DocumentTree {
    /// Boundary point right before `node` in its parent
    pub fn position_before(&self, node: NodeId) -> Option<Position> {
        let parent = self.parent(node)?;
        Some(Position::new(parent, self.index_in_parent(node)?))
    }

    /// Boundary point right after `node` in its parent
    pub fn position_after(&self, node: NodeId) -> Option<Position> {
        let parent = self.parent(node)?;
        Some(Position::new(parent, self.index_in_parent(node)? + 1))
    }

    pub fn end_of(&self, node: NodeId) -> Position {
        Position::new(node, self.boundary_len(node))
    }

    /// Whether the position names an attached node and an offset within it
    pub fn is_valid_position(&self, pos: Position) -> bool {
        self.is_attached(pos.node_id) && pos.offset <= self.boundary_len(pos.node_id)
    }

    /// Range covering exactly `node`
    pub fn range_around(&self, node: NodeId) -> Option<SelectionRange> {
        Some(SelectionRange::new(
            self.position_before(node)?,
            self.position_after(node)?,
        ))
    }

    /// Deepest node containing both `a` and `b`
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let chain: Vec<NodeId> = self.ancestors(a).collect();
        self.ancestors(b).find(|n| chain.contains(n))
    }

    /// Split the tree at `pos` up to (not including) `ancestor` and return the
    /// child index in `ancestor` where the cut now falls.
    ///
    /// Everything before the returned index lies before `pos`, everything from
    /// it onward lies after.
    pub fn split_at(&mut self, pos: Position, ancestor: NodeId) -> Result<usize> {
        if !self.contains(ancestor, pos.node_id) {
            return Err(DocModelError::TreeStructureError(format!(
                "{} is not inside {}",
                pos.node_id, ancestor
            )));
        }

        let mut current = pos;
        loop {
            if current.node_id == ancestor {
                return Ok(current.offset.min(self.boundary_len(ancestor)));
            }
            let node = current.node_id;
            let parent = self.parent(node).ok_or(DocModelError::Detached(node))?;
            let index = self
                .index_in_parent(node)
                .ok_or(DocModelError::Detached(node))?;
            let len = self.boundary_len(node);

            let cut = if current.offset == 0 {
                index
            } else if current.offset >= len {
                index + 1
            } else if self.is_element(node) {
                let right = self.shallow_clone(node)?;
                let moved: Vec<NodeId> = self.children(node)[current.offset..].to_vec();
                for child in moved {
                    self.append_child(right, child)?;
                }
                self.insert_after(node, right)?;
                index + 1
            } else {
                self.split_text(node, current.offset)?;
                index + 1
            };
            current = Position::new(parent, cut);
        }
    }

    /// Lift the content of `range` out of the tree.
    ///
    /// Returns the detached fragment roots in document order and the collapsed
    /// position where the content used to be.
    pub fn extract_range(&mut self, range: &SelectionRange) -> Result<(Vec<NodeId>, Position)> {
        let SelectionRange { start, end } = *range;
        self.node(start.node_id)?;
        self.node(end.node_id)?;

        let same_text = match &self.node(start.node_id)?.kind {
            NodeKind::Text(text) if start.node_id == end.node_id => Some(text.clone()),
            _ => None,
        };
        if let Some(text) = same_text {
            let chars: Vec<char> = text.chars().collect();
            let s = start.offset.min(chars.len());
            let e = end.offset.min(chars.len()).max(s);
            if s == e {
                return Ok((Vec::new(), Position::new(start.node_id, s)));
            }
            let kept: String = chars[..s].iter().chain(&chars[e..]).collect();
            let taken: String = chars[s..e].iter().collect();
            self.set_text(start.node_id, kept)?;
            let fragment = self.create_text(taken);
            return Ok((vec![fragment], Position::new(start.node_id, s)));
        }

        let ancestor = self
            .common_ancestor(start.node_id, end.node_id)
            .ok_or_else(|| DocModelError::TreeStructureError("range spans two trees".into()))?;

        let end_index = self.split_at(end, ancestor)?;
        let count_before = self.children(ancestor).len();
        let start_index = self.split_at(start, ancestor)?;
        let end_index = end_index + (self.children(ancestor).len() - count_before);

        if end_index <= start_index {
            return Ok((Vec::new(), Position::new(ancestor, start_index)));
        }

        let fragment: Vec<NodeId> = self.children(ancestor)[start_index..end_index].to_vec();
        for &node in &fragment {
            self.detach(node)?;
        }
        Ok((fragment, Position::new(ancestor, start_index)))
    }

    /// Remove the content of `range`; returns the collapsed position
    pub fn delete_range(&mut self, range: &SelectionRange) -> Result<Position> {
        let (fragment, at) = self.extract_range(range)?;
        self.discard(&fragment);
        Ok(at)
    }

    /// Insert `node` at a boundary point, splitting a text container when the
    /// point falls inside it
    pub fn insert_at(&mut self, pos: Position, node: NodeId) -> Result<()> {
        let container = self.node(pos.node_id)?;
        if container.is_element() {
            if pos.offset > container.children().len() {
                return Err(DocModelError::InvalidPosition {
                    node_id: pos.node_id,
                    offset: pos.offset,
                });
            }
            let mut reference = self.child(pos.node_id, pos.offset);
            if reference == Some(node) {
                reference = self.next_sibling(node);
            }
            return match reference {
                Some(r) => self.insert_before(r, node),
                None => self.append_child(pos.node_id, node),
            };
        }

        let len = container.boundary_len();
        if pos.offset > len {
            return Err(DocModelError::InvalidPosition {
                node_id: pos.node_id,
                offset: pos.offset,
            });
        }
        if pos.offset == 0 {
            self.insert_before(pos.node_id, node)
        } else if pos.offset == len {
            self.insert_after(pos.node_id, node)
        } else {
            let right = self.split_text(pos.node_id, pos.offset)?;
            self.insert_before(right, node)
        }
    }

    /// Whether a fragment holds anything beyond whitespace: any element
    /// counts, text counts when it is not blank
    pub fn is_meaningful(&self, fragment: &[NodeId]) -> bool {
        fragment.iter().any(|&id| match self.kind(id) {
            Some(NodeKind::Text(s)) => !is_blank_text(s),
            Some(_) => true,
            None => false,
        })
    }
}
