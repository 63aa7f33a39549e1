//! Boundary points and ranges over the tree

use crate::NodeId;
use serde::{Deserialize, Serialize};

/// A boundary point in the tree.
///
/// Inside a text node the offset counts characters; inside any other node it
/// is a child index, so `offset == 2` sits between the second and third child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub node_id: NodeId,
    pub offset: usize,
}

impl Position {
    pub fn new(node_id: NodeId, offset: usize) -> Self {
        Self { node_id, offset }
    }

    pub fn start_of(node_id: NodeId) -> Self {
        Self { node_id, offset: 0 }
    }
}

/// A pair of boundary points, start first in document order.
///
/// A collapsed range (start == end) is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start: Position,
    pub end: Position,
}

impl SelectionRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn caret(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn collapse_to_start(&self) -> Self {
        Self::caret(self.start)
    }

    pub fn collapse_to_end(&self) -> Self {
        Self::caret(self.end)
    }

    /// Both boundary containers, start first
    pub fn containers(&self) -> [NodeId; 2] {
        [self.start.node_id, self.end.node_id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_is_collapsed() {
        let node = NodeId::new();
        let caret = SelectionRange::caret(Position::new(node, 3));
        assert!(caret.is_collapsed());

        let range = SelectionRange::new(Position::new(node, 1), Position::new(node, 4));
        assert!(!range.is_collapsed());
        assert_eq!(range.collapse_to_start().start.offset, 1);
        assert_eq!(range.collapse_to_end().start.offset, 4);
    }
}
