//! Live selection emulation and the stored "last known good" range
//!
//! [`HostSelection`] stands in for the host's live selection object: it holds
//! at most one range and rejects ranges whose containers are detached or whose
//! offsets are out of bounds, like the native API throws on them.
//! [`RangeStore`] keeps the range most recently captured from it.

use crate::{EditError, Result};
use doc_model::{DocumentTree, NodeId, Position, SelectionRange};

/// The live selection of the editable host
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostSelection {
    range: Option<SelectionRange>,
}

impl HostSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// First (and only) range of the selection
    pub fn range(&self) -> Option<SelectionRange> {
        self.range
    }

    pub fn is_collapsed(&self) -> bool {
        self.range.map_or(true, |r| r.is_collapsed())
    }

    pub fn remove_all_ranges(&mut self) {
        self.range = None;
    }

    /// Replace the selection with `range`
    pub fn add_range(&mut self, tree: &DocumentTree, range: SelectionRange) -> Result<()> {
        for pos in [range.start, range.end] {
            if !tree.is_attached(pos.node_id) {
                return Err(EditError::Selection(format!(
                    "{} is not attached to the document",
                    pos.node_id
                )));
            }
            if pos.offset > tree.boundary_len(pos.node_id) {
                return Err(EditError::Selection(format!(
                    "offset {} is out of bounds in {}",
                    pos.offset, pos.node_id
                )));
            }
        }
        self.range = Some(range);
        Ok(())
    }

    /// Collapse the selection to a caret at `pos`
    pub fn collapse(&mut self, tree: &DocumentTree, pos: Position) -> Result<()> {
        self.add_range(tree, SelectionRange::caret(pos))
    }

    /// Select exactly `node`
    pub fn select_node(&mut self, tree: &DocumentTree, node: NodeId) -> Result<()> {
        let range = tree
            .range_around(node)
            .ok_or_else(|| EditError::Selection(format!("{node} has no parent")))?;
        self.add_range(tree, range)
    }
}

/// Holder of the last saved selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeStore {
    stored: Option<SelectionRange>,
}

impl RangeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The range captured by the last successful save
    pub fn stored(&self) -> Option<SelectionRange> {
        self.stored
    }

    pub fn clear(&mut self) {
        self.stored = None;
    }

    /// Capture the live selection when both boundaries are attached and sit
    /// inside `root`. Leaves the stored range untouched otherwise.
    pub fn save(
        &mut self,
        tree: &DocumentTree,
        selection: &HostSelection,
        root: Option<NodeId>,
    ) -> bool {
        let Some(root) = root else {
            return false;
        };
        let Some(range) = selection.range() else {
            return false;
        };
        for container in range.containers() {
            if !tree.is_attached(container) {
                return false;
            }
            match tree.element_of(container) {
                Some(element) if tree.contains(root, element) => {}
                _ => return false,
            }
        }
        self.stored = Some(range);
        tracing::trace!(
            "Saved selection {}:{} - {}:{}",
            range.start.node_id,
            range.start.offset,
            range.end.node_id,
            range.end.offset
        );
        true
    }

    /// Apply `range` to the live selection. Fails without touching the live
    /// selection when the range is missing or names a detached container.
    pub fn restore(
        tree: &DocumentTree,
        selection: &mut HostSelection,
        range: Option<SelectionRange>,
    ) -> bool {
        let Some(range) = range else {
            return false;
        };
        if !range.containers().iter().all(|&c| tree.is_attached(c)) {
            return false;
        }
        if !tree.is_valid_position(range.start) || !tree.is_valid_position(range.end) {
            return false;
        }
        selection.remove_all_ranges();
        selection.add_range(tree, range).is_ok()
    }
}
