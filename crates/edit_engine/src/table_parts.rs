//! Cell, row and column selection sub-models
//!
//! Each model tracks one "active" item plus a multi-selection, and mirrors
//! both into tree markers so the host can paint them.

use crate::EditorSession;
use doc_model::{Alignment, DocumentTree, ElementStyle, Marker, NodeId, NodeType};
use std::collections::{BTreeSet, HashMap};

/// A column is addressed by its table and positional index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnKey {
    pub table: NodeId,
    pub index: usize,
}

impl ColumnKey {
    pub fn new(table: NodeId, index: usize) -> Self {
        Self { table, index }
    }
}

// ============================================================================
// Cells
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellModel {
    active: Option<NodeId>,
    selected: BTreeSet<NodeId>,
}

impl CellModel {
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    pub fn selected(&self) -> Vec<NodeId> {
        self.selected.iter().copied().collect()
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn is_engaged(&self) -> bool {
        self.active.is_some() || self.has_selection()
    }

    /// Cells formatting applies to: the multi-selection, else the active cell
    pub fn targets(&self) -> Vec<NodeId> {
        if self.has_selection() {
            self.selected()
        } else {
            self.active.into_iter().collect()
        }
    }

    pub(crate) fn set_active(&mut self, tree: &mut DocumentTree, cell: NodeId) {
        self.clear_active(tree);
        self.active = Some(cell);
        tree.add_marker(cell, Marker::CellActive);
    }

    pub(crate) fn clear_active(&mut self, tree: &mut DocumentTree) {
        if let Some(cell) = self.active.take() {
            tree.remove_marker(cell, Marker::CellActive);
        }
    }

    /// Flip `cell` in the multi-selection; returns whether it is now selected
    pub(crate) fn toggle(&mut self, tree: &mut DocumentTree, cell: NodeId) -> bool {
        if self.selected.remove(&cell) {
            tree.remove_marker(cell, Marker::CellSelected);
            false
        } else {
            self.selected.insert(cell);
            tree.add_marker(cell, Marker::CellSelected);
            true
        }
    }

    pub(crate) fn clear_selection(&mut self, tree: &mut DocumentTree) {
        for cell in std::mem::take(&mut self.selected) {
            tree.remove_marker(cell, Marker::CellSelected);
        }
    }

    pub(crate) fn clear(&mut self, tree: &mut DocumentTree) {
        self.clear_active(tree);
        self.clear_selection(tree);
    }
}

// ============================================================================
// Rows
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowModel {
    active: Option<NodeId>,
    selected: BTreeSet<NodeId>,
}

impl RowModel {
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    pub fn selected(&self) -> Vec<NodeId> {
        self.selected.iter().copied().collect()
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn is_engaged(&self) -> bool {
        self.active.is_some() || self.has_selection()
    }

    /// Selected rows, else the active row
    pub fn targets(&self) -> Vec<NodeId> {
        if self.has_selection() {
            self.selected()
        } else {
            self.active.into_iter().collect()
        }
    }

    /// Every cell of the target rows
    pub fn cells(&self, tree: &DocumentTree) -> Vec<NodeId> {
        self.targets()
            .into_iter()
            .flat_map(|row| tree.row_cells(row))
            .collect()
    }

    pub(crate) fn set_active(&mut self, tree: &mut DocumentTree, row: NodeId) {
        self.clear_active(tree);
        self.active = Some(row);
        tree.add_marker(row, Marker::RowActive);
    }

    pub(crate) fn clear_active(&mut self, tree: &mut DocumentTree) {
        if let Some(row) = self.active.take() {
            tree.remove_marker(row, Marker::RowActive);
        }
    }

    pub(crate) fn toggle(&mut self, tree: &mut DocumentTree, row: NodeId) -> bool {
        if self.selected.remove(&row) {
            tree.remove_marker(row, Marker::RowSelected);
            false
        } else {
            self.selected.insert(row);
            tree.add_marker(row, Marker::RowSelected);
            true
        }
    }

    /// Make `row` the only selected row
    pub(crate) fn select_only(&mut self, tree: &mut DocumentTree, row: NodeId) {
        self.clear_selection(tree);
        self.toggle(tree, row);
    }

    pub(crate) fn clear_selection(&mut self, tree: &mut DocumentTree) {
        for row in std::mem::take(&mut self.selected) {
            tree.remove_marker(row, Marker::RowSelected);
        }
    }

    pub(crate) fn clear(&mut self, tree: &mut DocumentTree) {
        self.clear_active(tree);
        self.clear_selection(tree);
    }
}

// ============================================================================
// Columns
// ============================================================================

/// Column state. Selections are kept per table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnModel {
    active: Option<ColumnKey>,
    selected: HashMap<NodeId, BTreeSet<usize>>,
}

impl ColumnModel {
    pub fn active(&self) -> Option<ColumnKey> {
        self.active
    }

    /// Selected column indices of `table`, ascending
    pub fn selected(&self, table: NodeId) -> Vec<usize> {
        self.selected
            .get(&table)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn has_selection(&self, table: NodeId) -> bool {
        self.selected.get(&table).is_some_and(|set| !set.is_empty())
    }

    /// Whether `table` has a selected or active column
    pub fn is_engaged(&self, table: NodeId) -> bool {
        self.has_selection(table) || self.active.is_some_and(|key| key.table == table)
    }

    /// Columns of `table` formatting applies to: its selection, else its
    /// active column
    pub fn targets(&self, table: NodeId) -> Vec<ColumnKey> {
        if self.has_selection(table) {
            self.selected(table)
                .into_iter()
                .map(|index| ColumnKey::new(table, index))
                .collect()
        } else {
            self.active
                .filter(|key| key.table == table)
                .into_iter()
                .collect()
        }
    }

    pub fn cells(&self, tree: &DocumentTree, table: NodeId) -> Vec<NodeId> {
        self.targets(table)
            .into_iter()
            .flat_map(|key| tree.column_cells(key.table, key.index))
            .collect()
    }

    pub(crate) fn set_active(&mut self, tree: &mut DocumentTree, key: ColumnKey) {
        self.clear_active(tree);
        self.active = Some(key);
        for cell in tree.column_cells(key.table, key.index) {
            tree.add_marker(cell, Marker::ColActive);
        }
    }

    pub(crate) fn clear_active(&mut self, tree: &mut DocumentTree) {
        if let Some(key) = self.active.take() {
            for cell in tree.column_cells(key.table, key.index) {
                tree.remove_marker(cell, Marker::ColActive);
            }
        }
    }

    pub(crate) fn toggle(&mut self, tree: &mut DocumentTree, key: ColumnKey) -> bool {
        let set = self.selected.entry(key.table).or_default();
        let now_selected = set.insert(key.index);
        if !now_selected {
            set.remove(&key.index);
        }
        for cell in tree.column_cells(key.table, key.index) {
            if now_selected {
                tree.add_marker(cell, Marker::ColSelected);
            } else {
                tree.remove_marker(cell, Marker::ColSelected);
            }
        }
        now_selected
    }

    pub(crate) fn select_only(&mut self, tree: &mut DocumentTree, key: ColumnKey) {
        self.clear_selection(tree, key.table);
        self.toggle(tree, key);
    }

    pub(crate) fn clear_selection(&mut self, tree: &mut DocumentTree, table: NodeId) {
        if self.selected.remove(&table).is_some() {
            tree.clear_marker_in(table, Marker::ColSelected);
        }
    }

    pub(crate) fn clear_all_selections(&mut self, tree: &mut DocumentTree) {
        let tables: Vec<NodeId> = self.selected.keys().copied().collect();
        for table in tables {
            self.clear_selection(tree, table);
        }
    }

    pub(crate) fn clear(&mut self, tree: &mut DocumentTree) {
        self.clear_active(tree);
        self.clear_all_selections(tree);
    }
}

// ============================================================================
// Styling helpers
// ============================================================================

/// Apply `edit` to every cell's style; false when there is nothing to style
pub(crate) fn style_cells(
    tree: &mut DocumentTree,
    cells: &[NodeId],
    edit: impl Fn(&mut ElementStyle),
) -> bool {
    let mut touched = false;
    for &cell in cells {
        if let Some(node) = tree.get_mut(cell) {
            edit(&mut node.style);
            touched = true;
        }
    }
    touched
}

pub(crate) fn align_cells(tree: &mut DocumentTree, cells: &[NodeId], align: Alignment) -> bool {
    style_cells(tree, cells, |style| style.text_align = Some(align))
}

/// Set a text override on cells; empty values are refused
pub(crate) fn set_cell_text_style(
    tree: &mut DocumentTree,
    cells: &[NodeId],
    value: &str,
    apply: impl Fn(&mut ElementStyle, String),
) -> bool {
    if value.trim().is_empty() {
        return false;
    }
    style_cells(tree, cells, |style| apply(style, value.to_string()))
}

// ============================================================================
// Session API
// ============================================================================

impl EditorSession {
    /// Make `row` the active row
    pub fn activate_row(&mut self, row: NodeId) -> bool {
        if !self.tree.is_type(row, NodeType::TableRow) {
            return false;
        }
        self.tables.rows.set_active(&mut self.tree, row);
        true
    }

    /// Add or remove `row` from the row selection; returns the new state
    pub fn toggle_row(&mut self, row: NodeId) -> bool {
        if !self.tree.is_type(row, NodeType::TableRow) {
            return false;
        }
        self.tables.rows.toggle(&mut self.tree, row)
    }

    pub fn activate_column(&mut self, table: NodeId, index: usize) -> bool {
        if self.tree.column_cells(table, index).is_empty() {
            return false;
        }
        self.tables
            .cols
            .set_active(&mut self.tree, ColumnKey::new(table, index));
        true
    }

    pub fn toggle_column(&mut self, table: NodeId, index: usize) -> bool {
        if self.tree.column_cells(table, index).is_empty() {
            return false;
        }
        self.tables
            .cols
            .toggle(&mut self.tree, ColumnKey::new(table, index))
    }

    /// Add or remove `cell` from the cell multi-selection
    pub fn toggle_cell(&mut self, cell: NodeId) -> bool {
        if !self.tree.is_type(cell, NodeType::TableCell) {
            return false;
        }
        self.tables.cells.toggle(&mut self.tree, cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::CellTemplate;

    fn grid() -> (DocumentTree, NodeId) {
        let mut tree = DocumentTree::new();
        let table = tree.create_table(3, 3, &CellTemplate::default()).unwrap();
        (tree, table)
    }

    #[test]
    fn cell_targets_prefer_selection() {
        let (mut tree, table) = grid();
        let cells = tree.table_cells(table);
        let mut model = CellModel::default();
        assert!(model.targets().is_empty());

        model.set_active(&mut tree, cells[0]);
        assert_eq!(model.targets(), vec![cells[0]]);
        assert!(tree.has_marker(cells[0], Marker::CellActive));

        assert!(model.toggle(&mut tree, cells[4]));
        assert_eq!(model.targets(), vec![cells[4]]);
        assert!(!model.toggle(&mut tree, cells[4]));
        assert!(!tree.has_marker(cells[4], Marker::CellSelected));
        assert_eq!(model.targets(), vec![cells[0]]);

        model.clear(&mut tree);
        assert!(!model.is_engaged());
        assert!(!tree.has_marker(cells[0], Marker::CellActive));
    }

    #[test]
    fn row_cells_flatten_selected_rows() {
        let (mut tree, table) = grid();
        let rows = tree.table_rows(table);
        let mut model = RowModel::default();
        model.toggle(&mut tree, rows[0]);
        model.toggle(&mut tree, rows[2]);
        assert_eq!(model.cells(&tree).len(), 6);

        model.select_only(&mut tree, rows[1]);
        assert_eq!(model.selected(), vec![rows[1]]);
        assert!(!tree.has_marker(rows[0], Marker::RowSelected));
        assert!(tree.has_marker(rows[1], Marker::RowSelected));
    }

    #[test]
    fn column_selection_is_per_table() {
        let (mut tree, table) = grid();
        let other = tree.create_table(2, 2, &CellTemplate::default()).unwrap();
        let mut model = ColumnModel::default();

        model.toggle(&mut tree, ColumnKey::new(table, 1));
        assert!(model.has_selection(table));
        assert!(!model.has_selection(other));
        for cell in tree.column_cells(table, 1) {
            assert!(tree.has_marker(cell, Marker::ColSelected));
        }

        model.set_active(&mut tree, ColumnKey::new(other, 0));
        assert_eq!(model.targets(other), vec![ColumnKey::new(other, 0)]);
        assert!(model.is_engaged(other));
        assert_eq!(model.cells(&tree, table).len(), 3);

        model.clear_selection(&mut tree, table);
        assert!(!model.is_engaged(table));
        assert!(model.targets(table).is_empty(), "another table's active column");
        assert!(model.cells(&tree, table).is_empty());

        model.clear_all_selections(&mut tree);
        assert!(tree.find_marked(table, Marker::ColSelected).is_empty());
        assert_eq!(model.active(), Some(ColumnKey::new(other, 0)));
    }

    #[test]
    fn text_style_refuses_empty_values() {
        let (mut tree, table) = grid();
        let cells = tree.table_cells(table);
        assert!(!set_cell_text_style(&mut tree, &cells, "  ", |s, v| s.color = Some(v)));
        assert!(set_cell_text_style(&mut tree, &cells[..1], "red", |s, v| s.color = Some(v)));
        assert_eq!(tree.get(cells[0]).unwrap().style.color.as_deref(), Some("red"));
        assert_eq!(tree.get(cells[1]).unwrap().style.color, None);
    }
}
