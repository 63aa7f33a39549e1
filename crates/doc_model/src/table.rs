//! Table structure and grid lookups
//!
//! Tables are plain element subtrees: table, then rows, then cells. Column
//! membership is positional; a cell's column is its index in its row.

use crate::{Border, Display, DocumentTree, Margins, Marker, NodeId, NodeKind, NodeType, Result};

/// Construction defaults for new cells
#[derive(Debug, Clone, PartialEq)]
pub struct CellTemplate {
    pub border: Border,
    pub padding: (f32, f32),
    pub min_width: f32,
}

impl Default for CellTemplate {
    fn default() -> Self {
        Self {
            border: Border::new(1.0, "#777"),
            padding: (4.0, 8.0),
            min_width: 110.0,
        }
    }
}

impl DocumentTree {
    /// Build a detached `rows` x `cols` table; both are clamped to at least 1.
    /// Every cell starts with a line-break placeholder.
    pub fn create_table(&mut self, rows: usize, cols: usize, cell: &CellTemplate) -> Result<NodeId> {
        let table = self.create(NodeKind::Table);
        if let Some(node) = self.get_mut(table) {
            node.style.display = Display::InlineTable;
            node.style.margins = Margins::zero();
        }

        for _ in 0..rows.max(1) {
            let row = self.create(NodeKind::TableRow);
            self.append_child(table, row)?;
            for _ in 0..cols.max(1) {
                let td = self.create(NodeKind::TableCell);
                if let Some(node) = self.get_mut(td) {
                    node.style.border = Some(cell.border.clone());
                    node.style.padding = Some(cell.padding);
                    node.style.min_width = Some(cell.min_width);
                }
                self.append_child(row, td)?;
                self.ensure_placeholder(td)?;
            }
        }
        Ok(table)
    }

    pub fn table_rows(&self, table: NodeId) -> Vec<NodeId> {
        self.children(table)
            .iter()
            .copied()
            .filter(|&c| self.is_type(c, NodeType::TableRow))
            .collect()
    }

    pub fn row_cells(&self, row: NodeId) -> Vec<NodeId> {
        self.children(row)
            .iter()
            .copied()
            .filter(|&c| self.is_type(c, NodeType::TableCell))
            .collect()
    }

    /// Every cell of the table, row by row
    pub fn table_cells(&self, table: NodeId) -> Vec<NodeId> {
        self.table_rows(table)
            .into_iter()
            .flat_map(|row| self.row_cells(row))
            .collect()
    }

    pub fn cell_of(&self, node: NodeId) -> Option<NodeId> {
        self.closest_of_type(node, NodeType::TableCell)
    }

    pub fn row_of(&self, node: NodeId) -> Option<NodeId> {
        self.closest_of_type(node, NodeType::TableRow)
    }

    pub fn table_of(&self, node: NodeId) -> Option<NodeId> {
        self.closest_of_type(node, NodeType::Table)
    }

    /// Column index of a cell within its row
    pub fn column_index(&self, cell: NodeId) -> Option<usize> {
        let row = self.parent(cell)?;
        self.row_cells(row).iter().position(|&c| c == cell)
    }

    /// Cells at `column` in each row that is long enough
    pub fn column_cells(&self, table: NodeId, column: usize) -> Vec<NodeId> {
        self.table_rows(table)
            .into_iter()
            .filter_map(|row| self.row_cells(row).get(column).copied())
            .collect()
    }

    pub fn cell_at(&self, table: NodeId, row: usize, column: usize) -> Option<NodeId> {
        let row = *self.table_rows(table).get(row)?;
        self.row_cells(row).get(column).copied()
    }

    /// Drop `marker` from the table and everything inside it
    pub fn clear_marker_in(&mut self, scope: NodeId, marker: Marker) {
        self.remove_marker(scope, marker);
        for node in self.find_marked(scope, marker) {
            self.remove_marker(node, marker);
        }
    }
}
