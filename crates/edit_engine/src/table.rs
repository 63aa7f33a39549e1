//! Table focus, the Ctrl-click focus cycle, insertion and table-wide
//! border/radius application

use crate::table_parts::{style_cells, CellModel, ColumnKey, ColumnModel, RowModel};
use crate::{EditorSession, PointerEvent};
use doc_model::{Border, CornerRadii, DocumentTree, Marker, NodeId, Position};

/// Where repeated Ctrl-clicks inside the focused table are in their cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusCycle {
    /// Whole table
    #[default]
    Table,
    /// The clicked cell's row
    Row,
    /// The clicked cell's column
    Column,
}

/// Focused table plus its cell, row and column sub-models
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSelectionModel {
    selected_table: Option<NodeId>,
    cycle: FocusCycle,
    pub(crate) cells: CellModel,
    pub(crate) rows: RowModel,
    pub(crate) cols: ColumnModel,
}

impl TableSelectionModel {
    pub fn selected_table(&self) -> Option<NodeId> {
        self.selected_table
    }

    pub fn cycle(&self) -> FocusCycle {
        self.cycle
    }

    pub fn cells(&self) -> &CellModel {
        &self.cells
    }

    pub fn rows(&self) -> &RowModel {
        &self.rows
    }

    pub fn cols(&self) -> &ColumnModel {
        &self.cols
    }

    fn focus_table(&mut self, tree: &mut DocumentTree, table: NodeId) {
        self.clear_table(tree);
        self.selected_table = Some(table);
        tree.add_marker(table, Marker::TableSelected);
    }

    fn clear_table(&mut self, tree: &mut DocumentTree) {
        if let Some(table) = self.selected_table.take() {
            tree.remove_marker(table, Marker::TableSelected);
        }
    }

    fn clear_row_col(&mut self, tree: &mut DocumentTree) {
        self.rows.clear(tree);
        self.cols.clear(tree);
    }

    pub(crate) fn clear_all(&mut self, tree: &mut DocumentTree) {
        self.cells.clear(tree);
        self.clear_row_col(tree);
        self.clear_table(tree);
        self.cycle = FocusCycle::Table;
    }

    fn select_row_of(&mut self, tree: &mut DocumentTree, cell: NodeId) {
        self.clear_row_col(tree);
        if let Some(row) = tree.row_of(cell) {
            self.rows.select_only(tree, row);
        }
    }

    fn select_column_of(&mut self, tree: &mut DocumentTree, cell: NodeId) {
        self.clear_row_col(tree);
        if let (Some(table), Some(index)) = (tree.table_of(cell), tree.column_index(cell)) {
            self.cols.select_only(tree, ColumnKey::new(table, index));
        }
    }

    /// Table the column sub-model should look at: the one holding the active
    /// cell or row, else the focused table, else the active column's
    pub(crate) fn column_scope(&self, tree: &DocumentTree) -> Option<NodeId> {
        self.cells
            .active()
            .and_then(|cell| tree.table_of(cell))
            .or_else(|| self.rows.active().and_then(|row| tree.table_of(row)))
            .or(self.selected_table)
            .or_else(|| self.cols.active().map(|key| key.table))
    }
}

impl EditorSession {
    pub fn table_selection(&self) -> &TableSelectionModel {
        &self.tables
    }

    pub fn focused_table(&self) -> Option<NodeId> {
        self.tables.selected_table()
    }

    pub fn active_cell(&self) -> Option<NodeId> {
        self.tables.cells.active()
    }

    /// Drop table focus and every cell, row and column selection
    pub fn clear_table_selection(&mut self) {
        self.tables.clear_all(&mut self.tree);
    }

    /// Pointer handling for tables. Returns whether the default action must be
    /// prevented.
    pub(crate) fn table_pointer_down(&mut self, event: &PointerEvent) -> bool {
        let Some(cell) = self.tree.cell_of(event.target) else {
            self.tables.clear_all(&mut self.tree);
            return false;
        };
        let Some(table) = self.tree.table_of(cell) else {
            return false;
        };

        if event.modifiers.ctrl {
            if self.tables.selected_table != Some(table) {
                self.tables.focus_table(&mut self.tree, table);
                self.tables.clear_row_col(&mut self.tree);
                self.tables.cells.clear(&mut self.tree);
                self.tables.cycle = FocusCycle::Table;
                tracing::debug!("Focused table {}", table);
                return true;
            }

            self.tables.cycle = match self.tables.cycle {
                FocusCycle::Table => {
                    self.tables.select_row_of(&mut self.tree, cell);
                    FocusCycle::Row
                }
                FocusCycle::Row => {
                    self.tables.select_column_of(&mut self.tree, cell);
                    FocusCycle::Column
                }
                FocusCycle::Column => {
                    self.tables.clear_row_col(&mut self.tree);
                    FocusCycle::Table
                }
            };
            self.tables.cells.clear(&mut self.tree);
            tracing::debug!("Table {} focus cycle: {:?}", table, self.tables.cycle);
            return true;
        }

        if event.modifiers.alt {
            if self.tables.selected_table != Some(table) {
                self.tables.focus_table(&mut self.tree, table);
            }
            self.tables.cells.set_active(&mut self.tree, cell);
            self.tables.cells.toggle(&mut self.tree, cell);
            return true;
        }

        self.tables.focus_table(&mut self.tree, table);
        self.tables.clear_row_col(&mut self.tree);
        self.tables.cycle = FocusCycle::Table;
        self.tables.cells.clear_selection(&mut self.tree);
        self.tables.cells.set_active(&mut self.tree, cell);
        self.place_caret_in_cell(cell);
        false
    }

    fn place_caret_in_cell(&mut self, cell: NodeId) -> bool {
        if self.tree.ensure_placeholder(cell).is_err() {
            return false;
        }
        self.place_caret(Position::start_of(cell))
    }

    /// Insert a `rows` x `cols` table at the stored selection. Refused when
    /// the caret is inside a cell; nested tables are not supported.
    pub fn insert_table(&mut self, rows: usize, cols: usize) -> Option<NodeId> {
        let range = self.restored_range()?;
        let anchor = self.anchor_element(&range)?;
        if self.tree.cell_of(anchor).is_some() {
            return None;
        }

        let at = if range.is_collapsed() {
            range.start
        } else {
            self.tree.delete_range(&range).ok()?
        };
        let template = self.settings.table.cell_template();
        let table = self.tree.create_table(rows, cols, &template).ok()?;
        if self.tree.insert_at(at, table).is_err() {
            self.tree.discard(&[table]);
            return None;
        }

        self.tables.clear_all(&mut self.tree);
        self.tables.focus_table(&mut self.tree, table);
        match self.tree.cell_at(table, 0, 0) {
            Some(first) => {
                self.tables.cells.set_active(&mut self.tree, first);
                self.place_caret_in_cell(first);
            }
            None => {
                self.place_caret_after(table);
            }
        }
        tracing::debug!("Inserted {}x{} table {}", rows.max(1), cols.max(1), table);
        Some(table)
    }

    /// Insert a table with the configured default size
    pub fn insert_default_table(&mut self) -> Option<NodeId> {
        let (rows, cols) = (self.settings.table.default_rows, self.settings.table.default_cols);
        self.insert_table(rows, cols)
    }

    // ========================================================================
    // Border and radius, by priority: rows, then column, then cells, then
    // the table itself
    // ========================================================================

    pub(crate) fn apply_table_border(&mut self, width: f32, color: &str) -> bool {
        let Some(table) = self.tables.selected_table else {
            return false;
        };
        let border = Border::new(width, color);
        let cells = self.table_part_cells(table);
        if !cells.is_empty() {
            return style_cells(&mut self.tree, &cells, |style| {
                style.border = Some(border.clone())
            });
        }
        let Some(node) = self.tree.get_mut(table) else {
            return false;
        };
        node.style.border = Some(border);
        true
    }

    pub(crate) fn apply_table_border_radius(&mut self, radius: f32) -> bool {
        let Some(table) = self.tables.selected_table else {
            return false;
        };
        let all = self.tree.table_cells(table);

        if self.tables.rows.is_engaged() {
            style_cells(&mut self.tree, &all, |style| style.radius = CornerRadii::default());
            for row in self.tables.rows.targets() {
                let cells = self.tree.row_cells(row);
                let (Some(&first), Some(&last)) = (cells.first(), cells.last()) else {
                    continue;
                };
                self.set_corners(first, |r| {
                    r.top_left = radius;
                    r.bottom_left = radius;
                });
                self.set_corners(last, |r| {
                    r.top_right = radius;
                    r.bottom_right = radius;
                });
            }
            return true;
        }

        let columns = self.tables.cols.targets(table);
        if !columns.is_empty() {
            style_cells(&mut self.tree, &all, |style| style.radius = CornerRadii::default());
            for key in columns {
                let cells = self.tree.column_cells(key.table, key.index);
                let (Some(&top), Some(&bottom)) = (cells.first(), cells.last()) else {
                    continue;
                };
                self.set_corners(top, |r| {
                    r.top_left = radius;
                    r.top_right = radius;
                });
                self.set_corners(bottom, |r| {
                    r.bottom_left = radius;
                    r.bottom_right = radius;
                });
            }
            return true;
        }

        let cells = self.tables.cells.targets();
        if !cells.is_empty() {
            return style_cells(&mut self.tree, &cells, |style| {
                style.radius = CornerRadii::uniform(radius)
            });
        }

        style_cells(&mut self.tree, &all, |style| style.radius = CornerRadii::default());
        if let Some(node) = self.tree.get_mut(table) {
            node.style.radius = CornerRadii::uniform(radius);
            node.style.clip = radius > 0.0;
        }
        let rows = self.tree.table_rows(table);
        let (Some(&top_row), Some(&bottom_row)) = (rows.first(), rows.last()) else {
            return true;
        };
        let top = self.tree.row_cells(top_row);
        let bottom = self.tree.row_cells(bottom_row);
        if let Some(&cell) = top.first() {
            self.set_corners(cell, |r| r.top_left = radius);
        }
        if let Some(&cell) = top.last() {
            self.set_corners(cell, |r| r.top_right = radius);
        }
        if let Some(&cell) = bottom.first() {
            self.set_corners(cell, |r| r.bottom_left = radius);
        }
        if let Some(&cell) = bottom.last() {
            self.set_corners(cell, |r| r.bottom_right = radius);
        }
        true
    }

    /// Cells addressed by the highest-priority engaged sub-model
    fn table_part_cells(&self, table: NodeId) -> Vec<NodeId> {
        if self.tables.rows.is_engaged() {
            return self.tables.rows.cells(&self.tree);
        }
        let columns = self.tables.cols.cells(&self.tree, table);
        if !columns.is_empty() {
            return columns;
        }
        self.tables.cells.targets()
    }

    fn set_corners(&mut self, cell: NodeId, edit: impl FnOnce(&mut CornerRadii)) {
        if let Some(node) = self.tree.get_mut(cell) {
            edit(&mut node.style.radius);
        }
    }
}
