//! Edit target resolution and verb dispatch
//!
//! Toolbar verbs never inspect focus state themselves. They resolve the
//! current [`Target`] once, in a fixed priority order (cell, row, column,
//! image, table, text, paragraph), and hand the call to that target's
//! [`FormatTarget`] implementation.

use crate::table_parts::{align_cells, set_cell_text_style, ColumnKey};
use crate::EditorSession;
use doc_model::{Alignment, ElementStyle, NodeId, SelectionRange};

/// Kind of the resolved target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Cell,
    Row,
    Column,
    Image,
    Table,
    Text,
    Paragraph,
}

/// Selected cells, or the active cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellTarget {
    pub table: Option<NodeId>,
    pub cells: Vec<NodeId>,
}

/// Selected rows, or the active row
#[derive(Debug, Clone, PartialEq)]
pub struct RowTarget {
    pub table: Option<NodeId>,
    pub rows: Vec<NodeId>,
}

/// Selected columns of one table, or the active column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnTarget {
    pub table: NodeId,
    pub columns: Vec<ColumnKey>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageTarget(pub NodeId);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableTarget(pub NodeId);

/// A non-collapsed text selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextTarget(pub SelectionRange);

/// Fallback: the focused paragraph, else the one holding the caret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphTarget;

/// What a formatting verb applies to
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Cell(CellTarget),
    Row(RowTarget),
    Column(ColumnTarget),
    Image(ImageTarget),
    Table(TableTarget),
    Text(TextTarget),
    Paragraph(ParagraphTarget),
}

/// Verbs every target kind answers. Each returns whether anything changed.
pub trait FormatTarget {
    fn increase(&self, session: &mut EditorSession) -> bool;
    fn decrease(&self, session: &mut EditorSession) -> bool;
    fn move_left(&self, session: &mut EditorSession) -> bool;
    fn move_right(&self, session: &mut EditorSession) -> bool;
    fn move_up(&self, session: &mut EditorSession) -> bool;
    fn move_down(&self, session: &mut EditorSession) -> bool;
    fn apply_border(&self, session: &mut EditorSession, width: f32, color: &str) -> bool;
    fn apply_border_radius(&self, session: &mut EditorSession, radius: f32) -> bool;
    fn align(&self, session: &mut EditorSession, align: Alignment) -> bool;
    fn set_color(&self, session: &mut EditorSession, color: &str) -> bool;
    fn set_font_family(&self, session: &mut EditorSession, family: &str) -> bool;
    fn set_font_size(&self, session: &mut EditorSession, size: &str) -> bool;
}

impl Target {
    pub fn kind(&self) -> TargetKind {
        match self {
            Target::Cell(_) => TargetKind::Cell,
            Target::Row(_) => TargetKind::Row,
            Target::Column(_) => TargetKind::Column,
            Target::Image(_) => TargetKind::Image,
            Target::Table(_) => TargetKind::Table,
            Target::Text(_) => TargetKind::Text,
            Target::Paragraph(_) => TargetKind::Paragraph,
        }
    }

    fn handle(&self) -> &dyn FormatTarget {
        match self {
            Target::Cell(t) => t,
            Target::Row(t) => t,
            Target::Column(t) => t,
            Target::Image(t) => t,
            Target::Table(t) => t,
            Target::Text(t) => t,
            Target::Paragraph(t) => t,
        }
    }
}

impl FormatTarget for Target {
    fn increase(&self, session: &mut EditorSession) -> bool {
        self.handle().increase(session)
    }

    fn decrease(&self, session: &mut EditorSession) -> bool {
        self.handle().decrease(session)
    }

    fn move_left(&self, session: &mut EditorSession) -> bool {
        self.handle().move_left(session)
    }

    fn move_right(&self, session: &mut EditorSession) -> bool {
        self.handle().move_right(session)
    }

    fn move_up(&self, session: &mut EditorSession) -> bool {
        self.handle().move_up(session)
    }

    fn move_down(&self, session: &mut EditorSession) -> bool {
        self.handle().move_down(session)
    }

    fn apply_border(&self, session: &mut EditorSession, width: f32, color: &str) -> bool {
        self.handle().apply_border(session, width, color)
    }

    fn apply_border_radius(&self, session: &mut EditorSession, radius: f32) -> bool {
        self.handle().apply_border_radius(session, radius)
    }

    fn align(&self, session: &mut EditorSession, align: Alignment) -> bool {
        self.handle().align(session, align)
    }

    fn set_color(&self, session: &mut EditorSession, color: &str) -> bool {
        self.handle().set_color(session, color)
    }

    fn set_font_family(&self, session: &mut EditorSession, family: &str) -> bool {
        self.handle().set_font_family(session, family)
    }

    fn set_font_size(&self, session: &mut EditorSession, size: &str) -> bool {
        self.handle().set_font_size(session, size)
    }
}

// ============================================================================
// Table parts: size and motion act on the owning table, border and radius go
// through the table's own priority rules, the rest styles the cells
// ============================================================================

/// Resize or move the table owning a table part
fn with_table(session: &mut EditorSession, table: Option<NodeId>, verb: Verb) -> bool {
    match table {
        Some(table) => verb.apply_to_object(session, table),
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Grow,
    Shrink,
    Left,
    Right,
    Up,
    Down,
}

impl Verb {
    fn apply_to_object(self, session: &mut EditorSession, node: NodeId) -> bool {
        match self {
            Verb::Grow => session.grow_object(node),
            Verb::Shrink => session.shrink_object(node),
            Verb::Left => session.move_word_left(node),
            Verb::Right => session.move_word_right(node),
            Verb::Up => session.move_object_up(node),
            Verb::Down => session.move_object_down(node),
        }
    }
}

fn style_text(
    session: &mut EditorSession,
    cells: &[NodeId],
    value: &str,
    apply: impl Fn(&mut ElementStyle, String),
) -> bool {
    set_cell_text_style(&mut session.tree, cells, value, apply)
}

macro_rules! table_part_target {
    ($target:ty, $cells:expr) => {
        impl FormatTarget for $target {
            fn increase(&self, session: &mut EditorSession) -> bool {
                with_table(session, self.table(), Verb::Grow)
            }

            fn decrease(&self, session: &mut EditorSession) -> bool {
                with_table(session, self.table(), Verb::Shrink)
            }

            fn move_left(&self, session: &mut EditorSession) -> bool {
                with_table(session, self.table(), Verb::Left)
            }

            fn move_right(&self, session: &mut EditorSession) -> bool {
                with_table(session, self.table(), Verb::Right)
            }

            fn move_up(&self, session: &mut EditorSession) -> bool {
                with_table(session, self.table(), Verb::Up)
            }

            fn move_down(&self, session: &mut EditorSession) -> bool {
                with_table(session, self.table(), Verb::Down)
            }

            fn apply_border(&self, session: &mut EditorSession, width: f32, color: &str) -> bool {
                session.apply_table_border(width, color)
            }

            fn apply_border_radius(&self, session: &mut EditorSession, radius: f32) -> bool {
                session.apply_table_border_radius(radius)
            }

            fn align(&self, session: &mut EditorSession, align: Alignment) -> bool {
                let cells = $cells(self, &*session);
                align_cells(&mut session.tree, &cells, align)
            }

            fn set_color(&self, session: &mut EditorSession, color: &str) -> bool {
                let cells = $cells(self, &*session);
                style_text(session, &cells, color, |s, v| s.color = Some(v))
            }

            fn set_font_family(&self, session: &mut EditorSession, family: &str) -> bool {
                let cells = $cells(self, &*session);
                style_text(session, &cells, family, |s, v| s.font_family = Some(v))
            }

            fn set_font_size(&self, session: &mut EditorSession, size: &str) -> bool {
                let cells = $cells(self, &*session);
                style_text(session, &cells, size, |s, v| s.font_size = Some(v))
            }
        }
    };
}

impl CellTarget {
    fn table(&self) -> Option<NodeId> {
        self.table
    }

    fn cells(&self, _session: &EditorSession) -> Vec<NodeId> {
        self.cells.clone()
    }
}

impl RowTarget {
    fn table(&self) -> Option<NodeId> {
        self.table
    }

    fn cells(&self, session: &EditorSession) -> Vec<NodeId> {
        self.rows
            .iter()
            .flat_map(|&row| session.tree.row_cells(row))
            .collect()
    }
}

impl ColumnTarget {
    fn table(&self) -> Option<NodeId> {
        Some(self.table)
    }

    fn cells(&self, session: &EditorSession) -> Vec<NodeId> {
        self.columns
            .iter()
            .flat_map(|key| session.tree.column_cells(key.table, key.index))
            .collect()
    }
}

impl TableTarget {
    fn table(&self) -> Option<NodeId> {
        Some(self.0)
    }

    fn cells(&self, session: &EditorSession) -> Vec<NodeId> {
        session.tree.table_cells(self.0)
    }
}

table_part_target!(CellTarget, CellTarget::cells);
table_part_target!(RowTarget, RowTarget::cells);
table_part_target!(ColumnTarget, ColumnTarget::cells);

impl FormatTarget for TableTarget {
    fn increase(&self, session: &mut EditorSession) -> bool {
        with_table(session, self.table(), Verb::Grow)
    }

    fn decrease(&self, session: &mut EditorSession) -> bool {
        with_table(session, self.table(), Verb::Shrink)
    }

    fn move_left(&self, session: &mut EditorSession) -> bool {
        with_table(session, self.table(), Verb::Left)
    }

    fn move_right(&self, session: &mut EditorSession) -> bool {
        with_table(session, self.table(), Verb::Right)
    }

    fn move_up(&self, session: &mut EditorSession) -> bool {
        with_table(session, self.table(), Verb::Up)
    }

    fn move_down(&self, session: &mut EditorSession) -> bool {
        with_table(session, self.table(), Verb::Down)
    }

    fn apply_border(&self, session: &mut EditorSession, width: f32, color: &str) -> bool {
        session.apply_table_border(width, color)
    }

    fn apply_border_radius(&self, session: &mut EditorSession, radius: f32) -> bool {
        session.apply_table_border_radius(radius)
    }

    fn align(&self, session: &mut EditorSession, align: Alignment) -> bool {
        session.wrap_align(self.0, align)
    }

    fn set_color(&self, session: &mut EditorSession, color: &str) -> bool {
        let cells = self.cells(session);
        style_text(session, &cells, color, |s, v| s.color = Some(v))
    }

    fn set_font_family(&self, session: &mut EditorSession, family: &str) -> bool {
        let cells = self.cells(session);
        style_text(session, &cells, family, |s, v| s.font_family = Some(v))
    }

    fn set_font_size(&self, session: &mut EditorSession, size: &str) -> bool {
        let cells = self.cells(session);
        style_text(session, &cells, size, |s, v| s.font_size = Some(v))
    }
}

// ============================================================================
// Images
// ============================================================================

impl FormatTarget for ImageTarget {
    fn increase(&self, session: &mut EditorSession) -> bool {
        Verb::Grow.apply_to_object(session, self.0)
    }

    fn decrease(&self, session: &mut EditorSession) -> bool {
        Verb::Shrink.apply_to_object(session, self.0)
    }

    fn move_left(&self, session: &mut EditorSession) -> bool {
        Verb::Left.apply_to_object(session, self.0)
    }

    fn move_right(&self, session: &mut EditorSession) -> bool {
        Verb::Right.apply_to_object(session, self.0)
    }

    fn move_up(&self, session: &mut EditorSession) -> bool {
        Verb::Up.apply_to_object(session, self.0)
    }

    fn move_down(&self, session: &mut EditorSession) -> bool {
        Verb::Down.apply_to_object(session, self.0)
    }

    fn apply_border(&self, session: &mut EditorSession, width: f32, color: &str) -> bool {
        session.apply_image_border(self.0, width, color)
    }

    fn apply_border_radius(&self, session: &mut EditorSession, radius: f32) -> bool {
        session.apply_image_border_radius(self.0, radius)
    }

    fn align(&self, session: &mut EditorSession, align: Alignment) -> bool {
        session.wrap_align(self.0, align)
    }

    fn set_color(&self, _session: &mut EditorSession, _color: &str) -> bool {
        false
    }

    fn set_font_family(&self, _session: &mut EditorSession, _family: &str) -> bool {
        false
    }

    fn set_font_size(&self, _session: &mut EditorSession, _size: &str) -> bool {
        false
    }
}

// ============================================================================
// Text and paragraphs
// ============================================================================

impl FormatTarget for TextTarget {
    fn increase(&self, session: &mut EditorSession) -> bool {
        ParagraphTarget.increase(session)
    }

    fn decrease(&self, session: &mut EditorSession) -> bool {
        ParagraphTarget.decrease(session)
    }

    fn move_left(&self, session: &mut EditorSession) -> bool {
        ParagraphTarget.move_left(session)
    }

    fn move_right(&self, session: &mut EditorSession) -> bool {
        ParagraphTarget.move_right(session)
    }

    fn move_up(&self, session: &mut EditorSession) -> bool {
        ParagraphTarget.move_up(session)
    }

    fn move_down(&self, session: &mut EditorSession) -> bool {
        ParagraphTarget.move_down(session)
    }

    fn apply_border(&self, session: &mut EditorSession, width: f32, color: &str) -> bool {
        ParagraphTarget.apply_border(session, width, color)
    }

    fn apply_border_radius(&self, session: &mut EditorSession, radius: f32) -> bool {
        ParagraphTarget.apply_border_radius(session, radius)
    }

    fn align(&self, session: &mut EditorSession, align: Alignment) -> bool {
        session.align_text(align)
    }

    fn set_color(&self, session: &mut EditorSession, color: &str) -> bool {
        session.set_text_color(color)
    }

    fn set_font_family(&self, session: &mut EditorSession, family: &str) -> bool {
        session.set_text_font_family(family)
    }

    fn set_font_size(&self, session: &mut EditorSession, size: &str) -> bool {
        session.set_text_font_size(size)
    }
}

impl FormatTarget for ParagraphTarget {
    fn increase(&self, session: &mut EditorSession) -> bool {
        session.increase_paragraph_width()
    }

    fn decrease(&self, session: &mut EditorSession) -> bool {
        session.decrease_paragraph_width()
    }

    fn move_left(&self, session: &mut EditorSession) -> bool {
        session.outdent_paragraph()
    }

    fn move_right(&self, session: &mut EditorSession) -> bool {
        session.indent_paragraph()
    }

    fn move_up(&self, session: &mut EditorSession) -> bool {
        session.move_paragraph_up()
    }

    fn move_down(&self, session: &mut EditorSession) -> bool {
        session.move_paragraph_down()
    }

    fn apply_border(&self, session: &mut EditorSession, width: f32, color: &str) -> bool {
        session.apply_paragraph_border(width, color)
    }

    fn apply_border_radius(&self, session: &mut EditorSession, radius: f32) -> bool {
        session.apply_paragraph_border_radius(radius)
    }

    fn align(&self, session: &mut EditorSession, align: Alignment) -> bool {
        session.align_paragraph_box(align, true)
    }

    fn set_color(&self, session: &mut EditorSession, color: &str) -> bool {
        session.set_paragraph_color(color)
    }

    fn set_font_family(&self, session: &mut EditorSession, family: &str) -> bool {
        session.set_paragraph_font_family(family)
    }

    fn set_font_size(&self, session: &mut EditorSession, size: &str) -> bool {
        session.set_paragraph_font_size(size)
    }
}

// ============================================================================
// Resolution and session verbs
// ============================================================================

impl EditorSession {
    /// The current edit target, most specific first
    pub fn resolve_target(&mut self) -> Target {
        let tables = &self.tables;
        let focused_table = tables.selected_table();

        if tables.cells.is_engaged() {
            let cells = tables.cells.targets();
            let table = focused_table.or_else(|| cells.first().and_then(|&c| self.tree.table_of(c)));
            return Target::Cell(CellTarget { table, cells });
        }
        if tables.rows.is_engaged() {
            let rows = tables.rows.targets();
            let table = focused_table.or_else(|| rows.first().and_then(|&r| self.tree.table_of(r)));
            return Target::Row(RowTarget { table, rows });
        }
        if let Some(table) = tables.column_scope(&self.tree) {
            if tables.cols.is_engaged(table) {
                let columns = tables.cols.targets(table);
                return Target::Column(ColumnTarget { table, columns });
            }
        }
        if let Some(image) = self.images.focused() {
            return Target::Image(ImageTarget(image));
        }
        if let Some(table) = focused_table {
            return Target::Table(TableTarget(table));
        }
        if let Some(range) = self.selected_range() {
            return Target::Text(TextTarget(range));
        }
        Target::Paragraph(ParagraphTarget)
    }

    pub fn target_kind(&mut self) -> TargetKind {
        self.resolve_target().kind()
    }

    fn dispatch(&mut self, verb: impl FnOnce(&Target, &mut EditorSession) -> bool) -> bool {
        let target = self.resolve_target();
        verb(&target, self)
    }

    pub fn increase(&mut self) -> bool {
        self.dispatch(|t, s| t.increase(s))
    }

    pub fn decrease(&mut self) -> bool {
        self.dispatch(|t, s| t.decrease(s))
    }

    pub fn move_left(&mut self) -> bool {
        self.dispatch(|t, s| t.move_left(s))
    }

    pub fn move_right(&mut self) -> bool {
        self.dispatch(|t, s| t.move_right(s))
    }

    pub fn move_up(&mut self) -> bool {
        self.dispatch(|t, s| t.move_up(s))
    }

    pub fn move_down(&mut self) -> bool {
        self.dispatch(|t, s| t.move_down(s))
    }

    pub fn apply_border(&mut self, width: f32, color: &str) -> bool {
        self.dispatch(|t, s| t.apply_border(s, width, color))
    }

    pub fn apply_border_radius(&mut self, radius: f32) -> bool {
        self.dispatch(|t, s| t.apply_border_radius(s, radius))
    }

    pub fn align(&mut self, align: Alignment) -> bool {
        self.dispatch(|t, s| t.align(s, align))
    }

    pub fn set_color(&mut self, color: &str) -> bool {
        self.dispatch(|t, s| t.set_color(s, color))
    }

    pub fn set_font_family(&mut self, family: &str) -> bool {
        self.dispatch(|t, s| t.set_font_family(s, family))
    }

    pub fn set_font_size(&mut self, size: &str) -> bool {
        self.dispatch(|t, s| t.set_font_size(s, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditorSettings, Modifiers, PointerEvent};
    use doc_model::{DocumentTree, Float, Position, SectionKind};

    fn session(body: &str) -> (EditorSession, NodeId, NodeId) {
        let tree = DocumentTree::with_text("", body, "");
        let mut s = EditorSession::new(tree, EditorSettings::default());
        let para = s.tree.paragraphs(s.tree.section(SectionKind::Body))[0];
        let text = s.tree.children(para)[0];
        s.set_caret(Position::new(text, 0));
        s.save_selection();
        (s, para, text)
    }

    fn insert_grid(s: &mut EditorSession) -> NodeId {
        s.insert_table(2, 2).unwrap()
    }

    #[test]
    fn paragraph_is_the_fallback() {
        let (mut s, _, _) = session("Hello");
        assert_eq!(s.target_kind(), TargetKind::Paragraph);
    }

    #[test]
    fn non_collapsed_selection_is_text() {
        let (mut s, _, text) = session("Hello");
        s.select(SelectionRange::new(Position::new(text, 0), Position::new(text, 3)));
        s.save_selection();
        assert_eq!(s.target_kind(), TargetKind::Text);
    }

    #[test]
    fn cell_beats_image() {
        let (mut s, para, _) = session("Hello");
        let image = s.tree.create_image("a.png");
        s.tree.append_child(para, image).unwrap();
        let table = insert_grid(&mut s);
        s.focus_image(image);

        assert!(s.active_cell().is_some());
        assert_eq!(s.target_kind(), TargetKind::Cell);

        s.tables.cells.clear(&mut s.tree);
        assert_eq!(s.target_kind(), TargetKind::Image);
        s.images.clear(&mut s.tree);
        assert_eq!(s.resolve_target(), Target::Table(TableTarget(table)));
    }

    #[test]
    fn focus_cycle_moves_target_through_row_and_column() {
        let (mut s, _, _) = session("x");
        let table = insert_grid(&mut s);
        let cell = s.tree.cell_at(table, 1, 1).unwrap();
        let ctrl = PointerEvent::new(cell).with_modifiers(Modifiers::ctrl());

        s.on_pointer_down(&ctrl);
        assert_eq!(s.target_kind(), TargetKind::Row);
        s.on_pointer_down(&ctrl);
        match s.resolve_target() {
            Target::Column(col) => {
                assert_eq!(col.table, table);
                assert_eq!(col.columns, vec![ColumnKey::new(table, 1)]);
            }
            other => panic!("expected column, got {other:?}"),
        }
        s.on_pointer_down(&ctrl);
        assert_eq!(s.target_kind(), TargetKind::Table);
    }

    #[test]
    fn active_column_api_targets_its_table() {
        let (mut s, _, _) = session("x");
        let table = insert_grid(&mut s);
        s.tables.cells.clear(&mut s.tree);
        assert!(s.activate_column(table, 0));
        assert_eq!(s.target_kind(), TargetKind::Column);

        assert!(s.align(Alignment::Center));
        for cell in s.tree.column_cells(table, 0) {
            assert_eq!(s.tree.get(cell).unwrap().style.text_align, Some(Alignment::Center));
        }
        let other = s.tree.cell_at(table, 0, 1).unwrap();
        assert_eq!(s.tree.get(other).unwrap().style.text_align, None);
    }

    #[test]
    fn column_of_another_table_is_not_targeted() {
        let (mut s, _, text) = session("x");
        let first = insert_grid(&mut s);
        assert!(s.set_caret(Position::new(text, 1)));
        assert!(s.save_selection());
        let second = insert_grid(&mut s);
        s.tables.cells.clear(&mut s.tree);

        assert!(s.activate_column(first, 0));
        assert_eq!(s.resolve_target(), Target::Table(TableTarget(second)));

        let before: Vec<ElementStyle> = s
            .tree
            .table_cells(first)
            .iter()
            .map(|&c| s.tree.get(c).unwrap().style.clone())
            .collect();
        assert!(s.apply_border(2.0, "#f00"));
        let after: Vec<ElementStyle> = s
            .tree
            .table_cells(first)
            .iter()
            .map(|&c| s.tree.get(c).unwrap().style.clone())
            .collect();
        assert_eq!(before, after);
        assert!(s.tree.get(second).unwrap().style.border.is_some());
    }

    #[test]
    fn cell_verbs_style_cells_and_resize_table() {
        let (mut s, _, _) = session("x");
        let table = insert_grid(&mut s);
        let cell = s.active_cell().unwrap();

        assert!(s.set_color("#336699"));
        assert_eq!(s.tree.get(cell).unwrap().style.color.as_deref(), Some("#336699"));
        assert!(!s.set_font_size(""));

        assert!(s.increase());
        assert_eq!(s.tree.get(table).unwrap().style.width, Some(242.0));
    }

    #[test]
    fn image_verbs() {
        let (mut s, para, _) = session("Hello world");
        let image = s.tree.create_image("a.png");
        s.tree.append_child(para, image).unwrap();
        s.focus_image(image);

        assert!(s.align(Alignment::Left));
        assert_eq!(s.tree.get(image).unwrap().style.float, Float::Left);
        assert!(s.apply_border_radius(6.0));
        assert!(!s.set_color("#000"), "images carry no text color");
        assert!(s.move_left());
        assert_eq!(s.tree.index_in_parent(image), Some(1));
    }

    #[test]
    fn table_color_styles_every_cell() {
        let (mut s, _, _) = session("x");
        let table = insert_grid(&mut s);
        s.tables.cells.clear(&mut s.tree);
        assert!(s.set_font_family("Courier"));
        for cell in s.tree.table_cells(table) {
            assert_eq!(s.tree.get(cell).unwrap().style.font_family.as_deref(), Some("Courier"));
        }
        assert!(s.align(Alignment::Right));
        assert_eq!(s.tree.get(table).unwrap().style.float, Float::Right);
    }

    #[test]
    fn paragraph_verbs_indent_and_style() {
        let (mut s, para, _) = session("text");
        assert!(s.move_right());
        assert_eq!(s.tree.get(para).unwrap().style.indent, 20.0);
        assert!(s.move_left());
        assert_eq!(s.tree.get(para).unwrap().style.indent, 0.0);
        assert!(s.set_color("#010203"));
        assert_eq!(s.tree.get(para).unwrap().style.color.as_deref(), Some("#010203"));
    }

    #[test]
    fn text_verbs_wrap_selection() {
        let (mut s, para, text) = session("Hello");
        s.select(SelectionRange::new(Position::new(text, 1), Position::new(text, 4)));
        s.save_selection();
        assert!(s.set_font_size("18px"));
        let span = s.tree.children(para)[1];
        assert_eq!(s.tree.get(span).unwrap().style.font_size.as_deref(), Some("18px"));
        assert_eq!(s.tree.text_content(para), "Hello");
        assert_eq!(s.target_kind(), TargetKind::Paragraph, "caret collapsed after the span");
    }
}
