//! Editor session: the context object every editing component works against
//!
//! A session owns the tree, the emulated live selection, the stored range and
//! all focus/selection state (root section, focused paragraph, image, table
//! and cell/row/column state). Several sessions can coexist in one process.

use crate::{
    BeforeInputEvent, EditorSettings, HostSelection, ImageFocus, InputType, LayoutMetrics,
    ParagraphRegistry, PointerEvent, RangeStore, StyleMetrics, TableSelectionModel,
};
use doc_model::{DocumentTree, NodeId, Position, SectionKind, SelectionRange};

/// Typing mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Insert,
    /// Typed characters replace the character in front of the caret
    Overwrite,
}

impl EditMode {
    pub fn label(&self) -> &'static str {
        match self {
            EditMode::Insert => "INS",
            EditMode::Overwrite => "OVR",
        }
    }
}

/// One editable page and its editing state
#[derive(Debug)]
pub struct EditorSession {
    pub(crate) tree: DocumentTree,
    pub(crate) selection: HostSelection,
    pub(crate) range_store: RangeStore,
    pub(crate) root_section: Option<NodeId>,
    pub(crate) paragraphs: ParagraphRegistry,
    pub(crate) images: ImageFocus,
    pub(crate) tables: TableSelectionModel,
    pub(crate) settings: EditorSettings,
    pub(crate) mode: EditMode,
    pub(crate) metrics: Box<dyn LayoutMetrics>,
}

impl EditorSession {
    /// Start a session on `tree`; the body section is the initial root
    pub fn new(tree: DocumentTree, settings: EditorSettings) -> Self {
        let root_section = Some(tree.section(SectionKind::Body));
        let metrics = Box::new(StyleMetrics::from_settings(&settings));
        Self {
            tree,
            selection: HostSelection::new(),
            range_store: RangeStore::new(),
            root_section,
            paragraphs: ParagraphRegistry::default(),
            images: ImageFocus::default(),
            tables: TableSelectionModel::default(),
            settings,
            mode: EditMode::Insert,
            metrics,
        }
    }

    /// Replace the layout source used for rendered sizes
    pub fn with_metrics(mut self, metrics: impl LayoutMetrics + 'static) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }

    /// Direct tree access for the host (native typing, loading content)
    pub fn tree_mut(&mut self) -> &mut DocumentTree {
        &mut self.tree
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn root_section(&self) -> Option<NodeId> {
        self.root_section
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// The live selection's range
    pub fn selection(&self) -> Option<SelectionRange> {
        self.selection.range()
    }

    /// The last saved range
    pub fn stored_range(&self) -> Option<SelectionRange> {
        self.range_store.stored()
    }

    /// Set the live selection the way a user gesture would. Nothing is saved
    /// until the next selection change notification.
    pub fn select(&mut self, range: SelectionRange) -> bool {
        self.selection.add_range(&self.tree, range).is_ok()
    }

    /// Place a caret in the live selection
    pub fn set_caret(&mut self, pos: Position) -> bool {
        self.select(SelectionRange::caret(pos))
    }

    /// Persist the live selection if it lies in the root section
    pub fn save_selection(&mut self) -> bool {
        self.range_store
            .save(&self.tree, &self.selection, self.root_section)
    }

    /// Re-apply the stored range to the live selection
    pub fn restore_selection(&mut self) -> bool {
        RangeStore::restore(&self.tree, &mut self.selection, self.range_store.stored())
    }

    /// Host notification: the live selection changed
    pub fn on_selection_change(&mut self) -> bool {
        self.save_selection()
    }

    /// Collapse the live selection to `pos` and persist it
    pub(crate) fn place_caret(&mut self, pos: Position) -> bool {
        self.selection.remove_all_ranges();
        if self.selection.collapse(&self.tree, pos).is_err() {
            return false;
        }
        self.save_selection();
        true
    }

    /// Caret right after `node`, persisted
    pub(crate) fn place_caret_after(&mut self, node: NodeId) -> bool {
        match self.tree.position_after(node) {
            Some(pos) => self.place_caret(pos),
            None => false,
        }
    }

    /// Select exactly `node` and persist
    pub(crate) fn select_node(&mut self, node: NodeId) -> bool {
        self.selection.remove_all_ranges();
        if self.selection.select_node(&self.tree, node).is_err() {
            return false;
        }
        self.save_selection();
        true
    }

    /// Restore the stored range and return the live one
    pub(crate) fn restored_range(&mut self) -> Option<SelectionRange> {
        self.restore_selection();
        self.selection.range()
    }

    /// The non-collapsed live range after restoring, if any
    pub(crate) fn selected_range(&mut self) -> Option<SelectionRange> {
        self.restored_range().filter(|r| !r.is_collapsed())
    }

    /// Element holding the range start (text containers resolve to their
    /// parent)
    pub(crate) fn anchor_element(&self, range: &SelectionRange) -> Option<NodeId> {
        self.tree.element_of(range.start.node_id)
    }

    // ========================================================================
    // Sections
    // ========================================================================

    /// Host notification: a section received focus and becomes the root
    pub fn focus_section(&mut self, kind: SectionKind) {
        self.root_section = Some(self.tree.section(kind));
    }

    /// Append an empty paragraph to a section
    pub fn add_paragraph(&mut self, kind: SectionKind) -> Option<NodeId> {
        let section = self.tree.section(kind);
        let para = self.tree.create_paragraph();
        self.tree.append_child(section, para).ok()?;
        tracing::debug!("Added paragraph {} to {}", para, kind);
        Some(para)
    }

    /// Remove the section's selected paragraph; the last one always stays
    pub fn remove_selected_paragraph(&mut self, kind: SectionKind) -> bool {
        let section = self.tree.section(kind);
        let paragraphs = self.tree.paragraphs(section);
        if paragraphs.len() <= 1 {
            return false;
        }
        let Some(selected) = paragraphs
            .into_iter()
            .find(|&p| self.tree.has_marker(p, doc_model::Marker::ParagraphSelected))
        else {
            return false;
        };
        if self.paragraphs.focused() == Some(selected) {
            self.paragraphs.clear(&mut self.tree);
        }
        if self.tree.remove(selected).is_err() {
            return false;
        }
        tracing::debug!("Removed paragraph {} from {}", selected, kind);
        true
    }

    // ========================================================================
    // Pointer and input
    // ========================================================================

    /// Host notification: pointer pressed on `event.target`. Returns whether
    /// the host must prevent its default handling.
    pub fn on_pointer_down(&mut self, event: &PointerEvent) -> bool {
        self.image_pointer_down(event.target);
        let prevent = self.table_pointer_down(event);
        self.paragraph_pointer_down(event.target);
        prevent
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> EditMode {
        self.mode = match self.mode {
            EditMode::Insert => EditMode::Overwrite,
            EditMode::Overwrite => EditMode::Insert,
        };
        self.mode
    }

    /// Host notification before native input is applied. In overwrite mode a
    /// typed character first removes what sits in front of the caret.
    pub fn on_before_input(&mut self, event: &BeforeInputEvent) -> bool {
        if self.mode != EditMode::Overwrite {
            return false;
        }
        if event.input_type != InputType::InsertText
            || event.data.as_deref().map_or(true, str::is_empty)
        {
            return false;
        }
        self.overwrite_next()
    }

    fn overwrite_next(&mut self) -> bool {
        let Some(range) = self.restored_range() else {
            return false;
        };
        if !range.is_collapsed() {
            return false;
        }
        let Position { node_id, offset } = range.start;

        let doomed = if self.tree.is_element(node_id) {
            match self
                .tree
                .child(node_id, offset)
                .and_then(|node| self.tree.range_around(node))
            {
                Some(r) => r,
                None => return false,
            }
        } else {
            if offset >= self.tree.boundary_len(node_id) {
                return false;
            }
            SelectionRange::new(range.start, Position::new(node_id, offset + 1))
        };

        match self.tree.delete_range(&doomed) {
            Ok(at) => {
                self.place_caret(at);
                true
            }
            Err(_) => false,
        }
    }
}
