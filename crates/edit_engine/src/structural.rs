//! Structural key handling: paragraph split, soft break, tab stops and
//! atomic object deletion

use crate::{EditorSession, Key, KeyEvent, KeydownResult};
use doc_model::{Marker, NodeId, NodeType, Position, SelectionRange};

/// Which neighbour of the caret a deletion key looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Before,
    After,
}

impl Side {
    fn of(key: &Key) -> Option<Self> {
        match key {
            Key::Backspace => Some(Side::Before),
            Key::Delete => Some(Side::After),
            _ => None,
        }
    }
}

impl EditorSession {
    /// Keydown on an editable region. The verdict tells the host whether to
    /// prevent its native handling.
    pub fn on_key_down(&mut self, event: &KeyEvent) -> KeydownResult {
        let modifiers = event.modifiers;

        if event.key == Key::Enter && modifiers.shift {
            self.insert_soft_break();
            return KeydownResult::Handled;
        }
        if event.key == Key::Enter && !modifiers.any() {
            return if self.split_paragraph() {
                KeydownResult::Handled
            } else {
                KeydownResult::NotHandled
            };
        }

        // Shortcuts (undo, copy, ...) stay native
        if modifiers.any() {
            return KeydownResult::NotHandled;
        }

        if event.key == Key::Tab {
            self.insert_tab();
            return KeydownResult::Handled;
        }

        let Some(side) = Side::of(&event.key) else {
            return KeydownResult::NotHandled;
        };
        if self.select_object_if_adjacent(side, event.current_target) {
            return KeydownResult::PassThrough;
        }
        if self.delete_tab_if_adjacent(side, event.current_target) {
            return KeydownResult::Handled;
        }
        KeydownResult::NotHandled
    }

    /// Paragraph an Enter acts on. Cells never split; outside any paragraph
    /// the root section's selected paragraph is used.
    fn current_paragraph(&self, range: &SelectionRange) -> Option<NodeId> {
        let anchor = self.anchor_element(range)?;
        if self.tree.cell_of(anchor).is_some() {
            return None;
        }
        if let Some(para) = self.tree.paragraph_of(anchor) {
            return Some(para);
        }
        let root = self.root_section?;
        if !self.tree.contains(root, anchor) {
            return None;
        }
        self.tree
            .paragraphs(root)
            .into_iter()
            .find(|&p| self.tree.has_marker(p, Marker::ParagraphSelected))
    }

    /// Collapse `range`, deleting its content first when it spans any
    fn collapse_for_insert(&mut self, range: &SelectionRange) -> Option<Position> {
        if range.is_collapsed() {
            Some(range.start)
        } else {
            self.tree.delete_range(range).ok()
        }
    }

    /// Split the current paragraph at the caret. Content after the caret
    /// moves to a new paragraph which receives focus and the caret. A caret
    /// on the section itself splits the selected paragraph at its end.
    pub fn split_paragraph(&mut self) -> bool {
        let Some(range) = self.restored_range() else {
            return false;
        };
        let Some(para) = self.current_paragraph(&range) else {
            return false;
        };
        if !range.is_collapsed() && !self.tree.contains(para, range.start.node_id) {
            return false;
        }
        let Some(caret) = self.collapse_for_insert(&range) else {
            return false;
        };
        if !self.tree.is_attached(para) {
            return false;
        }
        let caret = if self.tree.contains(para, caret.node_id) {
            caret
        } else {
            self.tree.end_of(para)
        };

        let was_empty = self.tree.is_empty_paragraph(para);
        let new_para = self.tree.create_paragraph();
        if self.tree.insert_after(para, new_para).is_err() {
            self.tree.discard(&[new_para]);
            return false;
        }
        if !was_empty && !self.move_tail(para, new_para, caret) {
            let _ = self.tree.remove(new_para);
            return false;
        }

        if let Some(root) = self.root_section {
            for marked in self.tree.find_marked(root, Marker::ParagraphSelected) {
                self.tree.remove_marker(marked, Marker::ParagraphSelected);
            }
        }
        self.paragraphs.focus(&mut self.tree, new_para);
        self.place_caret(Position::start_of(new_para));
        tracing::debug!("Split paragraph {} into {}", para, new_para);
        true
    }

    /// Move everything from `caret` to the end of `para` into `new_para`.
    /// On failure the content is back in `para`.
    fn move_tail(&mut self, para: NodeId, new_para: NodeId, caret: Position) -> bool {
        let tail = SelectionRange::new(caret, self.tree.end_of(para));
        let Ok((fragment, _)) = self.tree.extract_range(&tail) else {
            return false;
        };
        if !self.tree.is_meaningful(&fragment) {
            self.tree.discard(&fragment);
        } else if self.tree.replace_children(new_para, fragment.clone()).is_err() {
            for &node in &fragment {
                let _ = self.tree.append_child(para, node);
            }
            return false;
        }
        let _ = self.tree.ensure_placeholder(para);
        true
    }

    /// Insert a line break at the caret, inside the current paragraph
    pub fn insert_soft_break(&mut self) -> bool {
        let Some(range) = self.restored_range() else {
            return false;
        };
        if self.current_paragraph(&range).is_none() {
            return false;
        }
        let Some(at) = self.collapse_for_insert(&range) else {
            return false;
        };
        let br = self.tree.create_line_break();
        if self.tree.insert_at(at, br).is_err() {
            self.tree.discard(&[br]);
            return false;
        }
        self.place_caret_after(br);
        tracing::debug!("Inserted soft break {}", br);
        true
    }

    /// Insert a tab stop at the caret, replacing selected content
    pub fn insert_tab(&mut self) -> bool {
        let Some(range) = self.restored_range() else {
            return false;
        };
        let Some(at) = self.collapse_for_insert(&range) else {
            return false;
        };
        let tab = self.tree.create_tab(self.settings.tab_width);
        if self.tree.insert_at(at, tab).is_err() {
            self.tree.discard(&[tab]);
            return false;
        }
        self.place_caret_after(tab);
        tracing::debug!("Inserted tab {}", tab);
        true
    }

    /// The node right before or after a collapsed caret, with the caret
    fn node_beside_caret(&mut self, side: Side, host: Option<NodeId>) -> Option<(Position, NodeId)> {
        let range = self.restored_range()?;
        if !range.is_collapsed() {
            return None;
        }
        if let Some(host) = host {
            let anchor = self.anchor_element(&range)?;
            if !self.tree.contains(host, anchor) {
                return None;
            }
        }

        let caret = range.start;
        let Position { node_id, offset } = caret;
        let node = if self.tree.is_element(node_id) {
            match side {
                Side::Before => offset.checked_sub(1).and_then(|i| self.tree.child(node_id, i)),
                Side::After => self.tree.child(node_id, offset),
            }
        } else {
            match side {
                Side::Before if offset == 0 => self.tree.previous_sibling(node_id),
                Side::After if offset == self.tree.boundary_len(node_id) => {
                    self.tree.next_sibling(node_id)
                }
                _ => None,
            }
        };
        Some((caret, node?))
    }

    /// Select an image or table next to the caret so native deletion removes
    /// it as one undoable unit. The tree is left untouched.
    fn select_object_if_adjacent(&mut self, side: Side, host: Option<NodeId>) -> bool {
        let Some((_, node)) = self.node_beside_caret(side, host) else {
            return false;
        };
        let atomic = self.tree.get(node).is_some_and(|n| n.is_atomic_object());
        if !atomic || !self.select_node(node) {
            return false;
        }
        tracing::debug!("Selected {} for native deletion", node);
        true
    }

    /// Remove a tab stop next to the caret
    fn delete_tab_if_adjacent(&mut self, side: Side, host: Option<NodeId>) -> bool {
        let Some((caret, node)) = self.node_beside_caret(side, host) else {
            return false;
        };
        if !self.tree.is_type(node, NodeType::Tab) || self.tree.remove(node).is_err() {
            return false;
        }
        let caret = if side == Side::Before && self.tree.is_element(caret.node_id) {
            Position::new(caret.node_id, caret.offset - 1)
        } else {
            caret
        };
        self.place_caret(caret);
        tracing::debug!("Deleted tab {}", node);
        true
    }
}
