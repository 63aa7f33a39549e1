//! Paragraph focus, caret activation, box sizing and reordering

use crate::EditorSession;
use doc_model::{
    Alignment, Border, CornerRadii, Display, DocumentTree, ElementStyle, Marker, NodeId, NodeType,
    Position,
};

/// Where `activate` puts the caret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretPlacement {
    Start,
    End,
}

/// The focused ("selected") paragraph. One per session, across all sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphRegistry {
    focused: Option<NodeId>,
}

impl ParagraphRegistry {
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub(crate) fn focus(&mut self, tree: &mut DocumentTree, para: NodeId) {
        self.clear(tree);
        self.focused = Some(para);
        tree.add_marker(para, Marker::ParagraphSelected);
    }

    pub(crate) fn clear(&mut self, tree: &mut DocumentTree) {
        if let Some(para) = self.focused.take() {
            tree.remove_marker(para, Marker::ParagraphSelected);
        }
    }
}

impl EditorSession {
    pub fn focused_paragraph(&self) -> Option<NodeId> {
        self.paragraphs.focused()
    }

    /// Mark `para` as the selected paragraph
    pub fn focus_paragraph(&mut self, para: NodeId) -> bool {
        if !self.tree.is_type(para, NodeType::Paragraph) {
            return false;
        }
        self.paragraphs.focus(&mut self.tree, para);
        true
    }

    pub(crate) fn paragraph_pointer_down(&mut self, target: NodeId) {
        let Some(root) = self.root_section else {
            return;
        };
        match self.tree.paragraph_of(target) {
            Some(para) if self.tree.parent(para) == Some(root) => {
                self.paragraphs.focus(&mut self.tree, para);
            }
            _ => self.paragraphs.clear(&mut self.tree),
        }
    }

    /// Put the caret at the start or end of `para`, giving an empty paragraph
    /// a line-break placeholder first
    pub fn activate_paragraph(&mut self, para: NodeId, placement: CaretPlacement) -> bool {
        if !self.tree.is_attached(para) || self.tree.ensure_placeholder(para).is_err() {
            return false;
        }
        let pos = match placement {
            CaretPlacement::Start => Position::start_of(para),
            CaretPlacement::End => self.tree.end_of(para),
        };
        self.place_caret(pos)
    }

    /// Paragraph holding the caret of the restored selection
    pub fn active_paragraph(&mut self) -> Option<NodeId> {
        let range = self.restored_range()?;
        let anchor = self.anchor_element(&range)?;
        self.tree.paragraph_of(anchor)
    }

    /// The focused paragraph, else the one holding the caret
    pub(crate) fn paragraph_target(&mut self) -> Option<NodeId> {
        self.paragraphs.focused().or_else(|| self.active_paragraph())
    }

    // ========================================================================
    // Box width
    // ========================================================================

    pub fn increase_paragraph_width(&mut self) -> bool {
        let step = self.settings.paragraph.width_step;
        self.resize_paragraph(|w| w + step)
    }

    pub fn decrease_paragraph_width(&mut self) -> bool {
        let step = self.settings.paragraph.width_step;
        let min = self.settings.paragraph.min_width;
        self.resize_paragraph(|w| (w - step).max(min))
    }

    fn resize_paragraph(&mut self, next: impl Fn(f32) -> f32) -> bool {
        let Some(para) = self.paragraph_target() else {
            return false;
        };
        let width = self
            .metrics
            .rendered_width(&self.tree, para)
            .map(f32::round)
            .unwrap_or(0.0);
        let Some(node) = self.tree.get_mut(para) else {
            return false;
        };
        node.style.width = Some(next(width));
        node.style.display = Display::InlineBlock;
        true
    }

    /// Align a narrowed paragraph's box inside the section, optionally its
    /// text as well. Justify leaves the box where it is.
    pub fn align_paragraph_box(&mut self, align: Alignment, with_text: bool) -> bool {
        let Some(para) = self.paragraph_target() else {
            return false;
        };
        let Some(node) = self.tree.get_mut(para) else {
            return false;
        };
        let margins = &mut node.style.margins;
        match align {
            Alignment::Left => (margins.left, margins.right) = (Some(0.0), None),
            Alignment::Right => (margins.left, margins.right) = (None, Some(0.0)),
            Alignment::Center => (margins.left, margins.right) = (None, None),
            Alignment::Justify => {}
        }
        if with_text {
            node.style.text_align = Some(align);
        }
        true
    }

    // ========================================================================
    // Indentation
    // ========================================================================

    pub fn indent_paragraph(&mut self) -> bool {
        let step = self.settings.paragraph.indent_step;
        self.shift_paragraph(step)
    }

    pub fn outdent_paragraph(&mut self) -> bool {
        let step = self.settings.paragraph.indent_step;
        self.shift_paragraph(-step)
    }

    fn shift_paragraph(&mut self, delta: f32) -> bool {
        let Some(para) = self.paragraph_target() else {
            return false;
        };
        let Some(node) = self.tree.get_mut(para) else {
            return false;
        };
        node.style.indent = (node.style.indent + delta).max(0.0);
        true
    }

    // ========================================================================
    // Reordering
    // ========================================================================

    /// Swap the focused paragraph with the paragraph before it
    pub fn move_paragraph_up(&mut self) -> bool {
        self.swap_focused_paragraph(true)
    }

    /// Swap the focused paragraph with the paragraph after it
    pub fn move_paragraph_down(&mut self) -> bool {
        self.swap_focused_paragraph(false)
    }

    fn swap_focused_paragraph(&mut self, up: bool) -> bool {
        let (Some(_), Some(para)) = (self.root_section, self.paragraphs.focused()) else {
            return false;
        };
        let sibling = if up {
            self.tree.previous_element_sibling(para)
        } else {
            self.tree.next_element_sibling(para)
        };
        let Some(sibling) = sibling.filter(|&s| self.tree.is_type(s, NodeType::Paragraph)) else {
            return false;
        };
        let moved = if up {
            self.tree.insert_before(sibling, para)
        } else {
            self.tree.insert_before(para, sibling)
        };
        if moved.is_err() {
            return false;
        }
        self.activate_paragraph(para, CaretPlacement::Start);
        self.paragraphs.focus(&mut self.tree, para);
        tracing::debug!("Moved paragraph {} {}", para, if up { "up" } else { "down" });
        true
    }

    // ========================================================================
    // Border
    // ========================================================================

    pub fn apply_paragraph_border(&mut self, width: f32, color: &str) -> bool {
        let Some(para) = self.paragraph_target() else {
            return false;
        };
        let Some(node) = self.tree.get_mut(para) else {
            return false;
        };
        node.style.border = Some(Border::new(width, color));
        node.style.padding = Some((2.0, 4.0));
        true
    }

    pub fn apply_paragraph_border_radius(&mut self, radius: f32) -> bool {
        let Some(para) = self.paragraph_target() else {
            return false;
        };
        let Some(node) = self.tree.get_mut(para) else {
            return false;
        };
        node.style.radius = CornerRadii::uniform(radius);
        true
    }

    // ========================================================================
    // Text overrides
    // ========================================================================

    pub fn set_paragraph_color(&mut self, color: &str) -> bool {
        self.style_paragraph_text(color, |style, v| style.color = Some(v))
    }

    pub fn set_paragraph_font_family(&mut self, family: &str) -> bool {
        self.style_paragraph_text(family, |style, v| style.font_family = Some(v))
    }

    pub fn set_paragraph_font_size(&mut self, size: &str) -> bool {
        self.style_paragraph_text(size, |style, v| style.font_size = Some(v))
    }

    fn style_paragraph_text(
        &mut self,
        value: &str,
        apply: impl FnOnce(&mut ElementStyle, String),
    ) -> bool {
        if value.trim().is_empty() {
            return false;
        }
        let Some(para) = self.paragraph_target() else {
            return false;
        };
        let Some(node) = self.tree.get_mut(para) else {
            return false;
        };
        apply(&mut node.style, value.to_string());
        true
    }
}
