//! Formatting of the selected text run

use crate::EditorSession;
use doc_model::{
    Alignment, ElementStyle, InlineFormat, NodeId, NodeKind, NodeType, Position, SelectionRange,
};

/// Style overrides for a styled span. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub color: Option<String>,
}

impl SpanStyle {
    pub fn font_family(family: impl Into<String>) -> Self {
        Self {
            font_family: Some(family.into()),
            ..Self::default()
        }
    }

    pub fn font_size(size: impl Into<String>) -> Self {
        Self {
            font_size: Some(size.into()),
            ..Self::default()
        }
    }

    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    fn non_empty(value: &Option<String>) -> Option<String> {
        value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
    }

    fn is_empty(&self) -> bool {
        Self::non_empty(&self.font_family).is_none()
            && Self::non_empty(&self.font_size).is_none()
            && Self::non_empty(&self.color).is_none()
    }

    fn apply(&self, style: &mut ElementStyle) {
        if let Some(family) = Self::non_empty(&self.font_family) {
            style.font_family = Some(family);
        }
        if let Some(size) = Self::non_empty(&self.font_size) {
            style.font_size = Some(size);
        }
        if let Some(color) = Self::non_empty(&self.color) {
            style.color = Some(color);
        }
    }
}

impl EditorSession {
    /// Whether a non-collapsed selection can be restored
    pub fn has_text_selection(&mut self) -> bool {
        self.selected_range().is_some()
    }

    /// Move the selected content into a new detached `wrapper`. Returns the
    /// wrapper and where it has to go back.
    fn lift_into(&mut self, wrapper: NodeKind) -> Option<(NodeId, Position)> {
        let range = self.selected_range()?;
        let (fragment, at) = self.tree.extract_range(&range).ok()?;
        let holder = self.tree.create(wrapper);
        for node in fragment {
            if self.tree.append_child(holder, node).is_err() {
                self.tree.discard(&[holder]);
                return None;
            }
        }
        Some((holder, at))
    }

    /// Wrap the selection in an inline format and keep its content selected
    pub fn wrap_format(&mut self, format: InlineFormat) -> bool {
        let Some((span, at)) = self.lift_into(NodeKind::Span(format)) else {
            return false;
        };
        if self.tree.insert_at(at, span).is_err() {
            return false;
        }
        let contents = SelectionRange::new(Position::start_of(span), self.tree.end_of(span));
        self.select(contents) && self.save_selection()
    }

    /// Wrap the selection in a styled span; the caret ends up after it
    pub fn wrap_styled(&mut self, style: &SpanStyle) -> bool {
        if style.is_empty() {
            return false;
        }
        let Some((span, at)) = self.lift_into(NodeKind::Span(InlineFormat::Styled)) else {
            return false;
        };
        if let Some(node) = self.tree.get_mut(span) {
            style.apply(&mut node.style);
        }
        if self.tree.insert_at(at, span).is_err() {
            return false;
        }
        self.place_caret_after(span)
    }

    pub fn set_text_color(&mut self, color: &str) -> bool {
        self.wrap_styled(&SpanStyle::color(color))
    }

    pub fn set_text_font_family(&mut self, family: &str) -> bool {
        self.wrap_styled(&SpanStyle::font_family(family))
    }

    pub fn set_text_font_size(&mut self, size: &str) -> bool {
        self.wrap_styled(&SpanStyle::font_size(size))
    }

    /// Remove inline formatting inside the selection: format tags are
    /// unwrapped, styled spans lose their overrides and disappear when
    /// nothing else is left on them. Text and block structure stay.
    pub fn clear_inline_formatting(&mut self) -> bool {
        let Some((holder, at)) = self.lift_into(NodeKind::Span(InlineFormat::Styled)) else {
            return false;
        };
        if self.tree.children(holder).is_empty() {
            self.tree.discard(&[holder]);
            return false;
        }

        for node in self.tree.descendants(holder) {
            let unwrap = match self.tree.get_mut(node) {
                Some(data) => match data.kind {
                    NodeKind::Span(format) if format.is_tag() => true,
                    NodeKind::Span(_) => {
                        data.style.clear_text_overrides();
                        data.style == ElementStyle::default()
                    }
                    _ => false,
                },
                None => false,
            };
            if unwrap && self.tree.unwrap_node(node).is_err() {
                return false;
            }
        }

        let children = self.tree.children(holder).to_vec();
        let (Some(&first), Some(&last)) = (children.first(), children.last()) else {
            return false;
        };
        if self.tree.insert_at(at, holder).is_err() || self.tree.unwrap_node(holder).is_err() {
            return false;
        }
        let (Some(start), Some(end)) = (
            self.tree.position_before(first),
            self.tree.position_after(last),
        ) else {
            return false;
        };
        self.select(SelectionRange::new(start, end)) && self.save_selection()
    }

    /// Set the text alignment of every paragraph the selection touches, or
    /// of the active paragraph without a selection
    pub fn align_text(&mut self, align: Alignment) -> bool {
        let paragraphs = match self.selected_range() {
            Some(range) => self.touched_paragraphs(&range),
            None => self.active_paragraph().into_iter().collect(),
        };
        if paragraphs.is_empty() {
            return false;
        }
        for para in &paragraphs {
            if let Some(node) = self.tree.get_mut(*para) {
                node.style.text_align = Some(align);
            }
        }
        self.save_selection();
        true
    }

    /// Paragraphs from the one holding the range start to the one holding
    /// its end, including siblings in between
    fn touched_paragraphs(&self, range: &SelectionRange) -> Vec<NodeId> {
        let [start, end] = range.containers();
        let first = self.tree.paragraph_of(start);
        let last = self.tree.paragraph_of(end);
        match (first, last) {
            (Some(first), Some(last)) if first == last => vec![first],
            (Some(first), Some(last)) if self.tree.parent(first) == self.tree.parent(last) => {
                let mut out = vec![first];
                let mut current = first;
                while current != last {
                    match self.tree.next_sibling(current) {
                        Some(next) => {
                            if self.tree.is_type(next, NodeType::Paragraph) {
                                out.push(next);
                            }
                            current = next;
                        }
                        None => break,
                    }
                }
                out
            }
            (first, last) => first.into_iter().chain(last).collect(),
        }
    }
}
