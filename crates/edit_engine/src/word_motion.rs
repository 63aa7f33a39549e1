//! Moving inline objects by word and by paragraph
//!
//! An object's position inside its paragraph is measured as a character
//! offset into the paragraph's flattened text. Moving by word computes the
//! neighbouring word boundary in that text and splices the object back in
//! at the boundary, splitting a text node when the boundary falls inside it.

use crate::EditorSession;
use doc_model::{NodeId, NodeType, TextSegment};
use std::cmp::Ordering;

/// ASCII letters and digits, underscore and Latin-1 letters
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || ('\u{00C0}'..='\u{00FF}').contains(&c)
}

/// Start of the word before `pos`: skip separators backwards, then the word
pub fn find_prev_word_start(text: &[char], pos: usize) -> usize {
    let mut i = pos.min(text.len());
    while i > 0 && !is_word_char(text[i - 1]) {
        i -= 1;
    }
    while i > 0 && is_word_char(text[i - 1]) {
        i -= 1;
    }
    i
}

/// End of the word after `pos`: skip separators forwards, then the word
pub fn find_next_word_end(text: &[char], pos: usize) -> usize {
    let len = text.len();
    let mut i = pos.min(len);
    while i < len && !is_word_char(text[i]) {
        i += 1;
    }
    while i < len && is_word_char(text[i]) {
        i += 1;
    }
    i
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Backward,
    Forward,
}

impl EditorSession {
    /// Paragraph of the root section that holds `el`
    fn enclosing_paragraph(&self, el: NodeId) -> Option<NodeId> {
        let root = self.root_section?;
        self.tree
            .ancestors(el)
            .skip(1)
            .find(|&n| self.tree.parent(n) == Some(root))
            .filter(|&p| self.tree.is_type(p, NodeType::Paragraph))
    }

    /// Move `el` to the start of the previous word in its paragraph
    pub fn move_word_left(&mut self, el: NodeId) -> bool {
        self.move_by_word(el, Direction::Backward)
    }

    /// Move `el` to the end of the next word in its paragraph
    pub fn move_word_right(&mut self, el: NodeId) -> bool {
        self.move_by_word(el, Direction::Forward)
    }

    fn move_by_word(&mut self, el: NodeId, direction: Direction) -> bool {
        let Some(para) = self.enclosing_paragraph(el) else {
            return false;
        };
        let segments = self.tree.text_segments(para, Some(el));
        let text: Vec<char> = segments
            .iter()
            .filter_map(|seg| match self.tree.kind(seg.node_id) {
                Some(doc_model::NodeKind::Text(s)) => Some(s.chars()),
                _ => None,
            })
            .flatten()
            .collect();
        if text.is_empty() {
            return false;
        }

        let current: usize = segments
            .iter()
            .filter(|seg| self.tree.compare_order(seg.node_id, el) == Some(Ordering::Less))
            .map(TextSegment::len)
            .sum();
        let target = match direction {
            Direction::Backward => find_prev_word_start(&text, current),
            Direction::Forward => find_next_word_end(&text, current),
        };
        if target == current {
            return false;
        }

        if !self.splice_at_offset(para, &segments, text.len(), el, target) {
            return false;
        }
        self.place_caret_after(el);
        tracing::debug!("Moved {} from offset {} to {}", el, current, target);
        true
    }

    fn splice_at_offset(
        &mut self,
        para: NodeId,
        segments: &[TextSegment],
        total: usize,
        el: NodeId,
        target: usize,
    ) -> bool {
        if target >= total {
            return self.tree.append_child(para, el).is_ok();
        }
        let Some(seg) = segments
            .iter()
            .find(|seg| seg.start <= target && target <= seg.end)
        else {
            return false;
        };
        let local = target - seg.start;
        let result = if local == 0 {
            self.tree.insert_before(seg.node_id, el)
        } else if local == seg.len() {
            self.tree.insert_after(seg.node_id, el)
        } else {
            self.tree
                .split_text(seg.node_id, local)
                .and_then(|right| self.tree.insert_before(right, el))
        };
        result.is_ok()
    }

    /// Move `el` to the end of the previous paragraph
    pub fn move_object_up(&mut self, el: NodeId) -> bool {
        self.move_to_adjacent_paragraph(el, Direction::Backward)
    }

    /// Move `el` to the end of the next paragraph
    pub fn move_object_down(&mut self, el: NodeId) -> bool {
        self.move_to_adjacent_paragraph(el, Direction::Forward)
    }

    fn move_to_adjacent_paragraph(&mut self, el: NodeId, direction: Direction) -> bool {
        let Some(para) = self.enclosing_paragraph(el) else {
            return false;
        };
        let sibling = match direction {
            Direction::Backward => self.tree.previous_element_sibling(para),
            Direction::Forward => self.tree.next_element_sibling(para),
        };
        let Some(dest) = sibling.filter(|&s| self.tree.is_type(s, NodeType::Paragraph)) else {
            return false;
        };
        if self.tree.append_child(dest, el).is_err() {
            return false;
        }
        self.place_caret_after(el);
        tracing::debug!("Moved {} into paragraph {}", el, dest);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EditorSettings;
    use doc_model::{DocumentTree, Position, SectionKind};
    use proptest::prelude::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    /// One body paragraph of `text` with an image after `split` characters
    fn session_with_image(text: &str, split: usize) -> (EditorSession, NodeId, NodeId) {
        let mut tree = DocumentTree::with_text("", text, "");
        let para = tree.paragraphs(tree.section(SectionKind::Body))[0];
        let node = tree.children(para)[0];
        let img = tree.create_image("a.png");
        if text.is_empty() {
            tree.append_child(para, img).unwrap();
        } else {
            tree.insert_at(Position::new(node, split), img).unwrap();
        }
        (EditorSession::new(tree, EditorSettings::default()), para, img)
    }

    fn offset_of(s: &EditorSession, para: NodeId, img: NodeId) -> usize {
        s.tree
            .text_segments(para, Some(img))
            .iter()
            .filter(|seg| s.tree.compare_order(seg.node_id, img) == Some(Ordering::Less))
            .map(TextSegment::len)
            .sum()
    }

    #[test]
    fn word_boundaries() {
        let text = chars("Hello, brave world");
        assert_eq!(find_prev_word_start(&text, 7), 0);
        assert_eq!(find_prev_word_start(&text, 10), 7);
        assert_eq!(find_next_word_end(&text, 5), 12);
        assert_eq!(find_next_word_end(&text, 18), 18);
        assert_eq!(find_prev_word_start(&chars("  "), 2), 0);
        assert!(is_word_char('é'));
        assert!(!is_word_char('-'));
    }

    #[test]
    fn moves_right_into_text_node() {
        let (mut s, para, img) = session_with_image("Hello brave world", 5);
        assert!(s.move_word_right(img));
        assert_eq!(offset_of(&s, para, img), 11);
        assert_eq!(s.tree.text_content(para), "Hello brave world");
        assert_eq!(s.stored_range().unwrap().start, s.tree.position_after(img).unwrap());
    }

    #[test]
    fn moves_left_to_word_start() {
        let (mut s, para, img) = session_with_image("Hello brave world", 11);
        assert!(s.move_word_left(img));
        assert_eq!(offset_of(&s, para, img), 6);
        assert!(s.move_word_left(img));
        assert_eq!(offset_of(&s, para, img), 0);
        assert_eq!(s.tree.children(para)[0], img);
        assert!(!s.move_word_left(img), "already at the start");
    }

    #[test]
    fn move_right_at_end_appends_and_then_stops() {
        let (mut s, para, img) = session_with_image("one two", 4);
        assert!(s.move_word_right(img));
        assert_eq!(s.tree.children(para).last(), Some(&img));
        assert!(!s.move_word_right(img));
    }

    #[test]
    fn empty_paragraph_or_outside_root_fails() {
        let (mut s, _, img) = session_with_image("", 0);
        assert!(!s.move_word_right(img));

        let (mut s, _, img) = session_with_image("text", 2);
        s.focus_section(SectionKind::Header);
        assert!(!s.move_word_left(img));
    }

    #[test]
    fn paragraph_motion_moves_to_sibling_end() {
        let (mut s, first, img) = session_with_image("ab", 1);
        assert!(!s.move_object_up(img), "no previous paragraph");

        let second = s.add_paragraph(SectionKind::Body).unwrap();
        assert!(s.move_object_down(img));
        assert_eq!(s.tree.parent(img), Some(second));
        assert_eq!(s.tree.children(second).last(), Some(&img));

        assert!(s.move_object_up(img));
        assert_eq!(s.tree.parent(img), Some(first));
        assert!(!s.move_object_down(first), "paragraphs are not inline objects");
    }

    proptest! {
        #[test]
        fn prev_word_start_is_a_boundary(text in "[a-z ,]{0,24}", pos in 0usize..30) {
            let text = chars(&text);
            let start = find_prev_word_start(&text, pos);
            prop_assert!(start <= pos.min(text.len()));
            if start > 0 {
                prop_assert!(!is_word_char(text[start - 1]));
                prop_assert!(is_word_char(text[start]));
            }
        }

        #[test]
        fn next_word_end_is_a_boundary(text in "[a-z ,]{0,24}", pos in 0usize..30) {
            let text = chars(&text);
            let end = find_next_word_end(&text, pos);
            prop_assert!(end >= pos.min(text.len()));
            prop_assert!(end <= text.len());
            if end < text.len() && end > pos.min(text.len()) {
                prop_assert!(!is_word_char(text[end]));
                prop_assert!(is_word_char(text[end - 1]));
            }
        }
    }
}
