//! Paragraph helpers

use crate::{DocumentTree, NodeId, NodeType, Result, ZWSP};

/// Text made only of whitespace and zero-width spaces
pub fn is_blank_text(s: &str) -> bool {
    s.chars().all(|c| c.is_whitespace() || c == ZWSP)
}

impl DocumentTree {
    /// Closest paragraph at or above `node`
    pub fn paragraph_of(&self, node: NodeId) -> Option<NodeId> {
        self.closest_of_type(node, NodeType::Paragraph)
    }

    /// A paragraph is empty when its text is blank and it holds no elements
    /// besides at most one line break.
    pub fn is_empty_paragraph(&self, para: NodeId) -> bool {
        if !is_blank_text(&self.text_content(para)) {
            return false;
        }
        let elements: Vec<NodeId> = self
            .children(para)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
            .collect();
        match elements.as_slice() {
            [] => true,
            [only] => self.is_type(*only, NodeType::LineBreak),
            _ => false,
        }
    }

    /// Give a childless block a line-break placeholder so it keeps a caret
    /// position. Returns whether one was added.
    pub fn ensure_placeholder(&mut self, block: NodeId) -> Result<bool> {
        if !self.children(block).is_empty() {
            return Ok(false);
        }
        let br = self.create_line_break();
        self.append_child(block, br)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeKind, SectionKind, NBSP};

    #[test]
    fn blank_text() {
        assert!(is_blank_text(""));
        assert!(is_blank_text(" \t\n"));
        assert!(is_blank_text(&format!("{ZWSP}{NBSP}")));
        assert!(!is_blank_text(" a "));
    }

    #[test]
    fn empty_paragraph_detection() {
        let mut tree = DocumentTree::new();
        let body = tree.section(SectionKind::Body);
        let para = tree.paragraphs(body)[0];
        assert!(tree.is_empty_paragraph(para));

        let br = tree.create_line_break();
        tree.append_child(para, br).unwrap();
        assert!(!tree.is_empty_paragraph(para), "two breaks are content");

        let fresh = tree.create(NodeKind::Paragraph);
        assert!(tree.is_empty_paragraph(fresh));
        let img = tree.create_image("x.png");
        tree.append_child(fresh, img).unwrap();
        assert!(!tree.is_empty_paragraph(fresh));

        let spaced = tree.create(NodeKind::Paragraph);
        let blank = tree.create_text(format!(" {ZWSP} "));
        tree.append_child(spaced, blank).unwrap();
        assert!(tree.is_empty_paragraph(spaced));
    }

    #[test]
    fn placeholder_only_for_childless_blocks() {
        let mut tree = DocumentTree::new();
        let para = tree.create(NodeKind::Paragraph);
        assert!(tree.ensure_placeholder(para).unwrap());
        assert!(!tree.ensure_placeholder(para).unwrap());
        assert_eq!(tree.children(para).len(), 1);
    }

    #[test]
    fn paragraph_of_walks_up() {
        let tree = DocumentTree::with_text("", "text", "");
        let body = tree.section(SectionKind::Body);
        let para = tree.paragraphs(body)[0];
        let text = tree.children(para)[0];
        assert_eq!(tree.paragraph_of(text), Some(para));
        assert_eq!(tree.paragraph_of(body), None);
    }
}
