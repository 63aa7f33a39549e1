//! Rendered size lookup
//!
//! Resize operations start from an element's rendered width, which only the
//! host's layout engine knows. Hosts plug their layout in through
//! [`LayoutMetrics`]; [`StyleMetrics`] is the fallback used without one.

use crate::EditorSettings;
use doc_model::{DocumentTree, NodeId, NodeType};

/// Provides rendered widths for elements of the tree
pub trait LayoutMetrics: std::fmt::Debug {
    /// Rendered width in CSS pixels, `None` when the element is not laid out
    fn rendered_width(&self, tree: &DocumentTree, node: NodeId) -> Option<f32>;
}

/// Widths from explicit styles, with configured defaults for auto-sized
/// elements
#[derive(Debug, Clone, PartialEq)]
pub struct StyleMetrics {
    pub section_width: f32,
    pub image_width: f32,
    pub cell_width: f32,
}

impl StyleMetrics {
    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self {
            section_width: settings.section_content_width,
            image_width: settings.objects.default_image_width,
            cell_width: settings.table.cell_min_width,
        }
    }
}

impl Default for StyleMetrics {
    fn default() -> Self {
        Self::from_settings(&EditorSettings::default())
    }
}

impl LayoutMetrics for StyleMetrics {
    fn rendered_width(&self, tree: &DocumentTree, node: NodeId) -> Option<f32> {
        let data = tree.get(node)?;
        if let Some(width) = data.style.width {
            return Some(width);
        }
        match tree.node_type(node)? {
            NodeType::Image => Some(self.image_width),
            NodeType::Table => {
                let widest = tree
                    .table_rows(node)
                    .iter()
                    .map(|&row| tree.row_cells(row).len())
                    .max()
                    .unwrap_or(0);
                Some(widest as f32 * self.cell_width)
            }
            NodeType::Paragraph | NodeType::Section => Some(self.section_width),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{CellTemplate, SectionKind};

    #[test]
    fn explicit_width_wins() {
        let mut tree = DocumentTree::new();
        let img = tree.create_image("x.png");
        let metrics = StyleMetrics::default();
        assert_eq!(metrics.rendered_width(&tree, img), Some(300.0));

        tree.get_mut(img).unwrap().style.width = Some(120.0);
        assert_eq!(metrics.rendered_width(&tree, img), Some(120.0));
    }

    #[test]
    fn auto_sized_fallbacks() {
        let mut tree = DocumentTree::new();
        let metrics = StyleMetrics::default();
        let table = tree.create_table(2, 3, &CellTemplate::default()).unwrap();
        assert_eq!(metrics.rendered_width(&tree, table), Some(330.0));

        let para = tree.paragraphs(tree.section(SectionKind::Body))[0];
        assert_eq!(metrics.rendered_width(&tree, para), Some(680.0));

        let text = tree.create_text("x");
        assert_eq!(metrics.rendered_width(&tree, text), None);
    }
}
