//! Resizing and wrap alignment shared by inline objects (images, tables)

use crate::EditorSession;
use doc_model::{Alignment, Display, Float, Margins, NodeId, NodeKind};

impl EditorSession {
    /// Scale an object's rendered width by `factor`, never below the
    /// configured minimum. Images drop their explicit height to keep their
    /// aspect ratio.
    pub fn resize_object(&mut self, node: NodeId, factor: f32) -> bool {
        let width = match self.metrics.rendered_width(&self.tree, node) {
            Some(w) if w > 0.0 => w,
            _ => return false,
        };
        let new_width = (width * factor).round().max(self.settings.objects.min_size);

        let Some(data) = self.tree.get_mut(node) else {
            return false;
        };
        data.style.width = Some(new_width);
        if let NodeKind::Image(image) = &mut data.kind {
            image.height = None;
        }
        tracing::trace!("Resized {} from {} to {}", node, width, new_width);

        self.save_selection();
        true
    }

    pub fn grow_object(&mut self, node: NodeId) -> bool {
        let factor = self.settings.objects.grow_factor;
        self.resize_object(node, factor)
    }

    pub fn shrink_object(&mut self, node: NodeId) -> bool {
        let factor = self.settings.objects.shrink_factor;
        self.resize_object(node, factor)
    }

    /// Float an object left or right with text wrapping around it, or make
    /// it a centered block. Justify centers.
    pub fn wrap_align(&mut self, node: NodeId, align: Alignment) -> bool {
        let Some(data) = self.tree.get_mut(node) else {
            return false;
        };
        let style = &mut data.style;
        style.display = Display::Table;
        match align {
            Alignment::Left => {
                style.float = Float::Left;
                style.margins = Margins::new(4.0, 10.0, 6.0, 0.0);
            }
            Alignment::Right => {
                style.float = Float::Right;
                style.margins = Margins::new(4.0, 0.0, 6.0, 10.0);
            }
            Alignment::Center | Alignment::Justify => {
                style.float = Float::None;
                style.margins = Margins {
                    top: Some(6.0),
                    right: None,
                    bottom: Some(6.0),
                    left: None,
                };
            }
        }
        true
    }
}
