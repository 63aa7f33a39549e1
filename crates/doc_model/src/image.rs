//! Inline image payload

use serde::{Deserialize, Serialize};

/// Source and intrinsic sizing of an inline image.
///
/// The source is either a remote URL or an already encoded `data:` URI. The
/// rendered width lives on the element style; `height` stays `None` while the
/// host keeps the aspect ratio ("auto").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    pub src: String,
    pub height: Option<f32>,
    pub alt_text: Option<String>,
}

impl ImageData {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            height: None,
            alt_text: None,
        }
    }

    /// Whether the source is embedded rather than remote
    pub fn is_embedded(&self) -> bool {
        self.src.starts_with("data:")
    }
}
