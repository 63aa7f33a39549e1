//! Image focus and insertion

use crate::{EditError, EditorSession, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use doc_model::{Margins, Marker, NodeId, NodeType};
use std::path::Path;

/// The focused image, at most one per session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageFocus {
    focused: Option<NodeId>,
}

impl ImageFocus {
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub(crate) fn focus(&mut self, tree: &mut doc_model::DocumentTree, image: NodeId) {
        self.clear(tree);
        self.focused = Some(image);
        tree.add_marker(image, Marker::ImageSelected);
    }

    pub(crate) fn clear(&mut self, tree: &mut doc_model::DocumentTree) {
        if let Some(image) = self.focused.take() {
            tree.remove_marker(image, Marker::ImageSelected);
        }
    }
}

/// Where the pixels of a new image come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Already encoded `data:` URI
    DataUri(String),
    /// Raw image bytes, embedded as base64
    Bytes { mime: String, bytes: Vec<u8> },
    /// Remote image, downloaded through an [`ImageFetcher`]. A `data:` URL is
    /// used as is.
    Url(String),
}

impl ImageSource {
    /// Read an image file; the MIME type is sniffed from its first bytes
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        let mime = if is_svg {
            "image/svg+xml"
        } else {
            sniff_mime(&bytes)
        };
        Ok(Self::Bytes {
            mime: mime.to_string(),
            bytes,
        })
    }
}

/// MIME type from magic bytes
fn sniff_mime(data: &[u8]) -> &'static str {
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        "image/png"
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if data.starts_with(b"GIF8") {
        "image/gif"
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        "image/webp"
    } else if data.starts_with(b"BM") {
        "image/bmp"
    } else {
        "application/octet-stream"
    }
}

fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Downloads remote images for insertion. Implemented by the host; the
/// error string is reported back in [`EditError::ImageFetch`].
pub trait ImageFetcher {
    /// Returns the MIME type and the image bytes
    fn fetch(&self, url: &str) -> std::result::Result<(String, Vec<u8>), String>;
}

impl EditorSession {
    pub fn focused_image(&self) -> Option<NodeId> {
        self.images.focused()
    }

    /// Focus `image` as if it had been clicked
    pub fn focus_image(&mut self, image: NodeId) -> bool {
        if !self.tree.is_type(image, NodeType::Image) {
            return false;
        }
        self.images.focus(&mut self.tree, image);
        true
    }

    pub(crate) fn image_pointer_down(&mut self, target: NodeId) {
        if self.tree.is_type(target, NodeType::Image) {
            self.images.focus(&mut self.tree, target);
        } else {
            self.images.clear(&mut self.tree);
        }
    }

    /// Resolve `source` to a `src` value, downloading when needed
    fn resolve_source(
        source: ImageSource,
        fetcher: Option<&dyn ImageFetcher>,
    ) -> Result<String> {
        match source {
            ImageSource::DataUri(uri) => Ok(uri),
            ImageSource::Bytes { mime, bytes } => Ok(to_data_uri(&mime, &bytes)),
            ImageSource::Url(url) if url.starts_with("data:") => Ok(url),
            ImageSource::Url(url) => {
                let Some(fetcher) = fetcher else {
                    return Err(EditError::ImageFetch {
                        url,
                        reason: "no fetcher available".to_string(),
                    });
                };
                match fetcher.fetch(&url) {
                    Ok((mime, bytes)) => Ok(to_data_uri(&mime, &bytes)),
                    Err(reason) => Err(EditError::ImageFetch { url, reason }),
                }
            }
        }
    }

    /// Insert an image at the selection that is current once the source is
    /// loaded, replacing selected content. The new image is focused and the
    /// caret placed after it.
    ///
    /// Returns `Ok(None)` when there is no selection to insert at.
    pub fn insert_image(
        &mut self,
        source: ImageSource,
        fetcher: Option<&dyn ImageFetcher>,
    ) -> Result<Option<NodeId>> {
        let src = Self::resolve_source(source, fetcher)?;

        let Some(range) = self.restored_range() else {
            return Ok(None);
        };
        let at = if range.is_collapsed() {
            range.start
        } else {
            self.tree.delete_range(&range)?
        };

        let image = self.tree.create_image(src);
        if let Some(node) = self.tree.get_mut(image) {
            node.style.width = Some(self.settings.objects.default_image_width);
            node.style.margins = Margins::new(4.0, 0.0, 6.0, 0.0);
        }
        if let Err(e) = self.tree.insert_at(at, image) {
            self.tree.discard(&[image]);
            return Err(e.into());
        }

        self.place_caret_after(image);
        self.images.focus(&mut self.tree, image);
        tracing::debug!("Inserted image {}", image);
        Ok(Some(image))
    }

    // ========================================================================
    // Image styling
    // ========================================================================

    pub(crate) fn apply_image_border(&mut self, image: NodeId, width: f32, color: &str) -> bool {
        let Some(node) = self.tree.get_mut(image) else {
            return false;
        };
        node.style.border = Some(doc_model::Border::new(width, color));
        true
    }

    pub(crate) fn apply_image_border_radius(&mut self, image: NodeId, radius: f32) -> bool {
        let Some(node) = self.tree.get_mut(image) else {
            return false;
        };
        node.style.radius = doc_model::CornerRadii::uniform(radius);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditorSettings, PointerEvent};
    use doc_model::{DocumentTree, NodeKind, Position, SectionKind, SelectionRange};
    use std::cell::Cell;
    use tempfile::TempDir;

    struct StubFetcher {
        calls: Cell<usize>,
        result: std::result::Result<(String, Vec<u8>), String>,
    }

    impl ImageFetcher for StubFetcher {
        fn fetch(&self, _url: &str) -> std::result::Result<(String, Vec<u8>), String> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    fn session(body: &str) -> (EditorSession, NodeId) {
        let tree = DocumentTree::with_text("", body, "");
        let mut s = EditorSession::new(tree, EditorSettings::default());
        let para = s.tree.paragraphs(s.tree.section(SectionKind::Body))[0];
        let text = s.tree.children(para)[0];
        s.set_caret(Position::new(text, 2));
        s.save_selection();
        (s, para)
    }

    fn src_of(s: &EditorSession, image: NodeId) -> String {
        match s.tree.kind(image) {
            Some(NodeKind::Image(data)) => data.src.clone(),
            other => panic!("not an image: {other:?}"),
        }
    }

    #[test]
    fn inserts_at_caret_and_focuses() {
        let (mut s, para) = session("abcd");
        let image = s
            .insert_image(ImageSource::DataUri("data:image/png;base64,AA".into()), None)
            .unwrap()
            .unwrap();

        assert_eq!(s.tree.parent(image), Some(para));
        assert_eq!(s.tree.index_in_parent(image), Some(1));
        assert_eq!(s.tree.text_content(para), "abcd");
        assert_eq!(s.focused_image(), Some(image));
        assert!(s.tree.has_marker(image, Marker::ImageSelected));
        assert_eq!(s.tree.get(image).unwrap().style.width, Some(300.0));
        assert_eq!(s.stored_range().unwrap().start, Position::new(para, 2));
    }

    #[test]
    fn replaces_selected_content() {
        let (mut s, para) = session("abcd");
        let text = s.tree.children(para)[0];
        s.select(SelectionRange::new(Position::new(text, 1), Position::new(text, 3)));
        s.save_selection();
        s.insert_image(ImageSource::DataUri("data:x".into()), None)
            .unwrap()
            .unwrap();
        assert_eq!(s.tree.text_content(para), "ad");
    }

    #[test]
    fn bytes_are_base64_encoded() {
        let (mut s, _) = session("ab");
        let image = s
            .insert_image(
                ImageSource::Bytes {
                    mime: "image/gif".into(),
                    bytes: b"GIF89a".to_vec(),
                },
                None,
            )
            .unwrap()
            .unwrap();
        assert_eq!(src_of(&s, image), "data:image/gif;base64,R0lGODlh");
    }

    #[test]
    fn remote_urls_go_through_fetcher() {
        let (mut s, _) = session("ab");
        let fetcher = StubFetcher {
            calls: Cell::new(0),
            result: Ok(("image/png".into(), vec![1, 2, 3])),
        };
        let image = s
            .insert_image(ImageSource::Url("https://x.test/a.png".into()), Some(&fetcher))
            .unwrap()
            .unwrap();
        assert_eq!(fetcher.calls.get(), 1);
        assert_eq!(src_of(&s, image), "data:image/png;base64,AQID");

        s.insert_image(ImageSource::Url("data:image/png;base64,AA".into()), Some(&fetcher))
            .unwrap();
        assert_eq!(fetcher.calls.get(), 1, "data URLs are not fetched");
    }

    #[test]
    fn fetch_failure_surfaces_and_leaves_tree() {
        let (mut s, para) = session("ab");
        let fetcher = StubFetcher {
            calls: Cell::new(0),
            result: Err("404".into()),
        };
        let count = s.tree.node_count();
        let err = s
            .insert_image(ImageSource::Url("https://x.test/missing.png".into()), Some(&fetcher))
            .unwrap_err();
        assert!(matches!(err, EditError::ImageFetch { ref reason, .. } if reason == "404"));
        assert_eq!(s.tree.node_count(), count);
        assert_eq!(s.tree.text_content(para), "ab");
    }

    #[test]
    fn no_selection_means_no_insert() {
        let tree = DocumentTree::with_text("", "ab", "");
        let mut s = EditorSession::new(tree, EditorSettings::default());
        let result = s.insert_image(ImageSource::DataUri("data:x".into()), None).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn pointer_focuses_and_clears() {
        let (mut s, para) = session("ab");
        let image = s.tree.create_image("a.png");
        s.tree.append_child(para, image).unwrap();

        s.on_pointer_down(&PointerEvent::new(image));
        assert_eq!(s.focused_image(), Some(image));
        s.on_pointer_down(&PointerEvent::new(para));
        assert_eq!(s.focused_image(), None);
        assert!(!s.tree.has_marker(image, Marker::ImageSelected));
    }

    #[test]
    fn file_source_sniffs_mime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pic.bin");
        std::fs::write(&path, [0x89, 0x50, 0x4E, 0x47, 0x0D]).unwrap();
        match ImageSource::from_path(&path).unwrap() {
            ImageSource::Bytes { mime, bytes } => {
                assert_eq!(mime, "image/png");
                assert_eq!(bytes.len(), 5);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(ImageSource::from_path(dir.path().join("missing.png")).is_err());
    }
}
