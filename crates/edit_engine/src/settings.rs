//! Editor settings
//!
//! Step sizes, limits and defaults used by the editing components. Settings
//! persist as JSON; every field has a default so partial files load.

use crate::Result;
use doc_model::{Border, CellTemplate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// All tunables of an editing session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorSettings {
    /// Number of non-breaking spaces in one tab marker
    pub tab_width: usize,
    /// Paragraph box and indentation settings
    pub paragraph: ParagraphSettings,
    /// Image and table resizing and sizing
    pub objects: ObjectSettings,
    /// New table defaults
    pub table: TableSettings,
    /// Content width assumed for paragraphs without an explicit width
    pub section_content_width: f32,
    /// Color of selection rings
    pub selection_color: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            tab_width: 4,
            paragraph: ParagraphSettings::default(),
            objects: ObjectSettings::default(),
            table: TableSettings::default(),
            section_content_width: 680.0,
            selection_color: "#0AEC0A".to_string(),
        }
    }
}

/// Paragraph box settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParagraphSettings {
    /// Width change per increase/decrease
    pub width_step: f32,
    /// Narrowest a paragraph box may get
    pub min_width: f32,
    /// Left offset change per indent/outdent
    pub indent_step: f32,
}

impl Default for ParagraphSettings {
    fn default() -> Self {
        Self {
            width_step: 30.0,
            min_width: 80.0,
            indent_step: 20.0,
        }
    }
}

/// Inline object (image, table) settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObjectSettings {
    pub grow_factor: f32,
    pub shrink_factor: f32,
    /// Resizing never goes below this width
    pub min_size: f32,
    /// Width given to newly inserted images
    pub default_image_width: f32,
}

impl Default for ObjectSettings {
    fn default() -> Self {
        Self {
            grow_factor: 1.1,
            shrink_factor: 0.9,
            min_size: 20.0,
            default_image_width: 300.0,
        }
    }
}

/// Table insertion settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableSettings {
    pub default_rows: usize,
    pub default_cols: usize,
    pub cell_min_width: f32,
    /// Vertical and horizontal cell padding
    pub cell_padding: (f32, f32),
    pub cell_border_color: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            default_rows: 2,
            default_cols: 2,
            cell_min_width: 110.0,
            cell_padding: (4.0, 8.0),
            cell_border_color: "#777".to_string(),
        }
    }
}

impl TableSettings {
    /// Cell construction template for new tables
    pub fn cell_template(&self) -> CellTemplate {
        CellTemplate {
            border: Border::new(1.0, self.cell_border_color.clone()),
            padding: self.cell_padding,
            min_width: self.cell_min_width,
        }
    }
}

impl EditorSettings {
    /// Load settings from a JSON file.
    ///
    /// A missing file yields defaults. A file that does not parse is reported
    /// and replaced by defaults; read errors propagate.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<EditorSettings>(&content) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse settings file {}, using defaults: {}",
                    path.display(),
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Write settings as pretty JSON, creating parent directories
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = EditorSettings::default();

        assert_eq!(settings.tab_width, 4);
        assert_eq!(settings.paragraph.width_step, 30.0);
        assert_eq!(settings.paragraph.min_width, 80.0);
        assert_eq!(settings.paragraph.indent_step, 20.0);
        assert_eq!(settings.objects.grow_factor, 1.1);
        assert_eq!(settings.objects.shrink_factor, 0.9);
        assert_eq!(settings.objects.min_size, 20.0);
        assert_eq!(settings.objects.default_image_width, 300.0);
        assert_eq!(settings.table.default_rows, 2);
        assert_eq!(settings.table.default_cols, 2);
        assert_eq!(settings.table.cell_min_width, 110.0);
        assert_eq!(settings.selection_color, "#0AEC0A");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("editor.json");

        let mut settings = EditorSettings::default();
        settings.tab_width = 8;
        settings.table.default_cols = 5;
        settings.save_to_path(&path).unwrap();

        let loaded = EditorSettings::load_from_path(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = EditorSettings::load_from_path(dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, EditorSettings::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("editor.json");
        std::fs::write(&path, "{ not json").unwrap();
        let loaded = EditorSettings::load_from_path(&path).unwrap();
        assert_eq!(loaded, EditorSettings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("editor.json");
        std::fs::write(&path, r#"{ "tab_width": 2, "paragraph": { "indent_step": 10.0 } }"#).unwrap();

        let loaded = EditorSettings::load_from_path(&path).unwrap();
        assert_eq!(loaded.tab_width, 2);
        assert_eq!(loaded.paragraph.indent_step, 10.0);
        assert_eq!(loaded.paragraph.width_step, 30.0);
        assert_eq!(loaded.objects, ObjectSettings::default());
    }

    #[test]
    fn test_cell_template() {
        let template = TableSettings::default().cell_template();
        assert_eq!(template.min_width, 110.0);
        assert_eq!(template.border.width, 1.0);
        assert_eq!(template.border.color, "#777");
    }
}
