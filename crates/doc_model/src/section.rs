//! Page sections

use serde::{Deserialize, Serialize};

/// The three editable regions of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Header,
    Body,
    Footer,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [SectionKind::Header, SectionKind::Body, SectionKind::Footer];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Body => "body",
            SectionKind::Footer => "footer",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
