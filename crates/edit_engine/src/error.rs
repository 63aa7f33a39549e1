//! Error types for editing operations
//!
//! Most editing entry points follow a "nothing happened" contract and report
//! failure as `false`/`None`. These errors surface only where a caller has to
//! react: image loading and settings files.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Document model error: {0}")]
    DocModel(#[from] doc_model::DocModelError),

    #[error("Selection rejected: {0}")]
    Selection(String),

    #[error("Failed to load image from {url}: {reason}")]
    ImageFetch { url: String, reason: String },

    #[error("Settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings format error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EditError>;
