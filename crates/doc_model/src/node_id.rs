//! Stable node identifiers

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a node in the editable tree.
///
/// Ids are random (UUID v4), assigned once when the node is created and never
/// reused, so a stored selection that names a removed node can be detected
/// instead of silently pointing somewhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Allocate a fresh id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parse an id previously produced by `Display`
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
