//! Host input events
//!
//! The host shell translates its native keyboard and pointer events into these
//! types before handing them to the session, and applies the returned verdict
//! (prevent the native default or not).

use doc_model::NodeId;
use serde::{Deserialize, Serialize};

/// Keys the editing core distinguishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Tab,
    Backspace,
    Delete,
    Character(char),
    /// Any other named key ("ArrowLeft", "Escape", ...)
    Other(String),
}

/// Modifier keys held during an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }

    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// A keydown delivered to an editable region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    /// The editable region the listener is bound to
    pub current_target: Option<NodeId>,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
            current_target: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn in_host(mut self, host: NodeId) -> Self {
        self.current_target = Some(host);
        self
    }
}

/// A pointer press on a node of the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub target: NodeId,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Kind of a `beforeinput` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputType {
    InsertText,
    Other(String),
}

/// A `beforeinput` event, delivered before the host applies native input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeforeInputEvent {
    pub input_type: InputType,
    pub data: Option<String>,
}

impl BeforeInputEvent {
    pub fn insert_text(data: impl Into<String>) -> Self {
        Self {
            input_type: InputType::InsertText,
            data: Some(data.into()),
        }
    }
}

/// Outcome of a keydown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeydownResult {
    /// The core applied the edit; the host must prevent its default action
    Handled,
    /// The core prepared the selection (an atomic object is selected) and
    /// native handling must run to perform the deletion
    PassThrough,
    /// The core did nothing; native handling proceeds
    NotHandled,
}

impl KeydownResult {
    pub fn prevents_default(&self) -> bool {
        matches!(self, KeydownResult::Handled)
    }
}
