//! Status area.

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// A message shown in the popup's status area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// Where the popup renders its status.
pub trait StatusSink: Send + Sync {
    fn show(&self, message: &StatusMessage);
    fn clear(&self);
}

/// A [`StatusSink`] that keeps the visible message in memory.
#[derive(Debug, Default)]
pub struct StatusBoard {
    current: Mutex<Option<StatusMessage>>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The message currently displayed, if any.
    pub fn current(&self) -> Option<StatusMessage> {
        self.current.lock().clone()
    }
}

impl StatusSink for StatusBoard {
    fn show(&self, message: &StatusMessage) {
        *self.current.lock() = Some(message.clone());
    }

    fn clear(&self) {
        *self.current.lock() = None;
    }
}
