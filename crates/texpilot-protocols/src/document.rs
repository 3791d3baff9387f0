//! Host document protocol.
//!
//! The page agent only touches the editor page through this trait: element
//! lookup by selector, the selection, one insertion command and an event
//! stream carrying mutation and selection-change notifications.

use tokio::sync::broadcast;

use crate::error::DomError;

/// Notification emitted by a host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    /// The element tree changed.
    Mutation,
    /// The text selection moved.
    SelectionChange,
}

/// A document hosting the editor surface.
pub trait HostDocument: Send + Sync + 'static {
    /// Opaque selection range. Cloning yields an independent snapshot.
    type Range: Clone + Send + Sync + 'static;

    /// Whether an element matching `selector` exists.
    fn exists(&self, selector: &str) -> bool;

    /// Whether an element matching `selector` exists inside the first element
    /// matching `scope`.
    fn exists_within(&self, scope: &str, selector: &str) -> bool;

    /// First range of the current selection, if any.
    fn current_range(&self) -> Option<Self::Range>;

    /// A collapsed range at the start of the first element matching
    /// `selector` inside the first element matching `scope`.
    fn range_at_start_within(&self, scope: &str, selector: &str) -> Option<Self::Range>;

    /// Replace the current selection with `range`.
    fn set_selection(&self, range: &Self::Range) -> Result<(), DomError>;

    /// Insert `text` at the current selection, replacing it.
    fn insert_text(&self, text: &str) -> Result<(), DomError>;

    /// Subscribe to document events.
    fn subscribe(&self) -> broadcast::Receiver<DocumentEvent>;
}
