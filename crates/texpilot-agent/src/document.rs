//! In-process host document.

use std::collections::HashMap;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::debug;

use texpilot_protocols::document::{DocumentEvent, HostDocument};
use texpilot_protocols::error::DomError;

const EVENT_CAPACITY: usize = 64;

/// A selection over the document text, in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    pub fn collapsed(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Default)]
struct DocumentState {
    /// selector -> parent selector
    elements: HashMap<String, Option<String>>,
    text: String,
    selection: Option<TextRange>,
    read_only: bool,
    inserts: usize,
}

impl DocumentState {
    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn is_descendant(&self, selector: &str, scope: &str) -> bool {
        let mut parent = self.elements.get(selector).cloned().flatten();
        while let Some(p) = parent {
            if p == scope {
                return true;
            }
            parent = self.elements.get(&p).cloned().flatten();
        }
        false
    }
}

/// A document held entirely in memory.
///
/// Elements are identified by their selector and may be nested under a
/// parent. The editable text is a single buffer addressed by [`TextRange`].
/// Every structural change emits [`DocumentEvent::Mutation`] and every
/// selection move emits [`DocumentEvent::SelectionChange`].
#[derive(Debug)]
pub struct MemoryDocument {
    state: Mutex<DocumentState>,
    events: broadcast::Sender<DocumentEvent>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Mutex::new(DocumentState::default()),
            events,
        }
    }

    /// A document already showing a CodeMirror-style editor with `text`.
    pub fn with_editor(text: &str) -> Self {
        let doc = Self::new();
        {
            let mut state = doc.state.lock();
            state.elements.insert(".cm-editor".to_string(), None);
            state
                .elements
                .insert(".cm-content".to_string(), Some(".cm-editor".to_string()));
            state
                .elements
                .insert(".cm-cursor".to_string(), Some(".cm-editor".to_string()));
            state.text = text.to_string();
        }
        doc
    }

    pub fn add_element(&self, selector: &str, parent: Option<&str>) {
        self.state
            .lock()
            .elements
            .insert(selector.to_string(), parent.map(str::to_string));
        self.emit(DocumentEvent::Mutation);
    }

    /// Remove `selector` and everything nested under it.
    pub fn remove_element(&self, selector: &str) {
        {
            let mut state = self.state.lock();
            let doomed: Vec<String> = state
                .elements
                .keys()
                .filter(|s| s.as_str() == selector || state.is_descendant(s, selector))
                .cloned()
                .collect();
            for s in doomed {
                state.elements.remove(&s);
            }
        }
        self.emit(DocumentEvent::Mutation);
    }

    pub fn set_text(&self, text: &str) {
        {
            let mut state = self.state.lock();
            state.text = text.to_string();
            state.selection = None;
        }
        self.emit(DocumentEvent::Mutation);
    }

    pub fn text(&self) -> String {
        self.state.lock().text.clone()
    }

    pub fn selection(&self) -> Option<TextRange> {
        self.state.lock().selection
    }

    /// Move the selection, as a user clicking in the editor would.
    pub fn select(&self, range: TextRange) {
        self.state.lock().selection = Some(range);
        self.emit(DocumentEvent::SelectionChange);
    }

    /// Make every following insertion fail.
    pub fn set_read_only(&self, read_only: bool) {
        self.state.lock().read_only = read_only;
    }

    /// Number of successful insertion commands so far.
    pub fn insert_count(&self) -> usize {
        self.state.lock().inserts
    }

    /// Number of live event subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    fn emit(&self, event: DocumentEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HostDocument for MemoryDocument {
    type Range = TextRange;

    fn exists(&self, selector: &str) -> bool {
        self.state.lock().elements.contains_key(selector)
    }

    fn exists_within(&self, scope: &str, selector: &str) -> bool {
        let state = self.state.lock();
        state.elements.contains_key(scope) && state.is_descendant(selector, scope)
    }

    fn current_range(&self) -> Option<TextRange> {
        self.state.lock().selection
    }

    fn range_at_start_within(&self, scope: &str, selector: &str) -> Option<TextRange> {
        self.exists_within(scope, selector)
            .then(|| TextRange::collapsed(0))
    }

    fn set_selection(&self, range: &TextRange) -> Result<(), DomError> {
        {
            let mut state = self.state.lock();
            let len = state.char_len();
            state.selection = Some(TextRange::new(range.start.min(len), range.end.min(len)));
        }
        self.emit(DocumentEvent::SelectionChange);
        Ok(())
    }

    fn insert_text(&self, text: &str) -> Result<(), DomError> {
        {
            let mut state = self.state.lock();
            if state.read_only {
                return Err(DomError::InsertFailed("document is read-only".to_string()));
            }
            let range = state.selection.ok_or(DomError::NoSelection)?;
            let len = state.char_len();
            let start = range.start.min(len);
            let end = range.end.min(len);
            let (from, to) = (state.byte_offset(start), state.byte_offset(end));
            state.text.replace_range(from..to, text);

            let caret = start + text.chars().count();
            state.selection = Some(TextRange::collapsed(caret));
            state.inserts += 1;
            debug!(start, end, inserted = text.len(), "Inserted text");
        }
        self.emit(DocumentEvent::Mutation);
        self.emit(DocumentEvent::SelectionChange);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<DocumentEvent> {
        self.events.subscribe()
    }
}
