//! # Undo/Redo History
//!
//! Linear, bounded history of full document snapshots.
//!
//! ## Design
//!
//! - Each committed edit records a complete copy of the resulting document
//! - Undo/redo only move `current_index`; no inverse operations exist
//! - Recording after an undo discards the redo branch
//! - When the cap is exceeded the oldest entries are evicted and
//!   `current_index` shifts down with them
//!
//! ## Example
//!
//! ```rust
//! use pagecraft_editor::History;
//! use pagecraft_model::{ComponentNode, Document};
//!
//! let mut history = History::new();
//! history.reset(&Document::new());
//!
//! let edited = Document::with_components(vec![ComponentNode::new("a", "box")]);
//! history.record_snapshot(&edited, Some("Add box"));
//!
//! assert_eq!(history.undo(), Some(&Document::new()));
//! assert_eq!(history.redo(), Some(&edited));
//! ```

use crate::config::MAX_HISTORY;
use chrono::{DateTime, Utc};
use pagecraft_model::Document;

/// One immutable point in history
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub document: Document,
    pub timestamp: DateTime<Utc>,
    pub description: Option<String>,
}

impl HistoryEntry {
    fn new(document: &Document, description: Option<&str>) -> Self {
        Self {
            document: document.clone(),
            timestamp: Utc::now(),
            description: description.map(str::to_string),
        }
    }
}

/// Bounded snapshot stack with a movable cursor
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,

    /// Index of the active entry; meaningless while `entries` is empty
    current_index: usize,

    /// Maximum number of entries kept (at least 1)
    max_entries: usize,
}

impl History {
    /// Create an empty history with the default cap
    pub fn new() -> Self {
        Self::with_max_entries(MAX_HISTORY)
    }

    /// Create an empty history keeping at most `max_entries` snapshots
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            current_index: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// Record `document` as the new active entry
    pub fn record_snapshot(&mut self, document: &Document, description: Option<&str>) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.current_index + 1);
        }
        self.entries.push(HistoryEntry::new(document, description));

        if self.entries.len() > self.max_entries {
            let evicted = self.entries.len() - self.max_entries;
            self.entries.drain(..evicted);
        }

        self.current_index = self.entries.len() - 1;
    }

    /// Step back one entry and return its document, or `None` at the start
    pub fn undo(&mut self) -> Option<&Document> {
        if !self.can_undo() {
            return None;
        }
        self.current_index -= 1;
        Some(&self.entries[self.current_index].document)
    }

    /// Step forward one entry and return its document, or `None` at the end
    pub fn redo(&mut self) -> Option<&Document> {
        if !self.can_redo() {
            return None;
        }
        self.current_index += 1;
        Some(&self.entries[self.current_index].document)
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.entries.len()
    }

    /// Replace all history with a single entry holding `document`
    pub fn reset(&mut self, document: &Document) {
        self.entries.clear();
        self.entries.push(HistoryEntry::new(document, None));
        self.current_index = 0;
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current_index = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.current_index)
        }
    }

    /// The active entry
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.current_index)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Label of the step `undo` would revert
    pub fn undo_description(&self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.entries[self.current_index].description.as_deref()
    }

    /// Label of the step `redo` would reapply
    pub fn redo_description(&self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.entries[self.current_index + 1].description.as_deref()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::ComponentNode;

    fn doc(ids: &[&str]) -> Document {
        Document::with_components(ids.iter().map(|id| ComponentNode::new(*id, "box")).collect())
    }

    #[test]
    fn test_history_creation() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.current_index(), None);
        assert_eq!(history.max_entries(), MAX_HISTORY);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_undo_redo() {
        let mut history = History::new();
        history.reset(&doc(&["a"]));
        history.record_snapshot(&doc(&["a", "b"]), Some("Add b"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.undo_description(), Some("Add b"));
        assert_eq!(history.undo(), Some(&doc(&["a"])));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo_description(), Some("Add b"));
        assert_eq!(history.redo(), Some(&doc(&["a", "b"])));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_record_after_undo_discards_redo_branch() {
        let mut history = History::new();
        history.reset(&doc(&[]));
        history.record_snapshot(&doc(&["a"]), None);
        history.record_snapshot(&doc(&["a", "b"]), None);

        history.undo();
        history.record_snapshot(&doc(&["c"]), None);

        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert_eq!(history.current().unwrap().document, doc(&["c"]));
        assert_eq!(history.undo(), Some(&doc(&["a"])));
    }

    #[test]
    fn test_cap_evicts_oldest_and_keeps_current() {
        let mut history = History::with_max_entries(3);
        history.reset(&doc(&[]));
        for id in ["a", "b", "c", "d"] {
            history.record_snapshot(&doc(&[id]), None);
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.current_index(), Some(2));
        assert_eq!(history.current().unwrap().document, doc(&["d"]));
        assert_eq!(history.entries()[0].document, doc(&["b"]));

        assert!(history.undo().is_some());
        assert!(history.undo().is_some());
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_zero_cap_is_raised_to_one() {
        let mut history = History::with_max_entries(0);
        history.record_snapshot(&doc(&["a"]), None);
        history.record_snapshot(&doc(&["b"]), None);

        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_record_into_empty_history() {
        let mut history = History::new();
        history.record_snapshot(&doc(&["a"]), Some("first"));

        assert_eq!(history.current_index(), Some(0));
        assert!(!history.can_undo());
        assert_eq!(history.undo_description(), None);
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.reset(&doc(&["a"]));
        history.clear();
        assert!(history.is_empty());
        assert!(history.current().is_none());
    }
}
