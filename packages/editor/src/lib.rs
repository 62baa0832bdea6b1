//! # Pagecraft Editor
//!
//! In-memory editing engine for a page made of nested components.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ locator: find nodes and their sibling lists │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ mutations: copy-on-write tree edits         │
//! │  - add / update / remove                    │
//! │  - reparent / reorder / move / duplicate    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ history: bounded snapshot undo/redo         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: current document + history +         │
//! │        selection, one writer at a time      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Documents are values**: every edit yields a new document; old ones
//!    stay valid
//! 2. **Typed failures**: invalid edits return an error and change nothing
//! 3. **Containment is truth**: `parent_id` is recomputed, never trusted
//! 4. **Indices clamp**: out-of-range positions are pulled into range
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_editor::{DocumentStore, EditorConfig, ReorderDirection};
//! use pagecraft_model::{ComponentNode, Document};
//!
//! let page = Document::with_components(vec![ComponentNode::new("a", "box")]);
//! let mut store = DocumentStore::with_document(EditorConfig::default(), page)?;
//!
//! store.add_component(ComponentNode::new("b", "box"), None, None)?;
//! store.reorder_component("b", ReorderDirection::Top)?;
//! assert_eq!(store.document().root_ids(), vec!["b", "a"]);
//!
//! store.undo();
//! assert_eq!(store.document().root_ids(), vec!["a", "b"]);
//! # Ok::<(), pagecraft_editor::EditorError>(())
//! ```

mod clipboard;
mod config;
mod errors;
mod history;
pub mod locator;
mod mutations;
mod selection;
mod store;

pub use clipboard::Clipboard;
pub use config::{EditorConfig, DEFAULT_DUPLICATE_OFFSET, MAX_HISTORY};
pub use errors::{EditorError, MutationError, MutationResult};
pub use history::{History, HistoryEntry};
pub use mutations::{
    add_component, duplicate_component, move_component_to_index, relink_parents, remap_ids,
    remove_component, reorder_component, reparent_component, set_prop, set_style,
    update_component, Applied, Mutation, MutationContext, NodePatch, ReorderDirection,
};
pub use selection::Selection;
pub use store::{Batch, Commit, DocumentStore};

// Re-export model types for convenience
pub use pagecraft_model::{ComponentNode, Document, Geometry, IdGenerator, PropValue};
