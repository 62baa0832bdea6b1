//! # Document Store
//!
//! The one place an editor UI talks to. Holds the published document, its
//! undo/redo history and the transient selection.
//!
//! ## Lifecycle
//!
//! ```text
//! set_document → mutate … → undo / redo … → set_document / clear_document
//!      ↓             ↓              ↓
//!  history reset  snapshot     cursor moves
//! ```
//!
//! Every mutating call computes a new document, validates it, records a
//! history snapshot and only then publishes it. A rejected call leaves the
//! document, history and selection exactly as they were.

use crate::config::EditorConfig;
use crate::errors::{EditorError, MutationError};
use crate::history::History;
use crate::locator;
use crate::mutations::{relink_parents, remap_ids, Applied, Mutation, MutationContext, NodePatch, ReorderDirection};
use crate::selection::Selection;
use pagecraft_model::{ComponentNode, Document, IdGenerator, PropValue};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of a committed edit
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    /// Store version after the edit
    pub version: u64,

    /// Ids that left the document
    pub removed_ids: Vec<String>,

    /// Root id of a node the edit created (duplicate, paste)
    pub created_id: Option<String>,
}

/// Editable document plus history and selection
#[derive(Debug)]
pub struct DocumentStore {
    document: Arc<Document>,
    history: History,
    selection: Selection,
    ids: IdGenerator,
    config: EditorConfig,

    /// Bumped every time a new document is published
    version: u64,
}

impl DocumentStore {
    /// Empty store; history stays empty until a document is set or the first
    /// edit commits
    pub fn new(config: EditorConfig) -> Self {
        Self {
            document: Arc::new(Document::new()),
            history: History::with_max_entries(config.max_history),
            selection: Selection::default(),
            ids: IdGenerator::new(&config.id_seed),
            config,
            version: 0,
        }
    }

    /// Store holding `document` as its single history entry
    pub fn with_document(config: EditorConfig, document: Document) -> Result<Self, EditorError> {
        let mut store = Self::new(config);
        store.set_document(document)?;
        Ok(store)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Shared handle to the published document. It stays valid and
    /// unchanged after later edits.
    pub fn snapshot(&self) -> Arc<Document> {
        Arc::clone(&self.document)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn find(&self, id: &str) -> Option<&ComponentNode> {
        locator::find(&self.document.components, id)
    }

    pub fn selected_node(&self) -> Option<&ComponentNode> {
        self.selection.selected_id.as_deref().and_then(|id| self.find(id))
    }

    pub fn hovered_node(&self) -> Option<&ComponentNode> {
        self.selection.hovered_id.as_deref().and_then(|id| self.find(id))
    }

    /// Replace the document wholesale (page load). `parent_id`s are
    /// recomputed; duplicate ids reject the document.
    pub fn set_document(&mut self, document: Document) -> Result<(), EditorError> {
        let mut document = document;
        relink_parents(&mut document);

        if let Err(err) = locator::validate(&document) {
            warn!(error = %err, "rejected document");
            return Err(err);
        }

        self.history.reset(&document);
        self.selection.clear();
        self.publish(document);
        debug!(version = self.version, nodes = self.document.node_count(), "document set");
        Ok(())
    }

    /// Install an empty document and forget all history
    pub fn clear_document(&mut self) {
        self.history.clear();
        self.selection.clear();
        self.publish(Document::new());
        debug!(version = self.version, "document cleared");
    }

    /// Apply a mutation command, labelled with its default description
    pub fn apply(&mut self, mutation: Mutation) -> Result<Commit, EditorError> {
        let description = mutation.description();
        self.apply_described(mutation, &description)
    }

    /// Apply a mutation command with a custom history label
    pub fn apply_described(&mut self, mutation: Mutation, description: &str) -> Result<Commit, EditorError> {
        let mut ctx = MutationContext {
            ids: &mut self.ids,
            duplicate_offset: self.config.duplicate_offset,
        };

        let applied = match mutation.apply(&self.document, &mut ctx) {
            Ok(applied) => applied,
            Err(err) => {
                debug!(mutation = mutation.name(), node_id = mutation.node_id(), error = %err, "mutation rejected");
                return Err(err.into());
            }
        };

        let commit = self.commit(applied, description)?;
        debug!(
            mutation = mutation.name(),
            node_id = mutation.node_id(),
            version = commit.version,
            "mutation committed"
        );
        Ok(commit)
    }

    fn commit(&mut self, applied: Applied, description: &str) -> Result<Commit, EditorError> {
        locator::validate(&applied.document)?;

        if self.history.is_empty() {
            self.history.reset(&self.document);
        }
        self.history.record_snapshot(&applied.document, Some(description));

        self.selection.forget(&applied.removed_ids);
        self.publish(applied.document);

        Ok(Commit {
            version: self.version,
            removed_ids: applied.removed_ids,
            created_id: applied.created_id,
        })
    }

    fn publish(&mut self, document: Document) {
        self.document = Arc::new(document);
        self.version += 1;
    }

    pub fn add_component(
        &mut self,
        node: ComponentNode,
        parent_id: Option<&str>,
        index: Option<usize>,
    ) -> Result<Commit, EditorError> {
        self.apply(Mutation::AddComponent {
            node,
            parent_id: parent_id.map(str::to_string),
            index,
        })
    }

    pub fn update_component(&mut self, id: &str, patch: NodePatch) -> Result<Commit, EditorError> {
        self.apply(Mutation::UpdateComponent {
            node_id: id.to_string(),
            patch,
        })
    }

    pub fn set_prop(&mut self, id: &str, key: &str, value: Option<PropValue>) -> Result<Commit, EditorError> {
        self.apply(Mutation::SetProp {
            node_id: id.to_string(),
            key: key.to_string(),
            value,
        })
    }

    pub fn set_style(&mut self, id: &str, property: &str, value: Option<&str>) -> Result<Commit, EditorError> {
        self.apply(Mutation::SetStyle {
            node_id: id.to_string(),
            property: property.to_string(),
            value: value.map(str::to_string),
        })
    }

    /// Remove a node and its subtree, clearing selection/hover that pointed
    /// into it
    pub fn remove_component(&mut self, id: &str) -> Result<Commit, EditorError> {
        self.apply(Mutation::RemoveComponent {
            node_id: id.to_string(),
        })
    }

    pub fn reparent_component(
        &mut self,
        id: &str,
        new_parent_id: Option<&str>,
        index: Option<usize>,
    ) -> Result<Commit, EditorError> {
        self.apply(Mutation::ReparentComponent {
            node_id: id.to_string(),
            new_parent_id: new_parent_id.map(str::to_string),
            index,
        })
    }

    pub fn reorder_component(&mut self, id: &str, direction: ReorderDirection) -> Result<Commit, EditorError> {
        self.apply(Mutation::ReorderComponent {
            node_id: id.to_string(),
            direction,
        })
    }

    pub fn move_component_to_index(&mut self, id: &str, index: usize) -> Result<Commit, EditorError> {
        self.apply(Mutation::MoveComponentToIndex {
            node_id: id.to_string(),
            index,
        })
    }

    /// Duplicate a node next to itself and return the clone's id
    pub fn duplicate_component(&mut self, id: &str) -> Result<String, EditorError> {
        let commit = self.apply(Mutation::DuplicateComponent {
            node_id: id.to_string(),
        })?;
        commit
            .created_id
            .ok_or_else(|| EditorError::InvariantViolation(format!("duplicate of {} created no node", id)))
    }

    /// Step back one history entry. Returns `false` if there was nothing
    /// to undo.
    pub fn undo(&mut self) -> bool {
        let Some(document) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(document);
        debug!(version = self.version, index = ?self.history.current_index(), "undo");
        true
    }

    /// Step forward one history entry. Returns `false` if there was nothing
    /// to redo.
    pub fn redo(&mut self) -> bool {
        let Some(document) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(document);
        debug!(version = self.version, index = ?self.history.current_index(), "redo");
        true
    }

    fn restore(&mut self, document: Document) {
        self.selection.retain_existing(&document);
        self.publish(document);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Select a node (or nothing). Never touches history.
    pub fn select_node(&mut self, id: Option<&str>) -> Result<(), EditorError> {
        self.selection.selected_id = self.existing(id)?;
        Ok(())
    }

    /// Mark a node as hovered (or nothing). Never touches history.
    pub fn set_hovered(&mut self, id: Option<&str>) -> Result<(), EditorError> {
        self.selection.hovered_id = self.existing(id)?;
        Ok(())
    }

    fn existing(&self, id: Option<&str>) -> Result<Option<String>, EditorError> {
        match id {
            None => Ok(None),
            Some(id) if self.find(id).is_some() => Ok(Some(id.to_string())),
            Some(id) => Err(MutationError::NodeNotFound(id.to_string()).into()),
        }
    }

    /// Run several mutations as one undo step.
    ///
    /// The closure works on a private copy of the document. If it returns
    /// an error nothing is published or recorded; if it applies no mutation
    /// history is left alone.
    pub fn batch<T, F>(&mut self, description: &str, f: F) -> Result<T, EditorError>
    where
        F: FnOnce(&mut Batch<'_>) -> Result<T, EditorError>,
    {
        let mut batch = Batch {
            document: Document::clone(&self.document),
            applied: 0,
            ids: &mut self.ids,
            duplicate_offset: self.config.duplicate_offset,
        };

        let value = f(&mut batch)?;
        let Batch { document, applied, .. } = batch;

        if applied == 0 {
            return Ok(value);
        }

        locator::validate(&document)?;
        if self.history.is_empty() {
            self.history.reset(&self.document);
        }
        self.history.record_snapshot(&document, Some(description));
        self.selection.retain_existing(&document);
        self.publish(document);
        debug!(description, mutations = applied, version = self.version, "batch committed");

        Ok(value)
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

/// Working copy handed to [`DocumentStore::batch`]
pub struct Batch<'a> {
    document: Document,
    applied: usize,
    ids: &'a mut IdGenerator,
    duplicate_offset: f64,
}

impl Batch<'_> {
    /// Apply a mutation to the working copy; returns the created node id, if
    /// any
    pub fn apply(&mut self, mutation: Mutation) -> Result<Option<String>, EditorError> {
        let mut ctx = MutationContext {
            ids: &mut *self.ids,
            duplicate_offset: self.duplicate_offset,
        };
        let applied = mutation.apply(&self.document, &mut ctx)?;
        self.document = applied.document;
        self.applied += 1;
        Ok(applied.created_id)
    }

    /// Give every node in `node`'s subtree a fresh id unused in the working
    /// copy
    pub fn assign_fresh_ids(&mut self, node: &mut ComponentNode) {
        let mut taken = locator::collect_ids(&self.document.components);
        remap_ids(node, &mut *self.ids, &mut taken);
    }

    /// Current state of the working copy
    pub fn document(&self) -> &Document {
        &self.document
    }
}
