//! # Clipboard
//!
//! Copy, cut and paste of a component subtree. The clipboard holds one
//! subtree at a time, matching the store's single selection.
//!
//! - Copy keeps a deep clone of the node; history is not touched
//! - Paste inserts a clone whose every node has a fresh id, so the same
//!   content can be pasted any number of times
//! - A cut removes the original only after a successful paste, and the add
//!   and remove form one undo step

use crate::errors::{EditorError, MutationError};
use crate::locator;
use crate::mutations::Mutation;
use crate::store::DocumentStore;
use pagecraft_model::ComponentNode;

#[derive(Debug, Clone)]
struct Clip {
    node: ComponentNode,

    /// Original node to remove on paste, for a cut
    cut_from: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    clip: Option<Clip>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.clip.is_none()
    }

    /// The node that would be pasted (with its original ids)
    pub fn peek(&self) -> Option<&ComponentNode> {
        self.clip.as_ref().map(|clip| &clip.node)
    }

    /// True if the next paste will also remove the original
    pub fn is_cut(&self) -> bool {
        self.clip.as_ref().is_some_and(|clip| clip.cut_from.is_some())
    }

    pub fn clear(&mut self) {
        self.clip = None;
    }

    pub fn copy(&mut self, store: &DocumentStore, id: &str) -> Result<(), EditorError> {
        self.clip = Some(Clip {
            node: Self::take(store, id)?,
            cut_from: None,
        });
        Ok(())
    }

    pub fn cut(&mut self, store: &DocumentStore, id: &str) -> Result<(), EditorError> {
        self.clip = Some(Clip {
            node: Self::take(store, id)?,
            cut_from: Some(id.to_string()),
        });
        Ok(())
    }

    fn take(store: &DocumentStore, id: &str) -> Result<ComponentNode, EditorError> {
        store
            .find(id)
            .cloned()
            .ok_or_else(|| MutationError::NodeNotFound(id.to_string()).into())
    }

    /// Paste under `parent_id` (root level for `None`) at `index`, returning
    /// the id of the pasted root
    pub fn paste(
        &mut self,
        store: &mut DocumentStore,
        parent_id: Option<&str>,
        index: Option<usize>,
    ) -> Result<String, EditorError> {
        let clip = self.clip.as_ref().ok_or(EditorError::EmptyClipboard)?;

        if let (Some(source), Some(parent_id)) = (clip.cut_from.as_deref(), parent_id) {
            let inside_source = source == parent_id
                || store
                    .find(source)
                    .is_some_and(|node| locator::is_descendant_of(node, parent_id));
            if inside_source {
                return Err(MutationError::CircularReparent {
                    node_id: source.to_string(),
                    parent_id: parent_id.to_string(),
                }
                .into());
            }
        }

        let description = if clip.cut_from.is_some() { "Cut and paste" } else { "Paste" };
        let mut node = clip.node.clone();
        let cut_from = clip.cut_from.clone();

        let pasted_id = store.batch(description, |batch| {
            batch.assign_fresh_ids(&mut node);
            let pasted_id = node.id.clone();

            batch.apply(Mutation::AddComponent {
                node,
                parent_id: parent_id.map(str::to_string),
                index,
            })?;

            if let Some(source) = cut_from {
                if locator::find(&batch.document().components, &source).is_some() {
                    batch.apply(Mutation::RemoveComponent { node_id: source })?;
                }
            }

            Ok(pasted_id)
        })?;

        // After a cut has been pasted once, further pastes are plain copies
        if let Some(clip) = &mut self.clip {
            clip.cut_from = None;
        }

        Ok(pasted_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use pagecraft_model::Document;

    fn store() -> DocumentStore {
        let doc = Document::with_components(vec![
            ComponentNode::new("card", "container")
                .with_child(ComponentNode::new("title", "heading").with_prop("text", "Hi")),
            ComponentNode::new("sidebar", "container"),
        ]);
        DocumentStore::with_document(EditorConfig::default(), doc).unwrap()
    }

    #[test]
    fn test_copy_paste_creates_independent_clone() {
        let mut store = store();
        let mut clipboard = Clipboard::new();

        clipboard.copy(&store, "card").unwrap();
        let pasted = clipboard.paste(&mut store, Some("sidebar"), None).unwrap();

        let sidebar = store.find("sidebar").unwrap();
        assert_eq!(sidebar.children[0].id, pasted);
        assert_ne!(sidebar.children[0].children[0].id, "title");
        assert_eq!(sidebar.children[0].children[0].props["text"], "Hi");
        assert!(store.find("card").is_some());
        assert_eq!(store.history().undo_description(), Some("Paste"));
    }

    #[test]
    fn test_paste_twice_gives_distinct_ids() {
        let mut store = store();
        let mut clipboard = Clipboard::new();

        clipboard.copy(&store, "title").unwrap();
        let first = clipboard.paste(&mut store, None, None).unwrap();
        let second = clipboard.paste(&mut store, None, None).unwrap();

        assert_ne!(first, second);
        assert!(locator::validate(store.document()).is_ok());
    }

    #[test]
    fn test_cut_paste_moves_in_one_step() {
        let mut store = store();
        let mut clipboard = Clipboard::new();

        clipboard.cut(&store, "title").unwrap();
        assert!(clipboard.is_cut());
        assert!(store.find("title").is_some());

        clipboard.paste(&mut store, Some("sidebar"), Some(0)).unwrap();
        assert!(store.find("title").is_none());
        assert_eq!(store.find("sidebar").unwrap().children.len(), 1);
        assert!(!clipboard.is_cut());

        assert!(store.undo());
        assert!(store.find("title").is_some());
        assert!(store.find("sidebar").unwrap().children.is_empty());
    }

    #[test]
    fn test_cut_paste_into_own_subtree_fails() {
        let mut store = store();
        let mut clipboard = Clipboard::new();

        clipboard.cut(&store, "card").unwrap();
        let err = clipboard.paste(&mut store, Some("title"), None).unwrap_err();

        assert!(matches!(err, EditorError::Mutation(MutationError::CircularReparent { .. })));
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_copy_replaces_previous_clip() {
        let store = store();
        let mut clipboard = Clipboard::new();

        clipboard.cut(&store, "title").unwrap();
        clipboard.copy(&store, "sidebar").unwrap();

        assert_eq!(clipboard.peek().map(|node| node.id.as_str()), Some("sidebar"));
        assert!(!clipboard.is_cut());
    }

    #[test]
    fn test_paste_empty_clipboard() {
        let mut store = store();
        let err = Clipboard::new().paste(&mut store, None, None).unwrap_err();
        assert!(matches!(err, EditorError::EmptyClipboard));
    }

    #[test]
    fn test_copy_missing_node() {
        let store = store();
        let mut clipboard = Clipboard::new();
        assert!(clipboard.copy(&store, "ghost").is_err());
        assert!(clipboard.is_empty());
    }
}
