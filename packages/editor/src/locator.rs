//! # Locator
//!
//! Read-only recursive search over a component forest.
//!
//! Search order is pre-order depth first: root nodes in order, each node
//! before its children, children in order. All lookups are O(nodes).

use crate::errors::EditorError;
use pagecraft_model::{ComponentNode, Document};
use std::collections::HashSet;

/// Where a node sits: the sibling list that directly contains it
#[derive(Debug, Clone, Copy)]
pub struct Location<'a> {
    /// Root list or some ancestor's `children`
    pub siblings: &'a [ComponentNode],

    /// Position of the node within `siblings`
    pub index: usize,

    /// Owner of `siblings`, `None` for the root list
    pub parent_id: Option<&'a str>,
}

impl<'a> Location<'a> {
    pub fn node(&self) -> &'a ComponentNode {
        &self.siblings[self.index]
    }
}

/// Find a node by id anywhere in the forest
pub fn find<'a>(forest: &'a [ComponentNode], id: &str) -> Option<&'a ComponentNode> {
    for node in forest {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Find the sibling list containing `id` and the node's index in it
pub fn find_container<'a>(forest: &'a [ComponentNode], id: &str) -> Option<Location<'a>> {
    find_container_in(forest, None, id)
}

fn find_container_in<'a>(
    siblings: &'a [ComponentNode],
    parent_id: Option<&'a str>,
    id: &str,
) -> Option<Location<'a>> {
    if let Some(index) = siblings.iter().position(|node| node.id == id) {
        return Some(Location {
            siblings,
            index,
            parent_id,
        });
    }

    siblings
        .iter()
        .find_map(|node| find_container_in(&node.children, Some(node.id.as_str()), id))
}

/// True if `target_id` is somewhere below `ancestor` (not `ancestor` itself)
pub fn is_descendant_of(ancestor: &ComponentNode, target_id: &str) -> bool {
    ancestor
        .children
        .iter()
        .any(|child| child.id == target_id || is_descendant_of(child, target_id))
}

/// Every id in the given nodes and their subtrees
pub fn collect_ids(nodes: &[ComponentNode]) -> HashSet<String> {
    let mut ids = HashSet::new();
    for node in nodes {
        ids.extend(node.walk().map(|n| n.id.clone()));
    }
    ids
}

/// Check the structural invariants of a document: ids are unique and every
/// `parent_id` names the node that actually contains it.
///
/// An owned tree cannot contain a cycle, so acyclicity needs no check here.
pub fn validate(doc: &Document) -> Result<(), EditorError> {
    let mut seen = HashSet::new();
    validate_siblings(&doc.components, None, &mut seen)
}

fn validate_siblings<'a>(
    siblings: &'a [ComponentNode],
    parent_id: Option<&str>,
    seen: &mut HashSet<&'a str>,
) -> Result<(), EditorError> {
    for node in siblings {
        if !seen.insert(node.id.as_str()) {
            return Err(EditorError::InvariantViolation(format!(
                "duplicate node id {}",
                node.id
            )));
        }

        if node.parent_id.as_deref() != parent_id {
            return Err(EditorError::InvariantViolation(format!(
                "node {} has parent_id {:?} but is contained by {:?}",
                node.id, node.parent_id, parent_id
            )));
        }

        validate_siblings(&node.children, Some(node.id.as_str()), seen)?;
    }
    Ok(())
}

pub(crate) fn find_mut<'a>(
    forest: &'a mut [ComponentNode],
    id: &str,
) -> Option<&'a mut ComponentNode> {
    for node in forest.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

pub(crate) fn find_container_mut<'a>(
    siblings: &'a mut Vec<ComponentNode>,
    id: &str,
) -> Option<(&'a mut Vec<ComponentNode>, usize)> {
    if let Some(index) = siblings.iter().position(|node| node.id == id) {
        return Some((siblings, index));
    }

    siblings
        .iter_mut()
        .find_map(|node| find_container_mut(&mut node.children, id))
}

/// The root list for `None`, otherwise the children of `parent_id`
pub(crate) fn children_mut<'a>(
    forest: &'a mut Vec<ComponentNode>,
    parent_id: Option<&str>,
) -> Option<&'a mut Vec<ComponentNode>> {
    match parent_id {
        None => Some(forest),
        Some(id) => find_mut(forest, id).map(|node| &mut node.children),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> Vec<ComponentNode> {
        vec![
            ComponentNode::new("a", "box")
                .with_child(ComponentNode::new("a1", "box").with_child(ComponentNode::new("a1x", "text")))
                .with_child(ComponentNode::new("a2", "text")),
            ComponentNode::new("b", "box").with_child(ComponentNode::new("b1", "text")),
        ]
    }

    #[test]
    fn test_find_at_every_depth() {
        let forest = forest();
        assert_eq!(find(&forest, "a").unwrap().type_id, "box");
        assert_eq!(find(&forest, "a1x").unwrap().id, "a1x");
        assert_eq!(find(&forest, "b1").unwrap().id, "b1");
        assert!(find(&forest, "zzz").is_none());
        assert!(find(&[], "a").is_none());
    }

    #[test]
    fn test_find_container_reports_siblings_and_owner() {
        let forest = forest();

        let root = find_container(&forest, "b").unwrap();
        assert_eq!(root.index, 1);
        assert_eq!(root.siblings.len(), 2);
        assert_eq!(root.parent_id, None);

        let nested = find_container(&forest, "a2").unwrap();
        assert_eq!(nested.index, 1);
        assert_eq!(nested.parent_id, Some("a"));
        assert_eq!(nested.node().id, "a2");

        assert!(find_container(&forest, "missing").is_none());
    }

    #[test]
    fn test_is_descendant_of() {
        let forest = forest();
        let a = &forest[0];

        assert!(is_descendant_of(a, "a1"));
        assert!(is_descendant_of(a, "a1x"));
        assert!(!is_descendant_of(a, "a"));
        assert!(!is_descendant_of(a, "b1"));
        assert!(!is_descendant_of(&a.children[1], "a1x"));
    }

    #[test]
    fn test_collect_ids() {
        let ids = collect_ids(&forest());
        assert_eq!(ids.len(), 6);
        assert!(ids.contains("a1x"));
    }

    #[test]
    fn test_validate_accepts_consistent_tree() {
        let doc = Document::with_components(forest());
        assert!(validate(&doc).is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let doc = Document::with_components(vec![
            ComponentNode::new("a", "box"),
            ComponentNode::new("b", "box").with_child(ComponentNode::new("a", "text")),
        ]);
        assert!(matches!(
            validate(&doc),
            Err(EditorError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_stale_parent_id() {
        let mut child = ComponentNode::new("c", "text");
        child.parent_id = Some("elsewhere".to_string());
        let mut parent = ComponentNode::new("p", "box");
        parent.children.push(child);

        let doc = Document::with_components(vec![parent]);
        assert!(validate(&doc).is_err());
    }

    #[test]
    fn test_children_mut_resolves_root_and_nested() {
        let mut forest = forest();
        assert_eq!(children_mut(&mut forest, None).unwrap().len(), 2);
        assert_eq!(children_mut(&mut forest, Some("a")).unwrap().len(), 2);
        assert!(children_mut(&mut forest, Some("nope")).is_none());

        let (siblings, index) = find_container_mut(&mut forest, "a1x").unwrap();
        assert_eq!(index, 0);
        assert_eq!(siblings.len(), 1);
    }
}
