//! # Tree Mutations
//!
//! Copy-on-write operations on a [`Document`]. Every function takes the
//! current document by reference and returns a brand-new document; the input
//! is never touched, so anyone still holding the previous value keeps seeing
//! a valid previous-generation tree.
//!
//! ## Semantics
//!
//! ### Indices
//! - `index` / `new_index` arguments are clamped into `[0, len]`, never
//!   rejected. Drag-and-drop callers routinely overshoot.
//!
//! ### Reparent
//! - Fails if the node would become its own parent or ancestor
//! - Carries the whole subtree along unchanged
//!
//! ### Remove
//! - Removes the node and all descendants
//! - Returns the removed subtree so callers can react (selection cleanup)
//!
//! ### Duplicate
//! - Every node in the clone gets a fresh id, not just the clone root
//!
//! `parent_id` back-references are recomputed after each structural change
//! and are never read to decide where a node lives.

use crate::errors::{MutationError, MutationResult};
use crate::locator::{self, children_mut, collect_ids, find, find_container, find_container_mut, find_mut};
use pagecraft_model::{ComponentNode, Document, Geometry, IdGenerator, PropValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Where `reorder_component` moves a node within its sibling list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderDirection {
    Up,
    Down,
    Top,
    Bottom,
}

/// Partial update for a node. Each provided field replaces the node's field
/// wholesale; `id`, `parent_id` and `children` are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<BTreeMap<String, PropValue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
}

impl NodePatch {
    pub fn type_id(mut self, type_id: impl Into<String>) -> Self {
        self.type_id = Some(type_id.into());
        self
    }

    pub fn props(mut self, props: BTreeMap<String, PropValue>) -> Self {
        self.props = Some(props);
        self
    }

    pub fn styles(mut self, styles: BTreeMap<String, String>) -> Self {
        self.styles = Some(styles);
        self
    }

    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.type_id.is_none()
            && self.props.is_none()
            && self.styles.is_none()
            && self.geometry.is_none()
    }

    fn apply_to(&self, node: &mut ComponentNode) {
        if let Some(type_id) = &self.type_id {
            node.type_id = type_id.clone();
        }
        if let Some(props) = &self.props {
            node.props = props.clone();
        }
        if let Some(styles) = &self.styles {
            node.styles = styles.clone();
        }
        if let Some(geometry) = self.geometry {
            node.geometry = geometry;
        }
    }
}

/// Insert `node` under `parent_id` (or at root level), at `index` or at the
/// end.
pub fn add_component(
    doc: &Document,
    node: ComponentNode,
    parent_id: Option<&str>,
    index: Option<usize>,
) -> MutationResult<Document> {
    if let Some(parent_id) = parent_id {
        find(&doc.components, parent_id)
            .ok_or_else(|| MutationError::ParentNotFound(parent_id.to_string()))?;
    }

    check_new_ids(doc, &node)?;

    let mut next = doc.clone();
    let siblings = children_mut(&mut next.components, parent_id)
        .ok_or_else(|| MutationError::ParentNotFound(parent_id.unwrap_or_default().to_string()))?;

    let mut node = node;
    node.parent_id = parent_id.map(str::to_string);
    relink(&mut node);
    insert_clamped(siblings, index, node);

    Ok(next)
}

/// Ids in `node`'s subtree must be unique among themselves and unused in
/// `doc`
fn check_new_ids(doc: &Document, node: &ComponentNode) -> MutationResult<()> {
    let existing = collect_ids(&doc.components);
    let mut incoming = HashSet::new();
    for n in node.walk() {
        if existing.contains(&n.id) || !incoming.insert(n.id.as_str()) {
            return Err(MutationError::DuplicateId(n.id.clone()));
        }
    }
    Ok(())
}

/// Shallow-merge `patch` into the node with `id`
pub fn update_component(doc: &Document, id: &str, patch: &NodePatch) -> MutationResult<Document> {
    edit_node(doc, id, |node| patch.apply_to(node))
}

/// Set (`Some`) or delete (`None`) a single prop
pub fn set_prop(
    doc: &Document,
    id: &str,
    key: &str,
    value: Option<PropValue>,
) -> MutationResult<Document> {
    edit_node(doc, id, |node| match value {
        Some(value) => {
            node.props.insert(key.to_string(), value);
        }
        None => {
            node.props.remove(key);
        }
    })
}

/// Set (`Some`) or delete (`None`) a single style property
pub fn set_style(
    doc: &Document,
    id: &str,
    property: &str,
    value: Option<String>,
) -> MutationResult<Document> {
    edit_node(doc, id, |node| match value {
        Some(value) => {
            node.styles.insert(property.to_string(), value);
        }
        None => {
            node.styles.remove(property);
        }
    })
}

fn edit_node(
    doc: &Document,
    id: &str,
    edit: impl FnOnce(&mut ComponentNode),
) -> MutationResult<Document> {
    let mut next = doc.clone();
    let node = find_mut(&mut next.components, id)
        .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;
    edit(node);
    Ok(next)
}

/// Remove the node with `id` and its whole subtree. Returns the new document
/// and the detached node.
pub fn remove_component(doc: &Document, id: &str) -> MutationResult<(Document, ComponentNode)> {
    let mut next = doc.clone();
    let (siblings, index) = find_container_mut(&mut next.components, id)
        .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;
    let removed = siblings.remove(index);
    Ok((next, removed))
}

/// Move the node with `id` (and its subtree) under `new_parent_id`, or to
/// the root list when `None`.
pub fn reparent_component(
    doc: &Document,
    id: &str,
    new_parent_id: Option<&str>,
    index: Option<usize>,
) -> MutationResult<Document> {
    check_reparent(doc, id, new_parent_id)?;

    let mut next = doc.clone();
    let (siblings, current) = find_container_mut(&mut next.components, id)
        .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;
    let detached = siblings.remove(current);

    let destination = children_mut(&mut next.components, new_parent_id).ok_or_else(|| {
        MutationError::ParentNotFound(new_parent_id.unwrap_or_default().to_string())
    })?;
    insert_clamped(destination, index, detached);
    relink_parents(&mut next);

    Ok(next)
}

fn check_reparent(doc: &Document, id: &str, new_parent_id: Option<&str>) -> MutationResult<()> {
    let node = find(&doc.components, id).ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;

    if let Some(parent_id) = new_parent_id {
        if parent_id == id {
            return Err(MutationError::SelfReparent(id.to_string()));
        }
        if locator::is_descendant_of(node, parent_id) {
            return Err(MutationError::CircularReparent {
                node_id: id.to_string(),
                parent_id: parent_id.to_string(),
            });
        }
        find(&doc.components, parent_id)
            .ok_or_else(|| MutationError::ParentNotFound(parent_id.to_string()))?;
    }
    Ok(())
}

/// Move a node one step or all the way within its own sibling list
pub fn reorder_component(
    doc: &Document,
    id: &str,
    direction: ReorderDirection,
) -> MutationResult<Document> {
    let mut next = doc.clone();
    let (siblings, current) = find_container_mut(&mut next.components, id)
        .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;

    let len = siblings.len();
    let target = match direction {
        ReorderDirection::Up => current.saturating_sub(1),
        ReorderDirection::Down => (current + 1).min(len),
        ReorderDirection::Top => 0,
        ReorderDirection::Bottom => len,
    };
    move_within(siblings, current, target);

    Ok(next)
}

/// Move a node to `new_index` within its own sibling list
pub fn move_component_to_index(doc: &Document, id: &str, new_index: usize) -> MutationResult<Document> {
    let mut next = doc.clone();
    let (siblings, current) = find_container_mut(&mut next.components, id)
        .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;

    let target = new_index.min(siblings.len());
    move_within(siblings, current, target);

    Ok(next)
}

/// Deep-clone the node with `id` and insert the clone right after it.
///
/// Every node in the clone gets a fresh id from `ids` and the clone root is
/// shifted by `offset` on both axes. Returns the new document and the id of
/// the clone root.
pub fn duplicate_component(
    doc: &Document,
    id: &str,
    ids: &mut IdGenerator,
    offset: f64,
) -> MutationResult<(Document, String)> {
    let location = find_container(&doc.components, id)
        .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;

    let mut taken = collect_ids(&doc.components);
    let mut clone = location.node().clone();
    remap_ids(&mut clone, ids, &mut taken);
    clone.geometry = clone.geometry.offset(offset);

    let clone_id = clone.id.clone();
    let next = add_component(doc, clone, location.parent_id, Some(location.index + 1))?;
    Ok((next, clone_id))
}

/// Give every node in `node`'s subtree a fresh id not present in `taken`,
/// keeping child `parent_id`s consistent.
pub fn remap_ids(node: &mut ComponentNode, ids: &mut IdGenerator, taken: &mut HashSet<String>) {
    node.id = ids.fresh_id(taken);
    for child in &mut node.children {
        remap_ids(child, ids, taken);
        child.parent_id = Some(node.id.clone());
    }
}

/// Recompute every `parent_id` in the document from containment
pub fn relink_parents(doc: &mut Document) {
    for node in &mut doc.components {
        node.parent_id = None;
        relink(node);
    }
}

fn relink(node: &mut ComponentNode) {
    for child in &mut node.children {
        child.parent_id = Some(node.id.clone());
        relink(child);
    }
}

fn insert_clamped(siblings: &mut Vec<ComponentNode>, index: Option<usize>, node: ComponentNode) {
    let at = index.map_or(siblings.len(), |index| index.min(siblings.len()));
    siblings.insert(at, node);
}

fn move_within(siblings: &mut Vec<ComponentNode>, from: usize, to: usize) {
    let node = siblings.remove(from);
    let at = to.min(siblings.len());
    siblings.insert(at, node);
}

/// Named editing commands: one variant per tree operation.
///
/// This is what a UI toolbar, a keyboard shortcut or a script sends to the
/// store. Serialized form is tagged by `"type"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    AddComponent {
        node: ComponentNode,
        #[serde(default)]
        parent_id: Option<String>,
        #[serde(default)]
        index: Option<usize>,
    },

    UpdateComponent {
        node_id: String,
        patch: NodePatch,
    },

    /// `value: null` deletes the prop
    SetProp {
        node_id: String,
        key: String,
        #[serde(default)]
        value: Option<PropValue>,
    },

    /// `value: null` deletes the style property
    SetStyle {
        node_id: String,
        property: String,
        #[serde(default)]
        value: Option<String>,
    },

    RemoveComponent {
        node_id: String,
    },

    ReparentComponent {
        node_id: String,
        #[serde(default)]
        new_parent_id: Option<String>,
        #[serde(default)]
        index: Option<usize>,
    },

    ReorderComponent {
        node_id: String,
        direction: ReorderDirection,
    },

    MoveComponentToIndex {
        node_id: String,
        index: usize,
    },

    DuplicateComponent {
        node_id: String,
    },
}

/// Inputs a mutation may need besides the document
pub struct MutationContext<'a> {
    pub ids: &'a mut IdGenerator,
    pub duplicate_offset: f64,
}

/// Outcome of a successful [`Mutation::apply`]
#[derive(Debug, Clone)]
pub struct Applied {
    pub document: Document,

    /// Every id that left the document (removed node and its subtree)
    pub removed_ids: Vec<String>,

    /// Root id of a node created by the mutation (duplicate)
    pub created_id: Option<String>,
}

impl Applied {
    fn document(document: Document) -> Self {
        Self {
            document,
            removed_ids: Vec::new(),
            created_id: None,
        }
    }
}

impl Mutation {
    /// Apply the mutation to `doc`, producing a new document
    pub fn apply(&self, doc: &Document, ctx: &mut MutationContext<'_>) -> MutationResult<Applied> {
        match self {
            Mutation::AddComponent { node, parent_id, index } => {
                add_component(doc, node.clone(), parent_id.as_deref(), *index).map(Applied::document)
            }

            Mutation::UpdateComponent { node_id, patch } => {
                update_component(doc, node_id, patch).map(Applied::document)
            }

            Mutation::SetProp { node_id, key, value } => {
                set_prop(doc, node_id, key, value.clone()).map(Applied::document)
            }

            Mutation::SetStyle { node_id, property, value } => {
                set_style(doc, node_id, property, value.clone()).map(Applied::document)
            }

            Mutation::RemoveComponent { node_id } => {
                let (document, removed) = remove_component(doc, node_id)?;
                Ok(Applied {
                    document,
                    removed_ids: removed.subtree_ids(),
                    created_id: None,
                })
            }

            Mutation::ReparentComponent { node_id, new_parent_id, index } => {
                reparent_component(doc, node_id, new_parent_id.as_deref(), *index).map(Applied::document)
            }

            Mutation::ReorderComponent { node_id, direction } => {
                reorder_component(doc, node_id, *direction).map(Applied::document)
            }

            Mutation::MoveComponentToIndex { node_id, index } => {
                move_component_to_index(doc, node_id, *index).map(Applied::document)
            }

            Mutation::DuplicateComponent { node_id } => {
                let (document, clone_id) =
                    duplicate_component(doc, node_id, ctx.ids, ctx.duplicate_offset)?;
                Ok(Applied {
                    document,
                    removed_ids: Vec::new(),
                    created_id: Some(clone_id),
                })
            }
        }
    }

    /// Check whether the mutation would succeed, without building a new
    /// document
    pub fn validate(&self, doc: &Document) -> MutationResult<()> {
        let require = |id: &str| {
            find(&doc.components, id)
                .map(|_| ())
                .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))
        };

        match self {
            Mutation::AddComponent { node, parent_id, .. } => {
                if let Some(parent_id) = parent_id {
                    find(&doc.components, parent_id)
                        .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
                }
                check_new_ids(doc, node)
            }

            Mutation::ReparentComponent { node_id, new_parent_id, .. } => {
                check_reparent(doc, node_id, new_parent_id.as_deref())
            }

            Mutation::UpdateComponent { node_id, .. }
            | Mutation::SetProp { node_id, .. }
            | Mutation::SetStyle { node_id, .. }
            | Mutation::RemoveComponent { node_id }
            | Mutation::ReorderComponent { node_id, .. }
            | Mutation::MoveComponentToIndex { node_id, .. }
            | Mutation::DuplicateComponent { node_id } => require(node_id),
        }
    }

    /// Stable command name
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddComponent { .. } => "add_component",
            Mutation::UpdateComponent { .. } => "update_component",
            Mutation::SetProp { .. } => "set_prop",
            Mutation::SetStyle { .. } => "set_style",
            Mutation::RemoveComponent { .. } => "remove_component",
            Mutation::ReparentComponent { .. } => "reparent_component",
            Mutation::ReorderComponent { .. } => "reorder_component",
            Mutation::MoveComponentToIndex { .. } => "move_component_to_index",
            Mutation::DuplicateComponent { .. } => "duplicate_component",
        }
    }

    /// Default history label
    pub fn description(&self) -> String {
        match self {
            Mutation::AddComponent { node, .. } => format!("Add {}", node.type_id),
            Mutation::UpdateComponent { .. } => "Update component".to_string(),
            Mutation::SetProp { key, .. } => format!("Set {}", key),
            Mutation::SetStyle { property, .. } => format!("Set {}", property),
            Mutation::RemoveComponent { .. } => "Remove component".to_string(),
            Mutation::ReparentComponent { .. } => "Move component".to_string(),
            Mutation::ReorderComponent { direction, .. } => match direction {
                ReorderDirection::Up => "Move up".to_string(),
                ReorderDirection::Down => "Move down".to_string(),
                ReorderDirection::Top => "Bring to front".to_string(),
                ReorderDirection::Bottom => "Send to back".to_string(),
            },
            Mutation::MoveComponentToIndex { .. } => "Reorder component".to_string(),
            Mutation::DuplicateComponent { .. } => "Duplicate component".to_string(),
        }
    }

    /// Node the mutation targets (the added node for `AddComponent`)
    pub fn node_id(&self) -> &str {
        match self {
            Mutation::AddComponent { node, .. } => &node.id,
            Mutation::UpdateComponent { node_id, .. }
            | Mutation::SetProp { node_id, .. }
            | Mutation::SetStyle { node_id, .. }
            | Mutation::RemoveComponent { node_id }
            | Mutation::ReparentComponent { node_id, .. }
            | Mutation::ReorderComponent { node_id, .. }
            | Mutation::MoveComponentToIndex { node_id, .. }
            | Mutation::DuplicateComponent { node_id } => node_id,
        }
    }
}
