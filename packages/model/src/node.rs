//! # Component Nodes
//!
//! A page is a forest of [`ComponentNode`]s. Each node exclusively owns its
//! `children`; dropping a node drops its whole subtree.
//!
//! `parent_id` is a derived back-reference. Containment in a `children` list
//! is what defines tree shape, and the editor recomputes `parent_id` after
//! every structural change.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Arbitrary JSON-like prop value (null, bool, number, string, list, map)
pub type PropValue = serde_json::Value;

/// Position and size of a node on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Same size, shifted by `offset` on both axes
    pub fn offset(&self, offset: f64) -> Self {
        Self {
            x: self.x + offset,
            y: self.y + offset,
            ..*self
        }
    }
}

/// A single editable unit of the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    /// Globally unique within a document
    pub id: String,

    /// What kind of component this is (opaque to the editor)
    pub type_id: String,

    /// Id of the node whose `children` contain this one, `None` at root level
    #[serde(default)]
    pub parent_id: Option<String>,

    #[serde(default)]
    pub children: Vec<ComponentNode>,

    #[serde(default)]
    pub props: BTreeMap<String, PropValue>,

    #[serde(default)]
    pub styles: BTreeMap<String, String>,

    #[serde(default)]
    pub geometry: Geometry,
}

impl ComponentNode {
    pub fn new(id: impl Into<String>, type_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_id: type_id.into(),
            parent_id: None,
            children: Vec::new(),
            props: BTreeMap::new(),
            styles: BTreeMap::new(),
            geometry: Geometry::default(),
        }
    }

    /// Append a child, pointing its `parent_id` at this node
    pub fn with_child(mut self, mut child: ComponentNode) -> Self {
        child.parent_id = Some(self.id.clone());
        self.children.push(child);
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Pre-order walk over this node and all of its descendants
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Ids of this node and every descendant, in pre-order
    pub fn subtree_ids(&self) -> Vec<String> {
        self.walk().map(|node| node.id.clone()).collect()
    }

    /// Number of nodes in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        self.walk().count()
    }
}

/// Pre-order iterator returned by [`ComponentNode::walk`] and
/// [`crate::Document::walk`]
pub struct Walk<'a> {
    stack: Vec<&'a ComponentNode>,
}

impl<'a> Walk<'a> {
    pub(crate) fn over(roots: &'a [ComponentNode]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a ComponentNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> ComponentNode {
        ComponentNode::new("card", "container")
            .with_child(
                ComponentNode::new("title", "heading").with_child(ComponentNode::new("icon", "image")),
            )
            .with_child(ComponentNode::new("body", "paragraph"))
    }

    #[test]
    fn test_with_child_sets_parent_id() {
        let node = card();
        assert_eq!(node.children[0].parent_id.as_deref(), Some("card"));
        assert_eq!(node.children[0].children[0].parent_id.as_deref(), Some("title"));
    }

    #[test]
    fn test_walk_is_pre_order() {
        let ids = card().subtree_ids();
        assert_eq!(ids, vec!["card", "title", "icon", "body"]);
    }

    #[test]
    fn test_geometry_offset_keeps_size() {
        let geometry = Geometry::new(10.0, 5.0, 100.0, 40.0).offset(20.0);
        assert_eq!(geometry, Geometry::new(30.0, 25.0, 100.0, 40.0));
    }

    #[test]
    fn test_node_json_uses_camel_case() {
        let node = ComponentNode::new("btn", "button")
            .with_prop("label", "Save")
            .with_style("color", "red");

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["typeId"], "button");
        assert_eq!(json["parentId"], serde_json::Value::Null);
        assert_eq!(json["props"]["label"], "Save");
        assert_eq!(json["styles"]["color"], "red");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let node: ComponentNode = serde_json::from_str(r#"{"id":"a","typeId":"box"}"#).unwrap();
        assert!(node.children.is_empty());
        assert!(node.props.is_empty());
        assert_eq!(node.geometry, Geometry::default());
    }
}
