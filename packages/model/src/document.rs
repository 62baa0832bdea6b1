//! # Page Document
//!
//! A [`Document`] is the ordered list of root-level components plus page
//! metadata. Editing operations never look inside [`PageMeta`]; it is
//! carried through unchanged.

use crate::error::ModelError;
use crate::node::{ComponentNode, PropValue, Walk};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Canvas grid settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    pub enabled: bool,
    pub size: f64,
    pub snap_to_grid: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            size: 8.0,
            snap_to_grid: false,
        }
    }
}

/// Page-level metadata, opaque to editing operations
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageMeta {
    pub grid: GridConfig,

    /// Global stylesheet text applied to the whole page
    pub global_styles: String,

    /// Anything else the page carries
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, PropValue>,
}

/// Forest of root-level components plus page metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub components: Vec<ComponentNode>,

    #[serde(default)]
    pub meta: PageMeta,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_components(components: Vec<ComponentNode>) -> Self {
        Self {
            components,
            meta: PageMeta::default(),
        }
    }

    /// Pre-order walk over every node in the forest
    pub fn walk(&self) -> Walk<'_> {
        Walk::over(&self.components)
    }

    /// Total number of nodes at every depth
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Ids of the root-level components, in order
    pub fn root_ids(&self) -> Vec<&str> {
        self.components.iter().map(|node| node.id.as_str()).collect()
    }

    /// Parse a document of any nesting depth. The recursion limit is lifted
    /// and deep trees grow the stack on demand instead of overflowing it.
    pub fn from_json(source: &str) -> Result<Self, ModelError> {
        let mut json = serde_json::Deserializer::from_str(source);
        json.disable_recursion_limit();
        let document = Self::deserialize(serde_stacker::Deserializer::new(&mut json))?;
        json.end()?;
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a document from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    /// Write the document to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}
