//! # Pagecraft Model
//!
//! Data types for an editable page: a forest of [`ComponentNode`]s wrapped
//! in a [`Document`], plus the [`IdGenerator`] used to mint node ids.
//!
//! Everything here is plain data. Tree editing, validation and history live
//! in `pagecraft-editor`.

mod document;
mod error;
mod id_generator;
mod node;

pub use document::{Document, GridConfig, PageMeta};
pub use error::ModelError;
pub use id_generator::{seed_from_key, IdGenerator};
pub use node::{ComponentNode, Geometry, PropValue, Walk};
