pub mod apply;
pub mod init;
pub mod inspect;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use inspect::{inspect, InspectArgs};

use crate::config::Config;
use anyhow::{Context, Result};
use pagecraft_editor::{Document, DocumentStore};
use std::path::Path;

/// Load a document file into a fresh store
pub(crate) fn open_document(path: &Path, config: &Config) -> Result<DocumentStore> {
    let document = Document::load(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let store = DocumentStore::with_document(config.editor.clone(), document)
        .with_context(|| format!("Invalid document {}", path.display()))?;
    Ok(store)
}

/// Write a document the way the config asks for
pub(crate) fn write_document(path: &Path, document: &Document, config: &Config) -> Result<()> {
    let json = if config.pretty {
        document.to_json_pretty()?
    } else {
        document.to_json()?
    };
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
