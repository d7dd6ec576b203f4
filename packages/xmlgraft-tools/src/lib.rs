//! Formatting-aware editing operations over [`xmlgraft`] documents. The core crate
//! provides the raw mutations (append a child, set an attribute, detach a node); this
//! crate's [`Editor`] layers on the whitespace heuristics that make the result of an
//! edit look hand-written rather than machine-generated: inserted elements inherit the
//! indentation of their siblings, removed elements take their blank space with them, and
//! elements can be commented out and later restored without losing their formatting.

mod comment;
/// Errors to do with applying editing operations to documents.
pub mod error;
mod insert;
mod remove;

// Using this structure for ease of storing utility functions
#[cfg(test)]
pub mod tests;

use error::EditError;
use xmlgraft::{Document, WriteConfig};

/// An editor for performing high-level, formatting-aware mutations on documents. The
/// editor holds a snapshot of a [`WriteConfig`], which it uses both for serializing the
/// elements it comments out and for deriving indentation for the elements it inserts.
pub struct Editor {
    config: WriteConfig,
}
impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
impl Editor {
    /// Creates an editor with the default write configuration.
    pub fn new() -> Self {
        Self {
            config: WriteConfig::default(),
        }
    }
    /// Creates an editor holding the given write configuration.
    pub fn with_config(config: WriteConfig) -> Self {
        Self { config }
    }
    /// Gets the configuration snapshot this editor was built with.
    pub fn config(&self) -> &WriteConfig {
        &self.config
    }

    /// Creates a new document with a standard UTF-8 declaration and a single
    /// self-closing root element on its own line. This fails if the root name is empty
    /// or contains whitespace.
    pub fn create_document(&self, root_name: &str) -> Result<Document, EditError> {
        let mut doc = Document::new();
        doc.set_declaration(Some(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string(),
        ));
        let root = doc.create_self_closing_element(root_name)?;
        root.set_preceding_whitespace(&mut doc, "\n");
        doc.document_node().append_child(&mut doc, root);
        Ok(doc)
    }
}
