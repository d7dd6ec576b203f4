//! Insertion operations that derive their whitespace from the surrounding context, so a
//! freshly added element lines up with the siblings it joins.

use crate::error::EditError;
use crate::Editor;
use log::debug;
use xmlgraft::{Document, NodeId};

impl Editor {
    /// Adds a new childless element at the end of the given parent, indented to match
    /// its context. Without text content the element is written in self-closing
    /// `<name/>` form.
    pub fn add_element(
        &self,
        doc: &mut Document,
        parent: NodeId,
        name: &str,
    ) -> Result<NodeId, EditError> {
        self.add_element_full(doc, parent, name, None, false, false)
    }
    /// Adds a new element carrying the given text content at the end of the given
    /// parent, indented to match its context.
    pub fn add_element_with_text(
        &self,
        doc: &mut Document,
        parent: NodeId,
        name: &str,
        text: &str,
    ) -> Result<NodeId, EditError> {
        self.add_element_full(doc, parent, name, Some(text), false, false)
    }
    /// The full-control version of [`Self::add_element`]: optional text content, and
    /// optional blank lines before and after the new element.
    ///
    /// The new element's preceding whitespace is derived from the context, in priority
    /// order: the last existing child element's preceding run (so the new sibling lines
    /// up with the old ones); otherwise the parent's inner whitespace, if it has any;
    /// otherwise a newline, the parent's own indentation, and one configured indent
    /// unit. In the last case the parent's closing tag is also moved onto its own line,
    /// since the parent previously had everything on one line (or was self-closing).
    pub fn add_element_full(
        &self,
        doc: &mut Document,
        parent: NodeId,
        name: &str,
        text: Option<&str>,
        blank_before: bool,
        blank_after: bool,
    ) -> Result<NodeId, EditError> {
        let is_document = parent == doc.document_node();
        if !parent.is_element(doc) && !is_document {
            return Err(EditError::NotAnElement);
        }

        let parent_indent = indent_of(parent.preceding_whitespace(doc)).to_string();
        let last_child_ws = parent
            .child_elements(doc)
            .last()
            .map(|child| child.preceding_whitespace(doc).to_string());
        // Whether we had no context and invented the indentation ourselves
        let mut generated = false;
        let derived = match last_child_ws {
            Some(ws) => ws,
            None => {
                let inner = parent.inner_preceding_whitespace(doc).unwrap_or("");
                if !inner.is_empty() {
                    inner.to_string()
                } else if is_document {
                    // A top-level element just goes on its own line
                    "\n".to_string()
                } else {
                    generated = true;
                    format!("\n{}{}", parent_indent, self.config().indent_string())
                }
            }
        };
        let ws = if blank_before {
            format!("\n{derived}")
        } else {
            derived
        };

        let elem = match text {
            Some(text) => doc.create_element_with_text(name, text)?,
            None => doc.create_self_closing_element(name)?,
        };
        elem.set_preceding_whitespace(doc, ws);
        parent.append_child(doc, elem);

        if generated {
            // We gave the child its own line, so the parent's closing tag needs one too
            parent.set_inner_preceding_whitespace(doc, format!("\n{parent_indent}"));
        }
        if blank_after && !is_document {
            let inner = parent.inner_preceding_whitespace(doc).unwrap_or("").to_string();
            parent.set_inner_preceding_whitespace(doc, format!("\n{inner}"));
        }

        debug!("added element '{name}' with derived whitespace");
        Ok(elem)
    }
}

/// Extracts the indentation from a whitespace run: the part after the last newline, or
/// nothing if the run has no newline at all (the node doesn't start its own line).
fn indent_of(ws: &str) -> &str {
    match ws.rfind('\n') {
        Some(i) => &ws[i + 1..],
        None => "",
    }
}
