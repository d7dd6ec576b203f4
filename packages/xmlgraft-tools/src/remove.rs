//! Removal operations that absorb the removed element's surrounding whitespace so the
//! remaining children keep the formatting they already had.

use crate::Editor;
use log::debug;
use xmlgraft::{Document, NodeId};

impl Editor {
    /// Removes an element from its parent. The element's own preceding whitespace run
    /// leaves with it and nothing else is touched, which does the right thing in every
    /// position: a removed first child leaves the next sibling's run (and so its
    /// indentation) intact, a removed middle child leaves both neighbours alone, and a
    /// removed last child leaves the parent's closing-tag whitespace in place.
    ///
    /// Returns `true` on success, and `false` if the target is not an element or is not
    /// attached to anything.
    pub fn remove_element(&self, doc: &mut Document, target: NodeId) -> bool {
        if !target.is_element(doc) || target.parent(doc).is_none() {
            return false;
        }
        debug!(
            "removing element '{}'",
            target.name(doc).unwrap_or_default()
        );
        target.detach(doc);
        true
    }
}
