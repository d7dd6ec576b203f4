//! Commenting operations: turning live elements into comments and restoring them. The
//! two directions are designed to round-trip, so commenting an element out and
//! uncommenting it again reproduces the original bytes.

use crate::error::EditError;
use crate::Editor;
use log::debug;
use xmlgraft::{Document, NodeId, NodeType};

impl Editor {
    /// Replaces an element with a single comment containing its serialized form (padded
    /// with one space on each side). The comment takes over the element's preceding
    /// whitespace, so it sits exactly where the element sat.
    ///
    /// This fails if the target is not an attached element, or if it is the document's
    /// root element (a document with its root commented out would have no root at all).
    pub fn comment_out_element(
        &self,
        doc: &mut Document,
        target: NodeId,
    ) -> Result<NodeId, EditError> {
        self.comment_out_elements(doc, &[target])
    }

    /// Replaces a contiguous run of sibling elements with a single comment containing
    /// their serialized forms, with the whitespace between them kept inside the comment
    /// body. The comment takes over the first target's preceding whitespace.
    ///
    /// All validation happens before anything is mutated, so a failure leaves the
    /// document untouched.
    pub fn comment_out_elements(
        &self,
        doc: &mut Document,
        targets: &[NodeId],
    ) -> Result<NodeId, EditError> {
        let first = *targets.first().ok_or(EditError::NoTargets)?;
        let parent = first.parent(doc).ok_or(EditError::Detached)?;
        for target in targets {
            if !target.is_element(doc) {
                return Err(EditError::NotAnElement);
            }
            match target.parent(doc) {
                None => return Err(EditError::Detached),
                Some(p) if p != parent => return Err(EditError::MixedParents),
                Some(p) if p == doc.document_node() => return Err(EditError::RootTarget),
                Some(_) => {}
            }
        }
        let positions = targets
            .iter()
            .map(|target| target.position_in_parent(doc).unwrap())
            .collect::<Vec<_>>();
        if positions.windows(2).any(|pair| pair[1] != pair[0] + 1) {
            return Err(EditError::NotContiguous);
        }

        // Serialize the run: the first target's own leading run is replaced by the
        // padding space, the whitespace between the others is kept
        let mut body = " ".to_string();
        for (i, target) in targets.iter().enumerate() {
            if i > 0 {
                body.push_str(target.preceding_whitespace(doc));
            }
            body.push_str(&doc.node_to_xml_with(*target, self.config()));
        }
        body.push(' ');

        let comment = doc.create_comment(&body);
        comment.set_preceding_whitespace(doc, first.preceding_whitespace(doc).to_string());
        parent.insert_child(doc, positions[0], comment);
        for target in targets {
            target.detach(doc);
        }
        debug!("commented out {} element(s)", targets.len());
        Ok(comment)
    }

    /// Parses the body of a comment and splices the element it contains back into the
    /// tree in the comment's place, with the comment's preceding whitespace. The body
    /// must contain exactly one element, with nothing but whitespace around it.
    pub fn uncomment_element(
        &self,
        doc: &mut Document,
        comment: NodeId,
    ) -> Result<NodeId, EditError> {
        let parent = comment.parent(doc).ok_or(EditError::Detached)?;
        let body = comment.comment_body(doc).ok_or(EditError::NotAComment)?;
        if body.trim().is_empty() {
            return Err(EditError::EmptyComment);
        }
        let fragment = Document::parse_fragment_str(body)
            .map_err(|source| EditError::UnparseableComment { source })?;

        // Exactly one element, with nothing else but whitespace around it
        let mut element = None;
        for child in fragment.document_node().children(&fragment) {
            match child.node_type(&fragment) {
                NodeType::Element if element.is_none() => element = Some(*child),
                NodeType::Text
                    if child
                        .text_content(&fragment)
                        .is_some_and(|text| text.trim().is_empty()) => {}
                _ => return Err(EditError::NotASingleElement),
            }
        }
        let element = element.ok_or(EditError::NotASingleElement)?;

        let imported = doc.import(&fragment, element);
        imported.set_preceding_whitespace(doc, comment.preceding_whitespace(doc).to_string());
        let index = comment.position_in_parent(doc).ok_or(EditError::Detached)?;
        comment.detach(doc);
        parent.insert_child(doc, index, imported);
        debug!(
            "uncommented element '{}'",
            imported.name(doc).unwrap_or_default()
        );
        Ok(imported)
    }
}
