use thiserror::Error;
use xmlgraft::error::{InvalidXmlName, ParseError};

/// Errors that can occur while applying editing operations to a document. Every editing
/// operation validates its arguments in full before touching the tree, so a failed
/// operation always leaves the document exactly as it was.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("no target nodes were provided")]
    NoTargets,
    #[error("expected an element node for this operation")]
    NotAnElement,
    #[error("expected a comment node for this operation")]
    NotAComment,
    #[error("the target node is not attached to a parent")]
    Detached,
    #[error("the document's root element cannot be commented out")]
    RootTarget,
    #[error("batch targets must all be siblings under a single parent")]
    MixedParents,
    #[error("batch targets must form a contiguous run of siblings in document order")]
    NotContiguous,
    #[error("the comment is empty, there is nothing to uncomment")]
    EmptyComment,
    #[error("the comment body did not parse as well-formed XML")]
    UnparseableComment {
        #[source]
        source: ParseError,
    },
    #[error("the comment body must contain exactly one element (plus optional whitespace)")]
    NotASingleElement,
    #[error(transparent)]
    InvalidName(#[from] InvalidXmlName),
}
