use thiserror::Error;

/// Errors that can occur while parsing an XML document or fragment.
///
/// Every variant carries the byte offset into the source string at which the problem was
/// detected, retrievable uniformly through [`ParseError::offset`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("tag starting at byte {offset} is never terminated by '>'")]
    UnterminatedTag { offset: usize },
    #[error("closing tag </{found}> at byte {offset} does not match the open element <{expected}>")]
    MismatchedEndTag {
        offset: usize,
        expected: String,
        found: String,
    },
    #[error("invalid character {found:?} in a name at byte {offset}")]
    InvalidName { offset: usize, found: char },
    #[error("attribute value opened at byte {offset} has no closing quote")]
    UnterminatedAttribute { offset: usize },
    #[error("comment starting at byte {offset} is never terminated by '-->'")]
    UnterminatedComment { offset: usize },
    #[error("CDATA section starting at byte {offset} is never terminated by ']]>'")]
    UnterminatedCData { offset: usize },
    #[error("DOCTYPE declaration starting at byte {offset} is never terminated by '>'")]
    UnterminatedDoctype { offset: usize },
    #[error("unexpected end of input at byte {offset}")]
    UnexpectedEof { offset: usize },
    #[error("unexpected character {found:?} at byte {offset} (expected {expected})")]
    InvalidChar {
        offset: usize,
        found: char,
        expected: &'static str,
    },
}
impl ParseError {
    /// Gets the byte offset into the source string at which this error occurred.
    pub fn offset(&self) -> usize {
        match &self {
            Self::UnterminatedTag { offset }
            | Self::MismatchedEndTag { offset, .. }
            | Self::InvalidName { offset, .. }
            | Self::UnterminatedAttribute { offset }
            | Self::UnterminatedComment { offset }
            | Self::UnterminatedCData { offset }
            | Self::UnterminatedDoctype { offset }
            | Self::UnexpectedEof { offset }
            | Self::InvalidChar { offset, .. } => *offset,
        }
    }
}

/// Error produced when a character other than `"` or `'` is interpreted as an attribute
/// quote.
#[derive(Debug, Error)]
#[error("attribute quotes must be '\"' or '\\'', found {found:?}")]
pub struct QuoteStyleError {
    pub found: char,
}

/// Error produced when an element or attribute is created with a name that could never be
/// well-formed XML.
#[derive(Debug, Error)]
#[error("element and attribute names must be non-empty and free of whitespace, found {name:?}")]
pub struct InvalidXmlName {
    pub name: String,
}
