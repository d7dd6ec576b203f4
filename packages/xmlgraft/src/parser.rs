//! The core parsing logic that converts XML source text into a document tree. This is a
//! single forward pass over the bytes with an explicit stack of open elements; there is
//! no tokenization phase, because almost every "token" here needs its verbatim source
//! slice captured anyway.
//!
//! The one contract worth spelling out is how whitespace is owned. A whitespace-only run
//! between two pieces of markup never becomes a text node: it is parked in `pending_ws`
//! until the next construct claims it, either as that node's preceding whitespace or, if
//! a closing tag comes next, as the enclosing element's inner whitespace. A run with any
//! non-whitespace character in it is real character data and keeps its whitespace inside
//! the text node.

use crate::error::ParseError;
use crate::{
    escape, is_xml_whitespace, tag_parser, Dirty, Document, ElementData, Kind, ParseOptions,
    PiData, TextData,
};
use log::trace;
use memchr::memchr;

impl Document {
    /// Parses a complete document from its string representation. This fails on empty or
    /// whitespace-only input; to parse content without a single root (or nothing at
    /// all), use [`Self::parse_fragment_str`].
    pub fn parse_str(xml: &str) -> Result<Self, ParseError> {
        Self::parse_str_with(xml, ParseOptions::default())
    }
    /// Parses a complete document with the given options.
    pub fn parse_str_with(xml: &str, options: ParseOptions) -> Result<Self, ParseError> {
        if is_xml_whitespace(xml) {
            return Err(ParseError::UnexpectedEof { offset: xml.len() });
        }
        parse_nodes(xml, options)
    }
    /// Parses a document *fragment*: a sequence of nodes with no requirement that there
    /// be a root element, or indeed anything at all. This is what comment bodies go
    /// through when they're turned back into elements.
    pub fn parse_fragment_str(xml: &str) -> Result<Self, ParseError> {
        parse_nodes(xml, ParseOptions::default())
    }
}

fn parse_nodes(xml: &str, options: ParseOptions) -> Result<Document, ParseError> {
    let mut doc = Document::new();
    let mut cursor = Cursor::new(xml);
    // The chain of open elements, with the document node at the bottom
    let mut stack = vec![doc.document_node()];
    // A whitespace-only run waiting for the next construct to claim it
    let mut pending_ws: &str = "";

    // The declaration can only ever be the very first bytes of the input (anywhere else,
    // `<?xml-stylesheet` and friends are ordinary processing instructions). It is kept
    // verbatim; its fields are deliberately not extracted.
    if cursor.starts_with("<?xml")
        && matches!(
            xml.as_bytes().get(5),
            Some(b' ' | b'\t' | b'\r' | b'\n' | b'?')
        )
    {
        let Some(end) = cursor.find_str("?>") else {
            return Err(ParseError::UnterminatedTag { offset: 0 });
        };
        trace!("captured XML declaration: {}", &xml[..end + 2]);
        let doc_node = doc.document_node();
        if let Kind::Document(d) = &mut doc.data_mut(doc_node).kind {
            d.declaration = Some(xml[..end + 2].to_string());
        }
        cursor.pos = end + 2;
    }

    loop {
        // Scan the character data run up to the next markup
        let run_start = cursor.pos;
        let lt = cursor.find_byte(b'<');
        let run_end = lt.unwrap_or(xml.len());
        let run = &xml[run_start..run_end];
        cursor.pos = run_end;
        if !run.is_empty() {
            if is_xml_whitespace(run) {
                pending_ws = run;
            } else {
                // Real character data; its leading/trailing whitespace is semantic and
                // stays inside the node
                let text = doc.push_node(
                    Kind::Text(TextData {
                        content: escape::decode(run).into_owned(),
                        raw: Some(run.to_string()),
                        cdata: false,
                    }),
                    Dirty::Clean,
                );
                doc.attach_raw(*stack.last().unwrap(), text, "");
            }
        }
        let Some(tag_start) = lt else { break };

        if cursor.starts_with("</") {
            let close = tag_parser::parse_close_tag(&mut cursor, tag_start)?;
            if stack.len() == 1 {
                // A closing tag with nothing open
                if options.strict_end_tags() {
                    return Err(ParseError::MismatchedEndTag {
                        offset: close.name_offset,
                        expected: String::new(),
                        found: close.name,
                    });
                }
                continue;
            }
            let elem = *stack.last().unwrap();
            let elem_name = match &doc.data(elem).kind {
                Kind::Element(e) => e.name.clone(),
                _ => String::new(),
            };
            if elem_name != close.name && options.strict_end_tags() {
                return Err(ParseError::MismatchedEndTag {
                    offset: close.name_offset,
                    expected: elem_name,
                    found: close.name,
                });
            }
            // A parked whitespace run before the closing tag is the element's inner
            // whitespace (between its last child and `</`)
            if let Kind::Element(e) = &mut doc.data_mut(elem).kind {
                e.inner_preceding_ws = pending_ws.to_string();
                e.close_tag_ws = close.close_tag_ws;
                e.close_tag_tail_ws = close.close_tag_tail_ws;
            }
            pending_ws = "";
            stack.pop();
        } else if cursor.starts_with("<!--") {
            let body_start = tag_start + 4;
            cursor.pos = body_start;
            let Some(end) = cursor.find_str("-->") else {
                return Err(ParseError::UnterminatedComment { offset: tag_start });
            };
            let node = doc.push_node(Kind::Comment(xml[body_start..end].to_string()), Dirty::Clean);
            doc.attach_raw(*stack.last().unwrap(), node, pending_ws);
            pending_ws = "";
            cursor.pos = end + 3;
        } else if cursor.starts_with("<![CDATA[") {
            let content_start = tag_start + 9;
            cursor.pos = content_start;
            let Some(end) = cursor.find_str("]]>") else {
                return Err(ParseError::UnterminatedCData { offset: tag_start });
            };
            // CDATA content is its own raw slice: nothing in it is ever decoded
            let content = &xml[content_start..end];
            let node = doc.push_node(
                Kind::Text(TextData {
                    content: content.to_string(),
                    raw: Some(content.to_string()),
                    cdata: true,
                }),
                Dirty::Clean,
            );
            doc.attach_raw(*stack.last().unwrap(), node, pending_ws);
            pending_ws = "";
            cursor.pos = end + 3;
        } else if cursor.starts_with("<!DOCTYPE") {
            // Find the closing '>', balancing brackets so an internal subset (which
            // contains '>' in its markup declarations) doesn't end the capture early
            let bytes = xml.as_bytes();
            let mut depth = 0usize;
            let mut pos = tag_start + 9;
            let end = loop {
                match bytes.get(pos) {
                    None => return Err(ParseError::UnterminatedDoctype { offset: tag_start }),
                    Some(b'[') => depth += 1,
                    Some(b']') => depth = depth.saturating_sub(1),
                    Some(b'>') if depth == 0 => break pos,
                    _ => {}
                }
                pos += 1;
            };
            trace!("captured DOCTYPE: {}", &xml[tag_start..=end]);
            let node = doc.push_node(Kind::Doctype(xml[tag_start..=end].to_string()), Dirty::Clean);
            doc.attach_raw(*stack.last().unwrap(), node, pending_ws);
            pending_ws = "";
            cursor.pos = end + 1;
        } else if cursor.starts_with("<?") {
            cursor.pos = tag_start + 2;
            let target = cursor.take_name()?.to_string();
            let data_start = cursor.pos;
            let Some(end) = cursor.find_str("?>") else {
                return Err(ParseError::UnterminatedTag { offset: tag_start });
            };
            let node = doc.push_node(
                Kind::Pi(PiData {
                    target,
                    data: xml[data_start..end].to_string(),
                }),
                Dirty::Clean,
            );
            doc.attach_raw(*stack.last().unwrap(), node, pending_ws);
            pending_ws = "";
            cursor.pos = end + 2;
        } else {
            // An opening tag (anything else, like a stray `<!`, fails the name check
            // inside with a precise offset)
            cursor.pos = tag_start + 1;
            let tag = tag_parser::parse_open_tag(&mut cursor, tag_start)?;
            let node = doc.push_node(
                Kind::Element(ElementData {
                    name: tag.name,
                    attributes: tag.attributes,
                    open_tag_ws: tag.open_tag_ws,
                    close_tag_ws: String::new(),
                    close_tag_tail_ws: String::new(),
                    inner_preceding_ws: String::new(),
                    self_closing: tag.self_closing,
                }),
                Dirty::Clean,
            );
            doc.attach_raw(*stack.last().unwrap(), node, pending_ws);
            pending_ws = "";
            if !tag.self_closing {
                stack.push(node);
            }
        }
    }

    if stack.len() > 1 {
        // At least one element was never closed
        return Err(ParseError::UnexpectedEof { offset: xml.len() });
    }
    if !pending_ws.is_empty() {
        // Trailing whitespace after the root is the one place a whitespace-only text
        // node is allowed, so it can be reproduced on output
        let node = doc.push_node(
            Kind::Text(TextData {
                content: pending_ws.to_string(),
                raw: Some(pending_ws.to_string()),
                cdata: false,
            }),
            Dirty::Clean,
        );
        doc.attach_raw(doc.document_node(), node, "");
    }
    trace!("parsed {} bytes into {} nodes", xml.len(), doc.nodes.len());
    Ok(doc)
}

/// A byte-offset cursor over the source string. Slices returned from its methods borrow
/// the source itself, not the cursor, so callers can keep them while continuing to scan.
pub(crate) struct Cursor<'src> {
    pub(crate) src: &'src str,
    pub(crate) pos: usize,
}
impl<'src> Cursor<'src> {
    pub(crate) fn new(src: &'src str) -> Self {
        Self { src, pos: 0 }
    }
    pub(crate) fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }
    pub(crate) fn advance(&mut self, n: usize) {
        self.pos += n;
    }
    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.src[self.pos..].starts_with(prefix)
    }
    /// Gets the character at the given byte offset, for error reporting.
    pub(crate) fn char_at(&self, pos: usize) -> char {
        self.src[pos..].chars().next().unwrap_or('\u{0}')
    }
    /// Consumes the whitespace run at the cursor (possibly empty) and returns it.
    pub(crate) fn skip_whitespace(&mut self) -> &'src str {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        while matches!(
            bytes.get(self.pos),
            Some(b' ' | b'\t' | b'\r' | b'\n')
        ) {
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }
    /// Consumes a name (element, attribute, or PI target) at the cursor. We take the
    /// pragmatic name alphabet (letters, digits, `_`, `-`, `.`, `:`, and anything
    /// non-ASCII) rather than the full XML production tables.
    pub(crate) fn take_name(&mut self) -> Result<&'src str, ParseError> {
        let start = self.pos;
        let mut chars = self.src[self.pos..].chars();
        match chars.next() {
            None => return Err(ParseError::UnexpectedEof { offset: self.pos }),
            Some(c) if is_name_start_char(c) => self.pos += c.len_utf8(),
            Some(c) => {
                return Err(ParseError::InvalidName {
                    offset: self.pos,
                    found: c,
                })
            }
        }
        for c in chars {
            if is_name_char(c) {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        Ok(&self.src[start..self.pos])
    }
    /// Finds the next occurrence of the given byte at or after the cursor, as an
    /// absolute offset.
    pub(crate) fn find_byte(&self, byte: u8) -> Option<usize> {
        memchr(byte, &self.src.as_bytes()[self.pos..]).map(|i| self.pos + i)
    }
    /// Finds the next occurrence of the given string at or after the cursor, as an
    /// absolute offset.
    pub(crate) fn find_str(&self, needle: &str) -> Option<usize> {
        self.src[self.pos..].find(needle).map(|i| self.pos + i)
    }
}

fn is_name_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == ':' || !c.is_ascii()
}
fn is_name_char(c: char) -> bool {
    is_name_start_char(c) || c.is_ascii_digit() || c == '-' || c == '.'
}
