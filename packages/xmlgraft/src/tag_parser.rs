//! Parsing logic for the tags themselves: an opening tag with its attribute list, and a
//! closing tag. Everything formatting-significant inside a tag is captured as a verbatim
//! slice (per-attribute whitespace, the run around `=`, quote characters, the run before
//! `>`), so an untouched tag can be reassembled byte-for-byte.

use crate::error::ParseError;
use crate::parser::Cursor;
use crate::{escape, Attribute, QuoteStyle};
use indexmap::IndexMap;

/// Everything captured from one opening tag.
pub(crate) struct OpenTag {
    pub(crate) name: String,
    pub(crate) attributes: IndexMap<String, Attribute>,
    /// The run between the last attribute (or the name) and the `>`/`/>`.
    pub(crate) open_tag_ws: String,
    pub(crate) self_closing: bool,
}

/// Everything captured from one closing tag.
pub(crate) struct CloseTag {
    pub(crate) name: String,
    /// Where the name starts, for mismatch reporting.
    pub(crate) name_offset: usize,
    pub(crate) close_tag_ws: String,
    pub(crate) close_tag_tail_ws: String,
}

/// Parses one opening tag. The cursor must sit just after the `<`; on success it sits
/// just after the terminating `>` or `/>`.
pub(crate) fn parse_open_tag(
    cursor: &mut Cursor<'_>,
    tag_start: usize,
) -> Result<OpenTag, ParseError> {
    let name = cursor.take_name()?.to_string();
    let mut attributes = IndexMap::new();
    loop {
        let ws = cursor.skip_whitespace();
        match cursor.peek() {
            None => return Err(ParseError::UnterminatedTag { offset: tag_start }),
            Some(b'>') => {
                cursor.advance(1);
                return Ok(OpenTag {
                    name,
                    attributes,
                    open_tag_ws: ws.to_string(),
                    self_closing: false,
                });
            }
            Some(b'/') => {
                return if cursor.starts_with("/>") {
                    cursor.advance(2);
                    Ok(OpenTag {
                        name,
                        attributes,
                        open_tag_ws: ws.to_string(),
                        self_closing: true,
                    })
                } else {
                    Err(ParseError::InvalidChar {
                        offset: cursor.pos,
                        found: '/',
                        expected: "'/>'",
                    })
                };
            }
            _ => {
                // Anything else must start an attribute. Duplicate names collapse to the
                // last value seen, keeping the first position (we don't validate).
                let (attr_name, attr) = parse_attribute(cursor, ws.to_string())?;
                attributes.insert(attr_name, attr);
            }
        }
    }
}

/// Parses one `name="value"` attribute, capturing the verbatim `=`-run and the raw value
/// slice alongside the decoded value.
fn parse_attribute(
    cursor: &mut Cursor<'_>,
    preceding_ws: String,
) -> Result<(String, Attribute), ParseError> {
    let name = cursor.take_name()?.to_string();

    // The run from the end of the name to the opening quote (whitespace, `=`,
    // whitespace) is kept verbatim so spellings like `a = "v"` survive
    let eq_start = cursor.pos;
    cursor.skip_whitespace();
    match cursor.peek() {
        Some(b'=') => cursor.advance(1),
        Some(_) => {
            return Err(ParseError::InvalidChar {
                offset: cursor.pos,
                found: cursor.char_at(cursor.pos),
                expected: "'='",
            })
        }
        None => return Err(ParseError::UnexpectedEof { offset: cursor.pos }),
    }
    cursor.skip_whitespace();
    let eq = cursor.src[eq_start..cursor.pos].to_string();

    let quote_offset = cursor.pos;
    let quote = match cursor.peek() {
        Some(b'"') => QuoteStyle::Double,
        Some(b'\'') => QuoteStyle::Single,
        Some(_) => {
            return Err(ParseError::InvalidChar {
                offset: cursor.pos,
                found: cursor.char_at(cursor.pos),
                expected: "'\"' or '\\''",
            })
        }
        None => return Err(ParseError::UnexpectedEof { offset: cursor.pos }),
    };
    cursor.advance(1);

    let value_start = cursor.pos;
    let Some(end) = cursor.find_byte(quote.char() as u8) else {
        return Err(ParseError::UnterminatedAttribute {
            offset: quote_offset,
        });
    };
    let raw = &cursor.src[value_start..end];
    cursor.pos = end + 1;

    let attr = Attribute {
        value: escape::decode(raw).into_owned(),
        quote: Some(quote),
        preceding_ws,
        eq,
        raw_value: Some(raw.to_string()),
    };
    Ok((name, attr))
}

/// Parses one closing tag. The cursor must sit at the `<` of `</name>`; on success it
/// sits just after the `>`.
pub(crate) fn parse_close_tag(
    cursor: &mut Cursor<'_>,
    tag_start: usize,
) -> Result<CloseTag, ParseError> {
    cursor.advance(2);
    let ws = cursor.skip_whitespace();
    let name_offset = cursor.pos;
    let name = cursor.take_name()?.to_string();
    let tail = cursor.skip_whitespace();
    match cursor.peek() {
        Some(b'>') => {
            cursor.advance(1);
            Ok(CloseTag {
                name,
                name_offset,
                close_tag_ws: ws.to_string(),
                close_tag_tail_ws: tail.to_string(),
            })
        }
        Some(_) => Err(ParseError::InvalidChar {
            offset: cursor.pos,
            found: cursor.char_at(cursor.pos),
            expected: "'>'",
        }),
        None => Err(ParseError::UnterminatedTag { offset: tag_start }),
    }
}
