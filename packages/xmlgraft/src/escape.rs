//! Entity coding for text content and attribute values. Decoding is deliberately
//! non-validating: only the five predefined XML entities and numeric character references
//! are interpreted, and anything else (unknown names, malformed references) passes
//! through byte-for-byte, so decode-then-encode of a modified node never invents meaning
//! that wasn't in the source.

use crate::config::QuoteStyle;
use memchr::{memchr, memchr3};
use std::borrow::Cow;

/// The longest run we'll consider between `&` and `;` when looking for an entity. The
/// named entities are at most four characters, and the largest valid numeric reference
/// (`&#x10FFFF;`) is eight.
const MAX_ENTITY_LEN: usize = 10;

/// Decodes the predefined entities (`&lt;`, `&gt;`, `&amp;`, `&quot;`, `&apos;`) and
/// decimal/hexadecimal character references in the given text. Any `&` that doesn't
/// introduce one of those is left exactly as it appears.
///
/// Returns a borrowed string when the text contains no `&` at all.
pub fn decode(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let Some(first_amp) = memchr(b'&', bytes) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..first_amp]);
    let mut pos = first_amp;
    while pos < text.len() {
        let Some(amp) = memchr(b'&', &bytes[pos..]).map(|i| pos + i) else {
            out.push_str(&text[pos..]);
            break;
        };
        out.push_str(&text[pos..amp]);

        // Look for the terminating semicolon within a plausible distance
        let window_end = (amp + 1 + MAX_ENTITY_LEN).min(text.len());
        let semi = memchr(b';', &bytes[amp + 1..window_end]).map(|i| amp + 1 + i);
        match semi {
            Some(semi) => {
                let body = &text[amp + 1..semi];
                if let Some(c) = decode_entity(body) {
                    out.push(c);
                } else {
                    // Not an entity we interpret, keep the whole run verbatim
                    out.push_str(&text[amp..=semi]);
                }
                pos = semi + 1;
            }
            None => {
                // A bare ampersand (or an unterminated reference), pass it through
                out.push('&');
                pos = amp + 1;
            }
        }
    }

    Cow::Owned(out)
}

/// Decodes the body of a single entity (the part between `&` and `;`). Returns `None`
/// for anything that isn't a predefined entity or a valid numeric reference.
fn decode_entity(body: &str) -> Option<char> {
    match body {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let digits = body.strip_prefix('#')?;
            let code = if let Some(hex) = digits.strip_prefix('x').or(digits.strip_prefix('X')) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                digits.parse::<u32>().ok()?
            };
            // Surrogates and out-of-range codepoints fail here and pass through
            char::from_u32(code)
        }
    }
}

/// Encodes text content for output, escaping `&`, `<`, and `>` as named entities. Quotes
/// are not escaped in element text.
///
/// This is only ever applied to modified content: unmodified text is emitted from its
/// captured source slice, which is how original entity spellings (including numeric
/// references) survive round trips.
pub fn encode_text(text: &str) -> Cow<'_, str> {
    if memchr3(b'&', b'<', b'>', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Encodes an attribute value for output inside the given quote style. `&` and `<` are
/// always escaped; the active quote character is escaped as its named entity; the other
/// quote character is left alone.
pub fn encode_attribute(value: &str, quote: QuoteStyle) -> Cow<'_, str> {
    let quote_byte = quote.char() as u8;
    if memchr3(b'&', b'<', quote_byte, value.as_bytes()).is_none() {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        if c == quote.char() {
            out.push_str(quote.entity());
        } else {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                _ => out.push(c),
            }
        }
    }
    Cow::Owned(out)
}
