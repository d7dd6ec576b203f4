use crate::error::QuoteStyleError;

/// The quote characters an attribute value can be delimited by.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuoteStyle {
    /// Double quotes, `attr="value"`. This is the default for newly created attributes.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "double"))]
    Double,
    /// Single quotes, `attr='value'`.
    #[cfg_attr(feature = "serde", serde(rename = "single"))]
    Single,
}
impl QuoteStyle {
    /// Interprets the given character as a quote style. Anything other than `"` or `'` is
    /// an error.
    pub fn from_char(c: char) -> Result<Self, QuoteStyleError> {
        match c {
            '"' => Ok(Self::Double),
            '\'' => Ok(Self::Single),
            _ => Err(QuoteStyleError { found: c }),
        }
    }
    /// Gets the delimiter character for this quote style.
    pub fn char(&self) -> char {
        match &self {
            Self::Double => '"',
            Self::Single => '\'',
        }
    }
    /// Gets the named entity that escapes this style's delimiter inside a value it
    /// delimits.
    pub(crate) fn entity(&self) -> &'static str {
        match &self {
            Self::Double => "&quot;",
            Self::Single => "&apos;",
        }
    }
}

/// Configuration for writing a document back out as XML. This only ever affects nodes
/// that have been modified since parsing (or were created programmatically): unmodified
/// nodes are always reproduced byte-for-byte from their captured source fragments.
///
/// This is an immutable value; the `with_*` methods return an updated copy.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriteConfig {
    preserve_comments: bool,
    preserve_processing_instructions: bool,
    default_quote_style: QuoteStyle,
    pretty_print: bool,
    indent_string: String,
}
impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            preserve_comments: true,
            preserve_processing_instructions: true,
            default_quote_style: QuoteStyle::Double,
            pretty_print: false,
            indent_string: "    ".to_string(),
        }
    }
}
impl WriteConfig {
    /// Creates a configuration with the default settings: comments and processing
    /// instructions preserved, double quotes for new attributes, no re-indentation, and a
    /// four-space indent unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether comments inside re-rendered subtrees are kept. Comments inside
    /// unmodified subtrees are always kept, since those are reproduced verbatim.
    pub fn with_preserve_comments(mut self, preserve: bool) -> Self {
        self.preserve_comments = preserve;
        self
    }
    /// Sets whether processing instructions inside re-rendered subtrees are kept.
    pub fn with_preserve_processing_instructions(mut self, preserve: bool) -> Self {
        self.preserve_processing_instructions = preserve;
        self
    }
    /// Sets the quote style used for attributes that were created without an explicit
    /// style. Attributes parsed from source always keep the style they were written with.
    pub fn with_default_quote_style(mut self, style: QuoteStyle) -> Self {
        self.default_quote_style = style;
        self
    }
    /// Sets whether modified elements are re-indented from their depth rather than
    /// emitting their stored whitespace.
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }
    /// Sets the string used for one level of indentation when pretty-printing.
    pub fn with_indent_string(mut self, indent: impl Into<String>) -> Self {
        self.indent_string = indent.into();
        self
    }

    pub fn preserve_comments(&self) -> bool {
        self.preserve_comments
    }
    pub fn preserve_processing_instructions(&self) -> bool {
        self.preserve_processing_instructions
    }
    pub fn default_quote_style(&self) -> QuoteStyle {
        self.default_quote_style
    }
    pub fn pretty_print(&self) -> bool {
        self.pretty_print
    }
    pub fn indent_string(&self) -> &str {
        &self.indent_string
    }
}

/// Options controlling how a document is parsed.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseOptions {
    strict_end_tags: bool,
}
impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict_end_tags: true,
        }
    }
}
impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }
    /// Sets whether a closing tag whose name does not match the innermost open element is
    /// an error. When disabled, a mismatched closing tag closes the current element
    /// anyway, and a stray closing tag with nothing open is skipped.
    pub fn with_strict_end_tags(mut self, strict: bool) -> Self {
        self.strict_end_tags = strict;
        self
    }
    pub fn strict_end_tags(&self) -> bool {
        self.strict_end_tags
    }
}
