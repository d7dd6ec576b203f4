//! A lossless, editing-oriented XML document model. The defining guarantee is that
//! parsing a document and writing it back without modification reproduces the input
//! byte-for-byte, while targeted edits perturb only the bytes they touch. To make that
//! work, every node carries both its semantic content (decoded text, attribute values)
//! and the raw formatting fragments the source used to express it (quote styles, entity
//! spellings, whitespace inside and between tags, DOCTYPE bodies, CDATA boundaries).
//!
//! This is aimed at tools that must programmatically modify structured XML (build
//! manifests, configuration files, anything with comments and carefully formatted
//! whitespace) without reformatting what they did not change. It is *not* a validating
//! parser: DTDs are captured but never interpreted, unknown entities pass through
//! untouched, and external references are never followed.

mod config;
/// Errors to do with parsing documents and manipulating their representations.
pub mod error;
/// Entity coding and decoding for text and attribute values.
pub mod escape;
mod into_xml;
mod parser;
mod tag_parser;

// Using this structure for ease of storing utility functions
#[cfg(test)]
pub mod tests;

pub use config::{ParseOptions, QuoteStyle, WriteConfig};

use error::InvalidXmlName;
use indexmap::IndexMap;

/// A handle to a single node in a [`Document`]. Handles are small and copyable; all the
/// actual data lives in the document, so queries take `&Document` and mutations take
/// `&mut Document`. A handle stays valid for the life of its document, even after the
/// node is detached from the tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(pub(crate) usize);

/// The kinds of node that can appear in a document tree.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeType {
    /// The root container: holds the XML declaration and the top-level nodes.
    Document,
    Element,
    /// Character data, either plain text or a CDATA section.
    Text,
    Comment,
    ProcessingInstruction,
    /// A `<!DOCTYPE ... >` declaration, captured verbatim.
    Doctype,
}

/// An XML document (or fragment), holding all its nodes in one arena. Node 0 is always
/// the document node itself; everything else hangs off it through parent/child links.
#[derive(Clone, Debug)]
pub struct Document {
    pub(crate) nodes: Vec<NodeData>,
}

/// How far a node has drifted from the bytes it was parsed from. This only ever moves
/// forward: there is no way to return a node to `Clean` once it has been touched.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub(crate) enum Dirty {
    /// Untouched since parsing; serialization reproduces the captured source fragments.
    #[default]
    Clean,
    /// The node itself was mutated, so its own syntax must be re-rendered.
    SelfModified,
    /// The node is untouched but something beneath it was mutated. Its own syntax
    /// fragments are still good; its children decide for themselves.
    DescendantModified,
}

#[derive(Clone, Debug)]
pub(crate) struct NodeData {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// The whitespace run between the previous sibling's end (or the parent's opening
    /// tag) and this node's start.
    pub(crate) preceding_ws: String,
    pub(crate) dirty: Dirty,
    pub(crate) kind: Kind,
}

#[derive(Clone, Debug)]
pub(crate) enum Kind {
    Document(DocumentData),
    Element(ElementData),
    Text(TextData),
    Comment(String),
    Pi(PiData),
    Doctype(String),
}

#[derive(Clone, Debug)]
pub(crate) struct DocumentData {
    /// The XML declaration exactly as written, `<?xml` through `?>`. The parser stores
    /// this verbatim and does *not* extract its fields into `version`/`standalone`
    /// below, so those keep their defaults for parsed documents.
    pub(crate) declaration: Option<String>,
    pub(crate) version: String,
    pub(crate) encoding: Option<String>,
    pub(crate) standalone: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct ElementData {
    pub(crate) name: String,
    pub(crate) attributes: IndexMap<String, Attribute>,
    /// The run between the last attribute (or the name) and the `>`/`/>`.
    pub(crate) open_tag_ws: String,
    /// The run between `</` and the name in the closing tag.
    pub(crate) close_tag_ws: String,
    /// The run between the name and `>` in the closing tag.
    pub(crate) close_tag_tail_ws: String,
    /// The run between the last child and the closing tag.
    pub(crate) inner_preceding_ws: String,
    pub(crate) self_closing: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct TextData {
    /// The decoded content (entities resolved).
    pub(crate) content: String,
    /// The source slice the content was decoded from, kept so unmodified text can be
    /// emitted with its original entity spellings. Dropped on mutation.
    pub(crate) raw: Option<String>,
    pub(crate) cdata: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct PiData {
    pub(crate) target: String,
    /// Everything between the target and `?>`, verbatim (including the leading space).
    pub(crate) data: String,
}

/// A single attribute on an element. The decoded value is what lookups return; the raw
/// slice (the source between the quotes) is what gets written back while the attribute
/// is unmodified, which is how spellings like `&#10;` survive round trips.
#[derive(Clone, Debug)]
pub struct Attribute {
    pub(crate) value: String,
    /// `None` means the attribute was created without an explicit style and takes the
    /// configured default at write time.
    pub(crate) quote: Option<QuoteStyle>,
    /// The whitespace run between the previous token in the tag and this attribute's
    /// name.
    pub(crate) preceding_ws: String,
    /// The verbatim run from the end of the name to the opening quote, usually just
    /// `=` but possibly `  =  `.
    pub(crate) eq: String,
    pub(crate) raw_value: Option<String>,
}
impl Attribute {
    pub(crate) fn new(value: String, quote: Option<QuoteStyle>) -> Self {
        Self {
            value,
            quote,
            preceding_ws: " ".to_string(),
            eq: "=".to_string(),
            raw_value: None,
        }
    }
    /// Gets the decoded value of this attribute.
    pub fn value(&self) -> &str {
        &self.value
    }
    /// Gets the quote style this attribute was written with, if it has one. Attributes
    /// created programmatically without an explicit style return `None` here and take
    /// the configured default when written.
    pub fn quote_style(&self) -> Option<QuoteStyle> {
        self.quote
    }
    /// Gets the whitespace run that precedes this attribute inside its tag.
    pub fn preceding_whitespace(&self) -> &str {
        &self.preceding_ws
    }
}

/// Checks whether the given string consists entirely of XML whitespace (space, tab,
/// carriage return, newline).
pub(crate) fn is_xml_whitespace(s: &str) -> bool {
    s.chars().all(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

/// Validates a name for an element, attribute, or processing instruction target. We only
/// reject things that could never be well-formed; full production-rule checking is the
/// parser's concern.
pub(crate) fn validate_name(name: &str) -> Result<(), InvalidXmlName> {
    if name.is_empty() || name.chars().any(|c| c.is_whitespace()) {
        Err(InvalidXmlName {
            name: name.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Splits a qualified name into its optional prefix and local part.
pub(crate) fn split_name(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
impl Document {
    /// Creates an empty document: a bare document node with no declaration and no
    /// children.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                parent: None,
                children: Vec::new(),
                preceding_ws: String::new(),
                dirty: Dirty::Clean,
                kind: Kind::Document(DocumentData {
                    declaration: None,
                    version: "1.0".to_string(),
                    encoding: None,
                    standalone: false,
                }),
            }],
        }
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
    pub(crate) fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }
    pub(crate) fn push_node(&mut self, kind: Kind, dirty: Dirty) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            parent: None,
            children: Vec::new(),
            preceding_ws: String::new(),
            dirty,
            kind,
        });
        id
    }
    /// Attaches a freshly parsed node to its parent without any modification tracking.
    pub(crate) fn attach_raw(&mut self, parent: NodeId, child: NodeId, preceding_ws: &str) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[child.0].preceding_ws = preceding_ws.to_string();
        self.nodes[parent.0].children.push(child);
    }
    /// Marks the given node as modified and walks the ancestor chain so every clean
    /// ancestor knows something beneath it has changed. Ancestors that are already
    /// dirty in either way need no update (their own ancestors were handled when they
    /// first became dirty).
    pub(crate) fn mark_modified(&mut self, id: NodeId) {
        self.nodes[id.0].dirty = Dirty::SelfModified;
        let mut curr = self.nodes[id.0].parent;
        while let Some(p) = curr {
            let data = &mut self.nodes[p.0];
            if data.dirty == Dirty::Clean {
                data.dirty = Dirty::DescendantModified;
                curr = data.parent;
            } else {
                break;
            }
        }
    }

    /// Gets the handle of the document node itself.
    pub fn document_node(&self) -> NodeId {
        NodeId(0)
    }
    /// Gets the root element of the document, if there is one.
    pub fn root_element(&self) -> Option<NodeId> {
        self.document_node().child_elements(self).next()
    }
    /// Gets the XML declaration exactly as it appeared in the source, if there was one.
    pub fn declaration(&self) -> Option<&str> {
        match &self.data(self.document_node()).kind {
            Kind::Document(d) => d.declaration.as_deref(),
            _ => None,
        }
    }
    /// Sets (or clears) the XML declaration. The string is emitted verbatim at the very
    /// start of the document, so it should be a complete `<?xml ... ?>` run.
    pub fn set_declaration(&mut self, declaration: Option<String>) {
        let doc_node = self.document_node();
        if let Kind::Document(d) = &mut self.data_mut(doc_node).kind {
            d.declaration = declaration;
        }
        self.mark_modified(doc_node);
    }
    /// Gets the DOCTYPE declaration exactly as it appeared in the source (from
    /// `<!DOCTYPE` through its matching `>`, internal subset included), if there was
    /// one.
    pub fn doctype(&self) -> Option<&str> {
        self.data(self.document_node())
            .children
            .iter()
            .find_map(|child| match &self.data(*child).kind {
                Kind::Doctype(s) => Some(s.as_str()),
                _ => None,
            })
    }
    /// Gets the document's XML version. Note that this is *not* extracted from a parsed
    /// declaration (the declaration is preserved verbatim instead), so this is `1.0`
    /// unless set programmatically.
    pub fn version(&self) -> &str {
        match &self.data(self.document_node()).kind {
            Kind::Document(d) => &d.version,
            _ => "1.0",
        }
    }
    /// Gets the document's declared encoding. As with [`Self::version`], parsing never
    /// populates this.
    pub fn encoding(&self) -> Option<&str> {
        match &self.data(self.document_node()).kind {
            Kind::Document(d) => d.encoding.as_deref(),
            _ => None,
        }
    }
    /// Gets whether the document is standalone. As with [`Self::version`], parsing never
    /// populates this.
    pub fn standalone(&self) -> bool {
        match &self.data(self.document_node()).kind {
            Kind::Document(d) => d.standalone,
            _ => false,
        }
    }

    /// Creates a detached element with the given name. This will fail if the name is
    /// empty or contains whitespace.
    pub fn create_element(&mut self, name: &str) -> Result<NodeId, InvalidXmlName> {
        validate_name(name)?;
        Ok(self.push_node(
            Kind::Element(ElementData {
                name: name.to_string(),
                attributes: IndexMap::new(),
                open_tag_ws: String::new(),
                close_tag_ws: String::new(),
                close_tag_tail_ws: String::new(),
                inner_preceding_ws: String::new(),
                self_closing: false,
            }),
            Dirty::SelfModified,
        ))
    }
    /// Creates a detached element that will be written in self-closing `<name/>` form
    /// until it is given children.
    pub fn create_self_closing_element(&mut self, name: &str) -> Result<NodeId, InvalidXmlName> {
        let id = self.create_element(name)?;
        if let Kind::Element(e) = &mut self.data_mut(id).kind {
            e.self_closing = true;
        }
        Ok(id)
    }
    /// Creates a detached element already holding the given text content.
    pub fn create_element_with_text(
        &mut self,
        name: &str,
        text: &str,
    ) -> Result<NodeId, InvalidXmlName> {
        let id = self.create_element(name)?;
        id.set_text(self, text);
        Ok(id)
    }
    /// Creates a detached element in the given namespace. The namespace is declared on
    /// the element itself, as `xmlns` for an unprefixed name or `xmlns:prefix` for a
    /// prefixed one.
    pub fn create_element_ns(
        &mut self,
        name: &str,
        namespace: &str,
    ) -> Result<NodeId, InvalidXmlName> {
        let id = self.create_element(name)?;
        let declaration = match split_name(name).0 {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        id.set_attribute(self, &declaration, namespace)?;
        Ok(id)
    }
    /// Creates a detached text node with the given (unencoded) content. Encoding happens
    /// at write time.
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push_node(
            Kind::Text(TextData {
                content: content.to_string(),
                raw: None,
                cdata: false,
            }),
            Dirty::SelfModified,
        )
    }
    /// Creates a detached CDATA section with the given content.
    pub fn create_cdata(&mut self, content: &str) -> NodeId {
        self.push_node(
            Kind::Text(TextData {
                content: content.to_string(),
                raw: None,
                cdata: true,
            }),
            Dirty::SelfModified,
        )
    }
    /// Creates a detached comment with the given body (the part between `<!--` and
    /// `-->`).
    pub fn create_comment(&mut self, body: &str) -> NodeId {
        self.push_node(Kind::Comment(body.to_string()), Dirty::SelfModified)
    }
    /// Creates a detached processing instruction.
    pub fn create_pi(&mut self, target: &str, data: &str) -> Result<NodeId, InvalidXmlName> {
        validate_name(target)?;
        let data = if data.is_empty() {
            String::new()
        } else {
            format!(" {data}")
        };
        Ok(self.push_node(
            Kind::Pi(PiData {
                target: target.to_string(),
                data,
            }),
            Dirty::SelfModified,
        ))
    }

    /// Deep-copies a subtree from another document into this one, returning the handle
    /// of the detached copy. The copy keeps all its captured formatting (and its
    /// modification state), so splicing an unmodified subtree across documents stays
    /// lossless.
    pub fn import(&mut self, from: &Document, node: NodeId) -> NodeId {
        let src = from.data(node);
        let new_id = self.push_node(src.kind.clone(), src.dirty);
        self.nodes[new_id.0].preceding_ws = src.preceding_ws.clone();
        for child in src.children.clone() {
            let new_child = self.import(from, child);
            self.nodes[new_child.0].parent = Some(new_id);
            self.nodes[new_id.0].children.push(new_child);
        }
        new_id
    }
}

impl NodeId {
    /// Gets the kind of this node.
    pub fn node_type(self, doc: &Document) -> NodeType {
        match &doc.data(self).kind {
            Kind::Document(_) => NodeType::Document,
            Kind::Element(_) => NodeType::Element,
            Kind::Text(_) => NodeType::Text,
            Kind::Comment(_) => NodeType::Comment,
            Kind::Pi(_) => NodeType::ProcessingInstruction,
            Kind::Doctype(_) => NodeType::Doctype,
        }
    }
    pub fn is_element(self, doc: &Document) -> bool {
        matches!(doc.data(self).kind, Kind::Element(_))
    }
    /// Gets whether this node has been modified since it was parsed. Nodes created
    /// programmatically count as modified from birth.
    pub fn is_modified(self, doc: &Document) -> bool {
        doc.data(self).dirty == Dirty::SelfModified
    }

    /// Gets the qualified name of this element (prefix included, if any). Returns `None`
    /// for non-elements.
    pub fn name<'d>(self, doc: &'d Document) -> Option<&'d str> {
        match &doc.data(self).kind {
            Kind::Element(e) => Some(e.name.as_str()),
            _ => None,
        }
    }
    /// Gets the local part of this element's name (the part after any `:`).
    pub fn local_name<'d>(self, doc: &'d Document) -> Option<&'d str> {
        self.name(doc).map(|name| split_name(name).1)
    }
    /// Gets this element's namespace prefix, if its name has one.
    pub fn prefix<'d>(self, doc: &'d Document) -> Option<&'d str> {
        self.name(doc).and_then(|name| split_name(name).0)
    }
    /// Resolves this element's namespace URI from the `xmlns` declarations in scope.
    /// This is a purely lexical walk up the ancestor chain; no schema resolution is
    /// involved.
    pub fn namespace_uri<'d>(self, doc: &'d Document) -> Option<&'d str> {
        let name = self.name(doc)?;
        resolve_prefix(doc, self, split_name(name).0)
    }

    /// Looks up an attribute's decoded value by its literal (qualified) name.
    pub fn attribute<'d>(self, doc: &'d Document, name: &str) -> Option<&'d str> {
        self.attribute_record(doc, name).map(|attr| attr.value())
    }
    /// Looks up the full attribute record by its literal (qualified) name.
    pub fn attribute_record<'d>(self, doc: &'d Document, name: &str) -> Option<&'d Attribute> {
        match &doc.data(self).kind {
            Kind::Element(e) => e.attributes.get(name),
            _ => None,
        }
    }
    /// Looks up an attribute's decoded value by namespace URI and local name. Only
    /// prefixed attributes are in a namespace, so this never matches an unprefixed
    /// attribute.
    pub fn attribute_ns<'d>(
        self,
        doc: &'d Document,
        namespace: &str,
        local: &str,
    ) -> Option<&'d str> {
        let Kind::Element(e) = &doc.data(self).kind else {
            return None;
        };
        for (name, attr) in &e.attributes {
            let (prefix, attr_local) = split_name(name);
            if attr_local == local {
                if let Some(prefix) = prefix {
                    if prefix != "xmlns" && resolve_prefix(doc, self, Some(prefix)) == Some(namespace)
                    {
                        return Some(attr.value());
                    }
                }
            }
        }
        None
    }
    /// Iterates over this element's attributes in insertion (i.e. source) order.
    pub fn attributes<'d>(
        self,
        doc: &'d Document,
    ) -> impl Iterator<Item = (&'d str, &'d Attribute)> {
        let attrs = match &doc.data(self).kind {
            Kind::Element(e) => Some(&e.attributes),
            _ => None,
        };
        attrs
            .into_iter()
            .flat_map(|attrs| attrs.iter().map(|(name, attr)| (name.as_str(), attr)))
    }

    /// Gets this node's children in document order. Only documents and elements ever
    /// have any.
    pub fn children<'d>(self, doc: &'d Document) -> &'d [NodeId] {
        &doc.data(self).children
    }
    /// Iterates over this node's child elements in document order.
    pub fn child_elements<'d>(self, doc: &'d Document) -> impl Iterator<Item = NodeId> + 'd {
        doc.data(self)
            .children
            .iter()
            .copied()
            .filter(move |child| child.is_element(doc))
    }
    /// Iterates over this node's child elements with the given qualified name.
    pub fn child_elements_named<'d>(
        self,
        doc: &'d Document,
        name: &'d str,
    ) -> impl Iterator<Item = NodeId> + 'd {
        self.child_elements(doc)
            .filter(move |child| child.name(doc) == Some(name))
    }
    /// Gets the first child element with the given qualified name.
    pub fn find(self, doc: &Document, name: &str) -> Option<NodeId> {
        self.child_elements(doc)
            .find(|child| child.name(doc) == Some(name))
    }
    /// Gets the first child element with the given namespace URI and local name.
    pub fn find_ns(self, doc: &Document, namespace: &str, local: &str) -> Option<NodeId> {
        self.child_elements(doc).find(|child| {
            child.local_name(doc) == Some(local) && child.namespace_uri(doc) == Some(namespace)
        })
    }
    /// Iterates over all descendant elements of this node in document (pre-order,
    /// left-to-right) order, lazily. The node itself is not included.
    pub fn descendants(self, doc: &Document) -> Descendants<'_> {
        let mut stack = doc.data(self).children.clone();
        stack.reverse();
        Descendants { doc, stack }
    }

    pub fn parent(self, doc: &Document) -> Option<NodeId> {
        doc.data(self).parent
    }
    /// Gets the nearest ancestor that is an element, skipping the document node.
    pub fn parent_element(self, doc: &Document) -> Option<NodeId> {
        let mut curr = self.parent(doc);
        while let Some(id) = curr {
            if id.is_element(doc) {
                return Some(id);
            }
            curr = id.parent(doc);
        }
        None
    }
    /// Gets the document node this node ultimately hangs off, or `None` if its tree has
    /// been detached from any document node.
    pub fn owning_document(self, doc: &Document) -> Option<NodeId> {
        let mut curr = Some(self);
        while let Some(id) = curr {
            if matches!(doc.data(id).kind, Kind::Document(_)) {
                return Some(id);
            }
            curr = id.parent(doc);
        }
        None
    }
    /// Gets the depth of this node: the root element is at depth 1, its children at
    /// depth 2, and so on.
    pub fn depth(self, doc: &Document) -> usize {
        let mut depth = 0;
        let mut curr = self.parent(doc);
        while let Some(id) = curr {
            depth += 1;
            curr = id.parent(doc);
        }
        depth
    }
    /// Gets this node's index in its parent's child sequence.
    pub fn position_in_parent(self, doc: &Document) -> Option<usize> {
        let parent = self.parent(doc)?;
        doc.data(parent).children.iter().position(|c| *c == self)
    }

    pub fn has_child_elements(self, doc: &Document) -> bool {
        self.child_elements(doc).next().is_some()
    }
    /// Gets whether this node has any direct text child with non-whitespace content.
    pub fn has_text_content(self, doc: &Document) -> bool {
        doc.data(self)
            .children
            .iter()
            .any(|child| match &doc.data(*child).kind {
                Kind::Text(t) => !is_xml_whitespace(&t.content),
                _ => false,
            })
    }
    /// Concatenates the decoded content of every text descendant of this node (in
    /// document order) and trims the result. This is a pure query and never marks
    /// anything as modified.
    pub fn trimmed_text(self, doc: &Document) -> String {
        fn collect(doc: &Document, id: NodeId, buf: &mut String) {
            match &doc.data(id).kind {
                Kind::Text(t) => buf.push_str(&t.content),
                _ => {
                    for child in &doc.data(id).children {
                        collect(doc, *child, buf);
                    }
                }
            }
        }
        let mut buf = String::new();
        collect(doc, self, &mut buf);
        buf.trim().to_string()
    }
    /// Gets the decoded content of this text node (CDATA included). Returns `None` for
    /// other node kinds.
    pub fn text_content<'d>(self, doc: &'d Document) -> Option<&'d str> {
        match &doc.data(self).kind {
            Kind::Text(t) => Some(t.content.as_str()),
            _ => None,
        }
    }
    /// Gets whether this is a CDATA text node.
    pub fn is_cdata(self, doc: &Document) -> bool {
        matches!(&doc.data(self).kind, Kind::Text(t) if t.cdata)
    }
    /// Gets whether this element will be written in self-closing form.
    pub fn is_self_closing(self, doc: &Document) -> bool {
        matches!(&doc.data(self).kind, Kind::Element(e) if e.self_closing)
    }
    /// Gets the body of this comment node (the part between `<!--` and `-->`).
    pub fn comment_body<'d>(self, doc: &'d Document) -> Option<&'d str> {
        match &doc.data(self).kind {
            Kind::Comment(body) => Some(body.as_str()),
            _ => None,
        }
    }
    /// Gets the target of this processing instruction.
    pub fn pi_target<'d>(self, doc: &'d Document) -> Option<&'d str> {
        match &doc.data(self).kind {
            Kind::Pi(pi) => Some(pi.target.as_str()),
            _ => None,
        }
    }
    /// Gets the data of this processing instruction, with the separating whitespace
    /// after the target stripped.
    pub fn pi_data<'d>(self, doc: &'d Document) -> Option<&'d str> {
        match &doc.data(self).kind {
            Kind::Pi(pi) => Some(pi.data.trim_start()),
            _ => None,
        }
    }

    /// Gets the whitespace run between the previous sibling's end (or the parent's
    /// opening tag) and this node's start.
    pub fn preceding_whitespace<'d>(self, doc: &'d Document) -> &'d str {
        &doc.data(self).preceding_ws
    }
    /// Gets the whitespace run between this element's last child and its closing tag.
    /// Returns `None` for non-elements.
    pub fn inner_preceding_whitespace<'d>(self, doc: &'d Document) -> Option<&'d str> {
        match &doc.data(self).kind {
            Kind::Element(e) => Some(e.inner_preceding_ws.as_str()),
            _ => None,
        }
    }

    /// Sets an attribute on this element. An existing attribute keeps its quote style
    /// and position; a new one goes to the end of the attribute list and takes the
    /// configured default quote style at write time. Does nothing on non-elements.
    pub fn set_attribute(
        self,
        doc: &mut Document,
        name: &str,
        value: &str,
    ) -> Result<(), InvalidXmlName> {
        self.set_attribute_inner(doc, name, value, None)
    }
    /// Sets an attribute on this element with an explicit quote style.
    pub fn set_attribute_quoted(
        self,
        doc: &mut Document,
        name: &str,
        value: &str,
        quote: QuoteStyle,
    ) -> Result<(), InvalidXmlName> {
        self.set_attribute_inner(doc, name, value, Some(quote))
    }
    fn set_attribute_inner(
        self,
        doc: &mut Document,
        name: &str,
        value: &str,
        quote: Option<QuoteStyle>,
    ) -> Result<(), InvalidXmlName> {
        validate_name(name)?;
        let Kind::Element(e) = &mut doc.data_mut(self).kind else {
            return Ok(());
        };
        match e.attributes.get_mut(name) {
            Some(attr) => {
                attr.value = value.to_string();
                // The raw slice no longer reflects the value
                attr.raw_value = None;
                if let Some(quote) = quote {
                    attr.quote = Some(quote);
                }
            }
            None => {
                e.attributes
                    .insert(name.to_string(), Attribute::new(value.to_string(), quote));
            }
        }
        doc.mark_modified(self);
        Ok(())
    }
    /// Removes an attribute from this element, returning whether it was present. The
    /// remaining attributes keep their order.
    pub fn remove_attribute(self, doc: &mut Document, name: &str) -> bool {
        let Kind::Element(e) = &mut doc.data_mut(self).kind else {
            return false;
        };
        let removed = e.attributes.shift_remove(name).is_some();
        if removed {
            doc.mark_modified(self);
        }
        removed
    }
    /// Renames this element.
    pub fn set_name(self, doc: &mut Document, name: &str) -> Result<(), InvalidXmlName> {
        validate_name(name)?;
        if let Kind::Element(e) = &mut doc.data_mut(self).kind {
            e.name = name.to_string();
            doc.mark_modified(self);
        }
        Ok(())
    }
    /// Sets whether this element should be written in self-closing form. The flag is
    /// ignored at write time while the element has children.
    pub fn set_self_closing(self, doc: &mut Document, self_closing: bool) {
        if let Kind::Element(e) = &mut doc.data_mut(self).kind {
            e.self_closing = self_closing;
            doc.mark_modified(self);
        }
    }

    /// Replaces all of this element's children with a single text node carrying the
    /// given content. Called on a text node, this sets its content directly instead.
    pub fn set_text(self, doc: &mut Document, content: &str) {
        if let Kind::Text(t) = &mut doc.data_mut(self).kind {
            t.content = content.to_string();
            t.raw = None;
            doc.mark_modified(self);
            return;
        }
        if !self.is_element(doc) {
            return;
        }
        let children = std::mem::take(&mut doc.data_mut(self).children);
        for child in children {
            doc.data_mut(child).parent = None;
        }
        if let Kind::Element(e) = &mut doc.data_mut(self).kind {
            e.inner_preceding_ws.clear();
            if !content.is_empty() {
                e.self_closing = false;
            }
        }
        if !content.is_empty() {
            let text = doc.create_text(content);
            doc.data_mut(text).parent = Some(self);
            doc.data_mut(self).children.push(text);
        }
        doc.mark_modified(self);
    }
    /// Like [`Self::set_text`], but keeps the leading and trailing whitespace runs of
    /// the element's first text child around the new content, so text sitting on its
    /// own indented line stays that way. Without a text child this is exactly
    /// [`Self::set_text`].
    pub fn set_text_preserving_whitespace(self, doc: &mut Document, content: &str) {
        let padding = doc
            .data(self)
            .children
            .iter()
            .find_map(|child| match &doc.data(*child).kind {
                Kind::Text(t) if !t.cdata => {
                    if is_xml_whitespace(&t.content) {
                        Some((t.content.clone(), String::new()))
                    } else {
                        let xml_ws = [' ', '\t', '\r', '\n'];
                        let lead_len = t.content.len() - t.content.trim_start_matches(xml_ws).len();
                        let trail_len = t.content.len() - t.content.trim_end_matches(xml_ws).len();
                        Some((
                            t.content[..lead_len].to_string(),
                            t.content[t.content.len() - trail_len..].to_string(),
                        ))
                    }
                }
                _ => None,
            });
        match padding {
            Some((lead, trail)) => self.set_text(doc, &format!("{lead}{content}{trail}")),
            None => self.set_text(doc, content),
        }
    }
    /// Sets whether this text node is a CDATA section. The captured raw slice is
    /// discarded, since the coding rules have changed out from under it.
    pub fn set_cdata(self, doc: &mut Document, cdata: bool) {
        if let Kind::Text(t) = &mut doc.data_mut(self).kind {
            t.cdata = cdata;
            t.raw = None;
            doc.mark_modified(self);
        }
    }

    /// Appends a child to this node. If the child is currently attached somewhere else
    /// in this document, it is detached first; its formatting metadata travels with it.
    pub fn append_child(self, doc: &mut Document, child: NodeId) {
        let index = doc.data(self).children.len();
        self.insert_child(doc, index, child);
    }
    /// Inserts a child into this node's child sequence at the given position (clamped
    /// to the end).
    pub fn insert_child(self, doc: &mut Document, index: usize, child: NodeId) {
        child.detach(doc);
        let children = &mut doc.data_mut(self).children;
        let index = index.min(children.len());
        children.insert(index, child);
        doc.data_mut(child).parent = Some(self);
        if let Kind::Element(e) = &mut doc.data_mut(self).kind {
            // It has contents now, so it can't be written `<name/>`
            e.self_closing = false;
        }
        doc.mark_modified(self);
    }
    /// Detaches this node from its parent, if it has one. The node (and its subtree)
    /// stays alive and can be re-inserted elsewhere; the old parent is marked modified,
    /// since its child sequence changed.
    pub fn detach(self, doc: &mut Document) {
        let Some(parent) = doc.data(self).parent else {
            return;
        };
        doc.data_mut(parent).children.retain(|c| *c != self);
        doc.data_mut(self).parent = None;
        doc.mark_modified(parent);
    }

    /// Sets the whitespace run that precedes this node.
    pub fn set_preceding_whitespace(self, doc: &mut Document, ws: impl Into<String>) {
        doc.data_mut(self).preceding_ws = ws.into();
        doc.mark_modified(self);
    }
    /// Sets the whitespace run between this element's last child and its closing tag.
    pub fn set_inner_preceding_whitespace(self, doc: &mut Document, ws: impl Into<String>) {
        if let Kind::Element(e) = &mut doc.data_mut(self).kind {
            e.inner_preceding_ws = ws.into();
            doc.mark_modified(self);
        }
    }
}

/// Resolves a namespace prefix (or the default namespace, for `None`) against the
/// `xmlns` declarations in scope at the given node. An explicitly empty declaration
/// un-declares the namespace.
pub(crate) fn resolve_prefix<'d>(
    doc: &'d Document,
    start: NodeId,
    prefix: Option<&str>,
) -> Option<&'d str> {
    let key = match prefix {
        Some(prefix) => format!("xmlns:{prefix}"),
        None => "xmlns".to_string(),
    };
    let mut curr = Some(start);
    while let Some(id) = curr {
        if let Kind::Element(e) = &doc.data(id).kind {
            if let Some(attr) = e.attributes.get(key.as_str()) {
                return if attr.value.is_empty() {
                    None
                } else {
                    Some(attr.value.as_str())
                };
            }
        }
        curr = doc.data(id).parent;
    }
    None
}

/// A lazy pre-order iterator over the descendant elements of a node. Build a fresh one
/// from the node to restart.
pub struct Descendants<'d> {
    doc: &'d Document,
    stack: Vec<NodeId>,
}
impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            // Push children in reverse so the leftmost comes off the stack first
            for child in self.doc.data(id).children.iter().rev() {
                self.stack.push(*child);
            }
            if id.is_element(self.doc) {
                return Some(id);
            }
        }
        None
    }
}
