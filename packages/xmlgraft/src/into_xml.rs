//! The writeback logic that converts a document tree into its XML string form. Each node
//! is written along one of two paths: an unmodified node is reassembled entirely from
//! the verbatim fragments the parser captured (which is what makes parse-then-write the
//! identity), while a modified node is re-rendered from its semantic content under the
//! active [`WriteConfig`]. The choice is made per node, so an untouched subtree nested
//! inside an edited region still comes out byte-for-byte.

use crate::config::WriteConfig;
use crate::{escape, Dirty, Document, Kind, NodeId};

impl Document {
    /// Writes this document back out as XML with the default configuration. For a
    /// document that hasn't been modified since parsing, the result is byte-identical
    /// to the source it was parsed from.
    pub fn to_xml(&self) -> String {
        self.to_xml_with(&WriteConfig::default())
    }
    /// Writes this document back out as XML. The configuration only affects modified
    /// nodes; see [`WriteConfig`].
    pub fn to_xml_with(&self, config: &WriteConfig) -> String {
        // Documents mostly shrink a little on parse, so this is a decent guess
        let mut out = String::with_capacity(self.nodes.len() * 32);
        write_node(self, self.document_node(), config, &mut out, Position::default());
        out
    }
    /// Serializes a single node and its subtree, without the node's own preceding
    /// whitespace.
    pub fn node_to_xml(&self, node: NodeId) -> String {
        self.node_to_xml_with(node, &WriteConfig::default())
    }
    /// Serializes a single node and its subtree under the given configuration, without
    /// the node's own preceding whitespace.
    pub fn node_to_xml_with(&self, node: NodeId, config: &WriteConfig) -> String {
        let mut out = String::new();
        let position = Position {
            depth: node.depth(self),
            include_preceding_ws: false,
            under_reformat: false,
        };
        write_node(self, node, config, &mut out, position);
        out
    }
}

/// Where a node sits in the output being built.
#[derive(Clone, Copy)]
struct Position {
    depth: usize,
    /// Whether to emit the node's preceding whitespace (only ever false for the top of
    /// a single-node serialization).
    include_preceding_ws: bool,
    /// Whether the node's parent was itself modified, i.e. we are rendering the inside
    /// of a re-rendered construct. This is what gates comment/PI dropping: an
    /// unmodified subtree further down flips this back off for its own children.
    under_reformat: bool,
}
impl Default for Position {
    fn default() -> Self {
        Self {
            depth: 0,
            include_preceding_ws: true,
            under_reformat: false,
        }
    }
}

fn write_node(
    doc: &Document,
    id: NodeId,
    config: &WriteConfig,
    out: &mut String,
    position: Position,
) {
    let data = doc.data(id);
    let self_modified = data.dirty == Dirty::SelfModified;
    match &data.kind {
        Kind::Document(d) => {
            if let Some(declaration) = &d.declaration {
                out.push_str(declaration);
            }
            for child in &data.children {
                let child_position = Position {
                    depth: position.depth + 1,
                    include_preceding_ws: true,
                    under_reformat: self_modified,
                };
                write_node(doc, *child, config, out, child_position);
            }
        }
        Kind::Doctype(slice) => {
            if position.include_preceding_ws {
                out.push_str(&data.preceding_ws);
            }
            out.push_str(slice);
        }
        Kind::Comment(body) => {
            if position.under_reformat && !config.preserve_comments() {
                return;
            }
            if position.include_preceding_ws {
                out.push_str(&data.preceding_ws);
            }
            out.push_str("<!--");
            out.push_str(body);
            out.push_str("-->");
        }
        Kind::Pi(pi) => {
            if position.under_reformat && !config.preserve_processing_instructions() {
                return;
            }
            if position.include_preceding_ws {
                out.push_str(&data.preceding_ws);
            }
            out.push_str("<?");
            out.push_str(&pi.target);
            out.push_str(&pi.data);
            out.push_str("?>");
        }
        Kind::Text(t) => {
            if position.include_preceding_ws {
                out.push_str(&data.preceding_ws);
            }
            if t.cdata {
                out.push_str("<![CDATA[");
                if t.content.contains("]]>") {
                    // Split the terminator across two sections to stay well-formed
                    out.push_str(&t.content.replace("]]>", "]]]]><![CDATA[>"));
                } else {
                    out.push_str(&t.content);
                }
                out.push_str("]]>");
            } else {
                match &t.raw {
                    // The raw slice is only ever kept while it still decodes to the
                    // content, so it can be emitted unconditionally
                    Some(raw) => out.push_str(raw),
                    None => out.push_str(&escape::encode_text(&t.content)),
                }
            }
        }
        Kind::Element(e) => {
            let reindent = self_modified && config.pretty_print();
            if position.include_preceding_ws {
                if reindent && position.depth >= 2 {
                    push_indent(out, config, position.depth - 1);
                } else {
                    out.push_str(&data.preceding_ws);
                }
            }
            out.push('<');
            out.push_str(&e.name);
            for (name, attr) in &e.attributes {
                out.push_str(&attr.preceding_ws);
                out.push_str(name);
                out.push_str(&attr.eq);
                let quote = attr.quote.unwrap_or(config.default_quote_style());
                out.push(quote.char());
                match &attr.raw_value {
                    Some(raw) => out.push_str(raw),
                    None => out.push_str(&escape::encode_attribute(&attr.value, quote)),
                }
                out.push(quote.char());
            }
            out.push_str(&e.open_tag_ws);
            if e.self_closing && data.children.is_empty() {
                out.push_str("/>");
                return;
            }
            out.push('>');
            for child in &data.children {
                let child_position = Position {
                    depth: position.depth + 1,
                    include_preceding_ws: true,
                    under_reformat: self_modified,
                };
                write_node(doc, *child, config, out, child_position);
            }
            if reindent && id.has_child_elements(doc) {
                push_indent(out, config, position.depth.saturating_sub(1));
            } else {
                out.push_str(&e.inner_preceding_ws);
            }
            out.push_str("</");
            out.push_str(&e.close_tag_ws);
            out.push_str(&e.name);
            out.push_str(&e.close_tag_tail_ws);
            out.push('>');
        }
    }
}

fn push_indent(out: &mut String, config: &WriteConfig, levels: usize) {
    out.push('\n');
    for _ in 0..levels {
        out.push_str(config.indent_string());
    }
}
