use super::*;
use crate::error::ParseError;

#[test]
fn parser_should_reject_empty_input() {
    assert!(matches!(
        Document::parse_str(""),
        Err(ParseError::UnexpectedEof { .. })
    ));
    assert!(matches!(
        Document::parse_str("  \n\t "),
        Err(ParseError::UnexpectedEof { .. })
    ));

    // Fragment mode is the explicit opt-out from that rule
    let fragment = Document::parse_fragment_str("").unwrap();
    assert!(fragment.document_node().children(&fragment).is_empty());
}

#[test]
fn parser_should_store_interelement_whitespace_as_metadata() {
    let text = "<root>\n    <a/>\n    <b/>\n</root>";
    let document = Document::parse_str(text).unwrap();

    let root = document.root_element().unwrap();
    // No whitespace-only text nodes: the two elements are the only children
    let children = root.children(&document);
    assert_eq!(children.len(), 2);
    assert!(children.iter().all(|child| child.is_element(&document)));
    assert_eq!(children[0].preceding_whitespace(&document), "\n    ");
    assert_eq!(children[1].preceding_whitespace(&document), "\n    ");
    assert_eq!(root.inner_preceding_whitespace(&document), Some("\n"));
}

#[test]
fn parser_should_keep_whitespace_inside_mixed_content() {
    let text = "<p>  hello <b>x</b> world  </p>";
    let document = Document::parse_str(text).unwrap();

    let p = document.root_element().unwrap();
    let children = p.children(&document);
    assert_eq!(children.len(), 3);
    assert_eq!(children[0].text_content(&document), Some("  hello "));
    assert_eq!(children[1].preceding_whitespace(&document), "");
    assert_eq!(children[2].text_content(&document), Some(" world  "));
    // The trailing run lives in the text node, not the element metadata
    assert_eq!(p.inner_preceding_whitespace(&document), Some(""));
}

#[test]
fn parser_should_preserve_declaration_without_extracting_fields() {
    let text = "<?xml version=\"1.1\" standalone=\"yes\"?>\n<root/>";
    let document = Document::parse_str(text).unwrap();

    assert_eq!(
        document.declaration(),
        Some("<?xml version=\"1.1\" standalone=\"yes\"?>")
    );
    // The declaration is carried verbatim but never parsed into these fields
    assert_eq!(document.version(), "1.0");
    assert_eq!(document.encoding(), None);
    assert!(!document.standalone());
    assert_eq!(document.to_xml(), text);
}

#[test]
fn parser_should_capture_trailing_document_whitespace() {
    let text = "<root/>\n";
    let document = Document::parse_str(text).unwrap();

    let children = document.document_node().children(&document);
    assert_eq!(children.len(), 2);
    assert_eq!(children[1].node_type(&document), NodeType::Text);
    assert_eq!(children[1].text_content(&document), Some("\n"));

    // When something follows, the whitespace belongs to it instead
    let text = "<root/>\n<!-- after -->";
    let document = Document::parse_str(text).unwrap();
    let children = document.document_node().children(&document);
    assert_eq!(children.len(), 2);
    assert_eq!(children[1].node_type(&document), NodeType::Comment);
    assert_eq!(children[1].preceding_whitespace(&document), "\n");
    assert_eq!(document.to_xml(), text);
}

#[test]
fn parser_should_error_on_unterminated_constructs() {
    assert!(matches!(
        Document::parse_str("<root"),
        Err(ParseError::UnterminatedTag { offset: 0 })
    ));
    assert!(matches!(
        Document::parse_str("<!-- never closed"),
        Err(ParseError::UnterminatedComment { offset: 0 })
    ));
    assert!(matches!(
        Document::parse_str("<r><![CDATA[stuck"),
        Err(ParseError::UnterminatedCData { offset: 3 })
    ));
    assert!(matches!(
        Document::parse_str("<!DOCTYPE r [<!ELEMENT r (#PCDATA)>]"),
        Err(ParseError::UnterminatedDoctype { offset: 0 })
    ));
    assert!(matches!(
        Document::parse_str("<r a=\"unclosed"),
        Err(ParseError::UnterminatedAttribute { .. })
    ));
    // An element that is opened but never closed
    assert!(matches!(
        Document::parse_str("<a><b></b>"),
        Err(ParseError::UnexpectedEof { .. })
    ));
}

#[test]
fn parser_should_error_on_mismatched_end_tags() {
    let err = Document::parse_str("<a><b></a>").unwrap_err();
    match err {
        ParseError::MismatchedEndTag {
            offset,
            expected,
            found,
        } => {
            assert_eq!(offset, 8);
            assert_eq!(expected, "b");
            assert_eq!(found, "a");
        }
        other => panic!("expected a mismatched end tag error, got {other:?}"),
    }
}

#[test]
fn parser_should_close_leniently_when_asked() {
    let options = ParseOptions::new().with_strict_end_tags(false);
    // The case-mismatched `</B>` closes `<b>` anyway in lenient mode
    let document = Document::parse_str_with("<a><b></B></a>", options).unwrap();
    let a = document.root_element().unwrap();
    assert_eq!(a.name(&document), Some("a"));
    assert_eq!(a.find(&document, "b").and_then(|b| b.name(&document)), Some("b"));
}

#[test]
fn parser_should_error_on_bad_names_and_attributes() {
    assert!(matches!(
        Document::parse_str("<1root/>"),
        Err(ParseError::InvalidName {
            offset: 1,
            found: '1'
        })
    ));
    // A missing `=` is caught at the character that should have been it
    assert!(matches!(
        Document::parse_str("<r attr \"v\"/>"),
        Err(ParseError::InvalidChar { expected: "'='", .. })
    ));

    let err = Document::parse_str("<r a=\"unclosed").unwrap_err();
    assert_eq!(err.offset(), 5);
}

#[test]
fn parser_should_parse_fragments() {
    let fragment = Document::parse_fragment_str(" <a/> <b>text</b> ").unwrap();
    let container = fragment.document_node();
    let elements = container.child_elements(&fragment).collect::<Vec<_>>();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].preceding_whitespace(&fragment), " ");
    assert_eq!(elements[1].preceding_whitespace(&fragment), " ");
    // The trailing space survives as document-level whitespace
    assert_eq!(fragment.to_xml(), " <a/> <b>text</b> ");
}

#[test]
fn parser_should_pass_unknown_entities_through() {
    let text = "<r a=\"&nope;\">&alsonope;</r>";
    let document = Document::parse_str(text).unwrap();

    let r = document.root_element().unwrap();
    assert_eq!(r.attribute(&document, "a"), Some("&nope;"));
    assert_eq!(r.trimmed_text(&document), "&alsonope;");
    assert_eq!(document.to_xml(), text);
}

#[test]
fn parser_should_accept_control_characters_in_text() {
    // Deliberate leniency: we don't police the XML character range
    let text = "<r>null\u{0}byte</r>";
    let document = Document::parse_str(text).unwrap();
    assert_eq!(document.to_xml(), text);
}
