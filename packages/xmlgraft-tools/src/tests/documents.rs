use super::*;

#[test]
fn editor_should_create_documents() {
    let editor = Editor::new();
    let document = editor.create_document("project").unwrap();

    assert_eq!(
        document.to_xml(),
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project/>"
    );

    assert!(matches!(
        editor.create_document(""),
        Err(error::EditError::InvalidName(_))
    ));
    assert!(matches!(
        editor.create_document("two words"),
        Err(error::EditError::InvalidName(_))
    ));
}

#[test]
fn editor_should_build_a_document_from_scratch() {
    let editor = Editor::new();
    let mut document = editor.create_document("project").unwrap();
    let root = document.root_element().unwrap();

    editor
        .add_element_with_text(&mut document, root, "name", "demo")
        .unwrap();
    let deps = editor.add_element(&mut document, root, "dependencies").unwrap();
    let dep = editor.add_element(&mut document, deps, "dependency").unwrap();
    dep.set_attribute(&mut document, "scope", "test").unwrap();

    assert_eq!(
        document.to_xml(),
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project>\n    <name>demo</name>\n    <dependencies>\n        <dependency scope=\"test\"/>\n    </dependencies>\n</project>"
    );
}

#[test]
fn editor_should_round_trip_an_edited_file() {
    // The workflow this whole system exists for: parse, touch one thing, write back,
    // and have everything else stay byte-identical
    let text = "<?xml version=\"1.0\"?>\n<settings>\n    <!-- tuning -->\n    <option name=\"depth\"   value='3'/>\n    <option name=\"width\" value='7'/>\n</settings>\n";
    let mut document = Document::parse_str(text).unwrap();
    let editor = Editor::new();
    let root = document.root_element().unwrap();

    let added = editor
        .add_element(&mut document, root, "option")
        .unwrap();
    added
        .set_attribute(&mut document, "name", "height")
        .unwrap();

    assert_eq!(
        document.to_xml(),
        "<?xml version=\"1.0\"?>\n<settings>\n    <!-- tuning -->\n    <option name=\"depth\"   value='3'/>\n    <option name=\"width\" value='7'/>\n    <option name=\"height\"/>\n</settings>\n"
    );
}
