use super::*;

fn single(tag: &str, attrs: &[(&str, &str)], text: &str) -> (Document, NodeId) {
    let mut doc = Document::new();
    let root = doc.root();
    let id = doc.append_element(root, tag, attrs).unwrap();
    if !text.is_empty() {
        doc.append_text(id, text).unwrap();
    }
    (doc, id)
}

fn kind_of(tag: &str, attrs: &[(&str, &str)], text: &str) -> FieldKind {
    let (doc, id) = single(tag, attrs, text);
    classify(&doc, id)
}

#[test]
fn test_classify_inputs() {
    assert_eq!(kind_of("input", &[], ""), FieldKind::Text("text".into()));
    assert_eq!(
        kind_of("input", &[("type", "EMAIL")], ""),
        FieldKind::Text("email".into())
    );
    assert_eq!(kind_of("input", &[("type", "checkbox")], ""), FieldKind::Checkbox);
    assert_eq!(kind_of("input", &[("type", "radio")], ""), FieldKind::Radio);
    assert_eq!(kind_of("input", &[("type", "file")], ""), FieldKind::File);
    assert_eq!(kind_of("input", &[("type", "submit")], ""), FieldKind::Button);
    assert_eq!(kind_of("input", &[("type", "image")], ""), FieldKind::Button);
}

#[test]
fn test_classify_select_and_textarea() {
    assert_eq!(kind_of("select", &[], ""), FieldKind::Select);
    assert_eq!(
        kind_of("select", &[("multiple", "")], ""),
        FieldKind::SelectMultiple
    );
    assert_eq!(kind_of("textarea", &[], ""), FieldKind::TextArea);
}

#[test]
fn test_native_kind_beats_role() {
    assert_eq!(
        kind_of("input", &[("role", "combobox")], ""),
        FieldKind::Text("text".into())
    );
}

#[test]
fn test_classify_aria_roles() {
    assert_eq!(kind_of("div", &[("role", "switch")], ""), FieldKind::Checkbox);
    assert_eq!(kind_of("div", &[("role", "radio")], ""), FieldKind::Radio);
    assert_eq!(kind_of("div", &[("role", "listbox")], ""), FieldKind::Select);
    assert_eq!(
        kind_of(
            "div",
            &[("role", "listbox"), ("aria-multiselectable", "true")],
            ""
        ),
        FieldKind::SelectMultiple
    );
    assert_eq!(kind_of("div", &[("role", "textbox")], ""), FieldKind::Editable);
    assert_eq!(
        kind_of("div", &[("contenteditable", "true")], ""),
        FieldKind::Editable
    );
}

#[test]
fn test_classify_buttons() {
    assert_eq!(kind_of("button", &[], "Upload Resume"), FieldKind::UploadButton);
    assert_eq!(kind_of("button", &[], "Add Another"), FieldKind::AddButton);
    assert_eq!(kind_of("button", &[], "+"), FieldKind::AddButton);
    assert_eq!(
        kind_of("a", &[("role", "button"), ("data-icon", "icon-plus")], "x"),
        FieldKind::AddButton
    );
    assert_eq!(kind_of("button", &[], "Next"), FieldKind::Button);
    assert_eq!(kind_of("span", &[], "Hello"), FieldKind::Other("span".into()));
}

#[test]
fn test_upload_checked_before_add() {
    // Matches both keyword sets.
    assert_eq!(kind_of("button", &[], "Add resume"), FieldKind::UploadButton);
}

#[test]
fn test_upload_by_attributes() {
    assert_eq!(
        kind_of("button", &[("aria-label", "Attach CV")], ""),
        FieldKind::UploadButton
    );
    assert_eq!(
        kind_of("div", &[("role", "button"), ("class", "btn-browse")], "Go"),
        FieldKind::UploadButton
    );
}

#[test]
fn test_upload_inside_file_label() {
    let mut doc = Document::new();
    let root = doc.root();
    let label = doc.append_element(root, "label", &[]).unwrap();
    let button = doc.append_element(label, "button", &[]).unwrap();
    doc.append_text(button, "Pick").unwrap();
    doc.append_element(label, "input", &[("type", "file")])
        .unwrap();
    assert!(is_upload_trigger(&doc, button));
    assert_eq!(classify(&doc, button), FieldKind::UploadButton);
}

#[test]
fn test_add_by_class_fragment() {
    let (doc, id) = single("button", &[("class", "btn-plus-icon")], "");
    assert!(is_add_trigger(&doc, id));
}

#[test]
fn test_needs_attention_excludes_submit() {
    let (doc, id) = single("button", &[("type", "submit")], "Upload");
    assert!(!needs_attention(&doc, id));
    let (doc, id) = single("button", &[], "Upload");
    assert!(needs_attention(&doc, id));
    let (doc, id) = single("button", &[], "Continue");
    assert!(!needs_attention(&doc, id));
    let (doc, id) = single("span", &[("onclick", "go()")], "Add item");
    assert!(needs_attention(&doc, id));
}

#[test]
fn test_is_form_control() {
    let (doc, id) = single("div", &[("role", "spinbutton")], "");
    assert!(is_form_control(doc.element(id).unwrap()));
    let (doc, id) = single("div", &[("contenteditable", "false")], "");
    assert!(!is_form_control(doc.element(id).unwrap()));
    let (doc, id) = single("button", &[], "");
    assert!(!is_form_control(doc.element(id).unwrap()));
}
