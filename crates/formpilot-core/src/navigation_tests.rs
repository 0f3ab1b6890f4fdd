use super::*;

fn find(html: &str, allow_submit: bool) -> Option<String> {
    let doc = Document::from_html(html).unwrap();
    let classifier = KeywordProceedClassifier::new(allow_submit);
    find_proceed_control(&doc, &classifier).map(|n| doc.attr(n, "id").unwrap_or("").to_string())
}

#[test]
fn test_finds_next_and_skips_back() {
    let html = r#"<button id="back">Back</button><button id="next">Next step</button>"#;
    assert_eq!(find(html, false).as_deref(), Some("next"));
}

#[test]
fn test_proceed_keywords() {
    for text in ["Continue", "Save and Continue", "Proceed", "Review application"] {
        let html = format!(r#"<button id="b">{text}</button>"#);
        assert_eq!(find(&html, false).as_deref(), Some("b"), "{text}");
    }
}

#[test]
fn test_retreat_wins_over_proceed() {
    let html = r#"<button id="b">Cancel and continue later</button>"#;
    assert_eq!(find(html, false), None);
}

#[test]
fn test_whole_words_only() {
    assert_eq!(find(r#"<button id="b">Preview</button>"#, false), None);
    assert_eq!(find(r#"<button id="b">Nextdoor</button>"#, false), None);
}

#[test]
fn test_submit_needs_auto_submit() {
    let html = r#"<input id="s" type="submit" value="Submit application">"#;
    assert_eq!(find(html, false), None);
    assert_eq!(find(html, true).as_deref(), Some("s"));
}

#[test]
fn test_reads_aria_label() {
    let html = r#"<div id="d" role="button" aria-label="Go to next page">→</div>"#;
    assert_eq!(find(html, false).as_deref(), Some("d"));
}

#[test]
fn test_skips_hidden_and_disabled() {
    let html = r#"
        <button id="hidden" style="display:none">Next</button>
        <button id="off" disabled>Next</button>
        <button id="ok">Next</button>"#;
    assert_eq!(find(html, false).as_deref(), Some("ok"));
}

#[test]
fn test_finds_inside_shadow_root() {
    let html = r#"<x-nav><template shadowrootmode="open"><button id="n">Continue</button></template></x-nav>"#;
    assert_eq!(find(html, false).as_deref(), Some("n"));
}

#[test]
fn test_from_settings() {
    let settings = AppSettings {
        auto_submit: true,
        ..Default::default()
    };
    let doc = Document::from_html(r#"<button id="a">Apply</button>"#).unwrap();
    let node = doc.get_element_by_id(doc.root(), "a").unwrap();
    assert!(KeywordProceedClassifier::from_settings(&settings).is_proceed(&doc, node));
    assert!(!KeywordProceedClassifier::default().is_proceed(&doc, node));
}
