use super::*;

fn page_with_button() -> (Page, NodeId) {
    let mut doc = Document::new();
    let root = doc.root();
    let button = doc.append_element(root, "button", &[("id", "next")]).unwrap();
    doc.append_text(button, "Next").unwrap();
    (Page::new(doc), button)
}

struct AppendRow;

impl ActivationHandler for AppendRow {
    fn on_activate(&self, doc: &mut Document, _node: NodeId) -> Option<Document> {
        let root = doc.root();
        doc.append_element(root, "input", &[("name", "row")]).ok()?;
        None
    }
}

struct GoTo(Document);

impl ActivationHandler for GoTo {
    fn on_activate(&self, _doc: &mut Document, _node: NodeId) -> Option<Document> {
        Some(self.0.clone())
    }
}

#[test]
fn test_write_broadcasts_added_nodes() {
    let (page, _) = page_with_button();
    let mut rx = page.subscribe();
    page.write(|doc| {
        let root = doc.root();
        doc.append_element(root, "input", &[]).unwrap();
    });
    assert_eq!(rx.try_recv().unwrap(), Mutation::NodesAdded { count: 1 });

    page.write(|doc| doc.begin_pass());
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_activate_runs_handlers() {
    let (page, button) = page_with_button();
    page.on_activate(Arc::new(AppendRow));
    let mut rx = page.subscribe();
    let node = page.read(|doc| doc.node_ref(button));
    page.activate(&node).unwrap();
    assert_eq!(rx.try_recv().unwrap(), Mutation::NodesAdded { count: 1 });
    let rows = page.read(|doc| {
        doc.descendants(doc.root())
            .filter(|n| doc.attr(*n, "name") == Some("row"))
            .count()
    });
    assert_eq!(rows, 1);
}

#[test]
fn test_activate_navigation_invalidates_refs() {
    let (page, button) = page_with_button();
    page.on_activate(Arc::new(GoTo(Document::new())));
    let node = page.read(|doc| doc.node_ref(button));
    let before = page.pass();
    page.activate(&node).unwrap();
    assert!(page.pass() > before);
    assert!(matches!(
        page.rect_of(&node),
        Err(DomError::StaleReference { .. })
    ));
}

#[test]
fn test_activate_stale_ref_fails() {
    let (page, button) = page_with_button();
    let node = page.read(|doc| doc.node_ref(button));
    page.write(|doc| doc.begin_pass());
    assert!(page.activate(&node).is_err());
}

#[test]
fn test_rect_of_is_live() {
    let (page, button) = page_with_button();
    let node = page.read(|doc| doc.node_ref(button));
    page.write(|doc| doc.set_rect(button, Rect::new(1.0, 2.0, 30.0, 40.0)))
        .unwrap();
    assert_eq!(page.rect_of(&node).unwrap(), Rect::new(1.0, 2.0, 30.0, 40.0));
    page.write(|doc| doc.set_rect(button, Rect::new(5.0, 6.0, 30.0, 40.0)))
        .unwrap();
    assert_eq!(page.rect_of(&node).unwrap().x, 5.0);
}

#[test]
fn test_navigate_broadcasts() {
    let (page, _) = page_with_button();
    let mut rx = page.subscribe();
    page.navigate(Document::new());
    assert!(matches!(rx.try_recv().unwrap(), Mutation::Navigated { .. }));
}
