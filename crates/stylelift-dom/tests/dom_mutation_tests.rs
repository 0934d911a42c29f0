//! Tests for DOM tree mutation and lookup: insert, remove, head handling.

use stylelift_dom::{DomTree, ElementData, NodeId, NodeType};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.create_element(ElementData::new(tag))
}

fn tag(tree: &DomTree, id: NodeId) -> &str {
    &tree.as_element(id).expect("element").tag_name
}

// ========== remove_child ==========

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.remove_child(parent, b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.parent(b), None);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
}

#[test]
fn test_remove_child_of_other_parent_is_ignored() {
    let mut tree = DomTree::new();
    let first = alloc_element(&mut tree, "div");
    let second = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, first);
    tree.append_child(NodeId::ROOT, second);
    let child = alloc_element(&mut tree, "p");
    tree.append_child(first, child);

    tree.remove_child(second, child);

    assert_eq!(tree.parent(child), Some(first));
    assert_eq!(tree.children(first), &[child]);
}

// ========== insert_before / prepend ==========

#[test]
fn test_insert_before_middle() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, c);

    let b = alloc_element(&mut tree, "b");
    tree.insert_before(parent, b, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.parent(b), Some(parent));
}

#[test]
fn test_append_moves_attached_node() {
    let mut tree = DomTree::new();
    let from = alloc_element(&mut tree, "div");
    let to = alloc_element(&mut tree, "span");
    tree.append_child(NodeId::ROOT, from);
    tree.append_child(NodeId::ROOT, to);
    let child = alloc_element(&mut tree, "a");
    tree.append_child(from, child);

    tree.prepend_child(to, child);

    assert!(tree.children(from).is_empty());
    assert_eq!(tree.children(to), &[child]);
    assert_eq!(tree.parent(child), Some(to));
}

// ========== traversal ==========

#[test]
fn test_descendants_in_document_order() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    let head = alloc_element(&mut tree, "head");
    let body = alloc_element(&mut tree, "body");
    let p = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, head);
    tree.append_child(html, body);
    tree.append_child(body, p);

    let order: Vec<_> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, vec![html, head, body, p]);

    let ancestors: Vec<_> = tree.ancestors(p).collect();
    assert_eq!(ancestors, vec![body, html, NodeId::ROOT]);
}

#[test]
fn test_find_all_matches_attribute_predicate() {
    let mut tree = DomTree::new();
    let div = tree.create_element(ElementData::new("div").with_attr("style", "color:red"));
    let span = tree.create_element(ElementData::new("span"));
    let em = tree.create_element(ElementData::new("em").with_attr("style", "x:y"));
    tree.append_child(NodeId::ROOT, div);
    tree.append_child(div, span);
    tree.append_child(span, em);

    let styled = tree.find_all(|e| e.attrs.contains("style"));
    assert_eq!(styled, vec![div, em]);
}

#[test]
fn test_classes_preserve_order() {
    let data = ElementData::new("div").with_attr("class", "  b   a\tc ");
    assert_eq!(data.classes(), vec!["b", "a", "c"]);
    assert!(ElementData::new("div").with_attr("class", "   ").classes().is_empty());
}

// ========== head ==========

#[test]
fn test_ensure_head_returns_existing_head() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    let head = alloc_element(&mut tree, "head");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, head);

    assert_eq!(tree.ensure_head(), head);
    assert_eq!(tree.children(html), &[head]);
}

#[test]
fn test_ensure_head_creates_first_child_of_html() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    let body = alloc_element(&mut tree, "body");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, body);

    let head = tree.ensure_head();

    assert_eq!(tag(&tree, head), "head");
    assert_eq!(tree.children(html), &[head, body]);
}

#[test]
fn test_ensure_head_without_html_goes_after_doctype() {
    let mut tree = DomTree::new();
    let doctype = tree.alloc(NodeType::Doctype("DOCTYPE html".to_string()));
    let div = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, doctype);
    tree.append_child(NodeId::ROOT, div);

    let head = tree.ensure_head();

    assert_eq!(tree.children(NodeId::ROOT), &[doctype, head, div]);
    assert_eq!(tree.head(), Some(head));
}
