//! Integration tests for tree construction and serialization.

use pretty_assertions::assert_eq;
use stylelift_dom::{DomTree, NodeId, NodeType};
use stylelift_html::{ParseStage, parse, serialize};

fn tree(html: &str) -> DomTree {
    parse(html).0
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, tag: &str) -> NodeId {
    tree.find_first(|e| e.tag_name == tag)
        .unwrap_or_else(|| panic!("no <{tag}> element"))
}

fn tag_of(tree: &DomTree, id: NodeId) -> &str {
    &tree.as_element(id).expect("element").tag_name
}

#[test]
fn test_no_implied_document_structure() {
    let tree = tree("<div>hi</div>");
    let top = tree.children(NodeId::ROOT);
    assert_eq!(top.len(), 1);
    assert_eq!(tag_of(&tree, top[0]), "div");
    assert!(tree.head().is_none());
    assert!(tree.html_element().is_none());
}

#[test]
fn test_unclosed_elements_nest_until_an_end_tag_closes_them() {
    let tree = tree("<ul><li>a<li>b</ul><p>x");
    let ul = find_element(&tree, "ul");
    let items = tree.find_all(|e| e.tag_name == "li");
    assert_eq!(items.len(), 2);
    assert_eq!(tree.children(ul), &[items[0]]);
    assert_eq!(tree.parent(items[1]), Some(items[0]));

    let p = find_element(&tree, "p");
    assert_eq!(tree.parent(p), Some(NodeId::ROOT));
    assert!(tree.as_element(ul).expect("ul").has_end_tag);
    assert!(!tree.as_element(p).expect("p").has_end_tag);
}

#[test]
fn test_void_elements_do_not_open() {
    let tree = tree("<p>a<br>b</p>");
    let p = find_element(&tree, "p");
    let children = tree.children(p);
    assert_eq!(children.len(), 3);
    assert_eq!(tree.as_text(children[0]), Some("a"));
    assert_eq!(tag_of(&tree, children[1]), "br");
    assert_eq!(tree.as_text(children[2]), Some("b"));
}

#[test]
fn test_unmatched_end_tag_is_reported() {
    let (tree, issues) = parse("<div></span></div>");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].stage, ParseStage::TreeBuilder);
    let div = find_element(&tree, "div");
    assert!(tree.children(div).is_empty());
}

#[test]
fn test_comments_and_doctype_are_nodes() {
    let tree = tree("<!DOCTYPE html><!-- hi --><html></html>");
    let top = tree.children(NodeId::ROOT);
    assert!(matches!(
        tree.get(top[0]).map(|n| &n.node_type),
        Some(NodeType::Doctype(d)) if d == "DOCTYPE html"
    ));
    assert!(matches!(
        tree.get(top[1]).map(|n| &n.node_type),
        Some(NodeType::Comment(c)) if c == " hi "
    ));
    assert_eq!(tree.document_element(), Some(top[2]));
}

#[test]
fn test_well_formed_document_round_trips() {
    let html = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Test &amp; page</title>
  <style>p > a { color: red; }</style>
</head>
<body>
  <!-- nav -->
  <div id="main" class="a b"><p style="color: red;">Hello<br>world</p><img src="x.png" alt=""/></div>
  <script>if (a < b && c > d) {}</script>
</body>
</html>
"#;
    assert_eq!(serialize(&tree(html)), html);
}

#[test]
fn test_implicitly_closed_elements_round_trip() {
    let html = "<ul><li>a<li>b</ul><p>trailing";
    assert_eq!(serialize(&tree(html)), html);
}

#[test]
fn test_attribute_normalization() {
    let out = serialize(&tree(r#"<input type=checkbox checked><a title='say "hi"'>x</a>"#));
    assert_eq!(
        out,
        r#"<input type="checkbox" checked=""><a title="say &quot;hi&quot;">x</a>"#
    );
}

#[test]
fn test_deeply_nested_unclosed_elements_round_trip() {
    // Worker threads get a 2 MiB stack; a recursive walk overflows it long
    // before 100k levels.
    let html = format!("<ul>{}</ul>", "<li>item".repeat(100_000));
    let expected = html.clone();
    let output = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || serialize(&tree(&html)))
        .expect("spawn")
        .join()
        .expect("serializer thread");
    assert!(output == expected, "deep document did not round-trip");
}

#[test]
fn test_constructs_open_at_end_of_input_are_closed_and_reported() {
    for (html, expected) in [
        ("<p>x</p><!-- open", "<p>x</p><!-- open-->"),
        ("<p>x</p><!DOCTYPE html", "<p>x</p><!DOCTYPE html>"),
    ] {
        let (tree, issues) = parse(html);
        assert_eq!(issues.len(), 1, "{html}");
        assert_eq!(issues[0].stage, ParseStage::Tokenizer);
        assert!(issues[0].message.starts_with("unterminated"), "{html}");
        assert_eq!(serialize(&tree), expected);
    }
}
