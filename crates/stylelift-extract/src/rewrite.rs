//! Document rewriting.

use stylelift_css::STYLE_ATTRIBUTE;
use stylelift_dom::{DomTree, ElementData, NodeId};
use tracing::debug;

/// `rel` value of the inserted link.
pub const STYLESHEET_REL: &str = "stylesheet";

/// Strip inline styles and link the generated stylesheet.
///
/// Removes `style` from every node in `styled`, makes sure the document has a
/// `head`, and inserts `<link rel="stylesheet" href="<href>"/>` as its first
/// child. A stylesheet link in that `head` with the same `href` is removed
/// first, so a document is never linked to the same stylesheet twice.
///
/// Returns the inserted link.
pub fn rewrite(tree: &mut DomTree, styled: &[NodeId], href: &str) -> NodeId {
    for &node in styled {
        if let Some(element) = tree.as_element_mut(node) {
            let _ = element.attrs.remove(STYLE_ATTRIBUTE);
        }
    }

    let head = tree.ensure_head();
    let stale: Vec<NodeId> = tree
        .children(head)
        .iter()
        .copied()
        .filter(|&child| links_stylesheet(tree, child, href))
        .collect();
    for link in stale {
        debug!(href, "replacing existing stylesheet link");
        tree.remove_child(head, link);
    }

    let link = tree.create_element(
        ElementData::new("link")
            .with_attr("rel", STYLESHEET_REL)
            .with_attr("href", href)
            .self_closing(),
    );
    tree.prepend_child(head, link);
    link
}

/// [§ 4.2.4 The link element](https://html.spec.whatwg.org/multipage/semantics.html#the-link-element)
///
/// `rel` is a set of space-separated, ASCII case-insensitive keywords.
fn links_stylesheet(tree: &DomTree, node: NodeId, href: &str) -> bool {
    tree.as_element(node).is_some_and(|element| {
        element.is("link")
            && element.attrs.get("href") == Some(href)
            && element.attrs.get("rel").is_some_and(|rel| {
                rel.split_ascii_whitespace()
                    .any(|keyword| keyword.eq_ignore_ascii_case(STYLESHEET_REL))
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_links_are_kept() {
        let mut tree = DomTree::new();
        let head = tree.create_element(ElementData::new("head"));
        tree.append_child(NodeId::ROOT, head);
        let icon = tree.create_element(
            ElementData::new("link")
                .with_attr("rel", "icon")
                .with_attr("href", "page.css"),
        );
        let old = tree.create_element(
            ElementData::new("link")
                .with_attr("rel", "Stylesheet preload")
                .with_attr("href", "page.css"),
        );
        tree.append_child(head, icon);
        tree.append_child(head, old);

        let link = rewrite(&mut tree, &[], "page.css");

        assert_eq!(tree.children(head), &[link, icon]);
        assert_eq!(tree.parent(old), None);
    }
}
