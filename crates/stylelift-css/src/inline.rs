//! Inline `style` attributes.
//!
//! [CSS Style Attributes § 2](https://www.w3.org/TR/css-style-attr/#syntax)
//! "The value of the style attribute must match the syntax of the contents of
//! a CSS declaration block"

use stylelift_dom::{DomTree, ElementData, NodeId};

/// Name of the inline style attribute.
pub const STYLE_ATTRIBUTE: &str = "style";

/// An element is styled when its `style` attribute has any non-whitespace
/// content.
#[must_use]
pub fn is_styled(element: &ElementData) -> bool {
    element
        .attrs
        .get(STYLE_ATTRIBUTE)
        .is_some_and(|style| !style.trim().is_empty())
}

/// Snapshot of every styled element, in document order.
///
/// Taken before anything is mutated, so later attribute edits cannot change
/// which elements get processed.
#[must_use]
pub fn styled_elements(tree: &DomTree) -> Vec<NodeId> {
    tree.find_all(is_styled)
}

/// Split declaration block text into declarations.
///
/// Fragments are separated by `;`, trimmed, and empty fragments dropped. Each
/// kept fragment gets its `;` back. A `;` inside quotes or parentheses does
/// not separate, so `url(data:image/png;base64,...)` stays whole. Nothing
/// else about the text is checked or changed.
///
/// ```
/// use stylelift_css::split_declarations;
///
/// assert_eq!(split_declarations("color: red; margin:0"), ["color: red;", "margin:0;"]);
/// assert!(split_declarations(" ; ;").is_empty());
/// ```
#[must_use]
pub fn split_declarations(style: &str) -> Vec<String> {
    let mut declarations = Vec::new();
    let mut fragment_start = 0;
    let mut quote: Option<char> = None;
    let mut depth: usize = 0;
    let mut escaped = false;

    let mut push_fragment = |fragment: &str| {
        let fragment = fragment.trim();
        if !fragment.is_empty() {
            declarations.push(format!("{fragment};"));
        }
    };

    for (i, c) in style.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (c, quote) {
            ('\\', _) => escaped = true,
            (q, Some(open)) if q == open => quote = None,
            (_, Some(_)) => {}
            ('"' | '\'', None) => quote = Some(c),
            ('(', None) => depth += 1,
            (')', None) => depth = depth.saturating_sub(1),
            (';', None) if depth == 0 => {
                push_fragment(&style[fragment_start..i]);
                fragment_start = i + 1;
            }
            _ => {}
        }
    }
    push_fragment(&style[fragment_start..]);

    declarations
}
