use std::fmt;

use stylelift_dom::{DomTree, NodeId};

/// [§ 4 Selector Syntax](https://www.w3.org/TR/selectors-4/#syntax)
///
/// The simple selectors a synthesized selector can be made of.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type,
    /// and represents an instance of that element type in the document tree."
    ///
    /// Examples: `div`, `p`, `span`
    Type(String),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    ///
    /// Examples: `.highlight`, `.btn`
    Class(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// "An ID selector is a hash (#, U+0023) immediately followed by the
    /// ID value, which is an identifier."
    ///
    /// Examples: `#main`, `#temp3`
    Id(String),

    /// [§ 14.1 :root](https://www.w3.org/TR/selectors-4/#the-root-pseudo)
    /// "The :root pseudo-class represents an element that is the root of the
    /// document."
    Root,
}

impl SimpleSelector {
    fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some(element) = tree.as_element(node) else {
            return false;
        };
        match self {
            Self::Type(name) => element.is(name),
            Self::Class(class) => element.classes().contains(&class.as_str()),
            Self::Id(id) => element.id() == Some(id.as_str()),
            Self::Root => tree.document_element() == Some(node),
        }
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => cssparser::serialize_identifier(name, f),
            Self::Class(class) => {
                f.write_str(".")?;
                cssparser::serialize_identifier(class, f)
            }
            Self::Id(id) => {
                f.write_str("#")?;
                cssparser::serialize_identifier(id, f)
            }
            Self::Root => f.write_str(":root"),
        }
    }
}

/// [§ 3.1 Structure and Terminology](https://www.w3.org/TR/selectors-4/#structure)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous conditions
/// on a single element."
///
/// Identifiers are escaped on output, so `#1col` renders as `#\31 col`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    simple_selectors: Vec<SimpleSelector>,
}

impl Selector {
    /// `#<id>`
    #[must_use]
    pub fn id(id: &str) -> Self {
        Self {
            simple_selectors: vec![SimpleSelector::Id(id.to_string())],
        }
    }

    /// `:root`
    #[must_use]
    pub fn root() -> Self {
        Self {
            simple_selectors: vec![SimpleSelector::Root],
        }
    }

    /// `<tag>.<class1>.<class2>...`, classes in the order given.
    #[must_use]
    pub fn with_classes(tag: &str, classes: &[&str]) -> Self {
        let mut simple_selectors = Vec::with_capacity(classes.len() + 1);
        simple_selectors.push(SimpleSelector::Type(tag.to_string()));
        simple_selectors.extend(classes.iter().map(|c| SimpleSelector::Class((*c).to_string())));
        Self { simple_selectors }
    }

    /// `<tag>#<id>`
    #[must_use]
    pub fn with_id(tag: &str, id: &str) -> Self {
        Self {
            simple_selectors: vec![
                SimpleSelector::Type(tag.to_string()),
                SimpleSelector::Id(id.to_string()),
            ],
        }
    }

    /// [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
    ///
    /// A compound selector matches when every simple selector does.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.simple_selectors
            .iter()
            .all(|simple| simple.matches(tree, node))
    }

    /// Every element in the document the selector matches, in document order.
    #[must_use]
    pub fn select_all(&self, tree: &DomTree) -> Vec<NodeId> {
        tree.descendants(NodeId::ROOT)
            .filter(|&id| self.matches(tree, id))
            .collect()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for simple in &self.simple_selectors {
            write!(f, "{simple}")?;
        }
        Ok(())
    }
}
