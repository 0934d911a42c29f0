//! DOM tree implementation for stylelift.
//!
//! This crate provides an arena-based DOM tree structure loosely following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships.
//! A parent exclusively owns its children through its `children` list; the
//! `parent` index on each node is used for traversal only. Detached nodes stay
//! in the arena but are unreachable from [`NodeId::ROOT`].
//!
//! Elements keep enough of their source form (attribute order, self-closing
//! syntax, whether an end tag was written) for a serializer to reproduce
//! untouched markup.

mod attributes;

pub use attributes::{Attribute, Attributes};

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,
}

/// The kinds of node the tree can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// The document node. Always [`NodeId::ROOT`].
    Document,
    /// A markup declaration such as `<!DOCTYPE html>`, stored without the
    /// surrounding `<!` and `>`.
    Doctype(String),
    /// A processing instruction such as `<?xml version="1.0"?>`, stored
    /// without the surrounding `<?` and `>`.
    ProcessingInstruction(String),
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// Character data, kept exactly as written (character references are not
    /// decoded).
    Text(String),
    /// Comment data, without the `<!--` and `-->` delimiters.
    Comment(String),
}

/// Element-specific data.
///
/// NOTE: Namespaces are not modelled. `tag_name` is the ASCII-lowercased local
/// name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: Attributes,
    /// Written as `<tag ... />` in the source.
    pub self_closing: bool,
    /// Closed by an explicit end tag in the source. Elements created
    /// programmatically default to `true`.
    pub has_end_tag: bool,
}

impl ElementData {
    /// Create an element with no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: Attributes::new(),
            self_closing: false,
            has_end_tag: true,
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.set(name, value);
        self
    }

    /// Builder-style self-closing flag.
    #[must_use]
    pub const fn self_closing(mut self) -> Self {
        self.self_closing = true;
        self
    }

    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id")
    }

    /// Returns the class tokens in the order they were written.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens representing the various classes that the element belongs to."
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        self.attrs
            .get("class")
            .map(|list| list.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    /// Returns true if the tag name matches, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }
}

/// Arena-based DOM tree with O(1) node access.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree. A tree is a finite hierarchical
/// tree structure."
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            node_type: NodeType::Document,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![document],
        }
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes in the arena, detached ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty (never true; the Document always exists).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Allocate a detached element node.
    pub fn create_element(&mut self, data: ElementData) -> NodeId {
        self.alloc(NodeType::Element(data))
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// If `child` is already attached somewhere it is moved.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.children(parent).len();
        self.insert_at(parent, index, child);
    }

    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// Inserts `child` into `parent` immediately before `reference`. If
    /// `reference` is not a child of `parent`, `child` is appended.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        self.detach(child);
        let index = self
            .child_index(parent, reference)
            .unwrap_or_else(|| self.children(parent).len());
        self.insert_at(parent, index, child);
    }

    /// Inserts `child` as the first child of `parent`.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_at(parent, 0, child);
    }

    /// Inserts `child` at position `index` of `parent`'s children, clamped to
    /// the current child count.
    pub fn insert_at(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let Some(node) = self.nodes.get_mut(parent.0) else {
            return;
        };
        let index = index.min(node.children.len());
        node.children.insert(index, child);
        if let Some(child_node) = self.nodes.get_mut(child.0) {
            child_node.parent = Some(parent);
        }
    }

    /// [§ 4.2.4 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Removes `child` from `parent`. Does nothing if `child` is not a child
    /// of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(index) = self.child_index(parent, child) else {
            return;
        };
        let _ = self.nodes[parent.0].children.remove(index);
        self.nodes[child.0].parent = None;
    }

    /// Detach a node from its current parent, if any.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            self.remove_child(parent, id);
        }
    }

    fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.child_index(parent, id)?;
        self.children(parent).get(index + 1).copied()
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.child_index(parent, id)?;
        index
            .checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Iterate over the descendants of `id` in tree order (pre-order,
    /// depth-first), not including `id` itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        DescendantIterator { tree: self, stack }
    }

    /// All elements in document order for which `predicate` returns true.
    pub fn find_all<F>(&self, mut predicate: F) -> Vec<NodeId>
    where
        F: FnMut(&ElementData) -> bool,
    {
        self.descendants(NodeId::ROOT)
            .filter(|&id| self.as_element(id).is_some_and(&mut predicate))
            .collect()
    }

    /// The first element in document order for which `predicate` returns true.
    pub fn find_first<F>(&self, mut predicate: F) -> Option<NodeId>
    where
        F: FnMut(&ElementData) -> bool,
    {
        self.descendants(NodeId::ROOT)
            .find(|&id| self.as_element(id).is_some_and(&mut predicate))
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// The `html` element, if the document element is one.
    #[must_use]
    pub fn html_element(&self) -> Option<NodeId> {
        self.document_element()
            .filter(|&id| self.as_element(id).is_some_and(|e| e.is("html")))
    }

    /// The first `head` element in document order.
    ///
    /// Lenient documents may put `head` anywhere, so this searches the whole
    /// tree rather than only the children of `html`.
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        self.find_first(|e| e.is("head"))
    }

    /// Returns the `head` element, creating one if the document has none.
    ///
    /// A new `head` becomes the first child of the `html` element. Without an
    /// `html` element it becomes the first child of the document, after any
    /// leading doctype or processing instruction.
    pub fn ensure_head(&mut self) -> NodeId {
        if let Some(head) = self.head() {
            return head;
        }
        let head = self.create_element(ElementData::new("head"));
        if let Some(html) = self.html_element() {
            self.prepend_child(html, head);
        } else {
            let index = self
                .children(NodeId::ROOT)
                .iter()
                .take_while(|&&id| {
                    matches!(
                        self.get(id).map(|n| &n.node_type),
                        Some(NodeType::Doctype(_) | NodeType::ProcessingInstruction(_))
                    )
                })
                .count();
            self.insert_at(NodeId::ROOT, index, head);
        }
        head
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
