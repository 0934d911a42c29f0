//! Writes a [`DomTree`] back out as HTML text.

use std::fmt::Write;

use stylelift_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::is_void_element;

/// Serializes a tree, optionally setting chosen nodes off on their own line.
///
/// ```
/// use stylelift_dom::{DomTree, ElementData, NodeId};
/// use stylelift_html::Serializer;
///
/// let mut tree = DomTree::new();
/// let br = tree.create_element(ElementData::new("br").self_closing());
/// tree.append_child(NodeId::ROOT, br);
/// assert_eq!(Serializer::new(&tree).break_around(br).serialize(), "\n<br/>\n");
/// ```
pub struct Serializer<'a> {
    tree: &'a DomTree,
    break_around: Vec<NodeId>,
}

impl<'a> Serializer<'a> {
    /// Serializer for `tree`.
    #[must_use]
    pub const fn new(tree: &'a DomTree) -> Self {
        Self {
            tree,
            break_around: Vec::new(),
        }
    }

    /// Emit a newline immediately before and after `node`.
    #[must_use]
    pub fn break_around(mut self, node: NodeId) -> Self {
        self.break_around.push(node);
        self
    }

    /// Serialize the whole document.
    ///
    /// The walk keeps its own stack, so arbitrarily deep trees (long runs of
    /// unclosed `<li>` or `<p>`) do not grow the call stack.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![Frame::Enter(NodeId::ROOT)];
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(id) => self.enter(&mut out, &mut stack, id),
                Frame::Exit { id, end_tag } => {
                    if let Some(tag) = end_tag {
                        let _ = write!(out, "</{tag}>");
                    }
                    if self.break_around.contains(&id) {
                        out.push('\n');
                    }
                }
            }
        }
        out
    }

    /// Write the opening part of `id` and schedule its children and closing
    /// part.
    fn enter(&self, out: &mut String, stack: &mut Vec<Frame<'a>>, id: NodeId) {
        let tree = self.tree;
        let Some(node) = tree.get(id) else {
            return;
        };
        if self.break_around.contains(&id) {
            out.push('\n');
        }

        let mut end_tag = None;
        let mut write_children = false;
        match &node.node_type {
            NodeType::Document => write_children = true,
            NodeType::Doctype(data) => {
                let _ = write!(out, "<!{data}>");
            }
            NodeType::ProcessingInstruction(data) => {
                let _ = write!(out, "<?{data}>");
            }
            NodeType::Comment(data) => {
                let _ = write!(out, "<!--{data}-->");
            }
            NodeType::Text(data) => out.push_str(data),
            NodeType::Element(element) => {
                let has_children = !node.children.is_empty();
                write_start_tag(out, element, has_children);
                write_children = opens(element, has_children);
                if write_children
                    && (element.has_end_tag || (has_children && element.self_closing))
                {
                    end_tag = Some(element.tag_name.as_str());
                }
            }
        }

        stack.push(Frame::Exit { id, end_tag });
        if write_children {
            stack.extend(node.children.iter().rev().map(|&child| Frame::Enter(child)));
        }
    }
}

/// One step of the serializer's walk.
enum Frame<'a> {
    /// Write a node's start and queue its contents.
    Enter(NodeId),
    /// Write a node's end tag, if it has one, after its contents.
    Exit {
        id: NodeId,
        end_tag: Option<&'a str>,
    },
}

/// `<tag a="v">`, or `<tag a="v"/>` for a self-closing element with nothing
/// inside.
fn write_start_tag(out: &mut String, element: &ElementData, has_children: bool) {
    out.push('<');
    out.push_str(&element.tag_name);
    for attr in &element.attrs {
        let _ = write!(out, " {}=\"{}\"", attr.name, escape_attribute(&attr.value));
    }
    if element.self_closing && !has_children {
        out.push_str("/>");
    } else {
        out.push('>');
    }
}

/// Whether the element's contents and end tag follow its start tag.
fn opens(element: &ElementData, has_children: bool) -> bool {
    if has_children {
        return true;
    }
    !element.self_closing && !is_void_element(&element.tag_name)
}

/// Serialize the whole document with no extra formatting.
#[must_use]
pub fn serialize(tree: &DomTree) -> String {
    Serializer::new(tree).serialize()
}

/// Values are always written double-quoted, so only `"` needs escaping.
/// Anything else, including existing character references, is already in
/// source form.
fn escape_attribute(value: &str) -> std::borrow::Cow<'_, str> {
    if value.contains('"') {
        value.replace('"', "&quot;").into()
    } else {
        value.into()
    }
}
