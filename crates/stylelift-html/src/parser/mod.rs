//! Tree construction.
//!
//! Builds the tree the markup describes, not the tree a browser would build:
//! no implied `html`, `head` or `body`, no implied end tags. That keeps the
//! rewritten document as close to the original as possible.

use stylelift_common::warning::warn_once;
use stylelift_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::tokenizer::{HTMLTokenizer, Token};
use crate::{ParseIssue, ParseStage, is_void_element};

/// Builds a [`DomTree`] from a token stream.
pub struct HTMLParser {
    tokens: Vec<Token>,
    tree: DomTree,
    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    stack_of_open_elements: Vec<NodeId>,
    issues: Vec<ParseIssue>,
}

impl HTMLParser {
    /// Create a parser for the given tokens.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            tree: DomTree::new(),
            stack_of_open_elements: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Run the parser and return both the `DomTree` and any parse issues.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        let tokens = std::mem::take(&mut self.tokens);
        for token in tokens {
            if token.is_eof() {
                break;
            }
            self.process_token(token);
        }
        (self.tree, self.issues)
    }

    /// "The current node is the bottommost node in this stack of open elements."
    /// With nothing open, content goes straight into the document.
    fn current_node(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    fn insert(&mut self, node_type: NodeType) -> NodeId {
        let parent = self.current_node();
        let id = self.tree.alloc(node_type);
        self.tree.append_child(parent, id);
        id
    }

    fn process_token(&mut self, token: Token) {
        match token {
            Token::Doctype { data } => {
                let _ = self.insert(NodeType::Doctype(data));
            }
            Token::ProcessingInstruction { data } => {
                let _ = self.insert(NodeType::ProcessingInstruction(data));
            }
            Token::Comment { data } => {
                let _ = self.insert(NodeType::Comment(data));
            }
            Token::Text { data } => {
                let _ = self.insert(NodeType::Text(data));
            }
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                let opens = !self_closing && !is_void_element(&name);
                let data = ElementData {
                    attrs: attributes.into_iter().map(|a| (a.name, a.value)).collect(),
                    self_closing,
                    // Void and self-closing elements never have one.
                    has_end_tag: false,
                    tag_name: name,
                };
                let id = self.insert(NodeType::Element(data));
                if opens {
                    self.stack_of_open_elements.push(id);
                }
            }
            Token::EndTag { name } => self.close_element(&name),
            Token::EndOfFile => {}
        }
    }

    /// Pop open elements up to and including the nearest one named `name`.
    /// Elements popped on the way were closed implicitly and keep
    /// `has_end_tag == false`.
    fn close_element(&mut self, name: &str) {
        let position = self.stack_of_open_elements.iter().rposition(|&id| {
            self.tree
                .as_element(id)
                .is_some_and(|e| e.tag_name == name)
        });

        let Some(position) = position else {
            self.parse_warning(&format!("unmatched end tag </{name}> dropped"));
            return;
        };

        let closed = self.stack_of_open_elements[position];
        if let Some(element) = self.tree.as_element_mut(closed) {
            element.has_end_tag = true;
        }
        self.stack_of_open_elements.truncate(position);
    }

    /// Record a parse warning (for unhandled but recoverable situations).
    ///
    /// Logs via stylelift-common's warning system and stores the issue for
    /// later retrieval.
    fn parse_warning(&mut self, message: &str) {
        let _ = warn_once("HTML", message);
        self.issues.push(ParseIssue {
            stage: ParseStage::TreeBuilder,
            message: message.to_string(),
        });
    }
}

/// Tokenize and build a tree in one go.
///
/// ```
/// use stylelift_html::parse;
///
/// let (tree, issues) = parse("<div id=main></div>");
/// assert!(issues.is_empty());
/// let div = tree.document_element().unwrap();
/// assert_eq!(tree.as_element(div).unwrap().id(), Some("main"));
/// ```
#[must_use]
pub fn parse(html: &str) -> (DomTree, Vec<ParseIssue>) {
    let mut tokenizer = HTMLTokenizer::new(html.to_string());
    tokenizer.run();
    let (tokens, mut issues) = tokenizer.into_parts();
    let (tree, tree_issues) = HTMLParser::new(tokens).run_with_issues();
    issues.extend(tree_issues);
    (tree, issues)
}
