//! HTML tokenizer, tree builder and serializer for stylelift.
//!
//! # Scope
//!
//! The goal is to rewrite documents, not to render them, so this crate favours
//! fidelity to the source over WHATWG tree construction:
//!
//! - **Tokenizer** - tags, attributes (quoted and unquoted), comments,
//!   declarations (`<!DOCTYPE ...>`), processing instructions and raw text
//!   elements (`script`, `style`, `textarea`, `title`). Character references
//!   are left undecoded.
//! - **Tree builder** - a stack of open elements; void elements never open,
//!   an end tag closes the nearest open element of the same name, unmatched
//!   end tags are dropped. No implied `html`/`head`/`body`.
//! - **Serializer** - writes the tree back out. Parsing and serializing an
//!   untouched, well-formed document with lowercase markup reproduces it
//!   byte for byte. A comment, declaration or processing instruction left
//!   open at the end of the input is written back closed (`<!-- x` becomes
//!   `<!-- x-->`); the tokenizer reports each one as a [`ParseIssue`].
//!
//! # Not Yet Implemented
//!
//! - Character reference decoding
//! - Implied end tags (`<p>`, `<li>`) and foster parenting
//! - Namespaces (SVG and MathML are treated like any other element)

mod issue;
/// Tree construction from tokens.
pub mod parser;
/// Tree to text.
pub mod serializer;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use issue::{ParseIssue, ParseStage};
pub use parser::{HTMLParser, parse};
pub use serializer::{Serializer, serialize};
pub use tokenizer::{HTMLTokenizer, Token, TokenizerState};

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr"
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Returns true for elements that never have contents or an end tag.
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}
