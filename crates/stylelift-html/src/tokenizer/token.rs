use stylelift_dom::Attribute;

/// Tokens emitted to the tree builder.
///
/// Unlike the WHATWG token set, character data arrives in runs and markup
/// declarations keep their raw text, so the tree can be written back out
/// without loss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<!...>` that is not a comment, e.g. `<!DOCTYPE html>`.
    Doctype {
        /// Everything between `<!` and `>`.
        data: String,
    },

    /// `<?...>`.
    ProcessingInstruction {
        /// Everything between `<?` and `>`.
        data: String,
    },

    /// A start tag.
    StartTag {
        /// Tag name, ASCII-lowercased.
        name: String,
        /// Written as `<name ... />`.
        self_closing: bool,
        /// Attributes in source order; duplicates already dropped.
        attributes: Vec<Attribute>,
    },

    /// An end tag. Attributes on end tags are discarded.
    EndTag {
        /// Tag name, ASCII-lowercased.
        name: String,
    },

    /// `<!--data-->`.
    Comment {
        /// Everything between `<!--` and `-->`.
        data: String,
    },

    /// A run of character data, exactly as written.
    Text {
        /// The characters.
        data: String,
    },

    /// End-of-file token signals the end of input.
    EndOfFile,
}

impl Token {
    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// Create a text token.
    #[must_use]
    pub fn text(data: &str) -> Self {
        Self::Text {
            data: data.to_string(),
        }
    }

    /// Create a start tag token from name/value pairs.
    #[must_use]
    pub fn start_tag(name: &str, attributes: &[(&str, &str)]) -> Self {
        Self::StartTag {
            name: name.to_string(),
            self_closing: false,
            attributes: attributes
                .iter()
                .map(|&(name, value)| Attribute {
                    name: name.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }

    /// Create an end tag token.
    #[must_use]
    pub fn end_tag(name: &str) -> Self {
        Self::EndTag {
            name: name.to_string(),
        }
    }
}
