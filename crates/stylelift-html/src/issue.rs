use strum_macros::Display;

/// Which stage noticed a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ParseStage {
    /// Lexical problems, e.g. a comment running to end of file.
    #[strum(serialize = "tokenizer")]
    Tokenizer,
    /// Structural problems, e.g. an end tag with no open element.
    #[strum(serialize = "tree builder")]
    TreeBuilder,
}

/// A recoverable problem found while parsing. Parsing never fails; issues are
/// reported so callers can surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Stage that recorded the issue.
    pub stage: ParseStage,
    /// Human-readable description.
    pub message: String,
}
