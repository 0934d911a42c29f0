use strum_macros::Display;
use stylelift_dom::Attribute;

use super::token::Token;
use crate::ParseIssue;

/// Elements whose contents are not markup. Everything up to the matching end
/// tag is a single text run.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// The tokenizer state machine. States named after their
/// [§ 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
/// counterparts behave like them, minus character references and most error
/// recovery. The declaration, comment and raw text states scan ahead in the
/// input instead of stepping one character at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// Inside `script`, `style`, `textarea` or `title`, waiting for the end tag.
    RawText,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    MarkupDeclarationOpen,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// `<!` not followed by `--`: DOCTYPE and other declarations.
    Declaration,
    /// `<?`, kept verbatim up to the next `>`.
    ProcessingInstruction,
}

/// Splits HTML source into [`Token`]s.
///
/// ```
/// use stylelift_html::{HTMLTokenizer, Token};
///
/// let mut tokenizer = HTMLTokenizer::new("<p class=a>hi</p>".to_string());
/// tokenizer.run();
/// let tokens = tokenizer.into_tokens();
/// assert_eq!(tokens[0], Token::start_tag("p", &[("class", "a")]));
/// assert_eq!(tokens[1], Token::text("hi"));
/// ```
pub struct HTMLTokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: String,
    /// Byte offset of the next character to consume.
    pub(super) current_pos: usize,
    pub(super) current_input_character: Option<char>,
    // When true, the next iteration of the main loop will not consume a new character.
    // "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,
    pub(super) at_eof: bool,
    /// Byte offset of the `<` that opened the tag being built.
    pub(super) tag_start: usize,
    /// Character data not yet emitted.
    pub(super) pending_text: String,
    pub(super) current_tag: Option<PendingTag>,
    pub(super) current_attribute: Option<Attribute>,
    /// Name of the element whose end tag terminates the raw text state.
    pub(super) raw_text_owner: Option<String>,
    pub(super) token_stream: Vec<Token>,
    pub(super) issues: Vec<ParseIssue>,
}

/// A tag under construction.
#[derive(Debug, Default)]
pub(super) struct PendingTag {
    pub(super) name: String,
    pub(super) is_end: bool,
    pub(super) self_closing: bool,
    pub(super) attributes: Vec<Attribute>,
}

impl HTMLTokenizer {
    /// Create a new tokenizer for the given input. The initial state is the
    /// data state.
    #[must_use]
    pub const fn new(input: String) -> Self {
        Self {
            state: TokenizerState::Data,
            input,
            current_pos: 0,
            current_input_character: None,
            reconsume: false,
            at_eof: false,
            tag_start: 0,
            pending_text: String::new(),
            current_tag: None,
            current_attribute: None,
            raw_text_owner: None,
            token_stream: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Tokenize the whole input.
    pub fn run(&mut self) {
        while !self.at_eof {
            self.step();
        }
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after `run()` to get the tokens for the parser.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// Consume the tokenizer and return the tokens with any issues found.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Token>, Vec<ParseIssue>) {
        (self.token_stream, self.issues)
    }

    /// Issues recorded so far.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    fn step(&mut self) {
        match self.state {
            TokenizerState::RawText => return self.handle_raw_text_state(),
            TokenizerState::MarkupDeclarationOpen => {
                return self.handle_markup_declaration_open_state();
            }
            TokenizerState::Comment => return self.handle_comment_state(),
            TokenizerState::Declaration => return self.handle_declaration_state(),
            TokenizerState::ProcessingInstruction => {
                return self.handle_processing_instruction_state();
            }
            _ => {}
        }

        if self.reconsume {
            self.reconsume = false;
        } else {
            let _ = self.consume();
        }

        match self.state {
            TokenizerState::Data => self.handle_data_state(),
            TokenizerState::TagOpen => self.handle_tag_open_state(),
            TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
            TokenizerState::TagName => self.handle_tag_name_state(),
            TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
            TokenizerState::AttributeName => self.handle_attribute_name_state(),
            TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
            TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
            TokenizerState::AttributeValueDoubleQuoted => self.handle_attribute_value_quoted('"'),
            TokenizerState::AttributeValueSingleQuoted => {
                self.handle_attribute_value_quoted('\'');
            }
            TokenizerState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(),
            TokenizerState::AfterAttributeValueQuoted => {
                self.handle_after_attribute_value_quoted_state();
            }
            TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
            TokenizerState::RawText
            | TokenizerState::MarkupDeclarationOpen
            | TokenizerState::Comment
            | TokenizerState::Declaration
            | TokenizerState::ProcessingInstruction => {}
        }
    }

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn handle_data_state(&mut self) {
        match self.current_input_character {
            // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
            Some('<') => {
                self.tag_start = self.current_pos - 1;
                self.switch_to(TokenizerState::TagOpen);
            }
            Some(c) => self.pending_text.push(c),
            // "EOF - Emit an end-of-file token."
            None => self.emit_eof_token(),
        }
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            Some('!') => self.switch_to(TokenizerState::MarkupDeclarationOpen),
            Some('/') => self.switch_to(TokenizerState::EndTagOpen),
            Some('?') => self.switch_to(TokenizerState::ProcessingInstruction),
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_tag = Some(PendingTag::default());
                self.reconsume_in(TokenizerState::TagName);
            }
            // A lone `<` is character data.
            _ => {
                self.pending_text.push('<');
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_tag = Some(PendingTag {
                    is_end: true,
                    ..PendingTag::default()
                });
                self.reconsume_in(TokenizerState::TagName);
            }
            _ => {
                self.log_parse_error("`</` not followed by a tag name; kept as text");
                self.pending_text.push_str("</");
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_tag_whitespace(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => self.emit_current_tag(),
            Some(c) => {
                if let Some(tag) = self.current_tag.as_mut() {
                    tag.name.push(c.to_ascii_lowercase());
                }
            }
            None => self.abandon_tag_at_eof(),
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_tag_whitespace(c) => {}
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => self.emit_current_tag(),
            Some(_) => {
                self.start_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
            None => self.abandon_tag_at_eof(),
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_tag_whitespace(c) => {
                self.switch_to(TokenizerState::AfterAttributeName);
            }
            Some('/' | '>') => self.reconsume_in(TokenizerState::AfterAttributeName),
            Some('=') if self.attribute_name_is_empty() => self.push_to_attribute_name('='),
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some(c) => self.push_to_attribute_name(c.to_ascii_lowercase()),
            None => self.abandon_tag_at_eof(),
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_tag_whitespace(c) => {}
            Some('/') => {
                self.finish_attribute();
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => self.emit_current_tag(),
            Some(_) => {
                self.finish_attribute();
                self.start_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
            None => self.abandon_tag_at_eof(),
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_tag_whitespace(c) => {}
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            // "This is a missing-attribute-value parse error."
            Some('>') => self.emit_current_tag(),
            Some(_) => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
            None => self.abandon_tag_at_eof(),
        }
    }

    /// [§ 13.2.5.36](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// and [§ 13.2.5.37](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    fn handle_attribute_value_quoted(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterAttributeValueQuoted),
            Some(c) => self.push_to_attribute_value(c),
            None => self.abandon_tag_at_eof(),
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_tag_whitespace(c) => {
                self.finish_attribute();
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('>') => self.emit_current_tag(),
            Some(c) => self.push_to_attribute_value(c),
            None => self.abandon_tag_at_eof(),
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_tag_whitespace(c) => {
                self.finish_attribute();
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => {
                self.finish_attribute();
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') => self.emit_current_tag(),
            // "This is a missing-whitespace-between-attributes parse error.
            // Reconsume in the before attribute name state."
            Some(_) => {
                self.finish_attribute();
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
            None => self.abandon_tag_at_eof(),
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            // "Set the self-closing flag of the current tag token."
            Some('>') => {
                if let Some(tag) = self.current_tag.as_mut() {
                    tag.self_closing = true;
                }
                self.emit_current_tag();
            }
            Some(_) => self.reconsume_in(TokenizerState::BeforeAttributeName),
            None => self.abandon_tag_at_eof(),
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// "If the next two characters are both U+002D HYPHEN-MINUS characters (-),
    /// consume those two characters, create a comment token whose data is the
    /// empty string, and switch to the comment start state."
    fn handle_markup_declaration_open_state(&mut self) {
        if self.remaining().starts_with("--") {
            self.current_pos += 2;
            self.switch_to(TokenizerState::Comment);
        } else {
            self.switch_to(TokenizerState::Declaration);
        }
    }

    fn handle_comment_state(&mut self) {
        let data = self.take_until("-->", "comment");
        self.emit_token(Token::Comment { data });
        self.switch_to(TokenizerState::Data);
    }

    fn handle_declaration_state(&mut self) {
        let data = self.take_until(">", "markup declaration");
        self.emit_token(Token::Doctype { data });
        self.switch_to(TokenizerState::Data);
    }

    fn handle_processing_instruction_state(&mut self) {
        let data = self.take_until(">", "processing instruction");
        self.emit_token(Token::ProcessingInstruction { data });
        self.switch_to(TokenizerState::Data);
    }

    /// Everything up to `</owner` followed by whitespace, `/` or `>` is text.
    /// The end tag itself is then tokenized normally from the data state.
    fn handle_raw_text_state(&mut self) {
        let owner = self.raw_text_owner.take().unwrap_or_default();
        let end = find_raw_text_end(self.remaining(), &owner);
        let text_end = self.current_pos + end.unwrap_or_else(|| self.remaining().len());
        let text = self.input[self.current_pos..text_end].to_string();
        self.pending_text.push_str(&text);
        self.current_pos = text_end;
        if end.is_none() {
            self.log_parse_error(&format!("<{owner}> is never closed"));
        }
        self.switch_to(TokenizerState::Data);
    }
}

/// "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF), U+000C FORM FEED
/// (FF), U+0020 SPACE"
pub(super) const fn is_tag_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | ' ' | '\r')
}

/// Byte offset of the end tag closing a raw text element, if any.
fn find_raw_text_end(rest: &str, owner: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let name = owner.as_bytes();
    rest.match_indices("</").map(|(i, _)| i).find(|&i| {
        let name_start = i + 2;
        let name_end = name_start + name.len();
        name_end <= bytes.len()
            && bytes[name_start..name_end].eq_ignore_ascii_case(name)
            && bytes
                .get(name_end)
                .is_none_or(|&b| matches!(b, b'\t' | b'\n' | b'\x0C' | b' ' | b'\r' | b'/' | b'>'))
    })
}
