use stylelift_dom::Attribute;

use super::core::{HTMLTokenizer, RAW_TEXT_ELEMENTS, TokenizerState};
use super::token::Token;
use crate::{ParseIssue, ParseStage};

impl HTMLTokenizer {
    /// Consume the next input character, or `None` at end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.remaining().chars().next();
        if let Some(ch) = c {
            self.current_pos += ch.len_utf8();
        }
        self.current_input_character = c;
        c
    }

    pub(super) fn remaining(&self) -> &str {
        &self.input[self.current_pos..]
    }

    pub(super) const fn switch_to(&mut self, state: TokenizerState) {
        self.state = state;
    }

    /// "Reconsume in the X state"
    pub(super) const fn reconsume_in(&mut self, state: TokenizerState) {
        self.reconsume = true;
        self.state = state;
    }

    fn flush_text(&mut self) {
        if !self.pending_text.is_empty() {
            let data = std::mem::take(&mut self.pending_text);
            self.token_stream.push(Token::Text { data });
        }
    }

    /// Emit a token, flushing any character data that precedes it.
    pub(super) fn emit_token(&mut self, token: Token) {
        self.flush_text();
        self.token_stream.push(token);
    }

    pub(super) fn emit_eof_token(&mut self) {
        self.emit_token(Token::EndOfFile);
        self.at_eof = true;
    }

    /// Emit the tag under construction and pick the state that follows it.
    pub(super) fn emit_current_tag(&mut self) {
        self.finish_attribute();
        let Some(tag) = self.current_tag.take() else {
            self.switch_to(TokenizerState::Data);
            return;
        };

        if tag.is_end {
            if tag.self_closing {
                self.log_parse_error("end tag with trailing solidus");
            }
            self.emit_token(Token::EndTag { name: tag.name });
            self.switch_to(TokenizerState::Data);
            return;
        }

        let raw_text = !tag.self_closing && RAW_TEXT_ELEMENTS.contains(&tag.name.as_str());
        if raw_text {
            self.raw_text_owner = Some(tag.name.clone());
        }
        self.emit_token(Token::StartTag {
            name: tag.name,
            self_closing: tag.self_closing,
            attributes: tag.attributes,
        });
        self.switch_to(if raw_text {
            TokenizerState::RawText
        } else {
            TokenizerState::Data
        });
    }

    /// "Start a new attribute in the current tag token. Set that attribute's
    /// name and value to the empty string."
    pub(super) fn start_attribute(&mut self) {
        self.finish_attribute();
        self.current_attribute = Some(Attribute {
            name: String::new(),
            value: String::new(),
        });
    }

    pub(super) fn attribute_name_is_empty(&self) -> bool {
        self.current_attribute
            .as_ref()
            .is_none_or(|attr| attr.name.is_empty())
    }

    pub(super) fn push_to_attribute_name(&mut self, c: char) {
        if let Some(attr) = self.current_attribute.as_mut() {
            attr.name.push(c);
        }
    }

    pub(super) fn push_to_attribute_value(&mut self, c: char) {
        if let Some(attr) = self.current_attribute.as_mut() {
            attr.value.push(c);
        }
    }

    /// Move the attribute under construction onto the current tag.
    ///
    /// [§ 13.2.5.33](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    /// "if there is already an attribute on the token with the exact same name,
    /// then this is a duplicate-attribute parse error and the new attribute must
    /// be removed from the token."
    pub(super) fn finish_attribute(&mut self) {
        let Some(attr) = self.current_attribute.take() else {
            return;
        };
        let Some(tag) = self.current_tag.as_mut() else {
            return;
        };
        if tag.is_end {
            return;
        }
        if tag.attributes.iter().any(|a| a.name == attr.name) {
            let message = format!("duplicate attribute `{}` dropped", attr.name);
            self.log_parse_error(&message);
        } else {
            tag.attributes.push(attr);
        }
    }

    /// The input ended inside a tag. The partial tag is kept as text so that
    /// nothing from the source is lost.
    pub(super) fn abandon_tag_at_eof(&mut self) {
        self.log_parse_error("end of file inside a tag; kept as text");
        self.current_tag = None;
        self.current_attribute = None;
        let partial = self.input[self.tag_start..].to_string();
        self.pending_text.push_str(&partial);
        self.emit_eof_token();
    }

    /// Consume input up to and including `delimiter`, returning what came
    /// before it. Without a delimiter the rest of the input is taken and an
    /// issue is logged; the node built from it is closed when serialized.
    pub(super) fn take_until(&mut self, delimiter: &str, what: &str) -> String {
        let rest = self.remaining();
        if let Some(end) = rest.find(delimiter) {
            let data = rest[..end].to_string();
            self.current_pos += end + delimiter.len();
            data
        } else {
            let data = rest.to_string();
            self.current_pos = self.input.len();
            self.log_parse_error(&format!("unterminated {what}"));
            data
        }
    }

    pub(super) fn log_parse_error(&mut self, message: &str) {
        self.issues.push(ParseIssue {
            stage: ParseStage::Tokenizer,
            message: format!("{message} (at byte {})", self.current_pos),
        });
    }
}
