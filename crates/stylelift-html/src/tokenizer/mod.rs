//! HTML tokenizer module.
//!
//! A source-preserving subset of
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization).

/// Tokenizer state machine implementation.
pub mod core;
/// Helper methods for the state machine: input consumption and emission.
mod helpers;
/// Token types produced by the tokenizer.
pub mod token;

pub use core::{HTMLTokenizer, RAW_TEXT_ELEMENTS, TokenizerState};
pub use token::Token;
