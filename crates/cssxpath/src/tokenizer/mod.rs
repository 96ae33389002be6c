//! Selector tokenizer module.

/// Token types for selector text, a subset of [CSS Syntax Level 3 § 4](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod token;
/// Selector tokenizer implementation.
pub mod tokenizer;

pub use token::{Token, TokenKind};
pub use tokenizer::{Tokenizer, tokenize};
