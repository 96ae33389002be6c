//! CSS selector tokenizer, parser, and XPath 1.0 translator.
//!
//! # Scope
//!
//! This crate implements:
//! - **Selector tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - Identifiers, hashes, strings, numbers, whitespace and single-character delimiters
//!   - Comment skipping
//!   - Escape sequences
//!
//! - **Selector parser** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, universal, class, ID and attribute selectors, with namespaces
//!   - Pseudo-classes, functional pseudo-classes and pseudo-elements
//!   - `:not()`, `:has()`, `:is()` and `:where()`
//!   - Combinators (descendant, child, next-sibling, subsequent-sibling)
//!   - Specificity and canonical serialization
//!
//! - **XPath translation** ([XPath 1.0](https://www.w3.org/TR/1999/REC-xpath-19991116/))
//!   - A generic translator for XML documents
//!   - An HTML translator for `:checked`, `:link`, `:enabled`, `:disabled` and `:lang()`
//!   - Extension hooks for custom pseudo-classes and pseudo-elements
//!
//! ```
//! use cssxpath::{GenericTranslator, Translator, DEFAULT_PREFIX};
//!
//! let xpath = GenericTranslator::new().css_to_xpath("div > p.intro", DEFAULT_PREFIX).unwrap();
//! assert_eq!(
//!     xpath,
//!     "descendant-or-self::div/p[@class and \
//!      contains(concat(' ', normalize-space(@class), ' '), ' intro ')]"
//! );
//! ```
//!
//! # Not Implemented
//!
//! - Selector matching against a document tree
//! - Evaluating the produced XPath

/// Error types for parsing and translation.
pub mod error;
/// Selector syntax tree and parser per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// Selector tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;
/// Translation of selectors to XPath 1.0.
pub mod xpath;

// Re-exports for convenience
pub use error::{ExpressionError, Result, SelectorError, SelectorSyntaxError, SeriesError};
pub use selector::{
    AttributeOperator, Combinator, PseudoElement, Selector, SelectorNode, Specificity, parse,
    parse_series,
};
pub use tokenizer::{Token, TokenKind, tokenize};
pub use xpath::{
    DEFAULT_PREFIX, FunctionalPseudoClass, GenericTranslator, HtmlTranslator, PseudoClass,
    Translator, TranslatorOptions, XPathExpr, is_safe_name, xpath_literal,
};
