//! Errors raised while parsing a selector or translating it to XPath.

use thiserror::Error;

use crate::tokenizer::Token;

/// A selector that does not match the grammar.
///
/// The message already embeds the offending token, e.g.
/// `Expected selector, got <DELIM '(' at 10>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SelectorSyntaxError {
    /// Human-readable description of what went wrong.
    pub message: String,
    /// Character offset in the original selector text.
    pub position: usize,
    /// The token the parser was looking at, when there is one.
    pub token: Option<Token>,
}

impl SelectorSyntaxError {
    /// An error that is not tied to a particular token.
    #[must_use]
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
            token: None,
        }
    }

    /// An error raised while looking at `token`; the message is kept as is.
    #[must_use]
    pub fn at(message: impl Into<String>, token: &Token) -> Self {
        Self {
            message: message.into(),
            position: token.position,
            token: Some(token.clone()),
        }
    }

    /// "`<expectation>`, got `<token>`"
    #[must_use]
    pub fn unexpected(expected: &str, token: &Token) -> Self {
        Self {
            message: format!("{expected}, got {token}"),
            position: token.position,
            token: Some(token.clone()),
        }
    }
}

/// A selector that parsed fine but cannot be expressed in XPath 1.0.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ExpressionError(pub String);

/// Common error for [`parse`](crate::parse) and the translators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// Raised by the tokenizer or the parser.
    #[error(transparent)]
    Syntax(#[from] SelectorSyntaxError),

    /// Raised by a translator.
    #[error(transparent)]
    Expression(#[from] ExpressionError),
}

impl SelectorError {
    /// Shorthand for an [`ExpressionError`].
    #[must_use]
    pub fn expression(message: impl Into<String>) -> Self {
        Self::Expression(ExpressionError(message.into()))
    }

    /// Returns true for grammar violations.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }

    /// Returns true for translation failures.
    #[must_use]
    pub const fn is_expression(&self) -> bool {
        matches!(self, Self::Expression(_))
    }
}

/// A malformed `An+B` argument.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    /// String tokens cannot appear in a series.
    #[error("string tokens are not allowed in a series")]
    StringArgument,

    /// The text does not follow the `An+B` grammar.
    #[error("'{0}' does not match An+B")]
    Malformed(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SelectorError>;
