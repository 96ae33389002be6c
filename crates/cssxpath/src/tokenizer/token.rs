//! Selector tokens.
//!
//! Selector syntax needs a much smaller token set than full
//! [CSS Syntax § 4](https://www.w3.org/TR/css-syntax-3/#tokenization): there
//! are no at-keywords, urls, dimensions or blocks. Every token remembers the
//! character offset at which it started so that syntax errors can point at it.

use core::fmt;
use core::fmt::Write as _;

use strum_macros::Display;

/// The kind of a [`Token`].
///
/// The `Display` form is the short upper-case name used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TokenKind {
    /// An identifier, with escapes already decoded.
    #[strum(serialize = "IDENT")]
    Ident,

    /// `#name`; the value excludes the `#`.
    #[strum(serialize = "HASH")]
    Hash,

    /// A quoted string; the value excludes the quotes.
    #[strum(serialize = "STRING")]
    String,

    /// `[+-]?(digits.digits | .digits | digits)`, kept as text.
    #[strum(serialize = "NUMBER")]
    Number,

    /// Any other single character.
    #[strum(serialize = "DELIM")]
    Delim,

    /// A run of whitespace collapsed to a single `' '`.
    #[strum(serialize = "S")]
    Whitespace,

    /// End of input.
    #[strum(serialize = "EOF")]
    Eof,
}

/// A token and the offset of its first character in the selector text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Decoded text of the token. Empty for [`TokenKind::Eof`].
    pub value: String,
    /// Character offset (not byte offset) in the original text.
    pub position: usize,
}

impl Token {
    /// Create a new token.
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
        }
    }

    /// Create a delim token.
    #[must_use]
    pub fn delim(c: char, position: usize) -> Self {
        Self::new(TokenKind::Delim, c.to_string(), position)
    }

    /// Create the end-of-input token.
    #[must_use]
    pub fn eof(position: usize) -> Self {
        Self::new(TokenKind::Eof, String::new(), position)
    }

    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Returns true if this is a whitespace token.
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    /// Returns true if this is the delim `c`.
    #[must_use]
    pub fn is_delim(&self, c: char) -> bool {
        self.kind == TokenKind::Delim && self.value.chars().eq([c])
    }

    /// Returns true if this is a delim token for any of `chars`.
    #[must_use]
    pub fn is_delim_in(&self, chars: &[char]) -> bool {
        chars.iter().any(|&c| self.is_delim(c))
    }

    /// Serialize the token back to CSS, as used by canonical forms.
    #[must_use]
    pub fn css(&self) -> String {
        match self.kind {
            TokenKind::String => serialize_string(&self.value),
            TokenKind::Ident => serialize_identifier(&self.value),
            TokenKind::Hash => format!("#{}", serialize_name(&self.value)),
            _ => self.value.clone(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            write!(f, "<EOF at {}>", self.position)
        } else {
            write!(f, "<{} {} at {}>", self.kind, quote(&self.value), self.position)
        }
    }
}

fn preferred_quote(value: &str) -> char {
    if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    }
}

/// Quote a value for display: single quotes unless the value contains a
/// single quote and no double quote.
pub(crate) fn quote(value: &str) -> String {
    let quote = preferred_quote(value);
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// [§ 2.1 Serialize a string](https://www.w3.org/TR/cssom-1/#serialize-a-string)
///
/// Same quote choice as [`quote`], but escapes are CSS escapes.
pub(crate) fn serialize_string(value: &str) -> String {
    let quote = preferred_quote(value);
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        if c.is_ascii_control() {
            let _ = write!(out, "\\{:x} ", u32::from(c));
        } else {
            if c == quote || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
    }
    out.push(quote);
    out
}

/// [§ 2.1 Serialize an identifier](https://www.w3.org/TR/cssom-1/#serialize-an-identifier)
///
/// Escapes whatever would not re-tokenize as a single identifier.
pub(crate) fn serialize_identifier(value: &str) -> String {
    escape(value, true)
}

/// Like [`serialize_identifier`], but a leading digit is allowed, as after `#`.
pub(crate) fn serialize_name(value: &str) -> String {
    escape(value, false)
}

fn escape(value: &str, identifier: bool) -> String {
    let mut out = String::with_capacity(value.len());
    let leading_hyphen = value.starts_with('-');

    for (i, c) in value.chars().enumerate() {
        let leading_digit = identifier && c.is_ascii_digit() && (i == 0 || (i == 1 && leading_hyphen));
        if leading_digit || c.is_ascii_control() {
            let _ = write!(out, "\\{:x} ", u32::from(c));
        } else if identifier && c == '-' && ((i == 0 && value.len() == 1) || (i == 1 && leading_hyphen)) {
            out.push_str("\\-");
        } else if c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii() {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}
