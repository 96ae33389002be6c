use super::token::{Token, TokenKind};
use crate::error::SelectorSyntaxError;

/// Scanner turning selector text into a flat stream of [`Token`]s.
///
/// The tokenizer is an iterator: it produces tokens lazily, ends with exactly
/// one [`TokenKind::Eof`] token, and stops after the first error.
pub struct Tokenizer {
    /// The input string being tokenized
    input: Vec<char>,
    /// Current position in the input
    position: usize,
    /// Set once EOF or an error has been produced
    finished: bool,
}

impl Tokenizer {
    /// Create a new tokenizer for the given selector text.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into().chars().collect(),
            position: 0,
            finished: false,
        }
    }

    /// Tokenize the whole input.
    ///
    /// # Errors
    /// Returns the first [`SelectorSyntaxError`] hit while scanning.
    pub fn run(self) -> Result<Vec<Token>, SelectorSyntaxError> {
        self.collect()
    }

    /// Consume a single token. Comments are skipped in place so that offsets
    /// keep pointing into the original text.
    fn consume_token(&mut self) -> Result<Token, SelectorSyntaxError> {
        loop {
            let start = self.position;
            let Some(c) = self.peek() else {
                return Ok(Token::eof(start));
            };

            if is_whitespace(c) {
                self.consume_whitespace();
                return Ok(Token::new(TokenKind::Whitespace, " ", start));
            }

            if self.would_start_ident_sequence() {
                let value = self.consume_ident_sequence(start)?;
                return Ok(Token::new(TokenKind::Ident, value, start));
            }

            // "#" only starts a hash when at least one name code point follows.
            if c == '#' && self.starts_name_code_point(1) {
                let _ = self.consume(); // #
                let value = self.consume_ident_sequence(start)?;
                return Ok(Token::new(TokenKind::Hash, value, start));
            }

            if c == '"' || c == '\'' {
                return self.consume_string_token(c);
            }

            if let Some(number) = self.consume_number() {
                return Ok(Token::new(TokenKind::Number, number, start));
            }

            if c == '/' && self.peek_at(1) == Some('*') {
                self.consume_comment();
                continue;
            }

            let _ = self.consume();
            return Ok(Token::delim(c, start));
        }
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    ///
    /// Comments do not nest; an unterminated comment runs to the end of input.
    fn consume_comment(&mut self) {
        let _ = self.consume(); // /
        let _ = self.consume(); // *
        loop {
            match self.consume() {
                Some('*') if self.peek() == Some('/') => {
                    let _ = self.consume(); // /
                    break;
                }
                Some(_) => continue,
                None => break,
            }
        }
    }

    /// Consume whitespace characters.
    fn consume_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            let _ = self.consume();
        }
    }

    /// [§ 4.3.4 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// Unlike the stylesheet tokenizer, a string that is not closed, or that
    /// contains a raw newline, is a hard error.
    fn consume_string_token(&mut self, ending_code_point: char) -> Result<Token, SelectorSyntaxError> {
        let start = self.position;
        let _ = self.consume(); // opening quote
        let mut value = String::new();

        loop {
            match self.consume() {
                Some(c) if c == ending_code_point => {
                    return Ok(Token::new(TokenKind::String, value, start));
                }

                None => {
                    return Err(SelectorSyntaxError::new(format!("Unclosed string at {start}"), start));
                }

                Some('\n' | '\r' | '\x0C') => {
                    return Err(SelectorSyntaxError::new(format!("Invalid string at {start}"), start));
                }

                Some('\\') => match self.peek() {
                    None => {
                        return Err(SelectorSyntaxError::new(
                            format!("Unclosed string at {start}"),
                            start,
                        ));
                    }
                    // An escaped newline is a line continuation.
                    Some('\n' | '\x0C') => {
                        let _ = self.consume();
                    }
                    Some('\r') => {
                        let _ = self.consume();
                        if self.peek() == Some('\n') {
                            let _ = self.consume();
                        }
                    }
                    Some(_) => value.push(self.consume_escaped_code_point(start)?),
                },

                Some(c) => value.push(c),
            }
        }
    }

    /// Consume `[+-]?(digits.digits | .digits | digits)` if it is next.
    fn consume_number(&mut self) -> Option<String> {
        let start = self.position;
        let mut end = usize::from(matches!(self.peek(), Some('+' | '-')));

        let integer_digits = self.count_digits(end);
        end += integer_digits;

        if self.peek_at(end) == Some('.') && self.peek_at(end + 1).is_some_and(|c| c.is_ascii_digit()) {
            end += 1;
            end += self.count_digits(end);
        } else if integer_digits == 0 {
            return None;
        }

        self.position += end;
        Some(self.input[start..self.position].iter().collect())
    }

    fn count_digits(&self, offset: usize) -> usize {
        (offset..)
            .take_while(|&i| self.peek_at(i).is_some_and(|c| c.is_ascii_digit()))
            .count()
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_ident_sequence(&mut self, token_start: usize) -> Result<String, SelectorSyntaxError> {
        let mut result = String::new();

        loop {
            match self.peek() {
                Some(c) if is_ident_code_point(c) => {
                    result.push(c);
                    let _ = self.consume();
                }
                Some('\\') if is_valid_escape(self.peek_at(1)) => {
                    let _ = self.consume(); // \
                    result.push(self.consume_escaped_code_point(token_start)?);
                }
                _ => return Ok(result),
            }
        }
    }

    /// [§ 4.3.13 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// Called with the backslash already consumed. One to six hex digits,
    /// optionally followed by a single whitespace character (`\r\n` counts as
    /// one), denote a code point; any other character escapes itself.
    fn consume_escaped_code_point(&mut self, token_start: usize) -> Result<char, SelectorSyntaxError> {
        let Some(first) = self.consume() else {
            return Ok('\u{FFFD}');
        };
        if !first.is_ascii_hexdigit() {
            return Ok(first);
        }

        let mut hex = first.to_string();
        while hex.len() < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            if let Some(c) = self.consume() {
                hex.push(c);
            }
        }

        if self.peek() == Some('\r') && self.peek_at(1) == Some('\n') {
            self.position += 2;
        } else if self.peek().is_some_and(is_whitespace) {
            let _ = self.consume();
        }

        let code_point = u32::from_str_radix(&hex, 16).unwrap_or(u32::MAX);
        if code_point == 0 {
            return Ok('\u{FFFD}');
        }
        char::from_u32(code_point).ok_or_else(|| {
            let literal: String = self.input[token_start..self.position].iter().collect();
            SelectorSyntaxError::new(
                format!("Invalid escape sequence '\\{hex}' in '{literal}'"),
                token_start,
            )
        })
    }

    /// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    ///
    /// A single leading hyphen is allowed; `--` is not an identifier start here.
    fn would_start_ident_sequence(&self) -> bool {
        if self.peek() == Some('-') {
            self.starts_ident_start_code_point(1)
        } else {
            self.starts_ident_start_code_point(0)
        }
    }

    fn starts_ident_start_code_point(&self, offset: usize) -> bool {
        match self.peek_at(offset) {
            Some('\\') => is_valid_escape(self.peek_at(offset + 1)),
            Some(c) => is_ident_start_code_point(c),
            None => false,
        }
    }

    fn starts_name_code_point(&self, offset: usize) -> bool {
        match self.peek_at(offset) {
            Some('\\') => is_valid_escape(self.peek_at(offset + 1)),
            Some(c) => is_ident_code_point(c),
            None => false,
        }
    }

    /// Consume and return the next character.
    fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.position).copied();
        if c.is_some() {
            self.position += 1;
        }
        c
    }

    /// Peek at the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Peek at a character at an offset from current position.
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }
}

impl Iterator for Tokenizer {
    type Item = Result<Token, SelectorSyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.consume_token();
        self.finished = match &token {
            Ok(token) => token.is_eof(),
            Err(_) => true,
        };
        Some(token)
    }
}

/// Tokenize `input` into a vector ending with an EOF token.
///
/// # Errors
/// Fails on an unclosed or invalid string, or an escape that does not name a
/// Unicode scalar value.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SelectorSyntaxError> {
    Tokenizer::new(input).run()
}

/// Selector whitespace: space, tab, and the three newline characters.
/// U+00A0 NO-BREAK SPACE is deliberately not whitespace.
const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// [§ 4.2 Definitions - ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
///
/// "A letter, a non-ASCII code point, or U+005F LOW LINE (_)."
const fn is_ident_start_code_point(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.2 Definitions - ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
///
/// "An ident-start code point, a digit, or U+002D HYPHEN-MINUS (-)."
const fn is_ident_code_point(c: char) -> bool {
    is_ident_start_code_point(c) || c.is_ascii_digit() || c == '-'
}

/// A backslash starts an escape unless it is followed by a newline or EOF.
const fn is_valid_escape(next: Option<char>) -> bool {
    !matches!(next, None | Some('\n' | '\r' | '\x0C'))
}
