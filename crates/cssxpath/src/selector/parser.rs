//! [§ 18 Grammar](https://www.w3.org/TR/selectors-4/#grammar)
//!
//! Recursive-descent parser over a materialized token vector. One token of
//! lookahead is enough for the whole grammar except the attribute `|=`
//! operator, which needs two.

use core::str::FromStr;

use super::{AttributeOperator, Combinator, PseudoElement, Selector, SelectorNode};
use crate::error::{Result, SelectorSyntaxError};
use crate::tokenizer::{Token, TokenKind, tokenize};

type ParseResult<T> = core::result::Result<T, SelectorSyntaxError>;

/// CSS 2.1 pseudo-elements that may still be written with a single colon.
const LEGACY_PSEUDO_ELEMENTS: [&str; 4] = ["before", "after", "first-line", "first-letter"];

/// Parse a comma-separated selector group.
///
/// # Errors
/// Returns [`SelectorError::Syntax`](crate::SelectorError::Syntax) for the
/// first token that does not fit the grammar.
pub fn parse(css: &str) -> Result<Vec<Selector>> {
    let tokens = tokenize(css)?;
    Parser::new(tokens).parse_selector_group().map_err(Into::into)
}

/// Where a compound selector sits in the grammar.
#[derive(Debug, Clone, Copy, Default)]
struct Context {
    /// Inside a functional pseudo-class, so `)` ends the compound.
    nested: bool,
    /// Inside `:not()`, where another `:not()` is forbidden.
    in_negation: bool,
    /// First compound of a selector; the only place `:scope` may anchor.
    at_start: bool,
}

struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    /// Returned by `peek`/`next` once the tokens run out.
    eof: Token,
}

impl Parser {
    fn new(mut tokens: Vec<Token>) -> Self {
        let eof = match tokens.pop() {
            Some(token) if token.is_eof() => token,
            Some(token) => {
                let end = token.position + token.value.chars().count();
                tokens.push(token);
                Token::eof(end)
            }
            None => Token::eof(0),
        };
        Self {
            tokens,
            cursor: 0,
            eof,
        }
    }

    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        self.tokens.get(self.cursor + offset).unwrap_or(&self.eof)
    }

    fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
        token
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_whitespace() {
            self.cursor += 1;
        }
    }

    fn next_ident(&mut self) -> ParseResult<String> {
        let next = self.next();
        if next.kind == TokenKind::Ident {
            Ok(next.value)
        } else {
            Err(SelectorSyntaxError::unexpected("Expected ident", &next))
        }
    }

    /// `None` stands for `*`.
    fn next_ident_or_star(&mut self) -> ParseResult<Option<String>> {
        let next = self.next();
        if next.kind == TokenKind::Ident {
            Ok(Some(next.value))
        } else if next.is_delim('*') {
            Ok(None)
        } else {
            Err(SelectorSyntaxError::unexpected("Expected ident or '*'", &next))
        }
    }

    fn peek_combinator(&self) -> Option<Combinator> {
        let peek = self.peek();
        if peek.is_delim_in(&['+', '>', '~']) {
            Combinator::from_str(&peek.value).ok()
        } else {
            None
        }
    }

    /// `selector_group := selector (',' S* selector)*`
    fn parse_selector_group(&mut self) -> ParseResult<Vec<Selector>> {
        let mut selectors = Vec::new();
        self.skip_whitespace();
        loop {
            let (parsed_tree, pseudo_element) = self.parse_selector(false)?;
            selectors.push(Selector {
                parsed_tree,
                pseudo_element,
            });
            if !self.peek().is_delim(',') {
                return Ok(selectors);
            }
            let _ = self.next();
            self.skip_whitespace();
        }
    }

    /// `selector := compound (combinator compound)*`
    ///
    /// Stops before `,`, EOF, or when nested, `)`.
    fn parse_selector(&mut self, nested: bool) -> ParseResult<(SelectorNode, Option<PseudoElement>)> {
        let context = Context {
            nested,
            at_start: true,
            ..Context::default()
        };
        let (mut result, mut pseudo_element) = self.parse_compound(context)?;

        loop {
            self.skip_whitespace();
            let peek = self.peek();
            if peek.is_eof() || peek.is_delim(',') || (nested && peek.is_delim(')')) {
                break;
            }
            if let Some(pseudo_element) = &pseudo_element {
                return Err(not_at_end(pseudo_element, peek));
            }

            let combinator = match self.peek_combinator() {
                Some(combinator) => {
                    let _ = self.next();
                    self.skip_whitespace();
                    combinator
                }
                None => Combinator::Descendant,
            };

            let (right, right_pseudo_element) = self.parse_compound(Context {
                at_start: false,
                ..context
            })?;
            pseudo_element = right_pseudo_element;
            result = SelectorNode::Combined {
                left: Box::new(result),
                combinator,
                right: Box::new(right),
            };
        }

        Ok((result, pseudo_element))
    }

    /// `compound := [ns '|'] (ident | '*') qualifier*`, where each qualifier
    /// is a hash, class, attribute, pseudo-class or trailing pseudo-element.
    fn parse_compound(&mut self, context: Context) -> ParseResult<(SelectorNode, Option<PseudoElement>)> {
        self.skip_whitespace();
        let start = self.cursor;

        let peek = self.peek();
        let mut result = if peek.kind == TokenKind::Ident || peek.is_delim('*') {
            let first = self.next_ident_or_star()?;
            if self.peek().is_delim('|') {
                let _ = self.next();
                SelectorNode::Element {
                    namespace: first,
                    name: self.next_ident_or_star()?,
                }
            } else {
                SelectorNode::Element {
                    namespace: None,
                    name: first,
                }
            }
        } else if peek.is_delim('|') {
            let _ = self.next();
            SelectorNode::Element {
                namespace: None,
                name: self.next_ident_or_star()?,
            }
        } else {
            // No type selector: the compound qualifies an implicit `*`.
            SelectorNode::universal()
        };
        let mut pseudo_element = None;

        loop {
            let peek = self.peek().clone();
            if peek.is_whitespace()
                || peek.is_eof()
                || peek.is_delim_in(&[',', '+', '>', '~'])
                || (context.nested && peek.is_delim(')'))
            {
                break;
            }
            if let Some(pseudo_element) = &pseudo_element {
                return Err(not_at_end(pseudo_element, &peek));
            }

            if peek.kind == TokenKind::Hash {
                let _ = self.next();
                result = SelectorNode::Hash {
                    selector: Box::new(result),
                    id: peek.value,
                };
            } else if peek.is_delim('.') {
                let _ = self.next();
                result = SelectorNode::Class {
                    selector: Box::new(result),
                    name: self.next_ident()?,
                };
            } else if peek.is_delim('[') {
                let _ = self.next();
                result = self.parse_attrib(result)?;
            } else if peek.is_delim(':') {
                let _ = self.next();

                if self.peek().is_delim(':') {
                    let _ = self.next();
                    let name = self.next_ident()?.to_ascii_lowercase();
                    pseudo_element = Some(if self.peek().is_delim('(') {
                        let _ = self.next();
                        PseudoElement::Functional {
                            name,
                            arguments: self.parse_arguments()?,
                        }
                    } else {
                        PseudoElement::Simple(name)
                    });
                    continue;
                }

                let ident = self.next_ident()?.to_ascii_lowercase();
                if LEGACY_PSEUDO_ELEMENTS.contains(&ident.as_str()) {
                    pseudo_element = Some(PseudoElement::Simple(ident));
                    continue;
                }

                if !self.peek().is_delim('(') {
                    if ident == "scope" && result.is_universal() && !context.at_start {
                        return Err(SelectorSyntaxError::at(
                            "Got immediate child pseudo-element \":scope\" not at the start of a selector",
                            &peek,
                        ));
                    }
                    result = SelectorNode::Pseudo {
                        selector: Box::new(result),
                        ident,
                    };
                    continue;
                }

                let _ = self.next(); // (
                self.skip_whitespace();
                result = match ident.as_str() {
                    "not" => self.parse_negation(result, context)?,
                    "has" => self.parse_relation(result)?,
                    "is" | "matches" | "where" => self.parse_matching(result, &ident)?,
                    _ => SelectorNode::Function {
                        selector: Box::new(result),
                        name: ident,
                        arguments: self.parse_arguments()?,
                    },
                };
            } else {
                return Err(SelectorSyntaxError::unexpected("Expected selector", &peek));
            }
        }

        if self.cursor == start {
            return Err(SelectorSyntaxError::unexpected("Expected selector", self.peek()));
        }
        Ok((result, pseudo_element))
    }

    /// `attrib := '[' S* [ns '|'] ident S* [operator S* (ident | string) S*] ']'`
    ///
    /// The opening `[` has been consumed.
    fn parse_attrib(&mut self, selector: SelectorNode) -> ParseResult<SelectorNode> {
        self.skip_whitespace();
        let attrib = self.next_ident_or_star()?;

        let (namespace, name, operator) = match attrib {
            // `[lang|=en]`: the pipe belongs to the operator.
            Some(attrib) if self.peek().is_delim('|') && self.peek_at(1).is_delim('=') => {
                let _ = self.next();
                let _ = self.next();
                (None, attrib, Some(AttributeOperator::DashMatch))
            }
            Some(attrib) if self.peek().is_delim('|') => {
                let _ = self.next();
                (Some(attrib), self.next_ident()?, None)
            }
            Some(attrib) => (None, attrib, None),
            // `[*|attr]` is any namespace, the same as no prefix.
            None => {
                let next = self.next();
                if !next.is_delim('|') {
                    return Err(SelectorSyntaxError::unexpected("Expected '|'", &next));
                }
                (None, self.next_ident()?, None)
            }
        };

        let operator = match operator {
            Some(operator) => operator,
            None => {
                self.skip_whitespace();
                let next = self.next();
                if next.is_delim(']') {
                    return Ok(SelectorNode::Attrib {
                        selector: Box::new(selector),
                        namespace,
                        name,
                        operator: AttributeOperator::Exists,
                        value: None,
                    });
                } else if next.is_delim('=') {
                    AttributeOperator::Equals
                } else if next.is_delim_in(&['^', '$', '*', '~', '|', '!']) && self.peek().is_delim('=') {
                    let _ = self.next();
                    AttributeOperator::from_str(&format!("{}=", next.value))
                        .map_err(|_| SelectorSyntaxError::unexpected("Operator expected", &next))?
                } else {
                    return Err(SelectorSyntaxError::unexpected("Operator expected", &next));
                }
            }
        };

        self.skip_whitespace();
        let value = self.next();
        if !matches!(value.kind, TokenKind::Ident | TokenKind::String) {
            return Err(SelectorSyntaxError::unexpected("Expected string or ident", &value));
        }
        self.skip_whitespace();
        let next = self.next();
        if !next.is_delim(']') {
            return Err(SelectorSyntaxError::unexpected("Expected ']'", &next));
        }

        Ok(SelectorNode::Attrib {
            selector: Box::new(selector),
            namespace,
            name,
            operator,
            value: Some(value),
        })
    }

    /// Arguments of a functional pseudo-class or pseudo-element, up to and
    /// including the closing `)`.
    fn parse_arguments(&mut self) -> ParseResult<Vec<Token>> {
        let mut arguments = Vec::new();
        loop {
            self.skip_whitespace();
            let next = self.next();
            if matches!(next.kind, TokenKind::Ident | TokenKind::String | TokenKind::Number)
                || next.is_delim_in(&['+', '-'])
            {
                arguments.push(next);
            } else if next.is_delim(')') {
                return Ok(arguments);
            } else {
                return Err(SelectorSyntaxError::unexpected("Expected an argument", &next));
            }
        }
    }

    /// `:not(compound)`: no combinators, no pseudo-element, no nested `:not()`.
    fn parse_negation(&mut self, selector: SelectorNode, context: Context) -> ParseResult<SelectorNode> {
        if context.in_negation {
            return Err(SelectorSyntaxError::at("Got nested :not()", self.peek()));
        }

        let (subselector, pseudo_element) = self.parse_compound(Context {
            nested: true,
            in_negation: true,
            at_start: true,
        })?;
        self.skip_whitespace();
        let next = self.next();
        if let Some(pseudo_element) = pseudo_element {
            return Err(SelectorSyntaxError::at(
                format!(
                    "Got pseudo-element ::{pseudo_element} inside :not() at {}",
                    next.position
                ),
                &next,
            ));
        }
        if !next.is_delim(')') {
            return Err(SelectorSyntaxError::unexpected("Expected ')'", &next));
        }

        Ok(SelectorNode::Negation {
            selector: Box::new(selector),
            subselector: Box::new(subselector),
        })
    }

    /// `:has([combinator] selector)` with exactly one argument.
    fn parse_relation(&mut self, selector: SelectorNode) -> ParseResult<SelectorNode> {
        let combinator = match self.peek_combinator() {
            Some(combinator) => {
                let _ = self.next();
                self.skip_whitespace();
                combinator
            }
            None => Combinator::Descendant,
        };

        let (subselector, pseudo_element) = self.parse_selector(true)?;
        if let Some(pseudo_element) = pseudo_element {
            return Err(inside_function(&pseudo_element, self.peek()));
        }
        let next = self.next();
        if !next.is_delim(')') {
            return Err(SelectorSyntaxError::unexpected("Expected an argument", &next));
        }

        Ok(SelectorNode::Relation {
            selector: Box::new(selector),
            combinator,
            subselector: Box::new(subselector),
        })
    }

    /// `:is(compound, ...)`, `:matches(...)` and `:where(...)`.
    fn parse_matching(&mut self, selector: SelectorNode, name: &str) -> ParseResult<SelectorNode> {
        let mut branches = Vec::new();
        loop {
            let (branch, pseudo_element) = self.parse_compound(Context {
                nested: true,
                in_negation: false,
                at_start: true,
            })?;
            if let Some(pseudo_element) = pseudo_element {
                return Err(inside_function(&pseudo_element, self.peek()));
            }
            branches.push(branch);

            self.skip_whitespace();
            let next = self.next();
            if next.is_delim(')') {
                break;
            }
            if !next.is_delim(',') {
                return Err(SelectorSyntaxError::unexpected("Expected an argument", &next));
            }
        }

        let selector = Box::new(selector);
        Ok(if name == "where" {
            SelectorNode::SpecificityAdjustment { selector, branches }
        } else {
            SelectorNode::Matching { selector, branches }
        })
    }
}

fn not_at_end(pseudo_element: &PseudoElement, token: &Token) -> SelectorSyntaxError {
    SelectorSyntaxError::at(
        format!("Got pseudo-element ::{pseudo_element} not at the end of a selector"),
        token,
    )
}

fn inside_function(pseudo_element: &PseudoElement, token: &Token) -> SelectorSyntaxError {
    SelectorSyntaxError::at(
        format!("Got pseudo-element ::{pseudo_element} inside function"),
        token,
    )
}
