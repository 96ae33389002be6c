//! CSS Selector syntax tree
//!
//! This module holds the immutable tree built by the [`parser`] per
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/), together with the
//! two total functions over it: [specificity](SelectorNode::specificity) and
//! [canonical serialization](SelectorNode::canonical).

use core::fmt;
use core::ops::Add;

use strum_macros::{Display, EnumString};

use crate::tokenizer::token::{quote, serialize_identifier, serialize_name};
use crate::tokenizer::{Token, TokenKind};

/// Recursive-descent selector parser.
pub mod parser;
/// `An+B` argument parsing for the `:nth-*()` family.
pub mod series;

pub use parser::parse;
pub use series::{parse_series, parse_series_tokens};

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Combinator {
    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A descendant combinator is whitespace that separates two compound selectors."
    #[strum(serialize = " ")]
    Descendant,

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// "A child combinator is a greater-than sign (>) that separates two compound
    /// selectors."
    #[strum(serialize = ">")]
    Child,

    /// [§ 16.3 Next-sibling combinator](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators)
    /// "A next-sibling combinator is a plus sign (+) that separates two compound
    /// selectors."
    #[strum(serialize = "+")]
    NextSibling,

    /// [§ 16.4 Subsequent-sibling combinator](https://www.w3.org/TR/selectors-4/#general-sibling-combinators)
    /// "A subsequent-sibling combinator is a tilde (~) that separates two compound
    /// selectors."
    #[strum(serialize = "~")]
    SubsequentSibling,
}

impl Combinator {
    /// The combinator as it appears between two compounds in canonical CSS.
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::Descendant => " ",
            Self::Child => " > ",
            Self::NextSibling => " + ",
            Self::SubsequentSibling => " ~ ",
        }
    }
}

/// [§ 6.1 Attribute presence and value selectors](https://www.w3.org/TR/selectors-4/#attribute-representation)
/// [§ 6.2 Substring matching attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-substrings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum AttributeOperator {
    /// `[attr]`: "Represents an element with the att attribute, whatever the
    /// value of the attribute."
    #[strum(serialize = "exists")]
    Exists,

    /// `[attr=value]`: "Represents an element with the att attribute whose
    /// value is exactly 'val'."
    #[strum(serialize = "=")]
    Equals,

    /// `[attr~=value]`: "Represents an element with the att attribute whose
    /// value is a whitespace-separated list of words, one of which is exactly
    /// 'val'."
    #[strum(serialize = "~=")]
    Includes,

    /// `[attr|=value]`: value either being exactly 'val' or beginning with
    /// 'val' immediately followed by '-'.
    #[strum(serialize = "|=")]
    DashMatch,

    /// `[attr^=value]`: value begins with the prefix 'val'.
    #[strum(serialize = "^=")]
    PrefixMatch,

    /// `[attr$=value]`: value ends with the suffix 'val'.
    #[strum(serialize = "$=")]
    SuffixMatch,

    /// `[attr*=value]`: value contains at least one instance of 'val'.
    #[strum(serialize = "*=")]
    SubstringMatch,

    /// `[attr!=value]`: non-standard: the attribute is absent or differs.
    #[strum(serialize = "!=")]
    NotEqual,
}

/// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
/// "A selector's specificity is calculated for a given element as follows:
///  - count the number of ID selectors in the selector (= A)
///  - count the number of class selectors, attributes selectors, and pseudo-classes in the selector (= B)
///  - count the number of type selectors and pseudo-elements in the selector (= C)
///
/// Specificities are compared by comparing the three components in order."
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Create a new specificity with (A, B, C) components.
    #[must_use]
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self(a, b, c)
    }

    /// The components as a tuple.
    #[must_use]
    pub const fn as_tuple(self) -> (u32, u32, u32) {
        (self.0, self.1, self.2)
    }
}

impl Add for Specificity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0, self.1, self.2)
    }
}

/// [§ 3.6 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements)
///
/// The trailing pseudo-element of a selector. Names are stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoElement {
    /// `::name`, or one of the legacy single-colon forms (`:before`,
    /// `:after`, `:first-line`, `:first-letter`).
    Simple(String),

    /// `::name(arguments)`
    Functional {
        /// Lower-cased name.
        name: String,
        /// Argument tokens, whitespace dropped.
        arguments: Vec<Token>,
    },
}

impl PseudoElement {
    /// The pseudo-element name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Simple(name) | Self::Functional { name, .. } => name,
        }
    }

    /// Argument tokens; empty for a simple pseudo-element.
    #[must_use]
    pub fn arguments(&self) -> &[Token] {
        match self {
            Self::Simple(_) => &[],
            Self::Functional { arguments, .. } => arguments,
        }
    }

    /// The kind of every argument, in order.
    #[must_use]
    pub fn argument_types(&self) -> Vec<TokenKind> {
        self.arguments().iter().map(|token| token.kind).collect()
    }

    /// Re-serialize without the leading `::`.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Simple(name) => serialize_identifier(name),
            Self::Functional { name, arguments } => {
                format!("{}({})", serialize_identifier(name), join_css(arguments))
            }
        }
    }
}

impl fmt::Display for PseudoElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple(name) => f.write_str(name),
            Self::Functional { name, arguments } => write!(f, "{name}({})", join_css(arguments)),
        }
    }
}

/// A node of the selector syntax tree.
///
/// Every qualifier wraps the selector it qualifies, so `div.a#b` is
/// `Hash { selector: Class { selector: Element(div), .. }, .. }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorNode {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors) or
    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    ///
    /// Examples: `div`, `*`, `svg|rect`
    Element {
        /// Namespace prefix; `None` for any namespace.
        namespace: Option<String>,
        /// Element name; `None` for `*`.
        name: Option<String>,
    },

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    ///
    /// Example: `#main`
    Hash {
        /// The qualified selector.
        selector: Box<SelectorNode>,
        /// The id, without `#`.
        id: String,
    },

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    ///
    /// Example: `.highlight`
    Class {
        /// The qualified selector.
        selector: Box<SelectorNode>,
        /// The class name, without `.`.
        name: String,
    },

    /// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    ///
    /// Examples: `[href]`, `[lang|=en]`, `[xlink|href^='#']`
    Attrib {
        /// The qualified selector.
        selector: Box<SelectorNode>,
        /// Namespace prefix of the attribute name.
        namespace: Option<String>,
        /// Attribute name.
        name: String,
        /// Comparison operator.
        operator: AttributeOperator,
        /// The IDENT or STRING token compared against; `None` for `Exists`.
        value: Option<Token>,
    },

    /// [§ 3.5 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    ///
    /// A non-functional pseudo-class such as `:empty`. Unknown names are
    /// accepted here and rejected by the translator.
    Pseudo {
        /// The qualified selector.
        selector: Box<SelectorNode>,
        /// Lower-cased name.
        ident: String,
    },

    /// A functional pseudo-class such as `:nth-child(2n+1)` or `:lang(fr)`.
    Function {
        /// The qualified selector.
        selector: Box<SelectorNode>,
        /// Lower-cased name.
        name: String,
        /// Argument tokens, whitespace dropped.
        arguments: Vec<Token>,
    },

    /// [§ 4.3 The Negation Pseudo-class](https://www.w3.org/TR/selectors-4/#negation)
    ///
    /// `:not(compound)`
    Negation {
        /// The qualified selector.
        selector: Box<SelectorNode>,
        /// The negated compound selector.
        subselector: Box<SelectorNode>,
    },

    /// [§ 4.5 The Relational Pseudo-class](https://www.w3.org/TR/selectors-4/#relational)
    ///
    /// `:has(> relative)`
    Relation {
        /// The qualified selector.
        selector: Box<SelectorNode>,
        /// How the argument is anchored to the qualified element.
        combinator: Combinator,
        /// The relative selector.
        subselector: Box<SelectorNode>,
    },

    /// [§ 4.2 The Matches-any Pseudo-class](https://www.w3.org/TR/selectors-4/#matches)
    ///
    /// `:is(a, b)`, also spelled `:matches(a, b)`.
    Matching {
        /// The qualified selector.
        selector: Box<SelectorNode>,
        /// Alternatives; any one of them matching is enough.
        branches: Vec<SelectorNode>,
    },

    /// [§ 4.4 The Specificity-adjustment Pseudo-class](https://www.w3.org/TR/selectors-4/#zero-matches)
    ///
    /// `:where(a, b)`: matches like `:is()`, contributes no specificity.
    SpecificityAdjustment {
        /// The qualified selector.
        selector: Box<SelectorNode>,
        /// Alternatives; any one of them matching is enough.
        branches: Vec<SelectorNode>,
    },

    /// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
    ///
    /// Two selectors joined by a combinator. Chains nest to the left:
    /// `a b > c` is `Combined(Combined(a, ' ', b), '>', c)`.
    Combined {
        /// Everything left of the combinator.
        left: Box<SelectorNode>,
        /// The combinator.
        combinator: Combinator,
        /// The compound right of the combinator.
        right: Box<SelectorNode>,
    },
}

impl SelectorNode {
    /// The universal selector `*` in any namespace.
    #[must_use]
    pub const fn universal() -> Self {
        Self::Element {
            namespace: None,
            name: None,
        }
    }

    /// Returns true for a bare `*` with no namespace.
    #[must_use]
    pub const fn is_universal(&self) -> bool {
        matches!(
            self,
            Self::Element {
                namespace: None,
                name: None
            }
        )
    }

    /// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
    ///
    /// "The specificity of an :is(), :not(), or :has() pseudo-class is replaced
    /// by the specificity of the most specific complex selector in its selector
    /// list argument."
    ///
    /// "The specificity of a :where() pseudo-class is replaced by zero."
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        match self {
            Self::Element { name, .. } => {
                if name.is_some() {
                    Specificity(0, 0, 1)
                } else {
                    Specificity::default()
                }
            }
            Self::Hash { selector, .. } => selector.specificity() + Specificity(1, 0, 0),
            Self::Class { selector, .. }
            | Self::Attrib { selector, .. }
            | Self::Pseudo { selector, .. }
            | Self::Function { selector, .. } => selector.specificity() + Specificity(0, 1, 0),
            Self::Negation {
                selector,
                subselector,
            }
            | Self::Relation {
                selector,
                subselector,
                ..
            } => selector.specificity() + subselector.specificity(),
            Self::Matching { selector, branches } => {
                let most_specific = branches
                    .iter()
                    .map(Self::specificity)
                    .max()
                    .unwrap_or_default();
                selector.specificity() + most_specific
            }
            Self::SpecificityAdjustment { selector, .. } => selector.specificity(),
            Self::Combined { left, right, .. } => left.specificity() + right.specificity(),
        }
    }

    /// Serialize back to normalized CSS.
    ///
    /// Parsing the result yields a tree with the same canonical form.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Element { namespace, name } => {
                let name = name.as_deref().map_or_else(|| "*".to_owned(), serialize_identifier);
                match namespace {
                    Some(namespace) => format!("{}|{name}", serialize_identifier(namespace)),
                    None => name,
                }
            }
            Self::Hash { selector, id } => format!("{}#{}", selector.canonical(), serialize_name(id)),
            Self::Class { selector, name } => {
                format!("{}.{}", selector.canonical(), serialize_identifier(name))
            }
            Self::Attrib {
                selector,
                namespace,
                name,
                operator,
                value,
            } => {
                let mut attrib = serialize_identifier(name);
                if let Some(namespace) = namespace {
                    attrib = format!("{}|{attrib}", serialize_identifier(namespace));
                }
                match value {
                    Some(value) => format!("{}[{attrib}{operator}{}]", selector.canonical(), value.css()),
                    None => format!("{}[{attrib}]", selector.canonical()),
                }
            }
            Self::Pseudo { selector, ident } => {
                format!("{}:{}", selector.canonical(), serialize_identifier(ident))
            }
            Self::Function {
                selector,
                name,
                arguments,
            } => format!(
                "{}:{}({})",
                selector.canonical(),
                serialize_identifier(name),
                join_css(arguments)
            ),
            Self::Negation {
                selector,
                subselector,
            } => format!(
                "{}:not({})",
                selector.canonical(),
                strip_universal(&subselector.canonical())
            ),
            Self::Relation {
                selector,
                combinator,
                subselector,
            } => {
                let anchor = match combinator {
                    Combinator::Descendant => String::new(),
                    other => format!("{other} "),
                };
                format!(
                    "{}:has({anchor}{})",
                    selector.canonical(),
                    strip_universal(&subselector.canonical())
                )
            }
            Self::Matching { selector, branches } => {
                format!("{}:is({})", selector.canonical(), join_branches(branches))
            }
            Self::SpecificityAdjustment { selector, branches } => {
                format!("{}:where({})", selector.canonical(), join_branches(branches))
            }
            Self::Combined {
                left,
                combinator,
                right,
            } => format!(
                "{}{}{}",
                left.canonical(),
                combinator.css(),
                strip_universal(&right.canonical())
            ),
        }
    }

    /// Visit this node and every node below it, parents first.
    pub fn walk<F: FnMut(&Self)>(&self, visit: &mut F) {
        visit(self);
        match self {
            Self::Element { .. } => {}
            Self::Hash { selector, .. }
            | Self::Class { selector, .. }
            | Self::Attrib { selector, .. }
            | Self::Pseudo { selector, .. }
            | Self::Function { selector, .. } => selector.walk(visit),
            Self::Negation {
                selector,
                subselector,
            }
            | Self::Relation {
                selector,
                subselector,
                ..
            } => {
                selector.walk(visit);
                subselector.walk(visit);
            }
            Self::Matching { selector, branches }
            | Self::SpecificityAdjustment { selector, branches } => {
                selector.walk(visit);
                for branch in branches {
                    branch.walk(visit);
                }
            }
            Self::Combined { left, right, .. } => {
                left.walk(visit);
                right.walk(visit);
            }
        }
    }
}

/// Debug-style rendering that spells out the tree, e.g.
/// `CombinedSelector[Element[div] > Class[Element[*].foo]]`.
impl fmt::Display for SelectorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element { namespace, name } => {
                let name = name.as_deref().unwrap_or("*");
                match namespace {
                    Some(namespace) => write!(f, "Element[{namespace}|{name}]"),
                    None => write!(f, "Element[{name}]"),
                }
            }
            Self::Hash { selector, id } => write!(f, "Hash[{selector}#{id}]"),
            Self::Class { selector, name } => write!(f, "Class[{selector}.{name}]"),
            Self::Attrib {
                selector,
                namespace,
                name,
                operator,
                value,
            } => {
                let attrib = match namespace {
                    Some(namespace) => format!("{namespace}|{name}"),
                    None => name.clone(),
                };
                match value {
                    Some(value) => write!(f, "Attrib[{selector}[{attrib} {operator} {}]]", quote(&value.value)),
                    None => write!(f, "Attrib[{selector}[{attrib}]]"),
                }
            }
            Self::Pseudo { selector, ident } => write!(f, "Pseudo[{selector}:{ident}]"),
            Self::Function {
                selector,
                name,
                arguments,
            } => {
                let arguments: Vec<String> = arguments.iter().map(|token| quote(&token.value)).collect();
                write!(f, "Function[{selector}:{name}([{}])]", arguments.join(", "))
            }
            Self::Negation {
                selector,
                subselector,
            } => write!(f, "Negation[{selector}:not({subselector})]"),
            Self::Relation {
                selector,
                combinator,
                subselector,
            } => match combinator {
                Combinator::Descendant => write!(f, "Relation[{selector}:has({subselector})]"),
                _ => write!(f, "Relation[{selector}:has({combinator} {subselector})]"),
            },
            Self::Matching { selector, branches } => {
                write!(f, "Matching[{selector}:is({})]", display_branches(branches))
            }
            Self::SpecificityAdjustment { selector, branches } => {
                write!(f, "SpecificityAdjustment[{selector}:where({})]", display_branches(branches))
            }
            Self::Combined {
                left,
                combinator,
                right,
            } => match combinator {
                Combinator::Descendant => write!(f, "CombinedSelector[{left} <followed> {right}]"),
                _ => write!(f, "CombinedSelector[{left} {combinator} {right}]"),
            },
        }
    }
}

/// One selector of a group: a tree plus its optional trailing pseudo-element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// The selector chain.
    pub parsed_tree: SelectorNode,
    /// The pseudo-element that ended the chain, if any.
    pub pseudo_element: Option<PseudoElement>,
}

impl Selector {
    /// Specificity of the chain plus one type-level point for a pseudo-element.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        let specificity = self.parsed_tree.specificity();
        if self.pseudo_element.is_some() {
            specificity + Specificity(0, 0, 1)
        } else {
            specificity
        }
    }

    /// Normalized CSS for the whole selector, e.g. `:beFOre` becomes `::before`.
    #[must_use]
    pub fn canonical(&self) -> String {
        let mut css = self.parsed_tree.canonical();
        if let Some(pseudo_element) = &self.pseudo_element {
            css.push_str("::");
            css.push_str(&pseudo_element.canonical());
        }
        strip_universal(&css).to_owned()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pseudo_element {
            Some(pseudo_element) => write!(f, "Selector[{}::{pseudo_element}]", self.parsed_tree),
            None => write!(f, "Selector[{}]", self.parsed_tree),
        }
    }
}

/// `*.foo` and `.foo` are the same selector; a lone `*` stays.
fn strip_universal(css: &str) -> &str {
    match css.strip_prefix('*') {
        Some(rest) if !rest.is_empty() => rest,
        _ => css,
    }
}

fn join_css(tokens: &[Token]) -> String {
    tokens.iter().map(Token::css).collect()
}

fn join_branches(branches: &[SelectorNode]) -> String {
    branches
        .iter()
        .map(|branch| strip_universal(&branch.canonical()).to_owned())
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_branches(branches: &[SelectorNode]) -> String {
    branches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
