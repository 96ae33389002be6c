//! Handlers for every syntax tree variant.
//!
//! These are free functions so that a translator overriding one method of
//! [`Translator`] can still fall back to the shared behaviour for the rest.

use core::str::FromStr;

use super::expr::XPathExpr;
use super::literal::{is_non_whitespace, is_safe_name, xpath_literal};
use super::pseudo::{FunctionalPseudoClass, PseudoClass};
use super::{Translator, TranslatorOptions};
use crate::error::{Result, SelectorError};
use crate::selector::{AttributeOperator, Combinator, SelectorNode, parse_series_tokens};
use crate::tokenizer::{Token, TokenKind};

/// Dispatch on the node variant.
///
/// Children are translated through `translator.xpath` so that overrides
/// apply at every depth.
///
/// # Errors
/// Propagates the first expression error of any handler.
pub fn translate<T: Translator + ?Sized>(translator: &T, node: &SelectorNode) -> Result<XPathExpr> {
    let options = translator.options();
    match node {
        SelectorNode::Element { namespace, name } => Ok(element(options, namespace.as_deref(), name.as_deref())),

        SelectorNode::Hash { selector, id } => {
            let attrib = format!("@{}", options.id_attribute);
            Ok(attrib_equals(translator.xpath(selector)?, &attrib, id))
        }

        SelectorNode::Class { selector, name } => Ok(attrib_includes(translator.xpath(selector)?, "@class", name)),

        SelectorNode::Attrib {
            selector,
            namespace,
            name,
            operator,
            value,
        } => {
            let xpath = translator.xpath(selector)?;
            let attrib = attribute_reference(options, namespace.as_deref(), name);
            let value = value.as_ref().map_or_else(String::new, |token| {
                if options.lower_case_attribute_values {
                    token.value.to_ascii_lowercase()
                } else {
                    token.value.clone()
                }
            });
            Ok(match operator {
                AttributeOperator::Exists => xpath.add_condition(&attrib),
                AttributeOperator::Equals => attrib_equals(xpath, &attrib, &value),
                AttributeOperator::Includes => attrib_includes(xpath, &attrib, &value),
                AttributeOperator::DashMatch => attrib_dash_match(xpath, &attrib, &value),
                AttributeOperator::PrefixMatch => attrib_prefix_match(xpath, &attrib, &value),
                AttributeOperator::SuffixMatch => attrib_suffix_match(xpath, &attrib, &value),
                AttributeOperator::SubstringMatch => attrib_substring_match(xpath, &attrib, &value),
                AttributeOperator::NotEqual => attrib_different(xpath, &attrib, &value),
            })
        }

        SelectorNode::Pseudo { selector, ident } => {
            let xpath = translator.xpath(selector)?;
            match PseudoClass::from_str(ident) {
                Ok(pseudo_class) => translator.pseudo_class(xpath, pseudo_class),
                Err(_) => translator.custom_pseudo_class(xpath, ident),
            }
        }

        SelectorNode::Function {
            selector,
            name,
            arguments,
        } => {
            let xpath = translator.xpath(selector)?;
            match FunctionalPseudoClass::from_str(name) {
                Ok(function) => translator.function(xpath, function, arguments),
                Err(_) => translator.custom_function(xpath, name, arguments),
            }
        }

        SelectorNode::Negation {
            selector,
            subselector,
        } => {
            let xpath = translator.xpath(selector)?;
            let inner = translator.xpath(subselector)?.add_name_test();
            if inner.condition.is_empty() {
                // `:not(*)`
                Ok(xpath.add_condition("0"))
            } else {
                Ok(xpath.add_condition(&format!("not({})", inner.condition)))
            }
        }

        SelectorNode::Relation {
            selector,
            combinator,
            subselector,
        } => {
            let xpath = translator.xpath(selector)?;
            let relative = relative_xpath(translator, *combinator, subselector)?;
            Ok(xpath.add_condition(&relative.to_string()))
        }

        SelectorNode::Matching { selector, branches }
        | SelectorNode::SpecificityAdjustment { selector, branches } => {
            let xpath = translator.xpath(selector)?;
            let conditions = branches
                .iter()
                .map(|branch| Ok(translator.xpath(branch)?.add_name_test().condition))
                .collect::<Result<Vec<_>>>()?;

            // A branch without condition matches everything.
            if conditions.iter().any(String::is_empty) {
                return Ok(xpath);
            }
            let condition = if conditions.len() == 1 {
                conditions.concat()
            } else {
                conditions
                    .iter()
                    .map(|condition| format!("({condition})"))
                    .collect::<Vec<_>>()
                    .join(" or ")
            };
            Ok(xpath.add_condition(&condition))
        }

        SelectorNode::Combined {
            left,
            combinator,
            right,
        } => Ok(combine(translator.xpath(left)?, *combinator, translator.xpath(right)?)),
    }
}

/// Node test for an element, falling back to a `name()` comparison when the
/// name cannot be written bare.
fn element(options: &TranslatorOptions, namespace: Option<&str>, name: Option<&str>) -> XPathExpr {
    let (mut element, mut safe) = match name {
        None => ("*".to_owned(), true),
        Some(name) if options.lower_case_element_names => (name.to_ascii_lowercase(), is_safe_name(name)),
        Some(name) => (name.to_owned(), is_safe_name(name)),
    };
    // Namespace prefixes are case-sensitive.
    if let Some(namespace) = namespace {
        element = format!("{namespace}:{element}");
        safe = safe && is_safe_name(namespace);
    }

    let xpath = XPathExpr::new(element);
    if safe { xpath } else { xpath.add_name_test() }
}

/// `@name`, or an `attribute::*` step when the name is not a valid XPath name.
fn attribute_reference(options: &TranslatorOptions, namespace: Option<&str>, name: &str) -> String {
    let mut name = if options.lower_case_attribute_names {
        name.to_ascii_lowercase()
    } else {
        name.to_owned()
    };
    let mut safe = is_safe_name(&name);
    if let Some(namespace) = namespace {
        name = format!("{namespace}:{name}");
        safe = safe && is_safe_name(namespace);
    }

    if safe {
        format!("@{name}")
    } else {
        format!("attribute::*[name() = {}]", xpath_literal(&name))
    }
}

/// Join two translated compounds with the axis for `combinator`.
pub(crate) fn combine(left: XPathExpr, combinator: Combinator, right: XPathExpr) -> XPathExpr {
    match combinator {
        Combinator::Descendant => left.join("/descendant-or-self::*/", right),
        Combinator::Child => left.join("/", right),
        Combinator::NextSibling => left
            .join("/following-sibling::", right)
            .add_name_test()
            .add_condition("position() = 1"),
        Combinator::SubsequentSibling => left.join("/following-sibling::", right),
    }
}

/// Translate the argument of `:has()` relative to the element it qualifies.
fn relative_xpath<T: Translator + ?Sized>(
    translator: &T,
    anchor: Combinator,
    node: &SelectorNode,
) -> Result<XPathExpr> {
    if let SelectorNode::Combined {
        left,
        combinator,
        right,
    } = node
    {
        let left = relative_xpath(translator, anchor, left)?;
        return Ok(combine(left, *combinator, translator.xpath(right)?));
    }

    let xpath = translator.xpath(node)?;
    Ok(match anchor {
        Combinator::Descendant => xpath.add_prefix("descendant::"),
        Combinator::Child => xpath.add_prefix("./"),
        Combinator::NextSibling => xpath
            .add_name_test()
            .add_condition("position() = 1")
            .add_prefix("following-sibling::"),
        Combinator::SubsequentSibling => xpath.add_prefix("following-sibling::"),
    })
}

/// `[attr=value]`
#[must_use]
pub fn attrib_equals(xpath: XPathExpr, name: &str, value: &str) -> XPathExpr {
    xpath.add_condition(&format!("{name} = {}", xpath_literal(value)))
}

/// `[attr!=value]`
#[must_use]
pub fn attrib_different(xpath: XPathExpr, name: &str, value: &str) -> XPathExpr {
    if value.is_empty() {
        xpath.add_condition(&format!("{name} != {}", xpath_literal(value)))
    } else {
        xpath.add_condition(&format!("not({name}) or {name} != {}", xpath_literal(value)))
    }
}

/// `[attr~=value]`; an empty value or one containing whitespace never matches.
#[must_use]
pub fn attrib_includes(xpath: XPathExpr, name: &str, value: &str) -> XPathExpr {
    if !is_non_whitespace(value) {
        return xpath.add_condition("0");
    }
    xpath.add_condition(&format!(
        "{name} and contains(concat(' ', normalize-space({name}), ' '), {})",
        xpath_literal(&format!(" {value} "))
    ))
}

/// `[attr|=value]`
#[must_use]
pub fn attrib_dash_match(xpath: XPathExpr, name: &str, value: &str) -> XPathExpr {
    xpath.add_condition(&format!(
        "{name} and ({name} = {} or starts-with({name}, {}))",
        xpath_literal(value),
        xpath_literal(&format!("{value}-"))
    ))
}

/// `[attr^=value]`; an empty value never matches.
#[must_use]
pub fn attrib_prefix_match(xpath: XPathExpr, name: &str, value: &str) -> XPathExpr {
    if value.is_empty() {
        return xpath.add_condition("0");
    }
    xpath.add_condition(&format!("{name} and starts-with({name}, {})", xpath_literal(value)))
}

/// `[attr$=value]`; an empty value never matches.
///
/// XPath 1.0 has `starts-with()` but no `ends-with()`, so the suffix is cut
/// out with `substring()`.
#[must_use]
pub fn attrib_suffix_match(xpath: XPathExpr, name: &str, value: &str) -> XPathExpr {
    if value.is_empty() {
        return xpath.add_condition("0");
    }
    let offset = value.chars().count() - 1;
    xpath.add_condition(&format!(
        "{name} and substring({name}, string-length({name})-{offset}) = {}",
        xpath_literal(value)
    ))
}

/// `[attr*=value]`; an empty value never matches.
#[must_use]
pub fn attrib_substring_match(xpath: XPathExpr, name: &str, value: &str) -> XPathExpr {
    if value.is_empty() {
        return xpath.add_condition("0");
    }
    xpath.add_condition(&format!("{name} and contains({name}, {})", xpath_literal(value)))
}

/// Generic translation of a non-functional pseudo-class.
///
/// # Errors
/// The `*-of-type` pseudo-classes need a concrete element name.
pub fn pseudo_class(xpath: XPathExpr, pseudo_class: PseudoClass) -> Result<XPathExpr> {
    let condition = match pseudo_class {
        PseudoClass::Root => "not(parent::*)".to_owned(),
        // Only meaningful as the context node, which is the first one.
        PseudoClass::Scope => "1".to_owned(),
        PseudoClass::FirstChild => "count(preceding-sibling::*) = 0".to_owned(),
        PseudoClass::LastChild => "count(following-sibling::*) = 0".to_owned(),
        PseudoClass::FirstOfType => {
            let element = of_type_element(&xpath, "*:first-of-type")?;
            format!("count(preceding-sibling::{element}) = 0")
        }
        PseudoClass::LastOfType => {
            let element = of_type_element(&xpath, "*:last-of-type")?;
            format!("count(following-sibling::{element}) = 0")
        }
        PseudoClass::OnlyChild => "count(parent::*/child::*) = 1".to_owned(),
        PseudoClass::OnlyOfType => {
            let element = of_type_element(&xpath, "*:only-of-type")?;
            format!("count(parent::*/child::{element}) = 1")
        }
        PseudoClass::Empty => "not(*) and not(string-length())".to_owned(),
        PseudoClass::Link
        | PseudoClass::Visited
        | PseudoClass::Hover
        | PseudoClass::Active
        | PseudoClass::Focus
        | PseudoClass::FocusWithin
        | PseudoClass::Target
        | PseudoClass::TargetWithin
        | PseudoClass::Enabled
        | PseudoClass::Disabled
        | PseudoClass::Checked => "0".to_owned(),
    };
    Ok(xpath.add_condition(&condition))
}

/// Generic translation of a functional pseudo-class.
///
/// # Errors
/// Malformed `An+B` series, `*:nth-of-type()`, or a `:contains()` / `:lang()`
/// argument that is not a single string or identifier.
pub fn function(xpath: XPathExpr, function: FunctionalPseudoClass, arguments: &[Token]) -> Result<XPathExpr> {
    match function {
        FunctionalPseudoClass::NthChild => nth_child(xpath, arguments, false, false),
        FunctionalPseudoClass::NthLastChild => nth_child(xpath, arguments, true, false),
        FunctionalPseudoClass::NthOfType => nth_child(xpath, arguments, false, true),
        FunctionalPseudoClass::NthLastOfType => nth_child(xpath, arguments, true, true),
        FunctionalPseudoClass::Contains => {
            let value = single_string_argument(function, arguments)?;
            Ok(xpath.add_condition(&format!("contains(., {})", xpath_literal(value))))
        }
        FunctionalPseudoClass::Lang => {
            let value = single_string_argument(function, arguments)?;
            Ok(xpath.add_condition(&format!("lang({})", xpath_literal(value))))
        }
    }
}

/// The value of the only argument, which must be a string or an identifier.
///
/// # Errors
/// Any other argument list.
pub fn single_string_argument(function: FunctionalPseudoClass, arguments: &[Token]) -> Result<&str> {
    match arguments {
        [token] if matches!(token.kind, TokenKind::String | TokenKind::Ident) => Ok(&token.value),
        _ => {
            let got: Vec<String> = arguments.iter().map(ToString::to_string).collect();
            Err(SelectorError::expression(format!(
                "Expected a single string or ident for :{function}(), got [{}]",
                got.join(", ")
            )))
        }
    }
}

fn of_type_element<'a>(xpath: &'a XPathExpr, what: &str) -> Result<&'a str> {
    if xpath.element == "*" {
        Err(SelectorError::expression(format!("{what} is not implemented")))
    } else {
        Ok(&xpath.element)
    }
}

/// [§ 14.4.4 :nth-child()](https://www.w3.org/TR/selectors-4/#the-nth-child-pseudo)
///
/// An element matches `An+B` when its 1-based index among its siblings is
/// `a*n + b` for some `n >= 0`. With `P` the number of preceding (or, for
/// `last`, following) siblings, that is `P - (b - 1) = a*n`: a range guard
/// on the sign of `a` plus a divisibility test when `|a| > 1`.
fn nth_child(xpath: XPathExpr, arguments: &[Token], last: bool, of_type: bool) -> Result<XPathExpr> {
    let node_test = if of_type {
        let what = if last { "*:nth-last-of-type()" } else { "*:nth-of-type()" };
        of_type_element(&xpath, what)?.to_owned()
    } else {
        "*".to_owned()
    };

    let (a, b) = parse_series_tokens(arguments)
        .map_err(|error| SelectorError::expression(format!("Invalid series: {error}")))?;
    let out_of_range =
        || SelectorError::expression(format!("Invalid series: {a}n{b:+} is out of range"));
    let b_min_1 = b.checked_sub(1).ok_or_else(out_of_range)?;

    // Every sibling position satisfies n + b with b <= 1.
    if a == 1 && b_min_1 <= 0 {
        return Ok(xpath);
    }
    // Decreasing from below the first position.
    if a < 0 && b_min_1 < 0 {
        return Ok(xpath.add_condition("0"));
    }

    let axis = if last { "following-sibling" } else { "preceding-sibling" };
    let siblings_count = format!("count({axis}::{node_test})");

    if a == 0 {
        if b <= 0 {
            return Ok(xpath.add_condition("0"));
        }
        return Ok(xpath.add_condition(&format!("{siblings_count} = {b_min_1}")));
    }

    let mut expressions = Vec::new();
    if a > 0 {
        // P >= 0 always holds, so the guard only matters for b - 1 > 0.
        if b_min_1 > 0 {
            expressions.push(format!("{siblings_count} >= {b_min_1}"));
        }
    } else {
        expressions.push(format!("{siblings_count} <= {b_min_1}"));
    }

    let modulus = a.checked_abs().ok_or_else(out_of_range)?;
    if modulus != 1 {
        // (P - (b - 1)) mod |a| = 0, with the offset folded into [0, |a|).
        let offset = (modulus - b_min_1.rem_euclid(modulus)) % modulus;
        let left = if offset == 0 {
            siblings_count
        } else {
            format!("({siblings_count} +{offset})")
        };
        expressions.push(format!("{left} mod {modulus} = 0"));
    }

    let condition = if expressions.len() > 1 {
        expressions
            .iter()
            .map(|expression| format!("({expression})"))
            .collect::<Vec<_>>()
            .join(" and ")
    } else {
        expressions.concat()
    };
    Ok(xpath.add_condition(&condition))
}
