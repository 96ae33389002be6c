//! Selector to XPath 1.0 translation.
//!
//! [`Translator`] walks a [`SelectorNode`] tree and folds it into an
//! [`XPathExpr`]. The provided methods implement the generic, document-type
//! agnostic mapping; [`HtmlTranslator`] overrides the few pseudo-classes whose
//! meaning depends on HTML element semantics.

use crate::error::{Result, SelectorError};
use crate::selector::{PseudoElement, Selector, SelectorNode, parse};
use crate::tokenizer::Token;

/// The [`XPathExpr`] builder.
pub mod expr;
/// Node-variant handlers shared by every translator.
pub mod generic;
/// HTML-aware translator.
pub mod html;
/// String literal escaping and name checks.
pub mod literal;
/// Pseudo-class name tables.
pub mod pseudo;

pub use expr::XPathExpr;
pub use html::HtmlTranslator;
pub use literal::{is_non_whitespace, is_safe_name, xpath_literal};
pub use pseudo::{FunctionalPseudoClass, PseudoClass};

/// Axis prepended to translated selectors unless the caller asks otherwise.
pub const DEFAULT_PREFIX: &str = "descendant-or-self::";

/// Document-language settings consulted during translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorOptions {
    /// ASCII-lower-case element names before emitting node tests.
    pub lower_case_element_names: bool,
    /// ASCII-lower-case attribute names.
    pub lower_case_attribute_names: bool,
    /// ASCII-lower-case attribute comparison values.
    pub lower_case_attribute_values: bool,
    /// Attribute matched by `#id`.
    pub id_attribute: String,
    /// Attribute inspected by the HTML `:lang()`.
    pub lang_attribute: String,
}

impl Default for TranslatorOptions {
    /// XML rules: everything is case-sensitive and language comes from
    /// `xml:lang`.
    fn default() -> Self {
        Self {
            lower_case_element_names: false,
            lower_case_attribute_names: false,
            lower_case_attribute_values: false,
            id_attribute: "id".to_owned(),
            lang_attribute: "xml:lang".to_owned(),
        }
    }
}

impl TranslatorOptions {
    /// HTML rules: element and attribute names are case-insensitive.
    #[must_use]
    pub fn html() -> Self {
        Self {
            lower_case_element_names: true,
            lower_case_attribute_names: true,
            lang_attribute: "lang".to_owned(),
            ..Self::default()
        }
    }

    /// XHTML rules: HTML semantics with case-sensitive names.
    #[must_use]
    pub fn xhtml() -> Self {
        Self {
            lang_attribute: "lang".to_owned(),
            ..Self::default()
        }
    }
}

/// Converts parsed selectors to XPath 1.0.
///
/// Implementors only supply [`options`](Self::options). Every other method
/// has a default; override [`pseudo_class`](Self::pseudo_class) or
/// [`function`](Self::function) to change a built-in, and the `custom_*` /
/// [`pseudo_element`](Self::pseudo_element) hooks to add new names.
pub trait Translator {
    /// Settings for this document language.
    fn options(&self) -> &TranslatorOptions;

    /// Translate a whole selector group, pseudo-elements included. The
    /// selectors of a group are joined with `" | "`.
    ///
    /// # Errors
    /// Returns a syntax error if `css` does not parse, or an expression
    /// error if some part of it has no XPath equivalent.
    fn css_to_xpath(&self, css: &str, prefix: &str) -> Result<String> {
        let xpaths = parse(css)?
            .iter()
            .map(|selector| self.selector_to_xpath(selector, prefix, true))
            .collect::<Result<Vec<_>>>()?;
        Ok(xpaths.join(" | "))
    }

    /// Translate one parsed selector and prepend `prefix`.
    ///
    /// The pseudo-element is ignored unless `translate_pseudo_elements` is
    /// set, in which case it goes through [`pseudo_element`](Self::pseudo_element).
    ///
    /// # Errors
    /// Returns an expression error for anything without an XPath equivalent.
    fn selector_to_xpath(
        &self,
        selector: &Selector,
        prefix: &str,
        translate_pseudo_elements: bool,
    ) -> Result<String> {
        let mut xpath = self.xpath(&selector.parsed_tree)?;
        let pseudo_element = selector
            .pseudo_element
            .as_ref()
            .filter(|_| translate_pseudo_elements);
        if let Some(pseudo_element) = pseudo_element {
            xpath = self.pseudo_element(xpath, pseudo_element)?;
        }
        Ok(format!("{prefix}{xpath}"))
    }

    /// Translate a single tree node.
    ///
    /// # Errors
    /// Returns an expression error for anything without an XPath equivalent.
    fn xpath(&self, node: &SelectorNode) -> Result<XPathExpr> {
        generic::translate(self, node)
    }

    /// Translate a known pseudo-class.
    ///
    /// # Errors
    /// `*:first-of-type` and friends need an element name.
    fn pseudo_class(&self, xpath: XPathExpr, pseudo_class: PseudoClass) -> Result<XPathExpr> {
        generic::pseudo_class(xpath, pseudo_class)
    }

    /// Translate a known functional pseudo-class.
    ///
    /// # Errors
    /// Returns an expression error for malformed arguments.
    fn function(
        &self,
        xpath: XPathExpr,
        function: FunctionalPseudoClass,
        arguments: &[Token],
    ) -> Result<XPathExpr> {
        generic::function(xpath, function, arguments)
    }

    /// Hook for pseudo-classes missing from [`PseudoClass`].
    ///
    /// # Errors
    /// The default rejects every name.
    fn custom_pseudo_class(&self, _xpath: XPathExpr, name: &str) -> Result<XPathExpr> {
        Err(SelectorError::expression(format!("The pseudo-class :{name} is unknown")))
    }

    /// Hook for functional pseudo-classes missing from [`FunctionalPseudoClass`].
    ///
    /// # Errors
    /// The default rejects every name.
    fn custom_function(&self, _xpath: XPathExpr, name: &str, _arguments: &[Token]) -> Result<XPathExpr> {
        Err(SelectorError::expression(format!("The pseudo-class :{name}() is unknown")))
    }

    /// Hook for the trailing pseudo-element of a selector.
    ///
    /// # Errors
    /// The default rejects every pseudo-element.
    fn pseudo_element(&self, _xpath: XPathExpr, _pseudo_element: &PseudoElement) -> Result<XPathExpr> {
        Err(SelectorError::expression("Pseudo-elements are not supported."))
    }
}

/// Translator for generic XML documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericTranslator {
    options: TranslatorOptions,
}

impl GenericTranslator {
    /// A translator with XML defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A translator with custom options.
    #[must_use]
    pub const fn with_options(options: TranslatorOptions) -> Self {
        Self { options }
    }
}

impl Translator for GenericTranslator {
    fn options(&self) -> &TranslatorOptions {
        &self.options
    }
}
