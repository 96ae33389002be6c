//! HTML-aware translation.
//!
//! [HTML § 4.16.3 Pseudo-classes](https://html.spec.whatwg.org/multipage/semantics-other.html#pseudo-classes)
//! defines which elements match `:checked`, `:link`, `:disabled` and
//! `:enabled`. The generic translator cannot know this and always emits `0`
//! for them.

use super::expr::XPathExpr;
use super::generic::{self, single_string_argument};
use super::literal::xpath_literal;
use super::pseudo::{FunctionalPseudoClass, PseudoClass};
use super::{Translator, TranslatorOptions};
use crate::error::Result;
use crate::tokenizer::Token;

/// Form controls that can be disabled directly or through a fieldset.
const FORM_CONTROL: &str = "(name(.) = 'input' and @type != 'hidden') or name(.) = 'button' \
     or name(.) = 'select' or name(.) = 'textarea'";

const LINK: &str = "@href and (name(.) = 'a' or name(.) = 'link' or name(.) = 'area')";

/// Translator for HTML (or, with [`xhtml`](Self::xhtml), XHTML) documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTranslator {
    options: TranslatorOptions,
}

impl Default for HtmlTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlTranslator {
    /// Case-insensitive element and attribute names.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: TranslatorOptions::html(),
        }
    }

    /// Case-sensitive names, as in XHTML.
    #[must_use]
    pub fn xhtml() -> Self {
        Self {
            options: TranslatorOptions::xhtml(),
        }
    }
}

const CHECKED: &str = "(@selected and name(.) = 'option') or \
     (@checked and (name(.) = 'input' or name(.) = 'command') \
     and (@type = 'checkbox' or @type = 'radio'))";

fn disabled() -> String {
    format!(
        "(@disabled and (({FORM_CONTROL}) or name(.) = 'command' or name(.) = 'fieldset' \
         or name(.) = 'optgroup' or name(.) = 'option')) \
         or (({FORM_CONTROL}) and ancestor::fieldset[@disabled])"
    )
}

fn enabled() -> String {
    format!(
        "({LINK}) \
         or ((name(.) = 'command' or name(.) = 'fieldset' or name(.) = 'optgroup') and not(@disabled)) \
         or (({FORM_CONTROL} or name(.) = 'keygen') and not(@disabled or ancestor::fieldset[@disabled])) \
         or (name(.) = 'option' and not(@disabled or ancestor::optgroup[@disabled]))"
    )
}

impl Translator for HtmlTranslator {
    fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    fn pseudo_class(&self, xpath: XPathExpr, pseudo_class: PseudoClass) -> Result<XPathExpr> {
        let condition = match pseudo_class {
            PseudoClass::Checked => CHECKED.to_owned(),
            // Every link counts as unvisited.
            PseudoClass::Link => LINK.to_owned(),
            PseudoClass::Disabled => disabled(),
            PseudoClass::Enabled => enabled(),
            _ => return generic::pseudo_class(xpath, pseudo_class),
        };
        Ok(xpath.add_condition(&condition))
    }

    /// `:lang()` compares against the nearest `lang` attribute as an ASCII
    /// case-insensitive prefix ending at a `-` boundary.
    fn function(
        &self,
        xpath: XPathExpr,
        function: FunctionalPseudoClass,
        arguments: &[Token],
    ) -> Result<XPathExpr> {
        if function != FunctionalPseudoClass::Lang {
            return generic::function(xpath, function, arguments);
        }

        let value = single_string_argument(function, arguments)?;
        let lang = &self.options.lang_attribute;
        let condition = format!(
            "ancestor-or-self::*[@{lang}][1][starts-with(concat(translate(@{lang}, \
             'ABCDEFGHIJKLMNOPQRSTUVWXYZ', 'abcdefghijklmnopqrstuvwxyz'), '-'), {})]",
            xpath_literal(&format!("{}-", value.to_ascii_lowercase()))
        );
        Ok(xpath.add_condition(&condition))
    }
}
