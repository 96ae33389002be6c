//! Name tables for the pseudo-classes the translators know about.
//!
//! A name that does not parse into one of these enums is handed to the
//! translator's `custom_*` hooks instead.

use strum_macros::{Display, EnumIter, EnumString};

/// Non-functional pseudo-classes, e.g. `:first-child`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum PseudoClass {
    /// [§ 14.1 :root](https://www.w3.org/TR/selectors-4/#the-root-pseudo)
    Root,
    /// [§ 9.2 :scope](https://www.w3.org/TR/selectors-4/#the-scope-pseudo)
    Scope,
    /// [§ 14.4.1 :first-child](https://www.w3.org/TR/selectors-4/#the-first-child-pseudo)
    FirstChild,
    /// [§ 14.4.2 :last-child](https://www.w3.org/TR/selectors-4/#the-last-child-pseudo)
    LastChild,
    /// [§ 14.5.1 :first-of-type](https://www.w3.org/TR/selectors-4/#the-first-of-type-pseudo)
    FirstOfType,
    /// [§ 14.5.2 :last-of-type](https://www.w3.org/TR/selectors-4/#the-last-of-type-pseudo)
    LastOfType,
    /// [§ 14.4.3 :only-child](https://www.w3.org/TR/selectors-4/#the-only-child-pseudo)
    OnlyChild,
    /// [§ 14.5.3 :only-of-type](https://www.w3.org/TR/selectors-4/#the-only-of-type-pseudo)
    OnlyOfType,
    /// [§ 14.2 :empty](https://www.w3.org/TR/selectors-4/#the-empty-pseudo)
    Empty,
    /// [§ 8.2 :link](https://www.w3.org/TR/selectors-4/#link)
    Link,
    /// [§ 8.2 :visited](https://www.w3.org/TR/selectors-4/#link)
    Visited,
    /// [§ 10.1 :hover](https://www.w3.org/TR/selectors-4/#the-hover-pseudo)
    Hover,
    /// [§ 10.2 :active](https://www.w3.org/TR/selectors-4/#the-active-pseudo)
    Active,
    /// [§ 10.3 :focus](https://www.w3.org/TR/selectors-4/#the-focus-pseudo)
    Focus,
    /// [§ 10.5 :focus-within](https://www.w3.org/TR/selectors-4/#the-focus-within-pseudo)
    FocusWithin,
    /// [§ 8.4 :target](https://www.w3.org/TR/selectors-4/#the-target-pseudo)
    Target,
    /// `:target-within`, from earlier Selectors 4 drafts.
    TargetWithin,
    /// [§ 13.1.1 :enabled](https://www.w3.org/TR/selectors-4/#enableddisabled)
    Enabled,
    /// [§ 13.1.1 :disabled](https://www.w3.org/TR/selectors-4/#enableddisabled)
    Disabled,
    /// [§ 13.3.1 :checked](https://www.w3.org/TR/selectors-4/#checked)
    Checked,
}

impl PseudoClass {
    /// States that depend on user interaction or history. A static
    /// document never has them, so they always compile to `0`.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(
            self,
            Self::Visited
                | Self::Hover
                | Self::Active
                | Self::Focus
                | Self::FocusWithin
                | Self::Target
                | Self::TargetWithin
        )
    }
}

/// Functional pseudo-classes other than `:not()`, `:has()`, `:is()` and
/// `:where()`, which get their own syntax tree nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum FunctionalPseudoClass {
    /// [§ 14.4.4 :nth-child()](https://www.w3.org/TR/selectors-4/#the-nth-child-pseudo)
    NthChild,
    /// [§ 14.4.5 :nth-last-child()](https://www.w3.org/TR/selectors-4/#the-nth-last-child-pseudo)
    NthLastChild,
    /// [§ 14.5.4 :nth-of-type()](https://www.w3.org/TR/selectors-4/#the-nth-of-type-pseudo)
    NthOfType,
    /// [§ 14.5.5 :nth-last-of-type()](https://www.w3.org/TR/selectors-4/#the-nth-last-of-type-pseudo)
    NthLastOfType,
    /// `:contains(text)`: case-sensitive substring of the string value.
    Contains,
    /// [§ 7.2 :lang()](https://www.w3.org/TR/selectors-4/#the-lang-pseudo)
    Lang,
}
