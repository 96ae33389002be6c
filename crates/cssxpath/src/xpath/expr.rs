//! The value threaded through translation.

use core::fmt;

use super::literal::xpath_literal;

/// A location step under construction: `prefix path element [condition]`.
///
/// Every method consumes the expression and returns the updated one, so a
/// translation builds its result left to right without shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XPathExpr {
    /// Everything before `path`; after a [`join`](Self::join) this is the
    /// rendered left-hand side plus the combiner.
    pub prefix: String,
    /// Steps between the prefix and the element node test.
    pub path: String,
    /// The node test, `*` by default.
    pub element: String,
    /// Predicate without brackets; empty when there is none.
    pub condition: String,
    /// Set by [`add_star_prefix`](Self::add_star_prefix).
    pub star_prefix: bool,
}

impl Default for XPathExpr {
    fn default() -> Self {
        Self::new("*")
    }
}

impl XPathExpr {
    /// An expression that is just a node test.
    #[must_use]
    pub fn new(element: impl Into<String>) -> Self {
        Self::from_parts("", element)
    }

    /// An expression with a path and a node test.
    #[must_use]
    pub fn from_parts(path: impl Into<String>, element: impl Into<String>) -> Self {
        Self {
            prefix: String::new(),
            path: path.into(),
            element: element.into(),
            condition: String::new(),
            star_prefix: false,
        }
    }

    /// AND a predicate onto the current condition. Both sides are
    /// parenthesized so that an `or` in either keeps its meaning.
    #[must_use]
    pub fn add_condition(mut self, condition: &str) -> Self {
        self.condition = if self.condition.is_empty() {
            condition.to_owned()
        } else {
            format!("({}) and ({condition})", self.condition)
        };
        self
    }

    /// Replace the node test by `*` and move the name into the condition.
    /// Does nothing when the node test already is `*`.
    #[must_use]
    pub fn add_name_test(self) -> Self {
        if self.element == "*" {
            return self;
        }
        let test = format!("name() = {}", xpath_literal(&self.element));
        let mut xpath = self.add_condition(&test);
        xpath.element = "*".to_owned();
        xpath
    }

    /// Constrain the context to a single parent step by inserting `*/`.
    ///
    /// A later [`join`](Self::join) drops the segment again if it is all
    /// the path there is.
    #[must_use]
    pub fn add_star_prefix(mut self) -> Self {
        self.path.push_str("*/");
        self.star_prefix = true;
        self
    }

    /// Prepend an axis or step to the prefix.
    #[must_use]
    pub fn add_prefix(mut self, prefix: &str) -> Self {
        self.prefix.insert_str(0, prefix);
        self
    }

    /// Continue this expression with `other`, separated by `combiner`
    /// (for example `/descendant-or-self::*/`).
    #[must_use]
    pub fn join(self, combiner: &str, other: Self) -> Self {
        let mut path = other.prefix;
        path.push_str(&other.path);
        if other.star_prefix && path == "*/" {
            path.clear();
        }
        Self {
            prefix: format!("{self}{combiner}"),
            path,
            element: other.element,
            condition: other.condition,
            star_prefix: false,
        }
    }
}

impl fmt::Display for XPathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, self.path, self.element)?;
        if !self.condition.is_empty() {
            write!(f, "[{}]", self.condition)?;
        }
        Ok(())
    }
}
