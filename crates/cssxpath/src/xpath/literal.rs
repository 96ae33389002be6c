//! XPath 1.0 string literals and name checks.
//!
//! [XPath 1.0 § 3.7 Lexical Structure](https://www.w3.org/TR/1999/REC-xpath-19991116/#exprlex):
//! a `Literal` is `'"' [^"]* '"' | "'" [^']* "'"`. There is no escape
//! mechanism, so a value holding both quote characters has to be assembled
//! with `concat()`.

/// Render `value` as an XPath 1.0 expression that evaluates to `value`.
///
/// ```
/// use cssxpath::xpath_literal;
///
/// assert_eq!(xpath_literal("foo"), "'foo'");
/// assert_eq!(xpath_literal("it's"), "\"it's\"");
/// assert_eq!(xpath_literal("'\"'"), "concat(\"'\",'\"',\"'\")");
/// ```
#[must_use]
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    if !value.contains('"') {
        return format!("\"{value}\"");
    }

    let chars: Vec<char> = value.chars().collect();
    let parts: Vec<String> = chars
        .chunk_by(|a, b| (*a == '\'') == (*b == '\''))
        .map(|run| {
            let run: String = run.iter().collect();
            if run.starts_with('\'') {
                format!("\"{run}\"")
            } else {
                format!("'{run}'")
            }
        })
        .collect();
    format!("concat({})", parts.join(","))
}

/// Returns true if `name` can be written as a bare XPath name test,
/// i.e. it matches `^[a-zA-Z_][a-zA-Z0-9_.-]*$`.
#[must_use]
pub fn is_safe_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Returns true if `value` is non-empty and free of selector whitespace.
#[must_use]
pub fn is_non_whitespace(value: &str) -> bool {
    !value.is_empty() && !value.contains([' ', '\t', '\r', '\n', '\x0C'])
}
