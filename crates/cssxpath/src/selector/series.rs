//! [§ 6 The An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
//!
//! "The An+B notation defines an integer step (A) and offset (B), and
//! represents the An+Bth elements in a list, for every positive integer or
//! zero value of n, with the first element in the list having index 1."

use crate::error::SeriesError;
use crate::tokenizer::{Token, TokenKind};

/// Parse an `An+B` argument into `(a, b)`.
///
/// Whitespace anywhere in the argument is ignored and keywords are matched
/// ASCII case-insensitively.
///
/// | input    | result    |
/// |----------|-----------|
/// | `2n+1`   | `(2, 1)`  |
/// | `odd`    | `(2, 1)`  |
/// | `even`   | `(2, 0)`  |
/// | `-n+3`   | `(-1, 3)` |
/// | `5`      | `(0, 5)`  |
/// | `""`/`*` | `(0, 0)`  |
///
/// # Errors
/// Returns [`SeriesError::Malformed`] when the text is not `An+B`.
pub fn parse_series(argument: &str) -> Result<(i64, i64), SeriesError> {
    let malformed = || SeriesError::Malformed(argument.to_owned());

    let s: String = argument
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    match s.as_str() {
        "" | "*" => return Ok((0, 0)),
        "odd" => return Ok((2, 1)),
        "even" => return Ok((2, 0)),
        "n" => return Ok((1, 0)),
        _ => {}
    }

    let Some((a, b)) = s.split_once('n') else {
        let b = s.parse().map_err(|_| malformed())?;
        return Ok((0, b));
    };

    let a = match a {
        "" | "+" => 1,
        "-" => -1,
        _ => a.parse().map_err(|_| malformed())?,
    };
    // A dangling sign ("n+", "2n-") is rejected by the integer parse.
    let b = if b.is_empty() {
        0
    } else {
        b.parse().map_err(|_| malformed())?
    };

    Ok((a, b))
}

/// Parse the argument tokens of an `:nth-*()` function.
///
/// # Errors
/// Returns [`SeriesError::StringArgument`] if any argument is a quoted
/// string, otherwise whatever [`parse_series`] returns for the joined text.
pub fn parse_series_tokens(arguments: &[Token]) -> Result<(i64, i64), SeriesError> {
    if arguments.iter().any(|token| token.kind == TokenKind::String) {
        return Err(SeriesError::StringArgument);
    }
    let text: String = arguments.iter().map(|token| token.value.as_str()).collect();
    parse_series(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(parse_series("odd"), Ok((2, 1)));
        assert_eq!(parse_series("EVEN"), Ok((2, 0)));
        assert_eq!(parse_series("n"), Ok((1, 0)));
        assert_eq!(parse_series("*"), Ok((0, 0)));
        assert_eq!(parse_series(""), Ok((0, 0)));
    }

    #[test]
    fn test_linear_forms() {
        assert_eq!(parse_series("2n+1"), Ok((2, 1)));
        assert_eq!(parse_series("2n + 1"), Ok((2, 1)));
        assert_eq!(parse_series("-n+3"), Ok((-1, 3)));
        assert_eq!(parse_series("+n"), Ok((1, 0)));
        assert_eq!(parse_series("n-5"), Ok((1, -5)));
        assert_eq!(parse_series("-2n"), Ok((-2, 0)));
        assert_eq!(parse_series("5"), Ok((0, 5)));
        assert_eq!(parse_series("-5"), Ok((0, -5)));
    }

    #[test]
    fn test_malformed() {
        for bad in ["foo", "n+", "n-", "2n+b", "1.5n", "nn"] {
            assert!(
                matches!(parse_series(bad), Err(SeriesError::Malformed(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_tokens() {
        let tokens = [
            Token::new(TokenKind::Number, "2", 0),
            Token::new(TokenKind::Ident, "n", 1),
            Token::new(TokenKind::Number, "+1", 2),
        ];
        assert_eq!(parse_series_tokens(&tokens), Ok((2, 1)));

        let tokens = [Token::new(TokenKind::String, "2n", 0)];
        assert_eq!(parse_series_tokens(&tokens), Err(SeriesError::StringArgument));
    }
}
