//! Token-level parsers for expressions.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit0, digit1, multispace0, one_of},
    combinator::{map_res, opt, recognize},
    sequence::{delimited, pair, tuple},
    IResult,
};

/// Wrap a parser so it skips surrounding whitespace.
pub fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parse an identifier (ASCII letter or underscore, then alphanumerics/underscores).
pub fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

/// Parse an unsigned number: `12`, `1.5`, `1.`, `.5`, with optional exponent.
pub fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        )),
        |s: &str| s.parse::<f64>(),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier() {
        assert_eq!(identifier("sqrt(2)"), Ok(("(2)", "sqrt")));
        assert_eq!(identifier("_x1 + 2"), Ok((" + 2", "_x1")));
        assert!(identifier("1x").is_err());
    }

    #[test]
    fn test_number() {
        assert_eq!(number("42"), Ok(("", 42.0)));
        assert_eq!(number("3.25)"), Ok((")", 3.25)));
        assert_eq!(number(".5"), Ok(("", 0.5)));
        assert_eq!(number("1e-2"), Ok(("", 0.01)));
        assert_eq!(number("2e"), Ok(("e", 2.0)));
        assert!(number("-1").is_err());
    }
}
