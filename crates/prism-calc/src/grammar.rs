//! Grammar rules for arithmetic expressions.
//!
//! Precedence, lowest first: `+ -`, `* / %`, unary `+ -`, `^` (right associative).
//! Unary minus binds looser than `^`, so `-2^2` is `-(2^2)`.

use nom::{
    branch::alt,
    character::complete::{char, one_of},
    combinator::{all_consuming, map, opt},
    error::{Error, ErrorKind},
    multi::{fold_many0, separated_list0},
    sequence::{delimited, pair, preceded},
    IResult,
};

use prism_core::EvalError;

use crate::ast::{BinaryOp, Expr};
use crate::lexer::{identifier, number, ws};

const MAX_FOUND_LEN: usize = 16;

/// Deepest nesting of parentheses, call arguments, unary signs, and exponents.
pub const MAX_NESTING: usize = 128;

/// Parse a complete expression.
pub fn parse_expression(input: &str) -> Result<Expr, EvalError> {
    if input.trim().is_empty() {
        return Err(EvalError::Empty);
    }

    match all_consuming(ws(|i| sum(i, 0)))(input) {
        Ok((_, expr)) => Ok(expr),
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::TooLarge => {
            Err(EvalError::TooDeep { limit: MAX_NESTING })
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(syntax_error(input, e.input)),
        Err(nom::Err::Incomplete(_)) => Err(syntax_error(input, "")),
    }
}

fn syntax_error(input: &str, rest: &str) -> EvalError {
    EvalError::Syntax {
        offset: input.len() - rest.len(),
        found: rest.trim().chars().take(MAX_FOUND_LEN).collect(),
    }
}

fn sum(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (input, first) = product(input, depth)?;
    fold_many0(
        pair(ws(one_of("+-")), |i| product(i, depth)),
        move || first.clone(),
        fold_binary,
    )(input)
}

fn product(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (input, first) = unary(input, depth)?;
    fold_many0(
        pair(ws(one_of("*/%")), |i| unary(i, depth)),
        move || first.clone(),
        fold_binary,
    )(input)
}

fn fold_binary(lhs: Expr, (symbol, rhs): (char, Expr)) -> Expr {
    match BinaryOp::from_symbol(symbol) {
        Some(op) => Expr::binary(op, lhs, rhs),
        None => lhs,
    }
}

/// Every recursive rule passes through here, so this is where nesting is capped.
fn unary(input: &str, depth: usize) -> IResult<&str, Expr> {
    if depth > MAX_NESTING {
        return Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)));
    }
    alt((
        map(preceded(ws(char('-')), |i| unary(i, depth + 1)), Expr::neg),
        preceded(ws(char('+')), |i| unary(i, depth + 1)),
        |i| power(i, depth),
    ))(input)
}

fn power(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (input, base) = atom(input, depth)?;
    let (input, exponent) = opt(preceded(ws(char('^')), |i| unary(i, depth + 1)))(input)?;
    let expr = match exponent {
        Some(exp) => Expr::binary(BinaryOp::Pow, base, exp),
        None => base,
    };
    Ok((input, expr))
}

fn atom(input: &str, depth: usize) -> IResult<&str, Expr> {
    ws(alt((
        map(number, Expr::Number),
        |i| call_or_variable(i, depth),
        delimited(ws(char('(')), |i| sum(i, depth + 1), ws(char(')'))),
    )))(input)
}

fn call_or_variable(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (input, name) = identifier(input)?;
    let (input, args) = opt(delimited(
        ws(char('(')),
        separated_list0(ws(char(',')), |i| sum(i, depth + 1)),
        ws(char(')')),
    ))(input)?;

    let expr = match args {
        Some(args) => Expr::Call {
            name: name.to_string(),
            args,
        },
        None => Expr::Variable(name.to_string()),
    };
    Ok((input, expr))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(v: f64) -> Expr {
        Expr::Number(v)
    }

    #[test]
    fn test_precedence() {
        let expr = parse_expression("1 + 2 * 3").unwrap();
        assert_eq!(
            expr,
            Expr::binary(BinaryOp::Add, num(1.0), Expr::binary(BinaryOp::Mul, num(2.0), num(3.0)))
        );
    }

    #[test]
    fn test_unary_binds_looser_than_power() {
        let expr = parse_expression("-2^2").unwrap();
        assert_eq!(expr, Expr::neg(Expr::binary(BinaryOp::Pow, num(2.0), num(2.0))));
    }

    #[test]
    fn test_power_right_associative() {
        let expr = parse_expression("2^3^2").unwrap();
        assert_eq!(
            expr,
            Expr::binary(BinaryOp::Pow, num(2.0), Expr::binary(BinaryOp::Pow, num(3.0), num(2.0)))
        );
    }

    #[test]
    fn test_call_arguments() {
        let expr = parse_expression("max(1, 2 + 3)").unwrap();
        assert_eq!(
            expr,
            Expr::Call {
                name: "max".into(),
                args: vec![num(1.0), Expr::binary(BinaryOp::Add, num(2.0), num(3.0))],
            }
        );
    }

    #[test]
    fn test_empty_call() {
        let expr = parse_expression("f()").unwrap();
        assert_eq!(expr, Expr::Call { name: "f".into(), args: vec![] });
    }

    #[test]
    fn test_nesting_at_limit_parses() {
        let input = format!("{}1{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(parse_expression(&input), Ok(num(1.0)));
    }

    #[test]
    fn test_deep_parentheses_rejected() {
        let input = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(parse_expression(&input), Err(EvalError::TooDeep { limit: MAX_NESTING }));
    }

    #[test]
    fn test_deep_unary_rejected() {
        let input = format!("{}1", "-".repeat(10_000));
        assert_eq!(parse_expression(&input), Err(EvalError::TooDeep { limit: MAX_NESTING }));
        let input = format!("{}1", "+ ".repeat(10_000));
        assert_eq!(parse_expression(&input), Err(EvalError::TooDeep { limit: MAX_NESTING }));
    }

    #[test]
    fn test_deep_exponent_chain_rejected() {
        let input = format!("2{}", "^2".repeat(10_000));
        assert_eq!(parse_expression(&input), Err(EvalError::TooDeep { limit: MAX_NESTING }));
    }

    #[test]
    fn test_deep_call_arguments_rejected() {
        let input = format!("{}1{}", "abs(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(parse_expression(&input), Err(EvalError::TooDeep { limit: MAX_NESTING }));
    }

    #[test]
    fn test_trailing_garbage() {
        assert_eq!(
            parse_expression("1 + 1 $"),
            Err(EvalError::Syntax { offset: 6, found: "$".into() })
        );
    }
}
