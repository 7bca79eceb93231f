//! Arithmetic expression evaluator.
//!
//! This is the calculator's "binary module": a pure function from expression text
//! to a number. Expressions are parsed with `nom` into a small AST and evaluated
//! against a [`Context`] of constants and functions.
//!
//! ## Example
//!
//! ```
//! use prism_calc::evaluate_expression;
//!
//! assert_eq!(evaluate_expression("2 + 2").unwrap(), 4.0);
//! assert_eq!(evaluate_expression("-2^2").unwrap(), -4.0);
//! assert!(evaluate_expression("2 +").is_err());
//! ```

mod ast;
mod context;
mod grammar;
mod lexer;

pub use ast::{BinaryOp, Expr};
pub use context::{Arity, Context, Function};
pub use grammar::{parse_expression, MAX_NESTING};

use prism_core::{EvalError, ExpressionEvaluator};
use std::sync::OnceLock;

/// Evaluate an expression against the builtin constants and functions.
pub fn evaluate_expression(expression: &str) -> Result<f64, EvalError> {
    let expr = parse_expression(expression)?;
    builtins().eval(&expr)
}

/// The shared builtin context, created on first use.
pub fn builtins() -> &'static Context {
    static BUILTINS: OnceLock<Context> = OnceLock::new();
    BUILTINS.get_or_init(Context::new)
}

/// An evaluator handle with its own (possibly extended) context.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    context: Context,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(context: Context) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }
}

impl ExpressionEvaluator for Calculator {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        let expr = parse_expression(expression)?;
        self.context.eval(&expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(s: &str) -> f64 {
        evaluate_expression(s).unwrap_or_else(|e| panic!("{s}: {e}"))
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(eval("2+2"), 4.0);
        assert_eq!(eval("7 - 10"), -3.0);
        assert_eq!(eval("3 * 4 + 2"), 14.0);
        assert_eq!(eval("3 * (4 + 2)"), 18.0);
        assert_eq!(eval("1 / 4"), 0.25);
        assert_eq!(eval("10 % 4"), 2.0);
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(eval("10 - 4 - 3"), 3.0);
        assert_eq!(eval("64 / 4 / 2"), 8.0);
    }

    #[test]
    fn test_power() {
        assert_eq!(eval("2^10"), 1024.0);
        assert_eq!(eval("2^3^2"), 512.0);
        assert_eq!(eval("-2^2"), -4.0);
        assert_eq!(eval("2^-1"), 0.5);
    }

    #[test]
    fn test_unary() {
        assert_eq!(eval("-3"), -3.0);
        assert_eq!(eval("+3"), 3.0);
        assert_eq!(eval("--3"), 3.0);
        assert_eq!(eval("4 * -2"), -8.0);
    }

    #[test]
    fn test_number_formats() {
        assert_eq!(eval("1.5"), 1.5);
        assert_eq!(eval(".5"), 0.5);
        assert_eq!(eval("1e3"), 1000.0);
        assert_eq!(eval("2.5E-1"), 0.25);
    }

    #[test]
    fn test_constants_and_functions() {
        assert!((eval("pi") - std::f64::consts::PI).abs() < 1e-12);
        assert!((eval("e") - std::f64::consts::E).abs() < 1e-12);
        assert_eq!(eval("sqrt(16)"), 4.0);
        assert_eq!(eval("abs(-2.5)"), 2.5);
        assert_eq!(eval("max(1, 7, 3)"), 7.0);
        assert_eq!(eval("min(4)"), 4.0);
        assert_eq!(eval("floor(2.7) + ceil(2.2)"), 5.0);
        assert!((eval("atan2(1, 1)") - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert!((eval("ln(e)") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(eval("  1 +\t2 \n"), 3.0);
        assert_eq!(eval("sqrt ( 9 )"), 3.0);
    }

    #[test]
    fn test_division_by_zero_is_not_an_error() {
        assert_eq!(eval("1/0"), f64::INFINITY);
        assert!(eval("0/0").is_nan());
    }

    #[test]
    fn test_errors() {
        assert_eq!(evaluate_expression(""), Err(EvalError::Empty));
        assert_eq!(evaluate_expression("   "), Err(EvalError::Empty));
        assert!(matches!(evaluate_expression("2 +"), Err(EvalError::Syntax { .. })));
        assert!(matches!(evaluate_expression("(1"), Err(EvalError::Syntax { .. })));
        assert!(matches!(evaluate_expression("2 3"), Err(EvalError::Syntax { .. })));
        assert!(matches!(evaluate_expression("hello"), Err(EvalError::UnknownVariable { .. })));
        assert!(matches!(evaluate_expression("foo(1)"), Err(EvalError::UnknownFunction { .. })));
        assert!(matches!(evaluate_expression("sqrt(1, 2)"), Err(EvalError::ArgumentCount { .. })));
        assert!(matches!(evaluate_expression("max()"), Err(EvalError::ArgumentCount { .. })));
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let parens = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(evaluate_expression(&parens), Err(EvalError::TooDeep { limit: MAX_NESTING }));
        let negations = format!("{}1", "-".repeat(10_000));
        assert_eq!(evaluate_expression(&negations), Err(EvalError::TooDeep { limit: MAX_NESTING }));
    }

    #[test]
    fn test_long_flat_chains() {
        let sum = vec!["1"; 10_000].join(" + ");
        assert_eq!(eval(&sum), 10_000.0);
        let product = vec!["1"; 10_000].join("*");
        assert_eq!(eval(&product), 1.0);
        let mixed = format!("100{}", " - 1".repeat(10_000));
        assert_eq!(eval(&mixed), -9_900.0);
    }

    #[test]
    fn test_syntax_error_offset() {
        match evaluate_expression("1 + 2 )") {
            Err(EvalError::Syntax { offset, found }) => {
                assert_eq!(offset, 6);
                assert_eq!(found, ")");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_calculator_with_variables() {
        let mut calc = Calculator::new();
        calc.context_mut().var("x", 3.0);
        assert_eq!(calc.evaluate("x^2 + 1"), Ok(10.0));
        assert!(evaluate_expression("x").is_err());
    }
}
