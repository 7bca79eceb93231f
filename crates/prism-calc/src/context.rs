//! Evaluation context: named constants and functions.

use indexmap::IndexMap;
use smallvec::SmallVec;
use std::fmt;

use prism_core::EvalError;

use crate::ast::Expr;

/// Arguments collected for a single call; most builtins take one or two.
type Args = SmallVec<[f64; 4]>;

/// Register one-argument `f64` methods under their own names.
macro_rules! unary_builtins {
    ($ctx:expr, $($name:ident),+ $(,)?) => {
        $( $ctx.func(stringify!($name), Arity::Exactly(1), |a| a[0].$name()); )+
    };
}

/// How many arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// A callable function.
#[derive(Clone, Copy)]
pub struct Function {
    pub arity: Arity,
    pub body: fn(&[f64]) -> f64,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function").field("arity", &self.arity).finish()
    }
}

/// Named constants and functions available to expressions.
///
/// Both tables keep insertion order so they can be listed for the user.
#[derive(Debug, Clone)]
pub struct Context {
    vars: IndexMap<String, f64>,
    funcs: IndexMap<String, Function>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// A context with the builtin constants and functions.
    pub fn new() -> Self {
        let mut ctx = Self::empty();
        ctx.var("pi", std::f64::consts::PI);
        ctx.var("e", std::f64::consts::E);

        unary_builtins!(
            ctx, sqrt, exp, ln, abs, sin, cos, tan, asin, acos, atan, sinh, cosh, tanh,
            asinh, acosh, atanh, floor, ceil, round, signum
        );

        ctx.func("atan2", Arity::Exactly(2), |a| a[0].atan2(a[1]));
        ctx.func("max", Arity::AtLeast(1), |a| {
            a.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        });
        ctx.func("min", Arity::AtLeast(1), |a| {
            a.iter().copied().fold(f64::INFINITY, f64::min)
        });
        ctx
    }

    /// A context with nothing defined.
    pub fn empty() -> Self {
        Self {
            vars: IndexMap::new(),
            funcs: IndexMap::new(),
        }
    }

    /// Define or replace a variable.
    pub fn var(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.vars.insert(name.into(), value);
        self
    }

    /// Define or replace a function.
    pub fn func(&mut self, name: impl Into<String>, arity: Arity, body: fn(&[f64]) -> f64) -> &mut Self {
        self.funcs.insert(name.into(), Function { arity, body });
        self
    }

    pub fn get_var(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }

    pub fn get_func(&self, name: &str) -> Option<&Function> {
        self.funcs.get(name)
    }

    /// Variables in definition order.
    pub fn variables(&self) -> impl Iterator<Item = (&str, f64)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Function names in definition order.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.funcs.keys().map(String::as_str)
    }

    /// Evaluate a parsed expression.
    pub fn eval(&self, expr: &Expr) -> Result<f64, EvalError> {
        match expr {
            Expr::Number(v) => Ok(*v),
            Expr::Variable(name) => self
                .get_var(name)
                .ok_or_else(|| EvalError::UnknownVariable { name: name.clone() }),
            Expr::Neg(inner) => Ok(-self.eval(inner)?),
            Expr::Binary { .. } => self.eval_chain(expr),
            Expr::Call { name, args } => {
                let func = self
                    .get_func(name)
                    .ok_or_else(|| EvalError::UnknownFunction { name: name.clone() })?;
                if !func.arity.accepts(args.len()) {
                    return Err(EvalError::ArgumentCount {
                        name: name.clone(),
                        expected: func.arity.to_string(),
                        got: args.len(),
                    });
                }
                let values = args.iter().map(|a| self.eval(a)).collect::<Result<Args, _>>()?;
                Ok((func.body)(&values))
            }
        }
    }

    /// Evaluate a left-leaning chain of binary operators without recursing down its spine.
    fn eval_chain(&self, expr: &Expr) -> Result<f64, EvalError> {
        let mut pending = Vec::new();
        let mut node = expr;
        while let Expr::Binary { op, lhs, rhs } = node {
            pending.push((*op, rhs.as_ref()));
            node = lhs.as_ref();
        }

        let mut acc = self.eval(node)?;
        for (op, rhs) in pending.into_iter().rev() {
            acc = op.apply(acc, self.eval(rhs)?);
        }
        Ok(acc)
    }
}
