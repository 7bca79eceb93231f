//! Expression tree.

/// A parsed arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn neg(inner: Expr) -> Self {
        Expr::Neg(Box::new(inner))
    }
}

impl Drop for Expr {
    /// Tear the tree down with an explicit stack; long operator chains are deep.
    fn drop(&mut self) {
        let mut stack = Vec::new();
        take_children(self, &mut stack);
        while let Some(mut expr) = stack.pop() {
            take_children(&mut expr, &mut stack);
        }
    }
}

fn take_children(expr: &mut Expr, stack: &mut Vec<Expr>) {
    let hollow = || Expr::Number(0.0);
    match expr {
        Expr::Neg(inner) => stack.push(std::mem::replace(inner.as_mut(), hollow())),
        Expr::Binary { lhs, rhs, .. } => {
            stack.push(std::mem::replace(lhs.as_mut(), hollow()));
            stack.push(std::mem::replace(rhs.as_mut(), hollow()));
        }
        Expr::Call { args, .. } => stack.append(args),
        Expr::Number(_) | Expr::Variable(_) => {}
    }
}

/// Binary operators, in the order they appear in the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl BinaryOp {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Sub),
            '*' => Some(BinaryOp::Mul),
            '/' => Some(BinaryOp::Div),
            '%' => Some(BinaryOp::Rem),
            '^' => Some(BinaryOp::Pow),
            _ => None,
        }
    }

    /// IEEE semantics throughout; division by zero is not an error.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
            BinaryOp::Rem => lhs % rhs,
            BinaryOp::Pow => lhs.powf(rhs),
        }
    }
}
