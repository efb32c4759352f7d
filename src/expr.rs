use std::{
    error::Error,
    fmt::{self, Display},
    rc::Rc,
};

use crate::environment::Environment;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
            Self::Power => a.powf(b),
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
        };
        write!(f, "{op}")
    }
}

pub type ExprRef = Box<Expr>;

/// Parsed form of one input line. Lines are the source lines of the
/// identifier or operator, used when reporting evaluation errors.
#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Literal(f64),
    Identifier(Rc<str>, usize),
    Assignment(Rc<str>, usize, ExprRef),
    Binary(ExprRef, BinaryOp, usize, ExprRef),
    Unary(usize, ExprRef),
}

impl Expr {
    pub fn eval(&self, env: &mut Environment) -> Result<f64, EvalErr> {
        match self {
            Self::Literal(v) => Ok(*v),
            Self::Identifier(id, line) => env
                .get(id)
                .ok_or_else(|| EvalErr::UnresolvedIdentifier(id.clone(), *line)),
            Self::Assignment(id, _, val) => {
                let r = val.eval(env)?;
                env.set(id.clone(), r);
                Ok(r)
            }
            Self::Binary(x, op, line, y) => {
                let l = x.eval(env)?;
                let r = y.eval(env)?;

                if *op == BinaryOp::Divide && r == 0.0 {
                    return Err(EvalErr::DivisionByZero(*line));
                }

                Ok(op.apply(l, r))
            }
            Self::Unary(_, x) => Ok(-x.eval(env)?),
        }
    }
}

/// Prints the tree fully parenthesised, mostly for debug logging.
impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => write!(f, "{v}"),
            Self::Identifier(id, _) => write!(f, "{id}"),
            Self::Assignment(id, _, val) => write!(f, "({id} = {val})"),
            Self::Binary(x, op, _, y) => write!(f, "({x} {op} {y})"),
            Self::Unary(_, x) => write!(f, "(-{x})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EvalErr {
    UnresolvedIdentifier(Rc<str>, usize),
    DivisionByZero(usize),
}

impl EvalErr {
    pub fn line(&self) -> usize {
        match self {
            Self::UnresolvedIdentifier(_, line) | Self::DivisionByZero(line) => *line,
        }
    }
}

impl Display for EvalErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Runtime error: ", self.line())?;
        match self {
            Self::UnresolvedIdentifier(id, _) => write!(f, "Unresolved identifier: '{id}'"),
            Self::DivisionByZero(_) => write!(f, "Can't divide by zero"),
        }
    }
}

impl Error for EvalErr {}
