//! Expression tree produced by the parser.

use super::environment::{Constant, Environment, Function};
use super::error::CalcError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
            Self::Power => lhs.powf(rhs),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(f64),
    Constant(Constant),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call(Function, Vec<Expr>),
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn call(function: Function, arg: Expr) -> Self {
        Self::Call(function, vec![arg])
    }

    /// Evaluate the tree against `env`.
    ///
    /// Arithmetic follows IEEE semantics; non-finite results are rejected
    /// by the caller, not here.
    pub fn eval(&self, env: &Environment) -> Result<f64, CalcError> {
        match self {
            Self::Literal(value) => Ok(*value),
            Self::Constant(constant) => Ok(constant.value()),
            Self::Unary(UnaryOp::Negate, operand) => Ok(-operand.eval(env)?),
            Self::Binary(op, lhs, rhs) => Ok(op.apply(lhs.eval(env)?, rhs.eval(env)?)),
            Self::Call(function, args) => {
                let values = args
                    .iter()
                    .map(|arg| arg.eval(env))
                    .collect::<Result<Vec<_>, _>>()?;
                env.call(*function, &values)
            }
        }
    }
}
