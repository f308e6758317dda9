//! Calculator engine.
//!
//! This module provides functionality to:
//! - Normalize keypad notation into a canonical expression
//! - Parse and evaluate expressions against a fixed function table
//! - Decide when a partial expression should be previewed

mod detection;
mod environment;
mod error;
mod evaluation;
mod expr;
mod lexer;
mod normalize;
mod parser;

pub use detection::completes_value;
pub use environment::{AngleMode, Constant, Environment, Function, factorial};
pub use error::CalcError;
pub use evaluation::{
    DISPLAY_DECIMALS, Outcome, evaluate, evaluate_input, format_result, try_evaluate,
};
pub use expr::{BinaryOp, Expr, UnaryOp};
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use normalize::normalize;
pub use parser::{Parser, parse};
