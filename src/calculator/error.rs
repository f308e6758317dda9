//! Failure kinds raised while parsing or evaluating an expression.
//!
//! Callers outside the calculator see a single `Error` outcome; the
//! variants exist for logging and tests.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Malformed expression: unbalanced parentheses, dangling operator, etc.
    #[error("syntax error at {position}: {message}")]
    Syntax { position: usize, message: String },

    /// Text the lexer could not turn into a token.
    #[error("unknown symbol `{symbol}` at {position}")]
    UnknownSymbol { symbol: String, position: usize },

    #[error("{function} takes {expected} argument(s), got {found}")]
    Arity {
        function: &'static str,
        expected: usize,
        found: usize,
    },

    /// Argument outside the function's domain, e.g. `asin(2)`.
    #[error("{function} is undefined for {value}")]
    Domain { function: &'static str, value: f64 },

    /// Division by zero, overflow or NaN.
    #[error("result is not a finite number")]
    NonFinite,
}

impl CalcError {
    pub(crate) fn syntax(position: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            message: message.into(),
        }
    }

    /// Short name of the error class, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Syntax { .. } | Self::UnknownSymbol { .. } | Self::Arity { .. } => "syntax",
            Self::Domain { .. } => "domain",
            Self::NonFinite => "non-finite",
        }
    }
}
