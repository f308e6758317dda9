//! Recursive-descent parser.
//!
//! ```text
//! expr    = term (("+" | "-") term)*
//! term    = unary (("*" | "/") unary | <implicit> unary | "%" [bangs] [exponent])*
//! unary   = sign+ number bangs [exponent] | ("-" | "+") unary | power
//! power   = postfix [exponent]
//! exponent = "^" unary
//! postfix = atom bangs
//! bangs   = "!"*
//! atom    = number | constant | function "(" [expr] ")" | "(" expr ")" | "√" atom
//! ```
//!
//! Implicit multiplication applies whenever an operand is directly
//! followed by something that starts another operand (`2(3)`, `2π`,
//! `(1)(2)`, `3!2`). `%` divides the term so far by 100, and any `!` or
//! `^` right after it applies to that 100. `^` binds tighter than a
//! leading sign (`-2^2` is `-4`), except that a sign run directly in
//! front of a factorial literal belongs to the literal: `-1!` is `(-1)!`.
//!
//! Nesting and operator chains share a depth budget, so the tree stays
//! shallow enough to evaluate and drop without exhausting the stack.

use super::environment::Function;
use super::error::CalcError;
use super::expr::{BinaryOp, Expr, UnaryOp};
use super::lexer::{Token, TokenKind, tokenize};

/// Maximum nesting depth, counting parentheses, calls, signs and operators
/// chained in one expression.
pub const MAX_DEPTH: usize = 256;

pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    end: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            tokens: tokenize(input),
            pos: 0,
            end: input.len(),
            depth: 0,
        }
    }

    pub fn parse(mut self) -> Result<Expr, CalcError> {
        if self.tokens.is_empty() {
            return Err(CalcError::syntax(0, "empty expression"));
        }
        let expr = self.expr()?;
        match self.peek() {
            None => Ok(expr),
            Some(token) => Err(self.unexpected(token)),
        }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn kind_at(&self, index: usize) -> Option<TokenKind> {
        self.tokens.get(index).map(|t| t.kind)
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn position(&self) -> usize {
        self.peek().map_or(self.end, |t| t.offset)
    }

    /// Spend one unit of the depth budget. Callers restore the depth they
    /// started with once their subtree is complete.
    fn descend(&mut self) -> Result<(), CalcError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::syntax(
                self.position(),
                "expression nested too deeply",
            ));
        }
        Ok(())
    }

    fn unexpected(&self, token: Token<'_>) -> CalcError {
        if token.kind == TokenKind::Unknown {
            CalcError::UnknownSymbol {
                symbol: token.text.to_string(),
                position: token.offset,
            }
        } else {
            CalcError::syntax(token.offset, format!("unexpected `{}`", token.text))
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<(), CalcError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(())
            }
            Some(token) if token.kind == TokenKind::Unknown => Err(self.unexpected(token)),
            _ => Err(CalcError::syntax(self.position(), format!("expected {what}"))),
        }
    }

    fn expr(&mut self) -> Result<Expr, CalcError> {
        let depth = self.depth;
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Subtract,
                _ => break,
            };
            self.pos += 1;
            self.descend()?;
            let rhs = self.term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        self.depth = depth;
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, CalcError> {
        let depth = self.depth;
        let mut lhs = self.unary()?;
        loop {
            let (op, rhs) = match self.peek_kind() {
                Some(TokenKind::Star) => {
                    self.pos += 1;
                    self.descend()?;
                    (BinaryOp::Multiply, self.unary()?)
                }
                Some(TokenKind::Slash) => {
                    self.pos += 1;
                    self.descend()?;
                    (BinaryOp::Divide, self.unary()?)
                }
                Some(TokenKind::Percent) => {
                    self.pos += 1;
                    self.descend()?;
                    let hundred = self.bangs(Expr::Literal(100.0))?;
                    (BinaryOp::Divide, self.exponent(hundred)?)
                }
                Some(kind) if kind.starts_value() => {
                    self.descend()?;
                    (BinaryOp::Multiply, self.unary()?)
                }
                _ => break,
            };
            lhs = Expr::binary(op, lhs, rhs);
        }
        self.depth = depth;
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, CalcError> {
        if let Some(operand) = self.signed_factorial()? {
            return self.exponent(operand);
        }

        let depth = self.depth;
        let operand = match self.peek_kind() {
            Some(TokenKind::Minus) => {
                self.pos += 1;
                self.descend()?;
                Expr::Unary(UnaryOp::Negate, Box::new(self.unary()?))
            }
            Some(TokenKind::Plus) => {
                self.pos += 1;
                self.descend()?;
                self.unary()?
            }
            _ => self.power()?,
        };
        self.depth = depth;
        Ok(operand)
    }

    /// A sign run followed by a number and `!`, e.g. `-5!` or `+-3!!`.
    ///
    /// The signs apply to the literal before the factorial. Returns `None`
    /// without consuming anything when the tokens ahead have another shape.
    fn signed_factorial(&mut self) -> Result<Option<Expr>, CalcError> {
        let mut literal = self.pos;
        while matches!(
            self.kind_at(literal),
            Some(TokenKind::Plus | TokenKind::Minus)
        ) {
            literal += 1;
        }
        let value = match self.kind_at(literal) {
            Some(TokenKind::Number(value)) if literal > self.pos => value,
            _ => return Ok(None),
        };
        if self.kind_at(literal + 1) != Some(TokenKind::Bang) {
            return Ok(None);
        }

        let depth = self.depth;
        let mut operand = Expr::Literal(value);
        for index in (self.pos..literal).rev() {
            if self.kind_at(index) == Some(TokenKind::Minus) {
                self.descend()?;
                operand = Expr::Unary(UnaryOp::Negate, Box::new(operand));
            }
        }
        self.pos = literal + 1;
        let operand = self.bangs(operand)?;
        self.depth = depth;
        Ok(Some(operand))
    }

    fn power(&mut self) -> Result<Expr, CalcError> {
        let base = self.postfix()?;
        self.exponent(base)
    }

    /// `^ exponent` after `base`, if present. Right-associative, since the
    /// exponent is itself a full unary operand.
    fn exponent(&mut self, base: Expr) -> Result<Expr, CalcError> {
        if self.peek_kind() != Some(TokenKind::Caret) {
            return Ok(base);
        }
        self.pos += 1;
        let depth = self.depth;
        self.descend()?;
        let exponent = self.unary()?;
        self.depth = depth;
        Ok(Expr::binary(BinaryOp::Power, base, exponent))
    }

    fn postfix(&mut self) -> Result<Expr, CalcError> {
        let operand = self.atom()?;
        self.bangs(operand)
    }

    fn bangs(&mut self, mut operand: Expr) -> Result<Expr, CalcError> {
        let depth = self.depth;
        while self.peek_kind() == Some(TokenKind::Bang) {
            self.pos += 1;
            self.descend()?;
            operand = Expr::call(Function::Factorial, operand);
        }
        self.depth = depth;
        Ok(operand)
    }

    fn atom(&mut self) -> Result<Expr, CalcError> {
        let Some(token) = self.advance() else {
            return Err(CalcError::syntax(self.end, "unexpected end of expression"));
        };

        let depth = self.depth;
        let atom = match token.kind {
            TokenKind::Number(value) => Expr::Literal(value),
            TokenKind::Constant(constant) => Expr::Constant(constant),
            TokenKind::LParen => {
                self.descend()?;
                let inner = self.expr()?;
                self.expect(TokenKind::RParen, "`)`")?;
                inner
            }
            TokenKind::Root => {
                self.descend()?;
                Expr::call(Function::Sqrt, self.atom()?)
            }
            TokenKind::Function(function) => {
                self.descend()?;
                self.call(function)?
            }
            _ => return Err(self.unexpected(token)),
        };
        self.depth = depth;
        Ok(atom)
    }

    fn call(&mut self, function: Function) -> Result<Expr, CalcError> {
        self.expect(TokenKind::LParen, &format!("`(` after {function}"))?;

        let mut args = Vec::new();
        if self.peek_kind() != Some(TokenKind::RParen) {
            args.push(self.expr()?);
        }
        self.expect(TokenKind::RParen, "`)`")?;

        if args.len() != function.arity() {
            return Err(CalcError::Arity {
                function: function.name(),
                expected: function.arity(),
                found: args.len(),
            });
        }
        Ok(Expr::Call(function, args))
    }
}

/// Parse an expression in user or canonical notation.
pub fn parse(input: &str) -> Result<Expr, CalcError> {
    Parser::new(input).parse()
}
