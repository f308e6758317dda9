//! Rewrites keypad notation into canonical form.
//!
//! Works on the token stream rather than on raw text, so the rewrites
//! cannot interfere with each other:
//!
//! - `×` → `*`, `÷` → `/`, `π` → `PI`, `e` → `E`, `%` → `/100`, `^` → `**`
//! - `*` inserted wherever an operand directly follows another
//!   (`2(`, `2π`, `)2`, `)(`)
//! - `5!` → `factorial(5)`, `-5!` → `factorial(-5)`, `5%!` → `5/factorial(100)`
//! - `√9` → `sqrt(9)`, `√(x)` → `sqrt(x)`
//!
//! Whitespace is dropped. Unrecognised text is copied through unchanged
//! and left for the parser to reject.

use super::environment::Function;
use super::lexer::{Token, TokenKind, tokenize};

/// Canonical spelling of a single token.
fn canonical<'a>(token: &Token<'a>) -> &'a str {
    match token.kind {
        TokenKind::Number(_) | TokenKind::Unknown => token.text,
        TokenKind::Constant(constant) => constant.name(),
        TokenKind::Function(function) => function.name(),
        TokenKind::Plus => "+",
        TokenKind::Minus => "-",
        TokenKind::Star => "*",
        TokenKind::Slash => "/",
        TokenKind::Caret => "**",
        TokenKind::Bang => "!",
        TokenKind::Percent => "/100",
        TokenKind::Root => "√",
        TokenKind::LParen => "(",
        TokenKind::RParen => ")",
    }
}

fn is_sign(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Plus | TokenKind::Minus)
}

/// Normalize a raw expression. Never fails.
pub fn normalize(raw: &str) -> String {
    let tokens = tokenize(raw);
    let kind_at = |i: usize| tokens.get(i).map(|t| t.kind);

    let mut out = String::with_capacity(raw.len() + 8);
    let mut prev: Option<TokenKind> = None;
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];

        if prev.is_some_and(|p| p.ends_value()) && token.kind.starts_value() {
            out.push('*');
        }

        // A literal followed by `!`, together with any sign run in front of it.
        let operand_start = prev.is_none_or(|p| p.expects_operand());
        let mut literal = i;
        if operand_start {
            while kind_at(literal).is_some_and(is_sign) {
                literal += 1;
            }
        }
        if matches!(kind_at(literal), Some(TokenKind::Number(_)))
            && kind_at(literal + 1) == Some(TokenKind::Bang)
        {
            out.push_str("factorial(");
            for t in &tokens[i..=literal] {
                out.push_str(canonical(t));
            }
            out.push(')');
            prev = Some(TokenKind::RParen);
            i = literal + 2;
            continue;
        }
        if literal > i {
            for t in &tokens[i..literal] {
                out.push_str(canonical(t));
            }
            prev = Some(tokens[literal - 1].kind);
            i = literal;
            continue;
        }

        // `%!` is the factorial of the 100 that `%` stands for.
        if token.kind == TokenKind::Percent && kind_at(i + 1) == Some(TokenKind::Bang) {
            out.push_str("/factorial(100)");
            prev = Some(TokenKind::RParen);
            i += 2;
            continue;
        }

        if token.kind == TokenKind::Root {
            match kind_at(i + 1) {
                Some(TokenKind::Number(_) | TokenKind::Constant(_)) => {
                    out.push_str("sqrt(");
                    out.push_str(canonical(&tokens[i + 1]));
                    out.push(')');
                    prev = Some(TokenKind::RParen);
                    i += 2;
                    continue;
                }
                Some(TokenKind::LParen) => {
                    out.push_str("sqrt");
                    prev = Some(TokenKind::Function(Function::Sqrt));
                    i += 1;
                    continue;
                }
                _ => {}
            }
        }

        out.push_str(canonical(token));
        prev = Some(token.kind);
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_substitution() {
        assert_eq!(normalize("6×7÷2"), "6*7/2");
        assert_eq!(normalize("π+e"), "PI+E");
        assert_eq!(normalize("50%"), "50/100");
        assert_eq!(normalize("2^10"), "2**10");
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(normalize("2(3+4)"), "2*(3+4)");
        assert_eq!(normalize("2π"), "2*PI");
        assert_eq!(normalize("(1+1)2"), "(1+1)*2");
        assert_eq!(normalize("(1)(2)"), "(1)*(2)");
        assert_eq!(normalize("3sin(0)"), "3*sin(0)");
        assert_eq!(normalize("10%5"), "10/100*5");
    }

    #[test]
    fn test_factorial_rewrite() {
        assert_eq!(normalize("5!"), "factorial(5)");
        assert_eq!(normalize("-1!"), "factorial(-1)");
        assert_eq!(normalize("2-3!"), "2-factorial(3)");
        assert_eq!(normalize("2×-3!"), "2*factorial(-3)");
        assert_eq!(normalize("3!2"), "factorial(3)*2");
        assert_eq!(normalize("5%!"), "5/factorial(100)");
        assert_eq!(normalize("5%!!"), "5/factorial(100)!");
        // Non-literal operands keep the postfix operator.
        assert_eq!(normalize("(3)!"), "(3)!");
    }

    #[test]
    fn test_root_rewrite() {
        assert_eq!(normalize("√9"), "sqrt(9)");
        assert_eq!(normalize("√(16)"), "sqrt(16)");
        assert_eq!(normalize("√π"), "sqrt(PI)");
        assert_eq!(normalize("2√9"), "2*sqrt(9)");
        assert_eq!(normalize("√9!"), "sqrt(9)!");
    }

    #[test]
    fn test_passes_malformed_input_through() {
        assert_eq!(normalize("3+"), "3+");
        assert_eq!(normalize("2$3"), "2$3");
        assert_eq!(normalize("((1"), "((1");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "2(3+4)",
            "5!",
            "-1!",
            "√9!",
            "sin(90)×2π",
            "50%+3^2",
            "(1)(2)3",
            "e^2−1",
            "rand()",
            "3!!",
            "√(2)√3",
            "2$3",
            "5%!",
            "5%!^2",
            "-2^2",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw}");
        }
    }
}
