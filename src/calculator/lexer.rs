//! Tokenizer shared by the normalizer and the parser.
//!
//! Accepts both the symbols a user types on the keypad (`×`, `÷`, `π`,
//! `√`, `^`) and their canonical spellings (`*`, `/`, `PI`, `sqrt`,
//! `**`), so canonical output can be fed back through the same lexer.

use super::environment::{Constant, Function};
use lazy_static::lazy_static;

/// The kind of a lexed token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Constant(Constant),
    Function(Function),
    Plus,
    Minus,
    Star,
    Slash,
    /// `^` or `**`.
    Caret,
    Bang,
    Percent,
    /// `√`.
    Root,
    LParen,
    RParen,
    /// Anything the lexer does not recognise. Kept so the normalizer can
    /// pass it through untouched; the parser rejects it.
    Unknown,
}

impl TokenKind {
    /// Whether a value has just been completed by this token.
    pub fn ends_value(&self) -> bool {
        matches!(
            self,
            Self::Number(_) | Self::Constant(_) | Self::RParen | Self::Bang | Self::Percent
        )
    }

    /// Whether this token can begin a new operand.
    pub fn starts_value(&self) -> bool {
        matches!(
            self,
            Self::Number(_) | Self::Constant(_) | Self::Function(_) | Self::LParen | Self::Root
        )
    }

    /// Whether a `-` following this token is a sign rather than a subtraction.
    pub fn expects_operand(&self) -> bool {
        matches!(
            self,
            Self::Plus
                | Self::Minus
                | Self::Star
                | Self::Slash
                | Self::Caret
                | Self::LParen
                | Self::Root
        )
    }
}

/// A token together with the source text it was read from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the token in the input.
    pub offset: usize,
}

lazy_static! {
    /// Words recognised by the lexer, longest first so `sinh` wins over `sin`.
    static ref WORDS: Vec<(&'static str, TokenKind)> = {
        let mut words: Vec<(&'static str, TokenKind)> = Function::ALL
            .iter()
            .map(|&f| (f.name(), TokenKind::Function(f)))
            .chain(Constant::ALL.iter().map(|&c| (c.name(), TokenKind::Constant(c))))
            // A bare `e` is always Euler's number; there is no exponent notation.
            .chain(std::iter::once(("e", TokenKind::Constant(Constant::E))))
            .collect();
        words.sort_by_key(|(word, _)| std::cmp::Reverse(word.len()));
        words
    };
}

/// Iterator over the tokens of an expression. Whitespace is skipped.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn emit(&mut self, kind: TokenKind, len: usize) -> Token<'a> {
        let offset = self.pos;
        self.pos += len;
        Token {
            kind,
            text: &self.input[offset..self.pos],
            offset,
        }
    }

    fn lex_number(&mut self) -> Token<'a> {
        let len = self
            .rest()
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(self.rest().len());
        let text = &self.rest()[..len];

        // `3.` and `.5` are accepted, `.` and `1.2.3` are not.
        let kind = match text.parse::<f64>() {
            Ok(value) => TokenKind::Number(value),
            Err(_) => TokenKind::Unknown,
        };
        self.emit(kind, len)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();

        let c = trimmed.chars().next()?;

        if c.is_ascii_digit() || c == '.' {
            return Some(self.lex_number());
        }

        if trimmed.starts_with("**") {
            return Some(self.emit(TokenKind::Caret, 2));
        }

        let single = match c {
            '+' => Some(TokenKind::Plus),
            '-' | '−' => Some(TokenKind::Minus),
            '*' | '×' => Some(TokenKind::Star),
            '/' | '÷' => Some(TokenKind::Slash),
            '^' => Some(TokenKind::Caret),
            '!' => Some(TokenKind::Bang),
            '%' => Some(TokenKind::Percent),
            '√' => Some(TokenKind::Root),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            'π' => Some(TokenKind::Constant(Constant::Pi)),
            _ => None,
        };
        if let Some(kind) = single {
            return Some(self.emit(kind, c.len_utf8()));
        }

        if let Some((word, kind)) = WORDS.iter().find(|(word, _)| trimmed.starts_with(word)) {
            return Some(self.emit(*kind, word.len()));
        }

        Some(self.emit(TokenKind::Unknown, c.len_utf8()))
    }
}

/// Tokenize a whole expression.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_user_symbols() {
        assert_eq!(
            kinds("2×3÷π"),
            vec![
                TokenKind::Number(2.0),
                TokenKind::Star,
                TokenKind::Number(3.0),
                TokenKind::Slash,
                TokenKind::Constant(Constant::Pi),
            ]
        );
    }

    #[test]
    fn test_canonical_spellings() {
        assert_eq!(
            kinds("2**PI"),
            vec![
                TokenKind::Number(2.0),
                TokenKind::Caret,
                TokenKind::Constant(Constant::Pi),
            ]
        );
        assert_eq!(
            kinds("sqrt(E)")[0],
            TokenKind::Function(Function::Sqrt)
        );
    }

    #[test]
    fn test_longest_word_wins() {
        assert_eq!(kinds("sinh")[0], TokenKind::Function(Function::Sinh));
        assert_eq!(kinds("asin")[0], TokenKind::Function(Function::Asin));
        assert_eq!(kinds("sin")[0], TokenKind::Function(Function::Sin));
    }

    #[test]
    fn test_e_is_always_a_constant() {
        assert_eq!(
            kinds("1e5"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Constant(Constant::E),
                TokenKind::Number(5.0),
            ]
        );
    }

    #[test]
    fn test_partial_decimals() {
        assert_eq!(kinds("3."), vec![TokenKind::Number(3.0)]);
        assert_eq!(kinds(".5"), vec![TokenKind::Number(0.5)]);
        assert_eq!(kinds("."), vec![TokenKind::Unknown]);
        assert_eq!(kinds("1.2.3"), vec![TokenKind::Unknown]);
    }

    #[test]
    fn test_offsets_and_whitespace() {
        let tokens = tokenize(" 12 + x");
        assert_eq!(tokens[0].offset, 1);
        assert_eq!(tokens[0].text, "12");
        assert_eq!(tokens[1].offset, 4);
        assert_eq!(tokens[2].kind, TokenKind::Unknown);
        assert_eq!(tokens[2].text, "x");
    }
}
