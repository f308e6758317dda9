//! Input vocabulary of the calculator and the keypad that produces it.

use crate::calculator::Function;

/// Characters that may be appended to the expression buffer verbatim.
pub const SYMBOLS: &str = "0123456789.+-×÷^!%()πe";

/// A discrete input event, whichever device it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// Append a digit, operator, parenthesis or constant.
    Symbol(char),
    /// Append a function call opener, e.g. `sin(`.
    Function(Function),
    /// AC: reset the buffer.
    Clear,
    /// DEL: remove the last character.
    Delete,
    /// `=`: evaluate and commit.
    Equals,
    /// 2nd: switch function keys between primary and alternate meaning.
    ToggleShift,
    ToggleAngleMode,
    ClearHistory,
    /// Seed the buffer with the result of a history entry (0 = most recent).
    Recall(usize),
}

impl Input {
    /// Symbol input for `c`, if `c` belongs to the keypad vocabulary.
    pub fn symbol(c: char) -> Option<Self> {
        SYMBOLS.contains(c).then_some(Self::Symbol(c))
    }
}

/// Which meaning function keys currently have.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shift {
    #[default]
    Primary,
    Alternate,
}

impl Shift {
    pub fn toggled(self) -> Self {
        match self {
            Self::Primary => Self::Alternate,
            Self::Alternate => Self::Primary,
        }
    }
}

/// A button on the on-screen keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Second,
    Rand,
    Euler,
    Clear,
    Delete,
    Sin,
    Cos,
    Tan,
    Power,
    Divide,
    Ln,
    Log,
    Root,
    Factorial,
    Multiply,
    Pi,
    Digit(u8),
    Subtract,
    Add,
    OpenParen,
    CloseParen,
    Equals,
    Percent,
    Point,
}

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl Key {
    /// The input this key produces in the given 2nd state.
    pub fn input(self, shift: Shift) -> Input {
        let alternate = shift == Shift::Alternate;
        let pick = |primary, other| Input::Function(if alternate { other } else { primary });
        match self {
            Self::Second => Input::ToggleShift,
            Self::Clear => Input::Clear,
            Self::Delete => Input::Delete,
            Self::Equals => Input::Equals,
            Self::Rand => Input::Function(Function::Rand),
            Self::Sin => pick(Function::Sin, Function::Asin),
            Self::Cos => pick(Function::Cos, Function::Acos),
            Self::Tan => pick(Function::Tan, Function::Atan),
            Self::Ln => pick(Function::Ln, Function::Sinh),
            Self::Log => pick(Function::Log, Function::Cosh),
            Self::Root => pick(Function::Sqrt, Function::Tanh),
            Self::Euler => Input::Symbol('e'),
            Self::Pi => Input::Symbol('π'),
            Self::Power => Input::Symbol('^'),
            Self::Divide => Input::Symbol('÷'),
            Self::Multiply => Input::Symbol('×'),
            Self::Subtract => Input::Symbol('-'),
            Self::Add => Input::Symbol('+'),
            Self::Factorial => Input::Symbol('!'),
            Self::OpenParen => Input::Symbol('('),
            Self::CloseParen => Input::Symbol(')'),
            Self::Percent => Input::Symbol('%'),
            Self::Point => Input::Symbol('.'),
            Self::Digit(d) => Input::Symbol(char::from(b'0' + d.min(9))),
        }
    }

    /// Caption shown on the key.
    pub fn label(self, shift: Shift) -> &'static str {
        let alternate = shift == Shift::Alternate;
        match self {
            Self::Second => "2nd",
            Self::Rand => "RND",
            Self::Euler => "e",
            Self::Clear => "AC",
            Self::Delete => "DEL",
            Self::Sin if alternate => "sin⁻¹",
            Self::Sin => "sin",
            Self::Cos if alternate => "cos⁻¹",
            Self::Cos => "cos",
            Self::Tan if alternate => "tan⁻¹",
            Self::Tan => "tan",
            Self::Power => "xʸ",
            Self::Divide => "÷",
            Self::Ln if alternate => "sinh",
            Self::Ln => "ln",
            Self::Log if alternate => "cosh",
            Self::Log => "log",
            Self::Root if alternate => "tanh",
            Self::Root => "√",
            Self::Factorial => "x!",
            Self::Multiply => "×",
            Self::Pi => "π",
            Self::Digit(d) => DIGIT_LABELS[usize::from(d.min(9))],
            Self::Subtract => "-",
            Self::Add => "+",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::Equals => "=",
            Self::Percent => "%",
            Self::Point => ".",
        }
    }
}

/// Keypad rows, top to bottom. `=` spans the last two rows and `0` two
/// columns, so those rows are shorter.
pub const KEYPAD: &[&[Key]] = &[
    &[Key::Second, Key::Rand, Key::Euler, Key::Clear, Key::Delete],
    &[Key::Sin, Key::Cos, Key::Tan, Key::Power, Key::Divide],
    &[Key::Ln, Key::Log, Key::Root, Key::Factorial, Key::Multiply],
    &[Key::Pi, Key::Digit(7), Key::Digit(8), Key::Digit(9), Key::Subtract],
    &[Key::OpenParen, Key::Digit(4), Key::Digit(5), Key::Digit(6), Key::Add],
    &[Key::CloseParen, Key::Digit(1), Key::Digit(2), Key::Digit(3), Key::Equals],
    &[Key::Percent, Key::Digit(0), Key::Point],
];
