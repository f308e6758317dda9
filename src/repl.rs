//! Line-oriented interactive session.
//!
//! Each input line is either a sequence of physical keys (see
//! [`parse_keys`]) or a `:command`. The display is re-rendered after every
//! line.

use crate::calculator::{AngleMode, Environment, Function};
use crate::session::{Input, KEYPAD, Session, parse_keys};
use crate::terminal::{render_display, render_history, render_keypad};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::debug;

const HELP: &str = "\
Type keys to edit the expression: digits, + - * / ^ ! % ( ) .
Named keys go in angle brackets: <Enter> <Backspace> <Escape>; '=' also evaluates.
Commands:
  :deg | :rad          switch angle mode
  :2nd                 toggle the 2nd function state
  :key <label>         press a keypad key by its label (e.g. sin, √, π, RND)
  :fn <name>           insert a function by name (sin, asin, ln, sqrt, rand, ...)
  :history [--json]    show history, most recent first
  :recall <n>          load the result of history entry n into the buffer
  :clear-history       forget all history entries
  :keypad              show the keypad
  :help                show this help
  :quit                exit
";

/// A parsed input line.
#[derive(Clone, Debug, PartialEq)]
pub enum Line {
    Keys(Vec<Input>),
    AngleMode(AngleMode),
    Input(Input),
    KeyLabel(String),
    Function(Function),
    History { json: bool },
    Keypad,
    Help,
    Quit,
    Invalid(String),
}

/// Parse one line of REPL input.
pub fn parse_line(line: &str) -> Line {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return Line::Keys(parse_keys(line));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match (name, arg) {
        ("deg", None) => Line::AngleMode(AngleMode::Degrees),
        ("rad", None) => Line::AngleMode(AngleMode::Radians),
        ("2nd", None) => Line::Input(Input::ToggleShift),
        ("clear-history", None) => Line::Input(Input::ClearHistory),
        ("recall", Some(n)) => match n.parse() {
            Ok(index) => Line::Input(Input::Recall(index)),
            Err(_) => Line::Invalid(format!("not a history index: {n}")),
        },
        ("key", Some(label)) => Line::KeyLabel(label.to_string()),
        ("fn", Some(name)) => match Environment::default().function(name) {
            Some(Function::Factorial) | None => Line::Invalid(format!("unknown function: {name}")),
            Some(function) => Line::Function(function),
        },
        ("history", None) => Line::History { json: false },
        ("history", Some("--json")) => Line::History { json: true },
        ("keypad", None) => Line::Keypad,
        ("help", None) => Line::Help,
        ("quit" | "q" | "exit", None) => Line::Quit,
        _ => Line::Invalid(format!("unknown command: {line}")),
    }
}

fn press_label(session: &mut Session, label: &str) -> bool {
    let shift = session.shift();
    let key = KEYPAD
        .iter()
        .flat_map(|row| row.iter())
        .find(|key| key.label(shift) == label);

    match key {
        Some(&key) => {
            session.press(key);
            true
        }
        None => false,
    }
}

/// Run the REPL until end of input or `:quit`.
pub fn run<R: BufRead, W: Write>(
    input: R,
    mut out: W,
    session: &mut Session,
    show_preview: bool,
) -> Result<()> {
    write!(out, "{}", render_display(session, show_preview))?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let parsed = parse_line(&line);
        debug!(?parsed, "repl line");

        match parsed {
            Line::Quit => break,
            Line::Keys(inputs) => {
                for input in inputs {
                    session.handle(input);
                }
            }
            Line::AngleMode(mode) => {
                if session.angle_mode() != mode {
                    session.handle(Input::ToggleAngleMode);
                }
            }
            Line::Input(Input::Recall(index)) => {
                if !session.recall(index) {
                    writeln!(out, "no history entry {index}")?;
                }
            }
            Line::Input(input) => session.handle(input),
            Line::KeyLabel(label) => {
                if !press_label(session, &label) {
                    writeln!(out, "no key labelled {label}")?;
                }
            }
            Line::Function(function) => session.handle(Input::Function(function)),
            Line::History { json: true } => {
                writeln!(out, "{}", serde_json::to_string_pretty(session.history())?)?;
                continue;
            }
            Line::History { json: false } => {
                write!(out, "{}", render_history(session.history()))?;
                continue;
            }
            Line::Keypad => {
                write!(out, "{}", render_keypad(session.shift()))?;
                continue;
            }
            Line::Help => {
                write!(out, "{HELP}")?;
                continue;
            }
            Line::Invalid(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        }

        write!(out, "{}", render_display(session, show_preview))?;
    }

    Ok(())
}
