//! Physical keyboard adapter.
//!
//! Translates key names, as a key event reports them, into the same
//! [`Input`] vocabulary the on-screen keypad produces.

use super::input::Input;

/// Map a key name (`"7"`, `"*"`, `"Enter"`, `"Backspace"`, ...) to an input.
///
/// Returns `None` for keys the calculator does not handle.
pub fn map_key(key: &str) -> Option<Input> {
    match key {
        "Enter" | "=" => return Some(Input::Equals),
        "Backspace" => return Some(Input::Delete),
        "Escape" => return Some(Input::Clear),
        _ => {}
    }

    let mut chars = key.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    match c {
        '0'..='9' | '+' | '-' | '(' | ')' | '.' | '^' | '!' | '%' => Some(Input::Symbol(c)),
        '*' => Some(Input::Symbol('×')),
        '/' => Some(Input::Symbol('÷')),
        _ => None,
    }
}

/// Split a typed key sequence into inputs.
///
/// Plain characters are mapped one by one; named keys are written in
/// angle brackets, e.g. `12+3<Backspace>4<Enter>`. Unmapped keys are
/// skipped, as they would be on a real keyboard.
pub fn parse_keys(sequence: &str) -> Vec<Input> {
    let mut inputs = Vec::new();
    let mut rest = sequence;

    while let Some(c) = rest.chars().next() {
        if c == '<'
            && let Some(end) = rest.find('>')
        {
            inputs.extend(map_key(&rest[1..end]));
            rest = &rest[end + 1..];
            continue;
        }
        let (key, tail) = rest.split_at(c.len_utf8());
        inputs.extend(map_key(key));
        rest = tail;
    }

    inputs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_and_operators() {
        assert_eq!(map_key("7"), Some(Input::Symbol('7')));
        assert_eq!(map_key("+"), Some(Input::Symbol('+')));
        assert_eq!(map_key("^"), Some(Input::Symbol('^')));
        assert_eq!(map_key("%"), Some(Input::Symbol('%')));
    }

    #[test]
    fn test_ascii_operators_become_keypad_symbols() {
        assert_eq!(map_key("*"), Some(Input::Symbol('×')));
        assert_eq!(map_key("/"), Some(Input::Symbol('÷')));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(map_key("Enter"), Some(Input::Equals));
        assert_eq!(map_key("="), Some(Input::Equals));
        assert_eq!(map_key("Backspace"), Some(Input::Delete));
        assert_eq!(map_key("Escape"), Some(Input::Clear));
    }

    #[test]
    fn test_unhandled_keys() {
        assert_eq!(map_key("a"), None);
        assert_eq!(map_key("Shift"), None);
        assert_eq!(map_key(""), None);
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!(
            parse_keys("1*2<Backspace>3<Enter>"),
            vec![
                Input::Symbol('1'),
                Input::Symbol('×'),
                Input::Symbol('2'),
                Input::Delete,
                Input::Symbol('3'),
                Input::Equals,
            ]
        );
        assert_eq!(parse_keys("2 x 3"), vec![Input::Symbol('2'), Input::Symbol('3')]);
    }
}
