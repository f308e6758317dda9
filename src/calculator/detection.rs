//! Decides when a partially typed expression is worth previewing.
//!
//! A preview is only attempted when the buffer ends on something that
//! completes a value. Right after an operator or an opening parenthesis
//! the expression cannot be valid yet, and evaluating it would only flash
//! an error.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches a buffer whose last character completes a value:
    /// an ASCII digit, `)`, `.`, `!`, `%`, `e` or `π`.
    static ref VALUE_COMPLETING: Regex = Regex::new(r"[0-9).!%eπ]$").unwrap();
}

/// Check if the buffer ends where a value was just completed.
pub fn completes_value(buffer: &str) -> bool {
    VALUE_COMPLETING.is_match(buffer)
}
