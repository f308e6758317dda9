//! Plain-text rendering of a calculator session.

use crate::session::{History, KEYPAD, Session, Shift};
use std::fmt::Write;

/// Width of one keypad cell, in characters.
const KEY_WIDTH: usize = 7;

/// Render the display area.
///
/// Shows the mode indicators, the expression (or placeholder/error) and,
/// when available, the live preview with an "= " prefix.
pub fn render_display(session: &Session, show_preview: bool) -> String {
    let mut out = String::new();

    let shift = match session.shift() {
        Shift::Primary => "",
        Shift::Alternate => " [2nd]",
    };
    let _ = writeln!(out, "[{}]{}", session.angle_mode(), shift);
    let _ = writeln!(out, "{}", session.display());

    if show_preview && let Some(preview) = session.preview() {
        let _ = writeln!(out, "= {preview}");
    }

    out
}

/// Render the history list, most recent first, with recall indices.
pub fn render_history(history: &History) -> String {
    if history.is_empty() {
        return "No calculations yet\n".to_string();
    }

    let mut out = String::new();
    for (index, entry) in history.iter().enumerate() {
        let _ = writeln!(out, "{index:>3}  {entry}");
    }
    out
}

/// Render the keypad grid with labels for the current 2nd state.
pub fn render_keypad(shift: Shift) -> String {
    let mut out = String::new();
    for row in KEYPAD {
        let cells: Vec<String> = row
            .iter()
            .map(|key| format!("[{:^width$}]", key.label(shift), width = KEY_WIDTH))
            .collect();
        let _ = writeln!(out, "{}", cells.join(" "));
    }
    out
}
