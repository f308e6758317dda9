//! Calculator session: expression buffer, modes, history and live preview.
//!
//! The session consumes [`Input`] events, whether they come from the
//! on-screen keypad ([`Key`]) or the keyboard adapter ([`map_key`]), and
//! exposes a snapshot of what should be displayed after each one.

mod history;
mod input;
mod keyboard;

pub use history::{HISTORY_CAPACITY, History, HistoryEntry};
pub use input::{Input, KEYPAD, Key, SYMBOLS, Shift};
pub use keyboard::{map_key, parse_keys};

use crate::calculator::{AngleMode, Outcome, completes_value, evaluate, format_result, normalize};
use tracing::{debug, info};

/// Text shown when the buffer is empty.
pub const PLACEHOLDER: &str = "0";
/// Text shown after a failed commit.
pub const ERROR_TEXT: &str = "Error";

/// Where the session is with respect to the current buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Nothing typed.
    #[default]
    Empty,
    /// Typing; live preview may be shown.
    Building,
    /// The last `=` failed. The next editing input starts afresh.
    Errored,
    /// The buffer holds the result of the last `=`.
    Committed,
}

/// State owned by one calculator.
#[derive(Clone, Debug, Default)]
pub struct Session {
    buffer: String,
    phase: Phase,
    angle_mode: AngleMode,
    shift: Shift,
    history: History,
}

impl Session {
    pub fn new(angle_mode: AngleMode) -> Self {
        Self {
            angle_mode,
            ..Self::default()
        }
    }

    /// Press an on-screen key, resolving it through the current 2nd state.
    pub fn press(&mut self, key: Key) {
        self.handle(key.input(self.shift));
    }

    /// Feed a physical key name. Returns false if the key is not handled.
    pub fn keyboard(&mut self, key: &str) -> bool {
        match map_key(key) {
            Some(input) => {
                self.handle(input);
                true
            }
            None => false,
        }
    }

    /// Apply one input event.
    pub fn handle(&mut self, input: Input) {
        match input {
            Input::ToggleShift => {
                self.shift = self.shift.toggled();
                debug!(shift = ?self.shift, "toggled 2nd");
                return;
            }
            Input::ToggleAngleMode => {
                self.angle_mode = self.angle_mode.toggled();
                info!(angle_mode = %self.angle_mode, "angle mode changed");
                return;
            }
            Input::ClearHistory => {
                self.history.clear();
                return;
            }
            Input::Recall(index) => {
                self.recall(index);
                return;
            }
            _ => {}
        }

        // Editing input after a failed commit starts from an empty buffer.
        if self.phase == Phase::Errored {
            self.buffer.clear();
            self.phase = Phase::Empty;
        }

        match input {
            Input::Clear => {
                self.buffer.clear();
                self.phase = Phase::Empty;
            }
            Input::Delete => {
                self.buffer.pop();
                self.phase = if self.buffer.is_empty() {
                    Phase::Empty
                } else {
                    Phase::Building
                };
            }
            Input::Equals => self.commit(),
            Input::Symbol(c) => {
                if self.buffer == PLACEHOLDER && c != '.' {
                    self.buffer.clear();
                }
                self.buffer.push(c);
                self.phase = Phase::Building;
            }
            Input::Function(function) => {
                if self.buffer == PLACEHOLDER {
                    self.buffer.clear();
                }
                self.buffer.push_str(&function.key_text());
                self.phase = Phase::Building;
            }
            Input::ToggleShift
            | Input::ToggleAngleMode
            | Input::ClearHistory
            | Input::Recall(_) => {}
        }
    }

    fn commit(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        match evaluate(&normalize(&self.buffer), self.angle_mode) {
            Outcome::Number(value) => {
                let result = format_result(value);
                info!(expression = %self.buffer, %result, "committed");
                let expression = std::mem::replace(&mut self.buffer, result.clone());
                self.history.push(HistoryEntry { expression, result });
                self.phase = Phase::Committed;
            }
            Outcome::Error => {
                info!(expression = %self.buffer, "commit failed");
                self.buffer.clear();
                self.phase = Phase::Errored;
            }
        }
    }

    /// Seed the buffer with the result of history entry `index`.
    ///
    /// Returns false if there is no such entry.
    pub fn recall(&mut self, index: usize) -> bool {
        let Some(entry) = self.history.get(index) else {
            return false;
        };
        self.buffer = entry.result.clone();
        self.phase = Phase::Building;
        true
    }

    /// The main display line.
    pub fn display(&self) -> &str {
        match self.phase {
            Phase::Errored => ERROR_TEXT,
            _ if self.buffer.is_empty() => PLACEHOLDER,
            _ => &self.buffer,
        }
    }

    /// Best-effort result of the buffer while typing.
    ///
    /// Only offered when the buffer ends on a completed value and
    /// evaluates cleanly; failures are silent.
    pub fn preview(&self) -> Option<String> {
        if self.phase != Phase::Building || !completes_value(&self.buffer) {
            return None;
        }
        evaluate(&normalize(&self.buffer), self.angle_mode)
            .value()
            .map(format_result)
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_error(&self) -> bool {
        self.phase == Phase::Errored
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn shift(&self) -> Shift {
        self.shift
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}
