//! Committed calculations.

use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

/// Maximum number of entries kept; the oldest is evicted first.
pub const HISTORY_CAPACITY: usize = 50;

/// A successful `=` evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// The buffer as the user typed it.
    pub expression: String,
    /// The formatted result, as it was placed back in the buffer.
    pub result: String,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

/// Most-recent-first list of committed calculations.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry at the front, evicting the oldest beyond capacity.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Entry at `index`, 0 being the most recent.
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Serialize for History {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_recent_first() {
        let mut history = History::new();
        history.push(HistoryEntry::new("1+1", "2"));
        history.push(HistoryEntry::new("2+2", "4"));
        assert_eq!(history.get(0).unwrap().result, "4");
        assert_eq!(history.get(1).unwrap().result, "2");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::new();
        for i in 0..60 {
            history.push(HistoryEntry::new(format!("{i}+0"), i.to_string()));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.get(0).unwrap().result, "59");
        assert_eq!(history.get(49).unwrap().result, "10");
        assert!(history.iter().all(|e| e.result.parse::<u32>().unwrap() >= 10));
    }

    #[test]
    fn test_display() {
        assert_eq!(HistoryEntry::new("3+4", "7").to_string(), "3+4 = 7");
    }

    #[test]
    fn test_serialize() {
        let mut history = History::new();
        history.push(HistoryEntry::new("3+4", "7"));
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, r#"[{"expression":"3+4","result":"7"}]"#);
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.push(HistoryEntry::new("1", "1"));
        history.clear();
        assert!(history.is_empty());
    }
}
