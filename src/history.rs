use std::collections::VecDeque;

use crate::models::HistoryEntry;

/// Newest-first record of completed exchanges for this session
#[derive(Clone, Debug, Default)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front. Nothing is ever evicted.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get entry by index (0 = most recent)
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
}
