//! Accumulated view of one scan.

use std::collections::HashSet;

use crate::row::ChatRow;

/// What one scan has learned so far.
///
/// Folding is value-in, value-out so a single step can be tested without
/// driving the scan loop. Folding the same snapshot twice in a row is a no-op
/// the second time.
#[derive(Debug, Clone, Default)]
pub struct AggregateState {
    seen_names: HashSet<String>,
    unread_names: HashSet<String>,
    unread_rows: Vec<ChatRow>,
}

impl AggregateState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one snapshot into the state.
    ///
    /// Every unseen sender bumps the progress counter. An unread row is
    /// recorded the first time its sender shows up unread; later sightings
    /// of the same sender are ignored.
    pub fn fold(mut self, rows: &[ChatRow]) -> Self {
        for row in rows {
            if !self.seen_names.contains(&row.sender) {
                self.seen_names.insert(row.sender.clone());
            }
            if row.unread && !self.unread_names.contains(&row.sender) {
                self.unread_names.insert(row.sender.clone());
                self.unread_rows.push(row.clone());
            }
        }
        self
    }

    /// Number of distinct senders observed.
    pub fn progress_counter(&self) -> usize {
        self.seen_names.len()
    }

    /// Whether a sender has been observed.
    pub fn is_seen(&self, sender: &str) -> bool {
        self.seen_names.contains(sender)
    }

    /// Whether a sender has been recorded as unread.
    pub fn is_unread(&self, sender: &str) -> bool {
        self.unread_names.contains(sender)
    }

    /// Unread rows in first-seen order.
    pub fn unread_rows(&self) -> &[ChatRow] {
        &self.unread_rows
    }

    /// Consume the state, returning the unread rows.
    pub fn into_unread_rows(self) -> Vec<ChatRow> {
        self.unread_rows
    }
}
