//! Parsed chat-list entries.

use serde::{Deserialize, Serialize};

/// One parsed conversation-list entry.
///
/// Rows are rebuilt from raw text on every snapshot and are never mutated.
/// Rows from different snapshots are correlated by `sender` only, since the
/// chat list exposes no stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRow {
    /// Display name of the chat.
    pub sender: String,
    /// Display time, kept as rendered (locale and recency dependent).
    pub time: String,
    /// Last message preview, empty when the row shows none.
    pub message_preview: String,
    /// Whether the row carries a numeric unread badge.
    pub unread: bool,
    /// Unread message count, 0 when `unread` is false.
    pub unread_count: u32,
    /// Whether the row was rendered with the group layout.
    pub is_group: bool,
}

impl ChatRow {
    /// Create a read direct-chat row with no preview.
    pub fn new(sender: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            time: time.into(),
            message_preview: String::new(),
            unread: false,
            unread_count: 0,
            is_group: false,
        }
    }

    /// Set the message preview.
    pub fn with_preview(mut self, preview: impl Into<String>) -> Self {
        self.message_preview = preview.into();
        self
    }

    /// Mark the row unread with `count` messages, as a numeric badge does.
    ///
    /// A zero count still marks the row unread.
    pub fn with_unread(mut self, count: u32) -> Self {
        self.unread = true;
        self.unread_count = count;
        self
    }

    /// Mark the row as a group chat.
    pub fn group(mut self) -> Self {
        self.is_group = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_row_is_read() {
        let row = ChatRow::new("Alice", "10:02");
        assert_eq!(row.sender, "Alice");
        assert!(!row.unread);
        assert_eq!(row.unread_count, 0);
        assert!(row.message_preview.is_empty());
        assert!(!row.is_group);
    }

    #[test]
    fn test_with_unread_keeps_flag_and_count_consistent() {
        let row = ChatRow::new("Bob", "10:05").with_unread(3);
        assert!(row.unread);
        assert_eq!(row.unread_count, 3);

        let row = ChatRow::new("Bob", "10:05").with_unread(0);
        assert!(row.unread);
        assert_eq!(row.unread_count, 0);

        let row = ChatRow::new("Alice", "10:02");
        assert!(!row.unread);
        assert_eq!(row.unread_count, 0);
    }

    #[test]
    fn test_serialize_field_names() {
        let row = ChatRow::new("Team X", "10:10").with_unread(4).group();
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["sender"], "Team X");
        assert_eq!(json["unread_count"], 4);
        assert_eq!(json["is_group"], true);
    }
}
