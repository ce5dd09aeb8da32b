//! Row parser: raw chat-row text blocks to [`ChatRow`] records.
//!
//! The chat list renders a variable number of lines per row depending on
//! what metadata it shows, and nothing else in the text tells the layouts
//! apart. Decoding therefore dispatches on line count through [`ROW_SHAPES`];
//! supporting a newly observed layout means adding a table entry.
//!
//! | lines | layout |
//! |---|---|
//! | 2 | `sender, time` |
//! | 3 | `sender, time, message` |
//! | 4 | `sender, time, message, badge` |
//! | 5 | `sender, time, _, _, badge` (group) |
//! | 6 | `sender, time, _, _, message, badge` (group) |

use thiserror::Error;
use tracing::info;

use crate::driver::RawBlock;
use crate::row::ChatRow;

/// Why a block could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No known layout has this many lines.
    #[error("Unrecognized row shape ({line_count} lines)")]
    ShapeUnrecognized { line_count: usize },

    /// The sender line is blank.
    #[error("Row has an empty sender")]
    EmptySender,
}

/// Field positions for one chat-row layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowShape {
    /// Number of rendered lines that selects this layout.
    pub line_count: usize,
    /// Index of the message preview line, if the layout shows one.
    pub message_at: Option<usize>,
    /// Index of the unread badge line, if the layout shows one.
    pub badge_at: Option<usize>,
    /// Whether this is the group-chat layout.
    pub is_group: bool,
}

/// Known chat-row layouts, keyed by line count.
pub const ROW_SHAPES: &[RowShape] = &[
    RowShape {
        line_count: 2,
        message_at: None,
        badge_at: None,
        is_group: false,
    },
    RowShape {
        line_count: 3,
        message_at: Some(2),
        badge_at: None,
        is_group: false,
    },
    RowShape {
        line_count: 4,
        message_at: Some(2),
        badge_at: Some(3),
        is_group: false,
    },
    RowShape {
        line_count: 5,
        message_at: None,
        badge_at: Some(4),
        is_group: true,
    },
    RowShape {
        line_count: 6,
        message_at: Some(4),
        badge_at: Some(5),
        is_group: true,
    },
];

impl RowShape {
    /// Look up the layout for a line count.
    pub fn for_line_count(line_count: usize) -> Option<&'static RowShape> {
        ROW_SHAPES.iter().find(|shape| shape.line_count == line_count)
    }

    /// Decode lines already known to have `self.line_count` entries.
    fn decode(&self, lines: &[String]) -> Result<ChatRow, ParseError> {
        let sender = &lines[0];
        if sender.trim().is_empty() {
            return Err(ParseError::EmptySender);
        }

        let message_preview = self
            .message_at
            .map(|i| lines[i].clone())
            .unwrap_or_default();
        let badge = self.badge_at.and_then(|i| badge_count(&lines[i]));

        Ok(ChatRow {
            sender: sender.clone(),
            time: lines[1].clone(),
            message_preview,
            unread: badge.is_some(),
            unread_count: badge.unwrap_or(0),
            is_group: self.is_group,
        })
    }
}

/// Read an unread badge.
///
/// A badge made only of ASCII digits marks the row unread with that count,
/// zero included. Anything else (a delivery tick, an empty string, "99+",
/// surrounding whitespace) means the row is read.
pub fn badge_count(badge: &str) -> Option<u32> {
    if badge.is_empty() || !badge.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // All digits, so the only possible parse failure is overflow.
    Some(badge.parse::<u32>().unwrap_or(u32::MAX))
}

/// Parse a single raw block.
pub fn parse_block(block: &RawBlock) -> Result<ChatRow, ParseError> {
    let shape = RowShape::for_line_count(block.len()).ok_or(ParseError::ShapeUnrecognized {
        line_count: block.len(),
    })?;
    shape.decode(block.lines())
}

/// Parse every block of a snapshot, skipping the ones that do not decode.
///
/// The result can be shorter than `blocks`.
pub fn parse_snapshot(blocks: &[RawBlock]) -> Vec<ChatRow> {
    blocks
        .iter()
        .filter_map(|block| match parse_block(block) {
            Ok(row) => Some(row),
            Err(e) => {
                info!(lines = ?block.lines(), "Skipping chat row: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
