//! Lookups over a parsed snapshot.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::row::ChatRow;

/// Unread state of one named chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChatStatus {
    Unread { count: u32 },
    Read,
    NotFound,
}

/// Unread state of the chat whose name equals `query`, ignoring case.
///
/// The first matching row wins.
pub fn unread_status(rows: &[ChatRow], query: &str) -> ChatStatus {
    let needle = query.to_lowercase();
    match rows.iter().find(|row| row.sender.to_lowercase() == needle) {
        Some(row) if row.unread => {
            info!(
                "{} new message(s) on chat <{}>",
                row.unread_count, row.sender
            );
            ChatStatus::Unread {
                count: row.unread_count,
            }
        }
        Some(row) => {
            info!("No new messages on chat <{}>", row.sender);
            ChatStatus::Read
        }
        None => {
            info!("Could not locate chat <{}>", query);
            ChatStatus::NotFound
        }
    }
}

/// First chat whose name contains `query`, ignoring case.
pub fn find_chat<'a>(rows: &'a [ChatRow], query: &str) -> Option<&'a ChatRow> {
    let query = query.to_lowercase();
    rows.iter().find(|row| row.sender.to_lowercase().contains(&query))
}
