//! Unread-chat detection over a scraped messaging chat list.
//!
//! The chat list of a messaging web client is a virtualized list: only the
//! rows in view exist, each row is a block of text whose shape depends on
//! what the client chose to render, and the reported row count is a hint.
//! This crate turns that into a list of unread chats.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐  raw blocks  ┌────────────┐  ChatRow  ┌─────────────────┐
//! │  UiDriver  │ ───────────► │   parser   │ ────────► │ Scanner + state │
//! │ (browser)  │ ◄─────────── └────────────┘           └─────────────────┘
//! └────────────┘   advance_page / row_count_estimate
//! ```
//!
//! - [`parser`] decodes one raw row by line count.
//! - [`AggregateState`] folds snapshots, deduplicating by sender.
//! - [`Scanner`] pages through the list until it stabilizes, reaches its
//!   target, is cancelled, or hits its iteration cap.
//! - [`UiDriver`] is the only seam to the browser; [`ReplayDriver`] replays
//!   recorded pages.

mod aggregate;
mod driver;
mod error;
mod lookup;
pub mod parser;
mod replay;
mod row;
mod scan;

pub use aggregate::AggregateState;
pub use driver::{DriverError, RawBlock, UiDriver};
pub use error::{ScanError, ScanFailure};
pub use lookup::{ChatStatus, find_chat, unread_status};
pub use parser::{ParseError, RowShape, parse_block, parse_snapshot};
pub use replay::{ReplayDriver, ReplayScript};
pub use row::ChatRow;
pub use scan::{ScanOptions, ScanOutcome, Scanner, StopReason, parse_estimate};

pub use tokio_util::sync::CancellationToken;
