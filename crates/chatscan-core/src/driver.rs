//! UI driver seam.
//!
//! The driver owns everything that touches the browser: locating the chat
//! pane, reading row text, scrolling and reading the reported row count.
//! The scanner only sees text.

use async_trait::async_trait;
use thiserror::Error;

/// One raw chat-row text block, split into rendered lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBlock {
    lines: Vec<String>,
}

impl RawBlock {
    /// Create a block from already-split lines.
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Split rendered row text on line breaks.
    ///
    /// Every `\n` separates two lines, so a trailing empty line (an empty
    /// badge) is kept. Empty text yields an empty block.
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self {
            lines: text
                .split('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
                .collect(),
        }
    }

    /// Lines in render order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of rendered lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the block has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RawBlock {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Errors raised by a UI driver.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The UI did not respond within the driver's own bound.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The page or chat pane is not available.
    #[error("UI unavailable: {0}")]
    Unavailable(String),

    /// Any other driver failure.
    #[error("Driver failed: {0}")]
    Failed(String),
}

/// Access to the rendered chat list.
///
/// Calls are issued one at a time by a single scan; implementations that keep
/// state use interior mutability.
#[async_trait]
pub trait UiDriver: Send + Sync {
    /// Raw text of every currently visible chat row, top to bottom.
    async fn snapshot(&self) -> Result<Vec<RawBlock>, DriverError>;

    /// Scroll the list by one page and wait for it to render.
    async fn advance_page(&self) -> Result<(), DriverError>;

    /// Total row count as reported by the UI (e.g. the `aria-rowcount` text).
    ///
    /// Returned verbatim; the scanner validates it.
    async fn row_count_estimate(&self) -> Result<String, DriverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_splits_lines() {
        let block = RawBlock::from_text("Bob\n10:05\nHey!\n2");
        assert_eq!(block.len(), 4);
        assert_eq!(block.lines()[2], "Hey!");
    }

    #[test]
    fn test_from_text_handles_crlf() {
        let block = RawBlock::from_text("Alice\r\n10:02");
        assert_eq!(block.lines(), ["Alice", "10:02"]);
    }

    #[test]
    fn test_from_text_keeps_trailing_empty_line() {
        let block = RawBlock::from_text("Bob\n10:05\nHey!\n");
        assert_eq!(block.lines(), ["Bob", "10:05", "Hey!", ""]);

        let block = RawBlock::from_text("Team X\r\n10:10\r\n\r\n\r\n");
        assert_eq!(block.lines(), ["Team X", "10:10", "", "", ""]);
    }

    #[test]
    fn test_from_text_empty() {
        assert!(RawBlock::from_text("").is_empty());
    }

    #[test]
    fn test_collect_from_strs() {
        let block: RawBlock = ["Team X", "10:10", "", "", "4"].into_iter().collect();
        assert_eq!(block.len(), 5);
        assert_eq!(block.lines()[2], "");
    }

    #[test]
    fn test_driver_error_display() {
        let err = DriverError::Timeout("page down".to_string());
        assert_eq!(err.to_string(), "Timeout: page down");

        let err = DriverError::Unavailable("pane-side".to_string());
        assert_eq!(err.to_string(), "UI unavailable: pane-side");
    }
}
