//! Replay driver: a [`UiDriver`] over recorded chat-list pages.
//!
//! A replay script is a JSON document:
//!
//! ```json
//! {
//!   "row_count": 42,
//!   "pages": [
//!     [["Alice", "10:02"], ["Bob", "10:05", "Hey!", "2"]],
//!     [["Bob", "10:05", "Hey!", "2"], ["Carol", "09:40", "ok"]]
//!   ]
//! }
//! ```
//!
//! Advancing past the last page keeps showing it, like a list scrolled to
//! the bottom.

use std::path::Path;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::driver::{DriverError, RawBlock, UiDriver};

/// Recorded chat-list pages plus the reported row count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Reported total row count, a number or the raw attribute string.
    #[serde(default)]
    pub row_count: Value,
    /// Pages in scroll order, each a list of raw row blocks.
    #[serde(default)]
    pub pages: Vec<Vec<Vec<String>>>,
}

impl ReplayScript {
    /// Parse a script from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, DriverError> {
        serde_json::from_str(content)
            .map_err(|e| DriverError::Failed(format!("Invalid replay script: {}", e)))
    }

    /// Load a script from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DriverError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DriverError::Unavailable(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// Row count rendered as the UI would report it.
    fn row_count_text(&self) -> String {
        match &self.row_count {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

struct Cursor {
    page: usize,
    advances: usize,
}

/// Deterministic driver that replays a [`ReplayScript`].
pub struct ReplayDriver {
    pages: Vec<Vec<RawBlock>>,
    row_count: String,
    cursor: Mutex<Cursor>,
}

impl ReplayDriver {
    pub fn new(script: ReplayScript) -> Self {
        let row_count = script.row_count_text();
        let pages = script
            .pages
            .into_iter()
            .map(|page| page.into_iter().map(RawBlock::new).collect())
            .collect();
        Self {
            pages,
            row_count,
            cursor: Mutex::new(Cursor { page: 0, advances: 0 }),
        }
    }

    /// Number of page advances requested so far.
    pub fn advance_count(&self) -> usize {
        self.cursor.lock().advances
    }

    /// Index of the page currently shown.
    pub fn current_page(&self) -> usize {
        self.cursor.lock().page
    }
}

#[async_trait]
impl UiDriver for ReplayDriver {
    async fn snapshot(&self) -> Result<Vec<RawBlock>, DriverError> {
        let page = self.cursor.lock().page;
        Ok(self.pages.get(page).cloned().unwrap_or_default())
    }

    async fn advance_page(&self) -> Result<(), DriverError> {
        let mut cursor = self.cursor.lock();
        cursor.advances += 1;
        if cursor.page + 1 < self.pages.len() {
            cursor.page += 1;
        }
        Ok(())
    }

    async fn row_count_estimate(&self) -> Result<String, DriverError> {
        Ok(self.row_count.clone())
    }
}
