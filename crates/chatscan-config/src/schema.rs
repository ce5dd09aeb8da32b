//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Unread-chat scan parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Stop once `target` distinct chats have been seen.
    #[serde(default = "default_limit")]
    pub limit: bool,

    /// Approximate number of distinct chats for a bounded scan.
    #[serde(default = "default_target")]
    pub target: usize,

    /// Fraction of the reported row count treated as a full traversal.
    #[serde(default = "default_stabilization_ratio")]
    pub stabilization_ratio: f64,

    /// Iteration cap for a scan that never stabilizes.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Per-call bound on UI driver calls, in seconds.
    #[serde(default)]
    pub call_timeout_secs: Option<u64>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            target: default_target(),
            stabilization_ratio: default_stabilization_ratio(),
            max_iterations: default_max_iterations(),
            call_timeout_secs: None,
        }
    }
}

impl ScanConfig {
    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_secs.map(Duration::from_secs)
    }
}

fn default_limit() -> bool {
    true
}

fn default_target() -> usize {
    50
}

fn default_stabilization_ratio() -> f64 {
    0.9
}

fn default_max_iterations() -> usize {
    200
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for rotated log files.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Write the log file as JSON lines.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            log_dir: None,
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Get the log directory, falling back to `~/.chatscan/logs`.
    pub fn get_log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".chatscan")
                .join("logs")
        })
    }
}

fn default_level() -> String {
    "info".to_string()
}
