//! Scan error types.

use thiserror::Error;

use crate::driver::DriverError;
use crate::row::ChatRow;

/// Scan-level errors.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A driver call did not complete in time.
    #[error("Driver timeout during {operation}: {message}")]
    DriverTimeout {
        operation: &'static str,
        message: String,
    },

    /// A driver call failed for another reason.
    #[error("Driver error during {operation}: {source}")]
    Driver {
        operation: &'static str,
        #[source]
        source: DriverError,
    },

    /// The reported row count is not a non-negative integer.
    #[error("Invalid row count estimate: {0:?}")]
    EstimateInvalid(String),

    /// The iteration cap was reached before the list stabilized.
    #[error("Scan did not converge within {iterations} iterations")]
    SafetyCapExceeded { iterations: usize },

    /// The scan options cannot produce a meaningful scan.
    #[error("Invalid scan options: {0}")]
    InvalidOptions(String),
}

impl ScanError {
    /// Wrap a driver error, keeping timeouts distinguishable.
    pub fn from_driver(operation: &'static str, e: DriverError) -> Self {
        match e {
            DriverError::Timeout(message) => ScanError::DriverTimeout { operation, message },
            source => ScanError::Driver { operation, source },
        }
    }

    /// Whether this error came from a timed-out driver call.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ScanError::DriverTimeout { .. })
    }
}

/// A failed scan, together with the unread rows collected before the failure.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ScanFailure {
    #[source]
    pub error: ScanError,
    /// Unread rows in first-seen order, up to the failure.
    pub partial: Vec<ChatRow>,
}

impl ScanFailure {
    pub fn new(error: ScanError, partial: Vec<ChatRow>) -> Self {
        Self { error, partial }
    }
}

impl From<ScanError> for ScanFailure {
    fn from(error: ScanError) -> Self {
        Self::new(error, Vec::new())
    }
}
