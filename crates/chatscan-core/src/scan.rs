//! Unread-chat scan over a paginated, virtualized chat list.
//!
//! The visible window of the list is the only view available: rows come and
//! go as the list scrolls, overlapping windows repeat rows, and the reported
//! total is a best-effort estimate. A scan repeatedly folds the visible rows
//! into an [`AggregateState`], scrolls one page, and stops when either
//!
//! - no new sender showed up this round and the distinct-sender count has
//!   reached `stabilization_ratio` of the reported total, or
//! - the scan is bounded and `target` distinct senders have been seen.
//!
//! An iteration cap guards against a list that never stabilizes.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

use crate::aggregate::AggregateState;
use crate::driver::{DriverError, UiDriver};
use crate::error::{ScanError, ScanFailure};
use crate::parser::parse_snapshot;
use crate::row::ChatRow;

/// Scan parameters.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Stop once `target` distinct senders have been seen.
    pub limit: bool,
    /// Approximate number of distinct senders for a bounded scan.
    pub target: usize,
    /// Fraction of the reported row count that counts as fully traversed.
    pub stabilization_ratio: f64,
    /// Upper bound on scan iterations.
    pub max_iterations: usize,
    /// Per-call bound on driver calls, on top of the driver's own.
    pub call_timeout: Option<Duration>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            limit: true,
            target: 50,
            stabilization_ratio: 0.9,
            max_iterations: 200,
            call_timeout: None,
        }
    }
}

impl ScanOptions {
    /// Bounded scan stopping around `target` distinct senders.
    pub fn bounded(target: usize) -> Self {
        Self {
            limit: true,
            target,
            ..Self::default()
        }
    }

    /// Scan until the list stabilizes.
    pub fn unbounded() -> Self {
        Self {
            limit: false,
            ..Self::default()
        }
    }

    pub fn with_stabilization_ratio(mut self, ratio: f64) -> Self {
        self.stabilization_ratio = ratio;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// Reject options that cannot produce a meaningful scan.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.limit && self.target == 0 {
            return Err(ScanError::InvalidOptions(
                "target must be greater than 0".to_string(),
            ));
        }
        if !(self.stabilization_ratio > 0.0 && self.stabilization_ratio <= 1.0) {
            return Err(ScanError::InvalidOptions(format!(
                "stabilization_ratio must be in (0, 1], got {}",
                self.stabilization_ratio
            )));
        }
        if self.max_iterations == 0 {
            return Err(ScanError::InvalidOptions(
                "max_iterations must be greater than 0".to_string(),
            ));
        }
        if self.call_timeout == Some(Duration::ZERO) {
            return Err(ScanError::InvalidOptions(
                "call_timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Why a scan stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// No new senders and the count reached the stabilization threshold.
    Stabilized,
    /// A bounded scan reached its target.
    TargetReached,
    /// The caller cancelled; the rows are partial.
    Cancelled,
}

/// Result of a completed scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub scan_id: Uuid,
    /// Unread rows in first-seen order.
    pub unread_rows: Vec<ChatRow>,
    /// Distinct senders observed.
    pub distinct_seen: usize,
    /// Page advances performed.
    pub iterations: usize,
    pub stop_reason: StopReason,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ScanOutcome {
    /// Sender names of the unread rows.
    pub fn unread_names(&self) -> Vec<&str> {
        self.unread_rows.iter().map(|r| r.sender.as_str()).collect()
    }
}

/// Parse the reported row count.
///
/// Anything other than a non-negative integer is a data-source failure; it
/// is never read as zero, which would end the scan immediately.
pub fn parse_estimate(raw: &str) -> Result<u64, ScanError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ScanError::EstimateInvalid(raw.to_string()))
}

/// Runs unread-chat scans against a UI driver.
pub struct Scanner {
    driver: Arc<dyn UiDriver>,
    options: ScanOptions,
}

impl Scanner {
    pub fn new(driver: Arc<dyn UiDriver>, options: ScanOptions) -> Self {
        Self { driver, options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Fetch and parse the currently visible rows.
    pub async fn snapshot_rows(&self) -> Result<Vec<ChatRow>, ScanError> {
        let blocks = self.call("snapshot", self.driver.snapshot()).await?;
        Ok(parse_snapshot(&blocks))
    }

    /// Scan the chat list for unread chats.
    ///
    /// Cancellation is observed once per iteration, before scrolling, and
    /// yields the rows gathered so far. On failure the partial rows travel
    /// with the error.
    pub async fn scan_unread(&self, cancel: &CancellationToken) -> Result<ScanOutcome, ScanFailure> {
        self.options.validate()?;

        let scan_id = Uuid::new_v4();
        let started_at = Utc::now();
        let span = info_span!(
            "scan",
            %scan_id,
            limit = self.options.limit,
            target = self.options.target
        );

        let mut state = AggregateState::new();
        let mut iterations = 0;
        let result = self
            .drive(&mut state, &mut iterations, cancel)
            .instrument(span.clone())
            .await;

        let _enter = span.enter();
        match result {
            Ok(stop_reason) => {
                let distinct_seen = state.progress_counter();
                let unread_rows = state.into_unread_rows();
                let names: Vec<&str> = unread_rows.iter().map(|r| r.sender.as_str()).collect();
                if self.options.limit {
                    info!(
                        "Unread chats among the first {} chats: {:?}",
                        distinct_seen, names
                    );
                } else {
                    info!("All unread chats: {:?}", names);
                }
                Ok(ScanOutcome {
                    scan_id,
                    unread_rows,
                    distinct_seen,
                    iterations,
                    stop_reason,
                    started_at,
                    finished_at: Utc::now(),
                })
            }
            Err(error) => {
                info!(iterations, "Scan failed: {}", error);
                Err(ScanFailure::new(error, state.into_unread_rows()))
            }
        }
    }

    async fn drive(
        &self,
        state: &mut AggregateState,
        iterations: &mut usize,
        cancel: &CancellationToken,
    ) -> Result<StopReason, ScanError> {
        let mut rows = self.snapshot_rows().await?;

        loop {
            if *iterations >= self.options.max_iterations {
                return Err(ScanError::SafetyCapExceeded {
                    iterations: *iterations,
                });
            }

            let last_counter = state.progress_counter();
            *state = std::mem::take(state).fold(&rows);

            if cancel.is_cancelled() {
                info!(distinct_seen = state.progress_counter(), "Scan cancelled");
                return Ok(StopReason::Cancelled);
            }

            self.call("advance_page", self.driver.advance_page()).await?;
            *iterations += 1;
            rows = self.snapshot_rows().await?;

            let raw = self
                .call("row_count_estimate", self.driver.row_count_estimate())
                .await?;
            let estimate = parse_estimate(&raw)?;

            let counter = state.progress_counter();
            debug!(
                iteration = *iterations,
                distinct_seen = counter,
                estimate,
                "Scan progress"
            );

            if counter == last_counter
                && counter as f64 >= self.options.stabilization_ratio * estimate as f64
            {
                return Ok(StopReason::Stabilized);
            }
            if self.options.limit && counter >= self.options.target {
                return Ok(StopReason::TargetReached);
            }
        }
    }

    /// Await a driver call, bounded by `call_timeout` when set.
    async fn call<T, F>(&self, operation: &'static str, fut: F) -> Result<T, ScanError>
    where
        F: Future<Output = Result<T, DriverError>>,
    {
        let result = match self.options.call_timeout {
            Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| {
                ScanError::DriverTimeout {
                    operation,
                    message: format!("no response within {:?}", limit),
                }
            })?,
            None => fut.await,
        };
        result.map_err(|e| ScanError::from_driver(operation, e))
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
