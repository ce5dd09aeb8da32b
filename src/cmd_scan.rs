//! Scan subcommand handler.

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};

use chatscan_config::ScanConfig;
use chatscan_core::{CancellationToken, ReplayDriver, ReplayScript, ScanOptions, Scanner};

use crate::cli::OutputFormat;
use crate::output::{print_outcome, print_rows};

/// Command-line overrides for the configured scan parameters.
#[derive(Debug, Default)]
pub(crate) struct ScanOverrides {
    /// `Some(true)` forces a bounded scan, `Some(false)` an unbounded one.
    pub limit: Option<bool>,
    pub target: Option<usize>,
    pub ratio: Option<f64>,
    pub max_iterations: Option<usize>,
}

/// Map the `--limit`/`--unbounded` flag pair to a limit override.
///
/// clap keeps only the last of the two, so at most one is set.
pub(crate) fn limit_override(limit: bool, unbounded: bool) -> Option<bool> {
    match (limit, unbounded) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Merge configured scan parameters with command-line overrides.
pub(crate) fn scan_options(config: &ScanConfig, overrides: &ScanOverrides) -> ScanOptions {
    ScanOptions {
        limit: overrides.limit.unwrap_or(config.limit),
        target: overrides.target.unwrap_or(config.target),
        stabilization_ratio: overrides.ratio.unwrap_or(config.stabilization_ratio),
        max_iterations: overrides.max_iterations.unwrap_or(config.max_iterations),
        call_timeout: config.call_timeout(),
    }
}

/// Run a scan over a replay script.
pub(crate) async fn handle_scan(
    config: &ScanConfig,
    replay: &Path,
    overrides: ScanOverrides,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let script = ReplayScript::load(replay)?;
    info!("Replaying {} page(s) from {}", script.pages.len(), replay.display());

    let options = scan_options(config, &overrides);
    let scanner = Scanner::new(Arc::new(ReplayDriver::new(script)), options);

    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current page");
            token.cancel();
        }
    });

    match scanner.scan_unread(&cancel).await {
        Ok(outcome) => {
            print_outcome(&outcome, format)?;
            Ok(())
        }
        Err(failure) => {
            error!("Scan failed: {}", failure.error);
            if !failure.partial.is_empty() {
                println!("Unread chats found before the failure:");
                print_rows(&failure.partial);
            }
            Err(Box::new(failure))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_scan_options_from_config() {
        let config = ScanConfig {
            call_timeout_secs: Some(10),
            ..Default::default()
        };
        let options = scan_options(&config, &ScanOverrides::default());
        assert!(options.limit);
        assert_eq!(options.target, 50);
        assert_eq!(options.stabilization_ratio, 0.9);
        assert_eq!(options.call_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_overrides_win() {
        let overrides = ScanOverrides {
            limit: Some(false),
            target: Some(8),
            ratio: Some(0.75),
            max_iterations: Some(12),
        };
        let options = scan_options(&ScanConfig::default(), &overrides);
        assert!(!options.limit);
        assert_eq!(options.target, 8);
        assert_eq!(options.stabilization_ratio, 0.75);
        assert_eq!(options.max_iterations, 12);
    }

    #[test]
    fn test_unbounded_config_stays_unbounded() {
        let config = ScanConfig {
            limit: false,
            ..Default::default()
        };
        assert!(!scan_options(&config, &ScanOverrides::default()).limit);
    }

    #[test]
    fn test_limit_flag_reenables_bounded_scan() {
        let config = ScanConfig {
            limit: false,
            ..Default::default()
        };
        let overrides = ScanOverrides {
            limit: limit_override(true, false),
            target: Some(5),
            ..Default::default()
        };
        let options = scan_options(&config, &overrides);
        assert!(options.limit);
        assert_eq!(options.target, 5);
    }

    #[test]
    fn test_limit_override() {
        assert_eq!(limit_override(false, false), None);
        assert_eq!(limit_override(true, false), Some(true));
        assert_eq!(limit_override(false, true), Some(false));
    }
}
