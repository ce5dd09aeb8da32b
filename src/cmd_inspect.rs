//! Parse, status and find subcommand handlers.

use std::path::Path;
use std::sync::Arc;

use chatscan_core::{
    ChatStatus, RawBlock, ReplayDriver, ReplayScript, ScanOptions, Scanner, find_chat,
    parse_snapshot, unread_status,
};

use tracing::info;

use crate::cli::OutputFormat;
use crate::output::{format_rows, print_rows};

/// Read a JSON array of raw blocks.
pub(crate) fn load_blocks(path: &Path) -> Result<Vec<RawBlock>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let blocks: Vec<Vec<String>> = serde_json::from_str(&content)?;
    Ok(blocks.into_iter().map(RawBlock::new).collect())
}

/// Parse raw blocks and print the recognized rows.
pub(crate) fn handle_parse(
    input: &Path,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let blocks = load_blocks(input)?;
    println!("{}", render_parse(&blocks, format)?);
    Ok(())
}

/// Stdout text for `parse`.
///
/// JSON output is the bare row array; the skipped-block count only goes to
/// the log there.
fn render_parse(blocks: &[RawBlock], format: OutputFormat) -> Result<String, serde_json::Error> {
    let rows = parse_snapshot(blocks);
    let skipped = blocks.len() - rows.len();
    if skipped > 0 {
        info!("Skipped {} unrecognized block(s)", skipped);
    }

    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&rows),
        OutputFormat::Table => {
            let mut out = format_rows(&rows);
            if skipped > 0 {
                out.push_str(&format!("\n\nSkipped {} unrecognized block(s).", skipped));
            }
            Ok(out)
        }
    }
}

async fn first_snapshot(
    replay: &Path,
) -> Result<Vec<chatscan_core::ChatRow>, Box<dyn std::error::Error>> {
    let script = ReplayScript::load(replay)?;
    let scanner = Scanner::new(Arc::new(ReplayDriver::new(script)), ScanOptions::default());
    Ok(scanner.snapshot_rows().await?)
}

/// Print the unread state of one chat.
pub(crate) async fn handle_status(
    name: &str,
    replay: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = first_snapshot(replay).await?;
    match unread_status(&rows, name) {
        ChatStatus::Unread { count } => println!("{}: {} unread message(s)", name, count),
        ChatStatus::Read => println!("{}: no new messages", name),
        ChatStatus::NotFound => println!("{}: chat not found", name),
    }
    Ok(())
}

/// Print the first chat whose name contains `query`.
pub(crate) async fn handle_find(
    query: &str,
    replay: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = first_snapshot(replay).await?;
    match find_chat(&rows, query) {
        Some(row) => print_rows(std::slice::from_ref(row)),
        None => println!("Could not locate chat \"{}\"", query),
    }
    Ok(())
}
