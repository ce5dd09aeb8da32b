//! Result rendering for the CLI.

use serde::Serialize;

use chatscan_core::{ChatRow, ScanOutcome};

use crate::cli::OutputFormat;

/// Print rows as a table.
pub(crate) fn print_rows(rows: &[ChatRow]) {
    println!("{}", format_rows(rows));
}

/// Render rows as a table.
pub(crate) fn format_rows(rows: &[ChatRow]) -> String {
    if rows.is_empty() {
        return "No chats.".to_string();
    }

    let mut out = format!(
        "{:<28} {:<12} {:>6} {:<6} {}\n",
        "CHAT", "TIME", "UNREAD", "GROUP", "PREVIEW"
    );
    out.push_str(&"-".repeat(80));
    for row in rows {
        let group = if row.is_group { "yes" } else { "-" };
        out.push_str(&format!(
            "\n{:<28} {:<12} {:>6} {:<6} {}",
            row.sender, row.time, row.unread_count, group, row.message_preview
        ));
    }
    out
}

/// Print a scan outcome.
pub(crate) fn print_outcome(
    outcome: &ScanOutcome,
    format: OutputFormat,
) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Json => print_json(outcome),
        OutputFormat::Table => {
            print_rows(&outcome.unread_rows);
            println!();
            println!(
                "{} unread of {} chats seen, {} pages, stopped: {:?}",
                outcome.unread_rows.len(),
                outcome.distinct_seen,
                outcome.iterations,
                outcome.stop_reason
            );
            Ok(())
        }
    }
}

/// Print any serializable value as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
