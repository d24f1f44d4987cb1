//! Display utilities for the CLI

use std::time::UNIX_EPOCH;

use colored::Colorize;
use tagstore_apdu_core::TransportError;
use tagstore_mifare::{EraseReport, Error, ReadResult, WriteResult};

/// Format a success message
pub(crate) fn success(message: &str) -> String {
    format!("✅ {}", message.green().bold())
}

/// Format a warning message
pub(crate) fn warning(message: &str) -> String {
    format!("⚠️  {}", message.yellow().bold())
}

/// Format an info message
pub(crate) fn info(message: &str) -> String {
    format!("ℹ️  {}", message.blue())
}

/// Format a key-value section for important outputs
pub(crate) fn key_value_box(title: &str, items: Vec<(&str, String)>) -> String {
    let mut result = format!("{}", title.bold().underline());

    for (key, value) in items {
        result.push_str(&format!("\n  {}: {}", key.bold(), value));
    }

    result
}

fn blocks(blocks: &[u8]) -> String {
    if blocks.is_empty() {
        return "none".to_string();
    }
    blocks
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn read_result(result: &ReadResult) -> String {
    let text = if result.text.is_empty() {
        "(no readable text)".dimmed().to_string()
    } else {
        result.text.clone()
    };
    key_value_box("Card", vec![("UID", result.uid.to_string()), ("Text", text)])
}

pub(crate) fn write_result(result: &WriteResult) -> String {
    let timestamp = result
        .timestamp
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_default();
    key_value_box(
        "Written",
        vec![
            ("UID", result.uid.to_string()),
            ("Text", result.text.clone()),
            ("Blocks", blocks(&result.blocks)),
            ("Unix time", timestamp),
        ],
    )
}

pub(crate) fn erase_report(report: &EraseReport) -> String {
    key_value_box(
        "Erased",
        vec![
            ("UID", report.uid.to_string()),
            ("Blocks zeroed", report.erased.len().to_string()),
            ("Skipped", blocks(&report.skipped)),
        ],
    )
}

/// Turn a store error into a message for the operator
pub(crate) fn describe_error(error: &Error) -> String {
    let message = match error {
        Error::NoReader => "No card reader found. Connect a reader and try again.".to_string(),
        Error::Timeout { .. } => "No card was presented in time.".to_string(),
        Error::Cancelled => "Cancelled.".to_string(),
        Error::InvalidPayload(_) => "Nothing to write: the text is empty.".to_string(),
        Error::InsufficientCapacity {
            required,
            available,
        } => format!(
            "The text needs {required} blocks but this card only has {available} usable. \
             Shorten the text or use another card."
        ),
        Error::WriteVerification { block, written, .. } => format!(
            "Block {block} did not read back what was written (blocks {} hold partial data). \
             Present the card again.",
            blocks(written)
        ),
        Error::WriteAborted { block, written, .. } => format!(
            "Writing stopped at block {block} (blocks {} hold partial data). \
             Keep the card still and try again.",
            blocks(written)
        ),
        Error::Transport(TransportError::CardRemoved) => {
            "The card was removed too early. Keep it on the reader until done.".to_string()
        }
        Error::Transport(TransportError::ReaderUnavailable(_)) => {
            "The reader is not available. Check the connection.".to_string()
        }
        other => other.to_string(),
    };
    format!("❌ {}", message.red().bold())
}
