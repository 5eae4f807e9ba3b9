//! Transcript loading
//!
//! Claude Code writes the conversation as JSONL. Each non-blank line is one
//! record; lines that do not parse are dropped and the rest keep file order.

use eyre::{Context, Result};
use std::fs;
use std::path::Path;

/// Load a JSONL transcript into an ordered list of records
pub fn load(path: &Path) -> Result<Vec<serde_json::Value>> {
    let content = fs::read(path).with_context(|| format!("Failed to read transcript: {}", path.display()))?;
    Ok(parse_lines(&content))
}

/// Parse JSONL bytes, skipping blank and malformed lines
pub fn parse_lines(content: &[u8]) -> Vec<serde_json::Value> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in content.split(|b| *b == b'\n') {
        let line = line.trim_ascii();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_slice(line) {
            Ok(record) => records.push(record),
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        log::debug!("Skipped {} malformed transcript lines", skipped);
    }
    records
}
