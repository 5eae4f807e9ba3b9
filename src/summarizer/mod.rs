//! Event summarization
//!
//! A summarizer turns an envelope into one short human-readable sentence.
//! `Ok(None)` means it had nothing to say; errors are never fatal to the
//! caller.

use eyre::Result;

use crate::event::EventEnvelope;

pub mod anthropic;

pub use anthropic::AnthropicSummarizer;

pub trait Summarizer {
    fn summarize(&self, envelope: &EventEnvelope) -> Result<Option<String>>;
}

/// Reduce model output to a single clean line
pub fn clean_summary(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let line = line.trim_matches(|c: char| c == '"' || c == '\'').trim();
    if line.is_empty() { None } else { Some(line.to_string()) }
}
