//! Envelope construction with optional transcript and summary enrichment

use chrono::Utc;
use eyre::{Result, eyre};
use std::path::PathBuf;

use super::{EventEnvelope, UNKNOWN_SESSION, transcript};
use crate::summarizer::Summarizer;

/// Enrichment switches
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Attach the conversation transcript referenced by `transcript_path`
    pub add_chat: bool,
    /// Attach a generated one-line summary
    pub summarize: bool,
}

/// Parse hook input, which must be a single JSON object
pub fn parse_input(raw: &str) -> Result<serde_json::Value> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| eyre!("Failed to parse JSON input: {}", e))?;

    if !value.is_object() {
        eyre::bail!("Hook input must be a JSON object");
    }
    Ok(value)
}

pub struct EventBuilder<'a> {
    summarizer: Option<&'a dyn Summarizer>,
}

impl<'a> EventBuilder<'a> {
    pub fn new(summarizer: Option<&'a dyn Summarizer>) -> Self {
        Self { summarizer }
    }

    /// Build an envelope. Enrichment failures are logged and leave the
    /// corresponding field absent; building itself never fails.
    pub fn build(
        &self,
        raw_input: serde_json::Value,
        source_app: &str,
        hook_event_type: &str,
        options: BuildOptions,
    ) -> EventEnvelope {
        let session_id = session_id(&raw_input);
        let chat = if options.add_chat { load_chat(&raw_input) } else { None };

        let mut envelope = EventEnvelope {
            source_app: source_app.to_string(),
            session_id,
            hook_event_type: hook_event_type.to_string(),
            payload: raw_input,
            timestamp: Utc::now().timestamp_millis(),
            chat,
            summary: None,
        };

        if options.summarize {
            envelope.summary = self.summarize(&envelope);
        }

        envelope
    }

    fn summarize(&self, envelope: &EventEnvelope) -> Option<String> {
        let Some(summarizer) = self.summarizer else {
            log::warn!("Summary requested but no summarizer is available (is ANTHROPIC_API_KEY set?)");
            return None;
        };

        match summarizer.summarize(envelope) {
            Ok(summary) => summary,
            Err(e) => {
                log::warn!("Failed to generate summary: {:#}", e);
                None
            }
        }
    }
}

fn session_id(input: &serde_json::Value) -> String {
    match input.get("session_id") {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => UNKNOWN_SESSION.to_string(),
        Some(other) => other.to_string(),
    }
}

fn load_chat(input: &serde_json::Value) -> Option<Vec<serde_json::Value>> {
    let raw_path = input.get("transcript_path").and_then(|v| v.as_str())?;
    // Only `~` is expanded; `$` is a legal path character here
    let path = PathBuf::from(shellexpand::tilde(raw_path).as_ref());

    if !path.exists() {
        log::debug!("Transcript not found: {}", path.display());
        return None;
    }

    match transcript::load(&path) {
        Ok(chat) => Some(chat),
        Err(e) => {
            log::warn!("Failed to read transcript: {:#}", e);
            None
        }
    }
}
