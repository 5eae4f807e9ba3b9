//! Summaries via the Anthropic Messages API

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Summarizer, clean_summary};
use crate::config::SummarizerConfig;
use crate::event::EventEnvelope;

const API_VERSION: &str = "2023-06-01";
const MAX_PAYLOAD_CHARS: usize = 1000;

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

pub struct AnthropicSummarizer {
    agent: ureq::Agent,
    api_key: String,
    config: SummarizerConfig,
}

impl AnthropicSummarizer {
    pub fn new(config: &SummarizerConfig, api_key: String) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Self {
            agent: ureq::Agent::new_with_config(agent_config),
            api_key,
            config: config.clone(),
        }
    }
}

impl Summarizer for AnthropicSummarizer {
    fn summarize(&self, envelope: &EventEnvelope) -> Result<Option<String>> {
        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: "user",
                content: build_prompt(envelope),
            }],
        };
        let request_body = serde_json::to_string(&request).context("Failed to serialize request")?;

        let mut response = self
            .agent
            .post(&self.config.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .send(request_body.as_bytes())
            .context("Failed to call Anthropic API")?;

        let response_body = response
            .body_mut()
            .read_to_string()
            .context("Failed to read response")?;
        let response: MessagesResponse =
            serde_json::from_str(&response_body).context("Failed to parse Anthropic response")?;

        let text = response
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .find_map(|block| block.text.as_deref())
            .unwrap_or("");

        Ok(clean_summary(text))
    }
}

fn build_prompt(envelope: &EventEnvelope) -> String {
    let payload = serde_json::to_string_pretty(&envelope.payload).unwrap_or_default();

    format!(
        "Generate a one-sentence summary of this Claude Code hook event for an engineer \
         watching a live event stream.\n\n\
         Event type: {}\n\
         Payload:\n{}\n\n\
         Requirements:\n\
         - One sentence, under 15 words\n\
         - Present tense, focus on what is happening\n\
         - No quotes, no formatting\n\n\
         Summary:",
        envelope.hook_event_type,
        truncate_chars(&payload, MAX_PAYLOAD_CHARS)
    )
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
