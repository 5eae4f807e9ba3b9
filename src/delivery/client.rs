use eyre::{Context, Result};
use std::time::Duration;

use crate::config::DeliveryConfig;
use crate::event::EventEnvelope;

/// POSTs envelopes to the collector
pub struct DeliveryClient {
    agent: ureq::Agent,
    user_agent: String,
}

impl DeliveryClient {
    pub fn new(config: &DeliveryConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            // The collector sits on this host or its container gateway
            .proxy(None)
            .build();

        Self {
            agent: ureq::Agent::new_with_config(agent_config),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Deliver one envelope. True only on HTTP 200.
    pub fn deliver(&self, envelope: &EventEnvelope, endpoint: &str) -> bool {
        match self.post(envelope, endpoint) {
            Ok(()) => {
                log::info!(
                    "Delivered {} event for session {} to {}",
                    envelope.hook_event_type,
                    envelope.session_id,
                    endpoint
                );
                true
            }
            Err(e) => {
                log::warn!("Failed to send event: {:#}", e);
                false
            }
        }
    }

    fn post(&self, envelope: &EventEnvelope, endpoint: &str) -> Result<()> {
        let body = serde_json::to_string(envelope).context("Failed to serialize event")?;

        let response = self
            .agent
            .post(endpoint)
            .header("Content-Type", "application/json")
            .header("User-Agent", &self.user_agent)
            .send(body.as_bytes())
            .with_context(|| format!("HTTP request to {} failed", endpoint))?;

        let status = response.status().as_u16();
        if status != 200 {
            eyre::bail!("Server returned status: {}", status);
        }
        Ok(())
    }
}
