//! Collector endpoint discovery
//!
//! The collector may live on the same host or, when the hook runs inside a
//! container, behind the container-to-host gateway. Rather than trusting
//! configuration, each candidate base URL is probed in priority order and the
//! first live one wins. Nothing is cached: every call probes again.

use std::time::Duration;

use crate::config::DiscoveryConfig;

pub mod probe;

pub use probe::{Prober, join_url};

/// Path the collector ingests events on
pub const EVENTS_PATH: &str = "/events";

/// Resolves a working collector base URL
pub struct Discovery {
    env_url: Option<String>,
    local_url: String,
    container_url: String,
    prober: Prober,
}

impl Discovery {
    pub fn new(config: &DiscoveryConfig, env_url: Option<String>, user_agent: &str) -> Self {
        Self {
            env_url,
            local_url: config.local_url.clone(),
            container_url: config.container_url.clone(),
            prober: Prober::new(
                Duration::from_secs(config.probe_timeout_secs),
                &config.health_path,
                user_agent,
            ),
        }
    }

    /// Candidate base URLs in priority order, duplicates removed
    pub fn candidates(&self, explicit_url: Option<&str>) -> Vec<String> {
        let ordered = [
            explicit_url,
            self.env_url.as_deref(),
            Some(self.local_url.as_str()),
            Some(self.container_url.as_str()),
        ];

        let mut unique: Vec<String> = Vec::new();
        for url in ordered.into_iter().flatten() {
            if !unique.iter().any(|seen| seen == url) {
                unique.push(url.to_string());
            }
        }
        unique
    }

    /// First candidate passing the liveness probe
    pub fn discover(&self, explicit_url: Option<&str>) -> Option<String> {
        self.candidates(explicit_url)
            .into_iter()
            .find(|url| self.prober.is_alive(url))
            .inspect(|url| log::info!("Discovered collector at {}", url))
    }

    /// `<base>/events` on the discovered collector
    pub fn events_endpoint(&self, explicit_url: Option<&str>) -> Option<String> {
        self.api_endpoint(EVENTS_PATH, explicit_url)
    }

    /// `<base><path>` on the discovered collector
    pub fn api_endpoint(&self, path: &str, explicit_url: Option<&str>) -> Option<String> {
        self.discover(explicit_url).map(|base| join_url(&base, path))
    }

    /// Probe a single base URL, no fallback
    pub fn probe(&self, base_url: &str) -> bool {
        self.prober.is_alive(base_url)
    }
}

/// Events endpoint for a configured base URL.
///
/// URLs already pointing at the events path are used as given.
pub fn events_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with(EVENTS_PATH) {
        trimmed.to_string()
    } else {
        join_url(trimmed, EVENTS_PATH)
    }
}
