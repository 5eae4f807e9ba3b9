//! Collector liveness probe

use std::time::Duration;

/// Issues bounded-timeout GET requests against candidate base URLs
pub struct Prober {
    agent: ureq::Agent,
    health_path: String,
    user_agent: String,
}

impl Prober {
    pub fn new(timeout: Duration, health_path: &str, user_agent: &str) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            // The collector sits on this host or its container gateway
            .proxy(None)
            .build();

        Self {
            agent: ureq::Agent::new_with_config(config),
            health_path: health_path.to_string(),
            user_agent: user_agent.to_string(),
        }
    }

    /// True only when the collector answers the health path with 200.
    ///
    /// Connection failures, timeouts and unparseable URLs all count as
    /// a failed probe.
    pub fn is_alive(&self, base_url: &str) -> bool {
        let url = join_url(base_url, &self.health_path);

        match self.agent.get(&url).header("User-Agent", &self.user_agent).call() {
            Ok(response) => {
                let status = response.status().as_u16();
                log::debug!("Probe {} -> {}", url, status);
                status == 200
            }
            Err(e) => {
                log::debug!("Probe {} failed: {}", url, e);
                false
            }
        }
    }
}

/// Join a base URL and a path without doubling or dropping the slash
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}
