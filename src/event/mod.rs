//! Canonical event envelope and its construction

use serde::{Deserialize, Serialize};

pub mod builder;
pub mod transcript;

pub use builder::{BuildOptions, EventBuilder, parse_input};

/// Session id used when the hook input carries none
pub const UNKNOWN_SESSION: &str = "unknown";

/// The record delivered to the collector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub source_app: String,
    pub session_id: String,
    pub hook_event_type: String,
    /// Hook input exactly as received
    pub payload: serde_json::Value,
    /// Milliseconds since the Unix epoch, taken at build time
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}
