use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the source application when `--source-app` is absent
pub const APP_NAME_VAR: &str = "APP_NAME";
/// Environment variable carrying the collector base URL
pub const SERVER_URL_VAR: &str = "OBSERVABILITY_SERVER_URL";
/// Environment variable carrying the summarizer API key
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
/// Environment variable pointing at a config file
pub const CONFIG_VAR: &str = "HOOKRELAY_CONFIG";

/// Main relay configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    /// Append diagnostics here instead of stderr
    pub log_file: Option<PathBuf>,
    pub discovery: DiscoveryConfig,
    pub delivery: DeliveryConfig,
    pub summarizer: SummarizerConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Collector address when running directly on the host
    pub local_url: String,
    /// Collector address as seen from inside a container
    pub container_url: String,
    /// Liveness probe timeout in seconds
    pub probe_timeout_secs: u64,
    /// Path requested by the liveness probe
    pub health_path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeliveryConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            log_file: None,
            discovery: DiscoveryConfig::default(),
            delivery: DeliveryConfig::default(),
            summarizer: SummarizerConfig::default(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            local_url: "http://localhost:4000".to_string(),
            container_url: "http://host.docker.internal:4000".to_string(),
            probe_timeout_secs: 3,
            health_path: "/".to_string(),
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            user_agent: "Claude-Code-Hook/1.0".to_string(),
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.anthropic.com/v1/messages".to_string(),
            model: "claude-3-5-haiku-latest".to_string(),
            max_tokens: 100,
            timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // An explicit path must load, everything else is best effort
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let mut candidates = Vec::new();
        if let Some(env_path) = std::env::var_os(CONFIG_VAR) {
            candidates.push(PathBuf::from(env_path));
        }
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("hookrelay").join("hookrelay.yaml"));
        }
        candidates.push(PathBuf::from("hookrelay.yaml"));

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}

/// Process environment, captured once at startup
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub app_name: Option<String>,
    pub server_url: Option<String>,
    pub api_key: Option<String>,
}

impl Environment {
    pub fn capture() -> Self {
        Self {
            app_name: non_empty_var(APP_NAME_VAR),
            server_url: non_empty_var(SERVER_URL_VAR),
            api_key: non_empty_var(API_KEY_VAR),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// First value present in a prioritized list of optional sources
pub fn first_present<T>(sources: impl IntoIterator<Item = Option<T>>) -> Option<T> {
    sources.into_iter().flatten().next()
}
