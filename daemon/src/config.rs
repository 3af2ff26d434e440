use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub debounce: DebounceConfig,
    #[serde(default)]
    pub selector: SelectorConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServiceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8000/transliterate".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

/// Deduplication policy for the trailing word.
///
/// `Value` suppresses a dispatch whenever the trailing word equals the last
/// accepted output, regardless of where it sits. `Position` also requires the
/// word to occupy the same index, so retyping an identical word later in the
/// buffer dispatches again.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DedupPolicy {
    #[default]
    Value,
    Position,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DebounceConfig {
    #[serde(default = "default_quiet_period")]
    pub quiet_period_ms: u64,
    #[serde(default)]
    pub dedup_policy: DedupPolicy,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: default_quiet_period(),
            dedup_policy: DedupPolicy::Value,
        }
    }
}

fn default_quiet_period() -> u64 {
    700
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SelectorConfig {
    #[serde(default = "default_model")]
    pub default_model: u32,
    #[serde(default = "default_notice_duration")]
    pub notice_duration_ms: u64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            notice_duration_ms: default_notice_duration(),
        }
    }
}

fn default_model() -> u32 {
    1
}

fn default_notice_duration() -> u64 {
    2000
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst_capacity")]
    pub burst_capacity: u32,
    #[serde(default = "default_rate_limit_enabled")]
    pub enabled: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
            burst_capacity: default_burst_capacity(),
            enabled: default_rate_limit_enabled(),
        }
    }
}

fn default_requests_per_second() -> u32 {
    5
}

fn default_burst_capacity() -> u32 {
    10
}

fn default_rate_limit_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TimeoutsConfig {
    #[serde(default = "default_socket_connect_timeout")]
    pub socket_connect_timeout_seconds: u64,
    #[serde(default = "default_socket_operation_timeout")]
    pub socket_operation_timeout_seconds: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            socket_connect_timeout_seconds: default_socket_connect_timeout(),
            socket_operation_timeout_seconds: default_socket_operation_timeout(),
        }
    }
}

fn default_socket_connect_timeout() -> u64 {
    5
}

fn default_socket_operation_timeout() -> u64 {
    10
}

pub fn load_config() -> Result<Config> {
    let config_path = get_config_path();

    if !config_path.exists() {
        tracing::info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(Config::default());
    }

    tracing::info!("Loading config from {:?}", config_path);
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

    tracing::info!("Config loaded successfully");
    Ok(config)
}

fn get_config_path() -> PathBuf {
    dirs::config_dir()
        .expect("Failed to get config directory")
        .join("lipika")
        .join("config.toml")
}
