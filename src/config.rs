use std::net::SocketAddr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ROUTING_BASE_URL: &str = "https://api.notdiamond.ai";
const DEFAULT_FALLBACK_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive whole number of seconds, got `{value}`")]
    InvalidTimeout { name: &'static str, value: String },

    #[error("{name} is not a valid socket address: `{value}`")]
    InvalidAddress { name: &'static str, value: String },

    #[error("LOG_FORMAT must be `pretty` or `json`, got `{0}`")]
    InvalidLogFormat(String)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub routing_api_key: Option<SecretString>,
    pub fallback_api_key: Option<SecretString>,
    pub default_model: String,
    pub timeout: Duration,
    pub routing_base_url: String,
    pub fallback_base_url: String,
    pub listen_addr: SocketAddr,
    pub log_format: LogFormat
}

impl Config {

    pub fn from_env() -> Result<Self, ConfigError> {

        Self::from_lookup(|name| std::env::var(name).ok())

    }

    /// Build from any key lookup so tests never touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {

        // treat empty values like unset ones
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let timeout = match get("ROUTING_TIMEOUT_SECS") {
            Some(raw) => parse_timeout("ROUTING_TIMEOUT_SECS", &raw)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        };

        let listen_raw = get("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_raw
            .parse()
            .map_err(|_| ConfigError::InvalidAddress { name: "LISTEN_ADDR", value: listen_raw.clone() })?;

        let log_format = match get("LOG_FORMAT").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(ConfigError::InvalidLogFormat(other.to_string()))
        };

        Ok(Config {
            routing_api_key: get("NOTDIAMOND_API_KEY").map(SecretString::from),
            fallback_api_key: get("OPENAI_API_KEY").map(SecretString::from),
            default_model: get("DEFAULT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout,
            routing_base_url: get("ROUTING_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ROUTING_BASE_URL.to_string()),
            fallback_base_url: get("FALLBACK_BASE_URL")
                .unwrap_or_else(|| DEFAULT_FALLBACK_BASE_URL.to_string()),
            listen_addr,
            log_format
        })

    }

}

fn parse_timeout(name: &'static str, raw: &str) -> Result<Duration, ConfigError> {

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout { name, value: raw.to_string() })
    }

}
