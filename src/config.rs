use crate::domain::value_objects::OperatorRole;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // Backend connection
    pub api_url: String,
    pub request_timeout_secs: u64,

    // Console API for the UI
    pub listen_addr: String,

    // Session
    pub role: OperatorRole,
    pub kv_path: Option<String>,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8082".to_string(),
            request_timeout_secs: 10,
            listen_addr: "0.0.0.0:8090".to_string(),
            role: OperatorRole::Admin,
            kv_path: None,
            debug: false,
        }
    }
}

impl Config {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::MissingApiUrl);
        }
        if self.listen_addr.trim().is_empty() {
            return Err(ConfigError::MissingListenAddr);
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("api_url is required")]
    MissingApiUrl,
    #[error("listen_addr is required")]
    MissingListenAddr,
    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,
    #[error("{0}")]
    InvalidRole(String),
}

pub fn load_config() -> anyhow::Result<Config> {
    let api_url = std::env::var("BROKER_CONSOLE_API_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8082".to_string());

    let request_timeout_secs = std::env::var("BROKER_CONSOLE_REQUEST_TIMEOUT_SECS")
        .unwrap_or_else(|_| "10".to_string())
        .parse()
        .unwrap_or(10);

    let listen_addr = std::env::var("BROKER_CONSOLE_LISTEN_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8090".to_string());

    let role = match std::env::var("BROKER_CONSOLE_ROLE") {
        Ok(raw) => raw.parse().map_err(ConfigError::InvalidRole)?,
        Err(_) => OperatorRole::Admin,
    };

    let kv_path = std::env::var("BROKER_CONSOLE_KV_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty());

    let debug = std::env::var("DEBUG").is_ok();

    let cfg = Config {
        api_url,
        request_timeout_secs,
        listen_addr,
        role,
        kv_path,
        debug,
    };
    cfg.validate()?;

    Ok(cfg)
}
