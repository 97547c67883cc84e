use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{BrunelError, Result};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "brunel_engine=info,tower_http=info";
const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Main configuration structure loaded from brunel.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Upstream model settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model id sent to the Messages API
    pub model: String,
    /// Short name reported by the health endpoint
    pub label: String,
    pub api_url: String,
    pub chat_max_tokens: u32,
    pub analysis_max_tokens: u32,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".to_string(),
            label: "claude-sonnet-4".to_string(),
            api_url: "https://api.anthropic.com/v1/messages".to_string(),
            chat_max_tokens: 500,
            analysis_max_tokens: 2000,
            request_timeout_secs: None,
        }
    }
}

impl ModelConfig {
    /// Apply BRUNEL_* overrides on top of file/default values.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = lookup("BRUNEL_MODEL") {
            self.model = model;
        }
        if let Some(label) = lookup("BRUNEL_MODEL_LABEL") {
            self.label = label;
        }
        if let Some(url) = lookup("BRUNEL_API_URL") {
            self.api_url = url;
        }
        if let Some(n) = lookup("BRUNEL_CHAT_MAX_TOKENS").and_then(|v| v.parse().ok()) {
            self.chat_max_tokens = n;
        }
        if let Some(n) = lookup("BRUNEL_ANALYSIS_MAX_TOKENS").and_then(|v| v.parse().ok()) {
            self.analysis_max_tokens = n;
        }
        if let Some(secs) = lookup("BRUNEL_REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.request_timeout_secs = Some(secs);
        }
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub api_key: Option<String>,
    pub http_bind: SocketAddr,
    pub static_dir: PathBuf,
    pub body_limit_bytes: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            http_bind: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            static_dir: PathBuf::from("public"),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Any non-empty ANTHROPIC_API_KEY counts as configured, even whitespace.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self {
            api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.is_empty()),
            ..Self::default()
        };

        if let Some(v) = lookup("PORT") {
            let port = v.parse::<u16>().map_err(|_| BrunelError::Config {
                message: format!("PORT '{v}' is not a valid port number"),
            })?;
            cfg.http_bind.set_port(port);
        }
        if let Some(v) = lookup("BRUNEL_HTTP_BIND") {
            cfg.http_bind = v.parse::<SocketAddr>().map_err(|_| BrunelError::Config {
                message: format!("BRUNEL_HTTP_BIND '{v}' is not a socket address"),
            })?;
        }
        if let Some(dir) = lookup("BRUNEL_STATIC_DIR") {
            cfg.static_dir = PathBuf::from(dir);
        }
        if let Some(limit) = lookup("BRUNEL_BODY_LIMIT_BYTES").and_then(|v| v.parse().ok()) {
            cfg.body_limit_bytes = limit;
        }

        Ok(cfg)
    }
}

/// Load BRUNEL_ENV_FILE (default `.env`) into the process environment.
///
/// Values from the file win over the inherited environment. Returns the path
/// when a file was read. Call before tracing is initialised so RUST_LOG from
/// the file applies.
pub fn load_env_file() -> Option<String> {
    let env_path = std::env::var("BRUNEL_ENV_FILE").unwrap_or_else(|_| ".env".to_string());
    dotenvy::from_path_override(&env_path).ok().map(|_| env_path)
}

/// Tracing filter from RUST_LOG, falling back to the crate default.
pub fn log_filter() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses BRUNEL_CONFIG environment variable or defaults to "brunel.toml".
    /// Expects `load_env_file` to have run already.
    pub fn load() -> anyhow::Result<Self> {
        let config_path =
            std::env::var("BRUNEL_CONFIG").unwrap_or_else(|_| "brunel.toml".to_string());

        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(content) => toml::from_str(&content)?,
            Err(_) => {
                tracing::debug!("Config file {} not found, using defaults", config_path);
                Self::default()
            }
        };

        config.model.apply_overrides(|key| std::env::var(key).ok());
        config.runtime = RuntimeConfig::load_from_env()?;
        config.validate()?;

        Ok(config)
    }

    pub fn has_api_key(&self) -> bool {
        self.runtime.api_key.is_some()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.model.trim().is_empty() {
            return Err(BrunelError::Config {
                message: "model id must not be empty".to_string(),
            });
        }
        if self.model.chat_max_tokens == 0 || self.model.analysis_max_tokens == 0 {
            return Err(BrunelError::Config {
                message: "max token limits must be greater than zero".to_string(),
            });
        }
        if !self.model.api_url.starts_with("http://") && !self.model.api_url.starts_with("https://")
        {
            return Err(BrunelError::Config {
                message: format!("api_url '{}' must be an http(s) URL", self.model.api_url),
            });
        }
        Ok(())
    }
}
