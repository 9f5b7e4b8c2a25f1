//! Configuration for impress-subscriptions
//!
//! Holds the backend location, transport settings, and every user-visible
//! string the controller shows. Loaded from `~/.impress/subscriptions.toml`
//! when present, with `IMPRESS_API_BASE_URL` overriding the base URL.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Environment variable overriding `api.base_url`
pub const BASE_URL_ENV: &str = "IMPRESS_API_BASE_URL";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionsConfig {
    /// Backend connection settings
    pub api: ApiConfig,
    /// User-visible strings and message colors
    pub messages: MessageCatalog,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, e.g. `http://127.0.0.1:8000`
    pub base_url: String,
    /// Transport timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Value sent in the `api_key` field of create requests
    pub credential_placeholder: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 30,
            user_agent: "impress-subscriptions/1.0".to_string(),
            credential_placeholder: "LLM_QUERY".to_string(),
        }
    }
}

impl ApiConfig {
    /// Parse and check the base URL
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidBaseUrl(format!("{}: {}", self.base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl(format!(
                "{} cannot carry path segments",
                self.base_url
            )));
        }
        Ok(url)
    }
}

/// Strings and colors shown by the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageCatalog {
    /// Shown in place of the list when there are no subscriptions
    pub empty_placeholder: String,
    /// Label of each row's delete control
    pub delete_label: String,
    pub query_required: String,
    pub alias_required: String,
    pub add_succeeded: String,
    /// Shown when the server rejects a create without a `detail`
    pub add_failed: String,
    /// Shown when the create request never got a response
    pub add_retry_later: String,
    pub error_color: String,
    pub success_color: String,
    pub placeholder_color: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            empty_placeholder: "No smart subscriptions yet, add one below.".to_string(),
            delete_label: "Delete".to_string(),
            query_required: "query text required".to_string(),
            alias_required: "alias is required".to_string(),
            add_succeeded: "Smart subscription added.".to_string(),
            add_failed: "Failed to add smart subscription".to_string(),
            add_retry_later: "Failed to add smart subscription, please try again later"
                .to_string(),
            error_color: "#c00".to_string(),
            success_color: "#080".to_string(),
            placeholder_color: "#999".to_string(),
        }
    }
}

impl MessageCatalog {
    /// Simplified Chinese strings
    pub fn zh_cn() -> Self {
        Self {
            empty_placeholder: "暂无智能订阅，可在下方新增。".to_string(),
            delete_label: "删除".to_string(),
            query_required: "查询语句不能为空".to_string(),
            alias_required: "备注为必填项".to_string(),
            add_succeeded: "智能订阅已新增。".to_string(),
            add_failed: "新增智能订阅失败".to_string(),
            add_retry_later: "新增智能订阅失败，请稍后重试".to_string(),
            ..Self::default()
        }
    }
}

impl SubscriptionsConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`~/.impress/subscriptions.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".impress").join("subscriptions.toml"))
    }

    /// Load configuration from standard locations
    ///
    /// Reads `explicit` if given, else `~/.impress/subscriptions.toml` when
    /// it exists, else defaults. A non-blank `IMPRESS_API_BASE_URL` then
    /// replaces the base URL, and the result is validated.
    pub fn load_standard(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                tracing::debug!("Using base URL from {}", BASE_URL_ENV);
                config.api.base_url = base_url.trim().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!("Loaded subscriptions config from {:?}", path);
        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.parsed_base_url()?;

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::OutOfRange(
                "timeout_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
