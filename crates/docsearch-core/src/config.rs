//! DocSearch configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DocSearchError, Result};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocSearchConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl DocSearchConfig {
    /// Load config from the default path (~/.docsearch/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DocSearchError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| DocSearchError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Load from `path` if given, else from the default path, then apply
    /// the process environment on top.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override LLM settings from `OPENAI_BASE_URL`, `OPENAI_API_KEY` and
    /// `OPENAI_MODEL`. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("OPENAI_BASE_URL") {
            self.llm.base_url = url;
        }
        if let Some(key) = non_empty("OPENAI_API_KEY") {
            self.llm.api_key = key;
            self.llm.api_key_from_env = true;
        }
        if let Some(model) = non_empty("OPENAI_MODEL") {
            self.llm.model = model;
        }
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the DocSearch home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".docsearch")
    }
}

/// Placeholder key used when none is configured.
pub const PLACEHOLDER_API_KEY: &str = "sk-dummy";

/// Chat-completion endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(skip)]
    pub api_key_from_env: bool,
}

fn default_base_url() -> String { "https://api.openai.com/v1".into() }
fn default_api_key() -> String { PLACEHOLDER_API_KEY.into() }
fn default_model() -> String { "qwen/qwen3-8b".into() }

impl LlmConfig {
    /// Whether a real key was configured, as opposed to the placeholder.
    pub fn has_api_key(&self) -> bool {
        self.api_key_from_env || (!self.api_key.is_empty() && self.api_key != PLACEHOLDER_API_KEY)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: default_api_key(),
            model: default_model(),
            api_key_from_env: false,
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 { 3000 }
fn default_host() -> String { "127.0.0.1".into() }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Search defaults shared by both front ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Result limit when a search request does not give one.
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Number of documents retrieved as context for a chat request.
    #[serde(default = "default_chat_context_limit")]
    pub chat_context_limit: usize,
}

fn default_limit() -> usize { 5 }
fn default_chat_context_limit() -> usize { 3 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            chat_context_limit: default_chat_context_limit(),
        }
    }
}
