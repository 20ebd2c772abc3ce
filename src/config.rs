//! Environment configuration

use crate::conversation::HistoryMode;
use crate::llm::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::system_prompt::resolve_system_prompt;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("WAYCHAT_HISTORY: {0}")]
    InvalidHistoryMode(String),
    #[error("WAYCHAT_PORT must be a port number, got {0:?}")]
    InvalidPort(String),
}

/// Settings for the widget and its completion client
#[derive(Clone)]
pub struct WidgetConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub history_mode: HistoryMode,
    /// `None` when seeding is disabled
    pub system_prompt: Option<String>,
    pub port: u16,
}

impl std::fmt::Debug for WidgetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("history_mode", &self.history_mode)
            .field("system_prompt", &self.system_prompt.as_ref().map(String::len))
            .field("port", &self.port)
            .finish()
    }
}

impl WidgetConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let history_mode = match lookup("WAYCHAT_HISTORY") {
            Some(mode) => mode.parse().map_err(ConfigError::InvalidHistoryMode)?,
            None => HistoryMode::default(),
        };

        let port = match lookup("WAYCHAT_PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_key,
            endpoint: lookup("WAYCHAT_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model: lookup("WAYCHAT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            history_mode,
            system_prompt: resolve_system_prompt(lookup("WAYCHAT_SYSTEM_PROMPT")),
            port,
        })
    }
}
