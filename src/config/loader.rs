use super::types::*;
use crate::stickers::sanitize_prefix;
use crate::utils::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const TOKEN_ENV: &str = "BOT_TOKEN";
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub app: AppConfig,
    pub tools: ToolsConfig,
    pub encoding: EncodingConfig,
    pub stickers: StickerConfig,
    pub telegram: TelegramConfig,
    pub health: HealthConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_str = std::fs::read_to_string(config_path)?;
        Self::from_yaml(&config_str)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file when present, otherwise the built-in defaults, then
    /// applies the process environment on top.
    pub fn load_with_fallback<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();
        let mut config = if config_path.exists() {
            Self::load(config_path)?
        } else {
            debug!(
                "Config file {} not found, using defaults",
                config_path.display()
            );
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            self.telegram.token = Some(token.trim().to_string());
        }

        if let Some(port) = lookup(PORT_ENV) {
            self.health.port = port.trim().parse().map_err(|_| {
                Error::validation(format!("{} must be a port number, got '{}'", PORT_ENV, port))
            })?;
        }

        Ok(())
    }

    pub fn require_token(&self) -> Result<&str> {
        self.telegram
            .token
            .as_deref()
            .ok_or_else(|| Error::validation(format!("{} is missing", TOKEN_ENV)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.app.max_concurrent_jobs == 0 {
            return Err(Error::validation(
                "max_concurrent_jobs must be greater than 0",
            ));
        }

        if self.app.encode_timeout_seconds == 0 {
            return Err(Error::validation(
                "encode_timeout_seconds must be greater than 0",
            ));
        }

        let encoding = &self.encoding;
        if encoding.target_long_side == 0 || encoding.framerate == 0 {
            return Err(Error::validation(
                "target_long_side and framerate must be greater than 0",
            ));
        }

        if encoding.max_duration_seconds <= 0.0 || encoding.fallback_duration_seconds <= 0.0 {
            return Err(Error::validation(
                "max_duration_seconds and fallback_duration_seconds must be positive",
            ));
        }

        if encoding.target_bytes == 0 || encoding.target_bytes > encoding.hard_cap_bytes {
            return Err(Error::validation(format!(
                "target_bytes ({}) must be between 1 and hard_cap_bytes ({})",
                encoding.target_bytes, encoding.hard_cap_bytes
            )));
        }

        if self.telegram.request_timeout_seconds <= self.telegram.poll_timeout_seconds {
            return Err(Error::validation(
                "telegram.request_timeout_seconds must exceed poll_timeout_seconds",
            ));
        }

        let prefix = sanitize_prefix(&self.stickers.set_prefix);
        if !prefix.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(Error::validation(format!(
                "stickers.set_prefix '{}' must start with a letter once reduced to [A-Za-z0-9_]",
                self.stickers.set_prefix
            )));
        }

        if self.stickers.default_emoji.trim().is_empty() {
            return Err(Error::validation("stickers.default_emoji must not be empty"));
        }

        Ok(())
    }
}
