//! Configuration management for VisionChat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, VisionChatError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for VisionChat
///
/// Holds everything a chat session needs: where the Ollama endpoint
/// lives, which model to talk to, and how the session itself behaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Ollama endpoint configuration
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Chat session configuration
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Ollama endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    #[serde(default = "default_ollama_host")]
    pub host: String,

    /// Model to use for chat
    #[serde(default = "default_ollama_model")]
    pub model: String,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llava:13b".to_string()
}

fn default_timeout() -> u64 {
    300
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Chat session configuration
///
/// Settings for the interactive session: the system instruction that
/// opens every transcript and where the transcript is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// System instruction prepended to every transcript
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Path of the persisted transcript
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,
}

fn default_system_prompt() -> String {
    "You are Vision-Buddy, a concise and friendly assistant. \
     When an image is provided, describe it and answer the user's question."
        .to_string()
}

fn default_history_file() -> PathBuf {
    PathBuf::from("history.json")
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            history_file: default_history_file(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama: OllamaConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| VisionChatError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| VisionChatError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(host) = std::env::var("VISIONCHAT_OLLAMA_HOST") {
            self.ollama.host = host;
        }

        if let Ok(model) = std::env::var("VISIONCHAT_OLLAMA_MODEL") {
            self.ollama.model = model;
        }

        if let Ok(timeout) = std::env::var("VISIONCHAT_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.ollama.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid VISIONCHAT_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(prompt) = std::env::var("VISIONCHAT_SYSTEM_PROMPT") {
            self.chat.system_prompt = prompt;
        }

        if let Ok(history) = std::env::var("VISIONCHAT_HISTORY_FILE") {
            self.chat.history_file = PathBuf::from(history);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        let crate::cli::Commands::Chat {
            model,
            host,
            history,
        } = &cli.command;

        if let Some(model) = model {
            self.ollama.model = model.clone();
        }
        if let Some(host) = host {
            self.ollama.host = host.clone();
        }
        if let Some(history) = history {
            self.chat.history_file = history.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a `Config` error describing the first invalid field
    pub fn validate(&self) -> Result<()> {
        if self.ollama.host.is_empty() {
            return Err(VisionChatError::Config("ollama.host cannot be empty".to_string()).into());
        }

        if !self.ollama.host.starts_with("http://") && !self.ollama.host.starts_with("https://") {
            return Err(VisionChatError::Config(format!(
                "ollama.host must start with http:// or https://: {}",
                self.ollama.host
            ))
            .into());
        }

        if self.ollama.model.is_empty() {
            return Err(VisionChatError::Config("ollama.model cannot be empty".to_string()).into());
        }

        if self.ollama.timeout_seconds == 0 {
            return Err(VisionChatError::Config(
                "ollama.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.system_prompt.is_empty() {
            return Err(
                VisionChatError::Config("chat.system_prompt cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}
