//! Settings file management

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::completion::CompletionOptions;
use crate::errors::ChatError;
use crate::logs::{LogLevel, LogOptions};

/// Environment variable holding the completion API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding `completion.base_url`
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// Service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default)]
    pub log: LogSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub completion: CompletionSettings,

    /// Directory of plugin manifests
    #[serde(default = "default_plugin_dir")]
    pub plugin_dir: PathBuf,

    /// Maximum chat entries kept in memory
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_true() -> bool {
    true
}

fn default_plugin_dir() -> PathBuf {
    PathBuf::from("./custom_nodes")
}

fn default_history_capacity() -> usize {
    500
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log: LogSettings::default(),
            server: ServerSettings::default(),
            completion: CompletionSettings::default(),
            plugin_dir: default_plugin_dir(),
            history_capacity: default_history_capacity(),
        }
    }
}

impl Settings {
    /// Read settings from `path`, falling back to defaults when the file does
    /// not exist
    pub async fn load(path: &Path) -> Result<Self, ChatError> {
        let settings = match tokio::fs::read_to_string(path).await {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                ChatError::ConfigError(format!("{}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No settings file at {}, using defaults", path.display());
                Settings::default()
            }
            Err(e) => return Err(e.into()),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Apply environment overrides
    pub fn with_env(mut self) -> Result<Self, ChatError> {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                self.completion.base_url = base_url;
            }
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ChatError> {
        url::Url::parse(&self.completion.base_url).map_err(|e| {
            ChatError::ConfigError(format!(
                "invalid completion base_url '{}': {}",
                self.completion.base_url, e
            ))
        })?;
        if self.completion.max_tokens == 0 {
            return Err(ChatError::ConfigError(
                "completion max_tokens must be positive".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.completion.temperature) {
            return Err(ChatError::ConfigError(format!(
                "completion temperature {} out of range",
                self.completion.temperature
            )));
        }
        Ok(())
    }

    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            log_level: self.log_level,
            stdout: self.log.stdout,
            json_format: self.log.json_format,
            log_dir: self.log.log_dir.clone(),
        }
    }

    pub fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            base_url: self.completion.base_url.clone(),
            model: self.completion.model.clone(),
            temperature: self.completion.temperature,
            max_tokens: self.completion.max_tokens,
            timeout: Duration::from_secs(self.completion.timeout_secs),
        }
    }
}

/// Read the completion API key from the environment
pub fn api_key_from_env() -> Result<SecretString, ChatError> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(SecretString::from(key)),
        _ => Err(ChatError::ConfigError(format!("{} is not set", API_KEY_ENV))),
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_true")]
    pub stdout: bool,

    #[serde(default)]
    pub json_format: bool,

    /// Write daily-rolling log files here
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            stdout: true,
            json_format: false,
            log_dir: None,
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    12000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Completion provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    CompletionOptions::default().base_url
}

fn default_model() -> String {
    CompletionOptions::default().model
}

fn default_temperature() -> f32 {
    CompletionOptions::default().temperature
}

fn default_max_tokens() -> u32 {
    CompletionOptions::default().max_tokens
}

fn default_timeout_secs() -> u64 {
    CompletionOptions::default().timeout.as_secs()
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
