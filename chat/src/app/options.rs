//! Application configuration options

use std::path::PathBuf;
use std::time::Duration;

use crate::completion::CompletionOptions;
use crate::storage::settings::Settings;

/// Main application options
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Server configuration
    pub server: ServerOptions,

    /// Completion provider configuration
    pub completion: CompletionOptions,

    /// Directory scanned for plugin manifests
    pub plugin_dir: PathBuf,

    /// Maximum chat entries kept in memory
    pub history_capacity: usize,

    /// Maximum delay for graceful shutdown
    pub max_shutdown_delay: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            server: ServerOptions::default(),
            completion: CompletionOptions::default(),
            plugin_dir: PathBuf::from("./custom_nodes"),
            history_capacity: 500,
            max_shutdown_delay: Duration::from_secs(30),
        }
    }
}

impl AppOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            server: ServerOptions {
                host: settings.server.host.clone(),
                port: settings.server.port,
            },
            completion: settings.completion_options(),
            plugin_dir: settings.plugin_dir.clone(),
            history_capacity: settings.history_capacity,
            ..Self::default()
        }
    }
}

/// Local HTTP server options
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 12000,
        }
    }
}
