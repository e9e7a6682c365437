//! Application state management

use std::sync::Arc;

use secrecy::SecretString;
use tracing::info;

use crate::app::options::AppOptions;
use crate::catalog::NodeCatalog;
use crate::completion::{CompletionProvider, OpenAiClient};
use crate::errors::ChatError;
use crate::services::chat::ChatService;

/// Main application state
pub struct AppState {
    /// Node catalog, read-only after startup
    pub catalog: Arc<NodeCatalog>,

    /// Chat service shared with the HTTP handlers
    pub chat: Arc<ChatService>,
}

impl AppState {
    /// Initialize application state
    pub async fn init(options: &AppOptions, api_key: SecretString) -> Result<Self, ChatError> {
        info!("Initializing application state...");

        let completion = OpenAiClient::new(api_key, options.completion.clone())?;
        info!(
            "Completion provider: {} (model {})",
            completion.options().base_url,
            completion.options().model
        );

        Self::with_provider(options, Arc::new(completion)).await
    }

    /// Initialize with an explicit completion provider
    pub async fn with_provider(
        options: &AppOptions,
        completion: Arc<dyn CompletionProvider>,
    ) -> Result<Self, ChatError> {
        let catalog = Arc::new(NodeCatalog::load(&options.plugin_dir).await);
        info!("Node catalog ready with {} nodes", catalog.len());

        let chat = Arc::new(ChatService::new(
            catalog.clone(),
            completion,
            options.history_capacity,
        ));

        Ok(Self { catalog, chat })
    }

    /// Shutdown application state
    pub async fn shutdown(&self) -> Result<(), ChatError> {
        info!(
            "Shutting down application state ({} chat entries discarded)",
            self.chat.status().chat_entries
        );
        Ok(())
    }
}
