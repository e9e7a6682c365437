//! Text-completion providers

pub mod openai;

use async_trait::async_trait;

use crate::errors::ChatError;

pub use openai::{CompletionOptions, OpenAiClient};

/// One-shot text completion
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Complete `user_message` under `system_instructions`, returning the raw
    /// reply text
    async fn complete(
        &self,
        system_instructions: &str,
        user_message: &str,
    ) -> Result<String, ChatError>;
}
