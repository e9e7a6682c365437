//! OpenAI-compatible chat completions client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::completion::CompletionProvider;
use crate::errors::ChatError;

/// Fixed generation settings
#[derive(Debug, Clone)]
pub struct CompletionOptions {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4.1".to_string(),
            temperature: 0.3,
            max_tokens: 2000,
            timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for `POST {base_url}/chat/completions`
pub struct OpenAiClient {
    client: Client,
    api_key: SecretString,
    options: CompletionOptions,
}

impl OpenAiClient {
    pub fn new(api_key: SecretString, options: CompletionOptions) -> Result<Self, ChatError> {
        let client = Client::builder().timeout(options.timeout).build()?;
        Ok(Self {
            client,
            api_key,
            options: CompletionOptions {
                base_url: options.base_url.trim_end_matches('/').to_string(),
                ..options
            },
        })
    }

    pub fn options(&self) -> &CompletionOptions {
        &self.options
    }

    async fn request(&self, system: &str, user: &str) -> Result<String, ChatError> {
        let url = format!("{}/chat/completions", self.options.base_url);
        debug!("POST {} (model {})", url, self.options.model);

        let body = ChatCompletionRequest {
            model: &self.options.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Completion request failed: {} - {}", status, body);
            return Err(ChatError::GenerationError(format!("{}: {}", status, body)));
        }

        let reply: ChatCompletionResponse = response.json().await?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ChatError::GenerationError("Completion returned no content".to_string()))
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(
        &self,
        system_instructions: &str,
        user_message: &str,
    ) -> Result<String, ChatError> {
        self.request(system_instructions, user_message)
            .await
            .map_err(|e| match e {
                ChatError::GenerationError(_) => e,
                other => ChatError::GenerationError(other.to_string()),
            })
    }
}
