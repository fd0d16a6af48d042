pub mod mock;
pub mod openai;

use async_trait::async_trait;
use serde::{ Deserialize, Serialize };
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use self::mock::MockChatClient;
use self::openai::OpenAIChatClient;
use crate::models::chat::ChatMessage;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmType {
    OpenAI,
    Mock,
}

impl FromStr for LlmType {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LlmType::OpenAI),
            "mock" => Ok(LlmType::Mock),
            _ => Err(LlmError::UnsupportedProvider(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Unsupported LLM provider type: '{0}'")]
    UnsupportedProvider(String),

    #[error("API key is required for the {0} provider")]
    MissingApiKey(&'static str),

    #[error("Invalid API key format: {0}")]
    InvalidApiKey(String),

    #[error("Completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned no completion choices")]
    EmptyResponse,
}

/// Narrow capability every completion provider exposes: one model-parameterized
/// call over the full message sequence, one reply back.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage]
    ) -> Result<String, LlmError>;
}

pub fn new_client(
    llm_type: LlmType,
    config: &LlmConfig
) -> Result<Arc<dyn CompletionClient>, LlmError> {
    let client: Arc<dyn CompletionClient> = match llm_type {
        LlmType::OpenAI => {
            let specific_client = OpenAIChatClient::from_config(config)?;
            Arc::new(specific_client)
        }
        LlmType::Mock => Arc::new(MockChatClient::default()),
    };
    Ok(client)
}
