use async_trait::async_trait;
use log::debug;
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };

use super::{ CompletionClient, LlmConfig, LlmError };
use crate::models::chat::ChatMessage;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Client for the OpenAI chat completions endpoint. Compatible gateways
/// (Groq, DeepSeek, xAI, Ollama's `/v1` surface) are reached by overriding
/// the base URL; they all speak the same `choices[0].message.content` shape.
pub struct OpenAIChatClient {
    http: HttpClient,
    base_url: String,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIChoiceMessage,
}

#[derive(Deserialize)]
struct OpenAIChoiceMessage {
    content: String,
}

impl OpenAIChatClient {
    pub fn new(api_key: String, base_url: Option<String>) -> Result<Self, LlmError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e|
                LlmError::InvalidApiKey(e.to_string())
            )?
        );

        let http = HttpClient::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = config.api_key.clone().ok_or(LlmError::MissingApiKey("openai"))?;
        Self::new(api_key, config.base_url.clone())
    }
}

#[async_trait]
impl CompletionClient for OpenAIChatClient {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage]
    ) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));

        let req = OpenAIChatRequest { model, messages };

        debug!("Sending completion request: model={}, messages={}", model, messages.len());

        let resp = self.http
            .post(&url)
            .json(&req)
            .send().await?
            .error_for_status()?
            .json::<OpenAIResponse>().await?;

        let content = resp.choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?.message.content;

        Ok(content)
    }
}
