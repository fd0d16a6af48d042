use crate::cli::Args;
use crate::config::prompt;
use crate::llm::{ new_client, CompletionClient, LlmConfig, LlmError, LlmType };
use crate::models::chat::{ ChatMessage, Role };

use log::{ debug, info };
use std::error::Error;
use std::sync::Arc;

/// Stateless conversation forwarder. Holds the immutable configuration (model
/// identifier, system instruction text) and a completion client; each call
/// extends a caller-owned history by exactly one assistant message.
#[derive(Clone)]
pub struct ChatAgent {
    chat_client: Arc<dyn CompletionClient>,
    model: String,
    system_prompt: String,
}

impl ChatAgent {
    pub fn new(args: &Args) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let llm_type: LlmType = args.chat_llm_type.parse()?;
        let api_key = if !args.chat_api_key.is_empty() {
            Some(args.chat_api_key.clone())
        } else {
            None
        };
        let config = LlmConfig {
            api_key,
            base_url: args.chat_base_url.clone(),
        };
        let chat_client = new_client(llm_type, &config)?;
        info!(
            "Chat client configured: Type={}, Model={}, BaseURL={}",
            args.chat_llm_type,
            args.model,
            config.base_url.as_deref().unwrap_or("provider default")
        );

        let system_prompt = prompt::system_prompt(args.system_prompt_path.as_deref())?;

        Ok(Self::with_client(chat_client, args.model.clone(), system_prompt))
    }

    /// Construct from an explicit client, bypassing provider configuration.
    pub fn with_client(
        chat_client: Arc<dyn CompletionClient>,
        model: String,
        system_prompt: String
    ) -> Self {
        Self { chat_client, model, system_prompt }
    }

    /// Forward `history` to the completion provider and return it extended
    /// with the reply.
    ///
    /// An empty history, or one whose first message is not system-role, gets
    /// the configured instruction text inserted at position 0 before the
    /// call; a history already led by a system message is sent verbatim. The
    /// reply content is trimmed of surrounding whitespace and appended as an
    /// assistant message, so the result is always one message longer than
    /// what was sent. Provider failures propagate untouched: no retry, no
    /// backoff, no fallback.
    pub async fn forward(
        &self,
        history: Vec<ChatMessage>
    ) -> Result<Vec<ChatMessage>, LlmError> {
        let mut messages = match history.first() {
            Some(first) if first.role == Role::System => history,
            _ => {
                let mut with_prompt = Vec::with_capacity(history.len() + 2);
                with_prompt.push(ChatMessage::system(self.system_prompt.clone()));
                with_prompt.extend(history);
                with_prompt
            }
        };

        debug!("Forwarding {} messages to model '{}'", messages.len(), self.model);

        let reply = self.chat_client.complete(&self.model, &messages).await?;
        messages.push(ChatMessage::assistant(reply.trim()));

        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::MockChatClient;

    fn agent_with(mock: Arc<MockChatClient>) -> ChatAgent {
        ChatAgent::with_client(mock, "test-model".to_string(), "PROMPT".to_string())
    }

    #[tokio::test]
    async fn empty_history_gets_exactly_the_system_prompt() {
        let mock = Arc::new(MockChatClient::new("hello"));
        let agent = agent_with(mock.clone());

        let result = agent.forward(Vec::new()).await.unwrap();

        let sent = &mock.requests()[0];
        assert_eq!(sent, &vec![ChatMessage::system("PROMPT")]);
        assert_eq!(
            result,
            vec![ChatMessage::system("PROMPT"), ChatMessage::assistant("hello")]
        );
    }

    #[tokio::test]
    async fn user_led_history_gets_one_system_message_prepended() {
        let mock = Arc::new(MockChatClient::new("reply"));
        let agent = agent_with(mock.clone());

        let history = vec![ChatMessage::user("breakfast idea")];
        let result = agent.forward(history).await.unwrap();

        let sent = &mock.requests()[0];
        assert_eq!(
            sent,
            &vec![ChatMessage::system("PROMPT"), ChatMessage::user("breakfast idea")]
        );
        assert_eq!(result.len(), sent.len() + 1);
        assert_eq!(result.last().unwrap().role, Role::Assistant);
    }

    #[tokio::test]
    async fn system_led_history_is_sent_verbatim() {
        let mock = Arc::new(MockChatClient::new("reply"));
        let agent = agent_with(mock.clone());

        let history = vec![
            ChatMessage::system("custom"),
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
            ChatMessage::user("dessert idea")
        ];
        let result = agent.forward(history.clone()).await.unwrap();

        assert_eq!(&mock.requests()[0], &history);
        assert_eq!(result.len(), history.len() + 1);
        assert_eq!(&result[..history.len()], &history[..]);
    }

    #[tokio::test]
    async fn reply_is_trimmed_and_nothing_else() {
        let mock = Arc::new(MockChatClient::new("  \n## Oatmeal Bites\n\nA recipe.\t \n"));
        let agent = agent_with(mock.clone());

        let result = agent.forward(vec![ChatMessage::user("snack")]).await.unwrap();

        let appended = result.last().unwrap();
        assert_eq!(appended.role, Role::Assistant);
        assert_eq!(appended.content, "## Oatmeal Bites\n\nA recipe.");
    }

    #[tokio::test]
    async fn multi_turn_histories_grow_by_one_per_call() {
        let mock = Arc::new(MockChatClient::new("next"));
        let agent = agent_with(mock.clone());

        let first = agent.forward(vec![ChatMessage::user("lunch idea")]).await.unwrap();
        assert_eq!(first.len(), 3);

        let mut second_input = first.clone();
        second_input.push(ChatMessage::user("make it vegetarian"));
        let second = agent.forward(second_input.clone()).await.unwrap();

        // Already system-led, so the second request is the input unchanged.
        assert_eq!(&mock.requests()[1], &second_input);
        assert_eq!(second.len(), second_input.len() + 1);
    }
}
