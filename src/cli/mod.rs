use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Chat LLM Provider Args ---
    /// Type of LLM provider for chat completion (openai, mock)
    #[arg(long, env = "CHAT_LLM_TYPE", default_value = "openai")]
    pub chat_llm_type: String,

    /// Base URL for the Chat LLM provider API (e.g., https://api.openai.com or an OpenAI-compatible gateway)
    #[arg(long, env = "CHAT_BASE_URL")] // No default, let the client fall back to the public endpoint
    pub chat_base_url: Option<String>,

    /// API Key for the Chat LLM provider
    #[arg(long, env = "CHAT_API_KEY", default_value = "")]
    pub chat_api_key: String,

    /// Model identifier sent with every completion request (e.g., gpt-4o-mini, gpt-4o)
    #[arg(long, env = "MODEL_NAME", default_value = "gpt-4o-mini")]
    pub model: String,

    // --- General App Args ---
    /// Path to a file replacing the built-in system prompt.
    #[arg(long, env = "SYSTEM_PROMPT_PATH")]
    pub system_prompt_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_defaults_to_gpt_4o_mini() {
        let args = Args::parse_from(["recipe-agent"]);
        assert_eq!(args.model, "gpt-4o-mini");
        assert_eq!(args.chat_llm_type, "openai");
        assert!(args.chat_base_url.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "recipe-agent",
            "--model",
            "gpt-4o",
            "--chat-llm-type",
            "mock",
        ]);
        assert_eq!(args.model, "gpt-4o");
        assert_eq!(args.chat_llm_type, "mock");
    }
}
