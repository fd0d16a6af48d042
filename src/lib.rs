pub mod agent;
pub mod models;
pub mod config;
pub mod llm;
pub mod cli;

use agent::ChatAgent;
use cli::Args;
use log::info;
use models::chat::ChatMessage;
use std::error::Error;
use tokio::io::{ self, AsyncBufReadExt, AsyncWriteExt, BufReader };

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Chat LLM Type: {}", args.chat_llm_type);
    info!("Model Name: {}", args.model);
    info!("Chat Base URL: {}", args.chat_base_url.as_deref().unwrap_or("provider default"));
    info!("System Prompt: {}", args.system_prompt_path.as_deref().unwrap_or("built-in"));
    info!("-------------------------");

    let agent = ChatAgent::new(&args)?;

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();
    let mut history: Vec<ChatMessage> = Vec::new();

    stdout.write_all(b"> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input == "exit" || input == "quit" {
            break;
        }
        if !input.is_empty() {
            history.push(ChatMessage::user(input));
            history = agent.forward(history).await?;

            if let Some(reply) = history.last() {
                stdout.write_all(format!("\n{}\n\n", reply.content).as_bytes()).await?;
            }
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    Ok(())
}
