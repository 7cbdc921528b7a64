//! Ask command handler.
//!
//! Answers one question and prints the answer to stdout.

use super::build_responder;
use clap::Args;
use grounded_core::{config::AppConfig, AppError, AppResult};

/// Ask a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,

    /// Output as JSON (answer, outcome, matched topics)
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let question = self.question.join(" ");
        tracing::debug!("Question: {}", question);

        let responder = build_responder(config)?;
        let answer = responder.ask_detailed(&question).await;

        tracing::debug!(
            "Outcome: {:?}, topics: {:?}",
            answer.outcome,
            answer.topics
        );

        if self.json {
            let json = serde_json::to_string_pretty(&answer)
                .map_err(|e| AppError::Serialization(format!("Failed to serialize answer: {}", e)))?;
            println!("{}", json);
        } else {
            println!("{}", answer.answer);
        }

        Ok(())
    }
}
