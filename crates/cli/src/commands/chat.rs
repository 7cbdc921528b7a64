//! Chat command handler.
//!
//! Reads questions line by line until EOF or a quit word.

use super::build_responder;
use clap::Args;
use grounded_core::{config::AppConfig, AppResult};
use grounded_knowledge::{IndexRefresher, SqliteRowSource};
use std::io::Write;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};

const QUIT_WORDS: [&str; 3] = ["quit", "exit", "bye"];

/// Interactive question loop
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Do not print the prompt marker
    #[arg(long)]
    pub quiet: bool,
}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");

        let responder = build_responder(config)?;
        let mut refresher = IndexRefresher::new(config.refresh_interval(), Instant::now());

        if !self.quiet {
            println!("Ask about enrollment, faculty, facilities, events or scholarships. Type 'quit' to leave.");
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            if !self.quiet {
                print!("> ");
                std::io::stdout().flush()?;
            }

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let question = line.trim();
            if question.is_empty() {
                continue;
            }
            if is_quit(question) {
                break;
            }

            if refresher.refresh_if_due(&responder, Instant::now(), || {
                SqliteRowSource::open(&config.database)
            }) {
                tracing::info!("Knowledge index refreshed from {:?}", config.database);
            }

            let answer = responder.ask(question).await;
            println!("{}\n", answer);
        }

        tracing::info!("Chat session ended");
        Ok(())
    }
}

fn is_quit(input: &str) -> bool {
    QUIT_WORDS
        .iter()
        .any(|word| input.eq_ignore_ascii_case(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_words() {
        assert!(is_quit("quit"));
        assert!(is_quit("EXIT"));
        assert!(is_quit("Bye"));
        assert!(!is_quit("bye bye"));
        assert!(!is_quit("when is the exit exam?"));
    }
}
