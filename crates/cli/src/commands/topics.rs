//! Topics command handler.
//!
//! Lists the six topics with their trigger and evidence counts.

use super::load_index;
use clap::Args;
use grounded_core::{config::AppConfig, AppError, AppResult};

/// Show topics with trigger and evidence counts
#[derive(Args, Debug)]
pub struct TopicsCommand {
    /// Also list each topic's triggers
    #[arg(long)]
    pub triggers: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl TopicsCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing topics command");

        let index = load_index(config)?;

        if self.json {
            let json = serde_json::to_string_pretty(&index.stats())
                .map_err(|e| AppError::Serialization(format!("Failed to serialize stats: {}", e)))?;
            println!("{}", json);
            return Ok(());
        }

        println!("{:<14} {:>8} {:>8}", "TOPIC", "TRIGGERS", "EVIDENCE");
        for topic in index.topics() {
            println!(
                "{:<14} {:>8} {:>8}",
                topic.id().as_str(),
                topic.triggers().len(),
                topic.evidence().len()
            );
            if self.triggers {
                println!("  {}", topic.triggers().join(", "));
            }
        }
        println!("\nTotal evidence: {}", index.evidence_count());

        Ok(())
    }
}
