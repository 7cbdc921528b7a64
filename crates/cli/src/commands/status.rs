//! Status command handler.
//!
//! Reports whether the database loads and whether the model is reachable.

use super::load_index;
use clap::Args;
use grounded_core::{config::AppConfig, AppResult};
use grounded_llm::OllamaClient;

/// Check the database and the generative service
#[derive(Args, Debug)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatusCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing status command");

        let (database_ok, evidence) = match load_index(config) {
            Ok(index) => (true, index.evidence_count()),
            Err(e) => {
                tracing::warn!("Database check failed: {}", e);
                (false, 0)
            }
        };

        let client = OllamaClient::with_timeout(&config.endpoint, config.timeout())?;
        let service_ok = client.health_check().await;
        let model_ok = service_ok && client.is_model_available(&config.model).await;

        if self.json {
            let output = serde_json::json!({
                "database": {
                    "path": config.database,
                    "ok": database_ok,
                    "evidence": evidence,
                },
                "service": {
                    "endpoint": config.endpoint,
                    "ok": service_ok,
                },
                "model": {
                    "name": config.model,
                    "available": model_ok,
                },
            });
            println!("{}", output);
        } else {
            println!(
                "Database: {} ({:?}, {} evidence snippets)",
                status_word(database_ok),
                config.database,
                evidence
            );
            println!("Service:  {} ({})", status_word(service_ok), config.endpoint);
            println!("Model:    {} ({})", status_word(model_ok), config.model);
            if service_ok && !model_ok {
                println!("          run: ollama pull {}", config.model);
            }
        }

        Ok(())
    }
}

fn status_word(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "unavailable"
    }
}
