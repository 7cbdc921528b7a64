//! Command handlers for the grounded kiosk CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod chat;
pub mod init;
pub mod status;
pub mod topics;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use init::InitCommand;
pub use status::StatusCommand;
pub use topics::TopicsCommand;

use grounded_core::{config::AppConfig, AppResult};
use grounded_knowledge::{GroundedResponder, KnowledgeIndex, ResponderSettings, SqliteRowSource};
use grounded_llm::create_client;
use grounded_prompt::{load_or_default, PromptRenderer};

/// Build the knowledge index from the configured database.
///
/// Fails with `IndexUnavailable` when the database cannot be read.
pub fn load_index(config: &AppConfig) -> AppResult<KnowledgeIndex> {
    let source = SqliteRowSource::open(&config.database)?;
    KnowledgeIndex::build(&source)
}

/// Wire index, prompt and generative client into a responder.
pub fn build_responder(config: &AppConfig) -> AppResult<GroundedResponder> {
    let index = load_index(config)?;

    let definition = load_or_default(config.prompt_file.as_deref())?;
    tracing::debug!("Using prompt definition: {}", definition.id);
    let renderer = PromptRenderer::new(definition)?;

    let client = create_client(&config.endpoint, config.timeout())?;

    GroundedResponder::new(
        index,
        client,
        renderer,
        ResponderSettings::from_config(config),
    )
}
