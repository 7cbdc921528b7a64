//! Init command handler.
//!
//! Creates the kiosk database and optionally loads rows from a seed file.

use clap::Args;
use grounded_core::{config::AppConfig, AppResult};
use grounded_knowledge::{
    create_database, load_seed, seed_database, KnowledgeIndex, SqliteRowSource,
};
use std::path::PathBuf;

/// Create the database tables and optionally seed them
#[derive(Args, Debug)]
pub struct InitCommand {
    /// YAML file with faqs, professors, facilities and events to insert
    #[arg(long)]
    pub seed: Option<PathBuf>,
}

impl InitCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing init command");

        let mut conn = create_database(&config.database)?;
        println!("Database: {}", config.database.display());

        if let Some(seed) = &self.seed {
            let data = load_seed(seed)?;
            let stats = seed_database(&mut conn, &data)?;
            println!(
                "Seeded {} faqs, {} professors, {} facilities, {} events",
                stats.faqs, stats.professors, stats.facilities, stats.events
            );
        }

        let index = KnowledgeIndex::build(&SqliteRowSource::from_connection(conn))?;
        println!("Total evidence: {}", index.evidence_count());

        Ok(())
    }
}
