//! Grounded kiosk CLI
//!
//! Main entry point for the `grounded` command-line tool.
//! Answers school questions strictly from the kiosk database.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand, InitCommand, StatusCommand, TopicsCommand};
use grounded_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Grounded kiosk - answers only from the school database
#[derive(Parser, Debug)]
#[command(name = "grounded")]
#[command(about = "Topic-bounded, database-grounded question answering", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file (default: ./grounded.yaml if present)
    #[arg(short, long, global = true, env = "GROUNDED_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the SQLite knowledge database
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Ollama endpoint URL
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Generation timeout in seconds
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a single question
    Ask(AskCommand),

    /// Interactive question loop
    Chat(ChatCommand),

    /// Show topics with trigger and evidence counts
    Topics(TopicsCommand),

    /// Check the database and the generative service
    Status(StatusCommand),

    /// Create the database tables and optionally seed them
    Init(InitCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Defaults, then config file, then environment
    let config = AppConfig::load(cli.config.as_deref())?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.database,
        cli.endpoint,
        cli.model,
        cli.timeout,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    config.validate()?;

    // Log startup
    tracing::info!("Grounded kiosk starting");
    tracing::debug!("Database: {:?}", config.database);
    tracing::debug!("Endpoint: {}", config.endpoint);
    tracing::debug!("Model: {}", config.model);

    // Emit command span
    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Chat(_) => "chat",
        Commands::Topics(_) => "topics",
        Commands::Status(_) => "status",
        Commands::Init(_) => "init",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Topics(cmd) => cmd.execute(&config),
        Commands::Status(cmd) => cmd.execute(&config).await,
        Commands::Init(cmd) => cmd.execute(&config),
    };

    // Log completion
    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
