//! Configuration management for the grounded kiosk.
//!
//! Configuration is merged from several sources, later sources winning:
//! - Built-in defaults (local Ollama, `knowledge.db` in the working directory)
//! - A YAML config file (`grounded.yaml` or an explicit path)
//! - Environment variables
//! - Command-line flags

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "grounded.yaml";

/// Default Ollama endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "llama3.2:3b";

/// Default upper bound for one generation request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default interval between knowledge index rebuilds in long sessions.
pub const DEFAULT_REFRESH_SECS: u64 = 300;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Config file that was merged, if any
    pub config_file: Option<PathBuf>,

    /// SQLite database holding FAQs, professors, facilities and events
    pub database: PathBuf,

    /// Base URL of the generative service
    pub endpoint: String,

    /// Model identifier sent with every generation request
    pub model: String,

    /// Request timeout for the generative service, in seconds
    pub timeout_secs: u64,

    /// How long the service should keep the model loaded (e.g. "10m")
    pub keep_alive: Option<String>,

    /// Seconds between index rebuilds in a running session; 0 disables
    pub refresh_secs: u64,

    /// Optional YAML prompt definition replacing the built-in one
    pub prompt_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    database: Option<DatabaseSection>,
    knowledge: Option<KnowledgeSection>,
    llm: Option<LlmSection>,
    prompt: Option<PromptSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DatabaseSection {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct KnowledgeSection {
    #[serde(rename = "refreshSecs")]
    refresh_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmSection {
    endpoint: Option<String>,
    model: Option<String>,
    #[serde(rename = "timeoutSecs")]
    timeout_secs: Option<u64>,
    #[serde(rename = "keepAlive")]
    keep_alive: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PromptSection {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            database: PathBuf::from("knowledge.db"),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(), // Small local model
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            keep_alive: Some("10m".to_string()),
            refresh_secs: DEFAULT_REFRESH_SECS,
            prompt_file: None,
            log_level: None,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// When `config_file` is `None`, `grounded.yaml` in the working directory
    /// is merged if it exists. An explicit path that does not exist is an
    /// error.
    ///
    /// Environment variables:
    /// - `GROUNDED_DATABASE`: SQLite database path
    /// - `OLLAMA_BASE_URL`: Generative service endpoint
    /// - `OLLAMA_MODEL`: Model identifier
    /// - `GROUNDED_TIMEOUT_SECS`: Request timeout
    /// - `GROUNDED_REFRESH_SECS`: Index refresh interval (0 disables)
    /// - `GROUNDED_PROMPT`: Prompt definition override
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use grounded_core::config::AppConfig;
    ///
    /// let config = AppConfig::load(None).expect("Failed to load config");
    /// println!("Database: {:?}", config.database);
    /// ```
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        Self::load_with(config_file, |key| std::env::var(key).ok())
    }

    /// Load configuration using `env` to look up environment variables.
    pub fn load_with<F>(config_file: Option<&Path>, env: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let config_path = match config_file {
            Some(path) if !path.exists() => {
                return Err(AppError::Config(format!(
                    "Config file does not exist: {:?}",
                    path
                )));
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        };

        if let Some(path) = config_path {
            config = config.merge_yaml(&path)?;
            config.config_file = Some(path);
        }

        // Environment variables override YAML config
        if let Some(database) = env("GROUNDED_DATABASE") {
            config.database = PathBuf::from(database);
        }

        if let Some(endpoint) = env("OLLAMA_BASE_URL") {
            config.endpoint = endpoint;
        }

        if let Some(model) = env("OLLAMA_MODEL") {
            config.model = model;
        }

        if let Some(timeout) = env("GROUNDED_TIMEOUT_SECS") {
            config.timeout_secs = timeout.trim().parse().map_err(|_| {
                AppError::Config(format!("Invalid GROUNDED_TIMEOUT_SECS: {}", timeout))
            })?;
        }

        if let Some(refresh) = env("GROUNDED_REFRESH_SECS") {
            config.refresh_secs = refresh.trim().parse().map_err(|_| {
                AppError::Config(format!("Invalid GROUNDED_REFRESH_SECS: {}", refresh))
            })?;
        }

        if let Some(prompt) = env("GROUNDED_PROMPT") {
            config.prompt_file = Some(PathBuf::from(prompt));
        }

        if let Some(level) = env("RUST_LOG") {
            config.log_level = Some(level);
        }

        if env("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(path) = config_file.database.and_then(|db| db.path) {
            result.database = PathBuf::from(path);
        }

        if let Some(refresh) = config_file.knowledge.and_then(|k| k.refresh_secs) {
            result.refresh_secs = refresh;
        }

        if let Some(llm) = config_file.llm {
            if let Some(endpoint) = llm.endpoint {
                result.endpoint = endpoint;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if let Some(timeout) = llm.timeout_secs {
                result.timeout_secs = timeout;
            }
            if llm.keep_alive.is_some() {
                result.keep_alive = llm.keep_alive;
            }
        }

        if let Some(path) = config_file.prompt.and_then(|p| p.path) {
            result.prompt_file = Some(PathBuf::from(path));
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over the file and environment.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        database: Option<PathBuf>,
        endpoint: Option<String>,
        model: Option<String>,
        timeout_secs: Option<u64>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(database) = database {
            self.database = database;
        }

        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(timeout_secs) = timeout_secs {
            self.timeout_secs = timeout_secs;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }

    /// Interval between index rebuilds, `None` when refreshing is disabled.
    pub fn refresh_interval(&self) -> Option<std::time::Duration> {
        (self.refresh_secs > 0).then(|| std::time::Duration::from_secs(self.refresh_secs))
    }

    /// Validate the merged configuration.
    pub fn validate(&self) -> AppResult<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "Endpoint must be an http(s) URL: {}",
                self.endpoint
            )));
        }

        if self.model.trim().is_empty() {
            return Err(AppError::Config("Model name cannot be empty".to_string()));
        }

        if self.timeout_secs == 0 {
            return Err(AppError::Config(
                "Request timeout must be at least one second".to_string(),
            ));
        }

        if self.database.as_os_str().is_empty() {
            return Err(AppError::Config("Database path cannot be empty".to_string()));
        }

        Ok(())
    }
}
