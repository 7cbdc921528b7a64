//! Prompt system for the grounded kiosk.
//!
//! This crate provides:
//! - The built-in grounded generation prompt (strict, numbered rules)
//! - YAML-based prompt overrides with validation
//! - Handlebars rendering of instructions, evidence and question

pub mod builder;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::PromptRenderer;
pub use loader::{load_or_default, load_prompt, validate_prompt};
pub use types::{
    BuiltPrompt, BuiltPromptMetadata, PromptDefinition, GROUNDED_PROMPT_ID, NOT_FOUND_PHRASE,
};
