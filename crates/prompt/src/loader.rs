//! Prompt loader for YAML prompt definitions.

use crate::types::PromptDefinition;
use grounded_core::{AppError, AppResult};
use std::path::Path;

/// Load a prompt definition from a YAML file.
///
/// # Example
/// ```no_run
/// use grounded_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("prompts/grounded.yml"))?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(path: &Path) -> AppResult<PromptDefinition> {
    tracing::debug!("Loading prompt from: {:?}", path);

    if !path.exists() {
        return Err(AppError::Prompt(format!("Prompt file not found: {:?}", path)));
    }

    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::Prompt(format!("Failed to read prompt file {:?}: {}", path, e))
    })?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!("Failed to parse prompt YAML {:?}: {}", path, e))
    })?;

    validate_prompt(&definition)?;

    tracing::info!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// Load the prompt at `path`, or the built-in grounded prompt when `None`.
pub fn load_or_default(path: Option<&Path>) -> AppResult<PromptDefinition> {
    match path {
        Some(path) => load_prompt(path),
        None => Ok(PromptDefinition::grounded()),
    }
}

/// Validate a prompt definition.
///
/// A definition must keep the evidence and the question in the prompt and
/// must carry at least one rule; otherwise the output is no longer grounded.
pub fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    if def.rules.iter().all(|r| r.trim().is_empty()) {
        return Err(AppError::Prompt(
            "Prompt must define at least one rule".to_string(),
        ));
    }

    if def.not_found_phrase.trim().is_empty() {
        return Err(AppError::Prompt(
            "Prompt notFoundPhrase cannot be empty".to_string(),
        ));
    }

    let compact: String = def.template.chars().filter(|c| !c.is_whitespace()).collect();
    for placeholder in ["{{context}}", "{{question}}"] {
        if !compact.contains(placeholder) {
            return Err(AppError::Prompt(format!(
                "Prompt template must reference {}",
                placeholder
            )));
        }
    }

    Ok(())
}
