//! Prompt renderer: places the instruction block, the evidence and the
//! question into the definition's template.

use crate::types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition};
use grounded_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

const TEMPLATE_NAME: &str = "grounded";

/// A compiled prompt definition.
///
/// The template is parsed once at construction, so a broken definition is
/// rejected at startup instead of on the first question.
pub struct PromptRenderer {
    definition: PromptDefinition,
    instructions: String,
    registry: Handlebars<'static>,
}

impl PromptRenderer {
    /// Compile `definition` into a renderer.
    pub fn new(definition: PromptDefinition) -> AppResult<Self> {
        let mut registry = Handlebars::new();

        // Plain text prompt: no HTML escaping
        registry.register_escape_fn(handlebars::no_escape);

        registry
            .register_template_string(TEMPLATE_NAME, &definition.template)
            .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

        let instructions = definition.instruction_block();
        tracing::debug!("Compiled prompt template: {}", definition.id);

        Ok(Self {
            definition,
            instructions,
            registry,
        })
    }

    /// Render the full prompt for one question.
    ///
    /// # Example
    /// ```
    /// use grounded_prompt::{PromptDefinition, PromptRenderer};
    ///
    /// let renderer = PromptRenderer::new(PromptDefinition::grounded()).unwrap();
    /// let built = renderer.render("Topics found: events", "When is the fair?").unwrap();
    /// assert!(built.text.ends_with("Question: When is the fair?\n\nAnswer:"));
    /// ```
    pub fn render(&self, context: &str, question: &str) -> AppResult<BuiltPrompt> {
        let mut variables = HashMap::new();
        variables.insert("instructions", self.instructions.as_str());
        variables.insert("context", context);
        variables.insert("question", question);

        let text = self
            .registry
            .render(TEMPLATE_NAME, &variables)
            .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

        Ok(BuiltPrompt {
            text,
            metadata: BuiltPromptMetadata {
                source_prompt_id: self.definition.id.clone(),
                context_bytes: context.len(),
            },
        })
    }
}
