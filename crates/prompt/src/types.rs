//! Prompt types for the grounded kiosk.

use serde::{Deserialize, Serialize};

/// Phrase the model must answer with when the context lacks the answer.
pub const NOT_FOUND_PHRASE: &str = "Information not found in the database.";

/// Identifier of the built-in prompt definition.
pub const GROUNDED_PROMPT_ID: &str = "kiosk.grounded.default";

/// A grounded prompt definition.
///
/// The instruction block is assembled from `preamble`, the numbered
/// `rules`, the not-found phrase and an optional `reminder`; `template`
/// then places it together with the evidence and the question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Opening line of the instruction block
    pub preamble: String,

    /// Strict rules, rendered as a numbered list
    pub rules: Vec<String>,

    /// Exact reply for questions the context cannot answer
    #[serde(rename = "notFoundPhrase", default = "default_not_found")]
    pub not_found_phrase: String,

    /// Closing line of the instruction block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<String>,

    /// Handlebars template with `instructions`, `context` and `question`
    pub template: String,
}

fn default_not_found() -> String {
    NOT_FOUND_PHRASE.to_string()
}

impl PromptDefinition {
    /// The built-in grounded generation prompt.
    pub fn grounded() -> Self {
        Self {
            id: GROUNDED_PROMPT_ID.to_string(),
            title: "Grounded generation".to_string(),
            api_version: "1.0".to_string(),
            preamble: "You are operating in GROUNDED GENERATION MODE.".to_string(),
            rules: vec![
                "You may ONLY use information from the provided database context".to_string(),
                "You must NOT invent, assume, or infer missing details".to_string(),
                "Do NOT use external knowledge".to_string(),
                "Stay within the topic of the question".to_string(),
                "If the exact answer is not in the context, reply with the not-found phrase below"
                    .to_string(),
                "Keep responses short, clear, and factual".to_string(),
            ],
            not_found_phrase: NOT_FOUND_PHRASE.to_string(),
            reminder: Some(
                "REMEMBER: You are a DATABASE QUERY SYSTEM, not a general knowledge AI."
                    .to_string(),
            ),
            template: "{{instructions}}\n\n{{context}}\n\nQuestion: {{question}}\n\nAnswer:"
                .to_string(),
        }
    }

    /// Render the instruction block (preamble, numbered rules, not-found phrase).
    pub fn instruction_block(&self) -> String {
        let mut block = String::new();
        block.push_str(&self.preamble);
        block.push_str("\n\nSTRICT RULES:\n");

        for (i, rule) in self.rules.iter().enumerate() {
            block.push_str(&format!("{}. {}\n", i + 1, rule));
        }

        block.push_str(&format!(
            "\nIf information is not in the database, respond with:\n\"{}\"",
            self.not_found_phrase
        ));

        if let Some(reminder) = &self.reminder {
            block.push_str("\n\n");
            block.push_str(reminder);
        }

        block
    }
}

impl Default for PromptDefinition {
    fn default() -> Self {
        Self::grounded()
    }
}

/// A fully rendered prompt ready for the generative service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// Complete prompt text
    pub text: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Source prompt ID
    #[serde(rename = "sourcePromptId")]
    pub source_prompt_id: String,

    /// Length of the embedded evidence block, in bytes
    #[serde(rename = "contextBytes")]
    pub context_bytes: usize,
}
