//! Grounded responder.
//!
//! Answers a question in at most one generation call: refuse when no topic
//! matches, otherwise build a context block from the matched evidence and
//! let the model answer from it. Service failures never escape as errors.

use crate::grounded::types::{
    AnswerOutcome, GroundedAnswer, CONTEXT_HEADER, SERVICE_UNAVAILABLE_MESSAGE,
};
use crate::index::{KnowledgeIndex, RetrievalResult};
use crate::source::RowSource;
use grounded_core::{AppConfig, AppError, AppResult};
use grounded_llm::{GenerationOptions, LlmClient, LlmRequest};
use grounded_prompt::PromptRenderer;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// Generation settings applied to every call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponderSettings {
    pub model: String,
    pub timeout: Duration,
    pub keep_alive: Option<String>,
    pub options: GenerationOptions,
}

impl Default for ResponderSettings {
    fn default() -> Self {
        Self {
            model: grounded_core::config::DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(grounded_core::config::DEFAULT_TIMEOUT_SECS),
            keep_alive: None,
            options: GenerationOptions::deterministic(),
        }
    }
}

impl ResponderSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            model: config.model.clone(),
            timeout: config.timeout(),
            keep_alive: config.keep_alive.clone(),
            options: GenerationOptions::deterministic(),
        }
    }
}

/// Answers kiosk questions from the current knowledge index.
pub struct GroundedResponder {
    index: RwLock<Arc<KnowledgeIndex>>,
    client: Arc<dyn LlmClient>,
    renderer: PromptRenderer,
    settings: ResponderSettings,
}

impl GroundedResponder {
    pub fn new(
        index: KnowledgeIndex,
        client: Arc<dyn LlmClient>,
        renderer: PromptRenderer,
        settings: ResponderSettings,
    ) -> AppResult<Self> {
        if settings.timeout.is_zero() {
            return Err(AppError::Config("Timeout must be greater than zero".to_string()));
        }
        if settings.model.trim().is_empty() {
            return Err(AppError::Config("Model name must not be empty".to_string()));
        }

        tracing::debug!(
            "Responder ready (provider: {}, model: {}, timeout: {:?})",
            client.provider_name(),
            settings.model,
            settings.timeout
        );

        Ok(Self {
            index: RwLock::new(Arc::new(index)),
            client,
            renderer,
            settings,
        })
    }

    /// The index currently in service.
    pub fn index(&self) -> Arc<KnowledgeIndex> {
        self.index
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Put `index` in service. In-flight questions keep their snapshot.
    pub fn replace_index(&self, index: KnowledgeIndex) {
        *self.index.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(index);
    }

    /// Build a fresh index from `source` and swap it in.
    ///
    /// On failure the previous index stays in service.
    pub fn rebuild(&self, source: &dyn RowSource) -> AppResult<()> {
        match KnowledgeIndex::build(source) {
            Ok(index) => {
                self.replace_index(index);
                tracing::info!("Knowledge index rebuilt");
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Index rebuild failed, keeping previous index: {}", e);
                Err(e)
            }
        }
    }

    /// Answer `question` with plain text.
    pub async fn ask(&self, question: &str) -> String {
        self.ask_detailed(question).await.answer
    }

    /// Answer `question` and report how the answer was produced.
    pub async fn ask_detailed(&self, question: &str) -> GroundedAnswer {
        let index = self.index();
        let retrieval = index.retrieve(question);

        if retrieval.is_empty() {
            tracing::info!("Question matched no topic, refusing");
            return GroundedAnswer::refused();
        }

        let topics = retrieval.matched_topics.clone();
        let evidence_count = retrieval.evidence.len();

        let (answer, outcome) = match self.generate(question, &retrieval).await {
            Ok(text) => (text, AnswerOutcome::Answered),
            Err(e) => {
                tracing::warn!("Generation failed: {}", e);
                (
                    SERVICE_UNAVAILABLE_MESSAGE.to_string(),
                    AnswerOutcome::ServiceFailed,
                )
            }
        };

        GroundedAnswer {
            answer,
            outcome,
            topics,
            evidence_count,
        }
    }

    async fn generate(&self, question: &str, retrieval: &RetrievalResult) -> AppResult<String> {
        let context = build_context(retrieval);
        let prompt = self.renderer.render(&context, question)?;

        tracing::debug!(
            "Calling {} with {} context bytes (prompt: {})",
            self.settings.model,
            prompt.metadata.context_bytes,
            prompt.metadata.source_prompt_id
        );

        let mut request =
            LlmRequest::new(prompt.text, &self.settings.model).with_options(self.settings.options);
        if let Some(keep_alive) = &self.settings.keep_alive {
            request = request.with_keep_alive(keep_alive.as_str());
        }

        let response = tokio::time::timeout(self.settings.timeout, self.client.complete(&request))
            .await
            .map_err(|_| {
                AppError::Llm(format!(
                    "Request timed out after {}s",
                    self.settings.timeout.as_secs_f64()
                ))
            })??;

        Ok(response.content.trim().to_string())
    }
}

/// Format matched evidence as the context block placed in the prompt.
///
/// ```text
/// === RELEVANT INFORMATION FROM DATABASE ===
/// Topics found: events, general
///
/// [1] first snippet
///
/// [2] second snippet
/// ```
pub fn build_context(retrieval: &RetrievalResult) -> String {
    let topics = retrieval
        .matched_topics
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut context = format!("{}\nTopics found: {}", CONTEXT_HEADER, topics);
    for (i, snippet) in retrieval.evidence.iter().enumerate() {
        context.push_str(&format!("\n\n[{}] {}", i + 1, snippet));
    }
    context
}
