//! Topic-keyed knowledge index.
//!
//! The index is built once from a [`RowSource`] and never mutated. A rebuild
//! produces a whole new index.

use crate::render::{render_event, render_facility, render_faq, render_professor};
use crate::source::RowSource;
use crate::topic::{normalize_question, Topic, TopicId};
use grounded_core::{AppError, AppResult};
use serde::Serialize;

/// The six topics with their evidence, in declaration order.
#[derive(Debug, Clone)]
pub struct KnowledgeIndex {
    topics: Vec<Topic>,
}

/// Topics and evidence selected for one question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RetrievalResult {
    /// Matched topics, in declaration order
    pub matched_topics: Vec<TopicId>,

    /// Evidence of the matched topics, topic order then row order
    pub evidence: Vec<String>,
}

impl RetrievalResult {
    /// True when no topic matched. A matched topic without evidence is not empty.
    pub fn is_empty(&self) -> bool {
        self.matched_topics.is_empty()
    }
}

/// Per-topic counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicStats {
    pub topic: TopicId,
    pub triggers: usize,
    pub evidence: usize,
}

impl KnowledgeIndex {
    /// Load every topic's rows from `source` and render them into evidence.
    ///
    /// Any source failure aborts the build with `IndexUnavailable`.
    pub fn build(source: &dyn RowSource) -> AppResult<Self> {
        tracing::info!("Building knowledge index");

        let mut topics = Vec::with_capacity(TopicId::ALL.len());
        for id in TopicId::ALL {
            let evidence = load_evidence(source, id).map_err(|e| match e {
                AppError::IndexUnavailable(_) => e,
                other => AppError::IndexUnavailable(format!("Failed to load {}: {}", id, other)),
            })?;

            tracing::debug!("Topic '{}': {} evidence snippets", id, evidence.len());
            topics.push(Topic::with_default_triggers(id, evidence)?);
        }

        let index = Self { topics };
        tracing::info!(
            "Knowledge index ready: {} topics, {} evidence snippets",
            index.topics.len(),
            index.evidence_count()
        );
        Ok(index)
    }

    /// Assemble an index from already-built topics.
    ///
    /// Every topic must appear exactly once.
    pub fn from_topics(mut topics: Vec<Topic>) -> AppResult<Self> {
        topics.sort_by_key(Topic::id);

        let ids: Vec<TopicId> = topics.iter().map(Topic::id).collect();
        if ids != TopicId::ALL {
            return Err(AppError::Knowledge(format!(
                "Index needs each of the six topics exactly once, got {:?}",
                ids
            )));
        }

        Ok(Self { topics })
    }

    /// Select the topics whose triggers occur in `question`.
    pub fn retrieve(&self, question: &str) -> RetrievalResult {
        let normalized = normalize_question(question);
        let mut result = RetrievalResult::default();

        for topic in &self.topics {
            if topic.matches(&normalized) {
                result.matched_topics.push(topic.id());
                result.evidence.extend(topic.evidence().iter().cloned());
            }
        }

        tracing::debug!(
            "Retrieved topics {:?} with {} snippets",
            result.matched_topics,
            result.evidence.len()
        );
        result
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn topic(&self, id: TopicId) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id() == id)
    }

    /// Total number of evidence snippets across all topics.
    pub fn evidence_count(&self) -> usize {
        self.topics.iter().map(|t| t.evidence().len()).sum()
    }

    pub fn stats(&self) -> Vec<TopicStats> {
        self.topics
            .iter()
            .map(|t| TopicStats {
                topic: t.id(),
                triggers: t.triggers().len(),
                evidence: t.evidence().len(),
            })
            .collect()
    }
}

fn load_evidence(source: &dyn RowSource, id: TopicId) -> AppResult<Vec<String>> {
    if let Some(categories) = id.faq_categories() {
        return Ok(source.faqs(categories)?.iter().map(render_faq).collect());
    }

    Ok(match id {
        TopicId::Faculty => source.professors()?.iter().map(render_professor).collect(),
        TopicId::Facilities => source.facilities()?.iter().map(render_facility).collect(),
        TopicId::Events => source.events()?.iter().map(render_event).collect(),
        TopicId::Enrollment | TopicId::Scholarships | TopicId::General => Vec::new(),
    })
}
