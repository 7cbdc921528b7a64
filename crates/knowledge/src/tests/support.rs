//! Test doubles: a scripted LLM client and in-memory row sources.

use crate::source::{EventRow, FacilityRow, FaqRow, ProfessorRow, RowSource};
use grounded_core::{AppError, AppResult};
use grounded_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// What the stub does on every call.
pub enum Script {
    Text(String),
    Fail,
    Hang,
}

/// Counts calls and records the last prompt.
pub struct StubClient {
    script: Script,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubClient {
    pub fn text(text: &str) -> Self {
        Self::new(Script::Text(text.to_string()))
    }

    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for StubClient {
    fn provider_name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(request.prompt.clone());

        match &self.script {
            Script::Text(text) => Ok(LlmResponse {
                content: text.clone(),
                model: request.model.clone(),
                usage: LlmUsage::new(10, 5),
                done: true,
            }),
            Script::Fail => Err(AppError::Llm("connection refused".to_string())),
            Script::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Err(AppError::Llm("unreachable".to_string()))
            }
        }
    }
}

/// Rows held in memory. FAQ category filtering mirrors the SQLite source.
#[derive(Default, Clone)]
pub struct MemoryRowSource {
    pub faqs: Vec<FaqRow>,
    pub professors: Vec<ProfessorRow>,
    pub facilities: Vec<FacilityRow>,
    pub events: Vec<EventRow>,
}

impl MemoryRowSource {
    pub fn faq(mut self, category: &str, answer: &str) -> Self {
        self.faqs.push(FaqRow {
            question: None,
            answer: Some(answer.to_string()),
            category: Some(category.to_string()),
        });
        self
    }

    pub fn facility(mut self, name: &str, kind: &str, location: &str) -> Self {
        self.facilities.push(FacilityRow {
            name: Some(name.to_string()),
            kind: Some(kind.to_string()),
            location: Some(location.to_string()),
            ..Default::default()
        });
        self
    }

    pub fn event(mut self, title: &str, description: &str, date: &str) -> Self {
        self.events.push(EventRow {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            event_date: Some(date.to_string()),
            ..Default::default()
        });
        self
    }
}

impl RowSource for MemoryRowSource {
    fn faqs(&self, categories: &[&str]) -> AppResult<Vec<FaqRow>> {
        Ok(self
            .faqs
            .iter()
            .filter(|row| {
                row.category
                    .as_deref()
                    .map(|c| categories.iter().any(|want| want.eq_ignore_ascii_case(c)))
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    fn professors(&self) -> AppResult<Vec<ProfessorRow>> {
        Ok(self.professors.clone())
    }

    fn facilities(&self) -> AppResult<Vec<FacilityRow>> {
        Ok(self.facilities.clone())
    }

    fn events(&self) -> AppResult<Vec<EventRow>> {
        Ok(self.events.clone())
    }
}

/// A store that cannot be reached.
pub struct FailingRowSource;

impl RowSource for FailingRowSource {
    fn faqs(&self, _categories: &[&str]) -> AppResult<Vec<FaqRow>> {
        Err(AppError::IndexUnavailable("connection refused".to_string()))
    }

    fn professors(&self) -> AppResult<Vec<ProfessorRow>> {
        Err(AppError::IndexUnavailable("connection refused".to_string()))
    }

    fn facilities(&self) -> AppResult<Vec<FacilityRow>> {
        Err(AppError::IndexUnavailable("connection refused".to_string()))
    }

    fn events(&self) -> AppResult<Vec<EventRow>> {
        Err(AppError::Knowledge("no such table: events".to_string()))
    }
}
