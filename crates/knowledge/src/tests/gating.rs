//! End-to-end answering against a scripted client.

use super::support::{FailingRowSource, MemoryRowSource, Script, StubClient};
use crate::grounded::{
    AnswerOutcome, GroundedResponder, ResponderSettings, CONTEXT_HEADER, REFUSAL_MESSAGE,
    SERVICE_UNAVAILABLE_MESSAGE,
};
use crate::index::KnowledgeIndex;
use crate::source::{EventRow, FacilityRow, FaqRow, ProfessorRow, RowSource};
use crate::topic::TopicId;
use grounded_core::{AppError, AppResult};
use grounded_prompt::{PromptDefinition, PromptRenderer};
use std::sync::Arc;
use std::time::Duration;

fn school() -> MemoryRowSource {
    MemoryRowSource::default()
        .faq("admissions", "Apply online before June 1.")
        .faq("general", "Westmead offers BS IT and BS Nursing.")
        .facility("Main Library", "library", "Building A")
        .event("Career Workshop", "Resume clinic", "2026-05-05")
}

fn responder_with(
    source: &dyn RowSource,
    client: Arc<StubClient>,
    settings: ResponderSettings,
) -> GroundedResponder {
    let index = KnowledgeIndex::build(source).unwrap();
    let renderer = PromptRenderer::new(PromptDefinition::grounded()).unwrap();
    GroundedResponder::new(index, client, renderer, settings).unwrap()
}

fn responder(source: &dyn RowSource, client: Arc<StubClient>) -> GroundedResponder {
    responder_with(source, client, ResponderSettings::default())
}

#[tokio::test]
async fn test_unrelated_question_is_refused_without_a_call() {
    let client = Arc::new(StubClient::text("Paris."));
    let responder = responder(&school(), client.clone());

    let answer = responder.ask_detailed("What's the capital of France?").await;

    assert_eq!(answer.answer, REFUSAL_MESSAGE);
    assert_eq!(answer.outcome, AnswerOutcome::Refused);
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_empty_question_is_refused() {
    let client = Arc::new(StubClient::text("unused"));
    let responder = responder(&school(), client.clone());

    assert_eq!(responder.ask("").await, REFUSAL_MESSAGE);
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_event_question_is_answered_from_evidence() {
    let client = Arc::new(StubClient::text("There is a workshop on May 5."));
    let responder = responder(&school(), client.clone());

    let answer = responder.ask_detailed("When is the next event?").await;

    assert_eq!(answer.answer, "There is a workshop on May 5.");
    assert_eq!(answer.outcome, AnswerOutcome::Answered);
    assert_eq!(answer.topics, vec![TopicId::Events]);
    assert_eq!(answer.evidence_count, 1);
    assert_eq!(client.calls(), 1);

    let prompt = client.last_prompt().unwrap();
    assert!(prompt.contains(CONTEXT_HEADER));
    assert!(prompt.contains("Topics found: events\n\n[1] Career Workshop: Resume clinic. Date: 2026-05-05."));
    assert!(prompt.contains("Information not found in the database."));
    assert!(prompt.ends_with("Question: When is the next event?\n\nAnswer:"));
    assert!(!prompt.contains("Main Library"));
}

#[tokio::test]
async fn test_multi_topic_question_uses_declaration_order() {
    let client = Arc::new(StubClient::text("Building A."));
    let responder = responder(&school(), client.clone());

    let answer = responder
        .ask_detailed("Where is the library and when is the event?")
        .await;

    assert_eq!(
        answer.topics,
        vec![TopicId::Facilities, TopicId::Events, TopicId::General]
    );

    let prompt = client.last_prompt().unwrap();
    assert!(prompt.contains("Topics found: facilities, events, general"));
    let library = prompt.find("[1] Main Library").unwrap();
    let workshop = prompt.find("[2] Career Workshop").unwrap();
    let general = prompt.find("[3] Westmead offers").unwrap();
    assert!(library < workshop && workshop < general);
}

#[tokio::test]
async fn test_matched_topic_without_evidence_still_calls_the_model() {
    let client = Arc::new(StubClient::text("Information not found in the database."));
    let responder = responder(&school(), client.clone());

    let answer = responder.ask_detailed("How much is tuition?").await;

    assert_eq!(answer.topics, vec![TopicId::Scholarships]);
    assert_eq!(answer.evidence_count, 0);
    assert_eq!(answer.answer, "Information not found in the database.");
    assert_eq!(client.calls(), 1);

    let prompt = client.last_prompt().unwrap();
    assert!(prompt.contains(CONTEXT_HEADER));
    assert!(prompt.contains("Topics found: scholarships"));
    assert!(!prompt.contains("[1]"));
}

#[tokio::test]
async fn test_service_failure_becomes_fixed_message() {
    let client = Arc::new(StubClient::new(Script::Fail));
    let responder = responder(&school(), client.clone());

    let answer = responder.ask_detailed("How do I enroll?").await;

    assert_eq!(answer.answer, SERVICE_UNAVAILABLE_MESSAGE);
    assert_eq!(answer.outcome, AnswerOutcome::ServiceFailed);
    assert_eq!(client.calls(), 1, "failures are not retried");
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let client = Arc::new(StubClient::new(Script::Hang));
    let settings = ResponderSettings {
        timeout: Duration::from_millis(50),
        ..ResponderSettings::default()
    };
    let responder = responder_with(&school(), client.clone(), settings);

    let answer = tokio::time::timeout(
        Duration::from_secs(5),
        responder.ask_detailed("When is the next event?"),
    )
    .await
    .expect("responder must enforce its own timeout");

    assert_eq!(answer.answer, SERVICE_UNAVAILABLE_MESSAGE);
    assert_eq!(answer.outcome, AnswerOutcome::ServiceFailed);
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn test_answer_is_trimmed_only() {
    let client = Arc::new(StubClient::text("\n  The library opens at 8 AM.  \n"));
    let responder = responder(&school(), client);

    assert_eq!(
        responder.ask("When does the library open?").await,
        "The library opens at 8 AM."
    );
}

#[tokio::test]
async fn test_same_question_gives_same_prompt_and_answer() {
    let client = Arc::new(StubClient::text("Apply online before June 1."));
    let responder = responder(&school(), client.clone());

    let first = responder.ask("How do I apply?").await;
    let first_prompt = client.last_prompt().unwrap();
    let second = responder.ask("How do I apply?").await;
    let second_prompt = client.last_prompt().unwrap();

    assert_eq!(first, second);
    assert_eq!(first_prompt, second_prompt);
    assert_eq!(client.calls(), 2);
}

#[tokio::test]
async fn test_rebuild_swaps_index() {
    let client = Arc::new(StubClient::text("ok"));
    let responder = responder(&MemoryRowSource::default(), client.clone());
    assert_eq!(responder.index().evidence_count(), 0);

    responder.rebuild(&school()).unwrap();
    assert_eq!(responder.index().evidence_count(), 4);

    responder.ask("When is the next event?").await;
    assert!(client.last_prompt().unwrap().contains("Career Workshop"));
}

#[tokio::test]
async fn test_failed_rebuild_keeps_previous_index() {
    let client = Arc::new(StubClient::text("ok"));
    let responder = responder(&school(), client);
    let before = responder.index();

    let err = responder.rebuild(&FailingRowSource).unwrap_err();
    assert!(err.is_index_unavailable());

    let after = responder.index();
    assert!(Arc::ptr_eq(&before, &after));
}

/// Store whose events table is missing.
struct BrokenEvents(MemoryRowSource);

impl RowSource for BrokenEvents {
    fn faqs(&self, categories: &[&str]) -> AppResult<Vec<FaqRow>> {
        self.0.faqs(categories)
    }

    fn professors(&self) -> AppResult<Vec<ProfessorRow>> {
        self.0.professors()
    }

    fn facilities(&self) -> AppResult<Vec<FacilityRow>> {
        self.0.facilities()
    }

    fn events(&self) -> AppResult<Vec<EventRow>> {
        Err(AppError::Knowledge("no such table: events".to_string()))
    }
}

#[test]
fn test_any_source_error_fails_the_build_as_unavailable() {
    let err = KnowledgeIndex::build(&BrokenEvents(school())).unwrap_err();
    assert!(err.is_index_unavailable());
    assert!(err.to_string().contains("events"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_questions() {
    let client = Arc::new(StubClient::text("Answer."));
    let responder = Arc::new(responder(&school(), client.clone()));

    let questions = [
        "When is the next event?",
        "Where is the library?",
        "What's the capital of France?",
        "How do I enroll?",
    ];

    let handles: Vec<_> = questions
        .iter()
        .cycle()
        .take(16)
        .map(|q| {
            let responder = Arc::clone(&responder);
            let question = q.to_string();
            tokio::spawn(async move { responder.ask_detailed(&question).await })
        })
        .collect();

    let mut refused = 0;
    for handle in handles {
        let answer = handle.await.unwrap();
        match answer.outcome {
            AnswerOutcome::Refused => refused += 1,
            AnswerOutcome::Answered => assert_eq!(answer.answer, "Answer."),
            AnswerOutcome::ServiceFailed => panic!("unexpected failure"),
        }
    }

    assert_eq!(refused, 4);
    assert_eq!(client.calls(), 12);
}

fn mixed_case(text: &str) -> String {
    text.chars()
        .enumerate()
        .map(|(i, c)| {
            if i % 2 == 0 {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

#[test]
fn test_every_default_trigger_matches_in_any_case() {
    let index = KnowledgeIndex::build(&MemoryRowSource::default()).unwrap();

    for id in TopicId::ALL {
        for trigger in id.default_triggers() {
            for question in [
                format!("Tell me: {}?", mixed_case(trigger)),
                format!("{} please", trigger.to_uppercase()),
            ] {
                let retrieval = index.retrieve(&question);
                assert!(
                    retrieval.matched_topics.contains(&id),
                    "{:?} did not match {:?}",
                    question,
                    id
                );
            }
        }
    }
}
