//! Answer types and the fixed kiosk messages.

use crate::topic::TopicId;
use serde::{Deserialize, Serialize};

/// Returned verbatim when a question matches no topic.
pub const REFUSAL_MESSAGE: &str = "This kiosk only provides official Westmead International School information. Please ask about enrollment, faculty, facilities, events, or scholarships.";

/// Returned verbatim when the generative service fails or times out.
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "AI service temporarily unavailable.";

/// First line of every context block.
pub const CONTEXT_HEADER: &str = "=== RELEVANT INFORMATION FROM DATABASE ===";

/// How a question was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// No topic matched; the service was not called
    Refused,
    /// The service returned text
    Answered,
    /// The service failed or timed out
    ServiceFailed,
}

/// An answer together with how it was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundedAnswer {
    pub answer: String,
    pub outcome: AnswerOutcome,
    pub topics: Vec<TopicId>,
    pub evidence_count: usize,
}

impl GroundedAnswer {
    pub fn refused() -> Self {
        Self {
            answer: REFUSAL_MESSAGE.to_string(),
            outcome: AnswerOutcome::Refused,
            topics: Vec::new(),
            evidence_count: 0,
        }
    }
}
