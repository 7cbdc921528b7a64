//! Topics: fixed groupings of trigger vocabulary and evidence.
//!
//! Classification is plain substring containment of a trigger in the
//! lowercased question. A trigger embedded in an unrelated word still
//! matches ("lab" in "available").

use grounded_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one of the six fixed topics.
///
/// Variant order is the declaration order used for retrieval output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicId {
    Enrollment,
    Faculty,
    Facilities,
    Events,
    Scholarships,
    General,
}

impl TopicId {
    /// All topics in declaration order.
    pub const ALL: [TopicId; 6] = [
        TopicId::Enrollment,
        TopicId::Faculty,
        TopicId::Facilities,
        TopicId::Events,
        TopicId::Scholarships,
        TopicId::General,
    ];

    /// Canonical lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enrollment => "enrollment",
            Self::Faculty => "faculty",
            Self::Facilities => "facilities",
            Self::Events => "events",
            Self::Scholarships => "scholarships",
            Self::General => "general",
        }
    }

    /// Trigger vocabulary of this topic.
    pub fn default_triggers(&self) -> &'static [&'static str] {
        match self {
            Self::Enrollment => &[
                "enroll",
                "apply",
                "admission",
                "register",
                "registration",
                "entry",
                "how to join",
            ],
            Self::Faculty => &[
                "professor",
                "faculty",
                "staff",
                "teacher",
                "instructor",
                "dean",
                "president",
                "ceo",
                "chairman",
                "vice president",
                "who is",
                "contact",
            ],
            Self::Facilities => &[
                "facility",
                "facilities",
                "building",
                "library",
                "lab",
                "gym",
                "campus",
                "room",
                "where",
                "location",
            ],
            Self::Events => &[
                "event",
                "events",
                "schedule",
                "activity",
                "activities",
                "when",
                "upcoming",
                "calendar",
            ],
            Self::Scholarships => &[
                "scholarship",
                "tuition",
                "financial",
                "aid",
                "discount",
                "grant",
                "fee",
                "cost",
                "payment",
            ],
            // No "what": it occurs in almost every question.
            Self::General => &[
                "who", "where", "about", "school", "westmead", "program", "course", "offer",
            ],
        }
    }

    /// FAQ categories feeding this topic, for FAQ-backed topics.
    pub fn faq_categories(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::Enrollment => Some(&["admissions", "enrollment"]),
            Self::Scholarships => Some(&["scholarships", "financial"]),
            Self::General => Some(&["general", "academic"]),
            Self::Faculty | Self::Facilities | Self::Events => None,
        }
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A topic with its trigger vocabulary and rendered evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    id: TopicId,
    triggers: Vec<String>,
    evidence: Vec<String>,
}

impl Topic {
    /// Create a topic.
    ///
    /// Triggers are trimmed, lowercased and deduplicated (first occurrence
    /// wins). Blank triggers are dropped because they would match every
    /// question; a topic left without triggers is rejected.
    pub fn new<T, E>(id: TopicId, triggers: T, evidence: E) -> AppResult<Self>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        E: IntoIterator<Item = String>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for trigger in triggers {
            let trigger = trigger.as_ref().trim().to_lowercase();
            if !trigger.is_empty() && !normalized.contains(&trigger) {
                normalized.push(trigger);
            }
        }

        if normalized.is_empty() {
            return Err(AppError::Knowledge(format!(
                "Topic '{}' must have at least one trigger",
                id
            )));
        }

        Ok(Self {
            id,
            triggers: normalized,
            evidence: evidence.into_iter().collect(),
        })
    }

    /// Create a topic with its default trigger vocabulary.
    pub fn with_default_triggers(id: TopicId, evidence: Vec<String>) -> AppResult<Self> {
        Self::new(id, id.default_triggers().iter().copied(), evidence)
    }

    pub fn id(&self) -> TopicId {
        self.id
    }

    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    pub fn evidence(&self) -> &[String] {
        &self.evidence
    }

    /// Whether an already-normalized question activates this topic.
    pub fn matches(&self, normalized_question: &str) -> bool {
        matches_triggers(normalized_question, &self.triggers)
    }
}

/// Normalize a question for trigger matching.
pub fn normalize_question(question: &str) -> String {
    question.to_lowercase()
}

/// True when any trigger occurs as a substring of `normalized_question`.
pub fn matches_triggers<S: AsRef<str>>(normalized_question: &str, triggers: &[S]) -> bool {
    triggers
        .iter()
        .any(|trigger| normalized_question.contains(trigger.as_ref()))
}
