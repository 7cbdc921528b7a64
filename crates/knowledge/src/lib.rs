//! Knowledge index and grounded answering for the kiosk.
//!
//! Source rows are rendered into per-topic evidence once at startup. A
//! question is answered only when its wording hits a topic's trigger
//! vocabulary, and then only from that topic's evidence.

pub mod grounded;
pub mod index;
pub mod render;
pub mod seed;
pub mod source;
pub mod sqlite;
pub mod topic;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use grounded::{
    AnswerOutcome, GroundedAnswer, GroundedResponder, IndexRefresher, ResponderSettings,
    REFUSAL_MESSAGE, SERVICE_UNAVAILABLE_MESSAGE,
};
pub use index::{KnowledgeIndex, RetrievalResult, TopicStats};
pub use seed::{load_seed, seed_database, SeedData, SeedStats};
pub use source::{EventRow, FacilityRow, FaqRow, ProfessorRow, RowSource};
pub use sqlite::{create_database, init_schema, SqliteRowSource};
pub use topic::{matches_triggers, normalize_question, Topic, TopicId};
