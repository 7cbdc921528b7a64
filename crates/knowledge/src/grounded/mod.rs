//! Grounded answering: topic gate, evidence context and one generation call.

pub mod refresh;
pub mod responder;
pub mod types;

pub use refresh::IndexRefresher;
pub use responder::{build_context, GroundedResponder, ResponderSettings};
pub use types::{
    AnswerOutcome, GroundedAnswer, CONTEXT_HEADER, REFUSAL_MESSAGE, SERVICE_UNAVAILABLE_MESSAGE,
};
