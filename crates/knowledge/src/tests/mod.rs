//! Cross-module scenarios for the grounded responder.

mod gating;
mod support;
