//! Generation settings shared by every provider.

use serde::{Deserialize, Serialize};

/// Sampling configuration sent with a generation request.
///
/// Field names follow the Ollama `options` object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Sampling temperature
    pub temperature: f32,

    /// Nucleus-sampling threshold
    pub top_p: f32,

    /// Number of candidate tokens considered at each step
    pub top_k: u32,

    /// Penalty applied to repeated tokens
    pub repeat_penalty: f32,

    /// Random seed
    pub seed: u64,
}

impl GenerationOptions {
    /// Fully deterministic decoding: identical prompts give identical text.
    pub const fn deterministic() -> Self {
        Self {
            temperature: 0.0,
            top_p: 0.0,
            top_k: 1,
            repeat_penalty: 1.1,
            seed: 42,
        }
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::deterministic()
    }
}
