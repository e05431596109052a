//! AI assistant: natural-language problems solved by a hosted model.

mod answer;
mod backend;
mod client;

pub use answer::{AiAnswer, SENTINEL_EXPLANATION, SENTINEL_RESULT};
pub use backend::{LlmBackend, ModelBackend};
pub use client::SolveClient;

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AiError {
    #[error("problem text is empty")]
    EmptyProblem,
    #[error("API key not configured")]
    MissingKey,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Parse(String),
}

/// History label for an AI problem.
pub fn history_label(problem: &str) -> String {
    format!("AI: {}", problem.trim())
}
