//! AI client for the assistant mode.
//!
//! Sends a free-text problem to the model and parses the structured reply.
//! Failures never reach the caller: they are logged and replaced by
//! [`AiAnswer::sentinel`].

use tracing::{error, warn};

use super::answer::AiAnswer;
use super::backend::ModelBackend;
use super::AiError;

/// Solves free-text problems with a model backend.
pub struct SolveClient<B> {
    backend: B,
}

impl<B: ModelBackend> SolveClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Solve `problem`, returning the sentinel answer on any failure.
    pub async fn solve(&self, problem: &str) -> AiAnswer {
        match self.try_solve(problem).await {
            Ok(answer) => answer,
            Err(e @ AiError::Parse(_)) => {
                warn!("Failed to parse AI response: {}", e);
                AiAnswer::sentinel()
            }
            Err(e) => {
                error!("AI request failed: {}", e);
                AiAnswer::sentinel()
            }
        }
    }

    /// Solve `problem`, reporting transport and parse failures.
    pub async fn try_solve(&self, problem: &str) -> Result<AiAnswer, AiError> {
        let problem = problem.trim();
        if problem.is_empty() {
            return Err(AiError::EmptyProblem);
        }

        let reply = self.backend.complete(&build_prompt(problem)).await?;
        AiAnswer::parse(&reply)
    }
}

fn build_prompt(problem: &str) -> String {
    format!(
        "Solve this mathematical problem or answer the calculation request: \"{}\". \
         Provide a structured response.",
        problem
    )
}
