//! Structured answers returned by the model.

use serde::{Deserialize, Serialize};

use super::AiError;

/// Result shown when a problem could not be solved.
pub const SENTINEL_RESULT: &str = "Error";
/// Explanation shown alongside [`SENTINEL_RESULT`].
pub const SENTINEL_EXPLANATION: &str = "Could not process the request.";

/// A solved problem: the answer, how it was reached, and the steps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiAnswer {
    /// The final numerical or concise answer.
    pub result: String,
    /// A brief explanation of how the answer was reached.
    pub explanation: String,
    /// Step-by-step breakdown of the calculation.
    pub steps: Vec<String>,
}

impl AiAnswer {
    /// The fixed answer used in place of any failure.
    pub fn sentinel() -> Self {
        Self {
            result: SENTINEL_RESULT.to_string(),
            explanation: SENTINEL_EXPLANATION.to_string(),
            steps: Vec::new(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::sentinel()
    }

    /// Parse the model's reply.
    ///
    /// Accepts a bare JSON object, or one wrapped in prose or a markdown
    /// fence, in which case the outermost `{...}` is used.
    pub fn parse(content: &str) -> Result<Self, AiError> {
        let first_err = match serde_json::from_str::<Self>(content.trim()) {
            Ok(answer) => return Ok(answer),
            Err(e) => e,
        };

        let (Some(start), Some(end)) = (content.find('{'), content.rfind('}')) else {
            return Err(AiError::Parse(format!("response is not JSON: {}", first_err)));
        };
        if end < start {
            return Err(AiError::Parse(format!("response is not JSON: {}", first_err)));
        }

        serde_json::from_str(&content[start..=end])
            .map_err(|e| AiError::Parse(format!("failed to parse JSON: {}", e)))
    }
}
