//! Hosted model access.

use llm::LLMProvider;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::{ChatMessage, StructuredOutputFormat};
use serde_json::json;
use tracing::debug;

use super::AiError;
use crate::config::AiConfig;

/// Something that can turn a prompt into a JSON reply.
#[allow(async_fn_in_trait)]
pub trait ModelBackend {
    /// Send `prompt` and return the raw reply text.
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;
}

/// Google Gemini through the `llm` crate, asking for JSON that matches
/// the answer schema.
pub struct LlmBackend {
    model: String,
    provider: Option<Box<dyn LLMProvider>>,
}

impl LlmBackend {
    /// Build the provider from configuration.
    ///
    /// A missing API key is not an error here; every request then fails
    /// with [`AiError::MissingKey`].
    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        let model = config.model.clone();
        let Some(api_key) = config.resolve_api_key() else {
            return Ok(Self {
                model,
                provider: None,
            });
        };

        let provider = LLMBuilder::new()
            .backend(LLMBackend::Google)
            .api_key(api_key)
            .model(&model)
            .max_tokens(config.max_tokens)
            .temperature(config.temperature)
            .schema(answer_schema()?)
            .build()
            .map_err(|e| AiError::Transport(e.to_string()))?;

        Ok(Self {
            model,
            provider: Some(provider),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl ModelBackend for LlmBackend {
    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        let provider = self.provider.as_ref().ok_or(AiError::MissingKey)?;
        let messages = vec![ChatMessage::user().content(prompt).build()];

        debug!(model = %self.model, "Sending solve request");
        let response = provider
            .chat(&messages)
            .await
            .map_err(|e| AiError::Transport(e.to_string()))?;

        response
            .text()
            .ok_or_else(|| AiError::Parse("empty response".to_string()))
    }
}

/// The required `{result, explanation, steps}` response shape.
fn answer_schema() -> Result<StructuredOutputFormat, AiError> {
    serde_json::from_value(json!({
        "name": "math_answer",
        "description": "A solved calculation with its explanation and steps.",
        "strict": true,
        "schema": {
            "type": "object",
            "properties": {
                "result": {
                    "type": "string",
                    "description": "The final numerical or concise answer."
                },
                "explanation": {
                    "type": "string",
                    "description": "A brief explanation of how the answer was reached."
                },
                "steps": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Step-by-step breakdown of the calculation."
                }
            },
            "required": ["result", "explanation", "steps"]
        }
    }))
    .map_err(|e| AiError::Parse(format!("invalid answer schema: {}", e)))
}
