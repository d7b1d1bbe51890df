//! Inference port - Interface for generative-model calls
//!
//! The persona is attached at the adapter level as a standing system
//! instruction, so callers only hand over user-visible text.

use async_trait::async_trait;
use domain::ChatTurn;

use crate::error::ApplicationError;

/// Result of an inference call
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// Generated response content
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Number of tokens used (if reported)
    pub tokens_used: Option<u32>,
    /// Latency in milliseconds
    pub latency_ms: u64,
}

/// Per-call generation parameters
///
/// Only the relevance classifier overrides these; regular chat calls
/// use the model defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationOptions {
    /// Sampling temperature (0.0 = deterministic)
    pub temperature: Option<f32>,
    /// Cap on generated tokens
    pub max_output_tokens: Option<u32>,
}

impl GenerationOptions {
    /// Options for deterministic single-token classification replies
    pub const fn deterministic(max_output_tokens: u32) -> Self {
        Self {
            temperature: Some(0.0),
            max_output_tokens: Some(max_output_tokens),
        }
    }
}

/// Port for inference operations
#[async_trait]
pub trait InferencePort: Send + Sync {
    /// Generate a response for a single message with no prior context
    async fn generate(&self, message: &str) -> Result<InferenceResult, ApplicationError>;

    /// Generate a response given the conversation so far
    async fn generate_with_history(
        &self,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<InferenceResult, ApplicationError>;

    /// Generate with explicit generation parameters
    async fn generate_with_options(
        &self,
        message: &str,
        options: GenerationOptions,
    ) -> Result<InferenceResult, ApplicationError>;

    /// Check if the inference backend is reachable
    async fn is_healthy(&self) -> bool;

    /// Name of the configured model
    fn current_model(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_options_pin_temperature() {
        let options = GenerationOptions::deterministic(10);
        assert_eq!(options.temperature, Some(0.0));
        assert_eq!(options.max_output_tokens, Some(10));
    }

    #[test]
    fn default_options_leave_model_defaults() {
        let options = GenerationOptions::default();
        assert!(options.temperature.is_none());
        assert!(options.max_output_tokens.is_none());
    }
}
