//! Gemini inference adapter - Implements InferencePort using ai_core

use std::time::Instant;

use ai_core::{
    GeminiConfig, GeminiInferenceEngine, InferenceEngine, InferenceError, InferenceMessage,
    InferenceRequest,
};
use application::{
    ApplicationError,
    ports::{GenerationOptions, InferencePort, InferenceResult},
};
use async_trait::async_trait;
use domain::ChatTurn;
use tracing::instrument;

/// Adapter binding the application inference port to the Gemini gateway
#[derive(Debug)]
pub struct GeminiInferenceAdapter {
    engine: GeminiInferenceEngine,
}

impl GeminiInferenceAdapter {
    /// Create a new adapter for the given gateway configuration
    pub fn new(config: GeminiConfig) -> Result<Self, ApplicationError> {
        let engine = GeminiInferenceEngine::new(config).map_err(Self::map_error)?;
        Ok(Self { engine })
    }

    /// Map gateway errors to application errors
    fn map_error(e: InferenceError) -> ApplicationError {
        ApplicationError::Inference(e.to_string())
    }

    /// Interleave the turn history and the new message into gateway messages
    fn conversation_messages(history: &[ChatTurn], message: &str) -> Vec<InferenceMessage> {
        let mut messages = Vec::with_capacity(history.len() * 2 + 1);
        for turn in history {
            messages.push(InferenceMessage::user(&turn.user_message));
            messages.push(InferenceMessage::model(&turn.assistant_reply));
        }
        messages.push(InferenceMessage::user(message));
        messages
    }

    async fn run(&self, request: InferenceRequest) -> Result<InferenceResult, ApplicationError> {
        let start = Instant::now();
        let response = self.engine.generate(request).await.map_err(Self::map_error)?;

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[async_trait]
impl InferencePort for GeminiInferenceAdapter {
    #[instrument(skip(self, message))]
    async fn generate(&self, message: &str) -> Result<InferenceResult, ApplicationError> {
        self.run(InferenceRequest::simple(message)).await
    }

    #[instrument(skip(self, history, message), fields(history_len = history.len()))]
    async fn generate_with_history(
        &self,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<InferenceResult, ApplicationError> {
        let messages = Self::conversation_messages(history, message);
        self.run(InferenceRequest::from_messages(messages)).await
    }

    #[instrument(skip(self, message))]
    async fn generate_with_options(
        &self,
        message: &str,
        options: GenerationOptions,
    ) -> Result<InferenceResult, ApplicationError> {
        let mut request = InferenceRequest::simple(message);
        if let Some(temperature) = options.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_output_tokens) = options.max_output_tokens {
            request = request.with_max_output_tokens(max_output_tokens);
        }
        self.run(request).await
    }

    async fn is_healthy(&self) -> bool {
        self.engine.health_check().await.unwrap_or(false)
    }

    fn current_model(&self) -> String {
        self.engine.default_model().to_string()
    }
}
