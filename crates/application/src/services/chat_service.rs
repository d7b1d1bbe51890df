//! Chat service - Conversation handling over the inference port

use std::{fmt, sync::Arc, time::Instant};

use domain::ChatTurn;
use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::InferencePort};

/// Service producing persona-conditioned replies
///
/// Stateless in itself: callers that want multi-turn behavior keep
/// their own `ChatTurn` history and pass it back in.
pub struct ChatService {
    inference: Arc<dyn InferencePort>,
}

impl fmt::Debug for ChatService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatService").finish_non_exhaustive()
    }
}

impl ChatService {
    /// Create a new chat service
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self { inference }
    }

    /// Handle a single message with no prior context (fresh session)
    #[instrument(skip(self, message), fields(message_len = message.len()))]
    pub async fn chat(&self, message: &str) -> Result<ChatTurn, ApplicationError> {
        let start = Instant::now();

        let result = self.inference.generate(message).await?;

        debug!(
            model = %result.model,
            tokens = ?result.tokens_used,
            latency_ms = start.elapsed().as_millis() as u64,
            "Chat response generated"
        );

        Ok(ChatTurn::new(message, result.content))
    }

    /// Handle a message within an ongoing conversation
    #[instrument(skip(self, history, message), fields(history_len = history.len()))]
    pub async fn chat_with_history(
        &self,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<ChatTurn, ApplicationError> {
        let start = Instant::now();

        let result = self.inference.generate_with_history(history, message).await?;

        debug!(
            model = %result.model,
            tokens = ?result.tokens_used,
            latency_ms = start.elapsed().as_millis() as u64,
            "Conversation response generated"
        );

        Ok(ChatTurn::new(message, result.content))
    }

    /// Check if the underlying inference backend is healthy
    pub async fn is_healthy(&self) -> bool {
        self.inference.is_healthy().await
    }

    /// Get the current model name
    pub fn current_model(&self) -> String {
        self.inference.current_model()
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::ports::{GenerationOptions, InferenceResult};

    mock! {
        pub Inference {}

        #[async_trait::async_trait]
        impl InferencePort for Inference {
            async fn generate(&self, message: &str) -> Result<InferenceResult, ApplicationError>;
            async fn generate_with_history(&self, history: &[ChatTurn], message: &str) -> Result<InferenceResult, ApplicationError>;
            async fn generate_with_options(&self, message: &str, options: GenerationOptions) -> Result<InferenceResult, ApplicationError>;
            async fn is_healthy(&self) -> bool;
            fn current_model(&self) -> String;
        }
    }

    fn mock_result(content: &str) -> InferenceResult {
        InferenceResult {
            content: content.to_string(),
            model: "test-model".to_string(),
            tokens_used: Some(42),
            latency_ms: 100,
        }
    }

    #[tokio::test]
    async fn chat_returns_completed_turn() {
        let mut mock = MockInference::new();
        mock.expect_generate()
            .returning(|_| Ok(mock_result("Gandalf es un Maia.")));

        let service = ChatService::new(Arc::new(mock));
        let turn = service.chat("¿Quién es Gandalf?").await.unwrap();

        assert_eq!(turn.user_message, "¿Quién es Gandalf?");
        assert_eq!(turn.assistant_reply, "Gandalf es un Maia.");
        assert!(turn.has_reply());
    }

    #[tokio::test]
    async fn chat_with_history_passes_context() {
        let mut mock = MockInference::new();
        mock.expect_generate_with_history()
            .withf(|history, message| history.len() == 2 && message == "¿Y después?")
            .returning(|_, _| Ok(mock_result("Continuación")));

        let service = ChatService::new(Arc::new(mock));
        let history = vec![ChatTurn::new("a", "b"), ChatTurn::new("c", "d")];
        let turn = service.chat_with_history(&history, "¿Y después?").await.unwrap();

        assert_eq!(turn.assistant_reply, "Continuación");
    }

    #[tokio::test]
    async fn chat_error_propagation() {
        let mut mock = MockInference::new();
        mock.expect_generate()
            .returning(|_| Err(ApplicationError::Inference("down".to_string())));

        let service = ChatService::new(Arc::new(mock));
        let result = service.chat("Hola").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn is_healthy_delegates() {
        let mut mock = MockInference::new();
        mock.expect_is_healthy().returning(|| true);

        let service = ChatService::new(Arc::new(mock));
        assert!(service.is_healthy().await);
    }

    #[tokio::test]
    async fn current_model_delegates() {
        let mut mock = MockInference::new();
        mock.expect_current_model()
            .returning(|| "gemini-pro".to_string());

        let service = ChatService::new(Arc::new(mock));
        assert_eq!(service.current_model(), "gemini-pro");
    }

    #[test]
    fn chat_service_debug() {
        let mock = MockInference::new();
        let service = ChatService::new(Arc::new(mock));
        assert!(format!("{service:?}").contains("ChatService"));
    }
}
