//! Relevance classifier - Is a query about Tolkien's legendarium?
//!
//! A secondary, deterministic model call. The verdict only decides
//! whether delivery options are offered, so a failed classification
//! quietly resolves to "not relevant" and never blocks the main reply.

use std::{fmt, sync::Arc};

use tracing::{debug, instrument};

use crate::ports::{GenerationOptions, InferencePort};

/// The expected positive verdict token
const POSITIVE_VERDICT: &str = "YES";

/// Output cap: the verdict is a single token
const VERDICT_MAX_OUTPUT_TOKENS: u32 = 10;

/// Classifies queries as in-domain or not
pub struct RelevanceClassifier {
    inference: Arc<dyn InferencePort>,
}

impl fmt::Debug for RelevanceClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelevanceClassifier").finish_non_exhaustive()
    }
}

impl RelevanceClassifier {
    /// Create a new classifier over the shared inference port
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self { inference }
    }

    /// Whether the query is directly about Tolkien's works
    ///
    /// Any call failure or unexpected verdict resolves to `false`.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn is_on_topic(&self, query: &str) -> bool {
        let prompt = classification_prompt(query);
        let options = GenerationOptions::deterministic(VERDICT_MAX_OUTPUT_TOKENS);

        match self.inference.generate_with_options(&prompt, options).await {
            Ok(result) => {
                let verdict = result.content.trim().to_uppercase();
                debug!(%verdict, "Relevance verdict");
                verdict == POSITIVE_VERDICT
            },
            Err(e) => {
                debug!(error = %e, "Classification failed, defaulting to not relevant");
                false
            },
        }
    }
}

/// Fixed classification template with few-shot examples pinning the
/// YES/NO output vocabulary
fn classification_prompt(query: &str) -> String {
    format!(
        "Dada la siguiente consulta de usuario, determina si está directamente relacionada \
         con la historia, personajes, lugares, eventos o mitología de las obras de J.R.R. Tolkien \
         (por ejemplo, El Hobbit, El Señor de los Anillos, El Silmarillion).\n\
         \n\
         Responde con 'YES' si la consulta es directamente relevante a Tolkien.\n\
         Responde con 'NO' si es un saludo general, agradecimiento, una meta-pregunta sobre el \
         asistente, una pregunta personal, o cualquier cosa no relacionada directamente con Tolkien.\n\
         \n\
         Ejemplos:\n\
         - Consulta: ¿Quién es Gandalf? -> YES\n\
         - Consulta: Háblame de los Elfos. -> YES\n\
         - Consulta: ¿Dónde está Mordor? -> YES\n\
         - Consulta: Gracias por tu respuesta. -> NO\n\
         - Consulta: Hola. -> NO\n\
         - Consulta: Tengo otra pregunta. -> NO\n\
         - Consulta: ¿Cuál es la capital de Francia? -> NO\n\
         - Consulta: ¿Puedes contarme un chiste? -> NO\n\
         \n\
         Consulta: {query}\n\
         ¿Es esta consulta directamente relacionada con Tolkien? (YES/NO):"
    )
}

#[cfg(test)]
mod tests {
    use domain::ChatTurn;
    use mockall::mock;

    use super::*;
    use crate::{error::ApplicationError, ports::InferenceResult};

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

    fn verdict_result(content: &str) -> InferenceResult {
        InferenceResult {
            content: content.to_string(),
            model: "test-model".to_string(),
            tokens_used: Some(1),
            latency_ms: 10,
        }
    }

    fn classifier_with_verdict(verdict: &'static str) -> RelevanceClassifier {
        let mut mock = MockInference::new();
        mock.expect_generate_with_options()
            .returning(move |_, _| Ok(verdict_result(verdict)));
        RelevanceClassifier::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn yes_verdict_is_on_topic() {
        let classifier = classifier_with_verdict("YES");
        assert!(classifier.is_on_topic("¿Quién es Gandalf?").await);
    }

    #[tokio::test]
    async fn verdict_is_normalized() {
        let classifier = classifier_with_verdict("  yes\n");
        assert!(classifier.is_on_topic("¿Dónde está Mordor?").await);
    }

    #[tokio::test]
    async fn no_verdict_is_off_topic() {
        let classifier = classifier_with_verdict("NO");
        assert!(!classifier.is_on_topic("Hola").await);
    }

    #[tokio::test]
    async fn unexpected_verdict_is_off_topic() {
        let classifier = classifier_with_verdict("MAYBE");
        assert!(!classifier.is_on_topic("Gracias").await);
    }

    #[tokio::test]
    async fn call_failure_defaults_to_off_topic() {
        let mut mock = MockInference::new();
        mock.expect_generate_with_options()
            .returning(|_, _| Err(ApplicationError::Inference("down".to_string())));

        let classifier = RelevanceClassifier::new(Arc::new(mock));
        assert!(!classifier.is_on_topic("¿Quién es Gandalf?").await);
    }

    #[tokio::test]
    async fn classification_is_deterministic() {
        let mut mock = MockInference::new();
        mock.expect_generate_with_options()
            .withf(|_, options| {
                options.temperature == Some(0.0)
                    && options.max_output_tokens == Some(VERDICT_MAX_OUTPUT_TOKENS)
            })
            .returning(|_, _| Ok(verdict_result("YES")));

        let classifier = RelevanceClassifier::new(Arc::new(mock));
        assert!(classifier.is_on_topic("Háblame de los Elfos.").await);
    }

    #[test]
    fn prompt_embeds_query_verbatim() {
        let prompt = classification_prompt("¿Quién forjó los anillos?");
        assert!(prompt.contains("Consulta: ¿Quién forjó los anillos?"));
        assert!(prompt.contains("(YES/NO)"));
    }
}
