//! Configuration for the model gateway

use serde::{Deserialize, Serialize};

/// Configuration for the Gemini gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key for the hosted model service
    #[serde(skip_serializing)]
    pub api_key: String,

    /// Model identifier (e.g. "gemini-pro")
    pub model: String,

    /// Base URL of the generative-language API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Standing system instruction attached to every request
    #[serde(default)]
    pub system_instruction: Option<String>,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

const fn default_timeout_ms() -> u64 {
    60_000
}

impl GeminiConfig {
    /// Create a config for the given credentials and model
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            system_instruction: None,
        }
    }

    /// Attach a standing system instruction
    #[must_use]
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Point the client at a different API host (used by tests)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
