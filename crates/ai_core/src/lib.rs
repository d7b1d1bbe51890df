//! Model gateway for Elendur
//!
//! Wraps the hosted generative-model REST API behind the
//! `InferenceEngine` port. The persona travels with the configuration
//! as a standing system instruction applied to every request.

pub mod config;
pub mod error;
pub mod gemini;
pub mod ports;

pub use config::GeminiConfig;
pub use error::InferenceError;
pub use gemini::GeminiInferenceEngine;
pub use ports::{
    InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage,
};
