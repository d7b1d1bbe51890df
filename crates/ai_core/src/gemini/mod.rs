//! Gemini gateway implementation
//!
//! Talks to the Google generative-language REST API
//! (`models/{model}:generateContent`).

mod client;

pub use client::GeminiInferenceEngine;
