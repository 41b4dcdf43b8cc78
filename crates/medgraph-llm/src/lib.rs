//! Gemini-backed answer generation.
//!
//! [`GeminiClient`] wraps the `generateContent` REST endpoint. The model is
//! used three ways: pulling a start/target concept pair out of the user's
//! question (free-text output the caller must parse tolerantly, see
//! [`extract::parse_concepts`]), producing a raw answer over the retrieved
//! context, and polishing that answer for presentation.

pub mod client;
pub mod error;
pub mod extract;

pub use client::{GeminiClient, GeminiConfig, GeminiEnv};
pub use error::LlmError;
pub use extract::{extraction_prompt, parse_concepts, polish_prompt};

/// Request timeout for generation calls.
pub const LLM_TIMEOUT_SECS: u64 = 45;
