//! LLM generation backends for memo.
//!
//! Two implementations of [`memo_core::GenerationBackend`]:
//!
//! - [`OllamaBackend`] talks to a local Ollama server over its chat API
//! - [`mock::MockGenerationBackend`] is deterministic and offline, for tests
//!
//! Callers that only need summarization should go through the API layer's
//! summary service, which wraps a backend and never lets a generation
//! failure escape.

pub mod mock;
pub mod ollama;

pub use ollama::OllamaBackend;
