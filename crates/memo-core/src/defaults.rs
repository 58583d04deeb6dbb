//! Centralized default constants for the memo system.
//!
//! **This module is the single source of truth** for all shared default
//! values. Crates reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default bind address.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default SQLite database URL.
pub const DATABASE_URL: &str = "sqlite://memo.db";

/// Maximum accepted request body in bytes.
pub const REQUEST_BODY_LIMIT: usize = 1024 * 1024;

// =============================================================================
// SESSIONS
// =============================================================================

/// Session lifetime in days.
pub const SESSION_TTL_DAYS: i64 = 30;

/// Length of the raw session token in characters.
pub const SESSION_TOKEN_LENGTH: usize = 64;

// =============================================================================
// INFERENCE
// =============================================================================

/// Default Ollama endpoint.
pub const OLLAMA_URL: &str = "http://localhost:11434";

/// Default generation model for summaries.
pub const GEN_MODEL: &str = "qwen3:8b";

/// Timeout for generation requests (seconds). Expiry degrades to a null
/// summary, never to a request failure.
pub const GEN_TIMEOUT_SECS: u64 = 120;

/// Fixed summarization instruction sent with every request.
pub const SUMMARY_INSTRUCTION: &str = "Summarize this text in one or two sentences";
