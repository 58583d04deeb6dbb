//! Best-effort note summarization.
//!
//! Wraps a generation backend and guarantees that summarization can never
//! fail a calling request. Any backend error, timeout, or empty response
//! degrades to `None` and the note is stored without a summary.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use memo_core::{defaults, GenerationBackend};

#[derive(Clone)]
pub struct SummaryService {
    backend: Arc<dyn GenerationBackend>,
}

impl SummaryService {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// Summarize note content, degrading to `None` on any failure.
    pub async fn summarize(&self, content: &str) -> Option<String> {
        if content.trim().is_empty() {
            return None;
        }

        let prompt = format!("{}:\n\n{}", defaults::SUMMARY_INSTRUCTION, content);
        let start = Instant::now();

        match self.backend.generate(&prompt).await {
            Ok(text) => {
                let summary = text.trim();
                debug!(
                    model = self.backend.model_name(),
                    response_len = summary.len(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Summary generated"
                );
                if summary.is_empty() {
                    None
                } else {
                    Some(summary.to_string())
                }
            }
            Err(err) => {
                warn!(
                    model = self.backend.model_name(),
                    error = %err,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Summary generation failed, storing note without summary"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memo_inference::mock::MockGenerationBackend;

    fn service(mock: &MockGenerationBackend) -> SummaryService {
        SummaryService::new(Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn test_summarize_returns_trimmed_text() {
        let mock = MockGenerationBackend::new().with_fixed_response("  A summary.  ");
        let summary = service(&mock).summarize("Some note content").await;
        assert_eq!(summary.as_deref(), Some("A summary."));
    }

    #[tokio::test]
    async fn test_backend_failure_degrades_to_none() {
        let mock = MockGenerationBackend::new().with_failure();
        let summary = service(&mock).summarize("Some note content").await;
        assert_eq!(summary, None);
        assert_eq!(mock.generate_call_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_response_degrades_to_none() {
        let mock = MockGenerationBackend::new().with_fixed_response("   \n ");
        let summary = service(&mock).summarize("Some note content").await;
        assert_eq!(summary, None);
    }

    #[tokio::test]
    async fn test_empty_content_skips_backend() {
        let mock = MockGenerationBackend::new();
        let summary = service(&mock).summarize("   ").await;
        assert_eq!(summary, None);
        assert_eq!(mock.generate_call_count(), 0);
    }

    #[tokio::test]
    async fn test_prompt_carries_instruction_and_content() {
        let mock = MockGenerationBackend::new().with_fixed_response("ok");
        service(&mock).summarize("kyoto trip").await;

        let calls = mock.get_calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].input.starts_with(defaults::SUMMARY_INSTRUCTION));
        assert!(calls[0].input.ends_with("kyoto trip"));
    }
}
