//! Mock generation backend for deterministic testing.
//!
//! Returns canned responses without any network access, and logs every
//! call so tests can assert on invocation counts and inputs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use memo_core::{Error, GenerationBackend, Result};

/// Mock generation backend for testing.
#[derive(Clone)]
pub struct MockGenerationBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    fixed_responses: HashMap<String, String>,
    default_response: String,
    always_fail: bool,
    model_name: String,
}

/// One recorded call for assertion in tests.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            fixed_responses: HashMap::new(),
            default_response: "Mock response".to_string(),
            always_fail: false,
            model_name: "mock-model".to_string(),
        }
    }
}

impl MockGenerationBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the response returned for unmapped prompts.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Add a response mapping for a specific prompt.
    pub fn with_response_mapping(
        mut self,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .fixed_responses
            .insert(input.into(), output.into());
        self
    }

    /// Make every generation call fail, for testing degradation paths.
    pub fn with_failure(mut self) -> Self {
        Arc::make_mut(&mut self.config).always_fail = true;
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    /// Number of generation calls made so far.
    pub fn generate_call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    fn log_call(&self, operation: &str, input: &str) {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            input: input.to_string(),
        });
    }

    fn respond(&self, prompt: &str) -> Result<String> {
        if self.config.always_fail {
            return Err(Error::Inference("Simulated failure".to_string()));
        }
        if let Some(response) = self.config.fixed_responses.get(prompt) {
            return Ok(response.clone());
        }
        Ok(self.config.default_response.clone())
    }
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.log_call("generate", prompt);
        self.respond(prompt)
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.log_call("generate_with_system", &format!("{}\n{}", system, prompt));
        self.respond(prompt)
    }

    fn model_name(&self) -> &str {
        &self.config.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_fixed_response() {
        let backend = MockGenerationBackend::new().with_fixed_response("Custom response");

        let response = backend.generate("anything").await.unwrap();
        assert_eq!(response, "Custom response");
    }

    #[tokio::test]
    async fn test_mock_response_mapping_wins_over_default() {
        let backend = MockGenerationBackend::new()
            .with_fixed_response("default")
            .with_response_mapping("specific prompt", "mapped");

        assert_eq!(backend.generate("specific prompt").await.unwrap(), "mapped");
        assert_eq!(backend.generate("other").await.unwrap(), "default");
    }

    #[tokio::test]
    async fn test_mock_failure_mode() {
        let backend = MockGenerationBackend::new().with_failure();

        let err = backend.generate("prompt").await.unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
        // The failed call is still logged.
        assert_eq!(backend.generate_call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_logs_calls() {
        let backend = MockGenerationBackend::new();

        backend.generate("one").await.unwrap();
        backend.generate_with_system("sys", "two").await.unwrap();

        let calls = backend.get_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].operation, "generate");
        assert_eq!(calls[0].input, "one");
        assert_eq!(calls[1].operation, "generate_with_system");

        backend.clear_calls();
        assert_eq!(backend.generate_call_count(), 0);
    }
}
