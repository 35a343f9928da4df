//! Argus LLM Provider Layer
//!
//! Pluggable completion provider implementations.
//!
//! # Architecture
//!
//! This crate provides implementations of the `CompletionProvider` trait
//! from `argus-domain`. It supports multiple backends with a common
//! interface.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use argus_llm::MockProvider;
//! use argus_domain::traits::CompletionProvider;
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.complete("system", "test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # });
//! ```

#![warn(missing_docs)]

pub mod ollama;

use argus_domain::traits::CompletionProvider;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Errors that can occur during completion operations
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the model
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("Completion error: {0}")]
    Other(String),
}

/// Mock completion provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Responses can be keyed by a substring of the user prompt, so tests do
/// not have to reproduce entire prompts verbatim.
///
/// # Examples
///
/// ```
/// use argus_llm::MockProvider;
/// use argus_domain::traits::CompletionProvider;
///
/// # tokio_test::block_on(async {
/// let mut provider = MockProvider::new("default");
/// provider.add_response("exploit", "[]");
/// assert_eq!(provider.complete("sys", "was there an exploit?").await.unwrap(), "[]");
/// assert_eq!(provider.complete("sys", "anything else").await.unwrap(), "default");
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<Vec<(String, String)>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a response for any user prompt containing the given fragment
    ///
    /// Fragments are checked in insertion order; first match wins.
    pub fn add_response(&mut self, prompt_fragment: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push((prompt_fragment.into(), response.into()));
    }

    /// Configure an error for any user prompt containing the given fragment
    pub fn add_error(&mut self, prompt_fragment: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push((prompt_fragment.into(), "ERROR".to_string()));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    type Error = CompletionError;

    async fn complete(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let responses = self.responses.lock().unwrap();
        for (fragment, response) in responses.iter() {
            if user_prompt.contains(fragment.as_str()) {
                if response == "ERROR" {
                    return Err(CompletionError::Other("Mock error".to_string()));
                }
                return Ok(response.clone());
            }
        }

        Ok(self.default_response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.complete("sys", "any prompt").await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_fragment_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.complete("s", "say hello now").await.unwrap(), "world");
        assert_eq!(provider.complete("s", "foo fighters").await.unwrap(), "bar");
        assert_eq!(
            provider.complete("s", "unknown").await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.complete("s", "prompt1").await.unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.complete("s", "prompt2").await.unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.complete("s", "this is a bad prompt").await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), CompletionError::Other(_)));
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_count() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.complete("s", "test").await.unwrap();

        // Both share the same call count due to Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
