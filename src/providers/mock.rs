/*!
 * Mock translation client for testing.
 *
 * This module provides a scripted client that simulates different behaviors:
 * - `MockClient::working()` - Always succeeds with `"{text}-{target}"`
 * - `MockClient::failing()` - Always fails with an API error
 * - `MockClient::failing_first(n)` - Fails `n` times, then succeeds
 * - `MockClient::failing_on(text)` - Fails only for one input text
 * - `MockClient::slow(ms)` - Succeeds after a delay, aborts on cancellation
 * - `MockClient::aborting()` - Reports every call as aborted
 *
 * Every call is recorded with its start and end instants so tests can check
 * ordering and spacing.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::errors::ProviderError;
use crate::providers::{TranslationClient, TranslationResult};
use crate::translation::ProviderParameters;

/// A call observed by the mock client
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
    pub engine: String,
    pub parameters: ProviderParameters,
    pub started_at: Instant,
    pub finished_at: Instant,
}

/// Behavior mode for the mock client
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Always fails with an error
    Failing,
    /// Fails the first `failures` calls, then succeeds
    FailingFirst { failures: usize },
    /// Fails every call whose input equals the given text
    FailingOn(String),
    /// Succeeds after sleeping, unless cancelled first
    Slow { delay_ms: u64 },
    /// Reports every call as aborted
    Aborting,
}

/// Mock client for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockClient {
    behavior: MockBehavior,
    /// Attempt counter, shared between clones
    attempts: Arc<AtomicUsize>,
    /// Completed or failed calls, shared between clones
    requests: Arc<Mutex<Vec<MockRequest>>>,
}

impl MockClient {
    /// Create a new mock client with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            attempts: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn failing_first(failures: usize) -> Self {
        Self::new(MockBehavior::FailingFirst { failures })
    }

    pub fn failing_on(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::FailingOn(text.into()))
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    pub fn aborting() -> Self {
        Self::new(MockBehavior::Aborting)
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Snapshot of the recorded calls, in completion order
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().clone()
    }

    /// Input texts of the recorded calls, in completion order
    pub fn texts(&self) -> Vec<String> {
        self.requests.lock().iter().map(|r| r.text.clone()).collect()
    }

    fn translated(text: &str, target_language: &str) -> TranslationResult {
        TranslationResult {
            translated_text: format!("{}-{}", text, target_language),
        }
    }

    fn simulated_failure(attempt: usize) -> ProviderError {
        ProviderError::ApiError {
            status_code: 503,
            message: format!("Simulated provider failure (request #{})", attempt + 1),
        }
    }
}

#[async_trait]
impl TranslationClient for MockClient {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        engine: &str,
        parameters: &ProviderParameters,
        cancel: &CancellationToken,
    ) -> Result<TranslationResult, ProviderError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        let started_at = Instant::now();

        let result = match &self.behavior {
            MockBehavior::Working => Ok(Self::translated(text, target_language)),
            MockBehavior::Failing => Err(Self::simulated_failure(attempt)),
            MockBehavior::FailingFirst { failures } => {
                if attempt < *failures {
                    Err(Self::simulated_failure(attempt))
                } else {
                    Ok(Self::translated(text, target_language))
                }
            }
            MockBehavior::FailingOn(failing_text) => {
                if failing_text == text {
                    Err(Self::simulated_failure(attempt))
                } else {
                    Ok(Self::translated(text, target_language))
                }
            }
            MockBehavior::Aborting => Err(ProviderError::Aborted),
            MockBehavior::Slow { delay_ms } => {
                tokio::select! {
                    _ = cancel.cancelled() => Err(ProviderError::Aborted),
                    _ = tokio::time::sleep(Duration::from_millis(*delay_ms)) => {
                        Ok(Self::translated(text, target_language))
                    }
                }
            }
        };

        self.requests.lock().push(MockRequest {
            text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            engine: engine.to_string(),
            parameters: parameters.clone(),
            started_at,
            finished_at: Instant::now(),
        });

        result
    }
}
