use log::debug;
use std::future::Future;

use crate::errors::TranslationError;

/// Number of attempts made for every translation request
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Runs an operation until it succeeds or runs out of attempts.
///
/// Every failure except [`TranslationError::Cancelled`] is retried
/// immediately; cancellation is returned as soon as it is seen. After the last
/// attempt the operation's own error is returned as is.
#[derive(Debug, Clone, Copy)]
pub struct RetryExecutor {
    max_attempts: u32,
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl RetryExecutor {
    /// `max_attempts` below 1 still runs the operation once
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> Result<T, TranslationError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TranslationError>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_cancelled() || attempt >= self.max_attempts => return Err(e),
                Err(e) => {
                    debug!("Attempt {}/{} failed, retrying: {}", attempt, self.max_attempts, e);
                    attempt += 1;
                }
            }
        }
    }
}
