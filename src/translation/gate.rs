/*!
 * Process-wide translation gate.
 *
 * Every translation request in the process passes through one gate, so at
 * most one request is in flight at any time, whatever the engine or caller.
 * The holder paces each request, retries included, with the engine's minimum
 * delay, which keeps the request rate under every engine's limit at the cost
 * of throughput.
 */

use log::trace;
use once_cell::sync::Lazy;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::errors::TranslationError;

static GLOBAL_GATE: Lazy<Arc<TranslationGate>> = Lazy::new(|| Arc::new(TranslationGate::new()));

/// Binary lock serializing translation requests
#[derive(Debug, Default)]
pub struct TranslationGate {
    // tokio's mutex queues waiters in FIFO order
    lock: Mutex<()>,
}

impl TranslationGate {
    /// Create an independent gate. Production code shares `global()`.
    pub fn new() -> Self {
        Self { lock: Mutex::new(()) }
    }

    /// The gate shared by the whole process; lives until the process exits
    pub fn global() -> Arc<TranslationGate> {
        Arc::clone(&GLOBAL_GATE)
    }

    /// Run `operation` while holding the gate.
    ///
    /// Waiting for the gate aborts with [`TranslationError::Cancelled`] when
    /// `cancel` fires; `operation` is not started in that case. The gate is
    /// released on every exit path.
    pub async fn run_exclusively<T, F, Fut>(
        &self,
        cancel: &CancellationToken,
        operation: F,
    ) -> Result<T, TranslationError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, TranslationError>>,
    {
        let _guard = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TranslationError::Cancelled),
            guard = self.lock.lock() => guard,
        };
        trace!("Translation gate acquired");

        operation().await
    }

    /// Wait `minimum_delay` before the next request.
    ///
    /// Called by the gate holder before every request it sends, so attempts
    /// of the same field are spaced like requests of different fields.
    pub async fn pace(
        &self,
        minimum_delay: Duration,
        cancel: &CancellationToken,
    ) -> Result<(), TranslationError> {
        trace!("Pacing next request by {:?}", minimum_delay);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TranslationError::Cancelled),
            _ = tokio::time::sleep(minimum_delay) => Ok(()),
        }
    }
}
