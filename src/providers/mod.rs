/*!
 * Clients for the external translation service.
 *
 * - `metatube`: HTTP client for a MetaTube server's translate endpoint
 * - `mock`: scripted in-memory client for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use tokio_util::sync::CancellationToken;

use crate::errors::ProviderError;
use crate::translation::ProviderParameters;

/// Result of a single translation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub translated_text: String,
}

/// Common trait for translation clients
///
/// Implementations perform exactly one request per call; retrying, pacing and
/// serialization are handled by the caller.
#[async_trait]
pub trait TranslationClient: Send + Sync + Debug {
    /// Translate `text` from `source_language` to `target_language`
    ///
    /// # Arguments
    /// * `engine` - Engine identifier understood by the service
    /// * `parameters` - Engine-specific credentials for this call
    /// * `cancel` - Aborts the request when cancelled
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        engine: &str,
        parameters: &ProviderParameters,
        cancel: &CancellationToken,
    ) -> Result<TranslationResult, ProviderError>;
}

pub mod metatube;
pub mod mock;
