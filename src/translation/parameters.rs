/*!
 * Engine-specific request parameters.
 *
 * Each engine needs its own credential parameters and has its own rate
 * limit, expressed as the minimum delay before each request.
 */

use std::collections::BTreeMap;
use std::time::Duration;

use crate::app_config::{ProviderCredentials, TranslationEngine};
use crate::errors::TranslationError;

/// Parameters attached to a single translation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderParameters {
    values: BTreeMap<String, String>,
    /// Delay enforced after acquiring the gate and before the request
    pub minimum_delay: Duration,
}

impl ProviderParameters {
    /// Build the parameters for `engine` from the current credentials
    pub fn for_engine(
        engine: TranslationEngine,
        credentials: &ProviderCredentials,
    ) -> Result<Self, TranslationError> {
        let (pairs, delay_ms): (Vec<(&str, &str)>, u64) = match engine {
            // Baidu allows 1 request per second
            TranslationEngine::Baidu => (
                vec![
                    ("baidu-app-id", credentials.baidu_app_id.as_str()),
                    ("baidu-app-key", credentials.baidu_app_key.as_str()),
                ],
                1000,
            ),
            // Google allows 10 requests per second
            TranslationEngine::Google => (vec![("google-api-key", credentials.google_api_key.as_str())], 100),
            TranslationEngine::GoogleFree => (Vec::new(), 100),
            TranslationEngine::DeepL => (vec![("deepl-api-key", credentials.deepl_api_key.as_str())], 100),
            TranslationEngine::OpenAi => (vec![("openai-api-key", credentials.openai_api_key.as_str())], 1000),
            TranslationEngine::Unknown => {
                return Err(TranslationError::InvalidConfiguration(format!(
                    "Invalid translation engine: {}",
                    engine
                )));
            }
        };

        Ok(Self {
            values: pairs
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
            minimum_delay: Duration::from_millis(delay_ms),
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Key/value pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
