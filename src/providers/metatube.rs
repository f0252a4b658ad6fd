use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::app_config::ServerConfig;
use crate::errors::ProviderError;
use crate::providers::{TranslationClient, TranslationResult};
use crate::translation::ProviderParameters;

const TRANSLATE_PATH: &str = "v1/translate";

/// Client for the translate endpoint of a MetaTube server
#[derive(Debug, Clone)]
pub struct MetaTubeClient {
    /// HTTP client for API requests
    client: Client,
    /// Server base URL, always ending in '/'
    base_url: Url,
    /// Bearer token; not sent when empty
    token: String,
}

/// Envelope wrapping every server response
#[derive(Debug, Deserialize)]
struct ResponseEnvelope<T> {
    data: Option<T>,
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    /// Server-side code, not necessarily an HTTP status
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

impl ErrorBody {
    /// The code as a status, when it is a non-zero value that fits one
    fn status_code(&self) -> Option<u16> {
        u16::try_from(self.code).ok().filter(|code| *code != 0)
    }
}

#[derive(Debug, Deserialize)]
struct TranslationInfo {
    translated_text: String,
}

impl MetaTubeClient {
    /// Create a new client
    pub fn new(base_url: &str, token: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid server url '{}': {}", base_url, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            token: token.into(),
        })
    }

    /// Create a client from the server section of the configuration
    pub fn from_config(config: &ServerConfig) -> Result<Self, ProviderError> {
        Self::new(&config.url, config.token.clone(), Duration::from_secs(config.timeout_secs))
    }

    fn translate_url(&self) -> Result<Url, ProviderError> {
        self.base_url
            .join(TRANSLATE_PATH)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid translate url: {}", e)))
    }

    async fn send(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        engine: &str,
        parameters: &ProviderParameters,
    ) -> Result<TranslationResult, ProviderError> {
        let mut query: Vec<(&str, &str)> = vec![
            ("q", text),
            ("from", source_language),
            ("to", target_language),
            ("engine", engine),
        ];
        query.extend(parameters.iter());

        let mut request = self.client.get(self.translate_url()?).query(&query);
        if !self.token.is_empty() {
            request = request.bearer_auth(&self.token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ProviderError::ConnectionError(e.to_string())
            } else {
                ProviderError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read response body: {}", e)))?;

        let envelope = serde_json::from_str::<ResponseEnvelope<TranslationInfo>>(&body);

        if !status.is_success() {
            let message = match envelope {
                Ok(ResponseEnvelope { error: Some(err), .. }) if !err.message.is_empty() => err.message,
                _ => body,
            };
            error!("Translation server error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        match envelope {
            Ok(ResponseEnvelope { data: Some(info), .. }) => Ok(TranslationResult {
                translated_text: info.translated_text,
            }),
            Ok(ResponseEnvelope { error: Some(err), .. }) => Err(ProviderError::ApiError {
                status_code: err.status_code().unwrap_or(status.as_u16()),
                message: err.message,
            }),
            Ok(_) => Err(ProviderError::ParseError("response carries neither data nor error".to_string())),
            Err(e) => Err(ProviderError::ParseError(e.to_string())),
        }
    }
}

#[async_trait]
impl TranslationClient for MetaTubeClient {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        engine: &str,
        parameters: &ProviderParameters,
        cancel: &CancellationToken,
    ) -> Result<TranslationResult, ProviderError> {
        debug!("Requesting {} translation ({} -> {})", engine, source_language, target_language);

        tokio::select! {
            _ = cancel.cancelled() => Err(ProviderError::Aborted),
            result = self.send(text, source_language, target_language, engine, parameters) => result,
        }
    }
}
