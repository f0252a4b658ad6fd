/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService, which walks the text fields of
 * metadata records and replaces each one with its translation. Every field
 * goes through the shared gate, the retry executor and the translation client,
 * strictly one after another.
 */

use log::debug;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::app_config::{SharedTranslationConfig, TranslationConfig, TranslationMode};
use crate::errors::{ProviderError, TranslationError};
use crate::metadata::{ActorInfo, MovieInfo};
use crate::providers::TranslationClient;

use super::gate::TranslationGate;
use super::parameters::ProviderParameters;
use super::retry::RetryExecutor;

/// Source language value asking the engine to detect the input language
pub const AUTO_LANGUAGE_CODE: &str = "auto";

/// Target language translations are never produced in
pub const JAPANESE_LANGUAGE_CODE: &str = "ja";

/// When a movie field is eligible for translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Only when the flag is set in the configured mode
    Mode(TranslationMode),
    /// Whenever the field has text
    Always,
    /// Only when actor translation is switched on
    Actors,
}

impl FieldPolicy {
    fn applies(self, config: &TranslationConfig) -> bool {
        match self {
            Self::Mode(flag) => config.mode.contains(flag),
            Self::Always => true,
            Self::Actors => config.translate_actors,
        }
    }
}

/// A translatable movie field: its name, policy and the text slots it holds
pub struct MovieField {
    pub name: &'static str,
    pub policy: FieldPolicy,
    slots: fn(&mut MovieInfo) -> Vec<&mut String>,
}

impl std::fmt::Debug for MovieField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieField")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Movie fields in translation order
pub const MOVIE_FIELDS: &[MovieField] = &[
    MovieField {
        name: "title",
        policy: FieldPolicy::Mode(TranslationMode::TITLE),
        slots: |m| vec![&mut m.title],
    },
    MovieField {
        name: "summary",
        policy: FieldPolicy::Mode(TranslationMode::SUMMARY),
        slots: |m| vec![&mut m.summary],
    },
    MovieField {
        name: "director",
        policy: FieldPolicy::Always,
        slots: |m| vec![&mut m.director],
    },
    MovieField {
        name: "genres",
        policy: FieldPolicy::Always,
        slots: |m| m.genres.iter_mut().collect(),
    },
    MovieField {
        name: "maker",
        policy: FieldPolicy::Always,
        slots: |m| vec![&mut m.maker],
    },
    MovieField {
        name: "label",
        policy: FieldPolicy::Always,
        slots: |m| vec![&mut m.label],
    },
    MovieField {
        name: "series",
        policy: FieldPolicy::Always,
        slots: |m| vec![&mut m.series],
    },
    MovieField {
        name: "actors",
        policy: FieldPolicy::Actors,
        slots: |m| m.actors.iter_mut().collect(),
    },
];

/// Main translation service for metadata records
#[derive(Debug, Clone)]
pub struct TranslationService {
    /// Client performing the actual requests
    client: Arc<dyn TranslationClient>,

    /// Gate shared with every other translator in the process
    gate: Arc<TranslationGate>,

    /// Live configuration, read again for every field
    config: SharedTranslationConfig,

    retry: RetryExecutor,
}

impl TranslationService {
    /// Create a service that uses the process-wide gate
    pub fn new(client: Arc<dyn TranslationClient>, config: SharedTranslationConfig) -> Self {
        Self::with_gate(client, config, TranslationGate::global())
    }

    /// Create a service with an explicit gate
    pub fn with_gate(
        client: Arc<dyn TranslationClient>,
        config: SharedTranslationConfig,
        gate: Arc<TranslationGate>,
    ) -> Self {
        Self {
            client,
            gate,
            config,
            retry: RetryExecutor::default(),
        }
    }

    /// Replace the retry policy
    pub fn with_retry(mut self, retry: RetryExecutor) -> Self {
        self.retry = retry;
        self
    }

    /// Handle to the live configuration
    pub fn config(&self) -> SharedTranslationConfig {
        Arc::clone(&self.config)
    }

    /// Translate the text fields of a movie record in place.
    ///
    /// Fields are translated one at a time in [`MOVIE_FIELDS`] order. On
    /// failure the fields before the failing one stay translated and the rest
    /// are left untouched.
    pub async fn translate_movie(
        &self,
        movie: &mut MovieInfo,
        target_language: &str,
        cancel: &CancellationToken,
    ) -> Result<(), TranslationError> {
        ensure_target_allowed(target_language)?;

        for field in MOVIE_FIELDS {
            let applies = field.policy.applies(&self.config.read());
            if !applies {
                continue;
            }

            for slot in (field.slots)(&mut *movie) {
                if slot.trim().is_empty() {
                    continue;
                }
                debug!("Translating movie {} to {}", field.name, target_language);
                *slot = self.translate_text(slot.as_str(), target_language, cancel).await?;
            }
        }

        Ok(())
    }

    /// Translate an actor's name in place
    pub async fn translate_actor(
        &self,
        actor: &mut ActorInfo,
        target_language: &str,
        cancel: &CancellationToken,
    ) -> Result<(), TranslationError> {
        ensure_target_allowed(target_language)?;

        if !actor.name.trim().is_empty() {
            debug!("Translating actor name to {}", target_language);
            actor.name = self.translate_text(&actor.name, target_language, cancel).await?;
        }

        Ok(())
    }

    /// Translate a single text with automatic source language detection.
    ///
    /// The gate is held for all attempts, and every attempt, retries included,
    /// is paced by the engine's minimum delay.
    pub async fn translate_text(
        &self,
        text: &str,
        target_language: &str,
        cancel: &CancellationToken,
    ) -> Result<String, TranslationError> {
        let config = self.config.read().clone();
        let engine = config.engine.as_str();
        let parameters = ProviderParameters::for_engine(config.engine, &config.credentials)?;

        let gate: &TranslationGate = &self.gate;
        let client = &self.client;
        let retry = &self.retry;
        let params = &parameters;

        gate.run_exclusively(cancel, move || {
            retry.execute(move || async move {
                gate.pace(params.minimum_delay, cancel).await?;
                let result = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(TranslationError::Cancelled),
                    result = client.translate(
                        text,
                        AUTO_LANGUAGE_CODE,
                        target_language,
                        engine,
                        params,
                        cancel,
                    ) => result,
                };
                match result {
                    Ok(translation) => Ok(translation.translated_text),
                    Err(ProviderError::Aborted) => Err(TranslationError::Cancelled),
                    Err(e) => Err(e.into()),
                }
            })
        })
        .await
    }
}

fn ensure_target_allowed(target_language: &str) -> Result<(), TranslationError> {
    if target_language.eq_ignore_ascii_case(JAPANESE_LANGUAGE_CODE) {
        return Err(TranslationError::InvalidArgument(format!(
            "language not allowed: {}",
            target_language
        )));
    }
    Ok(())
}
