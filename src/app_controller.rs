use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::app_config::{Config, LogLevel, TranslationEngine};
use crate::errors::AppError;
use crate::metadata::{ActorInfo, MovieInfo};
use crate::providers::TranslationClient;
use crate::providers::metatube::MetaTubeClient;
use crate::translation::TranslationService;

// @module: Application controller for record translation

/// Command-line values that take precedence over the configuration file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub engine: Option<TranslationEngine>,
    pub log_level: Option<LogLevel>,
}

/// Load the configuration at `path`, writing a default one when it is missing.
///
/// Overrides are applied before validation, so an engine picked on the command
/// line must have its credentials in the file.
pub fn load_config(path: &Path, overrides: &ConfigOverrides) -> Result<Config, AppError> {
    let mut config = if path.exists() {
        Config::from_file(path).map_err(|e| AppError::Config(format!("{:#}", e)))?
    } else {
        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config
            .save(path)
            .map_err(|e| AppError::File(format!("{:#}", e)))?;
        config
    };

    if let Some(engine) = overrides.engine {
        config.translation.engine = engine;
    }
    if let Some(level) = &overrides.log_level {
        config.log_level = level.clone();
    }

    config
        .validate()
        .map_err(|e| AppError::Config(format!("Configuration validation failed: {:#}", e)))?;
    debug!("Using server {}", config.server.url);
    Ok(config)
}

/// Read a JSON record; fields the record type does not name are kept
pub fn read_record<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::File(format!("Failed to read file {:?}: {}", path, e)))?;
    serde_json::from_str(&content)
        .map_err(|e| AppError::File(format!("Failed to parse record {:?}: {}", path, e)))
}

/// Write a record as pretty JSON to `output`, or to stdout when absent
pub fn write_record<T: Serialize>(record: &T, output: Option<&Path>) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(record)
        .map_err(|e| AppError::File(format!("Failed to serialize record: {}", e)))?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .map_err(|e| AppError::File(format!("Failed to write to file {:?}: {}", path, e)))?;
            info!("Success: {:?}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Main application controller for record translation
pub struct Controller {
    // @field: Service sharing the process-wide gate
    service: TranslationService,
}

impl Controller {
    /// Create a controller talking to the configured MetaTube server
    pub fn with_config(config: &Config) -> Result<Self, AppError> {
        let client = MetaTubeClient::from_config(&config.server)
            .map_err(|e| AppError::Config(format!("Failed to create translation client: {}", e)))?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Create a controller around an existing client
    pub fn with_client(config: &Config, client: Arc<dyn TranslationClient>) -> Self {
        info!("Translating with {}", config.translation.engine.display_name());
        Self {
            service: TranslationService::new(client, config.translation.clone().into_shared()),
        }
    }

    /// Translate the movie record in `input` and write the result
    pub async fn translate_movie_file(
        &self,
        input: &Path,
        target_language: &str,
        output: Option<&Path>,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        let mut movie: MovieInfo = read_record(input)?;
        self.service
            .translate_movie(&mut movie, target_language, cancel)
            .await?;
        write_record(&movie, output)
    }

    /// Translate the actor record in `input` and write the result
    pub async fn translate_actor_file(
        &self,
        input: &Path,
        target_language: &str,
        output: Option<&Path>,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        let mut actor: ActorInfo = read_record(input)?;
        self.service
            .translate_actor(&mut actor, target_language, cancel)
            .await?;
        write_record(&actor, output)
    }
}
