/*!
 * Common test utilities for the metatube-translator test suite
 */

use std::sync::Arc;

use metatube_translator::app_config::{TranslationConfig, TranslationMode};
use metatube_translator::providers::mock::MockClient;
use metatube_translator::{MovieInfo, TranslationGate, TranslationService};

/// Route library logs to the test harness; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}

/// Build a service around a mock client with its own gate
pub fn service_with(client: &MockClient, config: TranslationConfig) -> TranslationService {
    TranslationService::with_gate(
        Arc::new(client.clone()),
        config.into_shared(),
        Arc::new(TranslationGate::new()),
    )
}

/// Default configuration with the given mode flags
pub fn config_with_mode(mode: TranslationMode) -> TranslationConfig {
    TranslationConfig {
        mode,
        ..TranslationConfig::default()
    }
}

/// A movie with every translatable field filled in
pub fn full_movie() -> MovieInfo {
    MovieInfo {
        title: "Title".to_string(),
        summary: "Summary".to_string(),
        director: "Director".to_string(),
        actors: vec!["Actor".to_string()],
        maker: "Maker".to_string(),
        label: "Label".to_string(),
        series: "Series".to_string(),
        genres: vec!["Action".to_string(), "Comedy".to_string()],
        ..MovieInfo::default()
    }
}
