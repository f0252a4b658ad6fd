/*!
 * Integration tests for config bootstrap and record file translation
 */

use serde_json::{json, Value};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;
use tokio_util::sync::CancellationToken;

use metatube_translator::app_config::{Config, LogLevel, TranslationEngine, TranslationMode};
use metatube_translator::app_controller::{load_config, read_record, ConfigOverrides, Controller};
use metatube_translator::providers::mock::MockClient;
use metatube_translator::{AppError, MovieInfo};

#[test]
fn test_loadConfig_withMissingFile_shouldCreateDefault() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.json");

    let config = load_config(&path, &ConfigOverrides::default()).unwrap();

    assert!(path.exists(), "default config should be written");
    let written = Config::from_file(&path).unwrap();
    assert_eq!(written.translation.engine, TranslationEngine::GoogleFree);
    assert_eq!(written.translation.mode, TranslationMode::TITLE);
    assert_eq!(config.server.url, written.server.url);
}

#[test]
fn test_loadConfig_engineOverrideWithoutCredential_shouldFailValidation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.json");
    Config::default().save(&path).unwrap();

    let overrides = ConfigOverrides {
        engine: Some(TranslationEngine::DeepL),
        log_level: None,
    };
    let result = load_config(&path, &overrides);

    match result {
        Err(AppError::Config(message)) => assert!(message.contains("deepl_api_key"), "{}", message),
        other => panic!("expected a config error, got {:?}", other),
    }
}

#[test]
fn test_loadConfig_overrides_shouldReplaceFileValues() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.json");
    let mut config = Config::default();
    config.translation.credentials.deepl_api_key = "key".to_string();
    config.save(&path).unwrap();

    let overrides = ConfigOverrides {
        engine: Some(TranslationEngine::DeepL),
        log_level: Some(LogLevel::Debug),
    };
    let loaded = load_config(&path, &overrides).unwrap();

    assert_eq!(loaded.translation.engine, TranslationEngine::DeepL);
    assert_eq!(loaded.log_level, LogLevel::Debug);
}

#[test]
fn test_readRecord_withInvalidJson_shouldReturnFileError() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("movie.json");
    fs::write(&path, "{ broken").unwrap();

    let result: Result<MovieInfo, _> = read_record(&path);

    assert!(matches!(result, Err(AppError::File(_))));
}

#[tokio::test]
async fn test_translateMovieFile_shouldKeepUnknownFields() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("movie.json");
    let output = dir.path().join("movie.en.json");
    fs::write(
        &input,
        json!({
            "id": "ABC-123",
            "provider": "FANZA",
            "title": "Title",
            "director": "Director",
            "score": 4.5,
            "preview_images": ["a.jpg", "b.jpg"]
        })
        .to_string(),
    )
    .unwrap();

    let client = MockClient::working();
    let controller = Controller::with_client(&Config::default(), Arc::new(client.clone()));
    controller
        .translate_movie_file(&input, "en", Some(&output), &CancellationToken::new())
        .await
        .unwrap();

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["title"], "Title-en");
    assert_eq!(written["director"], "Director-en");
    assert_eq!(written["id"], "ABC-123");
    assert_eq!(written["provider"], "FANZA");
    assert_eq!(written["score"], 4.5);
    assert_eq!(written["preview_images"], json!(["a.jpg", "b.jpg"]));
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_translateActorFile_withJapaneseTarget_shouldNotWriteOutput() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("actor.json");
    let output = dir.path().join("actor.ja.json");
    fs::write(&input, json!({ "name": "Name", "id": "42" }).to_string()).unwrap();

    let client = MockClient::working();
    let controller = Controller::with_client(&Config::default(), Arc::new(client.clone()));
    let result = controller
        .translate_actor_file(&input, "ja", Some(&output), &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(AppError::Translation(_))));
    assert!(!output.exists());
    assert_eq!(client.call_count(), 0);
}
