/*!
 * Tests for the MetaTube translation client against a mock HTTP server
 */

use serde_json::json;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use metatube_translator::app_config::{ProviderCredentials, ServerConfig, TranslationEngine};
use metatube_translator::providers::TranslationClient;
use metatube_translator::providers::metatube::MetaTubeClient;
use metatube_translator::translation::ProviderParameters;
use metatube_translator::ProviderError;

fn baidu_parameters() -> ProviderParameters {
    let credentials = ProviderCredentials {
        baidu_app_id: "app-id".to_string(),
        baidu_app_key: "app-key".to_string(),
        ..ProviderCredentials::default()
    };
    ProviderParameters::for_engine(TranslationEngine::Baidu, &credentials).unwrap()
}

fn client_for(server: &MockServer, token: &str) -> MetaTubeClient {
    MetaTubeClient::new(&server.uri(), token, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_translate_withSuccessfulResponse_shouldReturnTranslatedText() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/translate"))
        .and(query_param("q", "こんにちは"))
        .and(query_param("from", "auto"))
        .and(query_param("to", "en"))
        .and(query_param("engine", "Baidu"))
        .and(query_param("baidu-app-id", "app-id"))
        .and(query_param("baidu-app-key", "app-key"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "translated_text": "Hello" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "secret-token");
    let result = tokio_test::assert_ok!(
        client
            .translate("こんにちは", "auto", "en", "Baidu", &baidu_parameters(), &CancellationToken::new())
            .await
    );

    assert_eq!(result.translated_text, "Hello");
}

#[tokio::test]
async fn test_translate_withServerError_shouldReturnApiError() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/translate"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": 500, "message": "engine unavailable" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let result = client
        .translate("text", "auto", "en", "Baidu", &baidu_parameters(), &CancellationToken::new())
        .await;

    assert_eq!(
        result,
        Err(ProviderError::ApiError {
            status_code: 500,
            message: "engine unavailable".to_string()
        })
    );
}

#[tokio::test]
async fn test_translate_withErrorEnvelopeOnSuccessStatus_shouldReturnApiError() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "code": 400, "message": "unsupported language" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let result = client
        .translate("text", "auto", "xx", "Baidu", &baidu_parameters(), &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(ProviderError::ApiError { status_code: 400, .. })));
}

#[tokio::test]
async fn test_translate_withLargeErrorCodeOnSuccessStatus_shouldFallBackToHttpStatus() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "code": 100001, "message": "quota exceeded" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let result = client
        .translate("text", "auto", "en", "Baidu", &baidu_parameters(), &CancellationToken::new())
        .await;

    assert_eq!(
        result,
        Err(ProviderError::ApiError {
            status_code: 200,
            message: "quota exceeded".to_string()
        })
    );
}

#[tokio::test]
async fn test_translate_withMalformedBody_shouldReturnParseError() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let result = client
        .translate("text", "auto", "en", "Baidu", &baidu_parameters(), &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(ProviderError::ParseError(_))));
}

#[tokio::test]
async fn test_translate_withoutToken_shouldNotSendAuthorizationHeader() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "translated_text": "ok" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    client
        .translate("text", "auto", "en", "GoogleFree", &baidu_parameters(), &CancellationToken::new())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_translate_whenCancelled_shouldAbortRequest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "translated_text": "late" } }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            cancel.cancel();
        });
    }

    let result = tokio::time::timeout(
        Duration::from_secs(2),
        client.translate("text", "auto", "en", "Baidu", &baidu_parameters(), &cancel),
    )
    .await
    .expect("cancellation should end the request early");

    assert_eq!(result, Err(ProviderError::Aborted));
}

#[tokio::test]
async fn test_fromConfig_unreachableServer_shouldReturnConnectionError() {
    let config = ServerConfig {
        url: "http://127.0.0.1:9".to_string(),
        token: String::new(),
        timeout_secs: 2,
    };
    let client = MetaTubeClient::from_config(&config).unwrap();

    let result = client
        .translate("text", "auto", "en", "Baidu", &baidu_parameters(), &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
}
