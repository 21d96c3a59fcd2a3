//! Transport behaviour against a mock HTTP server

use asyncpay_core::config::TransportConfig;
use asyncpay_core::http::client::HttpClient;
use asyncpay_core::http::{HttpExecutor, RequestDescriptor};
use asyncpay_core::providers::aaio::AaioClient;
use asyncpay_core::providers::payok::PayokClient;
use asyncpay_core::providers::yoomoney::{Authorizer, QuickPayOptions, YoomoneyClient};
use asyncpay_core::providers::{AuthorizationErrorKind, PaymentError, ProviderKind};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn aaio(server: &MockServer) -> AaioClient {
    AaioClient::new("api-key", "42", "secret")
        .unwrap()
        .with_base_url(server.uri())
}

#[tokio::test]
async fn test_successful_form_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/balance"))
        .and(header("X-Api-Key", "api-key"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "success",
            "balance": 120.5,
            "referral": 0,
            "hold": "3.25"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let balance = aaio(&server).get_balance().await.unwrap();
    assert_eq!(balance.balance, 120.5);
    assert_eq!(balance.hold, Some(3.25));
}

#[tokio::test]
async fn test_provider_error_on_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "error",
            "message": "Invalid API key"
        })))
        .mount(&server)
        .await;

    let err = aaio(&server).get_balance().await.unwrap_err();
    assert!(matches!(err, PaymentError::Provider { provider: ProviderKind::Aaio, .. }));
    assert_eq!(err.to_string(), "[AAIO] Invalid API key");
}

#[tokio::test]
async fn test_structured_error_on_non_2xx() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/balance"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "type": "error",
            "code": 401,
            "message": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let err = aaio(&server).get_balance().await.unwrap_err();
    assert_eq!(err.to_string(), "[AAIO] Unauthorized");
}

#[tokio::test]
async fn test_unparseable_non_2xx_is_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(503)
                .insert_header("content-type", "text/html")
                .set_body_string("<html>Service Unavailable</html>"),
        )
        .mount(&server)
        .await;

    let err = aaio(&server).get_balance().await.unwrap_err();
    match err {
        PaymentError::Request { status, body, .. } => {
            assert_eq!(status, 503);
            assert!(body.contains("Service Unavailable"));
        }
        other => panic!("expected request error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_content_type_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(r#"{"type":"success","balance":1}"#),
        )
        .mount(&server)
        .await;

    let err = aaio(&server).get_balance().await.unwrap_err();
    assert!(matches!(err, PaymentError::Decode { .. }));
}

#[tokio::test]
async fn test_forced_json_parses_html_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/balance"))
        .and(body_string_contains("API_ID=7"))
        .and(body_string_contains("API_KEY=key"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(r#"{"balance":"250.00","ref_balance":"0"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = PayokClient::new("7", "key", "42", "secret")
        .unwrap()
        .with_base_url(server.uri());
    let balance = client.get_balance().await.unwrap();
    assert_eq!(balance.balance, 250.0);
    assert_eq!(balance.ref_balance, Some(0.0));
}

#[tokio::test]
async fn test_redirect_returns_final_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/quickpay/confirm"))
        .and(body_string_contains("receiver=4100"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", "/checkout/pay/abc"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/checkout/pay/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>pay</html>"))
        .mount(&server)
        .await;

    let client = YoomoneyClient::new("token")
        .unwrap()
        .with_base_url(format!("{}/api", server.uri()));
    let url = client
        .quick_pay("4100", 150.0, QuickPayOptions::default())
        .await
        .unwrap();
    assert_eq!(url, format!("{}/checkout/pay/abc", server.uri()));
}

#[tokio::test]
async fn test_timeout_maps_to_timeout_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let transport = HttpClient::with_config(TransportConfig {
        timeout_secs: Some(1),
        ..TransportConfig::default()
    });
    let err = transport
        .execute_json(
            ProviderKind::CryptoBot,
            RequestDescriptor::get(format!("{}/getMe", server.uri())),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::Timeout { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let transport = HttpClient::new();
    let err = transport
        .execute_json(
            ProviderKind::Xrocket,
            RequestDescriptor::get("http://127.0.0.1:1/app/info"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::Network { .. }));
}

#[tokio::test]
async fn test_user_agent_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "shop-bot/2.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpClient::with_config(TransportConfig {
        user_agent: "shop-bot/2.0".to_string(),
        ..TransportConfig::default()
    });
    let envelope = transport
        .execute_json(
            ProviderKind::CryptoBot,
            RequestDescriptor::get(format!("{}/getMe", server.uri())),
        )
        .await
        .unwrap();
    assert_eq!(envelope.status(), 200);
}

#[tokio::test]
async fn test_long_oauth_error_body_still_parsed() {
    let server = MockServer::start().await;
    let description = "grant expired ".repeat(400);
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("code=T1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": description
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = Authorizer::new("app-1", "https://shop.example/cb", None, vec![])
        .with_base_url(server.uri())
        .request_token("T1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PaymentError::Authorization { kind: AuthorizationErrorKind::InvalidGrant, .. }
    ));
}

#[tokio::test]
async fn test_long_error_body_kept_in_request_error() {
    let server = MockServer::start().await;
    let page = format!("<html>{}</html>", "maintenance ".repeat(500));
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string(page.clone()))
        .mount(&server)
        .await;

    let err = HttpClient::new()
        .execute_json(
            ProviderKind::CryptoBot,
            RequestDescriptor::get(format!("{}/getMe", server.uri())),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().ends_with("..."));
    match err {
        PaymentError::Request { status, body, .. } => {
            assert_eq!(status, 503);
            assert_eq!(body, page);
        }
        other => panic!("unexpected {:?}", other),
    }
}
