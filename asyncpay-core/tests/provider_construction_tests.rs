//! Facade construction, config wiring and end-to-end signing

use asyncpay_core::config::{
    AaioCredentials, ConfigError, CryptoBotCredentials, PaymentsConfig, PlategaCredentials,
    XrocketCredentials,
};
use asyncpay_core::providers::crystalpay::CrystalPayClient;
use asyncpay_core::providers::signature;
use asyncpay_core::providers::{
    AaioClient, APaysClient, CryptoBotClient, CryptomusClient, FreeKassaClient, LolzClient,
    PaymentError, PayokClient, PlategaClient, RuKassaClient, XrocketClient, YoomoneyClient,
};
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn missing_field(err: PaymentError) -> String {
    match err {
        PaymentError::Config(ConfigError::ValidationError(e)) => e.field_path,
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test_case("", "42", "secret", "aaio.api_key" ; "empty api key")]
#[test_case("key", "", "secret", "aaio.shop_id" ; "empty shop id")]
#[test_case("key", "42", "  ", "aaio.secret_key" ; "blank secret")]
fn test_aaio_rejects_empty_credentials(api_key: &str, shop_id: &str, secret: &str, field: &str) {
    let err = AaioClient::new(api_key, shop_id, secret).unwrap_err();
    assert_eq!(missing_field(err), field);
}

#[test_case(|| APaysClient::new("", "s").map(drop), "apays.client_id" ; "apays")]
#[test_case(|| CryptoBotClient::new("", false).map(drop), "cryptobot.token" ; "cryptobot")]
#[test_case(|| CryptomusClient::new("m", "", "p").map(drop), "cryptomus.payment_api_key" ; "cryptomus")]
#[test_case(|| CrystalPayClient::new("shop", "secret", " ").map(drop), "crystalpay.salt" ; "crystalpay")]
#[test_case(|| FreeKassaClient::new("1", "").map(drop), "freekassa.api_key" ; "freekassa")]
#[test_case(|| LolzClient::new("").map(drop), "lolz.token" ; "lolz")]
#[test_case(|| PayokClient::new("7", "key", "", "secret").map(drop), "payok.shop_id" ; "payok")]
#[test_case(|| PlategaClient::new("", "s").map(drop), "platega.merchant_id" ; "platega")]
#[test_case(|| RuKassaClient::new("7", "tok", "shop@example.com", "").map(drop), "rukassa.password" ; "rukassa")]
#[test_case(|| XrocketClient::new("").map(drop), "xrocket.api_key" ; "xrocket")]
#[test_case(|| YoomoneyClient::new("  ").map(drop), "yoomoney.access_token" ; "yoomoney")]
fn test_facade_rejects_blank_credential(build: fn() -> Result<(), PaymentError>, field: &str) {
    assert_eq!(missing_field(build().unwrap_err()), field);
}

#[test_case(false, "https://pay.crypt.bot/api" ; "mainnet")]
#[test_case(true, "https://testnet-pay.crypt.bot/api" ; "testnet")]
fn test_cryptobot_network_selection(testnet: bool, expected: &str) {
    let client = CryptoBotClient::new("1:AA", testnet).unwrap();
    assert_eq!(client.base_url(), expected);
}

#[test]
fn test_credentials_base_url_override() {
    let client = XrocketClient::from_credentials(XrocketCredentials {
        api_key: "key".into(),
        base_url: Some("http://localhost:9000".to_string()),
    })
    .unwrap();
    assert_eq!(client.base_url(), "http://localhost:9000");
}

#[test]
fn test_from_config_missing_section() {
    let config = PaymentsConfig {
        platega: Some(PlategaCredentials {
            merchant_id: "m".to_string(),
            secret_key: "s".into(),
            base_url: None,
        }),
        ..PaymentsConfig::default()
    };
    assert!(PlategaClient::from_config(&config).is_ok());
    match AaioClient::from_config(&config) {
        Err(PaymentError::Config(ConfigError::ProviderNotConfigured { provider })) => {
            assert_eq!(provider, "aaio");
        }
        other => panic!("expected missing section, got {:?}", other),
    }
}

#[test]
fn test_from_config_applies_section() {
    let config = PaymentsConfig {
        aaio: Some(AaioCredentials {
            api_key: "key".into(),
            shop_id: "42".to_string(),
            secret_key: "secret".into(),
            base_url: Some("http://127.0.0.1:8080".to_string()),
        }),
        cryptobot: Some(CryptoBotCredentials {
            token: "1:AA".into(),
            testnet: true,
            base_url: None,
        }),
        ..PaymentsConfig::default()
    };
    assert_eq!(AaioClient::from_config(&config).unwrap().base_url(), "http://127.0.0.1:8080");
    assert_eq!(
        CryptoBotClient::from_config(&config).unwrap().base_url(),
        CryptoBotClient::TESTNET_URL
    );
}

#[test]
fn test_lolz_rejects_malformed_token() {
    let err = LolzClient::new("not-a-jwt").unwrap_err();
    assert!(matches!(err, PaymentError::IncorrectToken { .. }));
}

#[tokio::test]
async fn test_cryptomus_signs_wire_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/balance"))
        .and(header("merchant", "merchant-1"))
        .and(header("sign", signature::cryptomus("", "pay-key").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": 0,
            "result": [{
                "balance": {
                    "merchant": [{"balance": "1.50", "currency_code": "USDT"}],
                    "user": []
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CryptomusClient::new("merchant-1", "pay-key", "payout-key")
        .unwrap()
        .with_base_url(server.uri());
    let balances = client.get_balance().await.unwrap();
    assert_eq!(balances.merchant.len(), 1);
    assert_eq!(balances.merchant[0].balance, 1.5);
    assert!(balances.user.is_empty());
}

#[tokio::test]
async fn test_crystalpay_auth_and_error_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/balance/info/"))
        .and(body_json(json!({
            "auth_login": "shop",
            "auth_secret": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": true,
            "errors": ["Invalid auth", "Second"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CrystalPayClient::new("shop", "secret", "salt")
        .unwrap()
        .with_base_url(server.uri());
    let err = client.get_balance().await.unwrap_err();
    assert_eq!(err.to_string(), "[CrystalPay] Invalid auth");
}

#[tokio::test]
async fn test_xrocket_header_and_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/info"))
        .and(header("Rocket-Pay-Key", "rocket-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "name": "shop",
                "feePercents": 1.5,
                "balances": [{"currency": "TONCOIN", "balance": 2.5}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = XrocketClient::new("rocket-key")
        .unwrap()
        .with_base_url(server.uri());
    let info = client.get_app_info().await.unwrap();
    assert_eq!(info.name, "shop");
    assert_eq!(info.balances.len(), 1);
}
