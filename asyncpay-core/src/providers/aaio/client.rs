//! aaio client implementation

use super::types::{Balance, CreatedWithdrawal, Order, OrderMethod, Withdrawal, WithdrawalMethod};
use crate::config::{AaioCredentials, SecretString};
use crate::http::RequestDescriptor;
use crate::protocol::Envelope;
use crate::providers::adapter::ProviderKind;
use crate::providers::context::{facade_common, validate_credentials, ApiContext};
use crate::providers::error::PaymentResult;
use crate::providers::params::{format_float, ParameterSet};
use crate::providers::signature;

/// Optional fields of a payment link
#[derive(Debug, Clone, Default)]
pub struct PaymentUrlOptions {
    /// Payment system code name
    pub method: Option<String>,
    pub desc: Option<String>,
    pub email: Option<String>,
    /// Interface language (`ru`, `en`)
    pub lang: Option<String>,
    pub referal: Option<String>,
    /// Echoed back in the payment notification
    pub us_key: Option<String>,
}

/// Client for the aaio merchant API
#[derive(Debug, Clone)]
pub struct AaioClient {
    api: ApiContext,
    api_key: SecretString,
    shop_id: String,
    secret_key: SecretString,
}

impl AaioClient {
    pub const BASE_URL: &'static str = "https://aaio.so";

    pub fn new(
        api_key: impl Into<SecretString>,
        shop_id: impl Into<String>,
        secret_key: impl Into<SecretString>,
    ) -> PaymentResult<Self> {
        Self::from_credentials(AaioCredentials {
            api_key: api_key.into(),
            shop_id: shop_id.into(),
            secret_key: secret_key.into(),
            base_url: None,
        })
    }

    pub fn from_credentials(credentials: AaioCredentials) -> PaymentResult<Self> {
        validate_credentials(ProviderKind::Aaio, &credentials)?;
        let mut api = ApiContext::new(ProviderKind::Aaio, Self::BASE_URL);
        if let Some(base_url) = &credentials.base_url {
            api.set_base_url(base_url);
        }
        Ok(Self {
            api,
            api_key: credentials.api_key,
            shop_id: credentials.shop_id,
            secret_key: credentials.secret_key,
        })
    }

    async fn post(&self, path: &str, params: ParameterSet) -> PaymentResult<Envelope> {
        let mut request = RequestDescriptor::post(self.api.url(path))
            .header("Accept", "application/json")
            .header("X-Api-Key", self.api_key.expose_secret());
        if !params.is_empty() {
            request = request.form(self.api.pairs(&params));
        }
        self.api.send(request).await
    }

    /// Create a signed payment link; `currency` defaults to RUB
    pub async fn create_payment_url(
        &self,
        amount: f64,
        order_id: &str,
        currency: Option<&str>,
        options: PaymentUrlOptions,
    ) -> PaymentResult<String> {
        let currency = currency.unwrap_or("RUB");
        let sign = signature::aaio(
            &self.shop_id,
            &format_float(amount),
            currency,
            self.secret_key.expose_secret(),
            order_id,
        );
        let params = ParameterSet::new()
            .with("merchant_id", &self.shop_id)
            .with("amount", amount)
            .with("order_id", order_id)
            .with("currency", currency)
            .with_opt("method", options.method)
            .with_opt("desc", options.desc)
            .with_opt("email", options.email)
            .with_opt("lang", options.lang)
            .with_opt("referal", options.referal)
            .with_opt("us_key", options.us_key)
            .with("sign", sign);
        self.post("/merchant/get_pay_url", params)
            .await?
            .extract("/url")
    }

    pub async fn get_balance(&self) -> PaymentResult<Balance> {
        self.post("/api/balance", ParameterSet::new()).await?.decode()
    }

    /// Order by the identifier used in your system
    pub async fn get_order_info(&self, order_id: &str) -> PaymentResult<Order> {
        let params = ParameterSet::new()
            .with("merchant_id", &self.shop_id)
            .with("order_id", order_id);
        self.post("/api/info-pay", params).await?.decode()
    }

    pub async fn get_withdrawal_methods(&self) -> PaymentResult<Vec<WithdrawalMethod>> {
        self.post("/api/methods-payoff", ParameterSet::new())
            .await?
            .extract_values("/list")
    }

    pub async fn get_withdrawal_method(&self, method: &str) -> PaymentResult<WithdrawalMethod> {
        self.post("/api/methods-payoff", ParameterSet::new())
            .await?
            .extract_entry("/list", method)
    }

    pub async fn get_order_methods(&self) -> PaymentResult<Vec<OrderMethod>> {
        self.post("/api/methods-pay", self.shop_params())
            .await?
            .extract_values("/list")
    }

    pub async fn get_order_method(&self, method: &str) -> PaymentResult<OrderMethod> {
        self.post("/api/methods-pay", self.shop_params())
            .await?
            .extract_entry("/list", method)
    }

    /// Withdrawal by the identifier used in your system
    pub async fn get_withdrawal_info(&self, my_id: &str) -> PaymentResult<Withdrawal> {
        let params = ParameterSet::new().with("my_id", my_id);
        self.post("/api/info-payoff", params).await?.decode()
    }

    /// Request a payout; `commission_type` 0 takes the fee from the amount
    pub async fn create_withdrawal(
        &self,
        my_id: &str,
        method: &str,
        amount: f64,
        wallet: &str,
        commission_type: Option<i64>,
    ) -> PaymentResult<CreatedWithdrawal> {
        let params = ParameterSet::new()
            .with("my_id", my_id)
            .with("method", method)
            .with("amount", amount)
            .with("wallet", wallet)
            .with("commission_type", commission_type.unwrap_or(0));
        self.post("/api/create-payoff", params).await?.decode()
    }

    fn shop_params(&self) -> ParameterSet {
        ParameterSet::new().with("merchant_id", &self.shop_id)
    }
}

facade_common!(AaioClient, aaio, ProviderKind::Aaio);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::error::PaymentError;
    use crate::providers::context::testing::{form, keys, value, MockTransport};
    use serde_json::json;

    fn client(transport: std::sync::Arc<MockTransport>) -> AaioClient {
        AaioClient::new("api-key", "shop1", "secret1")
            .unwrap()
            .with_transport(transport)
    }

    #[tokio::test]
    async fn test_payment_url_is_signed_over_sent_amount() {
        let transport = MockTransport::replying(vec![json!({
            "type": "success",
            "url": "https://aaio.so/merchant/pay?o=1"
        })]);
        let url = client(transport.clone())
            .create_payment_url(10.5, "order123", None, PaymentUrlOptions::default())
            .await
            .unwrap();
        assert_eq!(url, "https://aaio.so/merchant/pay?o=1");

        let request = transport.last();
        assert_eq!(request.url, "https://aaio.so/merchant/get_pay_url");
        assert_eq!(request.header_value("X-Api-Key"), Some("api-key"));
        let pairs = form(&request);
        assert_eq!(
            keys(&pairs),
            vec!["merchant_id", "amount", "order_id", "currency", "sign"]
        );
        assert_eq!(value(&pairs, "amount"), Some("10.5"));
        assert_eq!(
            value(&pairs, "sign"),
            Some("ec2f89d4a0d6d15b4ae311f975e91e5369e904ad8e5cd5d5095165d36a7f2c31")
        );
    }

    #[tokio::test]
    async fn test_error_envelope_is_provider_error() {
        let transport = MockTransport::replying(vec![json!({
            "type": "error",
            "message": "Shop not found"
        })]);
        let err = client(transport).get_balance().await.unwrap_err();
        assert_eq!(err.to_string(), "[AAIO] Shop not found");
    }

    #[tokio::test]
    async fn test_single_order_method_lookup() {
        let reply = json!({
            "type": "success",
            "list": {
                "cards_ru": {"min": {"RUB": 10}, "max": {"RUB": 100000}, "commission_percent": 3.5},
                "qiwi": {"min": {"RUB": 1}, "max": {"RUB": 15000}, "commission_percent": 2}
            }
        });
        let transport = MockTransport::replying(vec![reply.clone(), reply]);
        let aaio = client(transport.clone());

        let method = aaio.get_order_method("qiwi").await.unwrap();
        assert_eq!(method.max.rub, Some(15000.0));
        assert!(method.min.usd.is_none());

        let err = aaio.get_order_method("sbp").await.unwrap_err();
        assert!(matches!(err, PaymentError::UnexpectedResponse { .. }));
        assert_eq!(value(&form(&transport.last()), "merchant_id"), Some("shop1"));
    }

    #[tokio::test]
    async fn test_withdrawal_defaults_commission_type() {
        let transport = MockTransport::replying(vec![json!({
            "type": "success",
            "id": "w-1",
            "my_id": 7,
            "amount": "100",
            "status": "in_process"
        })]);
        let created = client(transport.clone())
            .create_withdrawal("7", "qiwi", 100.0, "79000000000", None)
            .await
            .unwrap();
        assert_eq!(created.my_id, "7");
        assert_eq!(created.amount, 100.0);
        assert_eq!(value(&form(&transport.last()), "commission_type"), Some("0"));
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(AaioClient::new("key", "", "secret").is_err());
        assert!(AaioClient::new("key", "shop", " ").is_err());
    }
}
