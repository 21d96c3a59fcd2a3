//! cryptomus client implementation

use super::types::{
    Balances, BlockedAddressRefund, BlockedWallet, Discount, ExchangeRate, Payment,
    PaymentHistory, Payout, PayoutHistory, QrCode, Recurrence, RecurrenceList, Service,
    StaticWallet, WalletTransfer,
};
use crate::config::{CryptomusCredentials, SecretString};
use crate::http::RequestDescriptor;
use crate::protocol::Envelope;
use crate::providers::adapter::ProviderKind;
use crate::providers::context::{facade_common, validate_credentials, ApiContext};
use crate::providers::error::PaymentResult;
use crate::providers::params::ParameterSet;
use crate::providers::signature;
use reqwest::Method;
use serde_json::{json, Value};

/// Which API key signs a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SigningKey {
    Payment,
    Payout,
}

/// Invoice, wallet or recurrence identified by its uuid or your order id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Uuid(String),
    OrderId(String),
}

impl Reference {
    fn params(&self) -> ParameterSet {
        match self {
            Reference::Uuid(uuid) => ParameterSet::new().with("uuid", uuid),
            Reference::OrderId(order_id) => ParameterSet::new().with("order_id", order_id),
        }
    }
}

/// A currency, optionally pinned to one network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyNetwork {
    pub currency: String,
    pub network: Option<String>,
}

impl CurrencyNetwork {
    fn to_json(&self) -> Value {
        match &self.network {
            Some(network) => json!({"currency": self.currency, "network": network}),
            None => json!({"currency": self.currency}),
        }
    }
}

/// Optional fields of an invoice
#[derive(Debug, Clone, Default)]
pub struct PaymentOptions {
    pub network: Option<String>,
    pub url_return: Option<String>,
    pub url_success: Option<String>,
    pub url_callback: Option<String>,
    /// Defaults to true
    pub is_payment_multiple: Option<bool>,
    /// Seconds, 300..=43200; defaults to 3600
    pub lifetime: Option<i64>,
    pub to_currency: Option<String>,
    /// Share of the fee charged to the payer, 0..=100; defaults to 0
    pub subtract: Option<i64>,
    /// Accepted underpayment, 0..=5 percent; defaults to 0
    pub accuracy_payment_percent: Option<f64>,
    pub additional_data: Option<String>,
    pub currencies: Vec<CurrencyNetwork>,
    pub except_currencies: Vec<CurrencyNetwork>,
    pub course_source: Option<String>,
    pub from_referral_code: Option<String>,
    pub discount_percent: Option<i64>,
    /// Defaults to false
    pub is_refresh: Option<bool>,
}

/// Optional fields of a payout
#[derive(Debug, Clone, Default)]
pub struct PayoutOptions {
    pub url_callback: Option<String>,
    pub to_currency: Option<String>,
    pub course_source: Option<String>,
    pub from_currency: Option<String>,
    pub priority: Option<String>,
    pub memo: Option<String>,
}

/// Optional fields of a recurring payment
#[derive(Debug, Clone, Default)]
pub struct RecurrenceOptions {
    pub to_currency: Option<String>,
    pub order_id: Option<String>,
    pub url_callback: Option<String>,
    pub discount_days: Option<i64>,
    pub discount_amount: Option<String>,
    pub additional_data: Option<String>,
}

/// Webhook family to simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookKind {
    Payment,
    Wallet,
    Payout,
}

impl WebhookKind {
    fn path(&self) -> &'static str {
        match self {
            WebhookKind::Payment => "/test-webhook/payment",
            WebhookKind::Wallet => "/test-webhook/wallet",
            WebhookKind::Payout => "/test-webhook/payout",
        }
    }
}

/// Client for the cryptomus merchant API
#[derive(Debug, Clone)]
pub struct CryptomusClient {
    api: ApiContext,
    merchant_id: String,
    payment_api_key: SecretString,
    payout_api_key: SecretString,
}

impl CryptomusClient {
    pub const BASE_URL: &'static str = "https://api.cryptomus.com/v1";

    pub fn new(
        merchant_id: impl Into<String>,
        payment_api_key: impl Into<SecretString>,
        payout_api_key: impl Into<SecretString>,
    ) -> PaymentResult<Self> {
        Self::from_credentials(CryptomusCredentials {
            merchant_id: merchant_id.into(),
            payment_api_key: payment_api_key.into(),
            payout_api_key: payout_api_key.into(),
            base_url: None,
        })
    }

    pub fn from_credentials(credentials: CryptomusCredentials) -> PaymentResult<Self> {
        validate_credentials(ProviderKind::Cryptomus, &credentials)?;
        let mut api = ApiContext::new(ProviderKind::Cryptomus, Self::BASE_URL);
        if let Some(base_url) = &credentials.base_url {
            api.set_base_url(base_url);
        }
        Ok(Self {
            api,
            merchant_id: credentials.merchant_id,
            payment_api_key: credentials.payment_api_key,
            payout_api_key: credentials.payout_api_key,
        })
    }

    /// Sign the exact body text that goes on the wire
    async fn call(
        &self,
        method: Method,
        path: &str,
        cursor: Option<&str>,
        params: ParameterSet,
        key: SigningKey,
    ) -> PaymentResult<Envelope> {
        let body = if params.is_empty() {
            String::new()
        } else {
            params.to_json_string()
        };
        let key = match key {
            SigningKey::Payment => &self.payment_api_key,
            SigningKey::Payout => &self.payout_api_key,
        };
        let sign = signature::cryptomus(&body, key.expose_secret());

        let mut request = RequestDescriptor::new(method, self.api.url(path))
            .header("merchant", &self.merchant_id)
            .header("sign", sign);
        if let Some(cursor) = cursor {
            request = request.query(vec![("cursor".to_string(), cursor.to_string())]);
        }
        if !body.is_empty() {
            request = request.json(body);
        }
        self.api.send(request).await
    }

    async fn post(&self, path: &str, params: ParameterSet, key: SigningKey) -> PaymentResult<Envelope> {
        self.call(Method::POST, path, None, params, key).await
    }

    fn accepted(envelope: &Envelope) -> bool {
        envelope.body().get("state").and_then(Value::as_i64) == Some(0)
    }

    pub async fn get_balance(&self) -> PaymentResult<Balances> {
        self.post("/balance", ParameterSet::new(), SigningKey::Payment)
            .await?
            .extract("/result/0/balance")
    }

    /// Create an invoice; `amount` is sent as given (`"10.28"`)
    pub async fn create_payment(
        &self,
        amount: &str,
        currency: &str,
        order_id: &str,
        options: PaymentOptions,
    ) -> PaymentResult<Payment> {
        let params = ParameterSet::new()
            .with("amount", amount)
            .with("currency", currency)
            .with("order_id", order_id)
            .with_opt("network", options.network)
            .with_opt("url_return", options.url_return)
            .with_opt("url_success", options.url_success)
            .with_opt("url_callback", options.url_callback)
            .with(
                "is_payment_multiple",
                options.is_payment_multiple.unwrap_or(true),
            )
            .with("lifetime", options.lifetime.unwrap_or(3600))
            .with_opt("to_currency", options.to_currency)
            .with("subtract", options.subtract.unwrap_or(0))
            .with(
                "accuracy_payment_percent",
                options.accuracy_payment_percent.unwrap_or(0.0),
            )
            .with_opt("additional_data", options.additional_data)
            .with_opt("currencies", currency_list(&options.currencies))
            .with_opt("except_currencies", currency_list(&options.except_currencies))
            .with_opt("course_source", options.course_source)
            .with_opt("from_referral_code", options.from_referral_code)
            .with_opt("discount_percent", options.discount_percent)
            .with("is_refresh", options.is_refresh.unwrap_or(false));
        self.post("/payment", params, SigningKey::Payment)
            .await?
            .extract("/result")
    }

    pub async fn payment_info(&self, reference: &Reference) -> PaymentResult<Payment> {
        self.post("/payment/info", reference.params(), SigningKey::Payment)
            .await?
            .extract("/result")
    }

    pub async fn payment_history(
        &self,
        date_from: Option<&str>,
        date_to: Option<&str>,
        cursor: Option<&str>,
    ) -> PaymentResult<PaymentHistory> {
        let params = ParameterSet::new()
            .with_opt("date_from", date_from)
            .with_opt("date_to", date_to);
        self.call(Method::POST, "/payment/list", cursor, params, SigningKey::Payment)
            .await?
            .extract("/result")
    }

    pub async fn list_of_services(&self) -> PaymentResult<Vec<Service>> {
        self.post("/payment/services", ParameterSet::new(), SigningKey::Payment)
            .await?
            .extract("/result")
    }

    /// Refund a paid invoice to `address`
    ///
    /// With `is_subtract` the fee comes from the merchant balance, otherwise
    /// from the refunded amount.
    pub async fn refund(
        &self,
        address: &str,
        is_subtract: bool,
        reference: &Reference,
    ) -> PaymentResult<bool> {
        let params = ParameterSet::new()
            .with("address", address)
            .with("is_subtract", is_subtract)
            .extend(reference.params());
        let envelope = self.post("/payment/refund", params, SigningKey::Payment).await?;
        Ok(Self::accepted(&envelope))
    }

    pub async fn resend_webhook(&self, reference: &Reference) -> PaymentResult<bool> {
        let envelope = self
            .post("/payment/resend", reference.params(), SigningKey::Payment)
            .await?;
        Ok(Self::accepted(&envelope))
    }

    /// Ask cryptomus to send a sample webhook to `url_callback`
    pub async fn test_webhook(
        &self,
        kind: WebhookKind,
        url_callback: &str,
        currency: &str,
        network: &str,
        status: &str,
        reference: Option<&Reference>,
    ) -> PaymentResult<bool> {
        let mut params = ParameterSet::new()
            .with("url_callback", url_callback)
            .with("currency", currency)
            .with("network", network)
            .with("status", status);
        if let Some(reference) = reference {
            params = params.extend(reference.params());
        }
        let envelope = self.post(kind.path(), params, SigningKey::Payment).await?;
        Ok(Self::accepted(&envelope))
    }

    pub async fn generate_static_wallet(
        &self,
        currency: &str,
        network: &str,
        order_id: &str,
        url_callback: Option<&str>,
        from_referral_code: Option<&str>,
    ) -> PaymentResult<StaticWallet> {
        let params = ParameterSet::new()
            .with("currency", currency)
            .with("network", network)
            .with("order_id", order_id)
            .with_opt("url_callback", url_callback)
            .with_opt("from_referral_code", from_referral_code);
        self.post("/wallet", params, SigningKey::Payment)
            .await?
            .extract("/result")
    }

    pub async fn generate_qr_code_for_wallet(&self, wallet_address_uuid: &str) -> PaymentResult<QrCode> {
        let params = ParameterSet::new().with("wallet_address_uuid", wallet_address_uuid);
        self.post("/wallet/qr", params, SigningKey::Payment)
            .await?
            .extract("/result")
    }

    pub async fn generate_qr_code_for_invoice(&self, merchant_payment_uuid: &str) -> PaymentResult<QrCode> {
        let params = ParameterSet::new().with("merchant_payment_uuid", merchant_payment_uuid);
        self.post("/payment/qr", params, SigningKey::Payment)
            .await?
            .extract("/result")
    }

    pub async fn block_static_wallet(
        &self,
        reference: &Reference,
        is_force_refund: bool,
    ) -> PaymentResult<BlockedWallet> {
        let params = reference.params().with("is_force_refund", is_force_refund);
        self.post("/wallet/block-address", params, SigningKey::Payment)
            .await?
            .extract("/result")
    }

    /// Send everything received on a blocked static wallet to `address`
    pub async fn refund_payments_on_blocked_address(
        &self,
        address: &str,
        reference: &Reference,
    ) -> PaymentResult<BlockedAddressRefund> {
        let params = ParameterSet::new()
            .with("address", address)
            .extend(reference.params());
        self.post("/blocked-address-refund", params, SigningKey::Payment)
            .await?
            .extract("/result")
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_payout(
        &self,
        amount: &str,
        currency: &str,
        order_id: &str,
        address: &str,
        is_subtract: bool,
        network: &str,
        options: PayoutOptions,
    ) -> PaymentResult<Payout> {
        let params = ParameterSet::new()
            .with("amount", amount)
            .with("currency", currency)
            .with("order_id", order_id)
            .with("address", address)
            .with("is_subtract", is_subtract)
            .with("network", network)
            .with_opt("url_callback", options.url_callback)
            .with_opt("to_currency", options.to_currency)
            .with_opt("course_source", options.course_source)
            .with_opt("from_currency", options.from_currency)
            .with_opt("priority", options.priority)
            .with_opt("memo", options.memo);
        self.post("/payout", params, SigningKey::Payout)
            .await?
            .extract("/result")
    }

    pub async fn payout_info(&self, reference: &Reference) -> PaymentResult<Payout> {
        self.post("/payout/info", reference.params(), SigningKey::Payout)
            .await?
            .extract("/result")
    }

    pub async fn payout_history(
        &self,
        date_from: Option<&str>,
        date_to: Option<&str>,
        cursor: Option<&str>,
    ) -> PaymentResult<PayoutHistory> {
        let params = ParameterSet::new()
            .with_opt("date_from", date_from)
            .with_opt("date_to", date_to);
        self.call(Method::POST, "/payout/list", cursor, params, SigningKey::Payout)
            .await?
            .extract("/result")
    }

    pub async fn list_of_services_payout(&self) -> PaymentResult<Vec<Service>> {
        self.post("/payout/services", ParameterSet::new(), SigningKey::Payout)
            .await?
            .extract("/result")
    }

    /// Move funds from the business to the personal wallet
    pub async fn transfer_to_personal_wallet(
        &self,
        amount: &str,
        currency: &str,
    ) -> PaymentResult<WalletTransfer> {
        self.transfer("/transfer/to-personal", amount, currency).await
    }

    /// Move funds from the personal to the business wallet
    pub async fn transfer_to_business_wallet(
        &self,
        amount: &str,
        currency: &str,
    ) -> PaymentResult<WalletTransfer> {
        self.transfer("/transfer/to-business", amount, currency).await
    }

    async fn transfer(&self, path: &str, amount: &str, currency: &str) -> PaymentResult<WalletTransfer> {
        let params = ParameterSet::new()
            .with("amount", amount)
            .with("currency", currency);
        self.post(path, params, SigningKey::Payout)
            .await?
            .extract("/result")
    }

    /// Create a subscription; `period` is `weekly`, `monthly`, ...
    pub async fn create_recurring_payment(
        &self,
        amount: &str,
        currency: &str,
        name: &str,
        period: &str,
        options: RecurrenceOptions,
    ) -> PaymentResult<Recurrence> {
        let params = ParameterSet::new()
            .with("amount", amount)
            .with("currency", currency)
            .with("name", name)
            .with("period", period)
            .with_opt("to_currency", options.to_currency)
            .with_opt("order_id", options.order_id)
            .with_opt("url_callback", options.url_callback)
            .with_opt("discount_days", options.discount_days)
            .with_opt("discount_amount", options.discount_amount)
            .with_opt("additional_data", options.additional_data);
        self.post("/recurrence/create", params, SigningKey::Payment)
            .await?
            .extract("/result")
    }

    pub async fn recurring_payment_info(&self, reference: &Reference) -> PaymentResult<Recurrence> {
        self.post("/recurrence/info", reference.params(), SigningKey::Payment)
            .await?
            .extract("/result")
    }

    pub async fn list_of_recurring_payments(&self, cursor: Option<&str>) -> PaymentResult<RecurrenceList> {
        self.call(
            Method::POST,
            "/recurrence/list",
            cursor,
            ParameterSet::new(),
            SigningKey::Payment,
        )
        .await?
        .extract("/result")
    }

    pub async fn cancel_recurring_payment(&self, reference: &Reference) -> PaymentResult<Recurrence> {
        self.post("/recurrence/cancel", reference.params(), SigningKey::Payment)
            .await?
            .extract("/result")
    }

    /// Rates from `currency` to every supported target
    pub async fn exchange_rates_list(&self, currency: &str) -> PaymentResult<Vec<ExchangeRate>> {
        let path = format!("/exchange-rate/{currency}/list");
        self.call(Method::GET, &path, None, ParameterSet::new(), SigningKey::Payment)
            .await?
            .extract("/result")
    }

    pub async fn list_of_discounts(&self) -> PaymentResult<Vec<Discount>> {
        self.post("/payment/discount/list", ParameterSet::new(), SigningKey::Payment)
            .await?
            .extract("/result")
    }

    /// Positive values discount the method, negative ones add a fee
    pub async fn set_discount_to_payment_method(
        &self,
        currency: &str,
        network: &str,
        discount_percent: i64,
    ) -> PaymentResult<Discount> {
        let params = ParameterSet::new()
            .with("currency", currency)
            .with("network", network)
            .with("discount_percent", discount_percent);
        self.post("/payment/discount/set", params, SigningKey::Payment)
            .await?
            .extract("/result")
    }
}

facade_common!(CryptomusClient, cryptomus, ProviderKind::Cryptomus);

fn currency_list(items: &[CurrencyNetwork]) -> Option<Value> {
    (!items.is_empty()).then(|| Value::Array(items.iter().map(CurrencyNetwork::to_json).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::RequestBody;
    use crate::providers::context::testing::{json_body, MockTransport};
    use crate::providers::error::PaymentError;

    fn client(transport: std::sync::Arc<MockTransport>) -> CryptomusClient {
        CryptomusClient::new("merchant-1", "paykey", "payoutkey")
            .unwrap()
            .with_transport(transport)
    }

    #[tokio::test]
    async fn test_payout_namespace_signs_with_payout_key() {
        let reply = json!({
            "state": 0,
            "result": {
                "user_wallet_transaction_uuid": "u1",
                "user_wallet_balance": "5.00",
                "merchant_transaction_uuid": "m1",
                "merchant_balance": "95.00"
            }
        });
        let transport = MockTransport::replying(vec![reply]);
        let transfer = client(transport.clone())
            .transfer_to_personal_wallet("10", "USDT")
            .await
            .unwrap();
        assert_eq!(transfer.merchant_balance, Some(95.0));

        let request = transport.last();
        assert_eq!(request.url, "https://api.cryptomus.com/v1/transfer/to-personal");
        assert_eq!(request.header_value("merchant"), Some("merchant-1"));
        assert_eq!(
            request.body,
            RequestBody::Json(r#"{"amount":"10","currency":"USDT"}"#.to_string())
        );
        assert_eq!(
            request.header_value("sign"),
            Some("a7cbba81061dea380bbd71ebc6983d6d")
        );
    }

    #[tokio::test]
    async fn test_empty_body_signs_key_alone() {
        let transport = MockTransport::replying(vec![json!({
            "state": 0,
            "result": [{"balance": {"merchant": [], "user": [
                {"uuid": "b1", "balance": "1.5", "currency_code": "USDT", "balance_usd": "1.5"}
            ]}}]
        })]);
        let balances = client(transport.clone()).get_balance().await.unwrap();
        assert!(balances.merchant.is_empty());
        assert_eq!(balances.user[0].balance, 1.5);

        let request = transport.last();
        assert_eq!(request.body, RequestBody::Empty);
        assert_eq!(
            request.header_value("sign"),
            Some("c387bfee685058b13dd97c15d150a44e")
        );
    }

    #[tokio::test]
    async fn test_create_payment_body_keeps_defaults_and_order() {
        let transport = MockTransport::replying(vec![json!({
            "state": 0,
            "result": {"uuid": "inv-1", "order_id": "o1", "payment_status": "check", "amount": "15"}
        })]);
        let options = PaymentOptions {
            currencies: vec![CurrencyNetwork {
                currency: "USDT".to_string(),
                network: Some("TRON".to_string()),
            }],
            ..Default::default()
        };
        let payment = client(transport.clone())
            .create_payment("15", "USD", "o1", options)
            .await
            .unwrap();
        assert_eq!(payment.uuid, "inv-1");
        assert!(!payment.payment_status.is_paid());

        let body = json_body(&transport.last());
        let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "amount",
                "currency",
                "order_id",
                "is_payment_multiple",
                "lifetime",
                "subtract",
                "accuracy_payment_percent",
                "currencies",
                "is_refresh"
            ]
        );
        assert_eq!(body["currencies"][0]["network"], "TRON");
        assert_eq!(body["is_payment_multiple"], true);
    }

    #[tokio::test]
    async fn test_validation_errors_are_formatted() {
        let transport = MockTransport::replying(vec![json!({
            "state": 1,
            "errors": {"amount": ["validation.required"]}
        })]);
        let err = client(transport)
            .payment_info(&Reference::OrderId("o1".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Provider { .. }));
        assert!(err.to_string().contains("amount"));
    }

    #[tokio::test]
    async fn test_cursor_goes_to_query() {
        let transport = MockTransport::replying(vec![json!({
            "state": 0,
            "result": {"items": [], "paginate": {"count": 0, "hasPages": false, "nextCursor": null}}
        })]);
        let history = client(transport.clone())
            .payout_history(None, None, Some("abc"))
            .await
            .unwrap();
        assert!(history.items.is_empty());
        assert_eq!(history.paginate.unwrap().has_pages, Some(false));
        assert_eq!(
            transport.last().query,
            vec![("cursor".to_string(), "abc".to_string())]
        );
    }
}
