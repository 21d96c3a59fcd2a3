//! Crypto Pay client implementation

use super::types::{AppInfo, Balance, Check, Currency, ExchangeRate, Invoice, Items, Transfer};
use crate::config::{CryptoBotCredentials, SecretString};
use crate::http::RequestDescriptor;
use crate::protocol::Envelope;
use crate::providers::adapter::ProviderKind;
use crate::providers::context::{facade_common, validate_credentials, ApiContext};
use crate::providers::error::PaymentResult;
use crate::providers::params::ParameterSet;

/// Optional fields of `createInvoice`
#[derive(Debug, Clone, Default)]
pub struct InvoiceOptions {
    /// `crypto` (default) or `fiat`
    pub currency_type: Option<String>,
    pub asset: Option<String>,
    pub fiat: Option<String>,
    /// Assets a fiat invoice may be paid with
    pub accepted_assets: Vec<String>,
    pub description: Option<String>,
    pub hidden_message: Option<String>,
    pub paid_btn_name: Option<String>,
    pub paid_btn_url: Option<String>,
    pub payload: Option<String>,
    /// Defaults to true
    pub allow_comments: Option<bool>,
    /// Defaults to true
    pub allow_anonymous: Option<bool>,
    /// Seconds; defaults to 3600
    pub expires_in: Option<i64>,
}

/// Filters of `getInvoices`, `getChecks` and `getTransfers`
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub asset: Option<String>,
    /// Only honoured by `getInvoices`
    pub fiat: Option<String>,
    pub ids: Vec<i64>,
    pub status: Option<String>,
    pub offset: Option<i64>,
    pub count: Option<i64>,
}

/// Client for the Crypto Pay API of @CryptoBot
#[derive(Debug, Clone)]
pub struct CryptoBotClient {
    api: ApiContext,
    token: SecretString,
}

impl CryptoBotClient {
    pub const BASE_URL: &'static str = "https://pay.crypt.bot/api";
    pub const TESTNET_URL: &'static str = "https://testnet-pay.crypt.bot/api";

    pub fn new(token: impl Into<SecretString>, testnet: bool) -> PaymentResult<Self> {
        Self::from_credentials(CryptoBotCredentials {
            token: token.into(),
            testnet,
            base_url: None,
        })
    }

    pub fn from_credentials(credentials: CryptoBotCredentials) -> PaymentResult<Self> {
        validate_credentials(ProviderKind::CryptoBot, &credentials)?;
        let default_url = if credentials.testnet {
            Self::TESTNET_URL
        } else {
            Self::BASE_URL
        };
        let mut api = ApiContext::new(ProviderKind::CryptoBot, default_url);
        if let Some(base_url) = &credentials.base_url {
            api.set_base_url(base_url);
        }
        Ok(Self {
            api,
            token: credentials.token,
        })
    }

    async fn call(&self, method: &str, params: ParameterSet) -> PaymentResult<Envelope> {
        let request = RequestDescriptor::post(self.api.url(method))
            .header("Crypto-Pay-API-Token", self.token.expose_secret())
            .query(self.api.pairs(&params));
        self.api.send(request).await
    }

    /// Test the token and return basic app information
    pub async fn get_me(&self) -> PaymentResult<AppInfo> {
        self.call("getMe", ParameterSet::new())
            .await?
            .extract("/result")
    }

    pub async fn create_invoice(
        &self,
        amount: f64,
        options: InvoiceOptions,
    ) -> PaymentResult<Invoice> {
        let params = ParameterSet::new()
            .with_opt("asset", options.asset)
            .with("amount", amount)
            .with_opt("description", options.description)
            .with_opt("hidden_message", options.hidden_message)
            .with_opt("paid_btn_name", options.paid_btn_name)
            .with_opt("paid_btn_url", options.paid_btn_url)
            .with_opt("payload", options.payload)
            .with("allow_comments", options.allow_comments.unwrap_or(true))
            .with("allow_anonymous", options.allow_anonymous.unwrap_or(true))
            .with("expires_in", options.expires_in.unwrap_or(3600))
            .with_opt("fiat", options.fiat)
            .with_opt("currency_type", options.currency_type)
            .with_opt("accepted_assets", non_empty(options.accepted_assets));
        self.call("createInvoice", params)
            .await?
            .extract("/result")
    }

    pub async fn delete_invoice(&self, invoice_id: i64) -> PaymentResult<bool> {
        let params = ParameterSet::new().with("invoice_id", invoice_id);
        self.call("deleteInvoice", params)
            .await?
            .extract("/result")
    }

    pub async fn create_check(&self, amount: f64, asset: &str) -> PaymentResult<Check> {
        let params = ParameterSet::new()
            .with("amount", amount)
            .with("asset", asset);
        self.call("createCheck", params)
            .await?
            .extract("/result")
    }

    pub async fn delete_check(&self, check_id: i64) -> PaymentResult<bool> {
        let params = ParameterSet::new().with("check_id", check_id);
        self.call("deleteCheck", params)
            .await?
            .extract("/result")
    }

    /// Send coins from the app balance to a Telegram user
    ///
    /// `spend_id` makes the call idempotent: the same value is accepted once.
    pub async fn transfer(
        &self,
        user_id: i64,
        asset: &str,
        amount: f64,
        spend_id: &str,
        comment: Option<&str>,
        disable_send_notification: bool,
    ) -> PaymentResult<Transfer> {
        let params = ParameterSet::new()
            .with("user_id", user_id)
            .with("asset", asset)
            .with("amount", amount)
            .with("spend_id", spend_id)
            .with_opt("comment", comment)
            .with("disable_send_notification", disable_send_notification);
        self.call("transfer", params)
            .await?
            .extract("/result")
    }

    pub async fn get_invoices(&self, filter: ListFilter) -> PaymentResult<Vec<Invoice>> {
        let params = ParameterSet::new()
            .with_opt("asset", filter.asset)
            .with_opt("invoice_ids", joined_ids(&filter.ids))
            .with_opt("fiat", filter.fiat)
            .with_opt("status", filter.status)
            .with_opt("offset", filter.offset)
            .with_opt("count", filter.count);
        let items: Items<Invoice> = self.call("getInvoices", params).await?.extract("/result")?;
        Ok(items.items)
    }

    pub async fn get_transfers(&self, filter: ListFilter) -> PaymentResult<Vec<Transfer>> {
        let params = ParameterSet::new()
            .with_opt("asset", filter.asset)
            .with_opt("transfer_ids", joined_ids(&filter.ids))
            .with_opt("offset", filter.offset)
            .with_opt("count", filter.count);
        let items: Items<Transfer> = self.call("getTransfers", params).await?.extract("/result")?;
        Ok(items.items)
    }

    pub async fn get_checks(&self, filter: ListFilter) -> PaymentResult<Vec<Check>> {
        let params = ParameterSet::new()
            .with_opt("asset", filter.asset)
            .with_opt("check_ids", joined_ids(&filter.ids))
            .with_opt("status", filter.status)
            .with_opt("offset", filter.offset)
            .with_opt("count", filter.count);
        let items: Items<Check> = self.call("getChecks", params).await?.extract("/result")?;
        Ok(items.items)
    }

    pub async fn get_balance(&self) -> PaymentResult<Vec<Balance>> {
        self.call("getBalance", ParameterSet::new())
            .await?
            .extract("/result")
    }

    pub async fn get_exchange_rates(&self) -> PaymentResult<Vec<ExchangeRate>> {
        self.call("getExchangeRates", ParameterSet::new())
            .await?
            .extract("/result")
    }

    pub async fn get_currencies(&self) -> PaymentResult<Vec<Currency>> {
        self.call("getCurrencies", ParameterSet::new())
            .await?
            .extract("/result")
    }
}

facade_common!(CryptoBotClient, cryptobot, ProviderKind::CryptoBot);

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    (!items.is_empty()).then_some(items)
}

fn joined_ids(ids: &[i64]) -> Option<Vec<String>> {
    non_empty(ids.iter().map(ToString::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::context::testing::{keys, value, MockTransport};
    use serde_json::json;

    fn client(transport: std::sync::Arc<MockTransport>) -> CryptoBotClient {
        CryptoBotClient::new("1234:AAA", false)
            .unwrap()
            .with_transport(transport)
    }

    #[tokio::test]
    async fn test_create_invoice_defaults_and_joined_assets() {
        let transport = MockTransport::replying(vec![json!({
            "ok": true,
            "result": {"invoice_id": 5, "status": "active", "amount": "12.5", "currency_type": "fiat"}
        })]);
        let options = InvoiceOptions {
            currency_type: Some("fiat".to_string()),
            fiat: Some("USD".to_string()),
            accepted_assets: vec!["USDT".to_string(), "TON".to_string()],
            ..Default::default()
        };
        let invoice = client(transport.clone())
            .create_invoice(12.5, options)
            .await
            .unwrap();
        assert_eq!(invoice.invoice_id, 5);
        assert_eq!(invoice.amount, Some(12.5));
        assert!(invoice.bot_invoice_url.is_none());

        let request = transport.last();
        assert_eq!(request.url, "https://pay.crypt.bot/api/createInvoice");
        assert_eq!(request.header_value("Crypto-Pay-API-Token"), Some("1234:AAA"));
        assert_eq!(
            keys(&request.query),
            vec![
                "amount",
                "allow_comments",
                "allow_anonymous",
                "expires_in",
                "fiat",
                "currency_type",
                "accepted_assets"
            ]
        );
        assert_eq!(value(&request.query, "accepted_assets"), Some("USDT,TON"));
        assert_eq!(value(&request.query, "allow_comments"), Some("true"));
        assert_eq!(value(&request.query, "expires_in"), Some("3600"));
    }

    #[tokio::test]
    async fn test_not_ok_is_provider_error() {
        let transport = MockTransport::replying(vec![json!({
            "ok": false,
            "error": {"code": 401, "name": "UNAUTHORIZED"}
        })]);
        let err = client(transport).get_me().await.unwrap_err();
        assert_eq!(err.to_string(), "[CryptoBot] UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_empty_item_list() {
        let transport = MockTransport::replying(vec![json!({"ok": true, "result": {"items": []}})]);
        let checks = client(transport.clone())
            .get_checks(ListFilter {
                ids: vec![1, 2],
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(checks.is_empty());
        assert_eq!(value(&transport.last().query, "check_ids"), Some("1,2"));
    }

    #[test]
    fn test_testnet_base_url() {
        let bot = CryptoBotClient::new("1:AA", true).unwrap();
        assert_eq!(bot.base_url(), CryptoBotClient::TESTNET_URL);
        assert!(CryptoBotClient::new("", false).is_err());
    }
}
