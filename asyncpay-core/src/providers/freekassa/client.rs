//! freeKassa client implementation

use super::types::{
    Balance, CreatedOrder, CreatedWithdrawal, Currency, Orders, Shop, WithdrawalCurrency,
    Withdrawals,
};
use crate::config::{FreeKassaCredentials, SecretString};
use crate::http::RequestDescriptor;
use crate::protocol::Envelope;
use crate::providers::adapter::ProviderKind;
use crate::providers::context::{facade_common, validate_credentials, ApiContext};
use crate::providers::error::PaymentResult;
use crate::providers::params::{ParamValue, ParameterSet};
use crate::providers::signature;
use std::time::{SystemTime, UNIX_EPOCH};

/// Filters shared by the order and withdrawal listings
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub order_id: Option<i64>,
    pub payment_id: Option<String>,
    pub order_status: Option<i64>,
    /// `YYYY-MM-DD HH:MM:SS`
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub page: Option<i64>,
}

impl ListFilter {
    fn params(self) -> ParameterSet {
        ParameterSet::new()
            .with_opt("orderId", self.order_id)
            .with_opt("paymentId", self.payment_id)
            .with_opt("orderStatus", self.order_status)
            .with_opt("dateFrom", self.date_from)
            .with_opt("dateTo", self.date_to)
            .with_opt("page", self.page)
    }
}

/// Optional fields of a new order
#[derive(Debug, Clone, Default)]
pub struct OrderOptions {
    pub tel: Option<String>,
    /// Order number in your system
    pub payment_id: Option<String>,
    pub success_url: Option<String>,
    pub failure_url: Option<String>,
    pub notification_url: Option<String>,
}

/// Client for the freeKassa v1 API
#[derive(Debug, Clone)]
pub struct FreeKassaClient {
    api: ApiContext,
    shop_id: String,
    api_key: SecretString,
}

/// Nanoseconds since the epoch, unique per request
fn nonce() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}

impl FreeKassaClient {
    pub const BASE_URL: &'static str = "https://api.freekassa.com/v1";

    pub fn new(shop_id: impl Into<String>, api_key: impl Into<SecretString>) -> PaymentResult<Self> {
        Self::from_credentials(FreeKassaCredentials {
            shop_id: shop_id.into(),
            api_key: api_key.into(),
            base_url: None,
        })
    }

    pub fn from_credentials(credentials: FreeKassaCredentials) -> PaymentResult<Self> {
        validate_credentials(ProviderKind::FreeKassa, &credentials)?;
        let mut api = ApiContext::new(ProviderKind::FreeKassa, Self::BASE_URL);
        if let Some(base_url) = &credentials.base_url {
            api.set_base_url(base_url);
        }
        Ok(Self {
            api,
            shop_id: credentials.shop_id,
            api_key: credentials.api_key,
        })
    }

    /// Shop id as a number when it is one
    fn shop_id_value(&self) -> ParamValue {
        match self.shop_id.trim().parse::<i64>() {
            Ok(id) => ParamValue::Int(id),
            Err(_) => ParamValue::Str(self.shop_id.clone()),
        }
    }

    /// Prefix `shopId` and `nonce`, sign everything, POST as JSON
    async fn post(&self, path: &str, params: ParameterSet) -> PaymentResult<Envelope> {
        let mut params = ParameterSet::new()
            .with("shopId", self.shop_id_value())
            .with("nonce", nonce())
            .extend(params);
        let sign = signature::freekassa(&params, self.api_key.expose_secret());
        params.insert("signature", sign);
        let request = RequestDescriptor::post(self.api.url(path)).json(params.to_json_string());
        self.api.send(request).await
    }

    pub async fn get_balance(&self) -> PaymentResult<Vec<Balance>> {
        self.post("/balance", ParameterSet::new())
            .await?
            .extract("/balance")
    }

    pub async fn get_orders(&self, filter: ListFilter) -> PaymentResult<Orders> {
        self.post("/orders", filter.params()).await?.decode()
    }

    /// Create an order and get its payment link
    ///
    /// `method` is the freeKassa payment system id (`i`).
    pub async fn create_order(
        &self,
        method: i64,
        email: &str,
        ip: &str,
        amount: f64,
        currency: &str,
        options: OrderOptions,
    ) -> PaymentResult<CreatedOrder> {
        let params = ParameterSet::new()
            .with("i", method)
            .with("email", email)
            .with("ip", ip)
            .with("amount", amount)
            .with("currency", currency)
            .with_opt("tel", options.tel)
            .with_opt("paymentId", options.payment_id)
            .with_opt("success_url", options.success_url)
            .with_opt("failure_url", options.failure_url)
            .with_opt("notification_url", options.notification_url);
        self.post("/orders/create", params).await?.decode()
    }

    pub async fn get_currencies(&self) -> PaymentResult<Vec<Currency>> {
        self.post("/currencies", ParameterSet::new())
            .await?
            .extract("/currencies")
    }

    /// Whether payment system `method` currently accepts payments
    pub async fn check_currency_status(&self, method: i64) -> PaymentResult<bool> {
        let envelope = self
            .post(&format!("/currencies/{method}/status"), ParameterSet::new())
            .await?;
        Ok(envelope.body().get("type").and_then(|t| t.as_str()) == Some("success"))
    }

    pub async fn get_withdrawal_currencies(&self) -> PaymentResult<Vec<WithdrawalCurrency>> {
        self.post("/withdrawals/currencies", ParameterSet::new())
            .await?
            .extract("/currencies")
    }

    pub async fn get_shops(&self) -> PaymentResult<Vec<Shop>> {
        self.post("/shops", ParameterSet::new())
            .await?
            .extract("/shops")
    }

    pub async fn get_withdrawals(&self, filter: ListFilter) -> PaymentResult<Withdrawals> {
        self.post("/withdrawals", filter.params()).await?.decode()
    }

    pub async fn create_withdrawal(
        &self,
        method: i64,
        account: &str,
        amount: f64,
        currency: &str,
        payment_id: Option<&str>,
    ) -> PaymentResult<CreatedWithdrawal> {
        let params = ParameterSet::new()
            .with("i", method)
            .with("account", account)
            .with("amount", amount)
            .with("currency", currency)
            .with_opt("paymentId", payment_id);
        self.post("/withdrawals/create", params)
            .await?
            .extract("/data")
    }
}

facade_common!(FreeKassaClient, freekassa, ProviderKind::FreeKassa);
