//! platega client implementation

use super::types::{ExchangeRate, Order, OrderInfo};
use crate::config::{PlategaCredentials, SecretString};
use crate::http::RequestDescriptor;
use crate::providers::adapter::ProviderKind;
use crate::providers::context::{facade_common, validate_credentials, ApiContext};
use crate::providers::error::PaymentResult;
use crate::providers::params::ParameterSet;
use serde_json::{json, Value};

/// Optional fields of a transaction
#[derive(Debug, Clone, Default)]
pub struct OrderOptions {
    pub return_url: Option<String>,
    pub failed_url: Option<String>,
    /// Echoed back in callbacks
    pub payload: Option<String>,
}

/// Client for the platega merchant API
#[derive(Debug, Clone)]
pub struct PlategaClient {
    api: ApiContext,
    merchant_id: String,
    secret_key: SecretString,
}

impl PlategaClient {
    pub const BASE_URL: &'static str = "https://app.platega.io";

    pub fn new(
        merchant_id: impl Into<String>,
        secret_key: impl Into<SecretString>,
    ) -> PaymentResult<Self> {
        Self::from_credentials(PlategaCredentials {
            merchant_id: merchant_id.into(),
            secret_key: secret_key.into(),
            base_url: None,
        })
    }

    pub fn from_credentials(credentials: PlategaCredentials) -> PaymentResult<Self> {
        validate_credentials(ProviderKind::Platega, &credentials)?;
        let mut api = ApiContext::new(ProviderKind::Platega, Self::BASE_URL);
        if let Some(base_url) = &credentials.base_url {
            api.set_base_url(base_url);
        }
        Ok(Self {
            api,
            merchant_id: credentials.merchant_id,
            secret_key: credentials.secret_key,
        })
    }

    fn authorized(&self, request: RequestDescriptor) -> RequestDescriptor {
        request
            .header("X-MerchantId", &self.merchant_id)
            .header("X-Secret", self.secret_key.expose_secret())
    }

    /// Create a transaction; platega generates its id
    pub async fn create_order(
        &self,
        payment_method: i64,
        amount: f64,
        currency: &str,
        description: &str,
        options: OrderOptions,
    ) -> PaymentResult<Order> {
        let params = ParameterSet::new()
            .with("paymentMethod", payment_method)
            .with(
                "paymentDetails",
                json!({"amount": amount, "currency": currency}),
            )
            .with("description", description)
            .with_opt("return", options.return_url)
            .with_opt("failedUrl", options.failed_url)
            .with_opt("payload", options.payload);
        let request = self
            .authorized(RequestDescriptor::post(self.api.url("/transaction/process")))
            .json(params.to_json_string());
        self.api.send(request).await?.decode()
    }

    pub async fn get_order(&self, transaction_id: &str) -> PaymentResult<OrderInfo> {
        let request = self.authorized(RequestDescriptor::get(
            self.api.url(&format!("/transaction/{transaction_id}")),
        ));
        self.api.send(request).await?.decode()
    }

    /// Current rate of a payment method between two currencies
    pub async fn get_rates(
        &self,
        payment_method: i64,
        currency_from: &str,
        currency_to: &str,
    ) -> PaymentResult<ExchangeRate> {
        let params = ParameterSet::new()
            .with("merchantId", &self.merchant_id)
            .with("paymentMethod", payment_method)
            .with("currencyFrom", currency_from)
            .with("currencyTo", currency_to);
        let request = self
            .authorized(RequestDescriptor::post(
                self.api.url("/rates/payment_method_rate"),
            ))
            .form(self.api.pairs(&params));
        self.api.send(request).await?.decode()
    }

    /// Balance unlock operations between two dates, returned as sent
    ///
    /// This endpoint only answers with `accept: text/plain`.
    pub async fn get_orders(
        &self,
        date_from: &str,
        date_to: &str,
        page: i64,
        size: i64,
    ) -> PaymentResult<Value> {
        let params = ParameterSet::new()
            .with("from", date_from)
            .with("to", date_to)
            .with("page", page)
            .with("size", size);
        let request = self
            .authorized(RequestDescriptor::post(
                self.api.url("/transaction/balance-unlock-operations"),
            ))
            .header("accept", "text/plain")
            .form(self.api.pairs(&params));
        Ok(self.api.send(request).await?.into_value())
    }
}

facade_common!(PlategaClient, platega, ProviderKind::Platega);
