//! apays client implementation

use super::types::{Order, OrderInfo};
use crate::config::{APaysCredentials, SecretString};
use crate::http::RequestDescriptor;
use crate::providers::adapter::ProviderKind;
use crate::providers::context::{facade_common, validate_credentials, ApiContext};
use crate::providers::error::PaymentResult;
use crate::providers::params::ParameterSet;
use crate::providers::signature;

/// Client for the apays backend API
#[derive(Debug, Clone)]
pub struct APaysClient {
    api: ApiContext,
    client_id: String,
    secret_key: SecretString,
}

impl APaysClient {
    pub const BASE_URL: &'static str = "https://apays.io/backend";

    pub fn new(
        client_id: impl Into<String>,
        secret_key: impl Into<SecretString>,
    ) -> PaymentResult<Self> {
        Self::from_credentials(APaysCredentials {
            client_id: client_id.into(),
            secret_key: secret_key.into(),
            base_url: None,
        })
    }

    pub fn from_credentials(credentials: APaysCredentials) -> PaymentResult<Self> {
        validate_credentials(ProviderKind::APays, &credentials)?;
        let mut api = ApiContext::new(ProviderKind::APays, Self::BASE_URL);
        if let Some(base_url) = &credentials.base_url {
            api.set_base_url(base_url);
        }
        Ok(Self {
            api,
            client_id: credentials.client_id,
            secret_key: credentials.secret_key,
        })
    }

    /// Create an order; `amount` is in kopecks
    pub async fn create_order(
        &self,
        order_id: &str,
        amount: i64,
        email: Option<&str>,
    ) -> PaymentResult<Order> {
        // a zero amount signs like a status query
        let amount_text = (amount != 0).then(|| amount.to_string());
        let sign = signature::apays(
            order_id,
            amount_text.as_deref(),
            self.secret_key.expose_secret(),
        );
        let params = ParameterSet::new()
            .with("client_id", &self.client_id)
            .with("order_id", order_id)
            .with("amount", amount)
            .with("sign", sign)
            .with_opt("email", email);
        let request =
            RequestDescriptor::get(self.api.url("/create_order")).query(self.api.pairs(&params));
        self.api.send(request).await?.decode()
    }

    pub async fn get_order(&self, order_id: &str) -> PaymentResult<OrderInfo> {
        let sign = signature::apays(order_id, None, self.secret_key.expose_secret());
        let params = ParameterSet::new()
            .with("client_id", &self.client_id)
            .with("order_id", order_id)
            .with("sign", sign);
        let request =
            RequestDescriptor::get(self.api.url("/get_order")).query(self.api.pairs(&params));
        self.api.send(request).await?.decode()
    }
}

facade_common!(APaysClient, apays, ProviderKind::APays);
