//! ruKassa client implementation

use super::types::{Balance, CreatedPayment, Payment, Withdraw, WithdrawStatus};
use crate::config::{RuKassaCredentials, SecretString};
use crate::http::RequestDescriptor;
use crate::protocol::Envelope;
use crate::providers::adapter::ProviderKind;
use crate::providers::context::{facade_common, validate_credentials, ApiContext};
use crate::providers::error::PaymentResult;
use crate::providers::params::{random_order_id, ParameterSet};

/// Optional fields of a payment
#[derive(Debug, Clone, Default)]
pub struct PaymentOptions {
    /// Defaults to RUB
    pub currency: Option<String>,
    pub method: Option<String>,
    /// Echoed back in the notification
    pub data: Option<String>,
    /// Generated when absent
    pub order_id: Option<String>,
}

/// Optional fields of a withdrawal
#[derive(Debug, Clone, Default)]
pub struct WithdrawOptions {
    pub order_id: Option<String>,
    /// Source balance; defaults to `BASE_RUB`
    pub from: Option<String>,
    /// 0 takes the fee from the balance, 1 from the amount
    pub who_fee: Option<i64>,
    /// SBP bank id
    pub bank: Option<i64>,
}

/// Client for the ruKassa v1 API
///
/// Shop calls authenticate with the shop token; balance and withdrawals
/// use the account email and password.
#[derive(Debug, Clone)]
pub struct RuKassaClient {
    api: ApiContext,
    shop_id: String,
    token: SecretString,
    email: String,
    password: SecretString,
}

impl RuKassaClient {
    pub const BASE_URL: &'static str = "https://lk.rukassa.is/api/v1";

    pub fn new(
        shop_id: impl Into<String>,
        token: impl Into<SecretString>,
        email: impl Into<String>,
        password: impl Into<SecretString>,
    ) -> PaymentResult<Self> {
        Self::from_credentials(RuKassaCredentials {
            shop_id: shop_id.into(),
            token: token.into(),
            email: email.into(),
            password: password.into(),
            base_url: None,
        })
    }

    pub fn from_credentials(credentials: RuKassaCredentials) -> PaymentResult<Self> {
        validate_credentials(ProviderKind::RuKassa, &credentials)?;
        let mut api = ApiContext::new(ProviderKind::RuKassa, Self::BASE_URL);
        if let Some(base_url) = &credentials.base_url {
            api.set_base_url(base_url);
        }
        Ok(Self {
            api,
            shop_id: credentials.shop_id,
            token: credentials.token,
            email: credentials.email,
            password: credentials.password,
        })
    }

    async fn post(&self, path: &str, params: ParameterSet) -> PaymentResult<Envelope> {
        let request = RequestDescriptor::post(self.api.url(path)).form(self.api.pairs(&params));
        self.api.send(request).await
    }

    fn shop(&self) -> ParameterSet {
        ParameterSet::new()
            .with("shop_id", &self.shop_id)
            .with("token", self.token.expose_secret())
    }

    fn account(&self) -> ParameterSet {
        ParameterSet::new()
            .with("email", &self.email)
            .with("password", self.password.expose_secret())
    }

    pub async fn get_balance(&self) -> PaymentResult<Balance> {
        self.post("/getBalance", self.account()).await?.decode()
    }

    pub async fn create_payment(
        &self,
        amount: f64,
        options: PaymentOptions,
    ) -> PaymentResult<CreatedPayment> {
        let order_id = options.order_id.unwrap_or_else(random_order_id);
        let params = ParameterSet::new()
            .with("shop_id", &self.shop_id)
            .with("order_id", order_id)
            .with("amount", amount)
            .with("token", self.token.expose_secret())
            .with_opt("data", options.data)
            .with_opt("method", options.method)
            .with(
                "currency",
                options.currency.unwrap_or_else(|| "RUB".to_string()),
            );
        self.post("/create", params).await?.decode()
    }

    pub async fn get_info_payment(&self, payment_id: i64) -> PaymentResult<Payment> {
        let params = ParameterSet::new().with("id", payment_id).extend(self.shop());
        self.post("/getPayInfo", params).await?.decode()
    }

    pub async fn create_withdraw(
        &self,
        way: &str,
        wallet: &str,
        amount: f64,
        options: WithdrawOptions,
    ) -> PaymentResult<WithdrawStatus> {
        let params = self
            .account()
            .with("way", way)
            .with("wallet", wallet)
            .with("amount", amount)
            .with_opt("order_id", options.order_id)
            .with("from", options.from.unwrap_or_else(|| "BASE_RUB".to_string()))
            .with("who_fee", options.who_fee.unwrap_or(0))
            .with_opt("bank", options.bank);
        self.post("/createWithdraw", params).await?.decode()
    }

    pub async fn cancel_withdraw(&self, withdraw_id: i64) -> PaymentResult<WithdrawStatus> {
        let params = self.account().with("id", withdraw_id);
        self.post("/cancelWithdraw", params).await?.decode()
    }

    pub async fn get_info_withdraw(&self, withdraw_id: i64) -> PaymentResult<Withdraw> {
        let params = self.shop().with("id", withdraw_id);
        self.post("/getWithdrawInfo", params).await?.decode()
    }
}

facade_common!(RuKassaClient, rukassa, ProviderKind::RuKassa);
