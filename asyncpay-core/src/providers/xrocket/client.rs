//! xRocket Pay client implementation

use super::types::{
    AppInfo, Currency, Interval, Invoice, MultiCheque, Page, Subscription, SubscriptionCheck,
    Transfer, Withdrawal, WithdrawalFees,
};
use crate::config::{SecretString, XrocketCredentials};
use crate::http::RequestDescriptor;
use crate::protocol::{Envelope, NumberOrString};
use crate::providers::adapter::ProviderKind;
use crate::providers::context::{facade_common, validate_credentials, ApiContext};
use crate::providers::error::{PaymentError, PaymentResult};
use crate::providers::params::ParameterSet;
use serde::de::DeserializeOwned;
use serde_json::json;

/// Optional fields of a multi-cheque
#[derive(Debug, Clone)]
pub struct MultiChequeOptions {
    pub password: Option<String>,
    pub description: Option<String>,
    pub send_notifications: bool,
    pub enable_captcha: bool,
    /// Channels or groups the user must join
    pub telegram_resources_ids: Vec<String>,
    pub for_premium: bool,
    pub linked_wallet: bool,
    pub disabled_languages: Vec<String>,
    /// ISO 3166-1 alpha-2 codes
    pub enabled_countries: Vec<String>,
}

impl Default for MultiChequeOptions {
    fn default() -> Self {
        Self {
            password: None,
            description: None,
            send_notifications: true,
            enable_captcha: true,
            telegram_resources_ids: Vec::new(),
            for_premium: false,
            linked_wallet: false,
            disabled_languages: Vec::new(),
            enabled_countries: Vec::new(),
        }
    }
}

/// Fields to change on an existing multi-cheque; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct MultiChequeEdit {
    pub password: Option<String>,
    pub description: Option<String>,
    pub send_notifications: Option<bool>,
    pub enable_captcha: Option<bool>,
    pub telegram_resources_ids: Option<Vec<String>>,
    pub for_premium: Option<bool>,
    pub linked_wallet: Option<bool>,
    pub disabled_languages: Option<Vec<String>>,
    pub enabled_countries: Option<Vec<String>>,
}

/// Optional fields of an invoice
#[derive(Debug, Clone, Default)]
pub struct InvoiceOptions {
    /// Fixed amount; leave empty with `min_payment` for open invoices
    pub amount: Option<f64>,
    pub min_payment: Option<f64>,
    pub description: Option<String>,
    pub hidden_message: Option<String>,
    pub comments_enabled: Option<bool>,
    pub callback_url: Option<String>,
    pub payload: Option<String>,
    /// Seconds
    pub expired_in: Option<i64>,
}

/// Fields of a new subscription
#[derive(Debug, Clone, Default)]
pub struct SubscriptionOptions {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tg_resource: Option<String>,
    pub return_url: Option<String>,
}

/// Client for the xRocket Pay API
#[derive(Debug, Clone)]
pub struct XrocketClient {
    api: ApiContext,
    api_key: SecretString,
}

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    (!items.is_empty()).then_some(items)
}

impl XrocketClient {
    pub const BASE_URL: &'static str = "https://pay.xrocket.tg";

    pub fn new(api_key: impl Into<SecretString>) -> PaymentResult<Self> {
        Self::from_credentials(XrocketCredentials {
            api_key: api_key.into(),
            base_url: None,
        })
    }

    pub fn from_credentials(credentials: XrocketCredentials) -> PaymentResult<Self> {
        validate_credentials(ProviderKind::Xrocket, &credentials)?;
        let mut api = ApiContext::new(ProviderKind::Xrocket, Self::BASE_URL);
        if let Some(base_url) = &credentials.base_url {
            api.set_base_url(base_url);
        }
        Ok(Self {
            api,
            api_key: credentials.api_key,
        })
    }

    async fn call(
        &self,
        request: RequestDescriptor,
        body: Option<ParameterSet>,
    ) -> PaymentResult<Envelope> {
        let mut request = request.header("Rocket-Pay-Key", self.api_key.expose_secret());
        if let Some(body) = body {
            request = request.json(body.to_json_string());
        }
        self.api.send(request).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> PaymentResult<T> {
        self.call(RequestDescriptor::get(self.api.url(path)), None)
            .await?
            .extract("/data")
    }

    async fn page<T: DeserializeOwned>(
        &self,
        path: &str,
        limit: i64,
        offset: i64,
    ) -> PaymentResult<Page<T>> {
        let params = ParameterSet::new().with("limit", limit).with("offset", offset);
        let request = RequestDescriptor::get(self.api.url(path)).query(self.api.pairs(&params));
        self.call(request, None).await?.extract("/data")
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: ParameterSet) -> PaymentResult<T> {
        self.call(RequestDescriptor::post(self.api.url(path)), Some(body))
            .await?
            .extract("/data")
    }

    async fn delete(&self, path: &str) -> PaymentResult<bool> {
        let envelope = self
            .call(RequestDescriptor::delete(self.api.url(path)), None)
            .await?;
        Ok(envelope.body().get("success").and_then(|v| v.as_bool()) == Some(true))
    }

    pub async fn get_app_info(&self) -> PaymentResult<AppInfo> {
        self.get("/app/info").await
    }

    /// Send funds to a Telegram user; `transfer_id` makes the call idempotent
    pub async fn transfer(
        &self,
        tg_user_id: i64,
        currency: &str,
        amount: f64,
        transfer_id: &str,
        description: Option<&str>,
    ) -> PaymentResult<Transfer> {
        let body = ParameterSet::new()
            .with("tgUserId", tg_user_id)
            .with("currency", currency)
            .with("amount", amount)
            .with("transferId", transfer_id)
            .with_opt("description", description);
        self.post("/app/transfer", body).await
    }

    pub async fn withdrawal(
        &self,
        network: &str,
        address: &str,
        currency: &str,
        amount: f64,
        withdrawal_id: &str,
        comment: Option<&str>,
    ) -> PaymentResult<Withdrawal> {
        let body = ParameterSet::new()
            .with("network", network)
            .with("address", address)
            .with("currency", currency)
            .with("amount", amount)
            .with("withdrawalId", withdrawal_id)
            .with_opt("comment", comment);
        self.post("/app/withdrawal", body).await
    }

    pub async fn withdrawal_status(&self, withdrawal_id: &str) -> PaymentResult<Withdrawal> {
        self.get(&format!("/app/withdrawal/status/{withdrawal_id}"))
            .await
    }

    /// Withdrawal fees, for every currency or just one
    pub async fn withdrawal_fees(&self, currency: Option<&str>) -> PaymentResult<Vec<WithdrawalFees>> {
        let params = ParameterSet::new().with_opt("currency", currency);
        let request =
            RequestDescriptor::get(self.api.url("/app/withdrawal/fees")).query(self.api.pairs(&params));
        self.call(request, None).await?.extract("/data")
    }

    pub async fn create_multi_cheque(
        &self,
        currency: &str,
        cheque_per_user: f64,
        users_number: i64,
        ref_program: i64,
        options: MultiChequeOptions,
    ) -> PaymentResult<MultiCheque> {
        let body = ParameterSet::new()
            .with("currency", currency)
            .with("chequePerUser", cheque_per_user)
            .with("usersNumber", users_number)
            .with("refProgram", ref_program)
            .with_opt("password", options.password)
            .with_opt("description", options.description)
            .with("sendNotifications", options.send_notifications)
            .with("enableCaptcha", options.enable_captcha)
            .with_opt("telegramResourcesIds", non_empty(options.telegram_resources_ids))
            .with("forPremium", options.for_premium)
            .with("linkedWallet", options.linked_wallet)
            .with_opt("disabledLanguages", non_empty(options.disabled_languages))
            .with_opt("enabledCountries", non_empty(options.enabled_countries));
        self.post("/multi-cheque", body).await
    }

    pub async fn multi_cheques_list(&self, limit: i64, offset: i64) -> PaymentResult<Page<MultiCheque>> {
        self.page("/multi-cheque", limit, offset).await
    }

    pub async fn get_multi_cheque_info(&self, cheque_id: i64) -> PaymentResult<MultiCheque> {
        self.get(&format!("/multi-cheque/{cheque_id}")).await
    }

    pub async fn edit_multi_cheque(
        &self,
        cheque_id: i64,
        edit: MultiChequeEdit,
    ) -> PaymentResult<MultiCheque> {
        let body = ParameterSet::new()
            .with_opt("password", edit.password)
            .with_opt("description", edit.description)
            .with_opt("sendNotifications", edit.send_notifications)
            .with_opt("enableCaptcha", edit.enable_captcha)
            .with_opt("telegramResourcesIds", edit.telegram_resources_ids)
            .with_opt("forPremium", edit.for_premium)
            .with_opt("linkedWallet", edit.linked_wallet)
            .with_opt("disabledLanguages", edit.disabled_languages)
            .with_opt("enabledCountries", edit.enabled_countries);
        let request = RequestDescriptor::put(self.api.url(&format!("/multi-cheque/{cheque_id}")));
        self.call(request, Some(body)).await?.extract("/data")
    }

    pub async fn delete_multi_cheque(&self, cheque_id: i64) -> PaymentResult<bool> {
        self.delete(&format!("/multi-cheque/{cheque_id}")).await
    }

    /// Create an invoice payable `num_payments` times
    pub async fn create_invoice(
        &self,
        num_payments: i64,
        currency: &str,
        options: InvoiceOptions,
    ) -> PaymentResult<Invoice> {
        let body = ParameterSet::new()
            .with("numPayments", num_payments)
            .with("currency", currency)
            .with_opt("amount", options.amount)
            .with_opt("minPayment", options.min_payment)
            .with_opt("description", options.description)
            .with_opt("hiddenMessage", options.hidden_message)
            .with_opt("commentsEnabled", options.comments_enabled)
            .with_opt("callbackUrl", options.callback_url)
            .with_opt("payload", options.payload)
            .with_opt("expiredIn", options.expired_in);
        self.post("/tg-invoices", body).await
    }

    pub async fn get_invoices(&self, limit: i64, offset: i64) -> PaymentResult<Page<Invoice>> {
        self.page("/tg-invoices", limit, offset).await
    }

    pub async fn get_invoice_info(&self, invoice_id: &str) -> PaymentResult<Invoice> {
        self.get(&format!("/tg-invoices/{invoice_id}")).await
    }

    pub async fn delete_invoice(&self, invoice_id: &str) -> PaymentResult<bool> {
        self.delete(&format!("/tg-invoices/{invoice_id}")).await
    }

    /// USD amount a user has earned in a challenge
    pub async fn get_challenge(&self, challenge_id: &str, user_id: &str) -> PaymentResult<f64> {
        let request = RequestDescriptor::get(
            self.api.url(&format!("/challenges/{challenge_id}/users/{user_id}")),
        );
        let amount: NumberOrString = self.call(request, None).await?.extract("/data/amountUsd")?;
        amount.as_f64().ok_or_else(|| {
            PaymentError::decode(
                ProviderKind::Xrocket,
                format!("amountUsd is not a number: {amount}"),
            )
        })
    }

    pub async fn get_available_currencies(&self) -> PaymentResult<Vec<Currency>> {
        self.call(
            RequestDescriptor::get(self.api.url("/currencies/available")),
            None,
        )
        .await?
        .extract("/data/results")
    }

    /// Create a subscription with a single billing interval
    pub async fn create_subscription(
        &self,
        currency: &str,
        interval: &str,
        amount: f64,
        status: &str,
        referral_percent: i64,
        options: SubscriptionOptions,
    ) -> PaymentResult<Subscription> {
        let body = ParameterSet::new()
            .with_opt("name", options.name)
            .with_opt("description", options.description)
            .with("currency", currency)
            .with(
                "interval",
                json!([{"interval": interval, "amount": amount, "status": status}]),
            )
            .with_opt("tgResource", options.tg_resource)
            .with("referralPercent", referral_percent)
            .with_opt("returnUrl", options.return_url);
        self.post("/subscriptions", body).await
    }

    pub async fn get_subscriptions(&self, limit: i64, offset: i64) -> PaymentResult<Page<Subscription>> {
        self.page("/subscriptions", limit, offset).await
    }

    pub async fn get_subscription_info(&self, subscription_id: i64) -> PaymentResult<Subscription> {
        self.get(&format!("/subscriptions/{subscription_id}")).await
    }

    pub async fn delete_subscription(&self, subscription_id: i64) -> PaymentResult<bool> {
        self.delete(&format!("/subscriptions/{subscription_id}")).await
    }

    pub async fn check_subscription(
        &self,
        subscription_id: i64,
        user_id: i64,
    ) -> PaymentResult<SubscriptionCheck> {
        let body = ParameterSet::new().with("userId", user_id);
        self.post(&format!("/subscriptions/check/{subscription_id}"), body)
            .await
    }

    pub async fn get_subscription_interval(
        &self,
        subscription_id: i64,
        interval_code: &str,
    ) -> PaymentResult<Interval> {
        self.get(&format!(
            "/subscriptions/{subscription_id}/interval/{interval_code}"
        ))
        .await
    }

    pub async fn edit_subscription_interval(
        &self,
        subscription_id: i64,
        interval_code: &str,
        status: &str,
    ) -> PaymentResult<Interval> {
        let body = ParameterSet::new().with("status", status);
        let request = RequestDescriptor::put(self.api.url(&format!(
            "/subscriptions/{subscription_id}/interval/{interval_code}"
        )));
        self.call(request, Some(body)).await?.extract("/data")
    }

    pub async fn delete_subscription_interval(
        &self,
        subscription_id: i64,
        interval_code: &str,
    ) -> PaymentResult<Interval> {
        let request = RequestDescriptor::delete(self.api.url(&format!(
            "/subscriptions/{subscription_id}/interval/{interval_code}"
        )));
        self.call(request, None).await?.extract("/data")
    }

    pub async fn create_subscription_interval(
        &self,
        subscription_id: i64,
        interval: &str,
        amount: f64,
        status: &str,
    ) -> PaymentResult<Interval> {
        let body = ParameterSet::new()
            .with("interval", interval)
            .with("amount", amount)
            .with("status", status);
        self.post(&format!("/subscriptions/{subscription_id}"), body)
            .await
    }
}

facade_common!(XrocketClient, xrocket, ProviderKind::Xrocket);
