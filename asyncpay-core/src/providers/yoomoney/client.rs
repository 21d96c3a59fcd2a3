//! YooMoney wallet client implementation

use super::types::{AccountInfo, OperationDetails, OperationHistory, ProcessPayment, RequestPayment};
use crate::config::{SecretString, YoomoneyCredentials};
use crate::http::RequestDescriptor;
use crate::protocol::Envelope;
use crate::providers::adapter::ProviderKind;
use crate::providers::context::{facade_common, validate_credentials, ApiContext};
use crate::providers::error::PaymentResult;
use crate::providers::params::ParameterSet;

/// Filters of the operation history
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    /// Space separated subset of `deposition payment`
    pub operation_type: Option<String>,
    pub label: Option<String>,
    /// RFC 3339 timestamps
    pub from: Option<String>,
    pub till: Option<String>,
    pub start_record: Option<String>,
    /// 1 to 100
    pub records: Option<i64>,
    pub details: Option<bool>,
}

/// Optional fields of a p2p transfer request
#[derive(Debug, Clone, Default)]
pub struct TransferOptions {
    /// Amount to be received, instead of `amount` to be charged
    pub amount_due: Option<f64>,
    /// Shown in the sender's history
    pub comment: Option<String>,
    /// Shown to the recipient
    pub message: Option<String>,
    pub label: Option<String>,
}

/// Optional fields of a payment confirmation
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// `wallet` (default) or a linked card id
    pub money_source: Option<String>,
    pub csc: Option<String>,
    pub ext_auth_success_uri: Option<String>,
    pub ext_auth_fail_uri: Option<String>,
}

/// Fields of a quickpay form
#[derive(Debug, Clone, Default)]
pub struct QuickPayOptions {
    /// Defaults to `shop`
    pub quickpay_form: Option<String>,
    /// `SB` (default, wallet) or `AC` (card)
    pub payment_type: Option<String>,
    pub label: Option<String>,
    pub success_url: Option<String>,
}

/// Client for the YooMoney wallet API
#[derive(Debug, Clone)]
pub struct YoomoneyClient {
    api: ApiContext,
    access_token: SecretString,
}

impl YoomoneyClient {
    pub const BASE_URL: &'static str = "https://yoomoney.ru/api";

    pub fn new(access_token: impl Into<SecretString>) -> PaymentResult<Self> {
        Self::from_credentials(YoomoneyCredentials {
            access_token: access_token.into(),
            base_url: None,
        })
    }

    pub fn from_credentials(credentials: YoomoneyCredentials) -> PaymentResult<Self> {
        validate_credentials(ProviderKind::Yoomoney, &credentials)?;
        let mut api = ApiContext::new(ProviderKind::Yoomoney, Self::BASE_URL);
        if let Some(base_url) = &credentials.base_url {
            api.set_base_url(base_url);
        }
        Ok(Self {
            api,
            access_token: credentials.access_token,
        })
    }

    /// Site root the API lives under; quickpay forms are served from it
    fn site_url(&self) -> &str {
        let base = self.api.base_url().trim_end_matches('/');
        base.strip_suffix("/api").unwrap_or(base)
    }

    async fn post(&self, path: &str, params: ParameterSet) -> PaymentResult<Envelope> {
        let request = RequestDescriptor::post(self.api.url(path))
            .header(
                "Authorization",
                format!("Bearer {}", self.access_token.expose_secret()),
            )
            .form(self.api.pairs(&params));
        self.api.send(request).await
    }

    pub async fn account_info(&self) -> PaymentResult<AccountInfo> {
        self.post("/account-info", ParameterSet::new())
            .await?
            .decode()
    }

    /// History page, newest first
    pub async fn operation_history(&self, filter: HistoryFilter) -> PaymentResult<OperationHistory> {
        let params = ParameterSet::new()
            .with_opt("type", filter.operation_type)
            .with_opt("label", filter.label)
            .with_opt("from", filter.from)
            .with_opt("till", filter.till)
            .with_opt("start_record", filter.start_record)
            .with_opt("records", filter.records)
            .with_opt("details", filter.details);
        self.post("/operation-history", params).await?.decode()
    }

    pub async fn operation_details(&self, operation_id: &str) -> PaymentResult<OperationDetails> {
        let params = ParameterSet::new().with("operation_id", operation_id);
        self.post("/operation-details", params).await?.decode()
    }

    /// Prepare a p2p transfer to wallet `to`
    pub async fn request_payment(
        &self,
        to: &str,
        amount: f64,
        options: TransferOptions,
    ) -> PaymentResult<RequestPayment> {
        let params = ParameterSet::new()
            .with("pattern_id", "p2p")
            .with("to", to)
            .with("amount", amount)
            .with_opt("amount_due", options.amount_due)
            .with_opt("comment", options.comment)
            .with_opt("message", options.message)
            .with_opt("label", options.label);
        self.post("/request-payment", params).await?.decode()
    }

    /// Confirm a transfer prepared by [`request_payment`](Self::request_payment)
    pub async fn process_payment(
        &self,
        request_id: &str,
        options: ProcessOptions,
    ) -> PaymentResult<ProcessPayment> {
        let params = ParameterSet::new()
            .with("request_id", request_id)
            .with(
                "money_source",
                options.money_source.unwrap_or_else(|| "wallet".to_string()),
            )
            .with_opt("csc", options.csc)
            .with_opt("ext_auth_success_uri", options.ext_auth_success_uri)
            .with_opt("ext_auth_fail_uri", options.ext_auth_fail_uri);
        self.post("/process-payment", params).await?.decode()
    }

    /// Submit a quickpay form and return the payment page it redirects to
    pub async fn quick_pay(
        &self,
        receiver: &str,
        sum: f64,
        options: QuickPayOptions,
    ) -> PaymentResult<String> {
        let params = ParameterSet::new()
            .with("receiver", receiver)
            .with("sum", sum)
            .with(
                "quickpay-form",
                options.quickpay_form.unwrap_or_else(|| "shop".to_string()),
            )
            .with(
                "paymentType",
                options.payment_type.unwrap_or_else(|| "SB".to_string()),
            )
            .with_opt("label", options.label)
            .with_opt("successURL", options.success_url);
        let request = RequestDescriptor::post(format!("{}/quickpay/confirm", self.site_url()))
            .form(self.api.pairs(&params));
        self.api.redirect(request).await
    }

    /// Whether the latest operation carrying `label` exists
    pub async fn check_payment(&self, label: &str) -> PaymentResult<bool> {
        let history = self
            .operation_history(HistoryFilter {
                label: Some(label.to_string()),
                records: Some(1),
                ..HistoryFilter::default()
            })
            .await?;
        Ok(history
            .operations
            .first()
            .is_some_and(|op| op.label.as_deref() == Some(label)))
    }
}

facade_common!(YoomoneyClient, yoomoney, ProviderKind::Yoomoney);
