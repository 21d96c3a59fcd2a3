//! Lolzteam Market client implementation

use super::types::{Invoice, Invoices, Payments, User};
use crate::config::{LolzCredentials, SecretString};
use crate::http::RequestDescriptor;
use crate::protocol::Envelope;
use crate::providers::adapter::ProviderKind;
use crate::providers::context::{facade_common, validate_credentials, ApiContext};
use crate::providers::error::{PaymentError, PaymentResult};
use crate::providers::params::{format_float, random_order_id, ParameterSet};
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde_json::Value;
use tracing::debug;

/// Site that renders transfer links
pub const MARKET_URL: &str = "https://lzt.market";

const REQUIRED_SCOPE: &str = "market";

/// Optional fields of an invoice
#[derive(Debug, Clone, Default)]
pub struct InvoiceOptions {
    /// Defaults to `rub`
    pub currency: Option<String>,
    pub url_callback: Option<String>,
    /// Seconds; defaults to 3600
    pub lifetime: Option<i64>,
    pub additional_data: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub page: Option<i64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub amount: Option<f64>,
    pub merchant_id: Option<i64>,
}

/// Filters of the payment history
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    /// Operation type, e.g. `receiving_money`
    pub operation_type: Option<String>,
    pub pmin: Option<f64>,
    pub pmax: Option<f64>,
    pub page: Option<i64>,
    pub operation_id_lt: Option<i64>,
    pub receiver: Option<String>,
    pub sender: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub wallet: Option<String>,
    pub comment: Option<String>,
    pub is_hold: Option<bool>,
    pub show_payment_stats: Option<bool>,
}

/// Client for the Lolzteam Market payments API
#[derive(Debug, Clone)]
pub struct LolzClient {
    api: ApiContext,
    token: SecretString,
    user_id: String,
}

/// Claims carried by the bearer token
#[derive(Debug)]
struct TokenClaims {
    subject: String,
    scope: Option<Value>,
}

impl TokenClaims {
    fn decode(token: &str) -> PaymentResult<Self> {
        let incorrect = |message: &str| PaymentError::IncorrectToken {
            provider: ProviderKind::Lolz,
            message: message.to_string(),
        };
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| incorrect("not a JWT"))?
            .trim_end_matches('=');
        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .or_else(|_| STANDARD_NO_PAD.decode(payload))
            .map_err(|e| incorrect(&e.to_string()))?;
        let claims: Value = serde_json::from_slice(&bytes).map_err(|e| incorrect(&e.to_string()))?;
        let subject = match claims.get("sub") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => return Err(incorrect("missing 'sub' claim")),
        };
        Ok(Self {
            subject,
            scope: claims.get("scope").filter(|s| !s.is_null()).cloned(),
        })
    }

    /// An absent scope claim grants everything
    fn grants(&self, scope: &str) -> bool {
        match &self.scope {
            None => true,
            Some(Value::String(s)) => s.split_whitespace().any(|s| s == scope),
            Some(Value::Array(items)) => items.iter().any(|s| s.as_str() == Some(scope)),
            Some(_) => false,
        }
    }
}

impl LolzClient {
    pub const BASE_URL: &'static str = "https://api.lzt.market";

    pub fn new(token: impl Into<SecretString>) -> PaymentResult<Self> {
        Self::from_credentials(LolzCredentials {
            token: token.into(),
            base_url: None,
        })
    }

    /// Decode the token, keep its subject and insist on the `market` scope
    pub fn from_credentials(credentials: LolzCredentials) -> PaymentResult<Self> {
        validate_credentials(ProviderKind::Lolz, &credentials)?;
        let claims = TokenClaims::decode(credentials.token.expose_secret())?;
        if !claims.grants(REQUIRED_SCOPE) {
            return Err(PaymentError::MissingScope {
                provider: ProviderKind::Lolz,
                scope: REQUIRED_SCOPE.to_string(),
            });
        }
        debug!("Lolzteam token accepted for user {}", claims.subject);
        let mut api = ApiContext::new(ProviderKind::Lolz, Self::BASE_URL);
        if let Some(base_url) = &credentials.base_url {
            api.set_base_url(base_url);
        }
        Ok(Self {
            api,
            token: credentials.token,
            user_id: claims.subject,
        })
    }

    /// Account id taken from the token's `sub` claim
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn request(&self, request: RequestDescriptor, params: &ParameterSet) -> RequestDescriptor {
        request
            .header("Authorization", format!("Bearer {}", self.token.expose_secret()))
            .header("Accept", "application/json")
            .query(self.api.pairs(params))
    }

    async fn get(&self, path: &str, params: ParameterSet) -> PaymentResult<Envelope> {
        let request = self.request(RequestDescriptor::get(self.api.url(path)), &params);
        self.api.send(request).await
    }

    pub async fn get_me(&self) -> PaymentResult<User> {
        self.get("/me", ParameterSet::new()).await?.extract("/user")
    }

    pub async fn create_invoice(
        &self,
        amount: f64,
        payment_id: &str,
        comment: &str,
        url_success: &str,
        merchant_id: &str,
        options: InvoiceOptions,
    ) -> PaymentResult<Invoice> {
        let params = ParameterSet::new()
            .with("amount", amount)
            .with("payment_id", payment_id)
            .with("comment", comment)
            .with("url_success", url_success)
            .with("merchant_id", merchant_id)
            .with("currency", options.currency.unwrap_or_else(|| "rub".to_string()))
            .with_opt("url_callback", options.url_callback)
            .with("lifetime", options.lifetime.unwrap_or(3600))
            .with_opt("additional_data", options.additional_data);
        let request = self.request(RequestDescriptor::post(self.api.url("/invoice")), &params);
        self.api.send(request).await?.extract("/invoice")
    }

    /// Look an invoice up by its id or by your payment id
    pub async fn get_invoice(
        &self,
        invoice_id: Option<&str>,
        payment_id: Option<&str>,
    ) -> PaymentResult<Invoice> {
        let params = ParameterSet::new()
            .with_opt("invoice_id", invoice_id)
            .with_opt("payment_id", payment_id);
        self.get("/invoice", params).await?.extract("/data")
    }

    pub async fn get_invoices(&self, filter: InvoiceFilter) -> PaymentResult<Invoices> {
        let params = ParameterSet::new()
            .with("page", filter.page.unwrap_or(1))
            .with_opt("currency", filter.currency)
            .with_opt("status", filter.status)
            .with_opt("amount", filter.amount)
            .with_opt("merchant_id", filter.merchant_id);
        self.get("/invoice/list", params).await?.decode()
    }

    /// Transfer link to your account; built locally, no request is made
    ///
    /// A random comment is generated when none is given. With
    /// `round_up` the amount is rounded up to a whole number.
    pub fn get_payment_link(
        &self,
        amount: f64,
        comment: Option<&str>,
        is_hold: bool,
        round_up: bool,
    ) -> String {
        let amount = if round_up { amount.ceil() } else { amount };
        let amount = if amount.fract() == 0.0 && amount.abs() < 1e15 {
            format!("{}", amount as i64)
        } else {
            format_float(amount)
        };
        let comment = comment
            .map(str::to_string)
            .unwrap_or_else(random_order_id);
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("user_id", &self.user_id)
            .append_pair("hold", if is_hold { "1" } else { "0" })
            .append_pair("amount", &amount)
            .append_pair("comment", &comment)
            .finish();
        format!("{MARKET_URL}/balance/transfer?{query}")
    }

    pub async fn get_history(&self, filter: HistoryFilter) -> PaymentResult<Payments> {
        let params = ParameterSet::new()
            .with_opt("type", filter.operation_type)
            .with_opt("pmin", filter.pmin)
            .with_opt("pmax", filter.pmax)
            .with("page", filter.page.unwrap_or(1))
            .with_opt("operation_id_lt", filter.operation_id_lt)
            .with_opt("receiver", filter.receiver)
            .with_opt("sender", filter.sender)
            .with_opt("startDate", filter.start_date)
            .with_opt("endDate", filter.end_date)
            .with_opt("wallet", filter.wallet)
            .with_opt("comment", filter.comment)
            .with_opt("is_hold", filter.is_hold)
            .with_opt("show_payment_stats", filter.show_payment_stats);
        self.get(&format!("/user/{}/payments", self.user_id), params)
            .await?
            .decode()
    }

    /// Whether a transfer of exactly `amount` with `comment` was received
    pub async fn check_status_payment(&self, amount: f64, comment: &str) -> PaymentResult<bool> {
        let history = self
            .get_history(HistoryFilter {
                operation_type: Some("receiving_money".to_string()),
                comment: Some(comment.to_string()),
                pmin: Some(amount),
                pmax: Some(amount),
                ..HistoryFilter::default()
            })
            .await?;
        Ok(!history.payments.is_empty())
    }
}

facade_common!(LolzClient, lolz, ProviderKind::Lolz);
