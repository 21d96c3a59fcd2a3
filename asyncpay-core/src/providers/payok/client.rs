//! payok client implementation

use super::types::{Balance, CreatedPayout, Payout, Transaction};
use crate::config::{PayokCredentials, SecretString};
use crate::http::RequestDescriptor;
use crate::protocol::Envelope;
use crate::providers::adapter::ProviderKind;
use crate::providers::context::{facade_common, validate_credentials, ApiContext};
use crate::providers::error::{PaymentError, PaymentResult};
use crate::providers::params::{format_float, ParameterSet};
use crate::providers::signature;
use serde::de::DeserializeOwned;

/// Payment form served outside the API prefix
pub const PAY_FORM_URL: &str = "https://payok.io/pay";

/// Who pays the payout fee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommissionType {
    Balance,
    Payment,
}

impl CommissionType {
    fn as_str(&self) -> &'static str {
        match self {
            CommissionType::Balance => "balance",
            CommissionType::Payment => "payment",
        }
    }
}

/// Optional fields of a payment form link
#[derive(Debug, Clone, Default)]
pub struct PayFormOptions {
    /// Defaults to RUB
    pub currency: Option<String>,
    /// Defaults to `Description`; part of the signature
    pub desc: Option<String>,
    pub email: Option<String>,
    pub success_url: Option<String>,
    pub method: Option<String>,
    pub lang: Option<String>,
    pub custom: Option<String>,
}

/// Client for the payok API
#[derive(Debug, Clone)]
pub struct PayokClient {
    api: ApiContext,
    api_id: String,
    api_key: SecretString,
    shop_id: String,
    secret_key: SecretString,
}

impl PayokClient {
    pub const BASE_URL: &'static str = "https://payok.io/api";

    pub fn new(
        api_id: impl Into<String>,
        api_key: impl Into<SecretString>,
        shop_id: impl Into<String>,
        secret_key: impl Into<SecretString>,
    ) -> PaymentResult<Self> {
        Self::from_credentials(PayokCredentials {
            api_id: api_id.into(),
            api_key: api_key.into(),
            shop_id: shop_id.into(),
            secret_key: secret_key.into(),
            base_url: None,
        })
    }

    pub fn from_credentials(credentials: PayokCredentials) -> PaymentResult<Self> {
        validate_credentials(ProviderKind::Payok, &credentials)?;
        let mut api = ApiContext::new(ProviderKind::Payok, Self::BASE_URL);
        if let Some(base_url) = &credentials.base_url {
            api.set_base_url(base_url);
        }
        Ok(Self {
            api,
            api_id: credentials.api_id,
            api_key: credentials.api_key,
            shop_id: credentials.shop_id,
            secret_key: credentials.secret_key,
        })
    }

    /// POST a form led by `API_ID` and `API_KEY`
    async fn post(&self, path: &str, params: ParameterSet) -> PaymentResult<Envelope> {
        let params = ParameterSet::new()
            .with("API_ID", &self.api_id)
            .with("API_KEY", self.api_key.expose_secret())
            .extend(params);
        let request = RequestDescriptor::post(self.api.url(path)).form(self.api.pairs(&params));
        self.api.send(request).await
    }

    pub async fn get_balance(&self) -> PaymentResult<Balance> {
        self.post("/balance", ParameterSet::new()).await?.decode()
    }

    /// Recent transactions of the shop, newest first
    pub async fn get_transactions(&self, offset: Option<i64>) -> PaymentResult<Vec<Transaction>> {
        let params = ParameterSet::new()
            .with("shop", &self.shop_id)
            .with_opt("offset", offset);
        let envelope = self.post("/transaction", params).await?;
        numbered_records(&envelope)
    }

    /// One transaction by your payment id
    pub async fn get_transaction(&self, payment: &str) -> PaymentResult<Transaction> {
        let params = ParameterSet::new()
            .with("shop", &self.shop_id)
            .with("payment", payment);
        let envelope = self.post("/transaction", params).await?;
        first_record(&envelope)
    }

    pub async fn get_payouts(&self, offset: Option<i64>) -> PaymentResult<Vec<Payout>> {
        let params = ParameterSet::new().with_opt("offset", offset);
        let envelope = self.post("/payout", params).await?;
        numbered_records(&envelope)
    }

    pub async fn get_payout(&self, payout_id: i64) -> PaymentResult<Payout> {
        let params = ParameterSet::new().with("payout_id", payout_id);
        let envelope = self.post("/payout", params).await?;
        first_record(&envelope)
    }

    pub async fn create_payout(
        &self,
        amount: f64,
        method: &str,
        reciever: &str,
        commission_type: CommissionType,
        sbp_bank: Option<&str>,
        webhook_url: Option<&str>,
    ) -> PaymentResult<CreatedPayout> {
        let params = ParameterSet::new()
            .with("amount", amount)
            .with("method", method)
            .with("reciever", reciever)
            .with("commission_type", commission_type.as_str())
            .with_opt("sbp_bank", sbp_bank)
            .with_opt("webhook_url", webhook_url);
        self.post("/payout_create", params).await?.decode()
    }

    /// Signed payment form link; built locally, no request is made
    pub fn create_pay(&self, amount: f64, payment: &str, options: PayFormOptions) -> String {
        let amount = format_float(amount);
        let currency = options.currency.unwrap_or_else(|| "RUB".to_string());
        let desc = options.desc.unwrap_or_else(|| "Description".to_string());
        let sign = signature::payok(
            &amount,
            payment,
            &self.shop_id,
            &currency,
            &desc,
            self.secret_key.expose_secret(),
        );
        let params = ParameterSet::new()
            .with("amount", amount)
            .with("payment", payment)
            .with("shop", &self.shop_id)
            .with("currency", currency)
            .with("desc", desc)
            .with_opt("email", options.email)
            .with_opt("success_url", options.success_url)
            .with_opt("method", options.method)
            .with_opt("lang", options.lang)
            .with_opt("custom", options.custom)
            .with("sign", sign);
        format!(
            "{PAY_FORM_URL}?{}",
            params.to_query_string(ProviderKind::Payok.bool_encoding())
        )
    }
}

facade_common!(PayokClient, payok, ProviderKind::Payok);

/// Records keyed `"1"`, `"2"`, ... next to a `status` field, in key order
fn numbered_records<T: DeserializeOwned>(envelope: &Envelope) -> PaymentResult<Vec<T>> {
    let provider = envelope.provider();
    let Some(object) = envelope.body().as_object() else {
        return Err(PaymentError::decode(provider, "expected an object of records"));
    };
    let mut records: Vec<(u64, &serde_json::Value)> = object
        .iter()
        .filter_map(|(key, value)| key.parse::<u64>().ok().map(|n| (n, value)))
        .collect();
    records.sort_by_key(|(n, _)| *n);
    records
        .into_iter()
        .map(|(n, value)| {
            T::deserialize(value)
                .map_err(|e| PaymentError::decode(provider, format!("invalid record {n}: {e}")))
        })
        .collect()
}

fn first_record<T: DeserializeOwned>(envelope: &Envelope) -> PaymentResult<T> {
    numbered_records(envelope)?
        .into_iter()
        .next()
        .ok_or_else(|| PaymentError::unexpected(envelope.provider(), "no record returned"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::context::testing::{form, keys, value, MockTransport};
    use serde_json::json;
    use std::sync::Arc;

    fn client(transport: Arc<MockTransport>) -> PayokClient {
        PayokClient::new("7", "apikey", "42", "secret")
            .unwrap()
            .with_transport(transport)
    }

    #[test]
    fn test_pay_link_is_signed() {
        let payok = client(MockTransport::replying(vec![]));
        let link = payok.create_pay(100.0, "order1", PayFormOptions::default());
        assert!(link.starts_with("https://payok.io/pay?amount=100.0&payment=order1&shop=42"));
        assert!(link.ends_with("&sign=acefb285998913676131035163cb9f0c"));
        assert!(!link.contains("email"));
    }

    #[tokio::test]
    async fn test_transactions_are_read_from_numbered_keys() {
        let transport = MockTransport::replying(vec![json!({
            "status": "success",
            "2": {"transaction": "11", "amount": "50", "transaction_status": "0"},
            "1": {"transaction": "12", "amount": "100", "transaction_status": "1"}
        })]);
        let transactions = client(transport.clone()).get_transactions(None).await.unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].transaction, "12");
        assert!(transactions[0].is_paid());
        assert_eq!(transactions[1].amount, 50.0);

        let pairs = form(&transport.last());
        assert_eq!(keys(&pairs), vec!["API_ID", "API_KEY", "shop"]);
        assert_eq!(value(&pairs, "API_KEY"), Some("apikey"));
    }

    #[tokio::test]
    async fn test_single_transaction() {
        let transport = MockTransport::replying(vec![json!({
            "status": "success",
            "1": {"transaction": "12", "amount": 100, "payment_id": 5}
        })]);
        let tx = client(transport).get_transaction("5").await.unwrap();
        assert_eq!(tx.payment_id.as_deref(), Some("5"));
    }

    #[tokio::test]
    async fn test_missing_record_is_unexpected() {
        let transport = MockTransport::replying(vec![json!({"status": "success"})]);
        let err = client(transport).get_payout(3).await.unwrap_err();
        assert!(matches!(err, PaymentError::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn test_status_error_carries_code() {
        let transport = MockTransport::replying(vec![json!({
            "status": "error",
            "text": "Invalid API key",
            "error_code": "2"
        })]);
        let err = client(transport).get_balance().await.unwrap_err();
        assert_eq!(err.to_string(), "[Payok] Invalid API key (code 2)");
    }

    #[tokio::test]
    async fn test_create_payout() {
        let transport = MockTransport::replying(vec![json!({
            "status": "success",
            "remain_balance": "900",
            "data": {"payout_id": 31, "amount": 100, "payout_status_code": 0}
        })]);
        let created = client(transport.clone())
            .create_payout(100.0, "card", "2200000000000000", CommissionType::Balance, None, None)
            .await
            .unwrap();
        assert_eq!(created.remain_balance, 900.0);
        assert_eq!(created.payout.payout_id, "31");
        assert_eq!(value(&form(&transport.last()), "commission_type"), Some("balance"));
    }
}
