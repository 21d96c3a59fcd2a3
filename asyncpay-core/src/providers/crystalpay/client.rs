//! crystalPay client implementation

use super::types::{
    Balances, CassaInfo, CreatedInvoice, CreatedPayoff, GeneralStats, InvoiceInfo, PaymentMethods,
    Payoff, Swap, TickerRates,
};
use crate::config::{CrystalPayCredentials, SecretString};
use crate::http::RequestDescriptor;
use crate::protocol::Envelope;
use crate::providers::adapter::ProviderKind;
use crate::providers::context::{facade_common, validate_credentials, ApiContext};
use crate::providers::error::PaymentResult;
use crate::providers::params::{format_float, ParameterSet};
use crate::providers::signature;

/// Where a payoff fee is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtractFrom {
    /// Fee comes out of the sent amount
    Amount,
    /// Fee comes out of the balance; the exact amount is sent
    Balance,
}

impl SubtractFrom {
    fn as_str(&self) -> &'static str {
        match self {
            SubtractFrom::Amount => "amount",
            SubtractFrom::Balance => "balance",
        }
    }
}

/// Optional fields of an invoice
#[derive(Debug, Clone, Default)]
pub struct InvoiceOptions {
    /// Defaults to RUB
    pub amount_currency: Option<String>,
    pub required_methods: Option<String>,
    /// `purchase` (default) or `topup`
    pub kind: Option<String>,
    pub description: Option<String>,
    pub redirect_url: Option<String>,
    pub callback_url: Option<String>,
    pub extra: Option<String>,
    pub payer_details: Option<String>,
    /// Minutes; defaults to 60
    pub lifetime: Option<i64>,
}

/// Optional fields of a payoff
#[derive(Debug, Clone, Default)]
pub struct PayoffOptions {
    pub amount_currency: Option<String>,
    pub callback_url: Option<String>,
    pub extra: Option<String>,
}

/// Client for the crystalPay v2 API
#[derive(Debug, Clone)]
pub struct CrystalPayClient {
    api: ApiContext,
    login: String,
    secret: SecretString,
    salt: SecretString,
}

impl CrystalPayClient {
    pub const BASE_URL: &'static str = "https://api.crystalpay.io/v2";

    pub fn new(
        login: impl Into<String>,
        secret: impl Into<SecretString>,
        salt: impl Into<SecretString>,
    ) -> PaymentResult<Self> {
        Self::from_credentials(CrystalPayCredentials {
            login: login.into(),
            secret: secret.into(),
            salt: salt.into(),
            base_url: None,
        })
    }

    pub fn from_credentials(credentials: CrystalPayCredentials) -> PaymentResult<Self> {
        validate_credentials(ProviderKind::CrystalPay, &credentials)?;
        let mut api = ApiContext::new(ProviderKind::CrystalPay, Self::BASE_URL);
        if let Some(base_url) = &credentials.base_url {
            api.set_base_url(base_url);
        }
        Ok(Self {
            api,
            login: credentials.login,
            secret: credentials.secret,
            salt: credentials.salt,
        })
    }

    fn auth(&self) -> ParameterSet {
        ParameterSet::new()
            .with("auth_login", &self.login)
            .with("auth_secret", self.secret.expose_secret())
    }

    /// POST `auth_login`/`auth_secret` followed by `params` as JSON
    async fn post(&self, path: &str, params: ParameterSet) -> PaymentResult<Envelope> {
        let body = self.auth().extend(params).to_json_string();
        let request = RequestDescriptor::post(self.api.url(path)).json(body);
        self.api.send(request).await
    }

    fn sign_id(&self, id: &str) -> String {
        signature::crystalpay_id(id, self.salt.expose_secret())
    }

    /// Cash register info
    pub async fn get_me(&self, hide_empty: bool) -> PaymentResult<CassaInfo> {
        let params = ParameterSet::new().with("hide_empty", hide_empty);
        self.post("/me/info/", params).await?.decode()
    }

    pub async fn get_balance(&self) -> PaymentResult<Balances> {
        self.post("/balance/info/", ParameterSet::new())
            .await?
            .extract("/balances")
    }

    pub async fn get_payment_methods(&self) -> PaymentResult<PaymentMethods> {
        self.post("/method/list/", ParameterSet::new())
            .await?
            .extract("/methods")
    }

    pub async fn edit_payment_method(
        &self,
        method: &str,
        extra_commission_percent: f64,
        enabled: bool,
    ) -> PaymentResult<bool> {
        let params = ParameterSet::new()
            .with("method", method)
            .with("extra_commission_percent", extra_commission_percent)
            .with("enabled", enabled);
        self.post("/method/edit/", params).await?;
        Ok(true)
    }

    pub async fn create_invoice(
        &self,
        amount: f64,
        options: InvoiceOptions,
    ) -> PaymentResult<CreatedInvoice> {
        let params = ParameterSet::new()
            .with("amount", amount)
            .with(
                "amount_currency",
                options.amount_currency.unwrap_or_else(|| "RUB".to_string()),
            )
            .with_opt("required_methods", options.required_methods)
            .with(
                "type",
                options.kind.unwrap_or_else(|| "purchase".to_string()),
            )
            .with_opt("description", options.description)
            .with_opt("redirect_url", options.redirect_url)
            .with_opt("callback_url", options.callback_url)
            .with_opt("extra", options.extra)
            .with_opt("payer_details", options.payer_details)
            .with("lifetime", options.lifetime.unwrap_or(60));
        self.post("/invoice/create/", params).await?.decode()
    }

    pub async fn get_invoice(&self, invoice_id: &str) -> PaymentResult<InvoiceInfo> {
        let params = ParameterSet::new().with("id", invoice_id);
        self.post("/invoice/info/", params).await?.decode()
    }

    /// Create a payoff request; it must be submitted before it is sent
    pub async fn create_payoff(
        &self,
        amount: f64,
        method: &str,
        wallet: &str,
        subtract_from: SubtractFrom,
        options: PayoffOptions,
    ) -> PaymentResult<CreatedPayoff> {
        let signature = signature::crystalpay_payoff(
            &format_float(amount),
            method,
            wallet,
            self.salt.expose_secret(),
        );
        let params = ParameterSet::new()
            .with("signature", signature)
            .with("amount", amount)
            .with_opt("amount_currency", options.amount_currency)
            .with("method", method)
            .with("wallet", wallet)
            .with("subtract_from", subtract_from.as_str())
            .with_opt("callback_url", options.callback_url)
            .with_opt("extra", options.extra);
        self.post("/payoff/create/", params).await?.decode()
    }

    pub async fn submit_payoff(&self, payoff_id: &str) -> PaymentResult<Payoff> {
        let params = ParameterSet::new()
            .with("signature", self.sign_id(payoff_id))
            .with("id", payoff_id);
        self.post("/payoff/submit/", params).await?.decode()
    }

    pub async fn cancel_payoff(&self, payoff_id: &str) -> PaymentResult<Payoff> {
        let params = ParameterSet::new()
            .with("signature", self.sign_id(payoff_id))
            .with("id", payoff_id);
        self.post("/payoff/cancel/", params).await?.decode()
    }

    pub async fn get_payoff(&self, payoff_id: &str) -> PaymentResult<Payoff> {
        let params = ParameterSet::new().with("id", payoff_id);
        self.post("/payoff/info/", params).await?.decode()
    }

    /// Currency codes the cash register can quote
    pub async fn get_tickers(&self) -> PaymentResult<Vec<String>> {
        self.post("/ticker/list/", ParameterSet::new())
            .await?
            .extract("/tickers")
    }

    pub async fn get_tickers_rate(&self, tickers: &[String]) -> PaymentResult<TickerRates> {
        let params = ParameterSet::new().with("tickers", tickers);
        self.post("/ticker/get/", params).await?.decode()
    }

    /// Quote an exchange of `amount` between two balances
    pub async fn create_swap(
        &self,
        amount: f64,
        from_currency: &str,
        to_currency: &str,
        amount_currency: Option<&str>,
    ) -> PaymentResult<Swap> {
        let params = ParameterSet::new()
            .with("amount", amount)
            .with_opt("amount_currency", amount_currency)
            .with("from_currency", from_currency)
            .with("to_currency", to_currency);
        self.post("/swap/create/", params).await?.decode()
    }

    /// Confirm a quoted swap
    pub async fn submit_swap(&self, swap_id: &str) -> PaymentResult<Swap> {
        let params = ParameterSet::new()
            .with("signature", self.sign_id(swap_id))
            .with("id", swap_id);
        self.post("/swap/submit/", params).await?.decode()
    }

    pub async fn get_swap(&self, swap_id: &str) -> PaymentResult<Swap> {
        let params = ParameterSet::new().with("id", swap_id);
        self.post("/swap/info/", params).await?.decode()
    }

    pub async fn get_payments_history(&self, page: i64, items: i64) -> PaymentResult<Vec<InvoiceInfo>> {
        let params = ParameterSet::new().with("page", page).with("items", items);
        self.post("/history/payments/", params)
            .await?
            .extract("/payments")
    }

    pub async fn get_payoffs_history(&self, page: i64, items: i64) -> PaymentResult<Vec<Payoff>> {
        let params = ParameterSet::new().with("page", page).with("items", items);
        self.post("/history/payoffs/", params)
            .await?
            .extract("/payoffs")
    }

    pub async fn get_general_stats(&self) -> PaymentResult<GeneralStats> {
        self.post("/history/summary/", ParameterSet::new())
            .await?
            .decode()
    }
}

facade_common!(CrystalPayClient, crystalpay, ProviderKind::CrystalPay);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::context::testing::{json_body, MockTransport};
    use serde_json::json;

    fn client(transport: std::sync::Arc<MockTransport>) -> CrystalPayClient {
        CrystalPayClient::new("login", "secret", "salt")
            .unwrap()
            .with_transport(transport)
    }

    #[tokio::test]
    async fn test_auth_fields_lead_every_body() {
        let transport = MockTransport::replying(vec![json!({
            "error": false,
            "errors": [],
            "id": "inv_1",
            "url": "https://pay.crystalpay.io/?i=inv_1",
            "amount": 100,
            "type": "purchase"
        })]);
        let invoice = client(transport.clone())
            .create_invoice(100.0, InvoiceOptions::default())
            .await
            .unwrap();
        assert_eq!(invoice.id, "inv_1");

        let body = json_body(&transport.last());
        let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["auth_login", "auth_secret", "amount", "amount_currency", "type", "lifetime"]
        );
        assert_eq!(body["amount_currency"], "RUB");
        assert_eq!(body["lifetime"], 60);
    }

    #[tokio::test]
    async fn test_payoff_signatures() {
        let transport = MockTransport::replying(vec![
            json!({"error": false, "errors": [], "id": "p1", "amount": 100.5}),
            json!({"error": false, "errors": [], "id": "p1", "state": "processing"}),
        ]);
        let crystal = client(transport.clone());
        crystal
            .create_payoff(100.5, "USDTTRC", "Twallet", SubtractFrom::Balance, PayoffOptions::default())
            .await
            .unwrap();
        let created = json_body(&transport.requests()[0]);
        assert_eq!(
            created["signature"],
            signature::crystalpay_payoff("100.5", "USDTTRC", "Twallet", "salt")
        );
        assert_eq!(created["subtract_from"], "balance");

        let payoff = crystal.submit_payoff("p1").await.unwrap();
        assert_eq!(payoff.state, "processing");
        assert_eq!(
            json_body(&transport.last())["signature"],
            signature::crystalpay_id("p1", "salt")
        );
    }

    #[tokio::test]
    async fn test_error_flag_uses_first_message() {
        let transport = MockTransport::replying(vec![json!({
            "error": true,
            "errors": ["Invalid auth", "second"]
        })]);
        let err = client(transport).get_balance().await.unwrap_err();
        assert_eq!(err.to_string(), "[CrystalPay] Invalid auth");
    }

    #[tokio::test]
    async fn test_balances_keyed_by_method() {
        let transport = MockTransport::replying(vec![json!({
            "error": false,
            "errors": [],
            "balances": {
                "BITCOIN": {"amount": "0.001", "currency": "BTC"},
                "USDTTRC": {"amount": 12, "currency": "USDT"}
            }
        })]);
        let balances = client(transport).get_balance().await.unwrap();
        assert_eq!(balances.len(), 2);
        assert_eq!(balances["USDTTRC"].amount, 12.0);
    }
}
