//! crystalPay response models

use crate::protocol::de;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Cash register info from `/me/info/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CassaInfo {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub status_level: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    pub currency: String,
}

/// Balances keyed by method code (`BITCOIN`, `USDTTRC`, ...)
pub type Balances = BTreeMap<String, Balance>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub name: String,
    pub enabled: bool,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub extra_commission_percent: Option<f64>,
    #[serde(default)]
    pub minimal_status_level: Option<i64>,
    pub currency: String,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub commission_percent: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub commission: Option<f64>,
}

/// Payment methods keyed by method code
pub type PaymentMethods = BTreeMap<String, PaymentMethod>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedInvoice {
    pub id: String,
    pub url: String,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount: Option<f64>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceInfo {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    /// `notpayed`, `processing`, `wrongamount`, `failed`, `payed`
    pub state: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub required_method: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub service_commission: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub extra_commission: Option<f64>,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub pay_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub remaining_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub balance_amount: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub callback_url: Option<String>,
    #[serde(default)]
    pub extra: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub expired_at: Option<String>,
}

impl InvoiceInfo {
    pub fn is_paid(&self) -> bool {
        self.state == "payed"
    }
}

/// Answer of `/payoff/create/`, before submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedPayoff {
    pub id: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub commission: Option<f64>,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub rub_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub receive_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub deduction_amount: Option<f64>,
    #[serde(default)]
    pub subtract_from: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payoff {
    pub id: String,
    pub state: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub commission: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub rub_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub receive_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub deduction_amount: Option<f64>,
    #[serde(default)]
    pub subtract_from: Option<String>,
    #[serde(default)]
    pub wallet: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub callback_url: Option<String>,
    #[serde(default)]
    pub extra: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Rates against the base currency (RUB)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerRates {
    pub base_currency: String,
    #[serde(default)]
    pub currencies: BTreeMap<String, Value>,
}

/// Currency exchange inside the cash register
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swap {
    pub id: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub from_currency: Option<String>,
    #[serde(default)]
    pub to_currency: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub amount_currency: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub pay_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub receive_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub rate: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub expired_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default, deserialize_with = "de::opt_number")]
    pub payed_amount: Option<f64>,
    #[serde(default)]
    pub total_count: Option<i64>,
    #[serde(default)]
    pub payed_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralStats {
    pub incoming: Stats,
    pub outgoing: Stats,
}
