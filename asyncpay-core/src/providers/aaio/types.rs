//! aaio response models

use crate::protocol::de;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Available, referral and held balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(deserialize_with = "de::number")]
    pub balance: f64,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub referral: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub hold: Option<f64>,
}

/// Order as reported by `/api/info-pay`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(deserialize_with = "de::string")]
    pub order_id: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub merchant_id: Option<String>,
    #[serde(default)]
    pub merchant_domain: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    pub currency: String,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub profit: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub commission: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub commission_client: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub commission_type: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub status: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub expired_date: Option<String>,
    #[serde(default)]
    pub complete_date: Option<String>,
    #[serde(default)]
    pub us_vars: Value,
}

/// Per-currency limits of an order method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyLimits {
    #[serde(rename = "RUB", default, deserialize_with = "de::opt_number")]
    pub rub: Option<f64>,
    #[serde(rename = "UAH", default, deserialize_with = "de::opt_number")]
    pub uah: Option<f64>,
    #[serde(rename = "USD", default, deserialize_with = "de::opt_number")]
    pub usd: Option<f64>,
    #[serde(rename = "EUR", default, deserialize_with = "de::opt_number")]
    pub eur: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderMethod {
    pub min: CurrencyLimits,
    pub max: CurrencyLimits,
    #[serde(deserialize_with = "de::number")]
    pub commission_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalMethod {
    #[serde(deserialize_with = "de::number")]
    pub min: f64,
    #[serde(deserialize_with = "de::number")]
    pub max: f64,
    #[serde(deserialize_with = "de::number")]
    pub commission_percent: f64,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub commission_sum: Option<f64>,
}

/// Withdrawal as reported by `/api/info-payoff`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub id: String,
    #[serde(deserialize_with = "de::string")]
    pub my_id: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub wallet: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount_down: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub commission: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub commission_type: Option<f64>,
    pub status: String,
    #[serde(default)]
    pub cancel_message: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub complete_date: Option<String>,
}

/// Answer of `/api/create-payoff`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedWithdrawal {
    pub id: String,
    #[serde(deserialize_with = "de::string")]
    pub my_id: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub wallet: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount_in_currency: Option<f64>,
    #[serde(default)]
    pub amount_currency: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount_rate: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount_down: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub commission: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub commission_type: Option<f64>,
    pub status: String,
}
