//! platega response models

use crate::protocol::de;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Pending,
    Canceled,
    Confirmed,
    Chargebacked,
    #[serde(other)]
    Unknown,
}

/// Answer of `/transaction/process`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub transaction_id: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub payment_method: Option<String>,
    /// Payment page URL
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(rename = "return", default)]
    pub return_url: Option<String>,
    #[serde(default)]
    pub payment_details: Option<Value>,
    pub status: TransactionStatus,
    #[serde(default)]
    pub expires_in: Option<String>,
    #[serde(default)]
    pub merchant_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub usdt_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInfo {
    pub id: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub payment_details: Option<Value>,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub merchant_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub comission: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub expires_in: Option<String>,
    #[serde(rename = "return", default)]
    pub return_url: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub comission_usdt: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount_usdt: Option<f64>,
    #[serde(default)]
    pub qr: Option<String>,
    #[serde(default)]
    pub payform_success_url: Option<String>,
    #[serde(default)]
    pub payload: Option<String>,
    #[serde(default)]
    pub comission_type: Option<i64>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    #[serde(default)]
    pub payment_method: Option<i64>,
    pub currency_from: String,
    pub currency_to: String,
    #[serde(deserialize_with = "de::number")]
    pub rate: f64,
    #[serde(default)]
    pub updated_at: Option<String>,
}
