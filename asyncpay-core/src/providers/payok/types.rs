//! payok response models
//!
//! payok sends most numbers as strings; amounts go through the lenient
//! number helpers.

use crate::protocol::de;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(deserialize_with = "de::number")]
    pub balance: f64,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub ref_balance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "de::string")]
    pub transaction: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub currency_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub comission_percent: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub comission_fixed: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount_profit: Option<f64>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub pay_date: Option<String>,
    /// `1` once paid
    #[serde(default, deserialize_with = "de::opt_string")]
    pub transaction_status: Option<String>,
    #[serde(default)]
    pub custom_fields: Option<Value>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub webhook_status: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub webhook_amount: Option<f64>,
}

impl Transaction {
    pub fn is_paid(&self) -> bool {
        self.transaction_status.as_deref() == Some("1")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    #[serde(deserialize_with = "de::string")]
    pub payout: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub reciever: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub comission_percent: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub comission_fixed: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount_profit: Option<f64>,
    #[serde(default)]
    pub date_create: Option<String>,
    #[serde(default)]
    pub date_pay: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub status: Option<String>,
}

/// Payout as echoed by `/payout_create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedPayoutData {
    #[serde(deserialize_with = "de::string")]
    pub payout_id: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub reciever: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub comission_percent: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub comission_fixed: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount_profit: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub payout_status_code: Option<i64>,
    #[serde(default)]
    pub payout_status_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedPayout {
    #[serde(deserialize_with = "de::number")]
    pub remain_balance: f64,
    #[serde(rename = "data")]
    pub payout: CreatedPayoutData,
}
