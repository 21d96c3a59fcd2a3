//! ruKassa response models

use crate::protocol::de;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(deserialize_with = "de::number")]
    pub balance_rub: f64,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub balance_usd: Option<f64>,
}

/// Answer of `/create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedPayment {
    pub id: i64,
    #[serde(default)]
    pub hash: Option<String>,
    /// Payment page URL
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub in_amount: Option<f64>,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    /// `WAIT`, `PAID`, `CANCEL` or `REFUND`
    pub status: String,
    #[serde(default)]
    pub data: Option<String>,
}

impl Payment {
    pub fn is_paid(&self) -> bool {
        self.status == "PAID"
    }
}

/// Answer of `/createWithdraw` and `/cancelWithdraw`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawStatus {
    pub id: i64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Withdraw {
    pub id: i64,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub order_id: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub fee: Option<f64>,
    #[serde(default)]
    pub way: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub who_fee: Option<String>,
    pub status: String,
}
