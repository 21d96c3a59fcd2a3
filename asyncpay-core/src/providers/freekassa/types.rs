//! freeKassa response models

use crate::protocol::de;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub currency: String,
    #[serde(deserialize_with = "de::number")]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub merchant_order_id: Option<String>,
    pub fk_order_id: i64,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    /// 0 new, 1 paid, 8 error, 9 cancelled
    pub status: i64,
    #[serde(default)]
    pub payer_account: Option<String>,
}

/// One page of orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orders {
    #[serde(deserialize_with = "de::number")]
    pub pages: f64,
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Answer of `/orders/create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    pub order_id: i64,
    #[serde(default)]
    pub order_hash: Option<String>,
    /// Payment page URL
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub id: i64,
    pub name: String,
    pub currency: String,
    #[serde(default)]
    pub is_enabled: Option<i64>,
    #[serde(default)]
    pub is_favorite: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalCurrency {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub min: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub max: Option<f64>,
    pub currency: String,
    #[serde(default)]
    pub can_exchange: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub activated: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub id: i64,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub ext_currency_id: Option<i64>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    pub status: i64,
}

/// One page of withdrawals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Withdrawals {
    #[serde(deserialize_with = "de::number")]
    pub pages: f64,
    #[serde(default, alias = "orders")]
    pub withdrawals: Vec<Withdrawal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedWithdrawal {
    pub id: i64,
}
