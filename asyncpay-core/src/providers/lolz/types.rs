//! Lolzteam Market response models

use crate::protocol::de;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    #[serde(deserialize_with = "de::number")]
    pub balance: f64,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub hold: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: i64,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    /// `not_paid`, `paid` or `expired`
    pub status: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_success: Option<String>,
    #[serde(default)]
    pub url_callback: Option<String>,
    #[serde(default)]
    pub merchant_id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub paid_date: Option<i64>,
    #[serde(default)]
    pub additional_data: Option<String>,
}

impl Invoice {
    pub fn is_paid(&self) -> bool {
        self.status == "paid"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoices {
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub per_page: Option<i64>,
    #[serde(default)]
    pub total: Option<i64>,
}

/// One page of the payment history, operations keyed by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payments {
    #[serde(deserialize_with = "keyed_operations")]
    pub payments: Map<String, Value>,
    pub page: i64,
    pub has_next_page: bool,
}

/// An empty history arrives as `[]` instead of `{}`
fn keyed_operations<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Map<String, Value>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        Value::Array(items) if items.is_empty() => Ok(Map::new()),
        Value::Null => Ok(Map::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected payments object, got {other}"
        ))),
    }
}
