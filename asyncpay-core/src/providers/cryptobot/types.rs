//! Crypto Pay response models

use crate::protocol::de;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppInfo {
    pub app_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub payment_processing_bot_username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: i64,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub currency_type: Option<String>,
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default)]
    pub fiat: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub paid_asset: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub paid_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub paid_fiat_rate: Option<f64>,
    #[serde(default)]
    pub accepted_assets: Option<Vec<String>>,
    #[serde(default)]
    pub fee_asset: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub fee_amount: Option<f64>,
    #[serde(default)]
    pub bot_invoice_url: Option<String>,
    #[serde(default)]
    pub mini_app_invoice_url: Option<String>,
    #[serde(default)]
    pub web_app_invoice_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub paid_usd_rate: Option<f64>,
    #[serde(default)]
    pub allow_comments: Option<bool>,
    #[serde(default)]
    pub allow_anonymous: Option<bool>,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub paid_at: Option<String>,
    #[serde(default)]
    pub paid_anonymously: Option<bool>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub hidden_message: Option<String>,
    #[serde(default)]
    pub payload: Option<String>,
    #[serde(default)]
    pub paid_btn_name: Option<String>,
    #[serde(default)]
    pub paid_btn_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub check_id: i64,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub bot_check_url: Option<String>,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub activated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub transfer_id: i64,
    #[serde(default)]
    pub spend_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount: Option<f64>,
    pub status: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub currency_code: String,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub available: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub onhold: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    #[serde(default)]
    pub is_valid: Option<bool>,
    #[serde(default)]
    pub is_crypto: Option<bool>,
    #[serde(default)]
    pub is_fiat: Option<bool>,
    pub source: String,
    pub target: String,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub is_blockchain: Option<bool>,
    #[serde(default)]
    pub is_stablecoin: Option<bool>,
    #[serde(default)]
    pub is_fiat: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    pub code: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub decimals: Option<i64>,
}

/// `result.items` wrapper of list endpoints
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Items<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}
