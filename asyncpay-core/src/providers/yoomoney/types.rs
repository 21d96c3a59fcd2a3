//! YooMoney wallet response models
//!
//! Business failures arrive in the `error` field of an otherwise normal
//! response, so every model keeps it.

use crate::protocol::de;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(default)]
    pub error: Option<String>,
    pub account: String,
    #[serde(deserialize_with = "de::number")]
    pub balance: f64,
    /// ISO 4217 numeric code, `643` for RUB
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub identified: Option<bool>,
    #[serde(default)]
    pub account_status: Option<String>,
    #[serde(default)]
    pub balance_details: Option<Value>,
    #[serde(default)]
    pub cards_linked: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub operation_id: String,
    /// `success`, `refused` or `in_progress`
    pub status: String,
    pub datetime: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub pattern_id: Option<String>,
    /// `in` or `out`
    pub direction: String,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount_due: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub fee: Option<f64>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub recipient_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub digital_goods: Option<Value>,
    #[serde(default, rename = "spendingCategories")]
    pub spending_categories: Vec<Value>,
    #[serde(default)]
    pub amount_currency: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub categories: Vec<Value>,
    #[serde(default)]
    pub showcase_format: Option<String>,
    #[serde(default)]
    pub is_sbp_operation: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationHistory {
    #[serde(default)]
    pub error: Option<String>,
    /// Start record of the next page, absent on the last one
    #[serde(default)]
    pub next_record: Option<String>,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDetails {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub pattern_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub available_operations: Vec<Value>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount_due: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub fee: Option<f64>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub recipient_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub digital_goods: Option<Value>,
    #[serde(default)]
    pub amount_currency: Option<String>,
    #[serde(default)]
    pub showcase_format: Option<String>,
    #[serde(default)]
    pub is_sbp_operation: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPayment {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    /// `success` or `refused`
    pub status: String,
    #[serde(default)]
    pub money_source: Option<Value>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub contract_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub balance: Option<f64>,
    #[serde(default)]
    pub recipient_account_status: Option<String>,
    #[serde(default)]
    pub recipient_account_type: Option<String>,
    #[serde(default)]
    pub account_unblock_uri: Option<String>,
    #[serde(default)]
    pub ext_action_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessPayment {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    /// `success`, `refused`, `in_progress` or `ext_auth_required`
    pub status: String,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub balance: Option<f64>,
    #[serde(default)]
    pub invoice_id: Option<String>,
    #[serde(default)]
    pub payer: Option<String>,
    #[serde(default)]
    pub payee: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub credit_amount: Option<f64>,
    #[serde(default)]
    pub account_unblock_uri: Option<String>,
    #[serde(default)]
    pub acs_uri: Option<String>,
    #[serde(default)]
    pub acs_params: Option<Value>,
    #[serde(default)]
    pub next_retry: Option<i64>,
    #[serde(default)]
    pub digital_goods: Option<Value>,
}
