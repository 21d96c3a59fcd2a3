//! xRocket Pay response models

use crate::protocol::de;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub currency: String,
    #[serde(deserialize_with = "de::number")]
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub name: String,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub fee_percents: Option<f64>,
    #[serde(default)]
    pub balances: Vec<Balance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: i64,
    pub tg_user_id: i64,
    pub currency: String,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    pub network: String,
    pub address: String,
    pub currency: String,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    pub withdrawal_id: String,
    /// `CREATED`, `COMPLETED` or `FAIL`
    pub status: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub tx_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeWithdraw {
    #[serde(deserialize_with = "de::number")]
    pub fee: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkFee {
    pub network_code: String,
    #[serde(default)]
    pub fee_withdraw: Option<FeeWithdraw>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalFees {
    pub code: String,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub min_withdraw: Option<f64>,
    #[serde(default)]
    pub fees: Vec<NetworkFee>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiCheque {
    pub id: i64,
    pub currency: String,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub per_user: Option<f64>,
    #[serde(default)]
    pub users: Option<i64>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub send_notifications: Option<bool>,
    #[serde(default)]
    pub captcha_enabled: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub ref_program_percents: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub ref_reward_per_user: Option<f64>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub disabled_languages: Vec<String>,
    #[serde(default)]
    pub enabled_countries: Vec<String>,
    #[serde(default)]
    pub for_premium: Option<i64>,
    #[serde(default)]
    pub for_new_users_only: Option<i64>,
    #[serde(default)]
    pub linked_wallet: Option<i64>,
    #[serde(default)]
    pub tg_resources: Vec<Value>,
    #[serde(default)]
    pub activations: Option<i64>,
    #[serde(default)]
    pub ref_rewards: Option<i64>,
}

/// Page of a listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: i64,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayment {
    pub user_id: i64,
    #[serde(default)]
    pub payment_num: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub payment_amount: Option<f64>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub paid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub min_payment: Option<f64>,
    #[serde(default)]
    pub total_activations: Option<i64>,
    #[serde(default)]
    pub activations_left: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hidden_message: Option<String>,
    #[serde(default)]
    pub payload: Option<String>,
    #[serde(default)]
    pub callback_url: Option<String>,
    #[serde(default)]
    pub comments_enabled: Option<Value>,
    pub currency: String,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub paid: Option<String>,
    /// `active`, `paid` or `expired`
    pub status: String,
    #[serde(default)]
    pub expired_in: Option<i64>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub payments: Vec<InvoicePayment>,
}

impl Invoice {
    pub fn is_paid(&self) -> bool {
        self.status == "paid"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub currency: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub min_transfer: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub min_cheque: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub min_invoice: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub min_withdraw: Option<f64>,
    #[serde(default)]
    pub fee_withdraw: Option<Value>,
}

/// Billing period of a subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// `DAY`, `WEEK`, `MONTH`, `YEAR` or `FOREVER`
    pub interval: String,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    /// `ACTIVE`, `ARCHIVE` or `DELETED`
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TgResource {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub linked_chat: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub currency: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, rename = "interval", deserialize_with = "one_or_many")]
    pub intervals: Vec<Interval>,
    #[serde(default)]
    pub referral_percent: Option<i64>,
    #[serde(default)]
    pub return_url: Option<String>,
    #[serde(default)]
    pub tg_resource: Option<TgResource>,
}

/// Whether a user holds a paid subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionCheck {
    pub subscription_id: i64,
    #[serde(default)]
    pub subscription_code: Option<String>,
    pub user_id: i64,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub interval: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub ref_fee: Option<f64>,
    #[serde(default)]
    pub is_ref_pay: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub payment_start: Option<String>,
    #[serde(default)]
    pub payment_end: Option<String>,
    #[serde(default)]
    pub auto_renewal: Option<bool>,
    #[serde(default)]
    pub transactions: Vec<Value>,
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Interval>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(Interval),
        Many(Vec<Interval>),
        None(()),
    }
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(interval) => vec![interval],
        OneOrMany::Many(intervals) => intervals,
        OneOrMany::None(()) => Vec::new(),
    })
}
